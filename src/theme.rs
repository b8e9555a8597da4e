use eframe::egui::{self, Color32, CornerRadius, FontId, Frame, Margin, Stroke, TextStyle};

#[derive(Debug, Clone)]
pub struct Theme {
    pub surface_app: Color32,
    pub surface_sidebar: Color32,
    pub surface_dark: Color32,
    pub surface_card: Color32,
    pub surface_row: Color32,
    pub surface_drop_hover: Color32,
    pub toggle_selected: Color32,
    pub toggle_idle: Color32,
    pub accent: Color32,
    pub accent_strong: Color32,
    pub danger: Color32,
    pub text_primary: Color32,
    pub text_secondary: Color32,
    pub text_muted: Color32,
    pub text_on_dark: Color32,
    pub border: Color32,
    pub modal_backdrop: Color32,
    pub spacing_4: f32,
    pub spacing_8: f32,
    pub spacing_12: f32,
    pub spacing_16: f32,
    pub spacing_24: f32,
    pub radius_4: u8,
    pub radius_8: u8,
    pub radius_16: u8,
    pub button_height: f32,
    pub progress_height: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            surface_app: Color32::from_rgb(0xF5, 0xF5, 0xF5),
            surface_sidebar: Color32::WHITE,
            surface_dark: Color32::from_rgb(20, 20, 20),
            surface_card: Color32::WHITE,
            surface_row: Color32::from_rgb(0xF9, 0xF9, 0xF9),
            surface_drop_hover: Color32::from_rgb(0xEC, 0xF0, 0xF1),
            toggle_selected: Color32::from_rgb(0xE5, 0xE7, 0xEB),
            toggle_idle: Color32::from_rgb(0xF3, 0xF4, 0xF6),
            accent: Color32::from_rgb(0x34, 0x98, 0xDB),
            accent_strong: Color32::from_rgb(0x00, 0x7B, 0xFF),
            danger: Color32::from_rgb(0xE7, 0x4C, 0x3C),
            text_primary: Color32::BLACK,
            text_secondary: Color32::from_rgb(0x33, 0x33, 0x33),
            text_muted: Color32::from_rgb(0x66, 0x66, 0x66),
            text_on_dark: Color32::WHITE,
            border: Color32::from_rgb(0xDD, 0xDD, 0xDD),
            modal_backdrop: Color32::from_rgba_premultiplied(0, 0, 0, 128),
            spacing_4: 4.0,
            spacing_8: Self::P8,
            spacing_12: 12.0,
            spacing_16: Self::P16,
            spacing_24: Self::P24,
            radius_4: 4,
            radius_8: Self::R8,
            radius_16: Self::R16,
            button_height: 35.0,
            progress_height: 8.0,
        }
    }
}

impl Theme {
    pub const R8: u8 = 8;
    pub const R16: u8 = 16;
    pub const P8: f32 = 8.0;
    pub const P16: f32 = 16.0;
    pub const P24: f32 = 24.0;

    pub fn apply_visuals(&self, ctx: &egui::Context) {
        let mut visuals = egui::Visuals::light();
        visuals.panel_fill = self.surface_app;
        visuals.widgets.noninteractive.fg_stroke.color = self.text_primary;
        visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, self.border);
        visuals.widgets.inactive.bg_fill = self.toggle_idle;
        visuals.widgets.inactive.weak_bg_fill = self.toggle_idle;
        visuals.widgets.inactive.bg_stroke = Stroke::NONE;
        visuals.widgets.hovered.bg_fill = self.toggle_selected;
        visuals.widgets.hovered.weak_bg_fill = self.toggle_selected;
        visuals.widgets.active.bg_fill = self.toggle_selected;
        visuals.selection.bg_fill = self.accent;
        visuals.hyperlink_color = self.accent_strong;
        visuals.window_fill = self.surface_card;
        visuals.window_stroke = Stroke::NONE;
        visuals.window_corner_radius = CornerRadius::same(18);
        visuals.window_shadow = egui::epaint::Shadow {
            offset: [0, 8],
            blur: 24,
            spread: 0,
            color: Color32::from_rgba_premultiplied(0, 0, 0, 51),
        };
        let mut style = (*ctx.style()).clone();
        style.visuals = visuals;
        style.spacing.item_spacing = egui::vec2(10.0, 10.0);
        style.spacing.button_padding = egui::vec2(16.0, 8.0);
        style.text_styles.insert(TextStyle::Heading, FontId::proportional(20.0));
        style.text_styles.insert(TextStyle::Body, FontId::proportional(14.0));
        style.text_styles.insert(TextStyle::Monospace, FontId::monospace(13.0));
        style.text_styles.insert(TextStyle::Small, FontId::proportional(12.0));
        ctx.set_style(style);
    }

    pub fn panel_frame(&self, fill: Color32) -> Frame {
        Frame::new()
            .fill(fill)
            .inner_margin(Margin::same(20))
            .corner_radius(CornerRadius::same(self.radius_16))
            .stroke(Stroke::new(1.0, self.border))
    }

    pub fn card_frame(&self) -> Frame {
        Frame::new()
            .fill(self.surface_card)
            .inner_margin(Margin::same(self.spacing_24 as i8))
            .corner_radius(CornerRadius::same(self.radius_8))
            .stroke(Stroke::new(1.0, self.toggle_selected))
            .shadow(egui::epaint::Shadow {
                offset: [0, 2],
                blur: 4,
                spread: 0,
                color: Color32::from_rgba_premultiplied(0, 0, 0, 13),
            })
    }

    pub fn file_row_frame(&self) -> Frame {
        Frame::new()
            .fill(self.surface_row)
            .inner_margin(Margin::same(self.spacing_16 as i8))
            .corner_radius(CornerRadius::same(self.radius_8))
            .stroke(Stroke::new(1.0, self.toggle_selected))
    }

    pub fn drop_zone_frame(&self, drag_active: bool) -> Frame {
        Frame::new()
            .fill(if drag_active {
                self.surface_drop_hover
            } else {
                self.surface_card
            })
            .inner_margin(Margin::same(40))
            .corner_radius(CornerRadius::same(self.radius_8))
            .stroke(Stroke::new(2.0, self.accent))
    }

    pub fn composer_frame(&self) -> Frame {
        Frame::new()
            .fill(Color32::from_rgb(0xF8, 0xF8, 0xF8))
            .inner_margin(Margin::symmetric(20, 10))
            .corner_radius(CornerRadius::same(20))
            .stroke(Stroke::NONE)
    }

    /// Fill and text colour for a sidebar row; the active row is inverted.
    pub fn session_row_colors(&self, active: bool) -> (Color32, Color32) {
        if active {
            (self.surface_dark, self.text_on_dark)
        } else {
            (Color32::TRANSPARENT, self.text_secondary)
        }
    }

    pub fn toggle_fill(&self, selected: bool) -> Color32 {
        if selected {
            self.toggle_selected
        } else {
            self.toggle_idle
        }
    }

    pub fn toggle_text(&self, selected: bool) -> Color32 {
        if selected {
            self.text_primary
        } else {
            self.text_muted
        }
    }
}
