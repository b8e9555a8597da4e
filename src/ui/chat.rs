use crate::session::chat::{ChatTranscript, ReplyProvider};
use crate::session::{Message, Sender};
use crate::theme::Theme;
use eframe::egui::{self, CornerRadius, Margin, RichText, ScrollArea};

pub fn show_main_content(
    ui: &mut egui::Ui,
    theme: &Theme,
    title: &str,
    chat: Option<&mut ChatTranscript>,
    replies: &dyn ReplyProvider,
) {
    ui.vertical_centered(|ui| {
        ui.label(
            RichText::new("CAZE")
                .color(theme.text_on_dark)
                .size(40.0)
                .strong(),
        );
        ui.label(
            RichText::new(spaced(title))
                .color(theme.text_on_dark)
                .size(20.0),
        );
    });
    ui.add_space(theme.spacing_4);
    ui.separator();

    match chat {
        Some(chat) => show_chat(ui, theme, chat, replies),
        None => {
            ui.label(
                RichText::new("Select a chat session or create a new one.")
                    .color(theme.text_on_dark),
            );
        }
    }
}

fn show_chat(
    ui: &mut egui::Ui,
    theme: &Theme,
    chat: &mut ChatTranscript,
    replies: &dyn ReplyProvider,
) {
    let scroll_now = chat.take_scroll_request();
    let transcript_height = (ui.available_height() - 80.0).max(120.0);
    ScrollArea::vertical()
        .id_salt(("chat_transcript", chat.session_id().as_str()))
        .max_height(transcript_height)
        .auto_shrink([false, false])
        .stick_to_bottom(true)
        .show(ui, |ui| {
            for message in chat.messages() {
                message_bubble(ui, theme, message);
            }
            if scroll_now {
                ui.scroll_to_cursor(Some(egui::Align::BOTTOM));
            }
        });

    ui.add_space(theme.spacing_8);
    let mut send_now = false;
    theme.composer_frame().show(ui, |ui| {
        ui.horizontal(|ui| {
            let send_width = 40.0;
            let response = ui.add(
                egui::TextEdit::singleline(&mut chat.input)
                    .desired_width((ui.available_width() - send_width).max(80.0))
                    .text_color(egui::Color32::from_rgb(0x49, 0x45, 0x4F))
                    .frame(false)
                    .hint_text("Type a message..."),
            );
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                send_now = true;
                response.request_focus();
            }

            let send = egui::Button::new(RichText::new("➤").size(20.0).color(theme.text_muted))
                .frame(false);
            send_now |= ui.add(send).on_hover_text("Send").clicked();
        });
    });

    if send_now && chat.send(replies) {
        ui.ctx().request_repaint();
    }
}

fn message_bubble(ui: &mut egui::Ui, theme: &Theme, message: &Message) {
    let (layout, fill, text, prefix) = match message.sender {
        Sender::User => (
            egui::Layout::right_to_left(egui::Align::TOP),
            theme.accent,
            theme.text_on_dark,
            "",
        ),
        Sender::Bot => (
            egui::Layout::left_to_right(egui::Align::TOP),
            theme.toggle_idle,
            theme.text_primary,
            "🤖 ",
        ),
    };
    ui.with_layout(layout, |ui| {
        egui::Frame::new()
            .fill(fill)
            .corner_radius(CornerRadius::same(theme.radius_16))
            .inner_margin(Margin::symmetric(14, 8))
            .show(ui, |ui| {
                ui.set_max_width(ui.available_width() * 0.7);
                ui.label(RichText::new(format!("{prefix}{}", message.content)).color(text));
            });
    });
    ui.add_space(theme.spacing_4);
}

/// Wide letter spacing for the header title.
fn spaced(title: &str) -> String {
    title
        .chars()
        .map(|ch| ch.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
