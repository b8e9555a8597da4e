use crate::session::{Message, SessionId};

pub const DEFAULT_GREETING: &str = "To end the conversation, type 'Exit'";
pub const DEFAULT_REPLY: &str = "Hello! How can I help you today?";

/// Produces the bot side of a conversation.
pub trait ReplyProvider: Send + Sync {
    fn reply(&self, history: &[Message], user_message: &Message) -> String;
}

#[derive(Debug, Clone)]
pub struct CannedReply {
    reply: String,
}

impl CannedReply {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}

impl Default for CannedReply {
    fn default() -> Self {
        Self::new(DEFAULT_REPLY)
    }
}

impl ReplyProvider for CannedReply {
    fn reply(&self, _history: &[Message], _user_message: &Message) -> String {
        self.reply.clone()
    }
}

/// Message history for one mount of the chat panel.
///
/// A transcript belongs to a single session id; switching sessions mounts a
/// fresh one, so nothing carries over.
#[derive(Debug, Clone)]
pub struct ChatTranscript {
    session_id: SessionId,
    messages: Vec<Message>,
    pub input: String,
    scroll_to_bottom: bool,
}

impl ChatTranscript {
    pub fn mount(session_id: SessionId, greeting: &str) -> Self {
        Self {
            session_id,
            messages: vec![Message::bot(greeting)],
            input: String::new(),
            scroll_to_bottom: true,
        }
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Appends the user message and the reply together, then clears the input.
    pub fn send(&mut self, replies: &dyn ReplyProvider) -> bool {
        if self.input.trim().is_empty() {
            return false;
        }

        let user_message = Message::user(std::mem::take(&mut self.input));
        let reply = replies.reply(&self.messages, &user_message);
        self.messages.push(user_message);
        self.messages.push(Message::bot(reply));
        self.scroll_to_bottom = true;
        true
    }

    /// Returns the pending scroll request and clears it.
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_to_bottom)
    }
}
