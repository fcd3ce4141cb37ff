//! Chat conversation state.

use dino_types::{ChatPayload, ChatReply};

use crate::error::ApiError;
use crate::panels::{Completion, PendingRequest};
use crate::request::{RequestToken, RequestTracker};

/// Greeting for the local hour of day (0-23).
pub fn greeting(hour: u32) -> &'static str {
    match hour {
        5..=11 => "Good Morning",
        12..=14 => "Good Afternoon",
        15..=17 => "Good Evening",
        _ => "Good Night",
    }
}

/// Remove `**bold**` markers, keeping the enclosed text. An unpaired `**`
/// is left alone.
pub fn clean_reply(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find("**") {
        let after = &rest[open + 2..];
        match after.find("**") {
            Some(close) => {
                out.push_str(&rest[..open]);
                out.push_str(&after[..close]);
                rest = &after[close + 2..];
            }
            None => break,
        }
    }
    out.push_str(rest);
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageState {
    Pending,
    Delivered,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
    pub state: MessageState,
}

/// The conversation plus its single in-flight reply.
#[derive(Debug, Default)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
    tracker: RequestTracker,
}

impl ChatLog {
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn is_pending(&self) -> bool {
        self.tracker.in_flight()
    }

    /// Post the user's message and a pending reply.
    ///
    /// Returns `None` for blank input or while a reply is still pending.
    pub fn submit(&mut self, input: &str) -> Option<PendingRequest<ChatPayload>> {
        let input = input.trim();
        if input.is_empty() || self.is_pending() {
            return None;
        }
        let token = self.tracker.begin();
        self.messages.push(ChatMessage {
            role: ChatRole::User,
            text: input.to_string(),
            state: MessageState::Delivered,
        });
        self.messages.push(ChatMessage {
            role: ChatRole::Assistant,
            text: String::new(),
            state: MessageState::Pending,
        });
        tracing::debug!(%token, "chat message submitted");
        Some(PendingRequest {
            token,
            payload: ChatPayload {
                user_input: input.to_string(),
            },
        })
    }

    pub fn complete(&mut self, token: RequestToken, reply: Result<ChatReply, ApiError>) -> Completion {
        if !self.tracker.finish(token) {
            tracing::warn!(%token, "discarding chat reply");
            return Completion::Discarded;
        }
        let Some(pending) = self
            .messages
            .iter_mut()
            .rev()
            .find(|m| m.state == MessageState::Pending)
        else {
            return Completion::Discarded;
        };
        match reply {
            Ok(reply) => {
                pending.text = clean_reply(&reply.result);
                pending.state = MessageState::Delivered;
                Completion::Rendered
            }
            Err(err) => {
                let message = err.user_message();
                pending.text = message.clone();
                pending.state = MessageState::Failed;
                Completion::Failed(message)
            }
        }
    }

    /// Delete the conversation; a reply still in flight is dropped.
    pub fn clear(&mut self) {
        self.tracker.invalidate();
        self.messages.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greeting_by_hour() {
        assert_eq!(greeting(4), "Good Night");
        assert_eq!(greeting(5), "Good Morning");
        assert_eq!(greeting(11), "Good Morning");
        assert_eq!(greeting(12), "Good Afternoon");
        assert_eq!(greeting(15), "Good Evening");
        assert_eq!(greeting(17), "Good Evening");
        assert_eq!(greeting(18), "Good Night");
        assert_eq!(greeting(0), "Good Night");
    }

    #[test]
    fn strips_bold_markers() {
        assert_eq!(clean_reply("The **mean** is **4**."), "The mean is 4.");
        assert_eq!(clean_reply("a ** b"), "a ** b");
        assert_eq!(clean_reply("****"), "");
    }

    #[test]
    fn submit_and_reply() {
        let mut chat = ChatLog::default();
        let request = chat.submit("  hello ").unwrap();
        assert_eq!(request.payload.user_input, "hello");
        assert!(chat.is_pending());
        assert!(chat.submit("again").is_none());

        let done = chat.complete(
            request.token,
            Ok(ChatReply {
                result: "**Hi** there".into(),
            }),
        );
        assert_eq!(done, Completion::Rendered);
        assert_eq!(chat.messages().len(), 2);
        assert_eq!(chat.messages()[1].text, "Hi there");
        assert_eq!(chat.messages()[1].state, MessageState::Delivered);
        assert!(!chat.is_pending());
    }

    #[test]
    fn blank_input_is_ignored() {
        let mut chat = ChatLog::default();
        assert!(chat.submit("   ").is_none());
        assert!(chat.is_empty());
    }

    #[test]
    fn failure_marks_reply() {
        let mut chat = ChatLog::default();
        let request = chat.submit("hi").unwrap();
        let done = chat.complete(request.token, Err(ApiError::Server("insufficient_quota".into())));
        assert!(matches!(done, Completion::Failed(_)));
        assert_eq!(chat.messages()[1].state, MessageState::Failed);
    }

    #[test]
    fn clear_drops_late_reply() {
        let mut chat = ChatLog::default();
        let request = chat.submit("hi").unwrap();
        chat.clear();
        let done = chat.complete(
            request.token,
            Ok(ChatReply {
                result: "late".into(),
            }),
        );
        assert_eq!(done, Completion::Discarded);
        assert!(chat.is_empty());
    }
}
