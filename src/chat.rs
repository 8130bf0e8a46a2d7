//! Recipe chat session: an append-only transcript with a single-flight send
//! gate. States are `idle -> sending -> idle`; failure injects a visible
//! error turn instead of a reply turn.

use time::OffsetDateTime;
use tracing::warn;

use crate::model::{Role, Turn};
use crate::remote::{ApiError, ChatReply};

pub const GREETING: &str =
    "Tell me 2–4 ingredients you have, and I’ll suggest a <$5 recipe with steps.";

pub const NETWORK_ERROR_TEXT: &str = "Network error. Try again in a sec.";

const EMPTY_REPLY_TEXT: &str = "Sorry, I couldn’t generate a recipe.";

/// Payload handed to the remote collaborator: the new message plus the full
/// ordered transcript (including the just-appended user turn).
#[derive(Clone, Debug)]
pub struct Outbound {
    pub message: String,
    pub history: Vec<(Role, String)>,
}

pub struct ChatSession {
    turns: Vec<Turn>,
    input: String,
    sending: bool,
    seq: u64,
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            turns: vec![Turn {
                id: "sys-0".to_string(),
                role: Role::System,
                text: GREETING.to_string(),
                created_at: OffsetDateTime::now_utc(),
            }],
            input: String::new(),
            sending: false,
            seq: 0,
        }
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, input: String) {
        self.input = input;
    }

    pub fn input_mut(&mut self) -> &mut String {
        &mut self.input
    }

    pub fn is_sending(&self) -> bool {
        self.sending
    }

    /// Start a send. No-op (returns `None`) when the trimmed input is empty
    /// or a send is already in flight: concurrent submissions are rejected,
    /// not queued. Otherwise appends the user turn, clears the input buffer,
    /// raises the sending gate, and returns the outbound payload.
    pub fn begin_submit(&mut self) -> Option<Outbound> {
        let message = self.input.trim().to_string();
        if message.is_empty() || self.sending {
            return None;
        }
        self.append(Role::User, message.clone());
        self.input.clear();
        self.sending = true;
        Some(Outbound {
            history: self
                .turns
                .iter()
                .map(|t| (t.role, t.text.clone()))
                .collect(),
            message,
        })
    }

    /// Finish the in-flight send: append exactly one assistant turn (reply or
    /// fixed error text) and drop the gate. No automatic retry; the user must
    /// resubmit.
    pub fn complete(&mut self, outcome: Result<ChatReply, ApiError>) {
        let text = match outcome {
            Ok(reply) => render_reply(&reply),
            Err(err) => {
                warn!(cause = %err.cause(), "chat send failed");
                NETWORK_ERROR_TEXT.to_string()
            }
        };
        self.append(Role::Assistant, text);
        self.sending = false;
    }

    fn append(&mut self, role: Role, text: String) {
        self.seq += 1;
        let prefix = match role {
            Role::System => "sys",
            Role::User => "u",
            Role::Assistant => "a",
        };
        self.turns.push(Turn {
            id: format!("{}-{}", prefix, self.seq),
            role,
            text,
            created_at: OffsetDateTime::now_utc(),
        });
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Reply text plus a bulleted "Quick tips" section when tips are present.
fn render_reply(reply: &ChatReply) -> String {
    let mut text = reply
        .reply
        .clone()
        .filter(|r| !r.is_empty())
        .unwrap_or_else(|| EMPTY_REPLY_TEXT.to_string());
    if !reply.tips.is_empty() {
        text.push_str("\n\nQuick tips:\n- ");
        text.push_str(&reply.tips.join("\n- "));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roles(session: &ChatSession) -> Vec<Role> {
        session.turns().iter().map(|t| t.role).collect()
    }

    #[test]
    fn opens_with_exactly_one_system_greeting() {
        let session = ChatSession::new();
        assert_eq!(roles(&session), vec![Role::System]);
        assert_eq!(session.turns()[0].text, GREETING);
        assert!(!session.is_sending());
    }

    #[test]
    fn whitespace_submit_is_a_silent_noop() {
        let mut session = ChatSession::new();
        session.set_input("   ".to_string());
        assert!(session.begin_submit().is_none());
        assert_eq!(roles(&session), vec![Role::System]);
        assert_eq!(session.input(), "   ");
    }

    #[test]
    fn submit_appends_user_turn_and_clears_input() {
        let mut session = ChatSession::new();
        session.set_input("  eggs, spinach ".to_string());
        let out = session.begin_submit().unwrap();
        assert_eq!(out.message, "eggs, spinach");
        assert_eq!(roles(&session), vec![Role::System, Role::User]);
        assert!(session.input().is_empty());
        assert!(session.is_sending());
        // History carries the full ordered transcript, user turn included.
        assert_eq!(out.history.len(), 2);
        assert_eq!(out.history[1], (Role::User, "eggs, spinach".to_string()));
    }

    #[test]
    fn second_submit_while_sending_is_rejected() {
        let mut session = ChatSession::new();
        session.set_input("eggs".to_string());
        assert!(session.begin_submit().is_some());
        session.set_input("more eggs".to_string());
        assert!(session.begin_submit().is_none());
        assert_eq!(session.turns().len(), 2);
    }

    #[test]
    fn failure_appends_error_turn_and_returns_to_idle() {
        let mut session = ChatSession::new();
        session.set_input("eggs, spinach".to_string());
        session.begin_submit().unwrap();
        session.complete(Err(ApiError::Malformed("boom".to_string())));
        assert_eq!(roles(&session), vec![Role::System, Role::User, Role::Assistant]);
        assert_eq!(session.turns()[2].text, NETWORK_ERROR_TEXT);
        assert!(!session.is_sending());
    }

    #[test]
    fn reply_with_tips_renders_bullets() {
        let mut session = ChatSession::new();
        session.set_input("eggs".to_string());
        session.begin_submit().unwrap();
        session.complete(Ok(ChatReply {
            reply: Some("Spinach omelette.".to_string()),
            tips: vec!["Salt early".to_string(), "Low heat".to_string()],
        }));
        assert_eq!(
            session.turns()[2].text,
            "Spinach omelette.\n\nQuick tips:\n- Salt early\n- Low heat"
        );
    }

    #[test]
    fn empty_reply_gets_apology_text() {
        let mut session = ChatSession::new();
        session.set_input("eggs".to_string());
        session.begin_submit().unwrap();
        session.complete(Ok(ChatReply::default()));
        assert_eq!(session.turns()[2].text, EMPTY_REPLY_TEXT);
    }

    #[test]
    fn turn_ids_stay_unique_across_the_session() {
        let mut session = ChatSession::new();
        for _ in 0..3 {
            session.set_input("eggs".to_string());
            session.begin_submit().unwrap();
            session.complete(Ok(ChatReply::default()));
        }
        let mut ids: Vec<_> = session.turns().iter().map(|t| t.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), session.turns().len());
    }
}
