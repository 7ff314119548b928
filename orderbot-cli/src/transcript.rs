//! Local conversation transcript for display.
//!
//! This is render state only, a local echo duplicated from the gateway's
//! server-side session history. The gateway's session is the source of
//! truth for what the model actually sees; the transcript just shows the
//! user both sides of the conversation.

/// Who said a transcript line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    You,
    Bot,
}

impl Speaker {
    pub fn label(self) -> &'static str {
        match self {
            Self::You => "you",
            Self::Bot => "orderbot",
        }
    }
}

/// One rendered line of conversation.
#[derive(Debug, Clone)]
pub struct Entry {
    pub speaker: Speaker,
    pub text: String,
}

/// Shell-side conversation state: the remembered session id plus the
/// lines rendered so far.
#[derive(Debug, Default)]
pub struct Transcript {
    session_id: Option<String>,
    entries: Vec<Entry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last session id returned by the gateway, if any.
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// Remember the session id from a gateway reply.
    pub fn remember_session(&mut self, session_id: impl Into<String>) {
        self.session_id = Some(session_id.into());
    }

    pub fn push(&mut self, speaker: Speaker, text: impl Into<String>) {
        self.entries.push(Entry {
            speaker,
            text: text.into(),
        });
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forget the session id and the rendered lines. The next message
    /// starts a new gateway session.
    pub fn reset(&mut self) {
        self.session_id = None;
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_render_order() {
        let mut transcript = Transcript::new();
        transcript.push(Speaker::You, "Hi");
        transcript.push(Speaker::Bot, "Hello!");

        let entries = transcript.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].speaker, Speaker::You);
        assert_eq!(entries[1].text, "Hello!");
    }

    #[test]
    fn test_session_id_remembered() {
        let mut transcript = Transcript::new();
        assert!(transcript.session_id().is_none());

        transcript.remember_session("abc");
        assert_eq!(transcript.session_id(), Some("abc"));
    }

    #[test]
    fn test_reset_clears_session_and_entries() {
        let mut transcript = Transcript::new();
        transcript.remember_session("abc");
        transcript.push(Speaker::You, "Hi");

        transcript.reset();
        assert!(transcript.session_id().is_none());
        assert!(transcript.is_empty());
    }

    #[test]
    fn test_speaker_labels() {
        assert_eq!(Speaker::You.label(), "you");
        assert_eq!(Speaker::Bot.label(), "orderbot");
    }
}
