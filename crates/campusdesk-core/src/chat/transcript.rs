//! Chat transcript with stale-reply protection.
//!
//! Every send takes a new request token. A reply is only appended when it
//! answers the most recent request, so two overlapping sends can never
//! interleave their replies out of order.

use super::message::ChatMessage;

/// Identifies one in-flight chat request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// An ordered list of chat messages plus the token of the latest request.
#[derive(Debug, Clone, Default)]
pub struct ChatTranscript {
    messages: Vec<ChatMessage>,
    latest: u64,
}

impl ChatTranscript {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            latest: 0,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Appends the user's message and starts a new request.
    ///
    /// Returns the request token together with the history that preceded the
    /// user's message.
    pub fn begin(&mut self, user_message: ChatMessage) -> (RequestToken, Vec<ChatMessage>) {
        let history = self.messages.clone();
        self.messages.push(user_message);
        self.latest += 1;
        (RequestToken(self.latest), history)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.latest
    }

    /// Appends `reply` if `token` still names the latest request.
    ///
    /// Returns `false` (and drops the reply) for superseded requests.
    pub fn complete(&mut self, token: RequestToken, reply: ChatMessage) -> bool {
        if !self.is_current(token) {
            return false;
        }
        self.messages.push(reply);
        true
    }

    /// Replaces the transcript. Outstanding requests become stale.
    pub fn reset(&mut self, messages: Vec<ChatMessage>) {
        self.messages = messages;
        self.latest += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_to_latest_request_is_appended() {
        let mut transcript = ChatTranscript::new(vec![ChatMessage::model("Hi!")]);

        let (token, history) = transcript.begin(ChatMessage::user("question"));

        assert_eq!(history.len(), 1);
        assert!(transcript.complete(token, ChatMessage::model("answer")));
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript.messages()[2].text, "answer");
    }

    #[test]
    fn test_superseded_reply_is_dropped() {
        let mut transcript = ChatTranscript::default();
        let (first, _) = transcript.begin(ChatMessage::user("one"));
        let (second, history) = transcript.begin(ChatMessage::user("two"));
        assert_eq!(history.len(), 1);

        assert!(transcript.complete(second, ChatMessage::model("reply two")));
        assert!(!transcript.complete(first, ChatMessage::model("reply one")));

        let texts: Vec<_> = transcript.messages().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["one", "two", "reply two"]);
    }

    #[test]
    fn test_reset_invalidates_in_flight_request() {
        let mut transcript = ChatTranscript::default();
        let (token, _) = transcript.begin(ChatMessage::user("one"));

        transcript.reset(Vec::new());

        assert!(!transcript.complete(token, ChatMessage::model("late")));
        assert!(transcript.is_empty());
    }
}
