//! In-memory conversation history, keyed by conversation id.
//!
//! Sessions expire after a TTL of inactivity and are pruned lazily on every
//! access. The lock is never held across an `.await`.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Duration, Utc};

use crate::llm_client::ChatTurn;

#[derive(Debug, Clone)]
struct ConversationSession {
    profile_id: String,
    messages: Vec<ChatTurn>,
    updated_at: DateTime<Utc>,
}

impl ConversationSession {
    fn fresh(profile_id: &str, now: DateTime<Utc>) -> Self {
        Self {
            profile_id: profile_id.to_string(),
            messages: Vec::new(),
            updated_at: now,
        }
    }
}

/// Reads and writes take the lock separately, with the model call in between.
/// Two turns racing on one conversation id both see the same prior history;
/// both exchanges are appended, in completion order.
#[derive(Debug)]
pub struct ConversationStore {
    sessions: Mutex<HashMap<String, ConversationSession>>,
    ttl: Duration,
    max_messages: usize,
}

impl ConversationStore {
    pub fn new(ttl: Duration, max_messages: usize) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl,
            max_messages,
        }
    }

    /// Returns the prior messages for this conversation and touches the session.
    ///
    /// A conversation that belonged to another profile starts over empty.
    pub fn history(
        &self,
        conversation_id: &str,
        profile_id: &str,
        now: DateTime<Utc>,
    ) -> Vec<ChatTurn> {
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        self.prune_expired(&mut sessions, now);

        let session = Self::session_for(&mut sessions, conversation_id, profile_id, now);
        session.updated_at = now;
        session.messages.clone()
    }

    /// Appends one user/assistant exchange, then trims to the message cap by
    /// keeping the opening message plus the most recent ones.
    pub fn append_turn(
        &self,
        conversation_id: &str,
        profile_id: &str,
        user_text: String,
        assistant_text: String,
        now: DateTime<Utc>,
    ) {
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        let session = Self::session_for(&mut sessions, conversation_id, profile_id, now);

        session.messages.push(ChatTurn::user(user_text));
        session.messages.push(ChatTurn::assistant(assistant_text));
        trim_messages(&mut session.messages, self.max_messages);
        session.updated_at = now;
    }

    /// Number of live (not yet pruned) conversations.
    pub fn active_count(&self) -> usize {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn prune_expired(
        &self,
        sessions: &mut HashMap<String, ConversationSession>,
        now: DateTime<Utc>,
    ) {
        sessions.retain(|_, s| now - s.updated_at <= self.ttl);
    }

    fn session_for<'a>(
        sessions: &'a mut HashMap<String, ConversationSession>,
        conversation_id: &str,
        profile_id: &str,
        now: DateTime<Utc>,
    ) -> &'a mut ConversationSession {
        let session = sessions
            .entry(conversation_id.to_string())
            .or_insert_with(|| ConversationSession::fresh(profile_id, now));
        if session.profile_id != profile_id {
            *session = ConversationSession::fresh(profile_id, now);
        }
        session
    }
}

fn trim_messages(messages: &mut Vec<ChatTurn>, max_messages: usize) {
    if messages.len() <= max_messages {
        return;
    }
    let keep_tail = max_messages.saturating_sub(1);
    let tail_start = messages.len() - keep_tail;
    messages.drain(1..tail_start);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> ConversationStore {
        ConversationStore::new(Duration::minutes(120), 20)
    }

    #[test]
    fn test_new_conversation_has_no_history() {
        let store = store();
        assert!(store.history("c-1", "u-1", Utc::now()).is_empty());
        assert_eq!(store.active_count(), 1);
    }

    #[test]
    fn test_turns_are_replayed_in_order() {
        let store = store();
        let now = Utc::now();
        store.append_turn("c-1", "u-1", "q1".into(), "a1".into(), now);
        store.append_turn("c-1", "u-1", "q2".into(), "a2".into(), now);

        let history = store.history("c-1", "u-1", now);
        assert_eq!(
            history,
            vec![
                ChatTurn::user("q1"),
                ChatTurn::assistant("a1"),
                ChatTurn::user("q2"),
                ChatTurn::assistant("a2"),
            ]
        );
    }

    #[test]
    fn test_profile_switch_resets_conversation() {
        let store = store();
        let now = Utc::now();
        store.append_turn("c-1", "u-1", "q1".into(), "a1".into(), now);

        assert!(store.history("c-1", "u-2", now).is_empty());
        // and the original profile's history is gone too
        assert!(store.history("c-1", "u-1", now).is_empty());
    }

    #[test]
    fn test_expired_sessions_are_pruned() {
        let store = store();
        let start = Utc::now();
        store.append_turn("c-old", "u-1", "q".into(), "a".into(), start);
        store.append_turn("c-new", "u-1", "q".into(), "a".into(), start + Duration::minutes(100));

        let later = start + Duration::minutes(121);
        assert_eq!(store.history("c-new", "u-1", later).len(), 2);
        assert_eq!(store.active_count(), 1);
        assert!(store.history("c-old", "u-1", later).is_empty());
    }

    #[test]
    fn test_history_access_refreshes_ttl() {
        let store = store();
        let start = Utc::now();
        store.append_turn("c-1", "u-1", "q".into(), "a".into(), start);
        store.history("c-1", "u-1", start + Duration::minutes(90));

        let history = store.history("c-1", "u-1", start + Duration::minutes(180));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_interleaved_turns_share_history_and_both_append() {
        let store = store();
        let now = Utc::now();
        let first = store.history("c-1", "u-1", now);
        let second = store.history("c-1", "u-1", now);
        assert!(first.is_empty() && second.is_empty());

        store.append_turn("c-1", "u-1", "q-b".into(), "a-b".into(), now);
        store.append_turn("c-1", "u-1", "q-a".into(), "a-a".into(), now);

        let contents: Vec<String> = store
            .history("c-1", "u-1", now)
            .into_iter()
            .map(|t| t.content)
            .collect();
        assert_eq!(contents, vec!["q-b", "a-b", "q-a", "a-a"]);
    }

    #[test]
    fn test_trim_keeps_first_message_and_recent_tail() {
        let store = ConversationStore::new(Duration::minutes(120), 6);
        let now = Utc::now();
        for i in 0..5 {
            store.append_turn("c-1", "u-1", format!("q{i}"), format!("a{i}"), now);
        }

        let history = store.history("c-1", "u-1", now);
        let contents: Vec<&str> = history.iter().map(|t| t.content.as_str()).collect();
        assert_eq!(contents, vec!["q0", "a2", "q3", "a3", "q4", "a4"]);
    }

    #[test]
    fn test_trim_messages_noop_under_cap() {
        let mut messages = vec![ChatTurn::user("q"), ChatTurn::assistant("a")];
        trim_messages(&mut messages, 20);
        assert_eq!(messages.len(), 2);
    }
}
