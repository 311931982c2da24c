//! The append-only transcript and its durable mirror under `chatHistory`.

use crate::constants::CHAT_HISTORY_KEY;
use crate::errors::AquachatResult;
use crate::models::{Message, MessageDraft};
use crate::storage::KeyValueStore;
use chrono::{DateTime, Utc};
use std::sync::Arc;

pub struct MessageStore {
    storage: Arc<dyn KeyValueStore>,
    messages: Vec<Message>,
    last_id: u64,
}

impl MessageStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            storage,
            messages: Vec::new(),
            last_id: 0,
        }
    }

    /// Replaces the in-memory sequence with the persisted one.
    ///
    /// An absent, unreadable or corrupt record yields an empty transcript.
    pub fn load(&mut self) -> &[Message] {
        self.messages = match read_history(self.storage.as_ref()) {
            Ok(messages) => messages,
            Err(e) => {
                log::warn!("discarding unreadable chat history: {}", e);
                Vec::new()
            }
        };
        self.last_id = self
            .messages
            .iter()
            .filter_map(|m| m.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);

        log::debug!("loaded {} messages", self.messages.len());
        &self.messages
    }

    /// Stamps `draft` with an id and the current time, appends it and rewrites
    /// the persisted record.
    pub fn append(&mut self, draft: MessageDraft) -> Message {
        self.append_at(draft, Utc::now())
    }

    fn append_at(&mut self, draft: MessageDraft, timestamp: DateTime<Utc>) -> Message {
        let message = Message {
            id: self.next_id(timestamp),
            text: draft.text,
            is_user: draft.is_user,
            timestamp,
        };
        self.messages.push(message.clone());

        // The in-memory transcript stays authoritative even when the disk write fails.
        if let Err(e) = self.persist() {
            log::error!("failed to persist chat history: {}", e);
        }
        message
    }

    pub fn clear(&mut self) {
        self.messages.clear();
        if let Err(e) = self.storage.remove(CHAT_HISTORY_KEY) {
            log::error!("failed to remove chat history: {}", e);
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    // Millisecond clock, bumped past the previous id when two messages share a tick.
    fn next_id(&mut self, timestamp: DateTime<Utc>) -> String {
        let millis = u64::try_from(timestamp.timestamp_millis()).unwrap_or(0);
        self.last_id = match self.last_id.checked_add(1) {
            Some(bumped) => millis.max(bumped),
            None => {
                log::warn!("stored message ids are exhausted; reseeding from the clock");
                millis
            }
        };
        self.last_id.to_string()
    }

    fn persist(&self) -> AquachatResult<()> {
        let json = serde_json::to_string(&self.messages)?;
        self.storage.set(CHAT_HISTORY_KEY, &json)
    }
}

/// Strict read of the persisted record; `Ok(vec![])` when the key is absent.
pub fn read_history(storage: &dyn KeyValueStore) -> AquachatResult<Vec<Message>> {
    match storage.get(CHAT_HISTORY_KEY)? {
        Some(raw) if !raw.trim().is_empty() => Ok(serde_json::from_str(&raw)?),
        _ => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStore, MemoryStore};
    use chrono::TimeZone;
    use tempfile::tempdir;

    fn memory_store() -> (Arc<MemoryStore>, MessageStore) {
        let storage = Arc::new(MemoryStore::new());
        let store = MessageStore::new(storage.clone());
        (storage, store)
    }

    #[test]
    fn test_load_absent_record_is_empty() {
        let (_, mut store) = memory_store();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_load_corrupt_record_is_empty() {
        let (storage, mut store) = memory_store();
        storage.set(CHAT_HISTORY_KEY, "[{\"id\": 12, \"oops\"").unwrap();
        assert!(store.load().is_empty());

        storage
            .set(CHAT_HISTORY_KEY, r#"[{"id":"1","text":"no flag"}]"#)
            .unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_append_persists_full_sequence() {
        let (storage, mut store) = memory_store();
        store.append(MessageDraft::user("How much feed?"));
        store.append(MessageDraft::bot("Plenty."));

        let persisted = read_history(storage.as_ref()).unwrap();
        assert_eq!(persisted, store.messages());
        assert_eq!(persisted.len(), 2);
        assert!(persisted[0].is_user);
        assert!(!persisted[1].is_user);
    }

    #[test]
    fn test_ids_are_unique_and_increasing_within_one_tick() {
        let (_, mut store) = memory_store();
        let tick = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

        let ids: Vec<u64> = (0..5)
            .map(|i| {
                store
                    .append_at(MessageDraft::user(format!("msg {}", i)), tick)
                    .id
                    .parse()
                    .unwrap()
            })
            .collect();

        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(ids[0], tick.timestamp_millis() as u64);
    }

    #[test]
    fn test_ids_continue_after_reload() {
        let (storage, mut store) = memory_store();
        let future = Utc::now() + chrono::Duration::days(1);
        let first = store.append_at(MessageDraft::user("early"), future);

        let mut reloaded = MessageStore::new(storage);
        reloaded.load();
        let second = reloaded.append(MessageDraft::bot("later"));

        assert!(second.id.parse::<u64>().unwrap() > first.id.parse::<u64>().unwrap());
    }

    #[test]
    fn test_append_after_maximal_stored_id_does_not_overflow() {
        let (storage, mut store) = memory_store();
        storage
            .set(
                CHAT_HISTORY_KEY,
                r#"[{"id":"18446744073709551615","text":"hi","isUser":true,"timestamp":"2024-03-01T09:30:00Z"}]"#,
            )
            .unwrap();
        assert_eq!(store.load().len(), 1);

        let first = store.append(MessageDraft::user("feed"));
        let second = store.append(MessageDraft::bot("pellets"));

        assert_ne!(first.id, u64::MAX.to_string());
        assert!(second.id.parse::<u64>().unwrap() > first.id.parse::<u64>().unwrap());
        assert_eq!(read_history(storage.as_ref()).unwrap().len(), 3);
    }

    #[test]
    fn test_round_trip_preserves_order_and_instants() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("storage.json");

        let written = {
            let storage = Arc::new(FileStore::open(&path).unwrap());
            let mut store = MessageStore::new(storage);
            store.append(MessageDraft::user("water pH?"));
            store.append(MessageDraft::bot("6.5 to 8.5"));
            store.append(MessageDraft::user("thanks <3"));
            store.messages().to_vec()
        };

        let storage = Arc::new(FileStore::open(&path).unwrap());
        let mut store = MessageStore::new(storage);
        let loaded = store.load().to_vec();

        assert_eq!(loaded, written);
        for (a, b) in loaded.iter().zip(&written) {
            assert_eq!(a.timestamp, b.timestamp);
        }
    }

    #[test]
    fn test_loads_history_written_by_browser_widget() {
        let (storage, mut store) = memory_store();
        storage
            .set(
                CHAT_HISTORY_KEY,
                r#"[{"id":"1709285400250","text":"feed?","isUser":true,"timestamp":"2024-03-01T09:30:00.250Z"}]"#,
            )
            .unwrap();

        let loaded = store.load();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].text, "feed?");

        let next = store.append(MessageDraft::bot("ok"));
        assert!(next.id.parse::<u64>().unwrap() > 1_709_285_400_250);
    }

    #[test]
    fn test_clear_empties_memory_and_record() {
        let (storage, mut store) = memory_store();
        store.append(MessageDraft::user("disease?"));
        store.clear();

        assert!(store.is_empty());
        assert_eq!(storage.get(CHAT_HISTORY_KEY).unwrap(), None);
    }
}
