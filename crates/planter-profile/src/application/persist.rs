//! Fire-and-forget persistence with an optional report.
//!
//! Every setting change issues exactly one write.  The caller updates its
//! in-memory snapshot first and never waits for the write before handling the
//! next interaction.
//!
//! # Ordering
//!
//! Writes go onto one unbounded `mpsc` queue drained by a single worker task,
//! so they reach the store in the order they were issued.  Toggling a setting
//! on and then off always leaves `false` on disk.  Each write carries a
//! `oneshot` sender that reports its result back to the [`PendingWrite`].
//!
//! # Observing failures
//!
//! Failures are never fatal: the session keeps behaving correctly, only
//! durability is at risk.  They are still made visible two ways:
//!
//! - every failure is logged with `warn!` the moment it happens, and
//! - callers that care can hold on to the returned [`PendingWrite`] /
//!   [`WriteBatch`] and `settle()` it into a [`WriteReport`] listing what
//!   failed, e.g. to offer a retry.
//!
//! Dropping a `PendingWrite` only discards the result; the write still happens.

use std::sync::Arc;

use planter_core::{SettingKey, SettingValue};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use super::ports::{SettingsStore, StoreError};

/// One queued write and the channel its result is reported on.
struct WriteRequest {
    key: SettingKey,
    value: SettingValue,
    reply: oneshot::Sender<Result<(), StoreError>>,
}

/// Issues background writes against a [`SettingsStore`], in order.
///
/// Must be created from within a Tokio runtime: `new` spawns the worker.
/// The worker exits once every clone of the `Persister` is dropped and the
/// queue is drained.
#[derive(Clone)]
pub struct Persister {
    store: Arc<dyn SettingsStore>,
    queue: mpsc::UnboundedSender<WriteRequest>,
}

impl Persister {
    pub fn new(store: Arc<dyn SettingsStore>) -> Self {
        let (queue, requests) = mpsc::unbounded_channel();
        tokio::spawn(run_writer(Arc::clone(&store), requests));
        Self { store, queue }
    }

    pub fn store(&self) -> &Arc<dyn SettingsStore> {
        &self.store
    }

    /// Queues one setting write and returns immediately.
    pub fn save(&self, key: SettingKey, value: SettingValue) -> PendingWrite {
        let (reply, outcome) = oneshot::channel();
        let request = WriteRequest {
            key: key.clone(),
            value,
            reply,
        };
        if let Err(mpsc::error::SendError(request)) = self.queue.send(request) {
            warn!(key = %request.key, "write queue closed, setting not persisted");
            let _ = request
                .reply
                .send(Err(StoreError::TaskFailed("write queue closed".into())));
        }
        PendingWrite { key, outcome }
    }

    /// Queues one independent write per entry.
    ///
    /// A failing entry never prevents the others from being attempted.
    pub fn save_all<I>(&self, entries: I) -> WriteBatch
    where
        I: IntoIterator<Item = (SettingKey, SettingValue)>,
    {
        WriteBatch {
            pending: entries
                .into_iter()
                .map(|(key, value)| self.save(key, value))
                .collect(),
        }
    }
}

/// Drains the queue one write at a time.
async fn run_writer(
    store: Arc<dyn SettingsStore>,
    mut requests: mpsc::UnboundedReceiver<WriteRequest>,
) {
    while let Some(WriteRequest { key, value, reply }) = requests.recv().await {
        let result = store.save_setting(&key, &value).await;
        match &result {
            Ok(()) => debug!(%key, "setting persisted"),
            Err(e) => warn!(%key, "failed to persist setting: {e}"),
        }
        // A dropped receiver means nobody is waiting for this result.
        let _ = reply.send(result);
    }
    debug!("write queue closed");
}

/// A write that has been queued but maybe not finished.
#[derive(Debug)]
pub struct PendingWrite {
    key: SettingKey,
    outcome: oneshot::Receiver<Result<(), StoreError>>,
}

impl PendingWrite {
    pub fn key(&self) -> &SettingKey {
        &self.key
    }

    /// Waits for the write to finish.
    pub async fn outcome(self) -> Result<(), StoreError> {
        match self.outcome.await {
            Ok(result) => result,
            Err(_) => Err(StoreError::TaskFailed(format!(
                "writer stopped before persisting {}",
                self.key
            ))),
        }
    }
}

/// A group of independent writes.
#[derive(Debug, Default)]
pub struct WriteBatch {
    pending: Vec<PendingWrite>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, write: PendingWrite) {
        self.pending.push(write);
    }

    pub fn append(&mut self, other: WriteBatch) {
        self.pending.extend(other.pending);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Waits for every write and reports which ones failed.
    pub async fn settle(self) -> WriteReport {
        let mut report = WriteReport::default();
        for write in self.pending {
            let key = write.key.clone();
            match write.outcome().await {
                Ok(()) => report.written.push(key),
                Err(e) => report.failed.push((key, e.to_string())),
            }
        }
        report
    }
}

impl From<PendingWrite> for WriteBatch {
    fn from(write: PendingWrite) -> Self {
        Self {
            pending: vec![write],
        }
    }
}

/// Outcome of a settled [`WriteBatch`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteReport {
    pub written: Vec<SettingKey>,
    /// Keys whose write failed, with the error text.
    pub failed: Vec<(SettingKey, String)>,
}

impl WriteReport {
    pub fn attempted(&self) -> usize {
        self.written.len() + self.failed.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::memory::InMemoryStore;
    use crate::infrastructure::storage::profile_store::JsonProfileStore;

    #[tokio::test]
    async fn test_save_reaches_the_store() {
        // Arrange
        let store = Arc::new(InMemoryStore::new());
        let persister = Persister::new(store.clone());

        // Act
        let write = persister.save(SettingKey::new("planters_mode"), SettingValue::Int(1));
        write.outcome().await.expect("write succeeds");

        // Assert
        assert_eq!(
            store.value(&SettingKey::new("planters_mode")),
            Some(SettingValue::Int(1))
        );
    }

    #[tokio::test]
    async fn test_batch_reports_failures_without_stopping_other_writes() {
        // Arrange
        let store = Arc::new(InMemoryStore::new());
        store.fail_key(SettingKey::new("b"));
        let persister = Persister::new(store.clone());

        // Act
        let report = persister
            .save_all([
                (SettingKey::new("a"), SettingValue::Bool(true)),
                (SettingKey::new("b"), SettingValue::Bool(true)),
                (SettingKey::new("c"), SettingValue::Bool(true)),
            ])
            .settle()
            .await;

        // Assert
        assert_eq!(report.attempted(), 3);
        assert_eq!(report.written, vec![SettingKey::new("a"), SettingKey::new("c")]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, SettingKey::new("b"));
        assert!(!report.is_clean());
        assert!(store.value(&SettingKey::new("c")).is_some());
    }

    #[tokio::test]
    async fn test_dropped_write_still_lands() {
        let store = Arc::new(InMemoryStore::new());
        let persister = Persister::new(store.clone());

        drop(persister.save(SettingKey::new("auto_field_rose"), SettingValue::Bool(false)));
        // Let the worker drain the queue.
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }

        assert_eq!(
            store.value(&SettingKey::new("auto_field_rose")),
            Some(SettingValue::Bool(false))
        );
    }

    #[tokio::test]
    async fn test_writes_reach_the_store_in_issue_order() {
        // Arrange
        let store = Arc::new(InMemoryStore::new());
        let persister = Persister::new(store.clone());
        let key = SettingKey::new("auto_planter_paper");

        // Act
        let mut batch = WriteBatch::new();
        for round in 0..50 {
            batch.push(persister.save(key.clone(), SettingValue::Int(round)));
        }
        batch.settle().await;

        // Assert
        let issued: Vec<SettingValue> = (0..50).map(SettingValue::Int).collect();
        let landed: Vec<SettingValue> = store.writes().into_iter().map(|(_, v)| v).collect();
        assert_eq!(landed, issued);
        assert_eq!(store.value(&key), Some(SettingValue::Int(49)));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_toggle_on_then_off_leaves_false_on_disk() {
        // Arrange
        let dir = std::env::temp_dir().join(format!("planter_persist_{}", uuid::Uuid::new_v4()));
        let store = Arc::new(JsonProfileStore::for_profile(&dir, "toggle"));
        let persister = Persister::new(store.clone());
        let key = SettingKey::new("auto_planter_paper_field_rose");

        for round in 0..200 {
            // Act
            let on = persister.save(key.clone(), SettingValue::Bool(true));
            let off = persister.save(key.clone(), SettingValue::Bool(false));
            on.outcome().await.expect("first write succeeds");
            off.outcome().await.expect("second write succeeds");

            // Assert
            let on_disk = store.load_all().await.expect("profile loads");
            assert_eq!(on_disk.get(&key), Some(&SettingValue::Bool(false)), "round {round}");
        }

        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_empty_batch_settles_clean() {
        let report = WriteBatch::new().settle().await;
        assert_eq!(report.attempted(), 0);
        assert!(report.is_clean());
    }
}
