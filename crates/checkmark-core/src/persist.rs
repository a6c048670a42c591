use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::store::TaskStore;
use crate::task::Task;

/// Version written into every encoded snapshot.
pub const WIRE_VERSION: u32 = 1;

/// External durable key-value storage.
pub trait DurableSlot {
    fn read(&self, key: &str) -> anyhow::Result<Option<String>>;

    fn write(&self, key: &str, value: &str) -> anyhow::Result<()>;
}

/// In-process slot. Used by tests, and by the web front end when the browser
/// exposes no storage.
#[derive(Debug, Default)]
pub struct MemorySlot {
    entries: RefCell<BTreeMap<String, String>>,
    fail_writes: bool,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let slot = Self::new();
        slot.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        slot
    }

    /// A slot whose writes always fail, like a full browser quota.
    pub fn failing() -> Self {
        Self {
            entries: RefCell::default(),
            fail_writes: true,
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl DurableSlot for MemorySlot {
    fn read(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.get(key))
    }

    fn write(&self, key: &str, value: &str) -> anyhow::Result<()> {
        if self.fail_writes {
            bail!("storage quota exceeded writing {key}");
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<S: DurableSlot + ?Sized> DurableSlot for Box<S> {
    fn read(&self, key: &str) -> anyhow::Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> anyhow::Result<()> {
        (**self).write(key, value)
    }
}

#[derive(Debug, Serialize)]
struct SnapshotOut<'a> {
    version: u32,
    tasks: &'a [Task],
}

#[derive(Debug, Deserialize)]
struct SnapshotIn {
    version: u32,
    #[serde(default)]
    tasks: Vec<Task>,
}

/// Serializes a task collection into the versioned wire format.
pub fn encode(tasks: &[Task]) -> anyhow::Result<String> {
    serde_json::to_string(&SnapshotOut {
        version: WIRE_VERSION,
        tasks,
    })
    .context("failed to encode task snapshot")
}

/// Parses a snapshot written by [`encode`]. Other versions are rejected.
pub fn decode(raw: &str) -> anyhow::Result<Vec<Task>> {
    let snapshot: SnapshotIn =
        serde_json::from_str(raw).context("failed to parse task snapshot")?;
    if snapshot.version != WIRE_VERSION {
        bail!(
            "unsupported task snapshot version {} (expected {WIRE_VERSION})",
            snapshot.version
        );
    }
    Ok(snapshot.tasks)
}

/// How the store was initialized at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreSource {
    Empty,
    Restored(usize),
    Corrupt,
}

/// Keeps one durable slot in step with the task store.
#[derive(Debug)]
pub struct PersistenceBridge<S> {
    slot: S,
    key: String,
    failed_writes: u64,
}

impl<S: DurableSlot> PersistenceBridge<S> {
    pub fn new(slot: S, key: impl Into<String>) -> Self {
        Self {
            slot,
            key: key.into(),
            failed_writes: 0,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn slot(&self) -> &S {
        &self.slot
    }

    /// Writes that failed since the bridge was built.
    pub fn failed_writes(&self) -> u64 {
        self.failed_writes
    }

    /// Rehydrates a store from the slot. Never fails: a missing or unreadable
    /// snapshot yields an empty store.
    #[tracing::instrument(skip(self), fields(key = %self.key))]
    pub fn restore(&self) -> (TaskStore, RestoreSource) {
        let raw = match self.slot.read(&self.key) {
            Ok(Some(raw)) if !raw.trim().is_empty() => raw,
            Ok(_) => {
                info!("no stored tasks; starting empty");
                return (TaskStore::new(), RestoreSource::Empty);
            }
            Err(err) => {
                error!(error = %format!("{err:#}"), "failed reading stored tasks; starting empty");
                return (TaskStore::new(), RestoreSource::Corrupt);
            }
        };

        match decode(&raw) {
            Ok(tasks) => {
                let tasks = dedupe_ids(tasks);
                let count = tasks.len();
                info!(count, "restored tasks from storage");
                (TaskStore::from_tasks(tasks), RestoreSource::Restored(count))
            }
            Err(err) => {
                error!(error = %format!("{err:#}"), "stored tasks unreadable; starting empty");
                (TaskStore::new(), RestoreSource::Corrupt)
            }
        }
    }

    /// Writes the whole collection. Failures are logged and swallowed; the
    /// caller's in-memory state stays authoritative.
    #[tracing::instrument(skip(self, tasks), fields(key = %self.key, count = tasks.len()))]
    pub fn persist(&mut self, tasks: &[Task]) -> bool {
        let result = encode(tasks).and_then(|json| {
            self.slot
                .write(&self.key, &json)
                .with_context(|| format!("failed to write slot {}", self.key))
        });

        match result {
            Ok(()) => {
                debug!("persisted tasks");
                true
            }
            Err(err) => {
                self.failed_writes = self.failed_writes.saturating_add(1);
                error!(
                    error = %format!("{err:#}"),
                    failed_writes = self.failed_writes,
                    "failed persisting tasks; keeping in-memory state"
                );
                false
            }
        }
    }
}

fn dedupe_ids(tasks: Vec<Task>) -> Vec<Task> {
    let mut seen = HashSet::new();
    tasks
        .into_iter()
        .filter(|task| {
            let fresh = seen.insert(task.id.clone());
            if !fresh {
                warn!(id = %task.id, "dropping stored task with duplicate id");
            }
            fresh
        })
        .collect()
}
