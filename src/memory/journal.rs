//! The journal: in-memory list, current screen, and selection.
//!
//! [`Journal`] is the single owner of application state. Every mutation of the
//! list is written back through [`MemoryStorage`] before the call returns; a
//! failed write leaves the list exactly as it was.
//!
//! Valid screen transitions:
//!
//! | From     | Action        | To       |
//! |----------|---------------|----------|
//! | `List`   | `start_new`   | `Create` |
//! | `Create` | `cancel`      | `List`   |
//! | `Create` | `save_memory` | `List`   |
//! | `List`   | `select`      | `View`   |
//! | `View`   | `back`        | `List`   |

use crate::memory::storage::MemoryStorage;
use crate::memory::types::MemoryRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    List,
    Create,
    View,
}

#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    #[error("cannot {action} from the {from:?} screen")]
    InvalidTransition { from: Screen, action: &'static str },
    #[error("no memory with id {0}")]
    UnknownMemory(String),
    #[error("a memory with id {0} already exists")]
    DuplicateId(String),
    #[error("failed to persist memories")]
    Persist(#[source] anyhow::Error),
}

pub struct Journal {
    storage: MemoryStorage,
    memories: Vec<MemoryRecord>,
    screen: Screen,
    selected: Option<String>,
}

impl Journal {
    /// Load the stored list (best-effort) and start on the list screen.
    pub fn open(storage: MemoryStorage) -> Self {
        let memories = storage.load();
        tracing::info!(count = memories.len(), "journal opened");
        Self {
            storage,
            memories,
            screen: Screen::List,
            selected: None,
        }
    }

    /// All memories, newest first.
    pub fn memories(&self) -> &[MemoryRecord] {
        &self.memories
    }

    pub fn storage(&self) -> &MemoryStorage {
        &self.storage
    }

    pub fn find(&self, id: &str) -> Option<&MemoryRecord> {
        self.memories.iter().find(|m| m.id == id)
    }

    /// The screen to show. A `View` without a resolvable selection reads as
    /// `List`.
    pub fn screen(&self) -> Screen {
        match self.screen {
            Screen::View if self.selected().is_none() => Screen::List,
            screen => screen,
        }
    }

    /// The record shown on the `View` screen.
    pub fn selected(&self) -> Option<&MemoryRecord> {
        self.selected.as_deref().and_then(|id| self.find(id))
    }

    pub fn start_new(&mut self) -> Result<(), JournalError> {
        self.expect(Screen::List, "start a new memory")?;
        self.screen = Screen::Create;
        Ok(())
    }

    pub fn cancel(&mut self) -> Result<(), JournalError> {
        self.expect(Screen::Create, "cancel")?;
        self.screen = Screen::List;
        Ok(())
    }

    /// Prepend a completed record, persist the list, and return to `List`.
    pub fn save_memory(&mut self, record: MemoryRecord) -> Result<(), JournalError> {
        self.expect(Screen::Create, "save a memory")?;
        if self.find(&record.id).is_some() {
            return Err(JournalError::DuplicateId(record.id));
        }

        let id = record.id.clone();
        self.memories.insert(0, record);
        if let Err(e) = self.storage.save(&self.memories) {
            self.memories.remove(0);
            tracing::error!(id = %id, error = %e, "failed to persist new memory");
            return Err(JournalError::Persist(e));
        }

        tracing::info!(id = %id, total = self.memories.len(), "memory saved");
        self.screen = Screen::List;
        Ok(())
    }

    /// Open the detail screen for `id`. An unknown id leaves the journal on
    /// `List`.
    pub fn select(&mut self, id: &str) -> Result<&MemoryRecord, JournalError> {
        self.expect(Screen::List, "select a memory")?;
        if self.find(id).is_none() {
            self.selected = None;
            self.screen = Screen::List;
            return Err(JournalError::UnknownMemory(id.to_string()));
        }

        self.selected = Some(id.to_string());
        self.screen = Screen::View;
        self.selected().ok_or_else(|| JournalError::UnknownMemory(id.to_string()))
    }

    pub fn back(&mut self) -> Result<(), JournalError> {
        self.expect(Screen::View, "go back")?;
        self.selected = None;
        self.screen = Screen::List;
        Ok(())
    }

    fn expect(&self, screen: Screen, action: &'static str) -> Result<(), JournalError> {
        let from = self.screen();
        if from == screen {
            Ok(())
        } else {
            Err(JournalError::InvalidTransition { from, action })
        }
    }
}
