//! Presentation state for one running front end.
//!
//! A [`Session`] owns the task store, the persistence bridge and the
//! non-persisted UI state (draft, edit target, search, category filter). Front
//! ends forward gestures to it and redraw when a subscribed listener fires.

use std::fmt;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::persist::{DurableSlot, PersistenceBridge, RestoreSource};
use crate::store::{Outcome, TaskAction, TaskStore};
use crate::task::{Category, CategoryFilter, Task};
use crate::view::{Query, ViewModel};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("Please enter a todo before saving.")]
    EmptyText,
}

/// Blocking user prompts.
pub trait Dialogs {
    fn confirm(&self, message: &str) -> bool;

    fn alert(&self, message: &str);
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Idle,
    Editing(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    pub draft_text: String,
    pub draft_category: Category,
    pub mode: FormMode,
    pub query: Query,
    pub last_error: Option<String>,
}

impl UiState {
    pub fn editing_id(&self) -> Option<&str> {
        match &self.mode {
            FormMode::Idle => None,
            FormMode::Editing(id) => Some(id),
        }
    }
}

/// What a successful submit did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submitted {
    Added(Task),
    Edited { id: String, outcome: Outcome },
}

/// What changed before a listener was called.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Tasks,
    Ui,
}

type Listener = Box<dyn FnMut(Change)>;

pub struct Session<S, D> {
    store: TaskStore,
    bridge: PersistenceBridge<S>,
    dialogs: D,
    ui: UiState,
    config: AppConfig,
    restored_from: RestoreSource,
    listeners: Vec<Listener>,
}

impl<S, D> fmt::Debug for Session<S, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("tasks", &self.store.len())
            .field("revision", &self.store.revision())
            .field("ui", &self.ui)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl<S: DurableSlot, D: Dialogs> Session<S, D> {
    /// Rehydrates the store from `slot` and starts in the idle form state.
    #[tracing::instrument(skip_all, fields(key = %config.storage.key))]
    pub fn start(slot: S, dialogs: D, config: AppConfig) -> Self {
        let bridge = PersistenceBridge::new(slot, config.storage.key.clone());
        let (store, restored_from) = bridge.restore();
        info!(tasks = store.len(), ?restored_from, "session started");

        let ui = UiState {
            draft_category: config.form.default_category,
            ..UiState::default()
        };

        Self {
            store,
            bridge,
            dialogs,
            ui,
            config,
            restored_from,
            listeners: Vec::new(),
        }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn tasks(&self) -> &[Task] {
        self.store.tasks()
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn bridge(&self) -> &PersistenceBridge<S> {
        &self.bridge
    }

    pub fn restored_from(&self) -> RestoreSource {
        self.restored_from
    }

    pub fn view(&self) -> ViewModel {
        ViewModel::build(self.store.tasks(), &self.ui.query)
    }

    /// Registers a listener that runs after every applied mutation and every
    /// UI-state change.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(Change) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub fn set_draft_text(&mut self, text: impl Into<String>) {
        self.ui.draft_text = text.into();
        self.notify(Change::Ui);
    }

    pub fn set_draft_category(&mut self, category: Category) {
        self.ui.draft_category = category;
        self.notify(Change::Ui);
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.ui.query.search = search.into();
        debug!(search = %self.ui.query.search, "search changed");
        self.notify(Change::Ui);
    }

    pub fn set_category_filter(&mut self, filter: CategoryFilter) {
        self.ui.query.category = filter;
        debug!(filter = filter.as_key(), "category filter changed");
        self.notify(Change::Ui);
    }

    /// Enters the editing state for `id` with the draft taken from the task.
    /// Unknown ids are ignored.
    pub fn begin_edit(&mut self, id: &str) -> bool {
        let Some(task) = self.store.get(id) else {
            debug!(%id, "edit requested for unknown task; ignoring");
            return false;
        };

        self.ui.draft_text = task.text.clone();
        self.ui.draft_category = task.category;
        self.ui.mode = FormMode::Editing(id.to_string());
        self.ui.last_error = None;
        debug!(%id, "editing task");
        self.notify(Change::Ui);
        true
    }

    /// Leaves the editing state without touching the store.
    pub fn cancel_edit(&mut self) {
        if self.ui.mode == FormMode::Idle {
            return;
        }
        debug!("edit canceled");
        self.reset_form();
        self.notify(Change::Ui);
    }

    /// Adds or edits from the current draft.
    ///
    /// Blank text is rejected before the store sees it: the error is kept in
    /// [`UiState::last_error`] and shown through [`Dialogs::alert`].
    #[tracing::instrument(skip(self, now), fields(mode = ?self.ui.mode))]
    pub fn submit(&mut self, now: DateTime<Utc>) -> Result<Submitted, SubmitError> {
        let text = self.ui.draft_text.trim().to_string();
        if text.is_empty() {
            let err = SubmitError::EmptyText;
            warn!("rejected blank submit");
            self.ui.last_error = Some(err.to_string());
            self.dialogs.alert(&err.to_string());
            self.notify(Change::Ui);
            return Err(err);
        }

        self.ui.last_error = None;
        let category = self.ui.draft_category;

        match self.ui.mode.clone() {
            FormMode::Idle => {
                let task = self.store.add(text, category, now);
                self.ui.draft_text.clear();
                self.commit();
                Ok(Submitted::Added(task))
            }
            FormMode::Editing(id) => {
                let outcome = self.store.edit(&id, text, category);
                self.reset_form();
                if outcome.is_applied() {
                    self.commit();
                } else {
                    self.notify(Change::Ui);
                }
                Ok(Submitted::Edited { id, outcome })
            }
        }
    }

    pub fn toggle(&mut self, id: &str) -> Outcome {
        self.dispatch(TaskAction::Toggle { id: id.to_string() }, Utc::now())
    }

    /// Deletes one task after the user confirms. Returns whether the task was
    /// removed.
    pub fn request_delete(&mut self, id: &str) -> bool {
        let Some(task) = self.store.get(id) else {
            debug!(%id, "delete requested for unknown task; ignoring");
            return false;
        };

        let prompt = format!("Delete \"{}\"?", task.text);
        if !self.confirmed(&prompt) {
            warn!(%id, "task deletion canceled");
            return false;
        }

        self.dispatch(TaskAction::Delete { id: id.to_string() }, Utc::now())
            .is_applied()
    }

    /// Removes every task after the user confirms.
    pub fn request_clear_all(&mut self) -> bool {
        let prompt = format!(
            "Clear all {} todos? This cannot be undone.",
            self.store.len()
        );
        if !self.confirmed(&prompt) {
            warn!("clear all canceled");
            return false;
        }

        self.dispatch(TaskAction::ClearAll, Utc::now()).is_applied()
    }

    /// Applies one store action, then persists and notifies if it changed
    /// anything.
    pub fn dispatch(&mut self, action: TaskAction, now: DateTime<Utc>) -> Outcome {
        let outcome = self.store.apply(action, now);
        if outcome.is_applied() {
            self.commit();
        }
        outcome
    }

    fn confirmed(&self, prompt: &str) -> bool {
        !self.config.form.confirm_destructive || self.dialogs.confirm(prompt)
    }

    fn commit(&mut self) {
        if let Some(id) = self.ui.editing_id()
            && self.store.get(id).is_none()
        {
            debug!(%id, "task under edit is gone; leaving edit mode");
            self.reset_form();
        }

        self.bridge.persist(self.store.tasks());
        self.notify(Change::Tasks);
    }

    fn reset_form(&mut self) {
        self.ui.mode = FormMode::Idle;
        self.ui.draft_text.clear();
        self.ui.draft_category = self.config.form.default_category;
    }

    fn notify(&mut self, change: Change) {
        for listener in &mut self.listeners {
            listener(change);
        }
    }
}
