use chrono::{
  DateTime,
  Utc
};
use tracing::{
  debug,
  info
};

use crate::ident::new_unique_id;
use crate::task::{
  Category,
  Task
};

/// A single mutation of the task collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskAction {
  Add {
    text:     String,
    category: Category
  },
  Toggle {
    id: String
  },
  Edit {
    id:       String,
    text:     String,
    category: Category
  },
  Delete {
    id: String
  },
  ClearAll
}

impl TaskAction {
  pub fn name(&self) -> &'static str {
    match self {
      | TaskAction::Add {
        ..
      } => "add",
      | TaskAction::Toggle {
        ..
      } => "toggle",
      | TaskAction::Edit {
        ..
      } => "edit",
      | TaskAction::Delete {
        ..
      } => "delete",
      | TaskAction::ClearAll => {
        "clear_all"
      }
    }
  }
}

/// Whether an action changed the collection. A `Missed` action targeted an
/// id that is not present and left everything untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
  Applied,
  Missed
}

impl Outcome {
  pub fn is_applied(self) -> bool {
    self == Outcome::Applied
  }

  fn from_hit(hit: bool) -> Self {
    if hit {
      Outcome::Applied
    } else {
      Outcome::Missed
    }
  }
}

/// Ordered task collection, newest first.
///
/// Only `add` changes the order (it prepends). Operations on an unknown id
/// are silent no-ops.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskStore {
  tasks:    Vec<Task>,
  revision: u64
}

impl TaskStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Rebuilds a store from tasks that already exist, keeping their order.
  pub fn from_tasks(
    tasks: Vec<Task>
  ) -> Self {
    Self {
      tasks,
      revision: 0
    }
  }

  pub fn tasks(&self) -> &[Task] {
    &self.tasks
  }

  pub fn get(
    &self,
    id: &str
  ) -> Option<&Task> {
    self
      .tasks
      .iter()
      .find(|task| task.id == id)
  }

  pub fn len(&self) -> usize {
    self.tasks.len()
  }

  pub fn is_empty(&self) -> bool {
    self.tasks.is_empty()
  }

  /// Number of applied mutations since the store was built.
  pub fn revision(&self) -> u64 {
    self.revision
  }

  #[tracing::instrument(skip_all, fields(action = action.name()))]
  pub fn apply(
    &mut self,
    action: TaskAction,
    now: DateTime<Utc>
  ) -> Outcome {
    match action {
      | TaskAction::Add {
        text,
        category
      } => {
        self.add(text, category, now);
        Outcome::Applied
      }
      | TaskAction::Toggle {
        id
      } => self.toggle(&id),
      | TaskAction::Edit {
        id,
        text,
        category
      } => self.edit(&id, text, category),
      | TaskAction::Delete {
        id
      } => self.delete(&id),
      | TaskAction::ClearAll => {
        self.clear_all();
        Outcome::Applied
      }
    }
  }

  /// Prepends a new pending task. Callers reject blank text beforehand.
  pub fn add(
    &mut self,
    text: String,
    category: Category,
    now: DateTime<Utc>
  ) -> Task {
    let id = new_unique_id(now, |candidate| {
      self.get(candidate).is_some()
    });
    let task =
      Task::new(id, text, category, now);
    self.tasks.insert(0, task.clone());
    self.bump();
    info!(
      id = %task.id,
      category = %task.category,
      total = self.tasks.len(),
      "added task"
    );
    task
  }

  pub fn toggle(
    &mut self,
    id: &str
  ) -> Outcome {
    let hit = match self
      .tasks
      .iter_mut()
      .find(|task| task.id == id)
    {
      | Some(task) => {
        task.completed = !task.completed;
        info!(
          %id,
          completed = task.completed,
          "toggled task"
        );
        true
      }
      | None => false
    };
    self.finish(hit, id, "toggle")
  }

  /// Replaces text and category. `completed` and `created_at` stay as they
  /// were.
  pub fn edit(
    &mut self,
    id: &str,
    text: String,
    category: Category
  ) -> Outcome {
    let hit = match self
      .tasks
      .iter_mut()
      .find(|task| task.id == id)
    {
      | Some(task) => {
        task.text = text;
        task.category = category;
        info!(%id, %category, "edited task");
        true
      }
      | None => false
    };
    self.finish(hit, id, "edit")
  }

  pub fn delete(
    &mut self,
    id: &str
  ) -> Outcome {
    let before = self.tasks.len();
    self.tasks.retain(|task| task.id != id);
    let hit = self.tasks.len() != before;
    if hit {
      info!(
        %id,
        remaining = self.tasks.len(),
        "deleted task"
      );
    }
    self.finish(hit, id, "delete")
  }

  pub fn clear_all(&mut self) {
    let removed = self.tasks.len();
    self.tasks.clear();
    self.bump();
    info!(removed, "cleared all tasks");
  }

  fn finish(
    &mut self,
    hit: bool,
    id: &str,
    op: &'static str
  ) -> Outcome {
    if hit {
      self.bump();
    } else {
      debug!(%id, op, "no task with id; ignoring");
    }
    Outcome::from_hit(hit)
  }

  fn bump(&mut self) {
    self.revision =
      self.revision.wrapping_add(1);
  }
}

#[cfg(test)]
mod tests {
  use std::collections::HashSet;

  use chrono::{
    Duration,
    TimeZone,
    Utc
  };

  use super::{
    Outcome,
    TaskAction,
    TaskStore
  };
  use crate::task::Category;

  fn seeded() -> TaskStore {
    let now = Utc
      .with_ymd_and_hms(
        2026, 2, 16, 5, 0, 0
      )
      .unwrap();
    let mut store = TaskStore::new();
    store.add(
      "Buy milk".to_string(),
      Category::Shopping,
      now
    );
    store.add(
      "Write report".to_string(),
      Category::Work,
      now + Duration::minutes(1)
    );
    store.add(
      "Call mum".to_string(),
      Category::Personal,
      now + Duration::minutes(2)
    );
    store
  }

  #[test]
  fn add_prepends_with_fresh_ids() {
    let store = seeded();
    let texts: Vec<&str> = store
      .tasks()
      .iter()
      .map(|task| task.text.as_str())
      .collect();
    assert_eq!(texts, vec![
      "Call mum",
      "Write report",
      "Buy milk"
    ]);

    let ids: HashSet<&str> = store
      .tasks()
      .iter()
      .map(|task| task.id.as_str())
      .collect();
    assert_eq!(ids.len(), 3);
    assert!(
      store
        .tasks()
        .iter()
        .all(|task| !task.completed)
    );
  }

  #[test]
  fn many_adds_in_the_same_instant_never_collide()
   {
    let now = Utc::now();
    let mut store = TaskStore::new();
    for n in 0..200 {
      store.add(
        format!("task {n}"),
        Category::Other,
        now
      );
    }
    let ids: HashSet<&str> = store
      .tasks()
      .iter()
      .map(|task| task.id.as_str())
      .collect();
    assert_eq!(ids.len(), 200);
    assert_eq!(
      store.tasks()[0].text,
      "task 199"
    );
  }

  #[test]
  fn toggle_twice_restores_completion() {
    let mut store = seeded();
    let id = store.tasks()[1].id.clone();

    assert_eq!(
      store.toggle(&id),
      Outcome::Applied
    );
    assert!(
      store.get(&id).unwrap().completed
    );
    store.toggle(&id);
    assert!(
      !store.get(&id).unwrap().completed
    );
  }

  #[test]
  fn edit_keeps_created_at_completion_and_order()
   {
    let mut store = seeded();
    let id = store.tasks()[2].id.clone();
    store.toggle(&id);
    let before =
      store.get(&id).unwrap().clone();

    let outcome = store.edit(
      &id,
      "Buy oat milk".to_string(),
      Category::Other
    );

    assert_eq!(outcome, Outcome::Applied);
    let after = &store.tasks()[2];
    assert_eq!(after.id, id);
    assert_eq!(after.text, "Buy oat milk");
    assert_eq!(
      after.category,
      Category::Other
    );
    assert_eq!(
      after.created_at,
      before.created_at
    );
    assert!(after.completed);
  }

  #[test]
  fn delete_removes_exactly_one_known_task()
   {
    let mut store = seeded();
    let id = store.tasks()[1].id.clone();

    assert_eq!(
      store.delete(&id),
      Outcome::Applied
    );
    assert_eq!(store.len(), 2);
    assert!(store.get(&id).is_none());

    assert_eq!(
      store.delete(&id),
      Outcome::Missed
    );
    assert_eq!(store.len(), 2);
  }

  #[test]
  fn unknown_ids_are_silent_noops() {
    let mut store = seeded();
    let snapshot = store.clone();

    assert_eq!(
      store.toggle("missing"),
      Outcome::Missed
    );
    assert_eq!(
      store.edit(
        "missing",
        "x".to_string(),
        Category::Work
      ),
      Outcome::Missed
    );
    assert_eq!(
      store.delete("missing"),
      Outcome::Missed
    );
    assert_eq!(store, snapshot);
  }

  #[test]
  fn clear_all_empties_any_store() {
    let mut store = seeded();
    store.clear_all();
    assert!(store.is_empty());

    let mut empty = TaskStore::new();
    let outcome = empty.apply(
      TaskAction::ClearAll,
      Utc::now()
    );
    assert!(outcome.is_applied());
    assert!(empty.is_empty());
  }

  #[test]
  fn revision_counts_applied_mutations_only()
   {
    let mut store = seeded();
    assert_eq!(store.revision(), 3);

    store.apply(
      TaskAction::Toggle {
        id: "missing".to_string()
      },
      Utc::now()
    );
    assert_eq!(store.revision(), 3);

    let id = store.tasks()[0].id.clone();
    store.apply(
      TaskAction::Delete {
        id
      },
      Utc::now()
    );
    assert_eq!(store.revision(), 4);
  }
}
