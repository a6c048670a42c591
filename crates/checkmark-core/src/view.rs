use chrono::format::{
  Item,
  StrftimeItems
};
use chrono::{
  DateTime,
  FixedOffset,
  Offset,
  Utc
};

use crate::task::{
  CategoryFilter,
  Task
};

/// Search text plus category selector applied to the task list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
  pub search:   String,
  pub category: CategoryFilter
}

impl Query {
  /// Category selector and case-insensitive substring search on the text.
  /// Blank search text matches everything.
  pub fn matches(
    &self,
    task: &Task
  ) -> bool {
    if !self.category.matches(task.category) {
      return false;
    }
    let needle = self.search.trim();
    needle.is_empty()
      || task
        .text
        .to_lowercase()
        .contains(&needle.to_lowercase())
  }
}

#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq,
)]
pub struct Counts {
  pub total:     usize,
  pub completed: usize,
  pub pending:   usize
}

/// Tasks matching `query`, in collection order.
pub fn visible<'a>(
  tasks: &'a [Task],
  query: &Query
) -> Vec<&'a Task> {
  tasks
    .iter()
    .filter(|task| query.matches(task))
    .collect()
}

/// Counts over the whole collection; filters do not apply.
pub fn counts(tasks: &[Task]) -> Counts {
  let completed = tasks
    .iter()
    .filter(|task| task.completed)
    .count();
  Counts {
    total: tasks.len(),
    completed,
    pending: tasks.len() - completed
  }
}

/// Everything a front end needs to draw the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel {
  pub rows:   Vec<Task>,
  pub counts: Counts
}

impl ViewModel {
  pub fn build(
    tasks: &[Task],
    query: &Query
  ) -> Self {
    let rows = visible(tasks, query)
      .into_iter()
      .cloned()
      .collect();
    Self {
      rows,
      counts: counts(tasks)
    }
  }

  pub fn is_empty(&self) -> bool {
    self.rows.is_empty()
  }
}

pub const FALLBACK_CREATED_AT_FORMAT:
  &str = "%Y-%m-%d %H:%M";

/// True when `pattern` is a strftime pattern chrono can render.
pub fn is_valid_pattern(
  pattern: &str
) -> bool {
  !pattern.trim().is_empty()
    && !StrftimeItems::new(pattern)
      .any(|item| matches!(item, Item::Error))
}

/// Renders a creation time at the viewer's UTC offset.
///
/// `utc_offset_minutes` is minutes east of UTC. Out of range offsets render
/// in UTC; an unusable pattern renders with
/// [`FALLBACK_CREATED_AT_FORMAT`].
pub fn format_created_at(
  created_at: DateTime<Utc>,
  utc_offset_minutes: i32,
  pattern: &str
) -> String {
  let offset = utc_offset_minutes
    .checked_mul(60)
    .and_then(FixedOffset::east_opt)
    .unwrap_or_else(|| Utc.fix());
  let pattern =
    if is_valid_pattern(pattern) {
      pattern
    } else {
      FALLBACK_CREATED_AT_FORMAT
    };
  created_at
    .with_timezone(&offset)
    .format(pattern)
    .to_string()
}

#[cfg(test)]
mod tests {
  use chrono::{
    TimeZone,
    Utc
  };

  use super::{
    Query,
    ViewModel,
    counts,
    format_created_at,
    is_valid_pattern,
    visible
  };
  use crate::task::{
    Category,
    CategoryFilter,
    Task
  };

  fn task(
    id: &str,
    text: &str,
    category: Category,
    completed: bool
  ) -> Task {
    let now = Utc
      .with_ymd_and_hms(
        2026, 2, 16, 5, 0, 0
      )
      .unwrap();
    let mut task = Task::new(
      id.to_string(),
      text.to_string(),
      category,
      now
    );
    task.completed = completed;
    task
  }

  fn groceries_and_report() -> Vec<Task>
  {
    vec![
      task(
        "1",
        "Buy milk",
        Category::Shopping,
        false
      ),
      task(
        "2",
        "Write report",
        Category::Work,
        false
      ),
    ]
  }

  fn texts(rows: &[&Task]) -> Vec<String> {
    rows
      .iter()
      .map(|task| task.text.clone())
      .collect()
  }

  #[test]
  fn category_filter_keeps_exact_matches()
   {
    let tasks = groceries_and_report();
    let query = Query {
      search:   String::new(),
      category: CategoryFilter::Only(
        Category::Work
      )
    };
    assert_eq!(
      texts(&visible(&tasks, &query)),
      vec!["Write report"]
    );
  }

  #[test]
  fn search_ignores_case_and_padding() {
    let tasks = groceries_and_report();
    let query = Query {
      search:   "  MILK ".to_string(),
      category: CategoryFilter::All
    };
    assert_eq!(
      texts(&visible(&tasks, &query)),
      vec!["Buy milk"]
    );
    assert!(query.matches(&tasks[0]));
    assert!(!query.matches(&tasks[1]));
  }

  #[test]
  fn search_and_category_combine() {
    let tasks = groceries_and_report();
    let query = Query {
      search:   "milk".to_string(),
      category: CategoryFilter::Only(
        Category::Work
      )
    };
    assert!(visible(&tasks, &query).is_empty());

    let view =
      ViewModel::build(&tasks, &query);
    assert!(view.is_empty());
    assert_eq!(view.counts.total, 2);
  }

  #[test]
  fn visible_rows_are_exactly_the_matching_tasks()
   {
    let mut tasks = groceries_and_report();
    tasks.push(task(
      "3",
      "Buy stamps",
      Category::Other,
      true
    ));
    let query = Query {
      search:   "buy".to_string(),
      category: CategoryFilter::Only(
        Category::Shopping
      )
    };

    let expected: Vec<String> = tasks
      .iter()
      .filter(|task| query.matches(task))
      .map(|task| task.text.clone())
      .collect();
    assert_eq!(expected, vec!["Buy milk"]);
    assert_eq!(
      texts(&visible(&tasks, &query)),
      expected
    );
  }

  #[test]
  fn blank_query_shows_everything_in_order()
   {
    let tasks = groceries_and_report();
    let query = Query {
      search:   "   ".to_string(),
      category: CategoryFilter::All
    };
    assert_eq!(
      texts(&visible(&tasks, &query)),
      vec!["Buy milk", "Write report"]
    );
  }

  #[test]
  fn counts_split_completed_and_pending() {
    let tasks = vec![
      task("1", "a", Category::Work, true),
      task(
        "2",
        "b",
        Category::Personal,
        false
      ),
      task("3", "c", Category::Other, false),
    ];
    let counts = counts(&tasks);
    assert_eq!(counts.total, 3);
    assert_eq!(counts.completed, 1);
    assert_eq!(counts.pending, 2);
  }

  #[test]
  fn created_at_renders_in_local_offset() {
    let at = Utc
      .with_ymd_and_hms(
        2026, 2, 16, 23, 30, 0
      )
      .unwrap();
    assert_eq!(
      format_created_at(
        at,
        120,
        "%Y-%m-%d %H:%M"
      ),
      "2026-02-17 01:30"
    );
    assert_eq!(
      format_created_at(
        at,
        -360,
        "%Y-%m-%d %H:%M"
      ),
      "2026-02-16 17:30"
    );
    assert_eq!(
      format_created_at(
        at,
        i32::MAX,
        "%H:%M"
      ),
      "23:30"
    );
  }

  #[test]
  fn broken_pattern_falls_back() {
    let at = Utc
      .with_ymd_and_hms(
        2026, 2, 16, 23, 30, 0
      )
      .unwrap();
    assert!(!is_valid_pattern("%Q"));
    assert!(!is_valid_pattern("  "));
    assert_eq!(
      format_created_at(at, 0, "%Q"),
      "2026-02-16 23:30"
    );
  }
}
