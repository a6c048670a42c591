use std::cell::Cell;
use std::rc::Rc;

use chrono::{Duration, TimeZone, Utc};
use checkmark_core::{
    AppConfig, Category, CategoryFilter, Dialogs, DurableSlot, MemorySlot, RestoreSource, Session,
};

#[derive(Clone)]
struct AlwaysYes {
    prompts: Rc<Cell<usize>>,
}

impl Dialogs for AlwaysYes {
    fn confirm(&self, _message: &str) -> bool {
        self.prompts.set(self.prompts.get() + 1);
        true
    }

    fn alert(&self, _message: &str) {}
}

/// Shares one slot between two sessions, like two page loads of one browser.
struct SharedSlot(Rc<MemorySlot>);

impl DurableSlot for SharedSlot {
    fn read(&self, key: &str) -> anyhow::Result<Option<String>> {
        self.0.read(key)
    }

    fn write(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.0.write(key, value)
    }
}

#[test]
fn tasks_survive_a_restart() {
    let slot = Rc::new(MemorySlot::new());
    let dialogs = AlwaysYes {
        prompts: Rc::new(Cell::new(0)),
    };
    let config = AppConfig::load(
        r#"
[storage]
key = "flow.tasks"
"#,
    );

    let mut first = Session::start(SharedSlot(Rc::clone(&slot)), dialogs.clone(), config.clone());
    assert_eq!(first.restored_from(), RestoreSource::Empty);

    let start = Utc.with_ymd_and_hms(2026, 2, 16, 5, 0, 0).unwrap();
    for (offset, (text, category)) in [
        ("Buy milk", Category::Shopping),
        ("Write report", Category::Work),
        ("Water plants", Category::Personal),
    ]
    .into_iter()
    .enumerate()
    {
        first.set_draft_category(category);
        first.set_draft_text(text);
        first
            .submit(start + Duration::minutes(offset as i64))
            .expect("submit");
    }

    let report = first.tasks()[1].id.clone();
    first.toggle(&report);
    let plants = first.tasks()[0].id.clone();
    assert!(first.request_delete(&plants));
    assert_eq!(dialogs.prompts.get(), 1);

    let before = first.tasks().to_vec();
    drop(first);

    let mut second = Session::start(SharedSlot(Rc::clone(&slot)), dialogs, config);
    assert_eq!(second.restored_from(), RestoreSource::Restored(2));
    assert_eq!(second.tasks(), before.as_slice());
    assert!(second.tasks()[0].completed);
    assert_eq!(second.tasks()[0].created_at, start + Duration::minutes(1));

    second.set_category_filter(CategoryFilter::Only(Category::Shopping));
    let view = second.view();
    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.rows[0].text, "Buy milk");
    assert_eq!(view.counts.completed, 1);
    assert_eq!(view.counts.pending, 1);

    assert!(slot.get("flow.tasks").is_some());
    assert!(slot.get("checkmark.tasks").is_none());
}
