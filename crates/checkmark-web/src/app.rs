mod dialogs;
mod storage;

use std::cell::{
  Cell,
  RefCell
};
use std::rc::Rc;

use checkmark_core::{
  AppConfig,
  Category,
  CategoryFilter,
  DurableSlot,
  Session,
  Submitted
};
use chrono::Utc;
use gloo::console::log;
use yew::{
  Callback,
  Html,
  Properties,
  UseForceUpdateHandle,
  function_component,
  html,
  use_effect_with,
  use_force_update,
  use_mut_ref
};

use self::dialogs::BrowserDialogs;
use self::storage::open_slot;
use crate::components::{
  FilterBar,
  TodoForm,
  TodoList,
  TodoSummary
};

type WebSession = Session<
  Box<dyn DurableSlot>,
  BrowserDialogs
>;

/// The session plus a flag its listener raises whenever something changed.
struct Live {
  session: WebSession,
  dirty:   Rc<Cell<bool>>,
  verbose: bool
}

impl Live {
  fn start(config: AppConfig) -> Self {
    let verbose = config.log_level()
      >= tracing::Level::DEBUG;
    let mut session = Session::start(
      open_slot(),
      BrowserDialogs,
      config
    );

    let dirty = Rc::new(Cell::new(false));
    {
      let dirty = Rc::clone(&dirty);
      session.subscribe(move |change| {
        tracing::trace!(
          ?change,
          "session changed"
        );
        dirty.set(true);
      });
    }

    Self {
      session,
      dirty,
      verbose
    }
  }
}

/// Runs `f` against the session and redraws once the borrow is released, so
/// the next gesture always sees the latest state.
#[derive(Clone)]
struct SessionHandle {
  live:   Rc<RefCell<Live>>,
  redraw: UseForceUpdateHandle
}

impl SessionHandle {
  fn update<R>(
    &self,
    f: impl FnOnce(&mut WebSession) -> R
  ) -> R {
    let (out, dirty) = {
      let mut live =
        self.live.borrow_mut();
      let out = f(&mut live.session);
      (out, live.dirty.replace(false))
    };
    if dirty {
      self.redraw.force_update();
    }
    out
  }

  fn debug(
    &self,
    event: &str,
    detail: &str
  ) {
    let verbose =
      self.live.borrow().verbose;
    ui_debug(verbose, event, detail);
  }
}

#[derive(Properties, PartialEq)]
pub struct AppProps {
  pub config: AppConfig
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
  let live = {
    let config = props.config.clone();
    use_mut_ref(move || Live::start(config))
  };
  let redraw = use_force_update();
  let handle = SessionHandle {
    live:   live.clone(),
    redraw: redraw.clone()
  };

  {
    let handle = handle.clone();
    use_effect_with((), move |_| {
      let (tasks, restored_from) = {
        let live = handle.live.borrow();
        (
          live.session.tasks().len(),
          live.session.restored_from()
        )
      };
      tracing::info!(
        tasks,
        ?restored_from,
        "frontend mounted"
      );
      handle.debug(
        "app.mounted",
        "session restored and hooks \
         initialized"
      );
      || ()
    });
  }

  let on_text_input = {
    let handle = handle.clone();
    Callback::from(move |text: String| {
      handle.update(|session| {
        session.set_draft_text(text)
      });
    })
  };

  let on_category_change = {
    let handle = handle.clone();
    Callback::from(
      move |category: Category| {
        handle.update(|session| {
          session
            .set_draft_category(category)
        });
      }
    )
  };

  let on_submit = {
    let handle = handle.clone();
    Callback::from(move |_| {
      let result =
        handle.update(|session| {
          session.submit(Utc::now())
        });
      match result {
        | Ok(Submitted::Added(task)) => {
          handle.debug(
            "action.submit.add",
            &format!("id={}", task.id)
          );
        }
        | Ok(Submitted::Edited {
          id,
          outcome
        }) => {
          handle.debug(
            "action.submit.edit",
            &format!(
              "id={id} outcome={outcome:?}"
            )
          );
        }
        | Err(err) => {
          handle.debug(
            "action.submit.rejected",
            &err.to_string()
          );
        }
      }
    })
  };

  let on_cancel_edit = {
    let handle = handle.clone();
    Callback::from(move |_| {
      handle.update(|session| {
        session.cancel_edit()
      });
    })
  };

  let on_search = {
    let handle = handle.clone();
    Callback::from(move |search: String| {
      handle.update(|session| {
        session.set_search(search)
      });
    })
  };

  let on_filter = {
    let handle = handle.clone();
    Callback::from(
      move |filter: CategoryFilter| {
        handle.update(|session| {
          session
            .set_category_filter(filter)
        });
      }
    )
  };

  let on_toggle = {
    let handle = handle.clone();
    Callback::from(move |id: String| {
      let outcome =
        handle.update(|session| {
          session.toggle(&id)
        });
      handle.debug(
        "action.toggle",
        &format!(
          "id={id} outcome={outcome:?}"
        )
      );
    })
  };

  let on_edit = {
    let handle = handle.clone();
    Callback::from(move |id: String| {
      handle.update(|session| {
        session.begin_edit(&id)
      });
    })
  };

  let on_delete = {
    let handle = handle.clone();
    Callback::from(move |id: String| {
      let deleted =
        handle.update(|session| {
          session.request_delete(&id)
        });
      handle.debug(
        "action.delete",
        &format!(
          "id={id} deleted={deleted}"
        )
      );
    })
  };

  let on_clear_all = {
    let handle = handle.clone();
    Callback::from(move |_| {
      let cleared =
        handle.update(|session| {
          session.request_clear_all()
        });
      handle.debug(
        "action.clear_all",
        &format!("cleared={cleared}")
      );
    })
  };

  let live = live.borrow();
  let session = &live.session;
  let ui = session.ui().clone();
  let view = session.view();
  let created_at_format = session
    .config()
    .display
    .created_at_format
    .clone();
  let editing_id =
    ui.editing_id().map(str::to_string);

  html! {
      <div class="app">
          <header class="header">
              <h1>{ "Checkmark" }</h1>
              <TodoSummary counts={view.counts} />
          </header>
          <TodoForm
              draft_text={ui.draft_text.clone()}
              draft_category={ui.draft_category}
              editing={editing_id.is_some()}
              error={ui.last_error.clone()}
              on_text_input={on_text_input}
              on_category_change={on_category_change}
              on_submit={on_submit}
              on_cancel={on_cancel_edit}
          />
          <FilterBar
              search={ui.query.search.clone()}
              filter={ui.query.category}
              can_clear={view.counts.total > 0}
              on_search={on_search}
              on_filter={on_filter}
              on_clear_all={on_clear_all}
          />
          <TodoList
              rows={view.rows}
              editing_id={editing_id}
              utc_offset_minutes={local_utc_offset_minutes()}
              created_at_format={created_at_format}
              on_toggle={on_toggle}
              on_edit={on_edit}
              on_delete={on_delete}
          />
      </div>
  }
}

/// Minutes east of UTC for the browser's current zone.
fn local_utc_offset_minutes() -> i32 {
  let behind = js_sys::Date::new_0()
    .get_timezone_offset();
  -(behind.round() as i32)
}

fn ui_debug(
  verbose: bool,
  event: &str,
  detail: &str
) {
  tracing::debug!(
    event, detail, "ui-debug"
  );
  if verbose {
    log!(format!(
      "[ui-debug] {event}: {detail}"
    ));
  }
}
