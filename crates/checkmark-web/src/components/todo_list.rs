use checkmark_core::Task;
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

use super::TodoRow;

#[derive(Properties, PartialEq)]
pub struct TodoListProps {
  pub rows:               Vec<Task>,
  pub editing_id:         Option<String>,
  pub utc_offset_minutes: i32,
  pub created_at_format:  String,
  pub on_toggle:          Callback<String>,
  pub on_edit:            Callback<String>,
  pub on_delete:          Callback<String>
}

#[function_component(TodoList)]
pub fn todo_list(
  props: &TodoListProps
) -> Html {
  if props.rows.is_empty() {
    return html! {
        <div class="panel list">
            <div class="empty">{ "No todos found" }</div>
        </div>
    };
  }

  html! {
      <div class="panel list">
          {
              for props.rows.iter().cloned().map(|task| {
                  let editing = props.editing_id.as_deref() == Some(task.id.as_str());
                  html! {
                      <TodoRow
                          key={task.id.clone()}
                          task={task.clone()}
                          editing={editing}
                          utc_offset_minutes={props.utc_offset_minutes}
                          created_at_format={props.created_at_format.clone()}
                          on_toggle={props.on_toggle.clone()}
                          on_edit={props.on_edit.clone()}
                          on_delete={props.on_delete.clone()}
                      />
                  }
              })
          }
      </div>
  }
}
