use checkmark_core::Task;
use checkmark_core::view::format_created_at;
use yew::{
  Callback,
  Html,
  Properties,
  classes,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct TodoRowProps {
  pub task:               Task,
  pub editing:            bool,
  pub utc_offset_minutes: i32,
  pub created_at_format:  String,
  pub on_toggle:          Callback<String>,
  pub on_edit:            Callback<String>,
  pub on_delete:          Callback<String>
}

#[function_component(TodoRow)]
pub fn todo_row(
  props: &TodoRowProps
) -> Html {
  let id = props.task.id.clone();
  let on_toggle = {
    let on_toggle =
      props.on_toggle.clone();
    let id = id.clone();
    Callback::from(
      move |_: web_sys::Event| {
        on_toggle.emit(id.clone())
      }
    )
  };
  let on_edit = {
    let on_edit = props.on_edit.clone();
    let id = id.clone();
    Callback::from(
      move |_: yew::MouseEvent| {
        on_edit.emit(id.clone())
      }
    )
  };
  let on_delete = {
    let on_delete =
      props.on_delete.clone();
    Callback::from(
      move |_: yew::MouseEvent| {
        on_delete.emit(id.clone())
      }
    )
  };

  let created = format_created_at(
    props.task.created_at,
    props.utc_offset_minutes,
    &props.created_at_format
  );
  let text_class = classes!(
    "todo-text",
    props.task.completed.then_some("done")
  );
  let row_class = classes!(
    "row",
    props.editing.then_some("editing")
  );
  let text_style =
    if props.task.completed {
      "text-decoration: line-through;"
    } else {
      ""
    };

  html! {
      <div class={row_class}>
          <input
              type="checkbox"
              checked={props.task.completed}
              onchange={on_toggle}
          />
          <div>
              <div class={text_class} style={text_style}>{ &props.task.text }</div>
              <div style="margin-top:4px;display:flex;gap:6px;flex-wrap:wrap;">
                  <span class="badge">{ props.task.category.label() }</span>
                  <span class="badge">{ created }</span>
              </div>
          </div>
          <div class="row-actions">
              <button class="btn" onclick={on_edit}>{ "Edit" }</button>
              <button class="btn danger" onclick={on_delete}>{ "Delete" }</button>
          </div>
      </div>
  }
}
