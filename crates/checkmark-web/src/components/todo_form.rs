use checkmark_core::Category;
use web_sys::{
  HtmlInputElement,
  HtmlSelectElement
};
use yew::{
  Callback,
  Html,
  Properties,
  TargetCast,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct TodoFormProps {
  pub draft_text:         String,
  pub draft_category:     Category,
  pub editing:            bool,
  pub error:              Option<String>,
  pub on_text_input:      Callback<String>,
  pub on_category_change:
    Callback<Category>,
  pub on_submit:          Callback<()>,
  pub on_cancel:          Callback<()>
}

#[function_component(TodoForm)]
pub fn todo_form(
  props: &TodoFormProps
) -> Html {
  let oninput = {
    let on_text_input =
      props.on_text_input.clone();
    Callback::from(
      move |e: web_sys::InputEvent| {
        let input: HtmlInputElement =
          e.target_unchecked_into();
        on_text_input.emit(input.value());
      }
    )
  };

  let onchange = {
    let on_category_change =
      props.on_category_change.clone();
    Callback::from(
      move |e: web_sys::Event| {
        let select: HtmlSelectElement =
          e.target_unchecked_into();
        match Category::from_key(
          &select.value()
        ) {
          | Some(category) => {
            on_category_change
              .emit(category)
          }
          | None => tracing::warn!(
            value = %select.value(),
            "unknown category option"
          )
        }
      }
    )
  };

  let onsubmit = {
    let on_submit =
      props.on_submit.clone();
    Callback::from(
      move |e: web_sys::SubmitEvent| {
        e.prevent_default();
        on_submit.emit(());
      }
    )
  };

  let on_cancel_click = {
    let on_cancel =
      props.on_cancel.clone();
    Callback::from(
      move |_: yew::MouseEvent| {
        on_cancel.emit(())
      }
    )
  };

  let selected = props.draft_category;

  html! {
      <form class="panel todo-form" onsubmit={onsubmit}>
          <input
              class="draft-text"
              value={props.draft_text.clone()}
              placeholder="What needs doing?"
              oninput={oninput}
          />
          <select class="draft-category" onchange={onchange}>
              {
                  for Category::ALL.into_iter().map(|category| html! {
                      <option
                          value={category.as_key()}
                          selected={category == selected}
                      >
                          { category.label() }
                      </option>
                  })
              }
          </select>
          <button class="btn primary" type="submit">
              { if props.editing { "Update" } else { "Add" } }
          </button>
          {
              if props.editing {
                  html! {
                      <button class="btn" type="button" onclick={on_cancel_click}>{ "Cancel" }</button>
                  }
              } else {
                  html! {}
              }
          }
          {
              if let Some(error) = props.error.clone() {
                  html! { <div class="form-error">{ error }</div> }
              } else {
                  html! {}
              }
          }
      </form>
  }
}
