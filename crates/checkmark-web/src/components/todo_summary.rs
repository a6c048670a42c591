use checkmark_core::Counts;
use yew::{
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct TodoSummaryProps {
  pub counts: Counts
}

#[function_component(TodoSummary)]
pub fn todo_summary(
  props: &TodoSummaryProps
) -> Html {
  html! {
      <div class="summary">
          <span class="badge done">{ format!("{} completed", props.counts.completed) }</span>
          <span class="badge pending">{ format!("{} pending", props.counts.pending) }</span>
      </div>
  }
}
