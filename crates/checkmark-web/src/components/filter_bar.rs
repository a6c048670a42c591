use checkmark_core::CategoryFilter;
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
pub struct FilterBarProps {
  pub search:       String,
  pub filter:       CategoryFilter,
  pub can_clear:    bool,
  pub on_search:    Callback<String>,
  pub on_filter:
    Callback<CategoryFilter>,
  pub on_clear_all: Callback<()>
}

#[function_component(FilterBar)]
pub fn filter_bar(
  props: &FilterBarProps
) -> Html {
  let on_search_input = {
    let on_search =
      props.on_search.clone();
    Callback::from(
      move |e: web_sys::InputEvent| {
        let input: HtmlInputElement =
          e.target_unchecked_into();
        on_search.emit(input.value());
      }
    )
  };

  let on_filter_change = {
    let on_filter =
      props.on_filter.clone();
    Callback::from(
      move |e: web_sys::Event| {
        let select: HtmlSelectElement =
          e.target_unchecked_into();
        on_filter.emit(
          CategoryFilter::from_key(
            &select.value()
          )
        );
      }
    )
  };

  let on_clear_click = {
    let on_clear_all =
      props.on_clear_all.clone();
    Callback::from(
      move |_: yew::MouseEvent| {
        on_clear_all.emit(())
      }
    )
  };

  let active = props.filter;

  html! {
      <div class="panel filters">
          <div class="field">
              <label>{ "Search" }</label>
              <input
                  value={props.search.clone()}
                  placeholder="Search todos"
                  oninput={on_search_input}
              />
          </div>
          <div class="field">
              <label>{ "Category" }</label>
              <select onchange={on_filter_change}>
                  {
                      for CategoryFilter::options().map(|option| html! {
                          <option
                              value={option.as_key()}
                              selected={option == active}
                          >
                              { option.as_key() }
                          </option>
                      })
                  }
              </select>
          </div>
          <button
              class="btn danger"
              onclick={on_clear_click}
              disabled={!props.can_clear}
          >
              { "Clear All" }
          </button>
      </div>
  }
}
