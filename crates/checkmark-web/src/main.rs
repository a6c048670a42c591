mod app;
mod components;
mod logging;

use checkmark_core::AppConfig;

const CONFIG_TOML: &str =
  include_str!("../assets/checkmark.toml");

fn main() {
  console_error_panic_hook::set_once();

  let config = AppConfig::load(CONFIG_TOML);
  logging::init(&config);

  tracing::info!(
    key = %config.storage.key,
    level = %config.log_level(),
    "starting Checkmark frontend"
  );

  let Some(mount) = web_sys::window()
    .and_then(|window| window.document())
    .and_then(|document| {
      document.get_element_by_id("app")
    })
  else {
    tracing::error!(
      "missing #app mount element; nothing to render"
    );
    return;
  };

  yew::Renderer::<app::App>::with_root_and_props(
    mount,
    app::AppProps {
      config
    }
  )
  .render();
}
