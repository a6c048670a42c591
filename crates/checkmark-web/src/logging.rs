use checkmark_core::AppConfig;
use wasm_tracing::WasmLayerConfig;

/// Console layer settings for the configured `[logging] level`.
pub fn layer_config(
  config: &AppConfig
) -> WasmLayerConfig {
  WasmLayerConfig::new()
    .set_max_level(config.log_level())
    .set_show_origin(false)
    .to_owned()
}

/// Installs the browser console subscriber. A second install keeps the
/// first subscriber and is only reported.
pub fn init(config: &AppConfig) {
  if let Err(err) =
    wasm_tracing::set_as_global_default_with_config(
      layer_config(config)
    )
  {
    tracing::error!(
      error = %err,
      "failed to install console subscriber"
    );
  }
}
