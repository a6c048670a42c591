use checkmark_core::Dialogs;

/// `window.confirm` and `window.alert`.
pub struct BrowserDialogs;

impl Dialogs for BrowserDialogs {
  fn confirm(
    &self,
    message: &str
  ) -> bool {
    web_sys::window()
      .and_then(|window| {
        window
          .confirm_with_message(message)
          .ok()
      })
      .unwrap_or(false)
  }

  fn alert(&self, message: &str) {
    if let Some(window) =
      web_sys::window()
      && let Err(err) =
        window.alert_with_message(message)
    {
      tracing::error!(
        error = ?err,
        "window.alert failed"
      );
    }
  }
}
