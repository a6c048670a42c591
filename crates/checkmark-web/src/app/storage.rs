use anyhow::anyhow;
use checkmark_core::{
  DurableSlot,
  MemorySlot
};

/// `window.localStorage` as a durable slot.
pub struct LocalStorageSlot {
  storage: web_sys::Storage
}

impl DurableSlot for LocalStorageSlot {
  fn read(
    &self,
    key: &str
  ) -> anyhow::Result<Option<String>> {
    self.storage.get_item(key).map_err(
      |err| {
        anyhow!(
          "localStorage read of {key} \
           failed: {err:?}"
        )
      }
    )
  }

  fn write(
    &self,
    key: &str,
    value: &str
  ) -> anyhow::Result<()> {
    self
      .storage
      .set_item(key, value)
      .map_err(|err| {
        anyhow!(
          "localStorage write of {key} \
           failed: {err:?}"
        )
      })
  }
}

/// Browser storage when available, otherwise an in-memory slot that lasts
/// for this page load only.
pub fn open_slot() -> Box<dyn DurableSlot>
{
  let storage = web_sys::window()
    .and_then(|window| {
      window
        .local_storage()
        .ok()
        .flatten()
    });

  match storage {
    | Some(storage) => {
      Box::new(LocalStorageSlot {
        storage
      })
    }
    | None => {
      tracing::warn!(
        "localStorage unavailable; \
         tasks will not survive a \
         reload"
      );
      Box::new(MemorySlot::new())
    }
  }
}
