pub mod config;
pub mod ident;
pub mod persist;
pub mod session;
pub mod store;
pub mod task;
pub mod view;

pub use config::AppConfig;
pub use persist::{
  DurableSlot,
  MemorySlot,
  PersistenceBridge,
  RestoreSource,
  decode,
  encode
};
pub use session::{
  Change,
  Dialogs,
  FormMode,
  Session,
  SubmitError,
  Submitted,
  UiState
};
pub use store::{
  Outcome,
  TaskAction,
  TaskStore
};
pub use task::{
  Category,
  CategoryFilter,
  Task
};
pub use view::{
  Counts,
  Query,
  ViewModel
};
