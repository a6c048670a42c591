mod filter_bar;
mod todo_form;
mod todo_list;
mod todo_row;
mod todo_summary;

pub use filter_bar::FilterBar;
pub use todo_form::TodoForm;
pub use todo_list::TodoList;
pub use todo_row::TodoRow;
pub use todo_summary::TodoSummary;
