pub mod filter;
pub mod storage;
pub mod types;

pub use filter::{filter_active, filter_dismissed};
pub use storage::{get_dismiss_path, load_dismiss_state, save_dismiss_state};
pub use types::{DismissEntry, DismissState};
