// TodoStore - In-memory to-do list with filtered and sorted views

pub mod clock;
pub mod config;
pub mod error;
pub mod filter;
pub mod models;
pub mod render;
pub mod shell;
pub mod store;

// Re-export main types for convenience
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use error::{StoreError, StoreResult};
pub use filter::{PriorityFilter, Query, SortKey, StatusFilter};
pub use models::{Priority, Task, TaskFields};
pub use render::Renderer;
pub use store::{Stats, TaskStore};
