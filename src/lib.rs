//! Kanban-style task board persisted to a local key-value store.
//!
//! [`store::TaskStore`] owns the task collection; boards are derived from the
//! tasks. [`session::Session`] carries the UI's own state, and [`app`] / [`ui`]
//! are the terminal front end.

pub mod app;
pub mod board;
pub mod config;
pub mod error;
pub mod seed;
pub mod session;
pub mod storage;
pub mod store;
pub mod task;
pub mod ui;

#[cfg(test)]
mod test_support;

pub use error::{StorageError, StoreError, StoreResult};
pub use storage::{FileStorage, KeyValueStore, MemoryStorage};
pub use store::TaskStore;
pub use task::{NewTask, Status, Task, TaskId, TaskPatch};
