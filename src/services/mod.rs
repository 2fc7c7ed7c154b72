//! Background Services
//!
//! This module contains the work that runs outside the update loop:
//! - tasks: dispatches [`Task`](crate::messages::Task)s to worker threads
//! - preview: text / image / hex-dump preview generation
//! - command: the shell command adapter
//! - file_ops: create, rename and delete
//! - input: terminal event listener thread
//! - shutdown: draining tasks and closing the store at exit

pub mod command;
pub mod file_ops;
pub mod input;
pub mod preview;
pub mod shutdown;
pub mod tasks;

// Re-export commonly used types for convenience
pub use preview::PreviewOptions;
pub use shutdown::{finish_session, SHUTDOWN_GRACE};
pub use tasks::{run_task, TaskRunner};
