//! Background worker for network and storage operations.
//!
//! The event handler never awaits anything. It posts [`WorkerMessage`]s; the
//! worker executes them as tokio tasks and feeds [`WorkerResponse`]s back into
//! the event loop.
//!
//! - `messages`: Request/response protocol types
//! - `handler`: Worker implementation and message processing logic

pub mod handler;
pub mod messages;

pub use handler::SearchWorker;
pub use messages::{WorkerMessage, WorkerResponse};
