mod controller;
pub mod policy;
pub mod status;

pub use controller::{TaskController, TaskPhase, TaskResult, ERROR_MARKER};
pub use policy::{PollPolicy, DEFAULT_POLL_DELAY_MS, DEFAULT_TIMEOUT_SECS, POLL_HARD_CAP};
pub use status::TaskStatus;
