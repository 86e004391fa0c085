//! Stable re-exports for consumers (`cli`, `plugins`, and external crates).
//!
//! Prefer importing from `browseract_core::api` instead of reaching into internal modules.

pub use crate::client::{
    ApiRequest, HttpMethod, TaskApiClient, Transport, CHANNEL_HEADER, DEFAULT_CHANNEL_KEY,
    LIST_PAGE_SIZE,
};
pub use crate::config::{
    load_default, load_from_path, ApiConfig, AppConfig, LoggingConfig, PollConfig,
};
pub use crate::error::transport::preview_body;
pub use crate::error::{AdapterError, TransportError, TransportErrorKind, ValidationError};
pub use crate::fields::{
    FieldKind, FieldResolver, FieldSchemaEntry, OptionEntry, ResourceSummary,
};
pub use crate::lifecycle::{PollPolicy, TaskController, TaskPhase, TaskResult, TaskStatus};
pub use crate::node::{BrowserActNode, ExecutionContext, StaticContext, CREDENTIAL_NAME};
pub use crate::payload::{build_run_request, RawFields, RunMode, RunRequest, WorkflowInputs};
