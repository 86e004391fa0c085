mod adapter;
pub mod context;
mod params;

pub use adapter::{BrowserActNode, CREDENTIAL_NAME};
pub use context::{ExecutionContext, StaticContext};
