#[allow(clippy::module_inception)]
pub mod error;
pub mod transport;

pub use error::{AdapterError, ValidationError};
pub use transport::{TransportError, TransportErrorKind};
