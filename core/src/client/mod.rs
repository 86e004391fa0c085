pub mod task_api;
pub mod r#trait;

pub use r#trait::{ApiRequest, HttpMethod, Transport};
pub use task_api::{TaskApiClient, CHANNEL_HEADER, DEFAULT_CHANNEL_KEY, LIST_PAGE_SIZE};

#[cfg(test)]
pub(crate) mod testing;
