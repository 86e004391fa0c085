//! Agent and workflow runs against the BrowserAct task API.
//!
//! The pieces, leaves first: [`client`] talks to the REST endpoints through a
//! host-provided [`client::Transport`]; [`fields`] resolves dropdown options
//! and per-workflow input fields; [`payload`] validates user input into a
//! [`payload::RunRequest`]; [`lifecycle`] submits the run and polls it to a
//! terminal state; [`node`] ties them together behind the host-facing methods.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod fields;
pub mod lifecycle;
pub mod node;
pub mod payload;
