//! Order submitter implementations
//!
//! - [`HttpOrderSubmitter`]: POSTs the order as JSON to the configured endpoint
//! - [`InMemoryOrderSubmitter`]: records orders and replays scripted replies

pub mod http;
pub mod in_memory;

pub use http::HttpOrderSubmitter;
pub use in_memory::{InMemoryOrderSubmitter, ScriptedReply};
