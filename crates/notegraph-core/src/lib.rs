#![forbid(unsafe_code)]
//! notegraph-core library.
//!
//! Content model, markdown corpus loading, and project configuration shared
//! by the analytics engine and the CLI.
//!
//! # Conventions
//!
//! - **Errors**: Use `anyhow::Result` for fallible IO boundaries; typed
//!   `thiserror` enums where callers need to match on the failure.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod corpus;
pub mod error;
pub mod model;

pub use config::{AnalysisConfig, load_config};
pub use corpus::load_corpus;
pub use error::{CorpusError, ErrorCode};
pub use model::{ContentItem, Corpus};
