//! Publish pipeline orchestration for notepub
//!
//! This crate wraps the external publish CLI as a sequence of blocking
//! subprocess steps and wires it to the cache decision: compute the
//! workspace fingerprint, look it up, and either skip (cache hit) or run
//! the publish pipeline and store the result (cache miss).

mod command;
mod error;
mod orchestrator;
mod pipeline;
mod process;

pub use command::CliCommand;
pub use error::{Error, Result};
pub use orchestrator::Publisher;
pub use pipeline::{PublishOutcome, run_pipeline};
pub use process::{ProcessRunner, SystemRunner};
