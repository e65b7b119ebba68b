pub mod archive;
pub mod cli;
pub mod collectors;
pub mod config;
pub mod error;
pub mod models;
pub mod processors;
pub mod readers;
pub mod utils;
pub mod validators;
pub mod writers;

pub use error::{PipelineError, Result};
