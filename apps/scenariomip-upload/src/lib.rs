//! # scenariomip-upload
//!
//! Library half of the `scenariomip-upload` binary, exposed so the pipeline
//! can be driven from integration tests with an in-memory deposition.
//!
//! ## Modules
//!
//! - `cli` - argument parsing and the upload run
//! - `config` - token and instance from the environment / `.env`
//! - `deposition` - service trait, Zenodo client, in-memory double
//! - `publisher` - the resolve → draft → metadata → files → publish sequence

pub mod cli;
pub mod config;
pub mod deposition;
pub mod error;
pub mod publisher;

pub use cli::{Cli, LogLevel, UploadOptions, UploadReport, execute, execute_with, run_upload};
pub use config::UploadConfig;
pub use deposition::{
    BucketLocation, DepositionCall, DepositionError, DepositionId, DepositionService, DraftState,
    InMemoryDeposition, ZenodoClient,
};
pub use error::UploadError;
pub use publisher::{PublishOutcome, Publisher};
