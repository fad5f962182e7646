#![doc = "s3edit: interactively edit S3 objects matched by a glob pattern."]

//! The core is a sequential loop: list a bucket page by page, filter keys
//! against a glob, and for each consented match stage the object locally,
//! open it in the operator's editor, and upload it back iff it changed.
//!
//! The store seam ([`store::ObjectStore`]) and the terminal seam
//! ([`prompt::Prompt`]) are traits with mockall mocks, so the whole loop
//! is exercised in tests without AWS or a TTY.

pub mod cli;
pub mod config;
pub mod filter;
pub mod prompt;
pub mod session;
pub mod store;
pub mod walker;

pub use cli::{run, Cli};
