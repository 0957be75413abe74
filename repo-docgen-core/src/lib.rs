//! repo-docgen-core: the pure stages of the documentation pipeline.
//!
//! Everything in this crate is a deterministic transformation over a parsed
//! [`model::RepositoryModel`]. Fetching, parsing from disk, document conversion
//! and writing artifacts live in the `repo-docgen` binary crate, which talks to
//! this crate through the traits in [`contract`].
//!
//! Stage order: [`outline`] → [`render`] → [`assemble`] → [`review`].

pub mod assemble;
pub mod contract;
pub mod error;
pub mod model;
pub mod outline;
pub mod project_type;
pub mod prompts;
pub mod render;
pub mod review;
pub mod testgen;

pub use error::DocgenError;
