//! # repo-docgen
//!
//! Turns a source repository into a structured documentation set: the main
//! markdown document, an optional HTML or PDF rendering, outline and section
//! JSON, a quality review, a regeneration block for the next pass, test
//! skeletons and assistant prompts.
//!
//! The pure stages live in [`repo_docgen_core`]. This crate does the I/O around
//! them: fetching ([`fetch`]), parsing from disk ([`parse`]), loading context
//! ([`context`]), converting ([`convert`]) and driving a run ([`pipeline`]).

pub mod cli;
pub mod config;
pub mod context;
pub mod convert;
pub mod fetch;
pub mod load_config;
pub mod parse;
pub mod pipeline;

pub use cli::{run, Cli, Commands};
