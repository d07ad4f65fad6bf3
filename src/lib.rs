//! Track a set of project directories and view per-day activity reports for
//! them. Report text comes from an external generator program invoked with a
//! date and a repository path, so this crate stays agnostic of how the
//! summaries are produced.
//!

pub mod cli;
pub mod registry;
pub mod report;
pub mod utils;
