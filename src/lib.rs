//! Convert dotted/numbered taxonomy outlines into nested JSON trees.
//!
//! Layers, innermost first:
//! - [`domain`]: line classification and stack-based tree construction
//! - [`application`]: conversion service, JSON encoding, errors
//! - [`infrastructure`]: filesystem boundary and service wiring
//! - [`cli`]: argument parsing, command dispatch, exit codes

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
