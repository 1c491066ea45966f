//! Command handlers for memdump CLI
//!
//! Each subcommand has its own module with handler functions.

pub mod compare;
pub mod concat;
pub mod configure;
