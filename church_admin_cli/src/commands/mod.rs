//! CLI subcommand implementations.

pub mod churches;
pub mod directory;
pub mod finance;
mod paging;
