//! CLI subcommand modules.
//!
//! This module contains the output for all bea CLI subcommands.

pub(crate) mod data;
pub(crate) mod list;
