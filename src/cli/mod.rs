//! CLI infrastructure for the Notakto solver
//!
//! This module provides the command-line interface for solving and
//! analyzing Notakto positions.

pub mod commands;
pub mod output;
