//! CLI infrastructure for the solver driver
//!
//! This module provides the command-line interface for solving positions,
//! running self-play games, benchmarking the search algorithms, and
//! counting the state space.

pub mod commands;
pub mod output;
