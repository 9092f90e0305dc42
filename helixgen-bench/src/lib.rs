//! # helixgen Bench
//!
//! Benchmarking utilities for helixgen performance testing.

pub mod synthetic;
