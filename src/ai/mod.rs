//! Automated players.
//!
//! The engine only validates and applies actions; choosing them lives here.

pub mod policy;

pub use policy::{DecisionPolicy, PriorityPolicy};
