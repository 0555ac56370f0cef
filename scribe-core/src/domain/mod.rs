//! Core domain types
//!
//! These types mirror the records owned by the documentation backend. The
//! client never mutates them; it only replaces its copy with fresher ones.

pub mod job;
