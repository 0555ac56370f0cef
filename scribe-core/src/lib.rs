//! Scribe Core
//!
//! Core types and abstractions for the Scribe documentation job tracker.
//!
//! This crate contains:
//! - Domain types: Jobs as the documentation backend reports them
//! - DTOs: Request and error bodies exchanged with the backend
//! - Validation: Local checks run on repository URLs before any request is made

pub mod domain;
pub mod dto;
pub mod validation;
