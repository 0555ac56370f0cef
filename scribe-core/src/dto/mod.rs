//! Data Transfer Objects for backend communication
//!
//! Request payloads sent to the documentation backend and the error
//! envelope it returns on failure.

pub mod job;
