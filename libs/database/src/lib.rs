//! Database connectors
//!
//! MongoDB connection management with retry support for startup resilience.

pub mod common;
pub mod mongodb;
