//! Common library for the Ripple backend
//!
//! This crate provides shared functionality used across the Ripple
//! services: PostgreSQL connection pooling, shared error types, and the
//! session-token service that the auth service uses to issue tokens and
//! the API service uses to verify them.

pub mod database;
pub mod error;
pub mod token;
