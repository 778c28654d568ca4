//! Outbound adapters implementing the student repository port.
//!
//! - **memory**: process-local store for tests and database-less runs.
//! - **persistence**: PostgreSQL via Diesel.

pub mod memory;
pub mod persistence;
