//! PostgreSQL persistence adapter using Diesel ORM.
//!
//! Row structs (`models.rs`) and table definitions (`schema.rs`) stay
//! internal; the adapter only translates between them and domain types.
//! Connections come from a `bb8` pool through `diesel-async`.
//!
//! # Example
//!
//! ```no_run
//! use student_registry::outbound::persistence::{
//!     DbPool, DieselStudentRepository, PoolConfig, run_pending_migrations,
//! };
//!
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! let url = "postgres://localhost/students";
//! run_pending_migrations(url).await?;
//! let pool = DbPool::new(PoolConfig::new(url)).await?;
//! let repo = DieselStudentRepository::new(pool);
//! # let _ = repo;
//! # Ok(())
//! # }
//! ```

mod diesel_student_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_student_repository::DieselStudentRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
