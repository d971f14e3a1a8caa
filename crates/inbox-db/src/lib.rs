//! # inbox-db
//!
//! Storage layer implementing `MessageRepository`.
//!
//! ## Overview
//!
//! - Connection pool management and schema migrations for PostgreSQL
//! - Database models with SQLx `FromRow` derives
//! - Model → entity mappers
//! - `PgMessageRepository` for durable deployments
//! - `InMemoryMessageRepository` for tests and throwaway deployments
//!
//! ## Usage
//!
//! ```rust,ignore
//! use inbox_db::{create_pool, run_migrations, PgMessageRepository, PoolConfig};
//!
//! async fn example(url: &str) -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&PoolConfig::new(url)).await?;
//!     run_migrations(&pool).await?;
//!     let repo = PgMessageRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::InMemoryMessageRepository;
pub use pool::{create_pool, run_migrations, PgPool, PoolConfig};
pub use repositories::PgMessageRepository;
