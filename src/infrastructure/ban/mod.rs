//! Ban lookup infrastructure
//!
//! PostgreSQL-backed lookups for production, an in-memory store for the
//! memory backend and tests, and a TTL cache wrapper for either.

mod cached_repository;
mod in_memory;
mod postgres_repository;

pub use cached_repository::CachedBanRepository;
pub use in_memory::InMemoryBanRepository;
pub use postgres_repository::PostgresBanRepository;
