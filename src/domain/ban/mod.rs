//! Ban domain
//!
//! Bans block usernames and e-mail addresses from registering. This module
//! owns the ban entity, its pattern-matching rules, and the lookup trait;
//! storage lives in the infrastructure layer.

mod entity;
mod repository;

pub use entity::{Ban, BanScope};
pub use repository::BanRepository;

#[cfg(test)]
pub use repository::mock::MockBanRepository;
