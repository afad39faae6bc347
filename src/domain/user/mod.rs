//! Account domain
//!
//! This module provides the forum account entity, field validation for
//! registration input, and the account repository trait.

mod entity;
mod repository;
mod validation;

pub use entity::{User, UserStatus};
pub use repository::UserRepository;
pub use validation::{
    slugify, validate_email, validate_username, UserValidationError, UsernameLimits,
};

#[cfg(test)]
pub use repository::mock::MockUserRepository;
