//! Password hashing
//!
//! Validated passwords are hashed with Argon2 before the account is stored.
//! Strength rules live in the domain layer; this module only turns an
//! accepted password into a hash.

mod hasher;

pub use hasher::{Argon2Hasher, PasswordHasher};
