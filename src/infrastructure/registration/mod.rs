//! Registration orchestration

mod service;

pub use service::RegistrationService;
