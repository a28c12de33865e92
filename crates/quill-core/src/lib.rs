//! # Quill Core
//!
//! The domain layer of the Quill blogging backend.
//! Entities, validation rules and the ports infrastructure must implement.
//! No infrastructure dependencies live here.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::{DomainError, RepoError};
