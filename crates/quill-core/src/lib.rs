//! # Quill Core
//!
//! The domain layer of the Quill blogging backend.
//! This crate contains business rules, port traits and the services built on
//! them, with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::DomainError;
