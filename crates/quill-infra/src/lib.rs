//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`:
//! repositories, authentication, blob storage, rate limiting and the text
//! completion client.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL repositories via SeaORM
//! - `minimal` - in-memory repositories only

pub mod auth;
pub mod blob;
pub mod completion;
pub mod database;
pub mod engagement;
pub mod rate_limit;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService, PasswordHashConfig};
pub use blob::{InMemoryBlobStorage, LocalBlobConfig, LocalBlobStorage};
pub use completion::{GeminiCompletion, GeminiConfig, UnavailableCompletion};
pub use database::{
    DatabaseConfig, InMemoryPostRepository, InMemoryTagRepository, InMemoryUserRepository,
};
pub use engagement::SyntheticEngagement;
pub use rate_limit::{InMemoryRateLimiter, RateLimitConfig};

#[cfg(feature = "postgres")]
pub use database::{
    DatabaseConnections, PostgresPostRepository, PostgresTagRepository, PostgresUserRepository,
};
