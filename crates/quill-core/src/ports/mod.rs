//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod blob;
mod completion;
mod engagement;
mod rate_limit;
mod repository;

pub use auth::{AuthError, PasswordService, TokenService};
pub use blob::{BlobError, BlobStorage};
pub use completion::{CompletionError, TextCompletion};
pub use engagement::EngagementSource;
pub use rate_limit::{RateLimitResult, RateLimiter};
pub use repository::{BaseRepository, PostRepository, TagRepository, UserRepository};
