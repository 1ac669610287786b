//! Application services - business rules composed from ports.

mod assistant;
mod content;
mod credentials;
mod dashboard;

pub use assistant::AssistantService;
pub use content::ContentService;
pub use credentials::CredentialService;
pub use dashboard::DashboardService;
