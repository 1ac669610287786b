//! Registration and credential verification.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{User, mask_email, normalize_email};
use crate::error::{DomainError, RepoError};
use crate::ports::{PasswordService, UserRepository};

/// Credential store: owns user records and password hashes.
pub struct CredentialService {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
}

impl CredentialService {
    pub fn new(users: Arc<dyn UserRepository>, passwords: Arc<dyn PasswordService>) -> Self {
        Self { users, passwords }
    }

    /// Register a new user. Only the salted hash of `password` is stored.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<User, DomainError> {
        let name = name.trim();
        let email = normalize_email(email);

        if name.is_empty() {
            return Err(DomainError::missing("name"));
        }
        if email.is_empty() {
            return Err(DomainError::missing("email"));
        }
        if !email.contains('@') {
            return Err(DomainError::invalid("email", "Invalid email address"));
        }
        if password.is_empty() {
            return Err(DomainError::missing("password"));
        }

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(DomainError::DuplicateEmail);
        }

        let password_hash = self
            .passwords
            .hash(password)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let user = User::new(name.to_string(), email, password_hash);
        match self.users.insert(user).await {
            Ok(user) => {
                tracing::info!(user_id = %user.id, email = %mask_email(&user.email), "User registered");
                Ok(user)
            }
            // Lost a race against a concurrent registration for the same email.
            Err(RepoError::Constraint(_)) => Err(DomainError::DuplicateEmail),
            Err(e) => Err(e.into()),
        }
    }

    /// Check an email/password pair.
    ///
    /// Unknown email and wrong password yield the same `InvalidCredentials`.
    pub async fn verify_credentials(&self, email: &str, password: &str) -> Result<User, DomainError> {
        let email = normalize_email(email);
        if email.is_empty() {
            return Err(DomainError::missing("email"));
        }
        if password.is_empty() {
            return Err(DomainError::missing("password"));
        }

        let Some(user) = self.users.find_by_email(&email).await? else {
            tracing::debug!(email = %mask_email(&email), "Login attempt for unknown email");
            return Err(DomainError::InvalidCredentials);
        };

        match self.passwords.verify(password, &user.password_hash) {
            Ok(true) => Ok(user),
            Ok(false) => {
                tracing::debug!(user_id = %user.id, "Login attempt with wrong password");
                Err(DomainError::InvalidCredentials)
            }
            Err(e) => {
                tracing::error!(user_id = %user.id, error = %e, "Stored password hash is unreadable");
                Err(DomainError::InvalidCredentials)
            }
        }
    }

    pub async fn get_user(&self, id: Uuid) -> Result<User, DomainError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("user", id))
    }
}
