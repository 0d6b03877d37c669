//! User lookup and field validation.
//!
//! [`SimulatedDirectory`] stands in for a remote user service and is the
//! typical operation handed to [`fetch_with_retry`](crate::retry::fetch_with_retry).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::{OrderflowError, ValidationError};

/// Minimum accepted age.
pub const MIN_AGE: u32 = 18;

/// A user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User id.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Contact email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Age in years.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
}

impl User {
    /// Creates a user with no email or age.
    #[must_use]
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: None,
            age: None,
        }
    }

    /// Sets the email.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the age.
    #[must_use]
    pub fn with_age(mut self, age: u32) -> Self {
        self.age = Some(age);
        self
    }
}

/// Checks a user's email and age.
///
/// A missing email fails; a missing age passes.
pub fn validate_user(user: &User) -> Result<(), ValidationError> {
    if !user.email.as_deref().is_some_and(|email| email.contains('@')) {
        return Err(ValidationError::new("Invalid email", "email"));
    }
    if user.age.is_some_and(|age| age < MIN_AGE) {
        return Err(ValidationError::new("Must be 18+", "age"));
    }
    Ok(())
}

/// Source of user records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Looks up a user by id.
    async fn fetch_user(&self, id: i64) -> Result<User, OrderflowError>;
}

/// A directory that fabricates users after a fixed latency.
#[derive(Debug, Clone)]
pub struct SimulatedDirectory {
    latency: Duration,
}

impl Default for SimulatedDirectory {
    fn default() -> Self {
        Self {
            latency: Duration::from_millis(100),
        }
    }
}

impl SimulatedDirectory {
    /// Creates a directory with the default 100ms latency.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the simulated latency.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

#[async_trait]
impl UserDirectory for SimulatedDirectory {
    async fn fetch_user(&self, id: i64) -> Result<User, OrderflowError> {
        tokio::time::sleep(self.latency).await;

        if id < 1 {
            return Err(OrderflowError::InvalidUserId(id));
        }
        Ok(User::new(id, format!("User {id}")))
    }
}
