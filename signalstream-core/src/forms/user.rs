//! User edit form.

use serde::Serialize;

use super::{is_valid_email, FieldErrors};
use crate::domain::{SubscriptionStatus, User, UserId};

/// Raw user edit form state. The id comes from the record being edited and
/// is never editable.
#[derive(Debug, Clone, PartialEq)]
pub struct UserDraft {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub subscription_status: Option<SubscriptionStatus>,
    pub is_admin: bool,
}

/// A fully validated user edit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidUser {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub subscription_status: SubscriptionStatus,
    pub is_admin: bool,
}

impl UserDraft {
    /// Prefill from the record being edited.
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            subscription_status: Some(user.subscription_status),
            is_admin: user.is_admin,
        }
    }

    pub fn validate(&self) -> Result<ValidUser, FieldErrors> {
        let mut errors = FieldErrors::default();

        if self.name.chars().count() < 2 {
            errors.push("name", "Name must be at least 2 characters.");
        }
        if !is_valid_email(&self.email) {
            errors.push("email", "Invalid email address.");
        }
        if self.subscription_status.is_none() {
            errors.push("subscription_status", "Subscription status is required.");
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        let Some(subscription_status) = self.subscription_status else {
            return Err(errors);
        };

        Ok(ValidUser {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            subscription_status,
            is_admin: self.is_admin,
        })
    }
}

impl ValidUser {
    /// Merge the editable fields into an existing record. Everything else on
    /// the record (joined date, avatar, plan) stays untouched.
    pub fn apply_to(&self, user: &mut User) {
        user.name = self.name.clone();
        user.email = self.email.clone();
        user.subscription_status = self.subscription_status;
        user.is_admin = self.is_admin;
    }
}
