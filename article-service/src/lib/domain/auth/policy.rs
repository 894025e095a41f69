//! Authorization rules for mutating operations.
//!
//! Every rule is a pure function of already-fetched entities. Callers load
//! the acting user and the target resource with separate lookups, ask for a
//! decision, then enforce it before touching the store.

use thiserror::Error;

use crate::domain::article::models::Article;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Outcome of an authorization rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthorizationDecision {
    pub allowed: bool,
    pub reason: &'static str,
}

/// Authorization failure.
///
/// `action` and `reason` are meant for logs; the HTTP edge reports every
/// instance with the same generic message.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("Not permitted to {action}: {reason}")]
pub struct NotPermitted {
    pub action: &'static str,
    pub reason: &'static str,
}

impl AuthorizationDecision {
    fn allow(reason: &'static str) -> Self {
        Self {
            allowed: true,
            reason,
        }
    }

    fn deny(reason: &'static str) -> Self {
        Self {
            allowed: false,
            reason,
        }
    }

    /// Turn the decision into a result, logging denials.
    ///
    /// # Arguments
    /// * `action` - Operation being authorized (for logs)
    /// * `acting` - User attempting the operation
    ///
    /// # Errors
    /// * `NotPermitted` - The rule denied the operation
    pub fn enforce(self, action: &'static str, acting: &User) -> Result<(), NotPermitted> {
        if self.allowed {
            return Ok(());
        }

        tracing::warn!(
            action,
            acting_user_id = %acting.id,
            reason = self.reason,
            "Authorization denied"
        );

        Err(NotPermitted {
            action,
            reason: self.reason,
        })
    }
}

/// A user may edit their own profile; admins may edit any profile.
pub fn can_update_user(acting: &User, target_id: UserId) -> AuthorizationDecision {
    if acting.id == target_id {
        AuthorizationDecision::allow("own profile")
    } else if acting.is_admin {
        AuthorizationDecision::allow("admin")
    } else {
        AuthorizationDecision::deny("not the profile owner and not an admin")
    }
}

/// Only admins may grant or revoke the admin flag, including their own.
pub fn can_change_admin_flag(acting: &User) -> AuthorizationDecision {
    if acting.is_admin {
        AuthorizationDecision::allow("admin")
    } else {
        AuthorizationDecision::deny("only admins may change the admin flag")
    }
}

/// Nobody may delete themselves or an admin. The acting user's own admin
/// flag plays no part.
pub fn can_delete_user(acting: &User, target: &User) -> AuthorizationDecision {
    if target.id == acting.id {
        AuthorizationDecision::deny("users may not delete themselves")
    } else if target.is_admin {
        AuthorizationDecision::deny("admin accounts cannot be deleted")
    } else {
        AuthorizationDecision::allow("target is another non-admin user")
    }
}

/// Any authenticated user may edit an article's content. Ownership is left
/// untouched; see `can_transfer_article`.
pub fn can_update_article(_acting: &User, _article: &Article) -> AuthorizationDecision {
    AuthorizationDecision::allow("authenticated")
}

/// Strict ownership; admins get no override.
pub fn can_delete_article(acting: &User, article: &Article) -> AuthorizationDecision {
    if article.owner_id == acting.id {
        AuthorizationDecision::allow("article owner")
    } else {
        AuthorizationDecision::deny("not the article owner")
    }
}

/// Reassigning an article to another owner is an admin-only operation.
pub fn can_transfer_article(acting: &User) -> AuthorizationDecision {
    if acting.is_admin {
        AuthorizationDecision::allow("admin")
    } else {
        AuthorizationDecision::deny("only admins may transfer article ownership")
    }
}
