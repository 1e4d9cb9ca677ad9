use crate::domain::UserId;

/// Source of the current caller's identity.
pub trait AuthProvider: Send + Sync {
    fn current_user(&self) -> Option<UserId>;
}
