use crate::application::ports::AuthProvider;
use crate::domain::UserId;

/// Identity fixed at construction. `anonymous()` models a signed-out session.
pub struct StaticAuthProvider {
    user: Option<UserId>,
}

impl StaticAuthProvider {
    pub fn new(user: Option<UserId>) -> Self {
        Self { user }
    }

    pub fn signed_in(user_id: impl Into<String>) -> Self {
        Self::new(Some(UserId::new(user_id)))
    }

    pub fn anonymous() -> Self {
        Self::new(None)
    }
}

impl AuthProvider for StaticAuthProvider {
    fn current_user(&self) -> Option<UserId> {
        self.user.clone()
    }
}
