use thiserror::Error;

use crate::session::Session;
use crate::user::User;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("sign-in required")]
    Unauthenticated,

    #[error("forbidden: user '{0}' is not an admin")]
    Forbidden(String),
}

/// Gate for administrative views.
///
/// - No IO
/// - No panics
pub fn require_admin(session: &Session) -> Result<&User, AuthzError> {
    let user = session.current_user().ok_or(AuthzError::Unauthenticated)?;
    if user.is_admin() {
        Ok(user)
    } else {
        tracing::warn!(user_id = %user.id, "non-admin denied admin view");
        Err(AuthzError::Forbidden(user.id.to_string()))
    }
}
