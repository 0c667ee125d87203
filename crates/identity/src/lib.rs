//! `frostcart-identity`: mock sign-in, the session store and the admin gate.
//!
//! Catalog and cart do not depend on this crate; only the composition root
//! and the admin dashboard consult it.

pub mod authorize;
pub mod login;
pub mod session;
pub mod user;

pub use authorize::{AuthzError, require_admin};
pub use login::MockAuthenticator;
pub use session::{Session, SessionAction, SessionEvent, SignedIn, SignedOut};
pub use user::{Role, User, UserId};
