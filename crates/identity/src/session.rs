//! Session store: who is signed in.

use core::convert::Infallible;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use frostcart_core::{Store, dispatch_total};
use frostcart_events::Event;

use crate::user::User;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<User>,
    version: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn sign_in(&mut self, user: User) -> Vec<SessionEvent> {
        dispatch_total(
            self,
            &SessionAction::SignIn {
                user,
                occurred_at: Utc::now(),
            },
        )
    }

    pub fn sign_out(&mut self) -> Vec<SessionEvent> {
        dispatch_total(
            self,
            &SessionAction::SignOut {
                occurred_at: Utc::now(),
            },
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionAction {
    SignIn {
        user: User,
        occurred_at: DateTime<Utc>,
    },
    SignOut {
        occurred_at: DateTime<Utc>,
    },
}

/// Event: SignedIn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedIn {
    pub user: User,
    pub occurred_at: DateTime<Utc>,
}

/// Event: SignedOut.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedOut {
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    SignedIn(SignedIn),
    SignedOut(SignedOut),
}

impl Event for SessionEvent {
    fn event_type(&self) -> &'static str {
        match self {
            SessionEvent::SignedIn(_) => "session.signed_in",
            SessionEvent::SignedOut(_) => "session.signed_out",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            SessionEvent::SignedIn(e) => e.occurred_at,
            SessionEvent::SignedOut(e) => e.occurred_at,
        }
    }
}

impl Store for Session {
    type Action = SessionAction;
    type Event = SessionEvent;
    type Error = Infallible;

    const NAME: &'static str = "session";

    fn version(&self) -> u64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        match event {
            SessionEvent::SignedIn(e) => {
                self.user = Some(e.user.clone());
            }
            SessionEvent::SignedOut(_) => {
                self.user = None;
            }
        }

        self.version += 1;
    }

    fn handle(&self, action: &Self::Action) -> Result<Vec<Self::Event>, Self::Error> {
        let events = match action {
            // Signing in again replaces the previous user.
            SessionAction::SignIn { user, occurred_at } => {
                tracing::info!(user_id = %user.id, role = %user.role, "user signed in");
                vec![SessionEvent::SignedIn(SignedIn {
                    user: user.clone(),
                    occurred_at: *occurred_at,
                })]
            }
            SessionAction::SignOut { occurred_at } => match &self.user {
                Some(user) => {
                    tracing::info!(user_id = %user.id, "user signed out");
                    vec![SessionEvent::SignedOut(SignedOut {
                        occurred_at: *occurred_at,
                    })]
                }
                None => vec![],
            },
        };
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::{Role, UserId};

    fn shopper() -> User {
        User {
            id: UserId::new("2"),
            email: "user@example.com".to_string(),
            name: "Google User".to_string(),
            role: Role::User,
        }
    }

    #[test]
    fn sign_in_then_out() {
        let mut session = Session::new();
        assert!(!session.is_signed_in());

        session.sign_in(shopper());
        assert_eq!(session.current_user().map(|u| u.email.as_str()), Some("user@example.com"));

        let events = session.sign_out();
        assert_eq!(events[0].event_type(), "session.signed_out");
        assert!(session.current_user().is_none());
    }

    #[test]
    fn sign_out_when_anonymous_is_noop() {
        let mut session = Session::new();
        assert!(session.sign_out().is_empty());
        assert_eq!(session.version(), 0);
    }

    #[test]
    fn second_sign_in_replaces_user() {
        let mut session = Session::new();
        session.sign_in(shopper());
        let mut admin = shopper();
        admin.role = Role::Admin;
        session.sign_in(admin);
        assert!(session.current_user().unwrap().is_admin());
    }
}
