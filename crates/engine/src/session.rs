//! Session state for the authenticated user.
//!
//! The session is an explicitly owned object, passed by reference to
//! whatever needs it; there is no ambient global. Consumers read the current
//! phase and may subscribe to transitions. The actual credential handling
//! lives behind [`AuthProvider`], an external capability.
use async_trait::async_trait;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("server error: {0}")]
    Server(String),
    #[error("transport error: {0}")]
    Transport(String),
}

/// External authentication capability (login/logout/session lookup).
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Returns the already-logged-in user, if any.
    async fn current_user(&self) -> Result<Option<User>, AuthError>;

    async fn login(&self, email: &str, password: &str) -> Result<User, AuthError>;

    async fn logout(&self) -> Result<(), AuthError>;
}

/// Lifecycle: `Uninitialized → Loading → Authenticated | Anonymous`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SessionPhase {
    #[default]
    Uninitialized,
    Loading,
    Authenticated(User),
    Anonymous,
}

impl SessionPhase {
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        match self {
            SessionPhase::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

type Observer = Box<dyn Fn(&SessionPhase) + Send>;

/// Owned session state with transition observers.
#[derive(Default)]
pub struct Session {
    phase: SessionPhase,
    observers: Vec<Observer>,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self.phase, SessionPhase::Authenticated(_))
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.phase.user()
    }

    /// Registers an observer invoked on every phase transition.
    pub fn subscribe(&mut self, observer: impl Fn(&SessionPhase) + Send + 'static) {
        self.observers.push(Box::new(observer));
    }

    fn transition(&mut self, next: SessionPhase) {
        self.phase = next;
        for observer in &self.observers {
            observer(&self.phase);
        }
    }

    /// Startup lookup: resolves to `Authenticated` or `Anonymous`.
    ///
    /// A failed lookup still lands on `Anonymous` (the session never wedges
    /// in `Loading`); the error is returned so the caller can log it.
    pub async fn restore(&mut self, auth: &dyn AuthProvider) -> Result<(), AuthError> {
        self.transition(SessionPhase::Loading);
        match auth.current_user().await {
            Ok(Some(user)) => {
                self.transition(SessionPhase::Authenticated(user));
                Ok(())
            }
            Ok(None) => {
                self.transition(SessionPhase::Anonymous);
                Ok(())
            }
            Err(err) => {
                self.transition(SessionPhase::Anonymous);
                Err(err)
            }
        }
    }

    pub async fn login(
        &mut self,
        auth: &dyn AuthProvider,
        email: &str,
        password: &str,
    ) -> Result<(), AuthError> {
        self.transition(SessionPhase::Loading);
        match auth.login(email, password).await {
            Ok(user) => {
                self.transition(SessionPhase::Authenticated(user));
                Ok(())
            }
            Err(err) => {
                self.transition(SessionPhase::Anonymous);
                Err(err)
            }
        }
    }

    /// Drops the local session regardless of the remote call's outcome.
    pub async fn logout(&mut self, auth: &dyn AuthProvider) -> Result<(), AuthError> {
        let result = auth.logout().await;
        self.transition(SessionPhase::Anonymous);
        result
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex, PoisonError};

    use super::*;

    struct StubAuth {
        user: Option<User>,
        fail: bool,
    }

    fn maria() -> User {
        User {
            name: "Maria".to_string(),
            email: "maria@example.com".to_string(),
        }
    }

    #[async_trait]
    impl AuthProvider for StubAuth {
        async fn current_user(&self) -> Result<Option<User>, AuthError> {
            if self.fail {
                return Err(AuthError::Transport("connection refused".to_string()));
            }
            Ok(self.user.clone())
        }

        async fn login(&self, email: &str, _password: &str) -> Result<User, AuthError> {
            if self.fail {
                return Err(AuthError::InvalidCredentials);
            }
            Ok(User {
                name: "Maria".to_string(),
                email: email.to_string(),
            })
        }

        async fn logout(&self) -> Result<(), AuthError> {
            if self.fail {
                return Err(AuthError::Transport("connection refused".to_string()));
            }
            Ok(())
        }
    }

    fn watched_session() -> (Session, Arc<Mutex<Vec<SessionPhase>>>) {
        let mut session = Session::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&seen);
        session.subscribe(move |phase| {
            log.lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(phase.clone());
        });
        (session, seen)
    }

    #[tokio::test]
    async fn restore_finds_an_existing_session() {
        let (mut session, seen) = watched_session();
        let auth = StubAuth {
            user: Some(maria()),
            fail: false,
        };

        assert_eq!(*session.phase(), SessionPhase::Uninitialized);
        session.restore(&auth).await.unwrap();

        assert!(session.is_authenticated());
        assert_eq!(session.user(), Some(&maria()));
        assert_eq!(
            *seen.lock().unwrap_or_else(PoisonError::into_inner),
            vec![
                SessionPhase::Loading,
                SessionPhase::Authenticated(maria()),
            ]
        );
    }

    #[tokio::test]
    async fn restore_without_a_session_is_anonymous() {
        let (mut session, _seen) = watched_session();
        let auth = StubAuth {
            user: None,
            fail: false,
        };
        session.restore(&auth).await.unwrap();
        assert_eq!(*session.phase(), SessionPhase::Anonymous);
    }

    #[tokio::test]
    async fn failed_restore_lands_on_anonymous() {
        let (mut session, seen) = watched_session();
        let auth = StubAuth {
            user: None,
            fail: true,
        };
        let err = session.restore(&auth).await.unwrap_err();
        assert!(matches!(err, AuthError::Transport(_)));
        assert_eq!(*session.phase(), SessionPhase::Anonymous);
        assert_eq!(
            *seen.lock().unwrap_or_else(PoisonError::into_inner),
            vec![SessionPhase::Loading, SessionPhase::Anonymous]
        );
    }

    #[tokio::test]
    async fn login_and_logout_transitions() {
        let (mut session, _seen) = watched_session();
        let auth = StubAuth {
            user: None,
            fail: false,
        };

        session.login(&auth, "maria@example.com", "s3nha").await.unwrap();
        assert!(session.is_authenticated());

        session.logout(&auth).await.unwrap();
        assert_eq!(*session.phase(), SessionPhase::Anonymous);
    }

    #[tokio::test]
    async fn logout_is_anonymous_even_when_the_remote_call_fails() {
        let (mut session, _seen) = watched_session();
        let ok = StubAuth {
            user: None,
            fail: false,
        };
        session.login(&ok, "maria@example.com", "s3nha").await.unwrap();

        let failing = StubAuth {
            user: None,
            fail: true,
        };
        let result = session.logout(&failing).await;
        assert!(result.is_err());
        assert_eq!(*session.phase(), SessionPhase::Anonymous);
    }

    #[tokio::test]
    async fn rejected_login_reports_and_stays_anonymous() {
        let (mut session, _seen) = watched_session();
        let auth = StubAuth {
            user: None,
            fail: true,
        };
        let err = session.login(&auth, "maria@example.com", "errada").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
        assert_eq!(*session.phase(), SessionPhase::Anonymous);
    }
}
