use std::sync::Arc;

use super::api::PosApi;
use super::error::AuthError;
use super::session::SessionManager;
use crate::domain::model::{Identity, Role};

/// The screen a PIN is entered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Employee,
    Admin,
}

impl Screen {
    pub fn admits(self, role: Role) -> bool {
        match self {
            Screen::Employee => role == Role::Employee,
            Screen::Admin => role == Role::Admin,
        }
    }
}

/// PIN sign-in for one screen.
pub struct AuthGate {
    api: Arc<dyn PosApi>,
    session: Arc<SessionManager>,
}

impl AuthGate {
    pub fn new(api: Arc<dyn PosApi>, session: Arc<SessionManager>) -> Self {
        Self { api, session }
    }

    /// Checks the PIN and persists the identity when its role belongs on
    /// `screen`. A blank PIN never reaches the server.
    pub async fn authenticate(&self, pin: &str, screen: Screen) -> Result<Identity, AuthError> {
        let pin = pin.trim();
        if pin.is_empty() {
            return Err(AuthError::BlankPin);
        }

        let identity = match self.api.login(pin).await {
            Ok(identity) if screen.admits(identity.role) => identity,
            Ok(identity) => {
                log::warn!(
                    "{} ({}) is not allowed on the {:?} screen",
                    identity.name,
                    identity.role,
                    screen
                );
                return Err(self.deny(screen));
            }
            Err(e) => {
                log::warn!("PIN sign-in failed: {e}");
                return Err(self.deny(screen));
            }
        };

        if let Err(e) = self.session.begin(identity.clone()) {
            log::error!("Could not persist session: {e}");
            return Err(self.deny(screen));
        }
        Ok(identity)
    }

    /// The stored identity, if it may use `screen`.
    pub fn resume(&self, screen: Screen) -> Option<Identity> {
        self.session
            .current()
            .filter(|identity| screen.admits(identity.role))
    }

    fn deny(&self, screen: Screen) -> AuthError {
        if screen == Screen::Admin {
            self.session.end();
        }
        AuthError::Invalid
    }
}
