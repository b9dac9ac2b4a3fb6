//! Mock sign-in flow and the persisted login flag.
//!
//! Nothing here authenticates anyone: any login or verification completes the
//! flow. The only durable effect is the login flag in storage.

use crate::constants::STORAGE_KEY_LOGGED_IN;
use crate::errors::AppResult;
use crate::storage::SharedStore;
use tracing::{debug, info, warn};

const LOGGED_IN_VALUE: &str = "true";

/// Persisted login flag.
#[derive(Clone)]
pub struct Session {
    storage: SharedStore,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}

impl Session {
    pub fn new(storage: SharedStore) -> Self {
        Self { storage }
    }

    /// Whether the flag is set. A storage failure reads as logged out.
    pub fn is_logged_in(&self) -> bool {
        match self.storage.get(STORAGE_KEY_LOGGED_IN) {
            Ok(value) => value.as_deref() == Some(LOGGED_IN_VALUE),
            Err(e) => {
                warn!("Failed to read login flag: {}", e);
                false
            }
        }
    }

    pub fn log_in(&self) -> AppResult<()> {
        info!("Logged in");
        self.storage.set(STORAGE_KEY_LOGGED_IN, LOGGED_IN_VALUE)
    }

    pub fn log_out(&self) -> AppResult<()> {
        info!("Logged out");
        self.storage.remove(STORAGE_KEY_LOGGED_IN)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStep {
    Splash,
    Onboarding,
    Login,
    Signup,
    Verify,
    /// The user is in the app.
    Complete,
}

/// Screen-by-screen state of the sign-in flow.
#[derive(Debug)]
pub struct AuthFlow {
    step: AuthStep,
    session: Session,
}

impl AuthFlow {
    /// Starts on the splash screen.
    pub fn new(session: Session) -> Self {
        Self {
            step: AuthStep::Splash,
            session,
        }
    }

    pub fn step(&self) -> AuthStep {
        self.step
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Leaves the splash screen, straight into the app when already logged in.
    pub fn finish_splash(&mut self) {
        self.transition(AuthStep::Splash, |flow| {
            if flow.session.is_logged_in() {
                AuthStep::Complete
            } else {
                AuthStep::Onboarding
            }
        });
    }

    pub fn finish_onboarding(&mut self) {
        self.transition(AuthStep::Onboarding, |_| AuthStep::Login);
    }

    pub fn show_signup(&mut self) {
        self.transition(AuthStep::Login, |_| AuthStep::Signup);
    }

    pub fn show_login(&mut self) {
        self.transition(AuthStep::Signup, |_| AuthStep::Login);
    }

    pub fn submit_signup(&mut self) {
        self.transition(AuthStep::Signup, |_| AuthStep::Verify);
    }

    /// Completes the flow from the login screen.
    pub fn submit_login(&mut self) -> AppResult<()> {
        self.complete_from(AuthStep::Login)
    }

    /// Completes the flow from the verification screen.
    pub fn submit_code(&mut self) -> AppResult<()> {
        self.complete_from(AuthStep::Verify)
    }

    /// Clears the flag and returns to onboarding. Only valid inside the app.
    pub fn log_out(&mut self) -> AppResult<()> {
        if self.step != AuthStep::Complete {
            debug!("Ignoring logout from {:?}", self.step);
            return Ok(());
        }
        self.session.log_out()?;
        self.step = AuthStep::Onboarding;
        Ok(())
    }

    fn complete_from(&mut self, from: AuthStep) -> AppResult<()> {
        if self.step != from {
            debug!("Ignoring completion from {:?}", self.step);
            return Ok(());
        }
        self.session.log_in()?;
        self.step = AuthStep::Complete;
        Ok(())
    }

    fn transition(&mut self, from: AuthStep, to: impl FnOnce(&Self) -> AuthStep) {
        if self.step == from {
            self.step = to(self);
        } else {
            debug!("Ignoring auth transition from {:?}", self.step);
        }
    }
}
