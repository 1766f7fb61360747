//! Local session flag.
//!
//! The engine does not authenticate anyone. Whatever hosts it signs the
//! session in and out; character sheet operations only ask whether a session
//! currently exists.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::infrastructure::ports::AuthPort;

/// Session state owned by the host.
#[derive(Debug, Default)]
pub struct LocalSession {
    established: AtomicBool,
}

impl LocalSession {
    /// A session that starts signed out.
    pub fn new() -> Self {
        Self::default()
    }

    /// A session that starts signed in.
    pub fn signed_in() -> Self {
        Self {
            established: AtomicBool::new(true),
        }
    }

    pub fn sign_in(&self) {
        self.established.store(true, Ordering::SeqCst);
        tracing::debug!("Session established");
    }

    pub fn sign_out(&self) {
        self.established.store(false, Ordering::SeqCst);
        tracing::debug!("Session closed");
    }
}

impl AuthPort for LocalSession {
    fn is_session_established(&self) -> bool {
        self.established.load(Ordering::SeqCst)
    }
}
