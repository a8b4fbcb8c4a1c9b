// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared application state.

use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use bloodlink_persistence::Persistence;
use tokio::sync::Mutex;
use tracing::warn;

/// Minimum length of configured cookie key material.
pub const MIN_SECRET_KEY_BYTES: usize = 32;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The persistence layer, one connection behind an async mutex.
    pub persistence: Arc<Mutex<Persistence>>,
    /// Key for the private (encrypted) cookie jar.
    pub key: Key,
}

impl AppState {
    /// Wraps an opened store together with the cookie key.
    #[must_use]
    pub fn new(persistence: Persistence, key: Key) -> Self {
        Self {
            persistence: Arc::new(Mutex::new(persistence)),
            key,
        }
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.key.clone()
    }
}

/// Builds the cookie key from configured material.
///
/// Short or missing material falls back to a random key.
#[must_use]
pub fn cookie_key(secret: Option<&str>) -> Key {
    match secret {
        Some(secret) if secret.len() >= MIN_SECRET_KEY_BYTES => Key::derive_from(secret.as_bytes()),
        Some(_) => {
            warn!(
                min_bytes = MIN_SECRET_KEY_BYTES,
                "SECRET_KEY is too short; using a random key, sessions will not survive a restart"
            );
            Key::generate()
        }
        None => {
            warn!("SECRET_KEY not set; using a random key, sessions will not survive a restart");
            Key::generate()
        }
    }
}
