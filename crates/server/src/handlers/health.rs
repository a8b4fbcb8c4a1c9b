// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Liveness check.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::AppState;

/// Health check response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` or `unavailable`.
    pub status: String,
}

/// Handler for GET /health.
///
/// Reports whether the database answers a trivial query.
pub async fn handle_health(
    State(app_state): State<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let mut persistence = app_state.persistence.lock().await;
    let check = persistence.verify_foreign_key_enforcement();
    drop(persistence);

    match check {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: String::from("ok"),
            }),
        ),
        Err(e) => {
            error!(error = %e, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: String::from("unavailable"),
                }),
            )
        }
    }
}
