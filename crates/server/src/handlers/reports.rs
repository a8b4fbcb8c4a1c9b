// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Dashboard and reports.

use axum::extract::State;
use axum_extra::extract::PrivateCookieJar;

use super::{Page, render, today};
use crate::{AppState, error::HttpError, pages, session::SessionStaff};

/// Handler for GET /.
pub async fn handle_dashboard(
    State(app_state): State<AppState>,
    SessionStaff(actor): SessionStaff,
    jar: PrivateCookieJar,
) -> Result<Page, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let summary = bloodlink_api::dashboard(&mut persistence, today())?;
    drop(persistence);

    Ok(render(jar, |flash| {
        pages::dashboard_page(&actor, flash, &summary)
    }))
}

/// Handler for GET /reports.
pub async fn handle_reports(
    State(app_state): State<AppState>,
    SessionStaff(actor): SessionStaff,
    jar: PrivateCookieJar,
) -> Result<Page, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let report = bloodlink_api::reports(&mut persistence, today())?;
    drop(persistence);

    Ok(render(jar, |flash| pages::reports_page(&actor, flash, &report)))
}
