// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTTP error mapping.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::PrivateCookieJar;
use bloodlink_api::ApiError;
use tracing::{error, warn};

use crate::{
    flash::{Flash, redirect_with_flash},
    templates,
};

/// Message shown in place of internal error details.
const GENERIC_FAILURE: &str =
    "Something went wrong while talking to the database. Please try again later.";

/// HTTP error wrapper that implements `IntoResponse`.
///
/// Rendered as a standalone error page.
#[derive(Debug)]
pub struct HttpError {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error message.
    pub message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: String = templates::error_page(self.status, &self.message);
        (self.status, Html(body)).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidInput { .. } | ApiError::PasswordPolicyViolation { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Duplicate { .. } => StatusCode::CONFLICT,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                return Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: GENERIC_FAILURE.to_string(),
                };
            }
        };

        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Turns a failed form submission into a response.
///
/// Internal failures render the generic error page. Anything else sends the
/// user back to `back_to` with the error as a danger flash.
#[must_use]
pub fn form_failure(jar: PrivateCookieJar, back_to: &str, err: ApiError) -> Response {
    if matches!(err, ApiError::Internal { .. }) {
        return HttpError::from(err).into_response();
    }

    warn!(error = %err, back_to, "Form submission rejected");
    redirect_with_flash(jar, back_to, &Flash::danger(err.to_string()))
}
