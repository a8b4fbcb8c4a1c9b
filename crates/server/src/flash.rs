// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! One-shot flash messages carried in an encrypted cookie.
//!
//! A handler sets a flash before redirecting; the next rendered page takes
//! it out of the jar, so it is shown exactly once.

use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, PrivateCookieJar, SameSite};

/// Cookie holding the pending flash message.
pub const FLASH_COOKIE: &str = "bloodlink_flash";

/// Flash message category, mapped to an alert style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Success,
    Info,
    Danger,
}

impl FlashKind {
    /// The category name, also used as the CSS class suffix.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Danger => "danger",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "success" => Some(Self::Success),
            "info" => Some(Self::Info),
            "danger" => Some(Self::Danger),
            _ => None,
        }
    }
}

/// A flash message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Info,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Danger,
            message: message.into(),
        }
    }

    fn encode(&self) -> String {
        format!("{}:{}", self.kind.as_str(), self.message)
    }

    fn decode(value: &str) -> Option<Self> {
        let (kind, message) = value.split_once(':')?;
        Some(Self {
            kind: FlashKind::parse(kind)?,
            message: message.to_string(),
        })
    }
}

/// Stores a flash message for the next rendered page.
#[must_use]
pub fn set_flash(jar: PrivateCookieJar, flash: &Flash) -> PrivateCookieJar {
    jar.add(
        Cookie::build((FLASH_COOKIE, flash.encode()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build(),
    )
}

/// Removes and returns the pending flash message, if any.
#[must_use]
pub fn take_flash(jar: PrivateCookieJar) -> (PrivateCookieJar, Option<Flash>) {
    let Some(cookie) = jar.get(FLASH_COOKIE) else {
        return (jar, None);
    };

    let flash: Option<Flash> = Flash::decode(cookie.value());
    let jar = jar.remove(Cookie::build(FLASH_COOKIE).path("/").build());
    (jar, flash)
}

/// Redirects to `to` with a flash message for the target page.
#[must_use]
pub fn redirect_with_flash(jar: PrivateCookieJar, to: &str, flash: &Flash) -> Response {
    (set_flash(jar, flash), Redirect::to(to)).into_response()
}
