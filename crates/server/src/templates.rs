// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared HTML building blocks.
//!
//! Pages are assembled with `format!`. Every user-supplied value goes
//! through [`escape`] before it reaches the markup.

use std::fmt::Write as _;

use axum::http::StatusCode;
use bloodlink_api::AuthenticatedStaff;
use bloodlink_domain::BloodGroup;

use crate::flash::Flash;

/// Escapes text for HTML element content and attribute values.
#[must_use]
pub fn escape(s: &str) -> String {
    let mut out: String = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escapes an optional value, rendering `None` as an empty string.
#[must_use]
pub fn escape_opt(s: Option<&str>) -> String {
    s.map(escape).unwrap_or_default()
}

/// Base page layout.
#[must_use]
pub fn layout(
    title: &str,
    viewer: Option<&AuthenticatedStaff>,
    flash: Option<&Flash>,
    content: &str,
) -> String {
    let nav: String = viewer.map(nav).unwrap_or_default();
    let flash: String = flash.map(flash_alert).unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - BloodLink</title>
    <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css">
</head>
<body>
{nav}
<main class="container py-4">
{flash}
<h1 class="h3 mb-4">{title}</h1>
{content}
</main>
</body>
</html>
"#,
        title = escape(title),
    )
}

fn nav(viewer: &AuthenticatedStaff) -> String {
    let mut links: String = String::new();
    if viewer.is_admin() {
        links.push_str(
            r#"<li class="nav-item"><a class="nav-link" href="/admin/users">Users</a></li>"#,
        );
    }
    for (href, label) in [
        ("/", "Dashboard"),
        ("/donors", "Donors"),
        ("/inventory", "Inventory"),
        ("/recipients", "Recipients"),
        ("/transfusions", "Transfusions"),
        ("/reports", "Reports"),
    ] {
        let _ = write!(
            links,
            r#"<li class="nav-item"><a class="nav-link" href="{href}">{label}</a></li>"#
        );
    }

    format!(
        r#"<nav class="navbar navbar-expand navbar-dark bg-danger">
<div class="container">
<a class="navbar-brand" href="/">BloodLink</a>
<ul class="navbar-nav me-auto">{links}</ul>
<span class="navbar-text me-3">{name}</span>
<a class="btn btn-outline-light btn-sm me-2" href="/profile">Profile</a>
<a class="btn btn-light btn-sm" href="/logout">Log out</a>
</div>
</nav>"#,
        name = escape(&viewer.full_name),
    )
}

fn flash_alert(flash: &Flash) -> String {
    format!(
        r#"<div class="alert alert-{kind}" role="alert">{message}</div>"#,
        kind = flash.kind.as_str(),
        message = escape(&flash.message),
    )
}

/// A `<select>` of all blood groups.
///
/// `blank` adds a leading empty option with that label.
#[must_use]
pub fn blood_group_select(name: &str, selected: Option<BloodGroup>, blank: Option<&str>) -> String {
    let mut options: String = String::new();
    if let Some(label) = blank {
        let _ = write!(options, r#"<option value="">{}</option>"#, escape(label));
    }
    for group in BloodGroup::ALL {
        let attr: &str = if selected == Some(group) { " selected" } else { "" };
        let _ = write!(
            options,
            r#"<option value="{g}"{attr}>{g}</option>"#,
            g = group.as_str()
        );
    }
    format!(r#"<select class="form-select" name="{name}" id="{name}">{options}</select>"#)
}

/// Wraps rows in a striped table with the given headings.
#[must_use]
pub fn table(headings: &[&str], rows: &str) -> String {
    let mut head: String = String::new();
    for heading in headings {
        let _ = write!(head, "<th>{}</th>", escape(heading));
    }
    format!(
        r#"<table class="table table-striped table-sm"><thead><tr>{head}</tr></thead><tbody>{rows}</tbody></table>"#
    )
}

/// A muted placeholder for empty listings.
#[must_use]
pub fn empty_state(message: &str) -> String {
    format!(r#"<p class="text-muted">{}</p>"#, escape(message))
}

/// A labelled form input.
#[must_use]
pub fn input(label: &str, name: &str, kind: &str, value: &str, required: bool) -> String {
    let required: &str = if required { " required" } else { "" };
    format!(
        r#"<div class="mb-3"><label class="form-label" for="{name}">{label}</label><input class="form-control" type="{kind}" name="{name}" id="{name}" value="{value}"{required}></div>"#,
        label = escape(label),
        value = escape(value),
    )
}

/// A labelled checkbox.
#[must_use]
pub fn checkbox(label: &str, name: &str, checked: bool) -> String {
    let checked: &str = if checked { " checked" } else { "" };
    format!(
        r#"<div class="form-check mb-3"><input class="form-check-input" type="checkbox" name="{name}" id="{name}" value="on"{checked}><label class="form-check-label" for="{name}">{label}</label></div>"#,
        label = escape(label),
    )
}

/// Standalone error page.
#[must_use]
pub fn error_page(status: StatusCode, message: &str) -> String {
    let title: String = format!(
        "{} {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Error")
    );
    let content: String = format!(
        r#"<p>{}</p><p><a href="/">Back to the dashboard</a></p>"#,
        escape(message)
    );
    layout(&title, None, None, &content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_neutralises_markup() {
        assert_eq!(
            escape(r#"<b class="x">O'Brien & co</b>"#),
            "&lt;b class=&quot;x&quot;&gt;O&#x27;Brien &amp; co&lt;/b&gt;"
        );
    }

    #[test]
    fn test_blood_group_select_marks_selection() {
        let html: String =
            blood_group_select("blood_group", Some(BloodGroup::AbNegative), Some("All"));

        assert!(html.contains(r#"<option value="">All</option>"#));
        assert!(html.contains(r#"<option value="AB-" selected>AB-</option>"#));
        assert!(html.contains(r#"<option value="O+">O+</option>"#));
    }
}
