// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test client and fixtures for driving the router.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use axum_extra::extract::cookie::Key;
use bloodlink_persistence::{NewStaff, Persistence};
use diesel::{Connection, RunQueryDsl, SqliteConnection};
use tower::ServiceExt;

use crate::{AppState, build_router};

/// A password that satisfies the password policy and needs no URL encoding.
pub const PASSWORD: &str = "Bl00d-Bank9";

/// Helper to create test app state with in-memory persistence.
pub fn create_test_app_state() -> AppState {
    let persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    AppState::new(persistence, Key::generate())
}

static FILE_DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A `SQLite` file in the temp directory, removed on drop.
pub struct FileDatabase {
    path: PathBuf,
}

impl FileDatabase {
    pub fn new(label: &str) -> Self {
        let id = FILE_DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let path = std::env::temp_dir().join(format!(
            "bloodlink-server-{label}-{}-{id}.db",
            std::process::id()
        ));
        Self { path }
    }

    /// App state backed by this file.
    pub fn app_state(&self) -> AppState {
        let persistence = Persistence::new_with_file(&self.path).expect("file database");
        AppState::new(persistence, Key::generate())
    }

    /// Drops a table through a second connection.
    pub fn drop_table(&self, table: &str) {
        let mut conn = SqliteConnection::establish(self.path.to_str().unwrap()).unwrap();
        diesel::sql_query(format!("DROP TABLE {table}"))
            .execute(&mut conn)
            .unwrap();
    }
}

impl Drop for FileDatabase {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm"] {
            let mut file = self.path.clone().into_os_string();
            file.push(suffix);
            let _ = std::fs::remove_file(file);
        }
    }
}

/// Creates an account directly in the store.
pub async fn seed_account(
    app_state: &AppState,
    username: Option<&str>,
    secret_code: Option<&str>,
    is_admin: bool,
    must_change_password: bool,
) -> i64 {
    let mut persistence = app_state.persistence.lock().await;
    persistence
        .create_staff(&NewStaff {
            username: username.map(str::to_string),
            secret_code: secret_code.map(str::to_string),
            full_name: String::from("Test Account"),
            password: PASSWORD.to_string(),
            is_admin,
            must_change_password,
        })
        .expect("Failed to seed account")
}

/// Drives the router while carrying cookies between requests, like a browser.
pub struct TestClient {
    app: Router,
    cookies: BTreeMap<String, String>,
}

impl TestClient {
    pub fn new(app_state: AppState) -> Self {
        Self {
            app: build_router(app_state),
            cookies: BTreeMap::new(),
        }
    }

    pub fn cookies(&self) -> BTreeMap<String, String> {
        self.cookies.clone()
    }

    pub fn set_cookies(&mut self, cookies: BTreeMap<String, String>) {
        self.cookies = cookies;
    }

    pub async fn get(&mut self, uri: &str) -> Response<Body> {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .header(header::COOKIE, self.cookie_header())
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    pub async fn post_form(&mut self, uri: &str, form: &str) -> Response<Body> {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header(header::COOKIE, self.cookie_header())
            .body(Body::from(form.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Logs in non-admin staff and returns the redirect target.
    pub async fn login_staff(&mut self, secret_code: &str) -> String {
        let response = self
            .post_form(
                "/login",
                &format!("secret_code={secret_code}&password={PASSWORD}"),
            )
            .await;
        location(&response)
    }

    /// Logs in an admin and returns the redirect target.
    pub async fn login_admin(&mut self, username: &str) -> String {
        let response = self
            .post_form(
                "/admin/login",
                &format!("username={username}&password={PASSWORD}"),
            )
            .await;
        location(&response)
    }

    fn cookie_header(&self) -> String {
        self.cookies
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; ")
    }

    async fn send(&mut self, request: Request<Body>) -> Response<Body> {
        let response = self.app.clone().oneshot(request).await.unwrap();
        for set_cookie in response.headers().get_all(header::SET_COOKIE) {
            let pair = set_cookie.to_str().unwrap().split(';').next().unwrap();
            let (name, value) = pair.split_once('=').unwrap();
            if value.is_empty() {
                self.cookies.remove(name);
            } else {
                self.cookies.insert(name.to_string(), value.to_string());
            }
        }
        response
    }
}

/// The redirect target of a response.
pub fn location(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .expect("Expected a redirect")
        .to_str()
        .unwrap()
        .to_string()
}

/// Reads a response body as text.
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
