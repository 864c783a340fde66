// Shared test utilities for integration tests
#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use gigboard_db::{AppState, DatabaseConfig, DeletePolicy};
use gigboard_migration::{Migrator, MigratorTrait};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

/// A router over a fresh, migrated SQLite database.
pub struct TestApp {
    pub state: Arc<AppState>,
    _temp_dir: TempDir,
}

impl TestApp {
    pub async fn new(delete_policy: DeletePolicy) -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config = DatabaseConfig {
            url: format!(
                "sqlite://{}?mode=rwc",
                temp_dir.path().join("gigboard.db").display()
            ),
            max_connections: 1,
            min_connections: 1,
            connect_timeout_secs: 8,
            idle_timeout_secs: 60,
        };
        let db = gigboard_db::connect(&config)
            .await
            .expect("Failed to connect");
        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        Self {
            state: test_app_state(db, delete_policy),
            _temp_dir: temp_dir,
        }
    }

    pub fn router(&self) -> Router {
        gigboard_server::app(self.state.clone())
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.router().oneshot(req).await.unwrap()
    }

    pub async fn delete(&self, uri: &str) -> Response<Body> {
        let req = Request::builder()
            .method("DELETE")
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        self.router().oneshot(req).await.unwrap()
    }

    /// POST an urlencoded form body.
    pub async fn post_form(&self, uri: &str, form: &str) -> Response<Body> {
        let req = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap();
        self.router().oneshot(req).await.unwrap()
    }

    /// POST a form that must succeed with 201, returning the new record's id.
    pub async fn create(&self, uri: &str, form: &str) -> i64 {
        let resp = self.post_form(uri, form).await;
        assert_eq!(resp.status(), 201, "create via {uri} failed");
        json_body(resp).await["id"].as_i64().unwrap()
    }
}

pub fn test_app_state(db: sea_orm::DatabaseConnection, delete_policy: DeletePolicy) -> Arc<AppState> {
    Arc::new(AppState { db, delete_policy })
}

pub async fn json_body(resp: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn venue_form(name: &str, city: &str, state: &str) -> String {
    format!(
        "name={}&city={}&state={state}&address=1015+Folsom+Street&phone=123-123-1234&genres=Jazz&genres=Reggae",
        name.replace(' ', "+"),
        city.replace(' ', "+"),
    )
}

pub fn artist_form(name: &str) -> String {
    format!(
        "name={}&city=San+Francisco&state=CA&genres=Rock+n+Roll",
        name.replace(' ', "+")
    )
}

pub fn show_form(venue_id: i64, artist_id: i64, start_time: &str) -> String {
    format!(
        "venue_id={venue_id}&artist_id={artist_id}&start_time={}",
        start_time.replace(' ', "+").replace(':', "%3A")
    )
}
