//! Shared fixtures for catalog integration tests.
//!
//! Each test gets a real SQLite file in its own temp directory with all
//! migrations applied, so foreign keys and indexes behave as in production.
#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use gigboard_db::entities::{artist, show, venue};
use gigboard_db::genres::Genres;
use gigboard_db::{artists, shows, venues, DatabaseConfig};
use gigboard_migration::{Migrator, MigratorTrait};
use sea_orm::DatabaseConnection;
use tempfile::TempDir;

/// Test database wrapper that cleans up on drop
pub struct TestDb {
    pub db: DatabaseConnection,
    _temp_dir: TempDir,
}

impl TestDb {
    pub async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("gigboard.db");
        let config = DatabaseConfig {
            url: format!("sqlite://{}?mode=rwc", db_path.display()),
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
            db,
            _temp_dir: temp_dir,
        }
    }
}

/// Fixed evaluation instant so past/upcoming never depends on the wall clock.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 6, 1, 20, 0, 0).unwrap()
}

pub fn days(n: i64) -> Duration {
    Duration::days(n)
}

pub fn venue_input(name: &str, city: &str, state: &str) -> venues::VenueInput {
    venues::VenueInput {
        name: name.into(),
        city: city.into(),
        state: state.into(),
        address: "1015 Folsom Street".into(),
        phone: Some("123-123-1234".into()),
        genres: Genres::new(["Jazz", "Reggae"]),
        ..Default::default()
    }
}

pub fn artist_input(name: &str) -> artists::ArtistInput {
    artists::ArtistInput {
        name: name.into(),
        city: "San Francisco".into(),
        state: "CA".into(),
        genres: Genres::new(["Rock n Roll"]),
        image_link: Some(format!("https://img.example.com/{}.jpg", name.len())),
        ..Default::default()
    }
}

pub async fn add_venue(db: &DatabaseConnection, name: &str, city: &str, state: &str) -> venue::Model {
    venues::create(db, venue_input(name, city, state))
        .await
        .expect("Failed to create venue")
}

pub async fn add_artist(db: &DatabaseConnection, name: &str) -> artist::Model {
    artists::create(db, artist_input(name))
        .await
        .expect("Failed to create artist")
}

pub async fn add_show(
    db: &DatabaseConnection,
    venue_id: i32,
    artist_id: i32,
    start_time: DateTime<Utc>,
) -> show::Model {
    shows::create(
        db,
        shows::ShowInput {
            venue_id,
            artist_id,
            start_time,
        },
    )
    .await
    .expect("Failed to create show")
}
