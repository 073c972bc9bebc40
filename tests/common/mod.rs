#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use sqlx::PgPool;

use theatre::config::MediaConfig;
use theatre::database::Database;
use theatre::models::hall::{CreateHall, TheatreHall};
use theatre::models::performance::{CreatePerformance, PerformanceDetail};
use theatre::models::play::{CreatePlay, PlayDetail};
use theatre::models::user::{CreateUser, User};
use theatre::services::{BookingService, CatalogService};
use theatre::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Service construction
// ---------------------------------------------------------------------------

pub fn services(pool: PgPool) -> (CatalogService, BookingService) {
    let db = Database::from_pool(pool);
    let media = MediaConfig {
        root: "/srv/media".into(),
    };
    (CatalogService::new(db.clone(), &media), BookingService::new(db))
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn show_time(day: u32, hour: u32) -> Timestamp {
    Utc.with_ymd_and_hms(2025, 3, day, hour, 0, 0).unwrap()
}

pub async fn hall(catalog: &CatalogService, name: &str, rows: i32, seats_in_row: i32) -> TheatreHall {
    catalog
        .create_hall(CreateHall {
            name: name.to_string(),
            rows,
            seats_in_row,
        })
        .await
        .unwrap()
}

pub async fn play(catalog: &CatalogService, title: &str) -> PlayDetail {
    catalog
        .create_play(CreatePlay {
            title: title.to_string(),
            description: format!("{title}, in five acts"),
            genre_ids: Vec::new(),
            actor_ids: Vec::new(),
        })
        .await
        .unwrap()
}

pub async fn performance(
    catalog: &CatalogService,
    play_id: DbId,
    hall_id: DbId,
    show_time: Timestamp,
) -> PerformanceDetail {
    catalog
        .create_performance(CreatePerformance {
            play_id,
            theatre_hall_id: hall_id,
            show_time,
        })
        .await
        .unwrap()
}

pub async fn user(booking: &BookingService) -> User {
    booking
        .register_user(CreateUser {
            email: SafeEmail().fake(),
            first_name: FirstName().fake(),
            last_name: LastName().fake(),
        })
        .await
        .unwrap()
}

pub async fn count(pool: &PgPool, table: &str) -> i64 {
    let row: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap_or_else(|e| panic!("{table} count failed: {e}"));
    row.0
}
