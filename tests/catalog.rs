mod common;

use sqlx::PgPool;

use theatre::error::TheatreError;
use theatre::models::actor::CreateActor;
use theatre::models::genre::CreateGenre;
use theatre::models::hall::{CreateHall, UpdateHall};
use theatre::models::performance::UpdatePerformance;
use theatre::models::play::{CreatePlay, UpdatePlay};
use theatre::models::ticket::SeatRequest;
use theatre::services::CascadeSummary;

use common::{count, hall, performance, play, services, show_time, user};

// ---------------------------------------------------------------------------
// Halls
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "src/migrations")]
async fn hall_capacity_and_display(pool: PgPool) {
    let (catalog, _) = services(pool);
    let main = hall(&catalog, "Main Stage", 10, 20).await;

    assert_eq!(main.capacity(), 200);
    assert_eq!(main.to_string(), "Main Stage (10 rows, 20 seats/row)");
    assert_eq!(catalog.get_hall(main.id).await.unwrap(), main);
}

#[sqlx::test(migrations = "src/migrations")]
async fn hall_dimensions_are_validated_before_insert(pool: PgPool) {
    let (catalog, _) = services(pool.clone());
    let err = catalog
        .create_hall(CreateHall {
            name: "Studio".to_string(),
            rows: 0,
            seats_in_row: 10,
        })
        .await
        .unwrap_err();

    let TheatreError::Validation(errors) = err else {
        panic!("expected validation error");
    };
    assert!(errors.field_errors().contains_key("rows"));
    assert_eq!(count(&pool, "theatre_halls").await, 0);
}

#[sqlx::test(migrations = "src/migrations")]
async fn update_hall_keeps_unset_fields(pool: PgPool) {
    let (catalog, _) = services(pool);
    let studio = hall(&catalog, "Studio", 5, 8).await;

    let updated = catalog
        .update_hall(
            studio.id,
            UpdateHall {
                rows: Some(6),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Studio");
    assert_eq!(updated.rows, 6);
    assert_eq!(updated.seats_in_row, 8);
}

#[sqlx::test(migrations = "src/migrations")]
async fn halls_are_listed_by_name(pool: PgPool) {
    let (catalog, _) = services(pool);
    hall(&catalog, "Studio", 5, 5).await;
    hall(&catalog, "Main Stage", 10, 20).await;

    let names: Vec<String> = catalog
        .list_halls()
        .await
        .unwrap()
        .into_iter()
        .map(|h| h.name)
        .collect();
    assert_eq!(names, ["Main Stage", "Studio"]);
}

#[sqlx::test(migrations = "src/migrations")]
async fn deleting_hall_cascades_to_performances_and_tickets(pool: PgPool) {
    let (catalog, booking) = services(pool.clone());
    let main = hall(&catalog, "Main Stage", 10, 10).await;
    let hamlet = play(&catalog, "Hamlet").await;
    let first = performance(&catalog, hamlet.play.id, main.id, show_time(1, 19)).await;
    performance(&catalog, hamlet.play.id, main.id, show_time(2, 19)).await;
    let customer = user(&booking).await;
    booking
        .reserve(
            customer.id,
            first.performance.id,
            vec![SeatRequest { row: 1, seat: 1 }, SeatRequest { row: 1, seat: 2 }],
        )
        .await
        .unwrap();

    let summary = catalog.delete_hall(main.id).await.unwrap();

    assert_eq!(
        summary,
        CascadeSummary {
            performances: 2,
            tickets: 2
        }
    );
    assert_eq!(count(&pool, "performances").await, 0);
    assert_eq!(count(&pool, "tickets").await, 0);
    // Reservations outlive their tickets.
    assert_eq!(count(&pool, "reservations").await, 1);
    assert!(matches!(
        catalog.get_hall(main.id).await,
        Err(TheatreError::NotFound { entity: "TheatreHall", .. })
    ));
}

#[sqlx::test(migrations = "src/migrations")]
async fn deleting_missing_hall_is_not_found(pool: PgPool) {
    let (catalog, _) = services(pool);
    assert!(matches!(
        catalog.delete_hall(999).await,
        Err(TheatreError::NotFound { id: 999, .. })
    ));
}

// ---------------------------------------------------------------------------
// Genres & actors
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "src/migrations")]
async fn duplicate_genre_name_is_a_conflict(pool: PgPool) {
    let (catalog, _) = services(pool.clone());
    let drama = CreateGenre {
        name: "Drama".to_string(),
    };
    catalog.create_genre(drama.clone()).await.unwrap();

    let err = catalog.create_genre(drama).await.unwrap_err();

    assert!(matches!(err, TheatreError::Conflict(_)), "got {err:?}");
    assert!(!err.is_seat_taken());
    assert_eq!(count(&pool, "genres").await, 1);
}

#[sqlx::test(migrations = "src/migrations")]
async fn actors_are_listed_by_last_name(pool: PgPool) {
    let (catalog, _) = services(pool);
    for (first, last) in [("Laurence", "Olivier"), ("Judi", "Dench")] {
        catalog
            .create_actor(CreateActor {
                first_name: first.to_string(),
                last_name: last.to_string(),
            })
            .await
            .unwrap();
    }

    let actors = catalog.list_actors().await.unwrap();
    let names: Vec<String> = actors.iter().map(|a| a.full_name()).collect();
    assert_eq!(names, ["Judi Dench", "Laurence Olivier"]);
}

// ---------------------------------------------------------------------------
// Plays
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "src/migrations")]
async fn play_is_created_with_its_links(pool: PgPool) {
    let (catalog, _) = services(pool);
    let tragedy = catalog
        .create_genre(CreateGenre {
            name: "Tragedy".to_string(),
        })
        .await
        .unwrap();
    let actor = catalog
        .create_actor(CreateActor {
            first_name: "Kenneth".to_string(),
            last_name: "Branagh".to_string(),
        })
        .await
        .unwrap();

    let created = catalog
        .create_play(CreatePlay {
            title: "Hamlet".to_string(),
            description: "The Prince of Denmark".to_string(),
            // Repeated ids collapse to one link.
            genre_ids: vec![tragedy.id, tragedy.id],
            actor_ids: vec![actor.id],
        })
        .await
        .unwrap();

    assert_eq!(created.genres, vec![tragedy.clone()]);
    assert_eq!(created.actors, vec![actor.clone()]);
    assert_eq!(created.play.cover_image, None);

    let by_genre = catalog.list_plays_by_genre(tragedy.id).await.unwrap();
    assert_eq!(by_genre, vec![created.play.clone()]);
    let by_actor = catalog.list_plays_by_actor(actor.id).await.unwrap();
    assert_eq!(by_actor, vec![created.play.clone()]);
    assert_eq!(catalog.get_play(created.play.id).await.unwrap(), created);
}

#[sqlx::test(migrations = "src/migrations")]
async fn unknown_genre_rolls_back_the_play(pool: PgPool) {
    let (catalog, _) = services(pool.clone());

    let err = catalog
        .create_play(CreatePlay {
            title: "Hamlet".to_string(),
            description: "The Prince of Denmark".to_string(),
            genre_ids: vec![4242],
            actor_ids: Vec::new(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, TheatreError::InvalidReference(_)), "got {err:?}");
    assert_eq!(count(&pool, "plays").await, 0);
    assert_eq!(count(&pool, "play_genres").await, 0);
}

#[sqlx::test(migrations = "src/migrations")]
async fn update_play_replaces_links_only_when_given(pool: PgPool) {
    let (catalog, _) = services(pool);
    let comedy = catalog
        .create_genre(CreateGenre {
            name: "Comedy".to_string(),
        })
        .await
        .unwrap();
    let created = catalog
        .create_play(CreatePlay {
            title: "Twelfth Night".to_string(),
            description: "Shipwrecked twins in Illyria".to_string(),
            genre_ids: vec![comedy.id],
            actor_ids: Vec::new(),
        })
        .await
        .unwrap();

    let renamed = catalog
        .update_play(
            created.play.id,
            UpdatePlay {
                title: Some("What You Will".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.play.title, "What You Will");
    assert_eq!(renamed.genres, vec![comedy]);

    let cleared = catalog
        .update_play(
            created.play.id,
            UpdatePlay {
                genre_ids: Some(Vec::new()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(cleared.genres.is_empty());
}

#[sqlx::test(migrations = "src/migrations")]
async fn plays_with_same_title_get_distinct_cover_paths(pool: PgPool) {
    let (catalog, _) = services(pool);
    let first = play(&catalog, "Hamlet").await;
    let second = play(&catalog, "Hamlet").await;

    let (first_play, first_location) = catalog
        .attach_cover_image(first.play.id, "cover.jpg")
        .await
        .unwrap();
    let (_, second_location) = catalog
        .attach_cover_image(second.play.id, "cover.jpg")
        .await
        .unwrap();

    assert_ne!(first_location.relative_path, second_location.relative_path);
    assert!(first_location.relative_path.starts_with("uploads/play/hamlet-"));
    assert!(first_location.relative_path.ends_with(".jpg"));
    assert_eq!(
        first_play.cover_image.as_deref(),
        Some(first_location.relative_path.as_str())
    );
    assert!(first_location.absolute_path.starts_with("/srv/media/uploads/play"));
}

#[sqlx::test(migrations = "src/migrations")]
async fn plays_are_listed_by_title(pool: PgPool) {
    let (catalog, _) = services(pool);
    play(&catalog, "Othello").await;
    play(&catalog, "Hamlet").await;
    play(&catalog, "Macbeth").await;

    let titles: Vec<String> = catalog
        .list_plays()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.title)
        .collect();
    assert_eq!(titles, ["Hamlet", "Macbeth", "Othello"]);
}

// ---------------------------------------------------------------------------
// Performances
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "src/migrations")]
async fn performance_reports_available_tickets(pool: PgPool) {
    let (catalog, booking) = services(pool);
    let small = hall(&catalog, "Small", 10, 10).await;
    let hamlet = play(&catalog, "Hamlet").await;
    let show = performance(&catalog, hamlet.play.id, small.id, show_time(1, 19)).await;
    assert_eq!(show.available_tickets(), 100);

    let customer = user(&booking).await;
    booking
        .reserve(
            customer.id,
            show.performance.id,
            (1..=3).map(|seat| SeatRequest { row: 2, seat }).collect(),
        )
        .await
        .unwrap();

    let detail = catalog.get_performance(show.performance.id).await.unwrap();
    assert_eq!(detail.tickets_sold, 3);
    assert_eq!(detail.available_tickets(), 97);
    assert_eq!(detail.to_string(), "Hamlet in Small (2025-03-01 19:00)");
}

#[sqlx::test(migrations = "src/migrations")]
async fn performance_requires_existing_play_and_hall(pool: PgPool) {
    let (catalog, _) = services(pool);
    let main = hall(&catalog, "Main Stage", 10, 20).await;

    let err = catalog
        .create_performance(theatre::models::performance::CreatePerformance {
            play_id: 77,
            theatre_hall_id: main.id,
            show_time: show_time(1, 19),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, TheatreError::NotFound { entity: "Play", id: 77 }));
}

#[sqlx::test(migrations = "src/migrations")]
async fn performances_are_listed_latest_first(pool: PgPool) {
    let (catalog, _) = services(pool);
    let main = hall(&catalog, "Main Stage", 10, 20).await;
    let hamlet = play(&catalog, "Hamlet").await;
    let early = performance(&catalog, hamlet.play.id, main.id, show_time(1, 19)).await;
    let late = performance(&catalog, hamlet.play.id, main.id, show_time(3, 19)).await;

    let ids: Vec<i64> = catalog
        .list_performances()
        .await
        .unwrap()
        .iter()
        .map(|p| p.performance.id)
        .collect();
    assert_eq!(ids, [late.performance.id, early.performance.id]);

    let in_hall = catalog.list_hall_performances(main.id).await.unwrap();
    assert_eq!(in_hall.len(), 2);
}

#[sqlx::test(migrations = "src/migrations")]
async fn moving_to_smaller_hall_can_overbook(pool: PgPool) {
    let (catalog, booking) = services(pool);
    let big = hall(&catalog, "Big", 10, 10).await;
    let tiny = hall(&catalog, "Tiny", 1, 2).await;
    let hamlet = play(&catalog, "Hamlet").await;
    let show = performance(&catalog, hamlet.play.id, big.id, show_time(1, 19)).await;
    let customer = user(&booking).await;
    booking
        .reserve(
            customer.id,
            show.performance.id,
            (1..=6).map(|seat| SeatRequest { row: 5, seat }).collect(),
        )
        .await
        .unwrap();

    let moved = catalog
        .update_performance(
            show.performance.id,
            UpdatePerformance {
                theatre_hall_id: Some(tiny.id),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(moved.hall, tiny);
    assert_eq!(moved.available_tickets(), -4);
    assert!(moved.is_overbooked());
}

#[sqlx::test(migrations = "src/migrations")]
async fn deleting_performance_reports_released_tickets(pool: PgPool) {
    let (catalog, booking) = services(pool.clone());
    let main = hall(&catalog, "Main Stage", 10, 20).await;
    let hamlet = play(&catalog, "Hamlet").await;
    let show = performance(&catalog, hamlet.play.id, main.id, show_time(1, 19)).await;
    let customer = user(&booking).await;
    booking
        .reserve(customer.id, show.performance.id, vec![SeatRequest { row: 1, seat: 1 }])
        .await
        .unwrap();

    let summary = catalog.delete_performance(show.performance.id).await.unwrap();

    assert_eq!(
        summary,
        CascadeSummary {
            performances: 1,
            tickets: 1
        }
    );
    assert_eq!(count(&pool, "tickets").await, 0);
}

#[sqlx::test(migrations = "src/migrations")]
async fn deleting_play_cascades(pool: PgPool) {
    let (catalog, _) = services(pool.clone());
    let main = hall(&catalog, "Main Stage", 10, 20).await;
    let hamlet = play(&catalog, "Hamlet").await;
    performance(&catalog, hamlet.play.id, main.id, show_time(1, 19)).await;

    let summary = catalog.delete_play(hamlet.play.id).await.unwrap();

    assert_eq!(summary.performances, 1);
    assert_eq!(count(&pool, "performances").await, 0);
    assert_eq!(count(&pool, "theatre_halls").await, 1);
}
