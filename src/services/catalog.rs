//! Admin-side catalog: halls, genres, actors, plays and performances.

use serde::Serialize;
use sqlx::PgConnection;
use std::path::PathBuf;
use tracing::{info, warn};
use validator::Validate;

use crate::config::MediaConfig;
use crate::database::Database;
use crate::error::{TheatreError, TheatreResult};
use crate::media::{play_image_file_path, CoverImageLocation};
use crate::models::actor::{Actor, CreateActor};
use crate::models::genre::{CreateGenre, Genre};
use crate::models::hall::{CreateHall, TheatreHall, UpdateHall};
use crate::models::performance::{CreatePerformance, PerformanceDetail, UpdatePerformance};
use crate::models::play::{CreatePlay, Play, PlayDetail, UpdatePlay};
use crate::repositories::{ActorRepo, GenreRepo, HallRepo, PerformanceRepo, PlayRepo, TicketRepo};
use crate::services::{log_creation, warn_if_overbooked};
use crate::types::DbId;

/// Rows removed alongside a deleted hall, play or performance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CascadeSummary {
    pub performances: i64,
    pub tickets: i64,
}

#[derive(Clone)]
pub struct CatalogService {
    db: Database,
    media_root: PathBuf,
}

impl CatalogService {
    pub fn new(db: Database, media: &MediaConfig) -> Self {
        Self {
            db,
            media_root: media.root.clone(),
        }
    }

    // --- Halls ---

    pub async fn create_hall(&self, input: CreateHall) -> TheatreResult<TheatreHall> {
        input.validate()?;
        let hall = self
            .db
            .atomic(move |conn| {
                Box::pin(async move { Ok::<_, TheatreError>(HallRepo::create(conn, &input).await?) })
            })
            .await?;
        log_creation("TheatreHall", hall.id);
        Ok(hall)
    }

    /// Re-validates the provided dimensions before writing. Tickets already
    /// sold are not re-checked against the new geometry.
    pub async fn update_hall(&self, id: DbId, input: UpdateHall) -> TheatreResult<TheatreHall> {
        input.validate()?;
        self.db
            .atomic(move |conn| {
                Box::pin(async move {
                    HallRepo::update(conn, id, &input)
                        .await?
                        .ok_or(TheatreError::not_found("TheatreHall", id))
                })
            })
            .await
    }

    pub async fn get_hall(&self, id: DbId) -> TheatreResult<TheatreHall> {
        HallRepo::find_by_id(&self.db.pool, id)
            .await?
            .ok_or(TheatreError::not_found("TheatreHall", id))
    }

    pub async fn list_halls(&self) -> TheatreResult<Vec<TheatreHall>> {
        Ok(HallRepo::list(&self.db.pool).await?)
    }

    /// Delete a hall together with its performances and their tickets.
    pub async fn delete_hall(&self, id: DbId) -> TheatreResult<CascadeSummary> {
        let summary = self
            .db
            .atomic(move |conn| {
                Box::pin(async move {
                    let (performances, tickets) = HallRepo::count_dependents(&mut *conn, id).await?;
                    if !HallRepo::delete(&mut *conn, id).await? {
                        return Err(TheatreError::not_found("TheatreHall", id));
                    }
                    Ok::<_, TheatreError>(CascadeSummary {
                        performances,
                        tickets,
                    })
                })
            })
            .await?;
        log_cascade("TheatreHall", id, summary);
        Ok(summary)
    }

    // --- Genres & actors ---

    pub async fn create_genre(&self, input: CreateGenre) -> TheatreResult<Genre> {
        input.validate()?;
        let genre = self
            .db
            .atomic(move |conn| {
                Box::pin(async move { Ok::<_, TheatreError>(GenreRepo::create(conn, &input).await?) })
            })
            .await?;
        log_creation("Genre", genre.id);
        Ok(genre)
    }

    pub async fn list_genres(&self) -> TheatreResult<Vec<Genre>> {
        Ok(GenreRepo::list(&self.db.pool).await?)
    }

    pub async fn create_actor(&self, input: CreateActor) -> TheatreResult<Actor> {
        input.validate()?;
        let actor = self
            .db
            .atomic(move |conn| {
                Box::pin(async move { Ok::<_, TheatreError>(ActorRepo::create(conn, &input).await?) })
            })
            .await?;
        log_creation("Actor", actor.id);
        Ok(actor)
    }

    pub async fn list_actors(&self) -> TheatreResult<Vec<Actor>> {
        Ok(ActorRepo::list(&self.db.pool).await?)
    }

    // --- Plays ---

    /// Create a play and its genre/actor links atomically. An unknown genre
    /// or actor id fails the whole operation with `InvalidReference`.
    pub async fn create_play(&self, input: CreatePlay) -> TheatreResult<PlayDetail> {
        input.validate()?;
        let detail = self
            .db
            .atomic(move |conn| {
                Box::pin(async move {
                    let play = PlayRepo::create(&mut *conn, &input).await?;
                    PlayRepo::set_genres(conn, play.id, &input.genre_ids).await?;
                    PlayRepo::set_actors(conn, play.id, &input.actor_ids).await?;
                    play_detail(conn, play).await
                })
            })
            .await?;
        log_creation("Play", detail.play.id);
        Ok(detail)
    }

    pub async fn update_play(&self, id: DbId, input: UpdatePlay) -> TheatreResult<PlayDetail> {
        input.validate()?;
        self.db
            .atomic(move |conn| {
                Box::pin(async move {
                    let play = PlayRepo::update(&mut *conn, id, &input)
                        .await?
                        .ok_or(TheatreError::not_found("Play", id))?;
                    if let Some(genre_ids) = &input.genre_ids {
                        PlayRepo::set_genres(conn, id, genre_ids).await?;
                    }
                    if let Some(actor_ids) = &input.actor_ids {
                        PlayRepo::set_actors(conn, id, actor_ids).await?;
                    }
                    play_detail(conn, play).await
                })
            })
            .await
    }

    pub async fn get_play(&self, id: DbId) -> TheatreResult<PlayDetail> {
        let mut conn = self.db.pool.acquire().await?;
        let play = PlayRepo::find_by_id(&mut *conn, id)
            .await?
            .ok_or(TheatreError::not_found("Play", id))?;
        play_detail(&mut *conn, play).await
    }

    pub async fn list_plays(&self) -> TheatreResult<Vec<Play>> {
        Ok(PlayRepo::list(&self.db.pool).await?)
    }

    pub async fn list_plays_by_genre(&self, genre_id: DbId) -> TheatreResult<Vec<Play>> {
        Ok(PlayRepo::list_by_genre(&self.db.pool, genre_id).await?)
    }

    pub async fn list_plays_by_actor(&self, actor_id: DbId) -> TheatreResult<Vec<Play>> {
        Ok(PlayRepo::list_by_actor(&self.db.pool, actor_id).await?)
    }

    /// Derive a storage path for an uploaded cover and record it on the play.
    ///
    /// The caller writes the file bytes to the returned `absolute_path`.
    pub async fn attach_cover_image(
        &self,
        play_id: DbId,
        filename: &str,
    ) -> TheatreResult<(Play, CoverImageLocation)> {
        let filename = filename.to_string();
        let (play, relative_path) = self
            .db
            .atomic(move |conn| {
                Box::pin(async move {
                    let play = PlayRepo::find_by_id(&mut *conn, play_id)
                        .await?
                        .ok_or(TheatreError::not_found("Play", play_id))?;
                    let path = play_image_file_path(&play.title, &filename);
                    let play = PlayRepo::set_cover_image(&mut *conn, play_id, &path)
                        .await?
                        .ok_or(TheatreError::not_found("Play", play_id))?;
                    Ok::<_, TheatreError>((play, path))
                })
            })
            .await?;
        info!(play_id, path = %relative_path, "Cover image path assigned");
        Ok((play, CoverImageLocation::new(&self.media_root, relative_path)))
    }

    pub async fn delete_play(&self, id: DbId) -> TheatreResult<CascadeSummary> {
        let summary = self
            .db
            .atomic(move |conn| {
                Box::pin(async move {
                    let (performances, tickets) = PlayRepo::count_dependents(&mut *conn, id).await?;
                    if !PlayRepo::delete(&mut *conn, id).await? {
                        return Err(TheatreError::not_found("Play", id));
                    }
                    Ok::<_, TheatreError>(CascadeSummary {
                        performances,
                        tickets,
                    })
                })
            })
            .await?;
        log_cascade("Play", id, summary);
        Ok(summary)
    }

    // --- Performances ---

    pub async fn create_performance(
        &self,
        input: CreatePerformance,
    ) -> TheatreResult<PerformanceDetail> {
        let detail = self
            .db
            .atomic(move |conn| {
                Box::pin(async move {
                    if PlayRepo::find_by_id(&mut *conn, input.play_id).await?.is_none() {
                        return Err(TheatreError::not_found("Play", input.play_id));
                    }
                    if HallRepo::find_by_id(&mut *conn, input.theatre_hall_id)
                        .await?
                        .is_none()
                    {
                        return Err(TheatreError::not_found("TheatreHall", input.theatre_hall_id));
                    }
                    let performance = PerformanceRepo::create(&mut *conn, &input).await?;
                    PerformanceRepo::find_detail(&mut *conn, performance.id)
                        .await?
                        .ok_or(TheatreError::not_found("Performance", performance.id))
                })
            })
            .await?;
        log_creation("Performance", detail.performance.id);
        Ok(detail)
    }

    /// Moving a performance to another hall does not re-check sold tickets
    /// against the new hall; availability may go negative.
    pub async fn update_performance(
        &self,
        id: DbId,
        input: UpdatePerformance,
    ) -> TheatreResult<PerformanceDetail> {
        self.db
            .atomic(move |conn| {
                Box::pin(async move {
                    PerformanceRepo::update(&mut *conn, id, &input)
                        .await?
                        .ok_or(TheatreError::not_found("Performance", id))?;
                    PerformanceRepo::find_detail(&mut *conn, id)
                        .await?
                        .ok_or(TheatreError::not_found("Performance", id))
                })
            })
            .await
    }

    /// Load a performance with freshly computed availability.
    pub async fn get_performance(&self, id: DbId) -> TheatreResult<PerformanceDetail> {
        let detail = PerformanceRepo::find_detail(&self.db.pool, id)
            .await?
            .ok_or(TheatreError::not_found("Performance", id))?;
        warn_if_overbooked(&detail);
        Ok(detail)
    }

    pub async fn list_performances(&self) -> TheatreResult<Vec<PerformanceDetail>> {
        let details = PerformanceRepo::list_details(&self.db.pool).await?;
        details.iter().for_each(warn_if_overbooked);
        Ok(details)
    }

    pub async fn list_hall_performances(&self, hall_id: DbId) -> TheatreResult<Vec<PerformanceDetail>> {
        let details = PerformanceRepo::list_details_for_hall(&self.db.pool, hall_id).await?;
        details.iter().for_each(warn_if_overbooked);
        Ok(details)
    }

    pub async fn delete_performance(&self, id: DbId) -> TheatreResult<CascadeSummary> {
        let summary = self
            .db
            .atomic(move |conn| {
                Box::pin(async move {
                    let tickets = TicketRepo::count_for_performance(&mut *conn, id).await?;
                    if !PerformanceRepo::delete(&mut *conn, id).await? {
                        return Err(TheatreError::not_found("Performance", id));
                    }
                    Ok::<_, TheatreError>(CascadeSummary {
                        performances: 1,
                        tickets,
                    })
                })
            })
            .await?;
        log_cascade("Performance", id, summary);
        Ok(summary)
    }
}

async fn play_detail(conn: &mut PgConnection, play: Play) -> TheatreResult<PlayDetail> {
    let genres = GenreRepo::list_for_play(&mut *conn, play.id).await?;
    let actors = ActorRepo::list_for_play(&mut *conn, play.id).await?;
    Ok(PlayDetail {
        play,
        genres,
        actors,
    })
}

fn log_cascade(entity: &'static str, id: DbId, summary: CascadeSummary) {
    warn!(
        entity,
        id,
        performances = summary.performances,
        tickets = summary.tickets,
        "Deleted {} {} and cascaded to dependent rows",
        entity,
        id
    );
}
