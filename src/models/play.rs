//! Play entity, its genre/actor links and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use validator::Validate;

use crate::models::{actor::Actor, genre::Genre};
use crate::types::DbId;

/// A row from the `plays` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Play {
    pub id: DbId,
    pub title: String,
    pub description: String,
    /// Path relative to the media root, see [`crate::media::play_image_file_path`].
    pub cover_image: Option<String>,
}

impl fmt::Display for Play {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

/// A play together with its genres and actors, both ordered by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayDetail {
    pub play: Play,
    pub genres: Vec<Genre>,
    pub actors: Vec<Actor>,
}

/// DTO for creating a play. Link rows are written in the same transaction.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePlay {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[serde(default)]
    pub genre_ids: Vec<DbId>,
    #[serde(default)]
    pub actor_ids: Vec<DbId>,
}

/// DTO for updating a play.
///
/// `Some(ids)` replaces the whole link set, `None` leaves it untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdatePlay {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    pub genre_ids: Option<Vec<DbId>>,
    pub actor_ids: Option<Vec<DbId>>,
}
