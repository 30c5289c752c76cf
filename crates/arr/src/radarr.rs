//! Radarr adapter: one row per movie that has a file.

use async_trait::async_trait;
use inspectarr_core::fields::{MONITORED, QUALITY_PROFILE, TITLE, YEAR, base_fields};
use inspectarr_core::{MediaRow, Schema};
use tracing::debug;

use crate::ArrError;
use crate::api::RadarrApi;
use crate::models::{Movie, QualityProfile, profile_name};
use crate::source::{MediaSource, set_file_fields};

pub fn radarr_schema() -> Schema {
    Schema::new(base_fields())
}

pub struct Radarr<A> {
    api: A,
    schema: Schema,
}

impl<A: RadarrApi> Radarr<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            schema: radarr_schema(),
        }
    }

    fn movie_row(&self, movie: &Movie, profiles: &[QualityProfile]) -> MediaRow {
        let mut row = self.schema.empty_row();
        row.set(TITLE, movie.title.as_deref());
        row.set(YEAR, movie.year);
        row.set(MONITORED, movie.monitored);
        row.set(
            QUALITY_PROFILE,
            profile_name(profiles, movie.quality_profile_id),
        );
        set_file_fields(&mut row, movie.movie_file.as_ref());
        row
    }
}

#[async_trait]
impl<A: RadarrApi> MediaSource for Radarr<A> {
    fn name(&self) -> &'static str {
        "Radarr"
    }

    fn schema(&self) -> &Schema {
        &self.schema
    }

    async fn media_rows(&self) -> Result<Vec<MediaRow>, ArrError> {
        let movies = self
            .api
            .movies()
            .await
            .map_err(|e| e.context("failed to get radarr media"))?;
        let profiles = self
            .api
            .quality_profiles()
            .await
            .map_err(|e| e.context("failed to get radarr quality profiles"))?;

        let rows: Vec<MediaRow> = movies
            .iter()
            .filter(|movie| movie.has_file == Some(true))
            .map(|movie| self.movie_row(movie, &profiles))
            .collect();
        debug!(movies = movies.len(), rows = rows.len(), "built radarr rows");
        Ok(rows)
    }
}
