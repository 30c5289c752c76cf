//! Transport seams for the adapters. [`ArrClient`] implements both over HTTP.

use async_trait::async_trait;

use crate::ArrError;
use crate::client::ArrClient;
use crate::models::{Episode, Movie, QualityProfile, Series};

#[async_trait]
pub trait RadarrApi: Send + Sync {
    async fn movies(&self) -> Result<Vec<Movie>, ArrError>;

    async fn quality_profiles(&self) -> Result<Vec<QualityProfile>, ArrError>;
}

#[async_trait]
pub trait SonarrApi: Send + Sync {
    async fn series(&self) -> Result<Vec<Series>, ArrError>;

    async fn quality_profiles(&self) -> Result<Vec<QualityProfile>, ArrError>;

    /// Every episode of a series, with its episode file when it has one.
    async fn episodes(&self, series_id: u64) -> Result<Vec<Episode>, ArrError>;
}

#[async_trait]
impl RadarrApi for ArrClient {
    async fn movies(&self) -> Result<Vec<Movie>, ArrError> {
        self.get_json("movie").await
    }

    async fn quality_profiles(&self) -> Result<Vec<QualityProfile>, ArrError> {
        self.get_json("qualityprofile").await
    }
}

#[async_trait]
impl SonarrApi for ArrClient {
    async fn series(&self) -> Result<Vec<Series>, ArrError> {
        self.get_json("series").await
    }

    async fn quality_profiles(&self) -> Result<Vec<QualityProfile>, ArrError> {
        self.get_json("qualityprofile").await
    }

    async fn episodes(&self, series_id: u64) -> Result<Vec<Episode>, ArrError> {
        self.get_json(&format!(
            "episode?seriesId={series_id}&includeEpisodeFile=true"
        ))
        .await
    }
}
