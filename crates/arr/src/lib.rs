pub mod api;
pub mod client;
pub mod grid;
pub mod models;
pub mod radarr;
pub mod sonarr;
pub mod source;

use thiserror::Error;

pub use api::{RadarrApi, SonarrApi};
pub use client::{ArrClient, ClientConfig};
pub use radarr::Radarr;
pub use sonarr::{Granularity, Sonarr};
pub use source::MediaSource;

#[derive(Error, Debug)]
pub enum ArrError {
    #[error("failed to make request to '{endpoint}'")]
    Request {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("request to '{endpoint}' returned {status}")]
    Status {
        endpoint: String,
        status: reqwest::StatusCode,
    },
    #[error("failed to parse JSON response from '{endpoint}'")]
    Decode {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("series id is missing for series '{title}'")]
    MissingSeriesId { title: String },
    #[error("Unexpected invalid episode data for series '{title}': {series} {episode}")]
    InvalidEpisode {
        title: String,
        series: String,
        episode: String,
    },
    #[error("{message}")]
    Context {
        message: String,
        #[source]
        source: Box<ArrError>,
    },
}

impl ArrError {
    /// Wrap `self` under a higher-level message.
    pub fn context(self, message: impl Into<String>) -> Self {
        Self::Context {
            message: message.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error of a context chain.
    pub fn root(&self) -> &ArrError {
        match self {
            Self::Context { source, .. } => source.root(),
            other => other,
        }
    }
}
