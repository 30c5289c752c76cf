//! Sonarr adapter.
//!
//! Episodes of every series are fetched concurrently and placed into a
//! [`SeasonGrid`]; rows are then built per series, per season or per episode.

use async_trait::async_trait;
use futures::future::join_all;
use inspectarr_core::fields::{
    AUDIO_CHANNELS, AUDIO_CODEC, AUDIO_LANGUAGE, MONITORED, QUALITY_PROFILE, RAW_RESOLUTION,
    RAW_SIZE, RELEASE_GROUP, RESOLUTION, SIZE, SOURCE, SUBTITLE_LANGUAGE, TITLE, VIDEO_CODEC,
    YEAR, base_fields,
};
use inspectarr_core::format::{format_size, raw_resolution};
use inspectarr_core::normalize::unique_join;
use inspectarr_core::{FieldDescriptor, MediaRow, MediaValue, Scalar, Schema};
use tracing::debug;

use crate::ArrError;
use crate::api::SonarrApi;
use crate::grid::SeasonGrid;
use crate::models::{Episode, MediaFile, QualityProfile, Series, profile_name};
use crate::source::{MediaSource, set_file_fields, split_languages};

pub const TYPE: &str = "type";
pub const SEASON: &str = "season";
pub const EPISODE: &str = "episode";

pub fn sonarr_schema() -> Schema {
    Schema::new(base_fields()).with_fields_after(
        TITLE,
        vec![
            FieldDescriptor::string(TYPE),
            FieldDescriptor::number(SEASON).alias("s"),
            FieldDescriptor::number(EPISODE).alias("e"),
        ],
    )
}

/// Row granularity. Episode beats season beats whole series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Granularity {
    #[default]
    Series,
    Season,
    Episode,
}

impl Granularity {
    pub fn from_flags(by_season: bool, by_episode: bool) -> Self {
        if by_episode {
            Self::Episode
        } else if by_season {
            Self::Season
        } else {
            Self::Series
        }
    }
}

pub struct Sonarr<A> {
    api: A,
    granularity: Granularity,
    schema: Schema,
}

fn pad(number: u32) -> String {
    format!("{number:02}")
}

impl<A: SonarrApi> Sonarr<A> {
    pub fn new(api: A, granularity: Granularity) -> Self {
        Self {
            api,
            granularity,
            schema: sonarr_schema(),
        }
    }

    /// Every series with its grid of file-having episodes, in upstream order.
    async fn series_grids(&self) -> Result<Vec<(Series, SeasonGrid)>, ArrError> {
        let all = self
            .api
            .series()
            .await
            .map_err(|e| e.context("failed to get sonarr media"))?;

        let grids = join_all(all.iter().map(|series| self.series_grid(series))).await;

        let mut out = Vec::with_capacity(all.len());
        for (series, grid) in all.into_iter().zip(grids) {
            let grid = grid.map_err(|e| e.context("failed to process series"))?;
            out.push((series, grid));
        }
        Ok(out)
    }

    async fn series_grid(&self, series: &Series) -> Result<SeasonGrid, ArrError> {
        let title = series.title();
        let id = series
            .id
            .filter(|&id| id != 0)
            .ok_or_else(|| ArrError::MissingSeriesId {
                title: title.to_string(),
            })?;

        let episodes = self.api.episodes(id).await.map_err(|e| {
            e.context(format!(
                "failed to get episode data for series '{title}' ({id})"
            ))
        })?;
        debug!(series = title, episodes = episodes.len(), "fetched episodes");

        let mut grid = SeasonGrid::new();
        for episode in episodes {
            if episode.has_file != Some(true) {
                continue;
            }
            // daily series report neither number
            let (season, number) = match (episode.season_number, episode.episode_number) {
                (Some(season), Some(number)) => (season, number),
                (None, None) => (0, episode.absolute_episode_number.unwrap_or(0)),
                _ => return Err(invalid_episode(series, &episode)),
            };
            grid.insert(season, number, episode);
        }
        Ok(grid)
    }

    fn base_row(&self, series: &Series, profiles: &[QualityProfile]) -> MediaRow {
        let mut row = self.schema.empty_row();
        row.set(TITLE, series.title.as_deref());
        row.set(YEAR, series.year);
        row.set(TYPE, series.series_type.as_deref());
        row.set(
            QUALITY_PROFILE,
            profile_name(profiles, series.quality_profile_id),
        );
        row
    }

    fn episode_rows(
        &self,
        series: &Series,
        grid: &SeasonGrid,
        profiles: &[QualityProfile],
        rows: &mut Vec<MediaRow>,
    ) {
        for season in grid.seasons() {
            for episode in season.episodes() {
                let mut row = self.base_row(series, profiles);
                row.set(SEASON, Some(pad(season.number)));
                row.set(EPISODE, episode.episode_number.map(pad));
                row.set(MONITORED, episode.monitored);
                set_file_fields(&mut row, episode.file());
                rows.push(row);
            }
        }
    }

    fn season_rows(
        &self,
        series: &Series,
        grid: &SeasonGrid,
        profiles: &[QualityProfile],
        rows: &mut Vec<MediaRow>,
    ) {
        for season in grid.seasons() {
            let episodes: Vec<&Episode> = season.episodes().collect();
            let mut row = self.base_row(series, profiles);
            row.set(SEASON, Some(pad(season.number)));
            row.set(MONITORED, series.season_monitored(season.number));
            set_aggregate_fields(&mut row, &episodes);
            rows.push(row);
        }
    }

    fn series_row(
        &self,
        series: &Series,
        grid: &SeasonGrid,
        profiles: &[QualityProfile],
    ) -> Option<MediaRow> {
        if grid.is_empty() {
            return None;
        }
        let episodes: Vec<&Episode> = grid.episodes().collect();
        let mut row = self.base_row(series, profiles);
        row.set(MONITORED, series.monitored);
        set_aggregate_fields(&mut row, &episodes);
        Some(row)
    }
}

fn invalid_episode(series: &Series, episode: &Episode) -> ArrError {
    let json = |v: serde_json::Result<String>| v.unwrap_or_default();
    ArrError::InvalidEpisode {
        title: series.title().to_string(),
        series: json(serde_json::to_string_pretty(series)),
        episode: json(serde_json::to_string_pretty(episode)),
    }
}

/// Truthy values of `f` over `episodes`, as a list.
fn gather<'a, T, F>(episodes: &[&'a Episode], f: F) -> MediaValue
where
    T: Into<Scalar>,
    F: Fn(&'a MediaFile) -> Option<T>,
{
    MediaValue::List(
        episodes
            .iter()
            .filter_map(|&e| e.file())
            .filter_map(f)
            .map(Into::into)
            .filter(Scalar::is_truthy)
            .collect(),
    )
}

fn gather_languages<'a, F>(episodes: &[&'a Episode], f: F) -> MediaValue
where
    F: Fn(&'a MediaFile) -> Option<&'a str>,
{
    let mut all = Vec::new();
    for file in episodes.iter().filter_map(|&e| e.file()) {
        if let MediaValue::List(items) = split_languages(f(file)) {
            all.extend(items.into_iter().filter(Scalar::is_truthy));
        }
    }
    MediaValue::List(all)
}

/// Sum of reported sizes, or `None` when no episode reports one.
fn total_size(episodes: &[&Episode]) -> Option<u64> {
    episodes
        .iter()
        .filter_map(|&e| e.file().and_then(|f| f.size))
        .reduce(|acc, size| acc.saturating_add(size))
}

fn set_aggregate_fields(row: &mut MediaRow, episodes: &[&Episode]) {
    let resolution = gather(episodes, MediaFile::resolution);
    let raw = match &resolution {
        MediaValue::List(items) => unique_join(items),
        _ => None,
    };
    let size = total_size(episodes);

    row.set(RELEASE_GROUP, gather(episodes, |f| f.release_group.as_deref()));
    row.set(SOURCE, gather(episodes, MediaFile::source));
    row.set(
        VIDEO_CODEC,
        gather(episodes, |f| f.media_info().and_then(|i| i.video_codec.as_deref())),
    );
    row.set(
        AUDIO_CODEC,
        gather(episodes, |f| f.media_info().and_then(|i| i.audio_codec.as_deref())),
    );
    row.set(
        AUDIO_CHANNELS,
        gather(episodes, |f| f.media_info().and_then(|i| i.audio_channels)),
    );
    row.set(
        AUDIO_LANGUAGE,
        gather_languages(episodes, |f| {
            f.media_info().and_then(|i| i.audio_languages.as_deref())
        }),
    );
    row.set(
        SUBTITLE_LANGUAGE,
        gather_languages(episodes, |f| f.media_info().and_then(|i| i.subtitles.as_deref())),
    );
    row.set(RESOLUTION, resolution);
    row.set(RAW_RESOLUTION, raw_resolution(raw.as_deref()));
    row.set(SIZE, format_size(size));
    row.set(RAW_SIZE, size);
}

#[async_trait]
impl<A: SonarrApi> MediaSource for Sonarr<A> {
    fn name(&self) -> &'static str {
        "Sonarr"
    }

    fn schema(&self) -> &Schema {
        &self.schema
    }

    async fn media_rows(&self) -> Result<Vec<MediaRow>, ArrError> {
        let grids = self.series_grids().await?;
        let profiles = self
            .api
            .quality_profiles()
            .await
            .map_err(|e| e.context("failed to get sonarr quality profiles"))?;

        let mut rows = Vec::new();
        for (series, grid) in &grids {
            match self.granularity {
                Granularity::Episode => self.episode_rows(series, grid, &profiles, &mut rows),
                Granularity::Season => self.season_rows(series, grid, &profiles, &mut rows),
                Granularity::Series => rows.extend(self.series_row(series, grid, &profiles)),
            }
        }
        debug!(
            series = grids.len(),
            rows = rows.len(),
            granularity = ?self.granularity,
            "built sonarr rows"
        );
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inspectarr_core::Visibility;

    #[test]
    fn granularity_precedence() {
        assert_eq!(Granularity::from_flags(false, false), Granularity::Series);
        assert_eq!(Granularity::from_flags(true, false), Granularity::Season);
        assert_eq!(Granularity::from_flags(true, true), Granularity::Episode);
        assert_eq!(Granularity::from_flags(false, true), Granularity::Episode);
    }

    #[test]
    fn schema_inserts_series_fields_after_title() {
        let schema = sonarr_schema();
        let names: Vec<_> = schema.fields().take(5).map(|f| f.name).collect();
        assert_eq!(names, [TITLE, TYPE, SEASON, EPISODE, MONITORED]);
        assert_eq!(schema.resolve_name("s"), Some(SEASON));
        assert_eq!(schema.resolve_name("e"), Some(EPISODE));
        assert_eq!(schema.field(TYPE).unwrap().alias, None);
        assert_eq!(schema.field(YEAR).unwrap().visibility, Visibility::MergedInto(TITLE));
    }

    fn file(size: Option<u64>, resolution: &str, group: Option<&str>) -> Episode {
        Episode {
            has_file: Some(true),
            episode_file: Some(MediaFile {
                size,
                release_group: group.map(String::from),
                media_info: Some(crate::models::MediaInfo {
                    resolution: Some(resolution.into()),
                    audio_languages: Some("English/Japanese".into()),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn aggregates_sizes_lists_and_raw_resolution() {
        let a = file(Some(1_000), "1920x1080", Some("NTb"));
        let b = file(None, "1280x720", Some(""));
        let c = file(Some(500), "1920x1080", Some("NTb"));
        let mut row = sonarr_schema().empty_row();
        set_aggregate_fields(&mut row, &[&a, &b, &c]);

        assert_eq!(row.get(RAW_SIZE), Some(&MediaValue::from(Some(1_500u64))));
        assert_eq!(row.get(SIZE), Some(&MediaValue::from(Some("1.5 KB"))));
        assert_eq!(
            row.get(RELEASE_GROUP),
            Some(&MediaValue::List(vec!["NTb".into(), "NTb".into()]))
        );
        assert_eq!(
            row.get(RAW_RESOLUTION),
            Some(&MediaValue::from(Some((1920.0 * 1080.0 + 1280.0 * 720.0) / 2.0)))
        );
        assert_eq!(
            row.get(AUDIO_LANGUAGE),
            Some(&MediaValue::List(
                ["English", "Japanese", "English", "Japanese", "English", "Japanese"]
                    .map(Scalar::from)
                    .to_vec()
            ))
        );
    }

    #[test]
    fn size_is_absent_when_nothing_reports_one() {
        let a = file(None, "1920x1080", None);
        assert_eq!(total_size(&[&a]), None);
        assert_eq!(total_size(&[]), None);
    }
}
