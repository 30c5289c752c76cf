//! Subsets of the Radarr and Sonarr v3 resources the adapters read.
//!
//! Every field is optional; upstream payloads routinely omit or null them.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QualityProfile {
    pub id: Option<u64>,
    pub name: Option<String>,
}

/// Name of the profile with `id`, if any.
pub fn profile_name(profiles: &[QualityProfile], id: Option<u64>) -> Option<&str> {
    let id = id?;
    profiles
        .iter()
        .find(|p| p.id == Some(id))
        .and_then(|p| p.name.as_deref())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Quality {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub source: Option<String>,
    pub resolution: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FileQuality {
    pub quality: Option<Quality>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MediaInfo {
    pub audio_channels: Option<f64>,
    pub audio_codec: Option<String>,
    /// Slash separated, e.g. `"English/Japanese"`.
    pub audio_languages: Option<String>,
    pub resolution: Option<String>,
    /// Slash separated.
    pub subtitles: Option<String>,
    pub video_codec: Option<String>,
}

/// A movie file (Radarr) or episode file (Sonarr).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MediaFile {
    pub id: Option<u64>,
    pub relative_path: Option<String>,
    pub size: Option<u64>,
    pub release_group: Option<String>,
    pub quality: Option<FileQuality>,
    pub media_info: Option<MediaInfo>,
}

impl MediaFile {
    pub fn source(&self) -> Option<&str> {
        self.quality
            .as_ref()
            .and_then(|q| q.quality.as_ref())
            .and_then(|q| q.source.as_deref())
    }

    pub fn media_info(&self) -> Option<&MediaInfo> {
        self.media_info.as_ref()
    }

    pub fn resolution(&self) -> Option<&str> {
        self.media_info().and_then(|m| m.resolution.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Movie {
    pub id: Option<u64>,
    pub title: Option<String>,
    pub year: Option<u32>,
    pub monitored: Option<bool>,
    pub has_file: Option<bool>,
    pub quality_profile_id: Option<u64>,
    pub movie_file: Option<MediaFile>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeasonInfo {
    pub season_number: Option<u32>,
    pub monitored: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Series {
    pub id: Option<u64>,
    pub title: Option<String>,
    pub year: Option<u32>,
    pub monitored: Option<bool>,
    pub series_type: Option<String>,
    pub quality_profile_id: Option<u64>,
    pub seasons: Option<Vec<SeasonInfo>>,
}

impl Series {
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    /// Monitored flag of the season entry numbered `season`.
    pub fn season_monitored(&self, season: u32) -> Option<bool> {
        self.seasons
            .as_deref()?
            .iter()
            .find(|s| s.season_number == Some(season))
            .and_then(|s| s.monitored)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Episode {
    pub id: Option<u64>,
    pub series_id: Option<u64>,
    pub season_number: Option<u32>,
    pub episode_number: Option<u32>,
    pub absolute_episode_number: Option<u32>,
    pub title: Option<String>,
    pub monitored: Option<bool>,
    pub has_file: Option<bool>,
    pub episode_file: Option<MediaFile>,
}

impl Episode {
    pub fn file(&self) -> Option<&MediaFile> {
        self.episode_file.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_radarr_movie() {
        let movie: Movie = serde_json::from_value(json!({
            "id": 1,
            "title": "Arrival",
            "year": 2016,
            "monitored": true,
            "hasFile": true,
            "qualityProfileId": 4,
            "tags": [],
            "movieFile": {
                "size": 60000000000u64,
                "releaseGroup": "NTb",
                "quality": { "quality": { "id": 19, "name": "Bluray-2160p", "source": "bluray", "resolution": 2160 } },
                "mediaInfo": {
                    "audioChannels": 7.1,
                    "audioCodec": "TrueHD Atmos",
                    "audioLanguages": "English/French",
                    "resolution": "3840x2160",
                    "subtitles": "",
                    "videoCodec": "x265"
                }
            }
        }))
        .unwrap();

        let file = movie.movie_file.as_ref().unwrap();
        assert_eq!(movie.has_file, Some(true));
        assert_eq!(file.source(), Some("bluray"));
        assert_eq!(file.resolution(), Some("3840x2160"));
        assert_eq!(file.media_info().unwrap().audio_channels, Some(7.1));
    }

    #[test]
    fn tolerates_nulls_and_missing_fields() {
        let movie: Movie = serde_json::from_value(json!({
            "title": "Nothing Yet",
            "movieFile": null,
            "year": null
        }))
        .unwrap();
        assert_eq!(movie.title.as_deref(), Some("Nothing Yet"));
        assert!(movie.movie_file.is_none());
        assert!(movie.has_file.is_none());

        let file: MediaFile = serde_json::from_value(json!({ "quality": {} })).unwrap();
        assert_eq!(file.source(), None);
    }

    #[test]
    fn season_monitored_matches_season_number() {
        let series: Series = serde_json::from_value(json!({
            "title": "The Expanse",
            "seasons": [
                { "seasonNumber": 0, "monitored": false },
                { "seasonNumber": 1, "monitored": true }
            ]
        }))
        .unwrap();
        assert_eq!(series.season_monitored(1), Some(true));
        assert_eq!(series.season_monitored(0), Some(false));
        assert_eq!(series.season_monitored(7), None);
    }

    #[test]
    fn profile_lookup_by_id() {
        let profiles = vec![
            QualityProfile { id: Some(1), name: Some("Any".into()) },
            QualityProfile { id: Some(4), name: Some("Ultra-HD".into()) },
        ];
        assert_eq!(profile_name(&profiles, Some(4)), Some("Ultra-HD"));
        assert_eq!(profile_name(&profiles, Some(9)), None);
        assert_eq!(profile_name(&profiles, None), None);
    }
}
