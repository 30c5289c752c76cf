use async_trait::async_trait;
use inspectarr_core::fields::{
    AUDIO_CHANNELS, AUDIO_CODEC, AUDIO_LANGUAGE, RAW_RESOLUTION, RAW_SIZE, RELEASE_GROUP,
    RESOLUTION, SIZE, SOURCE, SUBTITLE_LANGUAGE, VIDEO_CODEC,
};
use inspectarr_core::format::{format_size, raw_resolution};
use inspectarr_core::normalize::normalize_rows;
use inspectarr_core::{MediaRow, MediaValue, Row, Scalar, Schema};
use tracing::debug;

use crate::ArrError;
use crate::models::MediaFile;

/// A service whose library can be listed as rows of its schema.
#[async_trait]
pub trait MediaSource: Send + Sync {
    /// Display name, e.g. `"Radarr"`.
    fn name(&self) -> &'static str;

    fn schema(&self) -> &Schema;

    /// Rows as built from upstream data, before normalization.
    async fn media_rows(&self) -> Result<Vec<MediaRow>, ArrError>;

    async fn normalized_rows(&self) -> Result<Vec<Row>, ArrError> {
        let rows = self
            .media_rows()
            .await
            .map_err(|e| e.context("failed to get media data"))?;
        debug!(source = self.name(), rows = rows.len(), "normalizing rows");
        Ok(normalize_rows(&rows))
    }
}

/// Slash separated language list as a list value.
pub(crate) fn split_languages(languages: Option<&str>) -> MediaValue {
    match languages {
        Some(languages) => MediaValue::List(languages.split('/').map(Scalar::from).collect()),
        None => MediaValue::Absent,
    }
}

/// File-level fields of a single movie or episode file.
pub(crate) fn set_file_fields(row: &mut MediaRow, file: Option<&MediaFile>) {
    let info = file.and_then(MediaFile::media_info);
    let resolution = file.and_then(MediaFile::resolution);
    let size = file.and_then(|f| f.size);

    row.set(RELEASE_GROUP, file.and_then(|f| f.release_group.as_deref()));
    row.set(SOURCE, file.and_then(MediaFile::source));
    row.set(VIDEO_CODEC, info.and_then(|i| i.video_codec.as_deref()));
    row.set(AUDIO_CODEC, info.and_then(|i| i.audio_codec.as_deref()));
    row.set(AUDIO_CHANNELS, info.and_then(|i| i.audio_channels));
    row.set(
        AUDIO_LANGUAGE,
        split_languages(info.and_then(|i| i.audio_languages.as_deref())),
    );
    row.set(
        SUBTITLE_LANGUAGE,
        split_languages(info.and_then(|i| i.subtitles.as_deref())),
    );
    row.set(RESOLUTION, resolution);
    row.set(RAW_RESOLUTION, raw_resolution(resolution));
    row.set(SIZE, format_size(size));
    row.set(RAW_SIZE, size);
}

#[cfg(test)]
mod tests {
    use super::*;
    use inspectarr_core::fields::base_fields;
    use serde_json::json;

    #[test]
    fn file_fields_from_full_file() {
        let file: MediaFile = serde_json::from_value(json!({
            "size": 1500,
            "releaseGroup": "NTb",
            "quality": { "quality": { "source": "web" } },
            "mediaInfo": {
                "videoCodec": "h264",
                "audioCodec": "EAC3",
                "audioChannels": 5.1,
                "audioLanguages": "English/Spanish",
                "resolution": "1920x1080"
            }
        }))
        .unwrap();

        let mut row = Schema::new(base_fields()).empty_row();
        set_file_fields(&mut row, Some(&file));

        assert_eq!(row.get(SIZE), Some(&MediaValue::from(Some("1.5 KB"))));
        assert_eq!(row.get(RAW_SIZE), Some(&MediaValue::from(Some(1500u64))));
        assert_eq!(row.get(SOURCE), Some(&MediaValue::from(Some("web"))));
        assert_eq!(
            row.get(RAW_RESOLUTION),
            Some(&MediaValue::from(Some(1920.0 * 1080.0)))
        );
        assert_eq!(
            row.get(AUDIO_LANGUAGE),
            Some(&MediaValue::List(vec!["English".into(), "Spanish".into()]))
        );
        assert_eq!(row.get(SUBTITLE_LANGUAGE), Some(&MediaValue::Absent));
    }

    #[test]
    fn missing_file_leaves_fields_absent() {
        let schema = Schema::new(base_fields());
        let mut row = schema.empty_row();
        set_file_fields(&mut row, None);
        assert_eq!(row, schema.empty_row());
    }
}
