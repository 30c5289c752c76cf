//! Field names shared by every media source, and the base field set.

use crate::schema::FieldDescriptor;

pub const TITLE: &str = "title";
pub const MONITORED: &str = "monitored";
pub const RELEASE_GROUP: &str = "releaseGroup";
pub const SOURCE: &str = "source";
pub const VIDEO_CODEC: &str = "videoCodec";
pub const AUDIO_CODEC: &str = "audioCodec";
pub const RESOLUTION: &str = "resolution";
pub const SIZE: &str = "size";
pub const RAW_RESOLUTION: &str = "rawResolution";
pub const RAW_SIZE: &str = "rawSize";
pub const QUALITY_PROFILE: &str = "qualityProfile";
pub const AUDIO_LANGUAGE: &str = "audioLanguage";
pub const SUBTITLE_LANGUAGE: &str = "subtitleLanguage";
pub const YEAR: &str = "year";
pub const AUDIO_CHANNELS: &str = "audioChannels";

/// Fields every source fills, in display order.
pub fn base_fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::string(TITLE).alias("t"),
        FieldDescriptor::boolean(MONITORED).alias("m"),
        FieldDescriptor::string(RELEASE_GROUP).alias("rg"),
        FieldDescriptor::string(SOURCE).alias("src"),
        FieldDescriptor::string(VIDEO_CODEC).alias("vc"),
        FieldDescriptor::string(AUDIO_CODEC).alias("ac"),
        FieldDescriptor::string(RESOLUTION).alias("rs"),
        FieldDescriptor::string(SIZE).alias("sz"),
        // numeric twins of resolution and size
        FieldDescriptor::number(RAW_RESOLUTION).internal(),
        FieldDescriptor::number(RAW_SIZE).internal(),
        FieldDescriptor::string(QUALITY_PROFILE).alias("qp").hidden(),
        FieldDescriptor::string(AUDIO_LANGUAGE).alias("al").hidden(),
        FieldDescriptor::string(SUBTITLE_LANGUAGE).alias("sl").hidden(),
        FieldDescriptor::number(YEAR).alias("y").merged_into(TITLE),
        FieldDescriptor::number(AUDIO_CHANNELS)
            .alias("ach")
            .merged_into(AUDIO_CODEC),
    ]
}

/// The internal numeric field a display field sorts by, if any.
pub fn raw_twin(field: &str) -> Option<&'static str> {
    match field {
        SIZE => Some(RAW_SIZE),
        RESOLUTION => Some(RAW_RESOLUTION),
        _ => None,
    }
}
