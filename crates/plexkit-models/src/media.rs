use serde::{Deserialize, Serialize};

use crate::error::AttributeError;
use crate::hydrate::Hydrate;
use crate::record::{assign, float_field, int_field, key_field, records_field, string_field, RawRecord};

/// One physical encoding of a playable item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    pub id: Option<u64>,
    /// Milliseconds.
    pub duration: Option<i64>,
    /// Kilobits per second.
    pub bitrate: Option<i64>,
    pub width: Option<i64>,
    pub height: Option<i64>,
    pub aspect_ratio: Option<f64>,
    pub video_resolution: Option<String>,
    pub container: Option<String>,
    pub video_frame_rate: Option<String>,
    pub video_codec: Option<String>,
    pub audio_codec: Option<String>,
    pub audio_channels: Option<i64>,
    pub files: Vec<MediaFile>,
}

impl Hydrate for Media {
    fn hydrate(&mut self, record: &RawRecord) -> Result<(), AttributeError> {
        assign(&mut self.id, key_field(record, "id")?);
        assign(&mut self.duration, int_field(record, "duration")?);
        assign(&mut self.bitrate, int_field(record, "bitrate")?);
        assign(&mut self.width, int_field(record, "width")?);
        assign(&mut self.height, int_field(record, "height")?);
        assign(&mut self.aspect_ratio, float_field(record, "aspectRatio")?);
        assign(&mut self.video_resolution, string_field(record, "videoResolution")?);
        assign(&mut self.container, string_field(record, "container")?);
        assign(&mut self.video_frame_rate, string_field(record, "videoFrameRate")?);
        assign(&mut self.video_codec, string_field(record, "videoCodec")?);
        assign(&mut self.audio_codec, string_field(record, "audioCodec")?);
        assign(&mut self.audio_channels, int_field(record, "audioChannels")?);

        // Parts are rebuilt wholesale, never merged into the previous list.
        self.files = records_field(record, "Part")?
            .unwrap_or_default()
            .into_iter()
            .map(MediaFile::from_record)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(())
    }
}

/// A file part backing a [`Media`] entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaFile {
    pub id: Option<u64>,
    pub key: Option<String>,
    pub duration: Option<i64>,
    /// Path of the file on the server's filesystem.
    pub file: Option<String>,
    /// Bytes.
    pub size: Option<i64>,
    pub container: Option<String>,
}

impl Hydrate for MediaFile {
    fn hydrate(&mut self, record: &RawRecord) -> Result<(), AttributeError> {
        assign(&mut self.id, key_field(record, "id")?);
        assign(&mut self.key, string_field(record, "key")?);
        assign(&mut self.duration, int_field(record, "duration")?);
        assign(&mut self.file, string_field(record, "file")?);
        assign(&mut self.size, int_field(record, "size")?);
        assign(&mut self.container, string_field(record, "container")?);
        Ok(())
    }
}
