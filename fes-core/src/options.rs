//! Core options exposed to the frontend.
use fes_libretro::{core_variables, sys::retro_variable};

pub const VIDEO_SOURCE_KEY: &str = "fes_video_source";
pub const AUDIO_SOURCE_KEY: &str = "fes_audio_source";

/// The first value of every entry is its default.
pub const CORE_VARIABLES: &[retro_variable] = &core_variables!(
    "fes_video_source" => "Video source; image|sprite",
    "fes_audio_source" => "Audio source; ogg|sine|off",
);

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum VideoSource {
    /// `test.png` from the asset directory.
    #[default]
    Image,
    Sprite,
}

impl VideoSource {
    pub fn from_value(value: &str) -> Option<Self> {
        match value {
            "image" => Some(Self::Image),
            "sprite" => Some(Self::Sprite),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum AudioSourceKind {
    /// `test.ogg` from the asset directory.
    #[default]
    Ogg,
    Sine,
    /// No source, the constant fallback sample is played.
    Off,
}

impl AudioSourceKind {
    pub fn from_value(value: &str) -> Option<Self> {
        match value {
            "ogg" => Some(Self::Ogg),
            "sine" => Some(Self::Sine),
            "off" => Some(Self::Off),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    pub video: VideoSource,
    pub audio: AudioSourceKind,
}

impl Options {
    /// Reads every option through `get`. Unset or unknown values keep the current
    /// setting.
    pub fn update(&mut self, get: impl Fn(&str) -> Option<String>) {
        if let Some(value) = get(VIDEO_SOURCE_KEY) {
            match VideoSource::from_value(&value) {
                Some(video) => self.video = video,
                None => log::warn!("Unknown {VIDEO_SOURCE_KEY} value {value:?}"),
            }
        }

        if let Some(value) = get(AUDIO_SOURCE_KEY) {
            match AudioSourceKind::from_value(&value) {
                Some(audio) => self.audio = audio,
                None => log::warn!("Unknown {AUDIO_SOURCE_KEY} value {value:?}"),
            }
        }
    }
}
