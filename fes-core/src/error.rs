use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("could not read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("image decoding failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("audio decoding failed: {0}")]
    Audio(#[from] symphonia::core::errors::Error),

    #[error("no decodable audio track")]
    NoAudioTrack,
}
