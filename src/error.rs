use std::path::PathBuf;

use thiserror::Error;

/// rejected countdown input; the countdown stays idle
#[derive(Debug, Error)]
pub enum TimerError {
    #[error("`{0}` is not a positive whole number")]
    InvalidInput(String),
}

/// anything that can go wrong between expiry and sound coming out of a
/// speaker; reported to the user, never fatal
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("couldn't open sound file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("couldn't decode sound file {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },
    #[error("couldn't enumerate audio devices: {0}")]
    Devices(#[from] rodio::DevicesError),
    #[error("audio device {0} is no longer available")]
    DeviceUnavailable(usize),
    #[error("couldn't open audio stream: {0}")]
    Stream(#[from] rodio::StreamError),
    #[error("couldn't start playback: {0}")]
    Play(#[from] rodio::PlayError),
}
