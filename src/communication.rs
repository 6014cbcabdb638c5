use std::{path::PathBuf, time::Duration};

/// messages from the gui to the playback thread
pub enum Message {
    /// ring the alarm once; fire and forget, failures come back on the
    /// playback error channel
    Play {
        device_id: Option<usize>,
        sound_path: PathBuf,
        duration: Duration,
    },
}
