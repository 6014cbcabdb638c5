use std::{fs::File, io::BufReader, path::Path, thread, time::Duration};

use rodio::{cpal::traits::HostTrait, Decoder, DeviceTrait, OutputStream, Sink};

use crate::error::PlaybackError;

/// WinMM truncates reported device names to 31 characters, so a config
/// written on such a platform may hold a cut-off name; comparing both
/// sides truncated keeps those configs usable. Other platforms don't
/// truncate, in which case this limit is simply never reached.
pub const DEVICE_NAME_LIMIT: usize = 31;

/// seam over device enumeration so name matching is testable against a
/// fixed list
pub trait OutputDevices {
    /// names of the output devices, in enumeration order; that order is
    /// stable for the lifetime of the process and doubles as the device id
    fn device_names(&self) -> Vec<String>;
}

/// the default cpal host
pub struct SystemDevices;

impl OutputDevices for SystemDevices {
    fn device_names(&self) -> Vec<String> {
        match rodio::cpal::default_host().output_devices() {
            Ok(devices) => devices.filter_map(|device| device.name().ok()).collect(),
            Err(err) => {
                log::warn!("couldn't enumerate output devices: {err}");
                vec![]
            }
        }
    }
}

fn match_key(name: &str) -> String {
    name.chars()
        .take(DEVICE_NAME_LIMIT)
        .collect::<String>()
        .to_lowercase()
}

/// finds the positional index of the device called `name`, comparing
/// case-insensitively on the first [`DEVICE_NAME_LIMIT`] characters
///
/// `None` means "use the system default": either `name` was empty (no
/// device configured) or nothing matched; the caller decides whether a
/// miss is worth reporting
#[must_use]
pub fn resolve_device_id(devices: &impl OutputDevices, name: &str) -> Option<usize> {
    if name.is_empty() {
        return None;
    }
    let wanted = match_key(name);
    devices
        .device_names()
        .iter()
        .position(|candidate| match_key(candidate) == wanted)
}

fn output_device(id: usize) -> Result<rodio::Device, PlaybackError> {
    rodio::cpal::default_host()
        .output_devices()?
        .nth(id)
        .ok_or(PlaybackError::DeviceUnavailable(id))
}

/// plays the sound at `path` on device `device_id` (system default when
/// `None`) for `duration`, then stops
///
/// blocks for `duration`, so call it from the playback thread, not the
/// gui thread; the stream, sink, and file handle are scoped to this
/// function and released on every path out of it
///
/// # Errors
/// `PlaybackError` if the file can't be opened or decoded, or the device
/// can't be opened
pub fn play(device_id: Option<usize>, path: &Path, duration: Duration) -> Result<(), PlaybackError> {
    let (_stream, handle) = match device_id {
        Some(id) => OutputStream::try_from_device(&output_device(id)?)?,
        None => OutputStream::try_default()?,
    };
    let file = File::open(path).map_err(|source| PlaybackError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let source = Decoder::new(BufReader::new(file)).map_err(|source| PlaybackError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let sink = Sink::try_new(&handle)?;
    sink.append(source);
    sink.play();
    thread::sleep(duration);
    sink.stop();
    Ok(())
}
