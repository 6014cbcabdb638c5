#![warn(clippy::pedantic, clippy::nursery, clippy::cargo)]
#![deny(clippy::use_self, rust_2018_idioms)]
#![allow(clippy::multiple_crate_versions, clippy::module_name_repetitions)]

use std::{
    path::PathBuf,
    sync::mpsc::{Receiver, Sender},
    time::Duration,
};

use chrono::Utc;
use eframe::egui::{self, CentralPanel, ComboBox, Context, TextEdit, ViewportCommand, Window};

use crate::{
    audio::{resolve_device_id, OutputDevices},
    communication::Message,
    config::Config,
    countdown::{format_remaining, Countdown, Tick, TimeUnit},
    error::PlaybackError,
};

pub mod audio;
pub mod communication;
pub mod config;
pub mod countdown;
pub mod error;

/// how long the alarm rings before playback is stopped
pub const ALARM_DURATION: Duration = Duration::from_millis(1500);

const INITIAL_TITLE: &str = "Countdown";

/// a user facing error, rendered as a modal window until dismissed
struct ErrorDialog {
    message: String,
}

/// when to evaluate again: every second while running, and once shortly
/// after the alarm finishes ringing so a playback failure waiting on the
/// error channel is picked up without user input
fn next_tick_delay(tick: Option<&Tick>) -> Option<Duration> {
    match tick {
        Some(Tick::Remaining(_)) => Some(Duration::from_secs(1)),
        Some(Tick::Expired) => Some(ALARM_DURATION + Duration::from_millis(100)),
        None => None,
    }
}

pub struct TimerApp {
    countdown: Countdown,
    amount: String,
    unit: TimeUnit,
    device_id: Option<usize>,
    sound_path: PathBuf,
    sender: Sender<Message>,
    playback_errors: Receiver<PlaybackError>,
    error: Option<ErrorDialog>,
    title: String,
}

impl TimerApp {
    /// resolves the configured device name against the enumerated devices
    ///
    /// an unset name silently means the system default, but a configured
    /// name that doesn't resolve is a typo or an unplugged device, so it
    /// is reported up front with every valid name listed
    #[must_use]
    pub fn new(
        devices: &impl OutputDevices,
        config: &Config,
        sound_path: PathBuf,
        sender: Sender<Message>,
        playback_errors: Receiver<PlaybackError>,
    ) -> Self {
        let mut error = None;
        let device_id = config.device_name.as_deref().and_then(|name| {
            let id = resolve_device_id(devices, name);
            if id.is_none() {
                log::warn!("configured device {name:?} not found");
                let names = devices.device_names().join("\n");
                error = Some(ErrorDialog {
                    message: format!(
                        "Invalid device name found at {}.\n\nThe available device names are:\n{names}",
                        Config::config_path().display()
                    ),
                });
            }
            id
        });
        Self {
            countdown: Countdown::default(),
            amount: String::new(),
            unit: TimeUnit::default(),
            device_id,
            sound_path,
            sender,
            playback_errors,
            error,
            title: INITIAL_TITLE.to_string(),
        }
    }

    /// the title to publish, only when it differs from the one already
    /// shown; publishing a viewport command forces a repaint, so sending
    /// an unchanged title every frame would keep the loop spinning
    fn sync_title(&mut self, remaining: Option<&str>) -> Option<String> {
        let title = remaining.map_or_else(
            || INITIAL_TITLE.to_string(),
            |remaining| format!("{INITIAL_TITLE} - {remaining}"),
        );
        if title == self.title {
            None
        } else {
            self.title = title.clone();
            Some(title)
        }
    }

    fn start(&mut self) {
        if let Err(err) = self.countdown.start(&self.amount, self.unit, Utc::now()) {
            self.error = Some(ErrorDialog {
                message: err.to_string(),
            });
        }
    }

    fn ring(&mut self) {
        log::info!("countdown expired, ringing alarm");
        let message = Message::Play {
            device_id: self.device_id,
            sound_path: self.sound_path.clone(),
            duration: ALARM_DURATION,
        };
        if self.sender.send(message).is_err() {
            log::error!("playback thread is gone");
            self.error = Some(ErrorDialog {
                message: "The alarm can't be played: the playback thread has shut down."
                    .to_string(),
            });
        }
    }

    fn render_input(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.add(
                TextEdit::singleline(&mut self.amount)
                    .desired_width(60.0)
                    .hint_text("amount"),
            );
            ComboBox::from_id_salt("unit")
                .selected_text(self.unit.to_string())
                .show_ui(ui, |ui| {
                    for unit in TimeUnit::ALL {
                        ui.selectable_value(&mut self.unit, unit, unit.to_string());
                    }
                });
        });
        if ui.button("Start").clicked() {
            self.start();
        }
    }

    fn render_error(&mut self, ctx: &Context) {
        let mut dismissed = false;
        if let Some(error) = &self.error {
            Window::new("Error").auto_sized().show(ctx, |ui| {
                ui.label(&error.message);
                if ui.button("ok").clicked() {
                    dismissed = true;
                }
            });
        }
        if dismissed {
            self.error = None;
        }
    }
}

impl eframe::App for TimerApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        if let Ok(err) = self.playback_errors.try_recv() {
            self.error = Some(ErrorDialog {
                message: err.to_string(),
            });
        }

        let tick = self.countdown.tick(Utc::now());
        if let Some(delay) = next_tick_delay(tick.as_ref()) {
            ctx.request_repaint_after(delay);
        }
        let remaining = match tick {
            Some(Tick::Remaining(remaining)) => Some(format_remaining(remaining)),
            Some(Tick::Expired) => {
                self.ring();
                None
            }
            None => None,
        };
        if let Some(title) = self.sync_title(remaining.as_deref()) {
            ctx.send_viewport_cmd(ViewportCommand::Title(title));
        }

        CentralPanel::default().show(ctx, |ui| {
            // the input controls are hidden while the countdown runs
            if let Some(remaining) = remaining {
                ui.heading(remaining);
                if ui.button("Stop").clicked() {
                    self.countdown.stop();
                }
            } else {
                self.render_input(ui);
            }
        });

        if self.error.is_some() {
            self.render_error(ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use super::*;

    struct FixedDevices(Vec<&'static str>);

    impl OutputDevices for FixedDevices {
        fn device_names(&self) -> Vec<String> {
            self.0.iter().map(ToString::to_string).collect()
        }
    }

    fn devices() -> FixedDevices {
        FixedDevices(vec!["Speakers", "Headphones"])
    }

    fn app(device_name: Option<&str>) -> TimerApp {
        let (sender, _commands) = mpsc::channel();
        let (_errors, playback_errors) = mpsc::channel();
        TimerApp::new(
            &devices(),
            &Config {
                device_name: device_name.map(String::from),
            },
            PathBuf::from("alarm.mp3"),
            sender,
            playback_errors,
        )
    }

    #[test]
    fn unset_device_name_means_default_without_error() {
        let app = app(None);
        assert_eq!(app.device_id, None);
        assert!(app.error.is_none());
    }

    #[test]
    fn configured_device_name_resolves_to_its_index() {
        let app = app(Some("headphones"));
        assert_eq!(app.device_id, Some(1));
        assert!(app.error.is_none());
    }

    #[test]
    fn unknown_device_name_reports_every_valid_name() {
        let app = app(Some("USB Microphone"));
        assert_eq!(app.device_id, None);
        let message = &app.error.as_ref().expect("expected an error dialog").message;
        assert!(message.contains("config.txt"));
        assert!(message.contains("Speakers"));
        assert!(message.contains("Headphones"));
    }

    #[test]
    fn misconfigured_device_does_not_block_the_countdown() {
        let mut app = app(Some("USB Microphone"));
        assert!(app.error.is_some());
        app.countdown
            .start("5", TimeUnit::Seconds, Utc::now())
            .unwrap();
        assert!(app.countdown.is_running());
    }

    #[test]
    fn title_is_published_only_on_change() {
        let mut app = app(None);
        // the window already carries the initial title
        assert_eq!(app.sync_title(None), None);
        assert_eq!(
            app.sync_title(Some("25:00")),
            Some("Countdown - 25:00".to_string())
        );
        assert_eq!(app.sync_title(Some("25:00")), None);
        assert_eq!(
            app.sync_title(Some("24:59")),
            Some("Countdown - 24:59".to_string())
        );
        assert_eq!(app.sync_title(None), Some("Countdown".to_string()));
        assert_eq!(app.sync_title(None), None);
    }

    #[test]
    fn idle_frames_schedule_no_repaint() {
        assert_eq!(next_tick_delay(None), None);
    }

    #[test]
    fn running_frames_schedule_the_one_second_tick() {
        assert_eq!(
            next_tick_delay(Some(&Tick::Remaining(chrono::Duration::minutes(1)))),
            Some(Duration::from_secs(1))
        );
    }

    #[test]
    fn expiry_schedules_a_poll_after_the_ring() {
        let delay = next_tick_delay(Some(&Tick::Expired)).unwrap();
        assert!(delay > ALARM_DURATION);
    }
}
