use std::{error::Error, path::PathBuf, sync::mpsc, thread};

use clap::{command, Parser, Subcommand};
use countdown_timer::{
    audio::{self, OutputDevices, SystemDevices},
    communication::Message,
    config::Config,
    TimerApp,
};
use eframe::{egui::ViewportBuilder, run_native};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// alarm sound played when the countdown expires
    #[clap(long, default_value = "resources/Alarm-ringtone.mp3")]
    sound: PathBuf,
    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// list the available audio output device names
    Devices,
}

fn main() -> Result<(), Box<dyn Error>> {
    // initialize the logger
    simple_file_logger::init_logger!("countdown_timer").expect("couldn't initialize logger");

    let args = Args::parse();
    if let Some(Command::Devices) = args.command {
        for name in SystemDevices.device_names() {
            println!("{name}");
        }
        return Ok(());
    }

    let (tx, rx) = mpsc::channel();
    let (error_tx, error_rx) = mpsc::channel();
    // playback blocks for the alarm duration, so it runs off the gui
    // thread; the gui polls error_rx once per frame
    thread::spawn(move || {
        while let Ok(Message::Play {
            device_id,
            sound_path,
            duration,
        }) = rx.recv()
        {
            if let Err(err) = audio::play(device_id, &sound_path, duration) {
                log::error!("alarm playback failed: {err}");
                if error_tx.send(err).is_err() {
                    break;
                }
            }
        }
    });

    let native_options = eframe::NativeOptions {
        viewport: ViewportBuilder::default().with_inner_size([260.0, 120.0]),
        ..Default::default()
    };
    let config = Config::load(&Config::config_path());
    // run the gui
    run_native(
        "Countdown",
        native_options,
        Box::new(move |_| {
            Ok(Box::new(TimerApp::new(
                &SystemDevices,
                &config,
                args.sound,
                tx,
                error_rx,
            )))
        }),
    )
    .map_err(Into::into)
}
