//! voxkit - text-to-speech from the command line
//!
//! Sends text to the OpenAI speech endpoint, saves the MP3, and optionally
//! plays it back.

use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use voxkit::client::SynthesisClient;
use voxkit::clip::AudioClip;
use voxkit::config_loader::Settings;
use voxkit::player::{PlaybackController, PlaybackState, RodioSink};
use voxkit::request::{Model, SpeechRequest, Voice};
use voxkit::store;

/// Convert text to speech with the OpenAI API
#[derive(Parser)]
#[command(name = "voxkit")]
#[command(version)]
#[command(about = "Convert text to speech, play it back, save it to disk", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Synthesize speech from text and save it as MP3
    Say {
        /// Text to synthesize (4096 characters max)
        text: String,
        /// Voice to use (alloy, echo, fable, onyx, nova, shimmer)
        #[arg(short, long)]
        voice: Option<String>,
        /// Speech speed, 0.25 to 4.0
        #[arg(short, long)]
        speed: Option<f32>,
        /// Model to use (tts-1 or tts-1-hd)
        #[arg(short, long)]
        model: Option<String>,
        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Play the audio after saving
        #[arg(short, long)]
        play: bool,
    },

    /// Play a previously saved audio file
    Play {
        /// Path to the audio file
        file: PathBuf,
        /// Start of the section to play, in seconds
        #[arg(long)]
        from: Option<f32>,
        /// End of the section to play, in seconds
        #[arg(long)]
        to: Option<f32>,
    },

    /// List supported voices
    Voices,
}

fn main() {
    let cli = Cli::parse();

    let settings = match Settings::new() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(cli.command, &settings) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(command: Commands, settings: &Settings) -> Result<(), Box<dyn Error>> {
    match command {
        Commands::Say {
            text,
            voice,
            speed,
            model,
            output,
            play,
        } => {
            let voice = voice.unwrap_or_else(|| settings.voice.clone());
            let speed = speed.unwrap_or(settings.speed);
            let model = Model::from_str(model.as_deref().unwrap_or(&settings.model))?;
            let request = SpeechRequest::build_with_model(&text, &voice, speed, model)?;

            println!(
                "Synthesizing {} characters ({}, {}, {:.2}x)...",
                request.text().chars().count(),
                request.model(),
                request.voice(),
                request.speed()
            );
            let client = SynthesisClient::new(settings)?;
            let clip = client.synthesize(&request)?;

            let output = output.unwrap_or_else(|| PathBuf::from(&settings.output_file));
            store::save(&clip, &output)?;
            println!("Saved {} bytes to {}", clip.len(), output.display());

            if play {
                play_clip(settings, clip, None, None)?;
            }
            Ok(())
        }

        Commands::Play { file, from, to } => {
            let clip = store::load(&file)?;
            println!("Playing {} ({} bytes)", file.display(), clip.len());
            play_clip(settings, clip, from, to)
        }

        Commands::Voices => {
            for voice in Voice::all() {
                println!("{}", voice);
            }
            Ok(())
        }
    }
}

/// Loads the clip and blocks until playback completes, polling the
/// controller every 50 ms.
fn play_clip(
    settings: &Settings,
    clip: AudioClip,
    from: Option<f32>,
    to: Option<f32>,
) -> Result<(), Box<dyn Error>> {
    if !settings.enable_audio {
        println!("Audio disabled; skipping playback");
        return Ok(());
    }

    let sink = RodioSink::new(settings)?;
    let mut player = PlaybackController::new(Box::new(sink));
    player.load(clip)?;

    if from.is_some() || to.is_some() {
        let start = Duration::from_secs_f32(from.unwrap_or(0.0));
        player.replay_section(start, to.map(Duration::from_secs_f32))?;
    } else {
        player.play()?;
    }

    while player.poll() == PlaybackState::Playing {
        std::thread::sleep(Duration::from_millis(50));
    }
    println!("Playback finished");
    Ok(())
}
