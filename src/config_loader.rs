use config::{Config, File};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub api_url: String,
    pub model: String,
    pub voice: String,
    pub speed: f32,
    pub output_file: String,
    pub request_timeout_secs: u64,
    pub playback_volume: f32,
    pub enable_audio: bool,
    /// Filled from the OPENAI_API_KEY environment variable after load,
    /// never from config files.
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: "https://api.openai.com/v1".to_string(),
            model: "tts-1".to_string(),
            voice: "alloy".to_string(),
            speed: 1.0,
            output_file: "speech_output.mp3".to_string(),
            request_timeout_secs: 30,
            playback_volume: 1.0,
            enable_audio: true,
            api_key: None,
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, config::ConfigError> {
        let user_config = dirs::config_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("voxkit/Voxkit");

        let builder = Config::builder()
            .set_default("api_url", "https://api.openai.com/v1")?
            .set_default("model", "tts-1")?
            .set_default("voice", "alloy")?
            .set_default("speed", 1.0)?
            .set_default("output_file", "speech_output.mp3")?
            .set_default("request_timeout_secs", 30)?
            .set_default("playback_volume", 1.0)?
            .set_default("enable_audio", true)?
            // Merge with local config file (if exists)
            .add_source(File::with_name("Voxkit").required(false))
            .add_source(File::from(user_config).required(false))
            // Merge with environment variables (e.g. VOXKIT_API_URL)
            .add_source(config::Environment::with_prefix("VOXKIT"));

        let mut settings: Settings = builder.build()?.try_deserialize()?;
        settings.api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|k| !k.is_empty());
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.playback_volume < 0.0 || self.playback_volume > 1.0 {
            return Err(config::ConfigError::Message(format!(
                "Invalid playback_volume: {}. Must be between 0.0 and 1.0",
                self.playback_volume
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(config::ConfigError::Message(
                "request_timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.api_url.is_empty() {
            return Err(config::ConfigError::Message(
                "api_url must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
