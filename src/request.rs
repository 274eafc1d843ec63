use crate::error::ValidationError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Character limit enforced by the OpenAI speech endpoint.
pub const MAX_TEXT_CHARS: usize = 4096;
/// Speed bounds accepted by the provider. Both boundaries are valid.
pub const MIN_SPEED: f32 = 0.25;
pub const MAX_SPEED: f32 = 4.0;

/// Synthesis voices offered by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Voice {
    Alloy,
    Echo,
    Fable,
    Onyx,
    Nova,
    Shimmer,
}

impl Voice {
    pub fn all() -> &'static [Voice] {
        &[
            Voice::Alloy,
            Voice::Echo,
            Voice::Fable,
            Voice::Onyx,
            Voice::Nova,
            Voice::Shimmer,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Voice::Alloy => "alloy",
            Voice::Echo => "echo",
            Voice::Fable => "fable",
            Voice::Onyx => "onyx",
            Voice::Nova => "nova",
            Voice::Shimmer => "shimmer",
        }
    }
}

impl fmt::Display for Voice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Voice {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "alloy" => Ok(Voice::Alloy),
            "echo" => Ok(Voice::Echo),
            "fable" => Ok(Voice::Fable),
            "onyx" => Ok(Voice::Onyx),
            "nova" => Ok(Voice::Nova),
            "shimmer" => Ok(Voice::Shimmer),
            other => Err(ValidationError::UnknownVoice {
                name: other.to_string(),
            }),
        }
    }
}

/// Synthesis models. `Standard` is cheaper, `HighDefinition` is higher quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Model {
    #[serde(rename = "tts-1")]
    Standard,
    #[serde(rename = "tts-1-hd")]
    HighDefinition,
}

impl Model {
    pub fn as_str(&self) -> &'static str {
        match self {
            Model::Standard => "tts-1",
            Model::HighDefinition => "tts-1-hd",
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Model {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tts-1" => Ok(Model::Standard),
            "tts-1-hd" => Ok(Model::HighDefinition),
            other => Err(ValidationError::UnknownModel {
                name: other.to_string(),
            }),
        }
    }
}

/// A validated, immutable speech-synthesis request. Serializes directly into
/// the JSON body expected by the `/audio/speech` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeechRequest {
    model: Model,
    input: String,
    voice: Voice,
    speed: f32,
    response_format: &'static str,
}

impl SpeechRequest {
    /// Validates and builds a request against the default model (tts-1).
    /// Fails on empty or overlong text, an unknown voice name, or a speed
    /// outside [0.25, 4.0].
    pub fn build(text: &str, voice: &str, speed: f32) -> Result<Self, ValidationError> {
        Self::build_with_model(text, voice, speed, Model::Standard)
    }

    pub fn build_with_model(
        text: &str,
        voice: &str,
        speed: f32,
        model: Model,
    ) -> Result<Self, ValidationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyText);
        }
        let len = text.chars().count();
        if len > MAX_TEXT_CHARS {
            return Err(ValidationError::TextTooLong { len });
        }
        let voice = Voice::from_str(voice)?;
        if !speed.is_finite() || !(MIN_SPEED..=MAX_SPEED).contains(&speed) {
            return Err(ValidationError::SpeedOutOfRange { speed });
        }

        Ok(Self {
            model,
            input: text.to_string(),
            voice,
            speed,
            response_format: "mp3",
        })
    }

    pub fn text(&self) -> &str {
        &self.input
    }

    pub fn voice(&self) -> Voice {
        self.voice
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn model(&self) -> Model {
        self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn builds_with_exact_fields() {
        let req = SpeechRequest::build("Hello world", "alloy", 1.0).unwrap();
        assert_eq!(req.text(), "Hello world");
        assert_eq!(req.voice(), Voice::Alloy);
        assert_eq!(req.speed(), 1.0);
        assert_eq!(req.model(), Model::Standard);
    }

    #[test]
    fn rejects_empty_text() {
        assert_eq!(
            SpeechRequest::build("", "alloy", 1.0),
            Err(ValidationError::EmptyText)
        );
        // Whitespace-only counts as empty.
        assert_eq!(
            SpeechRequest::build("   \n", "alloy", 1.0),
            Err(ValidationError::EmptyText)
        );
    }

    #[test]
    fn enforces_character_limit() {
        let at_limit = "a".repeat(MAX_TEXT_CHARS);
        assert!(SpeechRequest::build(&at_limit, "nova", 1.0).is_ok());

        let over = "a".repeat(MAX_TEXT_CHARS + 1);
        assert_eq!(
            SpeechRequest::build(&over, "nova", 1.0),
            Err(ValidationError::TextTooLong {
                len: MAX_TEXT_CHARS + 1
            })
        );
    }

    #[test]
    fn rejects_unknown_voice() {
        let err = SpeechRequest::build("hi", "microwave", 1.0).unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnknownVoice {
                name: "microwave".to_string()
            }
        );
    }

    #[test]
    fn speed_boundaries_are_accepted() {
        assert!(SpeechRequest::build("hi", "echo", MIN_SPEED).is_ok());
        assert!(SpeechRequest::build("hi", "echo", MAX_SPEED).is_ok());
        assert!(SpeechRequest::build("hi", "echo", 0.24).is_err());
        assert!(SpeechRequest::build("hi", "echo", 4.01).is_err());
        assert!(SpeechRequest::build("hi", "echo", f32::NAN).is_err());
    }

    #[test]
    fn serializes_provider_wire_names() {
        let req =
            SpeechRequest::build_with_model("hi", "shimmer", 1.5, Model::HighDefinition).unwrap();
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["model"], "tts-1-hd");
        assert_eq!(json["voice"], "shimmer");
        assert_eq!(json["input"], "hi");
        assert_eq!(json["response_format"], "mp3");
    }

    #[test]
    fn voice_round_trips_through_strings() {
        for v in Voice::all() {
            assert_eq!(Voice::from_str(v.as_str()).unwrap(), *v);
        }
    }

    proptest! {
        #[test]
        fn out_of_range_speeds_are_rejected(speed in prop_oneof![-10.0f32..0.25, 4.0001f32..100.0]) {
            prop_assert!(SpeechRequest::build("hi", "alloy", speed).is_err());
        }

        #[test]
        fn in_range_speeds_are_preserved(speed in 0.25f32..=4.0) {
            let req = SpeechRequest::build("hi", "alloy", speed).unwrap();
            prop_assert_eq!(req.speed(), speed);
        }

        #[test]
        fn valid_text_is_preserved(text in "[a-zA-Z0-9 ]{1,200}") {
            prop_assume!(!text.trim().is_empty());
            let req = SpeechRequest::build(&text, "fable", 1.0).unwrap();
            prop_assert_eq!(req.text(), text.trim());
        }
    }
}
