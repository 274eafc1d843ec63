use crate::clip::AudioClip;
use crate::config_loader::Settings;
use crate::error::PlaybackError;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use std::io::Cursor;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Playing,
    Paused,
    Stopped,
}

/// Audio output device abstraction. The controller drives the state machine;
/// implementations only move encoded bytes to the speakers. This keeps the
/// state logic testable without a sound card.
pub trait AudioSink {
    /// Prepares the sink for a new clip, discarding anything queued.
    /// Returns a duration hint when the clip header exposes one.
    fn load(&mut self, clip: &AudioClip) -> Result<Option<Duration>, PlaybackError>;
    /// Begins playing from `from`, stopping early at `until` when given.
    fn start(&mut self, from: Duration, until: Option<Duration>) -> Result<(), PlaybackError>;
    fn pause(&mut self);
    fn resume(&mut self);
    fn halt(&mut self);
    /// True once queued audio has fully drained.
    fn is_finished(&self) -> bool;
}

/// Owns the active clip and enforces the playback state machine:
/// Idle -load-> Stopped -play-> Playing -pause-> Paused -resume-> Playing,
/// stop from Playing/Paused back to Stopped with the position reset.
pub struct PlaybackController {
    sink: Box<dyn AudioSink>,
    state: PlaybackState,
    clip: Option<AudioClip>,
    duration: Option<Duration>,
    /// Position at the last start/pause boundary. Wall-clock elapsed time is
    /// added while playing.
    base: Duration,
    started_at: Option<Instant>,
    section_end: Option<Duration>,
}

impl PlaybackController {
    pub fn new(sink: Box<dyn AudioSink>) -> Self {
        Self {
            sink,
            state: PlaybackState::Idle,
            clip: None,
            duration: None,
            base: Duration::ZERO,
            started_at: None,
            section_end: None,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn clip(&self) -> Option<&AudioClip> {
        self.clip.as_ref()
    }

    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    /// Takes ownership of a new clip, replacing any previous one. Valid from
    /// every state; playback position is discarded.
    pub fn load(&mut self, clip: AudioClip) -> Result<(), PlaybackError> {
        self.sink.halt();
        let hint = self.sink.load(&clip)?;
        self.duration = hint.or(clip.duration_hint());
        self.clip = Some(clip);
        self.reset_position();
        self.state = PlaybackState::Stopped;
        Ok(())
    }

    /// Starts playback from the current position. No-op while already
    /// playing; an error when no clip is loaded or while paused (use
    /// `resume` for that).
    pub fn play(&mut self) -> Result<(), PlaybackError> {
        match self.state {
            PlaybackState::Idle => Err(PlaybackError::NoClip),
            PlaybackState::Playing => Ok(()),
            PlaybackState::Paused => Err(PlaybackError::InvalidState {
                operation: "play",
                state: self.state,
            }),
            PlaybackState::Stopped => {
                self.sink.start(self.base, None)?;
                self.started_at = Some(Instant::now());
                self.state = PlaybackState::Playing;
                Ok(())
            }
        }
    }

    /// Valid only while playing; retains the position.
    pub fn pause(&mut self) -> Result<(), PlaybackError> {
        if self.state != PlaybackState::Playing {
            return Err(PlaybackError::InvalidState {
                operation: "pause",
                state: self.state,
            });
        }
        self.base = self.position();
        self.started_at = None;
        self.sink.pause();
        self.state = PlaybackState::Paused;
        Ok(())
    }

    /// Valid only while paused; continues from the retained position.
    pub fn resume(&mut self) -> Result<(), PlaybackError> {
        if self.state != PlaybackState::Paused {
            return Err(PlaybackError::InvalidState {
                operation: "resume",
                state: self.state,
            });
        }
        self.sink.resume();
        self.started_at = Some(Instant::now());
        self.state = PlaybackState::Playing;
        Ok(())
    }

    /// Valid from Playing/Paused (no-op from Stopped); resets the position
    /// to zero.
    pub fn stop(&mut self) -> Result<(), PlaybackError> {
        match self.state {
            PlaybackState::Idle => Err(PlaybackError::InvalidState {
                operation: "stop",
                state: self.state,
            }),
            PlaybackState::Stopped => Ok(()),
            PlaybackState::Playing | PlaybackState::Paused => {
                self.sink.halt();
                self.reset_position();
                self.state = PlaybackState::Stopped;
                Ok(())
            }
        }
    }

    /// Seeks to `start` and plays until `end` (or the end of the clip).
    /// Valid from any non-Idle state.
    pub fn replay_section(
        &mut self,
        start: Duration,
        end: Option<Duration>,
    ) -> Result<(), PlaybackError> {
        if self.state == PlaybackState::Idle {
            return Err(PlaybackError::NoClip);
        }
        if let Some(end) = end {
            if end <= start {
                return Err(PlaybackError::InvalidSection);
            }
        }
        self.sink.halt();
        self.sink.start(start, end)?;
        self.base = start;
        self.started_at = Some(Instant::now());
        self.section_end = end;
        self.state = PlaybackState::Playing;
        Ok(())
    }

    /// Current playback position. Zero when stopped, retained while paused.
    pub fn position(&self) -> Duration {
        let mut pos = self.base;
        if let Some(started_at) = self.started_at {
            pos += started_at.elapsed();
        }
        if let Some(end) = self.section_end {
            pos = pos.min(end);
        }
        if let Some(duration) = self.duration {
            pos = pos.min(duration);
        }
        pos
    }

    /// Observes the sink and applies the completion transition: a playing
    /// sink that has drained moves to Stopped with the position reset.
    /// The shell calls this from its wait loop.
    pub fn poll(&mut self) -> PlaybackState {
        if self.state == PlaybackState::Playing && self.sink.is_finished() {
            self.reset_position();
            self.state = PlaybackState::Stopped;
        }
        self.state
    }

    fn reset_position(&mut self) {
        self.base = Duration::ZERO;
        self.started_at = None;
        self.section_end = None;
    }
}

/// Production sink backed by rodio. The output stream must outlive every
/// sink created from its handle, so both are held here.
pub struct RodioSink {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    sink: Option<Sink>,
    bytes: Option<Vec<u8>>,
    volume: f32,
}

impl RodioSink {
    pub fn new(settings: &Settings) -> Result<Self, PlaybackError> {
        let (stream, handle) = OutputStream::try_default()
            .map_err(|e| PlaybackError::DeviceUnavailable(e.to_string()))?;
        Ok(Self {
            _stream: stream,
            handle,
            sink: None,
            bytes: None,
            volume: settings.playback_volume,
        })
    }

    fn decoder(bytes: Vec<u8>) -> Result<Decoder<Cursor<Vec<u8>>>, PlaybackError> {
        Decoder::new(Cursor::new(bytes)).map_err(|e| PlaybackError::Decode(e.to_string()))
    }
}

impl AudioSink for RodioSink {
    fn load(&mut self, clip: &AudioClip) -> Result<Option<Duration>, PlaybackError> {
        self.halt();
        // Probe decode up front so a corrupt payload fails at load, not play.
        let decoder = Self::decoder(clip.as_bytes().to_vec())?;
        let hint = decoder.total_duration();
        self.bytes = Some(clip.as_bytes().to_vec());
        Ok(hint)
    }

    fn start(&mut self, from: Duration, until: Option<Duration>) -> Result<(), PlaybackError> {
        let bytes = self.bytes.clone().ok_or(PlaybackError::NoClip)?;
        self.halt();

        let sink = Sink::try_new(&self.handle)
            .map_err(|e| PlaybackError::DeviceUnavailable(e.to_string()))?;
        sink.set_volume(self.volume);

        let source = Self::decoder(bytes)?.skip_duration(from);
        match until {
            Some(end) => sink.append(source.take_duration(end.saturating_sub(from))),
            None => sink.append(source),
        }
        sink.play();
        self.sink = Some(sink);
        Ok(())
    }

    fn pause(&mut self) {
        if let Some(sink) = &self.sink {
            sink.pause();
        }
    }

    fn resume(&mut self) {
        if let Some(sink) = &self.sink {
            sink.play();
        }
    }

    fn halt(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }

    fn is_finished(&self) -> bool {
        self.sink.as_ref().map(|s| s.empty()).unwrap_or(true)
    }
}
