use std::fmt;
use std::time::Duration;

/// An encoded audio payload (MP3) ready for playback or storage.
/// Clips are never edited in place; a new synthesis replaces the old clip.
#[derive(Clone, PartialEq)]
pub struct AudioClip {
    bytes: Vec<u8>,
    duration_hint: Option<Duration>,
}

impl AudioClip {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            duration_hint: None,
        }
    }

    pub fn with_duration_hint(bytes: Vec<u8>, duration: Duration) -> Self {
        Self {
            bytes,
            duration_hint: Some(duration),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn duration_hint(&self) -> Option<Duration> {
        self.duration_hint
    }
}

impl fmt::Debug for AudioClip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AudioClip")
            .field("bytes", &self.bytes.len())
            .field("duration_hint", &self.duration_hint)
            .finish()
    }
}
