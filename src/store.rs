use crate::clip::AudioClip;
use std::fs;
use std::io;
use std::path::Path;

/// Writes the clip's bytes verbatim to `path`, creating parent directories.
/// No partial-write recovery: on error the caller retries the whole save.
pub fn save(clip: &AudioClip, path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, clip.as_bytes())
}

/// Reads a previously saved clip back from disk.
pub fn load(path: &Path) -> io::Result<AudioClip> {
    Ok(AudioClip::new(fs::read(path)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_then_load_is_byte_identical() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("speech.mp3");
        let clip = AudioClip::new(vec![0xFF, 0xFB, 0x90, 0x00, 0x42, 0x13, 0x37]);

        save(&clip, &path).unwrap();
        let read_back = load(&path).unwrap();
        assert_eq!(read_back.as_bytes(), clip.as_bytes());
    }

    #[test]
    fn save_creates_missing_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/out/speech.mp3");
        let clip = AudioClip::new(vec![1, 2, 3]);

        save(&clip, &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn save_to_unwritable_path_fails() {
        let dir = tempdir().unwrap();
        // A directory at the target path makes the write fail on every platform.
        let path = dir.path().join("occupied");
        fs::create_dir(&path).unwrap();

        let clip = AudioClip::new(vec![1, 2, 3]);
        assert!(save(&clip, &path).is_err());
    }

    #[test]
    fn load_missing_file_fails() {
        let dir = tempdir().unwrap();
        assert!(load(&dir.path().join("nope.mp3")).is_err());
    }
}
