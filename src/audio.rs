/// Fire-and-forget sound playback.  Clips are loaded once at startup and
/// decoded per play; a missing audio device or missing clip degrades to a
/// log line instead of an error, so the game runs fine silent.

use std::collections::HashMap;
use std::fs;
use std::io::Cursor;
use std::path::Path;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

use dodge_arena::events::SoundCue;

pub struct AudioManager {
    // The stream must stay alive for the handle to keep working.
    _stream: Option<OutputStream>,
    handle: Option<OutputStreamHandle>,
    clips: HashMap<SoundCue, Vec<u8>>,
    enabled: bool,
}

impl AudioManager {
    /// Open the default output device and load every cue's clip from
    /// `asset_dir` (`<stem>.wav` per cue).  Failures are logged and leave
    /// the manager silent for the affected cue or entirely.
    pub fn new(asset_dir: &Path) -> Self {
        let (stream, handle) = match OutputStream::try_default() {
            Ok((stream, handle)) => (Some(stream), Some(handle)),
            Err(err) => {
                log::warn!("audio output unavailable ({err}); continuing without sound");
                (None, None)
            }
        };

        let mut clips = HashMap::new();
        if handle.is_some() {
            for cue in SoundCue::ALL {
                let path = asset_dir.join(format!("{}.wav", cue.file_stem()));
                match fs::read(&path) {
                    Ok(bytes) => {
                        clips.insert(cue, bytes);
                    }
                    Err(err) => {
                        log::warn!("missing sound clip {}: {err}", path.display());
                    }
                }
            }
        }

        AudioManager {
            _stream: stream,
            handle,
            clips,
            enabled: true,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Play a cue on its own detached sink so overlapping cues mix freely.
    pub fn play(&self, cue: SoundCue) {
        if !self.enabled {
            return;
        }
        let Some(handle) = &self.handle else {
            return;
        };
        let Some(bytes) = self.clips.get(&cue) else {
            return;
        };
        let sink = match Sink::try_new(handle) {
            Ok(sink) => sink,
            Err(err) => {
                log::debug!("could not open audio sink: {err}");
                return;
            }
        };
        match Decoder::new(Cursor::new(bytes.clone())) {
            Ok(source) => {
                sink.append(source);
                sink.detach();
            }
            Err(err) => {
                log::warn!("undecodable clip for {:?}: {err}", cue);
            }
        }
    }
}
