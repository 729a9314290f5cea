use color_eyre::Result;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source, source::Buffered};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::config::ASSET_DIR;
use crate::session::SoundCue;

type Sound = Buffered<Decoder<BufReader<File>>>;

const EFFECT_VOLUME: f32 = 0.05;
const MUSIC_VOLUME: f32 = 0.1;

/// Audio manager for sound effects and background music. Any sound that fails
/// to load is skipped, the game just plays without it.
pub struct AudioManager {
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
    laser: Option<Sound>,
    bullet: Option<Sound>,
    explosion: Option<Sound>,
    music: Option<Sink>,
}

impl AudioManager {
    /// Opens the default output device and pre-loads every sound.
    pub fn new() -> Result<Self> {
        let (stream, stream_handle) = OutputStream::try_default()?;
        let mut audio = Self {
            _stream: stream,
            stream_handle,
            laser: load_sound(&sound_path("laser.wav")),
            bullet: load_sound(&sound_path("bullet.wav")),
            explosion: load_sound(&sound_path("explosion.wav")),
            music: None,
        };
        audio.music = audio.start_music(&sound_path("music.mp3"));
        Ok(audio)
    }

    pub fn play(&self, cue: SoundCue) {
        let sound = match cue {
            SoundCue::Laser => &self.laser,
            SoundCue::Bullet => &self.bullet,
            SoundCue::Explosion => &self.explosion,
        };
        let Some(sound) = sound else {
            return;
        };
        // Playback errors are not worth stopping the game for
        if let Ok(sink) = Sink::try_new(&self.stream_handle) {
            sink.set_volume(EFFECT_VOLUME);
            // Cloning a buffered source only clones references
            sink.append(sound.clone());
            sink.detach();
        }
    }

    fn start_music(&self, path: &Path) -> Option<Sink> {
        let source = File::open(path)
            .map_err(color_eyre::Report::from)
            .and_then(|file| Ok(Decoder::new(BufReader::new(file))?));
        let source = match source {
            Ok(source) => source,
            Err(err) => {
                warn!(path = %path.display(), %err, "music unavailable");
                return None;
            }
        };
        let sink = match Sink::try_new(&self.stream_handle) {
            Ok(sink) => sink,
            Err(err) => {
                warn!(%err, "cannot open music sink");
                return None;
            }
        };
        sink.set_volume(MUSIC_VOLUME);
        sink.append(source.repeat_infinite());
        Some(sink)
    }

    pub fn stop(&mut self) {
        if let Some(music) = self.music.take() {
            music.stop();
        }
    }
}

impl Drop for AudioManager {
    fn drop(&mut self) {
        self.stop();
    }
}

fn sound_path(file: &str) -> PathBuf {
    Path::new(ASSET_DIR).join("sounds").join(file)
}

fn load_sound(path: &Path) -> Option<Sound> {
    let loaded = File::open(path)
        .map_err(color_eyre::Report::from)
        .and_then(|file| Ok(Decoder::new(BufReader::new(file))?.buffered()));
    match loaded {
        Ok(sound) => {
            debug!(path = %path.display(), "sound loaded");
            Some(sound)
        }
        Err(err) => {
            warn!(path = %path.display(), %err, "sound unavailable");
            None
        }
    }
}
