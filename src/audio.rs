//! Audio adapter
//!
//! Fire-and-forget sound effects. Clips are decoded once at load; a clip that
//! is missing or fails to decode disables that effect and the game keeps
//! running in silence. Device output needs the `playback` feature.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rodio::source::Buffered;
use rodio::{Decoder, Source};

use crate::sim::GameEvent;

/// A decoded clip that can be replayed cheaply
type Clip = Buffered<Decoder<BufReader<File>>>;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player shot or missile launched
    Shoot,
    /// Ship destroyed
    GameOver,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 2] = [SoundEffect::Shoot, SoundEffect::GameOver];

    /// Clip file name inside the asset directory
    pub fn file_name(&self) -> &'static str {
        match self {
            SoundEffect::Shoot => "shoot.wav",
            SoundEffect::GameOver => "game-over.wav",
        }
    }

    fn index(&self) -> usize {
        match self {
            SoundEffect::Shoot => 0,
            SoundEffect::GameOver => 1,
        }
    }
}

/// Anything that can play a sound effect
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);

    fn play_shoot(&mut self) {
        self.play(SoundEffect::Shoot);
    }

    fn play_game_over(&mut self) {
        self.play(SoundEffect::GameOver);
    }
}

/// Play the sounds implied by one tick's events
pub fn play_events(sink: &mut impl AudioSink, events: &[GameEvent]) {
    for event in events {
        match event {
            GameEvent::ShotFired | GameEvent::MissileFired => sink.play_shoot(),
            GameEvent::GameOver => sink.play_game_over(),
            _ => {}
        }
    }
}

fn decode_clip(path: &Path) -> Result<Clip, String> {
    let file = File::open(path).map_err(|e| format!("cannot open {}: {}", path.display(), e))?;
    let decoder =
        Decoder::try_from(file).map_err(|e| format!("cannot decode {}: {}", path.display(), e))?;
    log::debug!(
        "Decoded {} ({} Hz, {} channels)",
        path.display(),
        decoder.sample_rate(),
        decoder.channels()
    );
    Ok(decoder.buffered())
}

#[cfg(feature = "playback")]
fn open_output() -> Option<rodio::OutputStream> {
    match rodio::OutputStreamBuilder::open_default_stream() {
        Ok(mut stream) => {
            stream.log_on_drop(false);
            Some(stream)
        }
        Err(e) => {
            log::warn!("Failed to open audio output: {} - audio disabled", e);
            None
        }
    }
}

/// Audio manager for the game
pub struct AudioManager {
    #[cfg(feature = "playback")]
    output: Option<rodio::OutputStream>,
    clips: [Option<Clip>; 2],
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl AudioManager {
    /// Open the output device and decode every clip in `asset_dir`
    pub fn load(asset_dir: impl AsRef<Path>) -> Self {
        let dir = asset_dir.as_ref();
        let clips = SoundEffect::ALL.map(|effect| match decode_clip(&dir.join(effect.file_name())) {
            Ok(clip) => Some(clip),
            Err(e) => {
                log::warn!("{} - {:?} disabled", e, effect);
                None
            }
        });

        #[cfg(not(feature = "playback"))]
        log::info!("Built without the playback feature - sounds are decoded but not output");

        Self {
            #[cfg(feature = "playback")]
            output: open_output(),
            clips,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    pub fn is_available(&self, effect: SoundEffect) -> bool {
        self.clips[effect.index()].is_some()
    }

    #[cfg(feature = "playback")]
    fn output(&self, clip: Clip, vol: f32) {
        let Some(stream) = &self.output else { return };
        let sink = rodio::Sink::connect_new(stream.mixer());
        sink.set_volume(vol);
        sink.append(clip);
        sink.detach();
    }

    #[cfg(not(feature = "playback"))]
    fn output(&self, _clip: Clip, _vol: f32) {}
}

impl AudioSink for AudioManager {
    fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let Some(clip) = &self.clips[effect.index()] else {
            return;
        };
        log::debug!("Playing {:?} at volume {:.2}", effect, vol);
        self.output(clip.clone(), vol);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::PowerUpKind;
    use std::fs;

    #[derive(Default)]
    struct Recorder(Vec<SoundEffect>);

    impl AudioSink for Recorder {
        fn play(&mut self, effect: SoundEffect) {
            self.0.push(effect);
        }
    }

    fn temp_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "astro-shooter-audio-{}-{}",
            name,
            std::process::id()
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// 16-bit mono PCM, 8 kHz
    fn wav_bytes(samples: &[i16]) -> Vec<u8> {
        let data_len = (samples.len() * 2) as u32;
        let mut out = Vec::new();
        out.extend_from_slice(b"RIFF");
        out.extend_from_slice(&(36 + data_len).to_le_bytes());
        out.extend_from_slice(b"WAVEfmt ");
        out.extend_from_slice(&16u32.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&8000u32.to_le_bytes());
        out.extend_from_slice(&16000u32.to_le_bytes());
        out.extend_from_slice(&2u16.to_le_bytes());
        out.extend_from_slice(&16u16.to_le_bytes());
        out.extend_from_slice(b"data");
        out.extend_from_slice(&data_len.to_le_bytes());
        for s in samples {
            out.extend_from_slice(&s.to_le_bytes());
        }
        out
    }

    #[test]
    fn test_events_map_to_sounds() {
        let mut rec = Recorder::default();
        play_events(
            &mut rec,
            &[
                GameEvent::ShotFired,
                GameEvent::PowerUpCollected(PowerUpKind::Nuke),
                GameEvent::MissileFired,
                GameEvent::GameOver,
                GameEvent::Victory,
            ],
        );
        assert_eq!(
            rec.0,
            vec![SoundEffect::Shoot, SoundEffect::Shoot, SoundEffect::GameOver]
        );
    }

    #[test]
    fn test_missing_assets_degrade_silently() {
        let mut audio = AudioManager::load(temp_dir("missing").join("nope"));
        assert!(!audio.is_available(SoundEffect::Shoot));
        assert!(!audio.is_available(SoundEffect::GameOver));
        audio.play_shoot();
        audio.play_game_over();
    }

    #[test]
    fn test_undecodable_clip_disables_effect() {
        let dir = temp_dir("decode");
        let tone: Vec<i16> = (0..800).map(|i| ((i % 40) as i16 - 20) * 500).collect();
        fs::write(dir.join("shoot.wav"), wav_bytes(&tone)).unwrap();
        fs::write(dir.join("game-over.wav"), b"RIFF\x24\x00\x00\x00WAVEfmt ").unwrap();

        let mut audio = AudioManager::load(&dir);
        assert!(audio.is_available(SoundEffect::Shoot));
        assert!(!audio.is_available(SoundEffect::GameOver));

        audio.play_shoot();
        audio.play_game_over();
        audio.set_muted(true);
        audio.play_shoot();

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_volume_clamped() {
        let mut audio = AudioManager::load(temp_dir("volume"));
        audio.set_master_volume(2.0);
        audio.set_sfx_volume(-1.0);
        assert_eq!(audio.effective_volume(), 0.0);
        audio.set_sfx_volume(0.5);
        assert_eq!(audio.effective_volume(), 0.5);
        audio.set_muted(true);
        assert_eq!(audio.effective_volume(), 0.0);
    }
}
