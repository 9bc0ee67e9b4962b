#![allow(dead_code)]

use std::collections::HashMap;

use space_invaders::assets::{
    AssetError, AssetLoader, BACKGROUND_TEXTURE, ENEMY_TEXTURE, FONT, GAME_OVER_SOUND, HIT_SOUND,
    MUSIC, PLAYER_TEXTURE, POWER_UP_TEXTURE, SHOOT_SOUND,
};
use space_invaders::assets::SessionAssets;
use space_invaders::audio::AudioSink;
use space_invaders::entities::{Size, SoundCue, SpriteSizes};

/// Minimal PNG prefix: signature + IHDR carrying the given dimensions.
pub fn png(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = vec![0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];
    bytes.extend_from_slice(&13u32.to_be_bytes());
    bytes.extend_from_slice(b"IHDR");
    bytes.extend_from_slice(&width.to_be_bytes());
    bytes.extend_from_slice(&height.to_be_bytes());
    bytes.extend_from_slice(&[8, 6, 0, 0, 0]);
    bytes
}

/// Asset loader backed by a map of name → bytes.
#[derive(Default)]
pub struct MemLoader {
    pub files: HashMap<String, Vec<u8>>,
}

impl MemLoader {
    /// Every asset the game asks for, with distinct texture sizes.
    pub fn complete() -> Self {
        let mut files = HashMap::new();
        files.insert(PLAYER_TEXTURE.to_string(), png(50, 30));
        files.insert(ENEMY_TEXTURE.to_string(), png(40, 30));
        files.insert(POWER_UP_TEXTURE.to_string(), png(20, 20));
        files.insert(BACKGROUND_TEXTURE.to_string(), png(800, 600));
        for name in [SHOOT_SOUND, HIT_SOUND, GAME_OVER_SOUND, MUSIC, FONT] {
            files.insert(name.to_string(), name.as_bytes().to_vec());
        }
        MemLoader { files }
    }

    pub fn without(mut self, name: &str) -> Self {
        self.files.remove(name);
        self
    }
}

impl AssetLoader for MemLoader {
    fn read(&self, name: &str) -> Result<Vec<u8>, AssetError> {
        self.files.get(name).cloned().ok_or_else(|| AssetError::Read {
            path: name.to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum AudioEvent {
    Bind,
    Play(SoundCue),
    StartMusic,
    StopMusic,
}

/// Records every call for later inspection.
#[derive(Default)]
pub struct RecordingAudio {
    pub events: Vec<AudioEvent>,
}

impl AudioSink for RecordingAudio {
    fn bind(&mut self, _assets: &SessionAssets) {
        self.events.push(AudioEvent::Bind);
    }

    fn play(&mut self, cue: SoundCue) {
        self.events.push(AudioEvent::Play(cue));
    }

    fn start_music(&mut self) {
        self.events.push(AudioEvent::StartMusic);
    }

    fn stop_music(&mut self) {
        self.events.push(AudioEvent::StopMusic);
    }
}

/// Same sizes `MemLoader::complete` hands out.
pub fn sizes() -> SpriteSizes {
    SpriteSizes {
        player: Size { w: 50.0, h: 30.0 },
        enemy: Size { w: 40.0, h: 30.0 },
        power_up: Size { w: 20.0, h: 20.0 },
    }
}
