//! Asset loading: the only place the game touches the filesystem.
//!
//! All assets are fixed filenames looked up under one root directory.
//! Textures must be PNG files; only their pixel dimensions are used, to
//! size the sprites.  Sounds, music and the font are kept as raw bytes for
//! whichever audio/text backend wants them.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::entities::{Size, SoundCue, SpriteSizes};

// ── Fixed asset names ─────────────────────────────────────────────────────────

pub const PLAYER_TEXTURE: &str = "player.png";
pub const ENEMY_TEXTURE: &str = "enemy.png";
pub const POWER_UP_TEXTURE: &str = "powerup.png";
pub const BACKGROUND_TEXTURE: &str = "background.png";
pub const SHOOT_SOUND: &str = "shoot.mp3";
pub const HIT_SOUND: &str = "hit.mp3";
pub const GAME_OVER_SOUND: &str = "gameover.mp3";
pub const MUSIC: &str = "music.mp3";
pub const FONT: &str = "alien.ttf";

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("failed to read asset '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("asset '{path}' is not a PNG image")]
    NotPng { path: String },

    #[error("asset '{path}' is truncated ({len} bytes)")]
    Truncated { path: String, len: usize },

    #[error("asset '{path}' is empty")]
    Empty { path: String },
}

// ── Loaded assets ─────────────────────────────────────────────────────────────

/// A texture, reduced to what the game needs from it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Texture {
    pub width: u32,
    pub height: u32,
}

impl Texture {
    /// Read the dimensions out of the IHDR chunk that every PNG starts with.
    pub fn from_png(path: &str, bytes: &[u8]) -> Result<Self, AssetError> {
        if bytes.len() < PNG_SIGNATURE.len() || bytes[..8] != PNG_SIGNATURE {
            return Err(AssetError::NotPng {
                path: path.to_string(),
            });
        }
        if bytes.len() < 24 {
            return Err(AssetError::Truncated {
                path: path.to_string(),
                len: bytes.len(),
            });
        }
        if &bytes[12..16] != b"IHDR" {
            return Err(AssetError::NotPng {
                path: path.to_string(),
            });
        }
        let width = u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]);
        let height = u32::from_be_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]);
        Ok(Texture { width, height })
    }

    pub fn size(&self) -> Size {
        Size {
            w: self.width as f32,
            h: self.height as f32,
        }
    }
}

/// Encoded audio (sound effect or music track), shared cheaply between
/// plays.
#[derive(Clone, Debug)]
pub struct AudioClip {
    pub name: String,
    pub data: Arc<[u8]>,
}

#[derive(Clone, Debug)]
pub struct Font {
    pub data: Arc<[u8]>,
}

// ── Loader ────────────────────────────────────────────────────────────────────

/// Source of asset bytes.  Implementors only provide `read`; the typed
/// loaders validate on top of it.
pub trait AssetLoader {
    fn read(&self, name: &str) -> Result<Vec<u8>, AssetError>;

    fn load_texture(&self, name: &str) -> Result<Texture, AssetError> {
        let bytes = self.read(name)?;
        let texture = Texture::from_png(name, &bytes)?;
        tracing::debug!(name, width = texture.width, height = texture.height, "texture loaded");
        Ok(texture)
    }

    fn load_sound(&self, name: &str) -> Result<AudioClip, AssetError> {
        let data = non_empty(name, self.read(name)?)?;
        tracing::debug!(name, bytes = data.len(), "sound loaded");
        Ok(AudioClip {
            name: name.to_string(),
            data: data.into(),
        })
    }

    fn load_music(&self, name: &str) -> Result<AudioClip, AssetError> {
        let data = non_empty(name, self.read(name)?)?;
        tracing::debug!(name, bytes = data.len(), "music loaded");
        Ok(AudioClip {
            name: name.to_string(),
            data: data.into(),
        })
    }

    fn load_font(&self, name: &str) -> Result<Font, AssetError> {
        let data = non_empty(name, self.read(name)?)?;
        tracing::debug!(name, bytes = data.len(), "font loaded");
        Ok(Font { data: data.into() })
    }
}

fn non_empty(name: &str, data: Vec<u8>) -> Result<Vec<u8>, AssetError> {
    if data.is_empty() {
        return Err(AssetError::Empty {
            path: name.to_string(),
        });
    }
    Ok(data)
}

/// Reads assets from a directory on disk.
#[derive(Clone, Debug)]
pub struct DirAssetLoader {
    root: PathBuf,
}

impl DirAssetLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirAssetLoader { root: root.into() }
    }
}

impl AssetLoader for DirAssetLoader {
    fn read(&self, name: &str) -> Result<Vec<u8>, AssetError> {
        let path = self.root.join(name);
        std::fs::read(&path).map_err(|source| AssetError::Read {
            path: path.display().to_string(),
            source,
        })
    }
}

// ── Per-session bundle ────────────────────────────────────────────────────────

/// Everything a play session needs, loaded afresh each time play starts.
#[derive(Clone, Debug)]
pub struct SessionAssets {
    pub player: Texture,
    pub enemy: Texture,
    pub power_up: Texture,
    pub background: Texture,
    pub shoot: AudioClip,
    pub hit: AudioClip,
    pub game_over: AudioClip,
    pub music: AudioClip,
}

impl SessionAssets {
    /// Load textures, then sounds, then music.  The first failure wins.
    pub fn load(loader: &impl AssetLoader) -> Result<Self, AssetError> {
        Ok(SessionAssets {
            player: loader.load_texture(PLAYER_TEXTURE)?,
            enemy: loader.load_texture(ENEMY_TEXTURE)?,
            power_up: loader.load_texture(POWER_UP_TEXTURE)?,
            background: loader.load_texture(BACKGROUND_TEXTURE)?,
            shoot: loader.load_sound(SHOOT_SOUND)?,
            hit: loader.load_sound(HIT_SOUND)?,
            game_over: loader.load_sound(GAME_OVER_SOUND)?,
            music: loader.load_music(MUSIC)?,
        })
    }

    pub fn sprite_sizes(&self) -> SpriteSizes {
        SpriteSizes {
            player: self.player.size(),
            enemy: self.enemy.size(),
            power_up: self.power_up.size(),
        }
    }

    pub fn sound(&self, cue: SoundCue) -> &AudioClip {
        match cue {
            SoundCue::Shoot => &self.shoot,
            SoundCue::Hit => &self.hit,
            SoundCue::GameOver => &self.game_over,
        }
    }
}
