//! Audio sink, the "play a sound" side of the game.
//!
//! The state controller only ever talks to `AudioSink`.  `SilentAudio`
//! swallows everything (logging at trace level); with the `audio` feature
//! `RodioAudio` decodes the loaded clips and plays them on the default
//! output device.

use crate::assets::SessionAssets;
use crate::entities::SoundCue;

pub trait AudioSink {
    /// Hand over the clips for a new session.  Called before `start_music`.
    fn bind(&mut self, assets: &SessionAssets);
    fn play(&mut self, cue: SoundCue);
    /// Start the looping background track.
    fn start_music(&mut self);
    fn stop_music(&mut self);
}

/// Plays nothing.
#[derive(Debug, Default)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn bind(&mut self, _assets: &SessionAssets) {}

    fn play(&mut self, cue: SoundCue) {
        tracing::trace!(?cue, "sound (silent)");
    }

    fn start_music(&mut self) {
        tracing::trace!("music start (silent)");
    }

    fn stop_music(&mut self) {
        tracing::trace!("music stop (silent)");
    }
}

#[cfg(feature = "audio")]
pub use self::rodio_sink::RodioAudio;

#[cfg(feature = "audio")]
mod rodio_sink {
    use std::io::Cursor;
    use std::sync::Arc;

    use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

    use super::AudioSink;
    use crate::assets::{AudioClip, SessionAssets};
    use crate::entities::SoundCue;

    /// Output-device backed sink.  Must stay on the thread that created it.
    pub struct RodioAudio {
        // Dropping the stream silences everything, so it is held for the
        // sink's lifetime.
        _stream: OutputStream,
        handle: OutputStreamHandle,
        music: Option<Sink>,
        clips: Option<SessionAssets>,
    }

    impl RodioAudio {
        pub fn try_default() -> Result<Self, rodio::StreamError> {
            let (stream, handle) = OutputStream::try_default()?;
            Ok(RodioAudio {
                _stream: stream,
                handle,
                music: None,
                clips: None,
            })
        }

        fn decode(clip: &AudioClip) -> Option<Decoder<Cursor<Arc<[u8]>>>> {
            match Decoder::new(Cursor::new(Arc::clone(&clip.data))) {
                Ok(decoder) => Some(decoder),
                Err(e) => {
                    tracing::warn!(clip = %clip.name, error = %e, "cannot decode clip");
                    None
                }
            }
        }
    }

    impl AudioSink for RodioAudio {
        fn bind(&mut self, assets: &SessionAssets) {
            self.clips = Some(assets.clone());
        }

        fn play(&mut self, cue: SoundCue) {
            let Some(clips) = &self.clips else {
                return;
            };
            if let Some(decoder) = Self::decode(clips.sound(cue)) {
                if let Err(e) = self.handle.play_raw(decoder.convert_samples()) {
                    tracing::warn!(?cue, error = %e, "cannot play sound");
                }
            }
        }

        fn start_music(&mut self) {
            self.stop_music();
            let Some(clips) = &self.clips else {
                return;
            };
            let Some(decoder) = Self::decode(&clips.music) else {
                return;
            };
            match Sink::try_new(&self.handle) {
                Ok(sink) => {
                    sink.append(decoder.repeat_infinite());
                    self.music = Some(sink);
                }
                Err(e) => tracing::warn!(error = %e, "cannot open music sink"),
            }
        }

        fn stop_music(&mut self) {
            if let Some(sink) = self.music.take() {
                sink.stop();
            }
        }
    }
}

impl<S: AudioSink + ?Sized> AudioSink for Box<S> {
    fn bind(&mut self, assets: &SessionAssets) {
        (**self).bind(assets)
    }

    fn play(&mut self, cue: SoundCue) {
        (**self).play(cue)
    }

    fn start_music(&mut self) {
        (**self).start_music()
    }

    fn stop_music(&mut self) {
        (**self).stop_music()
    }
}
