//! End-of-interval chime playback
//!
//! The chime is a short synthesized tone rather than a bundled sample: an
//! 880 Hz sine with a fast attack and a decay to silence. Playback runs on
//! a detached thread so the ticker never waits on the audio device, and
//! every failure is logged and swallowed. A machine with no sound card
//! still keeps time.

use std::time::Duration;

use rodio::source::SineWave;
use rodio::{OutputStream, Sink, Source};
use tracing::{debug, warn};

/// Tone pitch in Hz (A5)
const TONE_HZ: f32 = 880.0;
/// Total tone length
const TONE_LENGTH: Duration = Duration::from_millis(300);
/// Attack ramp before the decay takes over
const TONE_ATTACK: Duration = Duration::from_millis(10);
/// Peak amplitude of the tone
const TONE_GAIN: f32 = 0.2;

/// Handle for firing the chime, cheap to clone into the ticker task
#[derive(Debug, Clone)]
pub struct Cue {
    enabled: bool,
}

impl Cue {
    /// Create a cue; a disabled cue turns `play` into a no-op
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Check whether the chime will actually sound
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Fire the chime and return immediately
    pub fn play(&self) {
        if !self.enabled {
            debug!("Chime muted, skipping playback");
            return;
        }

        std::thread::spawn(|| {
            let Ok((_stream, handle)) = OutputStream::try_default() else {
                warn!("No audio output available, skipping chime");
                return;
            };
            let Ok(sink) = Sink::try_new(&handle) else {
                warn!("Failed to open audio sink, skipping chime");
                return;
            };

            let mut tone = SineWave::new(TONE_HZ).take_duration(TONE_LENGTH);
            tone.set_filter_fadeout();
            sink.append(tone.amplify(TONE_GAIN).fade_in(TONE_ATTACK));

            // Keep the stream alive until the tone has fully played out
            sink.sleep_until_end();
        });
    }
}
