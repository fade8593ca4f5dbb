//! Playback collaborator types
//!
//! The player never touches hardware or time directly. It talks to a [`ToneDriver`] for
//! sound and receives the current time from the host, usually read from a [`Clock`].

use serde::Serialize;
use std::cell::Cell;
use std::time::Instant;

/// Output that can sound one frequency at a time on a channel.
pub trait ToneDriver {
    /// Bind the output channel. Called once when the player is built.
    fn attach(&mut self, channel: u8);

    /// Begin sounding `frequency_hz` at `amplitude`, replacing any current tone.
    fn start_tone(&mut self, channel: u8, frequency_hz: u16, amplitude: u32);

    /// Stop sounding. Must be harmless when nothing is playing.
    fn silence(&mut self, channel: u8);
}

/// Monotonic millisecond clock
pub trait Clock {
    fn now(&self) -> u64;
}

/// Wall clock measured from its creation.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

/// Clock that only moves when told to
///
/// # Example
/// ```
/// use rtttl::{Clock, ManualClock};
///
/// let clock = ManualClock::new(100);
/// clock.advance(50);
/// assert_eq!(clock.now(), 150);
/// ```
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    pub fn new(start: u64) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn set(&self, now: u64) {
        self.now.set(self.now.get().max(now));
    }

    pub fn advance(&self, millis: u64) {
        self.now.set(self.now.get().saturating_add(millis));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> u64 {
        self.now.get()
    }
}

/// A single command issued to a tone driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case", tag = "command")]
pub enum ToneCommand {
    Attach {
        channel: u8,
    },
    Start {
        channel: u8,
        frequency_hz: u16,
        amplitude: u32,
    },
    Silence {
        channel: u8,
    },
}

/// Driver that records every command instead of producing sound
#[derive(Debug, Clone, Default)]
pub struct RecordingDriver {
    pub commands: Vec<ToneCommand>,
}

impl RecordingDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `Start` command as `(frequency_hz, amplitude)`, in order.
    pub fn tones(&self) -> Vec<(u16, u32)> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                ToneCommand::Start {
                    frequency_hz,
                    amplitude,
                    ..
                } => Some((*frequency_hz, *amplitude)),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl ToneDriver for RecordingDriver {
    fn attach(&mut self, channel: u8) {
        self.commands.push(ToneCommand::Attach { channel });
    }

    fn start_tone(&mut self, channel: u8, frequency_hz: u16, amplitude: u32) {
        self.commands.push(ToneCommand::Start {
            channel,
            frequency_hz,
            amplitude,
        });
    }

    fn silence(&mut self, channel: u8) {
        self.commands.push(ToneCommand::Silence { channel });
    }
}
