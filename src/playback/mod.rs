//! # Playback Module
//!
//! Turns a loaded RTTTL song into tone commands over time without blocking the caller.
//!
//! ## Sub-modules
//! - `types` - the [`ToneDriver`] and [`Clock`] seams plus ready-made implementations
//! - `engine` - the [`Player`] state machine
//! - `frequency` - the bounds-checked note frequency table
//!
//! ## Timing
//! Waiting for a note to end is a comparison, not a sleep: each note records the clock value
//! at which it ends, and [`Player::poll`] does nothing until `now` reaches it. The host loop
//! decides how often to poll and is free to do other work in between.
//!
//! ## Example
//! ```rust
//! use rtttl::{ManualClock, Player, PlayerConfig, RecordingDriver};
//!
//! let clock = ManualClock::new(0);
//! let mut player = Player::new(RecordingDriver::new(), PlayerConfig::default());
//! player.load("beep:d=4,o=5,b=120:a,p,a").unwrap();
//!
//! player.update(&clock);
//! assert_eq!(player.driver().tones().len(), 1);
//!
//! clock.advance(100);
//! player.update(&clock); // still inside the first 250 ms note
//! assert_eq!(player.note_end_time(), 250);
//! assert_eq!(player.driver().tones().len(), 1);
//! ```

mod engine;
mod frequency;
mod types;


pub use engine::Player;
pub use frequency::{note_frequency, MAX_OCTAVE, MIN_OCTAVE};
pub use types::{Clock, ManualClock, RecordingDriver, SystemClock, ToneCommand, ToneDriver};
