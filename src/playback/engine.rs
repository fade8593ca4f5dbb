//! Non-blocking playback scheduler
//!
//! Plays a loaded song one note at a time. The host calls [`Player::poll`] with the current
//! time as often as it likes; each call either does nothing (the current note is still
//! sounding), advances to the next note, or ends the song. Nothing here sleeps or spawns.
//!
//! ```text
//!          load()                poll(): buffer exhausted
//!  Idle ───────────▶ Playing ─────────────────────────────▶ Idle
//!                       │              stop()                 ▲
//!                       └─────────────────────────────────────┘
//! ```

use log::{debug, error, info, trace};

use super::types::{Clock, ToneDriver};
use crate::ast::{Defaults, ParsedNote};
use crate::config::PlayerConfig;
use crate::error::RtttlError;
use crate::lexer::Cursor;
use crate::parser::{check_playable, parse_header, parse_note};

/// Cooperative RTTTL player driving a [`ToneDriver`].
///
/// The host must poll at least once per shortest note, otherwise notes run long.
///
/// # Example
/// ```rust
/// use rtttl::{Player, PlayerConfig, RecordingDriver};
///
/// let mut player = Player::new(RecordingDriver::new(), PlayerConfig::default());
/// player.load("test:d=4,o=5,b=100:c,8d#,2e.").unwrap();
///
/// let mut now = 0;
/// while player.is_playing() {
///     player.poll(now);
///     now += 10;
/// }
///
/// assert_eq!(player.driver().tones(), vec![(523, 10), (622, 10), (659, 10)]);
/// ```
#[derive(Debug)]
pub struct Player<D: ToneDriver> {
    driver: D,
    config: PlayerConfig,
    cursor: Cursor,
    defaults: Defaults,
    playing: bool,
    note_end_time: u64,
    volume: u32,
}

impl<D: ToneDriver> Player<D> {
    /// Build an idle player, attaching the driver to the configured channel.
    pub fn new(mut driver: D, config: PlayerConfig) -> Self {
        driver.attach(config.channel);
        let volume = config.volume;
        Self {
            driver,
            config,
            cursor: Cursor::default(),
            defaults: Defaults::default(),
            playing: false,
            note_end_time: 0,
            volume,
        }
    }

    /// Load a song at the configured volume. See [`Player::load_with_volume`].
    pub fn load(&mut self, song: &str) -> Result<(), RtttlError> {
        self.load_with_volume(song, self.config.volume)
    }

    /// Replace whatever is loaded with `song` and start playing it on the next poll.
    ///
    /// Any sounding note is silenced first. If the song cannot be played the player is left
    /// idle and the error is returned.
    ///
    /// # Errors
    /// - [`RtttlError::InvalidBpm`] for a header with `b=0`
    /// - [`RtttlError::UnsupportedOctave`] / [`RtttlError::UnsupportedPitch`] for a note outside
    ///   the frequency table
    /// - [`RtttlError::ConfigError`] when `volume` exceeds the configured PWM duty range
    pub fn load_with_volume(&mut self, song: &str, volume: u32) -> Result<(), RtttlError> {
        self.playing = false;
        self.driver.silence(self.config.channel);

        let max_volume = self.config.max_volume();
        if volume > max_volume {
            return Err(RtttlError::ConfigError(format!(
                "volume {} exceeds the {}-bit maximum of {}",
                volume, self.config.pwm_resolution, max_volume
            )));
        }

        let mut cursor = Cursor::new(song);
        let defaults = parse_header(&mut cursor)?;
        check_playable(&cursor, &defaults)?;

        self.cursor = cursor;
        self.defaults = defaults;
        self.note_end_time = 0;
        self.volume = volume;
        self.playing = true;
        info!(
            "loaded song at {} bpm, volume {}",
            defaults.beats_per_minute, volume
        );
        Ok(())
    }

    /// Advance playback if the current note has finished. Never blocks.
    pub fn poll(&mut self, now: u64) {
        if !self.playing {
            return;
        }
        if now < self.note_end_time {
            trace!("holding note until {} (now {})", self.note_end_time, now);
            return;
        }
        if self.cursor.is_at_end() {
            self.stop();
            return;
        }
        self.advance(now);
    }

    /// Poll using the time read from `clock`.
    pub fn update(&mut self, clock: &impl Clock) {
        self.poll(clock.now());
    }

    fn advance(&mut self, now: u64) {
        let channel = self.config.channel;
        self.driver.silence(channel);

        let note = match parse_note(&mut self.cursor, &self.defaults) {
            ParsedNote::Note(note) => note,
            ParsedNote::EndOfSong => {
                self.stop();
                return;
            }
        };

        match note.frequency() {
            Ok(Some(frequency_hz)) => {
                debug!(
                    "tone {} Hz for {} ms at {}",
                    frequency_hz, note.duration_ms, now
                );
                self.driver.start_tone(channel, frequency_hz, self.volume);
            }
            Ok(None) => {
                debug!("rest for {} ms at {}", note.duration_ms, now);
            }
            Err(e) => {
                // Songs are checked on load, so this only fires on a broken invariant
                error!("cannot play note {:?}: {}", note, e);
                self.stop();
                return;
            }
        }
        self.note_end_time = now.saturating_add(u64::from(note.duration_ms));
    }

    /// Silence output and end playback. Does nothing when already idle.
    pub fn stop(&mut self) {
        if self.playing {
            self.driver.silence(self.config.channel);
            self.playing = false;
            info!("playback stopped");
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_done(&self) -> bool {
        !self.playing
    }

    /// Clock value at which the current note or rest ends.
    pub fn note_end_time(&self) -> u64 {
        self.note_end_time
    }

    /// Header defaults of the loaded song.
    pub fn defaults(&self) -> &Defaults {
        &self.defaults
    }

    pub fn volume(&self) -> u32 {
        self.volume
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn into_driver(self) -> D {
        self.driver
    }
}
