//! # Error Types
//!
//! This module defines all error types for the RTTTL player.
//!
//! The notation itself is forgiving: malformed header fields and unknown note letters fall
//! back to defaults and never produce an error. The variants here cover the few inputs that
//! cannot be played at all, plus configuration and I/O failures.
//!
//! ## Error Types
//! - `InvalidBpm` - The header sets `b=0`, which leaves no whole-note length
//! - `UnsupportedOctave` - A pitched note lies outside the frequency table
//! - `UnsupportedPitch` - A sharp carries a note past the top of the frequency table
//! - `ConfigError` - Invalid player configuration
//! - `Yaml` - Rendering a decoded song as YAML failed
//! - `Io` - Reading a song or configuration file failed
//!
//! ## Usage
//! ```rust
//! use rtttl::{parse, RtttlError};
//!
//! match parse("x:b=0:c") {
//!     Err(RtttlError::InvalidBpm) => eprintln!("tempo must be positive"),
//!     Err(e) => eprintln!("Error: {}", e),
//!     Ok(song) => println!("{} notes", song.notes.len()),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RtttlError {
    /// Beats per minute of zero.
    ///
    /// # Example
    /// ```
    /// # use rtttl::RtttlError;
    /// let err = RtttlError::InvalidBpm;
    /// assert_eq!(err.to_string(), "Invalid tempo: beats per minute must be greater than zero");
    /// ```
    #[error("Invalid tempo: beats per minute must be greater than zero")]
    InvalidBpm,

    /// A pitched note whose octave has no row in the frequency table.
    ///
    /// # Example
    /// ```
    /// # use rtttl::RtttlError;
    /// let err = RtttlError::UnsupportedOctave { octave: 3 };
    /// assert_eq!(err.to_string(), "Unsupported octave 3 (supported: 4-7)");
    /// ```
    #[error("Unsupported octave {octave} (supported: 4-7)")]
    UnsupportedOctave { octave: u8 },

    /// A chromatic position that falls outside the frequency table (e.g. `b#7`).
    #[error("Unsupported pitch at octave {octave}, chromatic position {position}")]
    UnsupportedPitch { octave: u8, position: u8 },

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
