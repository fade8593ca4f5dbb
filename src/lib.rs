pub mod ast;
pub mod config;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod playback;
pub mod songs;

pub use ast::*;
pub use config::PlayerConfig;
pub use error::*;
pub use lexer::Cursor;
pub use parser::{check_playable, parse, parse_header, parse_note};
pub use playback::{
    Clock, ManualClock, Player, RecordingDriver, SystemClock, ToneCommand, ToneDriver,
};

/// Decode a song and render it as YAML.
/// Useful for inspecting what the player will do with a ringtone.
pub fn dump_yaml(source: &str) -> Result<String, RtttlError> {
    let song = parse(source)?;
    Ok(serde_yaml::to_string(&song)?)
}
