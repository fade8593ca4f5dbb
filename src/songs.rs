//! Bundled RTTTL tunes
//!
//! A handful of well-known ringtones for demos and smoke tests, looked up by a short name.

/// `(name, rtttl)` pairs
pub const SONGS: &[(&str, &str)] = &[
    (
        "tetris",
        "tetris:d=4,o=5,b=160:e6,8b,8c6,8d6,16e6,16d6,8c6,8b,a,8a,8c6,e6,8d6,8c6,b,8b,8c6,d6,e6,c6,a,2a,8p,d6,8f6,a6,8g6,8f6,e6,8e6,8c6,e6,8d6,8c6,b,8b,8c6,d6,e6,c6,a,a",
    ),
    (
        "simpsons",
        "The Simpsons:d=4,o=5,b=160:c.6,e6,f#6,8a6,g.6,e6,c6,8a,8f#,8f#,8f#,2g,8p,8p,8f#,8f#,8f#,8g,a#.,8c6,8c6,8c6,c6",
    ),
    (
        "mission",
        "MissionImp:d=16,o=6,b=95:32d,32d#,32d,32d#,32d,32d#,32d,32d#,32d,32d,32d#,32e,32f,32f#,32g,g,8p,g,8p,a#,p,c7,p,g,8p,g,8p,f,p,f#,p,g,8p,g,8p,a#,p,c7,p,g,8p,g,8p,f,p,f#,p,a#,g,2d,32p,a#,g,2c#,32p,a#,g,2c,a#5,8c,2p,32p,a#5,g5,2f#,32p,a#5,g5,2f,32p,a#5,g5,2e,d#,8d",
    ),
];

/// Find a bundled song by name, ignoring case.
pub fn find(name: &str) -> Option<&'static str> {
    SONGS
        .iter()
        .find(|(song_name, _)| song_name.eq_ignore_ascii_case(name))
        .map(|(_, rtttl)| *rtttl)
}

pub fn names() -> impl Iterator<Item = &'static str> {
    SONGS.iter().map(|(name, _)| *name)
}
