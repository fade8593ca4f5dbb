use std::env;
use std::fs;
use std::process;
use std::thread;
use std::time::Duration;

use log::info;
use rtttl::{songs, Player, PlayerConfig, SystemClock, ToneDriver};

const USAGE: &str = "Usage: rtttl [--config player.yaml] [--dump] <song.rtttl>
       rtttl [--config player.yaml] [--dump] --demo <name>";

/// Driver that prints tone commands instead of driving hardware
struct ConsoleDriver {
    pwm_frequency: u32,
    pwm_resolution: u8,
}

impl ToneDriver for ConsoleDriver {
    fn attach(&mut self, channel: u8) {
        info!(
            "attached channel {} ({} Hz carrier, {}-bit duty)",
            channel, self.pwm_frequency, self.pwm_resolution
        );
    }

    fn start_tone(&mut self, channel: u8, frequency_hz: u16, amplitude: u32) {
        println!("[ch{}] tone {:>4} Hz  duty {}", channel, frequency_hz, amplitude);
    }

    fn silence(&mut self, _channel: u8) {}
}

#[derive(Debug, Default, PartialEq)]
struct Args {
    config_path: Option<String>,
    demo: Option<String>,
    song_path: Option<String>,
    dump: bool,
}

/// Parse command-line flags. `None` means the arguments don't form a valid invocation.
fn parse_args(args: &[String]) -> Option<Args> {
    let mut parsed = Args::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => parsed.config_path = Some(iter.next()?.clone()),
            "--demo" => parsed.demo = Some(iter.next()?.clone()),
            "--dump" => parsed.dump = true,
            _ if parsed.song_path.is_none() => parsed.song_path = Some(arg.clone()),
            _ => return None,
        }
    }
    Some(parsed)
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Args {
        config_path,
        demo,
        song_path,
        dump,
    } = match parse_args(&args) {
        Some(parsed) => parsed,
        None => {
            eprintln!("{}", USAGE);
            process::exit(1);
        }
    };

    // Read input song
    let source = match (demo, song_path) {
        (Some(name), None) => match songs::find(&name) {
            Some(song) => song.to_string(),
            None => {
                let known: Vec<&str> = songs::names().collect();
                eprintln!("Unknown demo '{}'. Available: {}", name, known.join(", "));
                process::exit(1);
            }
        },
        (None, Some(path)) => match fs::read_to_string(&path) {
            Ok(content) => content.trim_end().to_string(),
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path, e);
                process::exit(1);
            }
        },
        _ => {
            eprintln!("{}", USAGE);
            process::exit(1);
        }
    };

    if dump {
        match rtttl::dump_yaml(&source) {
            Ok(yaml) => print!("{}", yaml),
            Err(e) => {
                eprintln!("Error decoding song: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    let config = match config_path {
        Some(path) => match PlayerConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path, e);
                process::exit(1);
            }
        },
        None => PlayerConfig::default(),
    };

    let driver = ConsoleDriver {
        pwm_frequency: config.pwm_frequency,
        pwm_resolution: config.pwm_resolution,
    };
    let mut player = Player::new(driver, config);
    if let Err(e) = player.load(&source) {
        eprintln!("Error loading song: {}", e);
        process::exit(1);
    }

    // Host loop: poll often, sleep briefly, never block on a note
    let clock = SystemClock::new();
    while player.is_playing() {
        player.update(&clock);
        thread::sleep(Duration::from_millis(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args_full() {
        let parsed = parse_args(&args(&["--config", "p.yaml", "--dump", "song.rtttl"])).unwrap();
        assert_eq!(parsed.config_path.as_deref(), Some("p.yaml"));
        assert_eq!(parsed.song_path.as_deref(), Some("song.rtttl"));
        assert!(parsed.dump);
        assert_eq!(parsed.demo, None);
    }

    #[test]
    fn test_flag_missing_value_is_rejected() {
        assert_eq!(parse_args(&args(&["song.rtttl", "--config"])), None);
        assert_eq!(parse_args(&args(&["--demo"])), None);
    }

    #[test]
    fn test_extra_positional_is_rejected() {
        assert_eq!(parse_args(&args(&["a.rtttl", "b.rtttl"])), None);
    }
}
