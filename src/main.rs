// SPDX-License-Identifier: MIT
//
// nyan — Nyan Cat for your terminal.
//
// This is the binary that wires the crates together:
//
//   nyan-frames → the stored animation (12 frames, 64×64 color symbols)
//   nyan-term   → profiles, the diffing renderer, the lifecycle loop
//
// main() itself only parses flags, builds a Config, and reports fatal
// configuration errors; everything with actual behavior lives in
// nyan-term where it can be tested against an in-memory sink.

use std::io;
use std::process;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use nyan_term::output::LineEnding;
use nyan_term::palette::TerminalProfile;
use nyan_term::player::{Config, DisplayMode, Player};

// ─── CLI ────────────────────────────────────────────────────────────────────

/// Rendering profile names as they appear on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ProfileArg {
    /// xterm-256 background colors.
    Ansi256,
    /// 16-color ANSI with bright backgrounds.
    Ansi16,
    /// 8-color backgrounds with blink standing in for brightness.
    Blink,
    /// Bold colors drawn with solid block glyphs.
    Block,
    /// CP437 code-page rendition (raw shade bytes).
    Shaded,
    /// Escape-free glyph pairs for dumb terminals.
    Ascii,
    /// Single-character glyphs for 40-column displays.
    Narrow,
}

impl From<ProfileArg> for TerminalProfile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Ansi256 => Self::Ansi256,
            ProfileArg::Ansi16 => Self::Ansi16,
            ProfileArg::Blink => Self::Blink,
            ProfileArg::Block => Self::Block,
            ProfileArg::Shaded => Self::Shaded,
            ProfileArg::Ascii => Self::Ascii,
            ProfileArg::Narrow => Self::Narrow,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "nyan", version, about = "Nyan Cat for your terminal")]
struct Cli {
    /// Rendering profile matching your terminal's capabilities.
    #[arg(long, value_enum, default_value_t = ProfileArg::Ansi256)]
    terminal: ProfileArg,

    /// Stop after this many frames (0 loops forever).
    #[arg(long, short = 'f', default_value_t = 0)]
    frames: u32,

    /// Delay between frames, in milliseconds.
    #[arg(long, default_value_t = 90, value_parser = clap::value_parser!(u64).range(1..))]
    interval: u64,

    /// Reposition the cursor between frames instead of clearing the screen.
    #[arg(long, short = 'e')]
    no_clear: bool,

    /// Emit telnet-safe line endings (CR NUL LF).
    #[arg(long, short = 't')]
    telnet: bool,

    /// Leave the terminal title alone.
    #[arg(long, short = 's')]
    no_title: bool,

    /// Show the countdown intro before the animation starts.
    #[arg(long, short = 'i')]
    intro: bool,

    /// Hide the elapsed-time counter under the animation.
    #[arg(long, short = 'n')]
    no_counter: bool,
}

impl Cli {
    fn into_config(self) -> Config {
        Config {
            profile: self.terminal.into(),
            frame_limit: self.frames,
            interval: Duration::from_millis(self.interval),
            display: if self.no_clear {
                DisplayMode::Reposition
            } else {
                DisplayMode::Clear
            },
            ending: if self.telnet {
                LineEnding::Telnet
            } else {
                LineEnding::Plain
            },
            set_title: !self.no_title,
            show_intro: self.intro,
            show_counter: !self.no_counter,
        }
    }
}

// ─── Entry point ────────────────────────────────────────────────────────────

fn main() {
    let config = Cli::parse().into_config();

    let animation = nyan_frames::animation().unwrap_or_else(|e| {
        eprintln!("nyan: {e}");
        process::exit(1);
    });

    let mut player = Player::new(&animation, config).unwrap_or_else(|e| {
        eprintln!("nyan: {e}");
        process::exit(1);
    });

    let mut stdout = io::stdout().lock();
    if let Err(e) = player.run(&mut stdout) {
        eprintln!("nyan: {e}");
        process::exit(1);
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn defaults_match_the_classic_behavior() {
        let config = parse(&["nyan"]).into_config();
        assert_eq!(config.profile, TerminalProfile::Ansi256);
        assert_eq!(config.frame_limit, 0);
        assert_eq!(config.interval, Duration::from_millis(90));
        assert_eq!(config.display, DisplayMode::Clear);
        assert_eq!(config.ending, LineEnding::Plain);
        assert!(config.set_title);
        assert!(!config.show_intro);
        assert!(config.show_counter);
    }

    #[test]
    fn profile_names_parse() {
        for (name, profile) in [
            ("ansi256", TerminalProfile::Ansi256),
            ("ansi16", TerminalProfile::Ansi16),
            ("blink", TerminalProfile::Blink),
            ("block", TerminalProfile::Block),
            ("shaded", TerminalProfile::Shaded),
            ("ascii", TerminalProfile::Ascii),
            ("narrow", TerminalProfile::Narrow),
        ] {
            let config = parse(&["nyan", "--terminal", name]).into_config();
            assert_eq!(config.profile, profile, "--terminal {name}");
        }
    }

    #[test]
    fn flags_map_onto_the_config() {
        let config = parse(&[
            "nyan", "-t", "-e", "-s", "-i", "-n", "-f", "12", "--interval", "40",
        ])
        .into_config();
        assert_eq!(config.ending, LineEnding::Telnet);
        assert_eq!(config.display, DisplayMode::Reposition);
        assert!(!config.set_title);
        assert!(config.show_intro);
        assert!(!config.show_counter);
        assert_eq!(config.frame_limit, 12);
        assert_eq!(config.interval, Duration::from_millis(40));
    }

    #[test]
    fn zero_interval_is_rejected() {
        assert!(Cli::try_parse_from(["nyan", "--interval", "0"]).is_err());
    }

    #[test]
    fn unknown_profile_is_rejected() {
        assert!(Cli::try_parse_from(["nyan", "--terminal", "vt52"]).is_err());
    }
}
