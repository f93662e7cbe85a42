// SPDX-License-Identifier: MIT
#![allow(unsafe_code)]
//
// Lifecycle controller — drives the animation from start to clean exit.
//
// Three phases, in order, no others:
//
//   Initializing — set the terminal title, clear the screen and hide
//   the cursor (or save the cursor position when redrawing in place),
//   optionally run the countdown intro.
//
//   Running — reposition the cursor, render the current frame, show
//   the elapsed-time counter, flush, then either stop (frame limit
//   reached, or SIGINT observed) or advance the frame index modulo the
//   frame count and sleep for the configured interval. The modulo wrap
//   is what makes the animation loop forever when no limit is set.
//
//   Finishing — restore the terminal: show the cursor and reset
//   attributes, clearing the screen in clear mode or emitting a final
//   newline otherwise. The only normal exit path.
//
// Timing is a plain blocking sleep with no compensation for render
// time; the wall-clock frame rate is interval + render cost. There is
// no concurrency to overlap, so there is nothing smarter to do.
//
// SIGINT is handled the async-signal-safe way: the handler only sets an
// `AtomicBool`, and the run loop polls it between frames. Without this,
// Ctrl-C would kill the process mid-frame and leave the user's cursor
// hidden.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use unicode_width::UnicodeWidthStr;

use crate::ansi;
use crate::error::ConfigError;
use crate::frame::Animation;
use crate::output::{LineEnding, OutputBuffer};
use crate::palette::{Palette, TerminalProfile};
use crate::render::FrameRenderer;
use crate::viewport::Viewport;

/// Terminal title set during `Initializing`.
const TITLE: &str = "Nyanyanyanyanyanyanya...";

/// Countdown ticks shown by the intro banner.
const COUNTDOWN_TICKS: u32 = 5;

/// Duration of one countdown tick.
const COUNTDOWN_TICK: Duration = Duration::from_millis(400);

// ─── SIGINT ──────────────────────────────────────────────────────────────────

/// Global flag set by the SIGINT handler. Checked between frames.
static SIGINT_RECEIVED: AtomicBool = AtomicBool::new(false);

/// Install a signal handler for SIGINT (Ctrl-C).
///
/// The handler simply sets the [`SIGINT_RECEIVED`] flag. This is
/// async-signal-safe: writing to an atomic is one of the few operations
/// permitted inside signal handlers. The run loop performs the normal
/// `Finishing` restore when it observes the flag.
#[cfg(unix)]
fn install_sigint_handler() {
    unsafe {
        let mut sa: libc::sigaction = std::mem::zeroed();
        sa.sa_sigaction = sigint_handler as *const () as usize;
        sa.sa_flags = libc::SA_RESTART;
        libc::sigemptyset(&raw mut sa.sa_mask);
        libc::sigaction(libc::SIGINT, &raw const sa, std::ptr::null_mut());
    }
}

#[cfg(unix)]
extern "C" fn sigint_handler(_sig: libc::c_int) {
    SIGINT_RECEIVED.store(true, Ordering::Relaxed);
}

#[cfg(not(unix))]
fn install_sigint_handler() {
    // No-op on non-unix platforms.
}

fn interrupted() -> bool {
    SIGINT_RECEIVED.load(Ordering::Relaxed)
}

// ─── Config ──────────────────────────────────────────────────────────────────

/// How the screen is prepared between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// Clear the screen once, hide the cursor, and re-home every frame.
    #[default]
    Clear,
    /// Save the cursor position and restore it every frame, leaving the
    /// rest of the screen alone. The cursor stays visible.
    Reposition,
}

/// Everything the lifecycle controller needs to know, decided once at
/// startup and never mutated afterwards.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// Which rendering profile to use.
    pub profile: TerminalProfile,
    /// Stop after this many frames; 0 loops forever.
    pub frame_limit: u32,
    /// Delay between frames.
    pub interval: Duration,
    /// Clear-screen vs. cursor-reposition display mode.
    pub display: DisplayMode,
    /// Line terminator convention for the output stream.
    pub ending: LineEnding,
    /// Set the terminal title during `Initializing`.
    pub set_title: bool,
    /// Show the countdown banner before the animation.
    pub show_intro: bool,
    /// Show the elapsed-time counter under the animation.
    pub show_counter: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            profile: TerminalProfile::Ansi256,
            frame_limit: 0,
            interval: Duration::from_millis(90),
            display: DisplayMode::Clear,
            ending: LineEnding::Plain,
            set_title: true,
            show_intro: false,
            show_counter: true,
        }
    }
}

// ─── Player ──────────────────────────────────────────────────────────────────

/// The animation lifecycle controller.
///
/// Owns the only state that outlives a single frame render: the current
/// frame index, the frames-shown count, and the elapsed-time origin.
/// Construction validates the viewport against the animation's canvas;
/// after that, everything up to an output failure is infallible.
pub struct Player<'a> {
    config: Config,
    animation: &'a Animation,
    palette: &'static Palette,
    viewport: Viewport,
    renderer: FrameRenderer,
    out: OutputBuffer,
    frame_index: usize,
    frames_rendered: u32,
    started: Instant,
}

impl<'a> Player<'a> {
    /// Create a player for an animation.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the standard viewport does not fit
    /// the animation's canvas. This is the configuration check the
    /// render loop relies on to index frames without bounds tests.
    pub fn new(animation: &'a Animation, config: Config) -> Result<Self, ConfigError> {
        let viewport = Viewport::STANDARD;
        viewport.validate(animation.cols(), animation.rows())?;

        Ok(Self {
            config,
            animation,
            palette: config.profile.palette(),
            viewport,
            renderer: FrameRenderer::new(),
            out: OutputBuffer::new(),
            frame_index: 0,
            frames_rendered: 0,
            started: Instant::now(),
        })
    }

    /// Frames rendered so far.
    #[inline]
    #[must_use]
    pub const fn frames_rendered(&self) -> u32 {
        self.frames_rendered
    }

    /// Run the animation to completion: `Initializing` → `Running` →
    /// `Finishing`, writing all output to `sink`.
    ///
    /// Returns when the frame limit is reached or SIGINT is observed.
    /// With no frame limit and no signal, this runs forever.
    ///
    /// # Errors
    ///
    /// Propagates any failure of the underlying writer. Output errors
    /// are fatal; there is no retry or partial recovery.
    pub fn run(&mut self, sink: &mut impl Write) -> io::Result<()> {
        install_sigint_handler();
        self.initialize(sink)?;
        self.run_loop(sink)?;
        self.finish(sink)
    }

    // ── Initializing ────────────────────────────────────────────────────

    fn initialize(&mut self, sink: &mut impl Write) -> io::Result<()> {
        if self.config.set_title {
            ansi::set_title(&mut self.out, TITLE)?;
        }

        match self.config.display {
            DisplayMode::Clear => {
                ansi::cursor_home(&mut self.out)?;
                ansi::clear_screen(&mut self.out)?;
                ansi::cursor_hide(&mut self.out)?;
            }
            DisplayMode::Reposition => ansi::save_cursor(&mut self.out)?,
        }
        self.out.flush_to(sink)?;

        if self.config.show_intro {
            self.intro(sink)?;
        }

        // The counter measures animation time, not intro time.
        self.started = Instant::now();
        Ok(())
    }

    fn intro(&mut self, sink: &mut impl Write) -> io::Result<()> {
        for remaining in (1..=COUNTDOWN_TICKS).rev() {
            write_banner(&mut self.out, self.config.ending, remaining)?;
            self.out.flush_to(sink)?;

            if interrupted() {
                return Ok(());
            }
            thread::sleep(COUNTDOWN_TICK);

            match self.config.display {
                DisplayMode::Clear => ansi::cursor_home(&mut self.out)?,
                DisplayMode::Reposition => ansi::restore_cursor(&mut self.out)?,
            }
        }

        if self.config.display == DisplayMode::Clear {
            ansi::cursor_home(&mut self.out)?;
            ansi::clear_screen(&mut self.out)?;
            ansi::cursor_hide(&mut self.out)?;
        }
        Ok(())
    }

    // ── Running ─────────────────────────────────────────────────────────

    fn run_loop(&mut self, sink: &mut impl Write) -> io::Result<()> {
        loop {
            match self.config.display {
                DisplayMode::Clear => ansi::cursor_home(&mut self.out)?,
                DisplayMode::Reposition => ansi::restore_cursor(&mut self.out)?,
            }

            let frame = self.animation.frame(self.frame_index);
            self.renderer.render(
                frame,
                self.viewport,
                self.palette,
                self.config.ending,
                &mut self.out,
            );

            if self.config.show_counter {
                self.draw_counter()?;
            }
            self.out.flush_to(sink)?;

            self.frames_rendered += 1;
            if self.config.frame_limit != 0 && self.frames_rendered >= self.config.frame_limit
            {
                return Ok(());
            }
            if interrupted() {
                return Ok(());
            }

            // Wrap to frame 0 after the last frame: the loop repeats
            // until something above breaks it.
            self.frame_index = (self.frame_index + 1) % self.animation.len();
            thread::sleep(self.config.interval);
        }
    }

    /// Draw the elapsed-time line, centered against the profile's
    /// nominal display width. Attributes are reset first so the last
    /// frame row's background doesn't bleed into the text.
    fn draw_counter(&mut self) -> io::Result<()> {
        let seconds = self.started.elapsed().as_secs();
        let text = format!("You have nyaned for {seconds} seconds");
        let pad = usize::from(self.palette.display_width)
            .saturating_sub(text.width())
            / 2;

        ansi::reset(&mut self.out)?;
        write!(self.out, "{:pad$}{text}", "")
    }

    // ── Finishing ───────────────────────────────────────────────────────

    fn finish(&mut self, sink: &mut impl Write) -> io::Result<()> {
        match self.config.display {
            DisplayMode::Clear => {
                ansi::cursor_show(&mut self.out)?;
                ansi::reset(&mut self.out)?;
                ansi::cursor_home(&mut self.out)?;
                ansi::clear_screen(&mut self.out)?;
            }
            DisplayMode::Reposition => {
                // The cursor was never hidden in this mode; just drop
                // back to default attributes and a fresh line.
                ansi::reset(&mut self.out)?;
                self.config.ending.terminate(&mut self.out, 1);
            }
        }
        self.out.flush_to(sink)
    }
}

// ─── Intro banner ────────────────────────────────────────────────────────────

/// Write one tick of the countdown banner. Every line break goes through
/// the configured terminator so the banner is as telnet-safe as the
/// frames that follow it.
fn write_banner(
    out: &mut OutputBuffer,
    ending: LineEnding,
    remaining: u32,
) -> io::Result<()> {
    ending.terminate(out, 2);
    out.push(b"                          \x1b[1mN y a n  C a t\x1b[0m");
    ending.terminate(out, 2);
    out.push(b"        If the animation doesn't look right, try");
    ending.terminate(out, 1);
    out.push(b"        another rendering profile: --terminal ascii");
    ending.terminate(out, 2);
    write!(out, "        Starting in {remaining}...")?;
    ending.terminate(out, 1);
    Ok(())
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Frame;

    /// Build a 64×64 frame filled with one art character.
    fn solid_frame(ch: char) -> Frame {
        let row = ch.to_string().repeat(64);
        let rows: Vec<&str> = (0..64).map(|_| row.as_str()).collect();
        Frame::from_art(&rows).unwrap()
    }

    /// Two 64×64 frames: all sky, then all stars.
    fn sky_star_animation() -> Animation {
        Animation::new(vec![solid_frame(','), solid_frame('.')]).unwrap()
    }

    fn quick_config() -> Config {
        Config {
            frame_limit: 3,
            interval: Duration::from_millis(1),
            set_title: false,
            show_counter: false,
            ..Config::default()
        }
    }

    fn count(haystack: &[u8], needle: &[u8]) -> usize {
        haystack
            .windows(needle.len())
            .filter(|w| *w == needle)
            .count()
    }

    // ── Frame limit and wraparound ──────────────────────────────────────

    #[test]
    fn renders_exactly_the_frame_limit() {
        let animation = sky_star_animation();
        let mut player = Player::new(&animation, quick_config()).unwrap();

        let mut sink = Vec::new();
        player.run(&mut sink).unwrap();

        assert_eq!(player.frames_rendered(), 3);
        // Frames shown: 0 (sky), 1 (star), 0 (sky again). The index
        // wrapped after the last frame instead of running off the end,
        // and a 4th frame was never drawn.
        assert_eq!(count(&sink, b"\x1b[48;5;17m"), 2);
        assert_eq!(count(&sink, b"\x1b[48;5;231m"), 1);
    }

    #[test]
    fn single_frame_animation_repeats_frame_zero() {
        let animation = Animation::new(vec![solid_frame(',')]).unwrap();
        let mut player = Player::new(&animation, quick_config()).unwrap();

        let mut sink = Vec::new();
        player.run(&mut sink).unwrap();

        assert_eq!(player.frames_rendered(), 3);
        assert_eq!(count(&sink, b"\x1b[48;5;17m"), 3);
    }

    // ── Initializing ────────────────────────────────────────────────────

    #[test]
    fn clear_mode_clears_and_hides_on_startup() {
        let animation = sky_star_animation();
        let mut player = Player::new(&animation, quick_config()).unwrap();

        let mut sink = Vec::new();
        player.run(&mut sink).unwrap();

        assert!(sink.starts_with(b"\x1b[H\x1b[2J\x1b[?25l"));
    }

    #[test]
    fn reposition_mode_saves_the_cursor_instead() {
        let animation = sky_star_animation();
        let config = Config {
            display: DisplayMode::Reposition,
            ..quick_config()
        };
        let mut player = Player::new(&animation, config).unwrap();

        let mut sink = Vec::new();
        player.run(&mut sink).unwrap();

        assert!(sink.starts_with(b"\x1b[s"));
        assert_eq!(count(&sink, b"\x1b[u"), 3);
        assert_eq!(count(&sink, b"\x1b[?25l"), 0);
    }

    #[test]
    fn title_is_set_once_when_enabled() {
        let animation = sky_star_animation();
        let config = Config {
            set_title: true,
            ..quick_config()
        };
        let mut player = Player::new(&animation, config).unwrap();

        let mut sink = Vec::new();
        player.run(&mut sink).unwrap();

        assert!(sink.starts_with(b"\x1bkNyan"));
        assert_eq!(count(&sink, b"\x1b]2;"), 1);
    }

    #[test]
    fn title_is_absent_when_disabled() {
        let animation = sky_star_animation();
        let mut player = Player::new(&animation, quick_config()).unwrap();

        let mut sink = Vec::new();
        player.run(&mut sink).unwrap();

        assert_eq!(count(&sink, b"\x1b]2;"), 0);
    }

    // ── Finishing ───────────────────────────────────────────────────────

    #[test]
    fn clear_mode_restores_cursor_and_clears_on_exit() {
        let animation = sky_star_animation();
        let mut player = Player::new(&animation, quick_config()).unwrap();

        let mut sink = Vec::new();
        player.run(&mut sink).unwrap();

        assert!(sink.ends_with(b"\x1b[?25h\x1b[0m\x1b[H\x1b[2J"));
    }

    #[test]
    fn reposition_mode_exits_with_reset_and_newline() {
        let animation = sky_star_animation();
        let config = Config {
            display: DisplayMode::Reposition,
            ..quick_config()
        };
        let mut player = Player::new(&animation, config).unwrap();

        let mut sink = Vec::new();
        player.run(&mut sink).unwrap();

        assert!(sink.ends_with(b"\x1b[0m\n"));
    }

    #[test]
    fn telnet_mode_routes_the_final_newline_too() {
        let animation = sky_star_animation();
        let config = Config {
            display: DisplayMode::Reposition,
            ending: LineEnding::Telnet,
            ..quick_config()
        };
        let mut player = Player::new(&animation, config).unwrap();

        let mut sink = Vec::new();
        player.run(&mut sink).unwrap();

        assert!(sink.ends_with(b"\x1b[0m\r\0\n"));
        // Frame rows use the telnet terminator as well: 23 rows × 3 frames,
        // plus the final newline.
        assert_eq!(count(&sink, b"\r\0\n"), 23 * 3 + 1);
    }

    // ── Counter ─────────────────────────────────────────────────────────

    #[test]
    fn counter_appears_when_enabled() {
        let animation = sky_star_animation();
        let config = Config {
            show_counter: true,
            ..quick_config()
        };
        let mut player = Player::new(&animation, config).unwrap();

        let mut sink = Vec::new();
        player.run(&mut sink).unwrap();

        let text: &[u8] = b"You have nyaned for 0 seconds";
        assert_eq!(count(&sink, text), 3);
        // Centered against the 80-column display width: (80 - 29) / 2.
        let mut padded = b"\x1b[0m".to_vec();
        padded.extend_from_slice(&[b' '; 25]);
        padded.extend_from_slice(text);
        assert_eq!(count(&sink, &padded), 3);
    }

    #[test]
    fn counter_is_absent_when_disabled() {
        let animation = sky_star_animation();
        let mut player = Player::new(&animation, quick_config()).unwrap();

        let mut sink = Vec::new();
        player.run(&mut sink).unwrap();

        assert_eq!(count(&sink, b"nyaned"), 0);
    }

    #[test]
    fn counter_centering_respects_narrow_width() {
        let animation = sky_star_animation();
        let config = Config {
            profile: TerminalProfile::Narrow,
            show_counter: true,
            ..quick_config()
        };
        let mut player = Player::new(&animation, config).unwrap();

        let mut sink = Vec::new();
        player.run(&mut sink).unwrap();

        // (40 - 29) / 2 = 5 spaces of padding.
        let mut padded = b"\x1b[0m".to_vec();
        padded.extend_from_slice(&[b' '; 5]);
        padded.extend_from_slice(b"You have nyaned for 0 seconds");
        assert_eq!(count(&sink, &padded), 3);
    }

    // ── Configuration errors ────────────────────────────────────────────

    #[test]
    fn canvas_smaller_than_viewport_is_rejected() {
        let row = ",".repeat(32);
        let rows: Vec<&str> = (0..32).map(|_| row.as_str()).collect();
        let frame = Frame::from_art(&rows).unwrap();
        let animation = Animation::new(vec![frame]).unwrap();

        let err = Player::new(&animation, quick_config());
        assert!(matches!(
            err.map(|_| ()),
            Err(ConfigError::ViewportOutOfBounds { .. })
        ));
    }

    // ── Banner ──────────────────────────────────────────────────────────

    #[test]
    fn banner_lines_route_through_the_terminator() {
        let mut out = OutputBuffer::new();
        write_banner(&mut out, LineEnding::Telnet, 5).unwrap();

        let bytes = out.as_bytes().to_vec();
        assert_eq!(count(&bytes, b"\r\0\n"), 8);
        assert_eq!(count(&bytes, b"\n"), 8);
        assert_eq!(count(&bytes, b"Starting in 5..."), 1);
    }

    #[test]
    fn banner_counts_down() {
        let mut out = OutputBuffer::new();
        write_banner(&mut out, LineEnding::Plain, 2).unwrap();
        assert_eq!(count(out.as_bytes(), b"Starting in 2..."), 1);
    }
}
