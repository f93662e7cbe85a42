// SPDX-License-Identifier: MIT
//
// ANSI escape sequence generation.
//
// Pure functions that write escape sequences to any `impl Write`. No
// state, no decisions about when to emit — the renderer and lifecycle
// controller own those. This module just knows the byte-level encoding
// of every terminal command the animation needs.
//
// All functions return `io::Result` propagated from the underlying
// writer. In practice they never fail when writing to `OutputBuffer`
// (backed by a Vec).

use std::io::{self, Write};

// ─── Cursor ──────────────────────────────────────────────────────────────────

/// Move the cursor to the top-left corner (CUP with no arguments).
#[inline]
pub fn cursor_home(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[H")
}

/// Hide the cursor (DECTCEM reset).
#[inline]
pub fn cursor_hide(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25l")
}

/// Show the cursor (DECTCEM set).
#[inline]
pub fn cursor_show(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25h")
}

/// Save the cursor position (ANSI.SYS-style SCP).
///
/// Paired with [`restore_cursor`]; used when the animation redraws in
/// place instead of clearing the screen.
#[inline]
pub fn save_cursor(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[s")
}

/// Restore the cursor to the saved position (RCP).
#[inline]
pub fn restore_cursor(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[u")
}

// ─── Screen ──────────────────────────────────────────────────────────────────

/// Clear the entire screen (ED 2).
#[inline]
pub fn clear_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[2J")
}

/// Reset all SGR attributes to terminal defaults (SGR 0).
#[inline]
pub fn reset(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[0m")
}

// ─── Title ───────────────────────────────────────────────────────────────────

/// Set the terminal title, three ways at once.
///
/// Emits the GNU screen / tmux `ESC k … ESC \` sequence plus OSC 1
/// (icon name) and OSC 2 (window title), so the title sticks whether
/// we're talking to a multiplexer or a plain emulator.
pub fn set_title(w: &mut impl Write, title: &str) -> io::Result<()> {
    write!(w, "\x1bk{title}\x1b\\")?;
    write!(w, "\x1b]1;{title}\x07")?;
    write!(w, "\x1b]2;{title}\x07")
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper: run an ANSI function and return its output as a string.
    fn emit<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    // ── Cursor ──────────────────────────────────────────────────────────

    #[test]
    fn cursor_home_sequence() {
        assert_eq!(emit(|w| cursor_home(w)), "\x1b[H");
    }

    #[test]
    fn cursor_hide_sequence() {
        assert_eq!(emit(|w| cursor_hide(w)), "\x1b[?25l");
    }

    #[test]
    fn cursor_show_sequence() {
        assert_eq!(emit(|w| cursor_show(w)), "\x1b[?25h");
    }

    #[test]
    fn save_restore_sequences() {
        assert_eq!(emit(|w| save_cursor(w)), "\x1b[s");
        assert_eq!(emit(|w| restore_cursor(w)), "\x1b[u");
    }

    // ── Screen ──────────────────────────────────────────────────────────

    #[test]
    fn clear_screen_sequence() {
        assert_eq!(emit(|w| clear_screen(w)), "\x1b[2J");
    }

    #[test]
    fn reset_sequence() {
        assert_eq!(emit(|w| reset(w)), "\x1b[0m");
    }

    // ── Title ───────────────────────────────────────────────────────────

    #[test]
    fn title_targets_multiplexers_and_emulators() {
        let s = emit(|w| set_title(w, "nyan"));
        assert!(s.starts_with("\x1bknyan\x1b\\"));
        assert!(s.contains("\x1b]1;nyan\x07"));
        assert!(s.ends_with("\x1b]2;nyan\x07"));
    }

    #[test]
    fn sequences_compose_in_order() {
        let mut buf = Vec::new();
        cursor_home(&mut buf).unwrap();
        clear_screen(&mut buf).unwrap();
        cursor_hide(&mut buf).unwrap();
        assert_eq!(buf, b"\x1b[H\x1b[2J\x1b[?25l");
    }
}
