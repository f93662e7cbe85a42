// SPDX-License-Identifier: MIT
//
// nyan-term — Terminal rendering engine for nyan.
//
// Takes a stored grid of semantic color symbols and turns it into the
// smallest escape-sequence stream a given class of terminal needs:
// profile tables map symbols to tokens, a diffing renderer skips
// redundant escapes, a viewport crops the oversized canvas, and the
// lifecycle controller loops frames at a fixed interval with a clean
// terminal restore on exit.
//
// This crate intentionally avoids terminal frameworks (ratatui,
// crossterm) in favor of direct ANSI output. Every byte sent to the
// terminal is accounted for, which is the whole point: the supported
// profiles range from xterm-256 down to terminals where an escape
// sequence is just line noise.

pub mod ansi;
pub mod error;
pub mod frame;
pub mod output;
pub mod palette;
pub mod player;
pub mod render;
pub mod viewport;
