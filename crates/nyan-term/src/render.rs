// SPDX-License-Identifier: MIT
//
// Diffing renderer — the core of the output pipeline.
//
// A naive renderer would emit a color escape for every cell: 920 escapes
// per frame. But the art is mostly long runs of a single color (sky,
// rainbow bands), and a terminal's background attribute is sticky: once
// set, it applies to everything printed until it changes. So the renderer
// carries one piece of state across cells, the last color it escaped to,
// and emits a new escape only when the current cell differs. A typical
// frame collapses to a few dozen escapes.
//
// The state is deliberately reset after every frame, not carried across
// frames: the lifecycle controller repositions (or clears) the cursor
// between frames, and some terminals drop attribute state on exactly
// those operations. Forcing the first cell of each frame to re-escape
// costs one token and removes a whole class of leaked-attribute bugs.
//
// Glyph profiles set `always_escape` and bypass the diff entirely. For
// them the "token" is the visible character pair itself, and the
// terminals they target can't track escape state across cursor motion.

use crate::frame::Frame;
use crate::output::{LineEnding, OutputBuffer};
use crate::palette::{ColorCode, Palette};
use crate::viewport::Viewport;

// ─── RenderStats ─────────────────────────────────────────────────────────────

/// Statistics from rendering one frame, for tests and debugging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderStats {
    /// Cells walked (viewport width × height).
    pub cells: usize,
    /// Color tokens emitted.
    pub escapes: usize,
    /// Total bytes appended to the output buffer.
    pub bytes: usize,
}

// ─── FrameRenderer ───────────────────────────────────────────────────────────

/// Stateful per-frame renderer.
///
/// Walks the viewport row by row, resolving each cell's color through
/// the active palette and emitting the minimal escape stream. The only
/// mutable state is the last escaped color, reset to "none" at the end
/// of every frame so the next frame starts with an explicit escape.
pub struct FrameRenderer {
    last: Option<ColorCode>,
}

impl FrameRenderer {
    /// Create a renderer with no prior color state.
    #[must_use]
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Render one frame's viewport into `out`.
    ///
    /// Per cell:
    /// - `always_escape` profiles emit the token unconditionally (the
    ///   token is the glyph; there is no separate fill).
    /// - Otherwise, a cell whose color differs from the last escaped
    ///   color emits token + fill and updates the state; a cell with
    ///   the same color emits only the fill.
    /// - A color the palette doesn't map emits only the fill and leaves
    ///   the state untouched, so the diff keeps comparing against the
    ///   last color that actually reached the terminal.
    ///
    /// Every row ends with `ending`'s terminator. After the last row
    /// the color state is reset, so no escape state survives the cursor
    /// reset between frames.
    pub fn render(
        &mut self,
        frame: &Frame,
        viewport: Viewport,
        palette: &Palette,
        ending: LineEnding,
        out: &mut OutputBuffer,
    ) -> RenderStats {
        let mut stats = RenderStats::default();
        let start = out.len();

        for cells in viewport.crop(frame) {
            for &code in cells {
                stats.cells += 1;
                match palette.token(code) {
                    Some(token) if palette.always_escape => {
                        out.push(token);
                        stats.escapes += 1;
                    }
                    Some(token) if self.last != Some(code) => {
                        out.push(token);
                        out.push(palette.fill);
                        self.last = Some(code);
                        stats.escapes += 1;
                    }
                    _ => out.push(palette.fill),
                }
            }
            ending.terminate(out, 1);
        }

        self.last = None;
        stats.bytes = out.len() - start;
        stats
    }
}

impl Default for FrameRenderer {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::frame::Frame;
    use crate::palette::TerminalProfile;

    /// A palette with readable stand-in tokens: `,` → "::", `.` → "@@",
    /// fill "  ". Only those two symbols are mapped, so the other twelve
    /// exercise the unmapped fallback.
    fn two_color_palette(always_escape: bool) -> Palette {
        let mut tokens: [Option<&'static [u8]>; ColorCode::COUNT] =
            [None; ColorCode::COUNT];
        tokens[ColorCode::Sky as usize] = Some(b"::");
        tokens[ColorCode::Star as usize] = Some(b"@@");
        Palette {
            tokens,
            fill: b"  ",
            always_escape,
            display_width: 80,
        }
    }

    fn full_view(frame: &Frame) -> Viewport {
        Viewport {
            min_row: 0,
            max_row: frame.rows(),
            min_col: 0,
            max_col: frame.cols(),
        }
    }

    fn render_to_string(
        renderer: &mut FrameRenderer,
        frame: &Frame,
        palette: &Palette,
        ending: LineEnding,
    ) -> (RenderStats, String) {
        let mut out = OutputBuffer::new();
        let stats = renderer.render(frame, full_view(frame), palette, ending, &mut out);
        (stats, String::from_utf8(out.as_bytes().to_vec()).unwrap())
    }

    // ── Diff suppression ────────────────────────────────────────────────

    #[test]
    fn run_of_one_color_escapes_once() {
        let frame = Frame::from_art(&[",,,,"]).unwrap();
        let palette = two_color_palette(false);
        let mut renderer = FrameRenderer::new();

        let (stats, output) =
            render_to_string(&mut renderer, &frame, &palette, LineEnding::Plain);

        // One escape, then fill glyphs: "::" + "  " + "  "×3.
        assert_eq!(output, "::        \n");
        assert_eq!(stats.escapes, 1);
        assert_eq!(stats.cells, 4);
    }

    #[test]
    fn color_change_re_escapes() {
        let frame = Frame::from_art(&[",,.."]).unwrap();
        let palette = two_color_palette(false);
        let mut renderer = FrameRenderer::new();

        let (stats, output) =
            render_to_string(&mut renderer, &frame, &palette, LineEnding::Plain);

        assert_eq!(output, "::    @@    \n");
        assert_eq!(stats.escapes, 2);
    }

    #[test]
    fn diff_state_spans_rows_within_a_frame() {
        // Row 1 ends on Star; row 2 begins with Star: no new escape.
        let frame = Frame::from_art(&[",.", ".,"]).unwrap();
        let palette = two_color_palette(false);
        let mut renderer = FrameRenderer::new();

        let (stats, output) =
            render_to_string(&mut renderer, &frame, &palette, LineEnding::Plain);

        assert_eq!(output, "::  @@  \n  ::  \n");
        assert_eq!(stats.escapes, 3);
    }

    #[test]
    fn three_by_three_grid_escapes_where_colors_change() {
        let frame = Frame::from_art(&[",,.", "..,", ",,,"]).unwrap();
        let palette = two_color_palette(false);
        let mut renderer = FrameRenderer::new();

        let (stats, output) =
            render_to_string(&mut renderer, &frame, &palette, LineEnding::Plain);

        // Row 1: escape for Sky, fill, escape for Star.
        // Row 2: continues row 1's state (Star), so only the last cell
        // escapes back to Sky.
        // Row 3: all Sky, no escapes at all.
        assert_eq!(output, "::    @@  \n    ::  \n      \n");
        assert_eq!(stats.escapes, 3);
        assert_eq!(stats.cells, 9);
    }

    // ── Cursor-reset invariant ──────────────────────────────────────────

    #[test]
    fn first_cell_of_next_frame_always_escapes() {
        let frame = Frame::from_art(&[",,"]).unwrap();
        let palette = two_color_palette(false);
        let mut renderer = FrameRenderer::new();

        let (first, _) =
            render_to_string(&mut renderer, &frame, &palette, LineEnding::Plain);
        // Same frame again: the color didn't change, but the state was
        // reset at the frame boundary, so the escape is re-emitted.
        let (second, output) =
            render_to_string(&mut renderer, &frame, &palette, LineEnding::Plain);

        assert_eq!(first.escapes, 1);
        assert_eq!(second.escapes, 1);
        assert!(output.starts_with("::"));
    }

    // ── Determinism ─────────────────────────────────────────────────────

    #[test]
    fn identical_inputs_produce_identical_bytes() {
        let frame = Frame::from_art(&[",.,", ".,."]).unwrap();
        let palette = two_color_palette(false);

        let mut a = FrameRenderer::new();
        let mut b = FrameRenderer::new();
        let (_, out_a) = render_to_string(&mut a, &frame, &palette, LineEnding::Plain);
        let (_, out_b) = render_to_string(&mut b, &frame, &palette, LineEnding::Plain);

        assert_eq!(out_a, out_b);

        // And again from the same renderer: the frame-end reset restores
        // the initial state, so the bytes repeat exactly.
        let (_, out_c) = render_to_string(&mut a, &frame, &palette, LineEnding::Plain);
        assert_eq!(out_a, out_c);
    }

    // ── always_escape override ──────────────────────────────────────────

    #[test]
    fn always_escape_emits_token_per_cell() {
        let frame = Frame::from_art(&[",,.."]).unwrap();
        let palette = two_color_palette(true);
        let mut renderer = FrameRenderer::new();

        let (stats, output) =
            render_to_string(&mut renderer, &frame, &palette, LineEnding::Plain);

        // Token per cell, no fill, even across identical neighbors.
        assert_eq!(output, "::::@@@@\n");
        assert_eq!(stats.escapes, 4);
    }

    #[test]
    fn ascii_profile_output_is_pure_glyphs() {
        let frame = Frame::from_art(&[",.'@"]).unwrap();
        let palette = TerminalProfile::Ascii.palette();
        let mut renderer = FrameRenderer::new();

        let (_, output) =
            render_to_string(&mut renderer, &frame, palette, LineEnding::Plain);

        assert_eq!(output, "::@@  ##\n");
    }

    // ── Unmapped-symbol fallback ────────────────────────────────────────

    #[test]
    fn unmapped_symbol_emits_fill_only() {
        // Fur is not mapped in the test palette.
        let frame = Frame::from_art(&[",*,"]).unwrap();
        let palette = two_color_palette(false);
        let mut renderer = FrameRenderer::new();

        let (stats, output) =
            render_to_string(&mut renderer, &frame, &palette, LineEnding::Plain);

        // The unmapped cell contributes its fill, and because it never
        // touched the diff state, the third cell is still "same color"
        // and emits no escape.
        assert_eq!(output, "::      \n");
        assert_eq!(stats.escapes, 1);
    }

    #[test]
    fn unmapped_symbol_in_always_escape_profile_emits_fill() {
        let frame = Frame::from_art(&["*"]).unwrap();
        let palette = two_color_palette(true);
        let mut renderer = FrameRenderer::new();

        let (stats, output) =
            render_to_string(&mut renderer, &frame, &palette, LineEnding::Plain);

        assert_eq!(output, "  \n");
        assert_eq!(stats.escapes, 0);
    }

    // ── Row terminators ─────────────────────────────────────────────────

    #[test]
    fn every_row_ends_with_the_plain_terminator() {
        let frame = Frame::from_art(&[",", ",", ","]).unwrap();
        let palette = two_color_palette(false);
        let mut renderer = FrameRenderer::new();

        let (_, output) =
            render_to_string(&mut renderer, &frame, &palette, LineEnding::Plain);

        assert_eq!(output.matches('\n').count(), 3);
        assert!(output.ends_with('\n'));
    }

    #[test]
    fn telnet_mode_terminates_rows_with_cr_nul_lf() {
        let frame = Frame::from_art(&[",,", ",,"]).unwrap();
        let palette = two_color_palette(false);
        let mut renderer = FrameRenderer::new();

        let mut out = OutputBuffer::new();
        renderer.render(
            &frame,
            full_view(&frame),
            &palette,
            LineEnding::Telnet,
            &mut out,
        );

        let bytes = out.as_bytes();
        assert_eq!(bytes, b"::    \r\0\n    \r\0\n");
    }

    // ── Viewport cropping ───────────────────────────────────────────────

    #[test]
    fn only_the_viewport_is_rendered() {
        let frame = Frame::from_art(&[
            "....", //
            ".,,.", //
            ".,,.", //
            "....",
        ])
        .unwrap();
        let viewport = Viewport {
            min_row: 1,
            max_row: 3,
            min_col: 1,
            max_col: 3,
        };
        let palette = two_color_palette(false);
        let mut renderer = FrameRenderer::new();

        let mut out = OutputBuffer::new();
        let stats = renderer.render(&frame, viewport, &palette, LineEnding::Plain, &mut out);

        // Only the inner 2×2 of Sky is visible; the Star border is cropped.
        assert_eq!(out.as_bytes(), b"::    \n    \n");
        assert_eq!(stats.cells, 4);
        assert_eq!(stats.escapes, 1);
    }

    // ── Stats ───────────────────────────────────────────────────────────

    #[test]
    fn bytes_counts_only_this_frame() {
        let frame = Frame::from_art(&[","]).unwrap();
        let palette = two_color_palette(false);
        let mut renderer = FrameRenderer::new();

        let mut out = OutputBuffer::new();
        out.push(b"prelude");
        let stats = renderer.render(
            &frame,
            full_view(&frame),
            &palette,
            LineEnding::Plain,
            &mut out,
        );

        // "::" + "  " + "\n" = 5 bytes, not counting the prelude.
        assert_eq!(stats.bytes, 5);
        assert_eq!(out.len(), 12);
    }

    // ── Real profile smoke test ─────────────────────────────────────────

    #[test]
    fn ansi256_run_collapses_to_one_escape() {
        let frame = Frame::from_art(&[",,,,,,,,"]).unwrap();
        let palette = TerminalProfile::Ansi256.palette();
        let mut renderer = FrameRenderer::new();

        let (stats, output) =
            render_to_string(&mut renderer, &frame, palette, LineEnding::Plain);

        assert_eq!(stats.escapes, 1);
        assert_eq!(output, format!("\x1b[48;5;17m{}\n", "  ".repeat(8)));
    }
}
