// SPDX-License-Identifier: MIT
//
// Frame storage — immutable grids of color symbols.
//
// The animation ships as string art: one `&str` per canvas row, one
// character per cell. Parsing happens exactly once at startup and is
// strict (ragged rows and characters outside the color alphabet are
// configuration errors), so the render loop never has to second-guess
// the data it walks. After parsing, frames are read-only for the rest
// of the run and shared by reference.
//
// The sequence length is an explicit, first-class fact (`Animation::len`);
// there is no sentinel entry marking the end of the table.

use crate::error::ConfigError;
use crate::palette::ColorCode;

// ─── Frame ───────────────────────────────────────────────────────────────────

/// One immutable 2-D grid of color symbols, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    cols: u16,
    rows: u16,
    cells: Vec<ColorCode>,
}

impl Frame {
    /// Parse a frame from art rows.
    ///
    /// Every row must be the same width as row 0, and every character
    /// must be a known color symbol.
    ///
    /// # Errors
    ///
    /// [`ConfigError::EmptyFrame`] for zero rows,
    /// [`ConfigError::RaggedRow`] for width mismatches, and
    /// [`ConfigError::UnknownSymbol`] for characters outside the alphabet.
    pub fn from_art(rows: &[&str]) -> Result<Self, ConfigError> {
        let Some(first) = rows.first() else {
            return Err(ConfigError::EmptyFrame);
        };
        let want = first.chars().count();

        let mut cells = Vec::with_capacity(rows.len() * want);
        for (row, art) in rows.iter().enumerate() {
            let got = art.chars().count();
            if got != want {
                return Err(ConfigError::RaggedRow { row, got, want });
            }
            for (col, ch) in art.chars().enumerate() {
                match ColorCode::from_symbol(ch) {
                    Some(code) => cells.push(code),
                    None => {
                        return Err(ConfigError::UnknownSymbol {
                            symbol: ch,
                            row,
                            col,
                        });
                    }
                }
            }
        }

        Ok(Self {
            cols: want as u16,
            rows: rows.len() as u16,
            cells,
        })
    }

    /// Canvas width in cells.
    #[inline]
    #[must_use]
    pub const fn cols(&self) -> u16 {
        self.cols
    }

    /// Canvas height in cells.
    #[inline]
    #[must_use]
    pub const fn rows(&self) -> u16 {
        self.rows
    }

    /// One full row of cells.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of range. Render paths only index rows
    /// inside a viewport that was validated against this frame's extent.
    #[inline]
    #[must_use]
    pub fn row(&self, row: usize) -> &[ColorCode] {
        let cols = usize::from(self.cols);
        &self.cells[row * cols..(row + 1) * cols]
    }
}

// ─── Animation ───────────────────────────────────────────────────────────────

/// A finite, non-empty sequence of equally sized frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Animation {
    frames: Vec<Frame>,
}

impl Animation {
    /// Bundle parsed frames into an animation.
    ///
    /// # Errors
    ///
    /// [`ConfigError::EmptyAnimation`] for an empty vector, and
    /// [`ConfigError::ExtentMismatch`] if any frame's size differs from
    /// the first frame's.
    pub fn new(frames: Vec<Frame>) -> Result<Self, ConfigError> {
        let Some(first) = frames.first() else {
            return Err(ConfigError::EmptyAnimation);
        };
        let (want_cols, want_rows) = (first.cols(), first.rows());

        for (index, frame) in frames.iter().enumerate() {
            if frame.cols() != want_cols || frame.rows() != want_rows {
                return Err(ConfigError::ExtentMismatch {
                    frame: index,
                    got_cols: frame.cols(),
                    got_rows: frame.rows(),
                    want_cols,
                    want_rows,
                });
            }
        }

        Ok(Self { frames })
    }

    /// Number of frames in the sequence. Always at least 1.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always `false`; construction rejects empty sequences.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Canvas width in cells, shared by every frame.
    #[inline]
    #[must_use]
    pub fn cols(&self) -> u16 {
        self.frames[0].cols()
    }

    /// Canvas height in cells, shared by every frame.
    #[inline]
    #[must_use]
    pub fn rows(&self) -> u16 {
        self.frames[0].rows()
    }

    /// The frame at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`. The lifecycle controller advances the
    /// index modulo `len()`, so this cannot happen in the run loop.
    #[inline]
    #[must_use]
    pub fn frame(&self, index: usize) -> &Frame {
        &self.frames[index]
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(rows: &[&str]) -> Frame {
        Frame::from_art(rows).unwrap()
    }

    // ── Parsing ─────────────────────────────────────────────────────────

    #[test]
    fn parses_a_small_grid() {
        let f = frame(&[",,.", ".,'"]);
        assert_eq!(f.cols(), 3);
        assert_eq!(f.rows(), 2);
        assert_eq!(
            f.row(0),
            &[ColorCode::Sky, ColorCode::Sky, ColorCode::Star]
        );
        assert_eq!(
            f.row(1),
            &[ColorCode::Star, ColorCode::Sky, ColorCode::Border]
        );
    }

    #[test]
    fn parses_every_symbol() {
        let f = frame(&[",.'@$->&+#=;*%"]);
        assert_eq!(f.row(0), &ColorCode::ALL);
    }

    #[test]
    fn empty_art_is_rejected() {
        assert_eq!(Frame::from_art(&[]), Err(ConfigError::EmptyFrame));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        assert_eq!(
            Frame::from_art(&[",,,", ",,"]),
            Err(ConfigError::RaggedRow {
                row: 1,
                got: 2,
                want: 3
            })
        );
    }

    #[test]
    fn unknown_symbol_is_rejected_with_coordinates() {
        assert_eq!(
            Frame::from_art(&[",,,", ",x,"]),
            Err(ConfigError::UnknownSymbol {
                symbol: 'x',
                row: 1,
                col: 1
            })
        );
    }

    // ── Animation ───────────────────────────────────────────────────────

    #[test]
    fn animation_has_explicit_length() {
        let a = Animation::new(vec![frame(&[",,"]), frame(&[".."])]).unwrap();
        assert_eq!(a.len(), 2);
        assert!(!a.is_empty());
        assert_eq!(a.cols(), 2);
        assert_eq!(a.rows(), 1);
    }

    #[test]
    fn empty_animation_is_rejected() {
        assert_eq!(Animation::new(vec![]), Err(ConfigError::EmptyAnimation));
    }

    #[test]
    fn mismatched_frame_extents_are_rejected() {
        let err = Animation::new(vec![frame(&[",,"]), frame(&[",,,"])]);
        assert_eq!(
            err,
            Err(ConfigError::ExtentMismatch {
                frame: 1,
                got_cols: 3,
                got_rows: 1,
                want_cols: 2,
                want_rows: 1
            })
        );
    }

    #[test]
    fn frames_are_addressable_by_index() {
        let a = Animation::new(vec![frame(&[","]), frame(&["."])]).unwrap();
        assert_eq!(a.frame(0).row(0), &[ColorCode::Sky]);
        assert_eq!(a.frame(1).row(0), &[ColorCode::Star]);
    }
}
