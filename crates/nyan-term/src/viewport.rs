// SPDX-License-Identifier: MIT
//
// Viewport — the cropped sub-rectangle of the canvas that is displayed.
//
// Frames are drawn on a canvas larger than what fits a terminal; only a
// fixed window of it is ever rendered. Bounds are half-open and validated
// once at startup against the animation's extent, so cropping itself is
// plain slice indexing with no render-time checks.

use std::ops::Range;

use crate::error::ConfigError;
use crate::frame::Frame;
use crate::palette::ColorCode;

/// Half-open crop window over the stored canvas, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// First visible row.
    pub min_row: u16,
    /// One past the last visible row.
    pub max_row: u16,
    /// First visible column.
    pub min_col: u16,
    /// One past the last visible column.
    pub max_col: u16,
}

impl Viewport {
    /// The standard window: 23×40 cells out of the 64×64 canvas.
    ///
    /// Two-column profiles render this as 80 terminal columns; the
    /// narrow profile renders one column per cell, so the same window
    /// is the 40-column crop.
    pub const STANDARD: Self = Self {
        min_row: 20,
        max_row: 43,
        min_col: 10,
        max_col: 50,
    };

    /// Visible height in cells.
    #[inline]
    #[must_use]
    pub const fn height(self) -> u16 {
        self.max_row.saturating_sub(self.min_row)
    }

    /// Visible width in cells.
    #[inline]
    #[must_use]
    pub const fn width(self) -> u16 {
        self.max_col.saturating_sub(self.min_col)
    }

    /// The visible row indices, top to bottom.
    #[inline]
    #[must_use]
    pub fn row_range(self) -> Range<usize> {
        usize::from(self.min_row)..usize::from(self.max_row)
    }

    /// The visible column indices, left to right.
    #[inline]
    #[must_use]
    pub fn col_range(self) -> Range<usize> {
        usize::from(self.min_col)..usize::from(self.max_col)
    }

    /// The visible cells of a frame, one row slice at a time, top to
    /// bottom.
    ///
    /// # Panics
    ///
    /// Panics if the window extends past the frame; call
    /// [`validate`](Self::validate) against the animation's extent first.
    pub fn crop(self, frame: &Frame) -> impl Iterator<Item = &[ColorCode]> {
        self.row_range()
            .map(move |row| &frame.row(row)[self.col_range()])
    }

    /// Check the window against a canvas extent.
    ///
    /// Called before the animation enters its run loop; a failure here
    /// is fatal misconfiguration, never a render-time condition.
    ///
    /// # Errors
    ///
    /// [`ConfigError::EmptyViewport`] if the window selects no cells,
    /// [`ConfigError::ViewportOutOfBounds`] if it extends past the canvas.
    pub fn validate(self, cols: u16, rows: u16) -> Result<(), ConfigError> {
        if self.min_row >= self.max_row || self.min_col >= self.max_col {
            return Err(ConfigError::EmptyViewport {
                min_row: self.min_row,
                max_row: self.max_row,
                min_col: self.min_col,
                max_col: self.max_col,
            });
        }
        if self.max_row > rows || self.max_col > cols {
            return Err(ConfigError::ViewportOutOfBounds {
                min_row: self.min_row,
                max_row: self.max_row,
                min_col: self.min_col,
                max_col: self.max_col,
                cols,
                rows,
            });
        }
        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_window_is_23_by_40() {
        assert_eq!(Viewport::STANDARD.height(), 23);
        assert_eq!(Viewport::STANDARD.width(), 40);
    }

    #[test]
    fn standard_window_fits_the_canvas() {
        assert_eq!(Viewport::STANDARD.validate(64, 64), Ok(()));
    }

    #[test]
    fn window_past_the_canvas_is_rejected() {
        let err = Viewport::STANDARD.validate(32, 32);
        assert!(matches!(
            err,
            Err(ConfigError::ViewportOutOfBounds { cols: 32, rows: 32, .. })
        ));
    }

    #[test]
    fn window_exactly_at_the_edge_is_accepted() {
        let v = Viewport {
            min_row: 0,
            max_row: 64,
            min_col: 0,
            max_col: 64,
        };
        assert_eq!(v.validate(64, 64), Ok(()));
    }

    #[test]
    fn empty_window_is_rejected() {
        let v = Viewport {
            min_row: 10,
            max_row: 10,
            min_col: 0,
            max_col: 5,
        };
        assert!(matches!(
            v.validate(64, 64),
            Err(ConfigError::EmptyViewport { .. })
        ));
    }

    #[test]
    fn inverted_window_is_rejected() {
        let v = Viewport {
            min_row: 12,
            max_row: 4,
            min_col: 0,
            max_col: 5,
        };
        assert!(matches!(
            v.validate(64, 64),
            Err(ConfigError::EmptyViewport { .. })
        ));
    }

    #[test]
    fn ranges_match_bounds() {
        let v = Viewport::STANDARD;
        assert_eq!(v.row_range(), 20..43);
        assert_eq!(v.col_range(), 10..50);
    }

    #[test]
    fn crop_yields_the_visible_sub_rectangle() {
        let frame = Frame::from_art(&[
            "....", //
            ".,,.", //
            ".,'.", //
            "....",
        ])
        .unwrap();
        let v = Viewport {
            min_row: 1,
            max_row: 3,
            min_col: 1,
            max_col: 3,
        };

        let rows: Vec<&[ColorCode]> = v.crop(&frame).collect();
        assert_eq!(
            rows,
            vec![
                &[ColorCode::Sky, ColorCode::Sky][..],
                &[ColorCode::Sky, ColorCode::Border][..],
            ]
        );
    }

    #[test]
    fn crop_is_deterministic() {
        let frame = Frame::from_art(&[",.", ".,"]).unwrap();
        let v = Viewport {
            min_row: 0,
            max_row: 2,
            min_col: 0,
            max_col: 2,
        };
        let a: Vec<_> = v.crop(&frame).collect();
        let b: Vec<_> = v.crop(&frame).collect();
        assert_eq!(a, b);
    }
}
