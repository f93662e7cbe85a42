// SPDX-License-Identifier: MIT
//
// Configuration errors — everything that can be rejected before the
// animation starts running.
//
// The taxonomy is deliberately small. Frame art and viewport bounds are
// validated once at startup; after that the render path is infallible
// (a symbol the active profile doesn't map is defined behavior, not an
// error: see the renderer's fill-only fallback). Output failures are
// plain `io::Error` and terminate the process.

use thiserror::Error;

/// A fatal misconfiguration detected before rendering starts.
///
/// All variants are reported once and exit the process non-zero.
/// Nothing here is retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The animation table has zero frames.
    #[error("animation contains no frames")]
    EmptyAnimation,

    /// A frame has zero rows.
    #[error("frame has no rows")]
    EmptyFrame,

    /// A frame's rows are not all the same width.
    #[error("frame row {row} is {got} cells wide, expected {want}")]
    RaggedRow {
        /// Zero-based row index within the frame.
        row: usize,
        /// Width of the offending row.
        got: usize,
        /// Width of row 0, which sets the frame's extent.
        want: usize,
    },

    /// Frame art contains a character outside the color alphabet.
    #[error("unknown color symbol {symbol:?} at row {row}, column {col}")]
    UnknownSymbol {
        /// The unrecognized character.
        symbol: char,
        /// Zero-based row index within the frame.
        row: usize,
        /// Zero-based column index within the row.
        col: usize,
    },

    /// A frame's extent differs from the first frame's.
    #[error("frame {frame} is {got_cols}x{got_rows}, expected {want_cols}x{want_rows}")]
    ExtentMismatch {
        /// Zero-based frame index within the animation.
        frame: usize,
        got_cols: u16,
        got_rows: u16,
        want_cols: u16,
        want_rows: u16,
    },

    /// The viewport selects zero rows or zero columns.
    #[error("viewport rows {min_row}..{max_row} / columns {min_col}..{max_col} are empty")]
    EmptyViewport {
        min_row: u16,
        max_row: u16,
        min_col: u16,
        max_col: u16,
    },

    /// The viewport extends past the stored canvas.
    #[error(
        "viewport rows {min_row}..{max_row} / columns {min_col}..{max_col} \
         exceed the {cols}x{rows} canvas"
    )]
    ViewportOutOfBounds {
        min_row: u16,
        max_row: u16,
        min_col: u16,
        max_col: u16,
        /// Canvas width in cells.
        cols: u16,
        /// Canvas height in cells.
        rows: u16,
    },
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_symbol_names_the_character() {
        let e = ConfigError::UnknownSymbol {
            symbol: 'x',
            row: 3,
            col: 7,
        };
        let msg = e.to_string();
        assert!(msg.contains("'x'"));
        assert!(msg.contains("row 3"));
        assert!(msg.contains("column 7"));
    }

    #[test]
    fn viewport_out_of_bounds_names_the_canvas() {
        let e = ConfigError::ViewportOutOfBounds {
            min_row: 20,
            max_row: 43,
            min_col: 10,
            max_col: 50,
            cols: 32,
            rows: 32,
        };
        assert!(e.to_string().contains("32x32"));
    }

    #[test]
    fn errors_are_comparable() {
        assert_eq!(ConfigError::EmptyAnimation, ConfigError::EmptyAnimation);
        assert_ne!(ConfigError::EmptyAnimation, ConfigError::EmptyFrame);
    }
}
