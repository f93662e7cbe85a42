// SPDX-License-Identifier: MIT
//
// nyan-frames — the stored animation.
//
// Twelve hand-drawn 64×64 frames of the cat, its poptart, the rainbow
// trail, and the starfield, encoded one character per cell in the color
// alphabet that `nyan-term` understands. The engine treats this as an
// opaque table; everything interesting about *how* it gets rendered
// lives on the other side of the crate boundary.

use nyan_term::error::ConfigError;
use nyan_term::frame::{Animation, Frame};

mod data;

pub use data::{CANVAS, FRAME_COUNT};

/// Parse the bundled animation into an [`Animation`].
///
/// Intended to be called once at startup; the result is immutable and
/// shared by reference for the rest of the run.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the art table is malformed. The bundled
/// table is covered by tests, so in practice this only fires while
/// editing frames.
pub fn animation() -> Result<Animation, ConfigError> {
    let mut frames = Vec::with_capacity(FRAME_COUNT);
    for art in &data::FRAMES {
        frames.push(Frame::from_art(art)?);
    }
    Animation::new(frames)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use nyan_term::viewport::Viewport;

    use super::*;

    #[test]
    fn bundled_animation_parses() {
        let animation = animation().unwrap();
        assert_eq!(animation.len(), FRAME_COUNT);
        assert_eq!(usize::from(animation.cols()), CANVAS);
        assert_eq!(usize::from(animation.rows()), CANVAS);
    }

    #[test]
    fn standard_viewport_fits_the_canvas() {
        let animation = animation().unwrap();
        assert_eq!(
            Viewport::STANDARD.validate(animation.cols(), animation.rows()),
            Ok(())
        );
    }

    #[test]
    fn frames_are_distinct() {
        // The animation actually animates: no two consecutive frames
        // are identical, and the last frame differs from the first so
        // the wraparound isn't a freeze-frame.
        let animation = animation().unwrap();
        for i in 0..animation.len() {
            let next = (i + 1) % animation.len();
            assert_ne!(animation.frame(i), animation.frame(next), "frames {i}/{next}");
        }
    }

    #[test]
    fn every_row_is_canvas_width() {
        for (f, frame) in data::FRAMES.iter().enumerate() {
            for (r, row) in frame.iter().enumerate() {
                assert_eq!(row.chars().count(), CANVAS, "frame {f}, row {r}");
            }
        }
    }
}
