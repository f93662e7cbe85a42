// SPDX-License-Identifier: MIT
//
// Color profiles — the mapping from semantic color symbols to output tokens.
//
// Frame art is stored as a grid of 14 semantic color symbols (sky, star,
// rainbow bands, cat fur, ...). A profile turns each symbol into the byte
// sequence a particular class of terminal understands: an SGR background
// escape for color terminals, or a literal glyph for terminals that have
// no colors at all.
//
// Profiles are immutable constants. Exactly one is active per run,
// selected on the command line; there is no runtime construction or
// merging. Tokens are byte strings rather than `&str` because the shaded
// profile emits raw CP437 0xDB bytes, which are not valid UTF-8.
//
// Two profile-level flags drive the renderer:
//
//   always_escape — emit the token for every cell instead of only when
//   the color changes. Used by the glyph profiles: their "tokens" are
//   the visible characters themselves, and the terminals they target
//   cannot track escape state across cursor motion anyway.
//
//   display_width — nominal terminal column count, used to center
//   status text. 80 for the two-column-per-cell profiles, 40 for the
//   narrow single-column fallback.

// ─── ColorCode ───────────────────────────────────────────────────────────────

/// A semantic color slot in the stored animation.
///
/// Every cell of every frame is one of these. The art encoding is a
/// single ASCII character per cell (see [`ColorCode::symbol`]); parsing
/// rejects anything outside this closed alphabet, so "unknown symbol"
/// is a startup error and never a render-time case. What *can* happen
/// at render time is a profile that maps a symbol to no token; the
/// renderer then falls back to the fill glyph (see `render`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ColorCode {
    /// `,` — the blue sky filling most of the canvas.
    Sky = 0,
    /// `.` — white stars streaking past.
    Star,
    /// `'` — black outline pixels.
    Border,
    /// `@` — the tan poptart body.
    Tart,
    /// `$` — pink frosting on the poptart.
    Frosting,
    /// `-` — red sprinkles in the frosting.
    Sprinkle,
    /// `>` — red rainbow band.
    RainbowRed,
    /// `&` — orange rainbow band.
    RainbowOrange,
    /// `+` — yellow rainbow band.
    RainbowYellow,
    /// `#` — green rainbow band.
    RainbowGreen,
    /// `=` — light blue rainbow band.
    RainbowBlue,
    /// `;` — dark blue rainbow band.
    RainbowIndigo,
    /// `*` — gray cat face and limbs.
    Fur,
    /// `%` — pink cheeks.
    Cheek,
}

impl ColorCode {
    /// Number of distinct color symbols.
    pub const COUNT: usize = 14;

    /// Every color code, in token-table order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Sky,
        Self::Star,
        Self::Border,
        Self::Tart,
        Self::Frosting,
        Self::Sprinkle,
        Self::RainbowRed,
        Self::RainbowOrange,
        Self::RainbowYellow,
        Self::RainbowGreen,
        Self::RainbowBlue,
        Self::RainbowIndigo,
        Self::Fur,
        Self::Cheek,
    ];

    /// Decode one art character, or `None` if it is outside the alphabet.
    #[must_use]
    pub const fn from_symbol(ch: char) -> Option<Self> {
        match ch {
            ',' => Some(Self::Sky),
            '.' => Some(Self::Star),
            '\'' => Some(Self::Border),
            '@' => Some(Self::Tart),
            '$' => Some(Self::Frosting),
            '-' => Some(Self::Sprinkle),
            '>' => Some(Self::RainbowRed),
            '&' => Some(Self::RainbowOrange),
            '+' => Some(Self::RainbowYellow),
            '#' => Some(Self::RainbowGreen),
            '=' => Some(Self::RainbowBlue),
            ';' => Some(Self::RainbowIndigo),
            '*' => Some(Self::Fur),
            '%' => Some(Self::Cheek),
            _ => None,
        }
    }

    /// The character this color is written as in frame art.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Sky => ',',
            Self::Star => '.',
            Self::Border => '\'',
            Self::Tart => '@',
            Self::Frosting => '$',
            Self::Sprinkle => '-',
            Self::RainbowRed => '>',
            Self::RainbowOrange => '&',
            Self::RainbowYellow => '+',
            Self::RainbowGreen => '#',
            Self::RainbowBlue => '=',
            Self::RainbowIndigo => ';',
            Self::Fur => '*',
            Self::Cheek => '%',
        }
    }
}

// ─── Palette ─────────────────────────────────────────────────────────────────

/// One rendering profile: symbol→token table plus rendering flags.
///
/// `tokens` is indexed by `ColorCode as usize`. A `None` slot means the
/// profile has no token for that symbol; the renderer emits only the
/// fill glyph for such cells and leaves its diff state untouched. All
/// seven built-in profiles map every symbol. The `Option` exists so
/// that fallback is an explicit, testable case rather than an implicit
/// null check.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    /// Output token per color code, indexed by discriminant.
    pub tokens: [Option<&'static [u8]>; ColorCode::COUNT],
    /// Glyph pair printed for every cell in diffed profiles.
    pub fill: &'static [u8],
    /// Emit the token for every cell, ignoring the diff state.
    pub always_escape: bool,
    /// Nominal terminal column count, for centering status text.
    pub display_width: u16,
}

impl Palette {
    /// The output token for a color, or `None` if the profile omits it.
    #[inline]
    #[must_use]
    pub const fn token(&self, code: ColorCode) -> Option<&'static [u8]> {
        self.tokens[code as usize]
    }
}

// ─── Built-in profiles ───────────────────────────────────────────────────────

/// xterm-256: one background escape per color, exact palette indices.
const ANSI_256: Palette = Palette {
    tokens: [
        Some(b"\x1b[48;5;17m"),  // Sky
        Some(b"\x1b[48;5;231m"), // Star
        Some(b"\x1b[48;5;16m"),  // Border
        Some(b"\x1b[48;5;230m"), // Tart
        Some(b"\x1b[48;5;175m"), // Frosting
        Some(b"\x1b[48;5;162m"), // Sprinkle
        Some(b"\x1b[48;5;196m"), // RainbowRed
        Some(b"\x1b[48;5;214m"), // RainbowOrange
        Some(b"\x1b[48;5;226m"), // RainbowYellow
        Some(b"\x1b[48;5;118m"), // RainbowGreen
        Some(b"\x1b[48;5;33m"),  // RainbowBlue
        Some(b"\x1b[48;5;19m"),  // RainbowIndigo
        Some(b"\x1b[48;5;240m"), // Fur
        Some(b"\x1b[48;5;175m"), // Cheek
    ],
    fill: b"  ",
    always_escape: false,
    display_width: 80,
};

/// 16-color: aixterm bright-background codes where the palette allows.
const ANSI_16: Palette = Palette {
    tokens: [
        Some(b"\x1b[104m"), // Sky
        Some(b"\x1b[107m"), // Star
        Some(b"\x1b[40m"),  // Border
        Some(b"\x1b[47m"),  // Tart
        Some(b"\x1b[105m"), // Frosting
        Some(b"\x1b[101m"), // Sprinkle
        Some(b"\x1b[101m"), // RainbowRed
        Some(b"\x1b[43m"),  // RainbowOrange
        Some(b"\x1b[103m"), // RainbowYellow
        Some(b"\x1b[102m"), // RainbowGreen
        Some(b"\x1b[104m"), // RainbowBlue
        Some(b"\x1b[44m"),  // RainbowIndigo
        Some(b"\x1b[100m"), // Fur
        Some(b"\x1b[105m"), // Cheek
    ],
    fill: b"  ",
    always_escape: false,
    display_width: 80,
};

/// Blink fallback for terminals with only the 8 base background colors:
/// SGR 5 (blink) fakes the bright half of the palette.
const BLINK: Palette = Palette {
    tokens: [
        Some(b"\x1b[25;44m"), // Sky
        Some(b"\x1b[5;47m"),  // Star
        Some(b"\x1b[25;40m"), // Border
        Some(b"\x1b[5;47m"),  // Tart
        Some(b"\x1b[5;45m"),  // Frosting
        Some(b"\x1b[5;41m"),  // Sprinkle
        Some(b"\x1b[5;41m"),  // RainbowRed
        Some(b"\x1b[25;43m"), // RainbowOrange
        Some(b"\x1b[5;43m"),  // RainbowYellow
        Some(b"\x1b[5;42m"),  // RainbowGreen
        Some(b"\x1b[25;44m"), // RainbowBlue
        Some(b"\x1b[5;44m"),  // RainbowIndigo
        Some(b"\x1b[5;40m"),  // Fur
        Some(b"\x1b[5;45m"),  // Cheek
    ],
    fill: b"  ",
    always_escape: false,
    display_width: 80,
};

/// Bold foreground + matching background, drawn with solid block glyphs.
/// Shared by the block and shaded profiles, which differ only in fill.
const BLOCK_TOKENS: [Option<&'static [u8]>; ColorCode::COUNT] = [
    Some(b"\x1b[0;34;44m"), // Sky
    Some(b"\x1b[1;37;47m"), // Star
    Some(b"\x1b[0;30;40m"), // Border
    Some(b"\x1b[1;37;47m"), // Tart
    Some(b"\x1b[1;35;45m"), // Frosting
    Some(b"\x1b[1;31;41m"), // Sprinkle
    Some(b"\x1b[1;31;41m"), // RainbowRed
    Some(b"\x1b[0;33;43m"), // RainbowOrange
    Some(b"\x1b[1;33;43m"), // RainbowYellow
    Some(b"\x1b[1;32;42m"), // RainbowGreen
    Some(b"\x1b[1;34;44m"), // RainbowBlue
    Some(b"\x1b[0;34;44m"), // RainbowIndigo
    Some(b"\x1b[1;30;40m"), // Fur
    Some(b"\x1b[1;35;45m"), // Cheek
];

const BLOCK: Palette = Palette {
    tokens: BLOCK_TOKENS,
    fill: "██".as_bytes(),
    always_escape: false,
    display_width: 80,
};

/// CP437 rendition: same colors, raw 0xDB full-block bytes as fill.
/// The fill is intentionally not UTF-8; code pages are byte-oriented.
const SHADED: Palette = Palette {
    tokens: BLOCK_TOKENS,
    fill: b"\xDB\xDB",
    always_escape: false,
    display_width: 80,
};

/// Plain-text rendition: the token IS the visible glyph pair, emitted
/// for every cell. Targets terminals that render no escapes at all.
const ASCII: Palette = Palette {
    tokens: [
        Some(b"::"), // Sky
        Some(b"@@"), // Star
        Some(b"  "), // Border
        Some(b"##"), // Tart
        Some(b"??"), // Frosting
        Some(b"<>"), // Sprinkle
        Some(b"##"), // RainbowRed
        Some(b"=="), // RainbowOrange
        Some(b"--"), // RainbowYellow
        Some(b"++"), // RainbowGreen
        Some(b"~~"), // RainbowBlue
        Some(b"$$"), // RainbowIndigo
        Some(b";;"), // Fur
        Some(b"()"), // Cheek
    ],
    fill: b"  ",
    always_escape: true,
    display_width: 80,
};

/// 40-column fallback: one character per cell so the standard window
/// still fits a narrow display.
const NARROW: Palette = Palette {
    tokens: [
        Some(b"."), // Sky
        Some(b"@"), // Star
        Some(b" "), // Border
        Some(b"#"), // Tart
        Some(b"?"), // Frosting
        Some(b"O"), // Sprinkle
        Some(b"#"), // RainbowRed
        Some(b"="), // RainbowOrange
        Some(b"-"), // RainbowYellow
        Some(b"+"), // RainbowGreen
        Some(b"~"), // RainbowBlue
        Some(b"$"), // RainbowIndigo
        Some(b";"), // Fur
        Some(b"o"), // Cheek
    ],
    fill: b" ",
    always_escape: true,
    display_width: 40,
};

// ─── TerminalProfile ─────────────────────────────────────────────────────────

/// The built-in rendering profiles, in decreasing order of terminal
/// capability. Selected once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminalProfile {
    /// xterm-256 background colors.
    Ansi256,
    /// 16-color ANSI with aixterm bright backgrounds.
    Ansi16,
    /// 8-color backgrounds with SGR blink standing in for brightness.
    Blink,
    /// Bold foreground colors drawn with `██` block glyphs.
    Block,
    /// CP437 code-page rendition with raw 0xDB shade bytes.
    Shaded,
    /// Escape-free glyph pairs for dumb terminals.
    Ascii,
    /// Single-character glyphs for 40-column displays.
    Narrow,
}

impl TerminalProfile {
    /// Every profile, most capable first.
    pub const ALL: [Self; 7] = [
        Self::Ansi256,
        Self::Ansi16,
        Self::Blink,
        Self::Block,
        Self::Shaded,
        Self::Ascii,
        Self::Narrow,
    ];

    /// The static palette this profile renders with.
    #[must_use]
    pub const fn palette(self) -> &'static Palette {
        match self {
            Self::Ansi256 => &ANSI_256,
            Self::Ansi16 => &ANSI_16,
            Self::Blink => &BLINK,
            Self::Block => &BLOCK,
            Self::Shaded => &SHADED,
            Self::Ascii => &ASCII,
            Self::Narrow => &NARROW,
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── Symbol round trip ───────────────────────────────────────────────

    #[test]
    fn every_code_round_trips_through_its_symbol() {
        for code in ColorCode::ALL {
            assert_eq!(ColorCode::from_symbol(code.symbol()), Some(code));
        }
    }

    #[test]
    fn symbols_are_distinct() {
        for (i, a) in ColorCode::ALL.iter().enumerate() {
            for b in &ColorCode::ALL[i + 1..] {
                assert_ne!(a.symbol(), b.symbol());
            }
        }
    }

    #[test]
    fn unknown_symbols_decode_to_none() {
        assert_eq!(ColorCode::from_symbol('x'), None);
        assert_eq!(ColorCode::from_symbol(' '), None);
        assert_eq!(ColorCode::from_symbol('\n'), None);
    }

    #[test]
    fn all_table_matches_count() {
        assert_eq!(ColorCode::ALL.len(), ColorCode::COUNT);
    }

    // ── Profile tables ──────────────────────────────────────────────────

    #[test]
    fn builtin_profiles_map_every_symbol() {
        for profile in TerminalProfile::ALL {
            let palette = profile.palette();
            for code in ColorCode::ALL {
                let token = palette.token(code);
                assert!(token.is_some(), "{profile:?} is missing {code:?}");
                assert!(!token.unwrap().is_empty());
            }
        }
    }

    #[test]
    fn escape_profiles_use_csi_tokens() {
        for profile in [
            TerminalProfile::Ansi256,
            TerminalProfile::Ansi16,
            TerminalProfile::Blink,
            TerminalProfile::Block,
            TerminalProfile::Shaded,
        ] {
            let palette = profile.palette();
            assert!(!palette.always_escape);
            for code in ColorCode::ALL {
                let token = palette.token(code).unwrap();
                assert!(token.starts_with(b"\x1b["), "{profile:?} {code:?}");
                assert!(token.ends_with(b"m"));
            }
        }
    }

    #[test]
    fn glyph_profiles_always_escape() {
        assert!(TerminalProfile::Ascii.palette().always_escape);
        assert!(TerminalProfile::Narrow.palette().always_escape);
    }

    #[test]
    fn glyph_profiles_emit_no_escapes() {
        for profile in [TerminalProfile::Ascii, TerminalProfile::Narrow] {
            for code in ColorCode::ALL {
                let token = profile.palette().token(code).unwrap();
                assert!(!token.contains(&0x1b), "{profile:?} {code:?}");
            }
        }
    }

    #[test]
    fn ansi256_sky_is_background_17() {
        let token = TerminalProfile::Ansi256.palette().token(ColorCode::Sky);
        assert_eq!(token, Some(b"\x1b[48;5;17m".as_slice()));
    }

    // ── Fill glyphs and widths ──────────────────────────────────────────

    #[test]
    fn narrow_profile_is_forty_columns_wide() {
        let palette = TerminalProfile::Narrow.palette();
        assert_eq!(palette.display_width, 40);
        // One column per cell: tokens are single bytes.
        for code in ColorCode::ALL {
            assert_eq!(palette.token(code).unwrap().len(), 1);
        }
    }

    #[test]
    fn standard_profiles_are_eighty_columns_wide() {
        for profile in TerminalProfile::ALL {
            if profile != TerminalProfile::Narrow {
                assert_eq!(profile.palette().display_width, 80);
            }
        }
    }

    #[test]
    fn shaded_fill_is_raw_cp437_blocks() {
        assert_eq!(TerminalProfile::Shaded.palette().fill, b"\xDB\xDB");
    }

    #[test]
    fn block_fill_is_utf8_blocks() {
        assert_eq!(TerminalProfile::Block.palette().fill, "██".as_bytes());
    }

    #[test]
    fn block_and_shaded_share_colors() {
        let block = TerminalProfile::Block.palette();
        let shaded = TerminalProfile::Shaded.palette();
        for code in ColorCode::ALL {
            assert_eq!(block.token(code), shaded.token(code));
        }
    }
}
