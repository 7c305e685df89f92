//! Material advantage from a board's piece placement
//!
//! Everything here is computed from integer counts per piece type and
//! color: captured pieces are the starting complement minus the survivors,
//! and one side's advantage is what it captured minus what it lost, type by
//! type, so a lost knight only ever cancels a captured knight.

use shakmaty::Color;

/// Piece types in display order
const KINDS: [char; 6] = ['p', 'b', 'n', 'r', 'q', 'k'];

/// Starting complement per side, indexed like `KINDS`
const START_COUNTS: [u8; 6] = [8, 2, 2, 2, 1, 1];

/// Point values, indexed like `KINDS`
const POINTS: [u32; 6] = [1, 3, 3, 5, 9, 0];

/// Glyphs used for both colors, indexed like `KINDS`
const GLYPHS: [char; 6] = ['♙', '♗', '♘', '♖', '♕', '♔'];

type Counts = [u8; 6];

fn kind_index(letter: char) -> Option<usize> {
    let lower = letter.to_ascii_lowercase();
    KINDS.iter().position(|&k| k == lower)
}

fn color_index(color: Color) -> usize {
    match color {
        Color::White => 0,
        Color::Black => 1,
    }
}

/// Captured-piece bookkeeping for one position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterialBalance {
    /// Pieces each color has lost, indexed by color then kind
    captured: [Counts; 2],
}

impl MaterialBalance {
    /// Build from a placement string such as the board field of a FEN.
    ///
    /// Uppercase letters are white pieces, lowercase black. Rank
    /// separators, digits and anything else are ignored.
    pub fn from_placement(placement: &str) -> Self {
        let mut present: [Counts; 2] = [[0; 6]; 2];
        for ch in placement.chars() {
            if let Some(kind) = kind_index(ch) {
                let color = if ch.is_ascii_uppercase() { 0 } else { 1 };
                present[color][kind] = present[color][kind].saturating_add(1);
            }
        }

        let mut captured: [Counts; 2] = [[0; 6]; 2];
        for color in 0..2 {
            for kind in 0..6 {
                // Promotions can leave more survivors than the starting complement
                captured[color][kind] = START_COUNTS[kind].saturating_sub(present[color][kind]);
            }
        }
        Self { captured }
    }

    /// Pieces of `color` that are no longer on the board
    pub fn captured(&self, color: Color) -> Counts {
        self.captured[color_index(color)]
    }

    /// Pieces `color` has taken beyond what it lost, type by type
    pub fn advantage(&self, color: Color) -> Counts {
        let own = self.captured(color);
        let theirs = self.captured(color.other());
        let mut adv = [0; 6];
        for kind in 0..6 {
            adv[kind] = theirs[kind].saturating_sub(own[kind]);
        }
        adv
    }

    /// Point value of `color`'s advantage
    pub fn points(&self, color: Color) -> u32 {
        self.advantage(color)
            .iter()
            .zip(POINTS.iter())
            .map(|(&n, &p)| n as u32 * p)
            .sum()
    }

    /// Glyph string of `color`'s surviving advantage
    pub fn glyphs(&self, color: Color) -> String {
        let mut out = String::new();
        for (kind, &n) in self.advantage(color).iter().enumerate() {
            for _ in 0..n {
                out.push(GLYPHS[kind]);
            }
        }
        out
    }

    /// `+N` for the side ahead on points, empty for the other side and on ties
    pub fn differential(&self, color: Color) -> String {
        let ours = self.points(color) as i64;
        let theirs = self.points(color.other()) as i64;
        if ours > theirs {
            format!("+{}", ours - theirs)
        } else {
            String::new()
        }
    }
}

/// White and black advantage glyph strings for a placement
pub fn advantages(placement: &str) -> (String, String) {
    let balance = MaterialBalance::from_placement(placement);
    (balance.glyphs(Color::White), balance.glyphs(Color::Black))
}

/// White and black point differential strings for a placement
pub fn score_strings(placement: &str) -> (String, String) {
    let balance = MaterialBalance::from_placement(placement);
    (
        balance.differential(Color::White),
        balance.differential(Color::Black),
    )
}

#[cfg(test)]
#[path = "material_tests.rs"]
mod material_tests;
