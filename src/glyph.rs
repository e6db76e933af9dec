//! Box-drawing glyph algebra
//!
//! A diagram cell is a `Joint`: up to four arms (north/south/east/west), each
//! drawn with a light or heavy pen. Joints map to the U+2500 block and can be
//! composed, which is how crossings like `┼` and `╂` fall out of overlaying
//! independently drawn rows.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Line weight of a drawn arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Pen {
    Light,
    Heavy,
}

/// Compass direction of a joint arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arm {
    North,
    South,
    East,
    West,
}

/// A box-drawing junction: four optional arms, each with a pen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Joint {
    pub n: Option<Pen>,
    pub s: Option<Pen>,
    pub e: Option<Pen>,
    pub w: Option<Pen>,
}

/// Recipe strings follow the convention of lowercase for light and uppercase
/// for heavy, arms always listed in n, s, e, w order.
const GLYPHS: &[(&str, char)] = &[
    ("ew", '─'),
    ("EW", '━'),
    ("ns", '│'),
    ("NS", '┃'),
    ("se", '┌'),
    ("sE", '┍'),
    ("Se", '┎'),
    ("SE", '┏'),
    ("sw", '┐'),
    ("sW", '┑'),
    ("Sw", '┒'),
    ("SW", '┓'),
    ("ne", '└'),
    ("nE", '┕'),
    ("Ne", '┖'),
    ("NE", '┗'),
    ("nw", '┘'),
    ("nW", '┙'),
    ("Nw", '┚'),
    ("NW", '┛'),
    ("nse", '├'),
    ("nsE", '┝'),
    ("Nse", '┞'),
    ("nSe", '┟'),
    ("NSe", '┠'),
    ("NsE", '┡'),
    ("nSE", '┢'),
    ("NSE", '┣'),
    ("nsw", '┤'),
    ("nsW", '┥'),
    ("Nsw", '┦'),
    ("nSw", '┧'),
    ("NSw", '┨'),
    ("NsW", '┩'),
    ("nSW", '┪'),
    ("NSW", '┫'),
    ("sew", '┬'),
    ("seW", '┭'),
    ("sEw", '┮'),
    ("sEW", '┯'),
    ("Sew", '┰'),
    ("SeW", '┱'),
    ("SEw", '┲'),
    ("SEW", '┳'),
    ("new", '┴'),
    ("neW", '┵'),
    ("nEw", '┶'),
    ("nEW", '┷'),
    ("New", '┸'),
    ("NeW", '┹'),
    ("NEw", '┺'),
    ("NEW", '┻'),
    ("nsew", '┼'),
    ("nseW", '┽'),
    ("nsEw", '┾'),
    ("nsEW", '┿'),
    ("Nsew", '╀'),
    ("nSew", '╁'),
    ("NSew", '╂'),
    ("NseW", '╃'),
    ("NsEw", '╄'),
    ("nSeW", '╅'),
    ("nSEw", '╆'),
    ("NsEW", '╇'),
    ("nSEW", '╈'),
    ("NSeW", '╉'),
    ("NSEw", '╊'),
    ("NSEW", '╋'),
    ("w", '╴'),
    ("n", '╵'),
    ("e", '╶'),
    ("s", '╷'),
    ("W", '╸'),
    ("N", '╹'),
    ("E", '╺'),
    ("S", '╻'),
    ("Ew", '╼'),
    ("nS", '╽'),
    ("eW", '╾'),
    ("Ns", '╿'),
];

fn recipe_to_glyph() -> &'static HashMap<&'static str, char> {
    static MAP: OnceLock<HashMap<&'static str, char>> = OnceLock::new();
    MAP.get_or_init(|| GLYPHS.iter().copied().collect())
}

fn glyph_to_joint() -> &'static HashMap<char, Joint> {
    static MAP: OnceLock<HashMap<char, Joint>> = OnceLock::new();
    MAP.get_or_init(|| {
        GLYPHS
            .iter()
            .map(|(recipe, glyph)| (*glyph, Joint::parse_recipe(recipe)))
            .collect()
    })
}

impl Joint {
    /// A joint with a single arm.
    pub fn arm(arm: Arm, pen: Pen) -> Self {
        Joint::default().with(arm, pen)
    }

    /// Add an arm, heavy winning over light on conflict.
    pub fn with(mut self, arm: Arm, pen: Pen) -> Self {
        let slot = match arm {
            Arm::North => &mut self.n,
            Arm::South => &mut self.s,
            Arm::East => &mut self.e,
            Arm::West => &mut self.w,
        };
        *slot = heavier(*slot, Some(pen));
        self
    }

    /// Per-arm union of two joints; heavy wins where both draw an arm.
    pub fn merge(self, other: Joint) -> Joint {
        Joint {
            n: heavier(self.n, other.n),
            s: heavier(self.s, other.s),
            e: heavier(self.e, other.e),
            w: heavier(self.w, other.w),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.n.is_none() && self.s.is_none() && self.e.is_none() && self.w.is_none()
    }

    /// The Unicode box-drawing character for this joint; space when empty.
    pub fn glyph(&self) -> char {
        if self.is_empty() {
            return ' ';
        }
        let recipe = self.recipe();
        *recipe_to_glyph()
            .get(recipe.as_str())
            .unwrap_or(&' ')
    }

    /// Reverse lookup: `None` for anything that is not a box-drawing glyph.
    pub fn from_char(c: char) -> Option<Joint> {
        glyph_to_joint().get(&c).copied()
    }

    fn recipe(&self) -> String {
        let mut out = String::with_capacity(4);
        for (slot, lower, upper) in [
            (self.n, 'n', 'N'),
            (self.s, 's', 'S'),
            (self.e, 'e', 'E'),
            (self.w, 'w', 'W'),
        ] {
            match slot {
                Some(Pen::Light) => out.push(lower),
                Some(Pen::Heavy) => out.push(upper),
                None => {}
            }
        }
        out
    }

    fn parse_recipe(recipe: &str) -> Joint {
        let mut joint = Joint::default();
        for c in recipe.chars() {
            let pen = if c.is_uppercase() { Pen::Heavy } else { Pen::Light };
            let arm = match c.to_ascii_lowercase() {
                'n' => Arm::North,
                's' => Arm::South,
                'e' => Arm::East,
                _ => Arm::West,
            };
            joint = joint.with(arm, pen);
        }
        joint
    }
}

fn heavier(a: Option<Pen>, b: Option<Pen>) -> Option<Pen> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.max(y)),
        (x, None) => x,
        (None, y) => y,
    }
}

/// Compose two characters sharing a cell.
///
/// A space loses to anything; a non-box character beats a box character, with
/// the first operand preferred; two box characters merge their joints.
pub fn overlay_chars(a: char, b: char) -> char {
    if a == ' ' {
        return b;
    }
    if b == ' ' {
        return a;
    }
    match (Joint::from_char(a), Joint::from_char(b)) {
        (Some(ja), Some(jb)) => ja.merge(jb).glyph(),
        (None, _) => a,
        (_, None) => b,
    }
}

/// Cell-wise overlay of two rows; the shorter row pads with spaces.
pub fn overlay_rows(a: &str, b: &str) -> String {
    let mut ca = a.chars();
    let mut cb = b.chars();
    let mut out = String::new();
    loop {
        match (ca.next(), cb.next()) {
            (None, None) => break,
            (x, y) => out.push(overlay_chars(x.unwrap_or(' '), y.unwrap_or(' '))),
        }
    }
    out
}

/// Fold any number of rows into one.
pub fn overlay<I, S>(rows: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    rows.into_iter()
        .fold(String::new(), |acc, row| overlay_rows(&acc, row.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_roundtrip_covers_table() {
        for (recipe, glyph) in GLYPHS {
            let joint = Joint::parse_recipe(recipe);
            assert_eq!(joint.glyph(), *glyph, "recipe {recipe}");
            assert_eq!(Joint::from_char(*glyph), Some(joint), "glyph {glyph}");
        }
    }

    #[test]
    fn test_empty_joint_renders_space() {
        assert_eq!(Joint::default().glyph(), ' ');
        assert!(Joint::from_char('x').is_none());
    }

    #[test]
    fn given_two_light_arms_when_merged_then_composes_corner() {
        let corner = Joint::arm(Arm::North, Pen::Light).merge(Joint::arm(Arm::East, Pen::Light));
        assert_eq!(corner.glyph(), '└');
    }

    #[test]
    fn given_conflicting_pens_when_merged_then_heavy_wins() {
        let vertical = Joint::arm(Arm::North, Pen::Light)
            .with(Arm::South, Pen::Light)
            .merge(Joint::arm(Arm::North, Pen::Heavy).with(Arm::South, Pen::Heavy));
        assert_eq!(vertical.glyph(), '┃');
    }

    #[test]
    fn given_light_horizontal_and_heavy_vertical_when_overlaid_then_mixed_crossing() {
        assert_eq!(overlay_chars('─', '┃'), '╂');
        assert_eq!(overlay_chars('│', '─'), '┼');
    }

    #[test]
    fn given_text_and_line_when_overlaid_then_text_wins() {
        assert_eq!(overlay_chars('a', '─'), 'a');
        assert_eq!(overlay_chars('─', 'a'), 'a');
        assert_eq!(overlay_chars(' ', '─'), '─');
    }

    #[test]
    fn given_rows_of_unequal_length_when_overlaid_then_pads_with_spaces() {
        assert_eq!(overlay_rows("╶─╴", " ╷ ╷"), "╶┬╴╷");
        assert_eq!(overlay(["╵  ", " ╵ ", "──────"]), "┴┴────");
    }
}
