//! Annotated command lines
//!
//! A command line is an ordered run of segments; captioned segments become
//! diagram lanes. Offsets are display columns (unicode width), so captions
//! line up even when the command contains wide glyphs.

use unicode_width::UnicodeWidthStr;

use crate::glyph::Pen;

/// A run of the command line, optionally carrying a caption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub note: Option<String>,
}

impl Segment {
    pub fn plain(text: impl Into<String>) -> Self {
        Segment {
            text: text.into(),
            note: None,
        }
    }

    pub fn noted(text: impl Into<String>, note: impl Into<String>) -> Self {
        Segment {
            text: text.into(),
            note: Some(note.into()),
        }
    }
}

/// A captioned span projected onto diagram columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaneSpan {
    /// First display column of the token
    pub start: usize,
    /// Display width of the token
    pub width: usize,
    pub note: String,
    pub pen: Pen,
}

impl LaneSpan {
    /// Column the lane's vertical descends from: center, rounded left.
    pub fn anchor(&self) -> usize {
        self.start + (self.width - 1) / 2
    }

    /// Last display column of the token.
    pub fn end(&self) -> usize {
        self.start + self.width - 1
    }
}

/// An ordered sequence of segments forming one command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandLine {
    segments: Vec<Segment>,
}

impl CommandLine {
    pub fn new(segments: Vec<Segment>) -> Self {
        CommandLine { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The full command line text.
    pub fn header(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    /// Captioned segments as diagram lanes, left to right.
    ///
    /// With `pens` set, lane weights alternate Light, Heavy, ... to keep
    /// adjacent connector lines apart on fonts with fixed-width bold glyphs.
    pub fn lanes(&self, pens: bool) -> Vec<LaneSpan> {
        let mut lanes = Vec::new();
        let mut col = 0;
        for segment in &self.segments {
            let width = segment.text.width();
            if let Some(note) = &segment.note {
                if width > 0 && !note.is_empty() {
                    let pen = match pens {
                        true if lanes.len() % 2 == 1 => Pen::Heavy,
                        _ => Pen::Light,
                    };
                    lanes.push(LaneSpan {
                        start: col,
                        width,
                        note: note.clone(),
                        pen,
                    });
                }
            }
            col += width;
        }
        lanes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CommandLine {
        CommandLine::new(vec![
            Segment::plain("git "),
            Segment::noted("diff-tree", "compare trees"),
            Segment::plain(" "),
            Segment::noted("-M", "detect renames"),
        ])
    }

    #[test]
    fn test_header_concatenates_segments() {
        assert_eq!(sample().header(), "git diff-tree -M");
    }

    #[test]
    fn given_segments_when_projected_then_lane_offsets_accumulate() {
        let lanes = sample().lanes(false);
        assert_eq!(lanes.len(), 2);
        assert_eq!((lanes[0].start, lanes[0].width), (4, 9));
        assert_eq!((lanes[1].start, lanes[1].width), (14, 2));
        assert!(lanes.iter().all(|l| l.pen == Pen::Light));
    }

    #[test]
    fn given_anchor_rule_then_even_widths_round_left() {
        let lanes = sample().lanes(false);
        // odd width: true center; even width: left of center
        assert_eq!(lanes[0].anchor(), 8);
        assert_eq!(lanes[1].anchor(), 14);
        assert_eq!(lanes[1].end(), 15);
    }

    #[test]
    fn given_pens_enabled_then_weights_alternate_starting_light() {
        let lanes = sample().lanes(true);
        assert_eq!(lanes[0].pen, Pen::Light);
        assert_eq!(lanes[1].pen, Pen::Heavy);
    }

    #[test]
    fn given_empty_or_unnoted_segments_then_no_lane() {
        let line = CommandLine::new(vec![
            Segment::noted("", "ghost"),
            Segment::plain("ls"),
            Segment {
                text: "-l".into(),
                note: Some(String::new()),
            },
        ]);
        assert!(line.lanes(false).is_empty());
        assert_eq!(line.header(), "ls-l");
    }
}
