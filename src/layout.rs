//! Diagram layout engine
//!
//! Turns an annotated command line into rows: the command itself, a marker
//! row underlining each captioned token, one routing row per lane walking its
//! vertical to the left margin, then a caption block per lane. Rows are built
//! independently and composed with the glyph overlay, so crossings come out
//! as the right junction characters without special cases.

use itertools::Itertools;
use tracing::{debug, instrument};

use crate::glyph::{overlay, Arm, Joint, Pen};
use crate::reflow::reflow;
use crate::span::{CommandLine, LaneSpan};

/// A routed vertical carrying a caption.
#[derive(Debug, Clone)]
struct Lane {
    col: usize,
    pen: Pen,
    note: String,
}

/// Renders annotated command lines as connector diagrams.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    width: usize,
    pens: bool,
}

impl Default for Renderer {
    fn default() -> Self {
        Renderer {
            width: 80,
            pens: false,
        }
    }
}

impl Renderer {
    pub fn new(width: usize, pens: bool) -> Self {
        Renderer { width, pens }
    }

    /// Render the full diagram, one string with embedded newlines.
    #[instrument(level = "debug", skip_all)]
    pub fn render(&self, line: &CommandLine) -> String {
        let spans = line.lanes(self.pens);
        debug!(lanes = spans.len(), "rendering command line");

        let mut rows = vec![line.header()];
        if spans.is_empty() {
            return rows.remove(0);
        }

        let (marker, mut lanes) = marker_row(&spans);
        rows.push(marker);

        for i in 0..lanes.len() {
            rows.push(shift_row(&mut lanes, i));
        }
        for i in 0..lanes.len() {
            rows.extend(self.caption_rows(&lanes, i));
        }
        rows.into_iter().join("\n")
    }

    /// Caption block for lane `i`: connector row plus continuation rows for
    /// wrapped text, with the remaining lanes passing through.
    fn caption_rows(&self, lanes: &[Lane], i: usize) -> Vec<String> {
        let count = lanes.len();
        let text_col = count + 2;
        let lane = &lanes[i];

        // `└` at the lane column, dashes out one column past the last lane;
        // pass-through verticals cross it via the overlay.
        let mut elbow = String::new();
        elbow.push(Joint::arm(Arm::North, lane.pen).with(Arm::East, lane.pen).glyph());
        let dash = Joint::arm(Arm::East, lane.pen).with(Arm::West, lane.pen).glyph();
        for _ in i + 1..=count {
            elbow.push(dash);
        }
        let mut parts = vec![place(i, &elbow)];
        for passing in &lanes[i + 1..] {
            parts.push(vertical(passing));
        }
        let connector = overlay(&parts);

        let text = reflow(&lane.note, self.width.saturating_sub(text_col));
        let mut rows = Vec::new();
        match text.split_first() {
            None => rows.push(connector),
            Some((first, rest)) => {
                rows.push(format!("{connector} {first}"));
                let pass = overlay(lanes[i + 1..].iter().map(vertical));
                for line in rest {
                    rows.push(format!("{:<text_col$}{}", pass, line));
                }
            }
        }
        rows
    }
}

/// Underline each captioned token and gather its caption onto a vertical at
/// the token's anchor column.
fn marker_row(spans: &[LaneSpan]) -> (String, Vec<Lane>) {
    let mut parts = Vec::new();
    for span in spans {
        parts.push(stub(span.start, Arm::North, span.pen));
        parts.push(stub(span.end(), Arm::North, span.pen));
        parts.push(hline(span.start, span.anchor(), span.pen));
        parts.push(hline(span.end(), span.anchor(), span.pen));
        parts.push(stub(span.anchor(), Arm::South, span.pen));
    }
    let lanes = spans
        .iter()
        .map(|span| Lane {
            col: span.anchor(),
            pen: span.pen,
            note: span.note.clone(),
        })
        .collect();
    (overlay(&parts), lanes)
}

/// One routing row: walk lane `i` from its current column to column `i`,
/// other lanes passing straight through.
fn shift_row(lanes: &mut [Lane], i: usize) -> String {
    let from = lanes[i].col;
    let mut parts = vec![stub(from, Arm::North, lanes[i].pen)];
    parts.push(hline(from, i, lanes[i].pen));
    lanes[i].col = i;
    parts.push(stub(i, Arm::South, lanes[i].pen));
    for (j, lane) in lanes.iter().enumerate() {
        if j != i {
            parts.push(vertical(lane));
        }
    }
    overlay(&parts)
}

fn place(col: usize, s: &str) -> String {
    format!("{}{}", " ".repeat(col), s)
}

fn stub(col: usize, arm: Arm, pen: Pen) -> String {
    place(col, &Joint::arm(arm, pen).glyph().to_string())
}

fn vertical(lane: &Lane) -> String {
    place(
        lane.col,
        &Joint::arm(Arm::North, lane.pen)
            .with(Arm::South, lane.pen)
            .glyph()
            .to_string(),
    )
}

/// A capped horizontal run between two columns; empty when they coincide.
fn hline(a: usize, b: usize, pen: Pen) -> String {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    if lo == hi {
        return String::new();
    }
    let mut line = String::new();
    line.push(Joint::arm(Arm::East, pen).glyph());
    for _ in lo + 1..hi {
        line.push(Joint::arm(Arm::East, pen).with(Arm::West, pen).glyph());
    }
    line.push(Joint::arm(Arm::West, pen).glyph());
    place(lo, &line)
}
