//! Annotate shell command lines with box-drawing caption diagrams.
//!
//! The pipeline: a command line becomes an annotated [`span::CommandLine`],
//! either by knowledge-base lookup ([`kb`]) or from a hand-written document
//! ([`doc`]); the [`layout::Renderer`] then draws the marker row, routes a
//! vertical per caption to the left margin, and emits the caption blocks.

pub mod cli;
pub mod config;
pub mod doc;
pub mod errors;
pub mod exitcode;
pub mod glyph;
pub mod kb;
pub mod layout;
pub mod lexer;
pub mod reflow;
pub mod span;
pub mod util;

pub use kb::KnowledgeBase;
pub use layout::Renderer;
pub use span::{CommandLine, Segment};

use errors::{DocResult, KbResult};

/// Render a hand-written annotation document.
pub fn render_document(input: &str, renderer: &Renderer) -> DocResult<String> {
    Ok(renderer.render(&doc::parse(input)?))
}

/// Tokenize a raw command line, caption it from the knowledge base, render.
pub fn explain_line(kb: &KnowledgeBase, renderer: &Renderer, raw: &str) -> KbResult<String> {
    let words = lexer::split_words(raw)?;
    Ok(renderer.render(&kb.annotate_words(raw, &words)?))
}
