//! Annotation documents
//!
//! A hand-written alternative to the knowledge base: the command line on the
//! first non-blank line, then one `# token` block per caption:
//!
//! ```text
//! git log -m thingy
//!
//! # git
//! version control ting
//!
//! # log
//! do some logging innit
//! ```
//!
//! Tokens are located in the command line by literal search, left to right,
//! each search resuming after the previous match, so repeating a heading
//! annotates the token's next occurrence.

use std::path::Path;

use regex::Regex;
use tracing::debug;

use crate::errors::{DocError, DocResult};
use crate::span::{CommandLine, Segment};

/// Parse a document into an annotated command line.
pub fn parse(input: &str) -> DocResult<CommandLine> {
    let heading = Regex::new(r"^#\s*(.*)$").expect("heading pattern");

    let mut lines = input.lines().enumerate();
    let command = loop {
        match lines.next() {
            None => return Err(DocError::MissingCommandLine),
            Some((_, line)) if line.trim().is_empty() => continue,
            Some((_, line)) if line.trim_start().starts_with('#') => {
                return Err(DocError::MissingCommandLine)
            }
            Some((_, line)) => break line.trim_end().to_string(),
        }
    };

    let mut blocks: Vec<(String, Vec<String>)> = Vec::new();
    for (idx, line) in lines {
        if let Some(caps) = heading.captures(line.trim_start()) {
            let token = caps[1].trim().to_string();
            if token.is_empty() {
                return Err(DocError::EmptyHeading { line: idx + 1 });
            }
            blocks.push((token, Vec::new()));
        } else if let Some((_, caption)) = blocks.last_mut() {
            caption.push(line.trim_end().to_string());
        } else if !line.trim().is_empty() {
            return Err(DocError::StrayText { line: idx + 1 });
        }
    }
    debug!(blocks = blocks.len(), "document parsed");

    let mut matches: Vec<(usize, usize, String)> = Vec::new();
    let mut cursor = 0;
    for (token, caption) in blocks {
        let pattern = Regex::new(&regex::escape(&token)).expect("escaped token pattern");
        let found = pattern
            .find_at(&command, cursor)
            .ok_or(DocError::UnknownToken { token })?;
        cursor = found.end();
        matches.push((found.start(), found.end(), join_caption(caption)));
    }

    let mut segments = Vec::new();
    let mut pos = 0;
    for (start, end, caption) in matches {
        if start > pos {
            segments.push(Segment::plain(&command[pos..start]));
        }
        segments.push(Segment::noted(&command[start..end], caption));
        pos = end;
    }
    if pos < command.len() {
        segments.push(Segment::plain(&command[pos..]));
    }
    Ok(CommandLine::new(segments))
}

/// Parse a document from a file.
pub fn parse_file(path: &Path) -> DocResult<CommandLine> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

fn join_caption(lines: Vec<String>) -> String {
    let text = lines.join("\n");
    text.trim_matches('\n').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
git log -m thingy

# git
version control ting

# log
do some logging innit
";

    #[test]
    fn given_document_when_parsed_then_tokens_annotated_in_order() {
        let line = parse(SAMPLE).unwrap();
        assert_eq!(line.header(), "git log -m thingy");
        let noted: Vec<(&str, &str)> = line
            .segments()
            .iter()
            .filter_map(|s| s.note.as_deref().map(|n| (s.text.as_str(), n)))
            .collect();
        assert_eq!(
            noted,
            vec![("git", "version control ting"), ("log", "do some logging innit")]
        );
    }

    #[test]
    fn given_repeated_heading_when_parsed_then_next_occurrence_matches() {
        let doc = "cp a.txt a.txt.bak\n\n# a.txt\nthe source\n\n# a.txt\npart of the backup name\n";
        let line = parse(doc).unwrap();
        let spans = line.lanes(false);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].start, 3);
        assert_eq!(spans[1].start, 9);
    }

    #[test]
    fn given_caption_with_blank_interior_line_when_parsed_then_kept() {
        let doc = "x --f\n\n# --f\nfirst\n\nsecond\n";
        let line = parse(doc).unwrap();
        let note = line.segments().last().unwrap().note.clone().unwrap();
        assert_eq!(note, "first\n\nsecond");
    }

    #[test]
    fn given_empty_document_when_parsed_then_missing_command_line() {
        assert!(matches!(parse("\n  \n"), Err(DocError::MissingCommandLine)));
        assert!(matches!(
            parse("# git\noops\n"),
            Err(DocError::MissingCommandLine)
        ));
    }

    #[test]
    fn given_unknown_token_when_parsed_then_errors() {
        let doc = "ls -l\n\n# -z\nnope\n";
        assert!(matches!(
            parse(doc),
            Err(DocError::UnknownToken { token }) if token == "-z"
        ));
    }

    #[test]
    fn given_empty_heading_when_parsed_then_errors() {
        let doc = "ls -l\n\n#\nnope\n";
        assert!(matches!(parse(doc), Err(DocError::EmptyHeading { line: 3 })));
    }

    #[test]
    fn given_text_before_heading_when_parsed_then_errors() {
        let doc = "ls -l\nstray\n";
        assert!(matches!(parse(doc), Err(DocError::StrayText { line: 2 })));
    }
}
