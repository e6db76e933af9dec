//! Caption text wrapping
//!
//! Captions may carry explicit newlines and indentation (usage examples in
//! particular); those survive. Each source line wraps independently to the
//! column budget, continuation lines inheriting the source line's indent.

use unicode_width::UnicodeWidthStr;

/// Wrap `text` to at most `width` display columns per line.
///
/// Blank source lines are dropped. A line that already fits is kept verbatim,
/// interior spacing included (usage examples rely on column alignment). A
/// word wider than the budget is emitted unbroken on its own line.
pub fn reflow(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut out = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let line = line.trim_end();
        if line.width() <= width {
            out.push(line.to_string());
            continue;
        }
        let indent: String = line.chars().take_while(|c| c.is_whitespace()).collect();
        let budget = width.saturating_sub(indent.width()).max(1);
        for wrapped in wrap_words(line.trim_start(), budget) {
            out.push(format!("{indent}{wrapped}"));
        }
    }
    out
}

fn wrap_words(line: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in line.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.width() + 1 + word.width() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_short_text_when_reflowed_then_single_line() {
        assert_eq!(reflow("Detect renames", 40), vec!["Detect renames"]);
    }

    #[test]
    fn given_long_text_when_reflowed_then_wraps_at_word_boundaries() {
        let lines = reflow("Compares the content and mode of blobs found", 20);
        assert_eq!(
            lines,
            vec!["Compares the content", "and mode of blobs", "found"]
        );
    }

    #[test]
    fn given_embedded_newlines_when_reflowed_then_lines_kept_and_blanks_dropped() {
        let text = "Show only names\n\nfor example:\n   M   foo.py";
        let lines = reflow(text, 60);
        assert_eq!(
            lines,
            vec!["Show only names", "for example:", "   M   foo.py"]
        );
    }

    #[test]
    fn given_indented_line_when_wrapped_then_continuation_inherits_indent() {
        let lines = reflow("  alpha beta gamma delta", 12);
        assert_eq!(lines, vec!["  alpha beta", "  gamma", "  delta"]);
    }

    #[test]
    fn given_fitting_line_when_reflowed_then_interior_spacing_kept() {
        assert_eq!(reflow("   M   foo.py", 40), vec!["   M   foo.py"]);
    }

    #[test]
    fn given_word_wider_than_budget_when_reflowed_then_emitted_unbroken() {
        let lines = reflow("supercalifragilistic yes", 5);
        assert_eq!(lines, vec!["supercalifragilistic", "yes"]);
    }
}
