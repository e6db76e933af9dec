//! Tests for annotation documents, end to end through the renderer

use rstest::rstest;
use tempfile::TempDir;

use shexplain::errors::DocError;
use shexplain::util::testing;
use shexplain::{doc, render_document, Renderer};

const SAMPLE: &str = "\
git log -m thingy

# git
version control ting

# log
do some logging innit
";

#[test]
fn given_document_when_rendered_then_diagram_matches() {
    testing::init_test_setup();
    let out = render_document(SAMPLE, &Renderer::default()).unwrap();
    let expected = "\
git log -m thingy
└┬┘ └┬┘
┌┘   │
│┌───┘
└┼─ version control ting
 └─ do some logging innit";
    assert_eq!(out, expected);
}

#[test]
fn given_document_file_when_parsed_then_same_as_string() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("sample.expl");
    std::fs::write(&path, SAMPLE).unwrap();

    let from_file = doc::parse_file(&path).unwrap();
    let from_str = doc::parse(SAMPLE).unwrap();

    assert_eq!(from_file, from_str);
}

#[test]
fn given_missing_file_when_parsed_then_io_error() {
    let temp = TempDir::new().unwrap();
    let result = doc::parse_file(&temp.path().join("absent.expl"));
    assert!(matches!(result, Err(DocError::Io(_))));
}

#[rstest]
#[case::empty("", "no command line")]
#[case::only_blank("\n\n  \n", "no command line")]
#[case::heading_first("# git\nx\n", "no command line")]
#[case::unknown_token("ls -l\n\n# -z\nzap\n", "-z")]
#[case::empty_heading("ls -l\n\n#   \nzap\n", "empty")]
#[case::stray_text("ls -l\nwhat is this\n", "before any")]
fn given_invalid_document_when_parsed_then_error_mentions(
    #[case] input: &str,
    #[case] needle: &str,
) {
    let err = doc::parse(input).unwrap_err();
    assert!(
        err.to_string().contains(needle),
        "error `{err}` should mention `{needle}`"
    );
}

#[test]
fn given_multiline_caption_when_rendered_then_continuation_rows_align() {
    let input = "\
mv old new

# old
current name

# new
target name;
must not exist
";
    let out = render_document(input, &Renderer::default()).unwrap();
    let expected = "\
mv old new
   └┬┘ └┬┘
┌───┘   │
│┌──────┘
└┼─ current name
 └─ target name;
    must not exist";
    assert_eq!(out, expected);
}
