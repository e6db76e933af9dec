//! Knowledge base of command explanations
//!
//! Entries are TOML documents, one command each: a summary, an options map,
//! an ordered operand list, and optionally one level of subcommands with
//! their own scope. A few entries ship compiled in; user entries live as
//! `*.toml` files under the configured directory and override built-ins of
//! the same name.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, instrument};
use walkdir::WalkDir;

use crate::errors::{KbError, KbResult};
use crate::lexer::Word;
use crate::span::{CommandLine, Segment};

const BUILTIN_GIT: &str = r#"
name = "git"
summary = "the stupid content tracker"

[options]
"--no-pager" = "Do not pipe Git output into a pager"
"-C" = "Run as if git was started in the given path"

[subcommands.diff-tree]
summary = "Compares the content and mode of blobs found via two tree objects"

[subcommands.diff-tree.options]
"-M" = "Detect renames"
"-r" = "recurse into subtrees"
"--name-status" = """
Show only names and status of changed files

for example:
   M   foo.py"""

[[subcommands.diff-tree.operands]]
name = "<commit>"
about = "show differences between this commit and preceding one"

[subcommands.log]
summary = "Show commit logs"

[subcommands.log.options]
"-m" = "Include diffs for merge commits"
"-p" = "Generate patch text for each commit"
"--oneline" = "Shorthand for --pretty=oneline --abbrev-commit"

[[subcommands.log.operands]]
name = "<revision-range>"
about = "Show only commits in the specified revision range"
"#;

const BUILTIN_TAR: &str = r#"
name = "tar"
summary = "an archiving utility"

[options]
"-x" = "extract files from an archive"
"-c" = "create a new archive"
"-v" = "verbosely list files processed"
"-z" = "filter the archive through gzip"
"-f" = "use the following archive file"

[[operands]]
name = "<archive>"
about = "archive file to operate on"

[[operands]]
name = "<file>"
about = "files to add or extract"
"#;

/// A positional argument slot, consumed in order.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Operand {
    pub name: String,
    pub about: String,
}

/// One lookup scope: either a command's top level or one subcommand.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Scope {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub options: BTreeMap<String, String>,
    #[serde(default)]
    pub operands: Vec<Operand>,
}

/// A command entry: its own scope plus named subcommand scopes.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CommandEntry {
    pub name: String,
    #[serde(flatten)]
    pub scope: Scope,
    #[serde(default)]
    pub subcommands: BTreeMap<String, Scope>,
}

/// All known command entries, keyed by command name.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    entries: HashMap<String, CommandEntry>,
}

impl KnowledgeBase {
    /// The compiled-in entries.
    pub fn builtin() -> Self {
        let mut kb = KnowledgeBase::default();
        for doc in [BUILTIN_GIT, BUILTIN_TAR] {
            // compiled-in documents are validated by the test suite
            let entry: CommandEntry = toml::from_str(doc).expect("builtin entry parses");
            kb.entries.insert(entry.name.clone(), entry);
        }
        kb
    }

    /// Built-ins overlaid with the user directory, when it exists.
    #[instrument(level = "debug")]
    pub fn load(user_dir: Option<&Path>) -> KbResult<Self> {
        let mut kb = Self::builtin();
        if let Some(dir) = user_dir {
            if dir.is_dir() {
                kb.insert_dir(dir)?;
            }
        }
        debug!(entries = kb.entries.len(), "knowledge base loaded");
        Ok(kb)
    }

    /// Read every `*.toml` under `dir` (recursively) as a command entry.
    ///
    /// Entries override built-ins with the same name; two files in the same
    /// directory tree claiming one name is an error.
    #[instrument(level = "debug", skip(self))]
    pub fn insert_dir(&mut self, dir: &Path) -> KbResult<()> {
        let mut seen: HashSet<String> = HashSet::new();
        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry.map_err(|e| KbError::Io {
                path: dir.to_path_buf(),
                source: e.into(),
            })?;
            let path = entry.path();
            if !entry.file_type().is_file() || path.extension().map_or(true, |ext| ext != "toml") {
                continue;
            }
            let content = std::fs::read_to_string(path).map_err(|e| KbError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;
            let parsed: CommandEntry = toml::from_str(&content).map_err(|e| KbError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
            if !seen.insert(parsed.name.clone()) {
                return Err(KbError::DuplicateEntry {
                    name: parsed.name,
                    path: path.to_path_buf(),
                });
            }
            debug!(name = %parsed.name, path = %path.display(), "entry loaded");
            self.entries.insert(parsed.name.clone(), parsed);
        }
        Ok(())
    }

    pub fn entry(&self, name: &str) -> KbResult<&CommandEntry> {
        self.entries
            .get(name)
            .ok_or_else(|| KbError::UnknownCommand(name.to_string()))
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Caption the words of a command line.
    ///
    /// The first word picks the entry and stays uncaptioned (its summary
    /// belongs to `lookup`, not the diagram); the first following non-option
    /// word naming a subcommand switches scope to it; option words match the
    /// scope's options (exactly, or by the part before `=`), falling back to
    /// the command level; remaining non-option words consume the scope's
    /// operand slots in order. Unknown words stay uncaptioned.
    pub fn annotate_words(&self, source: &str, words: &[Word]) -> KbResult<CommandLine> {
        let first = match words.first() {
            Some(w) => w,
            None => return Ok(CommandLine::default()),
        };
        let entry = self.entry(&first.value)?;

        let mut notes: Vec<Option<String>> = Vec::with_capacity(words.len());
        notes.push(None);

        let mut scope = &entry.scope;
        let mut in_subcommand = false;
        let mut next_operand = 0;
        for word in &words[1..] {
            let value = word.value.as_str();
            if !in_subcommand && !value.starts_with('-') {
                if let Some(sub) = entry.subcommands.get(value) {
                    notes.push(sub.summary.clone());
                    scope = sub;
                    in_subcommand = true;
                    next_operand = 0;
                    continue;
                }
            }
            if value.starts_with('-') {
                let hit = option_note(scope, value)
                    .or_else(|| in_subcommand.then(|| option_note(&entry.scope, value)).flatten());
                notes.push(hit);
            } else if let Some(operand) = scope.operands.get(next_operand) {
                next_operand += 1;
                notes.push(Some(operand.about.clone()));
            } else {
                notes.push(None);
            }
        }

        Ok(assemble(source, words, notes))
    }
}

fn option_note(scope: &Scope, value: &str) -> Option<String> {
    if let Some(about) = scope.options.get(value) {
        return Some(about.clone());
    }
    let stem = value.split_once('=').map(|(stem, _)| stem)?;
    scope.options.get(stem).cloned()
}

/// Interleave captioned words with the literal gaps between them.
fn assemble(source: &str, words: &[Word], notes: Vec<Option<String>>) -> CommandLine {
    let mut segments = Vec::new();
    let mut cursor = 0;
    for (word, note) in words.iter().zip(notes) {
        if word.range.start > cursor {
            segments.push(Segment::plain(&source[cursor..word.range.start]));
        }
        segments.push(Segment {
            text: word.raw.clone(),
            note,
        });
        cursor = word.range.end;
    }
    if cursor < source.len() {
        segments.push(Segment::plain(&source[cursor..]));
    }
    CommandLine::new(segments)
}
