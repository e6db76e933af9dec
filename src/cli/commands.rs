//! Command dispatch

use std::io::Read;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use termtree::Tree;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::doc;
use crate::errors::KbError;
use crate::kb::{CommandEntry, KnowledgeBase, Scope};
use crate::layout::Renderer;
use crate::lexer::{split_words, words_from_argv};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = load_settings(cli)?;
    match &cli.command {
        Some(Commands::Explain { words, command }) => {
            _explain(&settings, words, command.as_deref())
        }
        Some(Commands::Annotate { file }) => _annotate(&settings, file.as_deref()),
        Some(Commands::Lookup {
            command,
            subcommand,
        }) => _lookup(&settings, command, subcommand.as_deref()),
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Show => _config_show(&settings),
            ConfigCommands::Init { force } => _config_init(*force),
            ConfigCommands::Path => _config_path(&settings),
        },
        Some(Commands::Completion { shell }) => {
            generate(
                *shell,
                &mut Cli::command(),
                "shexplain",
                &mut std::io::stdout(),
            );
            Ok(())
        }
        None => Err(CliError::Usage(
            "no command given, see `shexplain --help`".to_string(),
        )),
    }
}

fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };
    if let Some(width) = cli.width {
        settings.width = width;
    }
    if cli.pens {
        settings.pens = true;
    }
    debug!(?settings, "effective settings");
    Ok(settings)
}

#[instrument(level = "debug", skip(settings))]
fn _explain(settings: &Settings, words: &[String], raw: Option<&str>) -> CliResult<()> {
    let (source, words) = match raw {
        Some(raw) => (raw.to_string(), split_words(raw)?),
        None => {
            if words.is_empty() {
                return Err(CliError::Usage("nothing to explain".to_string()));
            }
            words_from_argv(words)
        }
    };
    let kb = KnowledgeBase::load(Some(settings.kb_dir.as_path()))?;
    let line = kb.annotate_words(&source, &words)?;
    let renderer = Renderer::new(settings.width, settings.pens);
    output::info(&renderer.render(&line));
    Ok(())
}

#[instrument(level = "debug", skip(settings))]
fn _annotate(settings: &Settings, file: Option<&Path>) -> CliResult<()> {
    let line = match file {
        Some(path) if path != Path::new("-") => doc::parse_file(path)?,
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            doc::parse(&buf)?
        }
    };
    let renderer = Renderer::new(settings.width, settings.pens);
    output::info(&renderer.render(&line));
    Ok(())
}

#[instrument(level = "debug", skip(settings))]
fn _lookup(settings: &Settings, command: &str, subcommand: Option<&str>) -> CliResult<()> {
    let kb = KnowledgeBase::load(Some(settings.kb_dir.as_path()))?;
    let entry = kb.entry(command)?;
    println!("{}", entry_tree(entry, subcommand)?);
    Ok(())
}

/// Entry as a termtree: summary at the root, options, operands, subcommands.
fn entry_tree(entry: &CommandEntry, subcommand: Option<&str>) -> Result<Tree<String>, KbError> {
    match subcommand {
        Some(name) => {
            let scope = entry
                .subcommands
                .get(name)
                .ok_or_else(|| KbError::UnknownSubcommand {
                    command: entry.name.clone(),
                    subcommand: name.to_string(),
                })?;
            Ok(scope_tree(format!("{} {}", entry.name, name), scope))
        }
        None => {
            let mut tree = scope_tree(entry.name.clone(), &entry.scope);
            for (name, sub) in &entry.subcommands {
                tree.push(scope_tree(name.clone(), sub));
            }
            Ok(tree)
        }
    }
}

fn scope_tree(label: String, scope: &Scope) -> Tree<String> {
    let root = match &scope.summary {
        Some(summary) => format!("{label}: {summary}"),
        None => label,
    };
    let mut tree = Tree::new(root);
    for (flag, about) in &scope.options {
        tree.push(Tree::new(format!(
            "{flag}  {}",
            about.lines().next().unwrap_or_default()
        )));
    }
    for operand in &scope.operands {
        tree.push(Tree::new(format!(
            "{}  {}",
            operand.name,
            operand.about.lines().next().unwrap_or_default()
        )));
    }
    tree
}

fn _config_show(settings: &Settings) -> CliResult<()> {
    output::info(&settings.to_toml()?);
    Ok(())
}

fn _config_init(force: bool) -> CliResult<()> {
    let path = global_config_path()
        .ok_or_else(|| CliError::Usage("cannot determine config directory".to_string()))?;
    if path.exists() && !force {
        return Err(CliError::Usage(format!(
            "config already exists at {}, use --force to overwrite",
            path.display()
        )));
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, Settings::template())?;
    output::action("Created", &path.display());
    Ok(())
}

fn _config_path(settings: &Settings) -> CliResult<()> {
    output::header("Config paths");
    match global_config_path() {
        Some(path) => output::detail(&format!("global: {}", path.display())),
        None => output::warning("no config directory available"),
    }
    output::detail(&format!("kb_dir: {}", settings.kb_dir.display()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_builtin_entry_when_turned_into_tree_then_lists_scopes() {
        let kb = KnowledgeBase::builtin();
        let entry = kb.entry("git").unwrap();
        let rendered = entry_tree(entry, None).unwrap().to_string();
        assert!(rendered.contains("git: the stupid content tracker"));
        assert!(rendered.contains("diff-tree"));
        assert!(rendered.contains("-M  Detect renames"));
    }

    #[test]
    fn given_unknown_subcommand_when_turned_into_tree_then_errors() {
        let kb = KnowledgeBase::builtin();
        let entry = kb.entry("git").unwrap();
        assert!(matches!(
            entry_tree(entry, Some("frobnicate")),
            Err(KbError::UnknownSubcommand { .. })
        ));
    }
}
