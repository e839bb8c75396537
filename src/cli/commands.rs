//! Command dispatch

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::application::services::{is_json, EditTarget};
use crate::cli::args::{Cli, Commands, ConfigCommands, EditCommands, EditFileArgs};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::Taxonomy;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    // completions need no settings
    if let Some(Commands::Completion { shell }) = &cli.command {
        return completion(*shell);
    }

    let settings = Settings::load(cli.dir.as_deref())?;
    debug!("settings: {:?}", settings);
    let container = ServiceContainer::new(settings);

    match &cli.command {
        None => convert(&container, None, None, None),
        Some(Commands::Convert {
            input,
            output,
            indent,
        }) => convert(&container, input.as_deref(), output.as_deref(), *indent),
        Some(Commands::Tree {
            input,
            max_depth,
            paths,
        }) => tree(&container, input.as_deref(), *max_depth, *paths),
        Some(Commands::Stats { input }) => stats(&container, input.as_deref()),
        Some(Commands::Edit { command }) => edit(&container, command),
        Some(Commands::Config { command }) => config(&container, cli.dir.as_deref(), command),
        Some(Commands::Completion { shell }) => completion(*shell),
    }
}

#[instrument(skip(container))]
fn convert(
    container: &ServiceContainer,
    input: Option<&Path>,
    output: Option<&Path>,
    indent: Option<usize>,
) -> CliResult<()> {
    if indent == Some(0) {
        return Err(CliError::InvalidArgs(
            "--indent must be at least 1".to_string(),
        ));
    }
    let settings = Settings::clone(&container.settings).with_overrides(input, output, indent)?;

    output::step(&format!(
        "Reading {} line by line...",
        settings.input.display()
    ));
    let report = container
        .conversion()
        .convert(&settings.input, &settings.output, settings.indent)?;

    output::detail(&format!(
        "{} entries from {} lines, {} top-level nodes, depth {}",
        report.entries, report.lines, report.roots, report.depth
    ));
    output::success(&format!(
        "Successfully converted {} to {}",
        report.input.display(),
        report.output.display()
    ));
    Ok(())
}

#[instrument(skip(container))]
fn tree(
    container: &ServiceContainer,
    input: Option<&Path>,
    max_depth: Option<usize>,
    paths: bool,
) -> CliResult<()> {
    if max_depth == Some(0) {
        return Err(CliError::InvalidArgs(
            "--max-depth must be at least 1".to_string(),
        ));
    }
    let input = resolve_input(container, input);
    let taxonomy = container.conversion().load(&input)?;
    let taxonomy = match max_depth {
        Some(depth) => taxonomy.truncated(depth),
        None => taxonomy,
    };

    let rendered = taxonomy.to_termtree(input.display().to_string(), paths);
    let mut out = io::stdout().lock();
    write!(out, "{}", rendered).map_err(|e| InfraError::io("write tree to stdout", e))?;
    Ok(())
}

#[instrument(skip(container))]
fn stats(container: &ServiceContainer, input: Option<&Path>) -> CliResult<()> {
    let input = resolve_input(container, input);
    let taxonomy = container.conversion().load(&input)?;

    output::header(&input.display());
    let mut out = io::stdout().lock();
    write!(out, "{}", render_stats(&taxonomy))
        .map_err(|e| InfraError::io("write stats to stdout", e))?;
    Ok(())
}

#[instrument(skip(container))]
fn edit(container: &ServiceContainer, command: &EditCommands) -> CliResult<()> {
    let service = container.edit();
    match command {
        EditCommands::Rename { file, path, name } => {
            let target = edit_target(container, file)?;
            service.rename(&target, path, name)?;
            output::success(&format!(
                "Renamed {} to '{}' in {}",
                path,
                name.trim(),
                target.output.display()
            ));
        }
        EditCommands::Add {
            file,
            name,
            parent,
            code,
        } => {
            let target = edit_target(container, file)?;
            let added = service.add(&target, parent.as_ref(), name, code.as_deref())?;
            output::success(&format!(
                "Added '{}' at {} in {}",
                name.trim(),
                added,
                target.output.display()
            ));
        }
        EditCommands::Remove { file, path } => {
            let target = edit_target(container, file)?;
            let removed = service.remove(&target, path)?;
            output::success(&format!(
                "Removed {} '{}' ({} node(s)) from {}",
                path,
                removed.label,
                removed.node_count(),
                target.output.display()
            ));
        }
    }
    Ok(())
}

/// Edits write back to a JSON input; an outline input is never overwritten.
fn edit_target(container: &ServiceContainer, args: &EditFileArgs) -> CliResult<EditTarget> {
    if args.indent == Some(0) {
        return Err(CliError::InvalidArgs(
            "--indent must be at least 1".to_string(),
        ));
    }
    let output = match &args.output {
        Some(output) => output.clone(),
        None if is_json(&args.file) => args.file.clone(),
        None => container.settings.output.clone(),
    };
    if !is_json(&args.file) && output == args.file {
        return Err(CliError::InvalidArgs(format!(
            "refusing to overwrite outline {} with JSON",
            args.file.display()
        )));
    }
    let settings = Settings::clone(&container.settings).with_overrides(
        Some(args.file.as_path()),
        Some(output.as_path()),
        args.indent,
    )?;
    Ok(EditTarget {
        input: settings.input,
        output: settings.output,
        indent: settings.indent,
    })
}

fn config(
    container: &ServiceContainer,
    dir: Option<&Path>,
    command: &ConfigCommands,
) -> CliResult<()> {
    let text = match command {
        ConfigCommands::Show => container.settings.to_toml()?,
        ConfigCommands::Path => {
            let local = local_config_path(dir.unwrap_or_else(|| Path::new(".")));
            let global = match global_config_path() {
                Some(path) => describe_path(&path),
                None => "(no config directory on this platform)".to_string(),
            };
            format!("global: {}\nlocal:  {}\n", global, describe_path(&local))
        }
        ConfigCommands::Template => Settings::template(),
    };
    let mut out = io::stdout().lock();
    write!(out, "{}", text).map_err(|e| InfraError::io("write config to stdout", e))?;
    Ok(())
}

fn completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}

fn resolve_input(container: &ServiceContainer, input: Option<&Path>) -> PathBuf {
    input
        .map(Path::to_path_buf)
        .unwrap_or_else(|| container.settings.input.clone())
}

fn describe_path(path: &Path) -> String {
    if path.exists() {
        path.display().to_string()
    } else {
        format!("{} (not present)", path.display())
    }
}

/// Per-level node counts followed by totals, one item per line.
pub fn render_stats(taxonomy: &Taxonomy) -> String {
    if taxonomy.is_empty() {
        return "No nodes found.\n".to_string();
    }
    let mut text = String::new();
    for (level, count) in taxonomy.level_counts() {
        let plural = if count == 1 { "" } else { "s" };
        text.push_str(&format!("Level {}: {} node{}\n", level, count, plural));
    }
    text.push_str(&format!(
        "Total: {} nodes, {} leaves, depth {}\n",
        taxonomy.node_count(),
        taxonomy.leaf_count(),
        taxonomy.depth()
    ));
    text
}
