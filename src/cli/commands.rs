//! Command dispatch

use std::io;

use clap::CommandFactory;
use clap_complete::generate;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::{load_binary, load_nary, resolve_value};
use crate::cli::args::{BinaryCommands, Cli, Commands, ConfigCommands, NaryCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, Settings};
use crate::domain::TreeRender;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    if let Some(path) = &cli.config {
        if !path.is_file() {
            return Err(CliError::InvalidArgs(format!(
                "config file not found: {}",
                path.display()
            )));
        }
    }
    let settings = Settings::load(cli.config.as_deref())?;
    if !settings.output.color {
        output::disable_colors();
    }

    match &cli.command {
        Commands::Binary { command } => execute_binary(command, &settings),
        Commands::Nary { command } => execute_nary(command, &settings),
        Commands::Config { command } => execute_config(command, &settings),
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    }
}

#[instrument(level = "debug", skip(settings))]
fn execute_binary(command: &BinaryCommands, settings: &Settings) -> CliResult<()> {
    match command {
        BinaryCommands::MinDepth { tree } => {
            output::info(&load_binary(tree, settings)?.min_depth());
        }
        BinaryCommands::MaxDepth { tree } => {
            output::info(&load_binary(tree, settings)?.max_depth());
        }
        BinaryCommands::MaxSum { tree } => match load_binary(tree, settings)?.max_sum() {
            Some(sum) => output::info(&sum),
            None => output::none(),
        },
        BinaryCommands::NextLarger { tree, bound } => {
            match load_binary(tree, settings)?.next_larger(*bound) {
                Some(value) => output::info(&value),
                None => output::none(),
            }
        }
        BinaryCommands::Cousins { tree, a, b } => {
            let tree = load_binary(tree, settings)?;
            let (node_a, node_b) = (resolve_value(&tree, *a)?, resolve_value(&tree, *b)?);
            output::verdict(tree.are_cousins(node_a, node_b));
        }
        BinaryCommands::Lca { tree, a, b } => {
            let tree = load_binary(tree, settings)?;
            let (node_a, node_b) = (resolve_value(&tree, *a)?, resolve_value(&tree, *b)?);
            match tree
                .lowest_common_ancestor(node_a, node_b)
                .and_then(|idx| tree.value(idx))
            {
                Some(value) => output::info(&value),
                None => output::none(),
            }
        }
        BinaryCommands::Leaves { tree } => {
            let leaves = load_binary(tree, settings)?.leaf_values();
            output::info(&leaves.iter().join(" "));
        }
        BinaryCommands::Serialize { tree } => {
            output::info(&load_binary(tree, settings)?.serialize());
        }
        BinaryCommands::Show { tree } => {
            let tree = load_binary(tree, settings)?;
            debug!(nodes = tree.len(), "rendering binary tree");
            output::info(&tree.to_termtree(settings.output.max_render_depth)?);
        }
    }
    Ok(())
}

#[instrument(level = "debug", skip(settings))]
fn execute_nary(command: &NaryCommands, settings: &Settings) -> CliResult<()> {
    match command {
        NaryCommands::Sum { file } => {
            output::info(&load_nary(file, settings)?.sum_values());
        }
        NaryCommands::Evens { file } => {
            output::info(&load_nary(file, settings)?.count_evens());
        }
        NaryCommands::Greater { file, bound } => {
            output::info(&load_nary(file, settings)?.num_greater(*bound));
        }
        NaryCommands::Depth { file } => {
            output::info(&load_nary(file, settings)?.depth());
        }
        NaryCommands::Leaves { file } => {
            let leaves = load_nary(file, settings)?.leaf_values();
            output::info(&leaves.iter().join(" "));
        }
        NaryCommands::Show { file } => {
            let tree = load_nary(file, settings)?;
            output::info(&tree.to_termtree(settings.output.max_render_depth)?);
        }
    }
    Ok(())
}

fn execute_config(command: &ConfigCommands, settings: &Settings) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(&settings.to_toml()?),
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => {
                output::header("Global config");
                output::info(&path.display());
            }
            None => output::none(),
        },
    }
    Ok(())
}
