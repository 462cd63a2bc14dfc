//! Command dispatch

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::{load_chart, OrgTreeManager, Outcome};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, Settings};
use crate::domain::{EmployeeId, Operation};
use crate::tree_traits::TreeNodeConvert;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Show { chart }) => _show(cli, chart.as_deref()),
        Some(Commands::Run { chart, ops }) => _run(cli, chart.as_deref(), ops),
        Some(Commands::Config { command }) => _config(command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Ok(()),
    }
}

/// Pick the chart file: the flag wins over settings.
pub fn resolve_chart(flag: Option<&Path>, settings: &Settings) -> CliResult<PathBuf> {
    flag.map(Path::to_path_buf)
        .or_else(|| settings.chart_file.clone())
        .ok_or_else(|| {
            CliError::Usage("no chart given: pass --chart or set chart_file in settings".into())
        })
}

#[instrument(skip(cli))]
fn _show(cli: &Cli, chart: Option<&Path>) -> CliResult<()> {
    let settings = Settings::load()?;
    let path = resolve_chart(chart, &settings)?;
    let tree = load_chart(&path)?;
    debug!("chart: {} employees, depth {}", tree.len(), tree.depth());

    output::info(&tree.to_tree_string(cli.ids || settings.show_ids));
    Ok(())
}

#[instrument(skip(cli))]
fn _run(cli: &Cli, chart: Option<&Path>, ops: &[Operation]) -> CliResult<()> {
    let settings = Settings::load()?;
    let path = resolve_chart(chart, &settings)?;
    let mut manager = OrgTreeManager::new(load_chart(&path)?);

    for &op in ops {
        match manager.apply(op) {
            Ok(outcome) => output::applied(&describe(&manager, &outcome)),
            Err(e) => output::rejected(&op, &e),
        }
    }

    output::header(&"Result");
    output::info(&manager.chart().to_tree_string(cli.ids || settings.show_ids));
    output::history_depths(manager.undo_depth(), manager.redo_depth());
    Ok(())
}

fn display_name(manager: &OrgTreeManager, id: EmployeeId) -> String {
    manager
        .name_of(id)
        .map(str::to_string)
        .unwrap_or_else(|| format!("#{}", id))
}

/// One-line summary of a committed operation.
pub fn describe(manager: &OrgTreeManager, outcome: &Outcome) -> String {
    let name = |id| display_name(manager, id);
    match outcome {
        Outcome::Moved(m) | Outcome::Redone(m) => {
            let verb = if matches!(outcome, Outcome::Redone(_)) {
                "redo"
            } else {
                "move"
            };
            let mut line = format!(
                "{}: {} from {} to {}",
                verb,
                name(m.employee),
                name(m.old_supervisor),
                name(m.new_supervisor)
            );
            if !m.promoted.is_empty() {
                line.push_str(&format!(
                    " ({} now report to {})",
                    m.promoted.iter().map(|&id| name(id)).join(", "),
                    name(m.old_supervisor)
                ));
            }
            line
        }
        Outcome::Undone(u) => format!(
            "undo: {} back under {}",
            name(u.employee),
            name(u.restored_supervisor)
        ),
    }
}

fn _config(command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load()?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&path.display()),
            None => return Err(CliError::Usage("no config directory on this system".into())),
        },
        ConfigCommands::Template => output::info(&Settings::template()),
    }
    Ok(())
}
