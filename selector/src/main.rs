//! Instruction selection inspector.
//!
//! Loads a platform catalog and a project (paths from `selector.toml`) and
//! either replays a scripted editing session or lists the candidates offered
//! for a mode and object.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use selector::catalog::{InstructionCatalog, ProjectCatalog};
use selector::core::scope::{EventsScope, ScopeFilter, VisibilityFilter};
use selector::core::tree::TreeBuilder;
use selector::core::types::InstructionMode;
use selector::io::catalog_store::{load_platform, load_project};
use selector::io::config::{SelectorConfig, load_config};
use selector::platform::Platform;
use selector::project::Project;
use selector::session::{load_session, replay_session};

#[derive(Parser)]
#[command(
    name = "selector",
    version,
    about = "Inspect instruction selection for event-sheet conditions and actions"
)]
struct Cli {
    /// Configuration file; catalog and project paths are relative to it.
    #[arg(long, default_value = "selector.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replay a session script and print every resulting state as JSON.
    Replay {
        /// Session script (TOML).
        session: PathBuf,
    },
    /// Print the candidate tree for a mode, optionally for one object.
    List {
        /// `condition` or `action`.
        #[arg(long)]
        mode: InstructionMode,
        /// Layout whose objects are visible.
        #[arg(long)]
        layout: Option<String>,
        /// Object to list instructions of; all instructions when omitted.
        #[arg(long)]
        object: Option<String>,
    },
}

fn main() {
    selector::logging::init();
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;
    let (platform, project) = load_inputs(&cli.config, &config)?;
    match cli.command {
        Command::Replay { session } => cmd_replay(&config, &platform, &project, &session),
        Command::List {
            mode,
            layout,
            object,
        } => cmd_list(
            &config,
            &platform,
            &project,
            mode,
            layout.as_deref(),
            object.as_deref(),
        ),
    }
}

fn load_inputs(config_path: &Path, config: &SelectorConfig) -> Result<(Platform, Project)> {
    let platform = load_platform(&config.resolve(config_path, &config.catalog_path))
        .context("load platform catalog")?;
    let project = load_project(&config.resolve(config_path, &config.project_path))
        .context("load project")?;
    Ok((platform, project))
}

fn cmd_replay(
    config: &SelectorConfig,
    platform: &Platform,
    project: &Project,
    session_path: &Path,
) -> Result<()> {
    let script = load_session(session_path)?;
    let records = replay_session(platform, project, &script, &config.tree_builder())?;
    let payload = serde_json::to_string_pretty(&records).context("serialize records")?;
    println!("{payload}");
    Ok(())
}

fn cmd_list(
    config: &SelectorConfig,
    platform: &Platform,
    project: &Project,
    mode: InstructionMode,
    layout: Option<&str>,
    object: Option<&str>,
) -> Result<()> {
    let (layout_objects, scope) = match layout {
        Some(name) => {
            let found = project
                .layout(name)
                .with_context(|| format!("layout '{name}' not found in project"))?;
            (&found.objects, EventsScope::layout(name))
        }
        None => (&project.objects, EventsScope::default()),
    };
    let catalog = ProjectCatalog::new(platform, &project.objects, layout_objects);
    let candidates = match object {
        Some(name) => catalog.enumerate_for_object(mode, name),
        None => catalog.enumerate(mode),
    };
    let visible = VisibilityFilter.filter(candidates, &scope);
    print!("{}", config.tree_builder().build(&visible).render());
    Ok(())
}
