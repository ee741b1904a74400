//! Operator command-line interface.
//!
//! Workspace-scoped commands over authored template JSON files: list the
//! detected sync groups, validate structure, propagate a group edit, and
//! stream sync activity while a file is edited externally.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use dialoguer::Confirm;
use owo_colors::OwoColorize;
use tracing::info;

use crate::config::FieldsyncConfig;
use crate::store::{structural_rules, MemoryTemplateStore, TemplateStore};
use crate::sync::detect::detect_groups;
use crate::sync::registry::SyncGroupRegistry;
use crate::template::Template;
use crate::tooling::watch::{run_watch, WatchConfig};

/// Fieldsync CLI - synchronized field propagation for document templates
#[derive(Parser)]
#[command(name = "fieldsync")]
#[command(about = "Synchronized field propagation for structured document templates")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root used for configuration lookup
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List detected sync groups in a template
    Inspect {
        /// Template JSON file
        template: PathBuf,
    },
    /// Run structural validation on a template
    Check {
        /// Template JSON file
        template: PathBuf,
    },
    /// Set a sync group's value and propagate it to every member
    Set {
        /// Template JSON file
        template: PathBuf,
        /// Group base name (e.g. `title` for title1/title2)
        base_name: String,
        /// New value for every member
        value: String,
        /// Write the result here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Overwrite the input template file
        #[arg(long, conflicts_with = "output")]
        in_place: bool,
        /// Skip the overwrite confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Watch a template file and stream sync activity as it changes
    Watch {
        /// Template JSON file
        template: PathBuf,
    },
}

/// Execute a parsed command and return its printable output.
pub fn execute(cli: &Cli, config: &FieldsyncConfig) -> Result<String> {
    match &cli.command {
        Commands::Inspect { template } => inspect(template),
        Commands::Check { template } => check(template),
        Commands::Set {
            template,
            base_name,
            value,
            output,
            in_place,
            yes,
        } => set(template, base_name, value, output.as_deref(), *in_place, *yes),
        Commands::Watch { template } => watch(template, config),
    }
}

fn load_template(path: &Path) -> Result<Template> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading template {}", path.display()))?;
    Template::from_json(&raw).with_context(|| format!("parsing template {}", path.display()))
}

fn inspect(path: &Path) -> Result<String> {
    let template = load_template(path)?;
    let groups = template
        .first_page()
        .map(detect_groups)
        .unwrap_or_default();

    if groups.is_empty() {
        return Ok("no sync groups detected".to_string());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["base name", "members", "canonical", "value"]);
    for group in &groups {
        table.add_row(vec![
            group.base_name.clone(),
            group.members.join(", "),
            group.canonical.clone(),
            group.current_value.clone(),
        ]);
    }
    Ok(table.to_string())
}

fn check(path: &Path) -> Result<String> {
    let template = load_template(path)?;
    match structural_rules(&template) {
        Ok(()) => Ok(format!("{} template is structurally valid", "ok:".green())),
        Err(err) => bail!("{} {}", "violation:".red(), err),
    }
}

fn set(
    path: &Path,
    base_name: &str,
    value: &str,
    output: Option<&Path>,
    in_place: bool,
    yes: bool,
) -> Result<String> {
    let template = load_template(path)?;
    let store: Arc<dyn TemplateStore> = Arc::new(MemoryTemplateStore::new(template));
    let registry = SyncGroupRegistry::attach(Arc::clone(&store))
        .context("attaching sync registry")?;

    registry
        .set_group_value(base_name, value)
        .with_context(|| format!("updating sync group '{}'", base_name))?;
    info!(base_name, "sync group updated");

    let committed = store.get_template().context("reading committed template")?;
    let json = committed
        .to_json()
        .context("serializing committed template")?;

    if in_place {
        if !yes {
            let confirmed = Confirm::new()
                .with_prompt(format!("Overwrite {}?", path.display()))
                .default(false)
                .interact()
                .context("reading confirmation")?;
            if !confirmed {
                return Ok("aborted".to_string());
            }
        }
        fs::write(path, &json).with_context(|| format!("writing {}", path.display()))?;
        return Ok(format!("updated {}", path.display()));
    }

    if let Some(output) = output {
        fs::write(output, &json).with_context(|| format!("writing {}", output.display()))?;
        return Ok(format!("wrote {}", output.display()));
    }

    Ok(json)
}

fn watch(path: &Path, config: &FieldsyncConfig) -> Result<String> {
    let watch_config = WatchConfig {
        template_path: path.to_path_buf(),
        debounce_ms: config.watch.debounce_ms,
    };
    run_watch(watch_config, |envelope| {
        match serde_json::to_string(&envelope) {
            Ok(line) => println!("{}", line),
            Err(err) => eprintln!("error serializing event: {}", err),
        }
    })?;
    Ok(String::new())
}
