//! Activity feed command.

use clap::{Args, Subcommand};
use tabled::Tabled;

use dochub_core::config::AppConfig;
use dochub_core::error::AppError;
use dochub_entity::activity::ActivityEntry;

use super::Backend;
use crate::output::{self, OutputFormat};

/// Arguments for activity commands
#[derive(Debug, Args)]
pub struct ActivityArgs {
    /// Activity subcommand
    #[command(subcommand)]
    pub command: ActivityCommand,
}

/// Activity subcommands
#[derive(Debug, Subcommand)]
pub enum ActivityCommand {
    /// Most recent entries, newest first
    List {
        /// Maximum number of entries
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

/// Activity display row for table output
#[derive(Debug, Tabled)]
struct ActivityRow {
    when: String,
    #[tabled(rename = "type")]
    item_type: String,
    status: String,
    item: String,
    department: String,
    folder: String,
}

impl From<&ActivityEntry> for ActivityRow {
    fn from(entry: &ActivityEntry) -> Self {
        let a = &entry.activity;
        Self {
            when: output::timestamp(Some(a.created_at)),
            item_type: a.item_type.to_string(),
            status: a.status.to_string(),
            item: a.item_name.clone(),
            department: entry.department_name.clone().unwrap_or_else(|| "-".to_string()),
            folder: entry.folder_name.clone().unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// Execute activity commands
pub async fn execute(
    args: &ActivityArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let backend = Backend::open(config).await?;

    match &args.command {
        ActivityCommand::List { limit } => {
            let entries = backend.services.activity.list_recent(*limit).await?;
            let rows: Vec<ActivityRow> = entries.iter().map(ActivityRow::from).collect();
            output::print_list(&rows, &entries, format);
        }
    }

    backend.close().await;
    Ok(())
}
