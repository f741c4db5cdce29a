//! Archive commands.

use std::str::FromStr;

use clap::{Args, Subcommand};
use tabled::Tabled;

use dochub_core::config::AppConfig;
use dochub_core::error::AppError;
use dochub_core::types::{FileId, FolderId};
use dochub_entity::archive::ArchivedItem;
use dochub_service::archive::service::FOLDER_RESTORE_NOTE;

use super::{Backend, cli_context};
use crate::output::{self, OutputFormat};

/// Arguments for archive commands
#[derive(Debug, Args)]
pub struct ArchiveArgs {
    /// Archive subcommand
    #[command(subcommand)]
    pub command: ArchiveCommand,
}

/// Archive subcommands
#[derive(Debug, Subcommand)]
pub enum ArchiveCommand {
    /// List archived folders and files, most recent first
    List,
    /// Restore an archived file
    RestoreFile {
        /// File id
        id: String,
    },
    /// Restore an archived folder (its files stay archived)
    RestoreFolder {
        /// Folder id
        id: String,
    },
}

/// Archived item display row for table output
#[derive(Debug, Tabled)]
struct ArchivedRow {
    id: String,
    #[tabled(rename = "type")]
    item_type: String,
    name: String,
    department: String,
    archived_at: String,
}

impl From<&ArchivedItem> for ArchivedRow {
    fn from(item: &ArchivedItem) -> Self {
        Self {
            id: item.id.to_string(),
            item_type: item.item_type.to_string(),
            name: item.name.clone(),
            department: item.department_name.clone().unwrap_or_else(|| "-".to_string()),
            archived_at: output::timestamp(Some(item.archived_at)),
        }
    }
}

fn parse<T: FromStr>(id: &str) -> Result<T, AppError> {
    T::from_str(id).map_err(|_| AppError::validation(format!("'{id}' is not a valid id")))
}

/// Execute archive commands
pub async fn execute(
    args: &ArchiveArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let backend = Backend::open(config).await?;
    let archive = &backend.services.archive;
    let ctx = cli_context();

    match &args.command {
        ArchiveCommand::List => {
            let items = archive.list_archived().await?;
            let rows: Vec<ArchivedRow> = items.iter().map(ArchivedRow::from).collect();
            output::print_list(&rows, &items, format);
        }
        ArchiveCommand::RestoreFile { id } => {
            let file = archive.restore_file(&ctx, parse::<FileId>(id)?).await?;
            output::print_item(&file, &format!("File '{}' restored", file.file_name), format);
        }
        ArchiveCommand::RestoreFolder { id } => {
            let folder = archive.restore_folder(&ctx, parse::<FolderId>(id)?).await?;
            output::print_item(
                &folder,
                &format!("Folder '{}' restored. {FOLDER_RESTORE_NOTE}", folder.folder_name),
                format,
            );
        }
    }

    backend.close().await;
    Ok(())
}
