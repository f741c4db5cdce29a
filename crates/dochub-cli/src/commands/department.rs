//! Department administration commands.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use dochub_core::config::AppConfig;
use dochub_core::error::{AppError, ErrorKind};
use dochub_entity::department::{Department, DepartmentImage};
use dochub_service::DepartmentInput;

use super::{Backend, cli_context};
use crate::output::{self, OutputFormat};

/// Arguments for department commands
#[derive(Debug, Args)]
pub struct DepartmentArgs {
    /// Department subcommand
    #[command(subcommand)]
    pub command: DepartmentCommand,
}

/// Department subcommands
#[derive(Debug, Subcommand)]
pub enum DepartmentCommand {
    /// List departments
    List {
        /// Filter by name, alias, or slug
        #[arg(short, long)]
        query: Option<String>,
    },
    /// Create a department and its root folder
    Create {
        /// Display name
        #[arg(long)]
        name: String,
        /// Short alias
        #[arg(long, default_value = "")]
        alias: String,
        /// Image file to upload
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Delete a department with all of its folders and files
    Delete {
        /// Department id or slug
        department: String,
        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },
}

/// Department display row for table output
#[derive(Debug, Tabled)]
struct DepartmentRow {
    id: String,
    name: String,
    alias: String,
    slug: String,
    image: String,
    created_at: String,
}

impl From<&Department> for DepartmentRow {
    fn from(d: &Department) -> Self {
        Self {
            id: d.id.to_string(),
            name: d.name.clone(),
            alias: d.alias.clone(),
            slug: d.slug.clone(),
            image: d.image.clone().unwrap_or_else(|| "-".to_string()),
            created_at: output::timestamp(Some(d.created_at)),
        }
    }
}

#[derive(Debug, Serialize)]
struct Created<'a> {
    department: &'a Department,
    root_folder: &'a dochub_entity::folder::Folder,
}

/// Execute department commands
pub async fn execute(
    args: &DepartmentArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let backend = Backend::open(config).await?;
    let departments = &backend.services.departments;
    let ctx = cli_context();

    match &args.command {
        DepartmentCommand::List { query } => {
            let list = departments.list(query.as_deref()).await?;
            let rows: Vec<DepartmentRow> = list.iter().map(DepartmentRow::from).collect();
            output::print_list(&rows, &list, format);
        }
        DepartmentCommand::Create { name, alias, image } => {
            let image = match image {
                Some(path) => read_image(path).await?,
                None => DepartmentImage::Unset,
            };
            let input = DepartmentInput {
                name: name.clone(),
                alias: alias.clone(),
                image,
            };
            let (department, root_folder) = departments.create(&ctx, input).await?;
            output::print_item(
                &Created {
                    department: &department,
                    root_folder: &root_folder,
                },
                &format!("Department '{}' created ({})", department.name, department.slug),
                format,
            );
        }
        DepartmentCommand::Delete { department, force } => {
            let department = departments.get(department).await?;
            if !force {
                let confirm = dialoguer::Confirm::new()
                    .with_prompt(format!(
                        "Delete '{}' with all of its folders and files? This cannot be undone.",
                        department.name
                    ))
                    .default(false)
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?;

                if !confirm {
                    println!("Cancelled.");
                    backend.close().await;
                    return Ok(());
                }
            }

            departments.delete(&ctx, department.id).await?;
            output::print_success(&format!("Department '{}' deleted", department.name));
        }
    }

    backend.close().await;
    Ok(())
}

async fn read_image(path: &Path) -> Result<DepartmentImage, AppError> {
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Validation,
            format!("Cannot read image {}", path.display()),
            e,
        )
    })?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    Ok(DepartmentImage::PendingUpload {
        bytes: Bytes::from(bytes),
        file_name,
        content_type: None,
    })
}
