use std::sync::Arc;

use anyhow::Result;
use checklist_core::{
    date::format_listing_date, filter_checklists, ChecklistClient, FileCredentialStore,
    HttpInspectionService, TokenGuard,
};
use clap::{Parser, Subcommand};
use shared::domain::ChecklistId;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod edits;

use edits::{apply_edits, describe_item, parse_assignment, Assignment, Edits};

#[derive(Parser, Debug)]
#[command(name = "checklist", about = "Fill in and submit inspection checklists")]
struct Cli {
    /// Overrides the configured service base URL.
    #[arg(long)]
    service_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    Logout,
    List {
        #[arg(long)]
        search: Option<String>,
    },
    Show {
        checklist_id: String,
    },
    Submit {
        checklist_id: String,
        /// Editable value for an item, e.g. `--set 12=1.234,56`.
        #[arg(long = "set", value_name = "ITEM=VALUE", value_parser = parse_assignment)]
        values: Vec<Assignment>,
        #[arg(long = "obs", value_name = "ITEM=TEXT", value_parser = parse_assignment)]
        observations: Vec<Assignment>,
        #[arg(long = "select", value_name = "ITEM=OPTION", value_parser = parse_assignment)]
        selections: Vec<Assignment>,
        #[arg(long = "attach", value_name = "ITEM=PATH", value_parser = parse_assignment)]
        attachments: Vec<Assignment>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut settings = config::load_settings()?;
    if let Some(url) = cli.service_url {
        settings.service_url = url;
    }

    let service = HttpInspectionService::new(&settings.service_url, settings.request_timeout())?;
    info!(service_url = %service.base_url(), "using inspection service");
    let client = ChecklistClient::new(
        Arc::new(service),
        Arc::new(FileCredentialStore::new(&settings.credentials_path)),
        TokenGuard::system(),
    );

    match cli.command {
        Command::Login { username, password } => {
            client.login(&username, &password).await?;
            println!("signed in as {username}");
        }
        Command::Logout => {
            client.logout()?;
            println!("signed out");
        }
        Command::List { search } => {
            let checklists = client.list_checklists().await?;
            let shown = filter_checklists(&checklists, search.as_deref().unwrap_or_default());
            if shown.is_empty() {
                println!("no checklists");
            }
            for summary in shown {
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    summary.id,
                    summary.reference_number,
                    format_listing_date(&summary.date),
                    summary.carrier,
                    summary.status
                );
            }
        }
        Command::Show { checklist_id } => {
            let form = client.open(&ChecklistId::new(checklist_id)).await?;
            for view in form.views() {
                println!("{}", describe_item(&view));
            }
        }
        Command::Submit {
            checklist_id,
            values,
            observations,
            selections,
            attachments,
        } => {
            let mut form = client.open(&ChecklistId::new(checklist_id)).await?;
            let edits = Edits {
                values,
                observations,
                selections,
                attachments,
            };
            apply_edits(&mut form, &edits)?;
            let reloaded = client.submit(&form).await?;
            println!(
                "submitted checklist {} ({} items)",
                reloaded.checklist_id(),
                reloaded.items().len()
            );
        }
    }

    Ok(())
}
