use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use physlog_core::{AppConfig, DEFAULT_PORT};
use physlog_service::{DashboardService, ServiceError, ServiceOptions};
use physlog_storage::Storage;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "physlog")]
#[command(about = "Athlete physical-test dashboard and table tools", long_about = None)]
struct Cli {
    /// Directory holding id_database.db and physical_rawdata.db
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    /// Reject registry rows whose name or ID already exists
    #[arg(long, global = true)]
    strict: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the dashboard web server
    Serve {
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,
    },
    /// ID registry rows
    Registry {
        #[command(subcommand)]
        action: RegistryAction,
    },
    /// Test measurement rows
    Measurements {
        #[command(subcommand)]
        action: MeasurementAction,
    },
    /// Trend chart points for one subject and test item
    Chart { subject: String, test_item: String },
    /// Distinct test items, subject names and positions
    Selectors,
}

#[derive(Subcommand)]
enum RegistryAction {
    List,
    Add { local_name: String, external_name: String, identifier: String },
    DeleteLast,
}

#[derive(Subcommand)]
enum MeasurementAction {
    List,
    /// Joined view with registry names attached
    Merged,
    Add {
        subject: String,
        date: NaiveDate,
        position: String,
        test_item: String,
        result: String,
    },
    DeleteLast,
}

pub(crate) fn open_service(config: &AppConfig, strict: bool) -> Result<DashboardService> {
    let storage = Storage::open(config)?;
    let service = DashboardService::from_storage(storage, ServiceOptions { strict })
        .map_err(user_error)?;
    Ok(service)
}

/// Attach the dashboard's status message to a service error.
pub(crate) fn user_error(err: ServiceError) -> anyhow::Error {
    let message = err.status_message();
    anyhow::Error::new(err).context(message)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env(cli.data_dir.as_deref());
    let strict = cli.strict || config.strict;

    match cli.command {
        Commands::Serve { port, host } => {
            commands::serve::run(&config, strict, port, host).await?;
        },
        Commands::Registry { action } => {
            let service = open_service(&config, strict)?;
            match action {
                RegistryAction::List => commands::tables::list_registry(&service)?,
                RegistryAction::Add { local_name, external_name, identifier } => {
                    commands::tables::add_registry(
                        &service,
                        &local_name,
                        &external_name,
                        &identifier,
                    )?;
                },
                RegistryAction::DeleteLast => commands::tables::delete_last_registry(&service)?,
            }
        },
        Commands::Measurements { action } => {
            let service = open_service(&config, strict)?;
            match action {
                MeasurementAction::List => commands::tables::list_measurements(&service)?,
                MeasurementAction::Merged => commands::views::merged(&service)?,
                MeasurementAction::Add { subject, date, position, test_item, result } => {
                    commands::tables::add_measurement(
                        &service,
                        physlog_service::MeasurementInput {
                            subject,
                            date,
                            position,
                            test_item,
                            result,
                        },
                    )?;
                },
                MeasurementAction::DeleteLast => {
                    commands::tables::delete_last_measurement(&service)?;
                },
            }
        },
        Commands::Chart { subject, test_item } => {
            let service = open_service(&config, strict)?;
            commands::views::chart(&service, &subject, &test_item)?;
        },
        Commands::Selectors => {
            let service = open_service(&config, strict)?;
            commands::views::selectors(&service)?;
        },
    }

    Ok(())
}
