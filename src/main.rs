use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod colors;
mod dashboard;
mod error;
mod models;
mod modules;
mod pivot;
mod quarters;
mod server;
mod store;

use modules::Module;
use store::RecordStore;

#[derive(Parser)]
#[command(name = "sales-dashboard")]
#[command(about = "Sales analytics dashboard over pre-aggregated ACV data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the dashboard HTTP API
    Serve {
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,
        #[arg(long, default_value_t = 3000)]
        port: u16,
    },
    /// Write one module's dashboard payload to a JSON file
    Export {
        #[arg(long)]
        module: String,
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,
        #[arg(long, default_value = "dashboard.json")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { data_dir, port } => {
            let store = RecordStore::load(&data_dir)
                .with_context(|| format!("failed to load data sets from {}", data_dir.display()))?;
            server::serve(store, port).await?;
        }
        Commands::Export {
            module,
            data_dir,
            out,
        } => {
            let module = Module::parse(&module)?;
            let store = RecordStore::load(&data_dir)
                .with_context(|| format!("failed to load data sets from {}", data_dir.display()))?;
            let data = dashboard::dashboard_data(&store, module)?;
            let body = serde_json::to_string_pretty(&data)?;
            std::fs::write(&out, body)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!(
                "Dashboard data for `{}` written to {}.",
                module.name(),
                out.display()
            );
        }
    }

    Ok(())
}
