

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use smartuser::api::User;
use smartuser::{DeletionOptions, DeletionRequest, KazooClient, SmartUserConfig, SmartUserDeletion};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};


#[derive(Debug, Parser)]
#[command(name = "smartuser-delete", about = "Delete a smart user and clean up what it owns")]
struct Args {
    /// Account the user belongs to
    #[arg(long)]
    account_id: String,

    /// User to delete
    #[arg(long)]
    user_id: String,

    /// Delete the user's devices instead of unassigning them
    #[arg(long)]
    remove_devices: bool,

    /// Delete the user's conferences instead of unassigning them
    #[arg(long)]
    remove_conferences: bool,

    /// Print the cleanup plan without changing anything
    #[arg(long)]
    dry_run: bool,

    /// Config file (TOML, YAML or JSON); KAZOO_* variables override it
    #[arg(long, short)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,smartuser=info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let args = Args::parse();

    let config = SmartUserConfig::load(args.config.as_deref())?;
    let client = KazooClient::from_config(&config)?;
    let deletion = SmartUserDeletion::new(Arc::new(client));

    let request = DeletionRequest::new(
        args.account_id,
        User::new(args.user_id),
        DeletionOptions {
            remove_devices: args.remove_devices,
            remove_conferences: args.remove_conferences,
        },
    );

    if args.dry_run {
        let plan = deletion.preview(&request).await?;
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    let report = deletion.delete(&request).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
