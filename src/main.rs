use anyhow::{bail, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::sync::Arc;
use workbench::api::{ApiClient, Base, WorkspaceApi};
use workbench::config::schema_json;
use workbench::{logging, render, Config, Gallery, Navigator};

/// Browse the research workspace and manage channel thumbnails.
#[derive(Parser, Debug)]
#[command(name = "workbench", version, about)]
struct Cli {
    /// Config file (defaults to the per-user config directory)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Backend base URL, overriding the config file
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Research and scripts workspace
    #[command(subcommand)]
    Workspace(WorkspaceCommand),
    /// Channel thumbnail libraries
    #[command(subcommand)]
    Thumbnails(ThumbnailCommand),
    /// Configuration helpers
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Print shell completions
    Completions { shell: Shell },
}

#[derive(Subcommand, Debug)]
enum WorkspaceCommand {
    /// List a directory and preview its index file
    Ls {
        #[arg(long, default_value = "research")]
        base: Base,
        #[arg(default_value = "")]
        path: String,
        /// Case-insensitive filter on entry name and path
        #[arg(long)]
        search: Option<String>,
    },
    /// Print a file (CSV files as a table)
    Cat {
        #[arg(long, default_value = "research")]
        base: Base,
        path: String,
    },
}

#[derive(Subcommand, Debug)]
enum ThumbnailCommand {
    /// Show channels and the assets of one channel
    List {
        #[arg(long)]
        channel: Option<String>,
        /// Only quality-control assets
        #[arg(long)]
        qc: bool,
    },
    /// Delete an asset from a channel library
    Delete {
        #[arg(long)]
        channel: String,
        asset_id: String,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Print the JSON schema of the config file
    Schema,
    /// Print the effective configuration
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }
    logging::init(&config.log.level);

    match cli.command {
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "workbench", &mut std::io::stdout());
            Ok(())
        }
        Command::Config(ConfigCommand::Schema) => {
            println!("{}", schema_json()?);
            Ok(())
        }
        Command::Config(ConfigCommand::Show) => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
        Command::Workspace(cmd) => {
            let api: Arc<dyn WorkspaceApi> = Arc::new(ApiClient::new(&config.api)?);
            run_workspace(api, cmd).await
        }
        Command::Thumbnails(cmd) => {
            let api: Arc<dyn WorkspaceApi> = Arc::new(ApiClient::new(&config.api)?);
            run_thumbnails(api, cmd).await
        }
    }
}

async fn run_workspace(api: Arc<dyn WorkspaceApi>, cmd: WorkspaceCommand) -> Result<()> {
    let navigator = Navigator::new(api);
    match cmd {
        WorkspaceCommand::Ls { base, path, search } => {
            navigator.navigate_to(base, &path).await;
            if let Some(keyword) = search {
                navigator.set_search_keyword(&keyword);
            }
            let view = navigator.snapshot();
            print!("{}", render::render_workspace(&view));
            if let Some(err) = view.error {
                bail!(err);
            }
        }
        WorkspaceCommand::Cat { base, path } => {
            navigator.preview_file(base, path.trim_matches('/')).await;
            let view = navigator.snapshot();
            if let Some(err) = view.error {
                bail!(err);
            }
            match &view.parsed_rows {
                Some(rows) => print!("{}", render::render_table(rows)),
                None => print!("{}", view.content),
            }
        }
    }
    Ok(())
}

async fn run_thumbnails(api: Arc<dyn WorkspaceApi>, cmd: ThumbnailCommand) -> Result<()> {
    let gallery = Gallery::new(api);
    gallery.mount().await;
    if let Some(err) = gallery.snapshot().overview_error {
        bail!(err);
    }

    match cmd {
        ThumbnailCommand::List { channel, qc } => {
            if let Some(channel) = channel {
                gallery.select_channel(&channel).await;
            }
            gallery.set_qc_only(qc);
            let view = gallery.snapshot();
            print!(
                "{}",
                render::render_gallery(&view, |asset| gallery.preview_url(asset))
            );
        }
        ThumbnailCommand::Delete { channel, asset_id } => {
            gallery.select_channel(&channel).await;
            if !gallery.delete_asset(&channel, &asset_id).await {
                let view = gallery.snapshot();
                let reason = view
                    .libraries
                    .get(&channel)
                    .and_then(|lib| lib.error.clone())
                    .unwrap_or_else(|| format!("asset {asset_id} not found in {channel}"));
                bail!(reason);
            }
            println!("deleted {asset_id} from {channel}");
        }
    }
    Ok(())
}
