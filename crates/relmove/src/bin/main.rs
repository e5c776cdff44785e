//! relmove CLI

use anyhow::Context;
use clap::{Parser, Subcommand};
use relmove::app::App;
use relmove::logging::{LogFormat, init_logging};
use relmove::render::{render_folders, render_plan};
use relmove::settings::{expand_path, load_config, with_vault};
use relmove::TerminalPrompt;
use relmove_batch::AutoConfirm;
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::io::BufReader;

/// Move a note to another folder together with the files it links to
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the vault directory
    #[arg(short, long, env = "RELMOVE_VAULT_PATH", global = true)]
    vault: Option<PathBuf>,

    /// YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Language of messages (en, zh)
    #[arg(long, global = true)]
    lang: Option<String>,

    /// Diagnostic log format (human, json)
    #[arg(long, default_value = "human", global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Move FILE into FOLDER
    Move {
        /// Vault-relative path of the file to move
        file: String,
        /// Vault-relative target folder (`/` for the vault root)
        folder: String,
        /// Move only FILE, not the files it links to
        #[arg(long)]
        no_inlinks: bool,
        /// Replace files already at the destination instead of skipping them
        #[arg(long)]
        replace: bool,
        /// Confirm the initial selection without asking
        #[arg(short, long)]
        yes: bool,
    },
    /// Show what a move would do
    Plan {
        file: String,
        folder: String,
        /// Only FILE, not the files it links to
        #[arg(long)]
        no_inlinks: bool,
        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },
    /// List folders whose path contains QUERY
    Folders {
        #[arg(default_value = "")]
        query: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    let mut config = load_config(args.config.as_deref()).context("Failed to load configuration")?;
    if let Some(lang) = &args.lang {
        config.language = lang.clone();
    }

    init_logging(&config.log_level, args.log_format)?;
    log::debug!("relmove v{}", env!("CARGO_PKG_VERSION"));

    let vault_path = match (&args.vault, &config.vault) {
        (Some(path), _) => path.clone(),
        (None, Some(vault)) => expand_path(&vault.path)?,
        (None, None) => anyhow::bail!("No vault given. Use --vault or set RELMOVE_VAULT_PATH"),
    };
    let config = with_vault(config, &vault_path)?;

    let app = App::open(config)
        .await
        .with_context(|| format!("Failed to open vault {}", vault_path.display()))?;
    log::info!("Vault ready: {} files", app.vault().file_count());

    match args.command {
        Command::Move {
            file,
            folder,
            no_inlinks,
            replace,
            yes,
        } => {
            let mut options = app.options();
            if no_inlinks {
                options = options.include_inlinks(false);
            }
            if replace {
                options = options.skip_file_when_exist(false);
            }

            let report = if yes || !options.include_inlinks {
                app.move_file(&file, &folder, &options, &AutoConfirm).await
            } else {
                let prompt = TerminalPrompt::new(
                    BufReader::new(tokio::io::stdin()),
                    tokio::io::stdout(),
                    app.messages(),
                    folder.clone(),
                );
                app.move_file(&file, &folder, &options, &prompt).await
            };

            println!("{}", report.notice(app.messages()));
            if !report.is_success() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Plan {
            file,
            folder,
            no_inlinks,
            json,
        } => {
            let plan = app.plan(&file, &folder, !no_inlinks).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                print!("{}", render_plan(&plan, app.messages()));
            }
        }
        Command::Folders { query } => {
            print!("{}", render_folders(&app.folders(&query), app.messages()));
        }
    }

    Ok(ExitCode::SUCCESS)
}
