use siteops::cli::{Cli, Commands, GetCommands, ImportCommands, SetCommands};
use siteops::commands::{backup, drush, get, import, sequelace, set, sync_db};
use siteops::config::Settings;
use siteops::defaults;
use siteops::RunContext;
use std::process;
use tracing_subscriber::EnvFilter;

// Allow println in main CLI binary
#[allow(clippy::disallowed_methods)]
#[tokio::main]
async fn main() {
    init_logging();

    let cli = Cli::parse();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let site = cli
        .site
        .or_else(defaults::site_from_cwd)
        .unwrap_or_default();
    if site.is_empty() {
        eprintln!("Error: could not determine the site; pass --site");
        process::exit(1);
    }

    let ctx = RunContext::new(site, cli.environment, &settings);

    let result = match cli.command {
        Commands::Backup { token } => backup::handle_backup(&ctx, token.as_deref()).await,
        Commands::Drush { token, args } => {
            drush::handle_drush(&ctx, token.as_deref(), &args).await
        }
        Commands::Get { target } => match target {
            GetCommands::Info { token } => get::handle_info(&ctx, token.as_deref()).await,
            GetCommands::Config { token } => get::handle_config(&ctx, token.as_deref()).await,
        },
        Commands::Import { target } => match target {
            ImportCommands::Db { file, token } => {
                import::handle_import_db(&ctx, &file, token.as_deref()).await
            }
        },
        Commands::Set { target } => match target {
            SetCommands::Developer {
                google_account,
                ip,
                pub_key,
                skip_pub_key,
            } => {
                set::handle_set_developer(
                    google_account.as_deref(),
                    &ip,
                    pub_key.as_deref(),
                    skip_pub_key,
                )
                .await
            }
        },
        Commands::Sequelace {
            token,
            ssh_priv_key,
            sequel_ace_path,
        } => {
            sequelace::handle_sequelace(
                &ctx,
                token.as_deref(),
                ssh_priv_key.as_deref(),
                &sequel_ace_path,
            )
            .await
        }
        Commands::SyncDb {
            source,
            target,
            source_token,
            target_token,
        } => {
            sync_db::handle_sync_db(
                &ctx,
                &source,
                &target,
                source_token.as_deref(),
                target_token.as_deref(),
            )
            .await
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

/// Initialize logging based on environment variables
fn init_logging() {
    // Default to INFO level, can be overridden by RUST_LOG environment variable
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("siteops=info,warn"));

    // Logs go to stderr; stdout is reserved for remote command output and
    // connection info so it can be piped.
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
