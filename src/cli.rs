use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Where the Sequel Ace binary normally lives on macOS
pub const SEQUEL_ACE_PATH: &str = "/Applications/Sequel Ace.app/Contents/MacOS/Sequel Ace";

/// Main CLI interface for `siteops`
#[derive(Parser)]
#[command(name = "siteops")]
#[command(version = crate::VERSION)]
#[command(about = "Administer your managed site environments")]
#[command(
    long_about = "Run administrative operations (backups, drush, config export, \
developer access) against a site's remote environments"
)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Site identifier (defaults to the current directory name)
    #[arg(short = 'p', long, global = true)]
    pub site: Option<String>,

    /// Environment to operate on
    #[arg(short, long, global = true, default_value = "development")]
    pub environment: String,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Back up the environment's database to site storage
    Backup {
        /// Identity token for the environment (optional, machines only)
        #[arg(short, long)]
        token: Option<String>,
    },
    /// Run a drush command on the environment
    Drush {
        /// Identity token for the environment (optional, machines only)
        #[arg(short, long)]
        token: Option<String>,
        /// Arguments passed through to drush, e.g. `-- cr`
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
        args: Vec<String>,
    },
    /// Read state from the environment
    Get {
        /// What to read
        #[command(subcommand)]
        target: GetCommands,
    },
    /// Push local data into the environment
    Import {
        /// What to import
        #[command(subcommand)]
        target: ImportCommands,
    },
    /// Update the site configuration document
    Set {
        /// What to update
        #[command(subcommand)]
        target: SetCommands,
    },
    /// Open the environment's database in Sequel Ace (macOS only)
    Sequelace {
        /// Identity token for the environment (optional, machines only)
        #[arg(short, long)]
        token: Option<String>,
        /// Full path to the SSH private key presented to the bastion
        /// (defaults to ~/.ssh/id_rsa)
        #[arg(short = 'k', long)]
        ssh_priv_key: Option<PathBuf>,
        /// Full path to the Sequel Ace binary
        #[arg(long, default_value = SEQUEL_ACE_PATH)]
        sequel_ace_path: String,
    },
    /// Copy the database from one environment to another
    #[command(name = "sync-db")]
    SyncDb {
        /// Environment the database is exported from
        #[arg(long)]
        source: String,
        /// Environment whose database is overwritten
        #[arg(long)]
        target: String,
        /// Identity token for the source environment (optional, machines only)
        #[arg(long)]
        source_token: Option<String>,
        /// Identity token for the target environment (optional, machines only)
        #[arg(long)]
        target_token: Option<String>,
    },
}

/// Targets for `get`
#[derive(Subcommand)]
pub enum GetCommands {
    /// Print connection information, including secret credentials
    Info {
        /// Identity token for the environment (optional, machines only)
        #[arg(short, long)]
        token: Option<String>,
    },
    /// Export the environment's config and unpack it into ./config
    Config {
        /// Identity token for the environment (optional, machines only)
        #[arg(short, long)]
        token: Option<String>,
    },
}

/// Targets for `import`
#[derive(Subcommand)]
pub enum ImportCommands {
    /// Import a database dump into the environment
    Db {
        /// The database file to import
        #[arg(short, long)]
        file: PathBuf,
        /// Identity token for the environment (optional, machines only)
        #[arg(short, long)]
        token: Option<String>,
    },
}

/// Targets for `set`
#[derive(Subcommand)]
pub enum SetCommands {
    /// Add a developer's access details to siteops.yml
    Developer {
        /// Google Account email address (defaults to the active gcloud account)
        #[arg(short = 'g', long)]
        google_account: Option<String>,
        /// IP address(es) to allow through the SSH and HTTPS firewalls
        /// (defaults to your public IP)
        #[arg(short, long, value_delimiter = ',')]
        ip: Vec<String>,
        /// Full path to the SSH public key file (defaults to ~/.ssh/id_rsa.pub)
        #[arg(short = 'k', long)]
        pub_key: Option<PathBuf>,
        /// Skip adding an SSH public key, for adding a developer on someone
        /// else's behalf
        #[arg(short, long)]
        skip_pub_key: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}
