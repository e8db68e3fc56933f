use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

/// Output format for CLI commands
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn is_json(self) -> bool {
        matches!(self, OutputFormat::Json)
    }
}

#[derive(Parser)]
#[command(name = "compliance")]
#[command(version, about = "Compliance - profile management for Chef Compliance and Chef Automate")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Log in to a Chef Compliance server
    Login(LoginArgs),

    /// Log in to a Chef Automate server
    LoginAutomate(LoginAutomateArgs),

    /// List the profiles available on the server
    Profiles,

    /// Show the server version
    Version,

    /// Upload a packaged profile archive
    Upload(UploadArgs),

    /// Show the stored session
    Status,

    /// Log out and remove the stored session
    Logout,
}

#[derive(Args)]
pub struct LoginArgs {
    /// Server URL (defaults to `default.server` from the config file)
    pub server: Option<String>,

    /// Compliance user name
    #[arg(long)]
    pub user: Option<String>,

    /// Password, exchanged for an access token
    #[arg(long, env = "COMPLIANCE_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Access token, stored as is
    #[arg(long, env = "COMPLIANCE_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Refresh token; verified right away unless --user is given
    #[arg(long, alias = "refresh_token", env = "COMPLIANCE_REFRESH_TOKEN", hide_env_values = true)]
    pub refresh_token: Option<String>,

    /// Disable TLS certificate validation
    #[arg(long, short = 'k')]
    pub insecure: bool,
}

#[derive(Args)]
pub struct LoginAutomateArgs {
    /// Server URL (defaults to `default.server` from the config file)
    pub server: Option<String>,

    /// Automate user name
    #[arg(long)]
    pub user: Option<String>,

    /// Enterprise name
    #[arg(long)]
    pub ent: Option<String>,

    /// Data collector token
    #[arg(long, env = "COMPLIANCE_DCTOKEN", hide_env_values = true)]
    pub dctoken: Option<String>,

    /// Automate user token
    #[arg(long, env = "COMPLIANCE_USERTOKEN", hide_env_values = true)]
    pub usertoken: Option<String>,

    /// Disable TLS certificate validation
    #[arg(long, short = 'k')]
    pub insecure: bool,
}

#[derive(Args)]
pub struct UploadArgs {
    /// Profile archive (.tar.gz)
    pub archive: PathBuf,

    /// Profile name (defaults to the archive file name)
    #[arg(long)]
    pub name: Option<String>,
}
