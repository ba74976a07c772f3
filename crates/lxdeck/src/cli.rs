//! Clap derive structures for the `lxdeck` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use lxdeck_core::{NetworkType, Section};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// lxdeck -- terminal console for LXD
#[derive(Debug, Parser)]
#[command(
    name = "lxdeck",
    version,
    about = "Administer LXD instances and networks from the terminal",
    long_about = "A console for LXD servers.\n\n\
        Lifecycle actions ask for confirmation unless --yes is given, and the\n\
        network form only offers the fields that apply to the chosen type.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Server profile to use
    #[arg(long, short = 'p', env = "LXDECK_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Server URL (overrides profile)
    #[arg(long, short = 'r', env = "LXDECK_URL", global = true)]
    pub remote_url: Option<String>,

    /// LXD project
    #[arg(long, env = "LXDECK_PROJECT", global = true)]
    pub project: Option<String>,

    /// OIDC access token
    #[arg(long, env = "LXDECK_TOKEN", global = true, hide_env = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "LXDECK_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept the server's self-signed certificate
    #[arg(long, short = 'k', env = "LXDECK_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "LXDECK_TIMEOUT", default_value = "30", global = true)]
    pub timeout: u64,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage containers and virtual machines
    #[command(alias = "inst", alias = "i")]
    Instances(InstancesArgs),

    /// Manage networks
    #[command(alias = "net", alias = "n")]
    Networks(NetworksArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  INSTANCES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct InstancesArgs {
    #[command(subcommand)]
    pub command: InstancesCommand,
}

#[derive(Debug, Subcommand)]
pub enum InstancesCommand {
    /// List instances
    #[command(alias = "ls")]
    List,

    /// Start a stopped instance
    Start {
        /// Instance name
        name: String,
    },

    /// Stop a running instance
    Stop {
        /// Instance name
        name: String,

        /// Kill the instance instead of a clean shutdown
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Restart a running instance
    Restart {
        /// Instance name
        name: String,

        /// Kill the instance instead of a clean shutdown
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Freeze (pause) a running instance
    Freeze {
        /// Instance name
        name: String,
    },

    /// Resume a frozen instance
    Unfreeze {
        /// Instance name
        name: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  NETWORKS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct NetworksArgs {
    #[command(subcommand)]
    pub command: NetworksCommand,
}

/// Field edits shared by `create`, `edit` and `fields`.
#[derive(Debug, Args)]
pub struct FormArgs {
    /// Set a field: `ipv4.address=10.0.0.1/24` or `ipv4_address=...`
    #[arg(long = "set", value_name = "FIELD=VALUE")]
    pub set: Vec<String>,

    /// Add a `user.*` metadata pair
    #[arg(long = "user", value_name = "KEY=VALUE")]
    pub user: Vec<String>,
}

#[derive(Debug, Subcommand)]
pub enum NetworksCommand {
    /// List networks
    #[command(alias = "ls")]
    List,

    /// Show a network's details and config
    Get {
        /// Network name
        name: String,
    },

    /// Create a network
    Create {
        /// Network name
        name: Option<String>,

        /// Network type
        #[arg(long = "type", short = 't', default_value = "bridge-standard")]
        network_type: NetworkType,

        /// Description
        #[arg(long, short = 'd')]
        description: Option<String>,

        #[command(flatten)]
        form: FormArgs,

        /// Create from a YAML network definition
        #[arg(long, conflicts_with_all = ["set", "user", "interactive"])]
        from_yaml: Option<PathBuf>,

        /// Walk the form field by field
        #[arg(long, short = 'i')]
        interactive: bool,
    },

    /// Edit an existing network
    Edit {
        /// Network name
        name: String,

        /// Description
        #[arg(long, short = 'd')]
        description: Option<String>,

        #[command(flatten)]
        form: FormArgs,

        /// Clear a field
        #[arg(long = "unset", value_name = "FIELD")]
        unset: Vec<String>,

        /// Replace the definition with a YAML file
        #[arg(long, conflicts_with_all = ["set", "user", "unset", "interactive"])]
        from_yaml: Option<PathBuf>,

        /// Walk the form field by field
        #[arg(long, short = 'i')]
        interactive: bool,
    },

    /// Delete an unused managed network
    #[command(alias = "rm")]
    Delete {
        /// Network name
        name: String,
    },

    /// Show which fields the form offers for a type and values
    Fields {
        /// Start from an existing network instead of a new one
        #[arg(long)]
        network: Option<String>,

        /// Network type for a new form
        #[arg(long = "type", short = 't', default_value = "bridge-standard")]
        network_type: NetworkType,

        /// Form section
        #[arg(long, short = 's', default_value = "details")]
        section: Section,

        #[command(flatten)]
        form: FormArgs,
    },

    /// List network types and whether this server supports them
    Types,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// Print the config file location
    Path,

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store an OIDC token in the system keyring
    SetToken {
        /// Profile name
        #[arg(long)]
        profile: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
