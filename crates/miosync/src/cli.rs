//! Clap derive structures for the `miosync` CLI.
//!
//! Defines the command tree, global flags, and shared value enums.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// miosync -- declarative state sync for MinIO deployments
#[derive(Debug, Parser)]
#[command(
    name = "miosync",
    version,
    about = "Reconcile MinIO groups, policies, users and bucket retention",
    long_about = "Declares the desired state of a MinIO resource and converges the\n\
        server towards it: only the minimal set of admin API calls is issued,\n\
        and --check previews the changes without applying anything.",
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
    #[arg(long, short = 'p', env = "MIOSYNC_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Server endpoint (host:port, or URL whose https/http scheme selects TLS)
    #[arg(long, short = 'e', env = "MIOSYNC_ENDPOINT", global = true)]
    pub endpoint: Option<String>,

    /// Admin access key
    #[arg(long, env = "MIOSYNC_ACCESS_KEY", global = true)]
    pub access_key: Option<String>,

    /// Admin secret key
    #[arg(long, env = "MIOSYNC_SECRET_KEY", global = true, hide_env = true)]
    pub secret_key: Option<String>,

    /// Preview the changes without applying anything
    #[arg(long, short = 'n', visible_alias = "dry-run", global = true)]
    pub check: bool,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "MIOSYNC_OUTPUT",
        default_value = "text",
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

    /// Skip server certificate verification
    #[arg(long, short = 'k', env = "MIOSYNC_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "MIOSYNC_TIMEOUT", default_value = "30", global = true)]
    pub timeout: u64,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary with a before/after diff (default)
    Text,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// One word per run: "changed" or "unchanged" (scripting)
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
    /// Reconcile a group and its membership
    #[command(alias = "g")]
    Group(GroupArgs),

    /// Reconcile a canned policy and its associations
    #[command(alias = "pol")]
    Policy(PolicyArgs),

    /// Reconcile a user
    #[command(alias = "u")]
    User(UserArgs),

    /// Reconcile a bucket's default retention rule
    #[command(alias = "ret")]
    Retention(RetentionArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  GROUP
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct GroupArgs {
    /// Group name
    pub name: String,

    /// Desired state
    #[arg(long, short = 's', default_value = "present", value_enum)]
    pub state: GroupStateArg,

    /// Exact member list (comma-separated); omit to leave membership alone
    #[arg(long, value_delimiter = ',')]
    pub users: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum GroupStateArg {
    /// Group exists and is enabled
    Present,
    /// Group does not exist
    Absent,
    /// Group exists but is disabled
    Disabled,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  POLICY
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct PolicyArgs {
    /// Policy name
    pub name: String,

    /// Desired state
    #[arg(long, short = 's', default_value = "present", value_enum)]
    pub state: PolicyStateArg,

    /// JSON file with the IAM statements (a Statement array, or a full
    /// policy document containing one)
    #[arg(long, short = 'F', value_name = "FILE")]
    pub statements_file: Option<PathBuf>,

    /// Users to attach the policy to (detach when state is absent)
    #[arg(long, value_delimiter = ',')]
    pub users: Vec<String>,

    /// Groups to attach the policy to (detach when state is absent)
    #[arg(long, value_delimiter = ',')]
    pub groups: Vec<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PolicyStateArg {
    Present,
    Absent,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  USER
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct UserArgs {
    /// User access key
    pub access_key: String,

    /// Desired state
    #[arg(long, short = 's', default_value = "present", value_enum)]
    pub state: UserStateArg,

    /// Secret key for the user (required only when creating)
    #[arg(long, env = "MIOSYNC_USER_SECRET_KEY", hide_env = true)]
    pub user_secret_key: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum UserStateArg {
    /// User exists (an existing user is never modified)
    Present,
    /// User does not exist
    Absent,
    /// User exists but is disabled
    Disabled,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  RETENTION
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct RetentionArgs {
    /// Bucket name
    pub bucket: String,

    /// Desired state
    #[arg(long, short = 's', default_value = "present", value_enum)]
    pub state: RetentionStateArg,

    /// Retention mode
    #[arg(long, value_enum)]
    pub mode: Option<RetentionModeArg>,

    /// Retention period in days
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub days: Option<u32>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RetentionStateArg {
    Present,
    Absent,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RetentionModeArg {
    /// Privileged users may override the retention
    Governance,
    /// Nobody may shorten or remove the retention
    Compliance,
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

    /// Display current resolved configuration (secrets redacted)
    Show,

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store a secret key in the system keyring
    SetSecret {
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
