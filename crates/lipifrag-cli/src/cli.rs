use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Lipifrag Developers",
    version,
    about = "Lipifrag CLI - Split lipid-like molecules into capped functional-group fragments.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads used for batch fragmentation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fragment a single molecule from a Tinker XYZ file.
    Fragment(FragmentArgs),
    /// Fragment every Tinker XYZ file in a directory and its immediate sub-directories.
    Batch(BatchArgs),
}

/// Arguments for the `fragment` subcommand.
#[derive(Args, Debug)]
pub struct FragmentArgs {
    /// Path to the input molecule (e.g., lipid.txyz).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Directory that receives the fragment files and manifest.
    #[arg(short, long, required = true, value_name = "DIR")]
    pub output: PathBuf,

    #[command(flatten)]
    pub options: FragmentationOptions,
}

/// Arguments for the `batch` subcommand.
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Directory containing the input molecules.
    #[arg(short, long, required = true, value_name = "DIR")]
    pub input: PathBuf,

    /// Directory that receives one output sub-directory per molecule.
    #[arg(short, long, required = true, value_name = "DIR")]
    pub output: PathBuf,

    #[command(flatten)]
    pub options: FragmentationOptions,
}

/// Options shared by every fragmenting subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct FragmentationOptions {
    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Skip writing single fragments, overriding the config file.
    #[arg(long)]
    pub no_singles: bool,

    /// Skip writing double fragments, overriding the config file.
    #[arg(long)]
    pub no_doubles: bool,

    /// Skip writing dimers, overriding the config file.
    #[arg(long)]
    pub no_dimers: bool,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S capping.carbon-bond-length=1.53
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}
