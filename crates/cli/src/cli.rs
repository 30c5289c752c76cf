use clap::{Args, Parser, Subcommand, ValueEnum};
use url::Url;

#[derive(Parser, Debug)]
#[command(name = "inspectarr", version, about = "Inspect the media managed by Radarr and Sonarr")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Inspect the movies of a Radarr instance
    Radarr(RadarrArgs),
    /// Inspect the series of a Sonarr instance
    Sonarr(SonarrArgs),
}

#[derive(Args, Debug, Clone, Default)]
#[command(next_help_heading = "Service options")]
pub struct ServiceArgs {
    /// URL of the instance [default: the <SERVICE>_URL environment variable]
    #[arg(long)]
    pub url: Option<Url>,
    /// API key of the instance [default: the <SERVICE>_API_KEY environment variable]
    #[arg(long, value_name = "API_KEY")]
    pub api_key: Option<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Md,
    Json,
}

#[derive(Args, Debug, Clone, Default)]
#[command(next_help_heading = "Output options")]
pub struct OutputArgs {
    /// Show fields that are hidden by default in the markdown table
    #[arg(long)]
    pub all: bool,
    /// The type of output to generate ("json" implies --quiet)
    #[arg(long, value_enum, default_value = "md", ignore_case = true)]
    pub output: OutputFormat,
    /// Suppress all output except the markdown/JSON
    #[arg(long)]
    pub quiet: bool,
    /// Use the field aliases as the markdown table headers
    #[arg(long)]
    pub short_headers: bool,
}

#[derive(Args, Debug, Clone)]
pub struct RadarrArgs {
    #[command(flatten)]
    pub service: ServiceArgs,
    #[command(flatten)]
    pub output: OutputArgs,
    /// The query, e.g. `rg == NTb && y >= 2020 | SORT size desc`
    #[arg(value_name = "QUERY")]
    pub query: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct SonarrArgs {
    #[command(flatten)]
    pub service: ServiceArgs,
    #[command(flatten)]
    pub output: OutputArgs,
    /// One row per season
    #[arg(long)]
    pub by_season: bool,
    /// One row per episode (takes precedence over --by-season)
    #[arg(long)]
    pub by_episode: bool,
    /// The query, e.g. `s == 1 && !m`
    #[arg(value_name = "QUERY")]
    pub query: Option<String>,
}
