use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "modelboard")]
#[command(about = "Leaderboard, comparison and red-teaming views over an AI model dataset")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct Cli {
    /// Directory holding default.toml and local.toml
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    /// Model records file, overrides the configured one
    #[arg(long, global = true)]
    pub models_file: Option<PathBuf>,

    /// Provider pricing file, overrides the configured one
    #[arg(long, global = true)]
    pub providers_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Search, developer filter and sort shared by the table subcommands
#[derive(Debug, Clone, Default, clap::Args)]
pub struct TableArgs {
    /// Search model and developer names
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only show models from this developer
    #[arg(short, long)]
    pub developer: Option<String>,

    /// Sort column id (e.g. operationalRank, mathLiveBench, contextLength)
    #[arg(long)]
    pub sort: Option<String>,

    /// asc or desc
    #[arg(long)]
    pub direction: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the JSON API server
    Serve {
        /// Port to listen on, overrides the configured one
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Start the API server and an interactive browser against it
    Run {
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print the model leaderboard
    Table {
        #[command(flatten)]
        table: TableArgs,
    },

    /// Show one model with its providers
    Show {
        /// Model id, e.g. gpt-4o
        id: String,
    },

    /// Compare models side by side
    Compare {
        /// Model ids
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Print the red-teaming leaderboard
    Redteam {
        #[command(flatten)]
        table: TableArgs,
    },

    /// Chart one metric as horizontal bars
    Chart {
        /// Metric id, see `modelboard metrics`
        metric: String,

        /// Show the best N models for the metric instead of the table order
        #[arg(long)]
        top: Option<usize>,

        #[command(flatten)]
        table: TableArgs,
    },

    /// Print provider pricing
    Providers {
        /// Only offerings for this model id
        #[arg(short, long)]
        model: Option<String>,

        /// Sort column id (provider, model, inputCost, outputCost, latency, throughput, contextLength)
        #[arg(long)]
        sort: Option<String>,

        #[arg(long)]
        direction: Option<String>,
    },

    /// List developers, or the models of one developer
    Developers {
        /// Developer name or slug
        name: Option<String>,
    },

    /// List chartable metrics
    Metrics,

    /// Print the model ids detail pages are generated for
    Ids,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_table_arguments() {
        let cli = Cli::parse_from(["modelboard", "table", "--sort", "mathLiveBench", "--direction", "desc", "-d", "Meta"]);
        match cli.command {
            Some(Commands::Table { table }) => {
                assert_eq!(table.sort.as_deref(), Some("mathLiveBench"));
                assert_eq!(table.developer.as_deref(), Some("Meta"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
