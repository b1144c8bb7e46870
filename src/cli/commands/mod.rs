//! CLI command implementations
//!
//! Each command is implemented in its own submodule.

pub mod deps;
pub mod order;
pub mod refresh;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use crate::cli::output::{create_repository_bar, OutputConfig};
use crate::cli::RunContext;
use crate::config::defaults::{ENV_GROUP_ID, ENV_JOBS, ENV_OUTPUT_FILE, ENV_PLUGIN_VERSION};
use crate::core::discover::Repository;
use crate::core::ingest::{IngestResults, Ingester};
use crate::core::record::TreeCache;
use crate::core::settings::{Settings, SettingsOverrides};
use crate::infra::git::GitSourceControl;
use crate::infra::maven::MavenTreeDumper;

/// Settings shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct SettingsArgs {
    /// Group id identifying the organization's own artifacts
    #[arg(long, env = ENV_GROUP_ID)]
    pub group_id: Option<String>,

    /// Version of maven-dependency-plugin used to dump trees
    #[arg(long, env = ENV_PLUGIN_VERSION)]
    pub plugin_version: Option<String>,

    /// Name of the tree output file (also the cache file suffix)
    #[arg(long, env = ENV_OUTPUT_FILE)]
    pub output_file: Option<String>,

    /// Directory holding cached trees (relative to the root)
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,

    /// Maximum number of repositories ingested in parallel
    #[arg(short, long, env = ENV_JOBS)]
    pub jobs: Option<usize>,

    /// Match dependencies on group and name instead of name only
    #[arg(long)]
    pub strict: bool,
}

impl From<SettingsArgs> for SettingsOverrides {
    fn from(args: SettingsArgs) -> Self {
        Self {
            group_id: args.group_id,
            plugin_version: args.plugin_version,
            output_file: args.output_file,
            cache_dir: args.cache_dir,
            jobs: args.jobs,
            strict: args.strict,
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the build groups of every repository under the root
    Order {
        #[command(flatten)]
        settings: SettingsArgs,

        /// Use cached trees only; never run git or Maven
        #[arg(long)]
        offline: bool,

        /// Also write the extracted dependency data as JSON to this file
        #[arg(long)]
        data_out: Option<PathBuf>,
    },

    /// Regenerate stale dependency tree caches
    Refresh {
        #[command(flatten)]
        settings: SettingsArgs,
    },

    /// Show the dependency information of one repository
    Deps {
        /// Repository directory name
        repository: String,

        #[command(flatten)]
        settings: SettingsArgs,

        /// Use the cached tree only; never run git or Maven
        #[arg(long)]
        offline: bool,
    },
}

impl Commands {
    /// Execute the command, returning the process exit code
    pub async fn run(self, context: &RunContext) -> Result<i32> {
        match self {
            Self::Order {
                settings,
                offline,
                data_out,
            } => {
                let settings = load_settings(context, settings)?;
                order::execute(&settings, context.output, offline, data_out.as_deref()).await
            }
            Self::Refresh { settings } => {
                let settings = load_settings(context, settings)?;
                refresh::execute(&settings, context.output).await
            }
            Self::Deps {
                repository,
                settings,
                offline,
            } => {
                let settings = load_settings(context, settings)?;
                deps::execute(&settings, context.output, &repository, offline).await
            }
        }
    }
}

fn load_settings(context: &RunContext, args: SettingsArgs) -> Result<Settings> {
    let settings = Settings::load(&context.root, context.config.as_deref(), args.into())
        .context("Failed to load settings")?;
    tracing::debug!("Effective settings: {settings:?}");
    Ok(settings)
}

/// Build the ingester for `settings` backed by git and Maven
pub(crate) fn build_ingester(settings: &Settings) -> Arc<Ingester> {
    let cache = TreeCache::new(&settings.cache_dir, &settings.output_file);
    let dumper = MavenTreeDumper::new(&settings.plugin_version, &settings.output_file);
    Arc::new(Ingester::new(
        cache,
        Arc::new(GitSourceControl::new()),
        Arc::new(dumper),
    ))
}

/// Ingest `repositories`, or load their caches when `offline`
pub(crate) async fn ingest_repositories(
    settings: &Settings,
    repositories: Vec<Repository>,
    offline: bool,
    output: OutputConfig,
) -> IngestResults {
    let ingester = build_ingester(settings);
    tracing::debug!("Cache directory: {}", ingester.cache().dir().display());

    if offline {
        return repositories
            .into_iter()
            .map(|repo| {
                let result = ingester.load_cached(&repo.name);
                if let Err(e) = &result {
                    tracing::warn!("Excluding '{}' from this run: {e}", repo.name);
                }
                (repo.name, result)
            })
            .collect();
    }

    let pb = create_repository_bar(repositories.len() as u64, output);
    pb.set_message("ingesting");
    let tick = pb.clone();

    let jobs = repositories
        .into_iter()
        .map(|repo| (repo.name, repo.path))
        .collect();
    let results = ingester
        .ingest_all(jobs, settings.jobs, move |name| {
            tick.set_message(name.to_string());
            tick.inc(1);
        })
        .await;

    pb.finish_and_clear();
    results
}
