// src/config.rs
use crate::constants::{DEFAULT_MAX_RETRIES, DEFAULT_TRAVERSAL_DEPTH};
use crate::error::AppError;
use crate::error_recovery::RetryPolicy;
use crate::traversal::FailurePolicy;
use crate::types::{ApiKey, NotionId};
use clap::Parser;
use std::path::PathBuf;

/// Environment variables consulted for the integration token, in order.
pub const TOKEN_ENV_VARS: [&str; 2] = ["NOTION_TOKEN", "NOTION_API_KEY"];

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Notion page/database URL or ID (e.g., "https://www.notion.so/...")
    pub input: String,

    /// Directory the exported files are written under
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// How many hops to follow into child pages, child databases and
    /// related databases (0 = only the requested resource)
    #[arg(long, default_value_t = DEFAULT_TRAVERSAL_DEPTH)]
    pub depth: u8,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Skip resources that fail to export instead of aborting the run
    #[arg(long, default_value_t = false)]
    pub continue_on_error: bool,

    /// Retries for rate-limited or failed requests
    #[arg(long, default_value_t = DEFAULT_MAX_RETRIES)]
    pub max_retries: u32,
}

/// Resolved export configuration, validated and ready to drive a run.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub root: NotionId,
    pub api_key: ApiKey,
    pub output_dir: PathBuf,
    pub depth: u8,
    pub policy: FailurePolicy,
    pub retry: RetryPolicy,
    pub verbose: bool,
}

impl ExportConfig {
    /// Resolves a complete configuration from CLI input and the process
    /// environment.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        Self::resolve_with(cli, |name| std::env::var(name).ok())
    }

    /// Like [`ExportConfig::resolve`], reading variables through `env`.
    pub fn resolve_with(
        cli: CommandLineInput,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AppError> {
        let token = TOKEN_ENV_VARS
            .iter()
            .filter_map(|name| env(name))
            .find(|value| !value.trim().is_empty())
            .ok_or_else(|| {
                AppError::MissingConfiguration(format!(
                    "set {} (or {}) to a Notion integration token",
                    TOKEN_ENV_VARS[0], TOKEN_ENV_VARS[1]
                ))
            })?;

        let api_key = ApiKey::new(token)?;
        let root = NotionId::parse(&cli.input)?;

        let policy = if cli.continue_on_error {
            FailurePolicy::SkipBranch
        } else {
            FailurePolicy::FailFast
        };

        Ok(ExportConfig {
            root,
            api_key,
            output_dir: cli.output_dir,
            depth: cli.depth,
            policy,
            retry: RetryPolicy::with_retries(cli.max_retries),
            verbose: cli.verbose,
        })
    }
}
