// src/main.rs
use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use notion_pull::{
    CommandLineInput, ExportConfig, FileSystemSink, NotionHttpClient, Orchestrator, PullReport,
};
use std::fs;

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> anyhow::Result<()> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("notion_pull.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stdout_appender = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stdout")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Runs one export: resolve the root, traverse, write everything under the
/// output directory.
async fn execute_export(config: &ExportConfig) -> anyhow::Result<PullReport> {
    let client = NotionHttpClient::new(&config.api_key, config.retry)
        .context("Failed to create the Notion API client")?;
    let sink = FileSystemSink::new(&config.output_dir);

    let report = Orchestrator::new(&client, &sink)
        .with_policy(config.policy)
        .pull(&config.root, config.depth)
        .await
        .with_context(|| format!("Failed to export {}", config.root))?;

    Ok(report)
}

fn report_completion(config: &ExportConfig, report: &PullReport) {
    println!(
        "✓ Exported to {}: {}",
        config.output_dir.display(),
        report
    );

    for failure in &report.failures {
        eprintln!(
            "⚠️  Skipped {} {}: {}",
            failure.kind.as_str(),
            failure.reference,
            failure.message
        );
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    let config = ExportConfig::resolve(cli)?;

    let report = execute_export(&config).await?;
    report_completion(&config, &report);

    Ok(())
}
