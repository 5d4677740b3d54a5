use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use std::io::IsTerminal;
use zephyr_sync::cli::{Cli, Commands, TcmArgs};
use zephyr_sync::commands::{
    dry_run, init_config, push_allure_results, run_xml_check, AllurePushConfig, PushSummary,
    XmlCheckConfig,
};
use zephyr_sync::config::{load_config, ZephyrSyncConfig};
use zephyr_sync::io::writers::TerminalWriter;
use zephyr_sync::io::OutputWriter;
use zephyr_sync::tcm::ZephyrClient;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbosity);

    match cli.command {
        Commands::Init { force } => {
            let cwd = std::env::current_dir().context("Failed to get current directory")?;
            init_config(&cwd, force)
        }
        Commands::Debug {
            report_from,
            environment,
        } => {
            let config = load_config();
            let environment = environment.unwrap_or(config.allure.environment);
            let summary = dry_run(&report_from, &environment)?;
            println!(
                "{} {} results, {} would be posted, {} without a case link",
                "Dry run:".bold(),
                summary.total_results,
                summary.mapped.to_string().green(),
                summary.skipped.to_string().yellow()
            );
            Ok(())
        }
        Commands::Allure {
            tcm,
            report_from,
            cycle_name,
            cycle_description,
            environment,
        } => {
            let config = load_config();
            let client = build_client(&tcm, &config)?;
            let push = AllurePushConfig {
                project_key: tcm.project_key,
                report_dir: report_from,
                cycle_name,
                cycle_description,
                environment: environment.unwrap_or(config.allure.environment),
                show_progress: std::io::stderr().is_terminal(),
            };
            let summary = runtime()?.block_on(push_allure_results(&client, &push))?;
            print_push_summary(&summary);
            Ok(())
        }
        Commands::Xml {
            tcm,
            report_from,
            platform,
            update_cases,
            suite_name_contains,
            output_dir,
        } => {
            let config = load_config();
            let client = build_client(&tcm, &config)?;
            let check = XmlCheckConfig {
                project_key: tcm.project_key,
                report_from,
                platform,
                update_cases,
                suite_name_contains,
                max_case_results: config.checker.max_case_results,
                max_status_results: config.checker.max_status_results,
                output_dir: output_dir.unwrap_or(config.checker.output_dir),
            };
            let (output, _written) = runtime()?.block_on(run_xml_check(&client, &check))?;
            TerminalWriter::new().write_results(&output)
        }
    }
}

fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_secs()
        .init();
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")
}

fn build_client(tcm: &TcmArgs, config: &ZephyrSyncConfig) -> Result<ZephyrClient> {
    let base_url = match (&tcm.base_url, tcm.api) {
        (Some(url), _) => url.clone(),
        (None, Some(flavor)) => flavor.base_url().to_string(),
        (None, None) => config.api.resolved_base_url().to_string(),
    };
    log::debug!("Using TCM at {}", base_url);
    ZephyrClient::new(&base_url, tcm.token.clone(), config.api.timeout())
        .context("Failed to create TCM client")
}

fn print_push_summary(summary: &PushSummary) {
    println!();
    match &summary.cycle_key {
        Some(key) => println!("{} {}", "Test cycle".bold(), key.cyan()),
        None => {
            println!("{}", "Test cycle not created, nothing posted".red().bold());
            return;
        }
    }
    println!("  Results read: {}", summary.total_results);
    println!("  Without case link: {}", summary.skipped.to_string().yellow());
    println!("  Posted: {}", summary.posted.to_string().green());
    println!("  Not posted: {}", summary.not_posted);
    println!("  Retried: {}", summary.retried);
    let failed = summary.not_posted_after_retry.to_string();
    let failed = if summary.not_posted_after_retry == 0 {
        failed.green()
    } else {
        failed.red().bold()
    };
    println!("  Not posted after retry: {}", failed);
}
