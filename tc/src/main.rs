use clap::Parser;
use colored::*;
use eyre::{Context, Result, eyre};
use log::{LevelFilter, info};
use std::io::Read;
use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;

use taskcheck::actions;
use taskcheck::check::{CheckOutcome, NO_TASK_LIST};
use taskcheck::checklist::{analyze, strip};
use taskcheck::cli::{Cli, Command, OutputFormat};
use taskcheck::config::Config;
use taskcheck::github::{ActionContext, CheckRunRequest, ChecksClient};

fn parse_level(s: &str) -> LevelFilter {
    match s.to_uppercase().as_str() {
        "TRACE" => LevelFilter::Trace,
        "DEBUG" => LevelFilter::Debug,
        "INFO" => LevelFilter::Info,
        "WARN" | "WARNING" => LevelFilter::Warn,
        "ERROR" => LevelFilter::Error,
        "OFF" => LevelFilter::Off,
        _ => {
            eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
            LevelFilter::Info
        }
    }
}

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>, in_actions: bool) -> Result<()> {
    let mut builder = env_logger::Builder::from_default_env();

    // Priority: CLI --log-level > config file > RUST_LOG > default
    if let Some(level) = cli_log_level.or(config_log_level) {
        builder.filter_level(parse_level(level));
    } else if std::env::var_os("RUST_LOG").is_none() {
        // The runner hides ::debug:: lines unless step debugging is on
        builder.filter_level(if in_actions { LevelFilter::Debug } else { LevelFilter::Info });
    }

    if in_actions {
        builder.format(actions::format_record).target(env_logger::Target::Stdout);
    }

    builder.try_init().context("Failed to setup logging")
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if path != Path::new("-") => {
            std::fs::read_to_string(path).context(format!("Failed to read {}", path.display()))
        }
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

async fn run_action(
    config: &Config,
    token: Option<String>,
    event_path: &Path,
    repository: Option<&str>,
    api_url: Option<String>,
    dry_run: bool,
    in_actions: bool,
) -> Result<ExitCode> {
    let ctx = ActionContext::load(event_path, repository).context("Failed to load pull request event")?;
    info!(
        "Checking task list of {}/{}#{} at {}",
        ctx.owner,
        ctx.repo,
        ctx.number.map(|n| n.to_string()).unwrap_or_else(|| "?".to_string()),
        ctx.head_sha
    );

    let outcome = CheckOutcome::evaluate(ctx.body.as_deref(), &config.syntax());
    let request = CheckRunRequest::new(&config.check_name, &ctx.head_sha, &outcome, chrono::Utc::now());

    if dry_run {
        println!("{}", serde_json::to_string_pretty(&request)?);
    } else {
        let token = token
            .or_else(|| std::env::var("GITHUB_TOKEN").ok())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| eyre!("A token is required: pass --token or set INPUT_REPO-TOKEN / GITHUB_TOKEN"))?;
        let api_url = api_url.unwrap_or_else(|| config.api_url.clone());

        let client = ChecksClient::new(&api_url, &token, Duration::from_millis(config.timeout_ms))?;
        let run = client
            .create_check_run(&ctx.owner, &ctx.repo, &request)
            .await
            .context("Failed to create check run")?;
        match (run.id, run.html_url) {
            (_, Some(url)) => info!("Created check run {}", url),
            (Some(id), None) => info!("Created check run {}", id),
            (None, None) => info!("Created check run"),
        }
    }

    if outcome.is_success() {
        info!("{}", outcome.summary);
        Ok(ExitCode::SUCCESS)
    } else {
        // Reported even with logging turned off
        if in_actions {
            actions::set_failed(&outcome.summary);
        } else {
            eprintln!("{} {}", "✗".red(), outcome.summary);
        }
        Ok(ExitCode::FAILURE)
    }
}

fn run_check(config: &Config, file: Option<&Path>, format: OutputFormat) -> Result<ExitCode> {
    let text = read_input(file)?;
    let report = analyze(&text, &config.syntax());
    let outcome = CheckOutcome::from_report(&report);

    match format {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "all_completed": report.all_completed(),
                "conclusion": outcome.conclusion,
                "summary": outcome.summary,
                "completed": report.completed(),
                "pending": report.pending(),
                "report": report.text(),
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Text => {
            if report.is_empty() {
                println!("{}", NO_TASK_LIST.yellow());
            } else {
                println!("{}\n", report.text());
                let counts = format!("({}/{} done)", report.completed().len(), report.len());
                if report.all_completed() {
                    println!("{} {} {}", "✓".green(), outcome.summary.green(), counts.dimmed());
                } else {
                    println!("{} {} {}", "✗".red(), outcome.summary.red(), counts.dimmed());
                }
            }
        }
    }

    Ok(if report.all_completed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

async fn run(cli: Cli, in_actions: bool) -> Result<ExitCode> {
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    setup_logging(cli.log_level.as_deref(), config.log_level.as_deref(), in_actions)?;

    match cli.command {
        Command::Run {
            token,
            event_path,
            repository,
            api_url,
            dry_run,
        } => {
            run_action(
                &config,
                token,
                &event_path,
                repository.as_deref(),
                api_url,
                dry_run,
                in_actions,
            )
            .await
        }
        Command::Check { file, format } => run_check(&config, file.as_deref(), format),
        Command::Strip { file } => {
            let text = read_input(file.as_deref())?;
            print!("{}", strip(&text, &config.syntax()));
            Ok(ExitCode::SUCCESS)
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let in_actions = actions::running_in_actions();

    match run(cli, in_actions).await {
        Ok(code) => code,
        Err(e) => {
            if in_actions {
                actions::set_failed(&format!("{:#}", e));
            } else {
                eprintln!("{} {:#}", "✗".red(), e);
            }
            ExitCode::FAILURE
        }
    }
}
