pub mod cli;
pub mod config;
pub mod matcher;
pub mod record;
pub mod rules;

use anyhow::Context;
use colored::Colorize;
use std::path::Path;

pub use cli::{Cli, ColorMode, Commands, OutputFormat, cli_parse};
pub use config::{EngineConfig, load_config};
pub use matcher::{DecodeError, MatchType, Matcher};
pub use record::{Facility, Severity, SyslogMsg, parse_record, parse_records};
pub use rules::{encode_rules, first_match, load_rules};

fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("syslog_matcher={level}")));

    // A subscriber may already be installed when running under a test harness.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn load_rules_with_config(path: &Path, config: &EngineConfig) -> anyhow::Result<Vec<Matcher>> {
    load_rules(path, &config.rules)
        .with_context(|| format!("Failed to load rules from '{}'", path.display()))
}

fn describe(msg: &SyslogMsg) -> String {
    format!(
        "{} {}.{} {} {}: {}",
        msg.time.to_rfc3339(),
        msg.facility,
        msg.severity,
        msg.host,
        msg.program,
        msg.content
    )
}

pub fn run() -> anyhow::Result<()> {
    let cli = cli_parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.color {
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Never => colored::control::set_override(false),
        ColorMode::Auto => {}
    }

    let config = load_config(cli.config.as_deref()).context("Failed to load config")?;
    tracing::debug!(profile = %config.profile_name, "config loaded");

    match &cli.command {
        Commands::Check { rules } => {
            let rules = load_rules_with_config(rules, &config)?;
            for (index, rule) in rules.iter().enumerate() {
                println!("{:>3}  {}", index, rule);
            }
            if !cli.quiet {
                eprintln!("{} rule(s) OK", rules.len());
            }
        }
        Commands::Eval {
            rules,
            records,
            all,
            invert,
            format,
        } => {
            let rules = load_rules_with_config(rules, &config)?;
            let records = parse_records(records, &config.records)
                .with_context(|| format!("Failed to read records from '{}'", records.display()))?;

            let mut selected = 0usize;
            let mut verdicts = Vec::new();
            for (index, msg) in records.iter().enumerate() {
                let hit = first_match(&rules, msg);
                let chosen = hit.is_some() != *invert;
                if chosen {
                    selected += 1;
                }
                if !(chosen || *all) {
                    continue;
                }

                match format {
                    OutputFormat::Text => {
                        let verdict = match hit {
                            Some(rule) => format!("MATCH #{rule}").green().bold(),
                            None => "NO MATCH".red(),
                        };
                        println!("{verdict}  {}", describe(msg));
                    }
                    OutputFormat::Json => verdicts.push(serde_json::json!({
                        "record": index + 1,
                        "matched": hit.is_some(),
                        "rule": hit,
                        "rule_text": hit.map(|rule| rules[rule].to_string()),
                    })),
                }
            }

            if *format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&verdicts)?);
            }
            if !cli.quiet {
                eprintln!("{} of {} record(s) selected", selected, records.len());
            }
            tracing::info!(selected, total = records.len(), "evaluation finished");
        }
        Commands::Fmt { rules } => {
            let rules = load_rules_with_config(rules, &config)?;
            let document = encode_rules(&rules);
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
    }

    Ok(())
}
