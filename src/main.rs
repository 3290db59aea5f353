mod debug_report;

use std::io::{self, BufRead, IsTerminal};
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use twzip::{Address, AddressRule};

const LOG_ENV: &str = "TWZIP_LOG";

fn main() {
    init_logging();

    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => exit_with(err),
    };

    if let Err(err) = run(config) {
        exit_with(err);
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error("error: {0} expects a value")]
    MissingValue(&'static str),
    #[error("error: {0} provided multiple times")]
    Duplicate(&'static str),
    #[error("error: unknown option '{0}'")]
    UnknownOption(String),
    #[error("error: --rule and --tokens cannot be combined")]
    Conflict,
    #[error("error: no rule provided\n\n{}", help_text())]
    NoRule,
    #[error("error: no address provided on the command line or stdin")]
    NoInput,
    #[error("error: failed to read stdin: {0}")]
    Stdin(#[from] io::Error),
}

impl CliError {
    fn exit_code(&self) -> i32 {
        match self {
            CliError::Stdin(_) => 1,
            _ => 2,
        }
    }
}

fn exit_with(err: CliError) -> ! {
    eprintln!("{err}");
    std::process::exit(err.exit_code());
}

enum Mode {
    Match { rule: String, addresses: Vec<String> },
    Tokens(String),
}

struct CliConfig {
    mode: Mode,
    color: bool,
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn run(config: CliConfig) -> Result<(), CliError> {
    match config.mode {
        Mode::Tokens(text) => {
            debug_report::print_tokens(&Address::new(text), config.color);
        }
        Mode::Match { rule, addresses } => {
            let addresses = if addresses.is_empty() { read_stdin_addresses()? } else { addresses };
            if addresses.is_empty() {
                return Err(CliError::NoInput);
            }

            let rule = AddressRule::new(rule);
            let results: Vec<_> = addresses
                .into_iter()
                .map(Address::new)
                .map(|address| {
                    let details = rule.explain(&address);
                    (address, details)
                })
                .collect();

            tracing::debug!(
                rule = rule.as_str(),
                evaluated = results.len(),
                matched = results.iter().filter(|(_, d)| d.matched).count(),
                "run finished"
            );
            debug_report::print_run(&rule, &results, config.color);
        }
    }
    Ok(())
}

fn parse_args() -> Result<CliConfig, CliError> {
    let mut rule: Option<String> = None;
    let mut tokens: Option<String> = None;
    let mut addresses: Vec<String> = Vec::new();
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1);

    fn set_once(slot: &mut Option<String>, value: String, flag: &'static str) -> Result<(), CliError> {
        if slot.is_some() {
            return Err(CliError::Duplicate(flag));
        }
        *slot = Some(value);
        Ok(())
    }

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("twzip {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--rule" | "-r" => {
                let value = args.next().ok_or(CliError::MissingValue("--rule"))?;
                set_once(&mut rule, value, "--rule")?;
            }
            "--tokens" | "-t" => {
                let value = args.next().ok_or(CliError::MissingValue("--tokens"))?;
                set_once(&mut tokens, value, "--tokens")?;
            }
            "--" => {
                addresses.extend(args.by_ref());
                break;
            }
            _ if arg.starts_with("--rule=") => {
                set_once(&mut rule, arg.trim_start_matches("--rule=").to_string(), "--rule")?;
            }
            _ if arg.starts_with("--tokens=") => {
                set_once(&mut tokens, arg.trim_start_matches("--tokens=").to_string(), "--tokens")?;
            }
            _ if arg.starts_with('-') => {
                return Err(CliError::UnknownOption(arg));
            }
            _ => addresses.push(arg),
        }
    }

    let mode = match (rule, tokens) {
        (Some(_), Some(_)) => return Err(CliError::Conflict),
        (None, Some(text)) => Mode::Tokens(text),
        (Some(rule), None) => Mode::Match { rule, addresses },
        (None, None) => return Err(CliError::NoRule),
    };

    Ok(CliConfig { mode, color })
}

fn read_stdin_addresses() -> Result<Vec<String>, CliError> {
    let lines = io::stdin().lock().lines().collect::<Result<Vec<_>, _>>()?;
    Ok(lines.into_iter().filter(|line| !line.trim().is_empty()).collect())
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "twzip {version}

Taiwanese address tokenizer and delivery-rule matcher.

Usage:
  twzip [OPTIONS] --rule <rule> [--] [address...]
  twzip [OPTIONS] --tokens <text>

Options:
  -r, --rule <rule>          Delivery rule to test, e.g. \"中山路 單 3號以上\".
                             Addresses come from the remaining args, or one per
                             line on stdin when none are given.
  -t, --tokens <text>        Only tokenize <text> and print the tokens.
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Environment:
  {log_env}=<filter>         Log filter for stderr diagnostics (default: warn),
                             e.g. {log_env}=twzip=trace.

Exit codes:
  0  Success (whether or not addresses matched).
  1  Failed to read input.
  2  Invalid arguments or missing input.
",
        version = env!("CARGO_PKG_VERSION"),
        log_env = LOG_ENV,
    )
}
