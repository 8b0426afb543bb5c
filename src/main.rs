mod debug_report;

use phonoshift::rules::french;
use phonoshift::{Deriver, Options, TraceFlags, TraceLog, evolve_using, normalize_latin, regression};
use std::io::{self, IsTerminal, Read};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const LOG_ENV: &str = "PHONOSHIFT_LOG";

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    init_tracing();

    let code = if config.regress { run_regression(&config) } else { run_words(&config) };
    std::process::exit(code);
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry().with(fmt::layer().with_writer(io::stderr)).with(filter).init();
}

fn run_words(config: &CliConfig) -> i32 {
    let catalogue = french::catalogue();
    let mut deriver = Deriver::new(&catalogue);
    let options = Options { trace: config.trace, normalize: config.latin };
    let mut code = 0;

    for word in &config.words {
        let mut log = TraceLog::new();
        match evolve_using(&mut deriver, word, &options, &mut log) {
            Ok(derivation) => {
                let trace = if config.trace.is_empty() { None } else { Some(&log) };
                debug_report::print_derivation(&derivation, trace, config.color);
            }
            Err(err) => {
                eprintln!("error: {word}: {err}");
                code = 1;
            }
        }
    }

    code
}

fn run_regression(config: &CliConfig) -> i32 {
    let catalogue = french::catalogue();
    let mut deriver = Deriver::new(&catalogue);
    let report = regression::run_with(french::EXAMPLES, |latin| deriver.derive(&normalize_latin(latin)?));

    debug_report::print_regression(&report, config.color);
    if report.errors().next().is_some() { 1 } else { 0 }
}

struct CliConfig {
    words: Vec<String>,
    latin: bool,
    trace: TraceFlags,
    regress: bool,
    color: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut words: Vec<String> = Vec::new();
    let mut latin = false;
    let mut trace = TraceFlags::empty();
    let mut trace_all = false;
    let mut regress = false;
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("phonoshift {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "-l" | "--latin" => latin = true,
            "-t" | "--trace" => trace |= TraceFlags::RULES | TraceFlags::CHANGES_ONLY,
            "--trace-all" => {
                trace |= TraceFlags::RULES;
                trace_all = true;
            }
            "--stages" => trace |= TraceFlags::STAGES,
            "--inventory" => trace |= TraceFlags::INVENTORY,
            "--regress" => regress = true,
            "--" => {
                words.extend(args.by_ref());
                break;
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => words.push(arg),
        }
    }

    if trace_all {
        trace.remove(TraceFlags::CHANGES_ONLY);
    }

    if regress {
        if !words.is_empty() {
            return Err("error: --regress takes no words".to_string());
        }
        return Ok(CliConfig { words, latin, trace, regress, color });
    }

    if words.is_empty() {
        words = read_stdin_words()?;
    }

    if words.is_empty() {
        return Err(format!("error: no input provided\n\n{}", help_text()));
    }

    Ok(CliConfig { words, latin, trace, regress, color })
}

fn read_stdin_words() -> Result<Vec<String>, String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    Ok(buffer.split_whitespace().map(str::to_string).collect())
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "phonoshift {version}

Latin to Modern French sound change CLI.

Usage:
  phonoshift [OPTIONS] [--] <word...>
  phonoshift --regress

Words are phonemic: '/' before the stressed vowel, ':' after a long one
(e.g. mediet/a:tem). With --latin they may use Latin spelling (c, qu, x, ae).
Words are read from stdin, whitespace separated, when none are given.

Options:
  -l, --latin        Normalize Latin spelling before deriving.
  -t, --trace        Show every rule that changed the word.
  --trace-all        Show every rule application, changed or not.
  --stages           Show the form after each stage in the trace.
  --inventory        Show classification changes in the trace.
  --regress          Run the attested examples and report mismatches.
  --color            Force ANSI color output.
  --no-color         Disable ANSI color output.
  -h, --help         Show this help message.
  -V, --version      Print version information.

Environment:
  {log_env:<22}  tracing filter for diagnostics on stderr (default: warn).
  PHONOSHIFT_DEBUG_RULES  Log every rule application at debug level.

Exit codes:
  0  Success.
  1  A derivation failed.
  2  Invalid arguments or missing input.
",
        version = env!("CARGO_PKG_VERSION"),
        log_env = LOG_ENV,
    )
}
