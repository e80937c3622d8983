//! cssdiff command-line interface.
//!
//! Compares two stylesheets and reports the class selectors present in the
//! From stylesheet but absent from the To stylesheet, one per line, sorted.

use std::str::FromStr;

use anyhow::{Result, anyhow};
use clap::Parser;
use cssdiff_core::{Config, DiffReport, Verbosity, is_url, run};
use owo_colors::OwoColorize;

/// cssdiff — detect CSS classes removed between two stylesheets
#[derive(Parser, Debug)]
#[command(name = "cssdiff")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Compare two local stylesheets
    cssdiff -f old.css -t new.css

    # Compare a deployed stylesheet against a local build
    cssdiff -f https://example.com/site.css -t dist/site.css

    # Only print the removed class names
    cssdiff -f old.css -t new.css -v quiet

    # Also report parse errors and fetch progress
    cssdiff -f old.css -t new.css -v loud

    # Machine-readable report
    cssdiff -f old.css -t new.css --json
"#)]
struct Cli {
    /// First stylesheet (file path or URL); classes removed from it are reported
    #[arg(short, long, value_name = "FILE|URL")]
    from: String,

    /// Second stylesheet (file path or URL)
    #[arg(short, long, value_name = "FILE|URL")]
    to: String,

    /// quiet (only output removed class names), normal, loud (output parse errors)
    #[arg(short, long, value_name = "LEVEL", default_value = "normal")]
    verbose: String,

    /// Print the diff report as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let verbosity = Verbosity::from_str(&cli.verbose)
        .map_err(|_| anyhow!("'verbosity' should be 'quiet', 'normal', or 'loud'"))?;

    let config = Config {
        from: cli.from,
        to: cli.to,
        verbosity,
    };

    if !cli.json {
        if verbosity >= Verbosity::Normal {
            println!("cssdiff {}", env!("CARGO_PKG_VERSION"));
        }
        if verbosity >= Verbosity::Loud {
            for location in [&config.from, &config.to] {
                if is_url(location) {
                    println!("{location} requested...\n");
                }
            }
        }
    }

    let report = run(&config)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if verbosity >= Verbosity::Loud {
        print_parse_status(&config.from, &report.from_errors);
        print_parse_status(&config.to, &report.to_errors);
    }

    print_removed(&report, verbosity);

    Ok(())
}

/// Report the parse outcome for one location (loud mode only).
fn print_parse_status(location: &str, errors: &[String]) {
    if errors.is_empty() {
        println!("Successfully parsed: {location}");
    } else {
        println!("{}", format!("Error parsing: {location}").yellow());
        for error in errors {
            println!("{}", error.yellow());
        }
    }
}

/// Print the removed classes with the verbosity-gated summary lines.
fn print_removed(report: &DiffReport, verbosity: Verbosity) {
    if report.removed.is_empty() {
        if verbosity >= Verbosity::Normal {
            println!("No classes were removed");
        }
        return;
    }

    if verbosity >= Verbosity::Normal {
        println!(
            "{}",
            "The following classes appear in the From file but not in the To file:".bold()
        );
    }
    for class in &report.removed {
        println!("{class}");
    }
}
