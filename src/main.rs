//! starhash CLI: human-readable names for sky coordinates.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Report, Result};

use starhash::config::StarhashConfig;
use starhash::vocabulary::assemble::{self, WordSource};

#[derive(Parser)]
#[command(name = "starhash", version, about = "Human-readable names for sky coordinates")]
struct Cli {
    /// Emit diagnostics (grid resolution, coverage) on stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Config file (default: $XDG_CONFIG_HOME/starhash/config.toml if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get the name for a right ascension and declination.
    GetNameFromCoord {
        /// Right ascension in degrees, [0, 360].
        #[arg(long, short, allow_negative_numbers = true)]
        ra: f64,

        /// Declination in degrees, [-90, 90].
        #[arg(long, short, allow_negative_numbers = true)]
        dec: f64,
    },

    /// Get the right ascension and declination for a name.
    GetCoordFromName {
        /// Name, e.g. "apple-river-comet".
        name: String,
    },

    /// Show grid, vocabulary and coverage properties.
    Info {
        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Merge word lists into a sorted, deduplicated vocabulary file.
    AssembleVocabulary {
        /// Diceware-format list (`<dice>\t<word>`); repeatable.
        #[arg(long)]
        dice_list: Vec<PathBuf>,

        /// Plain list, one word per line; repeatable.
        #[arg(long)]
        plain: Vec<PathBuf>,

        /// Output vocabulary file.
        #[arg(long)]
        output: PathBuf,
    },
}

fn main() -> ExitCode {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(false)
                .unicode(true)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(report) => {
            report_error(&report);
            ExitCode::FAILURE
        }
    }
}

/// Full graphical report on a terminal, one line otherwise.
fn report_error(report: &Report) {
    if std::io::stderr().is_terminal() {
        eprintln!("{report:?}");
        return;
    }
    let message = report.to_string();
    let message = message.lines().map(str::trim).collect::<Vec<_>>().join(" ");
    match report.code() {
        Some(code) => eprintln!("error[{code}]: {message}"),
        None => eprintln!("error: {message}"),
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::GetNameFromCoord { ra, dec } => {
            let codec = StarhashConfig::discover(cli.config.as_deref())?.build_codec()?;
            let name = codec.encode(ra, dec)?;
            println!("{name}");
        }

        Commands::GetCoordFromName { name } => {
            let codec = StarhashConfig::discover(cli.config.as_deref())?.build_codec()?;
            let (ra, dec) = codec.decode(&name)?;
            println!("{ra} {dec}");
        }

        Commands::Info { json } => {
            let codec = StarhashConfig::discover(cli.config.as_deref())?.build_codec()?;
            let stats = codec.stats();
            if json {
                let out = serde_json::to_string_pretty(&stats).into_diagnostic()?;
                println!("{out}");
            } else {
                println!("cells:           {}", stats.cells);
                println!("padding width:   {}", stats.width);
                println!(
                    "resolution:      {:.2} arcsec",
                    stats.resolution_arcmin * 60.0
                );
                println!("vocabulary size: {}", stats.vocabulary_size);
                println!("words per name:  {}", stats.words);
                println!("coverage:        {:.3}x", stats.coverage);
                println!("digit order:     {}", stats.digit_order);
            }
        }

        Commands::AssembleVocabulary {
            dice_list,
            plain,
            output,
        } => {
            let sources: Vec<WordSource> = dice_list
                .into_iter()
                .map(WordSource::DiceList)
                .chain(plain.into_iter().map(WordSource::Plain))
                .collect();
            if sources.is_empty() {
                miette::bail!("no word sources given; pass --dice-list or --plain");
            }

            let (words, report) = assemble::assemble(&sources)?;
            assemble::write_vocabulary(&output, &words)?;
            println!(
                "Wrote {} unique words ({} read, {} lines skipped) to {}",
                report.unique_words,
                report.words_read,
                report.lines_skipped,
                output.display()
            );
        }
    }

    Ok(())
}
