use crate::config::{HighBitPolicy, ReportFormat, RleConfig};
use crate::error::RleError;
use crate::pipeline::{self, EncodeStats};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = "Run-length encodes tile data for the in-ROM unpacker")]
pub(crate) struct Cli {
    /// Input file to encode
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output file name
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// What to do with bytes that have bit 7 set [allow, warn, reject]
    #[arg(long, default_value = "warn")]
    high_bit: HighBitPolicy,

    /// How to report the result [text, json, quiet]
    #[arg(long, default_value = "text")]
    report: ReportFormat,
}

fn print_usage_and_exit() -> ! {
    println!("{}", Cli::command().render_usage());
    std::process::exit(1);
}

pub fn run() -> Result<(), RleError> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            ErrorKind::MissingRequiredArgument => print_usage_and_exit(),
            _ => {
                // A closed stderr leaves only the exit code to report the failure.
                let _ = e.print();
                std::process::exit(1);
            }
        },
    };

    let config = RleConfig {
        high_bit: cli.high_bit,
        report: cli.report,
    };

    let start = Instant::now();
    let stats = pipeline::encode_file(&cli.input, &cli.output, &config)?;
    report(&stats, &config, start.elapsed())
}

fn report(stats: &EncodeStats, config: &RleConfig, elapsed: std::time::Duration) -> Result<(), RleError> {
    match config.report {
        ReportFormat::Quiet => {}
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(stats)?),
        ReportFormat::Text => {
            println!("Encoding successful!");
            println!("  Original Size:    {} bytes", stats.original_size);
            println!("  Encoded Size:     {} bytes", stats.encoded_size);
            println!("  Ratio:            {:.2}x", stats.ratio);
            println!("  Records:          {} literal, {} run", stats.literal_records, stats.run_records);
            println!("  Elapsed Time:     {:.2?}", elapsed);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_positionals() {
        let cli = Cli::try_parse_from(["tile-rle", "in.bin", "out.rle"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("in.bin"));
        assert_eq!(cli.output, PathBuf::from("out.rle"));
        assert_eq!(cli.high_bit, HighBitPolicy::Warn);
        assert_eq!(cli.report, ReportFormat::Text);
    }

    #[test]
    fn test_missing_arguments() {
        for args in [&["tile-rle"][..], &["tile-rle", "in.bin"][..]] {
            let err = Cli::try_parse_from(args).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        }
    }

    #[test]
    fn test_extra_positional_rejected() {
        let err = Cli::try_parse_from(["tile-rle", "in.bin", "out.rle", "extra"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_options() {
        let cli = Cli::try_parse_from([
            "tile-rle", "in.bin", "out.rle", "--high-bit", "reject", "--report", "json",
        ])
        .unwrap();
        assert_eq!(cli.high_bit, HighBitPolicy::Reject);
        assert_eq!(cli.report, ReportFormat::Json);

        assert!(Cli::try_parse_from(["tile-rle", "a", "b", "--high-bit", "maybe"]).is_err());
    }

    #[test]
    fn test_usage_mentions_positionals() {
        let usage = Cli::command().render_usage().to_string();
        assert!(usage.contains("<INPUT>"));
        assert!(usage.contains("<OUTPUT>"));
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }
}
