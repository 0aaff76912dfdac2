// Distributed under The MIT License (MIT)
//
// Copyright (c) 2024 The `graysplit` developers
use std::path::PathBuf;

use clap::builder::RangedU64ValueParser;
use clap::Parser;

use crate::config::{Config, RoundingName, SplitName, WeightsName};
use crate::Error;

#[derive(Debug, Parser)]
#[command(name = "graysplit")]
#[command(version, about = "Compare single-threaded and parallel grayscale conversion", long_about = None)]
pub struct Cli {
    /// Image to convert; a gradient is generated when omitted
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// JSON config file, flags given here take precedence
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output image, format chosen by extension
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Where to store the generated gradient
    #[arg(long, value_name = "FILE")]
    pub generated: Option<PathBuf>,

    /// Timing report file
    #[arg(short, long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Width of the generated gradient
    #[arg(long, value_name = "PIXELS")]
    pub width: Option<usize>,

    /// Height of the generated gradient
    #[arg(long, value_name = "PIXELS")]
    pub height: Option<usize>,

    /// Number of parallel threads [default: one per logical CPU]
    #[arg(short = 'j', long, value_name = "N", value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub threads: Option<usize>,

    /// Luma weights
    #[arg(long, value_enum)]
    pub weights: Option<WeightsName>,

    /// Rounding of fractional luma
    #[arg(long, value_enum)]
    pub rounding: Option<RoundingName>,

    /// Unit by which the image is divided among threads
    #[arg(long, value_enum)]
    pub split: Option<SplitName>,
}

impl Cli {
    /// Load the config file, if any, and apply the flags on top.
    pub fn into_config(self) -> Result<Config, Error> {
        let config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        Ok(self.apply(config))
    }

    fn apply(self, config: Config) -> Config {
        Config {
            input: self.input.or(config.input),
            generated: self.generated.unwrap_or(config.generated),
            output: self.output.unwrap_or(config.output),
            report: self.report.unwrap_or(config.report),
            width: self.width.unwrap_or(config.width),
            height: self.height.unwrap_or(config.height),
            workers: self.threads.or(config.workers),
            weights: self.weights.unwrap_or(config.weights),
            rounding: self.rounding.unwrap_or(config.rounding),
            split: self.split.unwrap_or(config.split),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::parse_from(["graysplit", "in.bmp", "-j", "2", "--rounding", "truncate"]);
        let base = Config {
            workers: Some(8),
            width: 64,
            ..Config::default()
        };

        let config = cli.apply(base);
        assert_eq!(config.input, Some(PathBuf::from("in.bmp")));
        assert_eq!(config.workers, Some(2));
        assert_eq!(config.width, 64);
        assert_eq!(config.rounding, RoundingName::Truncate);
        assert_eq!(config.split, SplitName::Pixels);
    }

    #[test]
    fn zero_threads_rejected() {
        assert!(Cli::try_parse_from(["graysplit", "-j", "0"]).is_err());
        assert!(Cli::try_parse_from(["graysplit", "-j", "-3"]).is_err());
        assert!(Cli::try_parse_from(["graysplit", "-j", "99999999999999999999"]).is_err());

        let cli = Cli::try_parse_from(["graysplit", "--threads", "12"]).unwrap();
        assert_eq!(cli.threads, Some(12));
    }
}
