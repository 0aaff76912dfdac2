// Distributed under The MIT License (MIT)
//
// Copyright (c) 2024 The `graysplit` developers
use std::fs;
use std::path::{Path, PathBuf};

use graysplit_canvas::{Executor, Luma, Rounding, Split, Weights};
use serde::Deserialize;

use crate::{workers, Error};

/// Settings of a benchmark run.
///
/// Every field has a default, a config file only needs to name what it changes:
///
/// ```json
/// { "input": "photo.png", "workers": 8, "rounding": "truncate" }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Image to convert. Without one, a gradient is generated first.
    pub input: Option<PathBuf>,
    /// Where the generated gradient is stored.
    pub generated: PathBuf,
    pub output: PathBuf,
    /// Timing report, one `<label> <milliseconds>` line per pass.
    pub report: PathBuf,
    /// Dimensions of the generated gradient.
    pub width: usize,
    pub height: usize,
    /// Threads of the parallel pass, one per logical CPU if unset.
    pub workers: Option<usize>,
    pub weights: WeightsName,
    pub rounding: RoundingName,
    pub split: SplitName,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum WeightsName {
    /// 0.299 R + 0.587 G + 0.114 B
    #[default]
    Bt601,
    /// 0.30 R + 0.59 G + 0.11 B
    Legacy,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RoundingName {
    #[default]
    Nearest,
    Truncate,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SplitName {
    #[default]
    Pixels,
    Rows,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            input: None,
            generated: PathBuf::from("generated.bmp"),
            output: PathBuf::from("processed.bmp"),
            report: PathBuf::from("performance_data.txt"),
            width: 256,
            height: 256,
            workers: None,
            weights: WeightsName::default(),
            rounding: RoundingName::default(),
            split: SplitName::default(),
        }
    }
}

impl Config {
    /// Read a JSON config file.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let data = fs::read_to_string(path).map_err(Error::io(path))?;
        serde_json::from_str(&data).map_err(|source| Error::Config {
            path: path.to_owned(),
            source,
        })
    }

    pub fn luma(&self) -> Luma {
        let weights = match self.weights {
            WeightsName::Bt601 => Weights::BT601,
            WeightsName::Legacy => Weights::LEGACY,
        };

        let rounding = match self.rounding {
            RoundingName::Nearest => Rounding::Nearest,
            RoundingName::Truncate => Rounding::Truncate,
        };

        Luma::new(weights, rounding)
    }

    /// The executor of the parallel pass.
    ///
    /// Queries the hardware unless a worker count is configured.
    pub fn executor(&self) -> Executor {
        let split = match self.split {
            SplitName::Pixels => Split::Pixels,
            SplitName::Rows => Split::Rows,
        };

        Executor::new(workers::resolve(self.workers)).with_split(split)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_default() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.luma(), Luma::default());
    }

    #[test]
    fn partial_override() {
        let config: Config = serde_json::from_str(
            r#"{ "input": "in.png", "workers": 3, "weights": "legacy", "rounding": "truncate", "split": "rows" }"#,
        )
        .unwrap();

        assert_eq!(config.input, Some(PathBuf::from("in.png")));
        assert_eq!(config.output, PathBuf::from("processed.bmp"));
        assert_eq!(config.luma(), Luma::new(Weights::LEGACY, Rounding::Truncate));

        let executor = config.executor();
        assert_eq!(executor.workers(), 3);
        assert_eq!(executor.split(), Split::Rows);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(serde_json::from_str::<Config>(r#"{ "threads": 4 }"#).is_err());
        assert!(serde_json::from_str::<Config>(r#"{ "weights": "bt709" }"#).is_err());
    }
}
