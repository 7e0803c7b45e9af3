//! Worker configuration from environment variables and CLI flags

use std::env;

use motif_detectors::Motif;

use crate::error::WorkerError;

/// `-` stands for stdin/stdout.
pub const STDIO: &str = "-";

const DEFAULT_BATCH_SIZE: usize = 1000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkerConfig {
    /// JSON-lines file of game records
    pub input: String,

    /// Where the per-game features are written
    pub output: String,

    /// Games held in memory at once
    pub batch_size: usize,

    /// Games analysed in parallel
    pub max_workers: usize,

    /// Detectors skipped during reanalysis
    pub disabled_motifs: Vec<Motif>,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            input: STDIO.to_string(),
            output: STDIO.to_string(),
            batch_size: DEFAULT_BATCH_SIZE,
            max_workers: num_cpus::get(),
            disabled_motifs: Vec::new(),
        }
    }
}

impl WorkerConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, WorkerError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, WorkerError> {
        let defaults = Self::default();

        let input = lookup("INDEX_INPUT").unwrap_or(defaults.input);
        let output = lookup("INDEX_OUTPUT").unwrap_or(defaults.output);

        let batch_size = match lookup("BATCH_SIZE") {
            Some(v) => parse_count("BATCH_SIZE", &v)?,
            None => defaults.batch_size,
        };

        let max_workers = match lookup("MAX_WORKERS") {
            Some(v) => parse_count("MAX_WORKERS", &v)?,
            None => defaults.max_workers,
        };

        let disabled_motifs = match lookup("DISABLED_MOTIFS") {
            Some(v) => parse_motifs(&v)?,
            None => Vec::new(),
        };

        Ok(Self {
            input,
            output,
            batch_size,
            max_workers,
            disabled_motifs,
        })
    }

    /// Apply `--input`, `--output` and `--batch-size` from CLI args.
    pub fn apply_args(&mut self, args: &[String]) -> Result<(), WorkerError> {
        let mut i = 0;
        while i < args.len() {
            let flag = args[i].as_str();
            if !matches!(flag, "--input" | "--output" | "--batch-size") {
                i += 1;
                continue;
            }
            let value = args
                .get(i + 1)
                .ok_or_else(|| WorkerError::Config(format!("{flag} needs a value")))?;
            match flag {
                "--input" => self.input = value.clone(),
                "--output" => self.output = value.clone(),
                _ => self.batch_size = parse_count("--batch-size", value)?,
            }
            i += 2;
        }
        Ok(())
    }

    /// Motifs whose detectors run, in registration order.
    pub fn enabled_motifs(&self) -> Vec<Motif> {
        Motif::ALL
            .into_iter()
            .filter(|m| !self.disabled_motifs.contains(m))
            .collect()
    }
}

fn parse_count(name: &str, value: &str) -> Result<usize, WorkerError> {
    match value.trim().parse::<usize>() {
        Ok(0) => Err(WorkerError::Config(format!("{name} must be positive"))),
        Ok(n) => Ok(n),
        Err(_) => Err(WorkerError::Config(format!("{name} is not a number: {value}"))),
    }
}

fn parse_motifs(value: &str) -> Result<Vec<Motif>, WorkerError> {
    value
        .split(',')
        .filter(|tag| !tag.trim().is_empty())
        .map(|tag| tag.parse::<Motif>().map_err(WorkerError::from))
        .collect()
}
