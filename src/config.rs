//! Typed JSON configuration and its validation.
//!
//! The configuration layer is the boundary that keeps the core total: the
//! generators and reduction passes assume normalized inputs, so everything a
//! caller could get wrong is rejected here first.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::alphabet::{Alphabet, SYMBOL_UNIVERSE};

/// How the forbidden-node combinations are obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// The configuration spells out one explicit forbidden-word list.
    Custom,
    /// Every combination of a configured number of forbidden words per phase.
    AllPatterns,
}

/// Which generator to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Algorithm {
    /// Prefix-closure construction, see [`crate::generate::Beal`].
    Beal,
    /// Sliding-window construction, see [`crate::generate::DeBruijn`].
    DeBruijn,
}

/// Output selection of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// CSV edge list, one `source,target,symbol` line per edge.
    Edges,
    /// CSV adjacency matrix of parallel-edge counts.
    Matrix,
    /// Graphviz DOT text.
    Dot,
}

/// Where and in which formats results are written.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// The formats to write for every processed combination.
    pub formats: Vec<OutputFormat>,
    /// Base directory below which one subdirectory per format is created.
    pub directory: PathBuf,
}

/// A fully parsed run configuration. Construct via [`Config::from_path`] or
/// [`Config::from_json`], then call [`Config::validate`] before handing any of
/// the fields to the core.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Forbidden-word selection mode.
    pub mode: Mode,
    /// Generator choice.
    pub algorithm: Algorithm,
    /// Apply the sink-less reduction after generating.
    pub sink_less: bool,
    /// Apply Moore minimization after pruning.
    pub minimize: bool,
    /// Number of symbols, at least 2.
    pub alphabet_size: usize,
    /// Number of phases, at least 1.
    pub period: u32,
    /// Length of the forbidden words (required in all-patterns mode, derived
    /// from the word list for DeBruijn custom runs).
    #[serde(default)]
    pub forbidden_word_length: Option<usize>,
    /// Explicit forbidden `(word, phase)` pairs (custom mode).
    #[serde(default)]
    pub forbidden_words: Option<Vec<(String, u32)>>,
    /// How many words to forbid at each phase (all-patterns mode), one entry
    /// per phase.
    #[serde(default)]
    pub forbidden_per_position: Option<Vec<u32>>,
    /// Output selection.
    pub output: OutputConfig,
}

/// Everything that can be wrong with a configuration before the core runs.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("could not read configuration: {0}")]
    Io(#[from] std::io::Error),
    /// The configuration file is not valid JSON or misses required fields.
    #[error("could not parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
    /// A field required by the selected mode is missing.
    #[error("in '{mode}' mode, '{field}' is required")]
    MissingField {
        /// The selected mode.
        mode: &'static str,
        /// The missing field.
        field: &'static str,
    },
    /// The forbidden word list is present but empty.
    #[error("forbidden_words is empty")]
    EmptyForbiddenWords,
    /// The alphabet must have at least two symbols and fit the symbol universe.
    #[error("alphabet_size must be between 2 and {max}, got {size}")]
    AlphabetSize {
        /// The configured size.
        size: usize,
        /// The largest supported size.
        max: usize,
    },
    /// The period must be at least 1.
    #[error("period must be at least 1")]
    ZeroPeriod,
    /// A forbidden word refers to a phase outside `[0, period)`.
    #[error("forbidden word {word:?} names phase {phase} but the period is {period}")]
    PhaseOutOfRange {
        /// The offending word.
        word: String,
        /// Its phase.
        phase: u32,
        /// The configured period.
        period: u32,
    },
    /// A forbidden word uses a symbol outside the configured alphabet.
    #[error("forbidden word {word:?} contains {symbol:?} which is not among the first {alphabet_size} symbols")]
    ForeignSymbol {
        /// The offending word.
        word: String,
        /// The offending symbol.
        symbol: char,
        /// The configured alphabet size.
        alphabet_size: usize,
    },
    /// `forbidden_per_position` must name one count per phase.
    #[error("forbidden_per_position has {got} entries but the period is {period}")]
    PerPositionMismatch {
        /// Number of configured entries.
        got: usize,
        /// The configured period.
        period: u32,
    },
    /// More words requested at a position than exist.
    #[error("forbidden_per_position requests {requested} words but only {available} exist")]
    TooManyForbidden {
        /// The requested count.
        requested: u32,
        /// Size of the candidate pool.
        available: usize,
    },
}

impl Config {
    /// Reads and parses a configuration from a JSON file. The result is not yet
    /// validated.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Parses a configuration from a JSON string. The result is not yet
    /// validated.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// The alphabet described by `alphabet_size`. Call after [`Config::validate`].
    pub fn alphabet(&self) -> Alphabet {
        Alphabet::new(self.alphabet_size)
    }

    /// Checks the configuration for everything the core treats as undefined
    /// behavior: mode-required fields, alphabet and period bounds, phases and
    /// symbols of the forbidden words, and per-position counts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.alphabet_size < 2 || self.alphabet_size > SYMBOL_UNIVERSE.len() {
            return Err(ConfigError::AlphabetSize {
                size: self.alphabet_size,
                max: SYMBOL_UNIVERSE.len(),
            });
        }
        if self.period == 0 {
            return Err(ConfigError::ZeroPeriod);
        }

        match self.mode {
            Mode::Custom => {
                let words = self.forbidden_words.as_ref().ok_or(ConfigError::MissingField {
                    mode: "custom",
                    field: "forbidden_words",
                })?;
                if words.is_empty() {
                    return Err(ConfigError::EmptyForbiddenWords);
                }
                let alphabet = self.alphabet();
                for (word, phase) in words {
                    if *phase >= self.period {
                        return Err(ConfigError::PhaseOutOfRange {
                            word: word.clone(),
                            phase: *phase,
                            period: self.period,
                        });
                    }
                    if let Some(symbol) = word.chars().find(|&c| !alphabet.contains(c)) {
                        return Err(ConfigError::ForeignSymbol {
                            word: word.clone(),
                            symbol,
                            alphabet_size: self.alphabet_size,
                        });
                    }
                }
            }
            Mode::AllPatterns => {
                let word_length =
                    self.forbidden_word_length.ok_or(ConfigError::MissingField {
                        mode: "all-patterns",
                        field: "forbidden_word_length",
                    })?;
                let per_position =
                    self.forbidden_per_position
                        .as_ref()
                        .ok_or(ConfigError::MissingField {
                            mode: "all-patterns",
                            field: "forbidden_per_position",
                        })?;
                if per_position.len() != self.period as usize {
                    return Err(ConfigError::PerPositionMismatch {
                        got: per_position.len(),
                        period: self.period,
                    });
                }
                if let Some(available) = self.alphabet().word_count(word_length) {
                    for &requested in per_position {
                        if requested as usize > available {
                            return Err(ConfigError::TooManyForbidden {
                                requested,
                                available,
                            });
                        }
                    }
                }
            }
        }

        Ok(())
    }

    /// Brings a custom forbidden-word list into the shape the DeBruijn
    /// generator expects: all words share the maximum length. Shorter words are
    /// extended on the right by every alphabet symbol, once per symbol, until
    /// the lengths agree; `forbidden_word_length` is set to that length.
    pub fn normalize_for_de_bruijn(&mut self) -> Result<(), ConfigError> {
        let alphabet = self.alphabet();
        let words = self.forbidden_words.as_mut().ok_or(ConfigError::MissingField {
            mode: "custom",
            field: "forbidden_words",
        })?;
        if words.is_empty() {
            return Err(ConfigError::EmptyForbiddenWords);
        }

        let target = words.iter().map(|(word, _)| word.len()).max().unwrap_or(0);
        while words.iter().any(|(word, _)| word.len() < target) {
            let mut extended = Vec::with_capacity(words.len());
            for (word, phase) in words.drain(..) {
                if word.len() == target {
                    extended.push((word, phase));
                } else {
                    for sym in alphabet.symbols() {
                        extended.push((format!("{word}{sym}"), phase));
                    }
                }
            }
            *words = extended;
        }
        self.forbidden_word_length = Some(target);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Algorithm, Config, ConfigError, Mode, OutputFormat};

    fn custom_config() -> Config {
        Config::from_json(
            r#"{
                "mode": "custom",
                "algorithm": "Beal",
                "sink_less": true,
                "minimize": true,
                "alphabet_size": 3,
                "period": 2,
                "forbidden_words": [["012", 0], ["10", 1]],
                "output": { "formats": ["edges", "matrix"], "directory": "out" }
            }"#,
        )
        .expect("config parses")
    }

    #[test]
    fn parses_custom_mode() {
        let config = custom_config();
        assert_eq!(config.mode, Mode::Custom);
        assert_eq!(config.algorithm, Algorithm::Beal);
        assert_eq!(config.alphabet_size, 3);
        assert_eq!(
            config.forbidden_words.as_deref(),
            Some(&[("012".to_string(), 0), ("10".to_string(), 1)][..])
        );
        assert_eq!(
            config.output.formats,
            vec![OutputFormat::Edges, OutputFormat::Matrix]
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parses_all_patterns_mode() {
        let config = Config::from_json(
            r#"{
                "mode": "all-patterns",
                "algorithm": "DeBruijn",
                "sink_less": false,
                "minimize": false,
                "alphabet_size": 2,
                "period": 2,
                "forbidden_word_length": 2,
                "forbidden_per_position": [1, 1],
                "output": { "formats": ["dot"], "directory": "out" }
            }"#,
        )
        .expect("config parses");
        assert_eq!(config.mode, Mode::AllPatterns);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn custom_mode_requires_words() {
        let mut config = custom_config();
        config.forbidden_words = None;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingField { field: "forbidden_words", .. })
        ));

        config.forbidden_words = Some(vec![]);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyForbiddenWords)
        ));
    }

    #[test]
    fn rejects_out_of_range_phase_and_symbols() {
        let mut config = custom_config();
        config.forbidden_words = Some(vec![("01".to_string(), 5)]);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PhaseOutOfRange { phase: 5, .. })
        ));

        config.forbidden_words = Some(vec![("09".to_string(), 0)]);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ForeignSymbol { symbol: '9', .. })
        ));
    }

    #[test]
    fn rejects_degenerate_dimensions() {
        let mut config = custom_config();
        config.alphabet_size = 1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::AlphabetSize { size: 1, .. })
        ));

        let mut config = custom_config();
        config.period = 0;
        assert!(matches!(config.validate(), Err(ConfigError::ZeroPeriod)));
    }

    #[test]
    fn rejects_overfull_positions() {
        let config = Config::from_json(
            r#"{
                "mode": "all-patterns",
                "algorithm": "DeBruijn",
                "sink_less": false,
                "minimize": false,
                "alphabet_size": 2,
                "period": 1,
                "forbidden_word_length": 1,
                "forbidden_per_position": [3],
                "output": { "formats": ["edges"], "directory": "out" }
            }"#,
        )
        .expect("config parses");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TooManyForbidden { requested: 3, available: 2 })
        ));
    }

    #[test]
    fn word_length_normalization_extends_short_words() {
        let mut config = custom_config();
        config.alphabet_size = 2;
        config.forbidden_words = Some(vec![("010".to_string(), 0), ("1".to_string(), 1)]);
        config.normalize_for_de_bruijn().expect("normalizes");

        assert_eq!(config.forbidden_word_length, Some(3));
        let words = config.forbidden_words.expect("words present");
        assert_eq!(words.len(), 5);
        assert!(words.iter().all(|(word, _)| word.len() == 3));
        assert!(words.contains(&("010".to_string(), 0)));
        // "1" fans out to every two-symbol extension at its phase
        for extension in ["100", "101", "110", "111"] {
            assert!(words.contains(&(extension.to_string(), 1)));
        }
    }
}
