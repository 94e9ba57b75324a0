use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, WordCountError};
use crate::hash_index::IndexPolicy;
use crate::median::ParityScope;
use crate::tokenizer::MAX_TOKEN_LEN;

/// Settings for one run. Every field has a default, so a JSON config file
/// only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory scanned for `*.txt` corpus files
    pub input_dir: PathBuf,
    /// Word frequency output, one `<word> <count>` per line
    pub word_output: PathBuf,
    /// Running median output, one value per corpus line
    pub median_output: PathBuf,
    /// Optional JSON run summary
    pub summary_output: Option<PathBuf>,
    /// Initial number of slots of the word index
    pub index_capacity: usize,
    pub index_policy: IndexPolicy,
    /// Entries reserved each time the vocabulary vector runs out of room
    pub vocab_growth_step: usize,
    /// Tokens longer than this many bytes are truncated
    pub max_token_len: usize,
    /// Whether the median parity toggle restarts with every file
    pub median_parity: ParityScope,
    /// How many of the most frequent words go into logs and the summary
    pub top_words: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: "wc_input".into(),
            word_output: "wc_output/wc_result.txt".into(),
            median_output: "wc_output/med_result.txt".into(),
            summary_output: None,
            index_capacity: 1 << 16,
            index_policy: IndexPolicy::Resizable,
            vocab_growth_step: 1000,
            max_token_len: MAX_TOKEN_LEN,
            median_parity: ParityScope::PerFile,
            top_words: 10,
        }
    }
}

impl Config {
    /// Reads a JSON config file on top of the defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config_error = |source| WordCountError::Config {
            path: path.to_path_buf(),
            source,
        };
        let text = fs::read_to_string(path).map_err(|e| config_error(e.into()))?;
        let config: Config = serde_json::from_str(&text).map_err(|e| config_error(e.into()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.index_capacity == 0 {
            return Err(WordCountError::InvalidConfig(
                "index_capacity must be at least 1".into(),
            ));
        }
        if self.vocab_growth_step == 0 {
            return Err(WordCountError::InvalidConfig(
                "vocab_growth_step must be at least 1".into(),
            ));
        }
        if self.max_token_len == 0 {
            return Err(WordCountError::InvalidConfig(
                "max_token_len must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
