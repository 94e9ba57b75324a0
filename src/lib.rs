//! Word frequencies and a running median of tokens per line over a directory
//! of text files.
//!
//! The two stateful pieces are [`VocabularyTable`], an open-addressing word
//! index with alphabetical re-indexing, and [`MedianTracker`]. [`CorpusDriver`]
//! sequences them over the files of a [`FileQueue`].

extern crate alloc;

pub mod config;
pub mod corpus;
pub mod driver;
pub mod error;
pub mod hash_index;
pub mod median;
pub mod output;
pub mod tokenizer;
pub mod vocabulary;

pub use config::Config;
pub use corpus::FileQueue;
pub use driver::{CorpusDriver, RunSummary};
pub use error::{Result, WordCountError};
pub use hash_index::IndexPolicy;
pub use median::{MedianTracker, ParityScope};
pub use tokenizer::Tokenizer;
pub use vocabulary::{VocabEntry, VocabularyTable};
