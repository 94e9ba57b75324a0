use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use measure_time::{debug_time, info_time};
use serde::Serialize;

use crate::config::Config;
use crate::corpus::FileQueue;
use crate::error::{Result, WordCountError};
use crate::median::{MedianTracker, ParityScope};
use crate::output;
use crate::tokenizer::Tokenizer;
use crate::vocabulary::{VocabEntry, VocabularyTable};

/// Totals of a finished run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub files_processed: usize,
    pub total_tokens: u64,
    pub vocabulary_size: usize,
    pub lines_observed: usize,
    pub final_median: Option<f64>,
    pub top_words: Vec<VocabEntry>,
}

/// Owns the state of one run: tokenize, count words, track medians, persist.
///
/// Files are handled strictly one after the other. Each file is read twice,
/// first for word frequencies, then line by line for the running median, so the
/// median history follows file-then-line order.
#[derive(Debug)]
pub struct CorpusDriver {
    config: Config,
    tokenizer: Tokenizer,
    vocabulary: VocabularyTable,
    medians: MedianTracker,
    files_processed: usize,
}

impl CorpusDriver {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            tokenizer: Tokenizer::new(config.max_token_len),
            vocabulary: VocabularyTable::new(
                config.index_capacity,
                config.index_policy,
                config.vocab_growth_step,
            ),
            medians: MedianTracker::new(),
            files_processed: 0,
            config,
        })
    }

    fn open(path: &Path) -> Result<BufReader<File>> {
        let file = File::open(path).map_err(|e| WordCountError::io(path, e))?;
        Ok(BufReader::new(file))
    }

    /// Feeds every token of `path` to the vocabulary, then sorts it
    pub fn count_words(&mut self, path: &Path) -> Result<u64> {
        debug_time!("Word frequency of {}", path.display());
        let mut tokens = 0;
        for word in self.tokenizer.words(Self::open(path)?) {
            let word = word.map_err(|e| WordCountError::io(path, e))?;
            self.vocabulary.insert_or_increment(&word)?;
            tokens += 1;
        }
        self.vocabulary.finalize_and_sort()?;
        Ok(tokens)
    }

    /// Feeds the token count of every line of `path` to the median tracker
    pub fn track_lines(&mut self, path: &Path) -> Result<usize> {
        debug_time!("Running median of {}", path.display());
        if self.config.median_parity == ParityScope::PerFile {
            self.medians.start_segment();
        }
        let mut lines = 0;
        for count in self.tokenizer.line_counts(Self::open(path)?) {
            let count = count.map_err(|e| WordCountError::io(path, e))?;
            self.medians.observe(count);
            lines += 1;
        }
        Ok(lines)
    }

    pub fn process_file(&mut self, path: &Path) -> Result<()> {
        log::info!("Streaming file {}", path.display());
        let tokens = self.count_words(path)?;
        let lines = self.track_lines(path)?;
        log::debug!(
            "{}: {} tokens over {} lines, vocabulary now {} words",
            path.display(),
            tokens,
            lines,
            self.vocabulary.len()
        );
        self.files_processed += 1;
        Ok(())
    }

    pub fn process_queue(&mut self, queue: &FileQueue) -> Result<()> {
        for path in queue.iter() {
            self.process_file(path)?;
        }
        Ok(())
    }

    /// Writes both result files, and the summary when configured
    pub fn persist(&self) -> Result<()> {
        output::write_frequencies(&self.config.word_output, self.vocabulary.entries())?;
        output::write_medians(&self.config.median_output, self.medians.history())?;
        if let Some(path) = &self.config.summary_output {
            output::write_summary(path, &self.summary())?;
        }
        Ok(())
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            files_processed: self.files_processed,
            total_tokens: self.vocabulary.total_tokens(),
            vocabulary_size: self.vocabulary.len(),
            lines_observed: self.medians.len(),
            final_median: self.medians.current(),
            top_words: self
                .vocabulary
                .most_frequent(self.config.top_words)
                .into_iter()
                .cloned()
                .collect(),
        }
    }

    /// Discovers the corpus, processes it and writes the results
    pub fn run(&mut self) -> Result<RunSummary> {
        info_time!("Processing corpus {}", self.config.input_dir.display());
        let queue = FileQueue::discover(&self.config.input_dir);
        log::info!("{} files in queue", queue.len());
        self.process_queue(&queue)?;

        let summary = self.summary();
        log::info!("Number of words in corpus: {}", summary.total_tokens);
        log::info!("Number of learned vocabulary: {}", summary.vocabulary_size);
        if let Some(median) = summary.final_median {
            log::info!("Updated median is: {:.1}", median);
        }
        for entry in &summary.top_words {
            log::debug!("  {} {}", entry.display_word(), entry.count);
        }

        self.persist()?;
        Ok(summary)
    }

    pub fn vocabulary(&self) -> &VocabularyTable {
        &self.vocabulary
    }

    pub fn medians(&self) -> &MedianTracker {
        &self.medians
    }
}
