use std::fs;
use std::path::Path;

use corpus_wordcount::{Config, CorpusDriver, IndexPolicy, ParityScope, WordCountError};

fn config_for(root: &Path) -> Config {
    Config {
        input_dir: root.join("wc_input"),
        word_output: root.join("wc_output/wc_result.txt"),
        median_output: root.join("wc_output/med_result.txt"),
        summary_output: Some(root.join("wc_output/summary.json")),
        ..Config::default()
    }
}

fn write_corpus(root: &Path, files: &[(&str, &str)]) {
    let input = root.join("wc_input");
    fs::create_dir_all(&input).unwrap();
    for (name, text) in files {
        fs::write(input.join(name), text).unwrap();
    }
}

#[test]
fn test_single_file_outputs() {
    let dir = tempfile::tempdir().unwrap();
    write_corpus(dir.path(), &[("doc.txt", "The dog. The cat!\nA dog and a cat.\n")]);
    let config = config_for(dir.path());

    let summary = CorpusDriver::new(config.clone()).unwrap().run().unwrap();

    assert_eq!(
        fs::read_to_string(&config.word_output).unwrap(),
        "a 2\nand 1\ncat 1\ncat! 1\ndog 2\nthe 2\n"
    );
    assert_eq!(fs::read_to_string(&config.median_output).unwrap(), "4.0\n4.5\n");
    assert_eq!(summary.files_processed, 1);
    assert_eq!(summary.total_tokens, 9);
    assert_eq!(summary.vocabulary_size, 6);
    assert_eq!(summary.final_median, Some(4.5));

    let summary_text = fs::read_to_string(dir.path().join("wc_output/summary.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&summary_text).unwrap();
    assert_eq!(json["lines_observed"], 2);
    assert_eq!(json["top_words"][0]["word"], "a");
    assert_eq!(json["top_words"][0]["count"], 2);
}

#[test]
fn test_files_in_name_order() {
    let dir = tempfile::tempdir().unwrap();
    write_corpus(
        dir.path(),
        &[
            ("b.txt", "c\nd d d d\n"),
            ("a.txt", "x x x\n"),
            ("ignored.md", "not part of the corpus\n"),
        ],
    );
    let config = config_for(dir.path());
    let summary = CorpusDriver::new(config.clone()).unwrap().run().unwrap();

    // a.txt lines (3), then b.txt lines (1, 4) with the parity toggle restarted
    assert_eq!(
        fs::read_to_string(&config.median_output).unwrap(),
        "3.0\n1.0\n2.0\n"
    );
    assert_eq!(
        fs::read_to_string(&config.word_output).unwrap(),
        "c 1\nd 4\nx 3\n"
    );
    assert_eq!(summary.files_processed, 2);
}

#[test]
fn test_corpus_wide_parity() {
    let dir = tempfile::tempdir().unwrap();
    write_corpus(dir.path(), &[("a.txt", "a b c\n"), ("b.txt", "x\n")]);
    let config = Config {
        median_parity: ParityScope::Corpus,
        ..config_for(dir.path())
    };
    CorpusDriver::new(config.clone()).unwrap().run().unwrap();
    assert_eq!(fs::read_to_string(&config.median_output).unwrap(), "3.0\n2.0\n");
}

#[test]
fn test_non_utf8_words_written_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    write_corpus(dir.path(), &[]);
    fs::write(dir.path().join("wc_input/bytes.txt"), b"caf\xe9 caf\xe8\n").unwrap();
    let config = config_for(dir.path());

    let summary = CorpusDriver::new(config.clone()).unwrap().run().unwrap();

    assert_eq!(summary.vocabulary_size, 2);
    assert_eq!(
        fs::read(&config.word_output).unwrap(),
        b"caf\xe8 1\ncaf\xe9 1\n"
    );
}

#[test]
fn test_missing_input_dir_gives_empty_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());
    let summary = CorpusDriver::new(config.clone()).unwrap().run().unwrap();

    assert_eq!(summary.files_processed, 0);
    assert_eq!(summary.final_median, None);
    assert_eq!(fs::read_to_string(&config.word_output).unwrap(), "");
    assert_eq!(fs::read_to_string(&config.median_output).unwrap(), "");
}

#[test]
fn test_fixed_index_overflow_aborts() {
    let dir = tempfile::tempdir().unwrap();
    write_corpus(dir.path(), &[("doc.txt", "one two three four\n")]);
    let config = Config {
        index_capacity: 3,
        index_policy: IndexPolicy::Fixed,
        ..config_for(dir.path())
    };
    let err = CorpusDriver::new(config).unwrap().run().unwrap_err();
    assert!(matches!(err, WordCountError::CapacityExceeded { capacity: 3 }));
}

#[test]
fn test_large_vocabulary_with_small_resizable_index() {
    let dir = tempfile::tempdir().unwrap();
    let text: String = (0..500).map(|i| format!("word{} ", i % 250)).collect();
    write_corpus(dir.path(), &[("doc.txt", text.as_str())]);
    let config = Config {
        index_capacity: 8,
        vocab_growth_step: 16,
        ..config_for(dir.path())
    };
    let mut driver = CorpusDriver::new(config).unwrap();
    let summary = driver.run().unwrap();

    assert_eq!(summary.vocabulary_size, 250);
    assert_eq!(summary.total_tokens, 500);
    assert!(driver.vocabulary().entries().iter().all(|e| e.count == 2));
    for entry in driver.vocabulary().entries() {
        let position = driver.vocabulary().lookup(&entry.word).unwrap();
        assert_eq!(driver.vocabulary().get(position), Some(entry));
    }
    // A single unterminated line
    assert_eq!(driver.medians().history(), [500.0]);
}
