//! Byte-level word and line tokenizer.
//!
//! Tokens are maximal runs of bytes that are neither separators nor
//! ignorable, ASCII-lowercased. Ignorable bytes vanish without splitting a
//! token, so `pre-trained` reads as `pretrained`. Any other byte, including
//! `!`, digits and non-ASCII, is token content. Tokens are raw bytes; input
//! is never decoded.

use alloc::vec::Vec;
use std::io::{self, BufRead};

/// Longest token kept, in bytes. Longer runs are cut, not rejected
pub const MAX_TOKEN_LEN: usize = 98;

/// Bytes dropped from the stream wherever they appear
pub fn is_ignorable(b: u8) -> bool {
    matches!(b, b'\r' | b'.' | b',' | b'(' | b')' | b'-')
}

/// Bytes that end a token. Newline also ends a line
pub fn is_separator(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n')
}

// Advances `pos` past the next token of `bytes`, collecting its (lowercased,
// truncated) content into `buf`. Returns false once no token is left.
fn next_token(bytes: &[u8], pos: &mut usize, max_len: usize, buf: &mut Vec<u8>) -> bool {
    buf.clear();
    let mut in_token = false;
    while let Some(&b) = bytes.get(*pos) {
        *pos += 1;
        if is_ignorable(b) {
            continue;
        }
        if is_separator(b) {
            if in_token {
                return true;
            }
            continue;
        }
        in_token = true;
        if buf.len() < max_len {
            buf.push(b.to_ascii_lowercase());
        }
    }
    in_token
}

#[derive(Debug, Clone, Copy)]
pub struct Tokenizer {
    max_token_len: usize,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(MAX_TOKEN_LEN)
    }
}

impl Tokenizer {
    pub fn new(max_token_len: usize) -> Self {
        Self {
            max_token_len: max_token_len.max(1),
        }
    }

    /// Tokens of an in-memory buffer
    pub fn tokens<'a>(&self, bytes: &'a [u8]) -> Tokens<'a> {
        Tokens {
            bytes,
            pos: 0,
            max_len: self.max_token_len,
            buf: Vec::new(),
        }
    }

    /// Number of tokens on one line, without building them
    pub fn count_tokens(&self, line: &[u8]) -> u64 {
        let mut count = 0;
        let mut in_token = false;
        for &b in line {
            if is_ignorable(b) {
                continue;
            }
            if is_separator(b) {
                if in_token {
                    count += 1;
                    in_token = false;
                }
            } else {
                in_token = true;
            }
        }
        if in_token {
            count += 1;
        }
        count
    }

    /// Lazily streams the tokens of `reader`. Restart by handing in a fresh reader
    pub fn words<R: BufRead>(&self, reader: R) -> Words<R> {
        Words {
            lines: reader.split(b'\n'),
            line: Vec::new(),
            pos: 0,
            max_len: self.max_token_len,
            buf: Vec::new(),
        }
    }

    /// Lazily streams the token count of every line of `reader`.
    ///
    /// Lines end at `\n`. A trailing segment without newline is a line when it
    /// is non-empty, so an empty input has no lines.
    pub fn line_counts<R: BufRead>(&self, reader: R) -> LineCounts<R> {
        LineCounts {
            lines: reader.split(b'\n'),
            tokenizer: *self,
        }
    }
}

/// Iterator over the tokens of a byte slice
pub struct Tokens<'a> {
    bytes: &'a [u8],
    pos: usize,
    max_len: usize,
    buf: Vec<u8>,
}

impl Iterator for Tokens<'_> {
    type Item = Vec<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        if next_token(self.bytes, &mut self.pos, self.max_len, &mut self.buf) {
            Some(self.buf.clone())
        } else {
            None
        }
    }
}

/// Iterator over the tokens of a reader, see [`Tokenizer::words`]
pub struct Words<R> {
    lines: io::Split<R>,
    line: Vec<u8>,
    pos: usize,
    max_len: usize,
    buf: Vec<u8>,
}

impl<R: BufRead> Iterator for Words<R> {
    type Item = io::Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if next_token(&self.line, &mut self.pos, self.max_len, &mut self.buf) {
                return Some(Ok(self.buf.clone()));
            }
            match self.lines.next()? {
                Ok(line) => {
                    self.line = line;
                    self.pos = 0;
                }
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

/// Iterator over per-line token counts, see [`Tokenizer::line_counts`]
pub struct LineCounts<R> {
    lines: io::Split<R>,
    tokenizer: Tokenizer,
}

impl<R: BufRead> Iterator for LineCounts<R> {
    type Item = io::Result<u64>;

    fn next(&mut self) -> Option<Self::Item> {
        let line = self.lines.next()?;
        Some(line.map(|line| self.tokenizer.count_tokens(&line)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(text: &str) -> Vec<String> {
        Tokenizer::default()
            .tokens(text.as_bytes())
            .map(|t| String::from_utf8(t).unwrap())
            .collect()
    }

    #[test]
    fn test_separators_and_case() {
        assert_eq!(tokens("The  dog\tRAN\nhome"), ["the", "dog", "ran", "home"]);
        assert!(tokens("").is_empty());
        assert!(tokens(" \t\n ").is_empty());
    }

    #[test]
    fn test_ignorable_bytes_join() {
        assert_eq!(tokens("pre-trained (e.g., fine)."), ["pretrained", "eg", "fine"]);
        assert_eq!(tokens("dog.\r\ncat"), ["dog", "cat"]);
        // A run of ignorable bytes alone is not a token
        assert_eq!(tokens("a -- b"), ["a", "b"]);
    }

    #[test]
    fn test_other_punctuation_is_content() {
        assert_eq!(tokens("cat! cat? 42"), ["cat!", "cat?", "42"]);
    }

    #[test]
    fn test_non_ascii_untouched() {
        assert_eq!(tokens("Éclair CAFÉ"), ["Éclair", "cafÉ"]);
    }

    #[test]
    fn test_truncation() {
        let long = "x".repeat(150);
        let out = tokens(&format!("{long} y"));
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].len(), MAX_TOKEN_LEN);
        assert_eq!(out[1], "y");

        let short: Vec<Vec<u8>> = Tokenizer::new(3).tokens(b"abcdef gh").collect();
        assert_eq!(short, [b"abc".to_vec(), b"gh".to_vec()]);

        // Cut inside a multi-byte character: the leading bytes are kept as is
        let cut: Vec<Vec<u8>> = Tokenizer::new(2).tokens("aé".as_bytes()).collect();
        assert_eq!(cut, [vec![b'a', 0xc3]]);
    }

    #[test]
    fn test_invalid_utf8_kept_verbatim() {
        let out: Vec<Vec<u8>> = Tokenizer::default()
            .tokens(b"CAF\xe9 caf\xe8 caf\xe9")
            .collect();
        assert_eq!(
            out,
            [b"caf\xe9".to_vec(), b"caf\xe8".to_vec(), b"caf\xe9".to_vec()]
        );
    }

    #[test]
    fn test_count_tokens_matches_tokens() {
        let tokenizer = Tokenizer::default();
        for line in ["", "  ", "a", "a b", " a  b ", "-- x --", "The dog. The cat!"] {
            assert_eq!(
                tokenizer.count_tokens(line.as_bytes()),
                tokenizer.tokens(line.as_bytes()).count() as u64,
                "{line:?}"
            );
        }
    }

    #[test]
    fn test_words_from_reader() {
        let text = b"The dog. The cat!\nA dog and a cat.\nlast";
        let words: Vec<Vec<u8>> = Tokenizer::default()
            .words(&text[..])
            .collect::<io::Result<_>>()
            .unwrap();
        let expected = ["the", "dog", "the", "cat!", "a", "dog", "and", "a", "cat", "last"];
        assert_eq!(words, expected.map(|w| w.as_bytes().to_vec()));
    }

    #[test]
    fn test_line_counts() {
        let tokenizer = Tokenizer::default();
        let counts = |text: &str| -> Vec<u64> {
            tokenizer
                .line_counts(text.as_bytes())
                .collect::<io::Result<_>>()
                .unwrap()
        };
        assert_eq!(counts("The dog. The cat!\nA dog and a cat.\n"), [4, 5]);
        assert_eq!(counts("a b\nc"), [2, 1]);
        assert_eq!(counts("\n\nx\n"), [0, 0, 1]);
        assert!(counts("").is_empty());
    }
}
