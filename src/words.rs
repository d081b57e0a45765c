use crate::error::{PromoError, PromoResult};
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};
use tracing::{debug, info};

/// Length band and casing rules a dictionary line has to satisfy to become a code word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordFilter {
    pub min_len: usize,
    pub max_len: usize,
}

impl WordFilter {
    pub const fn new(min_len: usize, max_len: usize) -> Self {
        Self { min_len, max_len }
    }

    /// Returns the trimmed word if it is in the length band and starts with `a..=z`.
    ///
    /// Capitalized entries (proper nouns) and punctuation-led entries are rejected.
    /// Only the first character is inspected, the rest of the word is taken as-is.
    pub fn accept<'a>(&self, raw: &'a str) -> Option<&'a str> {
        let word = raw.trim();

        if word.len() < self.min_len || word.len() > self.max_len {
            return None;
        }

        word.as_bytes().first().is_some_and(u8::is_ascii_lowercase).then_some(word)
    }

    /// Filters `lines` in order, keeping duplicates.
    pub fn collect<I, S>(&self, lines: I, origin: &Path) -> PromoResult<WordPool>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = lines
            .into_iter()
            .filter_map(|line| self.accept(line.as_ref()).map(ToString::to_string))
            .collect::<Vec<_>>();

        WordPool::new(words, origin)
    }

    /// Streams `reader` once, skipping lines that are not valid UTF-8.
    pub fn read<R: BufRead>(&self, reader: R, origin: &Path) -> PromoResult<WordPool> {
        let mut words = Vec::new();
        let mut skipped = 0_usize;

        for line in reader.split(b'\n') {
            let line = line.map_err(|source| PromoError::SourceUnavailable {
                path: origin.to_path_buf(),
                source,
            })?;

            let Ok(line) = std::str::from_utf8(&line) else {
                skipped += 1;
                continue;
            };

            if let Some(word) = self.accept(line) {
                words.push(word.to_string());
            }
        }

        if skipped > 0 {
            debug!("skipped {skipped} non utf-8 lines in {}", origin.display());
        }

        WordPool::new(words, origin)
    }
}

/// The filtered, read-only list of words codes are drawn from.
///
/// Duplicates from the source are kept, so repeated entries are simply more likely to be drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordPool(Vec<String>);

impl WordPool {
    fn new(words: Vec<String>, origin: &Path) -> PromoResult<Self> {
        if words.is_empty() {
            return Err(PromoError::EmptyPool { path: origin.to_path_buf() });
        }

        Ok(Self(words))
    }

    pub fn words(&self) -> &[String] {
        &self.0
    }
}

pub fn load_pool(path: &Path, filter: &WordFilter) -> PromoResult<WordPool> {
    let file = File::open(path).map_err(|source| PromoError::SourceUnavailable {
        path: PathBuf::from(path),
        source,
    })?;

    let pool = filter.read(BufReader::new(file), path)?;
    info!(
        "loaded {} words ({}..={} chars) from {}",
        pool.words().len(),
        filter.min_len,
        filter.max_len,
        path.display()
    );

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor, Read};

    const DEFAULT_FILTER: WordFilter = WordFilter::new(3, 6);

    fn origin() -> &'static Path {
        Path::new("test-words")
    }

    #[test]
    fn filters_reference_corpus() {
        let pool =
            DEFAULT_FILTER.collect(["Apple", "cat", "ab", "banana", "dog"], origin()).unwrap();

        assert_eq!(pool.words(), ["cat", "banana", "dog"]);
    }

    #[test]
    fn every_accepted_word_is_in_band_and_lowercase_led() {
        let corpus = [
            "", "  ", "a", "an", "ant", "Zebra", "zebra", "zebras", "zebrass", "'tis", "-ish",
            "  fox  ", "\tyak\r", "9lives", "éclair", "owl's", "QUIZ", "quiz",
        ];

        let pool = DEFAULT_FILTER.collect(corpus, origin()).unwrap();

        assert!(!pool.words().is_empty());
        for word in pool.words() {
            assert!((3..=6).contains(&word.len()), "{word:?} out of band");
            assert!(word.as_bytes()[0].is_ascii_lowercase(), "{word:?} not lowercase led");
        }
        assert_eq!(pool.words(), ["ant", "zebra", "zebras", "fox", "yak", "owl's", "quiz"]);
    }

    #[test]
    fn keeps_duplicates_in_source_order() {
        let pool = DEFAULT_FILTER.collect(["emu", "gnu", "emu"], origin()).unwrap();
        assert_eq!(pool.words(), ["emu", "gnu", "emu"]);
    }

    #[test]
    fn empty_result_is_an_error() {
        let result = DEFAULT_FILTER.collect(["Apple", "ab", "toolongword"], origin());
        assert!(matches!(result, Err(PromoError::EmptyPool { .. })));

        let result = DEFAULT_FILTER.collect(Vec::<String>::new(), origin());
        assert!(matches!(result, Err(PromoError::EmptyPool { .. })));
    }

    #[test]
    fn custom_band_is_respected() {
        let filter = WordFilter::new(5, 5);
        let pool = filter.collect(["cat", "horse", "zebras", "tiger"], origin()).unwrap();

        assert_eq!(pool.words(), ["horse", "tiger"]);
    }

    #[test]
    fn reader_skips_invalid_utf8_lines() {
        let bytes = b"cat\n\xff\xfeow\r\nDog\ndog\r\n".to_vec();
        let pool = DEFAULT_FILTER.read(Cursor::new(bytes), origin()).unwrap();

        assert_eq!(pool.words(), ["cat", "dog"]);
    }

    struct BrokenReader;

    impl Read for BrokenReader {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("disk on fire"))
        }
    }

    #[test]
    fn read_failure_is_source_unavailable() {
        let result = DEFAULT_FILTER.read(BufReader::new(BrokenReader), origin());
        assert!(matches!(result, Err(PromoError::SourceUnavailable { .. })));
    }

    #[test]
    fn missing_file_is_source_unavailable() {
        let result = load_pool(Path::new("/definitely/not/a/word/list"), &DEFAULT_FILTER);
        assert!(matches!(result, Err(PromoError::SourceUnavailable { .. })));
    }

    #[test]
    fn loads_pool_from_disk() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let path = temp.path().join("words");
        std::fs::write(&path, "Apple\ncat\nab\nbanana\ndog\n").expect("write word list");

        let pool = load_pool(&path, &DEFAULT_FILTER).unwrap();

        assert_eq!(pool.words(), ["cat", "banana", "dog"]);
    }

    #[test]
    fn missing_file_in_existing_dir_is_source_unavailable() {
        let temp = tempfile::tempdir().expect("create temp dir");

        let result = load_pool(&temp.path().join("missing.txt"), &DEFAULT_FILTER);

        assert!(matches!(result, Err(PromoError::SourceUnavailable { .. })));
    }
}
