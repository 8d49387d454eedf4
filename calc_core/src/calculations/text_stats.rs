//! # Text Statistics
//!
//! Character, word, sentence and paragraph counts plus a reading-time
//! estimate.
//!
//! - Words are whitespace-separated tokens.
//! - Sentences are the non-empty fragments left after splitting on runs of
//!   `.`, `!` and `?`.
//! - Paragraphs are groups of non-blank lines separated by blank lines.
//! - Reading time is `ceil(words / words_per_minute)` minutes.
//!
//! ```rust
//! use calc_core::calculations::text_stats::{count_words_and_characters, DEFAULT_WORDS_PER_MINUTE};
//!
//! let stats = count_words_and_characters("Hello world.", DEFAULT_WORDS_PER_MINUTE).unwrap();
//! assert_eq!(stats.words, 2);
//! assert_eq!(stats.sentences, 1);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Average adult reading speed
pub const DEFAULT_WORDS_PER_MINUTE: u32 = 200;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStats {
    pub characters: usize,
    pub characters_no_spaces: usize,
    pub words: usize,
    pub sentences: usize,
    pub paragraphs: usize,
    pub reading_time_minutes: u32,
}

/// Count characters, words, sentences and paragraphs of `text`.
///
/// # Errors
///
/// `InvalidInput` when `words_per_minute` is zero.
pub fn count_words_and_characters(text: &str, words_per_minute: u32) -> CalcResult<TextStats> {
    if words_per_minute == 0 {
        return Err(CalcError::invalid_input(
            "words_per_minute",
            "0",
            "Reading speed must be positive",
        ));
    }

    let characters = text.chars().count();
    let characters_no_spaces = text.chars().filter(|c| !c.is_whitespace()).count();
    let words = text.split_whitespace().count();

    let sentences = text
        .split(['.', '!', '?'])
        .filter(|fragment| !fragment.trim().is_empty())
        .count();

    let mut paragraphs = 0;
    let mut in_paragraph = false;
    for line in text.lines() {
        let blank = line.trim().is_empty();
        if !blank && !in_paragraph {
            paragraphs += 1;
        }
        in_paragraph = !blank;
    }

    let reading_time_minutes = words.div_ceil(words_per_minute as usize) as u32;

    Ok(TextStats {
        characters,
        characters_no_spaces,
        words,
        sentences,
        paragraphs,
        reading_time_minutes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hello_world() {
        let stats = count_words_and_characters("Hello world.", DEFAULT_WORDS_PER_MINUTE).unwrap();
        assert_eq!(stats.words, 2);
        assert_eq!(stats.sentences, 1);
        assert_eq!(stats.characters, 12);
        assert_eq!(stats.characters_no_spaces, 11);
        assert_eq!(stats.paragraphs, 1);
        assert_eq!(stats.reading_time_minutes, 1);
    }

    #[test]
    fn test_punctuation_runs() {
        let stats = count_words_and_characters("Wait... what?! Really.", DEFAULT_WORDS_PER_MINUTE).unwrap();
        assert_eq!(stats.sentences, 3);
        assert_eq!(stats.words, 3);
    }

    #[test]
    fn test_paragraphs_split_on_blank_lines() {
        let text = "First paragraph.\nStill first.\n\n\n  \nSecond one.\n\nThird.";
        let stats = count_words_and_characters(text, DEFAULT_WORDS_PER_MINUTE).unwrap();
        assert_eq!(stats.paragraphs, 3);
        assert_eq!(stats.sentences, 4);
    }

    #[test]
    fn test_empty_text() {
        let stats = count_words_and_characters("   ", DEFAULT_WORDS_PER_MINUTE).unwrap();
        assert_eq!(stats.words, 0);
        assert_eq!(stats.sentences, 0);
        assert_eq!(stats.paragraphs, 0);
        assert_eq!(stats.reading_time_minutes, 0);
        assert_eq!(stats.characters, 3);
        assert_eq!(stats.characters_no_spaces, 0);
    }

    #[test]
    fn test_reading_time_rounds_up() {
        let text = "word ".repeat(401);
        let stats = count_words_and_characters(&text, 200).unwrap();
        assert_eq!(stats.words, 401);
        assert_eq!(stats.reading_time_minutes, 3);
    }

    #[test]
    fn test_counts_unicode_characters() {
        let stats = count_words_and_characters("¿Qué tal? ¡Muy bien!", DEFAULT_WORDS_PER_MINUTE).unwrap();
        assert_eq!(stats.characters, 20);
        assert_eq!(stats.words, 4);
        assert_eq!(stats.sentences, 2);
    }

    #[test]
    fn test_zero_reading_speed() {
        assert!(count_words_and_characters("text", 0).is_err());
    }
}
