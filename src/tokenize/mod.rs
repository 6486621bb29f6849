//! Tokenizer adapter — deterministic UAX#29 word segmentation
//!
//! The sketch layer consumes "a sequence of tokens" and does not care how
//! they were produced, only that the segmentation is deterministic (same
//! text → same tokens, always) and never splits inside a UTF-8 code point.
//! Both properties come with Unicode UAX#29 word boundaries: alphabetic
//! scripts segment into words, Han/Kana ideographs segment one character
//! per token, and punctuation-only segments are dropped.
//!
//! Token equality is plain `&str` equality — a total, explicit relation
//! over the UTF-8 bytes of each token.

use unicode_segmentation::UnicodeSegmentation;

/// Segment `text` into its token sequence.
///
/// Borrowed sub-slices of `text`, in document order, duplicates kept. An
/// empty or punctuation-only document yields an empty sequence, which the
/// sketch layer maps to the sentinel sketch rather than an error.
pub fn words(text: &str) -> Vec<&str> {
    text.unicode_words().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_segmentation() {
        assert_eq!(words("Hello, world!"), vec!["Hello", "world"]);
    }

    #[test]
    fn test_empty_and_punctuation_only() {
        assert!(words("").is_empty());
        assert!(words("... !!! ???").is_empty());
    }

    #[test]
    fn test_cjk_segments_per_ideograph() {
        // UAX#29 breaks between Han ideographs, one token per character
        assert_eq!(words("床前明月光").len(), 5);
    }

    #[test]
    fn test_contractions_and_numbers_stay_whole() {
        let tokens = words("The fox can't jump 32.3 feet");
        assert_eq!(tokens, vec!["The", "fox", "can't", "jump", "32.3", "feet"]);
    }

    #[test]
    fn test_determinism() {
        let text = "同一段文字 tokenizes the same way, 每一次。";
        assert_eq!(words(text), words(text));
    }

    #[test]
    fn test_tokens_borrow_from_input() {
        let text = String::from("alpha beta");
        let tokens = words(&text);
        assert!(tokens.iter().all(|t| text.contains(t)));
    }
}
