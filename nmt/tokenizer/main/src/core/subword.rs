//! Greedy longest-match subword tokenizer
//!
//! Words are prefixed with the word-boundary marker (`▁`) and matched
//! against the vocabulary from the left, always trying the longest
//! remaining piece first.

use std::sync::Arc;

use crate::api::error::TokenizerResult;
use crate::api::types::{TokenId, SILENT_TOKENS, WORD_BOUNDARY};
use crate::core::normalize::normalize;
use crate::core::vocab::Vocabulary;
use crate::spi::contract::Tokenizer;

/// Tokenizer over a shared, read-only `Vocabulary`.
#[derive(Debug, Clone)]
pub struct SubwordTokenizer {
    vocab: Arc<Vocabulary>,
}

impl SubwordTokenizer {
    pub fn new(vocab: Arc<Vocabulary>) -> Self {
        Self { vocab }
    }

    pub fn vocab(&self) -> &Vocabulary {
        &self.vocab
    }

    /// Replace runs of ASCII whitespace with a single space.
    pub fn normalize(&self, text: &str) -> String {
        normalize(text)
    }

    /// Encode one word. On the first position where no piece matches, a
    /// single `<unk>` is emitted and the rest of the word is dropped.
    fn encode_word(&self, word: &str, out: &mut Vec<TokenId>) {
        let mut current = String::with_capacity(word.len() + WORD_BOUNDARY.len_utf8());
        current.push(WORD_BOUNDARY);
        current.push_str(word);

        let max_len = self.vocab.max_token_len();
        let mut pos = 0;
        while pos < current.len() {
            let rest = &current[pos..];
            let matched = rest
                .char_indices()
                .map(|(i, c)| i + c.len_utf8())
                .take_while(|&end| end <= max_len)
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .find_map(|end| self.vocab.id_of(&rest[..end]).map(|id| (id, end)));

            match matched {
                Some((id, len)) => {
                    out.push(id);
                    pos += len;
                }
                None => {
                    log::trace!("no subword matches {:?}; dropping remainder of {:?}", rest, word);
                    out.push(self.vocab.unk_id());
                    break;
                }
            }
        }
    }
}

impl Tokenizer for SubwordTokenizer {
    fn encode(&self, text: &str) -> TokenizerResult<Vec<TokenId>> {
        let normalized = normalize(text);
        let mut ids = Vec::new();
        for word in normalized.split(' ').filter(|w| !w.is_empty()) {
            self.encode_word(word, &mut ids);
        }
        Ok(ids)
    }

    fn decode(&self, tokens: &[TokenId]) -> TokenizerResult<String> {
        let mut result = String::new();
        for &id in tokens {
            let token = match self.vocab.token_of(id) {
                Some(token) => token,
                None => continue,
            };
            if SILENT_TOKENS.contains(&token) {
                continue;
            }
            match token.strip_prefix(WORD_BOUNDARY) {
                Some(piece) => {
                    if !result.is_empty() {
                        result.push(' ');
                    }
                    result.push_str(piece);
                }
                None => result.push_str(token),
            }
        }
        Ok(result)
    }

    fn vocab_size(&self) -> usize {
        self.vocab.id_bound()
    }

    fn token_to_id(&self, token: &str) -> Option<TokenId> {
        self.vocab.id_of(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenizer() -> SubwordTokenizer {
        let vocab = Vocabulary::from_json_str(
            r#"{
                "<unk>": 0, "<pad>": 1, "<s>": 2, "</s>": 3,
                "▁Hello": 101, "▁World": 102, "!": 103,
                "▁un": 110, "believ": 111, "able": 112, "▁": 113
            }"#,
        )
        .unwrap();
        SubwordTokenizer::new(Arc::new(vocab))
    }

    #[test]
    fn test_encode_known_words() {
        let t = tokenizer();
        assert_eq!(t.encode("Hello World!").unwrap(), vec![101, 102, 103]);
    }

    #[test]
    fn test_decode_known_words() {
        let t = tokenizer();
        assert_eq!(t.decode(&[101, 102, 103]).unwrap(), "Hello World!");
    }

    #[test]
    fn test_encode_prefers_longest_piece() {
        let t = tokenizer();
        assert_eq!(t.encode("unbelievable").unwrap(), vec![110, 111, 112]);
    }

    #[test]
    fn test_bare_marker_then_single_unk() {
        let t = tokenizer();
        // "▁" alone matches, then "Unknown" has no piece: one <unk>, rest dropped
        assert_eq!(t.encode("Unknown").unwrap(), vec![113, 0]);
    }

    #[test]
    fn test_unmatched_suffix_is_dropped() {
        let t = tokenizer();
        assert_eq!(t.encode("Hello?? World").unwrap(), vec![101, 0, 102]);
    }

    #[test]
    fn test_empty_and_blank_input() {
        let t = tokenizer();
        assert!(t.encode("").unwrap().is_empty());
        assert!(t.encode(" \t\n ").unwrap().is_empty());
    }

    #[test]
    fn test_whitespace_runs_split_words() {
        let t = tokenizer();
        assert_eq!(t.encode("  Hello\t\n\tWorld  ").unwrap(), vec![101, 102]);
    }

    #[test]
    fn test_decode_skips_reserved_and_unknown_ids() {
        let t = tokenizer();
        assert_eq!(t.decode(&[1, 2, 3]).unwrap(), "");
        assert_eq!(t.decode(&[]).unwrap(), "");
        assert_eq!(t.decode(&[1, 101, 9999, 3, 102]).unwrap(), "Hello World");
    }

    #[test]
    fn test_decode_leading_continuation_piece() {
        let t = tokenizer();
        assert_eq!(t.decode(&[103, 101]).unwrap(), "! Hello");
    }

    #[test]
    fn test_decode_keeps_unk_text() {
        let t = tokenizer();
        assert_eq!(t.decode(&[101, 0]).unwrap(), "Hello<unk>");
    }

    #[test]
    fn test_vocab_size_is_id_bound() {
        let t = tokenizer();
        assert_eq!(t.vocab_size(), 114);
        assert_eq!(t.token_to_id("</s>"), Some(3));
    }
}
