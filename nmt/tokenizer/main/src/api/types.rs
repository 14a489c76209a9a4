//! Shared token types and reserved token names

/// Integer id of a subword token.
pub type TokenId = u32;

/// Marker prepended to the first subword of every word (U+2581, three bytes in UTF-8).
pub const WORD_BOUNDARY: char = '\u{2581}';

/// Unknown-token placeholder; every vocabulary must contain it.
pub const UNK_TOKEN: &str = "<unk>";
/// Padding token, also used as the decoder start marker by opus-mt models.
pub const PAD_TOKEN: &str = "<pad>";
/// Beginning-of-sequence token.
pub const BOS_TOKEN: &str = "<s>";
/// End-of-sequence token.
pub const EOS_TOKEN: &str = "</s>";

/// Tokens that decode to nothing.
pub const SILENT_TOKENS: [&str; 3] = [PAD_TOKEN, BOS_TOKEN, EOS_TOKEN];
