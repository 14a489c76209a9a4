//! Subword vocabulary
//!
//! Loaded once from a `vocab.json` object (`{"▁Hello": 101, ...}`) and
//! read-only afterwards. Wrap it in an `Arc` to share it between tokenizers
//! and threads.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::time::Instant;

use serde_json::Value;

use crate::api::error::{TokenizerError, TokenizerResult};
use crate::api::types::{TokenId, BOS_TOKEN, EOS_TOKEN, PAD_TOKEN, UNK_TOKEN};

/// Bidirectional mapping between subword strings and token ids.
///
/// Invariants established at load time:
/// - the mapping is a bijection (no id is shared by two tokens)
/// - `<unk>` is present
#[derive(Debug, Clone)]
pub struct Vocabulary {
    token_to_id: HashMap<String, TokenId>,
    id_to_token: HashMap<TokenId, String>,
    unk_id: TokenId,
    id_bound: usize,
    max_token_len: usize,
}

impl Vocabulary {
    /// Load from a JSON file holding a token→id object.
    pub fn from_file<P: AsRef<Path>>(path: P) -> TokenizerResult<Self> {
        let p = path.as_ref();
        let file = File::open(p).map_err(|e| {
            TokenizerError::VocabLoad(format!("Failed to open vocab file: {}: {}", p.display(), e))
        })?;
        let _t = if log::log_enabled!(log::Level::Debug) { Some(Instant::now()) } else { None };
        let vocab = Self::from_reader(BufReader::new(file))?;
        log::info!("loaded vocabulary from {} ({} tokens)", p.display(), vocab.len());
        if let Some(t) = _t {
            log::debug!("[perf] vocab::from_file {:.3}ms", t.elapsed().as_secs_f64() * 1000.0);
        }
        Ok(vocab)
    }

    /// Load from any reader producing a JSON token→id object.
    pub fn from_reader<R: Read>(reader: R) -> TokenizerResult<Self> {
        let value: Value = serde_json::from_reader(reader)
            .map_err(|e| TokenizerError::VocabLoad(format!("Invalid vocab JSON: {}", e)))?;
        Self::from_json_value(value)
    }

    /// Load from an in-memory JSON string.
    pub fn from_json_str(json: &str) -> TokenizerResult<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| TokenizerError::VocabLoad(format!("Invalid vocab JSON: {}", e)))?;
        Self::from_json_value(value)
    }

    fn from_json_value(value: Value) -> TokenizerResult<Self> {
        let map = match value {
            Value::Object(map) => map,
            other => {
                return Err(TokenizerError::VocabLoad(format!(
                    "vocab must be a JSON object of token -> id, got {}",
                    json_kind(&other)
                )))
            }
        };

        let mut pairs = Vec::with_capacity(map.len());
        for (token, id) in map {
            let id = id
                .as_u64()
                .and_then(|v| TokenId::try_from(v).ok())
                .ok_or_else(|| {
                    TokenizerError::VocabLoad(format!(
                        "token {:?} has invalid id {} (expected a non-negative 32-bit integer)",
                        token, id
                    ))
                })?;
            pairs.push((token, id));
        }
        Self::from_pairs(pairs)
    }

    /// Build from (token, id) pairs, applying the same validation as the file loaders.
    pub fn from_pairs<I, S>(pairs: I) -> TokenizerResult<Self>
    where
        I: IntoIterator<Item = (S, TokenId)>,
        S: Into<String>,
    {
        let mut token_to_id = HashMap::new();
        let mut id_to_token: HashMap<TokenId, String> = HashMap::new();
        let mut max_token_len = 0;

        for (token, id) in pairs {
            let token = token.into();
            if let Some(existing) = id_to_token.get(&id) {
                if *existing != token {
                    return Err(TokenizerError::VocabLoad(format!(
                        "id {} is assigned to both {:?} and {:?}",
                        id, existing, token
                    )));
                }
                continue;
            }
            if let Some(&previous) = token_to_id.get(&token) {
                return Err(TokenizerError::VocabLoad(format!(
                    "token {:?} is assigned to both {} and {}",
                    token, previous, id
                )));
            }
            max_token_len = max_token_len.max(token.len());
            token_to_id.insert(token.clone(), id);
            id_to_token.insert(id, token);
        }

        let unk_id = *token_to_id
            .get(UNK_TOKEN)
            .ok_or_else(|| TokenizerError::MissingReservedToken(UNK_TOKEN.to_string()))?;

        let id_bound = id_to_token.keys().max().map_or(0, |&max| max as usize + 1);

        Ok(Self {
            token_to_id,
            id_to_token,
            unk_id,
            id_bound,
            max_token_len,
        })
    }

    pub fn id_of(&self, token: &str) -> Option<TokenId> {
        self.token_to_id.get(token).copied()
    }

    pub fn token_of(&self, id: TokenId) -> Option<&str> {
        self.id_to_token.get(&id).map(String::as_str)
    }

    pub fn unk_id(&self) -> TokenId {
        self.unk_id
    }

    pub fn pad_id(&self) -> Option<TokenId> {
        self.id_of(PAD_TOKEN)
    }

    pub fn bos_id(&self) -> Option<TokenId> {
        self.id_of(BOS_TOKEN)
    }

    pub fn eos_id(&self) -> Option<TokenId> {
        self.id_of(EOS_TOKEN)
    }

    /// Number of (token, id) entries.
    pub fn len(&self) -> usize {
        self.token_to_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.token_to_id.is_empty()
    }

    /// Largest id + 1: the logits width needed to address every token.
    pub fn id_bound(&self) -> usize {
        self.id_bound
    }

    /// Byte length of the longest token.
    pub fn max_token_len(&self) -> usize {
        self.max_token_len
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
