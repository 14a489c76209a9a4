//! Persistent beam hypotheses.
//!
//! A hypothesis is a reference-counted link to its parent plus one token, so
//! extending a hypothesis is O(1) and siblings share their common prefix.
//! The full sequence is materialized only when the model needs it.

use std::sync::Arc;

use nmt_tokenizer::TokenId;

#[derive(Debug)]
struct Node {
    token: TokenId,
    len: usize,
    parent: Option<Arc<Node>>,
}

impl Drop for Node {
    // Unlink iteratively; the default recursive drop can overflow the stack
    // on very long chains.
    fn drop(&mut self) {
        let mut next = self.parent.take();
        while let Some(node) = next {
            match Arc::try_unwrap(node) {
                Ok(mut inner) => next = inner.parent.take(),
                Err(_) => break,
            }
        }
    }
}

/// Immutable candidate sequence with its cumulative log-probability.
#[derive(Debug, Clone)]
pub struct Hypothesis {
    node: Arc<Node>,
    score: f32,
}

impl Hypothesis {
    /// A one-token hypothesis with score 0.0.
    pub fn start(token: TokenId) -> Self {
        Self {
            node: Arc::new(Node {
                token,
                len: 1,
                parent: None,
            }),
            score: 0.0,
        }
    }

    /// A child hypothesis: this sequence plus `token`, score plus `log_prob`.
    pub fn extend(&self, token: TokenId, log_prob: f32) -> Self {
        Self {
            node: Arc::new(Node {
                token,
                len: self.node.len + 1,
                parent: Some(Arc::clone(&self.node)),
            }),
            score: self.score + log_prob,
        }
    }

    pub fn last_token(&self) -> TokenId {
        self.node.token
    }

    pub fn len(&self) -> usize {
        self.node.len
    }

    pub fn score(&self) -> f32 {
        self.score
    }

    /// Whether the most recent token is `eos_token_id`.
    pub fn is_terminal(&self, eos_token_id: TokenId) -> bool {
        self.node.token == eos_token_id
    }

    /// Materialize the token sequence, oldest first.
    pub fn tokens(&self) -> Vec<TokenId> {
        let mut out = Vec::with_capacity(self.node.len);
        let mut cursor = Some(&self.node);
        while let Some(node) = cursor {
            out.push(node.token);
            cursor = node.parent.as_ref();
        }
        out.reverse();
        out
    }
}
