//! Probability helpers for beam expansion.
//!
//! Operates on raw logit slices for efficiency.

use std::cmp::Ordering;

use nmt_tokenizer::TokenId;

use crate::api::error::{TranslateError, TranslateResult};

/// Smoothing added before taking the log so that `p == 0` stays finite.
pub const LOG_EPSILON: f32 = 1e-8;

/// Numerically stable softmax: subtract the max logit, exponentiate, normalize.
pub fn softmax(logits: &[f32]) -> TranslateResult<Vec<f32>> {
    if logits.is_empty() {
        return Err(TranslateError::InvalidArgument("softmax of an empty logits vector".into()));
    }
    let max_val = logits.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|&v| (v - max_val).exp()).collect();
    let sum: f32 = exps.iter().sum();
    Ok(exps.iter().map(|&e| e / sum).collect())
}

/// Higher probability first, lower token id on ties.
fn rank(a: &(TokenId, f32), b: &(TokenId, f32)) -> Ordering {
    b.1.total_cmp(&a.1).then(a.0.cmp(&b.0))
}

/// The `k` most probable (token, probability) pairs, highest first.
///
/// Uses a partial selection so only the head of the vector is sorted.
pub fn top_k(probs: &[f32], k: usize) -> TranslateResult<Vec<(TokenId, f32)>> {
    if k > probs.len() {
        return Err(TranslateError::InvalidArgument(format!(
            "top_k: k = {} exceeds vocabulary size {}",
            k,
            probs.len()
        )));
    }
    if k == 0 {
        return Ok(Vec::new());
    }

    let mut indexed: Vec<(TokenId, f32)> = probs
        .iter()
        .enumerate()
        .map(|(i, &p)| (i as TokenId, p))
        .collect();
    if k < indexed.len() {
        indexed.select_nth_unstable_by(k - 1, rank);
        indexed.truncate(k);
    }
    indexed.sort_unstable_by(rank);
    Ok(indexed)
}

/// Score increment for emitting a token with probability `p`.
pub fn log_prob(p: f32) -> f32 {
    (p + LOG_EPSILON).ln()
}
