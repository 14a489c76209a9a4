//! Text-to-text translation: tokenize, encode, beam search, detokenize.

use std::time::{Duration, Instant};

use nmt_tokenizer::{TokenId, Tokenizer};
use rayon::prelude::*;

use crate::api::error::TranslateResult;
use crate::api::types::{BeamConfig, SearchOutcome};
use crate::core::beam::BeamSearch;
use crate::spi::contract::InferencePort;

/// Translator combining a model port, a tokenizer and beam parameters.
///
/// Holds no per-request state, so one instance serves any number of
/// sequential or concurrent `translate` calls.
pub struct Translator<'a> {
    model: &'a dyn InferencePort,
    tokenizer: &'a dyn Tokenizer,
    config: BeamConfig,
    timeout: Option<Duration>,
    deadline: Option<Instant>,
}

impl<'a> Translator<'a> {
    pub fn new(model: &'a dyn InferencePort, tokenizer: &'a dyn Tokenizer, config: BeamConfig) -> Self {
        Self {
            model,
            tokenizer,
            config,
            timeout: None,
            deadline: None,
        }
    }

    /// Fail any request still decoding after `deadline`.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Give each request at most `duration`, measured from the start of the call.
    ///
    /// Checked between decoding steps; a model call already in progress is not interrupted.
    pub fn with_timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    fn request_deadline(&self) -> Option<Instant> {
        let from_timeout = self.timeout.map(|d| Instant::now() + d);
        match (self.deadline, from_timeout) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    fn search(&self) -> BeamSearch<'a> {
        BeamSearch::new(self.model, self.config.clone(), self.tokenizer.vocab_size())
    }

    /// Beam search from already tokenized input.
    ///
    /// Empty input yields an empty outcome without calling the model.
    pub fn translate_ids(&self, input_ids: &[TokenId]) -> TranslateResult<SearchOutcome> {
        let search = self.search().with_deadline(self.request_deadline());
        search.validate()?;
        if input_ids.is_empty() {
            log::debug!("empty input, skipping inference");
            return Ok(SearchOutcome::empty(0));
        }

        let _t = if log::log_enabled!(log::Level::Debug) { Some(Instant::now()) } else { None };
        let encoder = self.model.encode(input_ids)?;
        if let Some(t) = _t {
            log::debug!(
                "[perf] translator::encode tokens={} {:.3}ms",
                input_ids.len(),
                t.elapsed().as_secs_f64() * 1000.0
            );
        }

        search.search(&encoder)
    }

    /// Translate one sentence. An empty string is a valid result.
    pub fn translate(&self, text: &str) -> TranslateResult<String> {
        self.search().validate()?;
        let input_ids = self.tokenizer.encode(text)?;
        log::debug!("translate: {} source tokens", input_ids.len());

        let outcome = self.translate_ids(&input_ids)?;
        log::debug!(
            "translate: {} target tokens, score={:.4}, finished={}, steps={}",
            outcome.tokens.len(),
            outcome.score,
            outcome.finished,
            outcome.steps
        );
        Ok(self.tokenizer.decode(&outcome.tokens)?)
    }

    /// Translate several sentences in parallel using rayon.
    pub fn translate_batch(&self, texts: &[&str]) -> TranslateResult<Vec<String>> {
        texts
            .par_iter()
            .map(|text| self.translate(text))
            .collect::<Result<Vec<_>, _>>()
    }
}
