//! Beam search decoder.
//!
//! Each step moves terminal hypotheses to the completed set, expands every
//! live hypothesis by its `beam_width` most probable next tokens, and keeps
//! the best `beam_width` children across all parents as the next frontier.
//! Expansions within a step run in parallel; the merge is sequential and in
//! frontier order, so results do not depend on scheduling.

use std::time::Instant;

use rayon::prelude::*;

use nmt_tokenizer::TokenId;

use crate::api::error::{TranslateError, TranslateResult};
use crate::api::types::{BeamConfig, EncoderState, SearchOutcome, StepReport};
use crate::core::frontier::Frontier;
use crate::core::hypothesis::Hypothesis;
use crate::core::sampling;
use crate::spi::contract::InferencePort;

/// Beam search over one encoded source sentence.
pub struct BeamSearch<'a> {
    model: &'a dyn InferencePort,
    config: BeamConfig,
    logits_width: usize,
    deadline: Option<Instant>,
}

impl<'a> BeamSearch<'a> {
    /// `logits_width` is the number of logits `decode_step` must return.
    pub fn new(model: &'a dyn InferencePort, config: BeamConfig, logits_width: usize) -> Self {
        Self {
            model,
            config,
            logits_width,
            deadline: None,
        }
    }

    /// Abort with `DeadlineExceeded` if a step would start after `deadline`.
    pub fn with_deadline(mut self, deadline: Option<Instant>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Reject configurations before any model call is made.
    pub fn validate(&self) -> TranslateResult<()> {
        self.config.validate()?;
        if self.config.beam_width > self.logits_width {
            return Err(TranslateError::InvalidArgument(format!(
                "beam_width {} exceeds vocabulary size {}",
                self.config.beam_width, self.logits_width
            )));
        }
        Ok(())
    }

    pub fn search(&self, encoder: &EncoderState) -> TranslateResult<SearchOutcome> {
        self.search_with_observer(encoder, |_| {})
    }

    /// Run the search, calling `observer` after every step.
    pub fn search_with_observer<F: FnMut(&StepReport)>(
        &self,
        encoder: &EncoderState,
        mut observer: F,
    ) -> TranslateResult<SearchOutcome> {
        self.validate()?;
        let width = self.config.beam_width;
        let eos = self.config.eos_token_id;

        let mut frontier = Frontier::new(width);
        frontier.push(Hypothesis::start(self.config.pad_token_id));
        let mut completed: Vec<Hypothesis> = Vec::new();
        let mut steps = 0;

        for step in 0..self.config.max_length {
            self.check_deadline(step)?;
            let _t = if log::log_enabled!(log::Level::Debug) { Some(Instant::now()) } else { None };

            let current = std::mem::replace(&mut frontier, Frontier::new(width));
            let mut live = Vec::with_capacity(current.len());
            for hyp in current {
                if hyp.is_terminal(eos) {
                    completed.push(hyp);
                } else {
                    live.push(hyp);
                }
            }

            let expansions = live
                .par_iter()
                .map(|hyp| self.expand(hyp, encoder))
                .collect::<TranslateResult<Vec<_>>>()?;

            let mut next = Frontier::new(width);
            for child in expansions.into_iter().flatten() {
                next.push(child);
            }
            steps = step + 1;

            let report = StepReport {
                step,
                frontier_len: next.len(),
                completed_len: completed.len(),
                best_score: next.best().map(Hypothesis::score),
            };
            if let Some(t) = _t {
                log::debug!(
                    "[perf] beam::step step={} expanded={} frontier={} completed={} best={:?} {:.3}ms",
                    step,
                    live.len(),
                    report.frontier_len,
                    report.completed_len,
                    report.best_score,
                    t.elapsed().as_secs_f64() * 1000.0
                );
            }
            observer(&report);

            if next.is_empty() {
                break;
            }
            frontier = next;
        }

        Ok(Self::select(&completed, &frontier, eos, steps))
    }

    /// Best completed hypothesis, else best live one, else nothing.
    fn select(completed: &[Hypothesis], frontier: &Frontier, eos: TokenId, steps: usize) -> SearchOutcome {
        let mut best: Option<&Hypothesis> = None;
        for hyp in completed {
            if best.map_or(true, |b| hyp.score() > b.score()) {
                best = Some(hyp);
            }
        }
        match best.or_else(|| frontier.best()) {
            Some(hyp) => SearchOutcome {
                tokens: hyp.tokens(),
                score: hyp.score(),
                finished: hyp.is_terminal(eos),
                steps,
            },
            None => SearchOutcome::empty(steps),
        }
    }

    fn expand(&self, hyp: &Hypothesis, encoder: &EncoderState) -> TranslateResult<Vec<Hypothesis>> {
        let tokens = hyp.tokens();
        let logits = self.model.decode_step(&tokens, encoder)?;
        self.check_logits(&logits)?;

        let probs = sampling::softmax(&logits)?;
        let top = sampling::top_k(&probs, self.config.beam_width)?;
        log::trace!("beam::expand len={} score={:.4} top={:?}", tokens.len(), hyp.score(), top);

        Ok(top
            .into_iter()
            .map(|(token, p)| hyp.extend(token, sampling::log_prob(p)))
            .collect())
    }

    fn check_logits(&self, logits: &[f32]) -> TranslateResult<()> {
        if logits.len() != self.logits_width {
            return Err(TranslateError::Inference(format!(
                "decode_step returned {} logits, expected {}",
                logits.len(),
                self.logits_width
            )));
        }
        if logits.iter().any(|v| v.is_nan()) {
            return Err(TranslateError::Inference("decode_step returned NaN logits".into()));
        }
        if logits.iter().any(|&v| v == f32::INFINITY) {
            return Err(TranslateError::Inference("decode_step returned +inf logits".into()));
        }
        // Single -inf entries are masks; a fully masked row has no distribution
        if logits.iter().all(|&v| v == f32::NEG_INFINITY) {
            return Err(TranslateError::Inference("decode_step returned only -inf logits".into()));
        }
        Ok(())
    }

    fn check_deadline(&self, steps: usize) -> TranslateResult<()> {
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return Err(TranslateError::DeadlineExceeded { steps });
            }
        }
        Ok(())
    }
}
