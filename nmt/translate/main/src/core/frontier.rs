//! Bounded search frontier.

use std::cmp::Ordering;

use crate::core::hypothesis::Hypothesis;

/// At most `capacity` hypotheses, kept sorted by score descending.
///
/// Insertion places a hypothesis after every existing one with an equal or
/// better score, then truncates, so earlier arrivals win ties.
#[derive(Debug, Clone)]
pub struct Frontier {
    capacity: usize,
    beams: Vec<Hypothesis>,
}

impl Frontier {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            beams: Vec::with_capacity(capacity + 1),
        }
    }

    /// Insert `hyp`; returns `false` if it fell outside the bound.
    pub fn push(&mut self, hyp: Hypothesis) -> bool {
        let score = hyp.score();
        let pos = self
            .beams
            .partition_point(|h| h.score().total_cmp(&score) != Ordering::Less);
        if pos >= self.capacity {
            return false;
        }
        self.beams.insert(pos, hyp);
        self.beams.truncate(self.capacity);
        true
    }

    pub fn len(&self) -> usize {
        self.beams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beams.is_empty()
    }

    /// Highest-scoring hypothesis.
    pub fn best(&self) -> Option<&Hypothesis> {
        self.beams.first()
    }

    /// Hypotheses in descending score order.
    pub fn iter(&self) -> std::slice::Iter<'_, Hypothesis> {
        self.beams.iter()
    }
}

impl IntoIterator for Frontier {
    type Item = Hypothesis;
    type IntoIter = std::vec::IntoIter<Hypothesis>;

    fn into_iter(self) -> Self::IntoIter {
        self.beams.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(token: u32, score: f32) -> Hypothesis {
        Hypothesis::start(0).extend(token, score)
    }

    #[test]
    fn test_keeps_top_capacity() {
        let mut f = Frontier::new(2);
        assert!(f.push(scored(1, -3.0)));
        assert!(f.push(scored(2, -1.0)));
        assert!(f.push(scored(3, -2.0)));
        assert!(!f.push(scored(4, -5.0)));

        let tokens: Vec<u32> = f.iter().map(|h| h.last_token()).collect();
        assert_eq!(tokens, vec![2, 3]);
        assert_eq!(f.len(), 2);
    }

    #[test]
    fn test_ties_keep_earlier_arrival() {
        let mut f = Frontier::new(2);
        f.push(scored(1, -1.0));
        f.push(scored(2, -1.0));
        assert!(!f.push(scored(3, -1.0)));
        let tokens: Vec<u32> = f.into_iter().map(|h| h.last_token()).collect();
        assert_eq!(tokens, vec![1, 2]);
    }

    #[test]
    fn test_best_and_empty() {
        let mut f = Frontier::new(3);
        assert!(f.is_empty());
        assert!(f.best().is_none());
        f.push(scored(9, -0.5));
        f.push(scored(8, -0.1));
        assert_eq!(f.best().map(|h| h.last_token()), Some(8));
    }

    #[test]
    fn test_zero_capacity_rejects_everything() {
        let mut f = Frontier::new(0);
        assert!(!f.push(scored(1, 0.0)));
        assert!(f.is_empty());
    }
}
