use super::super::scoring::ScoreResult;
use std::collections::HashMap;

/// Round-half-up percentage of a weighted ratio sum; zero when no weight was seen.
pub(crate) fn weighted_percent(weighted: f64, weight: f64) -> u8 {
    if weight > 0.0 {
        ratio_percent(weighted / weight)
    } else {
        0
    }
}

pub(crate) fn ratio_percent(ratio: f64) -> u8 {
    (ratio * 100.0 + 0.5).floor().clamp(0.0, 100.0) as u8
}

/// Running weighted sum of question ratios.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct WeightedTally {
    pub weight: f64,
    pub weighted: f64,
    pub questions: usize,
}

impl WeightedTally {
    pub fn add(&mut self, score: &ScoreResult, weight: f64) {
        self.weight += weight;
        self.weighted += score.ratio() * weight;
        self.questions += 1;
    }

    pub fn percent(&self) -> u8 {
        weighted_percent(self.weighted, self.weight)
    }
}

/// Per-dimension tallies kept in the order dimensions were first seen.
#[derive(Debug, Default, Clone)]
pub struct DimensionAggregator {
    tallies: Vec<(String, WeightedTally)>,
    index: HashMap<String, usize>,
}

impl DimensionAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, dimension: &str, score: &ScoreResult, weight: f64) {
        let slot = match self.index.get(dimension) {
            Some(&slot) => slot,
            None => {
                self.tallies
                    .push((dimension.to_string(), WeightedTally::default()));
                let slot = self.tallies.len() - 1;
                self.index.insert(dimension.to_string(), slot);
                slot
            }
        };
        self.tallies[slot].1.add(score, weight);
    }

    pub fn get(&self, dimension: &str) -> Option<&WeightedTally> {
        self.index.get(dimension).map(|&slot| &self.tallies[slot].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &WeightedTally)> {
        self.tallies
            .iter()
            .map(|(dimension, tally)| (dimension.as_str(), tally))
    }

    pub fn len(&self) -> usize {
        self.tallies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tallies.is_empty()
    }
}
