use serde::{Deserialize, Serialize};

/// The statistic used to summarize several readings into one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReductionMode {
    #[default]
    Max,
    Mean,
}

impl ReductionMode {
    /// The other mode, as flipped by the max/average toggle.
    pub fn toggle(self) -> ReductionMode {
        match self {
            ReductionMode::Max => ReductionMode::Mean,
            ReductionMode::Mean => ReductionMode::Max,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReductionMode::Max => "Max",
            ReductionMode::Mean => "Average",
        }
    }
}

/// Running count, sum and maximum of valid readings.
///
/// Only finite values are accepted, so a reduction can never produce NaN.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Accumulator {
    count: usize,
    sum: f64,
    max: f64,
}

impl Accumulator {
    pub fn push(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        if self.count == 0 || value > self.max {
            self.max = value;
        }
        self.sum += value;
        self.count += 1;
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn max(&self) -> Option<f64> {
        (self.count > 0).then_some(self.max)
    }

    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }

    pub fn reduce(&self, mode: ReductionMode) -> Option<f64> {
        match mode {
            ReductionMode::Max => self.max(),
            ReductionMode::Mean => self.mean(),
        }
    }
}

impl FromIterator<f64> for Accumulator {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut acc = Accumulator::default();
        for v in iter {
            acc.push(v);
        }
        acc
    }
}
