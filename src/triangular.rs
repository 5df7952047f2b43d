use crate::{density::Support, Density, Error, Result};

/// Triangular density on `(low, high)` with its peak at `mode`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangular {
    low: f64,
    mode: f64,
    high: f64,
}

impl Triangular {
    pub fn new(low: f64, mode: f64, high: f64) -> Result<Self> {
        let finite = low.is_finite() && mode.is_finite() && high.is_finite();
        if !finite || !(low < high) || !(low <= mode && mode <= high) {
            return Err(Error::InvalidParameter(format!(
                "triangular needs low <= mode <= high and low < high, got ({low}, {mode}, {high})"
            )));
        }
        Ok(Self { low, mode, high })
    }

    /// The symmetric density `2 - 4|x - 0.5|` on `(0, 1)`.
    pub fn standard() -> Self {
        Self {
            low: 0.,
            mode: 0.5,
            high: 1.,
        }
    }

    pub fn cdf(&self, x: f64) -> f64 {
        let width = self.high - self.low;
        if x <= self.low {
            0.
        } else if x <= self.mode {
            (x - self.low).powi(2) / (width * (self.mode - self.low))
        } else if x < self.high {
            1. - (self.high - x).powi(2) / (width * (self.high - self.mode))
        } else {
            1.
        }
    }

    pub fn mean(&self) -> f64 {
        (self.low + self.mode + self.high) / 3.
    }

    /// The largest value of the density, reached at the mode.
    pub fn max_density(&self) -> f64 {
        2. / (self.high - self.low)
    }

    pub fn support(&self) -> Support {
        Support {
            lower: self.low,
            upper: self.high,
        }
    }
}

impl Density for Triangular {
    fn density(&self, x: f64) -> f64 {
        let width = self.high - self.low;
        if x <= self.low || x >= self.high {
            0.
        } else if x < self.mode {
            2. * (x - self.low) / (width * (self.mode - self.low))
        } else if x == self.mode {
            self.max_density()
        } else {
            2. * (self.high - x) / (width * (self.high - self.mode))
        }
    }
}
