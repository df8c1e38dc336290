use crate::util::{mean, median, min_max, std_dev};
use serde::Deserialize;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Observation {
    pub label: String,
    pub value: f64,
}

impl Observation {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ReportError {
    #[error("no observations to analyse")]
    Empty,
    #[error("target must be non-zero")]
    ZeroTarget,
    #[error("non-finite value {value} for {label}")]
    NonFinite { label: String, value: f64 },
    #[error("{0} overflowed, values are too large to analyse")]
    Overflow(&'static str),
}

/// one observation measured against the target
#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    pub label: String,
    pub value: f64,
    pub gap: f64,
    pub pct_above_target: f64,
}

impl Row {
    /// "Q1 2024" reads as "Q1" in running text
    pub fn short_label(&self) -> &str {
        self.label.split_whitespace().next().unwrap_or(&self.label)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
pub enum Trend {
    #[strum(serialize = "upward")]
    Rising,
    #[strum(serialize = "downward")]
    Falling,
    #[strum(serialize = "flat")]
    Flat,
    #[strum(serialize = "mixed")]
    Mixed,
}

/// Descriptive statistics of an observation set against a fixed target.
///
/// Built once by [`Report::compute`] and only read afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct Report {
    rows: Vec<Row>,
    target: f64,
    mean: f64,
    median: f64,
    std_dev: f64,
    min: f64,
    max: f64,
}

impl Report {
    pub fn compute(observations: &[Observation], target: f64) -> Result<Self, ReportError> {
        if !target.is_finite() {
            return Err(ReportError::NonFinite {
                label: String::from("target"),
                value: target,
            });
        }
        if target == 0.0 {
            return Err(ReportError::ZeroTarget);
        }
        if let Some(bad) = observations.iter().find(|o| !o.value.is_finite()) {
            return Err(ReportError::NonFinite {
                label: bad.label.clone(),
                value: bad.value,
            });
        }

        let values = observations.iter().map(|o| o.value).collect::<Vec<f64>>();

        let (mean, median, std_dev, (min, max)) = match (
            mean(&values),
            median(&values),
            std_dev(&values),
            min_max(&values),
        ) {
            (Some(a), Some(b), Some(c), Some(d)) => (a, b, c, d),
            _ => return Err(ReportError::Empty),
        };

        if !mean.is_finite() {
            return Err(ReportError::Overflow("mean"));
        }
        if !std_dev.is_finite() {
            return Err(ReportError::Overflow("standard deviation"));
        }

        let rows = observations
            .iter()
            .map(|o| {
                let gap = o.value - target;
                Row {
                    label: o.label.clone(),
                    value: o.value,
                    gap,
                    pct_above_target: gap / target * 100.0,
                }
            })
            .collect::<Vec<Row>>();

        if rows
            .iter()
            .any(|r| !r.gap.is_finite() || !r.pct_above_target.is_finite())
        {
            return Err(ReportError::Overflow("gap to target"));
        }
        if !((mean - target) / target * 100.0).is_finite() {
            return Err(ReportError::Overflow("gap to target"));
        }

        Ok(Self {
            rows,
            target,
            mean,
            median,
            std_dev,
            min,
            max,
        })
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn labels(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.label.as_str()).collect()
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn median(&self) -> f64 {
        self.median
    }

    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    /// std_dev as a percentage of the mean, undefined for a zero mean
    pub fn coefficient_of_variation(&self) -> Option<f64> {
        match self.mean {
            m if m == 0.0 => None,
            m => Some(self.std_dev / m * 100.0),
        }
    }

    pub fn aggregate_gap(&self) -> f64 {
        self.mean - self.target
    }

    pub fn aggregate_pct_above_target(&self) -> f64 {
        self.aggregate_gap() / self.target * 100.0
    }

    // rows is never empty once computed
    pub fn first(&self) -> &Row {
        &self.rows[0]
    }

    pub fn last(&self) -> &Row {
        &self.rows[self.rows.len() - 1]
    }

    pub fn trend(&self) -> Trend {
        let steps = self
            .rows
            .windows(2)
            .map(|w| w[1].value - w[0].value)
            .collect::<Vec<f64>>();

        let up = steps.iter().any(|s| *s > 0.0);
        let down = steps.iter().any(|s| *s < 0.0);

        match (up, down) {
            (true, false) => Trend::Rising,
            (false, true) => Trend::Falling,
            (false, false) => Trend::Flat,
            (true, true) => Trend::Mixed,
        }
    }
}
