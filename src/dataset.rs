use crate::report::Observation;
use serde::Deserialize;
use serde_json::from_reader;
use thiserror::Error;

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

pub const DEFAULT_NAME: &str = "Financial Services CAC Analysis - 2024";
pub const DEFAULT_METRIC: &str = "CAC";
pub const DEFAULT_DESCRIPTION: &str = "Customer Acquisition Cost";
pub const DEFAULT_PERIOD: &str = "2024";
pub const DEFAULT_TARGET: f64 = 150.0;

const QUARTERS: [(&str, f64); 4] = [
    ("Q1 2024", 225.6),
    ("Q2 2024", 228.97),
    ("Q3 2024", 234.24),
    ("Q4 2024", 234.71),
];

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("could not read dataset: {0}")]
    Io(#[from] io::Error),
    #[error("malformed dataset: {0}")]
    Parse(#[from] serde_json::Error),
}

/// the observations under analysis along with the target they are held to
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Dataset {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_metric")]
    pub metric: String,
    #[serde(default = "default_description")]
    pub description: String,
    #[serde(default = "default_period")]
    pub period: String,
    #[serde(default = "default_target")]
    pub target: f64,
    pub observations: Vec<Observation>,
}

fn default_name() -> String {
    String::from(DEFAULT_NAME)
}

fn default_metric() -> String {
    String::from(DEFAULT_METRIC)
}

fn default_description() -> String {
    String::from(DEFAULT_DESCRIPTION)
}

fn default_period() -> String {
    String::from(DEFAULT_PERIOD)
}

fn default_target() -> f64 {
    DEFAULT_TARGET
}

impl Default for Dataset {
    fn default() -> Self {
        Self {
            name: default_name(),
            metric: default_metric(),
            description: default_description(),
            period: default_period(),
            target: DEFAULT_TARGET,
            observations: QUARTERS
                .iter()
                .map(|(label, value)| Observation::new(*label, *value))
                .collect(),
        }
    }
}

impl Dataset {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let dataset = from_reader(reader)?;

        Ok(dataset)
    }

    /// lower-cased metric, used as the prefix of written file names
    pub fn slug(&self) -> String {
        self.metric
            .to_lowercase()
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '_' })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_quarterly_cac() {
        let dataset = Dataset::default();

        assert_eq!(dataset.target, 150.0);
        assert_eq!(dataset.metric, "CAC");
        assert_eq!(dataset.observations.len(), 4);
        assert_eq!(dataset.observations[0], Observation::new("Q1 2024", 225.6));
        assert_eq!(dataset.observations[3], Observation::new("Q4 2024", 234.71));
        assert_eq!(dataset.slug(), "cac");
    }

    #[test]
    fn test_from_reader_fills_defaults() {
        let json = r#"{"observations": [{"label": "Jan", "value": 120.5}]}"#;
        let dataset = Dataset::from_reader(json.as_bytes()).unwrap();

        assert_eq!(dataset.name, DEFAULT_NAME);
        assert_eq!(dataset.metric, "CAC");
        assert_eq!(dataset.period, "2024");
        assert_eq!(dataset.target, 150.0);
        assert_eq!(dataset.observations, vec![Observation::new("Jan", 120.5)]);
    }

    #[test]
    fn test_from_reader_overrides() {
        let json = r#"{
            "name": "Retail",
            "metric": "Cost Per Lead",
            "target": 40,
            "observations": [{"label": "H1", "value": 52.0}, {"label": "H2", "value": 47.25}]
        }"#;
        let dataset = Dataset::from_reader(json.as_bytes()).unwrap();

        assert_eq!(dataset.name, "Retail");
        assert_eq!(dataset.target, 40.0);
        assert_eq!(dataset.observations.len(), 2);
        assert_eq!(dataset.slug(), "cost_per_lead");
    }

    #[test]
    fn test_malformed_dataset() {
        let err = Dataset::from_reader("{\"target\": 1}".as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::Parse(_)));

        let err = Dataset::from_path("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, DatasetError::Io(_)));
    }
}
