//! Request and result records exchanged with the evaluation platform.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Parameters describing what dataset and metrics to evaluate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRequest {
    pub dataset_id: String,
    /// Metric names, in the order they should be computed.
    pub metrics: Vec<String>,
    pub name: String,
    pub description: String,
    /// Owning organization; the client fills this from its config when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<u64>,
}

impl EvaluationRequest {
    /// Create a request for `dataset_id` computing `metrics`.
    pub fn new<I, S>(dataset_id: impl Into<String>, metrics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            dataset_id: dataset_id.into(),
            metrics: metrics.into_iter().map(Into::into).collect(),
            name: String::new(),
            description: String::new(),
            organization_id: None,
        }
    }

    /// Set the display name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the free-text description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Scope the request to an organization.
    pub fn organization_id(mut self, id: u64) -> Self {
        self.organization_id = Some(id);
        self
    }
}

/// Outcome of an evaluation run.
///
/// Numeric fields keep the exact JSON number the platform sent, so an
/// integer stays an integer when the result is written back out. Fields the
/// platform returns beyond the ones named here are kept in
/// [`extra`](Self::extra) so a persisted result is the complete record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Aggregate score.
    pub overall: Number,
    pub passed: Tally,
    pub failed: Tally,
    /// Mean latency in milliseconds.
    pub avg_latency: Number,
    /// Total cost in currency units.
    pub total_cost: Number,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EvaluationResult {
    /// Plain key-value mapping of every field, extras included.
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("overall".into(), Value::Number(self.overall.clone()));
        map.insert("passed".into(), Value::from(&self.passed));
        map.insert("failed".into(), Value::from(&self.failed));
        map.insert("avg_latency".into(), Value::Number(self.avg_latency.clone()));
        map.insert("total_cost".into(), Value::Number(self.total_cost.clone()));
        for (key, value) in &self.extra {
            map.entry(key.clone()).or_insert_with(|| value.clone());
        }
        map
    }
}

/// A passed/failed figure: a count, or a plain yes/no for single-case runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Tally {
    Count(Number),
    Flag(bool),
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tally::Count(n) => write!(f, "{n}"),
            Tally::Flag(b) => write!(f, "{b}"),
        }
    }
}

impl From<u64> for Tally {
    fn from(count: u64) -> Self {
        Tally::Count(count.into())
    }
}

impl From<bool> for Tally {
    fn from(flag: bool) -> Self {
        Tally::Flag(flag)
    }
}

impl From<&Tally> for Value {
    fn from(tally: &Tally) -> Self {
        match tally {
            Tally::Count(n) => Value::Number(n.clone()),
            Tally::Flag(b) => Value::Bool(*b),
        }
    }
}
