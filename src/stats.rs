use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Request envelope, `{"text": "..."}`. A missing field and `null` both
/// deserialize to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    #[serde(default)]
    pub text: Option<String>,
}

impl AnalysisRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }
}

/// Token occurrence counts, iterated in order of first occurrence.
///
/// Each distinct token is allocated once and shared between the ordered
/// entries and the lookup index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    entries: Vec<(Arc<str>, usize)>,
    index: HashMap<Arc<str>, usize>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, token: &str) {
        self.add(token, 1);
    }

    fn add(&mut self, token: &str, count: usize) {
        match self.index.get(token) {
            Some(&slot) => self.entries[slot].1 += count,
            None => {
                let token: Arc<str> = Arc::from(token);
                self.index.insert(Arc::clone(&token), self.entries.len());
                self.entries.push((token, count));
            }
        }
    }

    pub fn get(&self, token: &str) -> Option<usize> {
        self.index.get(token).map(|&slot| self.entries[slot].1)
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.entries
            .iter()
            .map(|(token, count)| (token.as_ref(), *count))
    }

    /// Most frequent tokens first. Ties keep first-occurrence order since the
    /// sort is stable.
    pub fn top(&self, n: usize) -> Vec<(&str, usize)> {
        let mut sorted: Vec<(&str, usize)> = self.iter().collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted.truncate(n);
        sorted
    }

    /// Least frequent tokens first.
    pub fn bottom(&self, n: usize) -> Vec<(&str, usize)> {
        let mut sorted: Vec<(&str, usize)> = self.iter().collect();
        sorted.sort_by(|a, b| a.1.cmp(&b.1));
        sorted.truncate(n);
        sorted
    }

    /// Adds `other`'s counts; tokens unseen so far are appended in `other`'s order.
    pub fn merge(&mut self, other: &FrequencyTable) {
        for (token, count) in other.iter() {
            self.add(token, count);
        }
    }
}

impl Serialize for FrequencyTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// Elapsed analysis time, rendered as milliseconds with two decimals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct ProcessingTime(Duration);

impl ProcessingTime {
    pub fn as_millis_f64(&self) -> f64 {
        self.0.as_secs_f64() * 1000.0
    }
}

impl From<Duration> for ProcessingTime {
    fn from(duration: Duration) -> Self {
        Self(duration)
    }
}

impl std::ops::Add for ProcessingTime {
    type Output = ProcessingTime;

    fn add(self, rhs: ProcessingTime) -> ProcessingTime {
        ProcessingTime(self.0 + rhs.0)
    }
}

impl fmt::Display for ProcessingTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}ms", self.as_millis_f64())
    }
}

impl Serialize for ProcessingTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    #[serde(rename = "architecture")]
    pub runtime_tag: String,
    pub word_count: usize,
    pub emails: Vec<String>,
    pub word_frequency: FrequencyTable,
    pub processing_time: ProcessingTime,
}

impl AnalysisResult {
    pub fn processing_time_ms(&self) -> f64 {
        self.processing_time.as_millis_f64()
    }
}
