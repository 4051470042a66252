//! In-memory sample database, keyed by query string.

use indexmap::IndexMap;

use crate::types::QuerySample;

/// Samples collected during one run, in first-insertion order.
///
/// Re-issuing a query overwrites its sample in place, so the analyzer sees
/// only the latest observation per query.
#[derive(Debug, Clone, Default)]
pub struct SampleStore {
    samples: IndexMap<String, QuerySample>,
}

impl SampleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the sample for its query. Returns the stored sample.
    pub fn insert(&mut self, sample: QuerySample) -> &QuerySample {
        let entry = self.samples.entry(sample.query.clone());
        match entry {
            indexmap::map::Entry::Occupied(mut occupied) => {
                occupied.insert(sample);
                occupied.into_mut()
            }
            indexmap::map::Entry::Vacant(vacant) => vacant.insert(sample),
        }
    }

    pub fn get(&self, query: &str) -> Option<&QuerySample> {
        self.samples.get(query)
    }

    pub fn contains(&self, query: &str) -> bool {
        self.samples.contains_key(query)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = &QuerySample> {
        self.samples.values()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &QuerySample)> {
        self.samples.iter().map(|(k, v)| (k.as_str(), v))
    }
}
