use std::sync::Arc;

use crate::common::types::{Sample, Timestamp};
use crate::common::LabelSet;

/// Single-pass cursor over a series' samples in ascending timestamp order.
///
/// The cursor starts before the first sample; call [`SeriesIterator::advance`] or
/// [`SeriesIterator::seek`] before reading with [`SeriesIterator::at`]. Once either returns
/// false the iterator is exhausted and stays that way.
#[derive(Debug, Clone)]
pub struct SeriesIterator {
    samples: Arc<[Sample]>,
    cur: Option<usize>,
    exhausted: bool,
}

impl SeriesIterator {
    pub fn new(samples: Arc<[Sample]>) -> Self {
        SeriesIterator {
            samples,
            cur: None,
            exhausted: false,
        }
    }

    pub fn empty() -> Self {
        Self::new(Arc::from(Vec::new()))
    }

    /// moves to the next sample. Returns false when there is none.
    pub fn advance(&mut self) -> bool {
        if self.exhausted {
            return false;
        }
        let next = self.cur.map_or(0, |i| i + 1);
        if next < self.samples.len() {
            self.cur = Some(next);
            true
        } else {
            self.exhausted = true;
            false
        }
    }

    /// returns the current sample, or None before the first advance and after exhaustion.
    pub fn at(&self) -> Option<Sample> {
        if self.exhausted {
            return None;
        }
        self.cur.map(|i| self.samples[i])
    }

    /// moves to the first sample with a timestamp >= `ts`. The cursor never moves backwards:
    /// if the current sample already satisfies the bound it stays put.
    pub fn seek(&mut self, ts: Timestamp) -> bool {
        if self.exhausted {
            return false;
        }
        let from = match self.cur {
            Some(i) if self.samples[i].timestamp >= ts => return true,
            Some(i) => i + 1,
            None => 0,
        };
        let idx = from + self.samples[from..].partition_point(|s| s.timestamp < ts);
        if idx < self.samples.len() {
            self.cur = Some(idx);
            true
        } else {
            self.exhausted = true;
            false
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}

impl Iterator for SeriesIterator {
    type Item = Sample;

    fn next(&mut self) -> Option<Self::Item> {
        if self.advance() {
            self.at()
        } else {
            None
        }
    }
}

/// A labelled series whose samples can be iterated any number of times.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    labels: LabelSet,
    samples: Arc<[Sample]>,
}

impl Series {
    pub fn new(labels: LabelSet, samples: Vec<Sample>) -> Self {
        Series {
            labels,
            samples: Arc::from(samples),
        }
    }

    /// a series that exists only for its label identity.
    pub fn labels_only(labels: LabelSet) -> Self {
        Self::new(labels, vec![])
    }

    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    /// returns a fresh iterator positioned before the first sample.
    pub fn iterator(&self) -> SeriesIterator {
        SeriesIterator::new(self.samples.clone())
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Ordered collection of series returned by a select call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesSet {
    series: Vec<Series>,
}

impl SeriesSet {
    pub fn new(series: Vec<Series>) -> Self {
        SeriesSet { series }
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Series> {
        self.series.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Series> {
        self.series.iter()
    }
}

impl IntoIterator for SeriesSet {
    type Item = Series;
    type IntoIter = std::vec::IntoIter<Series>;

    fn into_iter(self) -> Self::IntoIter {
        self.series.into_iter()
    }
}

impl<'a> IntoIterator for &'a SeriesSet {
    type Item = &'a Series;
    type IntoIter = std::slice::Iter<'a, Series>;

    fn into_iter(self) -> Self::IntoIter {
        self.series.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples(timestamps: &[i64]) -> Vec<Sample> {
        timestamps.iter().map(|&t| Sample::new(t, t as f64 * 10.0)).collect()
    }

    fn series(timestamps: &[i64]) -> Series {
        Series::new([("job", "api")].into(), samples(timestamps))
    }

    #[test]
    fn advance_and_at() {
        let s = series(&[1, 2, 3]);
        let mut it = s.iterator();
        assert_eq!(it.at(), None);
        assert!(it.advance());
        assert_eq!(it.at(), Some(Sample::new(1, 10.0)));
        assert!(it.advance());
        assert!(it.advance());
        assert_eq!(it.at(), Some(Sample::new(3, 30.0)));
        assert!(!it.advance());
        assert!(it.is_exhausted());
        assert_eq!(it.at(), None);
        // terminal
        assert!(!it.advance());
        assert!(!it.seek(0));
    }

    #[test]
    fn empty_iterator() {
        let mut it = Series::labels_only([("job", "api")].into()).iterator();
        assert!(!it.advance());
        assert_eq!(it.at(), None);
        assert_eq!(SeriesIterator::empty().next(), None);
    }

    #[test]
    fn seek_finds_first_at_or_after() {
        let s = series(&[10, 20, 30, 40]);
        let mut it = s.iterator();
        assert!(it.seek(15));
        assert_eq!(it.at().map(|s| s.timestamp), Some(20));
        assert!(it.seek(20));
        assert_eq!(it.at().map(|s| s.timestamp), Some(20));
        assert!(it.seek(40));
        assert_eq!(it.at().map(|s| s.timestamp), Some(40));
        assert!(!it.seek(41));
        assert!(it.is_exhausted());
    }

    #[test]
    fn seek_never_moves_backwards() {
        let s = series(&[10, 20, 30]);
        let mut it = s.iterator();
        assert!(it.seek(30));
        assert!(it.seek(5));
        assert_eq!(it.at().map(|s| s.timestamp), Some(30));
        assert!(!it.advance());
    }

    #[test]
    fn seek_then_advance() {
        let s = series(&[10, 20, 30]);
        let mut it = s.iterator();
        assert!(it.seek(0));
        assert_eq!(it.at().map(|s| s.timestamp), Some(10));
        assert!(it.advance());
        assert_eq!(it.at().map(|s| s.timestamp), Some(20));
    }

    #[test]
    fn each_iterator_is_independent() {
        let s = series(&[1, 2]);
        let mut first = s.iterator();
        first.advance();
        first.advance();
        let second: Vec<i64> = s.iterator().map(|s| s.timestamp).collect();
        assert_eq!(second, vec![1, 2]);
        assert_eq!(first.at().map(|s| s.timestamp), Some(2));
    }

    #[test]
    fn series_set_preserves_order() {
        let set = SeriesSet::new(vec![
            Series::labels_only([("instance", "b")].into()),
            Series::labels_only([("instance", "a")].into()),
        ]);
        assert_eq!(set.len(), 2);
        let instances: Vec<&str> = set
            .iter()
            .filter_map(|s| s.labels().get("instance"))
            .collect();
        assert_eq!(instances, vec!["b", "a"]);
        assert_eq!(set.get(1).and_then(|s| s.labels().get("instance")), Some("a"));
        assert!(SeriesSet::default().is_empty());
    }
}
