//! One-dimensional clustering of coordinates.
//!
//! Tables in the item stream carry no explicit structure, so rows and
//! columns are recovered from the distribution of fragment coordinates.
//! This module provides the classifiers the table strategies build on:
//!
//! - [`ColumnClassifier`]: contiguous clustering into an expected number of groups
//! - [`FloorClassifier`]: evenly spaced buckets between the minimum and maximum
//! - [`nearest_anchor`]: nearest reference position, scanning left to right
//! - [`floor_boundary`]: rightmost boundary not exceeding a position

/// Contiguous clustering of values, given the expected number of clusters.
///
/// Values are sorted, then a new cluster starts whenever a value lies more
/// than half an even-spacing step (`(max - min) / nb_clusters / 2`) away
/// from the first value of the current cluster.
///
/// # Examples
///
/// ```
/// use pdf_rules::layout::ColumnClassifier;
///
/// let classifier = ColumnClassifier::cluster(&[1.0, 2.0, 3.0, 10.0, 11.0, 12.0], 2);
/// assert_eq!(classifier.clusters().len(), 2);
///
/// let classify = classifier.classifier();
/// assert_eq!(classify.classify(2.5), Some(0));
/// assert_eq!(classify.classify(10.5), Some(1));
/// assert_eq!(classify.classify(99.0), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ColumnClassifier {
    clusters: Vec<Vec<f32>>,
}

impl ColumnClassifier {
    /// Cluster `values` into (approximately) `nb_clusters` groups.
    ///
    /// The number of clusters produced depends on the gaps in the data and
    /// may differ from `nb_clusters`. An empty input produces no cluster.
    pub fn cluster(values: &[f32], nb_clusters: usize) -> Self {
        let mut sorted = values.to_vec();
        sorted.sort_by(f32::total_cmp);

        let (first, last) = match (sorted.first(), sorted.last()) {
            (Some(&first), Some(&last)) => (first, last),
            _ => return Self::default(),
        };

        let delta = (last - first) / nb_clusters.max(1) as f32;
        let threshold = delta / 2.0;

        let mut clusters = Vec::new();
        let mut current = Vec::new();
        let mut start = first;
        for value in sorted {
            if (value - start).abs() > threshold {
                clusters.push(std::mem::take(&mut current));
                start = value;
            }
            current.push(value);
        }
        clusters.push(current);

        Self { clusters }
    }

    /// The clusters, in ascending order of their values.
    pub fn clusters(&self) -> &[Vec<f32>] {
        &self.clusters
    }

    /// Build a classifier from the maximum of each cluster.
    pub fn classifier(&self) -> MaxClassifier {
        let maxima = self
            .clusters
            .iter()
            .filter_map(|cluster| cluster.iter().copied().reduce(f32::max))
            .collect();
        MaxClassifier { maxima }
    }
}

/// Assigns a value to the first cluster whose maximum is at least the value.
#[derive(Debug, Clone, PartialEq)]
pub struct MaxClassifier {
    maxima: Vec<f32>,
}

impl MaxClassifier {
    /// Cluster index of `value`, or `None` if it exceeds every cluster.
    pub fn classify(&self, value: f32) -> Option<usize> {
        self.maxima.iter().position(|&max| value <= max)
    }

    /// Upper boundary of each cluster.
    pub fn maxima(&self) -> &[f32] {
        &self.maxima
    }

    /// Number of clusters.
    pub fn len(&self) -> usize {
        self.maxima.len()
    }

    /// Whether the classifier has no cluster.
    pub fn is_empty(&self) -> bool {
        self.maxima.is_empty()
    }
}

/// Evenly spaced buckets between the minimum and maximum of a sample.
///
/// `bucket = floor(buckets * (value - min_adjusted) / range)`, where
/// `min_adjusted` is the sample minimum shifted down by `offset` bucket
/// widths so that values sitting on a boundary land in a stable bucket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloorClassifier {
    min: f32,
    range: f32,
    buckets: usize,
}

impl FloorClassifier {
    /// Build the classifier from a sample, or `None` if the sample is empty.
    pub fn new(values: &[f32], buckets: usize, offset: f32) -> Option<Self> {
        let min = values.iter().copied().reduce(f32::min)?;
        let max = values.iter().copied().reduce(f32::max)?;
        let buckets = buckets.max(1);
        let range = max - min;
        Some(Self {
            min: min - range / buckets as f32 * offset,
            range,
            buckets,
        })
    }

    /// Bucket index of `value`.
    ///
    /// A degenerate sample (all values equal) puts everything in bucket 0.
    pub fn classify(&self, value: f32) -> usize {
        if self.range <= 0.0 || !self.range.is_finite() {
            return 0;
        }
        let bucket = (self.buckets as f32 * (value - self.min) / self.range).floor();
        if bucket.is_finite() && bucket > 0.0 {
            bucket as usize
        } else {
            0
        }
    }
}

/// Index of the anchor nearest to `x`.
///
/// Anchors are scanned in order and the scan stops as soon as the distance
/// stops decreasing, so anchors must be sorted left to right for the result
/// to be the true nearest one. Ties go to the first anchor encountered, so
/// a fragment exactly halfway between two headers lands in the left column
/// rather than the right one.
pub fn nearest_anchor(anchors: &[f32], x: f32) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (index, &anchor) in anchors.iter().enumerate() {
        let distance = (x - anchor).abs();
        match best {
            Some((_, best_distance)) if distance >= best_distance => break,
            _ => best = Some((index, distance)),
        }
    }
    best.map(|(index, _)| index)
}

/// Index of the rightmost boundary that does not exceed `x`.
///
/// `boundaries` are left positions; the scan runs from the last one
/// backwards, so they are expected in ascending order.
pub fn floor_boundary(boundaries: &[f32], x: f32) -> Option<usize> {
    boundaries.iter().rposition(|&boundary| boundary <= x)
}
