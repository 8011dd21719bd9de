//! Font cluster analysis.
//!
//! A document's font sizes are reduced to at most a handful of
//! representative values, largest first. Rank 0 stands for the most
//! prominent heading level. The policy that built a [`FontClusterSet`]
//! travels with it, so size lookups always use the matching rule of the
//! policy that produced the values.

use std::cmp::Ordering;
use std::collections::HashMap;

use super::options::{ClusterPolicy, OutlineOptions};
use crate::model::Document;

/// Representative font sizes for one document, in descending order.
#[derive(Debug, Clone, PartialEq)]
pub struct FontClusterSet {
    values: Vec<f32>,
    policy: ClusterPolicy,
    /// Relative tolerance used to map a size onto a rank
    rank_tolerance: f32,
    /// Relative tolerance used for "size matches a cluster value"
    match_tolerance: f32,
}

impl FontClusterSet {
    /// Build the cluster set for a multiset of observed font sizes.
    ///
    /// Non-finite and non-positive sizes are ignored. No usable sizes yield an
    /// empty set.
    pub fn analyze(sizes: &[f32], options: &OutlineOptions) -> Self {
        let mut sorted: Vec<f32> = sizes
            .iter()
            .copied()
            .filter(|s| s.is_finite() && *s > 0.0)
            .collect();
        sorted.sort_by(|a, b| b.partial_cmp(a).unwrap_or(Ordering::Equal));

        let mut values = match options.cluster_policy {
            ClusterPolicy::Tolerance => group_by_tolerance(&sorted, options.cluster_tolerance),
            ClusterPolicy::TopDistinct => distinct_sizes(&sorted),
        };
        values.truncate(options.max_clusters);

        let rank_tolerance = match options.cluster_policy {
            ClusterPolicy::Tolerance => options.cluster_tolerance,
            ClusterPolicy::TopDistinct => options.size_match_tolerance,
        };

        log::debug!(
            "Font clusters ({:?}) from {} sizes: {:?}",
            options.cluster_policy,
            sorted.len(),
            values
        );

        Self {
            values,
            policy: options.cluster_policy,
            rank_tolerance,
            match_tolerance: options.size_match_tolerance,
        }
    }

    /// Cluster values, largest first.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Policy that produced this set.
    pub fn policy(&self) -> ClusterPolicy {
        self.policy
    }

    /// Check if no sizes were observed.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of cluster values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// The largest cluster value.
    pub fn largest(&self) -> Option<f32> {
        self.values.first().copied()
    }

    /// Whether `size` is (nearly) equal to one of the cluster values.
    pub fn matches(&self, size: f32) -> bool {
        self.values
            .iter()
            .any(|&value| relative_diff(size, value) <= self.match_tolerance)
    }

    /// Rank of the first cluster within tolerance of `size`. Sizes that match
    /// no cluster rank one past the last cluster.
    pub fn rank_of(&self, size: f32) -> usize {
        self.values
            .iter()
            .position(|&value| relative_diff(size, value) < self.rank_tolerance)
            .unwrap_or(self.values.len())
    }
}

/// Median font size of each page, keyed by page number. Pages without
/// usable sizes are left out.
pub fn page_median_sizes(doc: &Document) -> HashMap<u32, f32> {
    doc.pages
        .iter()
        .filter_map(|page| {
            let sizes: Vec<f32> = page.spans.iter().map(|span| span.font_size).collect();
            median_size(&sizes).map(|median| (page.number, median))
        })
        .collect()
}

/// Upper median of the usable sizes: the element at `len / 2` once sorted.
pub fn median_size(sizes: &[f32]) -> Option<f32> {
    let mut sorted: Vec<f32> = sizes
        .iter()
        .copied()
        .filter(|s| s.is_finite() && *s > 0.0)
        .collect();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    sorted.get(sorted.len() / 2).copied()
}

/// Relative difference of `size` against the reference `value`.
fn relative_diff(size: f32, value: f32) -> f32 {
    if value <= 0.0 {
        return f32::INFINITY;
    }
    (size - value).abs() / value
}

/// Group descending sizes: a size starts a new group when its relative
/// difference from the last size added to the current group exceeds
/// `tolerance`. Each group collapses to its mean.
fn group_by_tolerance(sorted_desc: &[f32], tolerance: f32) -> Vec<f32> {
    let Some((&first, rest)) = sorted_desc.split_first() else {
        return Vec::new();
    };

    let mut means = Vec::new();
    let mut sum = first;
    let mut count = 1usize;
    let mut last = first;

    for &size in rest {
        if relative_diff(size, last) > tolerance {
            means.push(sum / count as f32);
            sum = 0.0;
            count = 0;
        }
        sum += size;
        count += 1;
        last = size;
    }
    means.push(sum / count as f32);

    // Means of descending groups are already descending.
    means
}

/// Distinct sizes (rounded to 0.1pt), descending.
fn distinct_sizes(sorted_desc: &[f32]) -> Vec<f32> {
    let mut values: Vec<f32> = Vec::new();
    for &size in sorted_desc {
        let rounded = (size * 10.0).round() / 10.0;
        if values.last() != Some(&rounded) {
            values.push(rounded);
        }
    }
    values
}
