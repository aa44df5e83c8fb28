//! CART decision tree over binary features.
//!
//! Splits minimize weighted Gini impurity; on equal impurity the lower
//! feature index wins. Depth is unbounded: a node becomes a leaf once it is
//! pure or no feature separates its samples.

/// A fitted tree. Leaves hold a probability per class.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionTree {
    root: Node,
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Leaf {
        distribution: Vec<f64>,
    },
    Split {
        feature: usize,
        /// Samples without the feature
        absent: Box<Node>,
        /// Samples with the feature
        present: Box<Node>,
    },
}

impl DecisionTree {
    /// Fit on `samples` (one flag vector per row) labelled by class index.
    ///
    /// Callers guarantee non-empty input, equal row widths and labels below
    /// `n_classes`.
    pub fn fit(samples: &[Vec<bool>], labels: &[usize], n_classes: usize) -> Self {
        let n_features = samples.first().map_or(0, Vec::len);
        let indices: Vec<usize> = (0..samples.len()).collect();
        Self {
            root: build(samples, labels, n_classes, n_features, &indices),
        }
    }

    /// Class probabilities for one sample. Missing trailing features read as false.
    pub fn predict_proba(&self, sample: &[bool]) -> &[f64] {
        let mut node = &self.root;
        loop {
            match node {
                Node::Leaf { distribution } => return distribution,
                Node::Split {
                    feature,
                    absent,
                    present,
                } => {
                    node = if sample.get(*feature).copied().unwrap_or(false) {
                        present
                    } else {
                        absent
                    };
                }
            }
        }
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        fn count(node: &Node) -> usize {
            match node {
                Node::Leaf { .. } => 1,
                Node::Split {
                    absent, present, ..
                } => count(absent) + count(present),
            }
        }
        count(&self.root)
    }
}

fn build(
    samples: &[Vec<bool>],
    labels: &[usize],
    n_classes: usize,
    n_features: usize,
    indices: &[usize],
) -> Node {
    if gini(labels, n_classes, indices) == 0.0 {
        return leaf(labels, n_classes, indices);
    }

    let mut best: Option<(f64, usize, Vec<usize>, Vec<usize>)> = None;
    for feature in 0..n_features {
        let (present, absent): (Vec<usize>, Vec<usize>) =
            indices.iter().copied().partition(|&i| samples[i][feature]);
        if present.is_empty() || absent.is_empty() {
            continue;
        }

        let n = indices.len() as f64;
        let score = (absent.len() as f64 * gini(labels, n_classes, &absent)
            + present.len() as f64 * gini(labels, n_classes, &present))
            / n;

        if best.as_ref().map_or(true, |(best_score, ..)| score < *best_score) {
            best = Some((score, feature, absent, present));
        }
    }

    match best {
        Some((_, feature, absent, present)) => Node::Split {
            feature,
            absent: Box::new(build(samples, labels, n_classes, n_features, &absent)),
            present: Box::new(build(samples, labels, n_classes, n_features, &present)),
        },
        // Identical feature rows with different labels
        None => leaf(labels, n_classes, indices),
    }
}

fn class_counts(labels: &[usize], n_classes: usize, indices: &[usize]) -> Vec<usize> {
    let mut counts = vec![0; n_classes];
    for &i in indices {
        counts[labels[i]] += 1;
    }
    counts
}

fn gini(labels: &[usize], n_classes: usize, indices: &[usize]) -> f64 {
    if indices.is_empty() {
        return 0.0;
    }
    let n = indices.len() as f64;
    1.0 - class_counts(labels, n_classes, indices)
        .into_iter()
        .map(|c| (c as f64 / n).powi(2))
        .sum::<f64>()
}

fn leaf(labels: &[usize], n_classes: usize, indices: &[usize]) -> Node {
    let n = indices.len() as f64;
    Node::Leaf {
        distribution: class_counts(labels, n_classes, indices)
            .into_iter()
            .map(|c| c as f64 / n)
            .collect(),
    }
}
