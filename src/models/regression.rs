//! Single-feature regressors backing the year-based budget projection.
//!
//! `LinearFit` is an ordinary least-squares line. `GradientBoostedTrees` is a
//! small squared-error boosting ensemble of depth-limited regression trees
//! with L2-regularised leaf weights, split on the one input feature.

use std::cmp::Ordering;

use crate::models::error::{ModelError, invalid_input};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// A single distinct x value yields a flat line through the mean.
    pub fn fit(xs: &[f64], ys: &[f64]) -> Result<Self, ModelError> {
        validate_samples(xs, ys)?;

        let mean_x = mean(xs);
        let mean_y = mean(ys);
        let (mut sxx, mut sxy) = (0.0, 0.0);
        for (x, y) in xs.iter().zip(ys) {
            let dx = x - mean_x;
            sxx += dx * dx;
            sxy += dx * (y - mean_y);
        }

        let slope = if sxx == 0.0 { 0.0 } else { sxy / sxx };
        Ok(Self {
            slope,
            intercept: mean_y - slope * mean_x,
        })
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoostingParams {
    pub rounds: usize,
    pub learning_rate: f64,
    pub max_depth: usize,
    /// L2 penalty on leaf weights.
    pub lambda: f64,
    /// Minimum number of samples (hessian sum) on each side of a split.
    pub min_child_weight: f64,
}

impl Default for BoostingParams {
    fn default() -> Self {
        Self {
            rounds: 100,
            learning_rate: 0.1,
            max_depth: 3,
            lambda: 1.0,
            min_child_weight: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum TreeNode {
    Leaf(f64),
    Split {
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

impl TreeNode {
    fn predict(&self, x: f64) -> f64 {
        match self {
            TreeNode::Leaf(weight) => *weight,
            TreeNode::Split {
                threshold,
                left,
                right,
            } => {
                if x < *threshold {
                    left.predict(x)
                } else {
                    right.predict(x)
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GradientBoostedTrees {
    base_score: f64,
    learning_rate: f64,
    trees: Vec<TreeNode>,
}

impl GradientBoostedTrees {
    pub fn fit(xs: &[f64], ys: &[f64], params: BoostingParams) -> Result<Self, ModelError> {
        validate_samples(xs, ys)?;
        if !(params.learning_rate > 0.0) || params.lambda < 0.0 {
            return Err(invalid_input(
                "boosting requires a positive learning rate and non-negative lambda",
            ));
        }

        let base_score = mean(ys);
        let mut predictions = vec![base_score; xs.len()];
        let mut order: Vec<usize> = (0..xs.len()).collect();
        order.sort_by(|a, b| xs[*a].total_cmp(&xs[*b]));

        let mut trees = Vec::with_capacity(params.rounds);
        for _ in 0..params.rounds {
            let gradients: Vec<f64> = predictions
                .iter()
                .zip(ys)
                .map(|(predicted, target)| predicted - target)
                .collect();
            let tree = grow_tree(xs, &gradients, &order, 0, &params);
            for (prediction, x) in predictions.iter_mut().zip(xs) {
                *prediction += params.learning_rate * tree.predict(*x);
            }
            trees.push(tree);
        }

        Ok(Self {
            base_score,
            learning_rate: params.learning_rate,
            trees,
        })
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.base_score
            + self.learning_rate * self.trees.iter().map(|tree| tree.predict(x)).sum::<f64>()
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }
}

struct SplitCandidate {
    position: usize,
    threshold: f64,
    gain: f64,
}

// `samples` is sorted ascending by x.
fn grow_tree(
    xs: &[f64],
    gradients: &[f64],
    samples: &[usize],
    depth: usize,
    params: &BoostingParams,
) -> TreeNode {
    let gradient_sum: f64 = samples.iter().map(|index| gradients[*index]).sum();
    let hessian_sum = samples.len() as f64;
    let leaf = TreeNode::Leaf(-gradient_sum / (hessian_sum + params.lambda));

    if depth >= params.max_depth || samples.len() < 2 {
        return leaf;
    }

    let parent_score = structure_score(gradient_sum, hessian_sum, params.lambda);
    let mut best: Option<SplitCandidate> = None;
    let mut left_gradient = 0.0;

    for position in 1..samples.len() {
        left_gradient += gradients[samples[position - 1]];
        let previous_x = xs[samples[position - 1]];
        let x = xs[samples[position]];
        if previous_x.total_cmp(&x) == Ordering::Equal {
            continue;
        }

        let left_hessian = position as f64;
        let right_hessian = hessian_sum - left_hessian;
        if left_hessian < params.min_child_weight || right_hessian < params.min_child_weight {
            continue;
        }

        let gain = 0.5
            * (structure_score(left_gradient, left_hessian, params.lambda)
                + structure_score(gradient_sum - left_gradient, right_hessian, params.lambda)
                - parent_score);
        if best.as_ref().is_none_or(|candidate| gain > candidate.gain) {
            best = Some(SplitCandidate {
                position,
                threshold: (previous_x + x) / 2.0,
                gain,
            });
        }
    }

    match best {
        Some(candidate) if candidate.gain > 0.0 => TreeNode::Split {
            threshold: candidate.threshold,
            left: Box::new(grow_tree(
                xs,
                gradients,
                &samples[..candidate.position],
                depth + 1,
                params,
            )),
            right: Box::new(grow_tree(
                xs,
                gradients,
                &samples[candidate.position..],
                depth + 1,
                params,
            )),
        },
        _ => leaf,
    }
}

fn structure_score(gradient_sum: f64, hessian_sum: f64, lambda: f64) -> f64 {
    gradient_sum * gradient_sum / (hessian_sum + lambda)
}

fn validate_samples(xs: &[f64], ys: &[f64]) -> Result<(), ModelError> {
    if xs.is_empty() {
        return Err(invalid_input("regression requires at least one sample"));
    }
    if xs.len() != ys.len() {
        return Err(invalid_input(format!(
            "regression inputs differ in length: {} features, {} targets",
            xs.len(),
            ys.len()
        )));
    }
    if xs.iter().chain(ys).any(|value| !value.is_finite()) {
        return Err(invalid_input("regression samples must be finite"));
    }
    Ok(())
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}
