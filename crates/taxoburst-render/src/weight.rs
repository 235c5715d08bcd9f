//! Angular weights: each node's share of the full circle.

use crate::hierarchy::Hierarchy;
use crate::{Error, LayoutError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const WEIGHT_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeightingPolicy {
    /// Every node splits its weight equally among its children, regardless of subtree size.
    /// Small categories stay readable.
    #[default]
    EqualSplit,
    /// Weight proportional to the number of leaf items below each node. A childless category or
    /// subcategory counts as one leaf.
    Proportional,
}

impl WeightingPolicy {
    pub fn name(self) -> &'static str {
        match self {
            Self::EqualSplit => "equal-split",
            Self::Proportional => "proportional",
        }
    }
}

impl FromStr for WeightingPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "equal-split" | "equal" => Ok(Self::EqualSplit),
            "proportional" => Ok(Self::Proportional),
            other => Err(Error::InvalidConfig {
                message: format!(
                    "unknown weighting policy `{other}` (expected `equal-split` or `proportional`)"
                ),
            }),
        }
    }
}

/// Sets `weight` on every node. The root gets 1; children divide their parent's weight.
pub fn assign_weights(h: &mut Hierarchy, policy: WeightingPolicy) {
    if h.is_empty() {
        return;
    }

    let leaf_units = match policy {
        WeightingPolicy::EqualSplit => Vec::new(),
        WeightingPolicy::Proportional => leaf_units(h),
    };

    h.node_mut(Hierarchy::ROOT).weight = 1.0;
    // Pre-order storage: a parent's weight is final before its children are visited.
    for idx in 0..h.len() {
        let parent_weight = h.node(idx).weight;
        let children = h.node(idx).children.clone();
        if children.is_empty() {
            continue;
        }
        match policy {
            WeightingPolicy::EqualSplit => {
                let share = parent_weight / children.len() as f64;
                for c in children {
                    h.node_mut(c).weight = share;
                }
            }
            WeightingPolicy::Proportional => {
                let total = leaf_units[idx] as f64;
                for c in children {
                    h.node_mut(c).weight = parent_weight * leaf_units[c] as f64 / total;
                }
            }
        }
    }
}

fn leaf_units(h: &Hierarchy) -> Vec<usize> {
    let mut units = vec![0usize; h.len()];
    // Reverse pre-order visits children before parents.
    for idx in (0..h.len()).rev() {
        let node = h.node(idx);
        units[idx] = if node.is_leaf() {
            1
        } else {
            node.children.iter().map(|&c| units[c]).sum()
        };
    }
    units
}

/// Checks that every weight lies in `(0, 1]` and that children sum to their parent.
pub fn verify_weights(h: &Hierarchy) -> Result<(), LayoutError> {
    for node in h.nodes() {
        if !(node.weight > 0.0 && node.weight <= 1.0 + WEIGHT_TOLERANCE) {
            return Err(LayoutError::WeightInvariant {
                node: node.key.path_display(),
                sum: node.weight,
                expected: node.weight.clamp(f64::MIN_POSITIVE, 1.0),
            });
        }
        if node.is_leaf() {
            continue;
        }
        let sum: f64 = node.children.iter().map(|&c| h.node(c).weight).sum();
        if (sum - node.weight).abs() > WEIGHT_TOLERANCE {
            return Err(LayoutError::WeightInvariant {
                node: node.key.path_display(),
                sum,
                expected: node.weight,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use taxoburst_core::{NodeKey, RawRecord, TreeBuilder};

    fn hierarchy(rows: &[(&str, &str, &str)]) -> Hierarchy {
        let records: Vec<RawRecord> = rows
            .iter()
            .map(|(c, s, i)| RawRecord {
                category: Some(c.to_string()),
                subcategory: Some(s.to_string()),
                item: Some(i.to_string()),
                example: None,
                frameworks: Default::default(),
            })
            .collect();
        Hierarchy::build(&TreeBuilder::new().build(records).unwrap())
    }

    fn weight_of(h: &Hierarchy, key: &NodeKey) -> f64 {
        h.node(h.index_of(key).unwrap()).weight
    }

    const ROWS: &[(&str, &str, &str)] = &[
        ("A", "a1", "x"),
        ("A", "a1", "y"),
        ("A", "a1", "z"),
        ("A", "a2", "u"),
        ("B", "b1", "v"),
    ];

    #[test]
    fn equal_split_ignores_subtree_size() {
        let mut h = hierarchy(ROWS);
        assign_weights(&mut h, WeightingPolicy::EqualSplit);
        verify_weights(&h).unwrap();

        assert_eq!(weight_of(&h, &NodeKey::category("A")), 0.5);
        assert_eq!(weight_of(&h, &NodeKey::category("B")), 0.5);
        assert_eq!(weight_of(&h, &NodeKey::subcategory("A", "a2")), 0.25);
        let x = weight_of(&h, &NodeKey::item("A", "a1", "x"));
        assert!((x - 0.25 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn proportional_follows_leaf_counts() {
        let mut h = hierarchy(ROWS);
        assign_weights(&mut h, WeightingPolicy::Proportional);
        verify_weights(&h).unwrap();

        assert!((weight_of(&h, &NodeKey::category("A")) - 0.8).abs() < 1e-12);
        assert!((weight_of(&h, &NodeKey::category("B")) - 0.2).abs() < 1e-12);
        for node in h.nodes().iter().filter(|n| n.depth == 3) {
            assert!((node.weight - 0.2).abs() < 1e-12);
        }
    }

    #[test]
    fn verify_reports_broken_sums() {
        let mut h = hierarchy(ROWS);
        assign_weights(&mut h, WeightingPolicy::EqualSplit);
        let b = h.index_of(&NodeKey::category("B")).unwrap();
        h.node_mut(b).weight = 0.4;
        let err = verify_weights(&h).unwrap_err();
        assert!(matches!(err, LayoutError::WeightInvariant { .. }));
    }

    #[test]
    fn policy_names_parse() {
        assert_eq!(
            "equal-split".parse::<WeightingPolicy>().unwrap(),
            WeightingPolicy::EqualSplit
        );
        assert_eq!(
            "proportional".parse::<WeightingPolicy>().unwrap(),
            WeightingPolicy::Proportional
        );
        assert!("size".parse::<WeightingPolicy>().is_err());
        assert_eq!(WeightingPolicy::Proportional.name(), "proportional");
    }
}
