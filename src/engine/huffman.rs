use std::collections::BTreeMap;

use serde::Serialize;

use crate::engine::error::{EngineError, EngineResult};
use crate::engine::frequency::SymbolFrequency;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HuffmanNode {
    pub weight: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<Box<HuffmanNode>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<Box<HuffmanNode>>,
}

/// One leaf as seen from the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LeafInfo {
    pub symbol: u8,
    pub weight: usize,
    pub depth: usize,
}

impl HuffmanNode {
    pub fn leaf(pair: SymbolFrequency) -> Self {
        Self {
            weight: pair.count,
            symbol: Some(pair.symbol),
            left: None,
            right: None,
        }
    }

    /// Parent of two subtrees; `left` is the one extracted first.
    /// Fails if the combined weight does not fit in a `usize`.
    pub fn merge(left: HuffmanNode, right: HuffmanNode) -> EngineResult<Self> {
        let weight = left.weight.checked_add(right.weight).ok_or_else(|| {
            EngineError::InvalidArgument(format!(
                "merged weight {} + {} overflows",
                left.weight, right.weight
            ))
        })?;

        Ok(Self {
            weight,
            symbol: None,
            left: Some(Box::new(left)),
            right: Some(Box::new(right)),
        })
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Leaves in depth-first order, left before right.
    pub fn leaves(&self) -> Vec<LeafInfo> {
        fn walk(node: &HuffmanNode, depth: usize, out: &mut Vec<LeafInfo>) {
            if let Some(symbol) = node.symbol {
                out.push(LeafInfo { symbol, weight: node.weight, depth });
                return;
            }
            if let Some(ref left) = node.left {
                walk(left, depth + 1, out);
            }
            if let Some(ref right) = node.right {
                walk(right, depth + 1, out);
            }
        }

        let mut out = Vec::new();
        walk(self, 0, &mut out);
        out
    }

    pub fn node_count(&self) -> usize {
        1 + self.left.as_ref().map_or(0, |n| n.node_count())
            + self.right.as_ref().map_or(0, |n| n.node_count())
    }

    pub fn height(&self) -> usize {
        let left = self.left.as_ref().map_or(0, |n| n.height() + 1);
        let right = self.right.as_ref().map_or(0, |n| n.height() + 1);
        left.max(right)
    }

    /// Prefix code of every leaf: `false` for a left step, `true` for a right step.
    /// A lone leaf gets the single bit `0`.
    pub fn code_table(&self) -> BTreeMap<u8, Vec<bool>> {
        fn build_codes(node: &HuffmanNode, code: Vec<bool>, table: &mut BTreeMap<u8, Vec<bool>>) {
            if let Some(symbol) = node.symbol {
                table.insert(symbol, if code.is_empty() { vec![false] } else { code });
            } else {
                if let Some(ref left) = node.left {
                    let mut left_code = code.clone();
                    left_code.push(false);
                    build_codes(left, left_code, table);
                }
                if let Some(ref right) = node.right {
                    let mut right_code = code;
                    right_code.push(true);
                    build_codes(right, right_code, table);
                }
            }
        }

        let mut table = BTreeMap::new();
        build_codes(self, Vec::new(), &mut table);
        table
    }

    /// Bits needed to encode the source text with this tree's codes.
    pub fn weighted_path_length(&self) -> usize {
        self.leaves()
            .iter()
            .map(|leaf| leaf.weight * leaf.depth.max(1))
            .sum()
    }
}

pub fn code_to_string(code: &[bool]) -> String {
    code.iter().map(|&bit| if bit { '1' } else { '0' }).collect()
}
