use serde::Serialize;
use tracing::{debug, trace};

use crate::engine::error::{EngineError, EngineResult};
use crate::engine::frequency::FrequencyTable;
use crate::engine::huffman::HuffmanNode;
use crate::engine::pool::NodePool;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReductionStage {
    Seeding,
    Reducing,
    Done,
}

/// Record of a single merge. `left` was extracted first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Merge {
    pub left_weight: usize,
    pub left_symbol: Option<u8>,
    pub right_weight: usize,
    pub right_symbol: Option<u8>,
    pub weight: usize,
}

/// Greedy reduction of a pool down to one Huffman tree.
///
/// Each [`step`](Reduction::step) removes the two lowest-weight roots and puts
/// their parent back, so a pool of `n` roots finishes after `n - 1` steps.
#[derive(Debug)]
pub struct Reduction {
    pool: NodePool,
    stage: ReductionStage,
    merges: usize,
}

impl Reduction {
    /// A reduction waiting for its leaves. See [`seed`](Reduction::seed).
    pub fn seeding() -> Self {
        Self {
            pool: NodePool::new(),
            stage: ReductionStage::Seeding,
            merges: 0,
        }
    }

    /// Starts from a pool that is already seeded.
    pub fn new(pool: NodePool) -> EngineResult<Self> {
        if pool.is_empty() {
            return Err(EngineError::EmptyInput);
        }

        let mut reduction = Self {
            pool,
            stage: ReductionStage::Seeding,
            merges: 0,
        };
        reduction.start();
        Ok(reduction)
    }

    /// Fills the pool with one leaf per entry and leaves the seeding stage.
    /// A failed seed keeps the reduction in [`ReductionStage::Seeding`].
    pub fn seed(&mut self, frequencies: &FrequencyTable) -> EngineResult<()> {
        if self.stage != ReductionStage::Seeding {
            return Err(EngineError::InvalidArgument("reduction is already seeded".into()));
        }

        self.pool = NodePool::seed(frequencies)?;
        self.start();
        Ok(())
    }

    fn start(&mut self) {
        self.stage = if self.pool.len() == 1 {
            ReductionStage::Done
        } else {
            ReductionStage::Reducing
        };
        debug!("reducing {} roots", self.pool.len());
    }

    pub fn stage(&self) -> ReductionStage {
        self.stage
    }

    pub fn remaining(&self) -> usize {
        self.pool.len()
    }

    pub fn merges(&self) -> usize {
        self.merges
    }

    /// Performs one merge. Returns `None` once the reduction is done.
    pub fn step(&mut self) -> EngineResult<Option<Merge>> {
        if self.stage != ReductionStage::Reducing {
            return Ok(None);
        }

        match self.merge_lowest() {
            Ok(merge) => {
                self.merges += 1;
                if self.pool.len() == 1 {
                    self.stage = ReductionStage::Done;
                }
                Ok(Some(merge))
            }
            Err(e) => {
                self.pool.teardown();
                self.stage = ReductionStage::Done;
                Err(e)
            }
        }
    }

    fn merge_lowest(&mut self) -> EngineResult<Merge> {
        let left = self.pool.extract_minimum()?;
        let right = self.pool.extract_minimum()?;

        let (left_weight, left_symbol) = (left.weight, left.symbol);
        let (right_weight, right_symbol) = (right.weight, right.symbol);
        let parent = HuffmanNode::merge(left, right)?;

        let merge = Merge {
            left_weight,
            left_symbol,
            right_weight,
            right_symbol,
            weight: parent.weight,
        };
        trace!("merge {} + {} -> {}", merge.left_weight, merge.right_weight, merge.weight);

        self.pool.insert(parent)?;
        Ok(merge)
    }

    /// Runs any remaining merges and hands over the root.
    pub fn finish(mut self) -> EngineResult<HuffmanNode> {
        while self.step()?.is_some() {}

        let root = self.pool.extract_minimum()?;
        debug!("reduction done after {} merges, root weight {}", self.merges, root.weight);
        Ok(root)
    }
}

pub fn reduce(pool: NodePool) -> EngineResult<HuffmanNode> {
    Reduction::new(pool)?.finish()
}
