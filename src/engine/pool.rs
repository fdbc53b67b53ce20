use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::engine::error::{EngineError, EngineResult};
use crate::engine::frequency::FrequencyTable;
use crate::engine::huffman::HuffmanNode;

/// Roots not yet merged, kept in scan order.
#[derive(Debug, Default)]
pub struct NodePool {
    roots: VecDeque<HuffmanNode>,
}

impl NodePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// One leaf per table entry, in table order.
    pub fn seed(frequencies: &FrequencyTable) -> EngineResult<Self> {
        if frequencies.is_empty() {
            return Err(EngineError::EmptyInput);
        }

        let mut roots = VecDeque::new();
        roots.try_reserve(frequencies.len())?;
        for pair in frequencies {
            roots.push_back(HuffmanNode::leaf(*pair));
        }

        debug!("seeded pool with {} leaves", roots.len());
        Ok(Self { roots })
    }

    pub fn from_text(text: &[u8]) -> EngineResult<Self> {
        let table = FrequencyTable::build(text)?;
        Self::seed(&table)
    }

    /// Places `node` at the head of the scan order.
    pub fn insert(&mut self, node: HuffmanNode) -> EngineResult<()> {
        self.roots.try_reserve(1)?;
        self.roots.push_front(node);
        Ok(())
    }

    /// Removes the lowest-weight root. Ties go to the root scanned first.
    pub fn extract_minimum(&mut self) -> EngineResult<HuffmanNode> {
        let mut lowest: Option<(usize, usize)> = None;
        for (idx, node) in self.roots.iter().enumerate() {
            match lowest {
                Some((_, weight)) if node.weight >= weight => {}
                _ => lowest = Some((idx, node.weight)),
            }
        }

        let (idx, weight) = lowest.ok_or(EngineError::EmptyInput)?;
        trace!("extracting root {} of weight {}", idx, weight);
        self.roots.remove(idx).ok_or(EngineError::EmptyInput)
    }

    pub fn teardown(&mut self) {
        if !self.roots.is_empty() {
            debug!("tearing down {} roots", self.roots.len());
        }
        self.roots.clear();
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HuffmanNode> {
        self.roots.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::frequency::SymbolFrequency;

    fn symbols(pool: &NodePool) -> Vec<Option<u8>> {
        pool.iter().map(|n| n.symbol).collect()
    }

    #[test]
    fn seed_keeps_table_order() {
        let pool = NodePool::from_text(b"xxxxyyzzzzzwww").unwrap();
        assert_eq!(symbols(&pool), vec![Some(b'x'), Some(b'y'), Some(b'z'), Some(b'w')]);
        let weights: Vec<usize> = pool.iter().map(|n| n.weight).collect();
        assert_eq!(weights, vec![4, 2, 5, 3]);
    }

    #[test]
    fn seed_rejects_empty_table() {
        let table = FrequencyTable::build(b"").unwrap();
        assert_eq!(NodePool::seed(&table).unwrap_err(), EngineError::EmptyInput);
    }

    #[test]
    fn extract_minimum_removes_lowest() {
        let mut pool = NodePool::from_text(b"xxxxyyzzzzzwww").unwrap();

        let first = pool.extract_minimum().unwrap();
        assert_eq!((first.symbol, first.weight), (Some(b'y'), 2));
        assert!(pool.iter().all(|n| n.symbol != Some(b'y')));
        assert_eq!(pool.len(), 3);

        let second = pool.extract_minimum().unwrap();
        assert_eq!((second.symbol, second.weight), (Some(b'w'), 3));
    }

    #[test]
    fn ties_go_to_first_scanned() {
        let mut pool = NodePool::from_text(b"abcabc").unwrap();
        assert_eq!(pool.extract_minimum().unwrap().symbol, Some(b'a'));
        assert_eq!(pool.extract_minimum().unwrap().symbol, Some(b'b'));
        assert_eq!(pool.extract_minimum().unwrap().symbol, Some(b'c'));
    }

    #[test]
    fn inserted_roots_are_scanned_first() {
        let mut pool = NodePool::from_text(b"aabb").unwrap();
        pool.insert(HuffmanNode::leaf(SymbolFrequency { symbol: b'c', count: 2 })).unwrap();
        assert_eq!(symbols(&pool)[0], Some(b'c'));
        assert_eq!(pool.extract_minimum().unwrap().symbol, Some(b'c'));
    }

    #[test]
    fn single_item_pool_drains() {
        let mut pool = NodePool::from_text(b"xxxx").unwrap();
        let only = pool.extract_minimum().unwrap();
        assert_eq!((only.symbol, only.weight), (Some(b'x'), 4));
        assert!(pool.is_empty());
        assert_eq!(pool.extract_minimum().unwrap_err(), EngineError::EmptyInput);
    }

    #[test]
    fn empty_pool_extraction_fails() {
        let mut pool = NodePool::new();
        assert_eq!(pool.extract_minimum().unwrap_err(), EngineError::EmptyInput);
    }

    #[test]
    fn teardown_is_idempotent() {
        let mut pool = NodePool::from_text(b"hello").unwrap();
        pool.teardown();
        assert!(pool.is_empty());
        pool.teardown();
        assert!(pool.is_empty());
    }
}
