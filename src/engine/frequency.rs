use serde::Serialize;
use tracing::debug;

use crate::engine::error::{EngineError, EngineResult};

/// Number of occurrences of one distinct symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SymbolFrequency {
    pub symbol: u8,
    pub count: usize,
}

/// Distinct symbols of a text in order of first appearance.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FrequencyTable {
    entries: Vec<SymbolFrequency>,
}

impl FrequencyTable {
    pub fn build(text: &[u8]) -> EngineResult<Self> {
        // Counts over the whole text, so an entry is final the moment it is appended.
        let mut counts = [0usize; 256];
        for &symbol in text {
            counts[symbol as usize] += 1;
        }

        let mut entries: Vec<SymbolFrequency> = Vec::new();
        let mut seen = [false; 256];
        for &symbol in text {
            if seen[symbol as usize] {
                continue;
            }
            seen[symbol as usize] = true;

            entries.try_reserve(1)?;
            entries.push(SymbolFrequency {
                symbol,
                count: counts[symbol as usize],
            });
        }

        debug!("frequency table: {} distinct of {} symbols", entries.len(), text.len());
        Ok(Self { entries })
    }

    /// Table from pairs counted elsewhere. Symbols must be distinct, every
    /// count at least one, and the counts must sum to a `usize`.
    pub fn from_entries(entries: Vec<SymbolFrequency>) -> EngineResult<Self> {
        let mut seen = [false; 256];
        let mut total = 0usize;
        for entry in &entries {
            if entry.count == 0 {
                return Err(EngineError::InvalidArgument(format!(
                    "symbol {:#04x} has a zero count",
                    entry.symbol
                )));
            }
            if seen[entry.symbol as usize] {
                return Err(EngineError::InvalidArgument(format!(
                    "symbol {:#04x} appears twice",
                    entry.symbol
                )));
            }
            seen[entry.symbol as usize] = true;

            total = total.checked_add(entry.count).ok_or_else(|| {
                EngineError::InvalidArgument("total count overflows".into())
            })?;
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[SymbolFrequency] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, symbol: u8) -> Option<&SymbolFrequency> {
        self.entries.iter().find(|e| e.symbol == symbol)
    }

    /// Length of the text the table was built from.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }
}

impl<'a> IntoIterator for &'a FrequencyTable {
    type Item = &'a SymbolFrequency;
    type IntoIter = std::slice::Iter<'a, SymbolFrequency>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
