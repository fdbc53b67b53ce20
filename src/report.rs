use std::fmt::Write;

use serde::Serialize;

use crate::engine::{code_to_string, FrequencyTable, HuffmanNode, Merge, SymbolFrequency};

/// Printable form of a symbol: the character when it is visible ASCII, the hex value otherwise.
pub fn display_symbol(symbol: u8) -> String {
    match symbol {
        b' ' => "' '".to_string(),
        0x21..=0x7e => (symbol as char).to_string(),
        _ => format!("{:#04x}", symbol),
    }
}

#[derive(Debug, Serialize)]
pub struct FrequencyReport {
    pub source: String,
    pub length: usize,
    pub distinct: usize,
    pub entries: Vec<SymbolFrequency>,
}

impl FrequencyReport {
    pub fn new(source: impl Into<String>, table: &FrequencyTable) -> Self {
        Self {
            source: source.into(),
            length: table.total(),
            distinct: table.len(),
            entries: table.entries().to_vec(),
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "📊 Symbol frequencies: {}", self.source);
        let _ = writeln!(out, "   Length: {} bytes, {} distinct", self.length, self.distinct);
        for entry in &self.entries {
            let _ = writeln!(out, "   {:>6}  {}", display_symbol(entry.symbol), entry.count);
        }
        out
    }
}

#[derive(Debug, Serialize)]
pub struct TreeReport {
    pub source: String,
    pub weight: usize,
    pub height: usize,
    pub nodes: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merges: Option<Vec<Merge>>,
    pub tree: HuffmanNode,
}

impl TreeReport {
    pub fn new(source: impl Into<String>, tree: HuffmanNode, merges: Option<Vec<Merge>>) -> Self {
        Self {
            source: source.into(),
            weight: tree.weight,
            height: tree.height(),
            nodes: tree.node_count(),
            merges,
            tree,
        }
    }

    pub fn render(&self) -> String {
        fn render_node(node: &HuffmanNode, depth: usize, label: &str, out: &mut String) {
            let indent = "  ".repeat(depth);
            match node.symbol {
                Some(symbol) => {
                    let _ = writeln!(out, "{}{} leaf {} [weight: {}]", indent, label, display_symbol(symbol), node.weight);
                }
                None => {
                    let _ = writeln!(out, "{}{} internal [weight: {}]", indent, label, node.weight);
                }
            }
            if let Some(ref left) = node.left {
                render_node(left, depth + 1, "L", out);
            }
            if let Some(ref right) = node.right {
                render_node(right, depth + 1, "R", out);
            }
        }

        let mut out = String::new();
        let _ = writeln!(out, "🌳 Huffman tree: {}", self.source);
        let _ = writeln!(out, "   Weight: {}, height: {}, nodes: {}", self.weight, self.height, self.nodes);

        if let Some(ref merges) = self.merges {
            let _ = writeln!(out, "Merges:");
            for (i, merge) in merges.iter().enumerate() {
                let _ = writeln!(
                    out,
                    "   {:>3}. {} + {} -> {}",
                    i + 1,
                    describe(merge.left_symbol, merge.left_weight),
                    describe(merge.right_symbol, merge.right_weight),
                    merge.weight
                );
            }
        }

        render_node(&self.tree, 0, "root", &mut out);
        out
    }
}

fn describe(symbol: Option<u8>, weight: usize) -> String {
    match symbol {
        Some(symbol) => format!("{}({})", display_symbol(symbol), weight),
        None => format!("*({})", weight),
    }
}

#[derive(Debug, Serialize)]
pub struct CodeEntry {
    pub symbol: u8,
    pub weight: usize,
    pub code: String,
}

#[derive(Debug, Serialize)]
pub struct CodeReport {
    pub source: String,
    pub length: usize,
    pub encoded_bits: usize,
    pub codes: Vec<CodeEntry>,
}

impl CodeReport {
    pub fn new(source: impl Into<String>, tree: &HuffmanNode) -> Self {
        let table = tree.code_table();
        let mut codes: Vec<CodeEntry> = tree
            .leaves()
            .into_iter()
            .map(|leaf| CodeEntry {
                symbol: leaf.symbol,
                weight: leaf.weight,
                code: table.get(&leaf.symbol).map(|c| code_to_string(c)).unwrap_or_default(),
            })
            .collect();
        codes.sort_by(|a, b| b.weight.cmp(&a.weight).then(a.symbol.cmp(&b.symbol)));

        Self {
            source: source.into(),
            length: tree.weight,
            encoded_bits: tree.weighted_path_length(),
            codes,
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "🔑 Prefix codes: {}", self.source);
        let _ = writeln!(
            out,
            "   {} symbols -> {} bits ({:.2} bits/symbol)",
            self.length,
            self.encoded_bits,
            self.encoded_bits as f64 / self.length.max(1) as f64
        );
        for entry in &self.codes {
            let _ = writeln!(out, "   {:>6}  {:>5}  {}", display_symbol(entry.symbol), entry.weight, entry.code);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{reduce, NodePool};

    #[test]
    fn symbols_display_readably() {
        assert_eq!(display_symbol(b'a'), "a");
        assert_eq!(display_symbol(b' '), "' '");
        assert_eq!(display_symbol(b'\n'), "0x0a");
    }

    #[test]
    fn frequency_report_lists_entries() {
        let table = FrequencyTable::build(b"xxxxyyzzzzzwww").unwrap();
        let report = FrequencyReport::new("inline", &table);
        assert_eq!(report.length, 14);
        assert_eq!(report.distinct, 4);
        let text = report.render();
        assert!(text.contains("14 bytes, 4 distinct"));
        assert!(text.lines().nth(2).unwrap().trim_start().starts_with('x'));
    }

    #[test]
    fn code_report_orders_by_weight() {
        let tree = reduce(NodePool::from_text(b"xxxxyyzzzzzwww").unwrap()).unwrap();
        let report = CodeReport::new("inline", &tree);
        let codes: Vec<(u8, &str)> = report.codes.iter().map(|c| (c.symbol, c.code.as_str())).collect();
        assert_eq!(codes, vec![(b'z', "0"), (b'x', "10"), (b'w', "111"), (b'y', "110")]);
        assert_eq!(report.encoded_bits, 28);
    }

    #[test]
    fn tree_report_json_shape() {
        let tree = reduce(NodePool::from_text(b"aab").unwrap()).unwrap();
        let report = TreeReport::new("inline", tree, None);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["weight"], 3);
        assert_eq!(json["nodes"], 3);
        assert!(json.get("merges").is_none());
        assert_eq!(json["tree"]["left"]["symbol"], b'b');
        assert!(report.render().contains("root internal [weight: 3]"));
    }
}
