use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;

use tracing::{debug, trace};

use crate::code_table::{CodeAssignment, CodeEntry, Codeword};
use crate::error::{HuffmanError, Result};
use crate::min_heap::MinHeap;
use crate::symbols::WeightedSymbolSet;

/// Number of zero-weight dummies needed so that every merge combines exactly
/// `radix` nodes.
///
/// Dummies are never materialized: the first merge reserves this many of its
/// lowest digits for them and takes only `radix - padding` real nodes.
pub fn padding_count(symbol_count: usize, radix: usize) -> usize {
    if symbol_count <= 1 || radix <= 2 {
        return 0;
    }
    let d = radix - 1;
    (d - (symbol_count - 1) % d) % d
}

/// A node of the D-ary Huffman tree.
///
/// A node is moved into its parent when merged, so no node is ever reachable
/// from two queue entries. The codeword of a symbol is the sequence of child
/// digits on the path from the root to its leaf; child `i` of an internal
/// node has digit `offset + i`.
#[derive(Debug, Clone, PartialEq)]
pub enum MergeNode<S> {
    Leaf {
        weight: f64,
        symbol: S,
    },
    Internal {
        weight: f64,
        /// Digits `0..offset` belong to padding dummies.
        offset: usize,
        children: Vec<MergeNode<S>>,
    },
}

impl<S> MergeNode<S> {
    pub fn leaf(symbol: S, weight: f64) -> Self {
        MergeNode::Leaf { weight, symbol }
    }

    pub fn weight(&self) -> f64 {
        match self {
            MergeNode::Leaf { weight, .. } => *weight,
            MergeNode::Internal { weight, .. } => *weight,
        }
    }

    /// Combines `children` under a new node; child `i` gets digit `i`.
    pub fn merge(children: Vec<Self>) -> Self {
        Self::merge_padded(0, children)
    }

    /// Like [`MergeNode::merge`], with the first `padding` digits left to
    /// zero-weight dummies; child `i` gets digit `padding + i`.
    pub fn merge_padded(padding: usize, children: Vec<Self>) -> Self {
        let weight = children.iter().map(MergeNode::weight).sum();
        MergeNode::Internal {
            weight,
            offset: padding,
            children,
        }
    }

    pub fn children(&self) -> &[MergeNode<S>] {
        match self {
            MergeNode::Internal { children, .. } => children,
            _ => &[],
        }
    }

    /// Digit of the first child; the number of dummy children before it.
    pub fn digit_offset(&self) -> usize {
        match self {
            MergeNode::Internal { offset, .. } => *offset,
            MergeNode::Leaf { .. } => 0,
        }
    }
}

/// Heap entry: ascending weight, equal weights in insertion order.
#[derive(Debug)]
struct QueueEntry<S> {
    weight: f64,
    seq: usize,
    node: MergeNode<S>,
}

impl<S> QueueEntry<S> {
    fn new(seq: usize, node: MergeNode<S>) -> Self {
        QueueEntry {
            weight: node.weight(),
            seq,
            node,
        }
    }
}

impl<S> PartialEq for QueueEntry<S> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<S> Eq for QueueEntry<S> {}

impl<S> PartialOrd for QueueEntry<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S> Ord for QueueEntry<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        // weights are validated finite before queueing; -0.0 == 0.0 here
        self.weight
            .partial_cmp(&other.weight)
            .unwrap_or(Ordering::Equal)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// A complete D-ary Huffman tree.
#[derive(Debug, Clone)]
pub struct HuffmanTree<S> {
    radix: usize,
    root: MergeNode<S>,
    padding: usize,
    leaf_count: usize,
}

impl<S: Clone> HuffmanTree<S> {
    /// Runs the D-ary merge over `symbols`.
    ///
    /// Radix and weights are validated before anything is queued. Equal
    /// weights are taken in insertion order: input symbols in input order,
    /// then merged nodes in creation order. Padding dummies take the lowest
    /// digits of the first merge.
    pub fn build(symbols: &WeightedSymbolSet<S>, radix: usize) -> Result<Self> {
        if radix < 2 {
            return Err(HuffmanError::invalid_radix(radix));
        }
        symbols.validate()?;

        let padding = padding_count(symbols.len(), radix);
        debug!(
            symbols = symbols.len(),
            radix, padding, "building D-ary Huffman tree"
        );

        let leaves: Vec<QueueEntry<S>> = symbols
            .iter()
            .map(|ws| MergeNode::leaf(ws.symbol.clone(), ws.weight))
            .enumerate()
            .map(|(seq, node)| QueueEntry::new(seq, node))
            .collect();
        let next_seq = leaves.len();

        let heap = MinHeap::build(leaves);
        let root = Self::build_from_heap(heap, radix, padding, next_seq)?;

        Ok(HuffmanTree {
            radix,
            root,
            padding,
            leaf_count: symbols.len(),
        })
    }

    fn build_from_heap(
        mut heap: MinHeap<QueueEntry<S>>,
        radix: usize,
        mut padding: usize,
        mut next_seq: usize,
    ) -> Result<MergeNode<S>> {
        while heap.heap_size() > 1 {
            // dummies weigh nothing, so they only ever join the first merge
            let group = (radix - padding).min(heap.heap_size());
            let mut children = Vec::with_capacity(group);
            for _ in 0..group {
                children.push(heap.extract_min()?.node);
            }

            let merged = MergeNode::merge_padded(padding, children);
            trace!(group, padding, weight = merged.weight(), seq = next_seq, "merged");
            padding = 0;
            heap.insert(QueueEntry::new(next_seq, merged));
            next_seq += 1;
        }

        Ok(heap.extract_min()?.node)
    }
}

impl<S> HuffmanTree<S> {
    pub fn radix(&self) -> usize {
        self.radix
    }

    pub fn root(&self) -> &MergeNode<S> {
        &self.root
    }

    pub fn root_weight(&self) -> f64 {
        self.root.weight()
    }

    /// Number of dummy leaves added before merging.
    pub fn padding(&self) -> usize {
        self.padding
    }

    /// Number of real (non-padding) leaves.
    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(&self.root, 0usize)];
        while let Some((node, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            stack.extend(node.children().iter().map(|child| (child, depth + 1)));
        }
        max_depth
    }

    /// Depth of the padding dummies, or `None` when the tree has none.
    ///
    /// Every dummy hangs off the first merged node, so they all share a depth.
    pub fn padding_depth(&self) -> Option<usize> {
        let mut stack = vec![(&self.root, 0usize)];
        while let Some((node, depth)) = stack.pop() {
            if node.digit_offset() > 0 {
                return Some(depth + 1);
            }
            stack.extend(node.children().iter().map(|child| (child, depth + 1)));
        }
        None
    }

    /// Reads the codeword of every real leaf off the tree.
    pub fn generate_table(&self) -> CodeAssignment<S>
    where
        S: Clone + Eq + Hash,
    {
        let mut entries = Vec::with_capacity(self.leaf_count);
        let mut stack: Vec<(&MergeNode<S>, Vec<usize>)> = vec![(&self.root, Vec::new())];

        while let Some((node, code)) = stack.pop() {
            match node {
                MergeNode::Leaf { weight, symbol } => entries.push(CodeEntry {
                    symbol: symbol.clone(),
                    weight: *weight,
                    codeword: Codeword::new(code),
                }),
                MergeNode::Internal {
                    offset, children, ..
                } => {
                    // pushed in reverse so the lowest digit comes off the stack first
                    for (i, child) in children.iter().enumerate().rev() {
                        let mut child_code = Vec::with_capacity(code.len() + 1);
                        child_code.extend_from_slice(&code);
                        child_code.push(offset + i);
                        stack.push((child, child_code));
                    }
                }
            }
        }

        CodeAssignment::new(self.radix, self.root.weight(), entries)
    }
}

impl<S: fmt::Display> fmt::Display for HuffmanTree<S> {
    /// One node per line, indented by depth and labelled with its digit.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Huffman Tree Structure (radix {}):", self.radix)?;
        let mut stack = vec![(&self.root, 0usize, String::from("root"))];
        while let Some((node, depth, label)) = stack.pop() {
            let indent = "  ".repeat(depth);
            match node {
                MergeNode::Leaf { weight, symbol } => {
                    writeln!(f, "{indent}{label}-> Leaf: {symbol} [weight: {weight}]")?;
                }
                MergeNode::Internal {
                    weight,
                    offset,
                    children,
                } => {
                    writeln!(f, "{indent}{label}-> Internal [weight: {weight}]")?;
                    match *offset {
                        0 => {}
                        1 => writeln!(f, "{indent}  0-> Padding")?,
                        n => writeln!(f, "{indent}  0..{}-> Padding x{n}", n - 1)?,
                    }
                    for (i, child) in children.iter().enumerate().rev() {
                        stack.push((child, depth + 1, (offset + i).to_string()));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Builds D-ary Huffman codes for a fixed radix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DnaryHuffmanBuilder {
    radix: usize,
}

impl DnaryHuffmanBuilder {
    pub fn new(radix: usize) -> Result<Self> {
        if radix < 2 {
            return Err(HuffmanError::invalid_radix(radix));
        }
        Ok(DnaryHuffmanBuilder { radix })
    }

    pub fn binary() -> Self {
        DnaryHuffmanBuilder { radix: 2 }
    }

    pub fn radix(&self) -> usize {
        self.radix
    }

    pub fn build_tree<S: Clone>(&self, symbols: &WeightedSymbolSet<S>) -> Result<HuffmanTree<S>> {
        HuffmanTree::build(symbols, self.radix)
    }

    pub fn build<S>(&self, symbols: &WeightedSymbolSet<S>) -> Result<CodeAssignment<S>>
    where
        S: Clone + Eq + Hash,
    {
        Ok(self.build_tree(symbols)?.generate_table())
    }
}

/// Builds an optimal prefix code over `radix` digits for `symbols`.
///
/// A single-symbol alphabet gets the empty codeword.
pub fn build<S>(symbols: &WeightedSymbolSet<S>, radix: usize) -> Result<CodeAssignment<S>>
where
    S: Clone + Eq + Hash,
{
    DnaryHuffmanBuilder::new(radix)?.build(symbols)
}

#[cfg(test)]
mod test {
    use super::*;

    fn codes(assignment: &CodeAssignment<char>) -> Vec<(char, String)> {
        assignment
            .sorted()
            .into_iter()
            .map(|e| (e.symbol, e.codeword.to_string()))
            .collect()
    }

    #[test]
    fn test_padding_count() {
        assert_eq!(padding_count(1, 3), 0);
        assert_eq!(padding_count(4, 3), 1);
        assert_eq!(padding_count(5, 3), 0);
        assert_eq!(padding_count(2, 5), 3);
        assert_eq!(padding_count(9, 4), 1);
        assert_eq!(padding_count(10, 4), 0);
        assert_eq!(padding_count(11, 4), 2);
        for n in 1..50 {
            assert_eq!(padding_count(n, 2), 0);
        }
        for d in 2..12 {
            for n in 2..100 {
                let padding = padding_count(n, d);
                assert!(padding < d - 1);
                assert_eq!((n + padding - 1) % (d - 1), 0, "n = {n}, d = {d}");
            }
        }
    }

    #[test]
    fn test_dyadic_binary_code() {
        let set: WeightedSymbolSet<char> =
            vec![('A', 0.5), ('B', 0.25), ('C', 0.125), ('D', 0.125)].into();
        let assignment = build(&set, 2).unwrap();

        assert_eq!(
            codes(&assignment),
            vec![
                ('A', "0".to_string()),
                ('B', "10".to_string()),
                ('C', "110".to_string()),
                ('D', "111".to_string()),
            ]
        );
        assert_eq!(assignment.average_length(), 1.75);
        assert_eq!(assignment.root_weight(), 1.0);
    }

    #[test]
    fn test_ternary_first_merge_includes_padding() {
        let set: WeightedSymbolSet<char> =
            vec![('A', 4.0), ('B', 3.0), ('C', 2.0), ('D', 1.0)].into();
        let tree = HuffmanTree::build(&set, 3).unwrap();
        assert_eq!(tree.padding(), 1);
        assert_eq!(tree.leaf_count(), 4);
        assert_eq!(tree.root_weight(), 10.0);

        // root children: B, {pad, D, C}, A
        let root = tree.root().children();
        assert_eq!(root.len(), 3);
        assert_eq!(root[0], MergeNode::leaf('B', 3.0));
        assert_eq!(root[1].digit_offset(), 1);
        assert_eq!(
            root[1].children(),
            &[MergeNode::leaf('D', 1.0), MergeNode::leaf('C', 2.0)]
        );
        assert_eq!(root[2], MergeNode::leaf('A', 4.0));
        assert_eq!(tree.padding_depth(), Some(2));

        let assignment = tree.generate_table();
        assert_eq!(
            codes(&assignment),
            vec![
                ('B', "0".to_string()),
                ('A', "2".to_string()),
                ('D', "11".to_string()),
                ('C', "12".to_string()),
            ]
        );
        assert!((assignment.average_length() - 1.3).abs() < 1e-12);
    }

    #[test]
    fn test_single_symbol_gets_empty_codeword() {
        let set: WeightedSymbolSet<char> = vec![('x', 0.7)].into();
        for radix in [2, 3, 7] {
            let assignment = build(&set, radix).unwrap();
            assert_eq!(assignment.len(), 1);
            assert_eq!(assignment.get(&'x'), Some(&Codeword::default()));
            assert_eq!(assignment.average_length(), 0.0);
        }
    }

    #[test]
    fn test_alphabet_smaller_than_radix() {
        let set: WeightedSymbolSet<char> = vec![('a', 1.0), ('b', 2.0)].into();
        let tree = HuffmanTree::build(&set, 5).unwrap();
        assert_eq!(tree.padding(), 3);
        assert_eq!(tree.depth(), 1);

        let assignment = tree.generate_table();
        assert_eq!(assignment.get(&'a').map(Codeword::to_string), Some("3".into()));
        assert_eq!(assignment.get(&'b').map(Codeword::to_string), Some("4".into()));
    }

    #[test]
    fn test_radix_far_above_alphabet_size() {
        let set: WeightedSymbolSet<char> = vec![('a', 1.0), ('b', 2.0), ('c', 4.0)].into();
        let tree = HuffmanTree::build(&set, 20_000_000).unwrap();
        assert_eq!(tree.padding(), 19_999_997);
        assert_eq!(tree.padding_depth(), Some(1));
        assert_eq!(tree.root().children().len(), 3);
        assert_eq!(tree.depth(), 1);

        let assignment = tree.generate_table();
        let digits = |c| assignment.get(&c).map(|w| w.digits().to_vec());
        assert_eq!(digits('a'), Some(vec![19_999_997]));
        assert_eq!(digits('b'), Some(vec![19_999_998]));
        assert_eq!(digits('c'), Some(vec![19_999_999]));
        assert_eq!(assignment.average_length(), 1.0);

        let set: WeightedSymbolSet<char> = vec![('x', 1.0), ('y', 1.0)].into();
        let assignment = build(&set, usize::MAX).unwrap();
        assert_eq!(
            assignment.get(&'y').map(|w| w.digits().to_vec()),
            Some(vec![usize::MAX - 1])
        );
        assert!(assignment.is_prefix_free());
    }

    #[test]
    fn test_padding_precedes_zero_weight_symbols() {
        let set: WeightedSymbolSet<char> =
            vec![('a', 0.0), ('b', 0.0), ('c', 0.0), ('d', 5.0)].into();
        let tree = HuffmanTree::build(&set, 3).unwrap();
        assert_eq!(tree.padding(), 1);

        let assignment = tree.generate_table();
        assert_eq!(
            codes(&assignment),
            vec![
                ('c', "0".to_string()),
                ('d', "2".to_string()),
                ('a', "11".to_string()),
                ('b', "12".to_string()),
            ]
        );
    }

    #[test]
    fn test_equal_weights_follow_input_order() {
        let set: WeightedSymbolSet<char> = vec![('p', 1.0), ('q', 1.0)].into();
        let assignment = build(&set, 2).unwrap();
        assert_eq!(codes(&assignment), vec![('p', "0".to_string()), ('q', "1".to_string())]);

        let set: WeightedSymbolSet<char> = vec![('q', 1.0), ('p', 1.0)].into();
        let assignment = build(&set, 2).unwrap();
        assert_eq!(codes(&assignment), vec![('q', "0".to_string()), ('p', "1".to_string())]);
    }

    #[test]
    fn test_zero_weight_symbols_get_codewords() {
        let set: WeightedSymbolSet<char> = vec![('a', 0.0), ('b', 0.0), ('c', 1.0)].into();
        let assignment = build(&set, 2).unwrap();
        assert_eq!(assignment.len(), 3);
        assert!(assignment.is_prefix_free());
        assert_eq!(assignment.get(&'c').map(Codeword::len), Some(1));
    }

    #[test]
    fn test_invalid_input() {
        let set: WeightedSymbolSet<char> = vec![('a', 1.0)].into();
        assert!(matches!(
            build(&set, 1),
            Err(HuffmanError::InvalidRadix { radix: 1 })
        ));
        assert!(matches!(
            DnaryHuffmanBuilder::new(0),
            Err(HuffmanError::InvalidRadix { radix: 0 })
        ));

        let empty: WeightedSymbolSet<char> = WeightedSymbolSet::new(vec![]);
        assert!(matches!(build(&empty, 2), Err(HuffmanError::EmptyAlphabet)));

        let negative: WeightedSymbolSet<char> = vec![('a', 1.0), ('b', -1.0)].into();
        assert!(matches!(
            build(&negative, 3),
            Err(HuffmanError::NegativeWeight { index: 1, .. })
        ));
    }

    #[test]
    fn test_structure_rendering() {
        let set: WeightedSymbolSet<char> = vec![('a', 2.0), ('b', 1.0)].into();
        let tree = DnaryHuffmanBuilder::binary().build_tree(&set).unwrap();
        let rendered = tree.to_string();
        let expected = "Huffman Tree Structure (radix 2):\n\
                        root-> Internal [weight: 3]\n  \
                        0-> Leaf: b [weight: 1]\n  \
                        1-> Leaf: a [weight: 2]\n";
        assert_eq!(rendered, expected);

        let set: WeightedSymbolSet<char> = vec![('a', 2.0), ('b', 1.0)].into();
        let tree = HuffmanTree::build(&set, 4).unwrap();
        let expected = "Huffman Tree Structure (radix 4):\n\
                        root-> Internal [weight: 3]\n  \
                        0..1-> Padding x2\n  \
                        2-> Leaf: b [weight: 1]\n  \
                        3-> Leaf: a [weight: 2]\n";
        assert_eq!(tree.to_string(), expected);
    }
}
