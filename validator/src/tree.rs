use grammar::Symbol;

/// A derivation tree node in first-child/next-sibling form.
///
/// The children of a node are `first_child` followed by the `next_sibling`
/// chain of that child. Every node is owned by its parent (or its previous
/// sibling), so dropping a node drops its whole subtree.
///
/// A derivation is as deep as the word is long, so dropping and comparing
/// walk the tree with an explicit stack rather than recursing.
#[derive(Debug)]
pub struct Node {
    pub symbol: Symbol,
    pub first_child: Option<Box<Node>>,
    pub next_sibling: Option<Box<Node>>,
}

/// The root of an accepted derivation.
pub type DerivationTree = Node;

impl Node {
    pub fn leaf(symbol: Symbol) -> Self {
        Node {
            symbol,
            first_child: None,
            next_sibling: None,
        }
    }

    /// Create a node whose children are `children`, in order. The first one
    /// becomes `first_child`, every later one the `next_sibling` of the one
    /// before it.
    pub fn with_children(symbol: Symbol, children: Vec<Node>) -> Self {
        let mut first_child = None;
        for mut child in children.into_iter().rev() {
            debug_assert!(child.next_sibling.is_none());
            child.next_sibling = first_child.take();
            first_child = Some(Box::new(child));
        }
        Node {
            symbol,
            first_child,
            next_sibling: None,
        }
    }

    /// Create the implicit expansion `n0 -> n1 -> ... -> nk -> epsilon`, each
    /// symbol of `path` being the only child of the one before it.
    pub fn epsilon_chain(path: &[Symbol]) -> Self {
        path.iter()
            .rev()
            .fold(Node::leaf(Symbol::EPSILON), |child, &sym| {
                Node::with_children(sym, vec![child])
            })
    }

    pub fn is_leaf(&self) -> bool {
        self.first_child.is_none()
    }

    /// Iterate over the direct children of this node.
    pub fn children(&self) -> Children<'_> {
        Children {
            next: self.first_child.as_deref(),
        }
    }

    /// Depth-first, pre-order traversal of this node and its descendants.
    /// Siblings of `self` are not visited.
    pub fn iter(&self) -> DfsParseTreeIterator<'_> {
        DfsParseTreeIterator {
            stack: vec![(0, self)],
            root: self,
        }
    }

    /// Terminal leaves, left to right. Epsilon placeholders are skipped.
    pub fn leaves(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.iter()
            .map(|(_, node)| node)
            .filter(|node| node.is_leaf() && !node.symbol.is_epsilon())
            .map(|node| node.symbol)
    }

    /// The word this tree derives.
    pub fn word(&self) -> String {
        self.leaves().map(|sym| sym.0).collect()
    }
}

impl Drop for Node {
    fn drop(&mut self) {
        let mut stack: Vec<Box<Node>> = Vec::new();
        stack.extend(self.first_child.take());
        stack.extend(self.next_sibling.take());
        while let Some(mut node) = stack.pop() {
            stack.extend(node.first_child.take());
            stack.extend(node.next_sibling.take());
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Node) -> bool {
        let mut stack = vec![(self, other)];
        while let Some((a, b)) = stack.pop() {
            if a.symbol != b.symbol {
                return false;
            }
            for (x, y) in [(&a.first_child, &b.first_child), (&a.next_sibling, &b.next_sibling)] {
                match (x.as_deref(), y.as_deref()) {
                    (Some(x), Some(y)) => stack.push((x, y)),
                    (None, None) => {}
                    _ => return false,
                }
            }
        }
        true
    }
}

impl Eq for Node {}

pub struct Children<'a> {
    next: Option<&'a Node>,
}

impl<'a> Iterator for Children<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.next_sibling.as_deref();
        Some(node)
    }
}

/// Yields `(depth, node)` pairs, visiting `first_child` before
/// `next_sibling`.
pub struct DfsParseTreeIterator<'a> {
    stack: Vec<(usize, &'a Node)>,
    root: &'a Node,
}

impl<'a> Iterator for DfsParseTreeIterator<'a> {
    type Item = (usize, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        if !std::ptr::eq(node, self.root) {
            if let Some(sibling) = node.next_sibling.as_deref() {
                self.stack.push((depth, sibling));
            }
        }
        if let Some(child) = node.first_child.as_deref() {
            self.stack.push((depth + 1, child));
        }
        Some((depth, node))
    }
}
