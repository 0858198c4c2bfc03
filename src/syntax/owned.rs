//! In-memory syntax trees.
//!
//! [`OwnedTree`] stores its nodes in a flat arena and hands out
//! [`OwnedNode`] handles that borrow it. Nodes are added parent first, so a
//! tree can be built by a hand-written parser, a test, or a conversion from
//! another parser's output.

use super::{Span, SyntaxError, SyntaxExtractor, SyntaxNode, SyntaxTree};

/// Index of a node in its [`OwnedTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct NodeData {
    kind: String,
    span: Span,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Debug, Clone)]
pub struct OwnedTree {
    nodes: Vec<NodeData>,
}

impl OwnedTree {
    /// Creates a tree holding only its root.
    pub fn new(kind: impl Into<String>, span: Span) -> Self {
        Self {
            nodes: vec![NodeData {
                kind: kind.into(),
                span,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    pub fn root_id(&self) -> NodeId {
        NodeId(0)
    }

    /// Appends a child after `parent`'s existing children.
    ///
    /// # Panics
    ///
    /// If `parent` does not belong to this tree.
    pub fn add_child(&mut self, parent: NodeId, kind: impl Into<String>, span: Span) -> NodeId {
        assert!(parent.0 < self.nodes.len(), "unknown parent node {:?}", parent);
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            kind: kind.into(),
            span,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn node(&self, id: NodeId) -> OwnedNode<'_> {
        OwnedNode { tree: self, id }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct OwnedNode<'a> {
    tree: &'a OwnedTree,
    id: NodeId,
}

impl<'a> OwnedNode<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    fn data(&self) -> &'a NodeData {
        &self.tree.nodes[self.id.0]
    }
}

impl SyntaxNode for OwnedNode<'_> {
    fn kind(&self) -> &str {
        &self.data().kind
    }

    fn span(&self) -> Span {
        self.data().span
    }

    fn parent(&self) -> Option<Self> {
        self.data().parent.map(|id| self.tree.node(id))
    }

    fn children(&self) -> Vec<Self> {
        self.data()
            .children
            .iter()
            .map(|id| self.tree.node(*id))
            .collect()
    }
}

impl SyntaxTree for OwnedTree {
    type Node<'a> = OwnedNode<'a>;

    fn root(&self) -> Self::Node<'_> {
        self.node(self.root_id())
    }
}

/// Adapts a parsing function into a [`SyntaxExtractor`].
pub struct FnExtractor<F>(pub F);

impl<F> SyntaxExtractor for FnExtractor<F>
where
    F: Fn(&str) -> Result<OwnedTree, SyntaxError> + Send + Sync,
{
    type Tree = OwnedTree;

    fn parse(&self, code: &str) -> Result<OwnedTree, SyntaxError> {
        (self.0)(code)
    }
}
