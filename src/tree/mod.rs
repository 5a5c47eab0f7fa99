use slotmap::SlotMap;

use crate::error::InvariantError;
use crate::math::{self, Point2};

slotmap::new_key_type! {
    /// Unique identifier for a waypoint node in the search tree.
    pub struct NodeId;
}

/// A waypoint reachable from the start point.
#[derive(Debug, Clone)]
pub struct PathNode {
    /// Position of the waypoint.
    pub point: Point2,
    /// Whether outgoing exploration from this node has finished.
    pub complete: bool,
    /// Child waypoints. `None` marks a terminal node: the goal, or a leaf
    /// already consumed by the optimizer once its list is truncated.
    pub children: Option<Vec<NodeId>>,
    /// Parent node; `None` only for the root.
    pub parent: Option<NodeId>,
    /// Indices of obstacles fully circumvented at this node. Deeper nodes on
    /// the same branch must not reprocess them.
    pub processed: Vec<usize>,
}

/// Arena-backed tree of waypoints reachable from the start.
///
/// Nodes reference each other via generational ids (no nesting, no index
/// paths). Children are only ever appended, never reordered or removed, so
/// an id obtained from a search stays valid for the whole query.
#[derive(Debug, Clone)]
pub struct PathTree {
    nodes: SlotMap<NodeId, PathNode>,
    root: NodeId,
}

impl PathTree {
    /// Creates a tree holding only the incomplete root node.
    #[must_use]
    pub fn new(root_point: Point2) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(PathNode {
            point: root_point,
            complete: false,
            children: Some(Vec::new()),
            parent: None,
            processed: Vec::new(),
        });
        Self { nodes, root }
    }

    /// The root node's id.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes currently in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a tree owns at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns a reference to the node, or an error for a stale id.
    ///
    /// # Errors
    ///
    /// Returns [`InvariantError::StaleNodeId`] if the id does not resolve;
    /// ids handed out by this tree within one query never go stale, so this
    /// signals a caller contract violation.
    pub fn node(&self, id: NodeId) -> Result<&PathNode, InvariantError> {
        self.nodes.get(id).ok_or(InvariantError::StaleNodeId)
    }

    /// Returns a mutable reference to the node, or an error for a stale id.
    ///
    /// # Errors
    ///
    /// Returns [`InvariantError::StaleNodeId`] if the id does not resolve.
    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut PathNode, InvariantError> {
        self.nodes.get_mut(id).ok_or(InvariantError::StaleNodeId)
    }

    /// Appends a child waypoint under `parent` and returns its id.
    ///
    /// A `terminal` child carries no children list and can never be extended.
    ///
    /// # Errors
    ///
    /// Returns [`InvariantError::StaleNodeId`] for an unknown parent and
    /// [`InvariantError::TerminalParent`] when the parent is terminal.
    pub fn push_child(
        &mut self,
        parent: NodeId,
        point: Point2,
        complete: bool,
        terminal: bool,
    ) -> Result<NodeId, InvariantError> {
        if !self.nodes.contains_key(parent) {
            return Err(InvariantError::StaleNodeId);
        }
        let id = self.nodes.insert(PathNode {
            point,
            complete,
            children: if terminal { None } else { Some(Vec::new()) },
            parent: Some(parent),
            processed: Vec::new(),
        });
        let Some(parent_node) = self.nodes.get_mut(parent) else {
            return Err(InvariantError::StaleNodeId);
        };
        match parent_node.children.as_mut() {
            Some(children) => {
                children.push(id);
                Ok(id)
            }
            None => {
                self.nodes.remove(id);
                Err(InvariantError::TerminalParent)
            }
        }
    }

    /// Depth-first pre-order search; returns the id of the first node
    /// matching the predicate.
    #[must_use]
    pub fn find_first<F>(&self, predicate: F) -> Option<NodeId>
    where
        F: Fn(&PathNode) -> bool,
    {
        self.find_under(self.root, &predicate)
    }

    fn find_under<F>(&self, id: NodeId, predicate: &F) -> Option<NodeId>
    where
        F: Fn(&PathNode) -> bool,
    {
        let node = self.nodes.get(id)?;
        if predicate(node) {
            return Some(id);
        }
        if let Some(children) = &node.children {
            for &child in children {
                if let Some(found) = self.find_under(child, predicate) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// True if `point` coincides with the point of `id` or of any ancestor.
    /// This is the guard that keeps boundary revisits from recursing forever.
    ///
    /// # Errors
    ///
    /// Returns [`InvariantError::StaleNodeId`] if the id does not resolve.
    pub fn point_on_branch(&self, id: NodeId, point: &Point2) -> Result<bool, InvariantError> {
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.node(node_id)?;
            if math::points_coincide(&node.point, point) {
                return Ok(true);
            }
            current = node.parent;
        }
        Ok(false)
    }

    /// Union of processed obstacle indices along the branch root..=`id`.
    ///
    /// # Errors
    ///
    /// Returns [`InvariantError::StaleNodeId`] if the id does not resolve.
    pub fn processed_on_branch(&self, id: NodeId) -> Result<Vec<usize>, InvariantError> {
        let mut processed = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.node(node_id)?;
            for &index in &node.processed {
                if !processed.contains(&index) {
                    processed.push(index);
                }
            }
            current = node.parent;
        }
        Ok(processed)
    }

    /// Waypoints from the root down to `id`, in travel order.
    ///
    /// # Errors
    ///
    /// Returns [`InvariantError::StaleNodeId`] if the id does not resolve.
    pub fn branch_points(&self, id: NodeId) -> Result<Vec<Point2>, InvariantError> {
        let mut points = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.node(node_id)?;
            points.push(node.point);
            current = node.parent;
        }
        points.reverse();
        Ok(points)
    }

    /// Forces an empty children list on `id`, turning a terminal leaf into a
    /// dead branch. The optimizer uses this to mark consumed leaves.
    ///
    /// # Errors
    ///
    /// Returns [`InvariantError::StaleNodeId`] if the id does not resolve.
    pub fn truncate_children(&mut self, id: NodeId) -> Result<(), InvariantError> {
        self.node_mut(id)?.children = Some(Vec::new());
        Ok(())
    }
}
