//! Recursive spatial partitioning
//!
//! The map region is split in two by a random axis-aligned cut, and each half
//! is split again until the requested depth is reached. A cut whose children
//! are too thin for `container_minimum_ratio` is redrawn, up to
//! `container_split_retries` times; when every attempt fails the node simply
//! stays a leaf.

use log::debug;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::config::DungeonParams;
use crate::rng::DungeonRng;

use super::corridor::{Corridor, make_corridor};
use super::rect::Rectangle;
use super::room::Room;

/// A region produced by partitioning
///
/// Only leaf containers ever receive a room; only split containers carry a
/// corridor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Container {
    #[serde(flatten)]
    pub rect: Rectangle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<Room>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corridor: Option<Corridor>,
}

impl Container {
    /// An empty container covering `rect`
    pub fn new(rect: Rectangle) -> Self {
        Self {
            rect,
            room: None,
            corridor: None,
        }
    }
}

/// Binary partition tree
///
/// A node is either a leaf or has exactly two children. Serialized as
/// `{leaf, left?, right?}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "TreeRecord")]
pub enum PartitionTree {
    Leaf(Container),
    Split {
        container: Container,
        left: Box<PartitionTree>,
        right: Box<PartitionTree>,
    },
}

impl PartitionTree {
    /// The container held by this node
    pub fn container(&self) -> &Container {
        match self {
            PartitionTree::Leaf(container) => container,
            PartitionTree::Split { container, .. } => container,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, PartitionTree::Leaf(_))
    }

    /// Left and right children of a split node
    pub fn children(&self) -> Option<(&PartitionTree, &PartitionTree)> {
        match self {
            PartitionTree::Leaf(_) => None,
            PartitionTree::Split { left, right, .. } => Some((left, right)),
        }
    }

    /// Leaf containers, left subtree before right subtree
    pub fn leaves(&self) -> Vec<&Container> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    /// Mutable leaf containers, in the same order as [`leaves`](Self::leaves)
    pub fn leaves_mut(&mut self) -> Vec<&mut Container> {
        let mut out = Vec::new();
        self.collect_leaves_mut(&mut out);
        out
    }

    /// Corridors of every split node, in pre-order
    pub fn corridors(&self) -> Vec<&Corridor> {
        let mut out = Vec::new();
        self.collect_corridors(&mut out);
        out
    }

    /// Placed rooms, in leaf order
    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.leaves().into_iter().filter_map(|leaf| leaf.room.as_ref())
    }

    /// Number of split levels below this node (0 for a leaf)
    pub fn depth(&self) -> usize {
        match self.children() {
            None => 0,
            Some((left, right)) => 1 + left.depth().max(right.depth()),
        }
    }

    /// Total number of nodes, leaves included
    pub fn node_count(&self) -> usize {
        match self.children() {
            None => 1,
            Some((left, right)) => 1 + left.node_count() + right.node_count(),
        }
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a Container>) {
        match self {
            PartitionTree::Leaf(container) => out.push(container),
            PartitionTree::Split { left, right, .. } => {
                left.collect_leaves(out);
                right.collect_leaves(out);
            }
        }
    }

    fn collect_leaves_mut<'a>(&'a mut self, out: &mut Vec<&'a mut Container>) {
        match self {
            PartitionTree::Leaf(container) => out.push(container),
            PartitionTree::Split { left, right, .. } => {
                left.collect_leaves_mut(out);
                right.collect_leaves_mut(out);
            }
        }
    }

    fn collect_corridors<'a>(&'a self, out: &mut Vec<&'a Corridor>) {
        if let Some(corridor) = &self.container().corridor {
            out.push(corridor);
        }
        if let Some((left, right)) = self.children() {
            left.collect_corridors(out);
            right.collect_corridors(out);
        }
    }
}

impl Serialize for PartitionTree {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            PartitionTree::Leaf(container) => {
                let mut node = serializer.serialize_struct("TreeNode", 1)?;
                node.serialize_field("leaf", container)?;
                node.end()
            }
            PartitionTree::Split {
                container,
                left,
                right,
            } => {
                let mut node = serializer.serialize_struct("TreeNode", 3)?;
                node.serialize_field("leaf", container)?;
                node.serialize_field("left", left)?;
                node.serialize_field("right", right)?;
                node.end()
            }
        }
    }
}

#[derive(Deserialize)]
struct TreeRecord {
    leaf: Container,
    #[serde(default)]
    left: Option<Box<PartitionTree>>,
    #[serde(default)]
    right: Option<Box<PartitionTree>>,
}

impl TryFrom<TreeRecord> for PartitionTree {
    type Error = &'static str;

    fn try_from(record: TreeRecord) -> Result<Self, Self::Error> {
        match (record.left, record.right) {
            (None, None) => Ok(PartitionTree::Leaf(record.leaf)),
            (Some(left), Some(right)) => Ok(PartitionTree::Split {
                container: record.leaf,
                left,
                right,
            }),
            _ => Err("tree node must have either zero or two children"),
        }
    }
}

/// Recursively partition `container` down to `iterations` levels.
///
/// A container is only split while both sides exceed twice
/// `container_minimum_size`. Every split node gets a corridor joining its
/// children.
pub fn build_tree(
    container: Container,
    iterations: u32,
    params: &DungeonParams,
    rng: &mut DungeonRng,
) -> PartitionTree {
    if iterations == 0 || !is_splittable(&container.rect, params.container_minimum_size) {
        return PartitionTree::Leaf(container);
    }

    let Some((left_rect, right_rect)) = split_container(&container.rect, params, rng) else {
        debug!(
            "Split retries exhausted for container {:?}, keeping it as a leaf",
            container.rect
        );
        return PartitionTree::Leaf(container);
    };

    let left = build_tree(Container::new(left_rect), iterations - 1, params, rng);
    let right = build_tree(Container::new(right_rect), iterations - 1, params, rng);

    let mut container = container;
    container.corridor = Some(make_corridor(
        left.container(),
        right.container(),
        params.corridor_width,
    ));

    PartitionTree::Split {
        container,
        left: Box::new(left),
        right: Box::new(right),
    }
}

fn is_splittable(rect: &Rectangle, minimum_size: i32) -> bool {
    let limit = minimum_size.saturating_mul(2);
    rect.width > limit && rect.height > limit
}

/// Try to cut `rect` in two along a random axis.
///
/// Returns `None` once `container_split_retries` attempts have all produced
/// an empty child or a child thinner than `container_minimum_ratio`.
pub fn split_container(
    rect: &Rectangle,
    params: &DungeonParams,
    rng: &mut DungeonRng,
) -> Option<(Rectangle, Rectangle)> {
    for _ in 0..params.container_split_retries {
        let vertical = rng.one_in(2);

        let (left, right) = if vertical {
            let cut = rng.rnd(rect.width.max(0) as u32) as i32;
            (
                Rectangle::new(rect.x, rect.y, cut, rect.height),
                Rectangle::new(rect.x + cut, rect.y, rect.width - cut, rect.height),
            )
        } else {
            let cut = rng.rnd(rect.height.max(0) as u32) as i32;
            (
                Rectangle::new(rect.x, rect.y, rect.width, cut),
                Rectangle::new(rect.x, rect.y + cut, rect.width, rect.height - cut),
            )
        };

        if left.is_empty() || right.is_empty() {
            continue;
        }

        let ratio = |r: &Rectangle| {
            if vertical {
                f64::from(r.width) / f64::from(r.height)
            } else {
                f64::from(r.height) / f64::from(r.width)
            }
        };
        if ratio(&left) < params.container_minimum_ratio
            || ratio(&right) < params.container_minimum_ratio
        {
            continue;
        }

        return Some((left, right));
    }

    None
}
