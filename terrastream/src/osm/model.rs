//! In-memory OpenStreetMap nodes, ways and datasets.

use std::collections::HashMap;

use crate::coord::{lat_to_y, lon_to_x, GeoBounds, ProjectedExtent};

/// OSM element identifier.
pub type OsmId = i64;

/// Tag key/value pairs attached to an element.
pub type Tags = HashMap<String, String>;

/// Position of a node on the tile's local plane.
///
/// `(0, 0)` is the south-west corner of the dataset bounds, `x` grows east
/// and `z` grows north.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LocalPosition {
    pub x: f64,
    pub z: f64,
}

/// A geographic point with tags.
#[derive(Debug, Clone, PartialEq)]
pub struct OsmNode {
    pub lon: f64,
    pub lat: f64,
    /// Projected position; zero until the owning dataset is normalized.
    pub position: LocalPosition,
    pub tags: Tags,
}

impl OsmNode {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self {
            lon,
            lat,
            position: LocalPosition::default(),
            tags: Tags::new(),
        }
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }
}

/// An ordered list of node references describing a line or polygon.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OsmWay {
    pub node_refs: Vec<OsmId>,
    pub tags: Tags,
}

impl OsmWay {
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    /// A way is closed when its first and last references coincide.
    pub fn is_closed(&self) -> bool {
        self.node_refs.len() > 2 && self.node_refs.first() == self.node_refs.last()
    }
}

/// Nodes and ways parsed for one tile.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OsmDataset {
    pub nodes: HashMap<OsmId, OsmNode>,
    pub ways: HashMap<OsmId, OsmWay>,
    bounds: Option<GeoBounds>,
    normalized: bool,
}

impl OsmDataset {
    /// Creates an empty dataset tied to `bounds`.
    pub fn new(bounds: GeoBounds) -> Self {
        Self {
            bounds: Some(bounds),
            ..Self::default()
        }
    }

    /// Replaces the bounds positions will be normalized against.
    pub(crate) fn set_bounds(&mut self, bounds: GeoBounds) {
        self.bounds = Some(bounds);
    }

    /// Bounds the node positions are relative to. `None` for the empty
    /// dataset produced by a failed load.
    pub fn bounds(&self) -> Option<GeoBounds> {
        self.bounds
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.ways.is_empty()
    }

    pub fn is_normalized(&self) -> bool {
        self.normalized
    }

    /// Projected size of the dataset bounds.
    pub fn extent(&self) -> Option<ProjectedExtent> {
        self.bounds.map(|b| b.projected_extent())
    }

    /// Projects every node onto the local plane of the dataset bounds.
    ///
    /// Runs once; later calls leave positions untouched.
    pub fn normalize(&mut self) {
        if self.normalized {
            return;
        }
        self.normalized = true;

        let Some(bounds) = self.bounds else {
            return;
        };
        let min_x = lon_to_x(bounds.min_lon);
        let min_y = lat_to_y(bounds.min_lat);

        for node in self.nodes.values_mut() {
            node.position = LocalPosition {
                x: lon_to_x(node.lon) - min_x,
                z: lat_to_y(node.lat) - min_y,
            };
        }
    }

    /// Resolves a way into node positions, in order.
    ///
    /// References to nodes outside the dataset are skipped; OSM extracts
    /// routinely cut ways at the bounding box.
    pub fn way_points(&self, way_id: OsmId) -> Option<Vec<LocalPosition>> {
        let way = self.ways.get(&way_id)?;
        Some(
            way.node_refs
                .iter()
                .filter_map(|id| self.nodes.get(id).map(|n| n.position))
                .collect(),
        )
    }

    /// Ids of all nodes carrying `key`, in unspecified order.
    pub fn nodes_with_tag<'a>(&'a self, key: &'a str) -> impl Iterator<Item = OsmId> + 'a {
        self.nodes
            .iter()
            .filter(move |(_, node)| node.tags.contains_key(key))
            .map(|(id, _)| *id)
    }

    /// Ids of all ways carrying `key`, in unspecified order.
    pub fn ways_with_tag<'a>(&'a self, key: &'a str) -> impl Iterator<Item = OsmId> + 'a {
        self.ways
            .iter()
            .filter(move |(_, way)| way.tags.contains_key(key))
            .map(|(id, _)| *id)
    }
}
