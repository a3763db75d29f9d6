//! OpenStreetMap data model.
//!
//! A chunk optionally carries the OSM nodes and ways inside its tile. The
//! [`parser`](parse_osm) reads an OSM XML document, and
//! [`OsmDataset::normalize`] places every node on the tile's local plane
//! with the south-west corner of the bounds at the origin.

mod model;
mod parser;

pub use model::{LocalPosition, OsmDataset, OsmId, OsmNode, OsmWay, Tags};
pub use parser::parse_osm;

use thiserror::Error;

/// Errors that can occur while parsing an OSM document.
#[derive(Debug, Error)]
pub enum OsmParseError {
    /// The document is not well-formed XML.
    #[error("Malformed OSM document: {0}")]
    Xml(#[from] quick_xml::Error),

    /// A required attribute is absent.
    #[error("<{element}> is missing attribute '{attribute}'")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    /// An attribute could not be parsed as the expected type.
    #[error("<{element}> has invalid {attribute}='{value}'")]
    InvalidValue {
        element: &'static str,
        attribute: &'static str,
        value: String,
    },
}
