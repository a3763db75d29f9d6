//! OSM XML document parser.
//!
//! Understands the subset of the OSM 0.6 XML format the chunk overlay needs:
//! `<bounds>`, `<node>` with `<tag>` children and `<way>` with `<nd>` and
//! `<tag>` children. Relations and unknown elements are skipped.

use std::str::FromStr;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::model::{OsmDataset, OsmId, OsmNode, OsmWay};
use super::OsmParseError;
use crate::coord::GeoBounds;

/// Element currently collecting `<tag>`/`<nd>` children.
enum Open {
    None,
    Node(OsmId, OsmNode),
    Way(OsmId, OsmWay),
    Skipped,
}

/// Parses an OSM XML document.
///
/// Node positions are relative to the document's `<bounds>` element, or to
/// `fallback_bounds` when the document has none. The returned dataset is
/// already normalized.
pub fn parse_osm(document: &[u8], fallback_bounds: GeoBounds) -> Result<OsmDataset, OsmParseError> {
    let mut reader = Reader::from_reader(document);
    reader.config_mut().trim_text(true);

    let mut dataset = OsmDataset::new(fallback_bounds);
    let mut open = Open::None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(element) => {
                open = start_element(&element, open, &mut dataset)?;
            }
            Event::Empty(element) => {
                open = start_element(&element, open, &mut dataset)?;
                if is_container(element.name().as_ref()) {
                    open = close_element(open, &mut dataset);
                }
            }
            Event::End(element) => {
                if is_container(element.name().as_ref()) {
                    open = close_element(open, &mut dataset);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    dataset.normalize();
    Ok(dataset)
}

fn start_element(
    element: &BytesStart<'_>,
    open: Open,
    dataset: &mut OsmDataset,
) -> Result<Open, OsmParseError> {
    match element.name().as_ref() {
        b"bounds" => {
            let bounds = GeoBounds {
                min_lat: required(element, "bounds", "minlat")?,
                min_lon: required(element, "bounds", "minlon")?,
                max_lat: required(element, "bounds", "maxlat")?,
                max_lon: required(element, "bounds", "maxlon")?,
            };
            dataset.set_bounds(bounds);
            Ok(open)
        }
        b"node" => {
            let id = required(element, "node", "id")?;
            let lat = required(element, "node", "lat")?;
            let lon = required(element, "node", "lon")?;
            Ok(Open::Node(id, OsmNode::new(lon, lat)))
        }
        b"way" => {
            let id = required(element, "way", "id")?;
            Ok(Open::Way(id, OsmWay::default()))
        }
        b"relation" => Ok(Open::Skipped),
        b"tag" => {
            let key: String = required(element, "tag", "k")?;
            let value: String = required(element, "tag", "v")?;
            Ok(match open {
                Open::Node(id, mut node) => {
                    node.tags.insert(key, value);
                    Open::Node(id, node)
                }
                Open::Way(id, mut way) => {
                    way.tags.insert(key, value);
                    Open::Way(id, way)
                }
                other => other,
            })
        }
        b"nd" => {
            let node_ref = required(element, "nd", "ref")?;
            Ok(match open {
                Open::Way(id, mut way) => {
                    way.node_refs.push(node_ref);
                    Open::Way(id, way)
                }
                other => other,
            })
        }
        _ => Ok(open),
    }
}

fn is_container(name: &[u8]) -> bool {
    matches!(name, b"node" | b"way" | b"relation")
}

/// Stores a finished node or way.
fn close_element(open: Open, dataset: &mut OsmDataset) -> Open {
    match open {
        Open::Node(id, node) => {
            dataset.nodes.insert(id, node);
            Open::None
        }
        Open::Way(id, way) => {
            dataset.ways.insert(id, way);
            Open::None
        }
        Open::Skipped | Open::None => Open::None,
    }
}

fn required<T: FromStr>(
    element: &BytesStart<'_>,
    element_name: &'static str,
    attribute: &'static str,
) -> Result<T, OsmParseError> {
    for attr in element.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        if attr.key.as_ref() == attribute.as_bytes() {
            let value = attr.unescape_value()?;
            return value.parse().map_err(|_| OsmParseError::InvalidValue {
                element: element_name,
                attribute,
                value: value.into_owned(),
            });
        }
    }
    Err(OsmParseError::MissingAttribute {
        element: element_name,
        attribute,
    })
}
