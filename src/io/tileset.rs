//! XML tile set loading
//!
//! ```xml
//! <set>
//!   <tiles>
//!     <tile name="corner" symmetry="L" weight="2.0">
//!       <edge side="top" label="road"/>
//!       <edge side="right" label="road"/>
//!       <edge side="bottom" label="grass"/>
//!       <edge side="left" label="grass"/>
//!     </tile>
//!     <tile name="grass" symmetry="X" top="grass"/>
//!   </tiles>
//! </set>
//! ```
//!
//! Edges are given either as `<edge>` children or as side-named attributes.
//! Elements other than `tile` and `edge` are ignored.

use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::io::error::{AlgorithmError, Result, file_system_error};
use crate::spatial::side::Side;
use crate::spatial::tiles::BaseTile;

/// Read and parse a tile set file
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid tile set
pub fn load_tileset(path: &Path) -> Result<Vec<BaseTile>> {
    let xml = std::fs::read_to_string(path)
        .map_err(|e| file_system_error(path, "read tile set", e))?;
    let tiles = parse_tileset(&xml, path)?;
    tracing::info!(path = %path.display(), tiles = tiles.len(), "loaded tile set");
    Ok(tiles)
}

/// Parse tile set XML into base tiles, in document order
///
/// `path` is only used to label errors. Symmetry classes and edge
/// completeness are not checked here; [`crate::spatial::tiles::TileCatalog::expand`]
/// validates the returned tiles.
///
/// # Errors
///
/// Returns `TilesetParse` if:
/// - The XML is malformed
/// - A tile has no `name` or an unparsable `weight`
/// - An edge names an unknown side or lacks a label
/// - An `<edge>` appears outside a `<tile>`
/// - A `<tile>` is opened inside another `<tile>`
pub fn parse_tileset(xml: &str, path: &Path) -> Result<Vec<BaseTile>> {
    let parse_error = |reason: String| AlgorithmError::TilesetParse {
        path: path.to_path_buf(),
        reason,
    };

    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut tiles = Vec::new();
    let mut current: Option<BaseTile> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                b"tile" => {
                    if let Some(outer) = &current {
                        let reason = format!("nested <tile> inside '{}'", outer.name);
                        return Err(parse_error(reason));
                    }
                    current = Some(parse_tile(e).map_err(parse_error)?);
                }
                b"edge" => attach_edge(current.as_mut(), e).map_err(parse_error)?,
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                b"tile" => tiles.push(parse_tile(e).map_err(parse_error)?),
                b"edge" => attach_edge(current.as_mut(), e).map_err(parse_error)?,
                _ => {}
            },
            Ok(Event::End(ref e)) if e.name().as_ref() == b"tile" => {
                if let Some(tile) = current.take() {
                    tiles.push(tile);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(parse_error(format!("malformed XML: {e}"))),
            _ => {}
        }
    }

    if let Some(tile) = current {
        return Err(parse_error(format!("tile '{}' is never closed", tile.name)));
    }

    Ok(tiles)
}

fn attributes(e: &BytesStart<'_>) -> std::result::Result<Vec<(String, String)>, String> {
    e.attributes()
        .map(|attr| {
            let attr = attr.map_err(|err| format!("bad attribute: {err}"))?;
            let key = std::str::from_utf8(attr.key.as_ref())
                .map_err(|err| format!("attribute name is not UTF-8: {err}"))?;
            let value = attr
                .unescape_value()
                .map_err(|err| format!("attribute '{key}' has a bad value: {err}"))?;
            Ok((key.to_string(), value.into_owned()))
        })
        .collect()
}

fn attribute<'a>(attrs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

fn parse_tile(e: &BytesStart<'_>) -> std::result::Result<BaseTile, String> {
    let attrs = attributes(e)?;
    let lookup = |key: &str| attribute(&attrs, key);

    let name = lookup("name").ok_or_else(|| "tile without a 'name' attribute".to_string())?;
    // A missing class is left empty and rejected when the catalog is expanded
    let mut tile = BaseTile::new(name, lookup("symmetry").unwrap_or_default());

    if let Some(weight) = lookup("weight") {
        let weight = weight
            .trim()
            .parse::<f64>()
            .map_err(|err| format!("tile '{name}' has unparsable weight '{weight}': {err}"))?;
        tile = tile.with_weight(weight);
    }

    for side in Side::ALL {
        if let Some(label) = lookup(side.name()) {
            tile = tile.with_edge(side, label);
        }
    }

    Ok(tile)
}

fn attach_edge(tile: Option<&mut BaseTile>, e: &BytesStart<'_>) -> std::result::Result<(), String> {
    let tile = tile.ok_or_else(|| "<edge> outside of a <tile>".to_string())?;
    let attrs = attributes(e)?;
    let lookup = |key: &str| attribute(&attrs, key);

    let side_name = lookup("side")
        .ok_or_else(|| format!("edge of tile '{}' has no 'side'", tile.name))?;
    let side: Side = side_name
        .parse()
        .map_err(|err| format!("edge of tile '{}': {err}", tile.name))?;
    let label = lookup("label")
        .ok_or_else(|| format!("{side} edge of tile '{}' has no 'label'", tile.name))?;

    tile.edges.insert(side, label.to_string());
    Ok(())
}
