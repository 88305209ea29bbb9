//! World-map GeoJSON ingestion.
//!
//! The map renderer draws geometry on the JS side; the Rust side only needs
//! to validate the document and extract the country names used to join map
//! features against the CSV tables.

use anyhow::{bail, Context, Result};
use geojson::{Feature, GeoJson};

/// A validated world-geometry document.
///
/// The raw text is kept verbatim so it can be handed to D3 without a
/// re-serialization round trip.
#[derive(Debug, Clone)]
pub struct WorldGeometry {
    raw: String,
    names: Vec<String>,
}

impl WorldGeometry {
    /// Parse and validate a GeoJSON FeatureCollection of country polygons.
    pub fn parse(text: &str) -> Result<Self> {
        let geojson: GeoJson = text
            .parse()
            .context("world geometry is not valid GeoJSON")?;

        let collection = match geojson {
            GeoJson::FeatureCollection(fc) => fc,
            _ => bail!("world geometry must be a FeatureCollection"),
        };

        let mut names = Vec::with_capacity(collection.features.len());
        for feature in &collection.features {
            match feature_name(feature) {
                Some(name) => names.push(name.to_string()),
                None => log::warn!("world geometry feature without a name property"),
            }
        }

        Ok(WorldGeometry {
            raw: text.to_string(),
            names,
        })
    }

    /// Country names in feature order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn feature_count(&self) -> usize {
        self.names.len()
    }

    /// The original GeoJSON text, for the JS renderer.
    pub fn raw_json(&self) -> &str {
        &self.raw
    }
}

/// The D3 gallery world file keys features by `name`; Natural Earth exports
/// use `ADMIN`.
fn feature_name(feature: &Feature) -> Option<&str> {
    let props = feature.properties.as_ref()?;
    props
        .get("name")
        .or_else(|| props.get("ADMIN"))
        .and_then(|v| v.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORLD: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": {"name": "Numeria"},
                "geometry": {"type": "Polygon", "coordinates": [[[0,0],[1,0],[1,1],[0,0]]]}
            },
            {
                "type": "Feature",
                "properties": {"ADMIN": "Borduria"},
                "geometry": {"type": "Polygon", "coordinates": [[[2,2],[3,2],[3,3],[2,2]]]}
            }
        ]
    }"#;

    #[test]
    fn parses_names_from_either_property() {
        let geometry = WorldGeometry::parse(WORLD).unwrap();
        assert_eq!(geometry.feature_count(), 2);
        assert_eq!(geometry.names(), ["Numeria", "Borduria"]);
    }

    #[test]
    fn rejects_non_collection_documents() {
        let point = r#"{"type": "Point", "coordinates": [0, 0]}"#;
        assert!(WorldGeometry::parse(point).is_err());
        assert!(WorldGeometry::parse("not json").is_err());
    }

    #[test]
    fn raw_text_is_preserved_verbatim() {
        let geometry = WorldGeometry::parse(WORLD).unwrap();
        assert_eq!(geometry.raw_json(), WORLD);
    }
}
