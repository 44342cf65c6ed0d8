use std::io::Write;

use error_stack::{Result, ResultExt};
use geojson::{Feature, FeatureCollection, Geometry, Value};

use crate::errors::PolyIoError;
use crate::poly::{Poly, Polygon};

/// A `Polygon` feature with a single closed linear ring in `[lon, lat]` order.
pub fn to_geojson_feature(polygon: &Polygon) -> Feature {
    let mut coords: Vec<Vec<f64>> = polygon.ring.iter()
        .map(|p| vec![p.lon, p.lat])
        .collect();
    if let Some(first) = coords.first().cloned() {
        coords.push(first);
    }

    let mut properties = serde_json::Map::new();
    properties.insert(String::from("name"), serde_json::Value::String(polygon.name.clone()));
    properties.insert(String::from("hole"), serde_json::Value::Bool(polygon.is_hole()));
    properties.insert(String::from("vertices"),
        serde_json::Value::Number(serde_json::Number::from(polygon.ring.len())));

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Polygon(vec![coords]))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

pub fn to_geojson_feature_collection(poly: &Poly) -> FeatureCollection {
    let features: Vec<Feature> = poly.polygons.iter()
        .map(to_geojson_feature)
        .collect();

    let mut foreign_members = serde_json::Map::new();
    foreign_members.insert(String::from("name"), serde_json::Value::String(poly.name.clone()));

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: Some(foreign_members),
    }
}

pub fn write_geojson<W: Write>(poly: &Poly, mut writer: W) -> Result<(), PolyIoError> {
    let feature_collection = to_geojson_feature_collection(poly);
    serde_json::to_writer_pretty(&mut writer, &feature_collection).change_context(PolyIoError)?;
    writeln!(writer).change_context(PolyIoError)?;
    writer.flush().change_context(PolyIoError)
}
