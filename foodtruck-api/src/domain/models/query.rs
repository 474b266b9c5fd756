use serde_json::{json, Map, Value};

use super::Position;

/// The geospatial part of a vendor query. All positions are in store order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeoPredicate {
    /// Records inside the rectangle spanned by two corners.
    WithinBox { corners: [Position; 2] },
    /// Records inside a spherical cap; the radius is an angle in radians.
    WithinSphere { center: Position, radius_radians: f64 },
    /// Records ordered by proximity, no further than `max_distance_degrees`.
    Near {
        center: Position,
        max_distance_degrees: f64,
    },
}

/// A fully parameterized query against the vendor store.
#[derive(Debug, Clone, PartialEq)]
pub struct VendorQuery {
    pub predicate: GeoPredicate,
    pub facility_type: Option<String>,
    pub status: Option<String>,
}

impl VendorQuery {
    pub fn is_box(&self) -> bool {
        matches!(self.predicate, GeoPredicate::WithinBox { .. })
    }

    /// Render the query as a document-store filter, e.g.
    /// `{"loc": {"$near": [-122.4, 37.7], "$maxDistance": 0.14}, "status": "APPROVED"}`.
    pub fn to_document(&self) -> Value {
        let loc = match self.predicate {
            GeoPredicate::WithinBox { corners } => json!({
                "$geoWithin": { "$box": [<[f64; 2]>::from(corners[0]), <[f64; 2]>::from(corners[1])] }
            }),
            GeoPredicate::WithinSphere {
                center,
                radius_radians,
            } => json!({
                "$geoWithin": { "$centerSphere": [<[f64; 2]>::from(center), radius_radians] }
            }),
            GeoPredicate::Near {
                center,
                max_distance_degrees,
            } => json!({
                "$near": <[f64; 2]>::from(center),
                "$maxDistance": max_distance_degrees
            }),
        };

        let mut document = Map::new();
        document.insert("loc".to_string(), loc);
        if let Some(facility_type) = &self.facility_type {
            document.insert("facilitytype".to_string(), json!(facility_type));
        }
        if let Some(status) = &self.status {
            document.insert("status".to_string(), json!(status));
        }
        Value::Object(document)
    }
}
