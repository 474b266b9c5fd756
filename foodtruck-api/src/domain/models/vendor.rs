use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Coordinate, Position};

/// Identifier of a vendor permit in the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VendorId(String);

impl VendorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VendorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for VendorId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A mobile food vendor as stored in the vendor collection.
///
/// `distance` is never stored; the result pipeline fills it in (miles) for
/// queries that have an anchor point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vendor {
    pub id: VendorId,
    #[serde(default)]
    pub applicant: String,
    #[serde(default)]
    pub facilitytype: String,
    #[serde(default)]
    pub fooditems: String,
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub loc: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

impl Vendor {
    /// The vendor's location in request order (latitude first).
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::from(self.loc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_store_record_without_distance() {
        let vendor: Vendor = serde_json::from_str(
            r#"{
                "id": "1337",
                "applicant": "Senor Sisig",
                "facilitytype": "Truck",
                "fooditems": "Filipino fusion: sisig tacos",
                "status": "APPROVED",
                "loc": [-122.426549, 37.777863]
            }"#,
        )
        .unwrap();

        assert_eq!(vendor.id.as_str(), "1337");
        assert_eq!(vendor.coordinate(), Coordinate::new(37.777863, -122.426549));
        assert!(vendor.distance.is_none());

        let json = serde_json::to_value(&vendor).unwrap();
        assert!(json.get("distance").is_none());
        assert!(json.get("address").is_none());
    }

    #[test]
    fn missing_text_fields_default_to_empty() {
        let vendor: Vendor =
            serde_json::from_str(r#"{"id": "7", "loc": [-122.4, 37.7]}"#).unwrap();
        assert_eq!(vendor.fooditems, "");
        assert_eq!(vendor.applicant, "");
    }
}
