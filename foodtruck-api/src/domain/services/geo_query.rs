use crate::domain::models::{
    GeoPredicate, Position, ResolvedLocation, SearchRequest, VendorQuery, EARTH_RADIUS_MILES,
    MILES_PER_DEGREE,
};

/// Pick the geospatial strategy for a resolved location and attach the
/// equality filters.
///
/// * two corners: box containment
/// * a point with `radius_filter`: spherical cap of `miles / 3959` radians
/// * a point without it: nearest first, bounded by `max_distance / 69` degrees
pub fn build_query(location: &ResolvedLocation, request: &SearchRequest) -> VendorQuery {
    let predicate = match location {
        ResolvedLocation::Box([first, second]) => GeoPredicate::WithinBox {
            corners: [Position::from(*first), Position::from(*second)],
        },
        ResolvedLocation::Point(point) => match request.radius_filter {
            Some(miles) => GeoPredicate::WithinSphere {
                center: Position::from(*point),
                radius_radians: miles / EARTH_RADIUS_MILES,
            },
            None => GeoPredicate::Near {
                center: Position::from(*point),
                max_distance_degrees: request.max_distance / MILES_PER_DEGREE,
            },
        },
    };

    VendorQuery {
        predicate,
        facility_type: request.category_filter.clone(),
        status: request.status.clone(),
    }
}
