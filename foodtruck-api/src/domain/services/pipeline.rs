use itertools::Itertools;
use tracing::debug;

use crate::domain::models::{Coordinate, SearchRequest, SortOrder, TextFilter, Vendor};

/// Post-process store records: offset, text filter, distances, sort.
///
/// `anchor` is the resolved point for radius and nearest queries and `None`
/// for box queries, which are never annotated with distances or sorted by
/// them.
pub fn apply(vendors: Vec<Vendor>, request: &SearchRequest, anchor: Option<Coordinate>) -> Vec<Vendor> {
    let fetched = vendors.len();
    let mut vendors: Vec<Vendor> = vendors.into_iter().skip(request.offset).collect();

    if let Some(filter) = &request.text_filter {
        vendors = filter_by_text(vendors, filter, request.sort);
    }

    if let Some(anchor) = anchor {
        annotate_distance(&mut vendors, anchor);
        if request.sort == SortOrder::Distance {
            vendors.sort_by(|a, b| distance_of(a).total_cmp(&distance_of(b)));
        }
    }

    debug!(fetched, returned = vendors.len(), "applied result pipeline");
    vendors
}

fn filter_by_text(vendors: Vec<Vendor>, filter: &TextFilter, sort: SortOrder) -> Vec<Vendor> {
    let matching = vendors.into_iter().filter(|v| filter.matches(v));

    if sort != SortOrder::NameOrItem {
        return matching.collect();
    }
    if filter.name().is_some() {
        matching.sorted_by(|a, b| a.applicant.cmp(&b.applicant)).collect()
    } else {
        matching.sorted_by(|a, b| a.fooditems.cmp(&b.fooditems)).collect()
    }
}

fn annotate_distance(vendors: &mut [Vendor], anchor: Coordinate) {
    for vendor in vendors {
        vendor.distance = Some(anchor.great_circle_miles(&vendor.coordinate()));
    }
}

fn distance_of(vendor: &Vendor) -> f64 {
    vendor.distance.unwrap_or(f64::INFINITY)
}
