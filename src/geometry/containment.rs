use crate::geometry::GeoPoint;

/// Ray-casting even-odd point-in-polygon test on raw lat/lon.
///
/// Casts a horizontal ray from the query point toward increasing longitude
/// and toggles parity for every polygon edge it crosses. The latitude test
/// is half-open (one endpoint strictly above the ray, the other at or
/// below), which keeps an edge pair sharing a vertex at the ray's latitude
/// from being counted twice.
///
/// Coordinates are treated as a flat Euclidean plane; there is no geodesic
/// correction and no epsilon, so a query exactly on an edge or vertex gets
/// whatever classification the half-open rule produces. The result is
/// deterministic for identical inputs.
///
/// Works for any simple polygon, convex or not, in either winding order.
/// Callers must supply at least 3 vertices; fewer is a contract violation,
/// not a runtime condition.
pub fn contains(polygon: &[GeoPoint], query: GeoPoint) -> bool {
    debug_assert!(polygon.len() >= 3, "polygon needs at least 3 vertices");

    let mut inside = false;

    for (i, a) in polygon.iter().enumerate() {
        let b = polygon[(i + 1) % polygon.len()];

        // Half-open latitude band: exactly one endpoint strictly above the ray
        if (a.lat > query.lat) != (b.lat > query.lat) {
            // Longitude where the edge crosses the ray's latitude
            let cross_lon = a.lon + (query.lat - a.lat) / (b.lat - a.lat) * (b.lon - a.lon);
            if cross_lon > query.lon {
                inside = !inside;
            }
        }
    }

    inside
}
