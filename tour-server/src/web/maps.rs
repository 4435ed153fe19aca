//! Google Maps directions links.
//!
//! Builds a walking-directions URL that opens the planned tour in Google
//! Maps, with every stop but the last as a waypoint.

use crate::domain::{Coordinate, Route};

const DIRECTIONS_BASE: &str = "https://www.google.com/maps/dir/";

/// Generate a walking-directions URL from `start` through every stop.
///
/// Returns `None` for an empty route.
///
/// # Example
///
/// ```ignore
/// // Start at 50.45,30.52 and visit one stop at 50.46,30.51:
/// let url = directions_url(start, &route);
/// // Returns: "https://www.google.com/maps/dir/?api=1&origin=50.45,30.52&destination=50.46,30.51&travelmode=walking"
/// ```
pub fn directions_url(start: Coordinate, route: &Route) -> Option<String> {
    let stops: Vec<Coordinate> = route.places().map(|p| p.coordinate).collect();
    let (destination, waypoints) = stops.split_last()?;

    let mut url = format!("{DIRECTIONS_BASE}?api=1&origin={start}&destination={destination}");

    if !waypoints.is_empty() {
        let joined: Vec<String> = waypoints.iter().map(Coordinate::to_string).collect();
        url.push_str("&waypoints=");
        url.push_str(&joined.join("|"));
    }

    url.push_str("&travelmode=walking");
    Some(url)
}
