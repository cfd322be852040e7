use crate::core::distance::{calculate_bounding_box, haversine_distance, is_within_bounding_box};
use crate::models::Event;

/// Default search radius in kilometers when the caller does not supply one.
pub const DEFAULT_RADIUS_KM: f64 = 100.0;

/// Filter events to those within `radius_km` of a point.
///
/// Events without coordinates are excluded regardless of radius. A bounding
/// box pre-filter skips the haversine for points that are obviously out of
/// range; the box contains the full circle, so results are identical to a
/// pure haversine pass. Input order is preserved.
pub fn nearby_events(lat: f64, lon: f64, events: Vec<Event>, radius_km: f64) -> Vec<Event> {
    let bbox = calculate_bounding_box(lat, lon, radius_km);

    events
        .into_iter()
        .filter(|event| match event.coords() {
            Some((ev_lat, ev_lon)) => {
                is_within_bounding_box(ev_lat, ev_lon, &bbox)
                    && haversine_distance(lat, lon, ev_lat, ev_lon) <= radius_km
            }
            None => false,
        })
        .collect()
}
