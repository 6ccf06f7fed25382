use std::f64::consts::PI;

use crate::geo::{haversine_m, Coordinate, METERS_PER_KM};

use super::TrackerConfig;

/// Number of points for a leg of `distance_km`: ten per kilometre, at least
/// `min_route_points`.
pub fn route_point_count(distance_km: f64, config: &TrackerConfig) -> usize {
    let scaled = (distance_km.max(0.0) * config.points_per_km).floor() as usize;
    scaled.max(config.min_route_points)
}

/// Interpolate a leg from `start` to `end`.
///
/// Points are spaced linearly and pushed sideways by `sin(t * pi)` times the
/// wobble amplitude, so the path bows gently and still begins exactly at
/// `start` and ends exactly at `end`. The amplitude never exceeds a tenth of
/// the leg length.
pub fn interpolate_route(start: Coordinate, end: Coordinate, config: &TrackerConfig) -> Vec<Coordinate> {
    let distance_km = haversine_m(start, end) / METERS_PER_KM;
    let count = route_point_count(distance_km, config).max(2);

    let dlat = end.lat() - start.lat();
    // Take the short way across the antimeridian.
    let mut dlng = end.lng() - start.lng();
    if dlng > 180.0 {
        dlng -= 360.0;
    } else if dlng < -180.0 {
        dlng += 360.0;
    }
    let span = dlat.hypot(dlng);
    let (perp_lat, perp_lng) = if span > 0.0 {
        (-dlng / span, dlat / span)
    } else {
        (0.0, 0.0)
    };
    let amplitude = config.lateral_wobble_deg.min(span * 0.1);

    let last = count - 1;
    (0..count)
        .map(|i| {
            if i == 0 {
                return start;
            }
            if i == last {
                return end;
            }
            let t = i as f64 / last as f64;
            let offset = (t * PI).sin() * amplitude;
            Coordinate::normalized(
                start.lat() + dlat * t + perp_lat * offset,
                start.lng() + dlng * t + perp_lng * offset,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng).expect("valid coordinate")
    }

    #[test]
    fn short_legs_use_the_minimum_point_count() {
        let config = TrackerConfig::default();
        assert_eq!(route_point_count(0.0, &config), 15);
        assert_eq!(route_point_count(1.4, &config), 15);
        assert_eq!(route_point_count(2.37, &config), 23);
    }

    #[test]
    fn route_starts_and_ends_on_the_endpoints() {
        let config = TrackerConfig::default();
        let start = coord(-1.9441, 30.0619);
        let end = coord(-1.9900, 30.1200);
        let route = interpolate_route(start, end, &config);
        let expected = route_point_count(haversine_m(start, end) / 1000.0, &config);
        assert_eq!(route.len(), expected);
        assert_eq!(route[0], start);
        assert_eq!(*route.last().unwrap(), end);
        assert!(route.iter().all(Coordinate::is_valid));
    }

    #[test]
    fn remaining_distance_shrinks_along_the_route() {
        let config = TrackerConfig::default();
        let start = coord(-1.9441, 30.0619);
        let end = coord(-1.9900, 30.1200);
        let route = interpolate_route(start, end, &config);
        let remaining: Vec<f64> = route.iter().map(|p| haversine_m(*p, end)).collect();
        assert!(remaining.windows(2).all(|w| w[1] < w[0]));
    }

    #[test]
    fn wobble_bends_the_middle_of_the_path() {
        let config = TrackerConfig::default();
        let start = coord(0.0, 0.0);
        let end = coord(0.0, 0.05);
        let route = interpolate_route(start, end, &config);
        let mid = route[route.len() / 2];
        assert!(mid.lat().abs() > 0.0);
        assert!(mid.lat().abs() <= config.lateral_wobble_deg + 1e-12);

        let straight = interpolate_route(start, end, &config.clone().with_lateral_wobble_deg(0.0));
        assert!(straight.iter().all(|p| p.lat() == 0.0));
    }

    #[test]
    fn antimeridian_leg_takes_the_short_way() {
        let config = TrackerConfig::default();
        let start = coord(0.0, 179.998);
        let end = coord(0.0, -179.998);
        let route = interpolate_route(start, end, &config);
        assert_eq!(route[0], start);
        assert_eq!(*route.last().unwrap(), end);
        assert!(route.iter().all(Coordinate::is_valid));
        assert!(route[1..route.len() - 1].iter().all(|p| p.lng().abs() > 179.9));

        let leg_m = haversine_m(start, end);
        let max_hop = route
            .windows(2)
            .map(|w| haversine_m(w[0], w[1]))
            .fold(0.0, f64::max);
        assert!(max_hop < leg_m, "hop {max_hop} m on a {leg_m} m leg");
    }

    #[test]
    fn degenerate_leg_still_has_points() {
        let spot = coord(-1.9441, 30.0619);
        let route = interpolate_route(spot, spot, &TrackerConfig::default());
        assert_eq!(route.len(), 15);
        assert!(route.iter().all(|p| *p == spot));
    }
}
