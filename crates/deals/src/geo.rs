//! Great-circle geometry.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// A latitude/longitude pair in decimal degrees.
///
/// Coordinates are assumed valid; ranges are not checked here. Malformed
/// input produces a mathematically defined but meaningless distance.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Haversine distance between two coordinates, in kilometers.
pub fn haversine_km(from: Coordinate, to: Coordinate) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let dlat = (to.latitude - from.latitude).to_radians();
    let dlon = (to.longitude - from.longitude).to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_distance_to_self() {
        let p = Coordinate::new(-23.3217, -46.7289);
        assert_eq!(haversine_km(p, p), 0.0);
    }

    #[test]
    fn known_city_pair() {
        // Sao Paulo to Rio de Janeiro, roughly 360 km great-circle.
        let sp = Coordinate::new(-23.5505, -46.6333);
        let rio = Coordinate::new(-22.9068, -43.1729);
        let d = haversine_km(sp, rio);
        assert!((d - 361.0).abs() < 5.0, "got {d}");
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: distance is symmetric.
            #[test]
            fn symmetric(
                lat1 in -90.0f64..90.0, lon1 in -180.0f64..180.0,
                lat2 in -90.0f64..90.0, lon2 in -180.0f64..180.0,
            ) {
                let a = Coordinate::new(lat1, lon1);
                let b = Coordinate::new(lat2, lon2);
                prop_assert!((haversine_km(a, b) - haversine_km(b, a)).abs() < 1e-9);
            }

            /// Property: distance is non-negative and bounded by half the
            /// Earth's circumference.
            #[test]
            fn bounded(
                lat1 in -90.0f64..90.0, lon1 in -180.0f64..180.0,
                lat2 in -90.0f64..90.0, lon2 in -180.0f64..180.0,
            ) {
                let d = haversine_km(Coordinate::new(lat1, lon1), Coordinate::new(lat2, lon2));
                prop_assert!(d >= 0.0);
                prop_assert!(d <= 6371.0 * core::f64::consts::PI + 1e-6);
            }
        }
    }
}
