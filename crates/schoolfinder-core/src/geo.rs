//! Great-circle distance and proximity ranking

use crate::model::{Coordinate, RankedSchool, School};

/// Mean Earth radius used by the haversine formula
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Gets distance in kilometres between two points using the haversine formula.
///
/// Inputs are decimal degrees and are not range-checked.
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.).sin().powi(2);
    // rounding can push `a` just past 1 for near-antipodal points
    let a = a.min(1.);
    let c = 2. * a.sqrt().atan2((1. - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Annotates every school with its distance from `origin` and sorts ascending.
///
/// The sort is stable: schools at equal distance keep their input order.
pub fn rank_by_distance(origin: Coordinate, schools: Vec<School>) -> Vec<RankedSchool> {
    let mut ranked = schools
        .into_iter()
        .map(|school| {
            let distance = distance_km(
                origin.latitude(),
                origin.longitude(),
                school.latitude,
                school.longitude,
            );
            RankedSchool { school, distance }
        })
        .collect::<Vec<_>>();

    ranked.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn school(id: i64, latitude: f64, longitude: f64) -> School {
        School {
            id,
            name: format!("School {id}"),
            address: format!("{id} Main St"),
            latitude,
            longitude,
        }
    }

    #[test]
    fn test_known_distance() {
        // London -> Paris is roughly 343.5 km on a 6371 km sphere
        let d = distance_km(51.5074, -0.1278, 48.8566, 2.3522);
        assert!((d - 343.5).abs() < 1.0, "got {d}");
    }

    #[test]
    fn test_antipodes_half_circumference() {
        let d = distance_km(0.0, 0.0, 0.0, 180.0);
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }

    #[test]
    fn test_rank_orders_ascending() {
        let origin = Coordinate::new(0.0, 0.0).unwrap();
        // One degree of longitude at the equator is ~111.19 km
        let schools = vec![school(1, 0.0, 5.0), school(2, 0.0, 1.0), school(3, 0.0, 3.0)];

        let ranked = rank_by_distance(origin, schools);
        let ids: Vec<i64> = ranked.iter().map(|r| r.school.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
        assert!(ranked.windows(2).all(|w| w[0].distance <= w[1].distance));
    }

    #[test]
    fn test_rank_ties_keep_input_order() {
        let origin = Coordinate::new(10.0, 10.0).unwrap();
        let schools = vec![school(7, 10.0, 11.0), school(3, 10.0, 11.0), school(5, 10.0, 10.0)];

        let ranked = rank_by_distance(origin, schools);
        let ids: Vec<i64> = ranked.iter().map(|r| r.school.id).collect();
        assert_eq!(ids, vec![5, 7, 3]);
    }

    #[test]
    fn test_rank_empty() {
        let origin = Coordinate::new(0.0, 0.0).unwrap();
        assert!(rank_by_distance(origin, Vec::new()).is_empty());
    }

    proptest! {
        #[test]
        fn prop_distance_symmetric(
            lat1 in -90.0f64..=90.0, lon1 in -180.0f64..=180.0,
            lat2 in -90.0f64..=90.0, lon2 in -180.0f64..=180.0,
        ) {
            let ab = distance_km(lat1, lon1, lat2, lon2);
            let ba = distance_km(lat2, lon2, lat1, lon1);
            prop_assert!((ab - ba).abs() < 1e-6, "ab={} ba={}", ab, ba);
        }

        #[test]
        fn prop_distance_to_self_is_zero(lat in -90.0f64..=90.0, lon in -180.0f64..=180.0) {
            prop_assert_eq!(distance_km(lat, lon, lat, lon), 0.0);
        }

        #[test]
        fn prop_distance_bounded(
            lat1 in -90.0f64..=90.0, lon1 in -180.0f64..=180.0,
            lat2 in -90.0f64..=90.0, lon2 in -180.0f64..=180.0,
        ) {
            let d = distance_km(lat1, lon1, lat2, lon2);
            prop_assert!(d >= 0.0);
            prop_assert!(d <= std::f64::consts::PI * EARTH_RADIUS_KM + 1e-6);
        }
    }
}
