//! Point-in-region membership
//!
//! Even-odd ray casting over outer rings only. A point inside any ring of a
//! region is a member; holes are not subtracted.

use geo::Coord;

use crate::domain::{DataPoint, LatLng, RegionBoundary};

/// Even-odd test of `point` against `ring`
///
/// The ring may be open or closed; the last vertex always connects back to
/// the first. Points exactly on an edge may land on either side.
pub fn contains(point: LatLng, ring: &[Coord<f64>]) -> bool {
    let (x, y) = (point.lon, point.lat);
    let mut inside = false;

    let mut j = match ring.len() {
        0 => return false,
        n => n - 1,
    };
    for (i, vi) in ring.iter().enumerate() {
        let vj = ring[j];
        if (vi.y > y) != (vj.y > y) && x < (vj.x - vi.x) * (y - vi.y) / (vj.y - vi.y) + vi.x {
            inside = !inside;
        }
        j = i;
    }

    inside
}

/// Check whether `point` falls in any ring of `region`
pub fn region_contains(region: &RegionBoundary, point: LatLng) -> bool {
    region.rings.iter().any(|ring| contains(point, ring))
}

/// Points inside `region`, in input order
pub fn find_members<'a>(points: &'a [DataPoint], region: &RegionBoundary) -> Vec<&'a DataPoint> {
    points
        .iter()
        .filter(|p| region_contains(region, p.position))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AdminLevel;
    use crate::points::PointLayer;

    fn ring(coords: &[(f64, f64)]) -> Vec<Coord<f64>> {
        coords.iter().map(|&(x, y)| Coord { x, y }).collect()
    }

    fn unit_square() -> Vec<Coord<f64>> {
        ring(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)])
    }

    /// Straightforward reference: count edge crossings of a ray towards +x
    fn reference_crossings(point: LatLng, ring: &[Coord<f64>]) -> bool {
        let n = ring.len();
        let mut crossings = 0;
        for k in 0..n {
            let a = ring[k];
            let b = ring[(k + 1) % n];
            let straddles = (a.y <= point.lat && b.y > point.lat) || (b.y <= point.lat && a.y > point.lat);
            if straddles {
                let t = (point.lat - a.y) / (b.y - a.y);
                if point.lon < a.x + t * (b.x - a.x) {
                    crossings += 1;
                }
            }
        }
        crossings % 2 == 1
    }

    #[test]
    fn test_square_inside_and_outside() {
        let sq = unit_square();
        assert!(contains(LatLng::new(0.5, 0.5), &sq));
        assert!(!contains(LatLng::new(1.5, 0.5), &sq));
        assert!(!contains(LatLng::new(0.5, -0.5), &sq));
    }

    #[test]
    fn test_closed_ring_matches_open_ring() {
        let open = unit_square();
        let mut closed = open.clone();
        closed.push(open[0]);
        for &(lat, lon) in &[(0.5, 0.5), (0.1, 0.9), (2.0, 2.0), (-0.1, 0.5)] {
            let p = LatLng::new(lat, lon);
            assert_eq!(contains(p, &open), contains(p, &closed));
        }
    }

    #[test]
    fn test_matches_reference_on_concave_ring() {
        // An L-shaped ring
        let l_shape = ring(&[
            (0.0, 0.0),
            (3.0, 0.0),
            (3.0, 1.0),
            (1.0, 1.0),
            (1.0, 3.0),
            (0.0, 3.0),
        ]);
        for i in 0..40 {
            for j in 0..40 {
                let p = LatLng::new(-0.45 + j as f64 * 0.1, -0.45 + i as f64 * 0.1);
                assert_eq!(contains(p, &l_shape), reference_crossings(p, &l_shape), "{p:?}");
            }
        }
        assert!(contains(LatLng::new(2.0, 0.5), &l_shape));
        assert!(!contains(LatLng::new(2.0, 2.0), &l_shape));
    }

    #[test]
    fn test_far_point_is_never_inside() {
        let sq = unit_square();
        assert!(!contains(LatLng::new(1000.0, -1000.0), &sq));
        assert!(!contains(LatLng::new(-50.0, 50.0), &sq));
    }

    #[test]
    fn test_degenerate_rings() {
        assert!(!contains(LatLng::new(0.0, 0.0), &[]));
        assert!(!contains(LatLng::new(0.0, 0.0), &ring(&[(0.0, 0.0)])));
    }

    #[test]
    fn test_multi_ring_is_union_and_holes_ignored() {
        let region = RegionBoundary {
            name: "Test".to_string(),
            level: AdminLevel::County,
            parent: None,
            kind: None,
            rings: vec![
                unit_square(),
                ring(&[(5.0, 5.0), (6.0, 5.0), (6.0, 6.0), (5.0, 6.0)]),
            ],
        };
        assert!(region_contains(&region, LatLng::new(0.5, 0.5)));
        assert!(region_contains(&region, LatLng::new(5.5, 5.5)));
        assert!(!region_contains(&region, LatLng::new(3.0, 3.0)));
    }

    #[test]
    fn test_find_members_filters_in_order() {
        let mut layer = PointLayer::new(6);
        layer.add(LatLng::new(0.2, 0.2), "A", "", None, None);
        layer.add(LatLng::new(4.0, 4.0), "B", "", None, None);
        layer.add(LatLng::new(0.8, 0.7), "C", "", None, None);
        let region = RegionBoundary {
            name: "Square".to_string(),
            level: AdminLevel::Municipality,
            parent: Some("X".to_string()),
            kind: None,
            rings: vec![unit_square()],
        };
        let members: Vec<&str> = find_members(layer.points(), &region)
            .iter()
            .map(|p| p.city.as_str())
            .collect();
        assert_eq!(members, vec!["A", "C"]);
    }
}
