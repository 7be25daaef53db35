//! Codec scenarios over shared fixtures, including lists the engine wrote.

use meshbridge_core::Separators;
use meshbridge_geometry::{
    decode, decode_with_report, encode, encode_polygons, Geometry, GeometryList, Polygon,
    RingAnomaly, RingRole,
};
use meshbridge_native::GeometryListNative;
use meshbridge_pin::Pinnable;
use meshbridge_test_utils::fixtures::{regular_ring, square_with_hole};
use meshbridge_test_utils::init_logging;
use proptest::prelude::*;

#[test]
fn square_with_hole_encodes_to_eight_triples() {
    let list = encode_polygons(&[square_with_hole()], Separators::default());
    assert_eq!(list.number_of_coordinates(), 8);
    assert_eq!(list.x(), &[0.0, 1.0, 1.0, 0.0, -998.0, 0.2, 0.4, 0.2]);
    assert_eq!(list.y(), &[0.0, 0.0, 1.0, 1.0, -998.0, 0.2, 0.2, 0.4]);
    assert_eq!(list.values(), &[0.0, 0.0, 0.0, 0.0, -998.0, 0.0, 0.0, 0.0]);
}

#[test]
fn list_written_by_the_engine_decodes() {
    init_logging();
    let mut source = encode(
        &[
            Geometry::from(square_with_hole()),
            Geometry::from(Polygon::new(regular_ring(5, 10.0, 10.0, 1.0), [])),
        ],
        Separators::default(),
    );
    let native: GeometryListNative = *source.create_native_view();
    // SAFETY: `source` stays pinned and holds `number_of_coordinates` of each.
    let copied = unsafe { GeometryList::from_native(&native) };
    source.unpin();

    assert_eq!(copied, source);
    let polygons = decode(&copied);
    assert_eq!(polygons.len(), 2);
    assert_eq!(polygons[0].interiors.len(), 1);
    assert_eq!(polygons[1].exterior.len(), 6);
    assert!(polygons[1].exterior.is_closed());
}

#[test]
fn engine_output_with_a_stray_separator_reports_an_empty_hole() {
    let x = vec![0.0, 1.0, 1.0, 0.0, -998.0];
    let y = vec![0.0, 0.0, 1.0, 1.0, -998.0];
    let list = GeometryList::from_arrays(x, y, vec![0.0; 5], Separators::default());
    let decoded = decode_with_report(&list, 1e-10);
    assert_eq!(decoded.polygons.len(), 1);
    assert_eq!(decoded.polygons[0].interiors.len(), 1);
    assert!(decoded.polygons[0].interiors[0].is_empty());
    assert!(decoded.anomalies.contains(&RingAnomaly::Empty {
        polygon: 0,
        ring: RingRole::Interior(0),
    }));
}

proptest! {
    #[test]
    fn rings_survive_a_round_trip(sizes in prop::collection::vec(3usize..12, 1..5)) {
        let polygons: Vec<Polygon> = sizes
            .iter()
            .enumerate()
            .map(|(i, &n)| {
                let cx = 10.0 * i as f64;
                Polygon::new(regular_ring(n, cx, 0.0, 2.0), [regular_ring(3, cx, 0.0, 0.5)])
            })
            .collect();
        let list = encode_polygons(&polygons, Separators::new(-5000.0, -4000.0));
        let decoded = decode(&list);
        prop_assert_eq!(decoded.len(), polygons.len());
        for (got, want) in decoded.iter().zip(&polygons) {
            prop_assert_eq!(&got.exterior, &want.exterior.closed());
            prop_assert_eq!(&got.interiors[0], &want.interiors[0].closed());
        }
    }
}
