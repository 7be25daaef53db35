//! Full exchange cycles against the mock engine: every routine must hand
//! back fresh copies and leave nothing pinned.

use meshbridge_core::{ConfigError, ExchangeConfig, ExitCategory, Separators};
use meshbridge_geometry::{encode_polygons, Geometry};
use meshbridge_kernel::Exchange;
use meshbridge_mesh::{FaceData, Mesh2D};
use meshbridge_pin::Pinnable;
use meshbridge_test_utils::fixtures::{
    polyline_mesh1d, quad_mesh, sample_contacts, small_grid, square_with_hole, unit_square_mesh,
};
use meshbridge_test_utils::{init_logging, MockKernel};

#[test]
fn separators_come_from_the_engine() {
    let kernel = MockKernel::with_separators(Separators::new(-1234.0, -4321.0));
    let exchange = Exchange::new(&kernel);
    assert_eq!(exchange.separators(), Separators::new(-1234.0, -4321.0));

    let list = exchange.encode(&[Geometry::from(square_with_hole())]);
    assert_eq!(list.inner_outer_separator(), -4321.0);
    assert_eq!(list.x()[4], -4321.0);
}

#[test]
fn version_and_last_error_read_text_buffers() {
    let kernel = MockKernel::new();
    kernel.set_version("7.0.1");
    let exchange = Exchange::new(&kernel);
    assert_eq!(exchange.version().unwrap(), "7.0.1");
    assert_eq!(exchange.last_error().unwrap(), "");
}

#[test]
fn undersized_text_capacity_is_rejected() {
    let kernel = MockKernel::new();
    let config = ExchangeConfig {
        error_message_capacity: 8,
        ..ExchangeConfig::default()
    };
    assert_eq!(
        Exchange::with_config(&kernel, config).err(),
        Some(ConfigError::TextCapacityTooSmall {
            which: "error message",
            capacity: 8,
            minimum: 512,
        })
    );
}

#[test]
fn oversized_text_capacity_reads_engine_message() {
    let kernel = MockKernel::new();
    let state = kernel.new_state();
    let config = ExchangeConfig {
        error_message_capacity: 2048,
        version_capacity: 256,
        ..ExchangeConfig::default()
    };
    let exchange = Exchange::with_config(&kernel, config).unwrap();
    kernel.fail_call("mesh2d_set", ExitCategory::MeshGeometryError, "bad node");
    let err = exchange.set_mesh2d(state, &mut unit_square_mesh()).unwrap_err();
    assert_eq!(err.message, "bad node");
    assert_eq!(exchange.version().unwrap(), "2.1.0-mock");
}

#[test]
fn mesh2d_round_trips_through_the_engine() {
    init_logging();
    let kernel = MockKernel::new();
    let state = kernel.new_state();
    let exchange = Exchange::new(&kernel);

    let mut mesh = quad_mesh(2);
    exchange.set_mesh2d(state, &mut mesh).unwrap();
    assert!(!mesh.is_pinned());

    let back = exchange.mesh2d(state, FaceData::Include).unwrap();
    assert!(!back.is_pinned());
    assert_eq!(back.nodes_x(), mesh.nodes_x());
    assert_eq!(back.nodes_y(), mesh.nodes_y());
    assert_eq!(back.edge_nodes(), mesh.edge_nodes());
    assert_eq!(back.nodes_per_face(), mesh.nodes_per_face());
    assert_eq!(back.face_nodes(), mesh.face_nodes());
    assert_eq!(back.validate(), Ok(()));
    assert_eq!(
        kernel.calls(),
        vec!["mesh2d_set", "mesh2d_get_dimensions", "mesh2d_get_data"]
    );
}

#[test]
fn mesh2d_without_faces_drops_face_arrays() {
    let kernel = MockKernel::new();
    let state = kernel.new_state();
    kernel.set_mesh2d(state, unit_square_mesh());

    let back = Exchange::new(&kernel).mesh2d(state, FaceData::Omit).unwrap();
    assert_eq!(back.num_nodes(), 4);
    assert_eq!(back.num_edges(), 4);
    assert_eq!(back.num_faces(), 0);
    assert!(back.face_nodes().is_empty());
}

#[test]
fn failed_set_releases_the_callers_pins() {
    let kernel = MockKernel::new();
    let state = kernel.new_state();
    kernel.fail_call("mesh2d_set", ExitCategory::MeshGeometryError, "edge out of range");

    let mut mesh = unit_square_mesh();
    let err = Exchange::new(&kernel)
        .set_mesh2d(state, &mut mesh)
        .unwrap_err();
    assert_eq!(err.category, Some(ExitCategory::MeshGeometryError));
    assert!(!mesh.is_pinned());
    assert!(kernel.mesh2d(state).unwrap().nodes_x().is_empty());
}

#[test]
fn failed_data_call_after_dimensions_returns_the_error() {
    let kernel = MockKernel::new();
    let state = kernel.new_state();
    kernel.set_mesh2d(state, unit_square_mesh());
    kernel.fail_call("mesh2d_get_data", ExitCategory::StdLibException, "bad_alloc");

    let err = Exchange::new(&kernel)
        .mesh2d(state, FaceData::Include)
        .unwrap_err();
    assert_eq!(err.message, "bad_alloc");
    assert_eq!(kernel.calls(), vec!["mesh2d_get_dimensions", "mesh2d_get_data"]);
}

#[test]
#[should_panic(expected = "mesh2d handed to the engine is inconsistent")]
fn inconsistent_mesh_is_not_sent() {
    let kernel = MockKernel::new();
    let state = kernel.new_state();
    let mut mesh = unit_square_mesh();
    mesh.set_num_valid_nodes(9);
    let _ = Exchange::new(&kernel).set_mesh2d(state, &mut mesh);
}

#[test]
#[should_panic(expected = "engine face lists are inconsistent")]
fn engine_face_counts_beyond_face_lists_are_not_read() {
    let kernel = MockKernel::new();
    let state = kernel.new_state();
    let mut mesh = unit_square_mesh();
    mesh.set_faces(vec![4, 400], vec![0, 1, 2, 3]);
    kernel.set_mesh2d(state, mesh);
    let _ = Exchange::new(&kernel).mesh2d(state, FaceData::Include);
}

#[test]
fn resized_mesh_is_accepted_by_the_engine() {
    let kernel = MockKernel::new();
    let state = kernel.new_state();
    let exchange = Exchange::new(&kernel);

    let mut mesh = unit_square_mesh();
    mesh.resize(6, 4, 1, 4);
    {
        let (x, y) = mesh.nodes_mut();
        x[4..].copy_from_slice(&[2.0, 2.0]);
        y[4..].copy_from_slice(&[0.0, 1.0]);
    }
    exchange.set_mesh2d(state, &mut mesh).unwrap();

    let back = exchange.mesh2d(state, FaceData::Include).unwrap();
    assert_eq!(back.nodes_x(), &[0.0, 1.0, 1.0, 0.0, 2.0, 2.0]);
    assert_eq!(back.num_valid_nodes(), 4);
}

#[test]
fn mesh1d_curvilinear_and_contacts_copy_out() {
    let kernel = MockKernel::new();
    let state = kernel.new_state();
    kernel.set_mesh1d(state, polyline_mesh1d());
    kernel.set_curvilinear_grid(state, small_grid());
    kernel.set_contacts(state, sample_contacts());
    let exchange = Exchange::new(&kernel);

    let mesh1d = exchange.mesh1d(state).unwrap();
    assert_eq!(mesh1d.edge_nodes(), &[0, 1, 1, 2]);
    assert!(!mesh1d.is_pinned());

    let grid = exchange.curvilinear_grid(state).unwrap();
    assert_eq!((grid.num_m(), grid.num_n()), (3, 2));
    assert_eq!(grid.nodes_y(), small_grid().nodes_y());

    let contacts = exchange.contacts(state).unwrap();
    assert_eq!(
        contacts.pairs().collect::<Vec<_>>(),
        vec![(0, 3), (1, 0), (2, 1)]
    );
}

#[test]
fn empty_state_yields_empty_objects() {
    let kernel = MockKernel::new();
    let state = kernel.new_state();
    let exchange = Exchange::new(&kernel);
    assert_eq!(exchange.mesh2d(state, FaceData::Include).unwrap().num_nodes(), 0);
    assert!(exchange.contacts(state).unwrap().is_empty());
    assert_eq!(exchange.curvilinear_grid(state).unwrap().nodes_x().len(), 0);
}

#[test]
fn polygon_refinement_counts_then_fills() {
    let kernel = MockKernel::new();
    let state = kernel.new_state();
    let exchange = Exchange::new(&kernel);

    let square = square_with_hole().exterior;
    let mut polygon = encode_polygons(
        &[meshbridge_geometry::Polygon::new(square, [])],
        exchange.separators(),
    );
    let refined = exchange
        .refine_polygon(state, &mut polygon, 0, 2, 0.5)
        .unwrap();

    assert!(!polygon.is_pinned());
    assert!(!refined.is_pinned());
    assert_eq!(refined.number_of_coordinates(), 6);
    assert_eq!(refined.x(), &[0.0, 0.5, 1.0, 1.0, 1.0, 0.0]);
    assert_eq!(refined.y(), &[0.0, 0.0, 0.0, 0.5, 1.0, 1.0]);
    assert_eq!(refined.separators(), polygon.separators());
    assert_eq!(kernel.calls(), vec!["polygon_count_refine", "polygon_refine"]);
}

#[test]
fn failed_refinement_count_unpins_the_input() {
    let kernel = MockKernel::new();
    let state = kernel.new_state();
    let exchange = Exchange::new(&kernel);
    let mut polygon = encode_polygons(&[square_with_hole()], exchange.separators());

    let err = exchange
        .refine_polygon(state, &mut polygon, 3, 1, 0.5)
        .unwrap_err();
    assert_eq!(err.category, Some(ExitCategory::ConstraintError));
    assert!(!polygon.is_pinned());
    assert_eq!(kernel.calls(), vec!["polygon_count_refine"]);
}

#[test]
fn decode_uses_the_configured_tolerance() {
    let kernel = MockKernel::new();
    let exchange = Exchange::new(&kernel);
    let list = exchange.encode(&[Geometry::from(square_with_hole())]);
    let decoded = exchange.decode(&list);
    assert!(decoded.anomalies.is_empty());
    assert_eq!(decoded.polygons[0].exterior.len(), 5);
    assert_eq!(decoded.polygons[0].interiors[0].len(), 4);
}

#[test]
fn independent_states_work_from_separate_threads() {
    let kernel = MockKernel::new();
    let states: Vec<_> = (0..4).map(|_| kernel.new_state()).collect();
    std::thread::scope(|s| {
        for (i, &state) in states.iter().enumerate() {
            let kernel = &kernel;
            s.spawn(move || {
                let exchange = Exchange::new(kernel);
                let mut mesh = quad_mesh(i + 1);
                exchange.set_mesh2d(state, &mut mesh).unwrap();
                let back: Mesh2D = exchange.mesh2d(state, FaceData::Include).unwrap();
                assert_eq!(back.num_faces(), (i + 1) * (i + 1));
            });
        }
    });
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn exchange_leaves_nothing_pinned(side in 1usize..5, extra_nodes in 0usize..4) {
            let kernel = MockKernel::new();
            let state = kernel.new_state();
            let exchange = Exchange::new(&kernel);

            let mut mesh = quad_mesh(side);
            let grown = mesh.num_nodes() + extra_nodes;
            mesh.resize(grown, 0, 0, 0);
            exchange.set_mesh2d(state, &mut mesh).unwrap();
            prop_assert!(!mesh.is_pinned());

            let back = exchange.mesh2d(state, FaceData::Include).unwrap();
            prop_assert!(!back.is_pinned());
            prop_assert_eq!(back.num_nodes(), grown);
            prop_assert_eq!(back.nodes_x(), mesh.nodes_x());
            prop_assert_eq!(back.face_nodes(), mesh.face_nodes());
        }

        #[test]
        fn refined_polygon_keeps_original_vertices(distance in 0.05f64..2.0) {
            let kernel = MockKernel::new();
            let state = kernel.new_state();
            let exchange = Exchange::new(&kernel);
            let mut polygon = encode_polygons(
                &[meshbridge_geometry::Polygon::new(square_with_hole().exterior, [])],
                exchange.separators(),
            );

            let refined = exchange.refine_polygon(state, &mut polygon, 0, 3, distance).unwrap();
            prop_assert!(refined.number_of_coordinates() >= polygon.number_of_coordinates());
            prop_assert_eq!(refined.x()[0], 0.0);
            prop_assert_eq!(*refined.x().last().unwrap(), 0.0);
            prop_assert_eq!(*refined.y().last().unwrap(), 1.0);
            prop_assert!(!polygon.is_pinned());
        }
    }
}
