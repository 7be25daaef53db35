//! Status resolution against the mock engine.

use meshbridge_core::{CallError, ExchangeConfig, ExitCategory, StateId};
use meshbridge_kernel::{last_error_text, resolve_status, Exchange};
use meshbridge_mesh::FaceData;
use meshbridge_test_utils::{init_logging, MockKernel};

#[test]
fn success_resolves_to_ok() {
    let kernel = MockKernel::new();
    assert_eq!(resolve_status(&kernel, &ExchangeConfig::default(), 0), Ok(()));
}

#[test]
fn each_category_is_classified() {
    init_logging();
    let kernel = MockKernel::new();
    for category in ExitCategory::ALL.into_iter().skip(1) {
        let code = MockKernel::exit_code(category);
        let err = resolve_status(&kernel, &ExchangeConfig::default(), code).unwrap_err();
        assert_eq!(err.category, Some(category), "code {code}");
        assert_eq!(err.code, code);
    }
}

#[test]
fn unknown_code_keeps_the_raw_status() {
    let kernel = MockKernel::new();
    let err = resolve_status(&kernel, &ExchangeConfig::default(), 42).unwrap_err();
    assert_eq!(err.code, 42);
    assert_eq!(err.category, None);
}

#[test]
fn failure_carries_the_engine_message() {
    init_logging();
    let kernel = MockKernel::new();
    let state = kernel.new_state();
    kernel.fail_call(
        "mesh2d_get_dimensions",
        ExitCategory::AlgorithmError,
        "orthogonalization did not converge",
    );
    let err = Exchange::new(&kernel)
        .mesh2d(state, FaceData::Include)
        .unwrap_err();
    assert_eq!(
        err,
        CallError {
            code: MockKernel::exit_code(ExitCategory::AlgorithmError),
            category: Some(ExitCategory::AlgorithmError),
            message: "orthogonalization did not converge".to_string(),
        }
    );
    assert_eq!(
        err.to_string(),
        "native call failed with status 3 (algorithm error): orthogonalization did not converge"
    );
}

#[test]
fn unknown_state_is_a_kernel_error() {
    let kernel = MockKernel::new();
    let err = Exchange::new(&kernel).contacts(StateId(99)).unwrap_err();
    assert_eq!(err.category, Some(ExitCategory::MeshKernelError));
    assert_eq!(err.message, "invalid mesh kernel id 99");
}

#[test]
fn long_message_is_truncated_to_the_buffer() {
    let kernel = MockKernel::new();
    let state = kernel.new_state();
    kernel.fail_call("contacts_get_dimensions", ExitCategory::RangeError, "x".repeat(600));
    let err = Exchange::new(&kernel).contacts(state).unwrap_err();
    assert_eq!(err.message.len(), ExchangeConfig::DEFAULT_ERROR_MESSAGE_CAPACITY);
}

#[test]
fn small_capacity_truncates_without_shrinking_the_engine_buffer() {
    let kernel = MockKernel::new();
    let state = kernel.new_state();
    kernel.fail_call("contacts_get_dimensions", ExitCategory::RangeError, "y".repeat(600));
    assert!(Exchange::new(&kernel).contacts(state).is_err());
    assert_eq!(last_error_text(&kernel, 8).unwrap(), "yyyyyyyy");
    assert_eq!(last_error_text(&kernel, 0).unwrap(), "");
}
