//! Pin lifecycle tests against a small object with numeric and text fields.

use std::ffi::{c_char, CStr};

use meshbridge_pin::{ArrayField, ArrayFields, ElementKind, PinKey, PinRegistry, Pinnable};
use smallvec::smallvec;

const X: PinKey = PinKey(0);
const CODES: PinKey = PinKey(1);
const NAMES: PinKey = PinKey(2);
const NOTES: PinKey = PinKey(3);
const WEIGHTS: PinKey = PinKey(4);

const NAME_CAPACITY: usize = 8;

#[derive(Clone, Default)]
struct Station {
    x: Vec<f64>,
    codes: Vec<i16>,
    names: Vec<String>,
    /// Declared with capacity 0: never pinned.
    notes: Vec<String>,
    weights: Vec<f32>,
    pins: PinRegistry,
}

#[repr(C)]
struct StationNative {
    x: *mut f64,
    codes: *mut i16,
    names: *mut c_char,
    weights: *mut f32,
    count: i32,
}

impl Pinnable for Station {
    type Native = StationNative;

    fn array_fields(&mut self) -> ArrayFields<'_> {
        smallvec![
            (X, ArrayField::numeric(&mut self.x)),
            (CODES, ArrayField::numeric(&mut self.codes)),
            (NAMES, ArrayField::text(&mut self.names, NAME_CAPACITY)),
            (NOTES, ArrayField::text(&mut self.notes, 0)),
            (WEIGHTS, ArrayField::numeric(&mut self.weights)),
        ]
    }

    fn pins(&self) -> &PinRegistry {
        &self.pins
    }

    fn pins_mut(&mut self) -> &mut PinRegistry {
        &mut self.pins
    }

    fn project(&self) -> StationNative {
        StationNative {
            x: self.pins.ptr(X),
            codes: self.pins.ptr(CODES),
            names: self.pins.text_ptr(NAMES),
            weights: self.pins.ptr(WEIGHTS),
            count: self.x.len() as i32,
        }
    }
}

fn station() -> Station {
    Station {
        x: vec![1.0, 2.0],
        codes: vec![7, 8],
        names: vec!["harbour".into(), "lighthouse".into()],
        notes: vec!["never crosses".into()],
        weights: Vec::new(),
        pins: PinRegistry::new(),
    }
}

#[test]
fn unpin_when_never_pinned_is_harmless() {
    let mut s = station();
    s.unpin();
    s.unpin();
    assert!(!s.is_pinned());
    assert!(s.pins().is_empty());
}

#[test]
fn repeated_pin_is_bounded_by_field_count() {
    let mut s = station();
    for _ in 0..5 {
        s.pin();
    }
    // Five declared fields, one of them text with capacity 0.
    assert_eq!(s.pins().len(), 4);
    s.unpin();
    assert_eq!(s.pins().len(), 0);
}

#[test]
fn keys_follow_declaration_order_and_skip_zero_capacity() {
    let mut s = station();
    s.pin();
    let keys: Vec<_> = s.pins().keys().collect();
    assert_eq!(keys, vec![X, CODES, NAMES, WEIGHTS]);
    assert!(s.pins().try_get(NOTES).is_none());
    s.unpin();
}

#[test]
fn text_field_is_fixed_width_ascii() {
    let mut s = station();
    s.pin();
    let handle = s.pins().get(NAMES);
    assert_eq!(handle.kind(), ElementKind::Text { capacity: 8 });
    assert_eq!(handle.len(), 2);
    assert_eq!(handle.text_bytes().unwrap(), b"harbour\0lighthou");
    s.unpin();
}

#[test]
fn view_points_at_live_buffers() {
    let mut s = station();
    let x_addr = s.x.as_ptr();
    let view = s.create_native_view();
    assert_eq!(view.x as *const f64, x_addr);
    assert_eq!(view.count, 2);
    assert!(!view.weights.is_null());
    // SAFETY: the first name slot is NUL-terminated within its 8 bytes and
    // the text buffer is owned by the registry for as long as `s` is pinned.
    let first = unsafe { CStr::from_ptr(view.names) };
    assert_eq!(first.to_str().unwrap(), "harbour");
    drop(view);
    s.dispose();
}

#[test]
#[should_panic(expected = "no pin handle for key 3")]
fn looking_up_unpinned_key_panics() {
    let mut s = station();
    s.pin();
    let _ = s.pins().get(NOTES);
}

#[test]
#[should_panic(expected = "holds i16 but f64 was requested")]
fn wrong_pointer_type_panics() {
    let mut s = station();
    s.pin();
    let _ = s.pins().ptr::<f64>(CODES);
}

#[test]
fn clone_of_pinned_object_starts_unpinned() {
    let mut s = station();
    s.pin();
    let mut copy = s.clone();
    assert!(!copy.is_pinned());
    copy.pin();
    assert_ne!(copy.pins().get(X).addr(), s.pins().get(X).addr());
    copy.unpin();
    s.unpin();
}

#[test]
fn dropping_pinned_object_releases_handles() {
    let mut s = station();
    s.pin();
    assert!(s.is_pinned());
    drop(s);
}

#[test]
fn independent_objects_pin_on_separate_threads() {
    let workers: Vec<_> = (0..4)
        .map(|i| {
            let mut s = station();
            s.x.push(i as f64);
            std::thread::spawn(move || {
                let count = s.create_native_view().count;
                s.unpin();
                count
            })
        })
        .collect();
    for worker in workers {
        assert_eq!(worker.join().unwrap(), 3);
    }
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn pin_state_follows_last_operation(ops in prop::collection::vec(any::<bool>(), 0..32)) {
            let mut s = station();
            for &pin in &ops {
                if pin { s.pin() } else { s.unpin() }
            }
            let pinned = ops.last().copied().unwrap_or(false);
            prop_assert_eq!(s.is_pinned(), pinned);
            prop_assert_eq!(s.pins().len(), if pinned { 4 } else { 0 });
            s.unpin();
        }
    }
}
