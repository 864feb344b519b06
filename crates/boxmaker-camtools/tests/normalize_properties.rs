//! Property-based tests for dimension normalization and edge generation.
//!
//! 1. Notch counts are odd and at least one
//! 2. Each axis is exactly `count * notch_length` and equals the kerf-enlarged input
//! 3. Per-axis notch lengths stay near the requested notch length
//! 4. Re-normalizing a kerf-free descriptor changes nothing
//! 5. Every panel's segments stay inside the panel outline
//! 6. Each edge is a connected chain of `2n - 1` segments

use boxmaker_camtools::notched_box::{
    normalize, plan_layout, Axis, BoxDescriptor, LayoutOptions,
};
use boxmaker_core::Segment;
use proptest::prelude::*;

const EPS: f64 = 1e-9;

// ── Strategies ──────────────────────────────────────────────────────────

/// (width, height, depth, thickness, kerf, notch_length) with every axis able to
/// hold at least one notch, and notches comfortably longer than the material.
fn valid_box() -> impl Strategy<Value = (f64, f64, f64, f64, f64, f64)> {
    (1.0f64..12.0, 0.0f64..0.5, 2.0f64..4.0).prop_flat_map(|(thickness, kerf, factor)| {
        let notch = thickness * factor;
        let dim = notch..notch * 40.0;
        (
            dim.clone(),
            dim.clone(),
            dim,
            Just(thickness),
            Just(kerf),
            Just(notch),
        )
    })
}

fn descriptor(input: (f64, f64, f64, f64, f64, f64)) -> BoxDescriptor {
    let (w, h, d, t, k, n) = input;
    normalize(w, h, d, t, k, n).unwrap()
}

fn connected(a: &Segment, b: &Segment) -> bool {
    a.end.approx_eq(&b.start)
        || a.end.approx_eq(&b.end)
        || a.start.approx_eq(&b.start)
        || a.start.approx_eq(&b.end)
}

// ── Normalization ───────────────────────────────────────────────────────

proptest! {
    #[test]
    fn notch_counts_are_odd_and_positive(input in valid_box()) {
        let desc = descriptor(input);
        for axis in Axis::ALL {
            let notches = desc.axis(axis);
            prop_assert!(notches.count >= 1);
            prop_assert_eq!(notches.count % 2, 1);
        }
    }

    #[test]
    fn axis_length_is_count_times_notch(input in valid_box()) {
        let (w, h, d, _, kerf, _) = input;
        let desc = descriptor(input);
        for (axis, raw) in [(Axis::Width, w), (Axis::Height, h), (Axis::Depth, d)] {
            let notches = desc.axis(axis);
            prop_assert!((notches.count as f64 * notches.notch_length - notches.length).abs() < EPS);
            prop_assert!((notches.length - (raw + kerf)).abs() < EPS);
        }
    }

    #[test]
    fn axis_notch_length_stays_near_nominal(input in valid_box()) {
        let nominal = input.5;
        let desc = descriptor(input);
        for axis in Axis::ALL {
            let notches = desc.axis(axis);
            prop_assert!(notches.notch_length < 2.5 * nominal + EPS);
            if notches.count == 1 {
                prop_assert!(notches.notch_length >= nominal - EPS);
            } else {
                prop_assert!(notches.notch_length >= nominal * 5.0 / 6.0 - EPS);
            }
        }
    }

    #[test]
    fn renormalizing_without_kerf_is_stable((w, h, d, t, _, n) in valid_box()) {
        let first = normalize(w, h, d, t, 0.0, n).unwrap();
        let second = normalize(first.width(), first.height(), first.depth(), t, 0.0, n).unwrap();
        for axis in Axis::ALL {
            let (a, b) = (first.axis(axis), second.axis(axis));
            prop_assert_eq!(a.count, b.count);
            prop_assert!((a.notch_length - b.notch_length).abs() < EPS);
            prop_assert!((a.length - b.length).abs() < EPS);
        }
    }

    #[test]
    fn too_small_axis_is_rejected(dim in 0.1f64..7.0, kerf in 0.0f64..0.4) {
        // Notch of 7.5 never fits into less than 7.4 after kerf
        prop_assert!(normalize(dim, 50.0, 50.0, 3.0, kerf, 7.5).is_err());
    }
}

// ── Layout ──────────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn panel_segments_stay_inside_outline(input in valid_box()) {
        let desc = descriptor(input);
        let layout = plan_layout(&desc, &LayoutOptions::default()).unwrap();
        let slack = desc.half_kerf() + EPS;
        for panel in &layout.panels {
            let b = panel.bounds;
            for seg in panel.segments() {
                for p in [seg.start, seg.end] {
                    prop_assert!(p.x >= b.origin.x - slack && p.x <= b.max_x() + slack,
                        "{} x={} outside {:?}", panel.kind, p.x, b);
                    prop_assert!(p.y >= b.origin.y - slack && p.y <= b.max_y() + slack,
                        "{} y={} outside {:?}", panel.kind, p.y, b);
                }
            }
        }
    }

    #[test]
    fn every_edge_is_a_connected_chain(input in valid_box()) {
        let desc = descriptor(input);
        let layout = plan_layout(&desc, &LayoutOptions::default()).unwrap();
        for panel in &layout.panels {
            for edge in &panel.edges {
                let segments = edge.segments();
                prop_assert_eq!(segments.len(), 2 * edge.spec.notch_count - 1);
                for pair in segments.windows(2) {
                    prop_assert!(connected(&pair[0], &pair[1]));
                }
            }
        }
    }
}
