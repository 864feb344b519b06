//! The twelve physical box edges must mesh: wherever two panels meet, one
//! panel's tab faces the other panel's recess along the whole joint.

use boxmaker_camtools::notched_box::{
    normalize, plan_layout, template, BoxLayout, EdgeSide, LayoutOptions, PanelKind, PANEL_TABLE,
};

use EdgeSide::{Bottom, Left, Right, Top};
use PanelKind::{Back, Bottom as Floor, Front, Left as LeftWall, Right as RightWall, Top as Lid};

/// Every joint of the folded box, as (panel, side) pairs
const JOINTS: [((PanelKind, EdgeSide), (PanelKind, EdgeSide)); 12] = [
    // Four vertical corners around the walls
    ((Back, Right), (RightWall, Left)),
    ((RightWall, Right), (Front, Left)),
    ((Front, Right), (LeftWall, Left)),
    ((LeftWall, Right), (Back, Left)),
    // Walls against the floor
    ((Back, Bottom), (Floor, Top)),
    ((Front, Top), (Floor, Bottom)),
    ((LeftWall, Bottom), (Floor, Left)),
    ((RightWall, Bottom), (Floor, Right)),
    // Walls against the lid
    ((Back, Top), (Lid, Bottom)),
    ((Front, Bottom), (Lid, Top)),
    ((LeftWall, Top), (Lid, Left)),
    ((RightWall, Top), (Lid, Right)),
];

fn layout(w: f64, h: f64, d: f64) -> BoxLayout {
    let desc = normalize(w, h, d, 3.0, 0.1, 7.5).unwrap();
    plan_layout(&desc, &LayoutOptions::default()).unwrap()
}

fn assert_joints_mesh(layout: &BoxLayout) {
    for ((pa, sa), (pb, sb)) in JOINTS {
        let a = layout.panel(pa).unwrap().edge(sa).unwrap();
        let b = layout.panel(pb).unwrap().edge(sb).unwrap();

        assert_eq!(a.axis, b.axis, "{pa} {sa:?} / {pb} {sb:?} run along different axes");
        assert_eq!(a.spec.notch_count, b.spec.notch_count);

        let pa_out = a.protrusions();
        let pb_out = b.protrusions();
        for (i, (x, y)) in pa_out.iter().zip(&pb_out).enumerate() {
            assert_ne!(x, y, "{pa} {sa:?} and {pb} {sb:?} collide at notch {i}");
        }
    }
}

#[test]
fn test_reference_box_joints_mesh() {
    assert_joints_mesh(&layout(100.0, 60.0, 40.0));
}

#[test]
fn test_cube_and_flat_box_joints_mesh() {
    assert_joints_mesh(&layout(50.0, 50.0, 50.0));
    assert_joints_mesh(&layout(200.0, 12.0, 120.0));
}

#[test]
fn test_every_joint_is_listed_once_per_panel_side() {
    let mut seen = Vec::new();
    for ((pa, sa), (pb, sb)) in JOINTS {
        seen.push((pa, sa));
        seen.push((pb, sb));
    }
    assert_eq!(seen.len(), 24);
    for template in &PANEL_TABLE {
        for edge in &template.edges {
            let count = seen
                .iter()
                .filter(|(k, s)| *k == template.kind && *s == edge.side)
                .count();
            assert_eq!(count, 1, "{} {:?}", template.kind, edge.side);
        }
    }
}

#[test]
fn test_joint_axes_follow_panel_templates() {
    for ((pa, sa), (pb, _)) in JOINTS {
        let axis_of = |kind: PanelKind, side: EdgeSide| {
            let t = template(kind);
            match side {
                Top | Bottom => t.horizontal_axis,
                Left | Right => t.vertical_axis,
            }
        };
        let a = axis_of(pa, sa);
        // The mating panel must carry the same axis somewhere
        let t = template(pb);
        assert!(t.horizontal_axis == a || t.vertical_axis == a);
    }
}
