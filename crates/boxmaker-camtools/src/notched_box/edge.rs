//! Edge segment generation.
//!
//! An edge is drawn directly as its kerf-compensated zigzag: one lengthwise
//! "tooth" stroke per notch, joined by short connector strokes across the
//! material thickness. Horizontal and vertical edges share the same walker and
//! only differ in how (along, across) offsets map onto page coordinates.

use boxmaker_core::{Point, Segment};

use super::types::{Orientation, TabLevel};

/// Parameters of one notched edge
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeSpec {
    pub orientation: Orientation,
    /// Start of the edge baseline
    pub origin: Point,
    /// Length of a single notch along the edge
    pub notch_length: f64,
    /// Number of notches, odd
    pub notch_count: usize,
    /// Signed half kerf applied at every notch boundary
    pub half_kerf: f64,
    /// When set, the first notch is drawn recessed instead of on the baseline
    pub flip: bool,
    /// When set, the edge starts one thickness in so it does not overdraw a
    /// perpendicular edge already drawn at that corner
    pub short_side: bool,
    /// Tab depth (material thickness)
    pub thickness: f64,
}

impl EdgeSpec {
    /// Whether the final notch stops one thickness before the far corner.
    ///
    /// Horizontal edges always stop short there because the perpendicular
    /// vertical edge owns that corner; vertical edges only do so when short-sided.
    pub fn trims_far_end(&self) -> bool {
        self.short_side || self.orientation == Orientation::Horizontal
    }

    /// Tab level of every notch, in order
    pub fn tab_levels(&self) -> Vec<TabLevel> {
        (0..self.notch_count)
            .map(|step| TabLevel::for_step(step, self.flip))
            .collect()
    }

    /// Total nominal length covered by the notches
    pub fn span(&self) -> f64 {
        self.notch_length * self.notch_count as f64
    }

    /// Map an (along, across) offset onto page coordinates
    pub fn map(&self, along: f64, across: f64) -> Point {
        match self.orientation {
            Orientation::Horizontal => Point::new(self.origin.x + along, self.origin.y + across),
            Orientation::Vertical => Point::new(self.origin.x + across, self.origin.y + along),
        }
    }

    /// Lazily walk the edge, yielding tooth and connector segments in order
    pub fn segments(&self) -> EdgeSegments<'_> {
        EdgeSegments {
            spec: self,
            step: 0,
            run: 0.0,
            pending: None,
        }
    }
}

/// Generate every segment of an edge
pub fn generate_edge(spec: &EdgeSpec) -> Vec<Segment> {
    let label = match spec.orientation {
        Orientation::Horizontal => "Horizontal",
        Orientation::Vertical => "Vertical",
    };
    tracing::debug!(
        "{} side: {} steps @ ({:.3}, {:.3})",
        label,
        spec.notch_count,
        spec.origin.x,
        spec.origin.y
    );
    spec.segments().collect()
}

/// State machine over one edge.
///
/// State is the running coordinate and the connector still owed after the last
/// tooth; each transition emits one tooth followed by its connector, and the
/// walk ends after `notch_count` teeth.
#[derive(Debug, Clone)]
pub struct EdgeSegments<'a> {
    spec: &'a EdgeSpec,
    step: usize,
    run: f64,
    pending: Option<Segment>,
}

impl EdgeSegments<'_> {
    fn tooth(&self, step: usize) -> (f64, f64) {
        let spec = self.spec;
        let x = self.run;
        let len = spec.notch_length;
        let hk = spec.half_kerf;
        let last = spec.notch_count - 1;

        if step == 0 {
            let start = if spec.short_side { x + spec.thickness } else { x };
            (start, x + len + hk)
        } else if step == last {
            let end = if spec.trims_far_end() {
                x + len - spec.thickness
            } else {
                x + len
            };
            (x - hk, end)
        } else if step % 2 == 0 {
            (x - hk, x + len + hk)
        } else {
            (x + hk, x + len - hk)
        }
    }

    fn connector_at(&self, step: usize) -> f64 {
        let len = self.spec.notch_length;
        if step % 2 == 0 {
            self.run + len + self.spec.half_kerf
        } else {
            self.run + len - self.spec.half_kerf
        }
    }
}

impl Iterator for EdgeSegments<'_> {
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        if let Some(connector) = self.pending.take() {
            return Some(connector);
        }
        if self.step >= self.spec.notch_count {
            return None;
        }

        let spec = self.spec;
        let step = self.step;
        let across = match TabLevel::for_step(step, spec.flip) {
            TabLevel::Out => 0.0,
            TabLevel::In => spec.thickness,
        };

        let (from, to) = self.tooth(step);
        let tooth = Segment::new(spec.map(from, across), spec.map(to, across));

        if step + 1 < spec.notch_count {
            let at = self.connector_at(step);
            self.pending = Some(Segment::new(
                spec.map(at, spec.thickness),
                spec.map(at, 0.0),
            ));
        }

        tracing::trace!(
            "Line - ({:.3}, {:.3}) to ({:.3}, {:.3})",
            tooth.start.x,
            tooth.start.y,
            tooth.end.x,
            tooth.end.y
        );

        self.run += spec.notch_length;
        self.step += 1;
        Some(tooth)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let teeth = self.spec.notch_count.saturating_sub(self.step);
        let connectors = teeth.saturating_sub(1) + usize::from(self.pending.is_some());
        let remaining = teeth + connectors;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for EdgeSegments<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn spec(orientation: Orientation, count: usize, half_kerf: f64, flip: bool) -> EdgeSpec {
        EdgeSpec {
            orientation,
            origin: Point::new(10.0, 20.0),
            notch_length: 8.0,
            notch_count: count,
            half_kerf,
            flip,
            short_side: false,
            thickness: 3.0,
        }
    }

    fn shares_endpoint(a: &Segment, b: &Segment) -> bool {
        a.end.approx_eq(&b.start)
            || a.end.approx_eq(&b.end)
            || a.start.approx_eq(&b.start)
            || a.start.approx_eq(&b.end)
    }

    #[test]
    fn test_segment_count() {
        let s = spec(Orientation::Horizontal, 5, 0.05, false);
        let segments = generate_edge(&s);
        assert_eq!(segments.len(), 9);
        assert_eq!(s.segments().len(), 9);
    }

    #[test]
    fn test_horizontal_first_tooth_without_kerf() {
        let s = spec(Orientation::Horizontal, 3, 0.0, false);
        let segments = generate_edge(&s);

        // Tooth 0 on the baseline
        assert_eq!(segments[0].start, Point::new(10.0, 20.0));
        assert_eq!(segments[0].end, Point::new(18.0, 20.0));
        // Connector runs from the recessed level back to the baseline
        assert_eq!(segments[1].start, Point::new(18.0, 23.0));
        assert_eq!(segments[1].end, Point::new(18.0, 20.0));
        // Tooth 1 recessed
        assert_eq!(segments[2].start, Point::new(18.0, 23.0));
        assert_eq!(segments[2].end, Point::new(26.0, 23.0));
        // Last tooth stops one thickness short of the far corner
        assert_eq!(segments[4].start, Point::new(26.0, 20.0));
        assert_eq!(segments[4].end, Point::new(31.0, 20.0));
    }

    #[test]
    fn test_kerf_widens_even_and_narrows_odd_teeth() {
        let hk = 0.05;
        let s = spec(Orientation::Horizontal, 5, hk, false);
        let segments = generate_edge(&s);
        let teeth: Vec<&Segment> = segments.iter().step_by(2).collect();

        // Interior even tooth (step 2)
        assert!((teeth[2].length() - (8.0 + 2.0 * hk)).abs() < EPS);
        // Interior odd teeth (steps 1 and 3)
        assert!((teeth[1].length() - (8.0 - 2.0 * hk)).abs() < EPS);
        assert!((teeth[3].length() - (8.0 - 2.0 * hk)).abs() < EPS);
        // First tooth grows on its far side only
        assert!((teeth[0].length() - (8.0 + hk)).abs() < EPS);
    }

    #[test]
    fn test_vertical_edge_mirrors_horizontal() {
        let h = spec(Orientation::Horizontal, 7, 0.05, true);
        let mut v = spec(Orientation::Vertical, 7, 0.05, true);
        v.short_side = true;
        let mut h_short = h.clone();
        h_short.short_side = true;

        let hs = generate_edge(&h_short);
        let vs = generate_edge(&v);
        assert_eq!(hs.len(), vs.len());
        for (a, b) in hs.iter().zip(&vs) {
            // Swap the axes relative to the shared origin
            assert!((a.start.x - 10.0 - (b.start.y - 20.0)).abs() < EPS);
            assert!((a.start.y - 20.0 - (b.start.x - 10.0)).abs() < EPS);
            assert!((a.end.x - 10.0 - (b.end.y - 20.0)).abs() < EPS);
            assert!((a.end.y - 20.0 - (b.end.x - 10.0)).abs() < EPS);
        }
    }

    #[test]
    fn test_vertical_edge_runs_full_length_unless_short_sided() {
        let mut v = spec(Orientation::Vertical, 3, 0.0, false);
        let segments = generate_edge(&v);
        assert_eq!(segments.last().unwrap().end, Point::new(10.0, 44.0));

        v.short_side = true;
        let segments = generate_edge(&v);
        assert_eq!(segments[0].start, Point::new(10.0, 23.0));
        assert_eq!(segments.last().unwrap().end, Point::new(10.0, 41.0));
    }

    #[test]
    fn test_edge_is_connected() {
        for flip in [false, true] {
            for hk in [0.0, 0.1, -0.1] {
                let s = spec(Orientation::Horizontal, 9, hk, flip);
                let segments = generate_edge(&s);
                for pair in segments.windows(2) {
                    assert!(
                        shares_endpoint(&pair[0], &pair[1]),
                        "gap between {:?} and {:?}",
                        pair[0],
                        pair[1]
                    );
                }
            }
        }
    }

    #[test]
    fn test_teeth_advance_monotonically() {
        let s = spec(Orientation::Horizontal, 11, -0.1, false);
        let segments = generate_edge(&s);
        let teeth: Vec<&Segment> = segments.iter().step_by(2).collect();
        for pair in teeth.windows(2) {
            assert!((pair[1].start.x - pair[0].end.x).abs() < EPS);
            assert!(pair[1].end.x > pair[0].end.x);
        }
    }

    #[test]
    fn test_single_notch_edge() {
        let s = spec(Orientation::Horizontal, 1, 0.05, false);
        let segments = generate_edge(&s);
        assert_eq!(segments.len(), 1);
        assert!((segments[0].end.x - (10.0 + 8.0 + 0.05)).abs() < EPS);
    }

    #[test]
    fn test_tab_levels_start_and_end_alike() {
        let s = spec(Orientation::Vertical, 7, 0.0, true);
        let levels = s.tab_levels();
        assert_eq!(levels.first(), levels.last());
        assert_eq!(levels[0], TabLevel::In);
    }
}
