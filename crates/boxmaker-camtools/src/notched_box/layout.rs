//! Panel layout.
//!
//! Places the six panels on the page in a cross arrangement and resolves the
//! four notched edges of each panel from a fixed flag table:
//!
//! ```text
//!               ----------
//!               |  w x d |   top
//!               ----------
//!               ----------
//!               |  w x h |   front
//!               ----------
//!    ---------  ----------  ---------
//!    | d x h |  |  w x d |  | d x h |   left, bottom, right
//!    ---------  ----------  ---------
//!               ----------
//!               |  w x h |   back
//!               ----------
//! ```
//!
//! (Shown y-up; page coordinates grow downwards so the back panel is drawn first
//! at the top of the page.)
//!
//! Annotation text goes into the empty corner left of the back panel when it
//! fits there, and below the panels otherwise, growing the page to hold it.

use boxmaker_core::{format_length, get_unit_label, MeasurementSystem, Point, Rect, Segment};

use super::edge::{generate_edge, EdgeSpec};
use super::types::{Axis, BoxDescriptor, EdgeSide, KerfSign, PanelKind, TabLevel};
use crate::error::{DimensionError, DimensionResult};

/// Default spacing between panels, 0.5 in
pub const DEFAULT_MARGIN_MM: f64 = 12.7;

/// Line pitch as a multiple of the text height
const LINE_SPACING: f64 = 1.5;

/// Average sans-serif glyph advance as a multiple of the text height
const GLYPH_ADVANCE: f64 = 0.6;

/// Edge flags of one panel side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeTemplate {
    pub side: EdgeSide,
    pub kerf: KerfSign,
    pub flip: bool,
    pub short_side: bool,
}

/// Axes and edge flags of one panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelTemplate {
    pub kind: PanelKind,
    /// Axis running along the panel's top and bottom edges
    pub horizontal_axis: Axis,
    /// Axis running along the panel's left and right edges
    pub vertical_axis: Axis,
    /// Edges in top, bottom, left, right order
    pub edges: [EdgeTemplate; 4],
}

const fn edge(side: EdgeSide, kerf: KerfSign, flip: bool, short_side: bool) -> EdgeTemplate {
    EdgeTemplate {
        side,
        kerf,
        flip,
        short_side,
    }
}

/// Flags shared by the four vertical walls (back, left, right, front)
const WALL_EDGES: [EdgeTemplate; 4] = [
    edge(EdgeSide::Top, KerfSign::Positive, false, false),
    edge(EdgeSide::Bottom, KerfSign::Positive, true, false),
    edge(EdgeSide::Left, KerfSign::Positive, false, false),
    edge(EdgeSide::Right, KerfSign::Negative, false, false),
];

/// Flags shared by the two caps (bottom, top). Inverted kerf sign and
/// short-sided edges so they fit between the walls.
const CAP_EDGES: [EdgeTemplate; 4] = [
    edge(EdgeSide::Top, KerfSign::Negative, true, true),
    edge(EdgeSide::Bottom, KerfSign::Negative, false, true),
    edge(EdgeSide::Left, KerfSign::Negative, true, true),
    edge(EdgeSide::Right, KerfSign::Negative, false, true),
];

/// The mating contract for the whole box, in drawing order
pub const PANEL_TABLE: [PanelTemplate; 6] = [
    PanelTemplate {
        kind: PanelKind::Back,
        horizontal_axis: Axis::Width,
        vertical_axis: Axis::Height,
        edges: WALL_EDGES,
    },
    PanelTemplate {
        kind: PanelKind::Left,
        horizontal_axis: Axis::Depth,
        vertical_axis: Axis::Height,
        edges: WALL_EDGES,
    },
    PanelTemplate {
        kind: PanelKind::Bottom,
        horizontal_axis: Axis::Width,
        vertical_axis: Axis::Depth,
        edges: CAP_EDGES,
    },
    PanelTemplate {
        kind: PanelKind::Right,
        horizontal_axis: Axis::Depth,
        vertical_axis: Axis::Height,
        edges: WALL_EDGES,
    },
    PanelTemplate {
        kind: PanelKind::Front,
        horizontal_axis: Axis::Width,
        vertical_axis: Axis::Height,
        edges: WALL_EDGES,
    },
    PanelTemplate {
        kind: PanelKind::Top,
        horizontal_axis: Axis::Width,
        vertical_axis: Axis::Depth,
        edges: CAP_EDGES,
    },
];

/// Look up the template for a panel
pub fn template(kind: PanelKind) -> &'static PanelTemplate {
    PANEL_TABLE
        .iter()
        .find(|t| t.kind == kind)
        .unwrap_or(&PANEL_TABLE[0])
}

/// Presentation settings for the layout pass
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    /// Spacing between panels and around the page edge (mm)
    pub margin: f64,
    /// Draw a rectangle around all panels
    pub draw_bounding_box: bool,
    /// Emit text lines listing the box settings
    pub annotate: bool,
    /// Unit used for annotation text
    pub display_units: MeasurementSystem,
    /// Annotation text height (mm)
    pub font_size: f64,
}

impl LayoutOptions {
    /// Check that panels cut with `kerf` stay apart and text has a size
    pub fn validate(&self, kerf: f64) -> DimensionResult<()> {
        for (name, value) in [("margin", self.margin), ("font_size", self.font_size)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(DimensionError::InvalidLayout { name, value });
            }
        }
        // Teeth reach up to half a kerf past the panel outline on either side
        if self.margin <= kerf {
            return Err(DimensionError::MarginTooSmall {
                margin: self.margin,
                kerf,
            });
        }
        Ok(())
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            margin: DEFAULT_MARGIN_MM,
            draw_bounding_box: false,
            annotate: true,
            display_units: MeasurementSystem::Metric,
            font_size: 3.0,
        }
    }
}

/// Page extents in the working unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

/// A text line placed on the page, `position` being the start of its baseline
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub position: Point,
    pub text: String,
}

impl Annotation {
    /// Estimated area covered by the rendered text
    pub fn extent(&self, font_size: f64) -> Rect {
        Rect::new(
            Point::new(self.position.x, self.position.y - font_size),
            text_width(&self.text, font_size),
            font_size,
        )
    }
}

fn text_width(text: &str, font_size: f64) -> f64 {
    text.chars().count() as f64 * font_size * GLYPH_ADVANCE
}

/// One resolved edge of a panel
#[derive(Debug, Clone, PartialEq)]
pub struct PanelEdge {
    pub side: EdgeSide,
    pub axis: Axis,
    pub spec: EdgeSpec,
}

impl PanelEdge {
    /// For each notch, whether the panel's material protrudes there
    pub fn protrusions(&self) -> Vec<bool> {
        let outer = self.side.baseline_is_outer();
        self.spec
            .tab_levels()
            .into_iter()
            .map(|level| (level == TabLevel::Out) == outer)
            .collect()
    }

    pub fn segments(&self) -> Vec<Segment> {
        generate_edge(&self.spec)
    }
}

/// A panel placed on the page
#[derive(Debug, Clone, PartialEq)]
pub struct PanelLayout {
    pub kind: PanelKind,
    pub bounds: Rect,
    pub edges: Vec<PanelEdge>,
}

impl PanelLayout {
    pub fn edge(&self, side: EdgeSide) -> Option<&PanelEdge> {
        self.edges.iter().find(|e| e.side == side)
    }

    /// All cut segments of this panel, edge by edge
    pub fn segments(&self) -> Vec<Segment> {
        self.edges.iter().flat_map(|e| e.segments()).collect()
    }
}

/// Everything needed to draw one box
#[derive(Debug, Clone, PartialEq)]
pub struct BoxLayout {
    pub page: PageSize,
    pub panels: Vec<PanelLayout>,
    pub bounding_box: Option<Rect>,
    /// Box settings as text lines, whether or not they are annotated
    pub settings: Vec<String>,
    pub annotations: Vec<Annotation>,
}

impl BoxLayout {
    pub fn panel(&self, kind: PanelKind) -> Option<&PanelLayout> {
        self.panels.iter().find(|p| p.kind == kind)
    }

    /// Total length of all panel cuts
    pub fn cut_length(&self) -> f64 {
        self.panels
            .iter()
            .flat_map(|p| &p.edges)
            .flat_map(|e| e.spec.segments())
            .map(|s| s.length())
            .sum()
    }

    pub fn segment_count(&self) -> usize {
        self.panels
            .iter()
            .flat_map(|p| &p.edges)
            .map(|e| e.spec.segments().len())
            .sum()
    }
}

/// Lay out all six panels of `descriptor`
pub fn plan_layout(
    descriptor: &BoxDescriptor,
    options: &LayoutOptions,
) -> DimensionResult<BoxLayout> {
    options.validate(descriptor.kerf())?;

    let w = descriptor.width();
    let h = descriptor.height();
    let d = descriptor.depth();
    let m = options.margin;

    let pieces_width = 2.0 * d + w;
    let pieces_height = 2.0 * h + 2.0 * d;
    let mut page = PageSize {
        width: pieces_width + 4.0 * m,
        height: pieces_height + 5.0 * m,
    };

    let panels: Vec<PanelLayout> = PANEL_TABLE
        .iter()
        .map(|template| place_panel(descriptor, template, m))
        .collect();

    let bounding_box = options.draw_bounding_box.then(|| {
        Rect::new(
            Point::new(m, m),
            pieces_width + 2.0 * m,
            pieces_height + 3.0 * m,
        )
    });

    let settings = settings_lines(descriptor, options.display_units, bounding_box.as_ref());
    let annotations = if options.annotate {
        place_annotations(&settings, &panels, options, &mut page)
    } else {
        Vec::new()
    };

    tracing::debug!(
        "Page {:.3} x {:.3} with {} panels",
        page.width,
        page.height,
        PANEL_TABLE.len()
    );

    Ok(BoxLayout {
        page,
        panels,
        bounding_box,
        settings,
        annotations,
    })
}

fn panel_origin(kind: PanelKind, w: f64, h: f64, d: f64, m: f64) -> Point {
    match kind {
        PanelKind::Back => Point::new(d + 2.0 * m, m),
        PanelKind::Left => Point::new(m, h + 2.0 * m),
        PanelKind::Bottom => Point::new(d + 2.0 * m, h + 2.0 * m),
        PanelKind::Right => Point::new(d + w + 3.0 * m, h + 2.0 * m),
        PanelKind::Front => Point::new(d + 2.0 * m, h + d + 3.0 * m),
        PanelKind::Top => Point::new(d + 2.0 * m, 2.0 * h + d + 4.0 * m),
    }
}

fn place_panel(descriptor: &BoxDescriptor, template: &PanelTemplate, margin: f64) -> PanelLayout {
    let origin = panel_origin(
        template.kind,
        descriptor.width(),
        descriptor.height(),
        descriptor.depth(),
        margin,
    );
    let across = descriptor.axis(template.horizontal_axis);
    let down = descriptor.axis(template.vertical_axis);
    let bounds = Rect::new(origin, across.length, down.length);
    let t = descriptor.thickness();

    let edges = template
        .edges
        .iter()
        .map(|edge| {
            let (axis, start) = match edge.side {
                EdgeSide::Top => (template.horizontal_axis, origin),
                EdgeSide::Bottom => (
                    template.horizontal_axis,
                    Point::new(origin.x, origin.y + bounds.height - t),
                ),
                EdgeSide::Left => (template.vertical_axis, origin),
                EdgeSide::Right => (
                    template.vertical_axis,
                    Point::new(origin.x + bounds.width - t, origin.y),
                ),
            };
            let notches = descriptor.axis(axis);
            PanelEdge {
                side: edge.side,
                axis,
                spec: EdgeSpec {
                    orientation: edge.side.orientation(),
                    origin: start,
                    notch_length: notches.notch_length,
                    notch_count: notches.count,
                    half_kerf: edge.kerf.apply(descriptor.half_kerf()),
                    flip: edge.flip,
                    short_side: edge.short_side,
                    thickness: t,
                },
            }
        })
        .collect();

    PanelLayout {
        kind: template.kind,
        bounds,
        edges,
    }
}

fn settings_lines(
    descriptor: &BoxDescriptor,
    units: MeasurementSystem,
    bounding_box: Option<&Rect>,
) -> Vec<String> {
    let label = get_unit_label(units);
    let mut lines = vec![
        format!("Width ({}): {}", label, format_length(descriptor.width(), units)),
        format!("Height ({}): {}", label, format_length(descriptor.height(), units)),
        format!("Depth ({}): {}", label, format_length(descriptor.depth(), units)),
        format!(
            "Thickness ({}): {}",
            label,
            format_length(descriptor.thickness(), units)
        ),
        format!(
            "Notch Length ({}): {}",
            label,
            format_length(descriptor.nominal_notch_length(), units)
        ),
        format!("Cut Width ({}): {}", label, format_length(descriptor.kerf(), units)),
    ];
    if let Some(rect) = bounding_box {
        lines.push(format!(
            "Bounding box ({}): {} x {}",
            label,
            format_length(rect.width, units),
            format_length(rect.height, units)
        ));
    }
    lines
}

/// Position the text block, growing `page` when it has to go below the panels
fn place_annotations(
    lines: &[String],
    panels: &[PanelLayout],
    options: &LayoutOptions,
    page: &mut PageSize,
) -> Vec<Annotation> {
    let m = options.margin;
    let line_height = options.font_size * LINE_SPACING;
    let block_width = lines
        .iter()
        .map(|line| text_width(line, options.font_size))
        .fold(0.0, f64::max);
    let block_height = line_height * lines.len() as f64;

    // Free corner left of the back panel and above the left panel, kept one margin clear
    let corner = Rect::new(Point::new(m, m), block_width + m, block_height + m);
    let sheet = Rect::new(Point::new(0.0, 0.0), page.width, page.height);
    let fits_corner =
        sheet.contains_rect(&corner) && !panels.iter().any(|p| corner.overlaps(&p.bounds));

    let top = if fits_corner {
        m
    } else {
        let top = page.height;
        page.height = top + block_height + m;
        page.width = page.width.max(block_width + 2.0 * m);
        tracing::debug!(
            "Annotations do not fit beside the back panel, page grown to {:.3} x {:.3}",
            page.width,
            page.height
        );
        top
    };

    lines
        .iter()
        .enumerate()
        .map(|(i, text)| Annotation {
            position: Point::new(m, top + line_height * (i as f64 + 1.0)),
            text: text.clone(),
        })
        .collect()
}
