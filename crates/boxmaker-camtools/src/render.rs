//! Drives a [`VectorSink`] through a planned box layout.

use crate::error::{CamToolResult, SinkResult};
use crate::notched_box::{plan_layout, BoxDescriptor, BoxLayout, BoxRequest, LayoutOptions};
use crate::sink::VectorSink;

/// Emit `layout` into `sink`: settings and annotations first, then the
/// optional bounding box, then each panel's edges in table order.
pub fn emit(layout: &BoxLayout, sink: &mut dyn VectorSink) -> SinkResult<()> {
    sink.begin_page(layout.page.width, layout.page.height)?;
    sink.describe(&layout.settings)?;

    for annotation in &layout.annotations {
        sink.text(annotation.position, &annotation.text)?;
    }

    if let Some(rect) = &layout.bounding_box {
        sink.rectangle(rect)?;
    }

    for panel in &layout.panels {
        sink.begin_panel(panel.kind.name())?;
        for edge in &panel.edges {
            for segment in edge.spec.segments() {
                sink.line(&segment)?;
            }
        }
        sink.end_panel()?;
    }

    sink.finish()
}

/// Lay out an already normalized box and draw it
pub fn render_descriptor(
    descriptor: &BoxDescriptor,
    options: &LayoutOptions,
    sink: &mut dyn VectorSink,
) -> CamToolResult<BoxLayout> {
    let layout = plan_layout(descriptor, options)?;
    tracing::info!(
        "Rendering {} panels ({} segments, {:.1} mm of cut)",
        layout.panels.len(),
        layout.segment_count(),
        layout.cut_length()
    );
    emit(&layout, sink)?;
    Ok(layout)
}

/// Normalize `request`, lay it out and draw it
pub fn render_box(
    request: &BoxRequest,
    options: &LayoutOptions,
    sink: &mut dyn VectorSink,
) -> CamToolResult<BoxLayout> {
    let descriptor = request.descriptor()?;
    render_descriptor(&descriptor, options, sink)
}
