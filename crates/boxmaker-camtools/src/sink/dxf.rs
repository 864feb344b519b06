//! DXF sink
//!
//! Segments become `LINE` entities and text becomes `TEXT` entities. DXF is
//! y-up, so every y coordinate is mirrored about the page height. Entities
//! drawn inside a panel are placed on a layer named after the panel.

use std::path::PathBuf;

use ::dxf::entities::{Entity, EntityType, Line, Text};
use ::dxf::Drawing;
use boxmaker_core::{Point, Rect, Segment};

use super::{check_page, write_atomically, SinkOptions, VectorSink};
use crate::error::{SinkError, SinkResult};

const DEFAULT_LAYER: &str = "0";

pub struct DxfSink {
    path: Option<PathBuf>,
    options: SinkOptions,
    drawing: Option<Drawing>,
    page_height: f64,
    layer: String,
    bytes: Option<Vec<u8>>,
}

impl DxfSink {
    pub fn to_file(path: impl Into<PathBuf>, options: SinkOptions) -> Self {
        Self::build(Some(path.into()), options)
    }

    pub fn in_memory(options: SinkOptions) -> Self {
        Self::build(None, options)
    }

    fn build(path: Option<PathBuf>, options: SinkOptions) -> Self {
        Self {
            path,
            options,
            drawing: None,
            page_height: 0.0,
            layer: DEFAULT_LAYER.to_string(),
            bytes: None,
        }
    }

    /// The serialized drawing, available after [`VectorSink::finish`]
    pub fn bytes(&self) -> Option<&[u8]> {
        self.bytes.as_deref()
    }

    fn point(&self, p: Point) -> ::dxf::Point {
        ::dxf::Point::new(p.x, self.page_height - p.y, 0.0)
    }

    fn add(&mut self, specific: EntityType) -> SinkResult<()> {
        let layer = self.layer.clone();
        let drawing = self.drawing.as_mut().ok_or(SinkError::PageNotOpen)?;
        let mut entity = Entity::new(specific);
        entity.common.layer = layer;
        drawing.add_entity(entity);
        Ok(())
    }

    fn add_line(&mut self, from: Point, to: Point) -> SinkResult<()> {
        let line = Line::new(self.point(from), self.point(to));
        self.add(EntityType::Line(line))
    }
}

impl VectorSink for DxfSink {
    fn begin_page(&mut self, width: f64, height: f64) -> SinkResult<()> {
        if self.drawing.is_some() {
            return Err(SinkError::PageAlreadyOpen);
        }
        check_page(width, height)?;
        self.drawing = Some(Drawing::new());
        self.page_height = height;
        self.layer = DEFAULT_LAYER.to_string();
        self.bytes = None;
        Ok(())
    }

    fn begin_panel(&mut self, name: &str) -> SinkResult<()> {
        if self.drawing.is_none() {
            return Err(SinkError::PageNotOpen);
        }
        self.layer = name.to_string();
        Ok(())
    }

    fn end_panel(&mut self) -> SinkResult<()> {
        self.layer = DEFAULT_LAYER.to_string();
        Ok(())
    }

    fn line(&mut self, segment: &Segment) -> SinkResult<()> {
        self.add_line(segment.start, segment.end)
    }

    fn rectangle(&mut self, rect: &Rect) -> SinkResult<()> {
        for edge in rect.edges() {
            self.add_line(edge.start, edge.end)?;
        }
        Ok(())
    }

    fn text(&mut self, position: Point, text: &str) -> SinkResult<()> {
        let entity = Text {
            location: self.point(position),
            text_height: self.options.font_size,
            value: text.to_string(),
            ..Default::default()
        };
        self.add(EntityType::Text(entity))
    }

    fn finish(&mut self) -> SinkResult<()> {
        let drawing = self.drawing.take().ok_or(SinkError::PageNotOpen)?;
        let mut buffer = Vec::new();
        drawing
            .save(&mut buffer)
            .map_err(|e| SinkError::Dxf(e.to_string()))?;
        tracing::debug!("DXF drawing with {} entities", drawing.entities().count());

        if let Some(path) = &self.path {
            write_atomically(path, &buffer)?;
        }
        self.bytes = Some(buffer);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reload(sink: &DxfSink) -> Drawing {
        let mut bytes = sink.bytes().unwrap();
        Drawing::load(&mut bytes).unwrap()
    }

    #[test]
    fn test_lines_are_flipped_to_y_up() {
        let mut sink = DxfSink::in_memory(SinkOptions::default());
        sink.begin_page(100.0, 50.0).unwrap();
        sink.begin_panel("back").unwrap();
        sink.line(&Segment::new(Point::new(10.0, 0.0), Point::new(20.0, 5.0)))
            .unwrap();
        sink.end_panel().unwrap();
        sink.finish().unwrap();

        let drawing = reload(&sink);
        let lines: Vec<_> = drawing
            .entities()
            .filter_map(|e| match &e.specific {
                EntityType::Line(l) => Some((e.common.layer.clone(), l.clone())),
                _ => None,
            })
            .collect();
        assert_eq!(lines.len(), 1);
        let (layer, line) = &lines[0];
        assert_eq!(layer, "back");
        assert!((line.p1.x - 10.0).abs() < 1e-9);
        assert!((line.p1.y - 50.0).abs() < 1e-9);
        assert!((line.p2.y - 45.0).abs() < 1e-9);
    }

    #[test]
    fn test_rectangle_becomes_four_lines_and_text_is_kept() {
        let mut sink = DxfSink::in_memory(SinkOptions::default());
        sink.begin_page(10.0, 10.0).unwrap();
        sink.rectangle(&Rect::new(Point::new(1.0, 1.0), 2.0, 2.0))
            .unwrap();
        sink.text(Point::new(1.0, 1.0), "Width (mm): 2.000").unwrap();
        sink.finish().unwrap();

        let drawing = reload(&sink);
        let lines = drawing
            .entities()
            .filter(|e| matches!(e.specific, EntityType::Line(_)))
            .count();
        assert_eq!(lines, 4);
        let texts: Vec<String> = drawing
            .entities()
            .filter_map(|e| match &e.specific {
                EntityType::Text(t) => Some(t.value.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(texts, vec!["Width (mm): 2.000".to_string()]);
    }

    #[test]
    fn test_finish_without_page_fails() {
        let mut sink = DxfSink::in_memory(SinkOptions::default());
        assert!(matches!(sink.finish(), Err(SinkError::PageNotOpen)));
    }
}
