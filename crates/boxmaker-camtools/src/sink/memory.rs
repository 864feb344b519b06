//! In-memory sink recording every draw call

use boxmaker_core::{Point, Rect, Segment};

use super::{check_page, VectorSink};
use crate::error::{SinkError, SinkResult};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    BeginPage { width: f64, height: f64 },
    Describe(Vec<String>),
    BeginPanel(String),
    EndPanel,
    Line(Segment),
    Rectangle(Rect),
    Text { position: Point, text: String },
    Finish,
}

#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    commands: Vec<DrawCommand>,
    open: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// All recorded line segments, in order
    pub fn lines(&self) -> Vec<Segment> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Line(s) => Some(*s),
                _ => None,
            })
            .collect()
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.commands.last(), Some(DrawCommand::Finish))
    }

    fn record(&mut self, command: DrawCommand) -> SinkResult<()> {
        if !self.open {
            return Err(SinkError::PageNotOpen);
        }
        self.commands.push(command);
        Ok(())
    }
}

impl VectorSink for MemorySink {
    fn begin_page(&mut self, width: f64, height: f64) -> SinkResult<()> {
        if self.open {
            return Err(SinkError::PageAlreadyOpen);
        }
        check_page(width, height)?;
        self.open = true;
        self.commands.push(DrawCommand::BeginPage { width, height });
        Ok(())
    }

    fn describe(&mut self, settings: &[String]) -> SinkResult<()> {
        self.record(DrawCommand::Describe(settings.to_vec()))
    }

    fn begin_panel(&mut self, name: &str) -> SinkResult<()> {
        self.record(DrawCommand::BeginPanel(name.to_string()))
    }

    fn end_panel(&mut self) -> SinkResult<()> {
        self.record(DrawCommand::EndPanel)
    }

    fn line(&mut self, segment: &Segment) -> SinkResult<()> {
        self.record(DrawCommand::Line(*segment))
    }

    fn rectangle(&mut self, rect: &Rect) -> SinkResult<()> {
        self.record(DrawCommand::Rectangle(*rect))
    }

    fn text(&mut self, position: Point, text: &str) -> SinkResult<()> {
        self.record(DrawCommand::Text {
            position,
            text: text.to_string(),
        })
    }

    fn finish(&mut self) -> SinkResult<()> {
        self.record(DrawCommand::Finish)?;
        self.open = false;
        Ok(())
    }
}
