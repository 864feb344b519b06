//! G-code sink for laser cutters
//!
//! Consecutive segments that share an endpoint are chained into one path so the
//! laser only switches off between disconnected cuts. Output is y-up with the
//! page's bottom-left corner at the work origin.

use std::path::PathBuf;

use boxmaker_core::{Point, Rect, Segment};
use serde::{Deserialize, Serialize};

use super::{check_page, write_atomically, VectorSink};
use crate::error::{SinkError, SinkResult};

/// Machine settings written into the program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaserOptions {
    /// Number of passes over each path
    pub passes: u32,
    /// Spindle/laser power (S word)
    pub power: u32,
    /// Cutting feed rate (mm/min)
    pub feed_rate: f64,
    /// Z lowered between passes (mm)
    pub z_step_down: f64,
}

impl Default for LaserOptions {
    fn default() -> Self {
        Self {
            passes: 1,
            power: 1000,
            feed_rate: 500.0,
            z_step_down: 0.5,
        }
    }
}

#[derive(Debug, Clone)]
enum Block {
    Comment(String),
    Path(Vec<Point>),
}

#[derive(Debug)]
pub struct GcodeSink {
    path: Option<PathBuf>,
    options: LaserOptions,
    page_height: Option<f64>,
    settings: Vec<String>,
    blocks: Vec<Block>,
    output: Option<String>,
}

impl GcodeSink {
    pub fn to_file(path: impl Into<PathBuf>, options: LaserOptions) -> Self {
        Self::build(Some(path.into()), options)
    }

    pub fn in_memory(options: LaserOptions) -> Self {
        Self::build(None, options)
    }

    fn build(path: Option<PathBuf>, options: LaserOptions) -> Self {
        Self {
            path,
            options,
            page_height: None,
            settings: Vec::new(),
            blocks: Vec::new(),
            output: None,
        }
    }

    /// The finished program, available after [`VectorSink::finish`]
    pub fn program(&self) -> Option<&str> {
        self.output.as_deref()
    }

    fn page_height(&self) -> SinkResult<f64> {
        self.page_height.ok_or(SinkError::PageNotOpen)
    }

    fn push_path(&mut self, points: Vec<Point>) {
        self.blocks.push(Block::Path(points));
    }

    fn render(&self, page_height: f64) -> String {
        let o = &self.options;
        let mut gcode = String::new();

        gcode.push_str("; BoxMaker G-code\n");
        gcode.push_str(&format!(
            "; Generated by BoxMaker {}\n",
            env!("CARGO_PKG_VERSION")
        ));
        gcode.push_str(";\n");
        if !self.settings.is_empty() {
            gcode.push_str("; --- Box Settings ---\n");
            for line in &self.settings {
                gcode.push_str(&format!("; {}\n", line));
            }
            gcode.push_str(";\n");
        }
        gcode.push_str("; --- Laser Settings ---\n");
        gcode.push_str(&format!("; Laser passes: {}\n", o.passes));
        gcode.push_str(&format!("; Laser power: S{}\n", o.power));
        gcode.push_str(&format!("; Feed rate: {:.0} mm/min\n", o.feed_rate));
        gcode.push_str(";\n");

        gcode.push_str("G21 ; Set units to millimeters\n");
        gcode.push_str("G90 ; Absolute positioning\n");
        gcode.push_str("G17 ; XY plane selection\n");
        gcode.push_str("G0 Z5.00 ; Move to safe height\n\n");

        let y = |p: &Point| page_height - p.y;

        for block in &self.blocks {
            let points = match block {
                Block::Comment(text) => {
                    gcode.push_str(&format!("; {}\n", text));
                    continue;
                }
                Block::Path(points) => points,
            };
            let Some(first) = points.first() else {
                continue;
            };

            gcode.push_str(&format!(
                "G0 X{:.3} Y{:.3} ; Rapid to start\n",
                first.x,
                y(first)
            ));

            for pass in 1..=o.passes {
                let z = pass_depth(pass, o.z_step_down);
                if o.passes > 1 {
                    gcode.push_str(&format!("; Pass {}/{} at Z{:.2}\n", pass, o.passes, z));
                }
                gcode.push_str(&format!("G0 Z{:.2} ; Move to pass depth\n", z));
                gcode.push_str(&format!("M3 S{} ; Laser on\n", o.power));
                for (idx, p) in points.iter().skip(1).enumerate() {
                    if idx == 0 {
                        gcode.push_str(&format!(
                            "G1 X{:.3} Y{:.3} F{:.0}\n",
                            p.x,
                            y(p),
                            o.feed_rate
                        ));
                    } else {
                        gcode.push_str(&format!("G1 X{:.3} Y{:.3}\n", p.x, y(p)));
                    }
                }
                gcode.push_str("M5 ; Laser off\n");
                if pass < o.passes {
                    gcode.push_str(&format!(
                        "G0 X{:.3} Y{:.3} ; Return to start\n",
                        first.x,
                        y(first)
                    ));
                }
            }
            gcode.push_str("G0 Z5.00 ; Retract\n");
        }

        gcode.push_str("\nM5 ; Ensure laser off\n");
        gcode.push_str("G0 Z10.0 ; Move to safe height\n");
        gcode.push_str("G0 X0 Y0 ; Return to origin\n");
        gcode.push_str("M2 ; Program end\n");
        gcode
    }
}

/// Z of pass `pass` (1-based); the first pass cuts at the surface
fn pass_depth(pass: u32, step_down: f64) -> f64 {
    if pass <= 1 {
        0.0
    } else {
        -(f64::from(pass - 1) * step_down)
    }
}

impl VectorSink for GcodeSink {
    fn begin_page(&mut self, width: f64, height: f64) -> SinkResult<()> {
        if self.page_height.is_some() {
            return Err(SinkError::PageAlreadyOpen);
        }
        check_page(width, height)?;
        self.page_height = Some(height);
        self.settings.clear();
        self.blocks.clear();
        self.output = None;
        Ok(())
    }

    fn describe(&mut self, settings: &[String]) -> SinkResult<()> {
        self.page_height()?;
        self.settings = settings.to_vec();
        Ok(())
    }

    fn begin_panel(&mut self, name: &str) -> SinkResult<()> {
        self.page_height()?;
        self.blocks.push(Block::Comment(format!("Panel: {}", name)));
        Ok(())
    }

    fn line(&mut self, segment: &Segment) -> SinkResult<()> {
        self.page_height()?;
        if let Some(Block::Path(points)) = self.blocks.last_mut() {
            // Connectors may be drawn against the direction of travel
            if let Some(last) = points.last().copied() {
                if last.approx_eq(&segment.start) {
                    points.push(segment.end);
                    return Ok(());
                }
                if last.approx_eq(&segment.end) {
                    points.push(segment.start);
                    return Ok(());
                }
            }
        }
        self.push_path(vec![segment.start, segment.end]);
        Ok(())
    }

    fn rectangle(&mut self, rect: &Rect) -> SinkResult<()> {
        self.page_height()?;
        let [a, b, c, d] = rect.corners();
        self.push_path(vec![a, b, c, d, a]);
        Ok(())
    }

    fn text(&mut self, _position: Point, text: &str) -> SinkResult<()> {
        self.page_height()?;
        // Text is not engraved, only kept as a program comment
        let single_line = text.replace(['\n', '\r'], " ");
        self.blocks.push(Block::Comment(single_line));
        Ok(())
    }

    fn finish(&mut self) -> SinkResult<()> {
        let page_height = self.page_height()?;
        let program = self.render(page_height);
        let paths = self
            .blocks
            .iter()
            .filter(|b| matches!(b, Block::Path(_)))
            .count();
        tracing::debug!("G-code program with {} paths", paths);
        if let Some(path) = &self.path {
            write_atomically(path, program.as_bytes())?;
        }
        self.output = Some(program);
        self.page_height = None;
        Ok(())
    }
}
