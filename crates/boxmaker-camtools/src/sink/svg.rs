//! SVG sink
//!
//! The document's user units are millimetres (via `viewBox`); the physical page
//! size is expressed in points at the configured resolution. Each panel becomes
//! a `<g>` group holding a single path.

use std::fmt::Write as _;
use std::path::PathBuf;

use boxmaker_core::{Point, Rect, Segment, MM_PER_INCH};

use super::{check_page, write_atomically, SinkOptions, VectorSink};
use crate::error::{SinkError, SinkResult};

#[derive(Debug)]
pub struct SvgSink {
    path: Option<PathBuf>,
    options: SinkOptions,
    body: String,
    open: bool,
    panel_open: bool,
    /// Path data of the current panel, flushed by `end_panel`
    path_data: String,
    last_point: Option<Point>,
    document: Option<String>,
}

impl SvgSink {
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
            body: String::new(),
            open: false,
            panel_open: false,
            path_data: String::new(),
            last_point: None,
            document: None,
        }
    }

    /// The finished document, available after [`VectorSink::finish`]
    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }

    fn ensure_open(&self) -> SinkResult<()> {
        if self.open {
            Ok(())
        } else {
            Err(SinkError::PageNotOpen)
        }
    }

    fn flush_path(&mut self) {
        if !self.path_data.is_empty() {
            let _ = writeln!(
                self.body,
                "    <path d=\"{}\" />",
                self.path_data.trim_end()
            );
            self.path_data.clear();
        }
        self.last_point = None;
    }

    fn to_points(&self, mm: f64) -> f64 {
        mm / MM_PER_INCH * self.options.dpi
    }
}

impl VectorSink for SvgSink {
    fn begin_page(&mut self, width: f64, height: f64) -> SinkResult<()> {
        if self.open {
            return Err(SinkError::PageAlreadyOpen);
        }
        check_page(width, height)?;
        self.open = true;
        self.document = None;
        self.body.clear();

        let _ = writeln!(
            self.body,
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>"
        );
        let _ = writeln!(
            self.body,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" \
             width=\"{:.3}pt\" height=\"{:.3}pt\" viewBox=\"0 0 {:.3} {:.3}\">",
            self.to_points(width),
            self.to_points(height),
            width,
            height
        );
        let _ = writeln!(
            self.body,
            "  <desc>Produced by BoxMaker {} on {}</desc>",
            env!("CARGO_PKG_VERSION"),
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        );
        let _ = writeln!(
            self.body,
            "  <g fill=\"none\" stroke=\"black\" stroke-width=\"{}\" \
             stroke-linecap=\"round\" stroke-linejoin=\"round\">",
            self.options.stroke_width
        );
        Ok(())
    }

    fn begin_panel(&mut self, name: &str) -> SinkResult<()> {
        self.ensure_open()?;
        self.flush_path();
        let _ = writeln!(self.body, "   <g id=\"{}\">", escape(name));
        self.panel_open = true;
        Ok(())
    }

    fn end_panel(&mut self) -> SinkResult<()> {
        self.ensure_open()?;
        self.flush_path();
        if self.panel_open {
            self.body.push_str("   </g>\n");
            self.panel_open = false;
        }
        Ok(())
    }

    fn line(&mut self, segment: &Segment) -> SinkResult<()> {
        self.ensure_open()?;
        // Connectors may be drawn against the direction of travel
        let (from, to) = match self.last_point {
            Some(p) if p.approx_eq(&segment.end) && !p.approx_eq(&segment.start) => {
                (segment.end, segment.start)
            }
            _ => (segment.start, segment.end),
        };
        let continues = self.last_point.is_some_and(|p| p.approx_eq(&from));
        if !continues {
            let _ = write!(self.path_data, "M {:.3} {:.3} ", from.x, from.y);
        }
        let _ = write!(self.path_data, "L {:.3} {:.3} ", to.x, to.y);
        self.last_point = Some(to);
        Ok(())
    }

    fn rectangle(&mut self, rect: &Rect) -> SinkResult<()> {
        self.ensure_open()?;
        self.flush_path();
        let _ = writeln!(
            self.body,
            "    <rect x=\"{:.3}\" y=\"{:.3}\" width=\"{:.3}\" height=\"{:.3}\" />",
            rect.origin.x, rect.origin.y, rect.width, rect.height
        );
        Ok(())
    }

    fn text(&mut self, position: Point, text: &str) -> SinkResult<()> {
        self.ensure_open()?;
        self.flush_path();
        let _ = writeln!(
            self.body,
            "    <text x=\"{:.3}\" y=\"{:.3}\" font-family=\"sans-serif\" \
             font-size=\"{}\" fill=\"black\" stroke=\"none\">{}</text>",
            position.x,
            position.y,
            self.options.font_size,
            escape(text)
        );
        Ok(())
    }

    fn finish(&mut self) -> SinkResult<()> {
        self.ensure_open()?;
        self.end_panel()?;
        self.body.push_str("  </g>\n</svg>\n");
        self.open = false;

        let document = std::mem::take(&mut self.body);
        if let Some(path) = &self.path {
            write_atomically(path, document.as_bytes())?;
        }
        self.document = Some(document);
        Ok(())
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
