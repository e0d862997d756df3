//! Embeddable-frame handle and the display capability seam.

use std::path::PathBuf;

use crate::error::Result;

/// Reference to a generated viewer page, sized for inline embedding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IFrame {
    /// Relative path to the generated HTML.
    pub src: PathBuf,
    pub width: u32,
    pub height: u32,
}

impl IFrame {
    pub fn new(src: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            src: src.into(),
            width,
            height,
        }
    }

    /// The `<iframe>` element a host environment would embed.
    pub fn html_snippet(&self) -> String {
        format!(
            "<iframe src=\"{}\" width=\"{}\" height=\"{}\" frameborder=\"0\"></iframe>",
            self.src.display(),
            self.width,
            self.height
        )
    }
}

/// The display capability: anything that can render an embeddable frame.
///
/// The plotter requires one at construction time, so a missing display
/// environment fails before any file is written.
pub trait FrameSink {
    fn render(&self, frame: &IFrame) -> Result<()>;
}

/// Sink for terminal use: prints the iframe snippet to stdout.
#[derive(Debug, Default)]
pub struct TerminalSink;

impl FrameSink for TerminalSink {
    fn render(&self, frame: &IFrame) -> Result<()> {
        println!("{}", frame.html_snippet());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snippet_carries_src_and_dimensions() {
        let frame = IFrame::new("demo.html", 800, 500);
        let snippet = frame.html_snippet();
        assert!(snippet.contains("src=\"demo.html\""));
        assert!(snippet.contains("width=\"800\""));
        assert!(snippet.contains("height=\"500\""));
    }
}
