//! The export routine: stages everything a browser needs to view a cloud.
//!
//! One call produces `<name>.html`, `<name>.config.json` and `<name>.ply`
//! in the target directory, stages the static viewer assets next to them,
//! and hands back an [`IFrame`] reference for the display sink.

use std::path::Path;

use crate::assets;
use crate::cloud::{centroid, CloudSource, ExportOptions};
use crate::error::{PlotError, Result};
use crate::frame::{FrameSink, IFrame};
use crate::scene::{Polylines, SceneConfig};
use crate::template;

/// Default output base name, shared by all three artifacts.
pub const DEFAULT_OUTPUT_NAME: &str = "pyntcloud_plot";

/// Caller-facing knobs of the export routine.
#[derive(Debug, Clone)]
pub struct PlotOptions {
    /// Point sprite size, forwarded verbatim to the viewer config.
    pub point_size: f64,
    /// Point opacity in [0, 1] (recommended, not enforced), forwarded verbatim.
    pub point_opacity: f64,
    /// File stem for all three outputs. Treated as opaque: not sanitized,
    /// so the caller must keep it free of path separators.
    pub output_name: String,
    /// (width, height) of the returned embeddable frame. Does not affect
    /// the generated files.
    pub frame_shape: (u32, u32),
    /// Overlay geometry, in canonical ordered-pairs form.
    pub polylines: Polylines,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            point_size: 0.3,
            point_opacity: 0.9,
            output_name: DEFAULT_OUTPUT_NAME.to_string(),
            frame_shape: (800, 500),
            polylines: Polylines::new(),
        }
    }
}

/// Exports point clouds for a display sink. Construction fails without a
/// sink, so environments that cannot render the result are rejected before
/// any file I/O.
pub struct Plotter {
    sink: Box<dyn FrameSink>,
}

impl Plotter {
    pub fn new(sink: Option<Box<dyn FrameSink>>) -> Result<Self> {
        match sink {
            Some(sink) => Ok(Self { sink }),
            None => Err(PlotError::missing_capability()),
        }
    }

    /// Export `cloud` into the current working directory and return the
    /// embeddable-frame reference.
    ///
    /// On a mid-sequence failure the files already written stay on disk;
    /// there is no cleanup or rollback.
    pub fn plot(&self, cloud: &dyn CloudSource, opts: &PlotOptions) -> Result<IFrame> {
        let cwd = std::env::current_dir()
            .map_err(|e| PlotError::io("resolve", Path::new("."), e))?;
        self.plot_in(&cwd, cloud, opts)
    }

    /// The workhorse: same as [`plot`](Self::plot) with an explicit target
    /// directory. Steps run strictly in sequence, first error aborts.
    pub fn plot_in(
        &self,
        dir: &Path,
        cloud: &dyn CloudSource,
        opts: &PlotOptions,
    ) -> Result<IFrame> {
        let look_at = centroid(cloud.xyz())?;
        let config = SceneConfig::new(
            &opts.output_name,
            look_at,
            opts.point_size,
            opts.point_opacity,
            &opts.polylines,
        );
        config.write_json(dir)?;

        let html_path = template::write_html(dir, &opts.output_name)?;

        let ply_path = dir.join(format!("{}.ply", opts.output_name));
        cloud.export(&ply_path, &ExportOptions::mesh_as_text())?;

        assets::stage(dir)?;

        // Single diagnostic line: the resolved viewer page.
        eprintln!("{}", html_path.display());

        let (width, height) = opts.frame_shape;
        Ok(IFrame::new(
            format!("{}.html", opts.output_name),
            width,
            height,
        ))
    }

    /// Export and immediately hand the frame to the display sink.
    pub fn show(&self, cloud: &dyn CloudSource, opts: &PlotOptions) -> Result<IFrame> {
        let frame = self.plot(cloud, opts)?;
        self.sink.render(&frame)?;
        Ok(frame)
    }

    /// Directory-targeted variant of [`show`](Self::show).
    pub fn show_in(
        &self,
        dir: &Path,
        cloud: &dyn CloudSource,
        opts: &PlotOptions,
    ) -> Result<IFrame> {
        let frame = self.plot_in(dir, cloud, opts)?;
        self.sink.render(&frame)?;
        Ok(frame)
    }
}
