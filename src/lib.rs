//! pyntcloud-plot — exports an in-memory point cloud to a self-contained,
//! browser-viewable artifact set: an ASCII PLY file, a JSON scene
//! configuration, and an HTML shell wired to a static viewer asset tree.

pub mod assets;
pub mod cloud;
pub mod error;
pub mod frame;
pub mod plot;
pub mod ply;
pub mod scene;
#[cfg(not(target_arch = "wasm32"))]
pub mod server;
pub mod template;

pub use cloud::{CloudSource, ExportOptions, PointCloud, SavedStructure};
pub use error::{ErrorKind, PlotError, Result};
pub use frame::{FrameSink, IFrame, TerminalSink};
pub use plot::{PlotOptions, Plotter, DEFAULT_OUTPUT_NAME};
pub use scene::{Polylines, SceneConfig};

/// One-shot export: build a [`Plotter`] around `sink`, run the routine in
/// the current working directory, return the embeddable frame.
pub fn plot(
    cloud: &dyn CloudSource,
    sink: Box<dyn FrameSink>,
    opts: &PlotOptions,
) -> Result<IFrame> {
    Plotter::new(Some(sink))?.plot(cloud, opts)
}
