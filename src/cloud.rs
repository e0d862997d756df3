//! Point cloud boundary — the trait the plot routine consumes, plus a
//! concrete in-memory `PointCloud` backed by the ASCII PLY codec.

use std::path::Path;

use crate::error::{PlotError, Result};
use crate::ply;

/// Auxiliary structures a cloud may carry alongside its points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SavedStructure {
    Mesh,
}

/// Options forwarded to a cloud's file-export operation.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Auxiliary structures to include in the output file.
    pub also_save: Vec<SavedStructure>,
    /// Request a text (non-binary) encoding.
    pub as_text: bool,
}

impl ExportOptions {
    /// The options the plot routine always requests: mesh included, text encoding.
    pub fn mesh_as_text() -> Self {
        Self {
            also_save: vec![SavedStructure::Mesh],
            as_text: true,
        }
    }
}

/// Anything the exporter can plot: exposes raw coordinates and knows how to
/// serialize itself (plus auxiliary structures) to a named file.
pub trait CloudSource {
    /// The n-by-3 coordinate array.
    fn xyz(&self) -> &[[f64; 3]];

    /// Write the cloud (and any structures named in `opts`) to `path`.
    fn export(&self, path: &Path, opts: &ExportOptions) -> Result<()>;
}

/// Per-axis arithmetic mean of the coordinate rows.
///
/// Errors on an empty cloud rather than producing NaN.
pub fn centroid(xyz: &[[f64; 3]]) -> Result<[f64; 3]> {
    if xyz.is_empty() {
        return Err(PlotError::export("cannot plot an empty point cloud"));
    }
    let mut sum = [0.0f64; 3];
    for row in xyz {
        sum[0] += row[0];
        sum[1] += row[1];
        sum[2] += row[2];
    }
    let n = xyz.len() as f64;
    Ok([sum[0] / n, sum[1] / n, sum[2] / n])
}

/// An in-memory point cloud: positions, optional per-point RGB colors,
/// optional triangle mesh.
#[derive(Debug, Clone, Default)]
pub struct PointCloud {
    pub points: Vec<[f64; 3]>,
    pub colors: Option<Vec<[u8; 3]>>,
    pub mesh: Option<Vec<[u32; 3]>>,
}

impl PointCloud {
    pub fn from_points(points: Vec<[f64; 3]>) -> Self {
        Self {
            points,
            colors: None,
            mesh: None,
        }
    }

    /// Load a cloud from an ASCII PLY file.
    pub fn from_ply_file(path: &Path) -> Result<Self> {
        ply::read_ascii(path)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl CloudSource for PointCloud {
    fn xyz(&self) -> &[[f64; 3]] {
        &self.points
    }

    fn export(&self, path: &Path, opts: &ExportOptions) -> Result<()> {
        if !opts.as_text {
            return Err(PlotError::export("binary PLY encoding is not supported"));
        }
        let with_mesh = opts.also_save.contains(&SavedStructure::Mesh);
        ply::write_ascii(self, path, with_mesh)
    }
}
