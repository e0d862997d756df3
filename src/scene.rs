//! Scene configuration — the JSON sidecar the viewer reads.
//!
//! Field names are fixed by the viewer and must not change: `filename`,
//! `camera_position`, `look_at`, `point_size`, `point_opacity`,
//! `polylines_points`, `polylines_colors`.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{PlotError, Result};

/// A single 3D vertex of a polyline overlay.
pub type PolyPoint = [f64; 3];

/// Polyline overlays in canonical form: an ordered sequence of
/// (color, point list) pairs. Both mapping types and pair sequences funnel
/// into this via `FromIterator`; for maps, iteration order becomes the
/// canonical order (no sorting is applied).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polylines {
    pairs: Vec<(String, Vec<PolyPoint>)>,
}

impl Polylines {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Append one overlay, preserving insertion order.
    pub fn push(&mut self, color: impl Into<String>, points: Vec<PolyPoint>) {
        self.pairs.push((color.into(), points));
    }

    /// Split into the two parallel sequences the config carries.
    fn unzip(&self) -> (Vec<Vec<PolyPoint>>, Vec<String>) {
        let points = self.pairs.iter().map(|(_, line)| line.clone()).collect();
        let colors = self.pairs.iter().map(|(color, _)| color.clone()).collect();
        (points, colors)
    }
}

impl From<Vec<(String, Vec<PolyPoint>)>> for Polylines {
    fn from(pairs: Vec<(String, Vec<PolyPoint>)>) -> Self {
        Self { pairs }
    }
}

impl<S: Into<String>> FromIterator<(S, Vec<PolyPoint>)> for Polylines {
    fn from_iter<I: IntoIterator<Item = (S, Vec<PolyPoint>)>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().map(|(c, l)| (c.into(), l)).collect(),
        }
    }
}

/// The scene configuration serialized to `<output_name>.config.json`.
///
/// Immutable after construction; built fresh per plot invocation from the
/// caller's options plus the cloud's coordinate centroid.
#[derive(Debug, Clone, Serialize)]
pub struct SceneConfig {
    pub filename: String,
    pub camera_position: [f64; 3],
    pub look_at: [f64; 3],
    pub point_size: f64,
    pub point_opacity: f64,
    pub polylines_points: Vec<Vec<PolyPoint>>,
    pub polylines_colors: Vec<String>,
}

impl SceneConfig {
    /// Build the canonical config: camera at the origin, look-at at the
    /// given centroid, overlays unzipped into the two parallel sequences.
    pub fn new(
        output_name: &str,
        look_at: [f64; 3],
        point_size: f64,
        point_opacity: f64,
        polylines: &Polylines,
    ) -> Self {
        let (polylines_points, polylines_colors) = polylines.unzip();
        Self {
            filename: output_name.to_string(),
            camera_position: [0.0, 0.0, 0.0],
            look_at,
            point_size,
            point_opacity,
            polylines_points,
            polylines_colors,
        }
    }

    /// Write `<filename>.config.json` into `dir`, overwriting.
    pub fn write_json(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(format!("{}.config.json", self.filename));
        let file = File::create(&path).map_err(|e| PlotError::io("create", &path, e))?;
        serde_json::to_writer(BufWriter::new(file), self)
            .map_err(|e| PlotError::io("write", &path, e.into()))?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(points: &[[f64; 3]]) -> Vec<PolyPoint> {
        points.to_vec()
    }

    #[test]
    fn polyline_sequences_stay_parallel_and_ordered() {
        let mut polylines = Polylines::new();
        polylines.push("0xFFFFFF", line(&[[0.0, 0.0, 0.0], [0.0, 0.0, 1.0]]));
        polylines.push("0xFF00FF", line(&[[1.0, 0.0, 0.0], [1.0, 1.0, 1.0]]));

        let config = SceneConfig::new("scene", [0.0, 0.0, 0.0], 0.3, 0.9, &polylines);
        assert_eq!(config.polylines_colors, vec!["0xFFFFFF", "0xFF00FF"]);
        assert_eq!(config.polylines_points.len(), config.polylines_colors.len());
        assert_eq!(config.polylines_points[1][1], [1.0, 1.0, 1.0]);
    }

    #[test]
    fn empty_overlays_serialize_as_empty_arrays() {
        let config = SceneConfig::new("demo", [0.5, 0.5, 0.0], 0.3, 0.9, &Polylines::new());
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["polylines_points"], serde_json::json!([]));
        assert_eq!(json["polylines_colors"], serde_json::json!([]));
        assert_eq!(json["look_at"], serde_json::json!([0.5, 0.5, 0.0]));
        assert_eq!(json["camera_position"], serde_json::json!([0.0, 0.0, 0.0]));
    }

    #[test]
    fn map_and_pair_inputs_with_same_order_serialize_identically() {
        // BTreeMap iterates in key order; a pair list in the same order must
        // produce byte-identical JSON.
        let map: std::collections::BTreeMap<String, Vec<PolyPoint>> = [
            ("0xAA0000".to_string(), line(&[[0.0, 0.0, 0.0]])),
            ("0xBB0000".to_string(), line(&[[1.0, 1.0, 1.0]])),
        ]
        .into_iter()
        .collect();
        let from_map: Polylines = map.into_iter().collect();

        let from_pairs: Polylines = vec![
            ("0xAA0000".to_string(), line(&[[0.0, 0.0, 0.0]])),
            ("0xBB0000".to_string(), line(&[[1.0, 1.0, 1.0]])),
        ]
        .into();

        let a = SceneConfig::new("x", [0.0, 0.0, 0.0], 0.3, 0.9, &from_map);
        let b = SceneConfig::new("x", [0.0, 0.0, 0.0], 0.3, 0.9, &from_pairs);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn json_fields_exact_names_and_numeric_types() {
        let config = SceneConfig::new("demo", [1.0, 2.0, 3.0], 0.3, 0.9, &Polylines::new());
        let text = serde_json::to_string(&config).unwrap();
        for field in [
            "\"filename\"",
            "\"camera_position\"",
            "\"look_at\"",
            "\"point_size\"",
            "\"point_opacity\"",
            "\"polylines_points\"",
            "\"polylines_colors\"",
        ] {
            assert!(text.contains(field), "missing {field} in {text}");
        }
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert!(value["point_size"].is_number());
        assert!(value["point_opacity"].is_number());
    }
}
