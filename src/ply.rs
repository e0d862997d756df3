//! ASCII PLY codec for `PointCloud`.
//!
//! Writes `format ascii 1.0` with an `x y z` vertex element (plus
//! `red green blue` uchar properties when colors are present) and a face
//! element with `vertex_indices` lists when a mesh is written. The reader
//! handles the same subset and skips unknown vertex properties positionally.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::cloud::PointCloud;
use crate::error::{PlotError, Result};

pub fn write_ascii(cloud: &PointCloud, path: &Path, with_mesh: bool) -> Result<()> {
    let file = File::create(path).map_err(|e| PlotError::io("create", path, e))?;
    let mut out = BufWriter::new(file);
    write_ascii_inner(cloud, &mut out, with_mesh).map_err(|e| PlotError::io("write", path, e))
}

fn write_ascii_inner(
    cloud: &PointCloud,
    out: &mut impl Write,
    with_mesh: bool,
) -> std::io::Result<()> {
    let faces = if with_mesh {
        cloud.mesh.as_deref().unwrap_or(&[])
    } else {
        &[]
    };

    writeln!(out, "ply")?;
    writeln!(out, "format ascii 1.0")?;
    writeln!(out, "element vertex {}", cloud.points.len())?;
    writeln!(out, "property float x")?;
    writeln!(out, "property float y")?;
    writeln!(out, "property float z")?;
    if cloud.colors.is_some() {
        writeln!(out, "property uchar red")?;
        writeln!(out, "property uchar green")?;
        writeln!(out, "property uchar blue")?;
    }
    if !faces.is_empty() {
        writeln!(out, "element face {}", faces.len())?;
        writeln!(out, "property list uchar int vertex_indices")?;
    }
    writeln!(out, "end_header")?;

    match &cloud.colors {
        Some(colors) => {
            for (p, c) in cloud.points.iter().zip(colors) {
                writeln!(out, "{} {} {} {} {} {}", p[0], p[1], p[2], c[0], c[1], c[2])?;
            }
        }
        None => {
            for p in &cloud.points {
                writeln!(out, "{} {} {}", p[0], p[1], p[2])?;
            }
        }
    }

    for f in faces {
        writeln!(out, "3 {} {} {}", f[0], f[1], f[2])?;
    }

    out.flush()
}

/// Minimal ASCII PLY reader: vertex positions, optional uchar colors,
/// optional triangular faces.
pub fn read_ascii(path: &Path) -> Result<PointCloud> {
    let file = File::open(path).map_err(|e| PlotError::io("open", path, e))?;
    let reader = BufReader::new(file);
    let mut lines = reader.lines();

    let bad = |msg: &str| PlotError::export(&format!("{}: {msg}", path.display()));

    match lines.next() {
        Some(Ok(l)) if l.trim() == "ply" => {}
        _ => return Err(bad("not a PLY file (missing 'ply' magic)")),
    }

    let mut vertex_count = 0usize;
    let mut face_count = 0usize;
    let mut vertex_props: Vec<String> = Vec::new();
    let mut in_vertex_element = false;

    // Header
    loop {
        let line = match lines.next() {
            Some(Ok(l)) => l,
            Some(Err(e)) => return Err(PlotError::io("read", path, e)),
            None => return Err(bad("unexpected end of file in header")),
        };
        let line = line.trim();
        let mut words = line.split_whitespace();
        match words.next() {
            Some("format") => {
                if words.next() != Some("ascii") {
                    return Err(bad("only ascii format is supported"));
                }
            }
            Some("element") => match (words.next(), words.next()) {
                (Some("vertex"), Some(n)) => {
                    vertex_count = n.parse().map_err(|_| bad("bad vertex count"))?;
                    in_vertex_element = true;
                }
                (Some("face"), Some(n)) => {
                    face_count = n.parse().map_err(|_| bad("bad face count"))?;
                    in_vertex_element = false;
                }
                _ => in_vertex_element = false,
            },
            Some("property") => {
                if in_vertex_element {
                    if let Some(name) = line.split_whitespace().last() {
                        vertex_props.push(name.to_string());
                    }
                }
            }
            Some("end_header") => break,
            _ => {}
        }
    }

    let idx = |name: &str| vertex_props.iter().position(|p| p == name);
    let (xi, yi, zi) = match (idx("x"), idx("y"), idx("z")) {
        (Some(x), Some(y), Some(z)) => (x, y, z),
        _ => return Err(bad("vertex element lacks x/y/z properties")),
    };
    let color_idx = match (idx("red"), idx("green"), idx("blue")) {
        (Some(r), Some(g), Some(b)) => Some((r, g, b)),
        _ => None,
    };

    let mut points = Vec::with_capacity(vertex_count);
    let mut colors = color_idx.map(|_| Vec::with_capacity(vertex_count));

    for _ in 0..vertex_count {
        let line = match lines.next() {
            Some(Ok(l)) => l,
            Some(Err(e)) => return Err(PlotError::io("read", path, e)),
            None => return Err(bad("fewer vertex rows than declared")),
        };
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < vertex_props.len() {
            return Err(bad("short vertex row"));
        }
        let num = |i: usize| -> Result<f64> {
            fields[i].parse().map_err(|_| bad("bad number in vertex row"))
        };
        points.push([num(xi)?, num(yi)?, num(zi)?]);
        if let (Some((r, g, b)), Some(colors)) = (color_idx, colors.as_mut()) {
            let byte = |i: usize| -> Result<u8> {
                fields[i].parse().map_err(|_| bad("bad color in vertex row"))
            };
            colors.push([byte(r)?, byte(g)?, byte(b)?]);
        }
    }

    let mut mesh = Vec::with_capacity(face_count);
    for _ in 0..face_count {
        let line = match lines.next() {
            Some(Ok(l)) => l,
            Some(Err(e)) => return Err(PlotError::io("read", path, e)),
            None => return Err(bad("fewer face rows than declared")),
        };
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.first() != Some(&"3") || fields.len() < 4 {
            return Err(bad("only triangular faces are supported"));
        }
        let vert = |i: usize| -> Result<u32> {
            fields[i].parse().map_err(|_| bad("bad index in face row"))
        };
        mesh.push([vert(1)?, vert(2)?, vert(3)?]);
    }

    Ok(PointCloud {
        points,
        colors,
        mesh: if mesh.is_empty() { None } else { Some(mesh) },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_to_string(cloud: &PointCloud, with_mesh: bool) -> String {
        let mut buf = Vec::new();
        write_ascii_inner(cloud, &mut buf, with_mesh).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn header_declares_vertex_count_and_properties() {
        let cloud = PointCloud::from_points(vec![[0.0, 0.0, 0.0], [1.0, 2.0, 3.0]]);
        let text = write_to_string(&cloud, true);
        assert!(text.starts_with("ply\nformat ascii 1.0\n"));
        assert!(text.contains("element vertex 2\n"));
        assert!(text.contains("property float x\n"));
        assert!(!text.contains("element face"), "no mesh, no face element");
        assert!(text.ends_with("end_header\n0 0 0\n1 2 3\n"));
    }

    #[test]
    fn mesh_written_only_when_requested() {
        let cloud = PointCloud {
            points: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            colors: None,
            mesh: Some(vec![[0, 1, 2]]),
        };
        let with = write_to_string(&cloud, true);
        assert!(with.contains("element face 1\n"));
        assert!(with.contains("property list uchar int vertex_indices\n"));
        assert!(with.ends_with("3 0 1 2\n"));

        let without = write_to_string(&cloud, false);
        assert!(!without.contains("element face"));
    }

    #[test]
    fn colors_add_uchar_properties() {
        let cloud = PointCloud {
            points: vec![[0.0, 0.0, 0.0]],
            colors: Some(vec![[255, 0, 128]]),
            mesh: None,
        };
        let text = write_to_string(&cloud, false);
        assert!(text.contains("property uchar red\n"));
        assert!(text.ends_with("0 0 0 255 0 128\n"));
    }

    #[test]
    fn reader_roundtrips_writer_output() {
        let dir = std::env::temp_dir().join(format!("ply-rt-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("cloud.ply");

        let cloud = PointCloud {
            points: vec![[0.0, 0.5, 1.0], [2.0, 3.0, 4.5], [1.0, 1.0, 1.0]],
            colors: Some(vec![[1, 2, 3], [4, 5, 6], [7, 8, 9]]),
            mesh: Some(vec![[0, 1, 2]]),
        };
        write_ascii(&cloud, &path, true).unwrap();
        let back = read_ascii(&path).unwrap();

        assert_eq!(back.points, cloud.points);
        assert_eq!(back.colors, cloud.colors);
        assert_eq!(back.mesh, cloud.mesh);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn reader_skips_unknown_vertex_properties() {
        let dir = std::env::temp_dir().join(format!("ply-extra-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("extra.ply");
        std::fs::write(
            &path,
            "ply\nformat ascii 1.0\nelement vertex 1\n\
             property float x\nproperty float y\nproperty float z\n\
             property float confidence\nend_header\n1 2 3 0.9\n",
        )
        .unwrap();

        let cloud = read_ascii(&path).unwrap();
        assert_eq!(cloud.points, vec![[1.0, 2.0, 3.0]]);
        assert!(cloud.colors.is_none());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn reader_rejects_binary_format() {
        let dir = std::env::temp_dir().join(format!("ply-bin-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bin.ply");
        std::fs::write(
            &path,
            "ply\nformat binary_little_endian 1.0\nelement vertex 0\nend_header\n",
        )
        .unwrap();

        assert!(read_ascii(&path).is_err());
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
