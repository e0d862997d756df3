//! HTML templater — materializes `<output_name>.html` from the packaged
//! viewer template by substituting the filename placeholder token.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PlotError, Result};

/// Token the viewer template carries where the output base name belongs.
pub const FILENAME_PLACEHOLDER: &str = "FILENAME_PLACEHOLDER";

/// The viewer shell packaged with the crate.
pub const PACKAGED_TEMPLATE: &str = include_str!("../assets/points.html");

/// Substitute the placeholder, line-granular: only lines containing the
/// token are rewritten (every occurrence replaced with the single-quoted
/// output name); all other lines pass through byte-identical, line endings
/// preserved.
pub fn render(template: &str, output_name: &str) -> String {
    let mut out = String::with_capacity(template.len());
    for line in template.split_inclusive('\n') {
        if line.contains(FILENAME_PLACEHOLDER) {
            out.push_str(&line.replace(FILENAME_PLACEHOLDER, &format!("'{output_name}'")));
        } else {
            out.push_str(line);
        }
    }
    out
}

/// Write `<output_name>.html` into `dir` from the packaged template,
/// overwriting any existing file.
pub fn write_html(dir: &Path, output_name: &str) -> Result<PathBuf> {
    write_rendered(PACKAGED_TEMPLATE, dir, output_name)
}

/// Same as [`write_html`] but with a caller-supplied template file.
pub fn write_html_from(template_path: &Path, dir: &Path, output_name: &str) -> Result<PathBuf> {
    if !template_path.is_file() {
        return Err(PlotError::template_not_found(template_path));
    }
    let template =
        fs::read_to_string(template_path).map_err(|e| PlotError::io("read", template_path, e))?;
    write_rendered(&template, dir, output_name)
}

fn write_rendered(template: &str, dir: &Path, output_name: &str) -> Result<PathBuf> {
    let path = dir.join(format!("{output_name}.html"));
    fs::write(&path, render(template, output_name)).map_err(|e| PlotError::io("write", &path, e))?;
    Ok(path)
}
