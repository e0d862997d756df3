//! Asset stager — copies the packaged viewer asset tree into the working
//! directory so the generated HTML can load it via relative paths.

use std::fs;
use std::io::ErrorKind as IoKind;
use std::path::Path;

use crate::error::{PlotError, Result};

/// Directory name the generated HTML expects next to itself.
pub const ASSET_DIR_NAME: &str = "pyntcloud_plot_assets";

/// The packaged viewer files, embedded at build time.
const ASSET_FILES: &[(&str, &str)] = &[
    ("viewer.js", include_str!("../assets/viewer/viewer.js")),
    ("style.css", include_str!("../assets/viewer/style.css")),
];

/// Stage the viewer assets into `<dir>/pyntcloud_plot_assets`.
///
/// Idempotent by existence check: if the destination directory is already
/// there, nothing is copied and nothing is refreshed. Returns `true` when
/// the assets were staged by this call, `false` when they already existed.
pub fn stage(dir: &Path) -> Result<bool> {
    let dest = dir.join(ASSET_DIR_NAME);
    if dest.is_dir() {
        return Ok(false);
    }

    // Two first-time invocations may race on creation; losing the race is
    // equivalent to the directory having existed all along.
    match fs::create_dir(&dest) {
        Ok(()) => {}
        Err(e) if e.kind() == IoKind::AlreadyExists => return Ok(false),
        Err(e) => return Err(PlotError::io("create directory", &dest, e)),
    }

    for (name, contents) in ASSET_FILES {
        let path = dest.join(name);
        fs::write(&path, contents).map_err(|e| PlotError::io("write", &path, e))?;
    }
    Ok(true)
}
