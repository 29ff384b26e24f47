//! I/O helpers for grayscale images, JSON, and trajectory text.
//!
//! - `load_grayscale_image`: read a PNG/JPEG/etc. into an owned 8-bit gray buffer.
//! - `save_grayscale_u8`: write an owned 8-bit gray buffer to a PNG.
//! - `write_json_file`: pretty-print a serializable value to disk.
//! - `write_trajectory`: one `x y` pair per line.
use super::GrayImageU8;
use crate::error::TraceError;
use crate::types::Trajectory;
use image::DynamicImage;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Load an image from disk and convert to 8-bit grayscale.
pub fn load_grayscale_image(path: &Path) -> Result<GrayImageU8, TraceError> {
    let img = image::open(path)
        .map_err(|e| TraceError::Io(format!("Failed to open {}: {e}", path.display())))?
        .into_luma8();
    Ok(GrayImageU8::from(img))
}

/// Save an 8-bit grayscale buffer to a PNG.
pub fn save_grayscale_u8(buffer: &GrayImageU8, path: &Path) -> Result<(), TraceError> {
    ensure_parent_dir(path)?;
    DynamicImage::ImageLuma8(buffer.to_luma())
        .save(path)
        .map_err(|e| TraceError::Io(format!("Failed to save {}: {e}", path.display())))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), TraceError> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value).map_err(|e| {
        TraceError::Io(format!("Failed to serialize JSON for {}: {e}", path.display()))
    })?;
    fs::write(path, json)
        .map_err(|e| TraceError::Io(format!("Failed to write JSON {}: {e}", path.display())))
}

/// Format a trajectory as whitespace-separated `x y` lines.
pub fn format_trajectory(traj: &Trajectory) -> String {
    let mut out = String::new();
    for p in traj.iter() {
        out.push_str(&format!("{} {}\n", p.x, p.y));
    }
    out
}

/// Write a trajectory to `path`, one `x y` pair per line.
pub fn write_trajectory(path: &Path, traj: &Trajectory) -> Result<(), TraceError> {
    ensure_parent_dir(path)?;
    let mut file = fs::File::create(path)
        .map_err(|e| TraceError::Io(format!("Failed to create {}: {e}", path.display())))?;
    file.write_all(format_trajectory(traj).as_bytes())
        .map_err(|e| TraceError::Io(format!("Failed to write {}: {e}", path.display())))
}

fn ensure_parent_dir(path: &Path) -> Result<(), TraceError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                TraceError::Io(format!("Failed to create {}: {e}", parent.display()))
            })?;
        }
    }
    Ok(())
}
