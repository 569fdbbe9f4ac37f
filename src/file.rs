// src/file.rs

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::config::options::ExportOptions;
use crate::csv::{flatten_items, to_csv_string};
use crate::data::Catalog;
use crate::error::ScrapeError;

/// Write the JSON document and, when configured, the flat CSV.
/// Returns the paths written, JSON first.
pub fn export_catalog(export: &ExportOptions, catalog: &Catalog) -> Result<Vec<PathBuf>, ScrapeError> {
    let mut written = Vec::with_capacity(2);

    write_json(&export.json_path, catalog, export.pretty)?;
    logf!("wrote {}", export.json_path.display());
    written.push(export.json_path.clone());

    if let Some(csv_path) = &export.csv_path {
        let rows = flatten_items(&catalog.units)?;
        write_csv(csv_path, &to_csv_string(&rows))?;
        logf!("wrote {} ({} rows)", csv_path.display(), rows.len());
        written.push(csv_path.clone());
    }
    Ok(written)
}

/// Non-ASCII text is written as-is, not escaped.
pub fn write_json(path: &Path, catalog: &Catalog, pretty: bool) -> Result<(), ScrapeError> {
    ensure_parent(path)?;
    let mut out = BufWriter::new(File::create(path)?); // truncate/overwrite
    if pretty {
        serde_json::to_writer_pretty(&mut out, catalog)?;
    } else {
        serde_json::to_writer(&mut out, catalog)?;
    }
    out.flush()?;
    Ok(())
}

pub fn write_csv(path: &Path, contents: &str) -> Result<(), ScrapeError> {
    ensure_parent(path)?;
    fs::write(path, contents)?;
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<(), ScrapeError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    Ok(())
}

pub fn ensure_directory(dir: &Path) -> Result<(), ScrapeError> {
    if dir.exists() && !dir.is_dir() {
        return Err(ScrapeError::Usage(format!("Path exists but is not a directory: {}", dir.display())));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

pub fn looks_like_dir_hint(p: &Path) -> bool {
    let s = p.to_string_lossy();
    s.ends_with('/') || s.ends_with('\\')
}
