// src/gui/actions/export.rs
use crate::{file, gui::app::App};

pub fn export(app: &mut App) {
    // normalize out_path first (mutates app) before any &app borrows
    if app.out_path_dirty {
        app.state.options.export.set_json_path(&app.out_path_text);
        app.out_path_text = app.state.options.export.json_path.to_string_lossy().into_owned();
        logf!("Export: Out path set → {}", app.state.options.export.json_path.display());
        app.out_path_dirty = false;
    }

    let Some(catalog) = &app.catalog else {
        logd!("Export: Clicked, but there's nothing to export");
        app.status("Nothing to export");
        return;
    };

    let msg = match file::export_catalog(&app.state.options.export, catalog) {
        Ok(paths) => {
            let last = paths.last().map(|p| p.display().to_string()).unwrap_or_default();
            logf!("Export: OK count={} last={}", paths.len(), last);
            format!("Exported {} file(s). Last: {}", paths.len(), last)
        }
        Err(e) => {
            loge!("Export: Error: {}", e);
            format!("Export failed: {e}")
        }
    };
    app.status(msg);
}
