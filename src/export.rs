use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::data::filter::FilterSelection;
use crate::data::loader::DatasetCache;
use crate::data::view::{render, DashboardView};

/// Write the view as pretty-printed JSON.
pub fn write_view(view: &DashboardView, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, view).context("serializing dashboard view")?;
    writer
        .flush()
        .with_context(|| format!("writing {}", path.display()))?;
    log::info!(
        "Exported view of {} records to {}",
        view.filtered_count,
        path.display()
    );
    Ok(())
}

/// Load, filter, aggregate and write once, without opening a window.
pub fn run_headless(source: &Path, selection: &FilterSelection, out: &Path) -> Result<()> {
    let mut cache = DatasetCache::new();
    let dataset = cache.get_or_load(source)?;
    let view = render(&dataset, selection)
        .with_context(|| format!("rendering {}", source.display()))?;
    write_view(&view, out)
}
