use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::color::ColorMap;
use crate::data::filter::{Dimension, FilterError, FilterSelection};
use crate::data::loader::DatasetCache;
use crate::data::model::Dataset;
use crate::data::view::{render, DashboardView};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Why nothing is being charted.
#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    /// The data source could not be loaded.
    LoadFailed(String),
    /// The filters matched no rows.
    NoMatches,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Source identifier of the current dataset.
    pub source: PathBuf,

    cache: DatasetCache,

    /// Loaded dataset (None until a load succeeds).
    pub dataset: Option<Arc<Dataset>>,

    /// Accepted values per filter dimension.
    pub selection: FilterSelection,

    /// Output of the last render (None when nothing could be rendered).
    pub view: Option<DashboardView>,

    /// Error / warning shown in place of the charts.
    pub status: Option<Status>,

    /// One series colour per gender.
    pub gender_colors: ColorMap,

    /// Transient message for the top bar (e.g. export result).
    pub notice: Option<String>,
}

impl AppState {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            cache: DatasetCache::new(),
            dataset: None,
            selection: FilterSelection::default(),
            view: None,
            status: None,
            gender_colors: ColorMap::new(&[]),
            notice: None,
        }
    }

    /// Load (or fetch from cache) the table at `path` and render it with
    /// every value selected.
    pub fn open(&mut self, path: &Path) {
        self.source = path.to_path_buf();
        match self.cache.get_or_load(path) {
            Ok(dataset) => {
                self.selection = FilterSelection::all(&dataset);
                self.gender_colors = ColorMap::new(&dataset.genders);
                self.dataset = Some(dataset);
                self.status = None;
                self.refresh();
            }
            Err(e) => {
                log::error!("Failed to load data: {e:#}");
                self.dataset = None;
                self.view = None;
                self.status = Some(Status::LoadFailed(error_chain(&e)));
            }
        }
    }

    /// Re-run filter and aggregation for the current selection.
    pub fn refresh(&mut self) {
        let Some(ds) = &self.dataset else {
            return;
        };
        match render(ds, &self.selection) {
            Ok(view) => {
                log::debug!("Rendered {} of {} records", view.filtered_count, ds.len());
                self.view = Some(view);
                self.status = None;
            }
            Err(FilterError::EmptyResult) => {
                log::warn!("No records match the current filters");
                self.view = None;
                self.status = Some(Status::NoMatches);
            }
        }
    }

    /// Toggle a single value in one dimension.
    pub fn toggle(&mut self, dim: Dimension, value: &str) {
        let selected = self.selection.get_mut(dim);
        if !selected.remove(value) {
            selected.insert(value.to_string());
        }
        self.refresh();
    }

    /// Select every observed value of a dimension.
    pub fn select_all(&mut self, dim: Dimension) {
        if let Some(ds) = &self.dataset {
            *self.selection.get_mut(dim) = dim.options(ds).iter().cloned().collect();
            self.refresh();
        }
    }

    /// Clear a dimension. An empty selection is unrestricted, so this shows
    /// every value too.
    pub fn select_none(&mut self, dim: Dimension) {
        self.selection.get_mut(dim).clear();
        self.refresh();
    }
}

fn error_chain(err: &dyn std::error::Error) -> String {
    let mut msg = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        msg.push_str(": ");
        msg.push_str(&cause.to_string());
        source = cause.source();
    }
    msg
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn survey_file() -> NamedTempFile {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(
            tmp,
            "id,age,gender,level,country,usage,platform,affects,sleep,mental,conflicts,addicted\n\
             1,19,Female,Undergraduate,Bangladesh,5.2,Instagram,Yes,6.5,6,3,8\n\
             2,22,Male,Graduate,India,2.1,Twitter,No,7.5,8,0,3\n\
             3,17,Male,High School,India,6.0,TikTok,Yes,5.0,5,4,9\n"
        )
        .unwrap();
        tmp
    }

    #[test]
    fn open_selects_everything_and_renders() {
        let tmp = survey_file();
        let mut state = AppState::new("unused.csv");
        state.open(tmp.path());

        assert!(state.status.is_none());
        assert_eq!(state.selection.countries.len(), 2);
        assert_eq!(state.view.as_ref().unwrap().filtered_count, 3);
    }

    #[test]
    fn open_missing_file_reports_load_failure() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::new("x");
        state.open(&dir.path().join("nope.csv"));

        assert!(state.dataset.is_none());
        assert!(state.view.is_none());
        match &state.status {
            Some(Status::LoadFailed(msg)) => assert!(msg.contains("not found"), "{msg}"),
            other => panic!("unexpected status: {other:?}"),
        }
    }

    #[test]
    fn deselecting_last_matching_value_warns_instead_of_rendering() {
        let tmp = survey_file();
        let mut state = AppState::new("x");
        state.open(tmp.path());

        state.toggle(Dimension::Country, "India");
        assert_eq!(state.view.as_ref().unwrap().filtered_count, 1);

        state.toggle(Dimension::Gender, "Female");
        assert_eq!(state.status, Some(Status::NoMatches));
        assert!(state.view.is_none());

        state.toggle(Dimension::Gender, "Female");
        assert!(state.status.is_none());
        assert_eq!(state.view.as_ref().unwrap().filtered_count, 1);
    }

    #[test]
    fn select_none_shows_everything() {
        let tmp = survey_file();
        let mut state = AppState::new("x");
        state.open(tmp.path());

        state.toggle(Dimension::AcademicLevel, "Graduate");
        assert_eq!(state.view.as_ref().unwrap().filtered_count, 2);

        state.select_none(Dimension::AcademicLevel);
        assert!(state.selection.academic_levels.is_empty());
        assert_eq!(state.view.as_ref().unwrap().filtered_count, 3);

        state.select_all(Dimension::AcademicLevel);
        assert_eq!(state.selection.academic_levels.len(), 3);
        assert_eq!(state.view.as_ref().unwrap().filtered_count, 3);
    }

    #[test]
    fn reopening_uses_the_cached_table() {
        let tmp = survey_file();
        let path = tmp.path().to_path_buf();
        let mut state = AppState::new(&path);
        state.open(&path);
        let first = state.dataset.clone().unwrap();

        drop(tmp);
        state.open(&path);
        assert!(Arc::ptr_eq(&first, state.dataset.as_ref().unwrap()));
    }
}
