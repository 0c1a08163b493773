use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use super::model::{Dataset, Record, COLUMN_NAMES};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum LoadError {
    /// The source could not be opened. Terminal for the current render cycle.
    #[error("data file not found: {}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{}: expected {expected} columns, found {found} (row {row})", path.display())]
    ColumnCount {
        path: PathBuf,
        /// 0 is the header row.
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("{}: row {row} is malformed", path.display())]
    Malformed {
        path: PathBuf,
        row: usize,
        #[source]
        source: csv::Error,
    },
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Load the survey table from a delimited file.
///
/// The header row is read and thrown away: columns are mapped onto
/// [`COLUMN_NAMES`] by position, never by name. Every row must carry exactly
/// twelve fields.
pub fn load_csv(path: &Path) -> Result<Dataset, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::NotFound {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let header_len = reader
        .headers()
        .map_err(|source| LoadError::Malformed {
            path: path.to_path_buf(),
            row: 0,
            source,
        })?
        .len();
    check_width(path, 0, header_len)?;

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let row = idx + 1;
        let raw = result.map_err(|source| LoadError::Malformed {
            path: path.to_path_buf(),
            row,
            source,
        })?;
        check_width(path, row, raw.len())?;

        // No header passed: fields are matched to struct members by position.
        let record: Record = raw.deserialize(None).map_err(|source| LoadError::Malformed {
            path: path.to_path_buf(),
            row,
            source,
        })?;
        records.push(record);
    }

    Ok(Dataset::new(path, records))
}

fn check_width(path: &Path, row: usize, found: usize) -> Result<(), LoadError> {
    if found != COLUMN_NAMES.len() {
        return Err(LoadError::ColumnCount {
            path: path.to_path_buf(),
            row,
            expected: COLUMN_NAMES.len(),
            found,
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Load-once cache
// ---------------------------------------------------------------------------

/// Memoizes loaded datasets by source identifier. Entries are written once and
/// never invalidated; failed loads are not cached.
#[derive(Debug, Default)]
pub struct DatasetCache {
    entries: HashMap<PathBuf, Arc<Dataset>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached table for `path`, reading the file on first access.
    pub fn get_or_load(&mut self, path: &Path) -> Result<Arc<Dataset>, LoadError> {
        if let Some(ds) = self.entries.get(path) {
            log::debug!("Cache hit for {}", path.display());
            return Ok(Arc::clone(ds));
        }

        let dataset = Arc::new(load_csv(path)?);
        if dataset.is_empty() {
            log::warn!("{} has a header but no records", path.display());
        } else {
            log::info!("Loaded {} records from {}", dataset.len(), path.display());
        }
        self.entries.insert(path.to_path_buf(), Arc::clone(&dataset));
        Ok(dataset)
    }

    #[cfg(test)]
    fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(path)
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "Student_ID,Age,Gender,Academic_Level,Country,Avg_Daily_Usage_Hours,\
Most_Used_Platform,Affects_Academic_Performance,Sleep_Hours_Per_Night,Mental_Health_Score,\
Conflicts_Over_Social_Media,Addicted_Score";

    fn write_csv(body: &str) -> NamedTempFile {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(tmp, "{body}").unwrap();
        tmp
    }

    #[test]
    fn maps_columns_by_position_ignoring_header_names() {
        let tmp = write_csv(
            "a,b,c,d,e,f,g,h,i,j,k,l\n\
             1,19,Female,Undergraduate,Bangladesh,5.2,Instagram,Yes,6.5,6,3,8\n\
             2,22,Male,Graduate,India,2.1,Twitter,No,7.5,8,0,3\n",
        );
        let ds = load_csv(tmp.path()).unwrap();
        assert_eq!(ds.len(), 2);

        let first = &ds.records[0];
        assert_eq!(first.student_id, "1");
        assert_eq!(first.age, 19);
        assert_eq!(first.gender, "Female");
        assert_eq!(first.country, "Bangladesh");
        assert_eq!(first.avg_daily_usage_hours, 5.2);
        assert_eq!(first.most_used_platform, "Instagram");
        assert_eq!(first.affects_academic_performance, "Yes");
        assert_eq!(first.mental_health_score, 6.0);
        assert_eq!(first.conflicts_over_social_media, 3);
        assert_eq!(first.addicted_score, 8.0);
        assert_eq!(ds.countries, vec!["Bangladesh", "India"]);
    }

    #[test]
    fn accepts_the_survey_header() {
        let tmp = write_csv(&format!(
            "{HEADER}\n7,20,Male,High School,US, 4.0 ,TikTok,No,7.0,7,1,5\n"
        ));
        let ds = load_csv(tmp.path()).unwrap();
        assert_eq!(ds.records[0].academic_level, "High School");
        assert_eq!(ds.records[0].avg_daily_usage_hours, 4.0);
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.csv");
        let err = load_csv(&path).unwrap_err();
        assert!(matches!(err, LoadError::NotFound { .. }), "{err:?}");
    }

    #[test]
    fn wrong_header_width_is_rejected() {
        let tmp = write_csv("a,b,c\n1,2,3\n");
        match load_csv(tmp.path()).unwrap_err() {
            LoadError::ColumnCount { row, expected, found, .. } => {
                assert_eq!(row, 0);
                assert_eq!(expected, 12);
                assert_eq!(found, 3);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn short_data_row_is_rejected() {
        let tmp = write_csv(&format!(
            "{HEADER}\n\
             1,19,Female,Undergraduate,Bangladesh,5.2,Instagram,Yes,6.5,6,3,8\n\
             2,22,Male\n"
        ));
        match load_csv(tmp.path()).unwrap_err() {
            LoadError::ColumnCount { row, found, .. } => {
                assert_eq!(row, 2);
                assert_eq!(found, 3);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_numeric_value_is_malformed() {
        let tmp = write_csv(&format!(
            "{HEADER}\n1,19,Female,Undergraduate,Bangladesh,lots,Instagram,Yes,6.5,6,3,8\n"
        ));
        let err = load_csv(tmp.path()).unwrap_err();
        assert!(matches!(err, LoadError::Malformed { row: 1, .. }), "{err:?}");
    }

    #[test]
    fn cache_returns_the_same_table_without_rereading() {
        let tmp = write_csv(&format!(
            "{HEADER}\n1,19,Female,Undergraduate,Bangladesh,5.2,Instagram,Yes,6.5,6,3,8\n"
        ));
        let path = tmp.path().to_path_buf();
        let mut cache = DatasetCache::new();

        let first = cache.get_or_load(&path).unwrap();
        assert!(cache.contains(&path));

        // Remove the file: a second read would now fail.
        drop(tmp);
        let second = cache.get_or_load(&path).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn header_only_file_loads_as_empty_table() {
        let tmp = write_csv(&format!("{HEADER}\n"));
        let mut cache = DatasetCache::new();
        let ds = cache.get_or_load(tmp.path()).unwrap();
        assert!(ds.is_empty());
        assert!(ds.countries.is_empty());
        assert!(cache.contains(tmp.path()));
    }

    #[test]
    fn cache_does_not_remember_failures() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("later.csv");
        let mut cache = DatasetCache::new();

        assert!(cache.get_or_load(&path).is_err());
        assert!(cache.is_empty());

        std::fs::write(
            &path,
            format!("{HEADER}\n1,19,Female,Undergraduate,Bangladesh,5.2,Instagram,Yes,6.5,6,3,8\n"),
        )
        .unwrap();
        assert_eq!(cache.get_or_load(&path).unwrap().len(), 1);
    }
}
