use std::collections::BTreeSet;

use thiserror::Error;

use super::model::{distinct_values, CategoricalColumn, Dataset, Record};

// ---------------------------------------------------------------------------
// Filter selection
// ---------------------------------------------------------------------------

/// One of the three filterable dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Country,
    AcademicLevel,
    Gender,
}

impl Dimension {
    pub const ALL: [Dimension; 3] = [
        Dimension::Country,
        Dimension::AcademicLevel,
        Dimension::Gender,
    ];

    pub fn column(self) -> CategoricalColumn {
        match self {
            Dimension::Country => CategoricalColumn::Country,
            Dimension::AcademicLevel => CategoricalColumn::AcademicLevel,
            Dimension::Gender => CategoricalColumn::Gender,
        }
    }

    pub fn title(self) -> &'static str {
        self.column().title()
    }

    /// Options offered for this dimension, in display order.
    pub fn options(self, dataset: &Dataset) -> &[String] {
        match self {
            Dimension::Country => &dataset.countries,
            Dimension::AcademicLevel => &dataset.academic_levels,
            Dimension::Gender => &dataset.genders,
        }
    }
}

/// Accepted values per dimension.
///
/// An empty set means "no restriction" for that dimension, never "exclude all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub countries: BTreeSet<String>,
    pub academic_levels: BTreeSet<String>,
    pub genders: BTreeSet<String>,
}

impl FilterSelection {
    /// Every observed value selected, the initial state of the sidebar.
    pub fn all(dataset: &Dataset) -> Self {
        FilterSelection {
            countries: dataset.countries.iter().cloned().collect(),
            academic_levels: dataset.academic_levels.iter().cloned().collect(),
            genders: dataset.genders.iter().cloned().collect(),
        }
    }

    pub fn get(&self, dim: Dimension) -> &BTreeSet<String> {
        match dim {
            Dimension::Country => &self.countries,
            Dimension::AcademicLevel => &self.academic_levels,
            Dimension::Gender => &self.genders,
        }
    }

    pub fn get_mut(&mut self, dim: Dimension) -> &mut BTreeSet<String> {
        match dim {
            Dimension::Country => &mut self.countries,
            Dimension::AcademicLevel => &mut self.academic_levels,
            Dimension::Gender => &mut self.genders,
        }
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("no records match the selected filters")]
    EmptyResult,
}

/// Records that passed a [`FilterSelection`], in their original order.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredTable {
    records: Vec<Record>,
}

impl FilteredTable {
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Never zero: [`filter`] returns an error instead of an empty table.
    pub fn len(&self) -> usize {
        self.records.len()
    }
}

/// Keep the records whose country, academic level and gender are all accepted.
///
/// Returns [`FilterError::EmptyResult`] when nothing survives; callers must
/// not aggregate in that case.
pub fn filter(
    records: &[Record],
    selection: &FilterSelection,
) -> Result<FilteredTable, FilterError> {
    let accepted: Vec<(CategoricalColumn, BTreeSet<String>)> = Dimension::ALL
        .iter()
        .map(|&dim| (dim.column(), effective_set(records, dim, selection)))
        .collect();

    let kept: Vec<Record> = records
        .iter()
        .filter(|r| {
            accepted
                .iter()
                .all(|(col, set)| set.contains(col.value(r)))
        })
        .cloned()
        .collect();

    if kept.is_empty() {
        return Err(FilterError::EmptyResult);
    }
    Ok(FilteredTable { records: kept })
}

/// The selected set, or the column's full observed domain when nothing is selected.
fn effective_set(
    records: &[Record],
    dim: Dimension,
    selection: &FilterSelection,
) -> BTreeSet<String> {
    let selected = selection.get(dim);
    if selected.is_empty() {
        distinct_values(records, dim.column()).into_iter().collect()
    } else {
        selected.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::record;

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn sample() -> Vec<Record> {
        vec![
            record("1", "US", "High School", "Male", "TikTok", 2.0),
            record("2", "US", "High School", "Female", "Instagram", 4.0),
            record("3", "India", "Undergraduate", "Female", "YouTube", 5.0),
            record("4", "India", "High School", "Male", "TikTok", 6.0),
            record("5", "UK", "Graduate", "Female", "Instagram", 3.0),
        ]
    }

    fn ids(table: &FilteredTable) -> Vec<&str> {
        table.records().iter().map(|r| r.student_id.as_str()).collect()
    }

    #[test]
    fn empty_selection_returns_everything() {
        let records = sample();
        let table = filter(&records, &FilterSelection::default()).unwrap();
        assert_eq!(table.records(), records.as_slice());
    }

    #[test]
    fn empty_dimension_is_unrestricted() {
        let records = sample();
        let selection = FilterSelection {
            genders: set(&["Female"]),
            ..Default::default()
        };
        assert_eq!(ids(&filter(&records, &selection).unwrap()), vec!["2", "3", "5"]);
    }

    #[test]
    fn country_excludes_other_countries() {
        let records = sample();
        let selection = FilterSelection {
            countries: set(&["US"]),
            academic_levels: set(&["High School", "Undergraduate"]),
            genders: set(&["Male", "Female"]),
        };
        let table = filter(&records, &selection).unwrap();
        assert!(table.records().iter().all(|r| r.country != "India"));
        assert_eq!(ids(&table), vec!["1", "2"]);
    }

    #[test]
    fn conditions_are_conjunctive() {
        let records = sample();
        let selection = FilterSelection {
            countries: set(&["US", "India"]),
            academic_levels: set(&["High School"]),
            genders: set(&["Male"]),
        };
        let combined = ids(&filter(&records, &selection).unwrap())
            .into_iter()
            .map(str::to_string)
            .collect::<BTreeSet<_>>();

        let single = |s: FilterSelection| -> BTreeSet<String> {
            filter(&records, &s)
                .map(|t| t.records().iter().map(|r| r.student_id.clone()).collect())
                .unwrap_or_default()
        };
        let by_country = single(FilterSelection {
            countries: selection.countries.clone(),
            ..Default::default()
        });
        let by_level = single(FilterSelection {
            academic_levels: selection.academic_levels.clone(),
            ..Default::default()
        });
        let by_gender = single(FilterSelection {
            genders: selection.genders.clone(),
            ..Default::default()
        });

        let intersection: BTreeSet<String> = by_country
            .intersection(&by_level)
            .cloned()
            .collect::<BTreeSet<_>>()
            .intersection(&by_gender)
            .cloned()
            .collect();
        assert_eq!(combined, intersection);
        assert_eq!(combined, set(&["1", "4"]));
    }

    #[test]
    fn no_match_is_empty_result() {
        let records = sample();
        let selection = FilterSelection {
            countries: set(&["UK"]),
            genders: set(&["Male"]),
            ..Default::default()
        };
        assert_eq!(filter(&records, &selection), Err(FilterError::EmptyResult));
    }

    #[test]
    fn unknown_value_only_is_empty_result() {
        let records = sample();
        let selection = FilterSelection {
            countries: set(&["Narnia"]),
            ..Default::default()
        };
        assert_eq!(filter(&records, &selection), Err(FilterError::EmptyResult));
    }

    #[test]
    fn filtering_is_idempotent() {
        let records = sample();
        let selection = FilterSelection {
            academic_levels: set(&["High School"]),
            ..Default::default()
        };
        let once = filter(&records, &selection).unwrap();
        let twice = filter(once.records(), &selection).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn output_preserves_input_order() {
        let records = sample();
        let selection = FilterSelection {
            countries: set(&["UK", "India"]),
            ..Default::default()
        };
        assert_eq!(ids(&filter(&records, &selection).unwrap()), vec!["3", "4", "5"]);
    }

    #[test]
    fn all_selects_every_observed_value() {
        let ds = Dataset::new("x.csv", sample());
        let selection = FilterSelection::all(&ds);
        assert_eq!(selection.countries, set(&["India", "UK", "US"]));
        assert_eq!(selection.get(Dimension::Gender), &set(&["Male", "Female"]));
        assert_eq!(filter(&ds.records, &selection).unwrap().len(), 5);
    }
}
