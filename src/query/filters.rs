//! Row filtering
//!
//! Filters produce new tables and never touch their input. No filter can
//! fail: an empty result is a valid result.

use std::collections::BTreeSet;

use crate::dataset::{Metric, SalesRecord, SalesTable};

use super::sorter::top_n;

/// The three dashboard filter parameters
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterSpec {
    /// `None` means no year constraint
    pub year: Option<i32>,
    pub genres: BTreeSet<String>,
    pub platforms: BTreeSet<String>,
}

impl FilterSpec {
    pub fn new(year: Option<i32>, genres: BTreeSet<String>, platforms: BTreeSet<String>) -> Self {
        Self {
            year,
            genres,
            platforms,
        }
    }

    /// Every genre and platform of `table`, any year
    pub fn all(table: &SalesTable) -> Self {
        Self {
            year: None,
            genres: table.genres(),
            platforms: table.platforms(),
        }
    }

    pub fn with_year(mut self, year: Option<i32>) -> Self {
        self.year = year;
        self
    }

    /// Checks a single record against all three constraints
    pub fn matches(&self, record: &SalesRecord) -> bool {
        self.genres.contains(&record.genre)
            && self.platforms.contains(&record.platform)
            && self.year.map_or(true, |y| record.year == y)
    }
}

/// Rows whose genre and platform are selected, restricted to `year` if given.
pub fn filter(
    table: &SalesTable,
    year: Option<i32>,
    genres: &BTreeSet<String>,
    platforms: &BTreeSet<String>,
) -> SalesTable {
    filter_by(table, |r| {
        genres.contains(&r.genre)
            && platforms.contains(&r.platform)
            && year.map_or(true, |y| r.year == y)
    })
}

/// `filter` with the parameters bundled in a `FilterSpec`
pub fn apply(table: &SalesTable, selection: &FilterSpec) -> SalesTable {
    filter_by(table, |r| selection.matches(r))
}

/// Rows satisfying an arbitrary predicate, original order preserved.
pub fn filter_by<P>(table: &SalesTable, predicate: P) -> SalesTable
where
    P: Fn(&SalesRecord) -> bool,
{
    table.iter().filter(|r| predicate(r)).cloned().collect()
}

/// Numeric comparison against a sales column
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CompareOp {
    Gt,
    Gte,
    Lt,
    Lte,
}

/// A single bound on a sales column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Predicate {
    pub metric: Metric,
    pub op: CompareOp,
    pub bound: f64,
}

impl Predicate {
    pub fn gt(metric: Metric, bound: f64) -> Self {
        Self {
            metric,
            op: CompareOp::Gt,
            bound,
        }
    }

    pub fn gte(metric: Metric, bound: f64) -> Self {
        Self {
            metric,
            op: CompareOp::Gte,
            bound,
        }
    }

    pub fn lt(metric: Metric, bound: f64) -> Self {
        Self {
            metric,
            op: CompareOp::Lt,
            bound,
        }
    }

    pub fn lte(metric: Metric, bound: f64) -> Self {
        Self {
            metric,
            op: CompareOp::Lte,
            bound,
        }
    }
}

/// Evaluates metric predicates against records
pub struct PredicateFilter;

impl PredicateFilter {
    /// Checks if a record matches all predicates (AND semantics)
    pub fn matches(record: &SalesRecord, predicates: &[Predicate]) -> bool {
        predicates
            .iter()
            .all(|pred| Self::matches_predicate(record, pred))
    }

    fn matches_predicate(record: &SalesRecord, predicate: &Predicate) -> bool {
        let value = record.metric(predicate.metric);
        match predicate.op {
            CompareOp::Gt => value > predicate.bound,
            CompareOp::Gte => value >= predicate.bound,
            CompareOp::Lt => value < predicate.bound,
            CompareOp::Lte => value <= predicate.bound,
        }
    }

    /// Rows matching all predicates
    pub fn apply(table: &SalesTable, predicates: &[Predicate]) -> SalesTable {
        filter_by(table, |r| Self::matches(r, predicates))
    }
}

/// Games selling strongly in Japan but weakly in North America.
///
/// Rows with JP sales above `jp_min` and NA sales below `na_max`, ranked by
/// JP sales, first `limit`.
pub fn hidden_hits(table: &SalesTable, jp_min: f64, na_max: f64, limit: usize) -> SalesTable {
    let candidates = PredicateFilter::apply(
        table,
        &[Predicate::gt(Metric::Jp, jp_min), Predicate::lt(Metric::Na, na_max)],
    );
    top_n(&candidates, Metric::Jp, limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(name: &str, platform: &str, year: i32, genre: &str, na: f64, jp: f64) -> SalesRecord {
        SalesRecord {
            name: name.into(),
            platform: platform.into(),
            year,
            genre: genre.into(),
            publisher: "Pub".into(),
            na_sales: na,
            eu_sales: 0.0,
            jp_sales: jp,
            other_sales: 0.0,
            global_sales: na + jp,
        }
    }

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn table() -> SalesTable {
        SalesTable::new(vec![
            rec("a", "Wii", 2006, "Sports", 1.0, 0.1),
            rec("b", "DS", 2006, "Puzzle", 0.2, 2.0),
            rec("c", "Wii", 2007, "Puzzle", 0.4, 1.5),
            rec("d", "PS2", 2006, "Sports", 0.1, 0.0),
        ])
    }

    fn names(t: &SalesTable) -> Vec<&str> {
        t.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_filter_genre_and_platform() {
        let out = filter(&table(), None, &set(&["Sports", "Puzzle"]), &set(&["Wii"]));
        assert_eq!(names(&out), vec!["a", "c"]);
    }

    #[test]
    fn test_filter_year() {
        let t = table();
        let selection = FilterSpec::all(&t).with_year(Some(2006));
        assert_eq!(names(&apply(&t, &selection)), vec!["a", "b", "d"]);
    }

    #[test]
    fn test_filter_no_year_keeps_all_years() {
        let t = table();
        let out = apply(&t, &FilterSpec::all(&t));
        assert_eq!(out.len(), t.len());
    }

    #[test]
    fn test_filter_empty_selection() {
        let t = table();
        let out = filter(&t, None, &BTreeSet::new(), &t.platforms());
        assert!(out.is_empty());
        // Source untouched
        assert_eq!(t.len(), 4);
    }

    #[test]
    fn test_filter_unknown_year_is_empty() {
        let t = table();
        let out = apply(&t, &FilterSpec::all(&t).with_year(Some(1970)));
        assert!(out.is_empty());
    }

    #[test]
    fn test_predicates_and_semantics() {
        let t = table();
        let out = PredicateFilter::apply(
            &t,
            &[Predicate::gte(Metric::Jp, 1.5), Predicate::lte(Metric::Na, 0.2)],
        );
        assert_eq!(names(&out), vec!["b"]);
    }

    #[test]
    fn test_hidden_hits_ranked_by_jp() {
        let out = hidden_hits(&table(), 1.0, 0.5, 10);
        assert_eq!(names(&out), vec!["b", "c"]);
    }

    #[test]
    fn test_hidden_hits_strict_bounds() {
        let t = SalesTable::new(vec![
            rec("edge_jp", "DS", 2006, "RPG", 0.0, 1.0),
            rec("edge_na", "DS", 2006, "RPG", 0.5, 3.0),
        ]);
        assert!(hidden_hits(&t, 1.0, 0.5, 10).is_empty());
    }
}
