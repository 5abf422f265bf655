//! Dashboard request parsing
//!
//! Raw widget values are validated here, once. Past this point the year is
//! an `Option<i32>` and the region a closed enum; the `"All"` sentinel never
//! reaches the query layer.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::dataset::{Metric, Region, SalesTable};
use crate::query::FilterSpec;

/// Year selector value meaning "no year constraint"
pub const ALL_YEARS: &str = "All";

/// Result type for request parsing
pub type RequestResult<T> = Result<T, RequestError>;

/// Invalid widget values
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestError {
    #[error("Invalid year: '{0}'")]
    InvalidYear(String),

    #[error("Unknown region: '{0}'")]
    UnknownRegion(String),

    #[error("Unknown metric: '{0}'")]
    UnknownMetric(String),
}

impl RequestError {
    /// Stable error code for JSON responses
    pub fn code(&self) -> &'static str {
        match self {
            RequestError::InvalidYear(_) => "VGS_REQUEST_INVALID_YEAR",
            RequestError::UnknownRegion(_) => "VGS_REQUEST_UNKNOWN_REGION",
            RequestError::UnknownMetric(_) => "VGS_REQUEST_UNKNOWN_METRIC",
        }
    }
}

/// A validated dashboard interaction
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardRequest {
    pub filter: FilterSpec,
    pub region: Region,
}

impl DashboardRequest {
    /// Everything selected, any year, North America
    pub fn all(table: &SalesTable) -> Self {
        Self {
            filter: FilterSpec::all(table),
            region: Region::default(),
        }
    }

    /// Builds a request from raw widget values.
    ///
    /// Absent genre or platform lists select everything in `table`; an empty
    /// list selects nothing. Unknown names are kept and simply match no rows.
    pub fn from_params(
        table: &SalesTable,
        year: Option<&str>,
        genres: Option<Vec<String>>,
        platforms: Option<Vec<String>>,
        region: Option<&str>,
    ) -> RequestResult<Self> {
        let year = parse_year(year)?;
        let region = parse_region(region)?;

        let genres: BTreeSet<String> = match genres {
            Some(list) => list.into_iter().collect(),
            None => table.genres(),
        };
        let platforms: BTreeSet<String> = match platforms {
            Some(list) => list.into_iter().collect(),
            None => table.platforms(),
        };

        Ok(Self {
            filter: FilterSpec::new(year, genres, platforms),
            region,
        })
    }
}

/// `None`, blank and `"All"` (any case) mean no constraint
pub fn parse_year(value: Option<&str>) -> RequestResult<Option<i32>> {
    let value = match value.map(str::trim) {
        None | Some("") => return Ok(None),
        Some(v) => v,
    };
    if value.eq_ignore_ascii_case(ALL_YEARS) {
        return Ok(None);
    }
    value
        .parse::<i32>()
        .map(Some)
        .map_err(|_| RequestError::InvalidYear(value.to_string()))
}

pub fn parse_region(value: Option<&str>) -> RequestResult<Region> {
    match value.map(str::trim) {
        None | Some("") => Ok(Region::default()),
        Some(v) => v
            .parse::<Region>()
            .map_err(|_| RequestError::UnknownRegion(v.to_string())),
    }
}

/// Absent means `Global_Sales`
pub fn parse_metric(value: Option<&str>) -> RequestResult<Metric> {
    match value.map(str::trim) {
        None | Some("") => Ok(Metric::Global),
        Some(v) => v
            .parse::<Metric>()
            .map_err(|_| RequestError::UnknownMetric(v.to_string())),
    }
}

/// Splits a comma-separated list, dropping blank items
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
