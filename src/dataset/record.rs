//! Record and column types for the sales dataset
//!
//! Column selection is closed: sales columns are addressed through `Metric`,
//! categorical columns through `Dimension`. Names coming from the outside are
//! validated once at the boundary via `FromStr`.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

/// One game/platform release row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesRecord {
    pub name: String,
    pub platform: String,
    pub year: i32,
    pub genre: String,
    pub publisher: String,
    /// Sales in millions of units
    pub na_sales: f64,
    pub eu_sales: f64,
    pub jp_sales: f64,
    pub other_sales: f64,
    pub global_sales: f64,
}

impl SalesRecord {
    /// Returns the value of a sales column
    pub fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Na => self.na_sales,
            Metric::Eu => self.eu_sales,
            Metric::Jp => self.jp_sales,
            Metric::Other => self.other_sales,
            Metric::Global => self.global_sales,
        }
    }

    /// Returns the value of a categorical column as a group key cell
    pub fn dimension(&self, dimension: Dimension) -> GroupValue {
        match dimension {
            Dimension::Name => GroupValue::Text(self.name.clone()),
            Dimension::Platform => GroupValue::Text(self.platform.clone()),
            Dimension::Year => GroupValue::Year(self.year),
            Dimension::Genre => GroupValue::Text(self.genre.clone()),
            Dimension::Publisher => GroupValue::Text(self.publisher.clone()),
        }
    }
}

/// A numeric sales column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Metric {
    Na,
    Eu,
    Jp,
    Other,
    Global,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::Na,
        Metric::Eu,
        Metric::Jp,
        Metric::Other,
        Metric::Global,
    ];

    /// Returns the CSV column name backing this metric
    pub fn column(&self) -> &'static str {
        match self {
            Metric::Na => "NA_Sales",
            Metric::Eu => "EU_Sales",
            Metric::Jp => "JP_Sales",
            Metric::Other => "Other_Sales",
            Metric::Global => "Global_Sales",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column())
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "na" | "na_sales" => Ok(Metric::Na),
            "eu" | "eu_sales" => Ok(Metric::Eu),
            "jp" | "jp_sales" => Ok(Metric::Jp),
            "other" | "other_sales" => Ok(Metric::Other),
            "global" | "global_sales" => Ok(Metric::Global),
            _ => Err(format!("unknown metric '{}'", s)),
        }
    }
}

impl Serialize for Metric {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.column())
    }
}

/// A sales region, as offered by the region selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Region {
    #[default]
    Na,
    Eu,
    Jp,
    Other,
}

impl Region {
    /// Display order of the regional breakdown
    pub const ALL: [Region; 4] = [Region::Na, Region::Eu, Region::Jp, Region::Other];

    pub fn metric(&self) -> Metric {
        match self {
            Region::Na => Metric::Na,
            Region::Eu => Metric::Eu,
            Region::Jp => Metric::Jp,
            Region::Other => Metric::Other,
        }
    }

    pub fn label(&self) -> &'static str {
        self.metric().column()
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<Metric>() {
            Ok(Metric::Na) => Ok(Region::Na),
            Ok(Metric::Eu) => Ok(Region::Eu),
            Ok(Metric::Jp) => Ok(Region::Jp),
            Ok(Metric::Other) => Ok(Region::Other),
            _ => Err(format!("unknown region '{}'", s)),
        }
    }
}

impl Serialize for Region {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// A categorical column usable as a group key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Name,
    Platform,
    Year,
    Genre,
    Publisher,
}

impl Dimension {
    pub fn column(&self) -> &'static str {
        match self {
            Dimension::Name => "Name",
            Dimension::Platform => "Platform",
            Dimension::Year => "Year",
            Dimension::Genre => "Genre",
            Dimension::Publisher => "Publisher",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column())
    }
}

impl FromStr for Dimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Dimension::Name),
            "platform" => Ok(Dimension::Platform),
            "year" => Ok(Dimension::Year),
            "genre" => Ok(Dimension::Genre),
            "publisher" => Ok(Dimension::Publisher),
            _ => Err(format!("unknown column '{}'", s)),
        }
    }
}

impl Serialize for Dimension {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.column())
    }
}

/// One cell of a group key
///
/// Ordering: years before text, `Others` last.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroupValue {
    Year(i32),
    Text(String),
    /// Synthetic bucket holding everything outside a top-k selection
    Others,
}

impl GroupValue {
    pub const OTHERS_LABEL: &'static str = "Others";

    pub fn as_text(&self) -> Option<&str> {
        match self {
            GroupValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_year(&self) -> Option<i32> {
        match self {
            GroupValue::Year(y) => Some(*y),
            _ => None,
        }
    }

    pub fn is_others(&self) -> bool {
        matches!(self, GroupValue::Others)
    }

    fn rank(&self) -> u8 {
        match self {
            GroupValue::Year(_) => 0,
            GroupValue::Text(_) => 1,
            GroupValue::Others => 2,
        }
    }
}

impl Ord for GroupValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (GroupValue::Year(a), GroupValue::Year(b)) => a.cmp(b),
            (GroupValue::Text(a), GroupValue::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for GroupValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for GroupValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupValue::Year(y) => write!(f, "{}", y),
            GroupValue::Text(s) => write!(f, "{}", s),
            GroupValue::Others => write!(f, "{}", Self::OTHERS_LABEL),
        }
    }
}

impl Serialize for GroupValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            GroupValue::Year(y) => serializer.serialize_i32(*y),
            GroupValue::Text(s) => serializer.serialize_str(s),
            GroupValue::Others => serializer.serialize_str(Self::OTHERS_LABEL),
        }
    }
}
