//! Dashboard composition
//!
//! Turns raw widget values into a validated `DashboardRequest` and derives
//! the input frame of every chart from one filtered view of the base table.

mod panels;
mod request;

pub use panels::{
    region_breakdown, Dashboard, DashboardFrames, DashboardOptions, DashboardSettings,
    HiddenHitsSettings, RegionTotal, ScatterPoint,
};
pub use request::{
    parse_metric, parse_region, parse_year, split_list, DashboardRequest, RequestError,
    RequestResult, ALL_YEARS,
};
