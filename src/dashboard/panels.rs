//! Panel composition
//!
//! One interaction = one fresh pass from the cached base table. Every panel
//! is derived from the same filtered view except `genre_trend`, which only
//! honours the genre selection.

use serde::Serialize;

use crate::dataset::{Dimension, Metric, Region, SalesTable};
use crate::observability::{self, Event, Timer};
use crate::query::{
    aggregate_sum, apply, filter_by, hidden_hits, metric_total, top_k_with_others, top_n,
    GroupedTable,
};

use super::request::DashboardRequest;

/// Thresholds for the hidden hits table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HiddenHitsSettings {
    /// JP sales must exceed this
    pub jp_min: f64,
    /// NA sales must stay below this
    pub na_max: f64,
    pub limit: usize,
}

impl Default for HiddenHitsSettings {
    fn default() -> Self {
        Self {
            jp_min: 1.0,
            na_max: 0.5,
            limit: 10,
        }
    }
}

/// Panel sizes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashboardSettings {
    pub top_n: usize,
    pub publisher_top_k: usize,
    pub scatter_limit: usize,
    pub hidden_hits: HiddenHitsSettings,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            top_n: 10,
            publisher_top_k: 10,
            scatter_limit: 500,
            hidden_hits: HiddenHitsSettings::default(),
        }
    }
}

/// One slice of the regional pie
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionTotal {
    pub region: Region,
    pub sales: f64,
}

/// One point of the NA vs EU scatter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub name: String,
    pub platform: String,
    pub na_sales: f64,
    pub eu_sales: f64,
}

/// Input frames for every chart on the page
#[derive(Debug, Clone, Serialize)]
pub struct DashboardFrames {
    /// Rows left after filtering
    pub record_count: usize,
    pub year: Option<i32>,
    pub region: Region,
    pub top_games: SalesTable,
    pub region_breakdown: Vec<RegionTotal>,
    pub genre_trend: GroupedTable,
    pub platform_sales: GroupedTable,
    pub publisher_share: GroupedTable,
    pub genre_by_region: GroupedTable,
    pub genre_platform: GroupedTable,
    pub yearly_totals: GroupedTable,
    pub regional_scatter: Vec<ScatterPoint>,
    pub hidden_hits: SalesTable,
}

/// Option lists for the filter widgets
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardOptions {
    pub years: Vec<i32>,
    pub genres: Vec<String>,
    pub platforms: Vec<String>,
    pub regions: Vec<Region>,
}

impl DashboardOptions {
    pub fn from_table(table: &SalesTable) -> Self {
        Self {
            years: table.years(),
            genres: table.genres().into_iter().collect(),
            platforms: table.platforms().into_iter().collect(),
            regions: Region::ALL.to_vec(),
        }
    }
}

/// Builds dashboard frames from a base table
pub struct Dashboard;

impl Dashboard {
    pub fn build(
        table: &SalesTable,
        request: &DashboardRequest,
        settings: &DashboardSettings,
    ) -> DashboardFrames {
        let timer = Timer::new();
        let filtered = apply(table, &request.filter);
        let genre_only = filter_by(table, |r| request.filter.genres.contains(&r.genre));

        let frames = DashboardFrames {
            record_count: filtered.len(),
            year: request.filter.year,
            region: request.region,
            top_games: top_n(&filtered, Metric::Global, settings.top_n),
            region_breakdown: region_breakdown(&filtered),
            genre_trend: aggregate_sum(
                &genre_only,
                &[Dimension::Year, Dimension::Genre],
                Metric::Global,
            ),
            platform_sales: aggregate_sum(&filtered, &[Dimension::Platform], Metric::Global)
                .sorted_desc(),
            publisher_share: top_k_with_others(
                &filtered,
                Dimension::Publisher,
                Metric::Global,
                settings.publisher_top_k,
            ),
            genre_by_region: aggregate_sum(&filtered, &[Dimension::Genre], request.region.metric()),
            genre_platform: aggregate_sum(
                &filtered,
                &[Dimension::Genre, Dimension::Platform],
                Metric::Global,
            ),
            yearly_totals: aggregate_sum(&filtered, &[Dimension::Year], Metric::Global),
            regional_scatter: scatter(&filtered, settings.scatter_limit),
            hidden_hits: hidden_hits(
                &filtered,
                settings.hidden_hits.jp_min,
                settings.hidden_hits.na_max,
                settings.hidden_hits.limit,
            ),
        };

        let rows = frames.record_count.to_string();
        let elapsed = timer.elapsed_ms();
        observability::log_event_with_fields(
            Event::QueryExecuted,
            &[("rows", rows.as_str()), ("elapsed_ms", elapsed.as_str())],
        );
        observability::metrics().increment_queries_executed();

        frames
    }
}

/// Per-region totals in display order; empty for an empty table
pub fn region_breakdown(table: &SalesTable) -> Vec<RegionTotal> {
    if table.is_empty() {
        return Vec::new();
    }
    Region::ALL
        .iter()
        .map(|&region| RegionTotal {
            region,
            sales: metric_total(table, region.metric()),
        })
        .collect()
}

fn scatter(table: &SalesTable, limit: usize) -> Vec<ScatterPoint> {
    top_n(table, Metric::Global, limit)
        .iter()
        .map(|r| ScatterPoint {
            name: r.name.clone(),
            platform: r.platform.clone(),
            na_sales: r.na_sales,
            eu_sales: r.eu_sales,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{GroupValue, SalesRecord};

    #[allow(clippy::too_many_arguments)]
    fn rec(
        name: &str,
        platform: &str,
        year: i32,
        genre: &str,
        publisher: &str,
        na: f64,
        eu: f64,
        jp: f64,
    ) -> SalesRecord {
        SalesRecord {
            name: name.into(),
            platform: platform.into(),
            year,
            genre: genre.into(),
            publisher: publisher.into(),
            na_sales: na,
            eu_sales: eu,
            jp_sales: jp,
            other_sales: 0.0,
            global_sales: na + eu + jp,
        }
    }

    fn table() -> SalesTable {
        SalesTable::new(vec![
            rec("Kart", "Wii", 2008, "Racing", "Nintendo", 15.0, 12.0, 3.0),
            rec("Quest", "DS", 2008, "RPG", "Square", 0.2, 0.1, 3.5),
            rec("Shooter", "X360", 2009, "Shooter", "Activision", 8.0, 4.0, 0.1),
            rec("Puzzle", "DS", 2009, "Puzzle", "Nintendo", 1.0, 1.0, 1.0),
        ])
    }

    #[test]
    fn test_all_panels_from_full_selection() {
        let t = table();
        let frames = Dashboard::build(&t, &DashboardRequest::all(&t), &DashboardSettings::default());

        assert_eq!(frames.record_count, 4);
        assert_eq!(frames.top_games.records()[0].name, "Kart");
        assert_eq!(frames.region_breakdown.len(), 4);
        assert_eq!(frames.region_breakdown[0].region, Region::Na);
        assert!((frames.region_breakdown[0].sales - 24.2).abs() < 1e-9);
        assert_eq!(
            frames.platform_sales.rows[0].keys,
            vec![GroupValue::Text("Wii".into())]
        );
        assert_eq!(frames.yearly_totals.len(), 2);
        assert_eq!(frames.hidden_hits.len(), 1);
        assert_eq!(frames.hidden_hits.records()[0].name, "Quest");
        assert_eq!(frames.regional_scatter.len(), 4);
    }

    #[test]
    fn test_year_filter_applies_except_genre_trend() {
        let t = table();
        let mut request = DashboardRequest::all(&t);
        request.filter.year = Some(2008);
        let frames = Dashboard::build(&t, &request, &DashboardSettings::default());

        assert_eq!(frames.record_count, 2);
        assert_eq!(frames.yearly_totals.len(), 1);
        // Genre trend still spans both years
        assert_eq!(frames.genre_trend.len(), 4);
    }

    #[test]
    fn test_genre_trend_ignores_platform_selection() {
        let t = table();
        let mut request = DashboardRequest::all(&t);
        request.filter.genres = ["Racing", "RPG"].iter().map(|g| g.to_string()).collect();
        request.filter.platforms = ["DS".to_string()].into_iter().collect();
        let frames = Dashboard::build(&t, &request, &DashboardSettings::default());

        assert_eq!(frames.record_count, 1);
        assert_eq!(frames.genre_trend.len(), 2);
        assert_eq!(
            frames
                .genre_trend
                .value_of(&[GroupValue::Year(2008), GroupValue::Text("Racing".into())]),
            Some(30.0)
        );
    }

    #[test]
    fn test_region_selects_breakdown_metric() {
        let t = table();
        let mut request = DashboardRequest::all(&t);
        request.region = Region::Jp;
        let frames = Dashboard::build(&t, &request, &DashboardSettings::default());

        assert_eq!(frames.genre_by_region.metric, Metric::Jp);
        assert_eq!(
            frames.genre_by_region.value_of(&[GroupValue::Text("RPG".into())]),
            Some(3.5)
        );
    }

    #[test]
    fn test_publisher_share_respects_k() {
        let t = table();
        let settings = DashboardSettings {
            publisher_top_k: 1,
            ..Default::default()
        };
        let frames = Dashboard::build(&t, &DashboardRequest::all(&t), &settings);
        assert_eq!(frames.publisher_share.len(), 2);
        assert!(frames.publisher_share.rows[1].keys[0].is_others());
    }

    #[test]
    fn test_empty_selection_empty_frames() {
        let t = table();
        let mut request = DashboardRequest::all(&t);
        request.filter.platforms.clear();
        let frames = Dashboard::build(&t, &request, &DashboardSettings::default());

        assert_eq!(frames.record_count, 0);
        assert!(frames.top_games.is_empty());
        assert!(frames.region_breakdown.is_empty());
        assert!(frames.platform_sales.is_empty());
        assert!(frames.publisher_share.is_empty());
        assert!(frames.hidden_hits.is_empty());
        assert!(frames.regional_scatter.is_empty());
    }

    #[test]
    fn test_options() {
        let options = DashboardOptions::from_table(&table());
        assert_eq!(options.years, vec![2008, 2009]);
        assert_eq!(options.platforms, vec!["DS", "Wii", "X360"]);
        assert_eq!(options.regions.len(), 4);
    }

    #[test]
    fn test_frames_serialize() {
        let t = table();
        let frames = Dashboard::build(&t, &DashboardRequest::all(&t), &DashboardSettings::default());
        let json = serde_json::to_value(&frames).unwrap();
        assert_eq!(json["region"], "NA_Sales");
        assert!(json["year"].is_null());
        assert_eq!(json["top_games"][0]["name"], "Kart");
        assert_eq!(json["region_breakdown"][2]["region"], "JP_Sales");
    }
}
