use std::fmt::Write as _;
use std::sync::{Mutex, PoisonError};

use color_eyre::Result;
use energy_dashboard::chart::DatasetValues;
use energy_dashboard::map::{init_map, MapConfig, MAP_TARGET};
use energy_dashboard::{catalog, load_all, Board, ChartConfig, LoadReport, Page};
use serde::Serialize;

use crate::config::Settings;
use crate::http::HttpFetcher;

/// Values printed per dataset in text mode.
const PREVIEW_VALUES: usize = 6;

/// Run every loader once without a terminal UI and print what was rendered.
pub async fn run_headless(settings: &Settings, json: bool) -> Result<()> {
    let fetcher = HttpFetcher::new(&settings.api_base, settings.timeout);
    let board = Mutex::new(Board::with_targets(Page::all_targets()));

    init_map(&board);
    let report = load_all(&catalog::all(), &fetcher, &board).await;

    let board = board.into_inner().unwrap_or_else(PoisonError::into_inner);
    let headless = build_headless_report(&board, &report, &settings.api_base);

    if json {
        println!("{}", serde_json::to_string_pretty(&headless)?);
    } else {
        print!("{}", render_headless_text(&headless));
    }

    Ok(())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
enum ChartStatus {
    Rendered,
    Failed,
    Missing,
}

#[derive(Debug, Serialize)]
struct HeadlessChart {
    target: &'static str,
    loader: Option<&'static str>,
    status: ChartStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    chart: Option<ChartConfig>,
}

#[derive(Debug, Serialize)]
struct HeadlessPage {
    page: &'static str,
    charts: Vec<HeadlessChart>,
}

#[derive(Debug, Serialize)]
struct HeadlessReport {
    api_base: String,
    rendered: usize,
    failed: usize,
    missing: usize,
    pages: Vec<HeadlessPage>,
    map: Option<MapConfig>,
}

fn build_headless_report(board: &Board, report: &LoadReport, api_base: &str) -> HeadlessReport {
    let pages = Page::ALL
        .into_iter()
        .filter(|page| *page != Page::Map)
        .map(|page| HeadlessPage {
            page: page.label(),
            charts: page
                .targets()
                .iter()
                .map(|target| headless_chart(board, report, target))
                .collect(),
        })
        .collect();

    HeadlessReport {
        api_base: api_base.to_string(),
        rendered: report.rendered,
        failed: report.failed.len(),
        missing: report.missing.len(),
        pages,
        map: board.map(MAP_TARGET).cloned(),
    }
}

fn headless_chart(board: &Board, report: &LoadReport, target: &'static str) -> HeadlessChart {
    let loader = catalog::find(target).map(|spec| spec.name);

    if let Some(chart) = board.chart(target) {
        return HeadlessChart {
            target,
            loader,
            status: ChartStatus::Rendered,
            error: None,
            chart: Some(chart.clone()),
        };
    }

    let error = report
        .failed
        .iter()
        .find(|(name, _)| Some(*name) == loader)
        .map(|(_, error)| error.clone());

    HeadlessChart {
        target,
        loader,
        status: if error.is_some() {
            ChartStatus::Failed
        } else {
            ChartStatus::Missing
        },
        error,
        chart: None,
    }
}

fn render_headless_text(report: &HeadlessReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "\nEnergy Dashboard");
    let _ = writeln!(out, "================");
    let _ = writeln!(out, "API: {}", report.api_base);
    let _ = writeln!(
        out,
        "Rendered: {}  Failed: {}  Missing: {}",
        report.rendered, report.failed, report.missing
    );

    for page in &report.pages {
        let _ = writeln!(out, "\n[{}]", page.page);
        for chart in &page.charts {
            match (&chart.status, &chart.chart) {
                (ChartStatus::Rendered, Some(config)) => write_chart(&mut out, chart.target, config),
                (ChartStatus::Failed, _) => {
                    let error = chart.error.as_deref().unwrap_or("unknown error");
                    let _ = writeln!(out, "- {}: FAILED ({error})", chart.target);
                }
                _ => {
                    let _ = writeln!(out, "- {}: not rendered", chart.target);
                }
            }
        }
    }

    if let Some(map) = &report.map {
        let _ = writeln!(out, "\n[{}]", Page::Map.label());
        let _ = writeln!(
            out,
            "- centre ({}, {}) zoom {}, {} installations",
            map.view.center.lat,
            map.view.center.lng,
            map.view.zoom,
            map.markers.len()
        );
        for marker in &map.markers {
            let _ = writeln!(out, "    {}", marker.popup.replace('\n', " | "));
        }
    }

    out
}

fn write_chart(out: &mut String, target: &str, config: &ChartConfig) {
    let _ = writeln!(
        out,
        "- {} ({target}): {}, {} labels",
        config.title,
        config.kind.label(),
        config.labels.len()
    );

    if config.kind.is_proportional() {
        let shares = config
            .legend_entries()
            .iter()
            .map(|entry| format!("{} {:.1}%", entry.label, entry.percent))
            .collect::<Vec<_>>();
        let _ = writeln!(out, "    shares: {}", preview(shares));
        return;
    }

    for dataset in &config.datasets {
        let shown = match &dataset.values {
            DatasetValues::Category(values) => config
                .labels
                .iter()
                .zip(values)
                .map(|(label, value)| {
                    format!("{label}={}", config.value_label(dataset.axis, label, *value))
                })
                .collect(),
            DatasetValues::Points(_) => config.point_labels(dataset),
        };
        let _ = writeln!(out, "    {}: {}", dataset.label, preview(shown));
    }
}

/// The first few entries, with an ellipsis when some were left out.
fn preview(mut entries: Vec<String>) -> String {
    if entries.len() > PREVIEW_VALUES {
        entries.truncate(PREVIEW_VALUES);
        entries.push("...".to_string());
    }
    entries.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use energy_dashboard::{Fetcher, LoaderError};

    /// Every remote resource is unreachable.
    struct Offline;

    #[async_trait(?Send)]
    impl Fetcher for Offline {
        async fn fetch_text(&self, _path: &str) -> Result<String, LoaderError> {
            Err(LoaderError::Network("offline".to_string()))
        }
    }

    /// Serves only the distribution analysis resource.
    struct DistributionOnly;

    #[async_trait(?Send)]
    impl Fetcher for DistributionOnly {
        async fn fetch_text(&self, path: &str) -> Result<String, LoaderError> {
            if path == "/distribution-analysis" {
                Ok(r#"[{"region":"Bretagne","total_production":1500,"distribution_efficiency":95,"estimated_losses":60,"net_distribution":1440}]"#.to_string())
            } else {
                Err(LoaderError::Network("offline".to_string()))
            }
        }
    }

    async fn offline_report() -> HeadlessReport {
        report_with(&Offline).await
    }

    async fn report_with(fetcher: &dyn Fetcher) -> HeadlessReport {
        let board = Mutex::new(Board::with_targets(Page::all_targets()));
        init_map(&board);
        let report = load_all(&catalog::all(), fetcher, &board).await;
        let board = board.into_inner().unwrap_or_else(PoisonError::into_inner);
        build_headless_report(&board, &report, "http://localhost:5000/api")
    }

    #[tokio::test]
    async fn offline_run_keeps_embedded_charts() {
        let report = offline_report().await;
        let embedded = catalog::all().iter().filter(|spec| !spec.is_remote()).count();
        assert_eq!(report.rendered, embedded);
        assert_eq!(report.failed, catalog::all().len() - embedded);
        assert_eq!(report.missing, 0);
        assert_eq!(report.pages.len(), 4);
        assert!(report.map.is_some());

        let overview = &report.pages[0];
        assert!(overview
            .charts
            .iter()
            .all(|chart| matches!(chart.status, ChartStatus::Rendered)));
        let grid = &report.pages[3];
        assert!(grid
            .charts
            .iter()
            .all(|chart| matches!(chart.status, ChartStatus::Failed)));
    }

    #[tokio::test]
    async fn text_output_lists_failures_and_installations() {
        let text = render_headless_text(&offline_report().await);
        assert!(text.contains("Energy Dashboard"));
        assert!(text.contains("[Overview]"));
        assert!(text.contains("productionChart"));
        assert!(text.contains("regionCapacityChart: FAILED (request failed: offline)"));
        assert!(text.contains("installations"));
    }

    #[tokio::test]
    async fn json_output_tags_status() -> Result<(), Box<dyn std::error::Error>> {
        let report = offline_report().await;
        let value = serde_json::to_value(&report)?;
        assert_eq!(value["pages"][0]["charts"][0]["status"], "rendered");
        assert_eq!(value["pages"][3]["charts"][0]["status"], "failed");
        assert!(value["pages"][3]["charts"][0].get("chart").is_none());
        Ok(())
    }

    #[tokio::test]
    async fn text_preview_shows_point_tooltips_and_shares() {
        let text = render_headless_text(&report_with(&DistributionOnly).await);
        assert!(text.contains("Bretagne: 1500 MW @ 95.0%"), "{text}");
        assert!(text.contains("    shares: "), "{text}");
    }
}
