//! The fetch-transform-render pipeline shared by every chart loader.
//!
//! A loader obtains its records, shapes them into [`ChartData`], resolves its
//! render target and hands a [`ChartConfig`] to a [`RenderPort`]. Failures in
//! the first two steps are logged and swallowed; a missing target is a silent
//! no-op.

use async_trait::async_trait;
use futures::future::join_all;

use crate::catalog::{DataSource, LoaderSpec};
use crate::chart::ChartConfig;
use crate::error::LoaderError;
use crate::map::MapConfig;
use crate::record::{parse_records, MetricRecord};

#[async_trait(?Send)]
pub trait Fetcher {
    /// Body of a GET for `path`, relative to the fetcher's API base.
    async fn fetch_text(&self, path: &str) -> Result<String, LoaderError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderTarget {
    pub id: String,
    pub slot: usize,
}

pub trait RenderPort {
    type Handle;

    fn resolve_target(&self, id: &str) -> Option<RenderTarget>;

    fn render_chart(&self, target: &RenderTarget, config: ChartConfig) -> Self::Handle;

    fn render_map(&self, target: &RenderTarget, config: MapConfig) -> Self::Handle;
}

#[derive(Debug)]
pub enum LoadOutcome<H> {
    Rendered(H),
    TargetMissing,
    Failed(LoaderError),
}

pub async fn fetch_records<F: Fetcher + ?Sized>(
    source: DataSource,
    fetcher: &F,
) -> Result<Vec<MetricRecord>, LoaderError> {
    match source {
        DataSource::Remote(path) => parse_records(&fetcher.fetch_text(path).await?),
        DataSource::Embedded(rows) => Ok(rows()),
    }
}

pub async fn run_loader<F, P>(spec: &LoaderSpec, fetcher: &F, port: &P) -> LoadOutcome<P::Handle>
where
    F: Fetcher + ?Sized,
    P: RenderPort + ?Sized,
{
    let records = match fetch_records(spec.source, fetcher).await {
        Ok(records) => records,
        Err(error) => {
            tracing::error!(loader = spec.name, %error, "chart loader failed");
            return LoadOutcome::Failed(error);
        }
    };

    let data = (spec.transform)(&records);

    let Some(target) = port.resolve_target(spec.target) else {
        return LoadOutcome::TargetMissing;
    };

    let config = (spec.configure)(data);
    tracing::debug!(loader = spec.name, target = spec.target, "chart rendered");
    LoadOutcome::Rendered(port.render_chart(&target, config))
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub rendered: usize,
    pub missing: Vec<&'static str>,
    pub failed: Vec<(&'static str, String)>,
}

/// Runs every loader concurrently; completion order is unspecified.
pub async fn load_all<F, P>(specs: &[LoaderSpec], fetcher: &F, port: &P) -> LoadReport
where
    F: Fetcher + ?Sized,
    P: RenderPort + ?Sized,
{
    tracing::info!(loaders = specs.len(), "loading charts");

    let outcomes = join_all(specs.iter().map(|spec| run_loader(spec, fetcher, port))).await;

    let mut report = LoadReport::default();
    for (spec, outcome) in specs.iter().zip(outcomes) {
        match outcome {
            LoadOutcome::Rendered(_) => report.rendered += 1,
            LoadOutcome::TargetMissing => report.missing.push(spec.target),
            LoadOutcome::Failed(error) => report.failed.push((spec.name, error.to_string())),
        }
    }

    tracing::info!(
        rendered = report.rendered,
        missing = report.missing.len(),
        failed = report.failed.len(),
        "charts loaded"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::map::{init_map, MAP_TARGET};
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Serves canned bodies keyed by resource path.
    struct StubFetcher {
        bodies: HashMap<&'static str, Result<String, u16>>,
        requests: RefCell<Vec<String>>,
    }

    impl StubFetcher {
        fn new() -> Self {
            Self {
                bodies: HashMap::new(),
                requests: RefCell::new(Vec::new()),
            }
        }

        fn with(mut self, path: &'static str, body: &str) -> Self {
            self.bodies.insert(path, Ok(body.to_string()));
            self
        }

        fn failing(mut self, path: &'static str, status: u16) -> Self {
            self.bodies.insert(path, Err(status));
            self
        }
    }

    #[async_trait(?Send)]
    impl Fetcher for StubFetcher {
        async fn fetch_text(&self, path: &str) -> Result<String, LoaderError> {
            self.requests.borrow_mut().push(path.to_string());
            match self.bodies.get(path) {
                Some(Ok(body)) => Ok(body.clone()),
                Some(Err(status)) => Err(LoaderError::Status(*status)),
                None => Err(LoaderError::Network(format!("no route for {path}"))),
            }
        }
    }

    /// Records every render call against a fixed set of targets.
    #[derive(Default)]
    struct RecordingPort {
        targets: Vec<&'static str>,
        charts: RefCell<Vec<(String, ChartConfig)>>,
        maps: RefCell<usize>,
    }

    impl RecordingPort {
        fn with_targets(targets: &[&'static str]) -> Self {
            Self {
                targets: targets.to_vec(),
                ..Self::default()
            }
        }
    }

    impl RenderPort for RecordingPort {
        type Handle = usize;

        fn resolve_target(&self, id: &str) -> Option<RenderTarget> {
            self.targets
                .iter()
                .position(|target| *target == id)
                .map(|slot| RenderTarget {
                    id: id.to_string(),
                    slot,
                })
        }

        fn render_chart(&self, target: &RenderTarget, config: ChartConfig) -> usize {
            self.charts.borrow_mut().push((target.id.clone(), config));
            target.slot
        }

        fn render_map(&self, target: &RenderTarget, _config: MapConfig) -> usize {
            *self.maps.borrow_mut() += 1;
            target.slot
        }
    }

    fn spec(target: &str) -> LoaderSpec {
        match catalog::find(target) {
            Some(spec) => spec,
            None => panic!("no loader for {target}"),
        }
    }

    const CITY_YEAR: &str = r#"[
        {"city": "A", "year": 2020, "production_mw": 10},
        {"city": "A", "year": 2021, "production_mw": 20},
        {"city": "B", "year": 2020, "production_mw": 5}
    ]"#;

    #[tokio::test]
    async fn renders_city_year_pivot() -> Result<(), Box<dyn std::error::Error>> {
        let fetcher = StubFetcher::new().with("/production-by-city-year", CITY_YEAR);
        let port = RecordingPort::with_targets(&["productionCityYearChart"]);

        let outcome = run_loader(&spec("productionCityYearChart"), &fetcher, &port).await;
        assert!(matches!(outcome, LoadOutcome::Rendered(_)));

        let charts = port.charts.borrow();
        let (target, config) = &charts[0];
        assert_eq!(target, "productionCityYearChart");
        assert_eq!(config.labels, vec!["2020", "2021"]);
        assert_eq!(config.datasets.len(), 2);
        assert_eq!(config.datasets[0].label, "A");
        assert_eq!(config.datasets[0].category_values(), &[10.0, 20.0]);
        assert_eq!(config.datasets[1].label, "B");
        assert_eq!(config.datasets[1].category_values(), &[5.0, 0.0]);
        Ok(())
    }

    #[tokio::test]
    async fn missing_target_renders_nothing() {
        let fetcher = StubFetcher::new().with("/production-by-city-year", CITY_YEAR);
        let port = RecordingPort::with_targets(&[]);

        let outcome = run_loader(&spec("productionCityYearChart"), &fetcher, &port).await;

        assert!(matches!(outcome, LoadOutcome::TargetMissing));
        assert!(port.charts.borrow().is_empty());
        assert_eq!(fetcher.requests.borrow().len(), 1);
    }

    #[tokio::test]
    async fn malformed_body_is_caught() {
        let fetcher = StubFetcher::new().with("/city-comparison", "<!doctype html>");
        let port = RecordingPort::with_targets(&["cityComparisonChart"]);

        let outcome = run_loader(&spec("cityComparisonChart"), &fetcher, &port).await;

        assert!(matches!(outcome, LoadOutcome::Failed(LoaderError::Parse(_))));
        assert!(port.charts.borrow().is_empty());
    }

    #[tokio::test]
    async fn error_object_is_a_shape_failure() {
        let fetcher =
            StubFetcher::new().with("/monthly-summary", r#"{"error": "relation does not exist"}"#);
        let port = RecordingPort::with_targets(&["monthlySummaryChart"]);

        let outcome = run_loader(&spec("monthlySummaryChart"), &fetcher, &port).await;
        assert!(matches!(outcome, LoadOutcome::Failed(LoaderError::Shape(_))));
    }

    #[tokio::test]
    async fn embedded_sources_never_touch_the_network() {
        let fetcher = StubFetcher::new();
        let port = RecordingPort::with_targets(&["productionChart"]);

        let outcome = run_loader(&spec("productionChart"), &fetcher, &port).await;

        assert!(matches!(outcome, LoadOutcome::Rendered(_)));
        assert!(fetcher.requests.borrow().is_empty());
    }

    #[tokio::test]
    async fn load_all_isolates_failures() {
        let fetcher = StubFetcher::new()
            .with("/production-by-city-year", CITY_YEAR)
            .failing("/city-comparison", 500);
        let port = RecordingPort::with_targets(&["productionCityYearChart", "cityComparisonChart"]);
        let specs = [
            spec("productionCityYearChart"),
            spec("cityComparisonChart"),
            spec("optimizationChart"),
            spec("productionChart"),
        ];

        let report = load_all(&specs, &fetcher, &port).await;

        assert_eq!(report.rendered, 1);
        assert_eq!(report.missing, vec!["productionChart"]);
        assert_eq!(report.failed.len(), 2);
        assert_eq!(report.failed[0].0, "city comparison");
        assert!(report.failed[0].1.contains("500"));
    }

    #[tokio::test]
    async fn every_catalog_entry_renders_against_a_full_board() {
        let fetcher = StubFetcher::new()
            .with("/production-by-city-year", "[]")
            .with("/city-comparison", "[]")
            .with("/production-trend-5years", "[]")
            .with("/energy-mix-by-city", "[]")
            .with("/optimization-analysis", "[]")
            .with("/distribution-analysis", "[]")
            .with("/capacity-installed", "[]")
            .with("/monthly-summary", "[]")
            .with("/regions", "[]");
        let targets = crate::domain::Page::all_targets().collect::<Vec<_>>();
        let port = RecordingPort::with_targets(&targets);

        let report = load_all(&catalog::all(), &fetcher, &port).await;

        assert!(report.failed.is_empty(), "{:?}", report.failed);
        assert!(report.missing.is_empty(), "{:?}", report.missing);
        assert_eq!(report.rendered, catalog::all().len());
    }

    #[test]
    fn map_needs_its_container() {
        assert_eq!(init_map(&RecordingPort::with_targets(&[])), None);
        let port = RecordingPort::with_targets(&["productionChart", MAP_TARGET]);
        assert_eq!(init_map(&port), Some(1));
        assert_eq!(*port.maps.borrow(), 1);
    }
}
