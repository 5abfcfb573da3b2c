//! Declarative loader specs, one per visualization.

mod embedded;
mod remote;

use crate::chart::ChartConfig;
use crate::record::MetricRecord;
use crate::transform::ChartData;

pub const DEFAULT_API_BASE: &str = "http://localhost:5000/api";

#[derive(Debug, Clone, Copy)]
pub enum DataSource {
    /// Resource path under the API base.
    Remote(&'static str),
    /// Literal dataset shipped with the dashboard.
    Embedded(fn() -> Vec<MetricRecord>),
}

#[derive(Clone, Copy)]
pub struct LoaderSpec {
    pub name: &'static str,
    pub source: DataSource,
    pub target: &'static str,
    pub transform: fn(&[MetricRecord]) -> ChartData,
    pub configure: fn(ChartData) -> ChartConfig,
}

impl std::fmt::Debug for LoaderSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoaderSpec")
            .field("name", &self.name)
            .field("source", &self.source)
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

impl LoaderSpec {
    pub const fn is_remote(&self) -> bool {
        matches!(self.source, DataSource::Remote(_))
    }
}

pub fn all() -> Vec<LoaderSpec> {
    embedded::LOADERS
        .iter()
        .chain(remote::LOADERS.iter())
        .copied()
        .collect()
}

pub fn find(target: &str) -> Option<LoaderSpec> {
    all().into_iter().find(|spec| spec.target == target)
}
