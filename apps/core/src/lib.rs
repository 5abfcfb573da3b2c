// Export our modules for use in the web and terminal frontends
pub mod animation;
pub mod board;
pub mod catalog;
pub mod chart;
pub mod dashboard;
pub mod domain;
pub mod error;
pub mod export;
pub mod kpi;
pub mod map;
pub mod notify;
pub mod palette;
pub mod pipeline;
pub mod record;
pub mod shortcuts;
pub mod theme;
pub mod transform;

pub use board::{Board, Panel};
pub use chart::{ChartConfig, Dataset};
pub use dashboard::{Command, Dashboard, Effect};
pub use domain::{ChartKind, Page, Unit};
pub use error::LoaderError;
pub use pipeline::{load_all, run_loader, Fetcher, LoadOutcome, LoadReport, RenderPort, RenderTarget};
pub use record::MetricRecord;
pub use theme::{Theme, ThemeStore};
pub use transform::{ChartData, Series};
