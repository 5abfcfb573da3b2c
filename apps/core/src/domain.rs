use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartKind {
    Bar,
    Line,
    Doughnut,
    Radar,
    Scatter,
    PolarArea,
}

impl ChartKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bar => "Bar",
            Self::Line => "Line",
            Self::Doughnut => "Doughnut",
            Self::Radar => "Radar",
            Self::Scatter => "Scatter",
            Self::PolarArea => "Polar area",
        }
    }

    /// Kinds that show one share per label rather than an axis.
    pub const fn is_proportional(self) -> bool {
        matches!(self, Self::Doughnut | Self::PolarArea)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Unit {
    #[serde(rename = "MW")]
    Megawatt,
    #[serde(rename = "GW")]
    Gigawatt,
    #[serde(rename = "%")]
    Percent,
    #[serde(rename = "TWh")]
    TerawattHour,
}

impl Unit {
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Megawatt => " MW",
            Self::Gigawatt => " GW",
            Self::Percent => "%",
            Self::TerawattHour => " TWh",
        }
    }

    /// Appends the unit to the shortest decimal form of `value`.
    pub fn format(self, value: f64) -> String {
        format!("{}{}", display_number(value), self.suffix())
    }

    pub fn format_fixed(self, value: f64, decimals: usize) -> String {
        format!("{value:.decimals$}{}", self.suffix())
    }
}

/// Shortest round-trip form, so whole numbers print without a fraction.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}

/// [`format_number`] after rounding to two decimals, for axis and tooltip text.
pub fn display_number(value: f64) -> String {
    format_number((value * 100.0).round() / 100.0)
}

/// Dashboard pages, each owning a fixed set of render targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Overview,
    Consumption,
    Production,
    Grid,
    Map,
}

impl Page {
    pub const ALL: [Self; 5] = [
        Self::Overview,
        Self::Consumption,
        Self::Production,
        Self::Grid,
        Self::Map,
    ];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Overview),
            1 => Some(Self::Consumption),
            2 => Some(Self::Production),
            3 => Some(Self::Grid),
            4 => Some(Self::Map),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Overview => 0,
            Self::Consumption => 1,
            Self::Production => 2,
            Self::Grid => 3,
            Self::Map => 4,
        }
    }

    pub const fn next(self) -> Self {
        match Self::from_index((self.index() + 1) % Self::ALL.len()) {
            Some(page) => page,
            None => Self::Overview,
        }
    }

    pub const fn previous(self) -> Self {
        match Self::from_index((self.index() + Self::ALL.len() - 1) % Self::ALL.len()) {
            Some(page) => page,
            None => Self::Overview,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Consumption => "Consumption",
            Self::Production => "Production",
            Self::Grid => "Grid",
            Self::Map => "Map",
        }
    }

    pub const fn targets(self) -> &'static [&'static str] {
        match self {
            Self::Overview => &[
                "productionChart",
                "hourlyChart",
                "capacityChart",
                "pieChart",
                "yearlyChart",
                "growthChart",
            ],
            Self::Consumption => &[
                "consumptionSectorChart",
                "consumptionRegionChart",
                "consumptionHourlyChart",
                "consumptionTrendChart",
                "balanceChart",
            ],
            Self::Production => &[
                "productionCityYearChart",
                "cityComparisonChart",
                "productionTrendChart",
                "energyMixCityChart",
                "monthlySummaryChart",
            ],
            Self::Grid => &[
                "optimizationChart",
                "distributionEfficiencyChart",
                "capacityByTypeChart",
                "distributionAnalysisChart",
                "regionCapacityChart",
            ],
            Self::Map => &[crate::map::MAP_TARGET],
        }
    }

    /// Every render target across all pages, in page order.
    pub fn all_targets() -> impl Iterator<Item = &'static str> {
        Self::ALL.into_iter().flat_map(|page| page.targets().iter().copied())
    }
}
