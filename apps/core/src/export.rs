//! The snapshot printed by the export shortcut.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionTotals {
    pub total: u32,
    pub solar: u32,
    pub wind: u32,
    pub hydro: u32,
    pub thermal: u32,
    pub other: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionCapacity {
    pub region: String,
    pub capacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacitySummary {
    pub total: f64,
    pub installed: Vec<RegionCapacity>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Efficiency {
    pub network_usage: u32,
    pub available_capacity: u32,
    pub solar_performance: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardExport {
    pub timestamp: String,
    pub production: ProductionTotals,
    pub capacity: CapacitySummary,
    pub efficiency: Efficiency,
}

impl DashboardExport {
    /// The dashboard headline figures, stamped with an ISO-8601 `timestamp`.
    pub fn snapshot(timestamp: impl Into<String>) -> Self {
        let installed = [
            ("Hauts-de-France", 4.5),
            ("Auvergne-Rhône-Alpes", 3.8),
            ("Occitanie", 3.2),
        ]
        .into_iter()
        .map(|(region, capacity)| RegionCapacity {
            region: region.to_string(),
            capacity,
        })
        .collect();

        Self {
            timestamp: timestamp.into(),
            production: ProductionTotals {
                total: 1234,
                solar: 342,
                wind: 567,
                hydro: 298,
                thermal: 145,
                other: 82,
            },
            capacity: CapacitySummary {
                total: 28.5,
                installed,
            },
            efficiency: Efficiency {
                network_usage: 87,
                available_capacity: 64,
                solar_performance: 79,
            },
        }
    }

    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_uses_camel_case_keys() -> Result<(), Box<dyn std::error::Error>> {
        let json = DashboardExport::snapshot("2024-05-01T10:00:00Z").to_pretty_json()?;
        let value: serde_json::Value = serde_json::from_str(&json)?;

        assert_eq!(value["timestamp"], "2024-05-01T10:00:00Z");
        assert_eq!(value["production"]["total"], 1234);
        assert_eq!(value["capacity"]["installed"][2]["region"], "Occitanie");
        assert_eq!(value["efficiency"]["networkUsage"], 87);
        assert!(json.contains("\n  \"production\""));
        Ok(())
    }
}
