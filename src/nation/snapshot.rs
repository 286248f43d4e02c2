//! Read-only projections handed to front ends

use serde::{Deserialize, Serialize};

use crate::core::calendar::SimDate;
use crate::nation::region::Region;

/// Positional row: (name, population, economy, approval, unemployment, environment)
pub type RegionRow = (String, u64, f64, f64, f64, f64);

/// Copy of one region's statistics
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegionSnapshot {
    pub name: String,
    pub population: u64,
    pub economy: f64,
    pub approval: f64,
    pub unemployment: f64,
    pub environment: f64,
}

impl RegionSnapshot {
    /// Adapter for table and chart code that indexes fields by position
    pub fn as_row(&self) -> RegionRow {
        (
            self.name.clone(),
            self.population,
            self.economy,
            self.approval,
            self.unemployment,
            self.environment,
        )
    }
}

impl From<&Region> for RegionSnapshot {
    fn from(region: &Region) -> Self {
        Self {
            name: region.name.clone(),
            population: region.population,
            economy: region.economy,
            approval: region.approval,
            unemployment: region.unemployment,
            environment: region.environment,
        }
    }
}

/// Headline numbers for a status line
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NationalSummary {
    pub date: SimDate,
    pub total_population: u64,
    pub national_approval: f64,
    /// Unweighted mean of regional approval
    pub mean_regional_approval: f64,
    pub mean_unemployment: f64,
}

impl NationalSummary {
    pub fn from_regions(date: SimDate, national_approval: f64, regions: &[Region]) -> Self {
        let count = regions.len().max(1) as f64;
        Self {
            date,
            total_population: regions.iter().map(|r| r.population).sum(),
            national_approval,
            mean_regional_approval: regions.iter().map(|r| r.approval).sum::<f64>() / count,
            mean_unemployment: regions.iter().map(|r| r.unemployment).sum::<f64>() / count,
        }
    }
}
