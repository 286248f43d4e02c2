//! Country-level indicators
//!
//! Descriptive macro statistics seeded from published figures. Policies nudge
//! a few of them as flavor; nothing in the simulation reads them back.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EconomyIndicators {
    /// USD trillion
    pub gdp_ppp: f64,
    /// USD trillion
    pub gdp_nominal: f64,
    /// USD
    pub gdp_per_capita: f64,
    /// Percent
    pub inflation: f64,
    /// Percent
    pub growth_rate: f64,
    /// Per-capita GDP (USD PPP) of the strongest regions
    pub top_regions_gdp: Vec<(String, u64)>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImmigrationBreakdown {
    pub total_foreigners: u64,
    pub source_countries: Vec<(String, u64)>,
    /// Percent year-on-year growth
    pub immigration_rate: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Demographics {
    pub population: u64,
    /// People per km²
    pub density: f64,
    /// Percent, may go negative
    pub migration_rate: f64,
    /// Per 1000
    pub birth_rate: f64,
    pub top_regions_population: Vec<(String, u64)>,
    pub immigration: ImmigrationBreakdown,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CountryStatistics {
    pub economy: EconomyIndicators,
    pub demographics: Demographics,
}

/// Indicator a policy outcome may touch
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatField {
    GdpNominal,
    GdpPpp,
    GdpPerCapita,
    GrowthRate,
    Inflation,
    MigrationRate,
    BirthRate,
}

/// How an indicator moves
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Nudge {
    Scale(f64),
    Add(f64),
}

fn owned(pairs: &[(&str, u64)]) -> Vec<(String, u64)> {
    pairs.iter().map(|(name, v)| (name.to_string(), *v)).collect()
}

impl Default for CountryStatistics {
    fn default() -> Self {
        Self {
            economy: EconomyIndicators {
                gdp_ppp: 6.31,
                gdp_nominal: 4.204,
                gdp_per_capita: 36_990.33,
                inflation: 3.2,
                growth_rate: 0.9,
                top_regions_gdp: owned(&[
                    ("Tokyo", 74_003),
                    ("Aichi", 52_119),
                    ("Ibaraki", 46_594),
                    ("Tochigi", 46_086),
                    ("Shiga", 45_952),
                ]),
            },
            demographics: Demographics {
                population: 125_921_755,
                density: 333.2,
                migration_rate: 0.08,
                birth_rate: 5.7,
                top_regions_population: owned(&[
                    ("Tokyo", 13_834_925),
                    ("Kanagawa", 9_209_442),
                    ("Osaka", 8_849_635),
                    ("Aichi", 7_575_530),
                    ("Saitama", 7_390_054),
                ]),
                immigration: ImmigrationBreakdown {
                    total_foreigners: 3_768_977,
                    source_countries: owned(&[
                        ("China", 873_286),
                        ("Vietnam", 634_361),
                        ("South Korea", 409_238),
                        ("Nepal", 124_356),
                        ("Brazil", 206_886),
                    ]),
                    immigration_rate: 10.5,
                },
            },
        }
    }
}

impl CountryStatistics {
    fn field_mut(&mut self, field: StatField) -> &mut f64 {
        match field {
            StatField::GdpNominal => &mut self.economy.gdp_nominal,
            StatField::GdpPpp => &mut self.economy.gdp_ppp,
            StatField::GdpPerCapita => &mut self.economy.gdp_per_capita,
            StatField::GrowthRate => &mut self.economy.growth_rate,
            StatField::Inflation => &mut self.economy.inflation,
            StatField::MigrationRate => &mut self.demographics.migration_rate,
            StatField::BirthRate => &mut self.demographics.birth_rate,
        }
    }

    pub fn get(&self, field: StatField) -> f64 {
        match field {
            StatField::GdpNominal => self.economy.gdp_nominal,
            StatField::GdpPpp => self.economy.gdp_ppp,
            StatField::GdpPerCapita => self.economy.gdp_per_capita,
            StatField::GrowthRate => self.economy.growth_rate,
            StatField::Inflation => self.economy.inflation,
            StatField::MigrationRate => self.demographics.migration_rate,
            StatField::BirthRate => self.demographics.birth_rate,
        }
    }

    pub fn apply(&mut self, field: StatField, nudge: Nudge) {
        let value = self.field_mut(field);
        match nudge {
            Nudge::Scale(factor) => *value *= factor,
            Nudge::Add(delta) => *value += delta,
        }

        // GDP figures and birth rate cannot go negative
        if !matches!(field, StatField::GrowthRate | StatField::Inflation | StatField::MigrationRate) {
            *value = value.max(0.0);
        }
    }

    /// Multi-section text report for display
    pub fn report(&self) -> String {
        let e = &self.economy;
        let d = &self.demographics;
        let mut out = String::new();

        let _ = writeln!(out, "--- Economy ---");
        let _ = writeln!(out, "GDP (PPP): ${:.3} trillion", e.gdp_ppp);
        let _ = writeln!(out, "GDP (Nominal): ${:.3} trillion", e.gdp_nominal);
        let _ = writeln!(out, "GDP per Capita: ${:.2}", e.gdp_per_capita);
        let _ = writeln!(out, "Inflation: {:.2}%", e.inflation);
        let _ = writeln!(out, "Growth Rate: {:.2}%", e.growth_rate);
        let _ = writeln!(out, "Top Regions by GDP:");
        for (name, gdp) in &e.top_regions_gdp {
            let _ = writeln!(out, "  {}: ${}", name, gdp);
        }

        let _ = writeln!(out, "\n--- Demographics ---");
        let _ = writeln!(out, "Population: {}", d.population);
        let _ = writeln!(out, "Density: {:.1} per km²", d.density);
        let _ = writeln!(out, "Migration Rate: {:.3}%", d.migration_rate);
        let _ = writeln!(out, "Birth Rate: {:.1} per 1000", d.birth_rate);
        let _ = writeln!(out, "Top Regions by Population:");
        for (name, pop) in &d.top_regions_population {
            let _ = writeln!(out, "  {}: {}", name, pop);
        }

        let _ = writeln!(out, "\n--- Immigration ---");
        let _ = writeln!(out, "Total Foreigners: {}", d.immigration.total_foreigners);
        let _ = writeln!(out, "Immigration Rate: {:.1}%", d.immigration.immigration_rate);
        let _ = writeln!(out, "Top Source Countries:");
        for (name, count) in &d.immigration.source_countries {
            let _ = writeln!(out, "  {}: {}", name, count);
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_and_add() {
        let mut stats = CountryStatistics::default();
        stats.apply(StatField::GdpNominal, Nudge::Scale(1.03));
        stats.apply(StatField::GrowthRate, Nudge::Add(-0.2));

        assert!((stats.economy.gdp_nominal - 4.204 * 1.03).abs() < 1e-9);
        assert!((stats.get(StatField::GrowthRate) - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_birth_rate_floor() {
        let mut stats = CountryStatistics::default();
        stats.apply(StatField::BirthRate, Nudge::Add(-10.0));
        assert_eq!(stats.demographics.birth_rate, 0.0);

        stats.apply(StatField::MigrationRate, Nudge::Add(-1.0));
        assert!(stats.demographics.migration_rate < 0.0);
    }

    #[test]
    fn test_report_sections() {
        let report = CountryStatistics::default().report();
        assert!(report.contains("--- Economy ---"));
        assert!(report.contains("--- Demographics ---"));
        assert!(report.contains("--- Immigration ---"));
        assert!(report.contains("Vietnam: 634361"));
    }
}
