//! Region - one administrative unit and its local statistics

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::nation::data::{seeded_population, NATIONAL_POPULATION, REGION_NAMES, TOP_REGION_POPULATIONS};

pub const APPROVAL_RANGE: (f64, f64) = (0.0, 100.0);
pub const UNEMPLOYMENT_RANGE: (f64, f64) = (1.0, 30.0);
pub const ENVIRONMENT_RANGE: (f64, f64) = (0.0, 10.0);
pub const ECONOMY_RANGE: (f64, f64) = (0.1, 3.0);

/// A region's mutable statistics
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub name: String,
    /// Always positive, never clamped
    pub population: u64,
    /// Economic score, nominally around 1.0
    pub economy: f64,
    /// Local approval of the government, percent
    pub approval: f64,
    /// Unemployment rate, percent
    pub unemployment: f64,
    /// Environmental quality score
    pub environment: f64,
}

impl Region {
    /// Create a region with randomized starting statistics
    pub fn generate<R: Rng + ?Sized>(name: &str, population: u64, rng: &mut R) -> Self {
        Self {
            name: name.to_string(),
            population: population.max(1),
            economy: rng.gen_range(0.5..1.5),
            approval: rng.gen_range(40.0..60.0),
            unemployment: rng.gen_range(3.0..10.0),
            environment: rng.gen_range(3.0..10.0),
        }
    }

    /// Clamp every bounded statistic into its range. Idempotent.
    pub fn normalize(&mut self) {
        self.approval = self.approval.clamp(APPROVAL_RANGE.0, APPROVAL_RANGE.1);
        self.unemployment = self.unemployment.clamp(UNEMPLOYMENT_RANGE.0, UNEMPLOYMENT_RANGE.1);
        self.environment = self.environment.clamp(ENVIRONMENT_RANGE.0, ENVIRONMENT_RANGE.1);
        self.economy = self.economy.clamp(ECONOMY_RANGE.0, ECONOMY_RANGE.1);
    }

    pub fn is_normalized(&self) -> bool {
        let within = |v: f64, (lo, hi): (f64, f64)| v >= lo && v <= hi;
        within(self.approval, APPROVAL_RANGE)
            && within(self.unemployment, UNEMPLOYMENT_RANGE)
            && within(self.environment, ENVIRONMENT_RANGE)
            && within(self.economy, ECONOMY_RANGE)
    }
}

/// Build the full region list in master order
///
/// Census-seeded regions keep their figures; the remaining national
/// population is split evenly across the rest with ±15% jitter.
pub fn generate_regions<R: Rng + ?Sized>(rng: &mut R) -> Vec<Region> {
    let seeded_total: u64 = TOP_REGION_POPULATIONS.iter().map(|(_, pop)| pop).sum();
    let remaining_count = REGION_NAMES.len() - TOP_REGION_POPULATIONS.len();
    let average = NATIONAL_POPULATION.saturating_sub(seeded_total) as f64 / remaining_count as f64;

    REGION_NAMES
        .iter()
        .map(|name| {
            let population = match seeded_population(name) {
                Some(pop) => pop,
                None => (average * rng.gen_range(0.85..1.15)) as u64,
            };
            Region::generate(name, population, rng)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn sample_region() -> Region {
        Region {
            name: "Nara".to_string(),
            population: 1_331_000,
            economy: 1.0,
            approval: 50.0,
            unemployment: 5.0,
            environment: 5.0,
        }
    }

    #[test]
    fn test_normalize_clamps_all_fields() {
        let mut region = sample_region();
        region.approval = 140.0;
        region.unemployment = -3.0;
        region.environment = 12.5;
        region.economy = 0.0;
        region.normalize();

        assert_eq!(region.approval, 100.0);
        assert_eq!(region.unemployment, 1.0);
        assert_eq!(region.environment, 10.0);
        assert_eq!(region.economy, 0.1);
        assert!(region.is_normalized());
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let mut region = sample_region();
        region.approval = -20.0;
        region.economy = 4.2;
        region.normalize();
        let once = region.clone();
        region.normalize();
        assert_eq!(region, once);
    }

    #[test]
    fn test_generate_regions_order_and_seeds() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let regions = generate_regions(&mut rng);

        assert_eq!(regions.len(), 47);
        for (region, name) in regions.iter().zip(REGION_NAMES.iter()) {
            assert_eq!(region.name, *name);
            assert!(region.population > 0);
            assert!(region.is_normalized());
        }

        let tokyo = regions.iter().find(|r| r.name == "Tokyo").unwrap();
        assert_eq!(tokyo.population, 13_834_925);
    }

    #[test]
    fn test_remainder_population_jitter() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let regions = generate_regions(&mut rng);
        let seeded_total: u64 = TOP_REGION_POPULATIONS.iter().map(|(_, p)| p).sum();
        let average = (NATIONAL_POPULATION - seeded_total) as f64 / 42.0;

        for region in regions.iter().filter(|r| seeded_population(&r.name).is_none()) {
            let pop = region.population as f64;
            assert!(pop >= average * 0.85 - 1.0 && pop <= average * 1.15);
        }
    }
}
