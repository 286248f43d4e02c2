//! Leader - the player's persona - and the rival parties

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::nation::data::RIVAL_PARTY_NAMES;
use crate::nation::region::{Region, APPROVAL_RANGE};

/// Policy effectiveness multipliers, nominally 0.5 to 1.5
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolicySkills {
    pub economy: f64,
    pub unemployment: f64,
    pub environment: f64,
    pub welfare: f64,
}

impl PolicySkills {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            economy: rng.gen_range(0.5..1.5),
            unemployment: rng.gen_range(0.5..1.5),
            environment: rng.gen_range(0.5..1.5),
            welfare: rng.gen_range(0.5..1.5),
        }
    }
}

impl Default for PolicySkills {
    fn default() -> Self {
        Self {
            economy: 1.0,
            unemployment: 1.0,
            environment: 1.0,
            welfare: 1.0,
        }
    }
}

/// The player-controlled head of government
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Leader {
    pub name: String,
    pub party: String,
    /// Population-weighted mean of regional approval. Only written by
    /// `calculate_global_approval`.
    global_approval: f64,
    pub base_popularity: f64,
    pub skills: PolicySkills,
}

impl Leader {
    pub fn new<R: Rng + ?Sized>(name: &str, party: &str, rng: &mut R) -> Self {
        Self {
            name: name.to_string(),
            party: party.to_string(),
            global_approval: 50.0,
            base_popularity: rng.gen_range(50.0..70.0),
            skills: PolicySkills::generate(rng),
        }
    }

    pub fn global_approval(&self) -> f64 {
        self.global_approval
    }

    /// Recompute national approval as the population-weighted mean of
    /// regional approval
    ///
    /// A region set with zero total population leaves the previous value
    /// in place.
    pub fn calculate_global_approval(&mut self, regions: &[Region]) -> f64 {
        let (weighted, total) = regions.iter().fold((0.0, 0.0), |(weighted, total), r| {
            let pop = r.population as f64;
            (weighted + r.approval * pop, total + pop)
        });

        if total > 0.0 {
            self.global_approval = (weighted / total).clamp(APPROVAL_RANGE.0, APPROVAL_RANGE.1);
        }
        self.global_approval
    }
}

/// A competing party. Display-only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RivalFaction {
    pub name: String,
    pub base_popularity: f64,
}

pub fn generate_rivals<R: Rng + ?Sized>(rng: &mut R) -> Vec<RivalFaction> {
    RIVAL_PARTY_NAMES
        .iter()
        .map(|name| RivalFaction {
            name: name.to_string(),
            base_popularity: rng.gen_range(40.0..60.0),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn region(name: &str, population: u64, approval: f64) -> Region {
        Region {
            name: name.to_string(),
            population,
            economy: 1.0,
            approval,
            unemployment: 5.0,
            environment: 5.0,
        }
    }

    #[test]
    fn test_weighted_approval() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut leader = Leader::new("Test PM", "Test Party", &mut rng);

        let regions = vec![region("A", 3_000, 80.0), region("B", 1_000, 40.0)];
        let approval = leader.calculate_global_approval(&regions);

        assert!((approval - 70.0).abs() < 1e-9);
        assert_eq!(leader.global_approval(), approval);
    }

    #[test]
    fn test_zero_population_keeps_previous() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut leader = Leader::new("Test PM", "Test Party", &mut rng);
        leader.calculate_global_approval(&[region("A", 10, 64.0)]);

        let approval = leader.calculate_global_approval(&[region("B", 0, 12.0)]);
        assert_eq!(approval, 64.0);

        let approval = leader.calculate_global_approval(&[]);
        assert_eq!(approval, 64.0);
    }

    #[test]
    fn test_skills_in_nominal_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let leader = Leader::new("Test PM", "Test Party", &mut rng);
        for skill in [
            leader.skills.economy,
            leader.skills.unemployment,
            leader.skills.environment,
            leader.skills.welfare,
        ] {
            assert!((0.5..1.5).contains(&skill));
        }
        assert!((50.0..70.0).contains(&leader.base_popularity));
    }

    #[test]
    fn test_rivals_generated_once_each() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let rivals = generate_rivals(&mut rng);
        assert_eq!(rivals.len(), 3);
        assert!(rivals.iter().all(|r| (40.0..60.0).contains(&r.base_popularity)));
    }
}
