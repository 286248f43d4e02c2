//! Random national events

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::nation::region::Region;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    Scandal,
    NaturalDisaster,
    EconomicBoom,
    ForeignSuccess,
}

impl EventCategory {
    pub const ALL: [EventCategory; 4] = [
        EventCategory::Scandal,
        EventCategory::NaturalDisaster,
        EventCategory::EconomicBoom,
        EventCategory::ForeignSuccess,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            EventCategory::Scandal => "scandal",
            EventCategory::NaturalDisaster => "natural_disaster",
            EventCategory::EconomicBoom => "economic_boom",
            EventCategory::ForeignSuccess => "foreign_success",
        }
    }

    /// Events that push approval down
    pub fn is_adverse(&self) -> bool {
        matches!(self, EventCategory::Scandal | EventCategory::NaturalDisaster)
    }

    /// Signed base magnitude range
    pub fn magnitude_range(&self) -> (f64, f64) {
        match self {
            EventCategory::Scandal => (-8.0, -3.0),
            EventCategory::NaturalDisaster => (-5.0, -2.0),
            EventCategory::EconomicBoom => (3.0, 7.0),
            EventCategory::ForeignSuccess => (2.0, 6.0),
        }
    }

    pub fn names(&self) -> &'static [&'static str] {
        match self {
            EventCategory::Scandal => &[
                "Cabinet Minister Resignation Scandal",
                "Corruption Allegations Surface",
                "Government Funds Misuse Exposed",
                "Controversial Statement Backlash",
            ],
            EventCategory::NaturalDisaster => &[
                "Typhoon Strikes Eastern Japan",
                "Earthquake in Kansai Region",
                "Flooding in Northern Prefectures",
                "Volcanic Activity Warning",
            ],
            EventCategory::EconomicBoom => &[
                "Stock Market Rally",
                "Major Foreign Investment Deal",
                "Tourism Industry Boom",
                "New Technology Sector Growth",
            ],
            EventCategory::ForeignSuccess => &[
                "Successful Trade Agreement",
                "Diplomatic Victory at UN",
                "International Peace Initiative",
                "Strategic Alliance Formed",
            ],
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An event that fired
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RandomEvent {
    pub category: EventCategory,
    pub name: String,
    /// Base approval shift before per-region jitter
    pub magnitude: f64,
}

/// Per-region multiplier applied to the base magnitude
pub const REGIONAL_JITTER: (f64, f64) = (0.7, 1.3);

#[derive(Clone, Copy, Debug)]
pub struct EventEngine {
    /// Probability that no event fires
    pub quiet_day_chance: f64,
}

impl Default for EventEngine {
    fn default() -> Self {
        Self { quiet_day_chance: 0.2 }
    }
}

impl EventEngine {
    pub fn new(quiet_day_chance: f64) -> Self {
        Self { quiet_day_chance }
    }

    /// Roll for an event and apply it to every region's approval
    ///
    /// Returns `None` on a quiet day. Regions are normalized after the
    /// shift; national approval is left for the caller.
    pub fn maybe_trigger<R: Rng + ?Sized>(&self, regions: &mut [Region], rng: &mut R) -> Option<RandomEvent> {
        if rng.gen_bool(self.quiet_day_chance) {
            return None;
        }

        let category = *EventCategory::ALL.choose(rng)?;
        let name = category.names().choose(rng)?.to_string();
        let (lo, hi) = category.magnitude_range();
        let magnitude = rng.gen_range(lo..hi);

        for region in regions.iter_mut() {
            region.approval += magnitude * rng.gen_range(REGIONAL_JITTER.0..REGIONAL_JITTER.1);
            region.normalize();
        }

        Some(RandomEvent {
            category,
            name,
            magnitude,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn regions() -> Vec<Region> {
        (0..8)
            .map(|i| Region {
                name: format!("Region_{}", i),
                population: 10_000,
                economy: 1.0,
                approval: 50.0,
                unemployment: 5.0,
                environment: 5.0,
            })
            .collect()
    }

    #[test]
    fn test_always_quiet() {
        let engine = EventEngine::new(1.0);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut regions = regions();
        for _ in 0..50 {
            assert!(engine.maybe_trigger(&mut regions, &mut rng).is_none());
        }
        assert!(regions.iter().all(|r| r.approval == 50.0));
    }

    #[test]
    fn test_event_direction_matches_category() {
        let engine = EventEngine::new(0.0);
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        for _ in 0..40 {
            let mut regions = regions();
            let event = engine
                .maybe_trigger(&mut regions, &mut rng)
                .expect("event always fires");

            assert!(event.category.names().contains(&event.name.as_str()));
            let (lo, hi) = event.category.magnitude_range();
            assert!(event.magnitude >= lo && event.magnitude <= hi);

            for region in &regions {
                let shift = region.approval - 50.0;
                if event.category.is_adverse() {
                    assert!(shift < 0.0);
                } else {
                    assert!(shift > 0.0);
                }
                assert!(shift.abs() >= event.magnitude.abs() * 0.7 - 1e-9);
                assert!(shift.abs() <= event.magnitude.abs() * 1.3 + 1e-9);
            }
        }
    }

    #[test]
    fn test_default_fires_most_days() {
        let engine = EventEngine::default();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut regions = regions();
        let fired = (0..1000)
            .filter(|_| engine.maybe_trigger(&mut regions, &mut rng).is_some())
            .count();
        assert!(fired > 700 && fired < 900, "fired {} times", fired);
    }
}
