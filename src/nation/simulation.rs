//! Simulation - owns the nation state and exposes the player operations

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::calendar::{SimDate, SimulationClock, DAYS_PER_MONTH};
use crate::core::config::{SimulationConfig, SkillMode};
use crate::core::error::{Result, SimError};
use crate::nation::data::{DEFAULT_LEADER_NAME, DEFAULT_PARTY_NAME};
use crate::nation::events::{EventEngine, RandomEvent};
use crate::nation::history::{ApprovalHistory, EventLog, EVENT_LOG_CAPACITY};
use crate::nation::leader::{generate_rivals, Leader, RivalFaction};
use crate::nation::policy::{PolicyEngine, PolicyKind, PolicyOutcome};
use crate::nation::region::{generate_regions, Region, APPROVAL_RANGE};
use crate::nation::snapshot::{NationalSummary, RegionSnapshot};
use crate::nation::statistics::CountryStatistics;

/// Events rolled during a year skip, inclusive
pub const YEAR_SKIP_EVENTS: (u32, u32) = (4, 8);
/// Interpolated history points are at most one per month
pub const MAX_INTERPOLATED_POINTS: i64 = 12;
/// Noise added to each interpolated history point
pub const INTERPOLATION_JITTER: f64 = 3.0;

/// Complete game state
///
/// The RNG is part of the state so a restored game continues the same
/// random stream it was saved with.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Simulation {
    regions: Vec<Region>,
    leader: Leader,
    rivals: Vec<RivalFaction>,
    statistics: CountryStatistics,
    clock: SimulationClock,
    history: ApprovalHistory,
    events: EventLog,
    skill_mode: SkillMode,
    quiet_day_chance: f64,
    rng: ChaCha8Rng,
}

impl Simulation {
    /// Start a new game with default settings and an entropy seed
    pub fn initialize(leader_name: &str, party_name: &str) -> Self {
        Self::new(leader_name, party_name, &SimulationConfig::default())
    }

    /// Start a new deterministic game
    pub fn with_seed(leader_name: &str, party_name: &str, seed: u64) -> Self {
        let config = SimulationConfig {
            seed: Some(seed),
            ..SimulationConfig::default()
        };
        Self::new(leader_name, party_name, &config)
    }

    pub fn new(leader_name: &str, party_name: &str, config: &SimulationConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let leader_name = match leader_name.trim() {
            "" => DEFAULT_LEADER_NAME,
            name => name,
        };
        let party_name = match party_name.trim() {
            "" => DEFAULT_PARTY_NAME,
            name => name,
        };

        let regions = generate_regions(&mut rng);
        let mut leader = Leader::new(leader_name, party_name, &mut rng);
        let rivals = generate_rivals(&mut rng);
        let clock = SimulationClock::new(config.start_year);

        leader.calculate_global_approval(&regions);
        let mut history = ApprovalHistory::new();
        history.push(leader.global_approval(), clock.date());

        info!(
            seed,
            leader = %leader.name,
            party = %leader.party,
            approval = leader.global_approval(),
            "New government formed"
        );

        Self {
            regions,
            leader,
            rivals,
            statistics: CountryStatistics::default(),
            clock,
            history,
            events: EventLog::new(),
            skill_mode: config.skill_mode,
            quiet_day_chance: config.quiet_day_chance,
            rng,
        }
    }

    // === PLAYER OPERATIONS ===

    /// Enact a policy, log it, and refresh national approval
    pub fn apply_policy(&mut self, kind: PolicyKind) -> PolicyOutcome {
        let engine = PolicyEngine::new(self.skill_mode);
        let outcome = engine.apply(
            kind,
            &mut self.regions,
            &mut self.statistics,
            &self.leader.skills,
            &mut self.rng,
        );

        self.leader.calculate_global_approval(&self.regions);
        self.events.push(outcome.log_entry());

        debug!(
            policy = %kind,
            name = %outcome.name,
            effect = outcome.effect,
            success = outcome.success,
            catastrophe = outcome.catastrophe,
            approval = self.leader.global_approval(),
            "Policy resolved"
        );

        outcome
    }

    /// String-keyed policy entry. Unrecognized labels change nothing and
    /// return `(0.0, "")`.
    pub fn apply_policy_named(&mut self, label: &str) -> (f64, String) {
        match label.parse::<PolicyKind>() {
            Ok(kind) => {
                let outcome = self.apply_policy(kind);
                (outcome.effect, outcome.name)
            }
            Err(_) => (0.0, String::new()),
        }
    }

    /// Roll for a random event; a fired event is logged and national
    /// approval refreshed
    pub fn maybe_trigger_event(&mut self) -> Option<RandomEvent> {
        let engine = EventEngine::new(self.quiet_day_chance);
        let event = engine.maybe_trigger(&mut self.regions, &mut self.rng)?;

        self.leader.calculate_global_approval(&self.regions);
        self.events.push(event.name.clone());

        debug!(
            category = %event.category,
            name = %event.name,
            magnitude = event.magnitude,
            approval = self.leader.global_approval(),
            "Event fired"
        );

        Some(event)
    }

    /// Advance the calendar one day, roll for an event, and record the
    /// resulting approval
    pub fn advance_day(&mut self) -> Option<RandomEvent> {
        let date = self.clock.advance_day();
        let event = self.maybe_trigger_event();
        self.history.push(self.leader.global_approval(), date);
        event
    }

    /// Jump forward one year
    ///
    /// Rolls several events, then fills the approval history with
    /// interpolated points between the old and new dates so trend charts
    /// stay smooth. Always ends with a point at the new date.
    pub fn skip_year(&mut self) -> bool {
        let start_date = self.clock.date();
        let start_approval = self.leader.global_approval();
        let end_date = self.clock.advance_year();

        let event_count = self.rng.gen_range(YEAR_SKIP_EVENTS.0..=YEAR_SKIP_EVENTS.1);
        let fired = (0..event_count)
            .filter_map(|_| self.maybe_trigger_event())
            .count();
        let end_approval = self.leader.global_approval();

        let span = start_date.days_until(&end_date);
        let points = (span / DAYS_PER_MONTH as i64).clamp(0, MAX_INTERPOLATED_POINTS);
        if points > 0 {
            let step = span as f64 / (points + 1) as f64;
            for i in 1..=points {
                let progress = i as f64 / (points + 1) as f64;
                let base = (1.0 - progress) * start_approval + progress * end_approval;
                let jitter = self.rng.gen_range(-INTERPOLATION_JITTER..=INTERPOLATION_JITTER);
                let value = (base + jitter).clamp(APPROVAL_RANGE.0, APPROVAL_RANGE.1);
                let date = start_date.plus_days((i as f64 * step) as i64);
                self.history.push(value, date);
            }
        }
        self.history.push(end_approval, end_date);

        info!(
            from = %start_date,
            to = %end_date,
            rolled = event_count,
            fired,
            approval = end_approval,
            "Year skipped"
        );

        true
    }

    // === QUERIES ===

    /// Regions in master order
    pub fn region_snapshot(&self) -> Vec<RegionSnapshot> {
        self.regions.iter().map(RegionSnapshot::from).collect()
    }

    /// Up to five most recent log lines, oldest first
    pub fn recent_events(&self) -> Vec<String> {
        self.events.entries()
    }

    /// Whether the most recent log line is a policy catastrophe
    pub fn last_was_catastrophe(&self) -> bool {
        self.events
            .latest()
            .is_some_and(|entry| entry.starts_with("Catastrophe:"))
    }

    pub fn summary(&self) -> NationalSummary {
        NationalSummary::from_regions(self.clock.date(), self.leader.global_approval(), &self.regions)
    }

    pub fn leader(&self) -> &Leader {
        &self.leader
    }

    pub fn global_approval(&self) -> f64 {
        self.leader.global_approval()
    }

    pub fn rivals(&self) -> &[RivalFaction] {
        &self.rivals
    }

    pub fn statistics(&self) -> &CountryStatistics {
        &self.statistics
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn date(&self) -> SimDate {
        self.clock.date()
    }

    pub fn history(&self) -> &ApprovalHistory {
        &self.history
    }

    // === SAVE FORMAT ===

    /// Whole-state blob for the save store
    pub fn serialize(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Restore from a blob produced by `serialize`
    pub fn deserialize(blob: &[u8]) -> Result<Self> {
        let sim: Simulation = serde_json::from_slice(blob)?;
        sim.validate()?;
        Ok(sim)
    }

    /// Structural checks on restored state
    pub fn validate(&self) -> Result<()> {
        let corrupt = |msg: String| -> Result<()> { Err(SimError::CorruptSave(msg)) };

        if self.regions.is_empty() {
            return corrupt("no regions".into());
        }
        if let Some(region) = self.regions.iter().find(|r| r.population == 0) {
            return corrupt(format!("region {} has zero population", region.name));
        }
        if let Some(region) = self.regions.iter().find(|r| !r.is_normalized()) {
            return corrupt(format!("region {} has out-of-range statistics", region.name));
        }
        if !self.clock.date().is_valid() {
            return corrupt(format!("invalid date {}", self.clock.date()));
        }
        if self.history.is_empty() || !self.history.is_consistent() {
            return corrupt("approval history is empty or inconsistent".into());
        }
        if self.events.len() > EVENT_LOG_CAPACITY {
            return corrupt(format!("event log holds {} entries", self.events.len()));
        }
        if !(0.0..=1.0).contains(&self.quiet_day_chance) {
            return corrupt(format!("quiet_day_chance {} out of range", self.quiet_day_chance));
        }
        Ok(())
    }
}
