//! FILENAME: core/competitor-data/src/generator.rs
//! PURPOSE: Seeded synthetic competitor rows for the analysis grid.
//! CONTEXT: There is no live competitor feed. The generator produces
//! plausible rows from the reference lists and the preset profiles. A seed
//! makes every dataset reproducible.

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::detail::{generate_detail, CompetitorDetail};

use crate::model::{
    CompetitorData, StrategyTag, BRANDS, COMPETITOR_NAMES, LOCATIONS, LOCATION_GROUPS, PRODUCTS,
    PRODUCT_GROUPS,
};
use crate::profile::{profile_for, PROFILES};

/// Share of rows (after the first few) that pick a profiled competitor.
const PROFILED_SHARE: f64 = 0.6;

/// Maximum jitter applied either way to profiled metrics.
const PROFILE_JITTER: f64 = 2.0;

pub struct CompetitorGenerator {
    seed: u64,
    rng: StdRng,
}

impl CompetitorGenerator {
    pub fn new(seed: u64) -> Self {
        CompetitorGenerator {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generates `count` rows with ids `comp-1` .. `comp-{count}`.
    ///
    /// The first rows cover each profiled competitor once so the demo always
    /// shows all three strategies.
    pub fn generate(&mut self, count: usize) -> Vec<CompetitorData> {
        (0..count).map(|i| self.generate_row(i)).collect()
    }

    /// Detail analytics for row `id`, dated back from `today`.
    ///
    /// Independent of how many rows were generated: each id gets its own
    /// stream derived from the generator seed.
    pub fn detail(&self, id: &str, today: NaiveDate) -> CompetitorDetail {
        generate_detail(self.seed, id, today)
    }

    fn generate_row(&mut self, index: usize) -> CompetitorData {
        let competitor = self.pick_competitor(index);

        let (strategy_tag, capture_rate, predictability) = match profile_for(competitor) {
            Some(profile) => {
                let capture = profile.capture_rate + self.jitter();
                let consistency = profile.consistency + self.jitter();
                (profile.strategy, capture, consistency)
            }
            None => {
                let predictability = self.rng.gen::<f64>() * 100.0;
                let capture = self.rng.gen::<f64>() * 100.0;
                (StrategyTag::classify(capture, predictability), capture, predictability)
            }
        };

        CompetitorData {
            id: format!("comp-{}", index + 1),
            competitor: competitor.to_string(),
            location: self.pick(&LOCATIONS).to_string(),
            location_group: self.pick(&LOCATION_GROUPS).to_string(),
            product: self.pick(&PRODUCTS).to_string(),
            product_group: self.pick(&PRODUCT_GROUPS).to_string(),
            brand: self.pick(&BRANDS).to_string(),
            strategy_tag,
            spot_delta: self.rng.gen::<f64>() * 0.1 - 0.05,
            capture_rate: capture_rate.clamp(0.0, 100.0),
            predictability: predictability.clamp(0.0, 100.0),
        }
    }

    fn pick_competitor(&mut self, index: usize) -> &'static str {
        if let Some(profile) = PROFILES.get(index) {
            return profile.name;
        }
        if self.rng.gen::<f64>() < PROFILED_SHARE {
            let slot = self.rng.gen_range(0..PROFILES.len());
            PROFILES[slot].name
        } else {
            let others: Vec<&'static str> = COMPETITOR_NAMES
                .iter()
                .copied()
                .filter(|name| profile_for(name).is_none())
                .collect();
            let slot = self.rng.gen_range(0..others.len());
            others[slot]
        }
    }

    fn pick(&mut self, items: &[&'static str]) -> &'static str {
        items[self.rng.gen_range(0..items.len())]
    }

    fn jitter(&mut self) -> f64 {
        self.rng.gen::<f64>() * (2.0 * PROFILE_JITTER) - PROFILE_JITTER
    }
}

/// Convenience wrapper: a fresh generator for `seed`, producing `count` rows.
pub fn generate_competitor_data(seed: u64, count: usize) -> Vec<CompetitorData> {
    CompetitorGenerator::new(seed).generate(count)
}
