//! FILENAME: core/competitor-data/src/detail.rs
//! Competitor Detail - the analytics behind the per-competitor page.
//!
//! The detail page shows headline metrics, a price response scatter, capture
//! rates by move size, a consistency trend with a 7-day rolling average and
//! a behavioural profile. All series are synthetic and dated backwards from
//! a caller-supplied `today`.
//!
//! Generation is deterministic for a given (generator seed, row id) pair, so
//! reopening the same competitor shows the same charts.

use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::filter::TimeRange;
use crate::model::{StrategyTag, COMPETITOR_NAMES, LOCATIONS, PRODUCTS};
use crate::profile::{
    profile_for, regime_at, CaptureRegime, CompetitorProfile, IntradayFrequency, DEFAULT_REGIME,
};

const PRICE_MOVEMENT_DAYS: usize = 100;
const CAPTURE_RATE_DAYS: usize = 50;
const CONSISTENCY_DAYS: usize = 90;
const ROLLING_WINDOW: usize = 7;

const INTRADAY_TIMES: [&str; 5] = ["9:00 AM", "10:30 AM", "11:00 AM", "2:00 PM", "3:30 PM"];

// ============================================================================
// DETAIL TYPES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailMetrics {
    pub spot: f64,
    pub up_percentage: f64,
    pub down_percentage: f64,
    pub large_movements: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntradayBehavior {
    pub frequency: IntradayFrequency,
    pub typical_time: Option<String>,
}

/// Daily market move against the competitor's move, in dollars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceMovement {
    pub date: NaiveDate,
    pub market_change: f64,
    pub competitor_change: f64,
}

/// Capture rate (percent) for a move of `size` cents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureRatePoint {
    pub date: NaiveDate,
    pub size: f64,
    pub rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsistencyPoint {
    pub date: NaiveDate,
    /// Same as `rolling_average`; older chart code reads this key.
    pub consistency: f64,
    /// Spot delta capture for the day, percent (0-200).
    pub daily_capture: f64,
    pub rolling_average: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BehavioralProfile {
    pub strategy: StrategyTag,
    pub position: String,
    pub responsiveness: String,
    pub consistency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingLag {
    pub days: u32,
    pub prediction: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitorDetail {
    pub id: String,
    pub name: String,
    pub product: String,
    pub location: String,
    pub metrics: DetailMetrics,
    pub intraday_behavior: IntradayBehavior,
    pub price_movements: Vec<PriceMovement>,
    pub capture_rates: Vec<CaptureRatePoint>,
    pub consistency_trend: Vec<ConsistencyPoint>,
    pub behavioral_profile: BehavioralProfile,
    pub pricing_lag: PricingLag,
}

impl CompetitorDetail {
    /// Drops series points older than `range` before `today`.
    pub fn within(mut self, range: TimeRange, today: NaiveDate) -> Self {
        let cutoff = today - Days::new(range.days());
        self.price_movements.retain(|p| p.date >= cutoff);
        self.capture_rates.retain(|p| p.date >= cutoff);
        self.consistency_trend.retain(|p| p.date >= cutoff);
        self
    }
}

// ============================================================================
// GENERATION
// ============================================================================

/// Numeric part of a `comp-N` id; anything unparsable (or 0) maps to 1.
pub fn id_seed(id: &str) -> u64 {
    id.split('-')
        .nth(1)
        .and_then(|n| n.parse::<u64>().ok())
        .filter(|&n| n != 0)
        .unwrap_or(1)
}

fn days_before(today: NaiveDate, days: usize) -> NaiveDate {
    today - Days::new(days as u64)
}

/// Builds the detail page data for row `id`.
pub fn generate_detail(base_seed: u64, id: &str, today: NaiveDate) -> CompetitorDetail {
    let seed = id_seed(id);
    let index = seed as usize;
    let name = COMPETITOR_NAMES[index % COMPETITOR_NAMES.len()];
    let profile = profile_for(name);
    let mut rng = StdRng::seed_from_u64(base_seed ^ seed.wrapping_mul(0x9E37_79B9_7F4A_7C15));

    let price_movements = price_movements(&mut rng, profile, today);
    let capture_rates = capture_rates(&mut rng, profile, today);
    let consistency_trend = consistency_trend(&mut rng, profile, today);

    let (intraday_behavior, metrics, behavioral_profile) = match profile {
        Some(profile) => (
            IntradayBehavior {
                frequency: profile.intraday_frequency,
                typical_time: profile.intraday_time.map(str::to_string),
            },
            DetailMetrics {
                spot: profile.spot,
                up_percentage: profile.up_percentage,
                down_percentage: profile.down_percentage,
                large_movements: profile.large_movements,
            },
            BehavioralProfile {
                strategy: profile.strategy,
                position: profile.position.to_string(),
                responsiveness: profile.responsiveness.to_string(),
                consistency: profile.consistency_label.to_string(),
            },
        ),
        None => {
            let frequency = IntradayFrequency::ALL[index % IntradayFrequency::ALL.len()];
            let typical_time = (frequency != IntradayFrequency::Never)
                .then(|| INTRADAY_TIMES[index % INTRADAY_TIMES.len()].to_string());
            (
                IntradayBehavior { frequency, typical_time },
                DetailMetrics {
                    spot: 0.02 + rng.gen::<f64>() * 0.02,
                    up_percentage: 70.0 + rng.gen::<f64>() * 20.0,
                    down_percentage: 70.0 + rng.gen::<f64>() * 20.0,
                    large_movements: rng.gen_range(0..8),
                },
                BehavioralProfile {
                    strategy: StrategyTag::ALL[index % StrategyTag::ALL.len()],
                    position: "#3-5".to_string(),
                    responsiveness: "Moderate".to_string(),
                    consistency: "Medium".to_string(),
                },
            )
        }
    };

    CompetitorDetail {
        id: id.to_string(),
        name: name.to_string(),
        product: PRODUCTS[index % PRODUCTS.len()].to_string(),
        location: LOCATIONS[index % LOCATIONS.len()].to_string(),
        metrics,
        intraday_behavior,
        price_movements,
        capture_rates,
        consistency_trend,
        behavioral_profile,
        pricing_lag: PricingLag {
            days: profile.map_or(1, |p| p.lag_days),
            prediction: 0.02 + rng.gen::<f64>() * 0.01,
        },
    }
}

fn price_movements(
    rng: &mut StdRng,
    profile: Option<&CompetitorProfile>,
    today: NaiveDate,
) -> Vec<PriceMovement> {
    let (response, noise) = profile.map_or((0.8, 0.04), |p| (p.market_response, p.response_noise));

    (0..PRICE_MOVEMENT_DAYS)
        .map(|i| {
            let market_change = ((i as f64 / 10.0).sin() + rng.gen::<f64>() - 0.5) * 0.15;
            let competitor_change = market_change * response + (rng.gen::<f64>() - 0.5) * noise;
            PriceMovement {
                date: days_before(today, PRICE_MOVEMENT_DAYS - i),
                market_change,
                competitor_change,
            }
        })
        .collect()
}

fn capture_rates(
    rng: &mut StdRng,
    profile: Option<&CompetitorProfile>,
    today: NaiveDate,
) -> Vec<CaptureRatePoint> {
    let (base, span) = profile.map_or((40.0, 80.0), |p| (p.capture_base, p.capture_span));

    (0..CAPTURE_RATE_DAYS)
        .map(|i| {
            let size = rng.gen::<f64>() * 5.0;
            let mut rate = base + rng.gen::<f64>() * span;
            // Larger moves get captured more aggressively
            if size > 3.0 {
                rate = (rate * 1.2).min(180.0);
            }
            CaptureRatePoint {
                date: days_before(today, CAPTURE_RATE_DAYS - i),
                size,
                rate,
            }
        })
        .collect()
}

fn consistency_trend(
    rng: &mut StdRng,
    profile: Option<&CompetitorProfile>,
    today: NaiveDate,
) -> Vec<ConsistencyPoint> {
    static DEFAULT_REGIMES: [CaptureRegime; 1] = [DEFAULT_REGIME];
    let regimes: &[CaptureRegime] = profile.map_or(&DEFAULT_REGIMES[..], |p| p.regimes);
    let mut daily: Vec<f64> = Vec::with_capacity(CONSISTENCY_DAYS);

    (0..CONSISTENCY_DAYS)
        .map(|i| {
            let (base, volatility) = regime_at(regimes, i);
            let cyclical = (i as f64 / 5.0).sin() * 10.0;
            let daily_capture =
                (base + (rng.gen::<f64>() - 0.5) * volatility + cyclical).clamp(0.0, 200.0);
            daily.push(daily_capture);

            let rolling_average = rolling_mean(&daily, ROLLING_WINDOW);
            ConsistencyPoint {
                date: days_before(today, CONSISTENCY_DAYS - i),
                consistency: rolling_average,
                daily_capture,
                rolling_average,
            }
        })
        .collect()
}

/// Mean of the last `window` values (fewer at the start of the series).
pub fn rolling_mean(values: &[f64], window: usize) -> f64 {
    if values.is_empty() || window == 0 {
        return 0.0;
    }
    let start = values.len().saturating_sub(window);
    let tail = &values[start..];
    tail.iter().sum::<f64>() / tail.len() as f64
}
