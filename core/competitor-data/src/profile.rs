//! FILENAME: core/competitor-data/src/profile.rs
//! PURPOSE: Preset behaviour of the demo competitors.
//! CONTEXT: Three competitors have hand-tuned profiles so the dashboard shows
//! one clear Leader, Follower and Position player. Everyone else gets random
//! metrics from the generator.

use serde::{Deserialize, Serialize};

use crate::model::StrategyTag;

/// How often a competitor moves prices during the trading day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntradayFrequency {
    Never,
    Rarely,
    Sometimes,
    Frequently,
    Always,
}

impl IntradayFrequency {
    pub const ALL: [IntradayFrequency; 5] = [
        IntradayFrequency::Never,
        IntradayFrequency::Rarely,
        IntradayFrequency::Sometimes,
        IntradayFrequency::Frequently,
        IntradayFrequency::Always,
    ];
}

/// A stretch of the consistency trend with its own baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureRegime {
    /// Day index (exclusive) up to which this regime applies.
    pub until_day: usize,
    pub base_capture: f64,
    pub volatility: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompetitorProfile {
    pub name: &'static str,
    pub strategy: StrategyTag,
    /// Grid capture rate before jitter.
    pub capture_rate: f64,
    /// Grid consistency before jitter.
    pub consistency: f64,
    pub intraday_frequency: IntradayFrequency,
    pub intraday_time: Option<&'static str>,

    // Detail page
    pub spot: f64,
    pub up_percentage: f64,
    pub down_percentage: f64,
    pub large_movements: u32,
    pub position: &'static str,
    pub responsiveness: &'static str,
    pub consistency_label: &'static str,
    /// Share of a market move passed through to the competitor's price.
    pub market_response: f64,
    /// Width of the noise added to each price response.
    pub response_noise: f64,
    /// Capture rate band: `base + u * span`.
    pub capture_base: f64,
    pub capture_span: f64,
    pub regimes: &'static [CaptureRegime],
    pub lag_days: u32,
}

impl CompetitorProfile {
    /// Baseline and volatility of the consistency trend on `day`.
    pub fn regime_at(&self, day: usize) -> (f64, f64) {
        regime_at(self.regimes, day)
    }
}

pub(crate) fn regime_at(regimes: &[CaptureRegime], day: usize) -> (f64, f64) {
    regimes
        .iter()
        .find(|regime| day < regime.until_day)
        .or_else(|| regimes.last())
        .map_or((DEFAULT_REGIME.base_capture, DEFAULT_REGIME.volatility), |regime| {
            (regime.base_capture, regime.volatility)
        })
}

/// Consistency regime of competitors without a profile.
pub const DEFAULT_REGIME: CaptureRegime = CaptureRegime {
    until_day: usize::MAX,
    base_capture: 75.0,
    volatility: 35.0,
};

pub static PROFILES: [CompetitorProfile; 3] = [
    CompetitorProfile {
        name: "ExxonMobil",
        strategy: StrategyTag::Leader,
        capture_rate: 95.0,
        consistency: 89.0,
        intraday_frequency: IntradayFrequency::Never,
        intraday_time: None,
        spot: 0.0308,
        up_percentage: 95.0,
        down_percentage: 94.8,
        large_movements: 0,
        position: "#1",
        responsiveness: "Fast",
        consistency_label: "High",
        market_response: 0.95,
        response_noise: 0.02,
        capture_base: 85.0,
        capture_span: 25.0,
        regimes: &[CaptureRegime { until_day: usize::MAX, base_capture: 95.0, volatility: 15.0 }],
        lag_days: 0,
    },
    CompetitorProfile {
        name: "Valero",
        strategy: StrategyTag::Follower,
        capture_rate: 90.0,
        consistency: 82.0,
        intraday_frequency: IntradayFrequency::Rarely,
        intraday_time: Some("1:00 PM"),
        spot: 0.0285,
        up_percentage: 90.2,
        down_percentage: 89.8,
        large_movements: 2,
        position: "#2-3",
        responsiveness: "Fast",
        consistency_label: "High",
        market_response: 0.85,
        response_noise: 0.03,
        capture_base: 75.0,
        capture_span: 25.0,
        regimes: &[
            CaptureRegime { until_day: 60, base_capture: 92.0, volatility: 20.0 },
            CaptureRegime { until_day: usize::MAX, base_capture: 85.0, volatility: 25.0 },
        ],
        lag_days: 1,
    },
    CompetitorProfile {
        name: "Marathon",
        strategy: StrategyTag::Position,
        capture_rate: 83.9,
        consistency: 75.0,
        intraday_frequency: IntradayFrequency::Frequently,
        intraday_time: Some("11:00 AM"),
        spot: 0.0262,
        up_percentage: 83.9,
        down_percentage: 84.1,
        large_movements: 5,
        position: "#2-4",
        responsiveness: "Moderate",
        consistency_label: "Medium",
        market_response: 0.7,
        response_noise: 0.05,
        capture_base: 70.0,
        capture_span: 60.0,
        regimes: &[
            CaptureRegime { until_day: 60, base_capture: 90.0, volatility: 20.0 },
            CaptureRegime { until_day: 75, base_capture: 65.0, volatility: 40.0 },
            CaptureRegime { until_day: usize::MAX, base_capture: 80.0, volatility: 30.0 },
        ],
        lag_days: 1,
    },
];

pub fn profile_for(name: &str) -> Option<&'static CompetitorProfile> {
    PROFILES.iter().find(|profile| profile.name == name)
}
