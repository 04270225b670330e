//! Synthetic 24-hour latency trend.
//!
//! The trend is cosmetic: a random walk around the measured ping time so the
//! chart has something to show. It is never persisted as measured data.

use chrono::{DateTime, Duration, Local, Timelike, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::{
    DEFAULT_BASE_LATENCY_MS, LATENCY_JITTER_MS, LATENCY_TREND_POINTS, MIN_TREND_LATENCY_MS,
};
use crate::providers::ProbeResult;

/// One hourly point of the trend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatencyPoint {
    /// Local hour label, `"H:00"`.
    pub time: String,
    pub latency: u64,
    pub timestamp: DateTime<Utc>,
}

/// Base latency for the trend: the probe's ping time, or the default when
/// there is none or it is zero.
pub fn trend_base(probe: Option<&ProbeResult>) -> f64 {
    probe
        .and_then(|p| p.ping_time)
        .filter(|&ms| ms > 0)
        .unwrap_or(DEFAULT_BASE_LATENCY_MS) as f64
}

/// Generates 24 hourly points, oldest first, ending at `now`.
pub fn generate_latency_trend<R: Rng + ?Sized>(
    base_ms: f64,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<LatencyPoint> {
    (0..LATENCY_TREND_POINTS)
        .rev()
        .map(|hours_ago| {
            let timestamp = now - Duration::hours(hours_ago as i64);
            let jitter = rng.random_range(-LATENCY_JITTER_MS..LATENCY_JITTER_MS);
            let latency = (base_ms + jitter).max(MIN_TREND_LATENCY_MS).round() as u64;
            LatencyPoint {
                time: format!("{}:00", timestamp.with_timezone(&Local).hour()),
                latency,
                timestamp,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::ProbeStatus;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_trend_has_24_ordered_points() {
        let now = Utc::now();
        let mut rng = StdRng::seed_from_u64(7);
        let trend = generate_latency_trend(50.0, now, &mut rng);
        assert_eq!(trend.len(), 24);
        assert_eq!(trend[23].timestamp, now);
        assert_eq!(trend[0].timestamp, now - Duration::hours(23));
        assert!(trend.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
    }

    #[test]
    fn test_trend_stays_within_jitter() {
        let mut rng = StdRng::seed_from_u64(42);
        for point in generate_latency_trend(100.0, Utc::now(), &mut rng) {
            assert!((90..=110).contains(&point.latency), "{}", point.latency);
            assert!(point.time.ends_with(":00"));
        }
    }

    #[test]
    fn test_trend_floor_is_one() {
        let mut rng = StdRng::seed_from_u64(3);
        for point in generate_latency_trend(0.0, Utc::now(), &mut rng) {
            assert!(point.latency >= 1);
        }
    }

    #[test]
    fn test_trend_base_defaults_to_50() {
        assert_eq!(trend_base(None), 50.0);
    }

    #[test]
    fn test_trend_base_ignores_zero_ping() {
        let mut probe = ProbeResult {
            hostname: None,
            ip: Some("10.0.0.1".into()),
            ping_time: Some(0),
            status: ProbeStatus::Up,
            data_source: None,
            note: None,
        };
        assert_eq!(trend_base(Some(&probe)), 50.0);
        probe.ping_time = Some(18);
        assert_eq!(trend_base(Some(&probe)), 18.0);
    }

    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_trend_always_24_points_at_least_one(base in 0.0f64..5000.0, seed in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            let trend = generate_latency_trend(base, Utc::now(), &mut rng);
            prop_assert_eq!(trend.len(), 24);
            prop_assert!(trend.iter().all(|p| p.latency >= 1));
        }
    }
}
