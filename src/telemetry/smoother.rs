//! Bandwidth smoothing window.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::message::BandwidthSample;
use crate::config::{MAX_BANDWIDTH_POINTS, SMOOTHING_WINDOW};

/// A smoothed chart point in KB/s.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandwidthPoint {
    pub timestamp: DateTime<Utc>,
    pub download_kbps: u64,
    pub upload_kbps: u64,
}

/// Keeps the most recent smoothed points.
///
/// Each new point is averaged with the raw values of the previous two samples
/// once three are available. Averaging always uses raw samples, never
/// already-smoothed points.
#[derive(Debug, Clone)]
pub struct BandwidthSmoother {
    points: VecDeque<BandwidthPoint>,
    raw: VecDeque<(u64, u64)>,
    current: Option<BandwidthSample>,
    capacity: usize,
}

impl Default for BandwidthSmoother {
    fn default() -> Self {
        Self::new()
    }
}

fn to_kbps(bytes_per_sec: f64) -> u64 {
    if !bytes_per_sec.is_finite() || bytes_per_sec <= 0.0 {
        return 0;
    }
    (bytes_per_sec / 1024.0).round() as u64
}

fn mean_rounded(values: impl Iterator<Item = u64>, count: usize) -> u64 {
    let sum: u64 = values.sum();
    (sum as f64 / count as f64).round() as u64
}

impl BandwidthSmoother {
    pub fn new() -> Self {
        Self::with_capacity(MAX_BANDWIDTH_POINTS)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity),
            raw: VecDeque::with_capacity(SMOOTHING_WINDOW),
            current: None,
            capacity: capacity.max(1),
        }
    }

    /// Adds a sample and returns the point stored for it.
    pub fn push(&mut self, sample: BandwidthSample) -> &BandwidthPoint {
        let download = to_kbps(sample.download_speed);
        let upload = to_kbps(sample.upload_speed);

        self.raw.push_back((download, upload));
        if self.raw.len() > SMOOTHING_WINDOW {
            self.raw.pop_front();
        }

        let (download_kbps, upload_kbps) = if self.raw.len() >= SMOOTHING_WINDOW {
            (
                mean_rounded(self.raw.iter().map(|(d, _)| *d), self.raw.len()),
                mean_rounded(self.raw.iter().map(|(_, u)| *u), self.raw.len()),
            )
        } else {
            (download, upload)
        };

        if self.points.len() == self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(BandwidthPoint {
            timestamp: sample.timestamp,
            download_kbps,
            upload_kbps,
        });
        self.current = Some(sample);

        // Non-empty: a point was just pushed.
        &self.points[self.points.len() - 1]
    }

    pub fn points(&self) -> impl Iterator<Item = &BandwidthPoint> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Latest unsmoothed sample.
    pub fn current(&self) -> Option<&BandwidthSample> {
        self.current.as_ref()
    }

    pub fn peak_download_kbps(&self) -> u64 {
        self.points.iter().map(|p| p.download_kbps).max().unwrap_or(0)
    }

    pub fn peak_upload_kbps(&self) -> u64 {
        self.points.iter().map(|p| p.upload_kbps).max().unwrap_or(0)
    }
}
