use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::series::{ChartPoint, PricePoint, RawPricePoint};

/// Most recent calendar days kept in a daily chart series.
pub const DAILY_BUCKET_LIMIT: usize = 7;

/// Turns raw price history into chart-ready daily points.
///
/// The core computes all the numbers — the frontend only renders.
pub struct ChartService;

impl ChartService {
    pub fn new() -> Self {
        Self
    }

    /// Flatten raw history samples into normalized points, in input
    /// order. Samples that can't chart (unreadable timestamps,
    /// non-finite or negative prices) are skipped, never errors.
    pub fn normalize_points(&self, raw: Vec<RawPricePoint>) -> Vec<PricePoint> {
        raw.into_iter().filter_map(RawPricePoint::normalize).collect()
    }

    /// Collapse a price series into at most [`DAILY_BUCKET_LIMIT`]
    /// daily points, day-ascending.
    ///
    /// Days are UTC calendar days of the sample timestamps. Within a
    /// day the sample with the greatest timestamp wins (the later one
    /// in input order on an exact tie). When the series spans more
    /// days than the limit, the oldest days are dropped. Days with no
    /// samples simply don't appear; the output is never padded, and an
    /// empty series yields an empty chart.
    pub fn bucketize_daily(&self, points: &[PricePoint]) -> Vec<ChartPoint> {
        let mut latest_per_day: BTreeMap<NaiveDate, PricePoint> = BTreeMap::new();

        for point in points {
            let Some(day) = point.utc_day() else {
                continue;
            };
            latest_per_day
                .entry(day)
                .and_modify(|kept| {
                    if point.timestamp_ms >= kept.timestamp_ms {
                        *kept = *point;
                    }
                })
                .or_insert(*point);
        }

        let drop = latest_per_day.len().saturating_sub(DAILY_BUCKET_LIMIT);
        latest_per_day
            .into_iter()
            .skip(drop)
            .map(|(day, point)| ChartPoint::for_day(day, point.price))
            .collect()
    }

    /// Convenience: normalize and bucketize in one step.
    pub fn daily_chart(&self, raw: Vec<RawPricePoint>) -> Vec<ChartPoint> {
        let points = self.normalize_points(raw);
        self.bucketize_daily(&points)
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}
