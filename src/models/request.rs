//! Help request model.
//!
//! A request is a call by one household for a fixed amount of help hours,
//! to be delivered on some date inside a half-open time window.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::HouseholdId;

/// Request identifier.
pub type RequestId = u64;

/// Urgency of a request.
///
/// Ordered `Low < Medium < High`. Only the baseline planner looks at it;
/// the genetic optimizer processes requests in input order.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Urgency {
    /// Can wait.
    Low,
    /// Default urgency.
    #[default]
    Medium,
    /// Needs attention first.
    High,
}

/// Half-open date window `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Window start (inclusive).
    pub start: DateTime<Utc>,
    /// Window end (exclusive).
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Creates a new window.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Window length. Zero or negative for empty/inverted windows.
    #[inline]
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Whether the window contains no instant (`end <= start`).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Whether a date falls within `[start, end)`.
    #[inline]
    pub fn contains(&self, date: DateTime<Utc>) -> bool {
        date >= self.start && date < self.end
    }

    /// Draws a date uniformly (millisecond resolution) inside the window.
    ///
    /// Empty or inverted windows yield `start`.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> DateTime<Utc> {
        let span_ms = self.duration().num_milliseconds();
        if span_ms <= 0 {
            return self.start;
        }
        self.start + Duration::milliseconds(rng.random_range(0..span_ms))
    }

    /// Midpoint of the window. Empty or inverted windows yield `start`.
    pub fn midpoint(&self) -> DateTime<Utc> {
        let span_ms = self.duration().num_milliseconds();
        if span_ms <= 0 {
            return self.start;
        }
        self.start + Duration::milliseconds(span_ms / 2)
    }
}

/// A time-bounded request for help.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    /// Unique request identifier.
    pub id: RequestId,
    /// Household asking for help.
    pub household_id: HouseholdId,
    /// Free-form task tag (e.g. "SOWING", "HARVEST").
    pub task_type: String,
    /// Estimated hours of help needed.
    pub estimated_hours: f64,
    /// Urgency level.
    #[serde(default)]
    pub urgency: Urgency,
    /// Window the help must fall within.
    pub window: TimeWindow,
}

impl Request {
    /// Creates a request.
    pub fn new(
        id: RequestId,
        household_id: HouseholdId,
        task_type: impl Into<String>,
        estimated_hours: f64,
        window: TimeWindow,
    ) -> Self {
        Self {
            id,
            household_id,
            task_type: task_type.into(),
            estimated_hours,
            urgency: Urgency::Medium,
            window,
        }
    }

    /// Sets the urgency.
    pub fn with_urgency(mut self, urgency: Urgency) -> Self {
        self.urgency = urgency;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_urgency_order() {
        assert!(Urgency::Low < Urgency::Medium);
        assert!(Urgency::Medium < Urgency::High);
    }

    #[test]
    fn test_window_contains_half_open() {
        let w = TimeWindow::new(day(1), day(2));
        assert!(w.contains(day(1)));
        assert!(!w.contains(day(2)));
        assert!(!w.is_empty());
    }

    #[test]
    fn test_window_sample_inside() {
        let w = TimeWindow::new(day(1), day(8));
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..200 {
            assert!(w.contains(w.sample(&mut rng)));
        }
    }

    #[test]
    fn test_window_degenerate_uses_start() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let empty = TimeWindow::new(day(3), day(3));
        let inverted = TimeWindow::new(day(5), day(2));
        assert!(empty.is_empty());
        assert!(inverted.is_empty());
        assert_eq!(empty.sample(&mut rng), day(3));
        assert_eq!(inverted.sample(&mut rng), day(5));
        assert_eq!(inverted.midpoint(), day(5));
    }

    #[test]
    fn test_window_midpoint() {
        let w = TimeWindow::new(day(1), day(3));
        assert_eq!(w.midpoint(), day(2));
    }

    #[test]
    fn test_request_wire_shape() {
        let json = r#"{
            "id": 4,
            "householdId": 2,
            "taskType": "HARVEST",
            "estimatedHours": 6,
            "urgency": "HIGH",
            "window": {"start": "2025-03-01T00:00:00Z", "end": "2025-03-02T00:00:00Z"}
        }"#;
        let r: Request = serde_json::from_str(json).unwrap();
        assert_eq!(r.id, 4);
        assert_eq!(r.household_id, 2);
        assert_eq!(r.urgency, Urgency::High);
        assert!((r.estimated_hours - 6.0).abs() < 1e-10);
        assert_eq!(r.window.start, day(1));
    }
}
