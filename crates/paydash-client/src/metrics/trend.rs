use serde::Serialize;

const FLAT: &str = "0%";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
}

impl TrendDirection {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

/// A signed month-over-month percentage such as `+12.5%`, with its direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Trend {
    pub value: String,
    pub direction: TrendDirection,
}

impl Trend {
    /// Compares two period totals. A zero baseline reads `+100%` when the
    /// current period has anything and `0%` otherwise.
    pub fn between(current: f64, previous: f64) -> Self {
        if previous == 0.0 {
            if current > 0.0 {
                return Self::from_value("+100%".to_string());
            }
            return Self::flat();
        }

        let diff = ((current - previous) / previous) * 100.0;
        let sign = if diff >= 0.0 { "+" } else { "" };
        Self::from_value(format!("{sign}{diff:.1}%"))
    }

    pub fn flat() -> Self {
        Self::from_value(FLAT.to_string())
    }

    /// Reuses this trend for a companion figure, or `0%` when that figure
    /// has no positive magnitude.
    pub fn mirror(&self, magnitude: f64) -> Self {
        if magnitude > 0.0 {
            return self.clone();
        }
        Self::flat()
    }

    fn from_value(value: String) -> Self {
        let direction = if value.starts_with('+') {
            TrendDirection::Up
        } else {
            TrendDirection::Down
        };
        Self { value, direction }
    }
}

#[cfg(test)]
mod tests {
    use super::{Trend, TrendDirection};

    #[test]
    fn growth_over_previous_month_is_signed_with_one_decimal() {
        let trend = Trend::between(150.0, 100.0);
        assert_eq!(trend.value, "+50.0%");
        assert_eq!(trend.direction, TrendDirection::Up);
    }

    #[test]
    fn decline_keeps_minus_sign_and_points_down() {
        let trend = Trend::between(40.0, 160.0);
        assert_eq!(trend.value, "-75.0%");
        assert_eq!(trend.direction, TrendDirection::Down);
    }

    #[test]
    fn unchanged_totals_read_as_positive_zero() {
        let trend = Trend::between(80.0, 80.0);
        assert_eq!(trend.value, "+0.0%");
        assert_eq!(trend.direction, TrendDirection::Up);
    }

    #[test]
    fn zero_baseline_is_special_cased() {
        assert_eq!(Trend::between(10.0, 0.0).value, "+100%");
        assert_eq!(Trend::between(0.0, 0.0).value, "0%");
        assert_eq!(Trend::between(0.0, 0.0).direction, TrendDirection::Down);
    }

    #[test]
    fn mirror_copies_only_for_positive_magnitude() {
        let revenue = Trend::between(150.0, 100.0);
        assert_eq!(revenue.mirror(1.0), revenue);
        assert_eq!(revenue.mirror(0.0), Trend::flat());
        assert_eq!(revenue.mirror(-5.0), Trend::flat());
    }
}
