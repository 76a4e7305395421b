use serde::Serialize;

use crate::engine::policy::{ABSENCE_POLICY_V1, RiskThresholds};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Safe,
    Warning,
    Danger,
}

impl RiskLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Safe => "safe",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Safe => "Within safe range",
            Self::Warning => "Needs attention",
            Self::Danger => "Close to the limit",
        }
    }
}

impl RiskThresholds {
    pub fn classify_percent(self, percent: f64) -> RiskLevel {
        if percent < self.warning_percent {
            RiskLevel::Safe
        } else if percent < self.danger_percent {
            RiskLevel::Warning
        } else {
            RiskLevel::Danger
        }
    }

    pub fn classify(self, used: i64, max: i64) -> RiskLevel {
        self.classify_percent(usage_percent(used, max))
    }
}

/// Unrounded, unclamped `used / max * 100`; zero when `max` is zero.
pub fn usage_percent(used: i64, max: i64) -> f64 {
    if max == 0 {
        return 0.0;
    }
    (used as f64 * 100.0) / max as f64
}

/// Progress-bar value: rounded and capped at 100.
pub fn display_percentage(used: i64, max: i64) -> u32 {
    let rounded = usage_percent(used, max).round().clamp(0.0, 100.0);
    rounded as u32
}

/// Classifies with the default 70/90 thresholds. Values past 100% stay danger.
pub fn classify_risk(used: i64, max: i64) -> RiskLevel {
    ABSENCE_POLICY_V1.thresholds.classify(used, max)
}

#[cfg(test)]
mod tests {
    use super::{RiskLevel, classify_risk, display_percentage, usage_percent};

    #[test]
    fn band_boundaries_follow_unrounded_ratio() {
        assert_eq!(classify_risk(0, 180), RiskLevel::Safe);
        assert_eq!(classify_risk(125, 180), RiskLevel::Safe);
        assert_eq!(classify_risk(126, 180), RiskLevel::Warning);
        assert_eq!(classify_risk(161, 180), RiskLevel::Warning);
        assert_eq!(classify_risk(162, 180), RiskLevel::Danger);
        assert_eq!(classify_risk(400, 180), RiskLevel::Danger);
    }

    #[test]
    fn display_clamps_but_classification_does_not() {
        assert_eq!(display_percentage(460, 450), 100);
        assert!(usage_percent(460, 450) > 100.0);
        assert_eq!(classify_risk(460, 450), RiskLevel::Danger);
        assert_eq!(display_percentage(125, 180), 69);
        assert_eq!(display_percentage(1, 3), 33);
    }

    #[test]
    fn zero_cap_reads_as_zero_percent() {
        assert_eq!(usage_percent(10, 0), 0.0);
        assert_eq!(display_percentage(10, 0), 0);
        assert_eq!(classify_risk(10, 0), RiskLevel::Safe);
    }

    #[test]
    fn levels_order_by_severity() {
        assert!(RiskLevel::Safe < RiskLevel::Warning);
        assert!(RiskLevel::Warning < RiskLevel::Danger);
        assert_eq!(RiskLevel::Safe.max(RiskLevel::Danger), RiskLevel::Danger);
    }
}
