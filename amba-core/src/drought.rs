use serde::Serialize;
use std::fmt;

/// Monthly precipitation considered normal, in mm.
pub const BASELINE_PRECIPITATION_MM: f64 = 50.0;
/// Temperature considered normal, in °C.
pub const BASELINE_TEMPERATURE_C: f64 = 25.0;

/// Simplified drought score in `[0, 1]` from precipitation deficit and heat excess.
pub fn compute_drought_index(precipitation: f64, temperature: f64) -> f64 {
    let deficit = (BASELINE_PRECIPITATION_MM - precipitation).max(0.0) / BASELINE_PRECIPITATION_MM;
    let excess = (temperature - BASELINE_TEMPERATURE_C).max(0.0) / BASELINE_TEMPERATURE_C;

    ((deficit + excess) / 2.0).min(1.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DroughtRisk {
    Normal,
    AtRisk,
}

impl DroughtRisk {
    pub const THRESHOLD: f64 = 0.5;

    pub fn classify(index: f64) -> Self {
        if index > Self::THRESHOLD { DroughtRisk::AtRisk } else { DroughtRisk::Normal }
    }
}

impl fmt::Display for DroughtRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DroughtRisk::Normal => f.write_str("Normal"),
            DroughtRisk::AtRisk => f.write_str("Drought Risk"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_values() {
        assert_eq!(compute_drought_index(50.0, 25.0), 0.0);
        assert_eq!(compute_drought_index(0.0, 25.0), 0.5);
        assert_eq!(compute_drought_index(0.0, 50.0), 1.0);
    }

    #[test]
    fn clamped_to_unit_interval() {
        for p in [-100.0, 0.0, 12.8, 45.2, 50.0, 500.0] {
            for t in [-40.0, 0.0, 24.8, 32.1, 60.0, 200.0] {
                let idx = compute_drought_index(p, t);
                assert!((0.0..=1.0).contains(&idx), "p={p} t={t} -> {idx}");
            }
        }
    }

    #[test]
    fn wet_and_cool_is_never_at_risk() {
        assert_eq!(compute_drought_index(78.5, 24.8), 0.0);
        assert_eq!(DroughtRisk::classify(0.0), DroughtRisk::Normal);
    }

    #[test]
    fn classification_threshold_is_exclusive() {
        assert_eq!(DroughtRisk::classify(0.5), DroughtRisk::Normal);
        assert_eq!(DroughtRisk::classify(0.51), DroughtRisk::AtRisk);
        assert_eq!(DroughtRisk::AtRisk.to_string(), "Drought Risk");
    }
}
