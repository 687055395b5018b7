//! Progress dashboard data
//!
//! Fixed sample statistics rendered by the progress views. Nothing here is
//! computed from user activity.

use serde::Serialize;

/// One skin measurement sample, scores 0-100
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SkinSample {
    pub day: &'static str,
    pub hydration: u32,
    pub clarity: u32,
    pub radiance: u32,
    pub texture: u32,
}

/// Routine completion for one week, percent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeeklyCompletion {
    pub week: &'static str,
    pub completion: u32,
}

/// Skin metric shown on the overview cards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Hydration,
    Clarity,
    Radiance,
    Texture,
}

impl Metric {
    pub fn all() -> &'static [Metric] {
        &[
            Metric::Hydration,
            Metric::Clarity,
            Metric::Radiance,
            Metric::Texture,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Metric::Hydration => "Hydration",
            Metric::Clarity => "Clarity",
            Metric::Radiance => "Radiance",
            Metric::Texture => "Texture",
        }
    }

    /// Read this metric from a sample
    pub fn value(&self, sample: &SkinSample) -> u32 {
        match self {
            Metric::Hydration => sample.hydration,
            Metric::Clarity => sample.clarity,
            Metric::Radiance => sample.radiance,
            Metric::Texture => sample.texture,
        }
    }
}

pub const SKIN_SAMPLES: [SkinSample; 5] = [
    SkinSample {
        day: "Day 1",
        hydration: 60,
        clarity: 55,
        radiance: 50,
        texture: 52,
    },
    SkinSample {
        day: "Day 7",
        hydration: 68,
        clarity: 62,
        radiance: 60,
        texture: 65,
    },
    SkinSample {
        day: "Day 14",
        hydration: 75,
        clarity: 70,
        radiance: 72,
        texture: 75,
    },
    SkinSample {
        day: "Day 21",
        hydration: 80,
        clarity: 78,
        radiance: 82,
        texture: 85,
    },
    SkinSample {
        day: "Day 28",
        hydration: 85,
        clarity: 85,
        radiance: 88,
        texture: 90,
    },
];

pub const WEEKLY_COMPLETION: [WeeklyCompletion; 4] = [
    WeeklyCompletion {
        week: "Week 1",
        completion: 65,
    },
    WeeklyCompletion {
        week: "Week 2",
        completion: 72,
    },
    WeeklyCompletion {
        week: "Week 3",
        completion: 85,
    },
    WeeklyCompletion {
        week: "Week 4",
        completion: 92,
    },
];

pub const INSIGHTS: [&str; 3] = [
    "Consistency is key! You've improved routine completion by 27% this month.",
    "Your skin's hydration level shows the most improvement - keep using that hydrating serum!",
    "Continue your evening routine for best results - your texture improved 40% since week 1.",
];

/// Change from the first to the last sample, in points
pub fn improvement(metric: Metric) -> i64 {
    let first = SKIN_SAMPLES.first().map(|s| metric.value(s)).unwrap_or(0);
    let last = SKIN_SAMPLES.last().map(|s| metric.value(s)).unwrap_or(0);
    i64::from(last) - i64::from(first)
}

/// Signed label for an overview card, e.g. "+25%"
pub fn improvement_label(metric: Metric) -> String {
    format!("{:+}%", improvement(metric))
}

/// CSS width for a percentage, clamped to 0-100
pub fn width(percent: f64) -> String {
    let clamped = if percent.is_nan() { 0.0 } else { percent.clamp(0.0, 100.0) };
    format!("{}%", clamped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_improvements() {
        let got: Vec<_> = Metric::all().iter().map(|m| improvement(*m)).collect();
        assert_eq!(got, vec![25, 30, 38, 38]);
        assert_eq!(improvement_label(Metric::Hydration), "+25%");
    }

    #[test]
    fn test_width_clamps() {
        assert_eq!(width(40.0), "40%");
        assert_eq!(width(-5.0), "0%");
        assert_eq!(width(140.0), "100%");
        assert_eq!(width(f64::NAN), "0%");
    }

    #[test]
    fn test_sample_shapes() {
        assert_eq!(SKIN_SAMPLES[2].day, "Day 14");
        assert_eq!(WEEKLY_COMPLETION.last().unwrap().completion, 92);
        assert!(INSIGHTS[1].contains("hydration"));
    }
}
