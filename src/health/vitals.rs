//! Vital-sign range checks against species normal tables.
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Species {
    #[default]
    Cattle,
    Sheep,
    Goat,
}

/// Manually entered vitals accompanying an analysis request.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Vitals {
    pub weight_kg: Option<f32>,
    pub body_temperature_c: Option<f32>,
    pub heart_rate_bpm: Option<f32>,
    pub respiratory_rate_bpm: Option<f32>,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct VitalRange {
    pub low: f32,
    pub high: f32,
}

impl VitalRange {
    const fn new(low: f32, high: f32) -> Self {
        Self { low, high }
    }
}

/// Normal ranges for one species. Weight varies greatly with breed and age;
/// the window is intentionally wide.
#[derive(Clone, Copy, Debug)]
pub struct VitalsRanges {
    pub body_temperature_c: VitalRange,
    pub heart_rate_bpm: VitalRange,
    pub respiratory_rate_bpm: VitalRange,
    pub weight_kg: VitalRange,
}

impl VitalsRanges {
    pub fn for_species(species: Species) -> Self {
        match species {
            Species::Cattle => Self {
                body_temperature_c: VitalRange::new(38.0, 39.5),
                heart_rate_bpm: VitalRange::new(48.0, 84.0),
                respiratory_rate_bpm: VitalRange::new(10.0, 30.0),
                weight_kg: VitalRange::new(200.0, 800.0),
            },
            Species::Sheep => Self {
                body_temperature_c: VitalRange::new(38.3, 39.9),
                heart_rate_bpm: VitalRange::new(70.0, 90.0),
                respiratory_rate_bpm: VitalRange::new(12.0, 20.0),
                weight_kg: VitalRange::new(45.0, 160.0),
            },
            Species::Goat => Self {
                body_temperature_c: VitalRange::new(38.5, 40.5),
                heart_rate_bpm: VitalRange::new(70.0, 90.0),
                respiratory_rate_bpm: VitalRange::new(10.0, 30.0),
                weight_kg: VitalRange::new(20.0, 140.0),
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeStatus {
    Below,
    Within,
    Above,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct VitalCheck {
    pub name: &'static str,
    pub value: f32,
    pub range: VitalRange,
    pub status: RangeStatus,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct VitalsReport {
    pub checks: Vec<VitalCheck>,
    pub out_of_range: usize,
    pub alerts: Vec<String>,
}

/// Check each supplied vital against its species range. Missing vitals are
/// simply skipped.
pub fn assess_vitals(vitals: Option<&Vitals>, ranges: &VitalsRanges) -> VitalsReport {
    let Some(v) = vitals else {
        return VitalsReport::default();
    };

    let entries = [
        ("body_temperature_c", v.body_temperature_c, ranges.body_temperature_c),
        ("heart_rate_bpm", v.heart_rate_bpm, ranges.heart_rate_bpm),
        ("respiratory_rate_bpm", v.respiratory_rate_bpm, ranges.respiratory_rate_bpm),
        ("weight_kg", v.weight_kg, ranges.weight_kg),
    ];

    let mut report = VitalsReport::default();
    for (name, value, range) in entries {
        let Some(value) = value else { continue };
        let status = if value < range.low {
            RangeStatus::Below
        } else if value > range.high {
            RangeStatus::Above
        } else {
            RangeStatus::Within
        };
        if status != RangeStatus::Within {
            report.out_of_range += 1;
            let dir = if status == RangeStatus::Below { "below" } else { "above" };
            report.alerts.push(format!(
                "{name}: {value} is {dir} normal range ({}-{})",
                range.low, range.high
            ));
        }
        report.checks.push(VitalCheck {
            name,
            value,
            range,
            status,
        });
    }
    report
}
