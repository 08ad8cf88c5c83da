//! Categorization bands
//!
//! The default table below is the single canonical banding used when no
//! configuration overrides it. Bands are evaluated top to bottom and the first
//! band whose bounds contain the nation's levels wins. Lower bounds are
//! inclusive, upper bounds exclusive.

use serde::{Deserialize, Serialize};

use crate::core::types::{Priority, LOWEST_PRIORITY};
use crate::model::slots::SlotAllocation;

/// Technology at or above which a nation buys tech with cash
pub const HIGH_TECH_THRESHOLD: f64 = 1000.0;

/// Infrastructure below which a nation is a cash receiver
pub const LOW_INFRA_THRESHOLD: f64 = 1000.0;

/// Infrastructure at or above which a low-tech nation sells tech
pub const HIGH_INFRA_THRESHOLD: f64 = 3000.0;

/// Technology below which a high-infra nation counts as low-tech
pub const LOW_TECH_THRESHOLD: f64 = 300.0;

/// Slot counts and priorities handed out by a band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotTemplate {
    pub send_cash: u8,
    pub send_tech: u8,
    pub get_cash: u8,
    pub get_tech: u8,
    pub send_priority: Priority,
    pub receive_priority: Priority,
}

impl Default for SlotTemplate {
    fn default() -> Self {
        Self {
            send_cash: 0,
            send_tech: 0,
            get_cash: 0,
            get_tech: 0,
            send_priority: LOWEST_PRIORITY,
            receive_priority: LOWEST_PRIORITY,
        }
    }
}

impl SlotTemplate {
    pub fn total(&self) -> u32 {
        self.send_cash as u32 + self.send_tech as u32 + self.get_cash as u32 + self.get_tech as u32
    }

    /// Computed allocations never carry external slots; those are operator-set
    pub fn to_allocation(&self) -> SlotAllocation {
        SlotAllocation {
            send_cash: self.send_cash,
            send_tech: self.send_tech,
            get_cash: self.get_cash,
            get_tech: self.get_tech,
            send_priority: self.send_priority,
            receive_priority: self.receive_priority,
            external: 0,
        }
    }
}

/// One row of the banding table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub name: String,
    #[serde(default)]
    pub min_tech: Option<f64>,
    #[serde(default)]
    pub max_tech: Option<f64>,
    #[serde(default)]
    pub min_infra: Option<f64>,
    #[serde(default)]
    pub max_infra: Option<f64>,
    /// Template for nations at the standard slot ceiling
    pub standard: SlotTemplate,
    /// Template for nations with expanded capacity
    pub expanded: SlotTemplate,
}

impl Band {
    pub fn matches(&self, tech: f64, infra: f64) -> bool {
        within(tech, self.min_tech, self.max_tech) && within(infra, self.min_infra, self.max_infra)
    }

    pub fn template(&self, expanded: bool) -> &SlotTemplate {
        if expanded {
            &self.expanded
        } else {
            &self.standard
        }
    }
}

fn within(value: f64, min: Option<f64>, max: Option<f64>) -> bool {
    min.map_or(true, |lo| value >= lo) && max.map_or(true, |hi| value < hi)
}

/// The canonical banding table
pub fn default_bands() -> Vec<Band> {
    vec![
        // High tech: buys technology, pays in cash
        Band {
            name: "tech_buyer".into(),
            min_tech: Some(HIGH_TECH_THRESHOLD),
            max_tech: None,
            min_infra: None,
            max_infra: None,
            standard: SlotTemplate {
                send_cash: 3,
                get_tech: 2,
                send_priority: 1,
                receive_priority: 2,
                ..Default::default()
            },
            expanded: SlotTemplate {
                send_cash: 4,
                get_tech: 2,
                send_priority: 1,
                receive_priority: 2,
                ..Default::default()
            },
        },
        // Low infra: net cash receiver, pays back in tech
        Band {
            name: "developing".into(),
            min_tech: None,
            max_tech: None,
            min_infra: None,
            max_infra: Some(LOW_INFRA_THRESHOLD),
            standard: SlotTemplate {
                send_tech: 2,
                get_cash: 3,
                send_priority: 2,
                receive_priority: 1,
                ..Default::default()
            },
            expanded: SlotTemplate {
                send_tech: 2,
                get_cash: 4,
                send_priority: 2,
                receive_priority: 1,
                ..Default::default()
            },
        },
        // High infra, low tech: net tech seller
        Band {
            name: "tech_seller".into(),
            min_tech: None,
            max_tech: Some(LOW_TECH_THRESHOLD),
            min_infra: Some(HIGH_INFRA_THRESHOLD),
            max_infra: None,
            standard: SlotTemplate {
                send_tech: 4,
                get_cash: 1,
                send_priority: 1,
                receive_priority: 3,
                ..Default::default()
            },
            expanded: SlotTemplate {
                send_tech: 5,
                get_cash: 1,
                send_priority: 1,
                receive_priority: 3,
                ..Default::default()
            },
        },
        // Everyone else trades both ways
        Band {
            name: "balanced".into(),
            min_tech: None,
            max_tech: None,
            min_infra: None,
            max_infra: None,
            standard: SlotTemplate {
                send_cash: 1,
                send_tech: 2,
                get_cash: 2,
                send_priority: 2,
                receive_priority: 2,
                ..Default::default()
            },
            expanded: SlotTemplate {
                send_cash: 2,
                send_tech: 2,
                get_cash: 2,
                send_priority: 2,
                receive_priority: 2,
                ..Default::default()
            },
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn band_for(tech: f64, infra: f64) -> String {
        default_bands()
            .into_iter()
            .find(|b| b.matches(tech, infra))
            .map(|b| b.name)
            .unwrap_or_default()
    }

    #[test]
    fn test_high_tech_is_buyer_regardless_of_infra() {
        assert_eq!(band_for(1000.0, 200.0), "tech_buyer");
        assert_eq!(band_for(4500.0, 9000.0), "tech_buyer");
    }

    #[test]
    fn test_low_infra_is_cash_receiver() {
        assert_eq!(band_for(0.0, 0.0), "developing");
        assert_eq!(band_for(999.0, 999.99), "developing");
        let band = &default_bands()[1];
        assert!(band.standard.get_cash > band.standard.send_cash);
    }

    #[test]
    fn test_high_infra_low_tech_is_seller() {
        assert_eq!(band_for(299.0, 3000.0), "tech_seller");
        assert_eq!(band_for(300.0, 3000.0), "balanced");
        assert_eq!(band_for(100.0, 2999.0), "balanced");
    }

    #[test]
    fn test_boundaries_upper_exclusive() {
        assert_eq!(band_for(999.99, 1000.0), "balanced");
        assert_eq!(band_for(999.99, 999.99), "developing");
    }

    #[test]
    fn test_templates_fit_default_limits() {
        for band in default_bands() {
            assert!(band.standard.total() <= 5, "{} standard over limit", band.name);
            assert!(band.expanded.total() <= 6, "{} expanded over limit", band.name);
        }
    }

    #[test]
    fn test_band_parses_from_toml() {
        let band: Band = toml::from_str(
            r#"
            name = "whale"
            min_tech = 5000.0
            [standard]
            send_cash = 5
            send_priority = 1
            [expanded]
            send_cash = 6
            send_priority = 1
            "#,
        )
        .unwrap();
        assert!(band.matches(6000.0, 0.0));
        assert!(!band.matches(4999.0, 0.0));
        assert_eq!(band.standard.receive_priority, LOWEST_PRIORITY);
        assert_eq!(band.expanded.total(), 6);
    }
}
