//! The statistic model: eight bounded city attributes.
//!
//! RULE: Every statistic has a fixed [min, max] range. Arithmetic may push
//! a value outside it, but normalization always pulls it back before the
//! value is displayed or used for event eligibility.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    Money,
    Population,
    Happiness,
    Economy,
    Environment,
    Security,
    Education,
    Unemployment,
}

impl Stat {
    /// Fixed normalization order. Never reorder: snapshots list stats this way.
    pub const ALL: [Stat; 8] = [
        Stat::Money,
        Stat::Population,
        Stat::Happiness,
        Stat::Economy,
        Stat::Environment,
        Stat::Security,
        Stat::Education,
        Stat::Unemployment,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::Money        => "money",
            Self::Population   => "population",
            Self::Happiness    => "happiness",
            Self::Economy      => "economy",
            Self::Environment  => "environment",
            Self::Security     => "security",
            Self::Education    => "education",
            Self::Unemployment => "unemployment",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }

    /// Inclusive clamp range.
    pub fn bounds(&self) -> (f64, f64) {
        match self {
            Self::Money        => (0.0, 240.0),
            Self::Population   => (10.0, 200.0),
            Self::Unemployment => (2.0, 30.0),
            _                  => (10.0, 100.0),
        }
    }

    pub fn clamp_value(&self, value: f64) -> f64 {
        let (min, max) = self.bounds();
        value.clamp(min, max)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Money        => "財政 (億)",
            Self::Population   => "人口 (万人)",
            Self::Happiness    => "満足度",
            Self::Economy      => "経済力",
            Self::Environment  => "環境",
            Self::Security     => "治安",
            Self::Education    => "教育",
            Self::Unemployment => "失業率",
        }
    }

    /// Label without the unit suffix, used in effect summaries.
    pub fn short_label(&self) -> &'static str {
        let label = self.label();
        label.split_whitespace().next().unwrap_or(label)
    }

    /// Full-bar value for display. Differs from the clamp max for money.
    pub fn display_max(&self) -> f64 {
        match self {
            Self::Money | Self::Population => 200.0,
            Self::Unemployment             => 30.0,
            _                              => 100.0,
        }
    }

    /// Lower is better (only unemployment).
    pub fn inverted(&self) -> bool {
        matches!(self, Self::Unemployment)
    }

    fn format_rounded(&self, rounded: f64) -> String {
        match self {
            Self::Unemployment => format!("{rounded:.0}%"),
            _                  => format!("{rounded:.0}"),
        }
    }
}

/// The eight statistic values of a city.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CityStats {
    pub money:        f64,
    pub population:   f64,
    pub happiness:    f64,
    pub economy:      f64,
    pub environment:  f64,
    pub security:     f64,
    pub education:    f64,
    pub unemployment: f64,
}

impl CityStats {
    pub fn get(&self, stat: Stat) -> f64 {
        match stat {
            Stat::Money        => self.money,
            Stat::Population   => self.population,
            Stat::Happiness    => self.happiness,
            Stat::Economy      => self.economy,
            Stat::Environment  => self.environment,
            Stat::Security     => self.security,
            Stat::Education    => self.education,
            Stat::Unemployment => self.unemployment,
        }
    }

    pub fn get_mut(&mut self, stat: Stat) -> &mut f64 {
        match stat {
            Stat::Money        => &mut self.money,
            Stat::Population   => &mut self.population,
            Stat::Happiness    => &mut self.happiness,
            Stat::Economy      => &mut self.economy,
            Stat::Environment  => &mut self.environment,
            Stat::Security     => &mut self.security,
            Stat::Education    => &mut self.education,
            Stat::Unemployment => &mut self.unemployment,
        }
    }

    pub fn set(&mut self, stat: Stat, value: f64) {
        *self.get_mut(stat) = value;
    }

    pub fn in_bounds(&self) -> bool {
        Stat::ALL.iter().all(|s| {
            let (min, max) = s.bounds();
            (min..=max).contains(&self.get(*s))
        })
    }
}

impl Default for CityStats {
    fn default() -> Self {
        Self {
            money:        120.0,
            population:   50.0,
            happiness:    60.0,
            economy:      55.0,
            environment:  70.0,
            security:     65.0,
            education:    50.0,
            unemployment: 12.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    Danger,
    Warning,
    Good,
}

/// A single statistic prepared for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatReading {
    pub stat:  Stat,
    pub label: &'static str,
    pub value: f64,
    pub text:  String,
    /// Bar fill in [0, 1]; already flipped for inverted stats.
    pub fill:  f64,
    pub band:  Band,
}

impl StatReading {
    pub fn read(stat: Stat, value: f64) -> Self {
        let rounded = value.round();
        let ratio = (rounded / stat.display_max()).clamp(0.0, 1.0);
        let (fill, band) = if stat.inverted() {
            let band = if ratio > 0.55 {
                Band::Danger
            } else if ratio > 0.35 {
                Band::Warning
            } else {
                Band::Good
            };
            (1.0 - ratio, band)
        } else {
            let band = if ratio < 0.35 {
                Band::Danger
            } else if ratio < 0.6 {
                Band::Warning
            } else {
                Band::Good
            };
            (ratio, band)
        };
        Self {
            stat,
            label: stat.label(),
            value,
            text: stat.format_rounded(rounded),
            fill,
            band,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip_for_every_stat() {
        for stat in Stat::ALL {
            assert_eq!(Stat::from_key(stat.key()), Some(stat));
        }
        assert_eq!(Stat::from_key("year"), None);
        assert_eq!(Stat::from_key("Money"), None);
    }

    #[test]
    fn short_label_drops_unit() {
        assert_eq!(Stat::Money.short_label(), "財政");
        assert_eq!(Stat::Population.short_label(), "人口");
        assert_eq!(Stat::Happiness.short_label(), "満足度");
    }

    #[test]
    fn unemployment_reads_as_percent_and_inverted() {
        let low = StatReading::read(Stat::Unemployment, 6.4);
        assert_eq!(low.text, "6%");
        assert_eq!(low.band, Band::Good);
        assert!((low.fill - 0.8).abs() < 1e-9);

        let high = StatReading::read(Stat::Unemployment, 20.0);
        assert_eq!(high.band, Band::Danger);
    }

    #[test]
    fn money_band_uses_display_max_not_clamp_max() {
        // 230 rounds past the 200 display max; the bar is simply full.
        let rich = StatReading::read(Stat::Money, 230.0);
        assert_eq!(rich.text, "230");
        assert_eq!(rich.fill, 1.0);
        assert_eq!(rich.band, Band::Good);

        let poor = StatReading::read(Stat::Money, 60.0);
        assert_eq!(poor.band, Band::Danger);

        let middling = StatReading::read(Stat::Money, 100.0);
        assert_eq!(middling.band, Band::Warning);
    }

    #[test]
    fn clamp_value_pins_to_each_range() {
        assert_eq!(Stat::Population.clamp_value(5.0), 10.0);
        assert_eq!(Stat::Money.clamp_value(300.0), 240.0);
        assert_eq!(Stat::Unemployment.clamp_value(1.0), 2.0);
        assert_eq!(Stat::Security.clamp_value(64.5), 64.5);
    }

    #[test]
    fn default_stats_are_in_bounds() {
        assert!(CityStats::default().in_bounds());
    }
}
