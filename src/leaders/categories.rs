/// Leader category metadata and value formatting
///
/// Each stat group maps to a fixed set of leader categories. Display
/// metadata and the numeric format per category are static lookup data, not
/// derived from the upstream response.
use crate::errors::{StatsError, StatsResult};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatGroup {
    Hitting,
    Pitching,
    Fielding,
}

impl StatGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatGroup::Hitting => "hitting",
            StatGroup::Pitching => "pitching",
            StatGroup::Fielding => "fielding",
        }
    }

    pub fn parse(raw: &str) -> StatsResult<Self> {
        match raw {
            "hitting" => Ok(StatGroup::Hitting),
            "pitching" => Ok(StatGroup::Pitching),
            "fielding" => Ok(StatGroup::Fielding),
            other => Err(StatsError::validation(
                "statGroup",
                format!("expected hitting, pitching or fielding, got '{}'", other),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatType {
    Season,
    Career,
    LastMonth,
    LastWeek,
}

impl StatType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatType::Season => "season",
            StatType::Career => "career",
            StatType::LastMonth => "lastMonth",
            StatType::LastWeek => "lastWeek",
        }
    }

    pub fn parse(raw: &str) -> StatsResult<Self> {
        match raw {
            "season" => Ok(StatType::Season),
            "career" => Ok(StatType::Career),
            "lastMonth" => Ok(StatType::LastMonth),
            "lastWeek" => Ok(StatType::LastWeek),
            other => Err(StatsError::validation(
                "statType",
                format!("expected season, career, lastMonth or lastWeek, got '{}'", other),
            )),
        }
    }
}

/// Numeric presentation for a leader value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StatFormat {
    Integer,
    Decimal2,
    Decimal3,
    Percent,
}

pub struct CategoryMeta {
    pub category: &'static str,
    pub display_name: &'static str,
    pub short_name: &'static str,
    pub description: &'static str,
    pub format: StatFormat,
}

const HITTING_CATEGORIES: [CategoryMeta; 5] = [
    CategoryMeta {
        category: "homeRuns",
        display_name: "Home Runs",
        short_name: "HR",
        description: "Balls hit over the fence in fair territory",
        format: StatFormat::Integer,
    },
    CategoryMeta {
        category: "battingAverage",
        display_name: "Batting Average",
        short_name: "AVG",
        description: "Hits divided by at-bats",
        format: StatFormat::Decimal3,
    },
    CategoryMeta {
        category: "onBasePlusSlugging",
        display_name: "On-Base Plus Slugging",
        short_name: "OPS",
        description: "On-base percentage plus slugging percentage",
        format: StatFormat::Decimal3,
    },
    CategoryMeta {
        category: "runs",
        display_name: "Runs",
        short_name: "R",
        description: "Times reaching home plate safely",
        format: StatFormat::Integer,
    },
    CategoryMeta {
        category: "rbi",
        display_name: "Runs Batted In",
        short_name: "RBI",
        description: "Runs scored as a result of the batter's plate appearance",
        format: StatFormat::Integer,
    },
];

const PITCHING_CATEGORIES: [CategoryMeta; 5] = [
    CategoryMeta {
        category: "earnedRunAverage",
        display_name: "Earned Run Average",
        short_name: "ERA",
        description: "Earned runs allowed per nine innings",
        format: StatFormat::Decimal2,
    },
    CategoryMeta {
        category: "wins",
        display_name: "Wins",
        short_name: "W",
        description: "Games credited as won to the pitcher",
        format: StatFormat::Integer,
    },
    CategoryMeta {
        category: "strikeouts",
        display_name: "Strikeouts",
        short_name: "SO",
        description: "Batters retired on strikes",
        format: StatFormat::Integer,
    },
    CategoryMeta {
        category: "saves",
        display_name: "Saves",
        short_name: "SV",
        description: "Games finished while protecting a lead",
        format: StatFormat::Integer,
    },
    CategoryMeta {
        category: "whip",
        display_name: "Walks Plus Hits Per Inning",
        short_name: "WHIP",
        description: "Baserunners allowed per inning pitched",
        format: StatFormat::Decimal2,
    },
];

const FIELDING_CATEGORIES: [CategoryMeta; 4] = [
    CategoryMeta {
        category: "assists",
        display_name: "Assists",
        short_name: "A",
        description: "Throws contributing to a putout",
        format: StatFormat::Integer,
    },
    CategoryMeta {
        category: "putOuts",
        display_name: "Putouts",
        short_name: "PO",
        description: "Outs credited to the fielder recording them",
        format: StatFormat::Integer,
    },
    CategoryMeta {
        category: "errors",
        display_name: "Errors",
        short_name: "E",
        description: "Misplays allowing a batter or runner to advance",
        format: StatFormat::Integer,
    },
    CategoryMeta {
        category: "fielding",
        display_name: "Fielding Percentage",
        short_name: "FPCT",
        description: "Successful chances divided by total chances",
        format: StatFormat::Decimal3,
    },
];

/// The fixed category list for a stat group
pub fn categories_for(group: StatGroup) -> &'static [CategoryMeta] {
    match group {
        StatGroup::Hitting => &HITTING_CATEGORIES,
        StatGroup::Pitching => &PITCHING_CATEGORIES,
        StatGroup::Fielding => &FIELDING_CATEGORIES,
    }
}

/// Render a raw leader value per its category format.
///
/// Rounding is half-up. Values here are nonnegative; the epsilon keeps
/// decimal halves that sit just below .5 in binary (3.455 is stored as
/// 3.4549...) from rounding down.
pub fn format_stat_value(value: f64, format: StatFormat) -> String {
    match format {
        StatFormat::Integer => format!("{}", value.trunc() as i64),
        StatFormat::Decimal2 => format!("{:.2}", round_half_up(value, 2)),
        StatFormat::Decimal3 => {
            let formatted = format!("{:.3}", round_half_up(value, 3));
            formatted
                .strip_prefix("0.")
                .map(|rest| format!(".{}", rest))
                .unwrap_or(formatted)
        }
        StatFormat::Percent => format!("{:.1}%", round_half_up(value * 100.0, 1)),
    }
}

fn round_half_up(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    ((value * scale) + 0.5 + 1e-9).floor() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal3_strips_leading_zero() {
        assert_eq!(format_stat_value(0.34567, StatFormat::Decimal3), ".346");
        assert_eq!(format_stat_value(0.350, StatFormat::Decimal3), ".350");
        // Values at or above one keep their integer part
        assert_eq!(format_stat_value(1.0, StatFormat::Decimal3), "1.000");
    }

    #[test]
    fn decimal2_rounds_half_up() {
        assert_eq!(format_stat_value(3.455, StatFormat::Decimal2), "3.46");
        assert_eq!(format_stat_value(3.454, StatFormat::Decimal2), "3.45");
        assert_eq!(format_stat_value(2.0, StatFormat::Decimal2), "2.00");
    }

    #[test]
    fn integer_truncates() {
        assert_eq!(format_stat_value(54.0, StatFormat::Integer), "54");
        assert_eq!(format_stat_value(54.9, StatFormat::Integer), "54");
    }

    #[test]
    fn percent_scales_and_rounds() {
        assert_eq!(format_stat_value(0.1234, StatFormat::Percent), "12.3%");
        assert_eq!(format_stat_value(0.1235, StatFormat::Percent), "12.4%");
    }

    #[test]
    fn group_and_type_parsing() {
        assert_eq!(StatGroup::parse("hitting").unwrap(), StatGroup::Hitting);
        assert_eq!(StatType::parse("lastWeek").unwrap(), StatType::LastWeek);
        assert!(StatGroup::parse("bowling").is_err());
        assert!(StatType::parse("decade").is_err());
    }

    #[test]
    fn every_group_has_categories() {
        for group in [StatGroup::Hitting, StatGroup::Pitching, StatGroup::Fielding] {
            assert!(!categories_for(group).is_empty());
        }
    }
}
