/// Generated advanced-stat datasets
///
/// Stat lines are sampled from realistic ranges so tables sort and render
/// sensibly. Names and ids are real MLBAM entries, cycled across rows.
use crate::advanced::{DatasetProvider, TableType};
use rand::Rng;
use serde_json::{json, Value};

const TEAMS: [&str; 10] = [
    "NYY", "BOS", "LAD", "SF", "HOU", "ATL", "CHC", "STL", "SEA", "TB",
];

const POSITIONS: [&str; 9] = ["C", "1B", "2B", "3B", "SS", "LF", "CF", "RF", "DH"];

const BATTERS: [(&str, i64); 10] = [
    ("Mike Trout", 545361),
    ("Aaron Judge", 592450),
    ("Shohei Ohtani", 660271),
    ("Juan Soto", 665742),
    ("Freddie Freeman", 518692),
    ("Mookie Betts", 605141),
    ("Ronald Acuna Jr.", 660670),
    ("Francisco Lindor", 596019),
    ("Vladimir Guerrero Jr.", 665489),
    ("Corey Seager", 608369),
];

const PITCHERS: [(&str, i64); 10] = [
    ("Gerrit Cole", 543037),
    ("Corbin Burnes", 669203),
    ("Zack Wheeler", 554430),
    ("Aaron Nola", 605400),
    ("Dylan Cease", 656302),
    ("Sandy Alcantara", 645261),
    ("Blake Snell", 605483),
    ("Kevin Gausman", 592332),
    ("Luis Castillo", 622491),
    ("Max Scherzer", 453286),
];

const BATTING_ROWS: usize = 50;
const PITCHING_ROWS: usize = 40;
const FIELDING_ROWS: usize = 50;
const STATCAST_ROWS: usize = 50;

#[derive(Default)]
pub struct GeneratedDatasets;

impl DatasetProvider for GeneratedDatasets {
    fn dataset(&self, table: TableType, _season: &str) -> Vec<Value> {
        match table {
            TableType::Batting => batting_rows(BATTING_ROWS),
            TableType::Pitching => pitching_rows(PITCHING_ROWS),
            TableType::Fielding => fielding_rows(FIELDING_ROWS),
            TableType::Statcast => statcast_rows(STATCAST_ROWS),
            TableType::Comparison => comparison_rows(BATTING_ROWS),
        }
    }
}

fn batter(index: usize) -> (&'static str, i64) {
    BATTERS[index % BATTERS.len()]
}

fn batting_rows(count: usize) -> Vec<Value> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|i| {
            let (name, id) = batter(i);
            let games: u32 = rng.gen_range(50..150);
            let plate_appearances = games * rng.gen_range(3..=5);
            let at_bats = (plate_appearances as f64 * 0.9) as u32;
            let hits = (at_bats as f64 * rng.gen_range(0.2..0.4)) as u32;
            let home_runs = (hits as f64 * rng.gen_range(0.0..0.2)) as u32;
            let rbi = home_runs * rng.gen_range(1..=2) + (hits as f64 * 0.3) as u32;

            let avg = hits as f64 / at_bats.max(1) as f64;
            let obp = (hits + plate_appearances / 10) as f64 / plate_appearances.max(1) as f64;
            let slg = (hits + home_runs * 3) as f64 / at_bats.max(1) as f64;
            let woba = rng.gen_range(0.300..0.450);

            json!({
                "id": id,
                "name": name,
                "team": TEAMS[rng.gen_range(0..TEAMS.len())],
                "position": POSITIONS[rng.gen_range(0..POSITIONS.len())],
                "G": games,
                "PA": plate_appearances,
                "AB": at_bats,
                "H": hits,
                "HR": home_runs,
                "RBI": rbi,
                "SB": rng.gen_range(0..20),
                "AVG": avg,
                "OBP": obp,
                "SLG": slg,
                "OPS": obp + slg,
                "WAR": rng.gen_range(0.0..8.0),
                "wOBA": woba,
                "xwOBA": woba + rng.gen_range(-0.02..0.02),
            })
        })
        .collect()
}

fn pitching_rows(count: usize) -> Vec<Value> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|i| {
            let (name, id) = PITCHERS[i % PITCHERS.len()];
            let games: u32 = rng.gen_range(15..34);
            let starts = games.min(rng.gen_range(0..=games));
            let innings = games as f64 * rng.gen_range(4.0..6.5);
            let strikeouts = (innings * rng.gen_range(0.7..1.3)) as u32;
            let walks = (innings * rng.gen_range(0.2..0.45)) as u32;
            let hits = (innings * rng.gen_range(0.7..1.1)) as u32;
            let era = rng.gen_range(2.2..5.5);

            json!({
                "id": id,
                "name": name,
                "team": TEAMS[rng.gen_range(0..TEAMS.len())],
                "W": rng.gen_range(0..20),
                "L": rng.gen_range(0..15),
                "ERA": era,
                "G": games,
                "GS": starts,
                "SV": rng.gen_range(0..40),
                "IP": innings,
                "SO": strikeouts,
                "BB": walks,
                "WHIP": (walks + hits) as f64 / innings,
                "K9": strikeouts as f64 * 9.0 / innings,
                "FIP": era + rng.gen_range(-0.6..0.6),
                "WAR": rng.gen_range(0.0..7.0),
            })
        })
        .collect()
}

fn fielding_rows(count: usize) -> Vec<Value> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|i| {
            let (name, id) = batter(i);
            let games: u32 = rng.gen_range(50..150);
            let putouts = rng.gen_range(50..400);
            let assists = rng.gen_range(10..300);
            let errors = rng.gen_range(0..20);
            let chances = (putouts + assists + errors).max(1);

            json!({
                "id": id,
                "name": name,
                "team": TEAMS[rng.gen_range(0..TEAMS.len())],
                "position": POSITIONS[rng.gen_range(0..POSITIONS.len())],
                "G": games,
                "INN": games as f64 * rng.gen_range(7.0..9.0),
                "PO": putouts,
                "A": assists,
                "E": errors,
                "DP": rng.gen_range(0..100),
                "FP": (putouts + assists) as f64 / chances as f64,
                "DRS": rng.gen_range(-10i64..20),
                "OAA": rng.gen_range(-10i64..20),
            })
        })
        .collect()
}

fn statcast_rows(count: usize) -> Vec<Value> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|i| {
            let (name, id) = batter(i);
            json!({
                "id": id,
                "name": name,
                "team": TEAMS[rng.gen_range(0..TEAMS.len())],
                "exit_velocity": rng.gen_range(85.0..95.0),
                "launch_angle": rng.gen_range(5.0..25.0),
                "sprint_speed": rng.gen_range(25.0..30.0),
                "barrel_pct": rng.gen_range(0.03..0.18),
                "hard_hit_pct": rng.gen_range(0.25..0.55),
                "xBA": rng.gen_range(0.200..0.340),
                "xSLG": rng.gen_range(0.350..0.650),
                "xwOBA": rng.gen_range(0.280..0.430),
                "whiff_pct": rng.gen_range(0.15..0.38),
            })
        })
        .collect()
}

/// Batting rows enriched with statcast fields, one merged pass
fn comparison_rows(count: usize) -> Vec<Value> {
    let batting = batting_rows(count);
    let statcast = statcast_rows(count);

    batting
        .into_iter()
        .zip(statcast)
        .map(|(mut row, cast)| {
            if let (Some(row_map), Some(cast_map)) = (row.as_object_mut(), cast.as_object()) {
                for key in ["exit_velocity", "launch_angle", "barrel_pct"] {
                    if let Some(value) = cast_map.get(key) {
                        row_map.insert(key.to_string(), value.clone());
                    }
                }
            }
            row
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batting_rates_are_internally_consistent() {
        for row in batting_rows(20) {
            let obp = row["OBP"].as_f64().unwrap();
            let slg = row["SLG"].as_f64().unwrap();
            let ops = row["OPS"].as_f64().unwrap();
            assert!((ops - (obp + slg)).abs() < 1e-9);
            assert!(row["H"].as_u64().unwrap() <= row["AB"].as_u64().unwrap());
        }
    }

    #[test]
    fn comparison_rows_merge_statcast_fields() {
        for row in comparison_rows(10) {
            assert!(row.get("OPS").is_some());
            assert!(row.get("exit_velocity").is_some());
            assert!(row.get("barrel_pct").is_some());
        }
    }
}
