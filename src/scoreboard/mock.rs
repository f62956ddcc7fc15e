/// Generated fallback schedule
///
/// Served only when the upstream is unreachable and no cache entry exists,
/// flagged `mock` so the UI can label it. Shape mirrors a typical slate:
/// a few live games, a few finals, the rest not started.
use crate::cache::MockProvider;
use crate::scoreboard::{partition_by_state, GameSummary, ScoreboardPayload, SideSummary};
use chrono::Utc;
use rand::Rng;

const FALLBACK_CLUBS: [(&str, &str); 8] = [
    ("New York Yankees", "NYY"),
    ("Boston Red Sox", "BOS"),
    ("Los Angeles Dodgers", "LAD"),
    ("San Francisco Giants", "SF"),
    ("Houston Astros", "HOU"),
    ("Atlanta Braves", "ATL"),
    ("Chicago Cubs", "CHC"),
    ("St. Louis Cardinals", "STL"),
];

pub struct GeneratedSchedule;

impl MockProvider<ScoreboardPayload> for GeneratedSchedule {
    fn mock(&self) -> ScoreboardPayload {
        let mut rng = rand::thread_rng();
        let today = Utc::now();

        let games: Vec<GameSummary> = (0..4)
            .map(|i| {
                let (state, is_live, is_final) = match i {
                    0 => ("Live", true, false),
                    1 => ("Live", true, false),
                    2 => ("Final", false, true),
                    _ => ("Preview", false, false),
                };

                let away_club = FALLBACK_CLUBS[i * 2];
                let home_club = FALLBACK_CLUBS[i * 2 + 1];
                let scored = is_live || is_final;
                let away_score: Option<u32> = scored.then(|| rng.gen_range(0..10));
                let home_score: Option<u32> = scored.then(|| rng.gen_range(0..10));

                let (winning_side, losing_side) = if is_final {
                    match (away_score, home_score) {
                        (Some(a), Some(h)) if a > h => (Some("away".to_string()), Some("home".to_string())),
                        (Some(a), Some(h)) if h > a => (Some("home".to_string()), Some("away".to_string())),
                        _ => (None, None),
                    }
                } else {
                    (None, None)
                };

                let inning_display = if is_live {
                    format!("Top {}", rng.gen_range(1..=9))
                } else if is_final {
                    "Final".to_string()
                } else {
                    "TBD".to_string()
                };

                GameSummary {
                    game_pk: 900_000 + i as i64,
                    game_date: Some(today),
                    state: state.to_string(),
                    is_live,
                    is_final,
                    is_preview: !is_live && !is_final,
                    away: SideSummary {
                        team_id: 1000 + (i * 2) as i64,
                        name: away_club.0.to_string(),
                        abbreviation: away_club.1.to_string(),
                        score: away_score,
                    },
                    home: SideSummary {
                        team_id: 1001 + (i * 2) as i64,
                        name: home_club.0.to_string(),
                        abbreviation: home_club.1.to_string(),
                        score: home_score,
                    },
                    winning_side,
                    losing_side,
                    inning_display,
                }
            })
            .collect();

        let (live_games, upcoming_games, completed_games) = partition_by_state(&games);
        let total_games = games.len();

        ScoreboardPayload {
            date: today.format("%Y-%m-%d").to_string(),
            games,
            live_games,
            upcoming_games,
            completed_games,
            total_games,
            timestamp: today,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_schedule_is_consistent() {
        let payload = GeneratedSchedule.mock();

        assert_eq!(payload.total_games, payload.games.len());
        assert_eq!(
            payload.live_games.len() + payload.upcoming_games.len() + payload.completed_games.len(),
            payload.total_games
        );
        assert_eq!(payload.live_games.len(), 2);
        assert_eq!(payload.completed_games.len(), 1);
    }
}
