/// Derived batting and pitching rates
///
/// Pure functions over raw season stats. Rate stats that divide by innings
/// return `None` when the denominator is absent or zero - "insufficient
/// data" is more honest than a rate computed against a made-up inning count.

/// On-base plus slugging
pub fn ops(obp: f64, slg: f64) -> f64 {
    obp + slg
}

/// Isolated power: extra-base ability with singles removed
pub fn iso(slg: f64, avg: f64) -> f64 {
    slg - avg
}

/// Walks plus hits per inning pitched
pub fn whip(walks: f64, hits: f64, innings: f64) -> Option<f64> {
    if innings > 0.0 {
        Some((walks + hits) / innings)
    } else {
        None
    }
}

/// Strikeouts per nine innings
pub fn strikeouts_per_nine(strikeouts: f64, innings: f64) -> Option<f64> {
    if innings > 0.0 {
        Some(strikeouts * 9.0 / innings)
    } else {
        None
    }
}

/// Parse the baseball innings notation where the fractional digit counts
/// outs: "202.1" is 202 innings and one out, i.e. 202 1/3.
pub fn parse_innings(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    match trimmed.split_once('.') {
        Some((whole, frac)) => {
            let whole: f64 = whole.parse().ok()?;
            match frac {
                "0" => Some(whole),
                "1" => Some(whole + 1.0 / 3.0),
                "2" => Some(whole + 2.0 / 3.0),
                _ => trimmed.parse().ok(),
            }
        }
        None => trimmed.parse().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn ops_and_iso_from_slash_line() {
        // .360 OBP / .520 SLG / .280 AVG
        assert!(close(ops(0.360, 0.520), 0.880));
        assert!(close(iso(0.520, 0.280), 0.240));
    }

    #[test]
    fn whip_and_k9() {
        // 45 BB + 140 H over 180 IP
        assert!(close(whip(45.0, 140.0, 180.0).unwrap(), 185.0 / 180.0));
        // 200 K over 180 IP
        assert!(close(strikeouts_per_nine(200.0, 180.0).unwrap(), 10.0));
    }

    #[test]
    fn zero_innings_yields_no_rate() {
        assert_eq!(whip(10.0, 20.0, 0.0), None);
        assert_eq!(strikeouts_per_nine(50.0, 0.0), None);
    }

    #[test]
    fn innings_notation_counts_outs_in_thirds() {
        assert!(close(parse_innings("202.1").unwrap(), 202.0 + 1.0 / 3.0));
        assert!(close(parse_innings("202.2").unwrap(), 202.0 + 2.0 / 3.0));
        assert!(close(parse_innings("202.0").unwrap(), 202.0));
        assert!(close(parse_innings("202").unwrap(), 202.0));
        assert_eq!(parse_innings("not innings"), None);
    }
}
