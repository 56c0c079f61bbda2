//! Conference standings normalized from the provider's `Standings` set.

use serde::{Deserialize, Serialize};

use crate::nba::table::ResultTable;
use crate::nba::teams;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandingsTeam {
    pub id: i64,
    pub name: String,
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub abbreviation: String,
    pub wins: i64,
    pub losses: i64,
    pub last10: String,
    pub streak: String,
}

/// Standings split into conference arrays, provider order preserved
/// (the provider already sorts by conference rank).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConferenceStandings {
    pub east: Vec<StandingsTeam>,
    pub west: Vec<StandingsTeam>,
}

/// Abbreviation via the team directory by id; unknown ids fall back to the
/// first three letters of the nickname.
fn abbreviation(id: i64, nickname: &str) -> String {
    match teams::abbr_for_id(id) {
        Some(abbr) => abbr.to_string(),
        None => nickname.chars().take(3).collect::<String>().to_uppercase(),
    }
}

pub fn build_standings(table: &ResultTable) -> ConferenceStandings {
    let id_col = table.resolve(&["TeamID", "TEAM_ID"]);
    let city_col = table.resolve(&["TeamCity", "TEAM_CITY"]);
    let name_col = table.resolve(&["TeamName", "TEAM_NAME"]);
    let conf_col = table.resolve(&["Conference", "CONFERENCE"]);
    let wins_col = table.resolve(&["WINS", "W"]);
    let losses_col = table.resolve(&["LOSSES", "L"]);
    let last10_col = table.resolve(&["L10", "LAST10"]);
    let streak_col = table.resolve(&["strCurrentStreak", "CurrentStreak", "STRK"]);

    let mut standings = ConferenceStandings::default();
    for row in &table.rows {
        let id = table.integer(row, id_col, 0);
        let name = table.text(row, name_col).unwrap_or_default();
        let city = table.text(row, city_col).unwrap_or_default();
        let full_name = if city.is_empty() {
            name.clone()
        } else {
            format!("{city} {name}")
        };
        let team = StandingsTeam {
            id,
            abbreviation: abbreviation(id, &name),
            full_name,
            name,
            wins: table.integer(row, wins_col, 0),
            losses: table.integer(row, losses_col, 0),
            last10: table.text(row, last10_col).unwrap_or_default(),
            streak: table.text(row, streak_col).unwrap_or_default(),
        };
        match table.text(row, conf_col).as_deref() {
            Some(c) if c.eq_ignore_ascii_case("east") => standings.east.push(team),
            Some(c) if c.eq_ignore_ascii_case("west") => standings.west.push(team),
            _ => {}
        }
    }
    standings
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn standings_table() -> ResultTable {
        ResultTable {
            name: "Standings".into(),
            headers: [
                "TeamID", "TeamCity", "TeamName", "Conference", "WINS", "LOSSES", "L10",
                "strCurrentStreak",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            rows: vec![
                vec![
                    json!(1610612738), json!("Boston"), json!("Celtics"), json!("East"),
                    json!(50), json!(15), json!("8-2"), json!("W 4"),
                ],
                vec![
                    json!(1610612760), json!("Oklahoma City"), json!("Thunder"), json!("West"),
                    json!(55), json!(10), json!("9-1"), json!("W 7"),
                ],
                vec![
                    json!(99), json!("Expansion"), json!("Meteors"), json!("West"),
                    json!(1), json!(64), json!("0-10"), json!("L 12"),
                ],
            ],
        }
    }

    #[test]
    fn splits_by_conference_in_provider_order() {
        let doc = build_standings(&standings_table());
        assert_eq!(doc.east.len(), 1);
        assert_eq!(doc.west.len(), 2);
        assert_eq!(doc.east[0].abbreviation, "BOS");
        assert_eq!(doc.east[0].full_name, "Boston Celtics");
        assert_eq!(doc.west[0].abbreviation, "OKC");
        assert_eq!(doc.west[0].last10, "9-1");
    }

    #[test]
    fn unknown_team_id_falls_back_to_nickname_prefix() {
        let doc = build_standings(&standings_table());
        assert_eq!(doc.west[1].abbreviation, "MET");
        assert_eq!(doc.west[1].streak, "L 12");
    }
}
