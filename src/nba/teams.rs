//! Static NBA team directory.
//!
//! The provider is inconsistent about which identifying columns a result set
//! carries, so joins fall back through id → abbreviation → normalized full
//! name. This table anchors all three.

/// One franchise entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamInfo {
    pub id: i64,
    pub abbr: &'static str,
    pub full_name: &'static str,
}

pub const TEAMS: &[TeamInfo] = &[
    TeamInfo { id: 1610612737, abbr: "ATL", full_name: "Atlanta Hawks" },
    TeamInfo { id: 1610612738, abbr: "BOS", full_name: "Boston Celtics" },
    TeamInfo { id: 1610612751, abbr: "BKN", full_name: "Brooklyn Nets" },
    TeamInfo { id: 1610612766, abbr: "CHA", full_name: "Charlotte Hornets" },
    TeamInfo { id: 1610612741, abbr: "CHI", full_name: "Chicago Bulls" },
    TeamInfo { id: 1610612739, abbr: "CLE", full_name: "Cleveland Cavaliers" },
    TeamInfo { id: 1610612742, abbr: "DAL", full_name: "Dallas Mavericks" },
    TeamInfo { id: 1610612743, abbr: "DEN", full_name: "Denver Nuggets" },
    TeamInfo { id: 1610612765, abbr: "DET", full_name: "Detroit Pistons" },
    TeamInfo { id: 1610612744, abbr: "GSW", full_name: "Golden State Warriors" },
    TeamInfo { id: 1610612745, abbr: "HOU", full_name: "Houston Rockets" },
    TeamInfo { id: 1610612754, abbr: "IND", full_name: "Indiana Pacers" },
    TeamInfo { id: 1610612746, abbr: "LAC", full_name: "LA Clippers" },
    TeamInfo { id: 1610612747, abbr: "LAL", full_name: "Los Angeles Lakers" },
    TeamInfo { id: 1610612763, abbr: "MEM", full_name: "Memphis Grizzlies" },
    TeamInfo { id: 1610612748, abbr: "MIA", full_name: "Miami Heat" },
    TeamInfo { id: 1610612749, abbr: "MIL", full_name: "Milwaukee Bucks" },
    TeamInfo { id: 1610612750, abbr: "MIN", full_name: "Minnesota Timberwolves" },
    TeamInfo { id: 1610612740, abbr: "NOP", full_name: "New Orleans Pelicans" },
    TeamInfo { id: 1610612752, abbr: "NYK", full_name: "New York Knicks" },
    TeamInfo { id: 1610612760, abbr: "OKC", full_name: "Oklahoma City Thunder" },
    TeamInfo { id: 1610612753, abbr: "ORL", full_name: "Orlando Magic" },
    TeamInfo { id: 1610612755, abbr: "PHI", full_name: "Philadelphia 76ers" },
    TeamInfo { id: 1610612756, abbr: "PHX", full_name: "Phoenix Suns" },
    TeamInfo { id: 1610612757, abbr: "POR", full_name: "Portland Trail Blazers" },
    TeamInfo { id: 1610612758, abbr: "SAC", full_name: "Sacramento Kings" },
    TeamInfo { id: 1610612759, abbr: "SAS", full_name: "San Antonio Spurs" },
    TeamInfo { id: 1610612761, abbr: "TOR", full_name: "Toronto Raptors" },
    TeamInfo { id: 1610612762, abbr: "UTA", full_name: "Utah Jazz" },
    TeamInfo { id: 1610612764, abbr: "WAS", full_name: "Washington Wizards" },
];

/// Lowercased, trimmed, periods stripped — the form used for full-name joins.
pub fn normalize_name(value: &str) -> String {
    value.trim().to_lowercase().replace('.', "")
}

pub fn abbr_for_id(id: i64) -> Option<&'static str> {
    TEAMS.iter().find(|t| t.id == id).map(|t| t.abbr)
}

pub fn id_for_abbr(abbr: &str) -> Option<i64> {
    TEAMS.iter().find(|t| t.abbr == abbr).map(|t| t.id)
}

/// Abbreviation by normalized full name.
pub fn abbr_for_name(name: &str) -> Option<&'static str> {
    let wanted = normalize_name(name);
    TEAMS
        .iter()
        .find(|t| normalize_name(t.full_name) == wanted)
        .map(|t| t.abbr)
}
