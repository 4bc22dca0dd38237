// src/teams.rs
//! Canonical NFL team abbreviations, keyed by the short display name the
//! scoreboard page uses (e.g. "Chiefs", not "Kansas City Chiefs").

pub fn abbr(team_name: &str) -> Option<&'static str> {
    let abbr = match team_name {
        "49ers" => "SF",
        "Bears" => "CHI",
        "Bengals" => "CIN",
        "Bills" => "BUF",
        "Broncos" => "DEN",
        "Browns" => "CLE",
        "Buccaneers" => "TB",
        "Cardinals" => "ARI",
        "Chargers" => "LAC",
        "Chiefs" => "KC",
        "Colts" => "IND",
        "Cowboys" => "DAL",
        "Dolphins" => "MIA",
        "Eagles" => "PHI",
        "Falcons" => "ATL",
        "Giants" => "NYG",
        "Jaguars" => "JAX",
        "Jets" => "NYJ",
        "Lions" => "DET",
        "Packers" => "GB",
        "Panthers" => "CAR",
        "Patriots" => "NE",
        "Raiders" => "LV",
        "Rams" => "LAR",
        "Ravens" => "BAL",
        "Saints" => "NO",
        "Seahawks" => "SEA",
        "Steelers" => "PIT",
        "Texans" => "HOU",
        "Titans" => "TEN",
        "Vikings" => "MIN",
        "Washington" => "WSH",
        _ => return None,
    };
    Some(abbr)
}
