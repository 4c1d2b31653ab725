//! Identifier normalization
//!
//! Documented names arrive in mixed camelCase with inconsistent acronym
//! casing ("summonerId", "platformId", "teamIds"). Everything is normalized
//! so that a recognized acronym is rendered fully uppercase, which makes
//! "summonerId" and "SummonerID" end up identical.

use lolgen_common::{GeneratorConfig, SKIP};
use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Multi-letter acronyms rendered in a single case
static INITIALISMS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "API", "ASCII", "CPU", "CSS", "DNS", "EOF", "GUID", "HTML", "HTTP", "HTTPS", "ID", "IP",
        "JSON", "LHS", "QPS", "RAM", "RHS", "RPC", "SLA", "SMTP", "SQL", "SSH", "TCP", "TLS", "TTL",
        "UDP", "UI", "UID", "UUID", "URI", "URL", "UTF8", "VM", "XML", "XSRF", "XSS",
    ]
    .into_iter()
    .collect()
});

/// Normalize an identifier
///
/// Words are split on underscores and on lower-to-non-lower transitions. A
/// word that is a known acronym is uppercased (lowercased when it starts a
/// lowercase name), any other all-lowercase word after the first gets a
/// capital first letter.
///
/// # Examples
/// ```
/// use lolgen_parser::lint_name;
///
/// assert_eq!(lint_name("summonerId"), "summonerID");
/// assert_eq!(lint_name("profileIconId"), "profileIconID");
/// assert_eq!(lint_name("champion"), "champion");
/// ```
pub fn lint_name(name: &str) -> String {
    if name == "_" || name.chars().all(char::is_lowercase) {
        return name.to_string();
    }

    let mut runes: Vec<char> = name.chars().collect();
    let mut w = 0; // start of the current word
    let mut i = 0;

    while i < runes.len() {
        let mut eow = false;
        if i + 1 == runes.len() {
            eow = true;
        } else if runes[i + 1] == '_' {
            eow = true;
            let mut n = 1;
            while i + n + 1 < runes.len() && runes[i + n + 1] == '_' {
                n += 1;
            }

            // Keep one underscore between two digits
            if i + n + 1 < runes.len() && runes[i].is_numeric() && runes[i + n + 1].is_numeric() {
                n -= 1;
            }

            runes.drain(i + 1..i + 1 + n);
        } else if runes[i].is_lowercase() && !runes[i + 1].is_lowercase() {
            eow = true;
        }
        i += 1;
        if !eow {
            continue;
        }

        let word: String = runes[w..i].iter().collect();
        let upper = word.to_uppercase();
        if INITIALISMS.contains(upper.as_str()) {
            let replacement = if w == 0 && runes[w].is_lowercase() {
                word.to_lowercase()
            } else {
                upper
            };
            for (slot, c) in runes[w..i].iter_mut().zip(replacement.chars()) {
                *slot = c;
            }
        } else if w > 0 && word.to_lowercase() == word {
            if let Some(c) = runes[w].to_uppercase().next() {
                runes[w] = c;
            }
        }
        w = i;
    }

    runes.into_iter().collect()
}

/// Normalize a path or query parameter name
///
/// A trailing "Ids" always becomes "IDs", even where the generic rules would
/// not split it off.
pub fn parameter_name(raw: &str) -> String {
    match raw.strip_suffix("Ids") {
        Some(stem) => format!("{}IDs", stem),
        None => lint_name(raw),
    }
}

/// Normalize a field name, `None` if the field is configured away
pub fn field_name(
    config: &GeneratorConfig,
    resource: &str,
    raw_class: &str,
    raw_field: &str,
) -> Option<String> {
    let name = config
        .field_name(resource, raw_class, raw_field)
        .unwrap_or(raw_field);
    if name == SKIP {
        return None;
    }

    Some(lint_name(&upper_first(name)))
}

/// Normalize a class name
///
/// A configured name always wins. Otherwise the "Dto" suffix is dropped and
/// names that several resources share are made unique per resource.
pub fn class_name(config: &GeneratorConfig, resource: &str, raw: &str) -> String {
    let raw = raw.trim();
    if let Some(name) = config.class_name(resource, raw) {
        return lint_name(name);
    }

    let name = lint_name(raw.strip_suffix("Dto").unwrap_or(raw));
    disambiguate(resource, name)
}

fn disambiguate(resource: &str, name: String) -> String {
    let prefix = match (resource, name.as_str()) {
        ("lol-static-data", "Champion") => return "ChampionData".to_string(),
        ("lol-static-data", "ChampionList") => return "ChampionDataList".to_string(),
        ("team", "Team" | "TeamMemberInfo" | "TeamStatDetail") => "Rank",
        ("match", "Player" | "Participant" | "ParticipantIdentity") => "Match",
        ("match", "Rune" | "Mastery") => "Used",
        ("current-game", "Rune" | "Mastery") => "Current",
        ("current-game", "Observer" | "BannedChampion") => "CurrentGame",
        ("featured-games", "Participant" | "Observer" | "BannedChampion") => "FeaturedGame",
        ("summoner", "Mastery") => "Summoner",
        _ => return name,
    };
    format!("{}{}", prefix, name)
}

fn upper_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
