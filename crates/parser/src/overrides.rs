//! Hard-coded corrections to the documented model
//!
//! The reference page is inconsistent in a few known places: some ids are
//! documented as 64-bit although every other resource uses 32-bit, spell
//! fields have shapes the type grammar can't express, and comma-joined id
//! lists are documented as plain strings.

use lolgen_common::{GeneratorConfig, TypeIr};

/// Base url of resources that are not served from the region host
pub fn base_url(resource: &str) -> Option<&'static str> {
    match resource {
        "lol-static-data" => Some("https://global.api.pvp.net"),
        "lol-status" => Some("http://status.leagueoflegends.com"),
        _ => None,
    }
}

pub fn api_key_required(resource: &str) -> bool {
    resource != "lol-status"
}

/// Type of a field that replaces whatever the documentation declares
pub fn declared_field_type(raw_class: &str, raw_field: &str) -> Option<TypeIr> {
    match (raw_class, raw_field) {
        ("SummonerSpellDto" | "ChampionSpellDto", "effect") => {
            Some(TypeIr::sequence(TypeIr::sequence(TypeIr::Float64)))
        }
        ("SummonerSpellDto" | "ChampionSpellDto", "range") => {
            Some(TypeIr::pointer(TypeIr::External("SpellRange".to_string())))
        }
        _ => None,
    }
}

/// Narrow 64-bit ids that are 32-bit everywhere else
pub fn fix_id_type(
    config: &GeneratorConfig,
    resource: &str,
    raw_class: &str,
    raw_field: &str,
    ty: TypeIr,
) -> TypeIr {
    if config.dont_fix_id_type || ty != TypeIr::Int64 {
        return ty;
    }

    let narrowed = matches!(
        raw_field,
        "mapId" | "championId" | "profileIconId" | "runeId" | "masteryId" | "spell1Id" | "spell2Id"
    ) || (raw_class == "MatchReference" && raw_field == "champion")
        || (resource == "champion" && raw_class == "ChampionDto" && raw_field == "id");

    if narrowed {
        TypeIr::Int32
    } else {
        ty
    }
}

/// Type of a parameter documented as a comma-joined string
pub fn parameter_type(name: &str, ty: TypeIr) -> TypeIr {
    if ty != TypeIr::String {
        return ty;
    }

    match name {
        "summonerIDs" => TypeIr::sequence(TypeIr::Int64),
        "summonerNames" | "teamIDs" => TypeIr::sequence(TypeIr::String),
        _ => ty,
    }
}
