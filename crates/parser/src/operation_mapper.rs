//! Operation naming by path suffix
//!
//! The reference page gives operations no usable names, and their numeric
//! ids change without an api change. Names come from a curated table keyed
//! by resource and path suffix instead.

use lolgen_common::{GeneratorConfig, GeneratorError, OperationRule, Result, ScalarKind};
use once_cell::sync::Lazy;
use std::collections::BTreeMap;

/// Curated metadata of one operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationInfo {
    pub name: String,
    /// Key type the returned mapping is re-keyed to
    pub map_key: Option<ScalarKind>,
}

impl From<&OperationRule> for OperationInfo {
    fn from(rule: &OperationRule) -> Self {
        OperationInfo {
            name: rule.name.clone(),
            map_key: rule.map_key,
        }
    }
}

type SuffixTable = BTreeMap<&'static str, (&'static str, Option<ScalarKind>)>;

static KNOWN_OPERATIONS: Lazy<BTreeMap<&'static str, SuffixTable>> = Lazy::new(|| {
    let int64 = Some(ScalarKind::Int64);
    let mut table = BTreeMap::new();

    table.insert(
        "lol-static-data",
        SuffixTable::from([
            ("/champion", ("ChampionDatas", None)),
            ("/champion/{id}", ("ChampionData", None)),
            ("/item", ("Items", None)),
            ("/item/{id}", ("Item", None)),
            ("/language-strings", ("LanguageStrings", None)),
            ("/languages", ("Languages", None)),
            ("/map", ("Maps", None)),
            ("/mastery", ("Masteries", None)),
            ("/mastery/{id}", ("Mastery", None)),
            ("/realm", ("Realm", None)),
            ("/rune", ("Runes", None)),
            ("/rune/{id}", ("Rune", None)),
            ("/summoner-spell", ("SummonerSpells", None)),
            ("/summoner-spell/{id}", ("SummonerSpell", None)),
            ("versions", ("Versions", None)),
        ]),
    );
    table.insert(
        "champion",
        SuffixTable::from([
            ("/champion", ("Champions", None)),
            ("/champion/{id}", ("Champion", None)),
        ]),
    );
    table.insert(
        "current-game",
        SuffixTable::from([(
            "/getSpectatorGameInfo/{platformId}/{summonerId}",
            ("SpectatorGameInfo", None),
        )]),
    );
    table.insert(
        "featured-games",
        SuffixTable::from([("/featured", ("FeaturedGames", None))]),
    );
    table.insert(
        "game",
        SuffixTable::from([("/game/by-summoner/{summonerId}/recent", ("RecentGames", None))]),
    );
    table.insert(
        "league",
        SuffixTable::from([
            ("/league/by-summoner/{summonerIds}", ("LeaguesBySummonerID", None)),
            ("/league/by-summoner/{summonerIds}/entry", ("LeagueEntriesBySummonerID", None)),
            ("/league/by-team/{teamIds}", ("LeaguesByTeamID", None)),
            ("/league/by-team/{teamIds}/entry", ("LeagueEntriesByTeamID", None)),
            ("/league/challenger", ("Challenger", None)),
            ("/league/master", ("Master", None)),
        ]),
    );
    table.insert(
        "lol-status",
        SuffixTable::from([
            ("/shards", ("Shards", None)),
            ("/shards/{region}", ("ShardsInRegion", None)),
        ]),
    );
    table.insert(
        "match",
        SuffixTable::from([
            ("/match/{matchId}", ("Match", None)),
            ("/match/by-tournament/{tournamentCode}/ids", ("MatchesByTournement", None)),
            ("/match/for-tournament/{matchId}", ("MatchForTournement", None)),
        ]),
    );
    table.insert(
        "matchlist",
        SuffixTable::from([(
            "/matchlist/by-summoner/{summonerId}",
            ("MatchesBySummonerID", None),
        )]),
    );
    table.insert(
        "stats",
        SuffixTable::from([
            ("/stats/by-summoner/{summonerId}/ranked", ("RankedStats", None)),
            ("/stats/by-summoner/{summonerId}/summary", ("StatsSummary", None)),
        ]),
    );
    table.insert(
        "summoner",
        SuffixTable::from([
            ("/summoner/by-name/{summonerNames}", ("SummonersByName", None)),
            ("/summoner/{summonerIds}", ("Summoners", int64)),
            ("/summoner/{summonerIds}/masteries", ("SummonerMasteries", int64)),
            ("/summoner/{summonerIds}/name", ("SummonerNames", int64)),
            ("/summoner/{summonerIds}/runes", ("SummonerRunes", int64)),
        ]),
    );
    table.insert(
        "team",
        SuffixTable::from([
            ("/team/by-summoner/{summonerIds}", ("TeamsBySummonerID", int64)),
            ("/team/{teamIds}", ("Teams", None)),
        ]),
    );

    table
});

/// Looks up operation metadata by path suffix
pub struct OperationMapper<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> OperationMapper<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        OperationMapper { config }
    }

    /// Find the metadata of the operation at `path` in `resource`
    ///
    /// Exactly one known suffix must match. Configured entries are consulted
    /// together with the built-in table and replace built-in entries with the
    /// same suffix.
    pub fn lookup(&self, resource: &str, path: &str) -> Result<OperationInfo> {
        let mut candidates: BTreeMap<&str, OperationInfo> = BTreeMap::new();

        if let Some(known) = KNOWN_OPERATIONS.get(resource) {
            for (suffix, (name, map_key)) in known {
                candidates.insert(
                    *suffix,
                    OperationInfo {
                        name: name.to_string(),
                        map_key: *map_key,
                    },
                );
            }
        }
        for (suffix, rule) in self.config.operations_for(resource) {
            candidates.insert(suffix, rule.into());
        }

        let mut matches: Vec<(&str, OperationInfo)> = candidates
            .into_iter()
            .filter(|(suffix, _)| path.ends_with(*suffix))
            .collect();

        match matches.len() {
            0 => Err(GeneratorError::UnknownOperation {
                resource: resource.to_string(),
                path: path.to_string(),
            }),
            1 => Ok(matches.remove(0).1),
            _ => Err(GeneratorError::AmbiguousOperation {
                resource: resource.to_string(),
                path: path.to_string(),
                candidates: matches.into_iter().map(|(s, _)| s.to_string()).collect(),
            }),
        }
    }
}
