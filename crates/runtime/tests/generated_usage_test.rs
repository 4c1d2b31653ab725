//! Drives the runtime the way generated client code does

use lolgen_runtime::{
    call, encode_query, rekey, uritemplates, Error, RawResponse, Result, SpellRange, ToParam,
    Transport,
};
use serde::Deserialize;
use std::cell::RefCell;
use std::collections::HashMap;

struct RecordingTransport {
    response: RawResponse,
    requests: RefCell<Vec<(String, String)>>,
}

impl RecordingTransport {
    fn new(status: u16, body: &str) -> Self {
        RecordingTransport {
            response: RawResponse::new(status, body),
            requests: RefCell::new(Vec::new()),
        }
    }
}

impl Transport for RecordingTransport {
    fn execute(&self, method: &str, url: &str, _body: Option<Vec<u8>>) -> Result<RawResponse> {
        self.requests
            .borrow_mut()
            .push((method.to_string(), url.to_string()));
        Ok(self.response.clone())
    }
}

#[derive(Debug, Deserialize)]
struct Summoner {
    #[serde(rename = "id")]
    id: Option<i64>,
    #[serde(rename = "name")]
    name: Option<String>,
}

fn summoners_url(region: &str, ids: &[i64], api_key: &str) -> Result<String> {
    let path = uritemplates::expand("/api/lol/{region}/v1.4/summoner/{summonerIds}", |name| {
        match name {
            "region" => Some(region.to_param()),
            "summonerIds" => Some(ids.to_param()),
            _ => None,
        }
    })?;
    Ok(format!(
        "https://{region}.api.pvp.net{path}?{}",
        encode_query([("api_key", api_key)])
    ))
}

#[test]
fn test_rekeyed_call() {
    let transport =
        RecordingTransport::new(200, r#"{"585897":{"id":585897,"name":"RiotSchmick"}}"#);
    let url = summoners_url("na", &[585897], "secret").unwrap();

    let raw: HashMap<String, Summoner> = call(&transport, "GET", &url).unwrap();
    let summoners: HashMap<i64, Summoner> = rekey(raw).unwrap();

    assert_eq!(summoners[&585897].id, Some(585897));
    assert_eq!(summoners[&585897].name.as_deref(), Some("RiotSchmick"));
    assert_eq!(
        transport.requests.borrow().as_slice(),
        &[(
            "GET".to_string(),
            "https://na.api.pvp.net/api/lol/na/v1.4/summoner/585897?api_key=secret".to_string()
        )]
    );
}

#[test]
fn test_id_lists_are_encoded_in_path() {
    let url = summoners_url("euw", &[1, 2], "k").unwrap();
    assert_eq!(
        url,
        "https://euw.api.pvp.net/api/lol/euw/v1.4/summoner/1%2C2?api_key=k"
    );
}

#[test]
fn test_error_status_reaches_caller() {
    let transport = RecordingTransport::new(503, "");
    let result: Result<HashMap<String, Summoner>> = call(&transport, "GET", "https://x/y");
    assert!(matches!(result, Err(Error::Unavailable)));
}

#[test]
fn test_spell_range_in_class() {
    #[derive(Deserialize)]
    struct Spell {
        range: Option<SpellRange>,
    }

    let spell: Spell = serde_json::from_str(r#"{"range":"self"}"#).unwrap();
    assert_eq!(spell.range, Some(SpellRange::self_targeted()));
}
