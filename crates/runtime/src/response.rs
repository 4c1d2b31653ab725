use crate::error::{Error, Result};
use crate::transport::{RawResponse, Transport};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;
use std::str::FromStr;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::debug;

/// Pass success responses through, map everything else to an [`Error`]
pub fn verify_response(response: RawResponse) -> Result<RawResponse> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(Error::from_status(response.status, &response.body))
    }
}

pub fn decode<T: DeserializeOwned>(response: &RawResponse) -> Result<T> {
    Ok(serde_json::from_slice(&response.body)?)
}

/// Execute a request, verify the response and decode its body
pub fn call<T, X>(transport: &X, method: &str, url: &str) -> Result<T>
where
    T: DeserializeOwned,
    X: Transport + ?Sized,
{
    // The query carries the api key
    let path = url.split('?').next().unwrap_or(url);
    debug!(method, path, "Executing request");

    let response = verify_response(transport.execute(method, url, None)?)?;
    debug!(status = response.status, bytes = response.body.len(), "Received response");
    decode(&response)
}

/// Re-key a string keyed map by parsing every key
///
/// The api serializes numeric map keys as strings. A key that doesn't parse
/// is an error rather than a dropped entry.
///
/// # Examples
/// ```
/// use lolgen_runtime::rekey;
/// use std::collections::HashMap;
///
/// let names = HashMap::from([("585897".to_string(), "RiotSchmick".to_string())]);
/// let names: HashMap<i64, String> = rekey(names).unwrap();
/// assert_eq!(names[&585897], "RiotSchmick");
/// ```
pub fn rekey<K, V>(map: HashMap<String, V>) -> Result<HashMap<K, V>>
where
    K: FromStr + Eq + Hash,
    K::Err: Display,
{
    map.into_iter()
        .map(|(key, value)| match key.parse::<K>() {
            Ok(parsed) => Ok((parsed, value)),
            Err(e) => Err(Error::InvalidMapKey {
                reason: e.to_string(),
                key,
            }),
        })
        .collect()
}

/// Convert milliseconds since the unix epoch to a [`SystemTime`]
pub fn parse_epoch_millis(millis: i64) -> SystemTime {
    let offset = Duration::from_millis(millis.unsigned_abs());
    if millis >= 0 {
        UNIX_EPOCH + offset
    } else {
        UNIX_EPOCH - offset
    }
}
