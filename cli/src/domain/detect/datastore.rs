//! Auxiliary datastore detection and the run-time environment it implies.

use super::signals::SignalBag;

/// `.env` keys that carry a datastore connection string.
pub const CONNECTION_KEYS: &[&str] = &["MONGO_URI", "MONGODB_URI", "MONGO_URL", "DATABASE_URL"];

/// Client identifiers whose presence in code implies a datastore.
pub const CLIENT_IDENTIFIERS: &[&str] = &["mongoose", "mongodb", "MongoClient", "pymongo", "motor"];

/// Host alias that reaches the engine host from inside a container.
pub const HOST_GATEWAY_ALIAS: &str = "host.docker.internal";

const SCANNED_EXTENSIONS: &[&str] = &["js", "mjs", "cjs", "ts", "py"];

/// Whether the project depends on an auxiliary datastore.
#[must_use]
pub fn needs_datastore(signals: &SignalBag<'_>) -> bool {
    if env_pairs(&signals.env_file())
        .iter()
        .any(|(key, _)| CONNECTION_KEYS.contains(&key.as_str()))
    {
        return true;
    }
    if mentions_client(&signals.manifest()) {
        return true;
    }
    signals
        .sources_with(SCANNED_EXTENSIONS)
        .into_iter()
        .any(|file| mentions_client(&signals.text(file)))
}

/// Environment variables to inject when a datastore was detected.
///
/// Each recognised key in `env_text` is forwarded with loopback hosts
/// rewritten to [`HOST_GATEWAY_ALIAS`]. With none present, `MONGO_URI` points
/// at a database named after the container.
#[must_use]
pub fn connection_env(env_text: &str, name: &str) -> Vec<(String, String)> {
    let vars: Vec<(String, String)> = env_pairs(env_text)
        .into_iter()
        .filter(|(key, _)| CONNECTION_KEYS.contains(&key.as_str()))
        .map(|(key, value)| (key, rewrite_loopback(&value)))
        .collect();
    if vars.is_empty() {
        return vec![(
            "MONGO_URI".to_string(),
            format!("mongodb://{HOST_GATEWAY_ALIAS}:27017/{name}"),
        )];
    }
    vars
}

fn mentions_client(text: &str) -> bool {
    CLIENT_IDENTIFIERS.iter().any(|id| text.contains(id))
}

fn rewrite_loopback(value: &str) -> String {
    value
        .replace("localhost", HOST_GATEWAY_ALIAS)
        .replace("127.0.0.1", HOST_GATEWAY_ALIAS)
}

/// `KEY=VALUE` pairs of an env file, last assignment of a key wins.
fn env_pairs(text: &str) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.strip_prefix("export ").unwrap_or(line);
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim().to_string();
        let value = value.trim().trim_matches(|c| c == '"' || c == '\'').to_string();
        pairs.retain(|(k, _)| *k != key);
        pairs.push((key, value));
    }
    pairs
}
