//! Container run parameters and engine listing parsers.

use autodock_common::ContainerStatus;

use crate::domain::detect::datastore::{HOST_GATEWAY_ALIAS, connection_env};

/// Column separator of the listing format requested from the engine.
pub const PS_SEPARATOR: char = '\t';

/// Everything needed to start a detached container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSpec {
    pub name: String,
    pub image: String,
    /// Published as `port:port`.
    pub port: u16,
    pub env: Vec<(String, String)>,
    /// `host:target` entries for `--add-host`.
    pub extra_hosts: Vec<String>,
}

impl RunSpec {
    #[must_use]
    pub fn new(name: &str, image: &str, port: u16) -> Self {
        Self {
            name: name.to_string(),
            image: image.to_string(),
            port,
            env: Vec::new(),
            extra_hosts: Vec::new(),
        }
    }

    /// Wire the container to a datastore on the engine host.
    #[must_use]
    pub fn with_datastore(mut self, env_text: &str) -> Self {
        self.extra_hosts
            .push(format!("{HOST_GATEWAY_ALIAS}:host-gateway"));
        self.env.extend(connection_env(env_text, &self.name));
        self
    }
}

/// Which containers a listing should include.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PsQuery {
    /// Every container, in the engine's default table format.
    All,
    /// `name<TAB>status` rows for containers whose name matches.
    ByName(String),
    /// Names of containers publishing the given host port.
    Publishing(u16),
}

/// Status of `name` in a `name<TAB>status` listing.
///
/// The engine's name filter is a substring match, so rows are compared
/// exactly. `Up …` is running, any other status is stopped.
#[must_use]
pub fn parse_status(listing: &str, name: &str) -> ContainerStatus {
    listing
        .lines()
        .filter_map(|line| line.split_once(PS_SEPARATOR))
        .find(|(row_name, _)| row_name.trim() == name)
        .map_or(ContainerStatus::NotFound, |(_, status)| {
            let status = status.trim();
            if status.starts_with("Up") {
                ContainerStatus::Running
            } else if status.is_empty() {
                ContainerStatus::NotFound
            } else {
                ContainerStatus::Stopped
            }
        })
}

/// Non-empty lines of a names-only listing.
#[must_use]
pub fn parse_names(listing: &str) -> Vec<String> {
    listing
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}
