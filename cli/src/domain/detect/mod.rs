//! Inference engine: project type, port, entry file and datastore detection.
//!
//! Every resolver reads the same [`SignalBag`]. Layered resolvers are an
//! ordered slice of [`Strategy`] functions reduced by [`first_match`].

pub mod classify;
pub mod datastore;
pub mod entry;
pub mod port;
pub mod signals;

use std::fmt::Debug;

use autodock_common::ProjectType;

use crate::domain::error::DetectError;

pub use classify::classify;
pub use datastore::{connection_env, needs_datastore};
pub use entry::{EntryCandidate, EntryLayer, resolve_entry};
pub use port::{FORBIDDEN_PORTS, Port, PortCandidate, PortLayer, is_valid_port, resolve_port};
pub use signals::{ProjectReader, SignalBag, StaticProject};

/// One resolution layer: yields a candidate or passes.
pub type Strategy<T> = fn(&SignalBag<'_>, ProjectType) -> Option<T>;

/// Run `strategies` in order and return the first hit with its layer tag.
pub fn first_match<L, T>(
    strategies: &[(L, Strategy<T>)],
    signals: &SignalBag<'_>,
    project_type: ProjectType,
) -> Option<(L, T)>
where
    L: Copy + Debug,
    T: Debug,
{
    strategies.iter().find_map(|(layer, strategy)| {
        let hit = strategy(signals, project_type)?;
        tracing::debug!(?layer, ?hit, "resolver layer matched");
        Some((*layer, hit))
    })
}

/// Raw outcome of one inference pass, before any interactive fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inference {
    pub project_type: ProjectType,
    /// `None` when every port layer was exhausted.
    pub port: Option<PortCandidate>,
    /// `None` when the type needs no entry or none was found.
    pub entry: Option<EntryCandidate>,
    pub datastore: bool,
}

impl Inference {
    /// Whether the type needs an entry file that was not found.
    #[must_use]
    pub fn entry_missing(&self) -> bool {
        self.project_type.needs_entry_file() && self.entry.is_none()
    }
}

/// Classify the project and run the independent resolvers over it.
///
/// # Errors
///
/// Returns [`DetectError::ClassificationFailed`] when no type matches.
pub fn infer(signals: &SignalBag<'_>) -> Result<Inference, DetectError> {
    let project_type = classify(signals);
    tracing::debug!(%project_type, "classified project");
    if project_type == ProjectType::Unknown {
        return Err(DetectError::ClassificationFailed);
    }
    Ok(Inference {
        project_type,
        port: resolve_port(signals, project_type),
        entry: resolve_entry(signals, project_type),
        datastore: needs_datastore(signals),
    })
}
