//! Navigation trait.

use crate::Result;
use crate::types::RoutePath;

/// Where a navigation request ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// The requested location was committed.
    Committed { to: RoutePath },
    /// The guard replaced the requested location.
    Redirected { requested: RoutePath, to: RoutePath },
}

impl Navigation {
    /// The location that is current after this navigation.
    pub fn location(&self) -> &RoutePath {
        match self {
            Navigation::Committed { to } | Navigation::Redirected { to, .. } => to,
        }
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, Navigation::Redirected { .. })
    }
}

/// Something that can move the application to a new location.
pub trait Navigator: Send + Sync {
    fn navigate(&self, to: &RoutePath) -> Result<Navigation>;
}
