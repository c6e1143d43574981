//! Display hosts
//!
//! Where raw display information comes from, and how the configured source
//! is turned into a concrete host.

mod drm;
mod edid;
mod mock;
mod profile;
mod traits;

pub use drm::{DrmHost, DEFAULT_DRM_ROOT};
pub use mock::MockHost;
#[cfg(test)]
pub use mock::MockConfig;
pub use profile::ProfileHost;
pub use traits::*;

use std::fmt;
use std::str::FromStr;

use tracing::{debug, info};

use crate::config::DisplaySettings;
use crate::error::{Error, Result};

/// Configured display source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostKind {
    /// Profile if one is configured, else the first connected DRM output
    Auto,
    Profile,
    Drm,
    Mock,
}

impl HostKind {
    pub fn name(&self) -> &'static str {
        match self {
            HostKind::Auto => "auto",
            HostKind::Profile => "profile",
            HostKind::Drm => "drm",
            HostKind::Mock => "mock",
        }
    }

    pub fn all() -> &'static [HostKind] {
        &[HostKind::Auto, HostKind::Profile, HostKind::Drm, HostKind::Mock]
    }
}

impl FromStr for HostKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(HostKind::Auto),
            "profile" => Ok(HostKind::Profile),
            "drm" => Ok(HostKind::Drm),
            "mock" => Ok(HostKind::Mock),
            other => Err(Error::config_field_invalid(
                "display.source",
                format!(
                    "unknown source '{}'. Must be one of: {}",
                    other,
                    HostKind::all().iter().map(HostKind::name).collect::<Vec<_>>().join(", ")
                ),
            )),
        }
    }
}

impl fmt::Display for HostKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Build the host selected by the display settings
pub fn open_host(settings: &DisplaySettings) -> Result<Box<dyn DisplayHost>> {
    let kind: HostKind = settings.source.parse()?;
    debug!(source = %kind, "Opening display host");

    let host: Box<dyn DisplayHost> = match kind {
        HostKind::Profile => Box::new(open_profile(settings)?),
        HostKind::Drm => Box::new(DrmHost::discover(
            &settings.drm_root,
            settings.connector.as_deref(),
        )?),
        HostKind::Mock => Box::new(MockHost::new()),
        HostKind::Auto => match settings.profile {
            Some(_) => Box::new(open_profile(settings)?),
            None => {
                // Only "nothing found" becomes the auto hint; a broken
                // monitor keeps its own error and exit code
                let drm = DrmHost::discover(&settings.drm_root, settings.connector.as_deref())
                    .map_err(|e| match e {
                        Error::HostUnavailable { message } => Error::host_unavailable(format!(
                            "no profile configured and no DRM display found ({})",
                            message
                        )),
                        other => other,
                    })?;
                Box::new(drm)
            }
        },
    };

    info!(host = host.name(), "Display host ready");
    Ok(host)
}

fn open_profile(settings: &DisplaySettings) -> Result<ProfileHost> {
    let path = settings.profile.as_deref().ok_or_else(|| {
        Error::config_field_invalid("display.profile", "source 'profile' requires a profile path")
    })?;
    ProfileHost::load(path)
}
