//! Ports to the outside world.
//!
//! Perception, navigation and randomness are supplied by collaborators
//! (an engine adapter, a sandbox, a test fake). The [`Env`] aggregate bundles
//! them so agents can query everything they need without hard coupling to
//! concrete implementations.
mod error;
mod navigation;
mod perception;
mod rng;

pub use error::OracleError;
pub use navigation::NavigationOracle;
pub use perception::{PerceptionOracle, Sighting};
pub use rng::{PcgRng, RngOracle, compute_seed};

/// Aggregates the ports consumed by agents and the coordinator during a tick.
#[derive(Clone, Copy)]
pub struct Env<'a> {
    perception: &'a dyn PerceptionOracle,
    navigation: &'a dyn NavigationOracle,
    rng: &'a dyn RngOracle,
}

impl<'a> Env<'a> {
    pub fn new(
        perception: &'a dyn PerceptionOracle,
        navigation: &'a dyn NavigationOracle,
        rng: &'a dyn RngOracle,
    ) -> Self {
        Self {
            perception,
            navigation,
            rng,
        }
    }

    /// Builds an environment from optional ports.
    ///
    /// # Errors
    ///
    /// Returns the `*NotAvailable` variant for the first missing port.
    pub fn try_from_parts(
        perception: Option<&'a dyn PerceptionOracle>,
        navigation: Option<&'a dyn NavigationOracle>,
        rng: Option<&'a dyn RngOracle>,
    ) -> Result<Self, OracleError> {
        Ok(Self::new(
            perception.ok_or(OracleError::PerceptionNotAvailable)?,
            navigation.ok_or(OracleError::NavigationNotAvailable)?,
            rng.ok_or(OracleError::RngNotAvailable)?,
        ))
    }

    #[inline]
    pub fn perception(&self) -> &'a dyn PerceptionOracle {
        self.perception
    }

    #[inline]
    pub fn navigation(&self) -> &'a dyn NavigationOracle {
        self.navigation
    }

    #[inline]
    pub fn rng(&self) -> &'a dyn RngOracle {
        self.rng
    }
}

impl std::fmt::Debug for Env<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Env").finish_non_exhaustive()
    }
}
