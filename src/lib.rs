//! # satprop
//!
//! SGP4/SDP4 orbit propagation from NORAD two-line element sets.
//!
//! Parses TLEs, normalizes them into mean orbital elements, and propagates
//! position and velocity in the TEME frame. Near-Earth orbits (period under
//! 225 minutes) use SGP4; longer periods pick up the SDP4 lunar/solar and
//! Earth-resonance corrections automatically.
//!
//! ```no_run
//! use satprop::{GravityModel, OpsMode, Propagator, Tle};
//!
//! # fn main() -> satprop::Result<()> {
//! let tle = Tle::parse(
//!     "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927",
//!     "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537",
//! )?;
//! let sat = Propagator::from_tle(&tle, GravityModel::Wgs72, OpsMode::Improved)?;
//! let state = sat.propagate(360.0)?; // minutes after epoch
//! println!("r = {:?} km, v = {:?} km/s", state.r, state.v);
//! # Ok(())
//! # }
//! ```

pub mod constants;
mod deepspace;
pub mod elements;
pub mod epoch;
pub mod gravity;
pub mod propagator;
pub mod tle;

pub use elements::{Elements, ElementsError};
pub use gravity::{GravityConstants, GravityModel};
pub use propagator::{
    propagate_batch, InitError, OpsMode, PropagationError, Propagator, StateVector,
};
pub use tle::{Tle, TleError};

use thiserror::Error;

/// Any error this crate produces, for callers that want one catch-all type.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Tle(#[from] TleError),

    #[error(transparent)]
    Elements(#[from] ElementsError),

    #[error(transparent)]
    Init(#[from] InitError),

    #[error(transparent)]
    Propagation(#[from] PropagationError),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Propagator {
    /// Build a propagation record straight from a parsed TLE.
    pub fn from_tle(tle: &Tle, model: GravityModel, ops_mode: OpsMode) -> Result<Self> {
        let elements = Elements::from_tle(tle)?;
        Ok(Propagator::new(elements, model, ops_mode)?)
    }
}
