//! Sunside CLI - window seat advice for real flights.
//!
//! Resolves airports and local departure times, supplies an SPA solar
//! ephemeris to `sunside-core`, and renders the result.

pub mod airports;
pub mod config;
pub mod departure;
pub mod ephemeris;
pub mod output;
pub mod plan;

pub use airports::{Airport, AirportCatalog, AirportError};
pub use config::Config;
pub use departure::{resolve_departure, DepartureError};
pub use ephemeris::{EphemerisError, SpaEphemeris};
pub use plan::{Endpoint, FlightPlan, PlanError, PlanRequest};
