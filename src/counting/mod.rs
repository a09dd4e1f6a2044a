// People counting module
// Distance-threshold zone occupancy and transit-pattern counting

pub mod counter;
pub mod tracker;

pub use counter::{CountingConfig, CountingConfigError, PeopleCounter};
pub use tracker::{PathTracker, Zone, ZoneEvent, ZoneStatus};
