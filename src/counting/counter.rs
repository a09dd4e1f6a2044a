// Occupancy counting
// Per-zone minimum-distance smoothing feeding the transit tracker

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::counting::tracker::{PathTracker, Zone, ZoneEvent, ZoneStatus};

/// Errors raised when a counting configuration fails validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CountingConfigError {
    #[error("distance_samples must be greater than zero")]
    ZeroDistanceSamples,
}

/// Configuration for the people counter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountingConfig {
    /// Ranging samples retained per zone for minimum-distance smoothing
    pub distance_samples: usize,

    /// A zone counts as occupied while the smoothed distance is below
    /// this, in millimeters
    pub distance_threshold_mm: u16,
}

impl Default for CountingConfig {
    fn default() -> Self {
        CountingConfig {
            distance_samples: 10,
            distance_threshold_mm: 1600,
        }
    }
}

impl CountingConfig {
    pub fn validate(&self) -> Result<(), CountingConfigError> {
        if self.distance_samples == 0 {
            return Err(CountingConfigError::ZeroDistanceSamples);
        }
        Ok(())
    }
}

/// Running occupancy count over a two-zone ranging stream
///
/// Each measurement lands in its zone's ring buffer; the zone counts as
/// occupied while the minimum buffered distance sits below the threshold,
/// which rides out single long-range outliers mid-transit. Completed
/// transits adjust the count through the path tracker.
pub struct PeopleCounter {
    config: CountingConfig,
    tracker: PathTracker,
    distances: [VecDeque<u16>; 2],
    people_count: u16,
    entered_so_far: u32,
}

impl PeopleCounter {
    pub fn new(config: CountingConfig) -> Result<Self, CountingConfigError> {
        config.validate()?;
        Ok(PeopleCounter {
            config,
            tracker: PathTracker::new(),
            distances: [VecDeque::new(), VecDeque::new()],
            people_count: 0,
            entered_so_far: 0,
        })
    }

    /// Feed one ranging measurement for a zone
    pub fn process(&mut self, distance_mm: u16, zone: Zone) -> ZoneEvent {
        let buf = &mut self.distances[zone.index()];
        if buf.len() == self.config.distance_samples {
            buf.pop_front();
        }
        buf.push_back(distance_mm);

        // The buffer is never empty here, so the minimum always exists.
        let min_distance = buf.iter().copied().min().unwrap_or(u16::MAX);
        let status = if min_distance < self.config.distance_threshold_mm {
            ZoneStatus::Someone
        } else {
            ZoneStatus::Nobody
        };

        let event = self.tracker.update(status, zone);
        match event {
            ZoneEvent::SomeoneEnter => {
                self.people_count += 1;
                self.entered_so_far += 1;
                self.reset_distances();
                log::debug!("someone in, people count = {}", self.people_count);
            }
            ZoneEvent::SomeoneLeave => {
                if self.people_count > 0 {
                    self.people_count -= 1;
                }
                self.reset_distances();
                log::debug!("someone out, people count = {}", self.people_count);
            }
            ZoneEvent::InvalidPattern => {
                self.reset_distances();
                log::debug!("invalid transit pattern");
            }
            ZoneEvent::NoEvent | ZoneEvent::FillingPattern => {}
        }
        event
    }

    /// People currently inside
    pub fn count(&self) -> u16 {
        self.people_count
    }

    /// Lifetime total of entries
    pub fn entered_so_far(&self) -> u32 {
        self.entered_so_far
    }

    /// Reset the current occupancy to zero; the lifetime total stays
    pub fn clear_count(&mut self) {
        self.people_count = 0;
    }

    pub fn config(&self) -> &CountingConfig {
        &self.config
    }

    /// Last observed occupancy of a zone
    pub fn zone_status(&self, zone: Zone) -> ZoneStatus {
        self.tracker.status(zone)
    }

    fn reset_distances(&mut self) {
        self.distances[0].clear();
        self.distances[1].clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NEAR: u16 = 500;
    const FAR: u16 = 2000;

    fn counter() -> PeopleCounter {
        PeopleCounter::new(CountingConfig {
            distance_samples: 1,
            distance_threshold_mm: 1600,
        })
        .unwrap()
    }

    /// One full left-to-right transit
    fn enter_transit(c: &mut PeopleCounter) -> ZoneEvent {
        c.process(NEAR, Zone::Left);
        c.process(NEAR, Zone::Right);
        c.process(FAR, Zone::Left);
        c.process(FAR, Zone::Right)
    }

    fn leave_transit(c: &mut PeopleCounter) -> ZoneEvent {
        c.process(NEAR, Zone::Right);
        c.process(NEAR, Zone::Left);
        c.process(FAR, Zone::Right);
        c.process(FAR, Zone::Left)
    }

    /// Run the cold-start transit the tracker discards
    fn primed_counter() -> PeopleCounter {
        let mut c = counter();
        assert_eq!(enter_transit(&mut c), ZoneEvent::InvalidPattern);
        assert_eq!(c.count(), 0);
        c
    }

    #[test]
    fn test_zero_distance_samples_rejected() {
        let config = CountingConfig {
            distance_samples: 0,
            ..CountingConfig::default()
        };
        assert_eq!(
            PeopleCounter::new(config).err(),
            Some(CountingConfigError::ZeroDistanceSamples)
        );
    }

    #[test]
    fn test_enter_and_leave_adjust_count() {
        let mut c = primed_counter();

        assert_eq!(enter_transit(&mut c), ZoneEvent::SomeoneEnter);
        assert_eq!(enter_transit(&mut c), ZoneEvent::SomeoneEnter);
        assert_eq!(c.count(), 2);
        assert_eq!(c.entered_so_far(), 2);

        assert_eq!(leave_transit(&mut c), ZoneEvent::SomeoneLeave);
        assert_eq!(c.count(), 1);
        assert_eq!(c.entered_so_far(), 2);
    }

    #[test]
    fn test_count_never_goes_below_zero() {
        let mut c = primed_counter();

        assert_eq!(leave_transit(&mut c), ZoneEvent::SomeoneLeave);
        assert_eq!(c.count(), 0);
        assert_eq!(leave_transit(&mut c), ZoneEvent::SomeoneLeave);
        assert_eq!(c.count(), 0);
    }

    #[test]
    fn test_clear_count_keeps_lifetime_total() {
        let mut c = primed_counter();
        enter_transit(&mut c);
        enter_transit(&mut c);

        c.clear_count();
        assert_eq!(c.count(), 0);
        assert_eq!(c.entered_so_far(), 2);
    }

    #[test]
    fn test_minimum_distance_smoothing_rides_out_outliers() {
        let mut c = PeopleCounter::new(CountingConfig {
            distance_samples: 3,
            distance_threshold_mm: 1600,
        })
        .unwrap();

        c.process(NEAR, Zone::Left);
        assert_eq!(c.zone_status(Zone::Left), ZoneStatus::Someone);

        // A single long-range outlier does not release the zone while the
        // near sample is still buffered.
        c.process(FAR, Zone::Left);
        assert_eq!(c.zone_status(Zone::Left), ZoneStatus::Someone);

        // Once the near sample ages out of the ring, the zone clears.
        c.process(FAR, Zone::Left);
        c.process(FAR, Zone::Left);
        assert_eq!(c.zone_status(Zone::Left), ZoneStatus::Nobody);
    }
}
