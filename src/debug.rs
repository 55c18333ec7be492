/*
 * Debug Information Module
 *
 * This module defines the TickStats struct that summarizes one simulation
 * update for logging or for display by a presentation layer.
 *
 * Includes metrics for:
 * - Population per role after the tick
 * - Boids removed during compaction
 * - Hunters converted to prey
 * - Wall time spent in the update
 */

use std::time::Duration;

use crate::behavior::Role;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoleCounts {
    pub flockers: usize,
    pub prey: usize,
    pub hunters: usize,
}

impl RoleCounts {
    pub fn add(&mut self, role: Role) {
        match role {
            Role::Flocker => self.flockers += 1,
            Role::Prey => self.prey += 1,
            Role::Hunter => self.hunters += 1,
        }
    }

    pub fn get(&self, role: Role) -> usize {
        match role {
            Role::Flocker => self.flockers,
            Role::Prey => self.prey,
            Role::Hunter => self.hunters,
        }
    }

    pub fn total(&self) -> usize {
        self.flockers + self.prey + self.hunters
    }
}

impl FromIterator<Role> for RoleCounts {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        let mut counts = RoleCounts::default();
        for role in iter {
            counts.add(role);
        }
        counts
    }
}

// Summary of one update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickStats {
    pub tick: u64,
    pub population: RoleCounts,
    pub removed: usize,
    pub conversions: usize,
    pub elapsed: Duration,
}
