//! Activation history for monitoring.
//!
//! [`ActivationTimeline`] watches capability snapshots and keeps an event
//! for every observed change of active state, limited to a sliding time
//! window.  It is a [`WorldObserver`], so plugging it into
//! [`World::run`](crate::World::run) is enough to collect history.

use std::collections::VecDeque;

use cap_core::collections::{Map, Set};
use cap_core::{CapabilityId, EntityId, Frame};
use cap_entity::EntityStore;
use cap_schedule::CapabilityView;

use crate::WorldObserver;

/// One observed activation state, recorded the first time a capability is
/// seen and again whenever its state flips.
#[derive(Clone, Debug, PartialEq)]
pub struct StateChangeEvent {
    pub capability: CapabilityId,
    pub type_name:  &'static str,
    pub owner:      EntityId,
    pub owner_name: String,
    pub active:     bool,
    /// Simulated seconds at the snapshot that observed the change.
    pub time:       f64,
    pub frame:      Frame,
}

/// Sliding-window log of capability activation changes.
///
/// Only capabilities with a live owner are tracked.  On every observation,
/// events older than the window are dropped, as are all events of
/// capabilities that are no longer registered or whose owner has gone.
///
/// Unregistering a capability drops its history straight away, even when
/// its owner lives on and the events are still inside the window.  A
/// capability that is gone has no row left to show them against.
#[derive(Clone, Debug)]
pub struct ActivationTimeline {
    window_secs: f64,
    last_seen:   Map<CapabilityId, bool>,
    events:      VecDeque<StateChangeEvent>,
}

impl ActivationTimeline {
    /// Keep events from the last `window_secs` simulated seconds.
    pub fn new(window_secs: f64) -> Self {
        Self {
            window_secs,
            last_seen: Map::default(),
            events:    VecDeque::new(),
        }
    }

    pub fn window_secs(&self) -> f64 {
        self.window_secs
    }

    /// Compare `views` with the last observation, record changes, then trim.
    /// Returns how many events were added.
    pub fn observe(
        &mut self,
        frame:    Frame,
        time:     f64,
        views:    &[CapabilityView],
        entities: &EntityStore,
    ) -> usize {
        let mut present = Set::default();
        let mut added = 0;

        for view in views {
            let Some(owner) = view.owner.filter(|&e| entities.is_alive(e)) else {
                continue;
            };
            present.insert(view.id);

            let changed = self.last_seen.insert(view.id, view.active) != Some(view.active);
            if changed {
                let owner_name = entities.name(owner).unwrap_or_default().to_string();
                tracing::trace!(
                    capability = %view.id,
                    kind = view.type_name,
                    owner = %owner_name,
                    active = view.active,
                    %frame,
                    "activation observed"
                );
                self.events.push_back(StateChangeEvent {
                    capability: view.id,
                    type_name:  view.type_name,
                    owner,
                    owner_name,
                    active:     view.active,
                    time,
                    frame,
                });
                added += 1;
            }
        }

        let cutoff = time - self.window_secs;
        self.events.retain(|e| e.time >= cutoff && present.contains(&e.capability));
        self.last_seen.retain(|id, _| present.contains(id));
        added
    }

    /// Every retained event, oldest first.
    pub fn events(&self) -> impl Iterator<Item = &StateChangeEvent> {
        self.events.iter()
    }

    /// Retained events of one capability, oldest first.
    pub fn events_for(&self, capability: CapabilityId) -> impl Iterator<Item = &StateChangeEvent> {
        self.events.iter().filter(move |e| e.capability == capability)
    }

    /// Last observed state of a capability still being tracked.
    pub fn last_seen(&self, capability: CapabilityId) -> Option<bool> {
        self.last_seen.get(&capability).copied()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Forget all history.
    pub fn clear(&mut self) {
        self.events.clear();
        self.last_seen.clear();
    }
}

impl Default for ActivationTimeline {
    /// Ten-second window.
    fn default() -> Self {
        Self::new(10.0)
    }
}

impl WorldObserver for ActivationTimeline {
    fn on_snapshot(
        &mut self,
        frame:        Frame,
        elapsed_secs: f64,
        views:        &[CapabilityView],
        entities:     &EntityStore,
    ) {
        self.observe(frame, elapsed_secs, views, entities);
    }
}
