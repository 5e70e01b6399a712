//! Integration tests for cap-world.

use std::cell::Cell;
use std::rc::Rc;

use cap_assembly::{Catalog, Configurable, FieldError, PropertyValue, Sheet};
use cap_capability::{Capability, CapabilityContext, NoopCapability};
use cap_core::{Frame, FrameConfig, Phase};
use cap_entity::EntityStore;
use cap_schedule::{CapabilityView, FrameStats};

use crate::{
    ActivationTimeline, NoopObserver, World, WorldBuilder, WorldError, WorldObserver,
    group_by_owner,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config(total_frames: u64) -> FrameConfig {
    FrameConfig {
        fixed_dt: 0.5,
        total_frames,
        snapshot_interval_frames: 1,
        seed: 42,
    }
}

fn world(total_frames: u64) -> World {
    WorldBuilder::new(test_config(total_frames)).build().unwrap()
}

/// Active exactly while the shared switch is on.
struct Switch(Rc<Cell<bool>>);

impl Capability for Switch {
    fn phase(&self) -> Phase {
        Phase::Gameplay
    }
    fn should_activate(&self, _ctx: &CapabilityContext<'_>) -> bool {
        self.0.get()
    }
    fn should_deactivate(&self, _ctx: &CapabilityContext<'_>) -> bool {
        !self.0.get()
    }
}

#[derive(Default)]
struct Recorder {
    starts:    Vec<Frame>,
    ends:      Vec<(Frame, FrameStats)>,
    snapshots: Vec<(Frame, f64, usize)>,
    run_end:   Option<Frame>,
}

impl WorldObserver for Recorder {
    fn on_frame_start(&mut self, frame: Frame) {
        self.starts.push(frame);
    }
    fn on_frame_end(&mut self, frame: Frame, stats: &FrameStats) {
        self.ends.push((frame, *stats));
    }
    fn on_snapshot(&mut self, frame: Frame, elapsed: f64, views: &[CapabilityView], _: &EntityStore) {
        self.snapshots.push((frame, elapsed, views.len()));
    }
    fn on_run_end(&mut self, frame: Frame) {
        self.run_end = Some(frame);
    }
}

// ── WorldBuilder ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_empty_world_at_frame_zero() {
        let w = world(10);
        assert_eq!(w.clock.current_frame, Frame::ZERO);
        assert!(w.scheduler.is_empty());
        assert!(w.entities.is_empty());
    }

    #[test]
    fn invalid_delta_is_rejected() {
        let mut config = test_config(10);
        config.fixed_dt = -1.0;
        let result = WorldBuilder::new(config).build();
        assert!(matches!(result, Err(WorldError::Config(_))));
    }
}

// ── Frame loop ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    #[test]
    fn run_reaches_end_frame_and_calls_hooks() {
        let mut w = world(4);
        w.add_capability(None, Box::new(NoopCapability::default())).unwrap();
        let mut rec = Recorder::default();
        w.run(&mut rec);

        assert_eq!(w.clock.current_frame, Frame(4));
        assert!((w.clock.elapsed_secs - 2.0).abs() < 1e-9);
        assert_eq!(rec.starts, vec![Frame(0), Frame(1), Frame(2), Frame(3)]);
        assert_eq!(rec.ends[0].1.activated, 1);
        assert_eq!(rec.ends[1].1.activated, 0);
        assert_eq!(rec.snapshots[0], (Frame(0), 0.5, 1));
        assert_eq!(rec.run_end, Some(Frame(4)));
    }

    #[test]
    fn second_run_does_nothing() {
        let mut w = world(3);
        w.run(&mut NoopObserver);
        let mut rec = Recorder::default();
        w.run(&mut rec);
        assert!(rec.starts.is_empty());
        assert_eq!(rec.run_end, Some(Frame(3)));
    }

    #[test]
    fn snapshot_interval_is_honored() {
        let mut config = test_config(5);
        config.snapshot_interval_frames = 2;
        let mut w = WorldBuilder::new(config.clone()).build().unwrap();
        let mut rec = Recorder::default();
        w.run(&mut rec);
        let frames: Vec<Frame> = rec.snapshots.iter().map(|s| s.0).collect();
        assert_eq!(frames, vec![Frame(0), Frame(2), Frame(4)]);

        config.snapshot_interval_frames = 0;
        let mut w = WorldBuilder::new(config).build().unwrap();
        let mut rec = Recorder::default();
        w.run(&mut rec);
        assert!(rec.snapshots.is_empty());
    }

    #[test]
    fn run_frames_ignores_end_frame() {
        let mut w = world(2);
        w.run_frames(5, &mut NoopObserver);
        assert_eq!(w.clock.current_frame, Frame(5));
    }

    #[test]
    fn step_uses_caller_delta() {
        let mut w = world(0);
        let id = w.add_capability(None, Box::new(NoopCapability::default())).unwrap();
        w.step(0.016);
        w.step(0.02);
        let state = w.scheduler.state(id).unwrap();
        assert!((state.active_elapsed - 0.036).abs() < 1e-6);
        assert!((w.clock.elapsed_secs - 0.036).abs() < 1e-6);
    }
}

// ── Entities and capabilities ─────────────────────────────────────────────────

#[cfg(test)]
mod lifecycle_tests {
    use super::*;

    #[test]
    fn add_capability_requires_live_owner() {
        let mut w = world(1);
        let e = w.spawn_entity("e");
        w.destroy_entity(e);
        let result = w.add_capability(Some(e), Box::new(NoopCapability::default()));
        assert!(matches!(result, Err(WorldError::Entity(_))));
        assert!(w.scheduler.is_empty());
    }

    #[test]
    fn destroy_entity_removes_owned_capabilities() {
        let mut w = world(1);
        let e = w.spawn_entity("e");
        let other = w.spawn_entity("other");
        w.add_capability(Some(e), Box::new(NoopCapability::default())).unwrap();
        w.add_capability(Some(e), Box::new(NoopCapability::new(Phase::Audio))).unwrap();
        let kept = w.add_capability(Some(other), Box::new(NoopCapability::default())).unwrap();

        assert_eq!(w.destroy_entity(e), 2);
        assert_eq!(w.destroy_entity(e), 0);
        assert_eq!(w.views().iter().map(|v| v.id).collect::<Vec<_>>(), vec![kept]);
    }

    #[test]
    fn remove_capability_round_trip() {
        let mut w = world(1);
        let id = w.add_capability(None, Box::new(NoopCapability::default())).unwrap();
        assert!(w.remove_capability(id));
        assert!(!w.remove_capability(id));
    }

    #[test]
    fn assemble_uses_world_catalog() {
        #[derive(Default)]
        struct Speed(f32);
        impl Configurable for Speed {
            fn set_field(&mut self, field: &str, value: &PropertyValue) -> Result<(), FieldError> {
                match field {
                    "value" => self.0 = value.as_float()?,
                    _ => return Err(FieldError::UnknownField),
                }
                Ok(())
            }
        }

        let mut catalog = Catalog::new();
        catalog
            .register_component::<Speed>("Speed")
            .register_capability("Idle", || Box::new(NoopCapability::default()));
        let mut w = WorldBuilder::new(test_config(1)).catalog(catalog).build().unwrap();

        let sheet = Sheet::new()
            .with_component("Speed", [("value", PropertyValue::Float(3.5))])
            .with_capability("Idle");
        let (e, report) = w.assemble("runner", &sheet).unwrap();
        assert!(report.is_clean());
        assert_eq!(w.entities.component::<Speed>(e).map(|s| s.0), Some(3.5));
        assert_eq!(w.scheduler.owned_by(e).len(), 1);

        let report = w.apply_sheet(e, &Sheet::new().with_capability("Idle")).unwrap();
        assert_eq!(report.capabilities.len(), 1);
        assert_eq!(w.scheduler.owned_by(e).len(), 2);
    }
}

// ── ActivationTimeline ────────────────────────────────────────────────────────

#[cfg(test)]
mod timeline_tests {
    use super::*;

    fn observe(w: &World, timeline: &mut ActivationTimeline) -> usize {
        let views = w.views();
        timeline.observe(w.clock.current_frame, w.clock.elapsed_secs, &views, &w.entities)
    }

    #[test]
    fn records_first_sighting_and_every_flip() {
        let mut w = world(0);
        let e = w.spawn_entity("hero");
        let on = Rc::new(Cell::new(true));
        let id = w.add_capability(Some(e), Box::new(Switch(on.clone()))).unwrap();
        let mut timeline = ActivationTimeline::new(100.0);

        w.step(1.0);
        assert_eq!(observe(&w, &mut timeline), 1);
        w.step(1.0);
        assert_eq!(observe(&w, &mut timeline), 0);
        on.set(false);
        w.step(1.0);
        assert_eq!(observe(&w, &mut timeline), 1);

        let events: Vec<_> = timeline.events_for(id).collect();
        assert_eq!(events.len(), 2);
        assert!(events[0].active);
        assert!(!events[1].active);
        assert_eq!(events[1].owner_name, "hero");
        assert_eq!(events[1].type_name, "Switch");
        assert_eq!(events[1].time, 3.0);
        assert_eq!(timeline.last_seen(id), Some(false));
    }

    #[test]
    fn old_events_fall_out_of_window() {
        let mut w = world(0);
        let e = w.spawn_entity("hero");
        let on = Rc::new(Cell::new(true));
        w.add_capability(Some(e), Box::new(Switch(on.clone()))).unwrap();
        let mut timeline = ActivationTimeline::new(2.0);

        w.step(1.0);
        observe(&w, &mut timeline); // t = 1, active
        on.set(false);
        w.step(1.0);
        observe(&w, &mut timeline); // t = 2, inactive
        assert_eq!(timeline.len(), 2);

        w.step(1.0);
        w.step(1.0);
        observe(&w, &mut timeline); // t = 4, cutoff 2
        assert_eq!(timeline.len(), 1);
        assert!(!timeline.events().next().unwrap().active);
    }

    #[test]
    fn removed_capabilities_and_dead_owners_are_forgotten() {
        let mut w = world(0);
        let a = w.spawn_entity("a");
        let b = w.spawn_entity("b");
        let on = Rc::new(Cell::new(true));
        let ca = w.add_capability(Some(a), Box::new(Switch(on.clone()))).unwrap();
        let cb = w.add_capability(Some(b), Box::new(Switch(on.clone()))).unwrap();
        let mut timeline = ActivationTimeline::default();

        w.step(0.1);
        observe(&w, &mut timeline);
        assert_eq!(timeline.len(), 2);

        w.remove_capability(ca);
        w.entities.despawn(b);
        w.step(0.1);
        observe(&w, &mut timeline);
        assert!(timeline.is_empty());
        assert_eq!(timeline.last_seen(ca), None);
        assert_eq!(timeline.last_seen(cb), None);
    }

    #[test]
    fn ownerless_capabilities_are_not_tracked() {
        let mut w = world(0);
        w.add_capability(None, Box::new(NoopCapability::default())).unwrap();
        let mut timeline = ActivationTimeline::default();
        w.step(0.1);
        assert_eq!(observe(&w, &mut timeline), 0);
    }

    #[test]
    fn works_as_run_observer() {
        let mut w = world(6);
        let e = w.spawn_entity("hero");
        w.add_capability(Some(e), Box::new(NoopCapability::default())).unwrap();
        let mut timeline = ActivationTimeline::default();
        w.run(&mut timeline);
        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline.events().next().unwrap().frame, Frame(0));
    }
}

// ── Grouping ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod grouping_tests {
    use super::*;

    struct Beta;
    impl Capability for Beta {
        fn phase(&self) -> Phase {
            Phase::Movement
        }
    }

    struct Alpha;
    impl Capability for Alpha {
        fn phase(&self) -> Phase {
            Phase::Movement
        }
    }

    #[test]
    fn groups_by_owner_name_then_phase_then_type() {
        let mut w = world(0);
        let zed = w.spawn_entity("zed");
        let amy = w.spawn_entity("amy");
        w.add_capability(Some(zed), Box::new(NoopCapability::default())).unwrap();
        w.add_capability(Some(amy), Box::new(NoopCapability::new(Phase::Audio))).unwrap();
        w.add_capability(Some(amy), Box::new(Beta)).unwrap();
        w.add_capability(Some(amy), Box::new(Alpha)).unwrap();
        w.add_capability(None, Box::new(NoopCapability::default())).unwrap();

        let groups = group_by_owner(&w.views(), &w.entities);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].name, "amy");
        assert_eq!(groups[0].capability_count(), 3);

        let phases: Vec<Phase> = groups[0].phases.iter().map(|(p, _)| *p).collect();
        assert_eq!(phases, vec![Phase::Movement, Phase::Audio]);
        let movement: Vec<&str> = groups[0].phases[0].1.iter().map(|v| v.type_name).collect();
        assert_eq!(movement, vec!["Alpha", "Beta"]);

        assert_eq!(groups[1].owner, zed);
    }
}
