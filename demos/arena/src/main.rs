//! arena — headless demo for the capability framework.
//!
//! Assembles a handful of entities from embedded CSV sheets, runs ten
//! simulated seconds at 60 frames per second, and logs every capability
//! activation change the timeline observes.  Set `RUST_LOG=debug` to see
//! registrations, hits and per-sheet assembly summaries.

mod capabilities;
mod components;

use std::io::Cursor;

use anyhow::Result;

use cap_assembly::{Catalog, load_sheet_reader};
use cap_core::{EntityId, Frame, FrameConfig};
use cap_entity::EntityStore;
use cap_schedule::{CapabilityView, FrameStats};
use cap_world::{ActivationTimeline, WorldBuilder, WorldObserver, group_by_owner};

use capabilities::{Hazard, Regenerate, Rest, Wander};
use components::{Body, Dice, Stamina, Vitals};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:                 u64 = 42;
const TOTAL_FRAMES:         u64 = 600;
const SNAPSHOT_INTERVAL:    u64 = 6;   // ten snapshots per simulated second
const TIMELINE_WINDOW_SECS: f64 = 5.0;
const RUNNER_COUNT:         usize = 3;

const RUNNER_SHEET: &str = include_str!("../sheets/runner.csv");
const BRUTE_SHEET:  &str = include_str!("../sheets/brute.csv");

// ── Observer ──────────────────────────────────────────────────────────────────

/// Feeds the timeline and logs what it adds.
struct ArenaObserver {
    timeline:    ActivationTimeline,
    transitions: usize,
}

impl WorldObserver for ArenaObserver {
    fn on_frame_end(&mut self, _frame: Frame, stats: &FrameStats) {
        self.transitions += stats.activated + stats.deactivated;
    }

    fn on_snapshot(
        &mut self,
        frame:        Frame,
        elapsed_secs: f64,
        views:        &[CapabilityView],
        entities:     &EntityStore,
    ) {
        let added = self.timeline.observe(frame, elapsed_secs, views, entities);
        let skip = self.timeline.len().saturating_sub(added);
        for event in self.timeline.events().skip(skip) {
            tracing::info!(
                time = event.time,
                owner = %event.owner_name,
                capability = event.type_name,
                active = event.active,
                "activation"
            );
        }
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // 1. Catalog: every name a sheet may use.
    let mut catalog = Catalog::new();
    catalog
        .register_component::<Vitals>("Vitals")
        .register_component::<Stamina>("Stamina")
        .register_component::<Body>("Body")
        .register_capability_default::<Wander>("Wander")
        .register_capability_default::<Rest>("Rest")
        .register_capability_default::<Regenerate>("Regenerate")
        .register_capability_default::<Hazard>("Hazard");

    // 2. World.
    let config = FrameConfig {
        fixed_dt:                 1.0 / 60.0,
        total_frames:             TOTAL_FRAMES,
        snapshot_interval_frames: SNAPSHOT_INTERVAL,
        seed:                     SEED,
    };
    let mut world = WorldBuilder::new(config).catalog(catalog).build()?;

    // 3. Sheets.
    let runner = load_sheet_reader(Cursor::new(RUNNER_SHEET))?;
    let brute = load_sheet_reader(Cursor::new(BRUTE_SHEET))?;

    // 4. Entities.
    let mut spawned: Vec<EntityId> = Vec::new();
    for i in 1..=RUNNER_COUNT {
        let (id, report) = world.assemble(&format!("runner-{i}"), &runner)?;
        tracing::debug!(%id, capabilities = report.capabilities.len(), "runner assembled");
        spawned.push(id);
    }
    let (id, report) = world.assemble("brute", &brute)?;
    for diagnostic in &report.diagnostics {
        tracing::info!(%id, %diagnostic, "brute sheet");
    }
    spawned.push(id);

    for &id in &spawned {
        world.entities.insert_component(id, Dice::seeded(world.config.seed, id))?;
    }
    tracing::info!(
        entities = world.entities.len(),
        capabilities = world.scheduler.len(),
        "arena ready"
    );

    // 5. Run.
    let mut observer = ArenaObserver {
        timeline:    ActivationTimeline::new(TIMELINE_WINDOW_SECS),
        transitions: 0,
    };
    world.run(&mut observer);

    // 6. Summary.
    println!();
    println!("=== arena — {} after {} ===", world.clock, TOTAL_FRAMES);
    println!("transitions: {}", observer.transitions);
    for group in group_by_owner(&world.views(), &world.entities) {
        let health = world.entities.component::<Vitals>(group.owner).map_or(0.0, |v| v.health);
        let pos = world.entities.component::<Body>(group.owner).map_or([0.0; 3], |b| b.position);
        println!(
            "{} ({})  health {:.1}  at ({:.1}, {:.1})",
            group.name, group.owner, health, pos[0], pos[2]
        );
        for (phase, caps) in &group.phases {
            for cap in caps {
                let state = if cap.active { "active" } else { "inactive" };
                println!("    {:<16} {:<12} {state}", phase.name(), cap.type_name);
            }
        }
    }
    let survivors = spawned.iter().filter(|&&id| world.entities.is_alive(id)).count();
    println!("survivors: {survivors}/{}", spawned.len());

    Ok(())
}
