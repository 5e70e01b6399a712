//! Owner → phase → capability tree for monitor displays.

use cap_core::{EntityId, Phase};
use cap_entity::EntityStore;
use cap_schedule::CapabilityView;

/// Capabilities of one owner, bucketed by phase.
#[derive(Clone, Debug, PartialEq)]
pub struct OwnerGroup {
    pub owner:  EntityId,
    pub name:   String,
    /// Non-empty phases only, in tick order.  Capabilities inside a phase
    /// are sorted by type name.
    pub phases: Vec<(Phase, Vec<CapabilityView>)>,
}

impl OwnerGroup {
    pub fn capability_count(&self) -> usize {
        self.phases.iter().map(|(_, caps)| caps.len()).sum()
    }
}

/// Group `views` by live owner, sorted by owner name (then id).  Ownerless
/// capabilities and those whose owner has been despawned are left out.
pub fn group_by_owner(views: &[CapabilityView], entities: &EntityStore) -> Vec<OwnerGroup> {
    let mut groups: Vec<OwnerGroup> = Vec::new();

    for view in views {
        let Some(owner) = view.owner.filter(|&e| entities.is_alive(e)) else {
            continue;
        };
        let pos = match groups.iter().position(|g| g.owner == owner) {
            Some(pos) => pos,
            None => {
                groups.push(OwnerGroup {
                    owner,
                    name:   entities.name(owner).unwrap_or_default().to_string(),
                    phases: Vec::new(),
                });
                groups.len() - 1
            }
        };
        let phases = &mut groups[pos].phases;
        match phases.iter_mut().find(|(p, _)| *p == view.phase) {
            Some((_, caps)) => caps.push(view.clone()),
            None => phases.push((view.phase, vec![view.clone()])),
        }
    }

    for group in &mut groups {
        group.phases.sort_by_key(|(phase, _)| *phase);
        for (_, caps) in &mut group.phases {
            caps.sort_by(|a, b| a.type_name.cmp(b.type_name).then(a.id.cmp(&b.id)));
        }
    }
    groups.sort_by(|a, b| a.name.cmp(&b.name).then(a.owner.cmp(&b.owner)));
    groups
}
