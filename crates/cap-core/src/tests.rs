//! Unit tests for cap-core.

#[cfg(test)]
mod ids {
    use crate::{CapabilityId, EntityId};

    #[test]
    fn default_is_invalid() {
        assert_eq!(CapabilityId::default(), CapabilityId::INVALID);
        assert_eq!(EntityId::default(), EntityId::INVALID);
    }

    #[test]
    fn entity_generations_distinguish_handles() {
        let a = EntityId::new(3, 0);
        let b = EntityId::new(3, 1);
        assert_ne!(a, b);
        assert_eq!(a.index(), b.index());
    }

    #[test]
    fn display_formats() {
        assert_eq!(CapabilityId(7).to_string(), "CapabilityId(7)");
        assert_eq!(EntityId::new(2, 5).to_string(), "EntityId(2v5)");
    }
}

#[cfg(test)]
mod phase {
    use crate::Phase;

    #[test]
    fn all_is_in_declaration_order() {
        for (i, phase) in Phase::ALL.iter().enumerate() {
            assert_eq!(phase.index(), i);
            assert_eq!(Phase::from_index(i), Some(*phase));
        }
        assert_eq!(Phase::from_index(Phase::ALL.len()), None);
    }

    #[test]
    fn ordering_matches_frame_order() {
        assert!(Phase::Input < Phase::Movement);
        assert!(Phase::Movement < Phase::Gameplay);
        assert!(Phase::Gameplay < Phase::PostWork);
        assert_eq!(Phase::ALL.first(), Some(&Phase::Separated));
        assert_eq!(Phase::ALL.last(), Some(&Phase::PostWork));
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("movement".parse::<Phase>().unwrap(), Phase::Movement);
        assert_eq!(" AfterPhysics ".parse::<Phase>().unwrap(), Phase::AfterPhysics);
        assert!("Rendering".parse::<Phase>().is_err());
    }

    #[test]
    fn default_is_separated() {
        assert_eq!(Phase::default(), Phase::Separated);
    }
}

#[cfg(test)]
mod instigator {
    use std::collections::HashSet;

    use crate::{CapabilityId, Instigator, SchedulerId};

    #[test]
    fn equal_iff_same_source() {
        let a = Instigator::Capability(CapabilityId(1));
        let b = Instigator::Capability(CapabilityId(1));
        let c = Instigator::Capability(CapabilityId(2));
        let s = Instigator::Scheduler(SchedulerId(1));
        assert_eq!(a, b);
        assert_ne!(a, c);
        // Same raw number, different kind of source.
        assert_ne!(a, s);
    }

    #[test]
    fn usable_as_hash_key() {
        let mut set = HashSet::new();
        set.insert(Instigator::from(CapabilityId(4)));
        set.insert(Instigator::from(CapabilityId(4)));
        set.insert(Instigator::from(SchedulerId(0)));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn accessors() {
        assert!(Instigator::from(SchedulerId(0)).is_scheduler());
        assert_eq!(Instigator::from(CapabilityId(9)).capability(), Some(CapabilityId(9)));
        assert_eq!(Instigator::from(SchedulerId(9)).capability(), None);
    }
}

#[cfg(test)]
mod time {
    use crate::{Frame, FrameClock, FrameConfig};

    #[test]
    fn clock_advances_frames_and_seconds() {
        let mut clock = FrameClock::new();
        clock.advance(0.5);
        clock.advance(0.25);
        assert_eq!(clock.current_frame, Frame(2));
        assert!((clock.elapsed_secs - 0.75).abs() < 1e-9);
    }

    #[test]
    fn default_config_is_valid() {
        let config = FrameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.end_frame(), Frame(600));
    }

    #[test]
    fn non_positive_dt_rejected() {
        let mut config = FrameConfig::default();
        config.fixed_dt = 0.0;
        assert!(config.validate().is_err());
        config.fixed_dt = f32::NAN;
        assert!(config.validate().is_err());
    }
}

#[cfg(test)]
mod naming {
    use crate::short_type_name;

    #[test]
    fn strips_module_path() {
        assert_eq!(short_type_name("a::b::Foo"), "Foo");
        assert_eq!(short_type_name("Foo"), "Foo");
    }

    #[test]
    fn keeps_generic_argument_paths() {
        assert_eq!(short_type_name("a::b::Foo<c::Bar>"), "Foo<c::Bar>");
    }
}
