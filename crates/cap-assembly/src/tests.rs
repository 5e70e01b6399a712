//! Unit tests for cap-assembly.

use std::io::Cursor;

use cap_capability::{Capability, CapabilityContext};
use cap_core::Phase;
use cap_entity::EntityStore;
use cap_schedule::Scheduler;

use crate::{
    Assembler, AssemblyError, Catalog, Configurable, Diagnostic, FieldError, PropertyValue, Sheet,
    load_sheet_reader,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

#[derive(Debug, Default, PartialEq)]
struct Health {
    max:   f32,
    regen: bool,
}

impl Configurable for Health {
    fn set_field(&mut self, field: &str, value: &PropertyValue) -> Result<(), FieldError> {
        match field {
            "max" => self.max = value.as_float()?,
            "regen" => self.regen = value.as_bool()?,
            _ => return Err(FieldError::UnknownField),
        }
        Ok(())
    }
}

#[derive(Debug, Default, PartialEq)]
struct Look {
    name:   String,
    tint:   [f32; 4],
    offset: [f32; 3],
    stance: i64,
}

impl Configurable for Look {
    fn set_field(&mut self, field: &str, value: &PropertyValue) -> Result<(), FieldError> {
        match field {
            "name" => self.name = value.as_str()?.to_string(),
            "tint" => self.tint = value.as_color()?,
            "offset" => self.offset = value.as_vector3()?,
            "stance" => self.stance = value.as_enum()?,
            _ => return Err(FieldError::UnknownField),
        }
        Ok(())
    }
}

/// Counts health up while active.
#[derive(Default)]
struct Regenerate;

impl Capability for Regenerate {
    fn phase(&self) -> Phase {
        Phase::Gameplay
    }

    fn should_activate(&self, ctx: &CapabilityContext<'_>) -> bool {
        ctx.owner_component::<Health>().is_some_and(|h| h.regen)
    }

    fn tick_active(&mut self, dt: f32, ctx: &mut CapabilityContext<'_>) {
        if ctx.state().active {
            if let Some(health) = ctx.owner_component_mut::<Health>() {
                health.max += dt;
            }
        }
    }
}

fn catalog() -> Catalog {
    let mut catalog = Catalog::new();
    catalog
        .register_component::<Health>("Health")
        .register_component::<Look>("Look")
        .register_capability_default::<Regenerate>("Regenerate");
    catalog
}

fn setup() -> (Scheduler, EntityStore) {
    let scheduler = Scheduler::new();
    let entities = scheduler.new_entity_store();
    (scheduler, entities)
}

const HERO_CSV: &str = "\
kind,name,field,type,value
# the hero
component,Health,,,
property,Health,max,float,100
property,Health,regen,bool,true
component,Look,,,
property,Look,name,string,Ayla
property,Look,tint,color,1;0.5;0
property,Look,offset,vector3,0;1.5;-2
property,Look,stance,enum,2
capability,Regenerate,,,
";

// ── PropertyValue ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod property_value {
    use super::*;

    #[test]
    fn parses_every_type_tag() {
        assert_eq!(PropertyValue::parse("int", "-3").unwrap(), PropertyValue::Int(-3));
        assert_eq!(PropertyValue::parse("float", "2.5").unwrap(), PropertyValue::Float(2.5));
        assert_eq!(PropertyValue::parse("bool", "0").unwrap(), PropertyValue::Bool(false));
        assert_eq!(PropertyValue::parse("BOOL", "True").unwrap(), PropertyValue::Bool(true));
        assert_eq!(
            PropertyValue::parse("string", " hi ").unwrap(),
            PropertyValue::Text("hi".into())
        );
        assert_eq!(
            PropertyValue::parse("vector3", "1; 2 ;3").unwrap(),
            PropertyValue::Vector3([1.0, 2.0, 3.0])
        );
        assert_eq!(PropertyValue::parse("enum", "4").unwrap(), PropertyValue::Enum(4));
    }

    #[test]
    fn three_channel_color_gets_opaque_alpha() {
        assert_eq!(
            PropertyValue::parse("color", "1;0;0").unwrap(),
            PropertyValue::Color([1.0, 0.0, 0.0, 1.0])
        );
        assert_eq!(
            PropertyValue::parse("color", "1;0;0;0.25").unwrap(),
            PropertyValue::Color([1.0, 0.0, 0.0, 0.25])
        );
    }

    #[test]
    fn rejects_malformed_values() {
        assert!(matches!(PropertyValue::parse("int", "1.5"), Err(AssemblyError::Parse(_))));
        assert!(PropertyValue::parse("vector3", "1;2").is_err());
        assert!(PropertyValue::parse("color", "1;2;x").is_err());
        assert!(PropertyValue::parse("bool", "maybe").is_err());
        assert!(PropertyValue::parse("quaternion", "0").is_err());
    }

    #[test]
    fn float_accessor_widens_ints() {
        assert_eq!(PropertyValue::Int(3).as_float(), Ok(3.0));
        assert_eq!(
            PropertyValue::Bool(true).as_float(),
            Err(FieldError::TypeMismatch { expected: "float", got: "bool" })
        );
    }
}

// ── Sheet loading ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::Write;

    use super::*;

    #[test]
    fn loads_components_properties_and_capabilities() {
        let sheet = load_sheet_reader(Cursor::new(HERO_CSV)).unwrap();
        assert_eq!(sheet.components.len(), 2);
        assert_eq!(sheet.capabilities, vec!["Regenerate".to_string()]);

        let health = sheet.component("Health").unwrap();
        assert_eq!(health.properties.len(), 2);
        assert_eq!(health.properties[0].field, "max");
        assert_eq!(health.properties[0].value, PropertyValue::Float(100.0));
    }

    #[test]
    fn repeated_component_rows_merge() {
        let csv = "kind,name,field,type,value\n\
                   component,Health,,,\n\
                   property,Health,max,float,1\n\
                   component,Health,,,\n\
                   property,Health,regen,bool,true\n";
        let sheet = load_sheet_reader(Cursor::new(csv)).unwrap();
        assert_eq!(sheet.components.len(), 1);
        assert_eq!(sheet.components[0].properties.len(), 2);
    }

    #[test]
    fn property_before_component_is_an_error() {
        let csv = "kind,name,field,type,value\nproperty,Health,max,float,1\n";
        let err = load_sheet_reader(Cursor::new(csv)).unwrap_err();
        assert!(err.to_string().contains("undeclared component"), "{err}");
    }

    #[test]
    fn bad_rows_report_their_position() {
        let csv = "kind,name,field,type,value\n\
                   component,Health,,,\n\
                   property,Health,max,float,lots\n";
        let err = load_sheet_reader(Cursor::new(csv)).unwrap_err();
        assert!(err.to_string().contains("row 2"), "{err}");

        let csv = "kind,name,field,type,value\nsystem,Physics,,,\n";
        assert!(load_sheet_reader(Cursor::new(csv)).is_err());
    }

    #[test]
    fn empty_sheet_is_valid() {
        let sheet = load_sheet_reader(Cursor::new("kind,name,field,type,value\n")).unwrap();
        assert!(sheet.is_empty());
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(HERO_CSV.as_bytes()).unwrap();
        let sheet = crate::load_sheet_csv(file.path()).unwrap();
        assert_eq!(sheet, load_sheet_reader(Cursor::new(HERO_CSV)).unwrap());
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = crate::load_sheet_csv(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, AssemblyError::Io(_)));
    }
}

// ── Catalog ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod catalog {
    use super::*;

    #[test]
    fn names_are_listed_sorted() {
        let catalog = catalog();
        assert_eq!(catalog.component_names(), vec!["Health", "Look"]);
        assert_eq!(catalog.capability_names(), vec!["Regenerate"]);
        assert!(catalog.has_component("Health"));
        assert!(!catalog.has_capability("Health"));
    }

    #[test]
    fn factories_build_fresh_instances() {
        let mut catalog = Catalog::new();
        catalog.register_capability("Idle", || {
            Box::new(cap_capability::NoopCapability::new(Phase::Audio))
        });
        let (mut s, mut e) = setup();
        let sheet = Sheet::new().with_capability("Idle");
        let assembler = Assembler::new(&catalog);
        let (a, ra) = assembler.assemble(&mut s, &mut e, "a", &sheet).unwrap();
        let (b, rb) = assembler.assemble(&mut s, &mut e, "b", &sheet).unwrap();
        assert_ne!(ra.capabilities, rb.capabilities);
        assert_eq!(s.owner(ra.capabilities[0]), Some(a));
        assert_eq!(s.owner(rb.capabilities[0]), Some(b));
    }
}

// ── Assembler ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod assembler {
    use super::*;

    #[test]
    fn assembles_components_then_capabilities() {
        let catalog = catalog();
        let (mut s, mut e) = setup();
        let sheet = load_sheet_reader(Cursor::new(HERO_CSV)).unwrap();

        let (hero, report) = Assembler::new(&catalog)
            .assemble(&mut s, &mut e, "hero", &sheet)
            .unwrap();

        assert!(report.is_clean(), "{:?}", report.diagnostics);
        assert_eq!(report.entity, hero);
        assert_eq!(report.components_added, vec!["Health", "Look"]);
        assert_eq!(report.properties_applied, 6);
        assert_eq!(e.name(hero), Some("hero"));
        assert_eq!(e.component::<Health>(hero), Some(&Health { max: 100.0, regen: true }));
        assert_eq!(
            e.component::<Look>(hero),
            Some(&Look {
                name:   "Ayla".into(),
                tint:   [1.0, 0.5, 0.0, 1.0],
                offset: [0.0, 1.5, -2.0],
                stance: 2,
            })
        );
        assert_eq!(s.owned_by(hero), report.capabilities);
    }

    #[test]
    fn assembled_capability_sees_components_on_first_tick() {
        let catalog = catalog();
        let (mut s, mut e) = setup();
        let sheet = load_sheet_reader(Cursor::new(HERO_CSV)).unwrap();
        let (hero, report) = Assembler::new(&catalog).assemble(&mut s, &mut e, "hero", &sheet).unwrap();

        s.update(0.5, &mut e);
        assert!(s.state(report.capabilities[0]).unwrap().active);
        assert_eq!(e.component::<Health>(hero).unwrap().max, 100.5);
    }

    #[test]
    fn unknown_names_become_diagnostics() {
        let catalog = catalog();
        let (mut s, mut e) = setup();
        let sheet = Sheet::new()
            .with_component("Mana", [("max", PropertyValue::Int(5))])
            .with_capability("Fly")
            .with_capability("Regenerate");

        let (_, report) = Assembler::new(&catalog).assemble(&mut s, &mut e, "x", &sheet).unwrap();
        assert_eq!(report.diagnostics, vec![
            Diagnostic::UnknownComponent("Mana".into()),
            Diagnostic::UnknownCapability("Fly".into()),
        ]);
        assert_eq!(report.capabilities.len(), 1);
    }

    #[test]
    fn bad_properties_are_skipped_not_fatal() {
        let catalog = catalog();
        let (mut s, mut e) = setup();
        let sheet = Sheet::new().with_component("Health", [
            ("max", PropertyValue::Text("lots".into())),
            ("armor", PropertyValue::Int(3)),
            ("regen", PropertyValue::Bool(true)),
        ]);

        let (id, report) = Assembler::new(&catalog).assemble(&mut s, &mut e, "x", &sheet).unwrap();
        assert_eq!(report.properties_applied, 1);
        assert_eq!(report.diagnostics.len(), 2);
        assert!(matches!(
            &report.diagnostics[0],
            Diagnostic::Field { field, error: FieldError::TypeMismatch { .. }, .. } if field == "max"
        ));
        assert!(matches!(
            &report.diagnostics[1],
            Diagnostic::Field { error: FieldError::UnknownField, .. }
        ));
        assert_eq!(e.component::<Health>(id), Some(&Health { max: 0.0, regen: true }));
    }

    #[test]
    fn existing_component_is_updated_in_place() {
        let catalog = catalog();
        let (mut s, mut e) = setup();
        let id = e.spawn("x");
        e.insert_component(id, Health { max: 7.0, regen: true }).unwrap();

        let sheet = Sheet::new().with_component("Health", [("max", PropertyValue::Float(9.0))]);
        let report = Assembler::new(&catalog).apply(&mut s, &mut e, id, &sheet).unwrap();

        assert_eq!(report.components_updated, vec!["Health"]);
        assert!(report.components_added.is_empty());
        assert_eq!(report.diagnostics, vec![Diagnostic::ComponentExisted("Health".into())]);
        // Fields the sheet does not mention are left alone.
        assert_eq!(e.component::<Health>(id), Some(&Health { max: 9.0, regen: true }));
    }

    #[test]
    fn applying_to_dead_entity_fails() {
        let catalog = catalog();
        let (mut s, mut e) = setup();
        let id = e.spawn("x");
        e.despawn(id);
        let err = Assembler::new(&catalog).apply(&mut s, &mut e, id, &Sheet::new()).unwrap_err();
        assert!(matches!(err, AssemblyError::Entity(_)));
        assert!(s.is_empty());
    }
}
