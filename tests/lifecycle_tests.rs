//! Entity lifecycle tests: uniqueness, capacity, consistency, rename atomicity

mod common;

use common::{assert_unique_and_consistent, create_parts};
use schem::core::{
    EntityHandle, EntityKind, NewEntity, PartType, RegistryError, RegistryService, VisualHandle,
};
use std::sync::atomic::{AtomicBool, Ordering};

// ============================================================================
// Uniqueness
// ============================================================================

#[test]
fn test_ids_stay_unique_across_mixed_operations() {
    let service = RegistryService::new();
    let mut live: Vec<EntityHandle> = Vec::new();

    // Deterministic interleaving of creates, renames, and destroys
    for step in 0..300usize {
        let part = PartType::all()[step % PartType::all().len()];
        match step % 5 {
            0 | 1 => live.push(service.create_entity(NewEntity::part(part)).unwrap()),
            2 => live.push(service.create_entity(NewEntity::wire()).unwrap()),
            3 if !live.is_empty() => {
                let index = (step * 7) % live.len();
                let handle = live.remove(index);
                service.destroy_entity(&handle).unwrap();
            }
            _ if !live.is_empty() => {
                let index = (step * 3) % live.len();
                let new_id = format!("{}_r{}", live[index].id.prefix(), step);
                service.rename_entity(&mut live[index], &new_id).unwrap();
            }
            _ => {}
        }
        assert_unique_and_consistent(&service);
    }

    assert_eq!(service.len(), live.len());
}

#[test]
fn test_destroyed_ids_are_reused_lowest_first() {
    let service = RegistryService::new();
    let resistors = create_parts(&service, PartType::Resistor, 4);

    service.destroy_entity(&resistors[2]).unwrap();
    service.destroy_entity(&resistors[0]).unwrap();

    let next = service.create_entity(NewEntity::part(PartType::Resistor)).unwrap();
    assert_eq!(next.id, "R_1");
    let next = service.create_entity(NewEntity::part(PartType::Resistor)).unwrap();
    assert_eq!(next.id, "R_3");
}

// ============================================================================
// Capacity
// ============================================================================

#[test]
fn test_fiftieth_part_succeeds_fifty_first_fails() {
    let service = RegistryService::new();
    let capacitors = create_parts(&service, PartType::Capacitor, 50);
    assert_eq!(capacitors.last().unwrap().id, "C_50");

    let err = service
        .create_entity(NewEntity::part(PartType::Capacitor))
        .unwrap_err();
    assert_eq!(
        err,
        RegistryError::CapacityExceeded {
            prefix: "C".to_string(),
            limit: 50
        }
    );

    // Failure leaves no trace
    assert_eq!(service.len(), 50);
    assert!(!service.is_used("C_51"));

    // Other prefixes are unaffected
    assert!(service.create_entity(NewEntity::part(PartType::Inductor)).is_ok());
}

#[test]
fn test_capacity_frees_up_after_destroy() {
    let service = RegistryService::new();
    let diodes = create_parts(&service, PartType::Diode, 50);
    service.destroy_entity(&diodes[17]).unwrap();

    let again = service.create_entity(NewEntity::part(PartType::Diode)).unwrap();
    assert_eq!(again.id, "D_18");
}

#[test]
fn test_wires_have_no_ceiling() {
    let service = RegistryService::new();
    for n in 1..=1000 {
        let wire = service.create_entity(NewEntity::wire()).unwrap();
        assert_eq!(wire.id.sequence(), n.to_string());
    }
    assert_eq!(service.snapshot().wires().len(), 1000);
}

// ============================================================================
// Lifecycle consistency
// ============================================================================

#[test]
fn test_create_then_destroy_leaves_nothing_behind() {
    let service = RegistryService::new();
    let ground = service
        .create_entity(NewEntity::part(PartType::Ground).with_visual(VisualHandle(3)))
        .unwrap();
    assert!(service.is_used("GND_1"));

    service.destroy_entity(&ground).unwrap();

    assert!(!service.is_used("GND_1"));
    assert_eq!(
        service.find_by_id("GND_1").unwrap_err(),
        RegistryError::EntityNotFound("GND_1".to_string())
    );
    assert!(service.find_by_visual(VisualHandle(3)).is_err());
    assert!(service.is_empty());
}

#[test]
fn test_lookup_by_visual_and_free_text() {
    let service = RegistryService::new();
    service
        .create_entity(NewEntity::part(PartType::Voltmeter).with_visual(VisualHandle(10)))
        .unwrap();
    service
        .create_entity(NewEntity::wire().with_visual(VisualHandle(11)))
        .unwrap();

    let wire = service.find_by_visual(VisualHandle(11)).unwrap();
    assert_eq!(wire.kind, EntityKind::Wire);

    let meter = service.find_by_id("g#VM_1.part-body").unwrap();
    assert_eq!(meter.kind, EntityKind::Part(PartType::Voltmeter));
}

#[test]
fn test_failed_operations_do_not_mutate() {
    let service = RegistryService::with_part_limit(1);
    service.create_entity(NewEntity::part(PartType::Transistor)).unwrap();
    let before = service.snapshot();

    assert!(service.create_entity(NewEntity::part(PartType::Transistor)).is_err());
    assert!(service.create_entity(NewEntity::wire().with_id("Q_1")).is_err());
    assert!(service.create_entity(NewEntity::wire().with_id("bad")).is_err());
    assert!(service.rewire("Q_1", &["Q_1".to_string()]).is_err());
    assert!(service.destroy_by_id("Q_2").is_err());

    let after = service.snapshot();
    assert_eq!(before.parts(), after.parts());
    assert_eq!(before.wires(), after.wires());
    assert_unique_and_consistent(&service);
}

// ============================================================================
// Rename atomicity
// ============================================================================

#[test]
fn test_rename_moves_id_from_a_to_b() {
    let service = RegistryService::new();
    let mut source = service
        .create_entity(NewEntity::part(PartType::CurrentSource))
        .unwrap();

    service.rename_entity(&mut source, "I_bias").unwrap();

    assert!(service.is_used("I_bias"));
    assert!(!service.is_used("I_1"));
    assert_eq!(service.find_by_id("I_bias").unwrap(), source);
}

#[test]
fn test_rename_is_atomic_for_concurrent_readers() {
    let service = RegistryService::new();
    let mut handle = service
        .create_entity(NewEntity::part(PartType::Resistor).with_id("R_a"))
        .unwrap();
    let done = AtomicBool::new(false);

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                while !done.load(Ordering::Acquire) {
                    // Exactly one of the two names is live at any observation
                    let snapshot = service.snapshot();
                    assert_eq!(snapshot.parts().len(), 1);
                    let id = snapshot.parts()[0].id.clone();
                    assert!(id == "R_a" || id == "R_b", "unexpected id {}", id);
                    assert!(service.is_consistent());
                }
            });
        }

        for i in 0..500 {
            let target = if i % 2 == 0 { "R_b" } else { "R_a" };
            service.rename_entity(&mut handle, target).unwrap();
        }
        done.store(true, Ordering::Release);
    });

    assert_eq!(handle.id, "R_a");
    assert!(service.is_used("R_a"));
    assert!(!service.is_used("R_b"));
}

#[test]
fn test_concurrent_creates_never_collide() {
    let service = RegistryService::new();

    std::thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                for _ in 0..25 {
                    service.create_entity(NewEntity::wire()).unwrap();
                    // Part creates may run out of capacity; that is fine here
                    let _ = service.create_entity(NewEntity::part(PartType::Inductor));
                }
            });
        }
    });

    assert_eq!(service.snapshot().wires().len(), 200);
    assert_eq!(service.snapshot().parts().len(), 50);
    assert_unique_and_consistent(&service);
}
