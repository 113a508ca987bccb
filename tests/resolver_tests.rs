mod common;

use common::sample_job;
use moldtrack_server::pdf::resolver::{self, FieldValue, KNOWN_PATHS};

#[test]
fn test_every_known_path_resolves_on_populated_job() {
    let job = sample_job();
    for path in KNOWN_PATHS {
        assert!(
            resolver::resolve(&job, path).is_some(),
            "path '{path}' did not resolve on a fully populated job"
        );
    }
}

#[test]
fn test_unknown_path_resolves_to_none() {
    let job = sample_job();
    assert!(resolver::resolve(&job, "customer.nickname").is_none());
    assert!(resolver::resolve(&job, "inspection.moistureReadings.0.room").is_none());
    assert!(resolver::resolve(&job, "").is_none());
}

#[test]
fn test_nested_path_resolution() {
    let job = sample_job();
    assert_eq!(
        resolver::resolve(&job, "insurance.adjuster.email"),
        Some(FieldValue::Text("d.whitfield@lonestar.example".to_string()))
    );
}

#[test]
fn test_unset_optional_leaf_resolves_to_none() {
    let mut job = sample_job();
    job.insurance.adjuster.company = None;
    assert!(resolver::resolve(&job, "insurance.adjuster.company").is_none());
}

#[test]
fn test_empty_string_resolves_but_counts_as_empty() {
    let mut job = sample_job();
    job.insurance.adjuster.email = String::new();
    let value = resolver::resolve(&job, "insurance.adjuster.email").unwrap();
    assert!(value.is_empty());
}

#[test]
fn test_enum_leaves_resolve_to_wire_names() {
    let job = sample_job();
    assert_eq!(
        resolver::resolve(&job, "lossInfo.lossType"),
        Some(FieldValue::Text("pipe_burst".to_string()))
    );
    assert_eq!(
        resolver::resolve(&job, "property.propertyType"),
        Some(FieldValue::Text("residential".to_string()))
    );
    assert_eq!(
        resolver::resolve(&job, "status"),
        Some(FieldValue::Text("ready".to_string()))
    );
}

#[test]
fn test_list_and_flag_leaves() {
    let job = sample_job();
    assert_eq!(
        resolver::resolve(&job, "lossInfo.affectedRooms"),
        Some(FieldValue::List(vec![
            "Kitchen".to_string(),
            "Hallway".to_string()
        ]))
    );
    assert_eq!(
        resolver::resolve(&job, "customer.isPolicyHolder"),
        Some(FieldValue::Flag(true))
    );

    let mut job = sample_job();
    job.loss_info.affected_rooms.clear();
    let value = resolver::resolve(&job, "lossInfo.affectedRooms").unwrap();
    assert!(value.is_empty(), "empty list should count as not provided");
}

#[test]
fn test_numeric_leaves_are_always_present() {
    let mut job = sample_job();
    job.loss_info.affected_square_footage = 0;
    let value = resolver::resolve(&job, "lossInfo.affectedSquareFootage").unwrap();
    assert_eq!(value, FieldValue::Number(0.0));
    assert!(!value.is_empty(), "a zero number is still a provided value");
}
