mod common;

use std::path::PathBuf;

use hole_out::catalog::CourseCatalog;
use hole_out::error::CoreError;
use hole_out::model::{HoleType, RoundAggregate, Tees};

fn bundled() -> CourseCatalog {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/courses.json");
    CourseCatalog::from_path(path).expect("bundled catalog loads")
}

#[test]
fn bundled_catalog_has_full_courses() {
    common::init_tracing();
    let catalog = bundled();
    assert_eq!(catalog.all_courses().len(), 3);
    for course in catalog.all_courses() {
        assert_eq!(course.holes.len(), 18);
        let numbers: Vec<u8> = course.holes.iter().map(|h| h.hole_number).collect();
        assert_eq!(numbers, (1..=18).collect::<Vec<_>>());
        assert_eq!(course.front_par() + course.back_par(), course.holes_par());
    }
    // the scorecard says 70, the holes add up to 71
    let maplewood = catalog.course_by_id(3).expect("course 3");
    assert_eq!((maplewood.par, maplewood.holes_par()), (70, 71));
}

#[test]
fn lookups_by_id_and_name() {
    let catalog = bundled();
    let maplewood = catalog.course_by_id(3).expect("course 3");
    assert_eq!(maplewood.name, "Maplewood Golf Club");
    assert_eq!(
        catalog.course_by_name("Southside Golf Course").map(|c| c.id),
        Some(2)
    );
    assert!(catalog.course_by_id(42).is_none());
    assert_eq!(catalog.course_name(42), "Course Unavailable");
    assert_eq!(catalog.course_name(1), "St. Boniface Golf Club");
}

#[test]
fn search_matches_name_or_address() {
    let catalog = bundled();
    let names = |text: &str| -> Vec<String> {
        catalog
            .search_courses(text)
            .into_iter()
            .map(|c| c.name.clone())
            .collect()
    };
    assert_eq!(names("MAPLE"), vec!["Maplewood Golf Club"]);
    assert_eq!(names("grande pointe"), vec!["Southside Golf Course"]);
    assert_eq!(names("").len(), 3);
    assert!(names("Augusta").is_empty());
}

#[test]
fn starting_a_round_copies_the_holes() {
    let catalog = bundled();
    let course = catalog.course_by_id(1).expect("course 1");
    let round = RoundAggregate::start(course, Tees::Blue);
    assert_eq!(round.course_id, 1);
    assert_eq!(round.holes().len(), 18);
    let first = &round.holes()[0];
    assert_eq!(first.par(), course.holes[0].par);
    assert_eq!(first.score(), first.par());
    assert_eq!(first.yardage(Tees::Blue), course.holes[0].yardages.blues);
    assert!(!first.is_scored());
}

#[test]
fn missing_hole_type_defaults_to_straight() {
    let json = r#"{"courses": [{
        "id": 9, "name": "Pitch", "address": "Anywhere",
        "yardages": {"blues": 900, "whites": 800, "reds": 700}, "par": 6,
        "holes": [
            {"hole_number": 2, "par": 3, "yardages": {"blues": 150, "whites": 140, "reds": 120}, "hole_type": "dog_left"},
            {"hole_number": 1, "par": 3, "yardages": {"blues": 160, "whites": 150, "reds": 130}}
        ]
    }]}"#;
    let catalog = CourseCatalog::from_json_str(json).expect("valid catalog");
    let course = catalog.course_by_id(9).expect("course 9");
    assert_eq!(course.holes[0].hole_number, 1);
    assert_eq!(course.holes[0].hole_type, HoleType::Straight);
    assert_eq!(course.holes[1].hole_type, HoleType::DogLeft);
}

#[test]
fn malformed_catalog_is_a_parse_error() {
    assert!(matches!(
        CourseCatalog::from_json_str("{\"courses\": 3}"),
        Err(CoreError::Parse(_))
    ));
    assert!(matches!(
        CourseCatalog::from_path("/definitely/not/here.json"),
        Err(CoreError::Other(_))
    ));
}

#[test]
fn repeated_hole_number_is_rejected() {
    let json = r#"{"courses": [{
        "id": 5, "name": "Twice", "address": "Nowhere",
        "yardages": {"blues": 300, "whites": 280, "reds": 260}, "par": 7,
        "holes": [
            {"hole_number": 1, "par": 3, "yardages": {"blues": 150, "whites": 140, "reds": 130}},
            {"hole_number": 1, "par": 4, "yardages": {"blues": 150, "whites": 140, "reds": 130}}
        ]
    }]}"#;
    match CourseCatalog::from_json_str(json) {
        Err(CoreError::Parse(reason)) => assert!(reason.contains("hole 1")),
        other => panic!("expected a parse error, got {other:?}"),
    }
}
