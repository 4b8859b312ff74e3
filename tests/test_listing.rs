use std::collections::HashMap;

use campdir_be::models::{Bootcamp, Course};
use campdir_be::query::{self, PageRef};
use serde_json::Value;

fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn fixture_bootcamps() -> Vec<Value> {
    let bootcamps: Vec<Bootcamp> =
        serde_json::from_str(include_str!("../data/bootcamps.json")).unwrap();
    bootcamps
        .into_iter()
        .map(|b| serde_json::to_value(b).unwrap())
        .collect()
}

#[test]
fn fixtures_deserialize_into_models() {
    let bootcamps: Vec<Bootcamp> =
        serde_json::from_str(include_str!("../data/bootcamps.json")).unwrap();
    let courses: Vec<Course> =
        serde_json::from_str(include_str!("../data/courses.json")).unwrap();

    assert_eq!(bootcamps.len(), 4);
    assert_eq!(courses.len(), 6);

    // Every course references a fixture bootcamp.
    for course in &courses {
        assert!(bootcamps.iter().any(|b| b.id == course.bootcamp));
    }

    // Slugs are unique across the fixture set.
    let mut slugs: Vec<&str> = bootcamps.iter().map(|b| b.slug.as_str()).collect();
    slugs.sort_unstable();
    slugs.dedup();
    assert_eq!(slugs.len(), bootcamps.len());
}

#[test]
fn cost_gte_filter_over_fixtures() {
    let query = query::parse(&params(&[("average_cost[gte]", "9000")]));
    let listing = query::run(&query, fixture_bootcamps());

    assert_eq!(listing.count, 3);
    for item in &listing.data {
        assert!(item["average_cost"].as_f64().unwrap() >= 9000.0);
    }
}

#[test]
fn city_filter_uses_nested_path() {
    let query = query::parse(&params(&[("location.city", "Boston")]));
    let listing = query::run(&query, fixture_bootcamps());

    assert_eq!(listing.count, 1);
    assert_eq!(listing.data[0]["name"], "Devworks Bootcamp");
}

#[test]
fn careers_filter_matches_array_membership() {
    let query = query::parse(&params(&[("careers", "Data Science")]));
    let listing = query::run(&query, fixture_bootcamps());

    assert_eq!(listing.count, 2);
}

#[test]
fn select_and_sort_combine() {
    let query = query::parse(&params(&[("select", "name,average_cost"), ("sort", "average_cost")]));
    let listing = query::run(&query, fixture_bootcamps());

    let costs: Vec<f64> = listing
        .data
        .iter()
        .map(|v| v["average_cost"].as_f64().unwrap())
        .collect();
    assert_eq!(costs, vec![8000.0, 9000.0, 10000.0, 12000.0]);

    let first = listing.data[0].as_object().unwrap();
    assert!(first.contains_key("id"));
    assert!(first.contains_key("name"));
    assert!(!first.contains_key("description"));
}

#[test]
fn pagination_descriptors_follow_the_page_window() {
    let query = query::parse(&params(&[("page", "2"), ("limit", "1")]));
    let listing = query::run(&query, fixture_bootcamps());

    assert_eq!(listing.count, 4);
    assert_eq!(listing.data.len(), 1);
    assert_eq!(listing.previous, Some(PageRef { page: 1, limit: 1 }));
    assert_eq!(listing.next, Some(PageRef { page: 3, limit: 1 }));
}

#[test]
fn default_order_is_newest_first() {
    let query = query::parse(&params(&[]));
    let listing = query::run(&query, fixture_bootcamps());

    // Devcentral was created last in the fixtures.
    assert_eq!(listing.data[0]["name"], "Devcentral Bootcamp");
}
