//! Collection loading against injected sources.

use std::sync::Arc;
use std::time::Duration;

use croft_content::collection::{order_key, CollectionLoader, CollectionOutcome, EmptyState};
use croft_content::schemas::animal_schema;
use croft_content::source::MemoryContentSource;

use crate::common::{
    animal_doc, animals_with_one_failure, CountingSource, RendezvousSource, ANIMALS,
};

fn names(outcome: &CollectionOutcome) -> Vec<String> {
    outcome
        .records()
        .iter()
        .filter_map(|r| r.get_str("name").map(String::from))
        .collect()
}

#[tokio::test]
async fn test_one_failed_document_does_not_fail_the_collection() {
    let source = Arc::new(CountingSource::new(animals_with_one_failure()));
    let loader = CollectionLoader::new(source.clone(), ANIMALS, animal_schema());

    let outcome = loader.load(|_| true, order_key).await;

    assert_eq!(names(&outcome), vec!["Buttercup", "Daisy"]);
    let CollectionOutcome::Loaded(report) = outcome else {
        panic!("expected a loaded collection");
    };
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].id, "2-clover");
    assert_eq!(source.fetches(), 3);
}

#[tokio::test]
async fn test_missing_order_sorts_last() {
    let source = MemoryContentSource::new()
        .with_document(format!("{ANIMALS}/a.md"), animal_doc("Two", Some(2)))
        .with_document(format!("{ANIMALS}/b.md"), animal_doc("Absent", None))
        .with_document(format!("{ANIMALS}/c.md"), animal_doc("One", Some(1)));
    let loader = CollectionLoader::new(Arc::new(source), ANIMALS, animal_schema());

    let outcome = loader.load(|_| true, order_key).await;
    assert_eq!(names(&outcome), vec!["One", "Two", "Absent"]);
}

#[tokio::test]
async fn test_fetches_run_concurrently() {
    let inner = MemoryContentSource::new()
        .with_document(format!("{ANIMALS}/a.md"), animal_doc("A", Some(1)))
        .with_document(format!("{ANIMALS}/b.md"), animal_doc("B", Some(2)))
        .with_document(format!("{ANIMALS}/c.md"), animal_doc("C", Some(3)));
    // Completes only if all three fetches are in flight together.
    let source = RendezvousSource::new(inner, 3);
    let loader = CollectionLoader::new(Arc::new(source), ANIMALS, animal_schema())
        .with_timeout(Duration::from_secs(5));

    let outcome = loader.load(|_| true, order_key).await;
    assert_eq!(names(&outcome), vec!["A", "B", "C"]);
}

#[tokio::test]
async fn test_listing_failure_yields_empty_state() {
    let source = MemoryContentSource::new().with_listing_failure("GitHub API rate limited");
    let loader = CollectionLoader::new(Arc::new(source), ANIMALS, animal_schema());

    let outcome = loader.load(|_| true, order_key).await;
    let CollectionOutcome::Empty(state) = outcome else {
        panic!("expected an empty state");
    };
    assert!(matches!(state, EmptyState::ListingUnavailable(ref reason) if reason.contains("rate limited")));
    assert!(state.message().contains("check back soon"));
}

#[tokio::test]
async fn test_reloading_is_stable() {
    let loader = CollectionLoader::new(Arc::new(animals_with_one_failure()), ANIMALS, animal_schema());
    let first = loader.load(|_| true, order_key).await;
    let second = loader.load(|_| true, order_key).await;
    assert_eq!(first, second);
}
