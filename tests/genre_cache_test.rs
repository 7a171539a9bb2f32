use std::collections::HashMap;
use std::path::PathBuf;

use plotify::management::GenreCacheManager;

fn temp_cache(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("plotify-test-{}-{}", name, std::process::id()));
    path.push("genres.json");
    path
}

fn mapping(entries: &[(&str, &[&str])]) -> HashMap<String, Vec<String>> {
    entries
        .iter()
        .map(|(artist, genres)| {
            (
                artist.to_string(),
                genres.iter().map(|genre| genre.to_string()).collect(),
            )
        })
        .collect()
}

#[tokio::test]
async fn test_missing_cache_is_empty() {
    let cache = GenreCacheManager::with_path(temp_cache("missing"));

    assert!(cache.load().await.is_empty());
}

#[tokio::test]
async fn test_merge_and_load_round_trip() {
    let cache = GenreCacheManager::with_path(temp_cache("round-trip"));

    cache
        .merge(&mapping(&[("A", &["pop", "rock"])]))
        .await
        .unwrap();

    let loaded = cache.load().await;
    assert_eq!(
        loaded.get("A"),
        Some(&vec!["pop".to_string(), "rock".to_string()])
    );
}

#[tokio::test]
async fn test_merge_preserves_existing_entries() {
    let cache = GenreCacheManager::with_path(temp_cache("preserve"));

    cache.merge(&mapping(&[("A", &["pop"])])).await.unwrap();
    cache.merge(&mapping(&[("B", &["jazz"])])).await.unwrap();

    let loaded = cache.load().await;
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded.get("A"), Some(&vec!["pop".to_string()]));
    assert_eq!(loaded.get("B"), Some(&vec!["jazz".to_string()]));
}

#[tokio::test]
async fn test_merge_overwrites_same_artist() {
    let cache = GenreCacheManager::with_path(temp_cache("overwrite"));

    cache.merge(&mapping(&[("A", &["pop"])])).await.unwrap();
    cache
        .merge(&mapping(&[("A", &["pop", "dance"])]))
        .await
        .unwrap();

    let loaded = cache.load().await;
    assert_eq!(
        loaded.get("A"),
        Some(&vec!["pop".to_string(), "dance".to_string()])
    );
}

#[tokio::test]
async fn test_merging_nothing_is_a_no_op() {
    let cache = GenreCacheManager::with_path(temp_cache("noop"));

    cache.merge(&HashMap::new()).await.unwrap();

    assert!(cache.load().await.is_empty());
}
