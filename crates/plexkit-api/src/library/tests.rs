use std::sync::Arc;

use plexkit_models::{ItemType, SectionType, Tier};
use serde_json::json;

use super::*;
use crate::resolve::Entity;
use crate::test_support::{container, mock_server, MockCaller};

fn sections_body() -> serde_json::Value {
    json!({"MediaContainer": {"size": 3, "Directory": [
        {"key": "1", "type": "movie", "title": "Movies", "agent": "tv.plex.agents.movie"},
        {"key": "2", "type": "show", "title": "TV Shows"},
        {"key": "4", "type": "artist", "title": "Music"}
    ]}})
}

#[test]
fn test_get_items_skips_records_without_type() {
    let mock = Arc::new(MockCaller::new().respond(
        "/library/sections/1/all",
        container(json!([
            {"type": "movie", "title": "M"},
            {"title": "All episodes"}
        ])),
    ));
    let items = get_items(&mock_server(&mock), "sections/1/all").unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].item_type(), ItemType::Movie);
    assert_eq!(items[0].title(), Some("M"));
}

#[test]
fn test_get_items_rejects_unknown_kind() {
    let mock = Arc::new(MockCaller::new().respond(
        "/library/recentlyAdded",
        container(json!([
            {"type": "movie", "title": "M"},
            {"type": "podcast", "title": "P"}
        ])),
    ));
    match Library::new(mock_server(&mock)).recently_added_items().unwrap_err() {
        LibraryError::UnknownEntityKind(kind) => assert_eq!(kind, "podcast"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_get_records_returns_raw_structure() {
    let mock = Arc::new(MockCaller::new().respond(
        "/library/sections/1/genre",
        json!({"MediaContainer": {"Directory": [
            {"key": "7", "title": "Horror", "fastKey": "/library/sections/1/all?genre=7"}
        ]}}),
    ));
    let records = get_records(&mock_server(&mock), "sections/1/genre").unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["fastKey"], json!("/library/sections/1/all?genre=7"));
}

#[test]
fn test_sections_are_typed() {
    let mock = Arc::new(MockCaller::new().respond("/library/sections", sections_body()));
    let sections = Library::new(mock_server(&mock)).sections().unwrap();

    let types: Vec<_> = sections.iter().map(|s| s.section_type()).collect();
    assert_eq!(types, vec![SectionType::Movie, SectionType::Show, SectionType::Artist]);
    assert!(sections[0].as_movie().is_some());
    assert!(sections[2].as_artist().is_some());
    assert_eq!(sections[0].attributes().agent.as_deref(), Some("tv.plex.agents.movie"));
}

#[test]
fn test_section_resolution() {
    let mock = Arc::new(MockCaller::new().respond("/library/sections", sections_body()));
    let library = Library::new(mock_server(&mock));

    assert_eq!(library.section(2u64).unwrap().title(), Some("TV Shows"));
    assert_eq!(library.section("Music").unwrap().key(), Some(4));
    assert!(library.section(3u64).unwrap_err().is_not_found());
    assert!(library.section("music").unwrap_err().is_not_found());
}

#[test]
fn test_unknown_section_type_rejected() {
    let mock = Arc::new(MockCaller::new().respond(
        "/library/sections",
        json!({"MediaContainer": {"Directory": [{"key": "9", "type": "clip", "title": "Clips"}]}}),
    ));
    match Library::new(mock_server(&mock)).sections().unwrap_err() {
        LibraryError::UnknownEntityKind(kind) => assert_eq!(kind, "clip"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_on_deck_and_recently_added() {
    let mock = Arc::new(
        MockCaller::new()
            .respond(
                "/library/onDeck",
                container(json!([{"type": "episode", "ratingKey": 5, "viewOffset": 120000}])),
            )
            .respond(
                "/library/recentlyAdded",
                container(json!([
                    {"type": "season", "ratingKey": 6},
                    {"type": "album", "ratingKey": 7}
                ])),
            ),
    );
    let library = Library::new(mock_server(&mock));

    let on_deck = library.on_deck_items().unwrap();
    assert_eq!(on_deck.len(), 1);
    let episode = on_deck.into_iter().next().unwrap().into_child().unwrap();
    assert_eq!(episode.data().child.view_offset, Some(120_000));

    let added = library.recently_added_items().unwrap();
    assert!(added.iter().all(|item| item.tier() == Tier::Parent));
    assert_eq!(mock.paths(), vec!["/library/onDeck", "/library/recentlyAdded"]);
}

#[test]
fn test_metadata_item() {
    let mock = Arc::new(
        MockCaller::new()
            .respond(
                "/library/metadata/42",
                container(json!([{
                    "type": "movie",
                    "ratingKey": "42",
                    "title": "Alien",
                    "tagline": "In space no one can hear you scream.",
                    "Media": [{"id": 1, "videoResolution": "1080", "Part": [{"id": 2, "file": "/movies/alien.mkv"}]}]
                }])),
            )
            .respond("/library/metadata/43", json!({"MediaContainer": {"size": 0}})),
    );
    let library = Library::new(mock_server(&mock));

    let movie = library.metadata_item(42).unwrap().into_child().unwrap();
    assert_eq!(movie.data().child.tagline.as_deref(), Some("In space no one can hear you scream."));
    assert_eq!(movie.data().child.media[0].files[0].file.as_deref(), Some("/movies/alien.mkv"));

    match library.metadata_item(43).unwrap_err() {
        LibraryError::ResourceNotFound { kind, selector } => {
            assert_eq!(kind, "item");
            assert_eq!(selector, Selector::ByKey(43));
        }
        other => panic!("unexpected error: {other}"),
    }
}
