use std::sync::Arc;

use plexkit_models::{ItemType, SectionType};
use serde_json::{json, Value};

use super::*;
use crate::test_support::{container, mock_server, MockCaller};

fn section(mock: &Arc<MockCaller>, section_type: SectionType, key: u64) -> Section {
    let mut section = Section::new(mock_server(mock), section_type);
    section
        .hydrate(json!({"key": key, "title": "Section"}).as_object().unwrap())
        .unwrap();
    section
}

fn empty() -> Value {
    json!({"MediaContainer": {"size": 0}})
}

fn movies() -> Value {
    container(json!([
        {"type": "movie", "ratingKey": "10", "title": "Alien"},
        {"type": "movie", "ratingKey": "11", "title": "Aliens"},
        {"type": "movie", "ratingKey": "12", "title": "Alien"}
    ]))
}

#[test]
fn test_common_queries_hit_expected_paths() {
    let mock = Arc::new(
        MockCaller::new()
            .respond("/library/sections/1/all", empty())
            .respond("/library/sections/1/unwatched", empty())
            .respond("/library/sections/1/newest", empty())
            .respond("/library/sections/1/recentlyAdded", empty())
            .respond("/library/sections/1/recentlyViewed", empty())
            .respond("/library/sections/1/onDeck", empty())
            .respond("/library/sections/1/collection/5", empty())
            .respond("/library/sections/1/genre/7", empty())
            .respond("/library/sections/1/year/1979", empty())
            .respond("/library/sections/1/decade/1980", empty())
            .respond("/library/sections/1/firstCharacter/%23", empty()),
    );
    let section = section(&mock, SectionType::Movie, 1);

    section.all_items().unwrap();
    section.unwatched_items().unwrap();
    section.newest_items().unwrap();
    section.recently_added_items().unwrap();
    section.recently_viewed_items().unwrap();
    section.on_deck_items().unwrap();
    section.items_by_collection(5).unwrap();
    section.items_by_genre(7).unwrap();
    section.items_by_year(1979).unwrap();
    section.items_by_decade(1980).unwrap();
    section.items_by_first_character("#").unwrap();

    assert_eq!(mock.paths().len(), 11);
}

#[test]
fn test_lookup_lists_are_raw() {
    let mock = Arc::new(
        MockCaller::new()
            .respond(
                "/library/sections/1/director",
                json!({"MediaContainer": {"Directory": [
                    {"key": "31", "title": "Ridley Scott"},
                    {"key": "32", "title": "James Cameron"}
                ]}}),
            )
            .respond(
                "/library/sections/1/resolution",
                json!({"MediaContainer": {"Directory": [{"key": "1080", "title": "1080p"}]}}),
            ),
    );
    let section = section(&mock, SectionType::Movie, 1);
    let movies = section.as_movie().unwrap();

    let directors = movies.directors().unwrap();
    assert_eq!(directors.len(), 2);
    assert_eq!(directors[1]["title"], json!("James Cameron"));
    assert_eq!(movies.resolutions().unwrap()[0]["key"], json!("1080"));
}

#[test]
fn test_movie_category_queries() {
    let mock = Arc::new(
        MockCaller::new()
            .respond("/library/sections/1/director/31", movies())
            .respond("/library/sections/1/actor/44", empty())
            .respond("/library/sections/1/contentRating/gb%2F15", empty())
            .respond("/library/sections/1/resolution/sd", empty()),
    );
    let section = section(&mock, SectionType::Movie, 1);
    let movies = section.as_movie().unwrap();

    assert_eq!(movies.movies_by_director(31).unwrap().len(), 3);
    assert!(movies.movies_by_actor(44).unwrap().is_empty());
    assert!(movies.movies_by_content_rating("gb/15").unwrap().is_empty());
    assert!(movies.movies_by_resolution("sd").unwrap().is_empty());
}

#[test]
fn test_search_encodes_query() {
    let mock = Arc::new(MockCaller::new().respond(
        "/library/sections/2/search?type=4&query=the%20end%3F",
        container(json!([{"type": "episode", "ratingKey": 9, "title": "The End?"}])),
    ));
    let section = section(&mock, SectionType::Show, 2);
    let found = section.as_show().unwrap().search_episodes("the end?").unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].item_type(), ItemType::Episode);
}

#[test]
fn test_movies_viewed_within_days() {
    let mock = Arc::new(MockCaller::new().respond(
        "/library/sections/1/all?type=1&lastViewedAt%3E%3E=-7d&sort=lastViewedAt%3Adesc",
        movies(),
    ));
    let section = section(&mock, SectionType::Movie, 1);
    assert_eq!(section.as_movie().unwrap().movies_viewed_within_days(7).unwrap().len(), 3);
}

#[test]
fn test_movie_resolution_first_match_in_source_order() {
    let mock = Arc::new(MockCaller::new().respond("/library/sections/1/all?type=1", movies()));
    let section = section(&mock, SectionType::Movie, 1);
    let movies = section.as_movie().unwrap();

    assert_eq!(movies.movie("Alien").unwrap().key(), Some(10));
    assert_eq!(movies.movie(12u64).unwrap().title(), Some("Alien"));
    match movies.movie("Prometheus").unwrap_err() {
        LibraryError::ResourceNotFound { kind, .. } => assert_eq!(kind, "movie"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_artist_section_resolves_each_tier() {
    let mock = Arc::new(
        MockCaller::new()
            .respond(
                "/library/sections/4/all?type=8",
                container(json!([{"type": "artist", "ratingKey": 300, "title": "Joni Mitchell"}])),
            )
            .respond(
                "/library/sections/4/all?type=9",
                container(json!([{"type": "album", "ratingKey": 301, "title": "Blue", "parentTitle": "Joni Mitchell"}])),
            )
            .respond(
                "/library/sections/4/all?type=10",
                container(json!([{"type": "track", "ratingKey": 302, "title": "River", "grandparentTitle": "Joni Mitchell"}])),
            )
            .respond(
                "/library/sections/4/albums",
                container(json!([{"type": "album", "ratingKey": 301, "title": "Blue"}])),
            ),
    );
    let section = section(&mock, SectionType::Artist, 4);
    let music = section.as_artist().unwrap();

    assert_eq!(music.artist("Joni Mitchell").unwrap().key(), Some(300));
    let album = music.album("Blue").unwrap();
    assert_eq!(album.data().parent.parent_title.as_deref(), Some("Joni Mitchell"));
    let track = music.track(302u64).unwrap();
    assert_eq!(track.data().child.grandparent_title.as_deref(), Some("Joni Mitchell"));
    assert_eq!(music.all_albums().unwrap().len(), 1);
}

#[test]
fn test_show_section_and_photo_section() {
    let mock = Arc::new(
        MockCaller::new()
            .respond(
                "/library/sections/2/all?type=2",
                container(json!([{"type": "show", "ratingKey": 100, "title": "The Show"}])),
            )
            .respond(
                "/library/sections/5/all?type=13",
                container(json!([{"type": "photo", "ratingKey": 500, "title": "Beach"}])),
            )
            .respond("/library/sections/5/year/2019", empty()),
    );
    let shows = section(&mock, SectionType::Show, 2);
    let show = shows.as_show().unwrap().show("The Show").unwrap();
    assert_eq!(show.item_type(), ItemType::Show);

    let photos = section(&mock, SectionType::Photo, 5);
    let photos = photos.as_photo().unwrap();
    assert_eq!(photos.photo(500u64).unwrap().title(), Some("Beach"));
    assert!(photos.photos_by_year(2019).unwrap().is_empty());
}

#[test]
fn test_section_item_resolves_root_type() {
    let mock = Arc::new(MockCaller::new().respond("/library/sections/1/all?type=1", movies()));
    let section = section(&mock, SectionType::Movie, 1);
    assert_eq!(section.item(11u64).unwrap().title(), Some("Aliens"));
}

#[test]
fn test_section_without_key() {
    let mock = Arc::new(MockCaller::new());
    let section = Section::new(mock_server(&mock), SectionType::Movie);
    assert!(matches!(section.all_items().unwrap_err(), LibraryError::MissingKey { .. }));
    assert!(mock.paths().is_empty());
}

#[test]
fn test_section_serialization() {
    let mock = Arc::new(MockCaller::new());
    let value = serde_json::to_value(section(&mock, SectionType::Artist, 4)).unwrap();
    assert_eq!(value["type"], json!("artist"));
    assert_eq!(value["key"], json!(4));
    assert_eq!(value["title"], json!("Section"));
}
