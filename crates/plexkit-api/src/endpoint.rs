//! Endpoint paths.
//!
//! Paths are built relative to the server's `library/` root and normalized
//! after every concatenation: an empty hierarchy segment would otherwise
//! leave `//` or `///` behind.

pub const LIBRARY: &str = "library";
pub const SECTIONS: &str = "sections";
pub const METADATA: &str = "metadata";
pub const CHILDREN: &str = "children";
pub const ALL_LEAVES: &str = "allLeaves";
pub const RECENTLY_ADDED: &str = "recentlyAdded";
pub const ON_DECK: &str = "onDeck";
pub const ALL: &str = "all";
pub const ALBUMS: &str = "albums";
pub const UNWATCHED: &str = "unwatched";
pub const NEWEST: &str = "newest";
pub const RECENTLY_VIEWED: &str = "recentlyViewed";
pub const COLLECTION: &str = "collection";
pub const GENRE: &str = "genre";
pub const YEAR: &str = "year";
pub const DECADE: &str = "decade";
pub const FIRST_CHARACTER: &str = "firstCharacter";
pub const DIRECTOR: &str = "director";
pub const ACTOR: &str = "actor";
pub const CONTENT_RATING: &str = "contentRating";
pub const RESOLUTION: &str = "resolution";
pub const SEARCH: &str = "search";
pub const CLIENTS: &str = "clients";
pub const PLAYERS: &str = "system/players";

/// Collapses separator runs of any length and drops one trailing separator.
pub fn normalize(path: &str) -> String {
    let mut collapsed = path.replace("///", "/");
    while collapsed.contains("//") {
        collapsed = collapsed.replace("//", "/");
    }
    match collapsed.strip_suffix('/') {
        Some(stripped) => stripped.to_string(),
        None => collapsed,
    }
}

/// `{base}/{segment}`, normalized.
pub fn build_endpoint(base: &str, segment: &str) -> String {
    normalize(&format!("{}/{}", base, segment))
}

/// Prefixes `library/`.
pub fn library_endpoint(endpoint: &str) -> String {
    build_endpoint(LIBRARY, endpoint)
}

/// `{base_url}/library/{endpoint}`.
pub fn library_url(base_url: &str, endpoint: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), library_endpoint(endpoint))
}

pub fn metadata_endpoint(rating_key: u64) -> String {
    build_endpoint(METADATA, &rating_key.to_string())
}

/// Absolute path of an item, as clients expect it in `playMedia`.
pub fn metadata_path(rating_key: u64) -> String {
    format!("/{}", library_endpoint(&metadata_endpoint(rating_key)))
}

pub fn children_endpoint(rating_key: u64) -> String {
    build_endpoint(&metadata_endpoint(rating_key), CHILDREN)
}

pub fn all_leaves_endpoint(rating_key: u64) -> String {
    build_endpoint(&metadata_endpoint(rating_key), ALL_LEAVES)
}

pub fn section_endpoint(section_key: u64, segment: &str) -> String {
    build_endpoint(&format!("{}/{}", SECTIONS, section_key), segment)
}

/// `{category}/{value}` with `value` percent-encoded.
pub fn category_segment(category: &str, value: &str) -> String {
    format!("{}/{}", category, urlencoding::encode(value))
}

pub fn search_segment(search_type: u8, query: &str) -> String {
    format!(
        "{}?type={}&query={}",
        SEARCH,
        search_type,
        urlencoding::encode(query)
    )
}

/// `all?k1=v1&k2=v2`, pairs kept in the given order.
pub fn filter_segment(filters: &[(&str, String)]) -> String {
    if filters.is_empty() {
        return ALL.to_string();
    }
    let query = encode_query(filters);
    format!("{}?{}", ALL, query)
}

pub fn encode_query(pairs: &[(&str, String)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// `{base_url}/system/players/{address}/{controller}/{command}[?query]`.
pub fn player_url(
    base_url: &str,
    client_address: &str,
    controller: &str,
    command: &str,
    params: &[(&str, String)],
) -> String {
    let path = normalize(&format!("{}/{}/{}/{}", PLAYERS, client_address, controller, command));
    let mut url = format!("{}/{}", base_url.trim_end_matches('/'), path);
    if !params.is_empty() {
        url.push('?');
        url.push_str(&encode_query(params));
    }
    url
}
