use color_eyre::eyre::eyre;
use color_eyre::Result;
use plexkit_api::{infer_kind_from_query, Entity, Item, Section, Selector};
use plexkit_models::ItemType;
use serde_json::json;

use super::{connect, item_header, item_row, Settings};
use crate::output::Output;
use crate::Listing;

pub fn run_sections(settings: &Settings, server: Option<&str>, output: &Output) -> Result<()> {
    let (_, server) = connect(settings, server)?;
    let sections = server.library().sections()?;

    if !output.is_human() {
        output.json(&serde_json::to_value(&sections)?);
        return Ok(());
    }

    let rows = sections
        .iter()
        .map(|section| {
            vec![
                section.key().map(|k| k.to_string()).unwrap_or_default(),
                section.section_type().to_string(),
                section.title().unwrap_or("").to_string(),
                section.attributes().agent.clone().unwrap_or_default(),
            ]
        })
        .collect();
    output.table(
        &format!("Sections on {}", server.name()),
        &["Key", "Type", "Title", "Agent"],
        rows,
    );
    Ok(())
}

fn print_items(title: &str, items: &[Item], output: &Output) -> Result<()> {
    if !output.is_human() {
        output.json(&serde_json::to_value(items)?);
        return Ok(());
    }
    if items.is_empty() {
        output.warn(format!("{}: nothing found", title));
        return Ok(());
    }
    output.table(title, item_header(), items.iter().map(item_row).collect());
    Ok(())
}

/// `key=value` pairs in command-line order.
fn parse_filters(filters: &[String]) -> Result<Vec<(&str, String)>> {
    filters
        .iter()
        .map(|filter| {
            filter
                .split_once('=')
                .map(|(key, value)| (key, value.to_string()))
                .ok_or_else(|| eyre!("Invalid filter '{}', expected KEY=VALUE", filter))
        })
        .collect()
}

fn find_section(settings: &Settings, server: Option<&str>, section: &str) -> Result<Section> {
    let (_, server) = connect(settings, server)?;
    Ok(server.library().section(Selector::parse_lenient(section))?)
}

pub fn run_items(
    settings: &Settings,
    server: Option<&str>,
    section: &str,
    listing: Listing,
    filters: &[String],
    output: &Output,
) -> Result<()> {
    let section = find_section(settings, server, section)?;
    let filters = parse_filters(filters)?;

    let items = if !filters.is_empty() {
        section.filtered_items(&filters)?
    } else {
        match listing {
            Listing::All => section.all_items()?,
            Listing::Unwatched => section.unwatched_items()?,
            Listing::Newest => section.newest_items()?,
            Listing::RecentlyAdded => section.recently_added_items()?,
            Listing::RecentlyViewed => section.recently_viewed_items()?,
            Listing::OnDeck => section.on_deck_items()?,
        }
    };

    print_items(section.title().unwrap_or("Items"), &items, output)
}

pub fn run_search(
    settings: &Settings,
    server: Option<&str>,
    section: &str,
    query: &str,
    kind: Option<&str>,
    output: &Output,
) -> Result<()> {
    let section = find_section(settings, server, section)?;
    let item_type = match kind {
        Some(kind) => infer_kind_from_query(kind).ok_or_else(|| eyre!("Unknown item kind '{}'", kind))?,
        None => section.section_type().root_item_type(),
    };

    let items = section.search(item_type, query)?;
    print_items(&format!("{} results for \"{}\"", item_type, query), &items, output)
}

pub fn run_item(
    settings: &Settings,
    server: Option<&str>,
    rating_key: u64,
    children: bool,
    leaves: bool,
    random_leaf: bool,
    output: &Output,
) -> Result<()> {
    let (_, server) = connect(settings, server)?;
    let item = server.library().metadata_item(rating_key)?;
    let title = item.title().unwrap_or("Item").to_string();

    if children {
        let children = match &item {
            Item::Grandparent(item) => item.children()?,
            Item::Parent(item) => item.children()?,
            Item::Child(_) => return Err(eyre!("A {} has no children", item.kind())),
        };
        return print_items(&format!("Children of {}", title), &children, output);
    }

    if leaves || random_leaf {
        let Item::Grandparent(grandparent) = &item else {
            return Err(eyre!("Only shows and artists have leaves, {} is a {}", title, item.kind()));
        };
        let leaves: Vec<Item> = if random_leaf {
            vec![grandparent.random_leaf()?.into()]
        } else {
            grandparent.all_leaves()?.into_iter().map(Item::from).collect()
        };
        return print_items(&format!("Leaves of {}", title), &leaves, output);
    }

    if !output.is_human() {
        output.json(&json!({"item": item, "metadataPath": item.metadata_path()?}));
        return Ok(());
    }

    print_items(&title, std::slice::from_ref(&item), output)?;
    if let Item::Child(child) = &item {
        for media in &child.data().child.media {
            let files: Vec<_> = media.files.iter().filter_map(|f| f.file.clone()).collect();
            output.info(format!(
                "  {} {} {}",
                media.video_resolution.as_deref().unwrap_or("-"),
                media.container.as_deref().unwrap_or("-"),
                files.join(", ")
            ));
        }
    }
    if item.item_type() == ItemType::Show || item.item_type() == ItemType::Artist {
        output.info(format!("  use --children or --leaves to browse {}", title));
    }
    Ok(())
}
