//! Typed client for a media server's HTTP library API.
//!
//! Start from a [`Server`] (or a [`Registry`] of them), open its
//! [`Library`], and walk sections and items from there:
//!
//! ```no_run
//! use std::sync::Arc;
//! use plexkit_api::{HttpCaller, HttpOptions, Server};
//!
//! # fn main() -> plexkit_api::Result<()> {
//! let caller = HttpCaller::new(Some("token"), &HttpOptions::default())?;
//! let server = Arc::new(Server::new("home", "192.168.1.20", None, Arc::new(caller)));
//! let movies = server.library().section("Movies")?;
//! for item in movies.all_items()? {
//!     println!("{:?}", item.common().title);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod endpoint;
pub mod error;
pub mod factory;
pub mod item;
pub mod library;
pub mod registry;
pub mod resolve;
pub mod section;
pub mod server;
pub mod transport;

#[cfg(test)]
mod test_support;

pub use client::{Client, NavigationCommand, PlaybackCommand};
pub use error::{LibraryError, Result, TransportError};
pub use factory::{create_item, create_section, infer_kind_from_query};
pub use item::{Child, Grandparent, Item, Parent};
pub use library::Library;
pub use registry::Registry;
pub use resolve::{resolve, Entity, Selector};
pub use section::{ArtistSection, MovieSection, PhotoSection, Section, SectionBase, ShowSection};
pub use server::{Server, ServerContext};
pub use transport::{DecodedBody, HttpCaller, HttpOptions, NetworkCaller};
