//! Typed records mapped from BGG XML responses.
//!
//! Every field is text pulled verbatim from the document. A missing node maps
//! to an empty string rather than being omitted.

pub mod collection;
pub mod user;

pub use collection::CollectionItem;
pub use user::{Buddy, Guild, RankedItem, UserProfile};
