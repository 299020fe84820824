use serde::{Deserialize, Serialize};

/// One game entry from a user's collection (`<item>` under `<items>`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionItem {
    /// BGG object id (`objectid` attribute)
    pub id: String,
    pub name: String,
    pub year_published: String,
    pub image_url: String,
    pub thumbnail_url: String,
    pub num_plays: String,
}
