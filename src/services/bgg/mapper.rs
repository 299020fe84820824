//! Maps BGG XML documents into the typed records in [`crate::models`].

use crate::models::{Buddy, CollectionItem, Guild, RankedItem, UserProfile};

use super::xml::XmlElement;

/// Maps every `<item>` in the document, wherever it sits, in document order.
pub fn parse_collection(document: &XmlElement) -> Vec<CollectionItem> {
    document
        .descendants("item")
        .into_iter()
        .map(collection_item)
        .collect()
}

fn collection_item(item: &XmlElement) -> CollectionItem {
    CollectionItem {
        id: attr_or_empty(item, "objectid"),
        name: item.child_text("name"),
        year_published: item.child_text("yearpublished"),
        image_url: item.child_text("image"),
        thumbnail_url: item.child_text("thumbnail"),
        num_plays: item.child_text("numplays"),
    }
}

/// Maps a `<user>` document. Missing scalars become `""`, missing list
/// containers become empty lists.
pub fn parse_user(root: &XmlElement) -> UserProfile {
    UserProfile {
        id: attr_or_empty(root, "id"),
        name: attr_or_empty(root, "name"),
        terms_of_use: attr_or_empty(root, "termsofuse"),

        first_name: root.child_value("firstname"),
        last_name: root.child_value("lastname"),
        avatar_link: root.child_value("avatarlink"),
        year_registered: root.child_value("yearregistered"),
        last_login: root.child_value("lastlogin"),
        state_or_province: root.child_value("stateorprovince"),
        country: root.child_value("country"),
        web_address: root.child_value("webaddress"),
        xbox_account: root.child_value("xboxaccount"),
        wii_account: root.child_value("wiiaccount"),
        psn_account: root.child_value("psnaccount"),
        battlenet_account: root.child_value("battlenetaccount"),
        steam_account: root.child_value("steamaccount"),
        trade_rating: root.child_value("traderating"),

        buddies: map_container(root, "buddies", |e| Buddy {
            id: id_attr(e, "buddy_id"),
            name: attr_or_empty(e, "name"),
        }),
        guilds: map_container(root, "guilds", |e| Guild {
            id: id_attr(e, "guild_id"),
            name: attr_or_empty(e, "name"),
        }),
        hot_items: map_container(root, "hot", ranked_item),
        top_items: map_container(root, "top", ranked_item),
    }
}

fn ranked_item(e: &XmlElement) -> RankedItem {
    RankedItem {
        id: attr_or_empty(e, "id"),
        item_type: attr_or_empty(e, "type"),
        rank: attr_or_empty(e, "rank"),
        name: attr_or_empty(e, "name"),
    }
}

fn map_container<T>(root: &XmlElement, container: &str, f: impl Fn(&XmlElement) -> T) -> Vec<T> {
    root.child(container)
        .map(|c| c.children.iter().map(f).collect())
        .unwrap_or_default()
}

fn attr_or_empty(e: &XmlElement, key: &str) -> String {
    e.attr(key).unwrap_or_default().to_string()
}

/// BGG sends `id`; some older payloads use a prefixed key such as `buddy_id`
fn id_attr(e: &XmlElement, legacy_key: &str) -> String {
    e.attr("id")
        .or_else(|| e.attr(legacy_key))
        .unwrap_or_default()
        .to_string()
}
