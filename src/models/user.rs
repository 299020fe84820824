use serde::{Deserialize, Serialize};

/// Public profile of a BGG user, as returned by the `user` endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub terms_of_use: String,

    pub first_name: String,
    pub last_name: String,
    pub avatar_link: String,
    pub year_registered: String,
    pub last_login: String,
    pub state_or_province: String,
    pub country: String,
    pub web_address: String,
    pub xbox_account: String,
    pub wii_account: String,
    pub psn_account: String,
    pub battlenet_account: String,
    pub steam_account: String,
    pub trade_rating: String,

    /// Only populated when requested with `buddies=1`
    pub buddies: Vec<Buddy>,
    /// Only populated when requested with `guilds=1`
    pub guilds: Vec<Guild>,
    /// The user's hot list (`hot=1`)
    pub hot_items: Vec<RankedItem>,
    /// The user's top list (`top=1`)
    pub top_items: Vec<RankedItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Buddy {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guild {
    pub id: String,
    pub name: String,
}

/// Entry of a hot or top list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedItem {
    pub id: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub rank: String,
    pub name: String,
}
