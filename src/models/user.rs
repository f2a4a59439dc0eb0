use std::time::SystemTime;

use serde::Deserialize;

use crate::snowflake;

const CDN_BASE: &str = "https://cdn.discordapp.com";

/// Account badges decoded from the low flag bits, declaration order.
const BADGES: &[(u32, &str)] = &[
    (1, "Discord Employee"),
    (1 << 1, "Discord Partner"),
    (1 << 2, "HypeSquad Events"),
    (1 << 3, "Bug Hunter Level 1"),
];

/// HypeSquad house bits are mutually exclusive; the lowest set bit wins.
const HOUSE_BADGES: &[(u32, &str)] = &[
    (1 << 6, "HypeSquad House of Bravery"),
    (1 << 7, "HypeSquad House of Brilliance"),
    (1 << 8, "HypeSquad House of Balance"),
];

const LATE_BADGES: &[(u32, &str)] = &[
    (1 << 9, "Early Supporter"),
    (1 << 10, "Team User"),
    (1 << 12, "System"),
    (1 << 14, "Bug Hunter Level 2"),
    (1 << 17, "Verified Bot Developer"),
];

fn decode_badges(flags: u32) -> Vec<&'static str> {
    let mut badges = Vec::new();
    for (bit, name) in BADGES {
        if flags & bit == *bit {
            badges.push(*name);
        }
    }
    if let Some((_, name)) = HOUSE_BADGES.iter().find(|(bit, _)| flags & bit == *bit) {
        badges.push(*name);
    }
    for (bit, name) in LATE_BADGES {
        if flags & bit == *bit {
            badges.push(*name);
        }
    }
    badges
}

fn premium_tier_label(premium_type: u8) -> &'static str {
    match premium_type {
        0 => "None",
        1 => "Nitro Classic",
        _ => "Nitro",
    }
}

/// Raw `/users/@me` response body.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct UserPayload {
    pub id: String,
    pub username: String,
    pub discriminator: String,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub mfa_enabled: bool,
    #[serde(default)]
    pub flags: u32,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub verified: Option<bool>,
    #[serde(default)]
    pub premium_type: u8,
    #[serde(default)]
    pub bot: bool,
}

/// Options for [`User::avatar_url`].
#[derive(Debug, Clone, Copy)]
pub struct AvatarOptions {
    /// Use the animated format when the avatar hash allows it.
    pub dynamic: bool,
    /// Image size in pixels, appended as a query parameter.
    pub size: u32,
}

impl Default for AvatarOptions {
    fn default() -> Self {
        Self {
            dynamic: false,
            size: 512,
        }
    }
}

/// A Discord user who has authorized the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// The user's unique snowflake id.
    pub id: String,
    pub username: String,
    /// Zero-padded 4-digit discriminator (e.g. "0001").
    pub discriminator: String,
    /// Tag of the user (e.g. "adam#0001").
    pub tag: String,
    pub locale: Option<String>,
    pub mfa_enabled: bool,
    pub email: Option<String>,
    pub email_verified: Option<bool>,
    pub avatar_hash: Option<String>,
    /// Premium tier label: "None", "Nitro Classic" or "Nitro".
    pub premium_tier: &'static str,
    /// Decoded account badge names, table order.
    pub badges: Vec<&'static str>,
    pub bot: bool,
    /// Avatar URL precomputed with the dynamic format at size 256.
    pub display_avatar_url: String,
}

impl User {
    pub(crate) fn from_payload(payload: UserPayload) -> Self {
        // Provider values may have dropped leading zeros.
        let numeric_discriminator = payload.discriminator.parse::<u32>().unwrap_or(0);
        let discriminator = format!("{numeric_discriminator:04}");
        let tag = format!("{}#{}", payload.username, discriminator);

        let mut user = Self {
            id: payload.id,
            username: payload.username,
            discriminator,
            tag,
            locale: payload.locale,
            mfa_enabled: payload.mfa_enabled,
            email: payload.email,
            email_verified: payload.verified,
            avatar_hash: payload.avatar,
            premium_tier: premium_tier_label(payload.premium_type),
            badges: decode_badges(payload.flags),
            bot: payload.bot,
            display_avatar_url: String::new(),
        };
        user.display_avatar_url = user.avatar_url(AvatarOptions {
            dynamic: true,
            size: 256,
        });
        user
    }

    /// Creation timestamp (unix milliseconds) derived from the snowflake.
    pub fn created_timestamp(&self) -> Option<u64> {
        snowflake::created_timestamp(&self.id)
    }

    /// Creation time derived from the snowflake.
    pub fn created_at(&self) -> Option<SystemTime> {
        snowflake::created_at(&self.id)
    }

    /// URL of the user's avatar. Falls back to a default avatar selected
    /// by `discriminator % 5` when the user has none.
    pub fn avatar_url(&self, options: AvatarOptions) -> String {
        match &self.avatar_hash {
            Some(hash) => {
                let extension = if hash.starts_with("a_") && options.dynamic {
                    "gif"
                } else {
                    "png"
                };
                format!(
                    "{CDN_BASE}/avatars/{}/{hash}.{extension}?size={}",
                    self.id, options.size
                )
            }
            None => {
                let index = self.discriminator.parse::<u32>().unwrap_or(0) % 5;
                format!("{CDN_BASE}/embed/avatars/{index}.png?size={}", options.size)
            }
        }
    }
}
