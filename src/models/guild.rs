use std::time::SystemTime;

use serde::Deserialize;

use crate::snowflake;

/// Permission bits and names, declaration order. Output order of the
/// decoded list follows this table, not numeric bit order.
const PERMISSIONS: &[(u64, &str)] = &[
    (0x1, "CREATE_INSTANT_INVITE"),
    (0x2, "KICK_MEMBERS"),
    (0x4, "BAN_MEMBERS"),
    (0x8, "ADMINISTRATOR"),
    (0x10, "MANAGE_CHANNELS"),
    (0x20, "MANAGE_GUILD"),
    (0x40, "ADD_REACTION"),
    (0x80, "VIEW_AUDIT_LOG"),
    (0x400, "VIEW_CHANNEL"),
    (0x800, "SEND_MESSAGES"),
    (0x1000, "SEND_TTS_MESSAGES"),
    (0x2000, "MANAGE_MESSAGES"),
    (0x4000, "EMBED_LINKS"),
    (0x8000, "ATTACH_FILES"),
    (0x10000, "READ_MESSAGES_HISTORY"),
    (0x20000, "MENTION_EVERYONE"),
    (0x40000, "USE_EXTERNAL_EMOJIS"),
    (0x100000, "CONNECT"),
    (0x200000, "SPEAK"),
    (0x400000, "MUTE_MEMBERS"),
    (0x800000, "MANAGE_NICKNAMES"),
    (0x1000000, "MANAGE_ROLES"),
    (0x2000000, "MANAGE_WEBHOOKS"),
    (0x4000000, "MANAGE_EMOJIS"),
];

const PLACEHOLDER_ICON_URL: &str = "https://i.imgur.com/LvroChs.png";

fn decode_permissions(mask: u64) -> Vec<&'static str> {
    PERMISSIONS
        .iter()
        .filter(|(bit, _)| mask & bit == *bit)
        .map(|(_, name)| *name)
        .collect()
}

/// Raw `/users/@me/guilds` array element.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GuildPayload {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub owner: bool,
    #[serde(default)]
    pub permissions: u64,
}

/// A guild the authorized user is a member of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guild {
    /// The guild's unique snowflake id.
    pub id: String,
    pub name: String,
    pub icon_hash: Option<String>,
    /// Discord-enabled feature names of the guild.
    pub features: Vec<String>,
    /// Whether the authorized user owns the guild.
    pub owner: bool,
    /// Decoded permission names of the authorized user, table order.
    pub permissions: Vec<&'static str>,
}

impl Guild {
    pub(crate) fn from_payload(payload: GuildPayload) -> Self {
        Self {
            id: payload.id,
            name: payload.name,
            icon_hash: payload.icon,
            features: payload.features,
            owner: payload.owner,
            permissions: decode_permissions(payload.permissions),
        }
    }

    /// Creation timestamp (unix milliseconds) derived from the snowflake.
    pub fn created_timestamp(&self) -> Option<u64> {
        snowflake::created_timestamp(&self.id)
    }

    /// Creation time derived from the snowflake.
    pub fn created_at(&self) -> Option<SystemTime> {
        snowflake::created_at(&self.id)
    }

    /// URL of the guild icon at the given pixel size. A fixed placeholder
    /// image when the guild has no icon.
    pub fn icon_url(&self, size: u32) -> String {
        match &self.icon_hash {
            Some(hash) => {
                let extension = if hash.starts_with("a_") { "gif" } else { "png" };
                format!(
                    "https://cdn.discordapp.com/icons/{}/{hash}.{extension}?size={size}",
                    self.id
                )
            }
            None => PLACEHOLDER_ICON_URL.to_string(),
        }
    }
}
