use serde::Deserialize;

/// A third-party account linked to the authorized user. Maps provider
/// fields 1:1 with no derived state.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Connection {
    /// Id of the third-party account.
    pub id: String,
    /// Username of the third-party account.
    pub name: String,
    /// Name of the service providing the account (e.g. "twitch").
    #[serde(rename = "type")]
    pub kind: String,
    /// Whether the user has revoked this connection.
    #[serde(default)]
    pub revoked: bool,
    /// Whether the user has verified this connection.
    #[serde(default)]
    pub verified: bool,
    /// Whether the user has enabled friend synchronization.
    #[serde(default)]
    pub friend_sync: bool,
    /// Whether activity in the connected account shows in Rich Presence.
    #[serde(default)]
    pub show_activity: bool,
    /// Visibility of the connection on the user's profile (0 hidden,
    /// 1 everyone).
    #[serde(default)]
    pub visibility: u8,
    /// Server integrations attached to this connection.
    #[serde(default)]
    pub integrations: Vec<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn full_payload_maps_all_fields() {
        let connection: Connection = serde_json::from_value(json!({
            "id": "23456789",
            "name": "streamer",
            "type": "twitch",
            "revoked": false,
            "verified": true,
            "friend_sync": true,
            "show_activity": true,
            "visibility": 1,
            "integrations": [{"id": "int-1"}],
        }))
        .unwrap();

        assert_eq!(connection.id, "23456789");
        assert_eq!(connection.name, "streamer");
        assert_eq!(connection.kind, "twitch");
        assert!(!connection.revoked);
        assert!(connection.verified);
        assert!(connection.friend_sync);
        assert!(connection.show_activity);
        assert_eq!(connection.visibility, 1);
        assert_eq!(connection.integrations.len(), 1);
    }

    #[test]
    fn optional_fields_default_when_absent() {
        let connection: Connection = serde_json::from_value(json!({
            "id": "1",
            "name": "n",
            "type": "github",
        }))
        .unwrap();

        assert!(!connection.revoked);
        assert!(!connection.verified);
        assert_eq!(connection.visibility, 0);
        assert!(connection.integrations.is_empty());
    }
}
