use std::fmt;

/// An OAuth2 scope understood by Discord.
///
/// See <https://discord.com/developers/docs/topics/oauth2#shared-resources-oauth2-scopes>.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Bot,
    Connections,
    Email,
    Identify,
    Guilds,
    GuildsJoin,
    GdmJoin,
    MessagesRead,
    Rpc,
    RpcApi,
    RpcNotificationsRead,
    WebhookIncoming,
}

impl Scope {
    /// The scope name as sent on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Scope::Bot => "bot",
            Scope::Connections => "connections",
            Scope::Email => "email",
            Scope::Identify => "identify",
            Scope::Guilds => "guilds",
            Scope::GuildsJoin => "guilds.join",
            Scope::GdmJoin => "gdm.join",
            Scope::MessagesRead => "messages.read",
            Scope::Rpc => "rpc",
            Scope::RpcApi => "rpc.api",
            Scope::RpcNotificationsRead => "rpc.notifications.read",
            Scope::WebhookIncoming => "webhook.incoming",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Join scopes with the given separator for URL or form encoding.
pub(crate) fn join_scopes(scopes: &[Scope], separator: &str) -> String {
    scopes
        .iter()
        .map(|scope| scope.as_str())
        .collect::<Vec<_>>()
        .join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_match_provider_documentation() {
        assert_eq!(Scope::Identify.as_str(), "identify");
        assert_eq!(Scope::GuildsJoin.as_str(), "guilds.join");
        assert_eq!(Scope::RpcNotificationsRead.as_str(), "rpc.notifications.read");
        assert_eq!(Scope::WebhookIncoming.as_str(), "webhook.incoming");
    }

    #[test]
    fn join_scopes_uses_separator() {
        let joined = join_scopes(&[Scope::Identify, Scope::Email, Scope::Guilds], "%20");
        assert_eq!(joined, "identify%20email%20guilds");
    }

    #[test]
    fn join_scopes_single_scope_has_no_separator() {
        assert_eq!(join_scopes(&[Scope::Connections], " "), "connections");
    }
}
