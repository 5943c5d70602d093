use crate::api::RecordKind;

/// API key credentials as handed out by the provider: a public prefix and a
/// secret, joined with a dot to form the `X-API-Key` header value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiCredentials {
    pub prefix: Box<str>,
    pub secret: Box<str>,
}

impl ApiCredentials {
    pub fn api_key(&self) -> String {
        format!("{}.{}", self.prefix, self.secret)
    }
}

/// Everything one run needs, built once from the parsed command line and
/// passed by reference from there on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Lowercased FQDN the records are kept for.
    pub fqdn: Box<str>,

    /// Interface inspected for the public IPv6 address.
    pub interface: Box<str>,

    pub ipv4: bool,
    pub ipv6: bool,

    pub credentials: ApiCredentials,
}

impl Config {
    /// The record kinds this run was asked to reconcile, A before AAAA.
    pub fn kinds(&self) -> Vec<RecordKind> {
        let mut kinds = Vec::with_capacity(2);
        if self.ipv4 {
            kinds.push(RecordKind::A);
        }
        if self.ipv6 {
            kinds.push(RecordKind::Aaaa);
        }
        kinds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(ipv4: bool, ipv6: bool) -> Config {
        Config {
            fqdn: "vps.example.com".into(),
            interface: "eth0".into(),
            ipv4,
            ipv6,
            credentials: ApiCredentials {
                prefix: "prefix".into(),
                secret: "secret".into(),
            },
        }
    }

    #[test]
    fn api_key_joins_prefix_and_secret() {
        assert_eq!(config(true, true).credentials.api_key(), "prefix.secret");
    }

    #[test]
    fn requested_kinds() {
        assert_eq!(config(true, true).kinds(), [RecordKind::A, RecordKind::Aaaa]);
        assert_eq!(config(true, false).kinds(), [RecordKind::A]);
        assert_eq!(config(false, true).kinds(), [RecordKind::Aaaa]);
        assert!(config(false, false).kinds().is_empty());
    }
}
