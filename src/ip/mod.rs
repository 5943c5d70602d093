mod echo;
mod exec;

use std::net::IpAddr;

use thiserror::Error;

use crate::api::RecordKind;

/// The address-echo service queried for the public IPv4 address.
pub const ECHO_URL_V4: &str = "https://api4.ipify.org";

#[derive(Debug, Error, Clone)]
pub enum ResolveError {
    #[error("address echo service returned HTTP {0}: {1}")]
    Status(u16, Box<str>),

    #[error("HTTP transport error: {0}")]
    Transport(Box<str>),

    #[error("address echo service returned an unparseable address: {0}")]
    UnparseableAddress(Box<str>),

    #[error("unable to run {0}: {1}")]
    Exec(&'static str, Box<str>),
}

/// Discovery of the host's current public address, one kind at a time.
///
/// `Ok(None)` means the host has no public address of that kind, which is a
/// valid outcome and not a failure.
pub trait ResolveAddress {
    fn resolve(&self, kind: RecordKind) -> Result<Option<IpAddr>, ResolveError>;
}

/// The real resolver: IPv4 over the echo service, IPv6 from a local
/// interface.
pub struct SystemResolver {
    interface: Box<str>,
}

impl SystemResolver {
    pub fn new(interface: &str) -> Self {
        Self {
            interface: interface.into(),
        }
    }
}

impl ResolveAddress for SystemResolver {
    fn resolve(&self, kind: RecordKind) -> Result<Option<IpAddr>, ResolveError> {
        match kind {
            RecordKind::A => echo::fetch_v4(ECHO_URL_V4).map(|ip| Some(IpAddr::V4(ip))),
            RecordKind::Aaaa => {
                Ok(exec::global_v6_address(&self.interface)?.map(IpAddr::V6))
            }
        }
    }
}
