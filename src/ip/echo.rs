use std::net::Ipv4Addr;

use crate::http::{Error, Request};

use super::ResolveError;

/// Ask the echo service for our public IPv4 address. The response body is
/// the address in plain text, nothing else.
pub(super) fn fetch_v4(url: &str) -> Result<Ipv4Addr, ResolveError> {
    let response = match Request::get(url).call() {
        Ok(r) => r,
        Err(Error::Status(code, response)) => {
            let body = response.into_string().unwrap_or_default();
            return Err(ResolveError::Status(code, body.into()));
        }
        Err(Error::Transport(tp)) => return Err(ResolveError::Transport(tp)),
    };

    let text = response
        .into_string()
        .map_err(|e| ResolveError::Transport(e.to_string().into()))?;

    text.trim()
        .parse::<Ipv4Addr>()
        .map_err(|_| ResolveError::UnparseableAddress(text.trim().into()))
}
