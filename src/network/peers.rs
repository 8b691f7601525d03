use std::collections::BTreeSet;

use thiserror::Error;
use url::Url;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid node address: {0:?}")]
pub struct InvalidAddress(pub String);

/// Reduce a node address to `host[:port]`.
///
/// Accepts full URLs (`http://10.0.0.2:5000/`) as well as bare authorities
/// (`10.0.0.2:5000`). A port is kept whenever one was written, including a
/// scheme's default (`https://host:443`). Anything without a host, or with a
/// host made only of digits, is rejected.
pub fn parse_address(address: &str) -> Result<String, InvalidAddress> {
    let invalid = || InvalidAddress(address.to_string());

    let trimmed = address.trim();
    if trimmed.is_empty() {
        return Err(invalid());
    }

    let (written_host, written_port) = written_authority(trimmed);
    // `Url` would read "5000" as the IPv4 address 0.0.19.136.
    if !written_host.is_empty() && written_host.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    };

    let url = Url::parse(&with_scheme).map_err(|_| invalid())?;
    let host = url
        .host_str()
        .filter(|h| !h.is_empty())
        .ok_or_else(invalid)?;

    // `Url` drops a port equal to the scheme default, so ask for it back.
    let port = written_port.and(url.port_or_known_default());
    Ok(match port {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}

/// Host and port text as written, without scheme, userinfo or path.
fn written_authority(address: &str) -> (&str, Option<&str>) {
    let rest = address.split_once("://").map_or(address, |(_, rest)| rest);
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let authority = &rest[..end];
    let authority = authority.rsplit_once('@').map_or(authority, |(_, a)| a);

    if authority.ends_with(']') {
        return (authority, None);
    }
    match authority.rsplit_once(':') {
        Some((host, port)) if !port.is_empty() => (host, Some(port)),
        Some((host, _)) => (host, None),
        None => (authority, None),
    }
}

/// Address book of known nodes. Holds no chain state.
#[derive(Debug, Default)]
pub struct PeerSet {
    nodes: BTreeSet<String>,
}

impl PeerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a single address; returns the normalised form.
    pub fn register(&mut self, address: &str) -> Result<String, InvalidAddress> {
        let node = parse_address(address)?;
        self.nodes.insert(node.clone());
        Ok(node)
    }

    /// Register a batch. Every address is parsed before any is added, so a
    /// single bad entry leaves the set unchanged.
    pub fn register_all<S: AsRef<str>>(&mut self, addresses: &[S]) -> Result<(), InvalidAddress> {
        let parsed = addresses
            .iter()
            .map(|a| parse_address(a.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        self.nodes.extend(parsed);
        Ok(())
    }

    pub fn addresses(&self) -> Vec<String> {
        self.nodes.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
