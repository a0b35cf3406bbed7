//! The HTTP boundary.

use crate::{Error, Result};

/// The seam between lookups and the network. Implemented by test doubles so
/// the lookup path can run without any HTTP at all.
pub trait Transport {
    /// Fetches the body of the given URL.
    fn fetch(&self, url: &str) -> Result<String>;
}

/// The production transport.
#[derive(Clone, Copy, Debug, Default)]
pub struct UreqTransport;

impl Transport for UreqTransport {
    fn fetch(&self, url: &str) -> Result<String> {
        log::debug!("GET {url}");
        ureq::get(url)
            .header(
                "User-Agent",
                concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")),
            )
            .call()
            .map_err(|err| Error::Transport(Box::new(err)))?
            .into_body()
            .read_to_string()
            .map_err(|err| Error::Transport(Box::new(err)))
    }
}
