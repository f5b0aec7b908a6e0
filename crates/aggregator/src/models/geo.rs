use std::net::IpAddr;

/// Request context for a geolocation fetch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GeoRequest {
    /// Address to look up; `None` means the caller as seen by the upstream.
    pub ip: Option<IpAddr>,
}

impl GeoRequest {
    /// Look up a specific address.
    pub fn for_ip(ip: IpAddr) -> Self {
        Self { ip: Some(ip) }
    }
}

/// Geolocation payloads are passed through unmodified.
pub type GeoPayload = serde_json::Value;
