use db::models::profile::Profile;
use entitlement::gate::Prompt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ContentQuery {
    /// Whether the content item is premium; owned by the content store and
    /// passed through by the renderer.
    #[serde(default)]
    pub premium: bool,
    /// One-shot marker replayed by the client after a read was consumed for
    /// this view session; a re-render with this set never consumes again.
    #[serde(default)]
    pub consumed: bool,
    /// Set false for decision-only calls (listings, cards) that must not
    /// spend a read.
    #[serde(default = "default_true")]
    pub consume: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    Full,
    Preview,
}

#[derive(Debug, Serialize)]
pub struct AccessResponse {
    pub access: AccessLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<Prompt>,
    /// Reads remaining after this request, present only on metered access.
    /// Confirmed by the store, never a client-side guess.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_reads: Option<i32>,
    /// Marker for the client to replay as `consumed=true` on re-render.
    pub consumed: bool,
    /// True when the profile fetch failed and the free-tier fallback was
    /// served; the client may re-fetch.
    pub is_stale: bool,
}

#[derive(Debug, Serialize)]
pub struct SubscriptionResponse {
    pub profile: Option<Profile>,
    pub effective_tier: String,
    pub remaining_reads: i32,
    pub is_stale: bool,
}
