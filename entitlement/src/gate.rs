use common::misc::Tier;
use serde::Serialize;

/// Everything the gate needs to decide access to one content item. The
/// caller resolves tier and quota beforehand; the gate itself does no I/O.
#[derive(Debug, Clone, Copy)]
pub struct GateInput {
    pub authenticated: bool,
    pub effective_tier: Tier,
    pub remaining_reads: i32,
    pub content_premium: bool,
    /// One-shot flag for the (content, view session) pairing: true when a
    /// read was already consumed for this view, so a re-render must not
    /// consume again.
    pub already_consumed: bool,
    /// False for decision-only calls (card previews, listings) that must
    /// not spend a read even when one is available.
    pub metering_allowed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Prompt {
    CreateAccount,
    Upgrade,
    QuotaExhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Unmetered full access.
    Full,
    /// Full access on the free-tier allowance, with a reads-remaining
    /// indicator. `consume` tells the caller to burn exactly one read;
    /// `remaining` is tentative until the store confirms the decrement.
    Metered { consume: bool, remaining: i32 },
    /// Preview only, with the prompt to render alongside it.
    Preview { prompt: Prompt },
}

pub fn decide(input: GateInput) -> GateDecision {
    if !input.content_premium {
        return GateDecision::Full;
    }
    if input.effective_tier >= Tier::Standard {
        return GateDecision::Full;
    }
    if !input.authenticated {
        return GateDecision::Preview {
            prompt: Prompt::CreateAccount,
        };
    }
    if input.already_consumed {
        // this view session already paid for itself
        return GateDecision::Metered {
            consume: false,
            remaining: input.remaining_reads.max(0),
        };
    }
    if input.remaining_reads <= 0 {
        return GateDecision::Preview {
            prompt: Prompt::QuotaExhausted,
        };
    }
    if !input.metering_allowed {
        return GateDecision::Preview {
            prompt: Prompt::Upgrade,
        };
    }
    GateDecision::Metered {
        consume: true,
        remaining: input.remaining_reads - 1,
    }
}
