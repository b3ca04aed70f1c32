//! Character quota: account usage lookup and the pre-synthesis guard.
//!
//! The provider bills per synthesized character, so the guard runs before
//! any synthesis call is made.

use crate::transport::HttpTransport;
use crate::Result;
use serde::Deserialize;
use tracing::{debug, warn};

/// Account-info endpoint.
pub const USER_PATH: &str = "/v1/user";

/// Characters used this billing period and the period's limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct UsageSnapshot {
    pub character_count: u64,
    pub character_limit: u64,
}

impl UsageSnapshot {
    pub fn new(character_count: u64, character_limit: u64) -> Self {
        Self {
            character_count,
            character_limit,
        }
    }

    pub fn remaining(&self) -> u64 {
        self.character_limit.saturating_sub(self.character_count)
    }
}

#[derive(Debug, Deserialize)]
struct UserInfo {
    subscription: UsageSnapshot,
}

/// The request would push usage past the account limit.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "You will exceed the character limit for ElevenLabs. \
     Current used characters: {used}, \
     Text character count: {text_characters}, \
     Total if allowed: {total}, \
     Character limit: {limit}"
)]
pub struct QuotaExceeded {
    pub used: u64,
    pub text_characters: u64,
    pub total: u64,
    pub limit: u64,
}

/// Number of characters the provider bills for `text` (Unicode scalar values).
pub fn character_count(text: &str) -> u64 {
    text.chars().count() as u64
}

/// Check whether synthesizing `text` stays within the account limit.
///
/// Reaching the limit exactly is allowed; only `used + len(text) > limit` fails.
pub fn check_character_limit(
    text: &str,
    usage: &UsageSnapshot,
) -> std::result::Result<(), QuotaExceeded> {
    let text_characters = character_count(text);
    let total = usage.character_count.saturating_add(text_characters);

    if total > usage.character_limit {
        let exceeded = QuotaExceeded {
            used: usage.character_count,
            text_characters,
            total,
            limit: usage.character_limit,
        };
        warn!(
            used = exceeded.used,
            text_characters = exceeded.text_characters,
            total = exceeded.total,
            limit = exceeded.limit,
            "character limit would be exceeded"
        );
        return Err(exceeded);
    }

    debug!(
        used = usage.character_count,
        text_characters,
        total,
        limit = usage.character_limit,
        "character limit respected"
    );
    Ok(())
}

/// Fetch the current usage snapshot. Never cached: every call hits the provider.
pub fn fetch_usage(transport: &HttpTransport) -> Result<UsageSnapshot> {
    let info: UserInfo = transport.get_json(USER_PATH)?;
    debug!(
        used = info.subscription.character_count,
        limit = info.subscription.character_limit,
        "fetched character usage"
    );
    Ok(info.subscription)
}
