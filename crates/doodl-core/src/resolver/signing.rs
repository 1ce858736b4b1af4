//! Signed media URL construction.

use rand::distributions::Alphanumeric;
use rand::Rng;
use std::time::{SystemTime, UNIX_EPOCH};

/// Length of the randomized path component the host expects after the base URL.
pub const RANDOM_SUFFIX_LEN: usize = 10;

/// Ten characters drawn uniformly from `[A-Za-z0-9]`. Not a secret.
pub fn random_suffix() -> String {
    random_suffix_with(&mut rand::thread_rng())
}

pub fn random_suffix_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    rng.sample_iter(&Alphanumeric)
        .take(RANDOM_SUFFIX_LEN)
        .map(char::from)
        .collect()
}

/// Wall-clock seconds since the Unix epoch.
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// `{base}{suffix}?token={token}&expiry={expiry}`.
///
/// The host checks that `expiry` is recent, so the result should be fetched promptly.
pub fn sign_media_url(base: &str, suffix: &str, token: &str, expiry: u64) -> String {
    format!("{}{}?token={}&expiry={}", base, suffix, token, expiry)
}
