//! Access token introspection.
//!
//! Reads the `exp` claim out of a JWT by base64url-decoding its payload
//! segment. **No signature verification is performed**: the result is only
//! good for deciding when to refresh, never for trusting the token.

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::tokens::AccessToken;

/// Refresh when this much lifetime or less remains.
pub const DEFAULT_EXPIRY_LEEWAY: Duration = Duration::from_secs(120);

#[derive(Debug, Deserialize)]
struct ExpiryClaim {
    exp: Option<f64>,
}

/// Returns the expiry instant encoded in the token's payload.
///
/// Returns `None` if the token is not three dot-separated segments, the
/// payload is not base64url JSON, or `exp` is missing or not a number.
pub fn expires_at(token: &AccessToken) -> Option<DateTime<Utc>> {
    let mut segments = token.as_str().split('.');
    let (_header, payload, _signature) = (segments.next()?, segments.next()?, segments.next()?);
    if segments.next().is_some() {
        return None;
    }

    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    let claim: ExpiryClaim = serde_json::from_slice(&bytes).ok()?;
    let exp = claim.exp.filter(|exp| exp.is_finite())?;

    let secs = exp.floor();
    let nanos = ((exp - secs) * 1e9) as u32;
    DateTime::from_timestamp(secs as i64, nanos)
}

/// Decide whether an access token needs refreshing at `now`.
///
/// Fails safe toward re-authentication: an absent token, an unreadable
/// payload, or one with `leeway` or less remaining all count as expired.
pub fn is_almost_expired(
    token: Option<&AccessToken>,
    now: DateTime<Utc>,
    leeway: Duration,
) -> bool {
    let Some(expiry) = token.and_then(expires_at) else {
        return true;
    };

    let remaining = expiry.signed_duration_since(now).num_milliseconds();
    remaining <= leeway.as_millis() as i64
}

/// Time left before the token expires, if readable and still in the future.
pub fn time_remaining(token: &AccessToken, now: DateTime<Utc>) -> Option<chrono::TimeDelta> {
    let remaining = expires_at(token)?.signed_duration_since(now);
    (remaining > chrono::TimeDelta::zero()).then_some(remaining)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn token_with_payload(payload: &str) -> AccessToken {
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload);
        AccessToken::new(format!("{header}.{body}.c2ln"))
    }

    fn token_expiring_at(exp: i64) -> AccessToken {
        token_with_payload(&format!(r#"{{"token_type":"access","exp":{exp},"user_id":7}}"#))
    }

    #[test]
    fn reads_exp_claim() {
        let token = token_expiring_at(1_700_000_000);
        assert_eq!(expires_at(&token).unwrap().timestamp(), 1_700_000_000);
    }

    #[test]
    fn absent_token_counts_as_expired() {
        assert!(is_almost_expired(None, Utc::now(), DEFAULT_EXPIRY_LEEWAY));
    }

    #[test]
    fn near_expiry_is_almost_expired() {
        let now = Utc::now();
        let token = token_expiring_at((now + TimeDelta::seconds(60)).timestamp());
        assert!(is_almost_expired(Some(&token), now, DEFAULT_EXPIRY_LEEWAY));
    }

    #[test]
    fn exactly_at_leeway_is_almost_expired() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let token = token_expiring_at(1_700_000_120);
        assert!(is_almost_expired(Some(&token), now, DEFAULT_EXPIRY_LEEWAY));
    }

    #[test]
    fn comfortably_valid_is_not_expired() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let token = token_expiring_at(1_700_000_121);
        assert!(!is_almost_expired(Some(&token), now, DEFAULT_EXPIRY_LEEWAY));

        let token = token_expiring_at(1_700_000_300);
        assert!(!is_almost_expired(Some(&token), now, DEFAULT_EXPIRY_LEEWAY));
    }

    #[test]
    fn malformed_tokens_count_as_expired() {
        let now = Utc::now();
        for raw in ["", "opaque", "a.b", "a.!!!.c", "a.b.c.d"] {
            let token = AccessToken::new(raw);
            assert!(is_almost_expired(Some(&token), now, DEFAULT_EXPIRY_LEEWAY), "{raw}");
        }

        let no_exp = token_with_payload(r#"{"user_id":7}"#);
        assert!(is_almost_expired(Some(&no_exp), now, DEFAULT_EXPIRY_LEEWAY));

        let string_exp = token_with_payload(r#"{"exp":"tomorrow"}"#);
        assert!(is_almost_expired(Some(&string_exp), now, DEFAULT_EXPIRY_LEEWAY));
    }

    #[test]
    fn tolerates_padded_payload() {
        let header = URL_SAFE_NO_PAD.encode("{}");
        let body = base64::engine::general_purpose::URL_SAFE.encode(r#"{"exp": 1700000000}"#);
        let token = AccessToken::new(format!("{header}.{body}.sig"));
        assert_eq!(expires_at(&token).unwrap().timestamp(), 1_700_000_000);
    }

    #[test]
    fn time_remaining_is_none_once_expired() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        assert!(time_remaining(&token_expiring_at(1_699_999_999), now).is_none());
        assert_eq!(
            time_remaining(&token_expiring_at(1_700_000_300), now),
            Some(TimeDelta::seconds(300))
        );
    }
}
