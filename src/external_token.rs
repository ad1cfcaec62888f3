use crate::session::ExternalIdentity;
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::Deserialize;
use snafu::{OptionExt, ResultExt, Snafu};

#[derive(Debug, Snafu)]
pub enum ExternalTokenError {
    #[snafu(display("ExternalTokenError: Token has no payload segment"))]
    MissingPayload,

    #[snafu(display("ExternalTokenError: Payload is not valid base64url"))]
    DecodePayload { source: base64::DecodeError },

    #[snafu(display("ExternalTokenError: Could not parse claims: {source}"))]
    DecodeClaims { source: serde_json::Error },

    #[snafu(display("ExternalTokenError: Token carries no social id"))]
    MissingSocialId,
}

#[derive(Debug, Deserialize)]
struct ExternalTokenClaims {
    data: ExternalTokenData,
}

#[derive(Debug, Deserialize)]
struct ExternalTokenData {
    /// Issued as a JSON number by the mini-app backend, but strings are accepted as well.
    #[serde(rename = "tg_Id", default)]
    tg_id: Option<serde_json::Value>,

    #[serde(default)]
    user_name: Option<String>,
}

/// Decode a one-time token handed to us through the url, E.g. by a Telegram mini-app.
///
/// NOTE: This only decodes the payload! Neither the signing algorithm nor the signature, expiry,
/// audience or issuer are looked at. The backend is the party deciding whether the resulting
/// login is acceptable.
pub fn decode_external_token(token: &str) -> Result<ExternalIdentity, ExternalTokenError> {
    match jsonwebtoken::decode_header(token) {
        Ok(header) => tracing::trace!(?header, "Decoded external token header"),
        Err(err) => tracing::trace!(?err, "External token header not understood. Ignoring it."),
    }

    let payload = token
        .split('.')
        .nth(1)
        .filter(|it| !it.is_empty())
        .context(MissingPayloadSnafu)?;
    let payload = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .context(DecodePayloadSnafu)?;
    let claims = serde_json::from_slice::<ExternalTokenClaims>(&payload).context(DecodeClaimsSnafu)?;

    let social_id = match claims.data.tg_id {
        Some(serde_json::Value::String(id)) if !id.is_empty() => id,
        Some(serde_json::Value::Number(id)) => id.to_string(),
        _ => return MissingSocialIdSnafu.fail(),
    };

    Ok(ExternalIdentity {
        social_id,
        display_name: claims.data.user_name,
    })
}
