use reqwest::Url;

use crate::error::CoreError;

/// An RPC endpoint with any `user:pass@` credentials split out of the URL,
/// so they are sent as basic auth and never logged with the URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Endpoint {
    pub(super) url: String,
    pub(super) auth: Option<(String, String)>,
}

pub(super) fn parse_connection(connection: &str) -> Result<Endpoint, CoreError> {
    let connection_error = |reason: String| CoreError::Connection {
        url: connection.to_owned(),
        reason,
    };

    let mut parsed = Url::parse(connection)
        .map_err(|e| connection_error(format!("expected HTTP(S) URL ({e})")))?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(connection_error(format!(
                "unsupported connection scheme `{other}`; expected http or https"
            )))
        }
    }
    if parsed.host_str().is_none() {
        return Err(connection_error("missing host".to_owned()));
    }

    let auth = match (parsed.username(), parsed.password()) {
        ("", None) => None,
        (user, Some(pass)) if !user.is_empty() => Some((user.to_owned(), pass.to_owned())),
        _ => {
            return Err(connection_error(
                "both rpc user and rpc pass must be set together".to_owned(),
            ))
        }
    };
    if auth.is_some() {
        // Infallible for http(s) URLs with a host.
        let _ = parsed.set_username("");
        let _ = parsed.set_password(None);
    }

    Ok(Endpoint {
        url: parsed.to_string(),
        auth,
    })
}
