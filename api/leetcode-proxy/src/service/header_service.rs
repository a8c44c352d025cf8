use axum::http::header::{
    ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, COOKIE, HeaderMap, HeaderName, HeaderValue, ORIGIN,
    REFERER, USER_AGENT,
};
use tracing::warn;

pub const CSRF_HEADER: &str = "x-csrftoken";

const FINGERPRINT_HEADERS: [(&str, &str); 6] = [
    (
        "sec-ch-ua",
        "\"Microsoft Edge\";v=\"135\", \"Not-A.Brand\";v=\"8\", \"Chromium\";v=\"135\"",
    ),
    ("sec-ch-ua-mobile", "?0"),
    ("sec-ch-ua-platform", "\"Windows\""),
    ("sec-fetch-dest", "empty"),
    ("sec-fetch-mode", "cors"),
    ("sec-fetch-site", "same-origin"),
];

/// Caller-side credentials forwarded to the upstream platform.
///
/// Every field is optional; an empty string is treated the same as an
/// absent value so that it can never shadow a configured default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub cookie: Option<String>,
    pub csrf_token: Option<String>,
    pub user_agent: Option<String>,
    pub origin: Option<String>,
    pub referer: Option<String>,
}

impl Credentials {
    /// Reads `Cookie`, `x-csrftoken`, `User-Agent`, `Origin` and `Referer`
    /// from an inbound request.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let cookie = headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .collect::<Vec<_>>()
            .join("; ");

        Self {
            cookie: non_empty(Some(cookie)),
            csrf_token: header_str(headers, CSRF_HEADER),
            user_agent: header_str(headers, USER_AGENT.as_str()),
            origin: header_str(headers, ORIGIN.as_str()),
            referer: header_str(headers, REFERER.as_str()),
        }
    }

    /// Field-by-field merge: request value, else default, else absent.
    ///
    /// The CSRF token is looked up in this order: explicit token, the
    /// `csrftoken=` segment of the request cookie, the default token, the
    /// `csrftoken=` segment of the default cookie.
    pub fn resolve(&self, defaults: &Credentials) -> Credentials {
        let request = self.clone().normalized();
        let defaults = defaults.clone().normalized();

        let csrf_token = request
            .csrf_token
            .clone()
            .or_else(|| request.cookie.as_deref().and_then(csrf_from_cookie))
            .or_else(|| defaults.csrf_token.clone())
            .or_else(|| defaults.cookie.as_deref().and_then(csrf_from_cookie));

        Credentials {
            cookie: request.cookie.or(defaults.cookie),
            csrf_token,
            user_agent: request.user_agent.or(defaults.user_agent),
            origin: request.origin.or(defaults.origin),
            referer: request.referer.or(defaults.referer),
        }
    }

    /// Builds the outbound header map: fixed browser headers underneath,
    /// present credential fields on top, absent ones omitted entirely.
    pub fn to_header_map(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        for (name, value) in FINGERPRINT_HEADERS {
            headers.insert(
                HeaderName::from_static(name),
                HeaderValue::from_static(value),
            );
        }

        insert_opt(&mut headers, COOKIE, self.cookie.as_deref());
        insert_opt(
            &mut headers,
            HeaderName::from_static(CSRF_HEADER),
            self.csrf_token.as_deref(),
        );
        insert_opt(&mut headers, USER_AGENT, self.user_agent.as_deref());
        insert_opt(&mut headers, ORIGIN, self.origin.as_deref());
        insert_opt(&mut headers, REFERER, self.referer.as_deref());
        headers
    }

    fn normalized(self) -> Self {
        Self {
            cookie: non_empty(self.cookie),
            csrf_token: non_empty(self.csrf_token),
            user_agent: non_empty(self.user_agent),
            origin: non_empty(self.origin),
            referer: non_empty(self.referer),
        }
    }
}

/// Resolves request credentials against the defaults and renders them.
pub fn outbound_headers(request: &Credentials, defaults: &Credentials) -> HeaderMap {
    request.resolve(defaults).to_header_map()
}

/// Replaces the `Referer` header for a single upstream call.
pub fn with_referer(mut headers: HeaderMap, referer: &str) -> HeaderMap {
    insert_opt(&mut headers, REFERER, Some(referer));
    headers
}

pub fn csrf_from_cookie(cookie: &str) -> Option<String> {
    cookie
        .split(';')
        .map(str::trim)
        .find(|segment| segment.starts_with("csrftoken="))
        .and_then(|segment| segment.split_once('='))
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn insert_opt(headers: &mut HeaderMap, name: HeaderName, value: Option<&str>) {
    let Some(value) = value else {
        return;
    };
    match HeaderValue::from_str(value) {
        Ok(v) => {
            headers.insert(name, v);
        }
        Err(e) => warn!(header = %name, error = %e, "dropping credential header with invalid value"),
    }
}

fn header_str(headers: &HeaderMap, name: &str) -> Option<String> {
    non_empty(
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToOwned::to_owned),
    )
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
