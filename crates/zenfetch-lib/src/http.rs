use crate::error::ZenfetchError;
use reqwest::{Client, RequestBuilder, Response};
use std::time::Duration;

const USER_AGENT: &str = concat!("zenfetch/", env!("CARGO_PKG_VERSION"));

/// Builds the client shared by metadata lookups and file downloads of a single run.
pub fn build_http_client(connect_timeout: Duration) -> Result<Client, ZenfetchError> {
    Client::builder()
        .user_agent(USER_AGENT)
        .connect_timeout(connect_timeout)
        .build()
        .map_err(Into::into)
}

pub(crate) fn authorized_get(client: &Client, url: &str, access_token: Option<&str>) -> RequestBuilder {
    let request = client.get(url);
    match access_token {
        Some(token) => request.bearer_auth(token),
        None => request,
    }
}

pub(crate) fn error_for_status(response: Response) -> Result<Response, ZenfetchError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ZenfetchError::HttpStatus {
            url: response.url().to_string(),
            status,
        })
    }
}
