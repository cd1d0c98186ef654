/// Generic string-keyed profile document as returned by the provider.
pub type Profile = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("profile request failed: {0}")]
    Http(#[source] reqwest::Error),

    #[error("profile response could not be decoded: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Fetches the provider profile document for an access token. Only called
/// when the resolved identity carries a non-empty token; callers substitute
/// an empty profile on any error.
#[derive(Clone)]
pub struct ProfileFetcher {
    profile_url: String,
    http: reqwest::Client,
}

impl ProfileFetcher {
    pub fn new(profile_url: String, http: reqwest::Client) -> Self {
        Self { profile_url, http }
    }

    /// The body is decoded regardless of HTTP status, so provider error
    /// documents surface inside the profile map. The response is consumed
    /// or dropped on every path.
    pub async fn fetch_profile(&self, access_token: &str) -> Result<Profile, FetchError> {
        let response = self
            .http
            .get(&self.profile_url)
            .query(&[("access_token", access_token)])
            .send()
            .await
            .map_err(FetchError::Http)?;

        response.json::<Profile>().await.map_err(|err| {
            if err.is_decode() {
                FetchError::Decode(err)
            } else {
                FetchError::Http(err)
            }
        })
    }
}
