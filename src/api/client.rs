use crate::api::cursor::QuestionCursor;
use crate::api::query::{QueryParams, SearchFilter};
use crate::error::{AskbotError, Result};
use crate::models::QuestionPage;
use reqwest::{header, Client};
use std::num::NonZeroUsize;
use url::Url;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct AskbotClient {
    client: Client,
    questions_url: Url,
}

fn questions_url(endpoint: &str) -> Result<Url> {
    let invalid = || AskbotError::invalid("endpoint", endpoint);

    let mut url = Url::parse(endpoint).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid());
    }

    url.path_segments_mut()
        .map_err(|_| invalid())?
        .pop_if_empty()
        .push("questions");
    url.set_fragment(None);

    Ok(url)
}

impl AskbotClient {
    /// Builds a client for the API rooted at `endpoint`, e.g. `https://ask.example.org/api/v1`.
    pub fn new(endpoint: Option<&str>) -> Result<Self> {
        let endpoint = endpoint
            .filter(|e| !e.trim().is_empty())
            .ok_or(AskbotError::MissingEndpoint)?;
        let questions_url = questions_url(endpoint.trim())?;

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(AskbotError::HttpClient)?;

        Ok(Self {
            client,
            questions_url,
        })
    }

    pub fn questions_url(&self) -> &Url {
        &self.questions_url
    }

    /// Validates `filter` and returns a cursor over every matching question,
    /// stopping after `limit` questions when one is given.
    ///
    /// Nothing is requested until the cursor is first advanced.
    pub fn questions(
        &self,
        filter: &SearchFilter,
        limit: Option<NonZeroUsize>,
    ) -> Result<QuestionCursor> {
        let params = filter.validate()?;
        Ok(QuestionCursor::new(self.clone(), params, limit))
    }

    pub(crate) async fn fetch_page(&self, params: &QueryParams, page: u32) -> Result<QuestionPage> {
        let network = |message: String| AskbotError::Network { page, message };

        let response = self
            .client
            .get(self.questions_url.clone())
            .header(header::ACCEPT, "application/json")
            .query(&[("page", page)])
            .query(params.pairs())
            .send()
            .await
            .map_err(|e| network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response.text().await.unwrap_or_default();
            return Err(network(format!("{} - {}", status, body_text.trim())));
        }

        let body = response.bytes().await.map_err(|e| network(e.to_string()))?;

        serde_json::from_slice(&body).map_err(|e| AskbotError::MalformedResponse {
            page,
            message: e.to_string(),
        })
    }
}
