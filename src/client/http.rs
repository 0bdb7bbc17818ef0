use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::entries::types::{EntryPatch, WordEntry};
use crate::lookup::router::{ENDPOINT_ADD, ENDPOINT_DEFINE, ENDPOINT_SUGGEST, ENDPOINT_WORDS};
use crate::lookup::types::{AddRequest, AddResponse, DeleteResponse, ErrorResponse};

/// `kind` the service reports when a word has no entry.
const NOT_FOUND_KIND: &str = "not_found";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{message} ({kind}, HTTP {status})")]
    Api {
        status: u16,
        kind: String,
        message: String,
    },
}

impl ClientError {
    pub fn kind(&self) -> Option<&str> {
        match self {
            ClientError::Api { kind, .. } => Some(kind.as_str()),
            ClientError::Transport(_) => None,
        }
    }
}

#[derive(Clone)]
pub struct DictionaryClient {
    base_url: String,
    http: reqwest::Client,
}

impl DictionaryClient {
    /// Accepts `host:port` or a full URL; a missing scheme defaults to `http://`.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn add(&self, req: &AddRequest) -> Result<WordEntry, ClientError> {
        let resp = self
            .http
            .post(format!("{}{}", self.base_url, ENDPOINT_ADD))
            .json(req)
            .send()
            .await?;
        let created: AddResponse = decode(resp).await?;
        Ok(created.word)
    }

    /// Looks up a definition. A `not_found` answer is `Ok(None)`, not an error.
    pub async fn define(&self, word: &str) -> Result<Option<WordEntry>, ClientError> {
        if word.trim().is_empty() {
            return Ok(None);
        }
        let resp = self
            .http
            .get(format!(
                "{}{}/{}",
                self.base_url,
                ENDPOINT_DEFINE,
                urlencoding::encode(word.trim())
            ))
            .send()
            .await?;

        match decode(resp).await {
            Ok(entry) => Ok(Some(entry)),
            // A 404 from anything but the lookup itself (wrong base path, proxy) stays an error.
            Err(ClientError::Api { status, ref kind, .. })
                if status == StatusCode::NOT_FOUND.as_u16() && kind.as_str() == NOT_FOUND_KIND =>
            {
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    pub async fn update(&self, word: &str, patch: &EntryPatch) -> Result<WordEntry, ClientError> {
        let resp = self
            .http
            .put(self.word_url(word))
            .json(patch)
            .send()
            .await?;
        decode(resp).await
    }

    pub async fn delete(&self, word: &str) -> Result<String, ClientError> {
        let resp = self.http.delete(self.word_url(word)).send().await?;
        let deleted: DeleteResponse = decode(resp).await?;
        Ok(deleted.word)
    }

    pub async fn suggest(&self, q: &str) -> Result<Vec<String>, ClientError> {
        if q.trim().is_empty() {
            return Ok(Vec::new());
        }
        let resp = self
            .http
            .get(format!(
                "{}{}?q={}",
                self.base_url,
                ENDPOINT_SUGGEST,
                urlencoding::encode(q)
            ))
            .send()
            .await?;
        decode(resp).await
    }

    fn word_url(&self, word: &str) -> String {
        format!(
            "{}{}/{}",
            self.base_url,
            ENDPOINT_WORDS,
            urlencoding::encode(word.trim())
        )
    }
}

async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp.json::<T>().await?);
    }

    let body = resp.text().await.unwrap_or_default();
    let (kind, message) = match serde_json::from_str::<ErrorResponse>(&body) {
        Ok(err) => (err.kind, err.error),
        Err(_) => ("unknown".to_string(), body),
    };
    Err(ClientError::Api {
        status: status.as_u16(),
        kind,
        message,
    })
}

fn normalize_base_url(candidate: &str) -> String {
    let trimmed = candidate.trim();
    let normalized = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    };

    normalized.trim_end_matches('/').to_string()
}
