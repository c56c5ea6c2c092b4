//! Bloomerang REST client
//!
//! Implements the three directory ports from `hearth_domain::traits` against
//! the Bloomerang v2 API.
//!
//! # Features
//!
//! - Async HTTP communication authenticated by API key
//! - Configurable endpoint and timeout
//! - Retry logic with exponential backoff for read requests
//! - Writes are submitted exactly once; they are not safe to replay blindly
//!
//! # Examples
//!
//! ```no_run
//! use hearth_bloomerang::BloomerangClient;
//!
//! let client = BloomerangClient::new("api-key-from-env");
//!
//! // Lookup and persistence methods are async; drive them from a runtime
//! ```

use crate::roles::relationship_role_id;
use crate::wire::{
    AttachPayload, ConstituentDto, ConstituentPayload, HouseholdDto, HouseholdPayload,
    RelationshipDto, RelationshipPayload, ResultsPage,
};
use crate::BloomerangError;
use hearth_domain::traits::{ConstituentLookup, HouseholdStore, RelationshipHistory};
use hearth_domain::{
    CanonicalNameSet, Constituent, HouseholdRecord, Person, RelationshipOutcome,
    RelationshipRecord,
};
use std::time::Duration;

/// Default Bloomerang API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.bloomerang.co/v2";

/// Default timeout for directory requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of retry attempts for read requests
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Header carrying the API key
const API_KEY_HEADER: &str = "X-API-KEY";

/// Maximum results fetched when matching an account number
const ACCOUNT_SEARCH_TAKE: u32 = 50;

/// Maximum results fetched when checking for duplicate names
const DUPLICATE_SEARCH_TAKE: u32 = 20;

/// Bloomerang v2 API client
///
/// One client holds one API key; the underlying HTTP connection pool is
/// reused across requests.
pub struct BloomerangClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
    max_retries: u32,
}

impl BloomerangClient {
    /// Create a client for the production endpoint
    pub fn new(api_key: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap();

        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            client,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Point the client at a different endpoint (staging, local stub)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the maximum number of retry attempts for read requests
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// GET a JSON resource, retrying transient failures
    ///
    /// Returns `Ok(None)` for 404 so callers can treat missing records as
    /// ordinary lookups. Authentication failures are surfaced immediately;
    /// other errors retry with exponential backoff.
    async fn get_json<T>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Option<T>, BloomerangError>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);

        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            let mut request = self.client.get(&url).header(API_KEY_HEADER, &self.api_key);
            if !query.is_empty() {
                request = request.query(query);
            }

            match request.send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return match response.json::<T>().await {
                            Ok(value) => Ok(Some(value)),
                            Err(e) => Err(BloomerangError::InvalidResponse(format!(
                                "Failed to parse response from {}: {}",
                                path, e
                            ))),
                        };
                    } else if status == reqwest::StatusCode::NOT_FOUND {
                        return Ok(None);
                    } else if status == reqwest::StatusCode::UNAUTHORIZED
                        || status == reqwest::StatusCode::FORBIDDEN
                    {
                        return Err(BloomerangError::Auth(format!(
                            "HTTP {} from {}",
                            status, path
                        )));
                    } else {
                        let body = response
                            .text()
                            .await
                            .unwrap_or_else(|_| "Unknown error".to_string());
                        last_error = Some(BloomerangError::Api {
                            status: status.as_u16(),
                            message: body,
                        });
                    }
                }
                Err(e) => {
                    last_error = Some(e.into());
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                // Exponential backoff: 1s, 2s, 4s, etc.
                let delay = Duration::from_secs(2u64.pow(attempts - 1));
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error
            .unwrap_or_else(|| BloomerangError::Communication("Max retries exceeded".to_string())))
    }

    /// Submit a write request once, without retries
    async fn send_json<B>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response, BloomerangError>
    where
        B: serde::Serialize,
    {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .request(method, &url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(body)
            .send()
            .await?;
        Ok(response)
    }

    async fn search_constituents(
        &self,
        search: String,
        take: Option<u32>,
    ) -> Result<Vec<ConstituentDto>, BloomerangError> {
        let mut query = vec![("search", search), ("type", "Individual".to_string())];
        if let Some(take) = take {
            query.push(("take", take.to_string()));
        }

        let page: Option<ResultsPage<ConstituentDto>> =
            self.get_json("/constituents/search", &query).await?;
        Ok(page.map(|p| p.results).unwrap_or_default())
    }

    async fn api_error(response: reqwest::Response) -> BloomerangError {
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        BloomerangError::Api { status, message }
    }
}

fn name_matches(dto: &ConstituentDto, first_name: &str, last_name: &str) -> bool {
    dto.first_name.to_lowercase() == first_name.to_lowercase()
        && dto.last_name.to_lowercase() == last_name.to_lowercase()
}

impl ConstituentLookup for BloomerangClient {
    type Error = BloomerangError;

    async fn find_by_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Option<Constituent>, BloomerangError> {
        let results = self
            .search_constituents(format!("{} {}", first_name, last_name), None)
            .await?;

        let exact = results
            .iter()
            .find(|dto| name_matches(dto, first_name, last_name));

        // Exact case-insensitive match preferred, else the first hit
        Ok(exact
            .or_else(|| results.first())
            .cloned()
            .map(Constituent::from))
    }

    async fn matches_by_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Vec<Constituent>, BloomerangError> {
        let results = self
            .search_constituents(
                format!("{} {}", first_name, last_name),
                Some(DUPLICATE_SEARCH_TAKE),
            )
            .await?;

        Ok(results
            .into_iter()
            .filter(|dto| name_matches(dto, first_name, last_name))
            .map(Constituent::from)
            .collect())
    }

    async fn find_by_account_number(
        &self,
        account_number: &str,
    ) -> Result<Option<Constituent>, BloomerangError> {
        let cleaned = account_number.replace('#', "").trim().to_string();
        let results = self
            .search_constituents(cleaned.clone(), Some(ACCOUNT_SEARCH_TAKE))
            .await?;

        Ok(results
            .into_iter()
            .find(|dto| {
                dto.account_number
                    .map(|n| n.to_string() == cleaned)
                    .unwrap_or(false)
            })
            .map(Constituent::from))
    }

    async fn constituent(&self, id: i64) -> Result<Option<Constituent>, BloomerangError> {
        let dto: Option<ConstituentDto> =
            self.get_json(&format!("/constituent/{}", id), &[]).await?;
        Ok(dto.map(Constituent::from))
    }

    async fn household(&self, id: i64) -> Result<Option<HouseholdRecord>, BloomerangError> {
        let dto: Option<HouseholdDto> = self.get_json(&format!("/household/{}", id), &[]).await?;
        Ok(dto.map(HouseholdRecord::from))
    }
}

impl RelationshipHistory for BloomerangClient {
    type Error = BloomerangError;

    async fn relationships(
        &self,
        constituent_id: i64,
    ) -> Result<Vec<RelationshipRecord>, BloomerangError> {
        let page: Option<ResultsPage<RelationshipDto>> = self
            .get_json(&format!("/constituent/{}/relationships", constituent_id), &[])
            .await?;

        Ok(page
            .map(|p| p.results.into_iter().map(RelationshipRecord::from).collect())
            .unwrap_or_default())
    }
}

impl HouseholdStore for BloomerangClient {
    type Error = BloomerangError;

    async fn create_household(
        &self,
        names: &CanonicalNameSet,
        head: &Person,
        members: &[Person],
    ) -> Result<HouseholdRecord, BloomerangError> {
        let payload = HouseholdPayload::new(
            None,
            names,
            ConstituentPayload::from_person(head),
            members.iter().map(ConstituentPayload::from_person).collect(),
        );

        let response = self
            .send_json(reqwest::Method::POST, "/household", &payload)
            .await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        match response.json::<HouseholdDto>().await {
            Ok(dto) => Ok(HouseholdRecord::from(dto)),
            Err(e) => Err(BloomerangError::InvalidResponse(format!(
                "Failed to parse created household: {}",
                e
            ))),
        }
    }

    async fn update_household(
        &self,
        household_id: i64,
        names: &CanonicalNameSet,
        head: &Constituent,
        members: &[Constituent],
    ) -> Result<(), BloomerangError> {
        let payload = HouseholdPayload::new(
            Some(household_id),
            names,
            ConstituentPayload::from_constituent(head),
            members
                .iter()
                .map(ConstituentPayload::from_constituent)
                .collect(),
        );

        let response = self
            .send_json(
                reqwest::Method::PUT,
                &format!("/household/{}", household_id),
                &payload,
            )
            .await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }
        Ok(())
    }

    async fn attach_to_household(
        &self,
        household_id: i64,
        member: &Constituent,
    ) -> Result<(), BloomerangError> {
        let payload = AttachPayload::new(member, household_id);
        let response = self
            .send_json(
                reqwest::Method::PUT,
                &format!("/constituent/{}", member.id),
                &payload,
            )
            .await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }
        Ok(())
    }

    async fn create_relationship(
        &self,
        account_id_1: i64,
        account_id_2: i64,
        role_1: &str,
        role_2: &str,
    ) -> Result<RelationshipOutcome, BloomerangError> {
        let relationship_role_id_1 = relationship_role_id(role_1)
            .ok_or_else(|| BloomerangError::UnknownRole(role_1.to_string()))?;
        let relationship_role_id_2 = relationship_role_id(role_2)
            .ok_or_else(|| BloomerangError::UnknownRole(role_2.to_string()))?;

        let payload = RelationshipPayload {
            account_id_1,
            account_id_2,
            relationship_role_id_1,
            relationship_role_id_2,
        };

        let response = self
            .send_json(reqwest::Method::POST, "/relationship", &payload)
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(RelationshipOutcome::Created)
        } else if status == reqwest::StatusCode::BAD_REQUEST {
            // The directory reports an existing relationship as 400
            Ok(RelationshipOutcome::AlreadyExists)
        } else {
            Err(Self::api_error(response).await)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_defaults() {
        let client = BloomerangClient::new("secret");
        assert_eq!(client.base_url, DEFAULT_BASE_URL);
        assert_eq!(client.api_key, "secret");
        assert_eq!(client.max_retries, DEFAULT_MAX_RETRIES);
    }

    #[test]
    fn test_client_with_base_url_trims_trailing_slash() {
        let client = BloomerangClient::new("secret").with_base_url("http://localhost:8080/v2/");
        assert_eq!(client.base_url, "http://localhost:8080/v2");
    }

    #[test]
    fn test_client_with_max_retries() {
        let client = BloomerangClient::new("secret").with_max_retries(5);
        assert_eq!(client.max_retries, 5);
    }

    #[tokio::test]
    async fn test_lookup_error_on_unreachable_endpoint() {
        let client = BloomerangClient::new("secret")
            .with_base_url("http://127.0.0.1:9")
            .with_max_retries(1);

        let result = client.find_by_name("John", "Smith").await;
        assert!(matches!(result, Err(BloomerangError::Communication(_))));
    }

    // Integration test (requires a live API key)
    #[tokio::test]
    #[ignore] // Only run when a real Bloomerang key is configured
    async fn test_search_integration() {
        let api_key = match std::env::var("BLOOMERANG_API_KEY") {
            Ok(key) => key,
            Err(_) => return,
        };

        let client = BloomerangClient::new(api_key);
        let result = client.find_by_name("John", "Smith").await;
        assert!(result.is_ok());
    }
}
