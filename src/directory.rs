//! Directory API client: authenticates with a read-only scope and fetches
//! the account list with exactly the fields the audit needs.

use crate::config::DirectoryCredentials;
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Fields requested per account. Selecting only these bounds payload size;
/// full user objects are never fetched.
const SELECT_FIELDS: &str = "displayName,userPrincipalName,assignedLicenses,signInActivity";

/// One account as enumerated by the directory. Read-only input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub display_name: String,
    pub user_principal_name: String,
    /// Assigned SKU part numbers, in directory order.
    pub licenses: Vec<String>,
    /// Absent means the directory has no sign-in on record.
    pub last_sign_in: Option<DateTime<Utc>>,
}

/// An authenticated directory session. Holds the bearer token; dropped via
/// [`DirectoryClient::close`] so no session outlives the run.
pub struct Session {
    access_token: String,
}

pub struct DirectoryClient {
    client: Client,
    credentials: DirectoryCredentials,
}

impl DirectoryClient {
    pub fn new(credentials: DirectoryCredentials) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            credentials,
        })
    }

    /// Acquire a token via the client-credentials grant. Only the default
    /// read scope is requested; no write scope is ever part of the grant.
    pub async fn connect(&self) -> Result<Session> {
        let token_url = format!(
            "{}/{}/oauth2/v2.0/token",
            self.credentials.login_url, self.credentials.tenant_id
        );
        let scope = format!("{}/.default", self.credentials.directory_url);

        let response = self
            .client
            .post(&token_url)
            .form(&[
                ("client_id", self.credentials.client_id.as_str()),
                ("client_secret", self.credentials.client_secret.as_str()),
                ("scope", scope.as_str()),
                ("grant_type", "client_credentials"),
            ])
            .send()
            .await
            .map_err(|e| Error::Auth(format!("token request failed: {e}")))?;

        match response.status() {
            StatusCode::OK => {
                let token: TokenResponse = response
                    .json()
                    .await
                    .map_err(|e| Error::Auth(format!("malformed token response: {e}")))?;
                debug!("directory session established");
                Ok(Session {
                    access_token: token.access_token,
                })
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(Error::Auth(format!("token endpoint returned {status}: {body}")))
            }
        }
    }

    /// Fetch every account, following pagination until the directory reports
    /// no further page. Returns one ordered collection.
    pub async fn fetch_accounts(&self, session: &Session) -> Result<Vec<Account>> {
        let mut accounts = Vec::new();
        let mut url = format!(
            "{}/v1.0/users?$select={SELECT_FIELDS}&$top=999",
            self.credentials.directory_url
        );

        loop {
            let response = self
                .client
                .get(&url)
                .bearer_auth(&session.access_token)
                .send()
                .await
                .map_err(|e| Error::FetchTransient(format!("request error: {e}")))?;

            let page = match response.status() {
                StatusCode::OK => {
                    response
                        .json::<UsersPage>()
                        .await
                        .map_err(|e| Error::FetchTransient(format!("malformed page: {e}")))?
                }
                StatusCode::FORBIDDEN => {
                    let body = response.text().await.unwrap_or_default();
                    return Err(Error::FetchPermission(format!(
                        "directory denied the read ({body})"
                    )));
                }
                // 401 mid-fetch is a token problem, not a missing scope
                StatusCode::UNAUTHORIZED => {
                    let body = response.text().await.unwrap_or_default();
                    return Err(Error::Auth(format!(
                        "directory rejected the session token ({body})"
                    )));
                }
                status => {
                    let body = response.text().await.unwrap_or_default();
                    return Err(Error::FetchTransient(format!(
                        "directory returned {status}: {body}"
                    )));
                }
            };

            accounts.extend(page.value.into_iter().map(Account::from));
            match page.next_link {
                Some(next) => url = next,
                None => break,
            }
        }

        debug!("fetched {} accounts", accounts.len());
        Ok(accounts)
    }

    /// Tear the session down. The token is dropped here so no credential
    /// lingers past the run.
    pub fn close(&self, session: Session) {
        drop(session);
        debug!("directory session closed");
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct UsersPage {
    value: Vec<WireUser>,
    #[serde(rename = "@odata.nextLink")]
    next_link: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireUser {
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    user_principal_name: Option<String>,
    #[serde(default)]
    assigned_licenses: Vec<WireLicense>,
    #[serde(default)]
    sign_in_activity: Option<WireSignInActivity>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireLicense {
    #[serde(default)]
    sku_part_number: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireSignInActivity {
    #[serde(default)]
    last_sign_in_date_time: Option<DateTime<Utc>>,
}

impl From<WireUser> for Account {
    fn from(user: WireUser) -> Self {
        Self {
            display_name: user.display_name.unwrap_or_default(),
            user_principal_name: user.user_principal_name.unwrap_or_default(),
            licenses: user
                .assigned_licenses
                .into_iter()
                .filter_map(|l| l.sku_part_number)
                .collect(),
            last_sign_in: user
                .sign_in_activity
                .and_then(|a| a.last_sign_in_date_time),
        }
    }
}
