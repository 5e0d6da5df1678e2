//! Run configuration: the watched SKU set, the inactivity threshold, and the
//! directory credentials sourced from the environment.

use crate::error::{Error, Result};

/// Days of inactivity beyond which a licensed account is flagged.
pub const DEFAULT_THRESHOLD_DAYS: i64 = 90;

/// SKU part numbers considered worth reclaiming when idle.
pub const DEFAULT_WATCHED_SKUS: &[&str] = &[
    "SPE_E5",
    "ENTERPRISEPREMIUM",
    "VISIOCLIENT",
    "POWER_BI_PRO",
    "PBI_PREMIUM_PER_USER",
    "PROJECTPREMIUM",
];

/// Default token endpoint base (tenant id is appended per request).
pub const DEFAULT_LOGIN_URL: &str = "https://login.microsoftonline.com";

/// Default directory API base.
pub const DEFAULT_DIRECTORY_URL: &str = "https://graph.microsoft.com";

/// Immutable audit parameters, fixed before the run starts.
#[derive(Debug, Clone)]
pub struct AuditConfig {
    /// SKU part numbers to watch, matched case-sensitively.
    pub watched_skus: Vec<String>,
    /// Strictly-greater-than comparison threshold, in whole days.
    pub threshold_days: i64,
}

impl AuditConfig {
    pub fn new(watched_skus: Vec<String>, threshold_days: i64) -> Result<Self> {
        if threshold_days <= 0 {
            return Err(Error::Config(format!(
                "inactivity threshold must be a positive number of days, got {threshold_days}"
            )));
        }
        if watched_skus.is_empty() {
            return Err(Error::Config(
                "at least one high-cost SKU must be configured".to_string(),
            ));
        }
        Ok(Self {
            watched_skus,
            threshold_days,
        })
    }
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            watched_skus: DEFAULT_WATCHED_SKUS.iter().map(|s| s.to_string()).collect(),
            threshold_days: DEFAULT_THRESHOLD_DAYS,
        }
    }
}

/// Credentials and endpoints for the directory service.
#[derive(Debug, Clone)]
pub struct DirectoryCredentials {
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: String,
    pub login_url: String,
    pub directory_url: String,
}

impl DirectoryCredentials {
    /// Read credentials from `SEATSWEEP_*` environment variables.
    ///
    /// This is the preflight check: it runs before any network activity and
    /// reports every missing variable at once rather than failing on the
    /// first one.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = [
            "SEATSWEEP_TENANT_ID",
            "SEATSWEEP_CLIENT_ID",
            "SEATSWEEP_CLIENT_SECRET",
        ];
        let mut values = Vec::new();
        let mut missing = Vec::new();
        for key in required {
            match lookup(key).filter(|v| !v.is_empty()) {
                Some(value) => values.push(value),
                None => missing.push(key.to_string()),
            }
        }
        if !missing.is_empty() {
            return Err(Error::MissingCredentials(missing));
        }

        let mut values = values.into_iter();
        Ok(Self {
            // Order matches `required` above
            tenant_id: values.next().unwrap_or_default(),
            client_id: values.next().unwrap_or_default(),
            client_secret: values.next().unwrap_or_default(),
            login_url: lookup("SEATSWEEP_LOGIN_URL")
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_LOGIN_URL.to_string()),
            directory_url: lookup("SEATSWEEP_DIRECTORY_URL")
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_DIRECTORY_URL.to_string()),
        })
    }
}
