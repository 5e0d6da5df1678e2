use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(
        "Missing directory credentials: {}.\n\
         Set them in the environment before running:\n\
         \x20 export SEATSWEEP_TENANT_ID=<tenant guid>\n\
         \x20 export SEATSWEEP_CLIENT_ID=<app registration id>\n\
         \x20 export SEATSWEEP_CLIENT_SECRET=<client secret>",
        .0.join(", ")
    )]
    MissingCredentials(Vec<String>),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Directory fetch denied: {0}. Grant the app the read-only directory scopes and retry.")]
    FetchPermission(String),

    #[error("Directory fetch failed: {0}. This is likely transient; retry later.")]
    FetchTransient(String),

    #[error("Failed to write report {path}: {source}")]
    ReportWrite {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
