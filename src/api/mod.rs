//! Microsoft Graph access: token acquisition, authenticated fetches and the
//! sequential endpoint dump.

pub mod auth;
pub mod client;
pub mod constants;
pub mod error;
pub mod fetcher;
pub mod models;

pub use auth::TokenSource;
pub use client::{FetchOutcome, GraphClient, report_users};
pub use constants::Endpoint;
pub use error::{AuthError, FetchError};
pub use fetcher::{DumpReport, FailedEndpoint, FetchedEndpoint, Fetcher, OnError};
pub use models::{TokenInfo, User, UserCollection};
