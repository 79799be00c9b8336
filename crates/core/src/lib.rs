pub mod auth;
pub mod catalog;
pub mod config;
pub mod extractor;
pub mod fetcher;
pub mod lookup;
pub mod matcher;
pub mod metrics;
pub mod pagination;
pub mod sync;
pub mod testing;

pub use auth::{
    create_authenticator, ApiKeyAuthenticator, AuthError, AuthRequest, Authenticator, Identity,
    NoneAuthenticator, OperatorPolicy, REQUESTER_HEADER,
};
pub use catalog::{
    Card, CardSet, CatalogError, CatalogManager, CatalogSnapshot, CatalogStats, CatalogStore,
    JsonCatalogStore,
};
pub use config::{
    load_config, load_config_from_str, validate_config, AuthMethod, Config, ConfigError,
    SanitizedConfig,
};
pub use extractor::{clean_card_name, CardExtractor};
pub use fetcher::{FetchError, HttpFetcher, PageFetcher};
pub use lookup::{extract_markers, has_markers, lookup, LookupReply};
pub use matcher::{normalize, similarity, CardMatcher, NormalizedName};
pub use pagination::{page_view, step, PageButton, PageToken, PageView, TokenError};
pub use sync::{SetRunSummary, SyncError, SyncOrchestrator, SyncReport, SyncStatus};
