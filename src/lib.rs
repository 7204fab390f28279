pub mod error;
pub mod models {
    pub mod filter;
    pub mod record;
}
pub mod storage {
    pub mod client;
}
pub mod rendering {
    pub mod markdown;
    pub mod text;
}
pub mod content {
    pub mod cache;
    pub mod front_matter;
    pub mod index;
    pub mod query;
    pub mod reader;
    pub mod related;
    pub mod service;
}

#[cfg(feature = "server")]
pub mod app;
#[cfg(feature = "server")]
pub mod config;
#[cfg(feature = "server")]
pub mod telemetry;
#[cfg(feature = "server")]
pub mod api {
    pub mod cache;
    pub mod errors;
    pub mod facets;
    pub mod posts;
}
