pub mod api;
pub mod api_docs;
pub mod domain;
pub mod infrastructure;
pub mod models;

// Short paths for the binary and the integration tests
pub use infrastructure::config;
pub use infrastructure::db;
pub use infrastructure::seed;
pub use infrastructure::server;
