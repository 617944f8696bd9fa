//! Application constants
//!
//! Centralized location for domain-level constants shared by the server and
//! the client.

// Record API
pub const DEFAULT_API_PORT: u16 = 3001;
pub const DEFAULT_API_URL: &str = "http://localhost:3001";
pub const LIVENESS_MESSAGE: &str = "Doctor Finder API is running";

// Database
pub const DEFAULT_DB_PATH: &str = "doctorfinder.db";
pub const DEFAULT_DB_POOL_SIZE: u32 = 8;

// Document store
pub const USERS_COLLECTION: &str = "users";

// Local persisted state
pub const DEFAULT_STORAGE_PATH: &str = ".doctorfinder/storage.json";
pub const PROFILE_CACHE_KEY: &str = "userCache";
pub const AUTH_SESSION_KEY: &str = "authSession";

// Identity service endpoints
pub const DEFAULT_IDENTITY_ENDPOINT: &str = "https://identitytoolkit.googleapis.com";
pub const DEFAULT_TOKEN_ENDPOINT: &str = "https://securetoken.googleapis.com";
pub const DEFAULT_DOCUMENT_ENDPOINT: &str = "https://firestore.googleapis.com";

// Refresh ID tokens this many seconds before they expire
pub const TOKEN_REFRESH_MARGIN_SECS: i64 = 60;
