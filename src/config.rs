use std::env;
use std::path::PathBuf;

const DEFAULT_CORS_ORIGIN: &str = "https://user-profile-henna.vercel.app";
const DEFAULT_ACCESS_SECRET: &str = "your-access-token-key";
const DEFAULT_REFRESH_SECRET: &str = "your-refresh-token-key";

/// Runtime settings, read once at startup from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub users_file: PathBuf,
    pub upload_dir: PathBuf,
    /// Prefix written into `avatar` for uploaded images.
    pub avatar_prefix: String,
    pub cors_origin: String,
    pub jwt_access_secret: String,
    pub jwt_refresh_secret: String,
    pub jwt_expiry_secs: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            users_file: PathBuf::from("./src/users.json"),
            upload_dir: PathBuf::from("./uploads"),
            avatar_prefix: "./src/api/uploads".to_string(),
            cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
            jwt_access_secret: DEFAULT_ACCESS_SECRET.to_string(),
            jwt_refresh_secret: DEFAULT_REFRESH_SECRET.to_string(),
            jwt_expiry_secs: 3600,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();

        let port = match env::var("PORT") {
            Ok(v) => v.parse::<u16>().map_err(|e| format!("Invalid PORT '{}': {}", v, e))?,
            Err(_) => defaults.port,
        };

        let jwt_expiry_secs = match env::var("JWT_EXPIRY_SECS") {
            Ok(v) => v
                .parse::<i64>()
                .map_err(|e| format!("Invalid JWT_EXPIRY_SECS '{}': {}", v, e))?,
            Err(_) => defaults.jwt_expiry_secs,
        };

        Ok(Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port,
            users_file: env::var("USERS_FILE").map(PathBuf::from).unwrap_or(defaults.users_file),
            upload_dir: env::var("UPLOAD_DIR").map(PathBuf::from).unwrap_or(defaults.upload_dir),
            avatar_prefix: env::var("AVATAR_PREFIX").unwrap_or(defaults.avatar_prefix),
            cors_origin: env::var("CORS_ORIGIN").unwrap_or(defaults.cors_origin),
            jwt_access_secret: env::var("JWT_ACCESS_SECRET").unwrap_or(defaults.jwt_access_secret),
            jwt_refresh_secret: env::var("JWT_REFRESH_SECRET").unwrap_or(defaults.jwt_refresh_secret),
            jwt_expiry_secs,
        })
    }
}
