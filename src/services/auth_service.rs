use crate::{
    config::Config,
    database::UserStore,
    models::UserRecord,
    utils::AppError,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};

// JWT Claims
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub user_id: String,
    pub iat: usize,  // issued at
    pub exp: usize,  // expiration
}

// Request/Response structures
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub user_id: String,
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    pub data: TokenPair,
    pub status: u16,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub message: String,
    pub user_id: String,
}

fn sign_token(user_id: &str, secret: &str, expiry_secs: i64) -> Result<String, AppError> {
    let now = Utc::now();
    let claims = Claims {
        user_id: user_id.to_string(),
        iat: now.timestamp() as usize,
        exp: (now + Duration::seconds(expiry_secs)).timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::TokenError(format!("Failed to generate token: {}", e)))
}

/// Issues the access and refresh tokens for `user_id`.
///
/// Both carry the same claims and lifetime; only the signing secret differs.
pub fn generate_tokens(config: &Config, user_id: &str) -> Result<TokenPair, AppError> {
    Ok(TokenPair {
        user_id: user_id.to_string(),
        access_token: sign_token(user_id, &config.jwt_access_secret, config.jwt_expiry_secs)?,
        refresh_token: sign_token(user_id, &config.jwt_refresh_secret, config.jwt_expiry_secs)?,
    })
}

// User login
pub async fn login(
    store: &dyn UserStore,
    config: &Config,
    request: &LoginRequest,
) -> Result<LoginResponse, AppError> {
    let user = store
        .find_by_credentials(&request.email, &request.password)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    Ok(LoginResponse {
        data: generate_tokens(config, &user.user_id)?,
        status: 200,
    })
}

// User registration
pub async fn register(
    store: &dyn UserStore,
    request: RegisterRequest,
) -> Result<RegisterResponse, AppError> {
    if store.find_by_email(&request.email).await?.is_some() {
        return Err(AppError::Conflict(request.email));
    }

    // insert() re-checks under the store lock
    let user = UserRecord::new(request.email, request.password, request.first_name, request.last_name);
    let user_id = user.user_id.clone();

    store.insert(user).await?;

    Ok(RegisterResponse {
        message: "User registered successfully".to_string(),
        user_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

    fn decode_with(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map(|data| data.claims)
    }

    #[test]
    fn test_tokens_use_distinct_secrets() {
        let config = Config::default();
        let pair = generate_tokens(&config, "user-1").unwrap();

        let access = decode_with(&pair.access_token, "your-access-token-key").unwrap();
        let refresh = decode_with(&pair.refresh_token, "your-refresh-token-key").unwrap();
        assert_eq!(access.user_id, "user-1");
        assert_eq!(refresh.user_id, "user-1");

        assert!(decode_with(&pair.access_token, "your-refresh-token-key").is_err());
        assert!(decode_with(&pair.refresh_token, "your-access-token-key").is_err());
    }

    #[test]
    fn test_tokens_expire_after_one_hour() {
        let pair = generate_tokens(&Config::default(), "user-1").unwrap();
        let claims = decode_with(&pair.access_token, "your-access-token-key").unwrap();

        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_claims_use_user_id_key() {
        let pair = generate_tokens(&Config::default(), "user-1").unwrap();
        let payload = decode::<serde_json::Value>(
            &pair.refresh_token,
            &DecodingKey::from_secret(b"your-refresh-token-key"),
            &Validation::new(Algorithm::HS256),
        )
        .unwrap()
        .claims;

        assert_eq!(payload["userId"], "user-1");
    }
}
