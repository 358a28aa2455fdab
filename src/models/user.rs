use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const PROFILE_KEYS: [&str; 7] = ["firstName", "lastName", "street", "country", "city", "avatar", "bio"];

/// A single entry of the users file.
///
/// Loading never rejects a record: a known key holding something other than
/// a string, and any key the service does not know about, is kept in `extra`
/// and written back unchanged.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct UserRecord {
    pub user_id: String,  // PRIMARY IDENTIFIER, empty when the stored value is missing
    pub email: String,
    pub password: String,  // plaintext
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub street: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub extra: Map<String, Value>,
}

/// Removes `key` from `map` only when it holds a string.
fn take_string(map: &mut Map<String, Value>, key: &str) -> Option<String> {
    if !matches!(map.get(key), Some(Value::String(_))) {
        return None;
    }
    match map.remove(key) {
        Some(Value::String(value)) => Some(value),
        _ => None,
    }
}

impl From<Map<String, Value>> for UserRecord {
    fn from(mut map: Map<String, Value>) -> Self {
        Self {
            user_id: take_string(&mut map, "userId").unwrap_or_default(),
            email: take_string(&mut map, "email").unwrap_or_default(),
            password: take_string(&mut map, "password").unwrap_or_default(),
            first_name: take_string(&mut map, "firstName"),
            last_name: take_string(&mut map, "lastName"),
            street: take_string(&mut map, "street"),
            country: take_string(&mut map, "country"),
            city: take_string(&mut map, "city"),
            avatar: take_string(&mut map, "avatar"),
            bio: take_string(&mut map, "bio"),
            extra: map,
        }
    }
}

impl From<UserRecord> for Map<String, Value> {
    fn from(mut user: UserRecord) -> Self {
        let mut map = Map::new();

        // an untyped stored value wins over the empty default
        for (key, value) in [("userId", user.user_id), ("email", user.email), ("password", user.password)] {
            let value = match user.extra.remove(key) {
                Some(stored) => stored,
                None if key == "userId" && value.is_empty() => continue,
                None => Value::String(value),
            };
            map.insert(key.to_string(), value);
        }

        let profile = [
            user.first_name,
            user.last_name,
            user.street,
            user.country,
            user.city,
            user.avatar,
            user.bio,
        ];
        for (key, value) in PROFILE_KEYS.into_iter().zip(profile) {
            let stored = user.extra.remove(key);
            if let Some(value) = value.map(Value::String).or(stored) {
                map.insert(key.to_string(), value);
            }
        }

        map.extend(user.extra);
        map
    }
}

/// Display fields returned by the profile endpoints.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

impl UserRecord {
    pub fn new(email: String, password: String, first_name: Option<String>, last_name: Option<String>) -> Self {
        Self {
            user_id: uuid::Uuid::new_v4().to_string(),
            email,
            password,
            first_name,
            last_name,
            ..Default::default()
        }
    }

    pub fn profile(&self) -> Profile {
        Profile {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            street: self.street.clone(),
            country: self.country.clone(),
            city: self.city.clone(),
            avatar: self.avatar.clone(),
            bio: self.bio.clone(),
        }
    }

    /// Overwrites the profile fields with `profile`.
    pub fn apply_profile(&mut self, profile: Profile) {
        self.first_name = profile.first_name;
        self.last_name = profile.last_name;
        self.street = profile.street;
        self.country = profile.country;
        self.city = profile.city;
        self.avatar = profile.avatar;
        self.bio = profile.bio;
    }
}
