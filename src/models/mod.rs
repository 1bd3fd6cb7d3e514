//! Domain models for the estate inventory service
//!
//! Each entity follows the same pattern: the stored entity struct plus
//! Create/Update request types. Update requests are partial: every field
//! is optional and absent fields are skipped during serialization, so the
//! repository merges only what the caller supplied.
//!
//! Entities are identified by an opaque string id assigned by the
//! repository at save time; `created_at`/`updated_at` are server-stamped.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sales status of an apartment. Free-form: any status may be set to any
/// other at any time; no transition rules are enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApartmentStatus {
    Available,
    Reserved,
    Sold,
}

impl FromStr for ApartmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "AVAILABLE" => Ok(Self::Available),
            "RESERVED" => Ok(Self::Reserved),
            "SOLD" => Ok(Self::Sold),
            other => Err(format!("invalid apartment status: {other}")),
        }
    }
}

impl fmt::Display for ApartmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Available => "AVAILABLE",
            Self::Reserved => "RESERVED",
            Self::Sold => "SOLD",
        };
        write!(f, "{s}")
    }
}

/// Pipeline status of a prospective buyer. Free-form, like
/// [`ApartmentStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BuyerStatus {
    Interested,
    Viewing,
    Negotiating,
    Purchased,
    NotInterested,
}

impl FromStr for BuyerStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "INTERESTED" => Ok(Self::Interested),
            "VIEWING" => Ok(Self::Viewing),
            "NEGOTIATING" => Ok(Self::Negotiating),
            "PURCHASED" => Ok(Self::Purchased),
            "NOT_INTERESTED" => Ok(Self::NotInterested),
            other => Err(format!("invalid buyer status: {other}")),
        }
    }
}

/// Authorization role carried in the JWT and checked by the web layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Admin,
    User,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::User => "USER",
        }
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ADMIN" => Ok(Self::Admin),
            "USER" => Ok(Self::User),
            other => Err(format!("invalid role: {other}")),
        }
    }
}

/// A clickable region overlaying a floor-plan image, linking a position to
/// an apartment. Coordinates are percentages in 0-100.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hotspot {
    pub apartment_id: String,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Apartment {
    pub id: String,
    pub floor_id: String,
    pub lot_number: String,
    pub unit_type: String,
    pub area: f64,
    /// Exact decimal; non-negative (checked at create/update time)
    pub price: BigDecimal,
    pub status: ApartmentStatus,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub media_urls: Vec<String>,
    #[serde(default)]
    pub model3d_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApartmentCreateRequest {
    pub floor_id: String,
    pub lot_number: String,
    pub unit_type: String,
    pub area: f64,
    pub price: BigDecimal,
    pub status: ApartmentStatus,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub media_urls: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model3d_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApartmentUpdateRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lot_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<BigDecimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ApartmentStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_urls: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model3d_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Floor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub level: Option<i32>,
    #[serde(default)]
    pub floor_number: Option<i32>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub total_apartments: Option<i32>,
    #[serde(default)]
    pub area: f64,
    #[serde(default)]
    pub building_id: Option<String>,
    #[serde(default)]
    pub floor_plan_url: Option<String>,
    #[serde(default)]
    pub model3d_url: Option<String>,
    #[serde(default)]
    pub image_urls: Vec<String>,
    /// Denormalized apartment ids; referential integrity is not enforced
    #[serde(default)]
    pub apartment_ids: Vec<String>,
    #[serde(default)]
    pub top_view_hotspots: Vec<Hotspot>,
    /// View-angle label -> ordered hotspot list
    #[serde(default)]
    pub angle_hotspots: HashMap<String, Vec<Hotspot>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloorCreateRequest {
    pub name: String,
    #[serde(default)]
    pub level: Option<i32>,
    #[serde(default)]
    pub floor_number: Option<i32>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub total_apartments: Option<i32>,
    #[serde(default)]
    pub area: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor_plan_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model3d_url: Option<String>,
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(default)]
    pub apartment_ids: Vec<String>,
    #[serde(default)]
    pub top_view_hotspots: Vec<Hotspot>,
    #[serde(default)]
    pub angle_hotspots: HashMap<String, Vec<Hotspot>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FloorUpdateRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor_number: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_apartments: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor_plan_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model3d_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_urls: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apartment_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_view_hotspots: Option<Vec<Hotspot>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle_hotspots: Option<HashMap<String, Vec<Hotspot>>>,
}

/// Payload for replacing a floor's hotspot collections. A `None` part
/// leaves the corresponding collection untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HotspotUpdateRequest {
    #[serde(default)]
    pub top_view_hotspots: Option<Vec<Hotspot>>,
    #[serde(default)]
    pub angle_hotspots: Option<HashMap<String, Vec<Hotspot>>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Buyer {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub status: BuyerStatus,
    #[serde(default)]
    pub interested_apartment_ids: Vec<String>,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub contact_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuyerCreateRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub status: BuyerStatus,
    #[serde(default)]
    pub interested_apartment_ids: Vec<String>,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuyerUpdateRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<BuyerStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interested_apartment_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_date: Option<DateTime<Utc>>,
}

/// Stored account. `password` holds the Argon2id hash, never plaintext;
/// API responses go through `UserResponse` which omits it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCreateRequest {
    pub email: String,
    /// Plaintext on the way in; hashed by the service before persisting
    pub password: String,
    #[serde(default)]
    pub role: Option<UserRole>,
    #[serde(default)]
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdateRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

/// Ordered picture attached to an apartment. `order` is the zero-based
/// display position within the apartment's picture set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Picture {
    pub id: String,
    pub apartment_id: String,
    pub url: String,
    #[serde(default)]
    pub kind: Option<String>,
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PictureCreateRequest {
    pub apartment_id: String,
    pub url: String,
    #[serde(default)]
    pub kind: Option<String>,
    pub order: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PictureUpdateRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apartment_status_round_trips_through_serde() {
        let json = serde_json::to_string(&ApartmentStatus::Available).unwrap();
        assert_eq!(json, "\"AVAILABLE\"");
        let back: ApartmentStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ApartmentStatus::Available);
    }

    #[test]
    fn buyer_status_parses_case_insensitively() {
        assert_eq!(
            "not_interested".parse::<BuyerStatus>().unwrap(),
            BuyerStatus::NotInterested
        );
        assert!("SELLING".parse::<BuyerStatus>().is_err());
    }

    #[test]
    fn update_request_serializes_only_present_fields() {
        let patch = ApartmentUpdateRequest {
            status: Some(ApartmentStatus::Sold),
            ..Default::default()
        };
        let value = serde_json::to_value(&patch).unwrap();
        let map = value.as_object().unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map["status"], "SOLD");
    }

    #[test]
    fn floor_deserializes_with_missing_collections() {
        let floor: Floor = serde_json::from_value(serde_json::json!({
            "id": "f1",
            "name": "First Floor",
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        }))
        .unwrap();
        assert!(floor.apartment_ids.is_empty());
        assert!(floor.angle_hotspots.is_empty());
        assert_eq!(floor.area, 0.0);
    }
}
