use serde_json::Value;

use crate::errors::AppError;

/// Earth's mean radius in miles, for reference alongside the store's
/// spherical containment operator (which takes the distance in miles
/// directly).
pub const EARTH_RADIUS_MILES: f64 = 3963.0;

#[derive(Debug, Clone)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
    pub formatted_address: String,
    pub city: Option<String>,
    pub zipcode: Option<String>,
    pub country: Option<String>,
}

/// Thin client over a Nominatim-style forward geocoding endpoint.
#[derive(Debug, Clone)]
pub struct Geocoder {
    client: reqwest::Client,
    base_url: String,
}

impl Geocoder {
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    pub async fn geocode(&self, query: &str) -> Result<GeoPoint, AppError> {
        let res = self
            .client
            .get(&self.base_url)
            .query(&[
                ("q", query),
                ("format", "jsonv2"),
                ("addressdetails", "1"),
                ("limit", "1"),
            ])
            .header("user-agent", "campdir-be")
            .send()
            .await
            .map_err(|e| AppError::Geocode(format!("request failed: {e}")))?;

        if !res.status().is_success() {
            return Err(AppError::Geocode(format!(
                "geocoder returned status {}",
                res.status()
            )));
        }

        let json: Value = res
            .json()
            .await
            .map_err(|e| AppError::Deserialization(format!("Invalid geocoder response: {e}")))?;

        let hit = json
            .as_array()
            .and_then(|results| results.first())
            .ok_or_else(|| AppError::Geocode(format!("no results for '{query}'")))?;

        let lat = coord(hit, "lat")?;
        let lng = coord(hit, "lon")?;

        let formatted_address = hit
            .get("display_name")
            .and_then(|v| v.as_str())
            .unwrap_or(query)
            .to_string();

        let address = hit.get("address");
        let part = |key: &str| {
            address
                .and_then(|a| a.get(key))
                .and_then(|v| v.as_str())
                .map(str::to_string)
        };

        Ok(GeoPoint {
            lat,
            lng,
            formatted_address,
            city: part("city").or_else(|| part("town")),
            zipcode: part("postcode"),
            country: part("country_code").map(|c| c.to_uppercase()),
        })
    }
}

// Nominatim returns coordinates as strings.
fn coord(hit: &Value, key: &str) -> Result<f64, AppError> {
    hit.get(key)
        .and_then(|v| match v {
            Value::String(s) => s.parse::<f64>().ok(),
            Value::Number(n) => n.as_f64(),
            _ => None,
        })
        .ok_or_else(|| AppError::Geocode(format!("missing '{key}' in geocoder response")))
}
