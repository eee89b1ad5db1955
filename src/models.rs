//! Data model for the launch provider API.
//!
//! These types mirror the provider's JSON schema. Wire names that differ
//! from the field names used here (`net`, `abbrev`, `vid_urls`, ...) are
//! mapped explicitly with serde renames; a payload that does not match the
//! schema surfaces as [`LaunchError::Decode`](crate::LaunchError::Decode)
//! at the client boundary.

use serde::Deserialize;

/// Envelope returned by the search endpoint: `{ "results": [...] }`.
#[derive(Debug, Clone, Deserialize)]
pub struct LaunchPage {
    pub results: Vec<LaunchSummary>,
}

/// One launch as it appears in search results.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LaunchSummary {
    /// Opaque provider identifier.
    pub id: String,
    pub name: String,
    /// Scheduled liftoff time (ISO-8601), "NET" in provider terms.
    #[serde(rename = "net")]
    pub scheduled_time: String,
    pub status: LaunchStatus,
    pub image: Option<ImageLinks>,
}

impl LaunchSummary {
    /// Thumbnail URL, when the provider supplies launch imagery.
    pub fn thumbnail_url(&self) -> Option<&str> {
        self.image.as_ref().map(|img| img.thumbnail_url.as_str())
    }
}

/// Launch status descriptor.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LaunchStatus {
    /// Numeric status code.
    #[serde(rename = "id")]
    pub code: i64,
    /// Human-readable status ("Launch Successful", ...).
    #[serde(rename = "name")]
    pub label: String,
    /// Abbreviated status ("Success", "TBD", ...).
    #[serde(rename = "abbrev")]
    pub short_label: String,
}

/// Image URL pair attached to launches, agencies and spacecraft.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImageLinks {
    pub image_url: String,
    pub thumbnail_url: String,
}

/// A value that only carries a display name.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NamedLabel {
    pub name: String,
}

/// Full detail payload for a single launch.
#[derive(Debug, Clone, Deserialize)]
pub struct LaunchDetail {
    pub id: String,
    pub name: String,
    #[serde(rename = "net")]
    pub scheduled_time: String,
    pub status: LaunchStatus,
    pub image: Option<ImageLinks>,
    #[serde(rename = "launch_service_provider")]
    pub provider: Agency,
    pub rocket: Rocket,
    pub mission: Option<Mission>,
    #[serde(rename = "vid_urls")]
    pub video_urls: Vec<VideoUrl>,
}

/// Launch service provider or manufacturer.
#[derive(Debug, Clone, Deserialize)]
pub struct Agency {
    pub id: i64,
    pub featured: Option<bool>,
    pub name: String,
    pub abbrev: String,
    #[serde(rename = "type")]
    pub kind: NamedLabel,
    #[serde(rename = "country")]
    pub countries: Option<Vec<Country>>,
    pub description: Option<String>,
    pub administrator: Option<String>,
    pub founding_year: Option<i64>,
    pub image: Option<ImageLinks>,
    pub logo: Option<ImageLinks>,
    pub social_logo: Option<ImageLinks>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Country {
    pub name: String,
    /// Adjective form, e.g. "American".
    #[serde(rename = "nationality_name")]
    pub nationality: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Rocket {
    pub configuration: RocketConfiguration,
    #[serde(rename = "spacecraft_stage")]
    pub spacecraft_stages: Option<Vec<SpacecraftStage>>,
}

/// Rocket family data, including optional performance figures.
#[derive(Debug, Clone, Deserialize)]
pub struct RocketConfiguration {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub active: bool,
    pub reusable: bool,
    pub manufacturer: Agency,
    pub image: Option<ImageLinks>,
    /// Meters.
    pub length: Option<f64>,
    /// Meters.
    pub diameter: Option<f64>,
    /// Kilograms to low Earth orbit.
    pub leo_capacity: Option<f64>,
    /// Kilograms to geostationary transfer orbit.
    pub gto_capacity: Option<f64>,
    /// Tonnes.
    pub launch_mass: Option<f64>,
    /// Kilonewtons at liftoff.
    pub to_thrust: Option<f64>,
    pub max_stage: Option<i64>,
    pub maiden_flight: Option<String>,
    pub successful_launches: Option<i64>,
    pub consecutive_successful_launches: Option<i64>,
    pub failed_launches: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpacecraftStage {
    pub id: i64,
    pub destination: String,
    pub spacecraft: Spacecraft,
    #[serde(rename = "launch_crew")]
    pub crew: Option<Vec<CrewMember>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Spacecraft {
    pub name: String,
    pub serial_number: String,
    pub description: String,
    pub image: ImageLinks,
    pub in_space: bool,
    pub status: NamedLabel,
    pub spacecraft_config: SpacecraftConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpacecraftConfig {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NamedLabel,
    pub agency: Agency,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CrewMember {
    pub role: CrewRole,
    pub astronaut: Astronaut,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CrewRole {
    pub role: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Astronaut {
    pub id: i64,
    pub age: i64,
    pub name: String,
    pub bio: String,
    pub status: NamedLabel,
    pub agency: Agency,
    pub image: ImageLinks,
    #[serde(rename = "type")]
    pub kind: NamedLabel,
    pub in_space: bool,
    pub date_of_birth: String,
    pub date_of_death: Option<String>,
    pub first_flight: String,
    pub last_flight: String,
    pub nationality: Vec<Country>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VideoUrl {
    pub title: String,
    pub description: String,
    #[serde(rename = "feature_image")]
    pub image_url: String,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Mission {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub orbit: Orbit,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Orbit {
    pub name: String,
    pub celestial_body: NamedLabel,
}
