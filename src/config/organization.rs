//! `[organization]` and `[geo]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[organization]` section - publisher identity for JSON-LD.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct OrganizationConfig {
    /// Legal / display name of the publisher.
    #[serde(default = "defaults::organization::name")]
    #[educe(Default = defaults::organization::name())]
    pub name: String,

    /// Logo path or URL.
    #[serde(default = "defaults::organization::logo")]
    #[educe(Default = defaults::organization::logo())]
    pub logo: String,

    /// Contact email.
    #[serde(default)]
    pub email: Option<String>,

    /// Contact telephone.
    #[serde(default)]
    pub phone: Option<String>,

    /// Postal address.
    #[serde(default)]
    pub address: Option<AddressConfig>,

    /// Social profile URLs (`sameAs`).
    #[serde(default)]
    pub same_as: Vec<String>,
}

/// `[organization.address]` section
#[derive(Debug, Clone, PartialEq, Eq, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct AddressConfig {
    #[serde(default)]
    pub street: Option<String>,

    #[serde(default)]
    pub locality: Option<String>,

    #[serde(default)]
    pub region: Option<String>,

    /// ISO 3166-1 alpha-2 country code.
    #[serde(default = "defaults::organization::country")]
    #[educe(Default = defaults::organization::country())]
    pub country: String,
}

/// `[geo]` section - values for `geo.*` and `ICBM` meta tags.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct GeoConfig {
    /// ISO 3166 region code.
    #[serde(default = "defaults::geo::region")]
    #[educe(Default = defaults::geo::region())]
    pub region: String,

    #[serde(default = "defaults::geo::placename")]
    #[educe(Default = defaults::geo::placename())]
    pub placename: String,

    /// "lat;lon" as used by `geo.position`.
    #[serde(default = "defaults::geo::position")]
    #[educe(Default = defaults::geo::position())]
    pub position: String,
}

impl GeoConfig {
    /// `ICBM` uses "lat, lon" instead of "lat;lon".
    pub fn icbm(&self) -> String {
        self.position.replace(';', ", ")
    }
}
