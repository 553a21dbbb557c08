//! Watch provider display models

use serde::Serialize;
use tabled::Tabled;

use super::common::DASH;
use crate::client::models::{CountryProviders, Provider, ProviderResults};

/// Provider display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ProviderDisplay {
    /// TMDB provider ID
    #[tabled(rename = "PROVIDER ID")]
    pub id: u64,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "PRIORITY")]
    pub priority: String,
}

impl From<&Provider> for ProviderDisplay {
    fn from(provider: &Provider) -> Self {
        Self {
            id: provider.provider_id,
            name: provider.provider_name.clone(),
            priority: provider
                .display_priority
                .map(|p| p.to_string())
                .unwrap_or_else(|| DASH.to_string()),
        }
    }
}

impl From<Provider> for ProviderDisplay {
    fn from(provider: Provider) -> Self {
        ProviderDisplay::from(&provider)
    }
}

/// One way to watch a movie: region, offer type and provider.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct AvailabilityDisplay {
    #[tabled(rename = "REGION")]
    pub region: String,

    /// stream, free, ads, rent or buy
    #[tabled(rename = "TYPE")]
    pub kind: String,

    #[tabled(rename = "PROVIDER")]
    pub provider: String,
}

impl AvailabilityDisplay {
    /// Flatten one country's offers, streaming first.
    pub fn for_country(region: &str, country: &CountryProviders) -> Vec<Self> {
        let groups: [(&str, &[Provider]); 5] = [
            ("stream", &country.flatrate),
            ("free", &country.free),
            ("ads", &country.ads),
            ("rent", &country.rent),
            ("buy", &country.buy),
        ];

        groups
            .into_iter()
            .flat_map(|(kind, providers)| {
                providers.iter().map(move |p| Self {
                    region: region.to_string(),
                    kind: kind.to_string(),
                    provider: p.provider_name.clone(),
                })
            })
            .collect()
    }

    /// Rows for every country, in country-code order.
    pub fn for_all(results: &ProviderResults) -> Vec<Self> {
        results
            .iter()
            .flat_map(|(region, country)| Self::for_country(region, country))
            .collect()
    }
}
