//! IP geolocation tool definition.
//!
//! The provider answers with nested objects (location, country, asn, ...);
//! they are flattened into a single record and absent values are dropped.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;

use crate::domains::tools::GeoTool;
use crate::domains::tools::definitions::common::require_text;
use crate::provider::{GeoResult, GeoapifyClient, QueryParams};

const ENDPOINT: &str = "/v1/ipinfo";

/// Parameters for IP geolocation.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct IpToLocationParams {
    /// IPv4 or IPv6 address.
    pub ip: String,
}

/// Flattened IP geolocation record.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IpLocation {
    pub ip: Value,
    pub ip_version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy_radius_m: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continent_code: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continent_name: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_name: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_code: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capital: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flag_url: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_cidr: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asn: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utc_offset_seconds: Option<Value>,
    pub is_proxy: Value,
    pub is_vpn: Value,
    pub is_tor: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_name: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_symbol: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datasources: Option<Vec<Value>>,
}

/// `IPv6` when the address contains a colon, `IPv4` otherwise.
fn ip_version(ip: &str) -> &'static str {
    if ip.contains(':') { "IPv6" } else { "IPv4" }
}

/// Non-null value at a JSON pointer.
fn field(response: &Value, pointer: &str) -> Option<Value> {
    response.pointer(pointer).filter(|v| !v.is_null()).cloned()
}

/// Security flag, `false` unless the provider says otherwise.
///
/// An explicit `null` reads as `false` too, so the three flags are always present.
fn flag(response: &Value, name: &str) -> Value {
    response
        .get("security")
        .and_then(|s| s.get(name))
        .filter(|v| !v.is_null())
        .cloned()
        .unwrap_or(Value::Bool(false))
}

/// Language entries as display strings.
fn languages(response: &Value) -> Option<Vec<String>> {
    let entries = response
        .pointer("/country/languages")
        .and_then(Value::as_array)
        .filter(|l| !l.is_empty())?;

    Some(
        entries
            .iter()
            .filter_map(|entry| match entry {
                Value::String(name) => Some(name.clone()),
                Value::Object(fields) => Some(
                    fields
                        .get("name")
                        .or_else(|| fields.get("iso_code"))
                        .map(|v| match v {
                            Value::String(s) => s.clone(),
                            other => other.to_string(),
                        })
                        .unwrap_or_else(|| entry.to_string()),
                ),
                _ => None,
            })
            .collect(),
    )
}

/// Datasource list; a single entry is wrapped.
fn datasources(response: &Value) -> Option<Vec<Value>> {
    match response.get("datasource")? {
        Value::Null => None,
        Value::Array(items) if items.is_empty() => None,
        Value::Object(fields) if fields.is_empty() => None,
        Value::Array(items) => Some(items.clone()),
        Value::String(s) if s.is_empty() => None,
        single => Some(vec![single.clone()]),
    }
}

impl IpLocation {
    /// Flatten a provider response for `input_ip`.
    pub fn from_response(input_ip: &str, response: &Value) -> Self {
        let has_currency = response
            .get("currency")
            .and_then(Value::as_object)
            .is_some_and(|c| !c.is_empty());
        let currency = |key: &str| {
            has_currency
                .then(|| field(response, &format!("/currency/{key}")))
                .flatten()
        };

        Self {
            ip: field(response, "/ip").unwrap_or_else(|| Value::String(input_ip.to_string())),
            ip_version: ip_version(input_ip),
            latitude: field(response, "/location/latitude"),
            longitude: field(response, "/location/longitude"),
            accuracy_radius_m: field(response, "/location/accuracy_radius"),
            continent_code: field(response, "/continent/code"),
            continent_name: field(response, "/continent/name"),
            country_code: field(response, "/country/iso_code"),
            country_name: field(response, "/country/name"),
            phone_code: field(response, "/country/phone_code"),
            capital: field(response, "/country/capital"),
            currency_code: field(response, "/country/currency"),
            flag_url: field(response, "/country/flag"),
            region: field(response, "/region/name"),
            state: field(response, "/state/name"),
            city: field(response, "/city/name"),
            languages: languages(response),
            network_cidr: field(response, "/network/cidr"),
            asn: field(response, "/asn/number"),
            organization: field(response, "/asn/organization"),
            time_zone: field(response, "/timezone/name"),
            utc_offset_seconds: field(response, "/timezone/offset_seconds"),
            is_proxy: flag(response, "is_proxy"),
            is_vpn: flag(response, "is_vpn"),
            is_tor: flag(response, "is_tor"),
            currency_name: currency("name"),
            currency_symbol: currency("symbol"),
            datasources: datasources(response),
        }
    }
}

/// IP geolocation tool.
pub struct IpToLocationTool;

#[async_trait]
impl GeoTool for IpToLocationTool {
    const NAME: &'static str = "ip_to_location";

    const DESCRIPTION: &'static str = "Resolve an IP address (IPv4/IPv6) to its approximate location, \
        country metadata, network and time zone.";

    type Params = IpToLocationParams;
    type Output = IpLocation;

    #[instrument(skip_all, fields(ip = %params.ip))]
    async fn run(client: &GeoapifyClient, params: Self::Params) -> GeoResult<IpLocation> {
        require_text("ip", &params.ip)?;

        let query = QueryParams::new().with("ip", &params.ip);
        let response = client.get(ENDPOINT, &query).await?.into_value();

        Ok(IpLocation::from_response(&params.ip, &response))
    }
}
