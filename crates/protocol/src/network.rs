//! Parameter and return shapes for the `Network` domain.
//!
//! Field names follow the DevTools protocol (camelCase on the wire). Optional
//! fields are omitted when absent, so a default value serializes to `{}`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Network request identifier assigned by the backend.
pub type RequestId = String;

/// Request and response headers as a JSON object.
pub type Headers = Map<String, Value>;

/// SameSite cookie attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CookieSameSite {
	Strict,
	Lax,
	None,
}

/// Cookie priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CookiePriority {
	Low,
	Medium,
	High,
}

/// Connection type used by `emulateNetworkConditions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionType {
	None,
	Cellular2g,
	Cellular3g,
	Cellular4g,
	Bluetooth,
	Ethernet,
	Wifi,
	Wimax,
	Other,
}

/// A cookie as reported by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cookie {
	pub name: String,
	pub value: String,
	pub domain: String,
	pub path: String,

	/// Expiration as Unix time in seconds.
	pub expires: f64,

	/// Size in bytes of name plus value.
	pub size: i64,

	pub http_only: bool,
	pub secure: bool,

	/// True for session cookies.
	pub session: bool,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub same_site: Option<CookieSameSite>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub priority: Option<CookiePriority>,
}

/// A cookie to be set by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CookieParam {
	pub name: String,
	pub value: String,

	/// URL to infer domain and path from when they are not given.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub url: Option<String>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub domain: Option<String>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub path: Option<String>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub secure: Option<bool>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub http_only: Option<bool>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub same_site: Option<CookieSameSite>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub expires: Option<f64>,
}

/// One hit of `searchInResponseBody`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchMatch {
	pub line_number: f64,
	pub line_content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCookiesParams {
	pub name: String,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub url: Option<String>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub domain: Option<String>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmulateNetworkConditionsParams {
	pub offline: bool,

	/// Minimum latency in milliseconds.
	pub latency: f64,

	/// Maximal download throughput in bytes/sec, `-1` disables throttling.
	pub download_throughput: f64,

	/// Maximal upload throughput in bytes/sec, `-1` disables throttling.
	pub upload_throughput: f64,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub connection_type: Option<ConnectionType>,
}

/// Buffer limits accepted by `enable`.
///
/// `enable` also echoes this shape back as its result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnableParams {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub max_total_buffer_size: Option<i64>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub max_resource_buffer_size: Option<i64>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub max_post_data_size: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetAllCookiesReturns {
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub cookies: Vec<Cookie>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetCertificateParams {
	pub origin: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetCertificateReturns {
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub table_names: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetCookiesParams {
	/// URLs to fetch cookies for, the current page when empty.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub urls: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetCookiesReturns {
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub cookies: Vec<Cookie>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetResponseBodyParams {
	pub request_id: RequestId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetResponseBodyReturns {
	#[serde(default, skip_serializing_if = "String::is_empty")]
	pub body: String,

	#[serde(default, skip_serializing_if = "std::ops::Not::not")]
	pub base64_encoded: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetRequestPostDataParams {
	pub request_id: RequestId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetRequestPostDataReturns {
	#[serde(default, skip_serializing_if = "String::is_empty")]
	pub post_data: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayXhrParams {
	pub request_id: RequestId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchInResponseBodyParams {
	pub request_id: RequestId,
	pub query: String,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub case_sensitive: Option<bool>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub is_regex: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchInResponseBodyReturns {
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub result: Vec<SearchMatch>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetBlockedUrlsParams {
	/// URL patterns to block, wildcards (`*`) allowed.
	pub urls: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetBypassServiceWorkerParams {
	pub bypass: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetCacheDisabledParams {
	pub cache_disabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetCookieParams {
	pub name: String,
	pub value: String,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub url: Option<String>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub domain: Option<String>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub path: Option<String>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub secure: Option<bool>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub http_only: Option<bool>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub same_site: Option<CookieSameSite>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub expires: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetCookieReturns {
	#[serde(default, skip_serializing_if = "std::ops::Not::not")]
	pub success: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetCookiesParams {
	pub cookies: Vec<CookieParam>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetDataSizeLimitsForTestParams {
	pub max_total_size: i64,
	pub max_resource_size: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetExtraHttpHeadersParams {
	pub headers: Headers,
}
