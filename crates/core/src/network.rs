//! The `Network` capability.
//!
//! [`Network`] is the contract a driver implements to answer `Network.*`
//! requests; [`register`] declares its operations on a dispatcher domain.
//! [`FakeNetwork`] accepts every call and returns empty results.

use debugger_protocol::network::{
	DeleteCookiesParams, EmulateNetworkConditionsParams, EnableParams, GetAllCookiesReturns,
	GetCertificateParams, GetCertificateReturns, GetCookiesParams, GetCookiesReturns,
	GetRequestPostDataParams, GetRequestPostDataReturns, GetResponseBodyParams, GetResponseBodyReturns,
	ReplayXhrParams, SearchInResponseBodyParams, SearchInResponseBodyReturns, SetBlockedUrlsParams,
	SetBypassServiceWorkerParams, SetCacheDisabledParams, SetCookieParams, SetCookieReturns,
	SetCookiesParams, SetDataSizeLimitsForTestParams, SetExtraHttpHeadersParams,
};

use crate::dispatch::DomainOps;
use crate::error::Result;

/// Operations of the `Network` domain.
pub trait Network: Send + Sync + 'static {
	fn clear_browser_cache(&self) -> Result<()>;
	fn clear_browser_cookies(&self) -> Result<()>;
	fn delete_cookies(&self, params: &DeleteCookiesParams) -> Result<()>;
	fn disable(&self) -> Result<()>;
	fn emulate_network_conditions(&self, params: &EmulateNetworkConditionsParams) -> Result<()>;

	/// Enables network tracking. The result echoes the accepted buffer limits.
	fn enable(&self) -> Result<EnableParams>;

	fn get_all_cookies(&self) -> Result<GetAllCookiesReturns>;
	fn get_certificate(&self, params: &GetCertificateParams) -> Result<GetCertificateReturns>;
	fn get_cookies(&self, params: &GetCookiesParams) -> Result<GetCookiesReturns>;
	fn get_response_body(&self, params: &GetResponseBodyParams) -> Result<GetResponseBodyReturns>;
	fn get_request_post_data(&self, params: &GetRequestPostDataParams) -> Result<GetRequestPostDataReturns>;
	fn replay_xhr(&self, params: &ReplayXhrParams) -> Result<()>;
	fn search_in_response_body(&self, params: &SearchInResponseBodyParams) -> Result<SearchInResponseBodyReturns>;
	fn set_blocked_urls(&self, params: &SetBlockedUrlsParams) -> Result<()>;
	fn set_bypass_service_worker(&self, params: &SetBypassServiceWorkerParams) -> Result<()>;
	fn set_cache_disabled(&self, params: &SetCacheDisabledParams) -> Result<()>;
	fn set_cookie(&self, params: &SetCookieParams) -> Result<SetCookieReturns>;
	fn set_cookies(&self, params: &SetCookiesParams) -> Result<()>;
	fn set_data_size_limits_for_test(&self, params: &SetDataSizeLimitsForTestParams) -> Result<()>;
	fn set_extra_http_headers(&self, params: &SetExtraHttpHeadersParams) -> Result<()>;
}

/// Declares every [`Network`] operation under its protocol name.
pub fn register<D: 'static, N: Network>(ops: &mut DomainOps<'_, D, N>) {
	ops.op("clearBrowserCache", N::clear_browser_cache)
		.op("clearBrowserCookies", N::clear_browser_cookies)
		.op_with("deleteCookies", N::delete_cookies)
		.op("disable", N::disable)
		.op_with("emulateNetworkConditions", N::emulate_network_conditions)
		.op("enable", N::enable)
		.op("getAllCookies", N::get_all_cookies)
		.op_with("getCertificate", N::get_certificate)
		.op_with("getCookies", N::get_cookies)
		.op_with("getResponseBody", N::get_response_body)
		.op_with("getRequestPostData", N::get_request_post_data)
		.op_with("replayXHR", N::replay_xhr)
		.op_with("searchInResponseBody", N::search_in_response_body)
		.op_with("setBlockedURLs", N::set_blocked_urls)
		.op_with("setBypassServiceWorker", N::set_bypass_service_worker)
		.op_with("setCacheDisabled", N::set_cache_disabled)
		.op_with("setCookie", N::set_cookie)
		.op_with("setCookies", N::set_cookies)
		.op_with("setDataSizeLimitsForTest", N::set_data_size_limits_for_test)
		.op_with("setExtraHTTPHeaders", N::set_extra_http_headers);
}

/// A [`Network`] that succeeds at everything and reports nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct FakeNetwork;

impl Network for FakeNetwork {
	fn clear_browser_cache(&self) -> Result<()> {
		Ok(())
	}

	fn clear_browser_cookies(&self) -> Result<()> {
		Ok(())
	}

	fn delete_cookies(&self, _params: &DeleteCookiesParams) -> Result<()> {
		Ok(())
	}

	fn disable(&self) -> Result<()> {
		Ok(())
	}

	fn emulate_network_conditions(&self, _params: &EmulateNetworkConditionsParams) -> Result<()> {
		Ok(())
	}

	fn enable(&self) -> Result<EnableParams> {
		Ok(EnableParams::default())
	}

	fn get_all_cookies(&self) -> Result<GetAllCookiesReturns> {
		Ok(GetAllCookiesReturns::default())
	}

	fn get_certificate(&self, _params: &GetCertificateParams) -> Result<GetCertificateReturns> {
		Ok(GetCertificateReturns::default())
	}

	fn get_cookies(&self, _params: &GetCookiesParams) -> Result<GetCookiesReturns> {
		Ok(GetCookiesReturns::default())
	}

	fn get_response_body(&self, _params: &GetResponseBodyParams) -> Result<GetResponseBodyReturns> {
		Ok(GetResponseBodyReturns::default())
	}

	fn get_request_post_data(&self, _params: &GetRequestPostDataParams) -> Result<GetRequestPostDataReturns> {
		Ok(GetRequestPostDataReturns::default())
	}

	fn replay_xhr(&self, _params: &ReplayXhrParams) -> Result<()> {
		Ok(())
	}

	fn search_in_response_body(&self, _params: &SearchInResponseBodyParams) -> Result<SearchInResponseBodyReturns> {
		Ok(SearchInResponseBodyReturns::default())
	}

	fn set_blocked_urls(&self, _params: &SetBlockedUrlsParams) -> Result<()> {
		Ok(())
	}

	fn set_bypass_service_worker(&self, _params: &SetBypassServiceWorkerParams) -> Result<()> {
		Ok(())
	}

	fn set_cache_disabled(&self, _params: &SetCacheDisabledParams) -> Result<()> {
		Ok(())
	}

	fn set_cookie(&self, _params: &SetCookieParams) -> Result<SetCookieReturns> {
		Ok(SetCookieReturns::default())
	}

	fn set_cookies(&self, _params: &SetCookiesParams) -> Result<()> {
		Ok(())
	}

	fn set_data_size_limits_for_test(&self, _params: &SetDataSizeLimitsForTestParams) -> Result<()> {
		Ok(())
	}

	fn set_extra_http_headers(&self, _params: &SetExtraHttpHeadersParams) -> Result<()> {
		Ok(())
	}
}
