//! C-ABI wrapper around `hero-core`.
//!
//! # Overview
//! Exposes hero search and lookup through `extern "C"` functions so a mobile
//! host (Swift, Kotlin via JNI, anything with a C FFI) can build requests,
//! execute them with its own networking stack, and parse the responses,
//! without linking an async runtime.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - Per-operation `build_*` / `parse_*` mirrors the core API 1:1.
//! - A single `FfiHeroResult` envelope with `FfiDataTag` + `void* data`
//!   conveys success payloads and errors uniformly.
//! - The C caller owns all returned pointers and must call the matching
//!   `hero_free_*` function to release them.

pub mod types;

use std::ffi::CStr;
use std::os::raw::c_char;
use std::panic::catch_unwind;

use hero_core::http::HttpResponse;
use hero_core::{ClientConfig, HeroClient};

use types::*;

/// Borrow a C string as `&str`. Null or invalid UTF-8 yields `None`.
fn str_arg<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(ptr) }.to_str().ok()
}

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a new `HeroClient` for `base_url` presenting `access_token`.
///
/// Returns null if either argument is null or not UTF-8, or if an internal
/// panic occurs. The caller must free the returned pointer with
/// `hero_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn hero_client_new(
    base_url: *const c_char,
    access_token: *const c_char,
) -> *mut FfiHeroClient {
    catch_unwind(|| {
        let (Some(url), Some(token)) = (str_arg(base_url), str_arg(access_token)) else {
            return std::ptr::null_mut();
        };
        let client = HeroClient::new(ClientConfig::new(url, token));
        Box::into_raw(Box::new(FfiHeroClient { inner: client }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a `HeroClient` created by `hero_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn hero_client_free(client: *mut FfiHeroClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

// ---------------------------------------------------------------------------
// Build request functions
// ---------------------------------------------------------------------------

/// Build the request for a name search.
///
/// Returns null if `client` or `query` is null, if `query` is not UTF-8, or if
/// the query is blank. The build functions have no error channel, so
/// `FfiErrorCode::InvalidInput` never reaches the host from here.
/// The caller must free the returned pointer with `hero_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn hero_build_search_heroes(
    client: *const FfiHeroClient,
    query: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let Some(query) = str_arg(query) else {
            return std::ptr::null_mut();
        };
        match client.inner.build_search_heroes(query) {
            Ok(req) => FfiHttpRequest::from_core(req),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build the request for a lookup by id.
///
/// Returns null if `client` or `id` is null, if `id` is not UTF-8, or if `id`
/// is blank.
#[unsafe(no_mangle)]
pub extern "C" fn hero_build_get_hero(
    client: *const FfiHeroClient,
    id: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let Some(id) = str_arg(id) else {
            return std::ptr::null_mut();
        };
        match client.inner.build_get_hero(id) {
            Ok(req) => FfiHttpRequest::from_core(req),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Parse response functions
// ---------------------------------------------------------------------------

/// Convert an `FfiHttpResponse` to a core `HttpResponse`. A null body is
/// treated as empty.
fn ffi_response_to_core(resp: &FfiHttpResponse) -> HttpResponse {
    let body = if resp.body.is_null() {
        String::new()
    } else {
        unsafe { CStr::from_ptr(resp.body) }.to_string_lossy().into_owned()
    };
    HttpResponse {
        status: resp.status,
        body,
    }
}

/// Parse the response to a search request.
///
/// Returns a result with `data_tag = SearchResult` on success.
#[unsafe(no_mangle)]
pub extern "C" fn hero_parse_search_heroes(
    client: *const FfiHeroClient,
    response: *const FfiHttpResponse,
) -> *mut FfiHeroResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiHeroResult::null_arg("client");
        }
        if response.is_null() {
            return FfiHeroResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let resp = unsafe { &*response };
        match client.inner.parse_search_heroes(ffi_response_to_core(resp)) {
            Ok(result) => FfiHeroResult::ok_search(result),
            Err(e) => FfiHeroResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiHeroResult::panic("panic in hero_parse_search_heroes"))
}

/// Parse the response to a lookup request.
///
/// Returns a result with `data_tag = HeroDetail` on success.
#[unsafe(no_mangle)]
pub extern "C" fn hero_parse_get_hero(
    client: *const FfiHeroClient,
    response: *const FfiHttpResponse,
) -> *mut FfiHeroResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiHeroResult::null_arg("client");
        }
        if response.is_null() {
            return FfiHeroResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let resp = unsafe { &*response };
        match client.inner.parse_get_hero(ffi_response_to_core(resp)) {
            Ok(hero) => FfiHeroResult::ok_hero(hero),
            Err(e) => FfiHeroResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiHeroResult::panic("panic in hero_parse_get_hero"))
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiHttpRequest` returned by any `hero_build_*` function.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn hero_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        free_c_string(req.url);
    });
}

/// Free an `FfiHeroResult` returned by any `hero_parse_*` function.
/// Safe to call with null. Uses `data_tag` to determine what `data` points to.
#[unsafe(no_mangle)]
pub extern "C" fn hero_free_result(result: *mut FfiHeroResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        free_c_string(result.error_message);
        if result.data.is_null() {
            return;
        }
        match result.data_tag {
            FfiDataTag::SearchResult => {
                let search = unsafe { Box::from_raw(result.data as *mut FfiSearchResult) };
                free_c_string(search.status);
                for item in unsafe { from_raw_parts(search.items, search.len) } {
                    free_summary_fields(&item);
                }
            }
            FfiDataTag::HeroDetail => {
                let hero = unsafe { Box::from_raw(result.data as *mut FfiHeroDetail) };
                free_detail_fields(&hero);
            }
            FfiDataTag::None => {}
        }
    });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn hero_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| free_c_string(s));
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;

    const BATMAN: &str = r#"{
        "response":"success","id":"70","name":"Batman",
        "powerstats":{"intelligence":"100","strength":"26","speed":"27","durability":"50","power":"47","combat":"null"},
        "biography":{"full-name":"Bruce Wayne","aliases":["Insider","Matches Malone"],"publisher":"DC Comics","alignment":"good"},
        "work":{"occupation":"Businessman","base":"Batcave"},
        "image":{"url":"https://img.test/70.jpg"}
    }"#;

    fn new_client() -> *mut FfiHeroClient {
        let url = CString::new("http://localhost:3000/api").unwrap();
        let token = CString::new("tok").unwrap();
        hero_client_new(url.as_ptr(), token.as_ptr())
    }

    fn c_str<'a>(ptr: *const c_char) -> &'a str {
        unsafe { CStr::from_ptr(ptr) }.to_str().unwrap()
    }

    #[test]
    fn client_new_and_free() {
        let client = new_client();
        assert!(!client.is_null());
        hero_client_free(client);
    }

    #[test]
    fn client_new_null_returns_null() {
        let token = CString::new("tok").unwrap();
        assert!(hero_client_new(std::ptr::null(), token.as_ptr()).is_null());
        let url = CString::new("http://localhost").unwrap();
        assert!(hero_client_new(url.as_ptr(), std::ptr::null()).is_null());
    }

    #[test]
    fn client_free_null_is_safe() {
        hero_client_free(std::ptr::null_mut());
    }

    #[test]
    fn build_search_heroes_returns_encoded_url() {
        let client = new_client();
        let query = CString::new("Iron Man").unwrap();
        let req = hero_build_search_heroes(client, query.as_ptr());
        assert!(!req.is_null());

        let req_ref = unsafe { &*req };
        assert!(matches!(req_ref.method, FfiHttpMethod::Get));
        assert_eq!(c_str(req_ref.url), "http://localhost:3000/api/tok/search/Iron%20Man");

        hero_free_request(req);
        hero_client_free(client);
    }

    #[test]
    fn build_search_heroes_empty_query_returns_null() {
        let client = new_client();
        let query = CString::new("").unwrap();
        assert!(hero_build_search_heroes(client, query.as_ptr()).is_null());
        assert!(hero_build_search_heroes(client, std::ptr::null()).is_null());
        hero_client_free(client);
    }

    #[test]
    fn build_rejects_blank_and_non_utf8_input_with_null() {
        let client = new_client();
        let blank = CString::new("   ").unwrap();
        assert!(hero_build_search_heroes(client, blank.as_ptr()).is_null());
        assert!(hero_build_get_hero(client, blank.as_ptr()).is_null());

        let invalid = CString::new(vec![0xff, 0xfe]).unwrap();
        assert!(hero_build_search_heroes(client, invalid.as_ptr()).is_null());
        assert!(hero_build_get_hero(client, invalid.as_ptr()).is_null());
        hero_client_free(client);
    }

    #[test]
    fn build_search_heroes_null_client_returns_null() {
        let query = CString::new("batman").unwrap();
        assert!(hero_build_search_heroes(std::ptr::null(), query.as_ptr()).is_null());
    }

    #[test]
    fn build_get_hero_returns_url() {
        let client = new_client();
        let id = CString::new("70").unwrap();
        let req = hero_build_get_hero(client, id.as_ptr());
        assert!(!req.is_null());

        let req_ref = unsafe { &*req };
        assert_eq!(c_str(req_ref.url), "http://localhost:3000/api/tok/70");

        hero_free_request(req);
        hero_client_free(client);
    }

    #[test]
    fn build_get_hero_empty_id_returns_null() {
        let client = new_client();
        let id = CString::new("").unwrap();
        assert!(hero_build_get_hero(client, id.as_ptr()).is_null());
        hero_client_free(client);
    }

    #[test]
    fn parse_search_heroes_empty() {
        let client = new_client();
        let body = CString::new(r#"{"response":"success","results":[]}"#).unwrap();
        let resp = FfiHttpResponse {
            status: 200,
            body: body.as_ptr(),
        };
        let result = hero_parse_search_heroes(client, &resp);
        assert!(!result.is_null());

        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Ok);
        assert!(r.error_message.is_null());
        assert_eq!(r.data_tag, FfiDataTag::SearchResult);

        let search = unsafe { &*(r.data as *const FfiSearchResult) };
        assert_eq!(c_str(search.status), "success");
        assert_eq!(search.len, 0);
        assert!(search.items.is_null());

        hero_free_result(result);
        hero_client_free(client);
    }

    #[test]
    fn parse_search_heroes_two_items() {
        let client = new_client();
        let body = CString::new(
            r#"{"response":"success","results":[
                {"id":"70","name":"Batman","image":{"url":"https://img.test/70.jpg"}},
                {"id":"69","name":"Batman","image":{"url":"https://img.test/69.jpg"}}
            ]}"#,
        )
        .unwrap();
        let resp = FfiHttpResponse {
            status: 200,
            body: body.as_ptr(),
        };
        let result = hero_parse_search_heroes(client, &resp);
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Ok);

        let search = unsafe { &*(r.data as *const FfiSearchResult) };
        assert_eq!(search.len, 2);
        let items = unsafe { std::slice::from_raw_parts(search.items, search.len as usize) };
        assert_eq!(c_str(items[0].id), "70");
        assert_eq!(c_str(items[1].id), "69");
        assert_eq!(c_str(items[1].image_url), "https://img.test/69.jpg");

        hero_free_result(result);
        hero_client_free(client);
    }

    #[test]
    fn parse_search_heroes_not_found_envelope() {
        let client = new_client();
        let body =
            CString::new(r#"{"response":"error","error":"character with given name not found"}"#).unwrap();
        let resp = FfiHttpResponse {
            status: 200,
            body: body.as_ptr(),
        };
        let result = hero_parse_search_heroes(client, &resp);
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Upstream);
        assert!(r.not_found);
        assert!(r.data.is_null());
        assert!(c_str(r.error_message).contains("not found"));

        hero_free_result(result);
        hero_client_free(client);
    }

    #[test]
    fn parse_get_hero_success() {
        let client = new_client();
        let body = CString::new(BATMAN).unwrap();
        let resp = FfiHttpResponse {
            status: 200,
            body: body.as_ptr(),
        };
        let result = hero_parse_get_hero(client, &resp);
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Ok);
        assert_eq!(r.data_tag, FfiDataTag::HeroDetail);

        let hero = unsafe { &*(r.data as *const FfiHeroDetail) };
        assert_eq!(c_str(hero.name), "Batman");
        assert_eq!(c_str(hero.full_name), "Bruce Wayne");
        assert_eq!(hero.power_stats.intelligence, 100);
        assert_eq!(hero.power_stats.combat, 0);
        assert_eq!(hero.role, FfiRole::Hero);
        assert_eq!(hero.aliases_len, 2);
        let aliases = unsafe { std::slice::from_raw_parts(hero.aliases, hero.aliases_len as usize) };
        assert_eq!(c_str(aliases[0]), "Insider");
        assert_eq!(c_str(aliases[1]), "Matches Malone");
        assert_eq!(c_str(hero.base), "Batcave");

        hero_free_result(result);
        hero_client_free(client);
    }

    #[test]
    fn parse_get_hero_server_error() {
        let client = new_client();
        let body = CString::new("oops").unwrap();
        let resp = FfiHttpResponse {
            status: 500,
            body: body.as_ptr(),
        };
        let result = hero_parse_get_hero(client, &resp);
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Transport);
        assert_eq!(r.http_status, 500);
        assert!(!r.not_found);

        hero_free_result(result);
        hero_client_free(client);
    }

    #[test]
    fn parse_get_hero_bad_json() {
        let client = new_client();
        let resp = FfiHttpResponse {
            status: 200,
            body: std::ptr::null(),
        };
        let result = hero_parse_get_hero(client, &resp);
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Decode);

        hero_free_result(result);
        hero_client_free(client);
    }

    #[test]
    fn parse_null_client_returns_null_arg() {
        let body = CString::new("{}").unwrap();
        let resp = FfiHttpResponse {
            status: 200,
            body: body.as_ptr(),
        };
        let result = hero_parse_search_heroes(std::ptr::null(), &resp);
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::NullArg);

        hero_free_result(result);
    }

    #[test]
    fn parse_null_response_returns_null_arg() {
        let client = new_client();
        let result = hero_parse_get_hero(client, std::ptr::null());
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::NullArg);

        hero_free_result(result);
        hero_client_free(client);
    }

    #[test]
    fn interior_nul_is_dropped() {
        let s = to_c_string("a\0b".to_string());
        assert_eq!(c_str(s), "ab");
        hero_free_string(s);
    }

    #[test]
    fn free_request_null_is_safe() {
        hero_free_request(std::ptr::null_mut());
    }

    #[test]
    fn free_result_null_is_safe() {
        hero_free_result(std::ptr::null_mut());
    }

    #[test]
    fn free_string_null_is_safe() {
        hero_free_string(std::ptr::null_mut());
    }
}
