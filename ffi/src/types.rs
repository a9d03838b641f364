//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type but uses C-compatible representations:
//! `*mut c_char` instead of `String`, pointer + length instead of `Vec`, and
//! enums with explicit discriminants. Conversion functions live here to keep
//! `lib.rs` focused on the `extern "C"` surface.

use std::ffi::{c_void, CString};
use std::os::raw::c_char;

use hero_core::error::ApiError;
use hero_core::http::HttpMethod;
use hero_core::types::{HeroDetail, HeroSummary, PowerStats, Role, SearchResult};

/// Opaque handle to a `HeroClient`. C callers receive a pointer to this
/// and pass it back into every FFI function.
pub struct FfiHeroClient {
    pub(crate) inner: hero_core::HeroClient,
}

/// Convert to an owned C string. Interior NUL bytes are dropped rather than
/// failing the whole conversion.
pub(crate) fn to_c_string(s: impl Into<Vec<u8>>) -> *mut c_char {
    let c = CString::new(s).unwrap_or_else(|e| {
        let mut bytes = e.into_vec();
        bytes.retain(|b| *b != 0);
        CString::new(bytes).unwrap_or_default()
    });
    c.into_raw()
}

/// Leak a `Vec` as a pointer + length pair. Empty vectors become null.
fn into_raw_parts<T>(items: Vec<T>) -> (*mut T, u32) {
    if items.is_empty() {
        return (std::ptr::null_mut(), 0);
    }
    let mut items = items.into_boxed_slice();
    let len = items.len() as u32;
    let ptr = items.as_mut_ptr();
    std::mem::forget(items);
    (ptr, len)
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// HTTP method as a C enum.
#[repr(C)]
pub enum FfiHttpMethod {
    Get = 0,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
        }
    }
}

/// An HTTP request described as C-compatible plain data.
///
/// Built by `hero_build_*` functions. The C caller executes the request
/// and passes the response back through `hero_parse_*`. `url` embeds the
/// access token; do not log it.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub url: *mut c_char,
}

impl FfiHttpRequest {
    /// Convert a core `HttpRequest` into a heap-allocated `FfiHttpRequest`.
    pub(crate) fn from_core(req: hero_core::HttpRequest) -> *mut Self {
        Box::into_raw(Box::new(FfiHttpRequest {
            method: req.method.into(),
            url: to_c_string(req.url),
        }))
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The C caller constructs this on the stack after executing an HTTP request,
/// then passes a pointer to a `hero_parse_*` function. The FFI layer reads
/// but does not free these fields.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiHeroResult`.
#[repr(C)]
#[derive(Debug, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    /// Not produced by the parse functions. The build functions report
    /// invalid input by returning a null request instead.
    InvalidInput = 1,
    Transport = 2,
    Decode = 3,
    Upstream = 4,
    Panic = 5,
    NullArg = 6,
}

/// Tag that tells `hero_free_result` what `FfiHeroResult::data` points to.
#[repr(C)]
#[derive(Debug, PartialEq, Eq)]
pub enum FfiDataTag {
    None = 0,
    SearchResult = 1,
    HeroDetail = 2,
}

#[repr(C)]
pub struct FfiHeroSummary {
    pub id: *mut c_char,
    pub name: *mut c_char,
    pub image_url: *mut c_char,
}

impl From<HeroSummary> for FfiHeroSummary {
    fn from(h: HeroSummary) -> Self {
        FfiHeroSummary {
            id: to_c_string(h.id),
            name: to_c_string(h.name),
            image_url: to_c_string(h.image_url),
        }
    }
}

#[repr(C)]
pub struct FfiSearchResult {
    pub status: *mut c_char,
    pub items: *mut FfiHeroSummary,
    pub len: u32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FfiPowerStats {
    pub intelligence: u32,
    pub strength: u32,
    pub speed: u32,
    pub durability: u32,
    pub power: u32,
    pub combat: u32,
}

impl From<PowerStats> for FfiPowerStats {
    fn from(s: PowerStats) -> Self {
        FfiPowerStats {
            intelligence: s.intelligence,
            strength: s.strength,
            speed: s.speed,
            durability: s.durability,
            power: s.power,
            combat: s.combat,
        }
    }
}

#[repr(C)]
#[derive(Debug, PartialEq, Eq)]
pub enum FfiRole {
    Hero = 0,
    Villain = 1,
    Neutral = 2,
}

impl From<Role> for FfiRole {
    fn from(r: Role) -> Self {
        match r {
            Role::Hero => FfiRole::Hero,
            Role::Villain => FfiRole::Villain,
            Role::Neutral => FfiRole::Neutral,
        }
    }
}

/// A full hero record exposed to C. `aliases` keeps server order.
#[repr(C)]
pub struct FfiHeroDetail {
    pub id: *mut c_char,
    pub name: *mut c_char,
    pub image_url: *mut c_char,
    pub power_stats: FfiPowerStats,
    pub full_name: *mut c_char,
    pub aliases: *mut *mut c_char,
    pub aliases_len: u32,
    pub publisher: *mut c_char,
    pub alignment: *mut c_char,
    pub role: FfiRole,
    pub occupation: *mut c_char,
    pub base: *mut c_char,
}

impl From<HeroDetail> for FfiHeroDetail {
    fn from(h: HeroDetail) -> Self {
        let role = h.role().into();
        let aliases: Vec<*mut c_char> = h.biography.aliases.into_iter().map(to_c_string).collect();
        let (aliases, aliases_len) = into_raw_parts(aliases);
        FfiHeroDetail {
            id: to_c_string(h.id),
            name: to_c_string(h.name),
            image_url: to_c_string(h.image_url),
            power_stats: h.power_stats.into(),
            full_name: to_c_string(h.biography.full_name),
            aliases,
            aliases_len,
            publisher: to_c_string(h.biography.publisher),
            alignment: to_c_string(h.biography.alignment),
            role,
            occupation: to_c_string(h.work.occupation),
            base: to_c_string(h.work.base),
        }
    }
}

/// Result envelope for all parse operations.
///
/// On success `error_code` is `Ok`, `error_message` is null, and `data`
/// points to the parsed payload (tagged by `data_tag`).
/// On failure `error_code` describes the category, `error_message` is a
/// human-readable C string, and `data` is null. `not_found` is set when the
/// upstream reported that nothing matched.
#[repr(C)]
pub struct FfiHeroResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub not_found: bool,
    pub data_tag: FfiDataTag,
    pub data: *mut c_void,
}

impl FfiHeroResult {
    fn ok(data_tag: FfiDataTag, data: *mut c_void) -> *mut Self {
        Box::into_raw(Box::new(FfiHeroResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            http_status: 0,
            not_found: false,
            data_tag,
            data,
        }))
    }

    fn err(error_code: FfiErrorCode, msg: String, http_status: u16, not_found: bool) -> *mut Self {
        Box::into_raw(Box::new(FfiHeroResult {
            error_code,
            error_message: to_c_string(msg),
            http_status,
            not_found,
            data_tag: FfiDataTag::None,
            data: std::ptr::null_mut(),
        }))
    }

    /// Build a success result carrying an `FfiSearchResult`.
    pub(crate) fn ok_search(result: SearchResult) -> *mut Self {
        let items: Vec<FfiHeroSummary> = result.results.into_iter().map(Into::into).collect();
        let (items, len) = into_raw_parts(items);
        let search = Box::new(FfiSearchResult {
            status: to_c_string(result.status),
            items,
            len,
        });
        Self::ok(FfiDataTag::SearchResult, Box::into_raw(search) as *mut c_void)
    }

    /// Build a success result carrying an `FfiHeroDetail`.
    pub(crate) fn ok_hero(hero: HeroDetail) -> *mut Self {
        let detail = Box::new(FfiHeroDetail::from(hero));
        Self::ok(FfiDataTag::HeroDetail, Box::into_raw(detail) as *mut c_void)
    }

    /// Build an error result from an `ApiError`.
    pub(crate) fn from_error(err: ApiError) -> *mut Self {
        let not_found = err.is_not_found();
        let http_status = err.status().unwrap_or(0);
        let code = match &err {
            ApiError::InvalidInput(_) => FfiErrorCode::InvalidInput,
            ApiError::Transport { .. } | ApiError::Cancelled => FfiErrorCode::Transport,
            ApiError::Decode(_) => FfiErrorCode::Decode,
            ApiError::Upstream(_) => FfiErrorCode::Upstream,
        };
        Self::err(code, err.to_string(), http_status, not_found)
    }

    /// Build an error result for a null argument.
    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::err(FfiErrorCode::NullArg, format!("null argument: {name}"), 0, false)
    }

    /// Build an error result for a caught panic.
    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::err(FfiErrorCode::Panic, msg.to_string(), 0, false)
    }
}

// ---------------------------------------------------------------------------
// Deallocation helpers
// ---------------------------------------------------------------------------

pub(crate) fn free_c_string(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}

/// Reclaim a slice leaked by `into_raw_parts`.
///
/// # Safety
/// `ptr`/`len` must come from `into_raw_parts` and not have been freed.
pub(crate) unsafe fn from_raw_parts<T>(ptr: *mut T, len: u32) -> Vec<T> {
    if ptr.is_null() || len == 0 {
        return Vec::new();
    }
    let slice = std::ptr::slice_from_raw_parts_mut(ptr, len as usize);
    unsafe { Box::from_raw(slice) }.into_vec()
}

pub(crate) fn free_summary_fields(h: &FfiHeroSummary) {
    free_c_string(h.id);
    free_c_string(h.name);
    free_c_string(h.image_url);
}

pub(crate) fn free_detail_fields(h: &FfiHeroDetail) {
    free_c_string(h.id);
    free_c_string(h.name);
    free_c_string(h.image_url);
    free_c_string(h.full_name);
    for alias in unsafe { from_raw_parts(h.aliases, h.aliases_len) } {
        free_c_string(alias);
    }
    free_c_string(h.publisher);
    free_c_string(h.alignment);
    free_c_string(h.occupation);
    free_c_string(h.base);
}
