//! Drive the C surface the way a host app would: build through FFI, execute
//! with the host's own HTTP stack (ureq here), parse through FFI.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use hero_ffi::types::{FfiDataTag, FfiErrorCode, FfiHeroDetail, FfiHttpRequest, FfiHttpResponse, FfiRole, FfiSearchResult};
use hero_ffi::*;

fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}/api")
}

fn c_str<'a>(ptr: *const c_char) -> &'a str {
    unsafe { CStr::from_ptr(ptr) }.to_str().unwrap()
}

/// Execute a built request and return (status, body) owned by the caller.
fn execute(req: *mut FfiHttpRequest) -> (u16, CString) {
    assert!(!req.is_null());
    let url = c_str(unsafe { &*req }.url).to_string();
    hero_free_request(req);

    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();
    let mut response = agent.get(&url).call().expect("HTTP transport error");
    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();
    (status, CString::new(body).unwrap())
}

#[test]
fn search_then_lookup_over_ffi() {
    let base = CString::new(start_server()).unwrap();
    let token = CString::new(mock_server::DEFAULT_TOKEN).unwrap();
    let client = hero_client_new(base.as_ptr(), token.as_ptr());
    assert!(!client.is_null());

    // search
    let query = CString::new("spider").unwrap();
    let (status, body) = execute(hero_build_search_heroes(client, query.as_ptr()));
    let resp = FfiHttpResponse {
        status,
        body: body.as_ptr(),
    };
    let result = hero_parse_search_heroes(client, &resp);
    let r = unsafe { &*result };
    assert_eq!(r.error_code, FfiErrorCode::Ok);
    assert_eq!(r.data_tag, FfiDataTag::SearchResult);
    let search = unsafe { &*(r.data as *const FfiSearchResult) };
    assert_eq!(search.len, 1);
    let first = unsafe { &*search.items };
    let id = CString::new(c_str(first.id)).unwrap();
    hero_free_result(result);

    // lookup
    let (status, body) = execute(hero_build_get_hero(client, id.as_ptr()));
    let resp = FfiHttpResponse {
        status,
        body: body.as_ptr(),
    };
    let result = hero_parse_get_hero(client, &resp);
    let r = unsafe { &*result };
    assert_eq!(r.error_code, FfiErrorCode::Ok);
    let hero = unsafe { &*(r.data as *const FfiHeroDetail) };
    assert_eq!(c_str(hero.name), "Spider-Man");
    assert_eq!(c_str(hero.full_name), "Peter Parker");
    assert_eq!(hero.role, FfiRole::Hero);
    assert_eq!(hero.aliases_len, 4);
    hero_free_result(result);

    hero_client_free(client);
}

#[test]
fn unknown_id_over_ffi() {
    let base = CString::new(start_server()).unwrap();
    let token = CString::new(mock_server::DEFAULT_TOKEN).unwrap();
    let client = hero_client_new(base.as_ptr(), token.as_ptr());

    let id = CString::new("99999").unwrap();
    let (status, body) = execute(hero_build_get_hero(client, id.as_ptr()));
    let resp = FfiHttpResponse {
        status,
        body: body.as_ptr(),
    };
    let result = hero_parse_get_hero(client, &resp);
    let r = unsafe { &*result };
    assert_eq!(r.error_code, FfiErrorCode::Upstream);
    assert!(r.not_found);
    hero_free_result(result);

    hero_client_free(client);
}
