#[cfg(feature = "http-router")]
#[test]
fn http_router_status_and_allow() {
    use route_table::{Router, RouterError};

    use http::StatusCode;

    let mut router: Router<()> = Router::new();
    router.post("/u/:uid", "update").unwrap();
    router.put("/u/:uid", "replace").unwrap();

    let uri: http::Uri = "http://localhost/u/asd?x=1".parse().unwrap();
    let ret = router.resolve_http(&http::Method::POST, &uri).unwrap();
    assert_eq!(ret.controller.name(), Some("update"));
    assert_eq!(ret.params.get("uid"), Some("asd"));

    let err = router.resolve_http(&http::Method::GET, &uri).unwrap_err();
    assert_eq!(err.status_code(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(err.allow_header().unwrap(), "PUT, POST");

    let err = router.resolve("/nope", "GET").unwrap_err();
    assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    assert!(err.allow_header().is_none());

    let err = router
        .resolve_http(&http::Method::CONNECT, &uri)
        .unwrap_err();
    assert!(matches!(err, RouterError::InvalidMethod { .. }));
    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
}

#[cfg(feature = "http-router")]
#[test]
fn http_router_method_conversion() {
    use route_table::Method;

    for &m in Method::ALL.iter() {
        let h: http::Method = m.into();
        assert_eq!(h.as_str(), m.as_str());
        assert_eq!(Method::try_from(&h).unwrap(), m);
    }
}
