use route_table::{Controller, HandlerRegistry, Method, Params, Router, RouterError};

use serde_json::{json, Value};

type Greet = Box<dyn Fn(&Params) -> String + Send + Sync>;

fn registry() -> HandlerRegistry<Greet> {
    let mut registry: HandlerRegistry<Greet> = HandlerRegistry::new();
    registry.register("greet", |env: &Value| -> Greet {
        let greeting = env["greeting"].as_str().unwrap_or("hello").to_owned();
        Box::new(move |params: &Params| {
            format!("{}, {}!", greeting, params.get("name").unwrap_or("nobody"))
        })
    });
    registry
}

fn call(router: &Router<Greet>, path: &str, method: &str) -> String {
    let route = router.resolve(path, method).unwrap();
    let handler = route.controller.handler().unwrap();
    handler(&route.params)
}

fn sample(registry: &HandlerRegistry<Greet>) -> Router<Greet> {
    let mut router: Router<Greet> = Router::new();
    router
        .add_route(
            Method::GET,
            "/hello/:name",
            registry.handler("greet", json!({ "greeting": "hi" })).unwrap(),
            &[("name", "[a-z]+")],
            &[],
        )
        .unwrap()
        .add_route(
            Method::POST,
            "/users/:id/*rest",
            "users#update",
            &[],
            &[("format", "json")],
        )
        .unwrap()
        .all("/ping", "ping", &[])
        .unwrap()
        .get("/:date/:slug", "post")
        .unwrap();
    router
}

#[test]
fn codec_round_trip() {
    let registry = registry();
    let router = sample(&registry);

    let json = router.to_json().unwrap();
    let restored = Router::from_json(&json, &registry).unwrap();

    assert_eq!(restored.len(), router.len());
    assert_eq!(call(&restored, "/hello/world", "GET"), "hi, world!");

    let cases: &[(&str, &str)] = &[
        ("/hello/world", "GET"),
        ("/users/1/a/b", "POST"),
        ("/ping", "TRACE"),
        ("/ping", "GET"),
        ("/2020/rust", "GET"),
    ];
    for &(path, method) in cases {
        let before = router.resolve(path, method).unwrap();
        let after = restored.resolve(path, method).unwrap();
        assert_eq!(before.controller, after.controller, "{} {}", method, path);
        assert_eq!(before.params, after.params, "{} {}", method, path);
        assert_eq!(before.rule.pattern(), after.rule.pattern());
    }

    let err = restored.resolve("/users/1/a", "GET").unwrap_err();
    assert!(matches!(err, RouterError::MethodNotAllowed { .. }));
}

#[test]
fn codec_keeps_shared_rules_shared() {
    let registry = registry();
    let router = sample(&registry);

    let doc: Value = serde_json::from_str(&router.to_json().unwrap()).unwrap();
    // hello, ping (once), the date/slug rule and users
    assert_eq!(doc["rules"].as_array().unwrap().len(), 4);
    assert_eq!(doc["buckets"]["GET"], json!([0, 1, 2]));
    assert_eq!(doc["buckets"]["POST"], json!([3, 1]));
    assert_eq!(doc["buckets"]["PATCH"], json!([1]));

    let restored = Router::from_json(&doc.to_string(), &registry).unwrap();
    let get = restored
        .rules(Method::GET)
        .find(|r| r.pattern() == "/ping")
        .unwrap() as *const _;
    let head = restored.rules(Method::HEAD).next().unwrap() as *const _;
    assert_eq!(get, head);
}

#[test]
fn codec_controller_encoding() {
    let registry = registry();
    let router = sample(&registry);

    let doc: Value = serde_json::from_str(&router.to_json_pretty().unwrap()).unwrap();
    assert_eq!(
        doc["rules"][0]["controller"],
        json!({ "handler": "greet", "env": { "greeting": "hi" } })
    );
    assert_eq!(doc["rules"][3]["controller"], json!({ "name": "users#update" }));
    assert_eq!(doc["rules"][3]["defaults"], json!([["format", "json"]]));
}

#[test]
fn codec_unknown_handler() {
    let router = sample(&registry());
    let json = router.to_json().unwrap();

    let empty: HandlerRegistry<Greet> = HandlerRegistry::new();
    match Router::from_json(&json, &empty).unwrap_err() {
        RouterError::UnregisteredHandler { key } => assert_eq!(key, "greet"),
        e => panic!("unexpected error: {}", e),
    }
}

#[test]
fn codec_restore_replaces_table() {
    let registry = registry();
    let json = sample(&registry).to_json().unwrap();

    let mut router: Router<Greet> = Router::new();
    router.get("/old", "old").unwrap();
    router.restore_json(&json, &registry).unwrap();

    assert!(router.resolve("/old", "GET").is_err());
    assert_eq!(
        router.resolve("/ping", "GET").unwrap().controller,
        &Controller::Name("ping".to_owned())
    );

    // a failed restore leaves the table alone
    assert!(router.restore_json("{not json", &registry).is_err());
    assert!(router.resolve("/ping", "GET").is_ok());
}

#[test]
fn codec_rejects_corrupt_tables() {
    let registry = registry();

    let bad_version = json!({ "version": 99, "rules": [], "buckets": {} });
    assert!(matches!(
        Router::from_json(&bad_version.to_string(), &registry).unwrap_err(),
        RouterError::CorruptTable(_)
    ));

    let bad_index = json!({ "version": 1, "rules": [], "buckets": { "GET": [0] } });
    assert!(matches!(
        Router::from_json(&bad_index.to_string(), &registry).unwrap_err(),
        RouterError::CorruptTable(_)
    ));

    let bad_group = json!({
        "version": 1,
        "rules": [{
            "pattern": "/a",
            "matcher": "^a$",
            "variables": [["id", 1]],
            "controller": { "name": "a" },
            "defaults": []
        }],
        "buckets": { "GET": [0] }
    });
    assert!(matches!(
        Router::from_json(&bad_group.to_string(), &registry).unwrap_err(),
        RouterError::CorruptTable(_)
    ));

    assert!(matches!(
        Router::from_json("[]", &registry).unwrap_err(),
        RouterError::Codec(_)
    ));
}

#[test]
fn codec_writer_and_reader() {
    let registry = registry();
    let router = sample(&registry);

    let mut buf: Vec<u8> = Vec::new();
    router.to_writer(&mut buf).unwrap();
    let restored = Router::from_reader(buf.as_slice(), &registry).unwrap();
    assert_eq!(call(&restored, "/hello/there", "get"), "hi, there!");
}

#[test]
fn load_routes_from_config() {
    let registry = registry();
    let mut router: Router<Greet> = Router::new();
    router
        .load_routes(
            r#"[
                { "pattern": "/", "controller": "home" },
                { "method": "post", "pattern": "/users/:id", "controller": { "name": "users#update" },
                  "rules": { "id": "\\d+" }, "defaults": { "format": "json" } },
                { "pattern": "/greet/:name", "controller": { "handler": "greet" } }
            ]"#,
            &registry,
        )
        .unwrap();

    assert_eq!(router.resolve("/", "GET").unwrap().controller.name(), Some("home"));
    let ret = router.resolve("/users/5", "POST").unwrap();
    assert_eq!(ret.params.get("format"), Some("json"));
    assert_eq!(call(&router, "/greet/bob", "GET"), "hello, bob!");

    let err = router
        .load_routes(r#"[{ "pattern": "/a", "controller": "a" }, { "controller": "b" }]"#, &registry)
        .unwrap_err();
    assert!(matches!(err, RouterError::MissingField { index: 1, .. }));
    assert!(router.resolve("/a", "GET").is_err());
}
