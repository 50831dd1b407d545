/// Builds a [`Router`](crate::Router) from `METHOD "pattern" => controller`
/// entries. `ALL` registers the entry for every method.
///
/// Evaluates to `Result<Router<H>, RouterError>`.
///
/// ```
/// use route_table::{routes, Router};
///
/// let router: Router<()> = routes! {
///     GET "/u/:uid" => "users#show",
///     POST "/u" => "users#create",
///     ALL "/ping" => "ping"
/// }
/// .unwrap();
///
/// let route = router.resolve("/u/42", "get").unwrap();
/// assert_eq!(route.params.get("uid"), Some("42"));
/// ```
#[macro_export]
macro_rules! routes {
    {@entry $router:expr, ALL, $pattern:expr, $data:expr} => {
        $router.all($pattern, $data, &[])?
    };
    {@entry $router:expr, GET, $pattern:expr, $data:expr} => {
        $router.add_route($crate::Method::GET, $pattern, $data, &[], &[])?
    };
    {@entry $router:expr, POST, $pattern:expr, $data:expr} => {
        $router.add_route($crate::Method::POST, $pattern, $data, &[], &[])?
    };
    {@entry $router:expr, PUT, $pattern:expr, $data:expr} => {
        $router.add_route($crate::Method::PUT, $pattern, $data, &[], &[])?
    };
    {@entry $router:expr, DELETE, $pattern:expr, $data:expr} => {
        $router.add_route($crate::Method::DELETE, $pattern, $data, &[], &[])?
    };
    {@entry $router:expr, HEAD, $pattern:expr, $data:expr} => {
        $router.add_route($crate::Method::HEAD, $pattern, $data, &[], &[])?
    };
    {@entry $router:expr, OPTIONS, $pattern:expr, $data:expr} => {
        $router.add_route($crate::Method::OPTIONS, $pattern, $data, &[], &[])?
    };
    {@entry $router:expr, TRACE, $pattern:expr, $data:expr} => {
        $router.add_route($crate::Method::TRACE, $pattern, $data, &[], &[])?
    };
    {@entry $router:expr, PATCH, $pattern:expr, $data:expr} => {
        $router.add_route($crate::Method::PATCH, $pattern, $data, &[], &[])?
    };

    {$($method:tt $pattern:expr => $data:expr),+ $(,)?} => {{
        (|| -> ::std::result::Result<_, $crate::RouterError> {
            let mut __router = $crate::Router::new();
            $($crate::routes!(@entry __router, $method, $pattern, $data);)+
            Ok(__router)
        })()
    }};
}
