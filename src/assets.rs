pub(crate) async fn service_worker() -> axum::response::Response {
    const SW_CONTENT: &str = include_str!("../static/sw.js");
    // Served at the root so the worker's scope covers the whole origin.
    axum::response::Response::builder()
        .status(200)
        .header("content-type", "application/javascript")
        .header("cache-control", "no-cache")
        .body(SW_CONTENT.into())
        .unwrap()
}

pub(crate) async fn push_subscribe_script() -> axum::response::Response {
    const PUSH_SUBSCRIBE_JS_CONTENT: &str = include_str!("../static/push_subscribe.js");
    axum::response::Response::builder()
        .status(200)
        .header("content-type", "application/javascript")
        .header("cache-control", "public, max-age=3600")
        .body(PUSH_SUBSCRIBE_JS_CONTENT.into())
        .unwrap()
}

pub(crate) async fn sw_register_script() -> axum::response::Response {
    const SW_REGISTER_JS_CONTENT: &str = include_str!("../static/sw_register.js");
    axum::response::Response::builder()
        .status(200)
        .header("content-type", "application/javascript")
        .header("cache-control", "public, max-age=3600")
        .body(SW_REGISTER_JS_CONTENT.into())
        .unwrap()
}
