use askama::Template;
use askama_web::WebTemplate;

#[derive(Template, WebTemplate)]
#[template(path = "subscribe.html")]
pub(crate) struct SubscribeTemplate {
    pub(crate) app_name: String,
    pub(crate) push_configured: bool,
}
