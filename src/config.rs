#[derive(Clone)]
pub struct AppConfig {
    pub app_name: String,
    pub vapid_private_key: Option<String>,
    pub vapid_public_key: Option<String>,
    pub vapid_subject: Option<String>,
}

#[cfg(test)]
impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_name: "Pushbox".to_string(),
            vapid_private_key: None,
            vapid_public_key: None,
            vapid_subject: None,
        }
    }
}
