//! Links that carry page state in the query string

/// `path?k=v&...`, skipping absent values. Values are ids, language codes and
/// small integers, so they need no escaping.
pub fn page_url(path: &str, params: &[(&str, Option<String>)]) -> String {
    let query: Vec<String> = params
        .iter()
        .filter_map(|(key, value)| value.as_ref().map(|v| format!("{}={}", key, v)))
        .collect();

    if query.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, query.join("&"))
    }
}

/// Dashboard location with an optional active tab and one open dialog flag
pub fn admin_url(tab: Option<uuid::Uuid>, dialog: Option<(&str, String)>) -> String {
    let mut params = vec![("tab", tab.map(|id| id.to_string()))];
    if let Some((key, value)) = dialog {
        params.push((key, Some(value)));
    }
    page_url("/admin", &params)
}
