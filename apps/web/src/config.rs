use energy_dashboard::catalog::DEFAULT_API_BASE;
use web_sys::UrlSearchParams;

/// Query parameter overriding the API base, e.g. `?api=http://grid.local/api`.
pub const API_PARAM: &str = "api";

pub fn api_base_from(param: Option<String>) -> String {
    param
        .map(|base| base.trim().trim_end_matches('/').to_string())
        .filter(|base| !base.is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
}

/// API base for this page load.
pub fn api_base() -> String {
    let param = web_sys::window()
        .and_then(|window| window.location().search().ok())
        .and_then(|search| UrlSearchParams::new_with_str(&search).ok())
        .and_then(|params| params.get(API_PARAM));
    api_base_from(param)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_overrides_default() {
        assert_eq!(api_base_from(None), DEFAULT_API_BASE);
        assert_eq!(api_base_from(Some("  ".to_string())), DEFAULT_API_BASE);
        assert_eq!(
            api_base_from(Some("https://grid.example/api/".to_string())),
            "https://grid.example/api"
        );
    }
}
