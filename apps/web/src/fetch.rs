use async_trait::async_trait;
use energy_dashboard::{Fetcher, LoaderError};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

/// Cross-origin GETs through `window.fetch`.
#[derive(Debug, Clone)]
pub struct WebFetcher {
    base_url: String,
}

impl WebFetcher {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

fn js_error(value: &JsValue) -> LoaderError {
    LoaderError::Network(
        value
            .as_string()
            .unwrap_or_else(|| format!("{value:?}")),
    )
}

#[async_trait(?Send)]
impl Fetcher for WebFetcher {
    async fn fetch_text(&self, path: &str) -> Result<String, LoaderError> {
        let window =
            web_sys::window().ok_or_else(|| LoaderError::Network("no window".to_string()))?;

        let opts = RequestInit::new();
        opts.set_method("GET");
        opts.set_mode(RequestMode::Cors);

        let url = self.url(path);
        let request = Request::new_with_str_and_init(&url, &opts).map_err(|e| js_error(&e))?;

        let response_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| js_error(&e))?;
        let response = response_value
            .dyn_into::<Response>()
            .map_err(|e| js_error(&e))?;

        if !response.ok() {
            return Err(LoaderError::Status(response.status()));
        }

        let body = JsFuture::from(response.text().map_err(|e| js_error(&e))?)
            .await
            .map_err(|e| js_error(&e))?;
        body.as_string()
            .ok_or(LoaderError::Shape("response body is not text"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_base_and_path() {
        let fetcher = WebFetcher::new("http://localhost:5000/api/");
        assert_eq!(fetcher.url("/regions"), "http://localhost:5000/api/regions");
    }
}
