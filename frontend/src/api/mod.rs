//! HTTP client used by every page.
//!
//! All requests go through [`ApiClient::send`], which attaches the session
//! headers, classifies the response with `common::api::check_status` and
//! hands every failure to `SessionManager::on_api_error`. When that ends the
//! session (an authenticated call came back unauthorized) the app shell is
//! notified and routes to the login page. Nothing is retried.

use std::rc::Rc;

use common::api::{check_status, decode, ApiError, Endpoint, Method};
use common::config::AppConfig;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use web_sys::FormData;
use yew::Callback;

use crate::session::BrowserSession;

enum Body {
    Empty,
    Json(String),
    Form(FormData),
}

#[derive(Clone)]
pub struct ApiClient {
    config: Rc<AppConfig>,
    session: Rc<BrowserSession>,
    on_unauthorized: Callback<()>,
}

impl PartialEq for ApiClient {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.session, &other.session) && Rc::ptr_eq(&self.config, &other.config)
    }
}

impl ApiClient {
    pub fn new(config: AppConfig, session: Rc<BrowserSession>, on_unauthorized: Callback<()>) -> Self {
        Self {
            config: Rc::new(config),
            session,
            on_unauthorized,
        }
    }

    pub fn session(&self) -> &BrowserSession {
        &self.session
    }

    pub async fn get<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<T, ApiError> {
        let response = self.send(Method::Get, &endpoint, Body::Empty).await?;
        read_json(response).await
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(&self, endpoint: Endpoint, body: &B) -> Result<T, ApiError> {
        let response = self.send(Method::Post, &endpoint, json_body(body)?).await?;
        read_json(response).await
    }

    pub async fn patch<B: Serialize, T: DeserializeOwned>(&self, endpoint: Endpoint, body: &B) -> Result<T, ApiError> {
        let response = self.send(Method::Patch, &endpoint, json_body(body)?).await?;
        read_json(response).await
    }

    pub async fn delete(&self, endpoint: Endpoint) -> Result<(), ApiError> {
        let response = self.send(Method::Delete, &endpoint, Body::Empty).await?;
        read_json::<Value>(response).await.map(|_| ())
    }

    /// Multipart POST. The browser sets the boundary header itself.
    pub async fn upload<T: DeserializeOwned>(&self, endpoint: Endpoint, form: FormData) -> Result<T, ApiError> {
        let response = self.send(Method::Post, &endpoint, Body::Form(form)).await?;
        read_json(response).await
    }

    /// JSON POST answered with a binary file (test renders).
    pub async fn post_for_bytes<B: Serialize>(&self, endpoint: Endpoint, body: &B) -> Result<Vec<u8>, ApiError> {
        let response = self.send(Method::Post, &endpoint, json_body(body)?).await?;
        read_bytes(response).await
    }

    /// Authenticated GET of a binary file (version downloads, exports).
    pub async fn get_bytes(&self, endpoint: Endpoint) -> Result<Vec<u8>, ApiError> {
        let response = self.send(Method::Get, &endpoint, Body::Empty).await?;
        read_bytes(response).await
    }

    async fn send(&self, method: Method, endpoint: &Endpoint, body: Body) -> Result<Response, ApiError> {
        let url = endpoint.url(&self.config.api_base_url);
        let mut builder = match method {
            Method::Get => Request::get(&url),
            Method::Post => Request::post(&url),
            Method::Patch => Request::patch(&url),
            Method::Delete => Request::delete(&url),
        };
        if endpoint.authenticated {
            for (name, value) in self.session.auth_headers() {
                builder = builder.header(name, &value);
            }
        }

        let request = match body {
            Body::Empty => builder.build(),
            Body::Json(json) => builder.header("Content-Type", "application/json").body(json),
            Body::Form(form) => builder.body(form),
        }
        .map_err(|e| ApiError::Network(e.to_string()))?;

        let response = request.send().await.map_err(|e| {
            gloo_console::error!(format!("{} {} failed: {}", method.as_str(), endpoint.path, e));
            ApiError::Network(e.to_string())
        })?;
        if response.ok() {
            return Ok(response);
        }

        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        let Err(err) = check_status(status, &text, endpoint.authenticated) else {
            return Ok(response);
        };
        if self.session.on_api_error(&err) {
            gloo_console::warn!(format!(
                "{} {} returned 401; session ended",
                method.as_str(),
                endpoint.path
            ));
            self.on_unauthorized.emit(());
        } else {
            gloo_console::error!(format!("{} {} -> {}: {}", method.as_str(), endpoint.path, status, err));
        }
        Err(err)
    }
}

fn json_body<B: Serialize>(body: &B) -> Result<Body, ApiError> {
    serde_json::to_string(body)
        .map(Body::Json)
        .map_err(|e| ApiError::Decode(e.to_string()))
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    decode(&text)
}

async fn read_bytes(response: Response) -> Result<Vec<u8>, ApiError> {
    response
        .binary()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))
}
