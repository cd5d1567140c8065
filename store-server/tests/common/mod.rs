//! 集成测试公共设施
//!
//! 基于内存 KV 构建完整的路由栈，通过 `oneshot` 发送请求，
//! 不占用端口、不落盘 (头像除外，落在 tempdir)。

use axum::Router;
use axum::body::Body;
use http::{Method, Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use store_server::auth::JwtConfig;
use store_server::core::{Config, ServerState, build_router};

pub struct TestServer {
    router: Router,
    // 持有 tempdir，生命周期与测试一致
    _profiles: tempfile::TempDir,
}

impl TestServer {
    pub fn new() -> Self {
        let profiles = tempfile::tempdir().expect("tempdir");
        let config = Config {
            work_dir: profiles.path().display().to_string(),
            http_port: 0,
            jwt: JwtConfig {
                secret: "integration-test-secret-integration-test".to_string(),
                expiration_minutes: 60,
                issuer: "store-server".to_string(),
                audience: "store-clients".to_string(),
            },
            environment: "test".to_string(),
            timezone: chrono_tz::UTC,
        };
        let state = ServerState::in_memory(config, profiles.path().to_path_buf());

        Self {
            router: build_router(state),
            _profiles: profiles,
        }
    }

    /// 发送一个请求，返回 (状态码, JSON body)
    ///
    /// 非 JSON 响应体以字符串形式返回。
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&json).expect("serialize")))
                .expect("request"),
            None => builder.body(Body::empty()).expect("request"),
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router response");
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        (status, value)
    }

    /// 注册并登录一个用户，返回 (bearer 令牌, 用户 ID)
    pub async fn register_and_login(&self, email: &str, role: &str) -> (String, String) {
        let (status, body) = self
            .request(
                Method::POST,
                "/api/auth/register",
                None,
                Some(json!({
                    "email": email,
                    "password": "secret123",
                    "name": email.split('@').next().unwrap_or("user"),
                    "role": role,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "register failed: {body}");

        let (status, body) = self
            .request(
                Method::POST,
                "/api/auth/login",
                None,
                Some(json!({"email": email, "password": "secret123"})),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");

        let token = body["accessToken"].as_str().expect("accessToken").to_string();
        let user_id = body["user"]["id"].as_str().expect("user id").to_string();
        (token, user_id)
    }
}
