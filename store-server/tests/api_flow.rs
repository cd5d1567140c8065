//! 端到端 API 流程测试：注册/登录、购物车、考勤、资料和导出

mod common;

use common::TestServer;
use http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn test_health_is_public() {
    let server = TestServer::new();
    let (status, body) = server.request(Method::GET, "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_register_login_and_fetch_current_user() {
    let server = TestServer::new();
    let (token, user_id) = server.register_and_login("alice@example.com", "customer").await;

    let (status, body) = server
        .request(Method::GET, "/api/auth/user", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["id"], user_id.as_str());
    assert_eq!(body["user"]["email"], "alice@example.com");
    assert_eq!(body["user"]["role"], "customer");
    // 读取响应不带 success 标志
    assert!(body.get("success").is_none());
}

#[tokio::test]
async fn test_duplicate_registration_conflicts() {
    let server = TestServer::new();
    server.register_and_login("dup@example.com", "customer").await;

    let (status, body) = server
        .request(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({
                "email": "dup@example.com",
                "password": "other",
                "name": "Dup",
                "role": "customer",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_protected_route_requires_token() {
    let server = TestServer::new();

    let (status, _) = server.request(Method::GET, "/api/cart", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = server
        .request(Method::GET, "/api/cart", Some("garbage-token"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_cart_add_merges_and_remove_is_idempotent() {
    let server = TestServer::new();
    let (token, _) = server.register_and_login("cart@example.com", "customer").await;

    // 同一商品加两次 → 单条目，数量累加
    server
        .request(
            Method::POST,
            "/api/cart",
            Some(&token),
            Some(json!({"productId": "p1", "quantity": 2})),
        )
        .await;
    let (status, body) = server
        .request(
            Method::POST,
            "/api/cart",
            Some(&token),
            Some(json!({"productId": "p1", "quantity": 3})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["cart"]["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["cart"]["items"][0]["quantity"], 5);

    // 移除不存在的商品 → 幂等成功，购物车不变
    let (status, body) = server
        .request(Method::DELETE, "/api/cart/ghost", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cart"]["items"].as_array().unwrap().len(), 1);

    // 清空
    let (status, body) = server
        .request(Method::DELETE, "/api/cart", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (_, body) = server.request(Method::GET, "/api/cart", Some(&token), None).await;
    assert!(body["cart"]["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_cart_rejects_invalid_quantity() {
    let server = TestServer::new();
    let (token, _) = server.register_and_login("qty@example.com", "customer").await;

    let (status, _) = server
        .request(
            Method::POST,
            "/api/cart",
            Some(&token),
            Some(json!({"productId": "p1", "quantity": 0})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_attendance_state_machine_over_http() {
    let server = TestServer::new();
    let (token, _) = server.register_and_login("emp@example.com", "employee").await;

    // 未上班先下班 → 404
    let (status, _) = server
        .request(Method::POST, "/api/attendance/clock-out", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // 上班打卡
    let (status, body) = server
        .request(Method::POST, "/api/attendance/clock-in", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["attendance"]["clockIn"].is_string());
    assert!(body["attendance"]["clockOut"].is_null());

    // 当日重复上班 → 409
    let (status, _) = server
        .request(Method::POST, "/api/attendance/clock-in", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // 下班打卡 → totalHours 两位小数字符串
    let (status, body) = server
        .request(Method::POST, "/api/attendance/clock-out", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let hours = body["attendance"]["totalHours"].as_str().expect("totalHours");
    assert!(hours.parse::<f64>().is_ok());
    assert_eq!(hours.split('.').nth(1).map(str::len), Some(2));

    // 下班后重复下班 → 409
    let (status, _) = server
        .request(Method::POST, "/api/attendance/clock-out", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_profile_update_allow_list() {
    let server = TestServer::new();
    let (token, _) = server.register_and_login("prof@example.com", "customer").await;

    // name 更新生效
    let (status, body) = server
        .request(
            Method::PUT,
            "/api/profile",
            Some(&token),
            Some(json!({"name": "Renamed"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["name"], "Renamed");
    assert_eq!(body["success"], true);

    // role 不在白名单内 → 请求体被拒绝
    let (status, _) = server
        .request(
            Method::PUT,
            "/api/profile",
            Some(&token),
            Some(json!({"role": "owner"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // role 保持不变
    let (_, body) = server
        .request(Method::GET, "/api/auth/user", Some(&token), None)
        .await;
    assert_eq!(body["user"]["role"], "customer");
}

#[tokio::test]
async fn test_photo_upload_and_public_fetch() {
    let server = TestServer::new();
    let (token, user_id) = server.register_and_login("photo@example.com", "customer").await;

    // PNG 魔数足够当测试图片
    let image = "data:image/png;base64,iVBORw0KGgo=";
    let (status, body) = server
        .request(
            Method::POST,
            "/api/profile/photo",
            Some(&token),
            Some(json!({"imageData": image, "fileName": "avatar.png"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let photo_url = body["photoUrl"].as_str().expect("photoUrl");
    assert_eq!(photo_url, format!("/api/profiles/{user_id}/avatar.png"));

    // 头像 URL 写回用户记录
    let (_, body) = server
        .request(Method::GET, "/api/auth/user", Some(&token), None)
        .await;
    assert_eq!(body["user"]["profilePhoto"], photo_url);

    // 文件读取是公共路由
    let (status, _) = server.request(Method::GET, photo_url, None, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = server
        .request(
            Method::GET,
            &format!("/api/profiles/{user_id}/missing.png"),
            None,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_user_export_returns_xlsx_base64() {
    let server = TestServer::new();
    let (owner, _) = server.register_and_login("boss@example.com", "owner").await;

    let (status, body) = server
        .request(Method::GET, "/api/export/users", Some(&owner), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["fileName"], "users.xlsx");

    // data 是合法 base64 且解码后以 PK 魔数开头 (zip 容器)
    use base64::Engine;
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(body["data"].as_str().expect("data"))
        .expect("base64");
    assert_eq!(&bytes[..2], b"PK");
}
