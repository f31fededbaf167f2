//! API integration tests
//!
//! These exercise a running server and are ignored by default.
//! Run with: cargo test -- --ignored

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080";

// Registration only creates base-level users; admin accounts are provisioned
// out of band. These credentials must exist before running the admin tests.
const ADMIN_EMAIL: &str = "admin@university.edu";
const ADMIN_PASSWORD: &str = "Admin-Passw0rd";

/// Helper: login and return the bearer token
async fn get_auth_token(client: &Client, email: &str, password: &str) -> String {
    let response = client
        .post(format!("{}/user/login", BASE_URL))
        .json(&json!({
            "email": email,
            "password": password
        }))
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["data"]["token"]
        .as_str()
        .expect("No token in response")
        .to_string()
}

/// Helper: register a throwaway user and return (email, token)
async fn register_and_login(client: &Client) -> (String, String) {
    let email = format!(
        "reader{}@university.edu",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    );
    let password = "Reader-Passw0rd";

    let response = client
        .post(format!("{}/user/register", BASE_URL))
        .json(&json!({"email": email, "password": password}))
        .send()
        .await
        .expect("Failed to send register request");
    assert_eq!(response.status(), 201);

    let token = get_auth_token(client, &email, password).await;
    (email, token)
}

#[tokio::test]
#[ignore]
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["status"], "healthy");
    assert_eq!(body["status"], 200);
}

#[tokio::test]
#[ignore]
async fn test_register_rejects_weak_passwords() {
    let client = Client::new();

    // Too short, no digit, no uppercase, no symbol
    for password in ["Ab1!", "Abcdefghij!", "abcdefghi1!", "Abcdefghij1"] {
        let response = client
            .post(format!("{}/user/register", BASE_URL))
            .json(&json!({
                "email": "weak@university.edu",
                "password": password
            }))
            .send()
            .await
            .expect("Failed to send request");

        assert_eq!(response.status(), 400, "password {:?} should be rejected", password);

        let body: Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["status"], 400);
        assert!(body["message"].is_string());
    }
}

#[tokio::test]
#[ignore]
async fn test_register_rejects_bad_email() {
    let client = Client::new();

    let response = client
        .post(format!("{}/user/register", BASE_URL))
        .json(&json!({
            "email": "not-an-email",
            "password": "Reader-Passw0rd"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_duplicate_email_conflicts() {
    let client = Client::new();
    let (email, _token) = register_and_login(&client).await;

    let response = client
        .post(format!("{}/user/register", BASE_URL))
        .json(&json!({"email": email, "password": "Reader-Passw0rd"}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_login_wrong_password_fails() {
    let client = Client::new();
    let (email, _token) = register_and_login(&client).await;

    let response = client
        .post(format!("{}/user/login", BASE_URL))
        .json(&json!({"email": email, "password": "Wrong-Passw0rd"}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_login_yields_matching_access_level() {
    let client = Client::new();
    let (_email, token) = register_and_login(&client).await;

    let response = client
        .get(format!("{}/user/me", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["access_level"], 50);
}

#[tokio::test]
#[ignore]
async fn test_category_create_then_get_returns_same_title() {
    let client = Client::new();
    let (_email, token) = register_and_login(&client).await;

    let title = format!("Philosophy {}", uuid_like());

    let response = client
        .post(format!("{}/book-category", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({"title": title}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let id = body["data"]["id"].as_i64().expect("No category id");

    let response = client
        .get(format!("{}/book-category/{}", BASE_URL, id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["title"], title.as_str());
}

#[tokio::test]
#[ignore]
async fn test_duplicate_category_title_conflicts() {
    let client = Client::new();
    let (_email, token) = register_and_login(&client).await;

    let title = format!("History {}", uuid_like());

    for expected in [201, 409] {
        let response = client
            .post(format!("{}/book-category", BASE_URL))
            .header("Authorization", format!("Bearer {}", token))
            .json(&json!({"title": title}))
            .send()
            .await
            .expect("Failed to send request");

        assert_eq!(response.status(), expected);
    }
}

#[tokio::test]
#[ignore]
async fn test_delete_missing_category_not_found() {
    let client = Client::new();
    let token = get_auth_token(&client, ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let response = client
        .delete(format!("{}/book-category/{}", BASE_URL, i32::MAX))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_delete_requires_admin_level() {
    let client = Client::new();
    let (_email, token) = register_and_login(&client).await;

    let response = client
        .delete(format!("{}/book-category/1", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 403);
}

#[tokio::test]
#[ignore]
async fn test_list_returns_categories_in_storage_order() {
    let client = Client::new();
    let (_email, token) = register_and_login(&client).await;

    let first = format!("Astronomy {}", uuid_like());
    let second = format!("Botany {}", uuid_like());

    for title in [&first, &second] {
        let response = client
            .post(format!("{}/book-category", BASE_URL))
            .header("Authorization", format!("Bearer {}", token))
            .json(&json!({"title": title}))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), 201);
    }

    let response = client
        .get(format!("{}/book-category?per_page=100", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    let items = body["data"]["items"].as_array().expect("No items");

    let ids: Vec<i64> = items.iter().filter_map(|c| c["id"].as_i64()).collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted);
}

#[tokio::test]
#[ignore]
async fn test_unauthenticated_create_rejected() {
    let client = Client::new();

    let response = client
        .post(format!("{}/book-category", BASE_URL))
        .json(&json!({"title": "No Auth"}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_logout_clears_cookie() {
    let client = Client::builder().cookie_store(true).build().unwrap();
    let (_email, _token) = register_and_login(&client).await;

    let response = client
        .post(format!("{}/user/logout", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    // Cookie gone: authenticated route now rejects
    let response = client
        .get(format!("{}/user/me", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

/// Unique-ish suffix for titles so reruns don't collide
fn uuid_like() -> u128 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos()
}
