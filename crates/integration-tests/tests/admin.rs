//! Integration tests for the admin panel.
//!
//! These tests require:
//! - A migrated `PostgreSQL` database (`tb-cli migrate`)
//! - The admin server running on `ADMIN_BASE_URL`
//! - An admin account, passed as `TB_TEST_ADMIN_EMAIL` / `TB_TEST_ADMIN_PASSWORD`

#![allow(clippy::unwrap_used)]

use reqwest::{Client, StatusCode, header};

use tudobacana_admin::middleware::SESSION_COOKIE_NAME;
use tudobacana_core::Price;
use tudobacana_integration_tests::{admin_base_url, admin_credentials, client};

/// Log in and return a client holding the session cookie.
async fn logged_in_client() -> Client {
    let (email, password) =
        admin_credentials().expect("TB_TEST_ADMIN_EMAIL and TB_TEST_ADMIN_PASSWORD must be set");
    let client = client().expect("Failed to create HTTP client");

    let resp = client
        .post(format!("{}/auth", admin_base_url()))
        .form(&[("email", email.as_str()), ("password", password.as_str())])
        .send()
        .await
        .expect("Failed to log in");

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()[header::LOCATION], "/produtos");
    client
}

#[tokio::test]
#[ignore = "Requires running admin server"]
async fn test_panel_redirects_to_login_without_session() {
    let resp = client()
        .unwrap()
        .get(format!("{}/produtos", admin_base_url()))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()[header::LOCATION], "/auth");
}

#[tokio::test]
#[ignore = "Requires running admin server"]
async fn test_session_check_without_session() {
    let resp = client()
        .unwrap()
        .get(format!("{}/api/session", admin_base_url()))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(resp.headers()["hx-redirect"], "/auth");
}

#[tokio::test]
#[ignore = "Requires running admin server"]
async fn test_wrong_password_is_rejected() {
    let resp = client()
        .unwrap()
        .post(format!("{}/auth", admin_base_url()))
        .form(&[("email", "ninguem@tudobacana.com"), ("password", "senha-errada")])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(resp.text().await.unwrap().contains("E-mail ou senha inválidos"));
}

#[tokio::test]
#[ignore = "Requires running admin server and an admin account"]
async fn test_login_sets_session_cookie_and_logout_ends_it() {
    let (email, password) = admin_credentials().expect("admin credentials");
    let client = client().unwrap();
    let base_url = admin_base_url();

    let resp = client
        .post(format!("{base_url}/auth"))
        .form(&[("email", email.as_str()), ("password", password.as_str())])
        .send()
        .await
        .unwrap();
    let cookie = resp.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(cookie.starts_with(SESSION_COOKIE_NAME));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Strict"));

    let check = client.get(format!("{base_url}/api/session")).send().await.unwrap();
    assert_eq!(check.status(), StatusCode::NO_CONTENT);

    client.post(format!("{base_url}/auth/sair")).send().await.unwrap();

    let check = client.get(format!("{base_url}/api/session")).send().await.unwrap();
    assert_eq!(check.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running admin server and an admin account"]
async fn test_product_create_then_delete() {
    let client = logged_in_client().await;
    let base_url = admin_base_url();
    let name = format!("Teste Integração {}", std::process::id());

    let resp = client
        .post(format!("{base_url}/produtos"))
        .form(&[
            ("name", name.as_str()),
            ("price", "125.5"),
            ("category", "Outros"),
            ("custom_category", "Luminárias"),
            ("image_url", ""),
            ("description", ""),
        ])
        .send()
        .await
        .expect("Failed to create product");
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let html = client
        .get(format!("{base_url}/produtos"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains(&name));
    assert!(html.contains("Luminárias"));
    assert!(html.contains(&Price::parse("125.5").unwrap().to_string()));

    // The edit link follows the product name in its table row
    let id = html
        .split_once(name.as_str())
        .and_then(|(_, row)| row.split_once("/produtos/"))
        .and_then(|(_, rest)| rest.split('/').next())
        .expect("product id in table")
        .to_string();

    let cancelled = client
        .post(format!("{base_url}/produtos/{id}/excluir"))
        .header("HX-Request", "true")
        .send()
        .await
        .unwrap();
    assert_eq!(cancelled.status(), StatusCode::NO_CONTENT);

    let deleted = client
        .post(format!("{base_url}/produtos/{id}/excluir"))
        .header("HX-Request", "true")
        .form(&[("confirmar", "sim")])
        .send()
        .await
        .unwrap();
    assert_eq!(deleted.status(), StatusCode::OK);
    let fragment = deleted.text().await.unwrap();
    assert!(fragment.contains("Produto excluído!"));
    assert!(!fragment.contains(&name));
}
