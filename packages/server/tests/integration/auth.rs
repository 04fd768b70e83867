use serde_json::json;

use crate::common::{TestApp, routes};

mod registration {
    use super::*;

    #[tokio::test]
    async fn new_user_can_register_with_valid_credentials() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::REGISTER,
                &json!({
                    "email": "alice@example.com",
                    "username": "alice",
                    "password": "securepass",
                    "full_name": "Alice Wonder",
                }),
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert!(res.body["id"].is_number());
        assert_eq!(res.body["email"], "alice@example.com");
        assert_eq!(res.body["username"], "alice");
        assert_eq!(res.body["full_name"], "Alice Wonder");
        assert_eq!(res.body["is_admin"], false);
        assert_eq!(res.body["is_active"], true);
    }

    #[tokio::test]
    async fn response_never_contains_password_material() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::REGISTER,
                &json!({
                    "email": "alice@example.com",
                    "username": "alice",
                    "password": "securepass",
                }),
            )
            .await;

        assert_eq!(res.status, 201);
        assert!(res.body.get("password").is_none());
        assert!(res.body.get("hashed_password").is_none());
        assert!(!res.text.contains("securepass"));
    }

    #[tokio::test]
    async fn cannot_register_with_an_already_taken_email() {
        let app = TestApp::spawn().await;
        app.register_and_login("alice").await;

        let res = app
            .post_without_token(
                routes::REGISTER,
                &json!({
                    "email": "alice@example.com",
                    "username": "different",
                    "password": "securepass",
                }),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "ALREADY_EXISTS");
    }

    #[tokio::test]
    async fn cannot_register_with_an_already_taken_username() {
        let app = TestApp::spawn().await;
        app.register_and_login("alice").await;

        let res = app
            .post_without_token(
                routes::REGISTER,
                &json!({
                    "email": "different@example.com",
                    "username": "alice",
                    "password": "securepass",
                }),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "ALREADY_EXISTS");
    }

    #[tokio::test]
    async fn cannot_register_with_a_password_that_is_too_short() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::REGISTER,
                &json!({
                    "email": "alice@example.com",
                    "username": "alice",
                    "password": "short",
                }),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn cannot_register_with_an_invalid_email() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::REGISTER,
                &json!({
                    "email": "not-an-email",
                    "username": "alice",
                    "password": "securepass",
                }),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn cannot_register_with_an_invalid_username() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::REGISTER,
                &json!({
                    "email": "alice@example.com",
                    "username": "no spaces!",
                    "password": "securepass",
                }),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod login {
    use super::*;

    #[tokio::test]
    async fn registered_user_can_log_in() {
        let app = TestApp::spawn().await;
        app.register_and_login("alice").await;

        let res = app
            .post_form(routes::LOGIN, &[("username", "alice"), ("password", "securepass")])
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert!(res.body["access_token"].is_string());
        assert_eq!(res.body["token_type"], "bearer");
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_username_fail_identically() {
        let app = TestApp::spawn().await;
        app.register_and_login("alice").await;

        let wrong_password = app
            .post_form(routes::LOGIN, &[("username", "alice"), ("password", "wrongpassword")])
            .await;
        let unknown_user = app
            .post_form(
                routes::LOGIN,
                &[("username", "nonexistent"), ("password", "wrongpassword")],
            )
            .await;

        assert_eq!(wrong_password.status, 401);
        assert_eq!(unknown_user.status, 401);
        // No information leak distinguishing the two
        assert_eq!(wrong_password.body["code"], unknown_user.body["code"]);
        assert_eq!(wrong_password.body["message"], unknown_user.body["message"]);
    }

    #[tokio::test]
    async fn token_grants_access_to_protected_endpoints() {
        let app = TestApp::spawn().await;
        let (_, token) = app.register_and_login("alice").await;

        let res = app.get_with_token(routes::ME, &token).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["username"], "alice");
    }

    #[tokio::test]
    async fn missing_or_garbage_token_is_rejected() {
        let app = TestApp::spawn().await;

        let missing = app.get_without_token(routes::ME).await;
        assert_eq!(missing.status, 401);
        assert_eq!(missing.body["code"], "TOKEN_MISSING");

        let garbage = app.get_with_token(routes::ME, "not-a-jwt").await;
        assert_eq!(garbage.status, 401);
        assert_eq!(garbage.body["code"], "TOKEN_INVALID");
    }
}
