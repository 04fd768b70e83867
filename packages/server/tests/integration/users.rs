use serde_json::json;

use crate::common::{TestApp, routes};

mod profile {
    use super::*;

    #[tokio::test]
    async fn me_returns_the_current_user_without_password_material() {
        let app = TestApp::spawn().await;
        let (id, token) = app.register_and_login("alice").await;

        let res = app.get_with_token(routes::ME, &token).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["id"], id);
        assert_eq!(res.body["email"], "alice@example.com");
        assert_eq!(res.body["username"], "alice");
        assert!(res.body.get("hashed_password").is_none());
    }

    #[tokio::test]
    async fn update_me_changes_only_supplied_fields() {
        let app = TestApp::spawn().await;
        let (_, token) = app.register_and_login("alice").await;

        let res = app
            .put_with_token(routes::ME, &json!({"full_name": "Updated Name"}), &token)
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["full_name"], "Updated Name");
        // Untouched fields survive
        assert_eq!(res.body["email"], "alice@example.com");
        assert_eq!(res.body["username"], "alice");

        // And the change persisted
        let me = app.get_with_token(routes::ME, &token).await;
        assert_eq!(me.body["full_name"], "Updated Name");
    }

    #[tokio::test]
    async fn password_update_is_rehashed_and_usable() {
        let app = TestApp::spawn().await;
        let (_, token) = app.register_and_login("alice").await;

        let res = app
            .put_with_token(routes::ME, &json!({"password": "newsecurepass"}), &token)
            .await;
        assert_eq!(res.status, 200, "{}", res.text);

        let old = app
            .post_form(routes::LOGIN, &[("username", "alice"), ("password", "securepass")])
            .await;
        assert_eq!(old.status, 401);

        app.login("alice", "newsecurepass").await;
    }

    #[tokio::test]
    async fn cannot_take_another_users_email_via_update() {
        let app = TestApp::spawn().await;
        app.register_and_login("alice").await;
        let (_, bob_token) = app.register_and_login("bob").await;

        let res = app
            .put_with_token(routes::ME, &json!({"email": "alice@example.com"}), &bob_token)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "ALREADY_EXISTS");
    }
}

mod visibility {
    use super::*;

    #[tokio::test]
    async fn user_can_fetch_itself_by_id() {
        let app = TestApp::spawn().await;
        let (id, token) = app.register_and_login("alice").await;

        let res = app.get_with_token(&routes::user(id), &token).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["username"], "alice");
    }

    #[tokio::test]
    async fn another_users_id_reads_as_absent_even_when_it_exists() {
        let app = TestApp::spawn().await;
        let (alice_id, _) = app.register_and_login("alice").await;
        let (_, bob_token) = app.register_and_login("bob").await;

        // Existing foreign id and a nonexistent id are indistinguishable
        let existing = app.get_with_token(&routes::user(alice_id), &bob_token).await;
        let missing = app.get_with_token(&routes::user(99999), &bob_token).await;

        assert_eq!(existing.status, 404);
        assert_eq!(missing.status, 404);
        assert_eq!(existing.body["code"], "NOT_FOUND");
        assert_eq!(existing.body["message"], missing.body["message"]);
    }

    #[tokio::test]
    async fn admin_can_fetch_any_user() {
        let app = TestApp::spawn().await;
        let (alice_id, _) = app.register_and_login("alice").await;
        let (_, admin_token) = app.spawn_admin("root").await;

        let res = app.get_with_token(&routes::user(alice_id), &admin_token).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["username"], "alice");

        let missing = app.get_with_token(&routes::user(99999), &admin_token).await;
        assert_eq!(missing.status, 404);
    }
}

mod listing {
    use super::*;

    #[tokio::test]
    async fn admin_can_list_all_users() {
        let app = TestApp::spawn().await;
        app.register_and_login("alice").await;
        app.register_and_login("bob").await;
        let (_, admin_token) = app.spawn_admin("root").await;

        let res = app.get_with_token(routes::USERS, &admin_token).await;

        assert_eq!(res.status, 200, "{}", res.text);
        let users = res.body.as_array().expect("expected a plain array");
        assert_eq!(users.len(), 3);
        assert!(users.iter().all(|u| u.get("hashed_password").is_none()));
    }

    #[tokio::test]
    async fn regular_user_cannot_list_users() {
        let app = TestApp::spawn().await;
        let (_, token) = app.register_and_login("alice").await;

        let res = app.get_with_token(routes::USERS, &token).await;

        assert_eq!(res.status, 403);
        assert_eq!(res.body["code"], "PERMISSION_DENIED");
    }
}
