//! Unit and router-level tests for the auth crate
//!
//! Use cases run against a `sqlite::memory:` pool with the real migrations
//! and the in-memory session registry; router tests drive the axum router
//! through `tower::ServiceExt::oneshot`.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::application::{
    CheckSessionUseCase, SignInInput, SignInUseCase, SignOutUseCase, SignUpInput, SignUpUseCase,
    UpdateUserInput, UserAdminUseCase,
};
use crate::domain::entity::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{UserName, UserRole};
use crate::error::AuthError;
use crate::infra::memory::MemorySessionRegistry;
use crate::infra::sqlite::SqliteUserRepository;

async fn test_pool() -> SqlitePool {
    // A single connection keeps the in-memory database alive and shared
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");

    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await
        .expect("migrations");

    pool
}

fn test_env(pool: &SqlitePool) -> (Arc<SqliteUserRepository>, Arc<MemorySessionRegistry>, Arc<AuthConfig>) {
    (
        Arc::new(SqliteUserRepository::new(pool.clone())),
        Arc::new(MemorySessionRegistry::new()),
        Arc::new(AuthConfig::with_random_secret()),
    )
}

async fn seed_admin(users: &SqliteUserRepository, username: &str, password: &str) {
    let hash = ClearTextPassword::new(password.to_string())
        .unwrap()
        .hash(None)
        .unwrap();
    let system = UserName::new("system").unwrap();
    let user = User::created_by_admin(
        UserName::new(username).unwrap(),
        hash,
        UserRole::Admin,
        &system,
    );
    users.create(&user).await.unwrap();
}

async fn audit_count(pool: &SqlitePool) -> i64 {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM audit_log")
        .fetch_one(pool)
        .await
        .unwrap();
    count
}

mod use_case_tests {
    use super::*;

    #[tokio::test]
    async fn test_register_login_validate_roundtrip() {
        let pool = test_pool().await;
        let (users, sessions, config) = test_env(&pool);

        let sign_up = SignUpUseCase::new(users.clone(), config.clone());
        let output = sign_up
            .execute(SignUpInput {
                username: "alice".into(),
                password: "pw1".into(),
                request_admin: false,
            })
            .await
            .unwrap();
        assert_eq!(output.username, "alice");
        assert_eq!(output.role, UserRole::Member);

        let sign_in = SignInUseCase::new(users.clone(), sessions.clone(), config.clone());
        let login = sign_in
            .execute(SignInInput {
                username: "alice".into(),
                password: "pw1".into(),
                remember: false,
            })
            .await
            .unwrap();
        assert_eq!(login.role, UserRole::Member);

        let check = CheckSessionUseCase::new(sessions.clone(), config.clone());
        let session = check.execute(&login.token).await.unwrap();
        assert_eq!(session.username.as_str(), "alice");
        assert_eq!(session.role, UserRole::Member);
        assert_eq!(session.expires_at_ms, login.expires_at_ms);
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let pool = test_pool().await;
        let (users, sessions, config) = test_env(&pool);

        SignUpUseCase::new(users.clone(), config.clone())
            .execute(SignUpInput {
                username: "bob".into(),
                password: "right".into(),
                request_admin: false,
            })
            .await
            .unwrap();

        let sign_in = SignInUseCase::new(users.clone(), sessions.clone(), config.clone());

        let unknown = sign_in
            .execute(SignInInput {
                username: "nobody".into(),
                password: "whatever".into(),
                remember: false,
            })
            .await
            .unwrap_err();
        let wrong = sign_in
            .execute(SignInInput {
                username: "bob".into(),
                password: "wrong".into(),
                remember: false,
            })
            .await
            .unwrap_err();

        assert!(matches!(unknown, AuthError::InvalidCredentials));
        assert!(matches!(wrong, AuthError::InvalidCredentials));
        assert_eq!(unknown.to_string(), wrong.to_string());
    }

    #[tokio::test]
    async fn test_duplicate_registration_is_conflict() {
        let pool = test_pool().await;
        let (users, sessions, config) = test_env(&pool);

        let sign_up = SignUpUseCase::new(users.clone(), config.clone());
        let input = || SignUpInput {
            username: "alice".into(),
            password: "first".into(),
            request_admin: false,
        };

        sign_up.execute(input()).await.unwrap();
        let err = sign_up
            .execute(SignUpInput {
                username: "alice".into(),
                password: "second".into(),
                request_admin: false,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UserNameTaken));

        // The first registration still works
        let login = SignInUseCase::new(users.clone(), sessions.clone(), config.clone())
            .execute(SignInInput {
                username: "alice".into(),
                password: "first".into(),
                remember: false,
            })
            .await;
        assert!(login.is_ok());
    }

    #[tokio::test]
    async fn test_concurrent_registrations_have_one_winner() {
        let pool = test_pool().await;
        let (users, _sessions, config) = test_env(&pool);

        let a = {
            let users = users.clone();
            let config = config.clone();
            tokio::spawn(async move {
                SignUpUseCase::new(users, config)
                    .execute(SignUpInput {
                        username: "race".into(),
                        password: "pw-a".into(),
                        request_admin: false,
                    })
                    .await
            })
        };
        let b = {
            let users = users.clone();
            let config = config.clone();
            tokio::spawn(async move {
                SignUpUseCase::new(users, config)
                    .execute(SignUpInput {
                        username: "race".into(),
                        password: "pw-b".into(),
                        request_admin: false,
                    })
                    .await
            })
        };

        let results = [a.await.unwrap(), b.await.unwrap()];
        let winners = results.iter().filter(|r| r.is_ok()).count();
        let conflicts = results
            .iter()
            .filter(|r| matches!(r, Err(AuthError::UserNameTaken)))
            .count();
        assert_eq!(winners, 1);
        assert_eq!(conflicts, 1);
    }

    #[tokio::test]
    async fn test_register_rejects_empty_fields() {
        let pool = test_pool().await;
        let (users, _sessions, config) = test_env(&pool);
        let sign_up = SignUpUseCase::new(users, config);

        let err = sign_up
            .execute(SignUpInput {
                username: "".into(),
                password: "pw".into(),
                request_admin: false,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidInput(_)));

        let err = sign_up
            .execute(SignUpInput {
                username: "carol".into(),
                password: "".into(),
                request_admin: false,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_request_admin_flag_confers_nothing() {
        let pool = test_pool().await;
        let (users, sessions, config) = test_env(&pool);

        let output = SignUpUseCase::new(users.clone(), config.clone())
            .execute(SignUpInput {
                username: "hopeful".into(),
                password: "pw".into(),
                request_admin: true,
            })
            .await
            .unwrap();
        assert_eq!(output.role, UserRole::Member);
        assert!(output.request_admin);

        let login = SignInUseCase::new(users, sessions.clone(), config.clone())
            .execute(SignInInput {
                username: "hopeful".into(),
                password: "pw".into(),
                remember: false,
            })
            .await
            .unwrap();
        assert_eq!(login.role, UserRole::Member);
    }

    #[tokio::test]
    async fn test_expired_session_is_evicted_at_use() {
        let pool = test_pool().await;
        let users = Arc::new(SqliteUserRepository::new(pool.clone()));
        let sessions = Arc::new(MemorySessionRegistry::new());
        let config = Arc::new(AuthConfig {
            session_ttl_short: StdDuration::ZERO,
            ..AuthConfig::with_random_secret()
        });

        SignUpUseCase::new(users.clone(), config.clone())
            .execute(SignUpInput {
                username: "alice".into(),
                password: "pw1".into(),
                request_admin: false,
            })
            .await
            .unwrap();

        let login = SignInUseCase::new(users, sessions.clone(), config.clone())
            .execute(SignInInput {
                username: "alice".into(),
                password: "pw1".into(),
                remember: false,
            })
            .await
            .unwrap();

        tokio::time::sleep(StdDuration::from_millis(10)).await;

        let check = CheckSessionUseCase::new(sessions.clone(), config.clone());

        // First use after expiry reports the expiry and evicts
        let err = check.execute(&login.token).await.unwrap_err();
        assert!(matches!(err, AuthError::SessionExpired));
        assert!(sessions.is_empty().await);

        // Second use fails like any unknown token
        let err = check.execute(&login.token).await.unwrap_err();
        assert!(matches!(err, AuthError::Unauthorized));
    }

    #[tokio::test]
    async fn test_sign_out_revokes_session() {
        let pool = test_pool().await;
        let (users, sessions, config) = test_env(&pool);

        SignUpUseCase::new(users.clone(), config.clone())
            .execute(SignUpInput {
                username: "alice".into(),
                password: "pw1".into(),
                request_admin: false,
            })
            .await
            .unwrap();

        let login = SignInUseCase::new(users, sessions.clone(), config.clone())
            .execute(SignInInput {
                username: "alice".into(),
                password: "pw1".into(),
                remember: false,
            })
            .await
            .unwrap();

        SignOutUseCase::new(sessions.clone(), config.clone())
            .execute(&login.token)
            .await
            .unwrap();

        let err = CheckSessionUseCase::new(sessions, config)
            .execute(&login.token)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Unauthorized));
    }

    #[tokio::test]
    async fn test_session_role_is_snapshotted_at_login() {
        let pool = test_pool().await;
        let (users, sessions, config) = test_env(&pool);
        seed_admin(&users, "root", "root-pw").await;

        SignUpUseCase::new(users.clone(), config.clone())
            .execute(SignUpInput {
                username: "carol".into(),
                password: "pw".into(),
                request_admin: false,
            })
            .await
            .unwrap();

        let login = SignInUseCase::new(users.clone(), sessions.clone(), config.clone())
            .execute(SignInInput {
                username: "carol".into(),
                password: "pw".into(),
                remember: false,
            })
            .await
            .unwrap();

        // Promote carol after her session was issued
        let admin = UserAdminUseCase::new(users.clone(), config.clone());
        let actor = UserName::new("root").unwrap();
        admin
            .update(
                &actor,
                "carol",
                UpdateUserInput {
                    password: None,
                    role: Some(UserRole::Editor),
                },
            )
            .await
            .unwrap();

        // The live session still carries the role from login time
        let session = CheckSessionUseCase::new(sessions, config)
            .execute(&login.token)
            .await
            .unwrap();
        assert_eq!(session.role, UserRole::Member);

        // The stored account did change
        let stored = users
            .find_by_username(&UserName::new("carol").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.role, UserRole::Editor);
    }

    #[tokio::test]
    async fn test_admin_update_validations() {
        let pool = test_pool().await;
        let (users, _sessions, config) = test_env(&pool);
        seed_admin(&users, "root", "root-pw").await;
        let actor = UserName::new("root").unwrap();

        let admin = UserAdminUseCase::new(users, config);

        let err = admin
            .update(&actor, "ghost", UpdateUserInput {
                password: None,
                role: Some(UserRole::Editor),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UserNotFound));

        let err = admin
            .update(&actor, "root", UpdateUserInput::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_delete_appends_exactly_one_audit_entry() {
        let pool = test_pool().await;
        let (users, _sessions, config) = test_env(&pool);
        seed_admin(&users, "root", "root-pw").await;
        let actor = UserName::new("root").unwrap();

        SignUpUseCase::new(users.clone(), config.clone())
            .execute(SignUpInput {
                username: "victim".into(),
                password: "pw".into(),
                request_admin: false,
            })
            .await
            .unwrap();

        let admin = UserAdminUseCase::new(users.clone(), config);

        admin.delete(&actor, "victim").await.unwrap();
        assert_eq!(audit_count(&pool).await, 1);

        let listed = admin.list().await.unwrap();
        assert!(listed.iter().all(|u| u.username != "victim"));

        // Deleting a nonexistent user is NotFound and audits nothing
        let err = admin.delete(&actor, "victim").await.unwrap_err();
        assert!(matches!(err, AuthError::UserNotFound));
        assert_eq!(audit_count(&pool).await, 1);

        let (action, target, recorded_actor): (String, String, String) =
            sqlx::query_as("SELECT action, target, actor FROM audit_log LIMIT 1")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(action, "user.delete");
        assert_eq!(target, "victim");
        assert_eq!(recorded_actor, "root");
    }

    #[tokio::test]
    async fn test_listing_never_contains_password_material() {
        let pool = test_pool().await;
        let (users, _sessions, config) = test_env(&pool);
        seed_admin(&users, "root", "root-pw").await;

        let listed = UserAdminUseCase::new(users, config).list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].username, "root");
        assert_eq!(listed[0].role, UserRole::Admin);
        assert_eq!(listed[0].created_by.as_deref(), Some("system"));
    }

    #[tokio::test]
    async fn test_remember_me_stretches_expiry() {
        let pool = test_pool().await;
        let (users, sessions, config) = test_env(&pool);

        SignUpUseCase::new(users.clone(), config.clone())
            .execute(SignUpInput {
                username: "alice".into(),
                password: "pw1".into(),
                request_admin: false,
            })
            .await
            .unwrap();

        let sign_in = SignInUseCase::new(users, sessions, config.clone());
        let short = sign_in
            .execute(SignInInput {
                username: "alice".into(),
                password: "pw1".into(),
                remember: false,
            })
            .await
            .unwrap();
        let long = sign_in
            .execute(SignInInput {
                username: "alice".into(),
                password: "pw1".into(),
                remember: true,
            })
            .await
            .unwrap();

        // 30 days vs 8 hours; allow generous slack for test runtime
        let gap_ms = long.expires_at_ms - short.expires_at_ms;
        let expected_ms = config.session_ttl_long_ms() - config.session_ttl_short_ms();
        assert!((gap_ms - expected_ms).abs() < 5_000);
    }
}

mod router_tests {
    use super::*;

    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn test_app() -> (Router, SqlitePool) {
        let pool = test_pool().await;
        let (users, sessions, config) = test_env(&pool);
        seed_admin(&users, "root", "root-pw").await;

        let app = crate::presentation::router::auth_router(users, sessions, config);
        (app, pool)
    }

    fn request(
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn login(app: &Router, username: &str, password: &str) -> String {
        let response = app
            .clone()
            .oneshot(request(
                "POST",
                "/login",
                None,
                Some(json!({"username": username, "password": password})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        body_json(response).await["token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_register_login_validate_over_http() {
        let (app, _pool) = test_app().await;

        let response = app
            .clone()
            .oneshot(request(
                "POST",
                "/register",
                None,
                Some(json!({"username": "alice", "password": "pw1"})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["username"], "alice");
        assert_eq!(body["role"], "member");
        assert_eq!(body["requestAdmin"], false);

        let token = login(&app, "alice", "pw1").await;

        let response = app
            .clone()
            .oneshot(request("GET", "/validate", Some(&token), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["username"], "alice");
        assert_eq!(body["role"], "member");
        assert!(body["expiresAt"].as_i64().unwrap() > 0);
    }

    #[tokio::test]
    async fn test_validate_rejects_bad_tokens() {
        let (app, _pool) = test_app().await;

        // No header
        let response = app
            .clone()
            .oneshot(request("GET", "/validate", None, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        // Garbage token
        let response = app
            .clone()
            .oneshot(request("GET", "/validate", Some("not.a-token"), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_user_same_shape() {
        let (app, _pool) = test_app().await;

        let wrong = app
            .clone()
            .oneshot(request(
                "POST",
                "/login",
                None,
                Some(json!({"username": "root", "password": "nope"})),
            ))
            .await
            .unwrap();
        let unknown = app
            .clone()
            .oneshot(request(
                "POST",
                "/login",
                None,
                Some(json!({"username": "ghost", "password": "nope"})),
            ))
            .await
            .unwrap();

        assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(wrong).await, body_json(unknown).await);
    }

    #[tokio::test]
    async fn test_duplicate_registration_conflict_over_http() {
        let (app, _pool) = test_app().await;

        let body = json!({"username": "dup", "password": "pw"});
        let first = app
            .clone()
            .oneshot(request("POST", "/register", None, Some(body.clone())))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::CREATED);

        let second = app
            .clone()
            .oneshot(request("POST", "/register", None, Some(body)))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_user_management_requires_admin() {
        let (app, _pool) = test_app().await;

        // Anonymous
        let response = app
            .clone()
            .oneshot(request("GET", "/users", None, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        // Member
        app.clone()
            .oneshot(request(
                "POST",
                "/register",
                None,
                Some(json!({"username": "alice", "password": "pw1"})),
            ))
            .await
            .unwrap();
        let member_token = login(&app, "alice", "pw1").await;
        let response = app
            .clone()
            .oneshot(request("GET", "/users", Some(&member_token), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        // Admin
        let admin_token = login(&app, "root", "root-pw").await;
        let response = app
            .clone()
            .oneshot(request("GET", "/users", Some(&admin_token), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let names: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|u| u["username"].as_str().unwrap())
            .collect();
        assert!(names.contains(&"root"));
        assert!(names.contains(&"alice"));
        // Listing carries no password material
        assert!(body[0].get("password").is_none());
        assert!(body[0].get("passwordHash").is_none());
    }

    #[tokio::test]
    async fn test_admin_user_crud_over_http() {
        let (app, pool) = test_app().await;
        let admin_token = login(&app, "root", "root-pw").await;

        // Create an editor
        let response = app
            .clone()
            .oneshot(request(
                "POST",
                "/users",
                Some(&admin_token),
                Some(json!({"username": "ed", "password": "ed-pw", "role": "editor"})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["role"], "editor");

        // Unknown role is invalid input
        let response = app
            .clone()
            .oneshot(request(
                "POST",
                "/users",
                Some(&admin_token),
                Some(json!({"username": "x", "password": "pw", "role": "overlord"})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        // Promote
        let response = app
            .clone()
            .oneshot(request(
                "PUT",
                "/users/ed",
                Some(&admin_token),
                Some(json!({"role": "admin"})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["role"], "admin");

        // Update of a missing user is 404
        let response = app
            .clone()
            .oneshot(request(
                "PUT",
                "/users/ghost",
                Some(&admin_token),
                Some(json!({"role": "member"})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        // Delete, with its audit side effect
        let response = app
            .clone()
            .oneshot(request("DELETE", "/users/ed", Some(&admin_token), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            body_json(response)
                .await["message"]
                .as_str()
                .unwrap()
                .contains("ed")
        );
        assert_eq!(audit_count(&pool).await, 1);

        let response = app
            .clone()
            .oneshot(request("DELETE", "/users/ed", Some(&admin_token), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(audit_count(&pool).await, 1);
    }

    #[tokio::test]
    async fn test_logout_over_http() {
        let (app, _pool) = test_app().await;
        app.clone()
            .oneshot(request(
                "POST",
                "/register",
                None,
                Some(json!({"username": "alice", "password": "pw1"})),
            ))
            .await
            .unwrap();
        let token = login(&app, "alice", "pw1").await;

        let response = app
            .clone()
            .oneshot(request("POST", "/logout", Some(&token), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .clone()
            .oneshot(request("GET", "/validate", Some(&token), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
