//! End-to-end dispatch scenarios against the mock backend.

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use openverse_dispatch::RequestEnvelope;
    use openverse_routes::{DispatchErrorCode, HttpMethod, ServiceId, UsersRoute};

    use crate::{CannedResponse, MockBackend, backend_client};

    #[tokio::test]
    async fn test_should_create_user_and_return_success_envelope() {
        let backend = MockBackend::spawn(|req| {
            assert_eq!(req.path, "/users/create");
            CannedResponse::json(201, &json!({"id": "u1"}))
        })
        .await;
        let client = backend_client(&backend);

        let envelope = RequestEnvelope::new()
            .with_field("login", "alice")
            .with_field("name", "Alice")
            .with_field("password", "p@ss")
            .with_field("email", "a@example.com");

        let response = client
            .send(
                ServiceId::Users,
                UsersRoute::CreateUser,
                HttpMethod::Post,
                envelope,
            )
            .await
            .unwrap();

        assert!(response.is_success());
        assert_eq!(response.status_code(), 201);
        assert_eq!(response.payload().unwrap()["id"], json!("u1"));

        let seen = backend.last_request();
        assert_eq!(seen.method, "POST");
        assert_eq!(seen.body_json()["login"], json!("alice"));
    }

    #[tokio::test]
    async fn test_should_substitute_path_and_fold_not_found_into_error_envelope() {
        let backend = MockBackend::spawn(|_| {
            CannedResponse::json(404, &json!({"detail": "Not found"}))
        })
        .await;
        let client = backend_client(&backend);

        let response = client
            .send(
                ServiceId::Users,
                UsersRoute::GetUserById,
                HttpMethod::Get,
                RequestEnvelope::new().with_path_param("id", "42"),
            )
            .await
            .unwrap();

        assert!(!response.is_success());
        assert_eq!(response.message(), Some("Not found"));
        assert_eq!(response.status_code(), 404);

        let seen = backend.last_request();
        assert_eq!(seen.path, "/users/42");
        assert!(!seen.path.contains('{'));
    }

    #[tokio::test]
    async fn test_should_reject_method_mismatch_before_touching_backend() {
        let backend = MockBackend::spawn(|_| CannedResponse::json(200, &json!({}))).await;
        let client = backend_client(&backend);

        let err = client
            .send(
                ServiceId::Users,
                UsersRoute::CreateUser,
                HttpMethod::Get,
                RequestEnvelope::new(),
            )
            .await
            .unwrap_err();

        assert_eq!(err.code, DispatchErrorCode::MethodMismatch);
        assert!(err.message.contains("GET"));
        assert!(err.message.contains("POST"));
        assert!(backend.requests().is_empty(), "no network call expected");
    }

    #[tokio::test]
    async fn test_should_time_out_and_keep_client_usable() {
        let backend = MockBackend::spawn(|req| {
            if req.path == "/health" {
                CannedResponse::json(200, &json!({"status": "ok"}))
            } else {
                CannedResponse::json(200, &json!({}))
                    .with_delay(Duration::from_millis(500))
            }
        })
        .await;
        let client = backend_client(&backend);

        let err = client
            .send(
                ServiceId::Users,
                UsersRoute::LogIn,
                HttpMethod::Post,
                RequestEnvelope::new()
                    .with_field("login", "alice")
                    .with_timeout(Duration::from_millis(100)),
            )
            .await
            .unwrap_err();

        assert_eq!(err.code, DispatchErrorCode::RequestTimeout);
        assert_eq!(err.status_code, http::StatusCode::GATEWAY_TIMEOUT);

        // The shared connection survives the aborted call.
        let response = client
            .send(
                ServiceId::Users,
                UsersRoute::Health,
                HttpMethod::Get,
                RequestEnvelope::new(),
            )
            .await
            .unwrap();
        assert!(response.is_success());
    }

    #[tokio::test]
    async fn test_should_raise_parse_fault_with_original_status() {
        let backend =
            MockBackend::spawn(|_| CannedResponse::raw(200, "<html>not json</html>")).await;
        let client = backend_client(&backend);

        let err = client
            .send(
                ServiceId::Users,
                UsersRoute::Health,
                HttpMethod::Get,
                RequestEnvelope::new(),
            )
            .await
            .unwrap_err();

        assert_eq!(err.code, DispatchErrorCode::ResponseParse);
        assert_eq!(err.status_code, http::StatusCode::OK);
    }

    #[tokio::test]
    async fn test_should_dispatch_raw_route_key_like_typed_route() {
        let backend = MockBackend::spawn(|_| {
            CannedResponse::json(200, &json!({"status": "ok"}))
        })
        .await;
        let client = backend_client(&backend);

        let typed = client
            .send(
                ServiceId::Users,
                UsersRoute::Health,
                HttpMethod::Get,
                RequestEnvelope::new(),
            )
            .await
            .unwrap();
        let raw = client
            .send(ServiceId::Users, "HEALTH", HttpMethod::Get, RequestEnvelope::new())
            .await
            .unwrap();
        assert_eq!(typed, raw);

        let requests = backend.requests();
        assert_eq!(requests.len(), 2);
        assert!(requests.iter().all(|r| r.path == "/health"));
    }

    #[tokio::test]
    async fn test_should_recreate_connection_after_close() {
        let backend = MockBackend::spawn(|_| {
            CannedResponse::json(200, &json!({"status": "ok"}))
        })
        .await;
        let client = backend_client(&backend);

        let first = client
            .send(
                ServiceId::Users,
                UsersRoute::Health,
                HttpMethod::Get,
                RequestEnvelope::new(),
            )
            .await
            .unwrap();
        client.close();
        let second = client
            .send(
                ServiceId::Users,
                UsersRoute::Health,
                HttpMethod::Get,
                RequestEnvelope::new(),
            )
            .await
            .unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_should_treat_error_field_on_ok_status_as_rejection() {
        let backend = MockBackend::spawn(|_| {
            CannedResponse::json(200, &json!({"detail": "account disabled"}))
        })
        .await;
        let client = backend_client(&backend);

        let response = client
            .send(
                ServiceId::Users,
                UsersRoute::LogIn,
                HttpMethod::Post,
                RequestEnvelope::new().with_field("login", "mallory"),
            )
            .await
            .unwrap();

        assert!(!response.is_success());
        assert_eq!(response.message(), Some("account disabled"));
        assert_eq!(response.status_code(), 200);
    }
}
