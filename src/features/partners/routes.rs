use std::sync::Arc;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::features::partners::handlers;
use crate::features::partners::services::PartnerService;

/// Create routes for the partners feature
pub fn routes(service: Arc<PartnerService>) -> Router {
    Router::new()
        .route(
            "/api/partners",
            post(handlers::create_partner).get(handlers::list_partners),
        )
        .route(
            "/api/partners/{id}",
            get(handlers::get_partner)
                .patch(handlers::update_partner)
                .delete(handlers::delete_partner),
        )
        .route(
            "/api/partners/{id}/status",
            patch(handlers::update_partner_status),
        )
        .route(
            "/api/partners/{id}/rating",
            patch(handlers::update_partner_rating),
        )
        .route("/api/partners/{id}/close", post(handlers::close_partner))
        .route("/api/partners/{id}/reopen", post(handlers::reopen_partner))
        .route(
            "/api/partners/{id}/availability/refresh",
            post(handlers::refresh_partner_availability),
        )
        .route(
            "/api/partners/{id}/services",
            post(handlers::add_partner_services),
        )
        .route(
            "/api/partners/{id}/services/derive",
            post(handlers::derive_partner_services),
        )
        .route(
            "/api/users/{user_id}/partner",
            get(handlers::get_partner_by_user),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::partners::repositories::memory::InMemoryPartnerRepository;
    use crate::shared::clock::FixedClock;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    fn server_at(hour: u32, minute: u32) -> TestServer {
        let service = Arc::new(PartnerService::new(
            Arc::new(InMemoryPartnerRepository::default()),
            Arc::new(FixedClock::at(hour, minute)),
        ));
        TestServer::new(routes(service)).unwrap()
    }

    fn create_body(user_id: i64, category: &str) -> Value {
        json!({
            "userId": user_id,
            "businessLicense": format!("LIC-{}", user_id),
            "businessName": "Happy Paws",
            "address": "12 Nguyen Hue, District 1",
            "openingTime": "09:00:00",
            "closingTime": "18:00:00",
            "latitude": 10.7769,
            "longitude": 106.7009,
            "serviceCategory": category
        })
    }

    async fn create(server: &TestServer, user_id: i64, category: &str) -> Value {
        let response = server
            .post("/api/partners")
            .json(&create_body(user_id, category))
            .await;
        response.assert_status(StatusCode::CREATED);
        response.json::<Value>()["data"].clone()
    }

    #[tokio::test]
    async fn test_create_partner_returns_camel_case_record() {
        let server = server_at(10, 0);
        let partner = create(&server, 7, "PET_CARE").await;

        assert_eq!(partner["userId"], 7);
        assert_eq!(partner["status"], "PENDING");
        assert_eq!(partner["isOpen"], true);
        assert_eq!(partner["withinOperatingHours"], true);
        assert_eq!(
            partner["services"],
            json!(["PET_BOARDING", "PET_SPA", "PET_GROOMING", "PET_WALKING"])
        );
        assert!(partner.get("user").is_none());
    }

    #[tokio::test]
    async fn test_create_partner_validation_error() {
        let server = server_at(10, 0);
        let mut body = create_body(1, "PET_CARE");
        body["longitude"] = json!(200.0);

        let response = server.post("/api/partners").json(&body).await;

        response.assert_status_bad_request();
        let body = response.json::<Value>();
        assert_eq!(body["success"], false);
        assert!(body["errors"].is_array());
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let server = server_at(10, 0);
        let response = server
            .post("/api/partners")
            .json(&json!({ "userId": "not-a-number" }))
            .await;

        response.assert_status_bad_request();
        assert_eq!(response.json::<Value>()["success"], false);
    }

    #[tokio::test]
    async fn test_duplicate_user_conflicts() {
        let server = server_at(10, 0);
        create(&server, 1, "PET_CARE").await;

        let response = server
            .post("/api/partners")
            .json(&create_body(1, "VETERINARY_CARE"))
            .await;
        response.assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_close_and_reopen_after_hours() {
        let server = server_at(20, 0);
        let partner = create(&server, 1, "PET_CARE").await;
        let id = partner["id"].as_i64().unwrap();

        let closed = server.post(&format!("/api/partners/{}/close", id)).await;
        closed.assert_status_ok();
        assert_eq!(closed.json::<Value>()["data"]["isOpen"], false);

        let reopened = server.post(&format!("/api/partners/{}/reopen", id)).await;
        reopened.assert_status_ok();
        let body = reopened.json::<Value>();
        assert_eq!(body["data"]["isOpen"], false);
        assert_eq!(
            body["message"],
            "Partner is outside operating hours and remains closed"
        );
    }

    #[tokio::test]
    async fn test_refresh_availability_outside_hours() {
        let server = server_at(7, 30);
        let partner = create(&server, 1, "VETERINARY_CARE").await;
        let id = partner["id"].as_i64().unwrap();

        let response = server
            .post(&format!("/api/partners/{}/availability/refresh", id))
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["data"]["isOpen"], false);
    }

    #[tokio::test]
    async fn test_moderation_rating_and_lookup_by_user() {
        let server = server_at(10, 0);
        let partner = create(&server, 55, "VETERINARY_CARE").await;
        let id = partner["id"].as_i64().unwrap();

        server
            .patch(&format!("/api/partners/{}/status", id))
            .json(&json!({ "status": "APPROVED" }))
            .await
            .assert_status_ok();

        server
            .patch(&format!("/api/partners/{}/rating", id))
            .json(&json!({ "averageRating": 4.5 }))
            .await
            .assert_status_ok();

        let response = server.get("/api/users/55/partner").await;
        response.assert_status_ok();
        let data = response.json::<Value>()["data"].clone();
        assert_eq!(data["id"], id);
        assert_eq!(data["status"], "APPROVED");
        assert_eq!(data["averageRating"], 4.5);

        server
            .patch(&format!("/api/partners/{}/rating", id))
            .json(&json!({ "averageRating": 6.0 }))
            .await
            .assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_add_services_and_derive() {
        let server = server_at(10, 0);
        let partner = create(&server, 1, "VETERINARY_CARE").await;
        let id = partner["id"].as_i64().unwrap();

        let response = server
            .post(&format!("/api/partners/{}/services", id))
            .json(&json!({ "services": ["PET_BOARDING"] }))
            .await;
        response.assert_status_ok();
        assert_eq!(
            response.json::<Value>()["data"]["services"],
            json!([
                "PET_BOARDING",
                "VETERINARY_EXAMINATION",
                "VACCINATION",
                "SURGERY",
                "REGULAR_CHECKUP"
            ])
        );

        let derived = server
            .post(&format!("/api/partners/{}/services/derive", id))
            .await;
        derived.assert_status_ok();
        assert_eq!(
            derived.json::<Value>()["data"]["services"]
                .as_array()
                .unwrap()
                .len(),
            5
        );
    }

    #[tokio::test]
    async fn test_list_with_filters_and_meta() {
        let server = server_at(10, 0);
        create(&server, 1, "PET_CARE").await;
        create(&server, 2, "VETERINARY_CARE").await;
        create(&server, 3, "PET_CARE").await;

        let response = server
            .get("/api/partners")
            .add_query_param("serviceCategory", "PET_CARE")
            .add_query_param("pageSize", 1)
            .await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
        assert_eq!(body["meta"]["total"], 2);
        assert_eq!(body["meta"]["pageSize"], 1);
    }

    #[tokio::test]
    async fn test_update_and_delete_partner() {
        let server = server_at(10, 0);
        let partner = create(&server, 1, "PET_CARE").await;
        let id = partner["id"].as_i64().unwrap();

        let updated = server
            .patch(&format!("/api/partners/{}", id))
            .json(&json!({ "businessName": "Happy Paws Deluxe" }))
            .await;
        updated.assert_status_ok();
        assert_eq!(
            updated.json::<Value>()["data"]["businessName"],
            "Happy Paws Deluxe"
        );

        server
            .delete(&format!("/api/partners/{}", id))
            .await
            .assert_status_ok();
        server
            .get(&format!("/api/partners/{}", id))
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn test_list_with_huge_page_returns_empty_page() {
        let server = server_at(10, 0);
        create(&server, 1, "PET_CARE").await;

        let response = server
            .get("/api/partners")
            .add_query_param("page", i64::MAX)
            .await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(body["data"].as_array().unwrap().len(), 0);
        assert_eq!(body["meta"]["total"], 1);
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_bad_request() {
        let server = server_at(10, 0);
        server
            .get("/api/partners/abc")
            .await
            .assert_status_bad_request();
    }
}
