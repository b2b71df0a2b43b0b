#[cfg(test)]
mod tests {
    use crate::helpers::{bearer, body_json, make_test_app, request};
    use axum::http::StatusCode;
    use db::models::alteration::Model as AlterationModel;
    use db::test_utils::create_test_user;
    use serde_json::json;
    use serial_test::serial;
    use tower::ServiceExt;

    #[tokio::test]
    #[serial]
    async fn first_curation_creates_alteration_and_mapping() {
        let (app, state) = make_test_app().await;
        let user = create_test_user(state.db(), "curator").await;

        let req = request(
            "POST",
            "/api/alterations/V600E/BRAF/NCT001",
            Some(&bearer(user.id)),
            Some(json!({ "type": "inclusion" })),
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["outcome"], "created_both");
        assert_eq!(json["code"], "c");
        assert_eq!(json["mapping"]["nct_id"], "NCT001");
        assert_eq!(json["mapping"]["complete_status"], "1");

        let entries = json["mapping"]["alterations"].as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["gene"], "BRAF");
        assert_eq!(entries[0]["alteration"], "V600E");
        assert_eq!(entries[0]["curation_method"], "manually");
        assert_eq!(entries[0]["type"], "inclusion");

        let log = json["mapping"]["log"].as_array().unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0]["operation_type"], "add");
        assert_eq!(log[0]["user"], user.id);

        let owned = AlterationModel::find_by_gene_and_alteration(state.db(), "BRAF", "V600E")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(owned.user_id, user.id);
    }

    #[tokio::test]
    #[serial]
    async fn second_curation_appends_and_advances_status() {
        let (app, state) = make_test_app().await;
        let user = create_test_user(state.db(), "curator").await;
        let auth = bearer(user.id);

        let first = app
            .clone()
            .oneshot(request(
                "POST",
                "/api/alterations/V600E/BRAF/NCT001",
                Some(&auth),
                Some(json!({ "type": "inclusion" })),
            ))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::OK);

        let second = app
            .oneshot(request(
                "POST",
                "/api/alterations/V600E/BRAF/NCT001",
                Some(&auth),
                Some(json!({ "type": "inclusion" })),
            ))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::OK);

        let json = body_json(second).await;
        assert_eq!(json["outcome"], "both_appended");
        assert_eq!(json["code"], "b");
        assert_eq!(json["mapping"]["complete_status"], "2");
        assert_eq!(json["mapping"]["alterations"].as_array().unwrap().len(), 2);
        assert_eq!(json["mapping"]["log"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    #[serial]
    async fn type_is_optional() {
        let (app, state) = make_test_app().await;
        let user = create_test_user(state.db(), "curator").await;

        let req = request(
            "POST",
            "/api/alterations/G12C/KRAS/NCT002",
            Some(&bearer(user.id)),
            Some(json!({})),
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert!(json["mapping"]["alterations"][0]["type"].is_null());
    }

    #[tokio::test]
    #[serial]
    async fn curation_requires_token() {
        let (app, _state) = make_test_app().await;

        let req = request(
            "POST",
            "/api/alterations/V600E/BRAF/NCT001",
            None,
            Some(json!({ "type": "inclusion" })),
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    #[serial]
    async fn failed_curation_reports_legacy_code() {
        let (app, _state) = make_test_app().await;

        // Token for a user that does not exist trips the creator foreign key.
        let req = request(
            "POST",
            "/api/alterations/V600E/BRAF/NCT001",
            Some(&bearer(424242)),
            Some(json!({ "type": "inclusion" })),
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert_eq!(json["code"], "e");
        assert!(json["message"].is_string());
    }

    #[tokio::test]
    #[serial]
    async fn created_alteration_then_two_curations() {
        let (app, state) = make_test_app().await;
        let user = create_test_user(state.db(), "curator").await;
        let auth = bearer(user.id);

        let created = app
            .clone()
            .oneshot(request(
                "POST",
                "/api/alterations",
                Some(&auth),
                Some(json!({ "gene": "BRAF", "alteration": "v600e" })),
            ))
            .await
            .unwrap();
        assert_eq!(created.status(), StatusCode::OK);
        assert_eq!(body_json(created).await["alteration"], "V600E");

        let first = app
            .clone()
            .oneshot(request(
                "POST",
                "/api/alterations/V600E/BRAF/NCT001",
                Some(&auth),
                Some(json!({ "type": "inclusion" })),
            ))
            .await
            .unwrap();
        let first = body_json(first).await;
        assert_eq!(first["outcome"], "appended_alteration_created_mapping");
        assert_eq!(first["code"], "a");
        assert_eq!(first["mapping"]["complete_status"], "1");
        assert_eq!(first["mapping"]["alterations"].as_array().unwrap().len(), 1);

        let second = app
            .oneshot(request(
                "POST",
                "/api/alterations/V600E/BRAF/NCT001",
                Some(&auth),
                Some(json!({ "type": "inclusion" })),
            ))
            .await
            .unwrap();
        let second = body_json(second).await;
        assert_eq!(second["mapping"]["complete_status"], "2");
        assert_eq!(second["mapping"]["alterations"].as_array().unwrap().len(), 2);
        assert_eq!(second["mapping"]["log"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    #[serial]
    async fn curation_without_body_succeeds() {
        let (app, state) = make_test_app().await;
        let user = create_test_user(state.db(), "curator").await;

        let req = request(
            "POST",
            "/api/alterations/V600E/BRAF/NCT003",
            Some(&bearer(user.id)),
            None,
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["outcome"], "created_both");
        assert!(json["mapping"]["alterations"][0]["type"].is_null());
    }

    #[tokio::test]
    #[serial]
    async fn malformed_curation_body_reports_legacy_code() {
        let (app, state) = make_test_app().await;
        let user = create_test_user(state.db(), "curator").await;

        let req = request(
            "POST",
            "/api/alterations/V600E/BRAF/NCT004",
            Some(&bearer(user.id)),
            Some(json!({ "type": 12 })),
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert_eq!(json["code"], "e");
        assert!(json["message"].is_string());
    }
}
