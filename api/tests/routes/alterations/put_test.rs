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
    async fn owner_can_rename() {
        let (app, state) = make_test_app().await;
        let owner = create_test_user(state.db(), "owner").await;
        let created = AlterationModel::create(state.db(), "BRAF", "V600E", owner.id)
            .await
            .unwrap();

        let req = request(
            "PUT",
            "/api/alterations/V600E/BRAF",
            Some(&bearer(owner.id)),
            Some(json!({ "alteration": "v600k", "user_id": 999, "id": 42 })),
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["id"], created.id);
        assert_eq!(json["gene"], "BRAF");
        assert_eq!(json["alteration"], "V600K");
        assert_eq!(json["user_id"], owner.id);
    }

    #[tokio::test]
    #[serial]
    async fn non_owner_is_forbidden() {
        let (app, state) = make_test_app().await;
        let owner = create_test_user(state.db(), "owner").await;
        let other = create_test_user(state.db(), "other").await;
        AlterationModel::create(state.db(), "BRAF", "V600E", owner.id)
            .await
            .unwrap();

        let req = request(
            "PUT",
            "/api/alterations/V600E/BRAF",
            Some(&bearer(other.id)),
            Some(json!({ "alteration": "V600K" })),
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"User is not authorized");

        let unchanged = AlterationModel::find_by_gene_and_alteration(state.db(), "BRAF", "V600E")
            .await
            .unwrap();
        assert!(unchanged.is_some());
    }

    #[tokio::test]
    #[serial]
    async fn missing_pair_is_not_found() {
        let (app, state) = make_test_app().await;
        let user = create_test_user(state.db(), "owner").await;

        let req = request(
            "PUT",
            "/api/alterations/V600E/BRAF",
            Some(&bearer(user.id)),
            Some(json!({ "alteration": "V600K" })),
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let json = body_json(response).await;
        assert_eq!(json["message"], "Alteration not found");
    }

    #[tokio::test]
    #[serial]
    async fn blank_value_is_rejected() {
        let (app, state) = make_test_app().await;
        let owner = create_test_user(state.db(), "owner").await;
        AlterationModel::create(state.db(), "BRAF", "V600E", owner.id)
            .await
            .unwrap();

        let req = request(
            "PUT",
            "/api/alterations/V600E/BRAF",
            Some(&bearer(owner.id)),
            Some(json!({ "gene": "" })),
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert_eq!(json["message"], "gene must not be empty");
    }

    #[tokio::test]
    #[serial]
    async fn update_without_token_is_unauthorized() {
        let (app, state) = make_test_app().await;
        let owner = create_test_user(state.db(), "owner").await;
        AlterationModel::create(state.db(), "BRAF", "V600E", owner.id)
            .await
            .unwrap();

        let req = request(
            "PUT",
            "/api/alterations/V600E/BRAF",
            None,
            Some(json!({ "alteration": "V600K" })),
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    #[serial]
    async fn wrongly_typed_field_is_bad_request() {
        let (app, state) = make_test_app().await;
        let owner = create_test_user(state.db(), "owner").await;
        AlterationModel::create(state.db(), "BRAF", "V600E", owner.id)
            .await
            .unwrap();

        let req = request(
            "PUT",
            "/api/alterations/V600E/BRAF",
            Some(&bearer(owner.id)),
            Some(json!({ "gene": 7 })),
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert!(json["message"].is_string());
    }
}
