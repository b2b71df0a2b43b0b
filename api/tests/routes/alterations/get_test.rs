#[cfg(test)]
mod tests {
    use crate::helpers::{body_json, make_test_app, request};
    use axum::http::StatusCode;
    use db::models::alteration::Model as AlterationModel;
    use db::test_utils::create_test_user;
    use serde_json::Value;
    use serial_test::serial;
    use tower::ServiceExt;

    #[tokio::test]
    #[serial]
    async fn list_returns_newest_first_with_creator() {
        let (app, state) = make_test_app().await;
        let user = create_test_user(state.db(), "curator").await;
        AlterationModel::create(state.db(), "BRAF", "V600E", user.id).await.unwrap();
        AlterationModel::create(state.db(), "KRAS", "G12C", user.id).await.unwrap();

        let response = app
            .oneshot(request("GET", "/api/alterations", None, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        let items = json.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["gene"], "KRAS");
        assert_eq!(items[1]["gene"], "BRAF");
        assert_eq!(items[0]["user"]["display_name"], "curator (test)");
    }

    #[tokio::test]
    #[serial]
    async fn read_existing_pair() {
        let (app, state) = make_test_app().await;
        let user = create_test_user(state.db(), "curator").await;
        AlterationModel::create(state.db(), "BRAF", "V600E", user.id).await.unwrap();

        let response = app
            .oneshot(request("GET", "/api/alterations/v600e/braf", None, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["gene"], "BRAF");
        assert_eq!(json["alteration"], "V600E");
        assert_eq!(json["user_id"], user.id);
    }

    #[tokio::test]
    #[serial]
    async fn read_missing_pair_is_null() {
        let (app, _state) = make_test_app().await;

        let response = app
            .oneshot(request("GET", "/api/alterations/V600E/BRAF", None, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, Value::Null);
    }

    #[tokio::test]
    #[serial]
    async fn bulk_lookup_skips_unknown_ids() {
        let (app, state) = make_test_app().await;
        let user = create_test_user(state.db(), "curator").await;
        let a = AlterationModel::create(state.db(), "BRAF", "V600E", user.id).await.unwrap();
        let b = AlterationModel::create(state.db(), "EGFR", "L858R", user.id).await.unwrap();
        AlterationModel::create(state.db(), "KRAS", "G12C", user.id).await.unwrap();

        let uri = format!("/api/alterations/trials/{},{},999999", a.id, b.id);
        let response = app.oneshot(request("GET", &uri, None, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        let mut ids: Vec<i64> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|item| item["id"].as_i64().unwrap())
            .collect();
        ids.sort();
        assert_eq!(ids, vec![a.id, b.id]);
    }

    #[tokio::test]
    #[serial]
    async fn bulk_lookup_rejects_non_numeric_id() {
        let (app, _state) = make_test_app().await;

        let response = app
            .oneshot(request("GET", "/api/alterations/trials/1,abc", None, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert_eq!(json["message"], "Invalid alteration id: abc");
    }

    #[tokio::test]
    #[serial]
    async fn search_requires_every_keyword() {
        let (app, state) = make_test_app().await;
        let user = create_test_user(state.db(), "curator").await;
        AlterationModel::create(state.db(), "BRAF", "V600E", user.id).await.unwrap();
        AlterationModel::create(state.db(), "BRAF", "V600K", user.id).await.unwrap();
        AlterationModel::create(state.db(), "EGFR", "T790M", user.id).await.unwrap();

        let response = app
            .clone()
            .oneshot(request("GET", "/api/alterations/search/braf,v600k", None, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let items = json.as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["alteration"], "V600K");

        let response = app
            .oneshot(request("GET", "/api/alterations/search/braf", None, None))
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    #[serial]
    async fn search_keywords_are_not_wildcards() {
        let (app, state) = make_test_app().await;
        let user = create_test_user(state.db(), "curator").await;
        AlterationModel::create(state.db(), "BRAF", "V600E", user.id).await.unwrap();

        let response = app
            .clone()
            .oneshot(request("GET", "/api/alterations/search/%25", None, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_json(response).await.as_array().unwrap().is_empty());

        let response = app
            .oneshot(request("GET", "/api/alterations/search/V600_", None, None))
            .await
            .unwrap();
        assert!(body_json(response).await.as_array().unwrap().is_empty());
    }
}
