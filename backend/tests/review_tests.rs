//! Router tests for seller reviews, the rating aggregate and reports

mod common;

#[cfg(test)]
mod tests {
    use super::common::*;
    use axum::http::StatusCode;
    use serde_json::{json, Value};
    use uuid::Uuid;

    fn rating_of(body: &Value) -> f64 {
        body["user"]["rating"].as_str().unwrap().parse().unwrap()
    }

    async fn review(
        app: &TestApp,
        buyer: &TestUser,
        seller: Uuid,
        rating: Value,
        product: Option<Uuid>,
    ) -> (StatusCode, Value) {
        app.post(
            "/api/reviews",
            Some(&buyer.token),
            json!({
                "sellerId": seller,
                "rating": rating,
                "comment": "Fast shipping",
                "productId": product,
            }),
        )
        .await
    }

    #[tokio::test]
    async fn test_new_seller_starts_at_five() {
        let app = TestApp::new();
        let seller = app.login(200, "Seller").await;

        let (status, body) = app.get(&format!("/api/users/{}", seller.id), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(rating_of(&body), 5.0);
        assert_eq!(body["user"]["reviews_count"], 0);
    }

    #[tokio::test]
    async fn test_reviews_update_seller_rating() {
        let app = TestApp::new();
        let seller = app.login(201, "Seller").await;
        let first = app.login(202, "First").await;
        let second = app.login(203, "Second").await;
        let third = app.login(204, "Third").await;

        let (status, body) = review(&app, &first, seller.id, json!(5), None).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "Review submitted successfully");
        assert_eq!(body["review"]["rating"], 5);

        review(&app, &second, seller.id, json!("4"), None).await;
        review(&app, &third, seller.id, json!(4), None).await;

        let (_, body) = app.get(&format!("/api/users/{}", seller.id), None).await;
        assert_eq!(rating_of(&body), 4.33);
        assert_eq!(body["user"]["reviews_count"], 3);
    }

    #[tokio::test]
    async fn test_rating_must_be_whole_one_to_five() {
        let app = TestApp::new();
        let seller = app.login(205, "Seller").await;
        let buyer = app.login(206, "Buyer").await;

        for bad in [json!(0), json!(6), json!(3.5), json!("great")] {
            let (status, body) = review(&app, &buyer, seller.id, bad, None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"], "Rating must be between 1 and 5");
        }

        let (_, body) = app.get(&format!("/api/users/{}", seller.id), None).await;
        assert_eq!(body["user"]["reviews_count"], 0);
    }

    #[tokio::test]
    async fn test_missing_fields_are_rejected() {
        let app = TestApp::new();
        let buyer = app.login(207, "Buyer").await;

        let (status, body) = app
            .post("/api/reviews", Some(&buyer.token), json!({ "rating": 5 }))
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing required fields");
    }

    #[tokio::test]
    async fn test_cannot_review_yourself() {
        let app = TestApp::new();
        let seller = app.login(208, "Seller").await;

        let (status, body) = review(&app, &seller, seller.id, json!(5), None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Cannot review yourself");
    }

    #[tokio::test]
    async fn test_unknown_seller_is_404() {
        let app = TestApp::new();
        let buyer = app.login(209, "Buyer").await;

        let (status, body) = review(&app, &buyer, Uuid::new_v4(), json!(5), None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Seller not found");
    }

    #[tokio::test]
    async fn test_one_review_per_purchase() {
        let app = TestApp::new();
        let seller = app.login(210, "Seller").await;
        let buyer = app.login(211, "Buyer").await;
        let camaro_id = app.create_product(&seller, camaro()).await;
        let other_id = app
            .create_product(
                &seller,
                json!({ "title": "Twin Mill", "price": 3, "category": "main", "rarity": "main", "condition": "used" }),
            )
            .await;

        let (status, _) = review(&app, &buyer, seller.id, json!(5), Some(camaro_id)).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = review(&app, &buyer, seller.id, json!(1), Some(camaro_id)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "You have already reviewed this purchase");

        let (status, _) = review(&app, &buyer, seller.id, json!(3), Some(other_id)).await;
        assert_eq!(status, StatusCode::CREATED);

        let (_, body) = app.get(&format!("/api/users/{}", seller.id), None).await;
        assert_eq!(rating_of(&body), 4.0);
        assert_eq!(body["user"]["reviews_count"], 2);
    }

    #[tokio::test]
    async fn test_seller_reviews_page_and_stats() {
        let app = TestApp::new();
        let seller = app.login(212, "Seller").await;
        let ratings = [5, 5, 4, 3, 5];

        for (i, rating) in ratings.iter().enumerate() {
            let buyer = app.login(300 + i as i64, &format!("Buyer{}", i)).await;
            review(&app, &buyer, seller.id, json!(rating), None).await;
        }

        let (status, body) = app
            .get(
                &format!("/api/reviews/seller/{}?page=2&limit=2", seller.id),
                None,
            )
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["pagination"]["page"], 2);
        assert_eq!(body["pagination"]["limit"], 2);
        assert_eq!(body["pagination"]["total"], 5);
        assert_eq!(body["pagination"]["pages"], 3);
        assert_eq!(body["stats"], json!({ "1": 0, "2": 0, "3": 1, "4": 1, "5": 3 }));

        // Newest first, so page two holds the third and second reviews
        let reviews = body["reviews"].as_array().unwrap();
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0]["rating"], 4);
        assert_eq!(reviews[0]["buyer"]["first_name"], "Buyer2");
        assert_eq!(reviews[1]["rating"], 5);
        assert_eq!(reviews[1]["buyer"]["first_name"], "Buyer1");
    }

    #[tokio::test]
    async fn test_seller_reviews_clamp_and_reject_pagination() {
        let app = TestApp::new();
        let seller = app.login(213, "Seller").await;
        let uri = format!("/api/reviews/seller/{}", seller.id);

        let (status, body) = app.get(&format!("{}?page=0&limit=500", uri), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["pagination"]["page"], 1);
        assert_eq!(body["pagination"]["limit"], 50);
        assert_eq!(body["pagination"]["pages"], 0);

        let (status, body) = app.get(&format!("{}?page=abc", uri), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid page");
    }

    #[tokio::test]
    async fn test_seller_reviews_reject_page_past_offset_range() {
        let app = TestApp::new();
        let seller = app.login(216, "Seller").await;
        let buyer = app.login(217, "Buyer").await;
        review(&app, &buyer, seller.id, json!(4), None).await;
        let uri = format!("/api/reviews/seller/{}", seller.id);

        let (status, body) = app
            .get(&format!("{}?page={}&limit=50", uri, i64::MAX), None)
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid page");

        let (status, body) = app
            .get(&format!("{}?page=1000000000000&limit=50", uri), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["reviews"], json!([]));
        assert_eq!(body["pagination"]["total"], 1);
    }

    #[tokio::test]
    async fn test_review_of_unknown_product_is_not_found() {
        let app = TestApp::new();
        let seller = app.login(218, "Seller").await;
        let buyer = app.login(219, "Buyer").await;

        let (status, body) = review(&app, &buyer, seller.id, json!(5), Some(Uuid::new_v4())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Product not found");

        let (_, body) = app.get(&format!("/api/reviews/seller/{}", seller.id), None).await;
        assert_eq!(body["pagination"]["total"], 0);

        let (_, body) = app.get(&format!("/api/users/{}", seller.id), None).await;
        assert_eq!(body["user"]["reviews_count"], 0);
    }

    #[tokio::test]
    async fn test_review_lists_product_after_delete_as_null() {
        let app = TestApp::new();
        let seller = app.login(214, "Seller").await;
        let buyer = app.login(215, "Buyer").await;
        let id = app.create_product(&seller, camaro()).await;

        review(&app, &buyer, seller.id, json!(5), Some(id)).await;

        let uri = format!("/api/reviews/seller/{}", seller.id);
        let (_, body) = app.get(&uri, None).await;
        assert_eq!(body["reviews"][0]["product"]["title"], "Custom '67 Camaro");

        app.request(
            axum::http::Method::DELETE,
            &format!("/api/products/{}", id),
            Some(&seller.token),
            None,
        )
        .await;

        let (_, body) = app.get(&uri, None).await;
        assert_eq!(body["reviews"][0]["product"], Value::Null);
        assert_eq!(body["stats"]["5"], 1);
    }

    #[tokio::test]
    async fn test_report_a_user() {
        let app = TestApp::new();
        let reporter = app.login(216, "Reporter").await;
        let scammer = app.login(217, "Scammer").await;

        let (status, body) = app
            .post(
                "/api/reviews/report",
                Some(&reporter.token),
                json!({ "reportedUserId": scammer.id, "reason": "scam", "description": "Never shipped" }),
            )
            .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(
            body["message"],
            "Report submitted successfully. Our moderators will review it."
        );
        assert_eq!(body["report"]["status"], "pending");
        assert_eq!(body["report"]["reason"], "scam");
    }

    #[tokio::test]
    async fn test_report_a_product() {
        let app = TestApp::new();
        let seller = app.login(218, "Seller").await;
        let reporter = app.login(219, "Reporter").await;
        let id = app.create_product(&seller, camaro()).await;

        let (status, body) = app
            .post(
                "/api/reviews/report",
                Some(&reporter.token),
                json!({ "productId": id, "reason": "fake_product" }),
            )
            .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["report"]["product_id"], id.to_string());
    }

    #[tokio::test]
    async fn test_report_validation() {
        let app = TestApp::new();
        let reporter = app.login(220, "Reporter").await;

        let cases = [
            (json!({ "productId": Uuid::new_v4() }), StatusCode::BAD_REQUEST, "Reason is required"),
            (
                json!({ "reportedUserId": Uuid::new_v4(), "reason": "rude" }),
                StatusCode::BAD_REQUEST,
                "Invalid reason",
            ),
            (json!({ "reason": "spam" }), StatusCode::BAD_REQUEST, "Either user or product must be specified"),
            (
                json!({ "reportedUserId": Uuid::new_v4(), "reason": "spam" }),
                StatusCode::NOT_FOUND,
                "Reported user not found",
            ),
            (
                json!({ "productId": Uuid::new_v4(), "reason": "spam" }),
                StatusCode::NOT_FOUND,
                "Product not found",
            ),
        ];

        for (body, status, message) in cases {
            let (actual, response) = app
                .post("/api/reviews/report", Some(&reporter.token), body)
                .await;
            assert_eq!(actual, status);
            assert_eq!(response["error"], message);
        }
    }

    #[tokio::test]
    async fn test_report_requires_authentication() {
        let app = TestApp::new();

        let (status, _) = app
            .post("/api/reviews/report", None, json!({ "reason": "spam" }))
            .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
