//! Router tests for listings, product detail and favorites

mod common;

#[cfg(test)]
mod tests {
    use super::common::*;
    use axum::http::{Method, StatusCode};
    use serde_json::{json, Value};

    fn titles(body: &Value) -> Vec<String> {
        body["products"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["title"].as_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_create_and_fetch_camaro() {
        let app = TestApp::new();
        let seller = app.login(100, "Seller").await;

        let (status, body) = app.post("/api/products", Some(&seller.token), camaro()).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "Product created successfully");
        assert_eq!(body["product"]["price"], "45.00");
        assert_eq!(body["product"]["category"], "custom");
        assert_eq!(body["product"]["rarity"], "rare");
        assert_eq!(body["product"]["views"], 0);
        assert_eq!(body["product"]["active"], true);

        let id = body["product"]["id"].as_str().unwrap();
        let (status, body) = app.get(&format!("/api/products/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["product"]["title"], "Custom '67 Camaro");
        assert_eq!(body["product"]["seller"]["first_name"], "Seller");
        assert_eq!(body["product"]["is_favorite"], false);
    }

    #[tokio::test]
    async fn test_create_requires_authentication() {
        let app = TestApp::new();

        let (status, _) = app.post("/api/products", None, camaro()).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_create_rejects_missing_fields() {
        let app = TestApp::new();
        let seller = app.login(101, "Seller").await;

        let (status, body) = app
            .post("/api/products", Some(&seller.token), json!({ "title": "No price" }))
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing required fields");
    }

    #[tokio::test]
    async fn test_create_rejects_negative_price() {
        let app = TestApp::new();
        let seller = app.login(102, "Seller").await;
        let mut body = camaro();
        body["price"] = json!(-1);

        let (status, body) = app.post("/api/products", Some(&seller.token), body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Price must be non-negative");
    }

    #[tokio::test]
    async fn test_create_accepts_every_enum_combination() {
        let app = TestApp::new();
        let seller = app.login(103, "Seller").await;

        let categories = ["main", "custom", "premium", "special", "sets"];
        let rarities = ["stg", "th", "main", "rare", "super_treasure"];
        let conditions = ["new_in_box", "excellent", "good", "used", "damaged"];

        for category in categories {
            for rarity in rarities {
                for condition in conditions {
                    let (status, body) = app
                        .post(
                            "/api/products",
                            Some(&seller.token),
                            json!({
                                "title": format!("{} {} {}", category, rarity, condition),
                                "price": 10,
                                "category": category,
                                "rarity": rarity,
                                "condition": condition,
                            }),
                        )
                        .await;
                    assert_eq!(status, StatusCode::CREATED, "{}", body);
                    assert_eq!(body["product"]["condition"], condition);
                }
            }
        }

        let listing = format!("/api/products?sellerId={}", seller.id);
        let (_, body) = app.get(&listing, None).await;
        assert_eq!(body["products"].as_array().unwrap().len(), 125);

        let rejected = [
            (("vintage", "main", "good"), "Invalid category"),
            (("main", "legendary", "good"), "Invalid rarity"),
            (("main", "main", "mint"), "Invalid condition"),
        ];
        for ((category, rarity, condition), message) in rejected {
            let (status, body) = app
                .post(
                    "/api/products",
                    Some(&seller.token),
                    json!({
                        "title": "Mystery",
                        "price": 10,
                        "category": category,
                        "rarity": rarity,
                        "condition": condition,
                    }),
                )
                .await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"], message);
        }

        let (_, body) = app.get(&listing, None).await;
        let products = body["products"].as_array().unwrap();
        assert_eq!(products.len(), 125);
        assert!(products.iter().all(|p| p["title"] != "Mystery"));
    }

    #[tokio::test]
    async fn test_list_filters_and_orders_newest_first() {
        let app = TestApp::new();
        let seller = app.login(104, "Seller").await;

        app.create_product(
            &seller,
            json!({ "title": "Skyline GT-R", "price": 12, "category": "main", "rarity": "main", "condition": "good" }),
        )
        .await;
        app.create_product(&seller, camaro()).await;
        app.create_product(
            &seller,
            json!({ "title": "Bone Shaker", "price": "150.5", "category": "premium", "rarity": "super_treasure", "condition": "new_in_box" }),
        )
        .await;

        let (status, body) = app.get("/api/products", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            titles(&body),
            vec!["Bone Shaker", "Custom '67 Camaro", "Skyline GT-R"]
        );

        let (_, body) = app.get("/api/products?category=custom", None).await;
        assert_eq!(titles(&body), vec!["Custom '67 Camaro"]);

        let (_, body) = app.get("/api/products?minPrice=20&maxPrice=100", None).await;
        assert_eq!(titles(&body), vec!["Custom '67 Camaro"]);

        let (_, body) = app.get("/api/products?search=SKYLINE", None).await;
        assert_eq!(titles(&body), vec!["Skyline GT-R"]);

        let (_, body) = app
            .get("/api/products?rarity=super_treasure&category=", None)
            .await;
        assert_eq!(titles(&body), vec!["Bone Shaker"]);
    }

    #[tokio::test]
    async fn test_list_rejects_bad_filters() {
        let app = TestApp::new();

        let (status, body) = app.get("/api/products?minPrice=cheap", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid minPrice");

        let (status, body) = app.get("/api/products?rarity=legendary", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid rarity");
    }

    #[tokio::test]
    async fn test_detail_counts_views() {
        let app = TestApp::new();
        let seller = app.login(105, "Seller").await;
        let id = app.create_product(&seller, camaro()).await;
        let uri = format!("/api/products/{}", id);

        for expected in 1..=3 {
            let (_, body) = app.get(&uri, None).await;
            assert_eq!(body["product"]["views"], expected);
        }
    }

    #[tokio::test]
    async fn test_detail_of_unknown_product_is_404() {
        let app = TestApp::new();

        let (status, body) = app
            .get(&format!("/api/products/{}", uuid::Uuid::new_v4()), None)
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Product not found");

        let (status, _) = app.get("/api/products/not-a-uuid", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_only_owner_can_update_or_delete() {
        let app = TestApp::new();
        let seller = app.login(106, "Seller").await;
        let stranger = app.login(107, "Stranger").await;
        let id = app.create_product(&seller, camaro()).await;
        let uri = format!("/api/products/{}", id);

        let (status, body) = app
            .request(Method::PUT, &uri, Some(&stranger.token), Some(json!({ "price": 1 })))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "Not authorized to update this product");

        let (status, body) = app
            .request(Method::DELETE, &uri, Some(&stranger.token), None)
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "Not authorized to delete this product");

        let (_, body) = app.get(&uri, None).await;
        assert_eq!(body["product"]["price"], "45.00");
    }

    #[tokio::test]
    async fn test_owner_update_is_partial() {
        let app = TestApp::new();
        let seller = app.login(108, "Seller").await;
        let id = app.create_product(&seller, camaro()).await;
        let uri = format!("/api/products/{}", id);

        let (status, body) = app
            .request(
                Method::PUT,
                &uri,
                Some(&seller.token),
                Some(json!({ "price": "39.99", "condition": "good" })),
            )
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Product updated successfully");
        assert_eq!(body["product"]["price"], "39.99");
        assert_eq!(body["product"]["condition"], "good");
        assert_eq!(body["product"]["title"], "Custom '67 Camaro");
        assert_eq!(body["product"]["rarity"], "rare");
    }

    #[tokio::test]
    async fn test_update_null_keeps_optional_fields() {
        let app = TestApp::new();
        let seller = app.login(118, "Seller").await;
        let mut body = camaro();
        body["description"] = json!("Spectraflame red");
        body["location"] = json!("Kazan");
        body["year"] = json!(2019);
        let id = app.create_product(&seller, body).await;
        let uri = format!("/api/products/{}", id);

        let (status, body) = app
            .request(
                Method::PUT,
                &uri,
                Some(&seller.token),
                Some(json!({ "description": null, "location": null, "year": null })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["product"]["description"], "Spectraflame red");
        assert_eq!(body["product"]["location"], "Kazan");
        assert_eq!(body["product"]["year"], 2019);

        let (_, body) = app
            .request(Method::PUT, &uri, Some(&seller.token), Some(json!({ "description": "" })))
            .await;
        assert_eq!(body["product"]["description"], "");
    }

    #[tokio::test]
    async fn test_deactivated_product_leaves_listing() {
        let app = TestApp::new();
        let seller = app.login(109, "Seller").await;
        let id = app.create_product(&seller, camaro()).await;

        app.request(
            Method::PUT,
            &format!("/api/products/{}", id),
            Some(&seller.token),
            Some(json!({ "active": false })),
        )
        .await;

        let (_, body) = app.get("/api/products", None).await;
        assert!(titles(&body).is_empty());
    }

    #[tokio::test]
    async fn test_delete_removes_product_and_favorites() {
        let app = TestApp::new();
        let seller = app.login(110, "Seller").await;
        let buyer = app.login(111, "Buyer").await;
        let id = app.create_product(&seller, camaro()).await;
        let uri = format!("/api/products/{}", id);

        app.post(&format!("{}/favorite", uri), Some(&buyer.token), json!({}))
            .await;

        let (status, body) = app
            .request(Method::DELETE, &uri, Some(&seller.token), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Product deleted successfully");

        let (status, _) = app.get(&uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, body) = app.get("/api/favorites", Some(&buyer.token)).await;
        assert!(titles(&body).is_empty());
    }

    #[tokio::test]
    async fn test_favorite_toggle_alternates() {
        let app = TestApp::new();
        let seller = app.login(112, "Seller").await;
        let buyer = app.login(113, "Buyer").await;
        let id = app.create_product(&seller, camaro()).await;
        let uri = format!("/api/products/{}/favorite", id);

        let expected = [
            (true, "Added to favorites"),
            (false, "Removed from favorites"),
            (true, "Added to favorites"),
        ];
        for (favorited, message) in expected {
            let (status, body) = app.post(&uri, Some(&buyer.token), json!({})).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["favorited"], favorited);
            assert_eq!(body["message"], message);
        }

        let (_, body) = app.get("/api/favorites", Some(&buyer.token)).await;
        assert_eq!(titles(&body), vec!["Custom '67 Camaro"]);
        assert_eq!(body["products"][0]["is_favorite"], true);
    }

    #[tokio::test]
    async fn test_is_favorite_is_per_viewer() {
        let app = TestApp::new();
        let seller = app.login(114, "Seller").await;
        let buyer = app.login(115, "Buyer").await;
        let id = app.create_product(&seller, camaro()).await;

        app.post(
            &format!("/api/products/{}/favorite", id),
            Some(&buyer.token),
            json!({}),
        )
        .await;

        let (_, body) = app.get("/api/products", Some(&buyer.token)).await;
        assert_eq!(body["products"][0]["is_favorite"], true);

        let (_, body) = app.get("/api/products", Some(&seller.token)).await;
        assert_eq!(body["products"][0]["is_favorite"], false);

        let (_, body) = app.get("/api/products", None).await;
        assert_eq!(body["products"][0]["is_favorite"], false);
    }

    #[tokio::test]
    async fn test_favorite_of_unknown_product_is_404() {
        let app = TestApp::new();
        let buyer = app.login(116, "Buyer").await;

        let (status, _) = app
            .post(
                &format!("/api/products/{}/favorite", uuid::Uuid::new_v4()),
                Some(&buyer.token),
                json!({}),
            )
            .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
