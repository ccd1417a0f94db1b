//! API Integration Tests
//!
//! These tests require a running PostgreSQL instance reachable through
//! `DATABASE_URL`. Identity, storage and the events catalog are served by
//! the in-process stub in `integration_tests::upstream`.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_error, assert_json, assert_status, check_test_env, fixtures::*,
    upstream::{token_for, CATALOG_IDS, WRONG_PASSWORD},
    TestServer,
};
use reqwest::StatusCode;
use serde_json::{json, Value};

async fn save_event(server: &TestServer, user: &TestUser, days_from_now: i64) -> Value {
    let payload = event_payload(unique_catalog_id(), &format!("Band {}", unique_suffix()), days_from_now);
    let response = server
        .post_auth("/api/events/save", &user.token, &payload)
        .await
        .unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get("/health/ready").await.expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["checks"]["database"], "healthy");
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_signup_creates_local_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = server.signup_user().await.unwrap();

    assert!(user.username.starts_with("fan"));

    let response = server
        .post_empty_auth("/api/users/init", &user.token)
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["message"], "User initialized");
    assert_eq!(body["user"]["id"], user.id.as_str());
}

#[tokio::test]
async fn test_login_and_invalid_credentials() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let signup = SignupRequest::unique();
    server.post("/auth/signup", &signup).await.unwrap();

    let login = LoginRequest {
        email: signup.email.clone(),
        password: signup.password.clone(),
    };
    let response = server.post("/auth/login", &login).await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(body["session"]["access_token"].is_string());

    let login = LoginRequest {
        email: signup.email,
        password: WRONG_PASSWORD.to_string(),
    };
    let response = server.post("/auth/login", &login).await.unwrap();
    let body: Value = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body["error"]["code"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_token_errors() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.post_empty_auth("/auth/logout", "garbage").await.unwrap();
    let message = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(message, "Not authorized, token failed");

    let response = server.get("/api/posts/feed").await.unwrap();
    let message = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(message, "Not authorized, no token");
}

// ============================================================================
// Event Tests
// ============================================================================

#[tokio::test]
async fn test_catalog_search_with_save() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/api/events?q=stubs&save=true").await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["events"].as_array().unwrap().len(), CATALOG_IDS.len());
    assert_eq!(body["meta"]["page"], 1);

    let response = server.get("/api/saved-events?q=stub%20festival&limit=100").await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    let ids: Vec<i64> = body["events"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|e| e["seatgeekId"].as_i64())
        .collect();
    for id in CATALOG_IDS {
        assert!(ids.contains(&id));
    }
}

#[tokio::test]
async fn test_saved_event_lifecycle() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = server.signup_user().await.unwrap();
    let event = save_event(&server, &user, 30).await;
    let id = event["id"].as_str().unwrap();

    let response = server.get(&format!("/api/saved-events/{id}")).await.unwrap();
    let fetched: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched["seatgeekId"], event["seatgeekId"]);
    assert_eq!(fetched["reviewCount"], 0);

    let response = server
        .delete_auth(&format!("/api/saved-events/{id}"), &user.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get(&format!("/api/saved-events/{id}")).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Review Tests
// ============================================================================

#[tokio::test]
async fn test_reviews_update_event_rating() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = server.signup_user().await.unwrap();
    let bob = server.signup_user().await.unwrap();

    let event = save_event(&server, &alice, -10).await;
    let seatgeek_id = event["seatgeekId"].as_i64().unwrap();
    let id = event["id"].as_str().unwrap().to_string();
    let reviews_path = format!("/api/events/{seatgeek_id}/reviews");

    let response = server
        .post_auth(&reviews_path, &alice.token, &review_payload(5, "Unreal encore"))
        .await
        .unwrap();
    let review: Value = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(review["rating"], 5);

    let response = server
        .post_auth(&reviews_path, &bob.token, &review_payload(3, "Sound was muddy"))
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let event: Value = server
        .get(&format!("/api/saved-events/{id}"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(event["averageRating"].as_f64(), Some(4.0));
    assert_eq!(event["reviewCount"], 2);

    // Second review by the same user
    let response = server
        .post_auth(&reviews_path, &alice.token, &review_payload(1, "Changed my mind"))
        .await
        .unwrap();
    let message = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(message, "You have already reviewed this event");

    // Only the author may delete
    let review_path = format!("{reviews_path}/{}", review["id"].as_str().unwrap());
    let response = server.delete_auth(&review_path, &bob.token).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server.delete_auth(&review_path, &alice.token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let reviews: Value = server.get(&reviews_path).await.unwrap().json().await.unwrap();
    assert_eq!(reviews.as_array().unwrap().len(), 1);

    let event: Value = server
        .get(&format!("/api/saved-events/{id}"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(event["averageRating"].as_f64(), Some(3.0));
    assert_eq!(event["reviewCount"], 1);
}

#[tokio::test]
async fn test_review_for_unknown_event() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = server.signup_user().await.unwrap();

    let response = server
        .post_auth(
            &format!("/api/events/{}/reviews", unique_catalog_id()),
            &user.token,
            &review_payload(4, "Where was this?"),
        )
        .await
        .unwrap();
    let message = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(message, "Event not found");
}

#[tokio::test]
async fn test_artist_rating() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = server.signup_user().await.unwrap();
    let artist = format!("Artist {}", unique_suffix());

    let payload = event_payload(unique_catalog_id(), &artist, -3);
    let event: Value = server
        .post_auth("/api/events/save", &user.token, &payload)
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let seatgeek_id = event["seatgeekId"].as_i64().unwrap();

    server
        .post_auth(
            &format!("/api/events/{seatgeek_id}/reviews"),
            &user.token,
            &review_payload(4, "Tight set"),
        )
        .await
        .unwrap();

    let path = format!("/api/artists/{}/rating", artist.to_uppercase().replace(' ', "%20"));
    let response = server.get(&path).await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["averageRating"].as_f64(), Some(4.0));
    assert_eq!(body["totalReviews"], 1);
    assert_eq!(body["eventCount"], 1);
}

// ============================================================================
// User Tests
// ============================================================================

#[tokio::test]
async fn test_follow_and_private_profile() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = server.signup_user().await.unwrap();
    let bob = server.signup_user().await.unwrap();

    let response = server
        .put_auth("/api/users/profile", &alice.token, &json!({ "isPrivate": true, "bio": "shh" }))
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["isPrivate"], true);

    // Stranger sees the limited view
    let profile_path = format!("/api/users/{}", alice.username);
    let profile: Value = server
        .get_auth(&profile_path, &bob.token)
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(profile.get("attendedConcerts").is_none());
    assert_eq!(profile["isPrivate"], true);

    let follow_path = format!("/api/users/follow/{}", alice.id);
    let response = server.post_empty_auth(&follow_path, &bob.token).await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["message"], "Successfully followed user");

    let response = server.post_empty_auth(&follow_path, &bob.token).await.unwrap();
    let message = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(message, "Already following this user");

    // Followers see everything
    let profile: Value = server
        .get_auth(&profile_path, &bob.token)
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(profile["attendedConcerts"].is_array());
    assert_eq!(profile["followersCount"], 1);

    let followers: Value = server
        .get(&format!("/api/users/{}/followers", alice.id))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(followers[0]["id"], bob.id.as_str());

    let response = server.delete_auth(&follow_path, &bob.token).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
    // Unfollowing again is a no-op
    let response = server.delete_auth(&follow_path, &bob.token).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .post_empty_auth(&format!("/api/users/follow/{}", bob.id), &bob.token)
        .await
        .unwrap();
    let message = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(message, "Cannot follow yourself");
}

#[tokio::test]
async fn test_user_search() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = server.signup_user().await.unwrap();

    let response = server.get("/api/users/search?q=f").await.unwrap();
    let message = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(message, "Search query must be at least 2 characters");

    let query = user.username.to_uppercase();
    let results: Value = server
        .get(&format!("/api/users/search?q={query}"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(results
        .as_array()
        .unwrap()
        .iter()
        .any(|u| u["id"] == user.id.as_str()));
}

#[tokio::test]
async fn test_concert_lists() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = server.signup_user().await.unwrap();
    let past = save_event(&server, &user, -30).await;
    let upcoming = save_event(&server, &user, 30).await;
    let past_id = past["id"].as_str().unwrap();
    let upcoming_id = upcoming["id"].as_str().unwrap();

    let response = server
        .post_empty_auth(&format!("/api/users/concerts/wishlist/{past_id}"), &user.token)
        .await
        .unwrap();
    let message = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(message, "Cannot add past concerts to wishlist");

    let response = server
        .post_empty_auth(&format!("/api/users/concerts/wishlist/{upcoming_id}"), &user.token)
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["message"], "Concert added to wishlist");

    let response = server
        .post_empty_auth(&format!("/api/users/concerts/attended/{past_id}"), &user.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .post_empty_auth(&format!("/api/users/concerts/attended/{past_id}"), &user.token)
        .await
        .unwrap();
    let message = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(message, "Concert already in attended list");

    let attended: Value = server
        .get(&format!("/api/users/{}/concerts/attended", user.id))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(attended[0]["id"], past_id);

    let response = server
        .delete_auth(&format!("/api/users/concerts/attended/{past_id}"), &user.token)
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["message"], "Concert removed from attended list");
}

// ============================================================================
// Post Tests
// ============================================================================

#[tokio::test]
async fn test_post_lifecycle() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let author = server.signup_user().await.unwrap();
    let fan = server.signup_user().await.unwrap();
    let event = save_event(&server, &author, -1).await;

    let response = server
        .post_auth(
            "/api/posts",
            &author.token,
            &post_payload("  What a night  ", event["id"].as_str()),
        )
        .await
        .unwrap();
    let post: Value = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(post["content"], "What a night");
    assert_eq!(post["event"]["title"], event["title"]);
    let post_path = format!("/api/posts/{}", post["id"].as_str().unwrap());

    // Followers see it in their feed
    server
        .post_empty_auth(&format!("/api/users/follow/{}", author.id), &fan.token)
        .await
        .unwrap();
    let feed: Value = server
        .get_auth("/api/posts/feed", &fan.token)
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(feed[0]["id"], post["id"]);

    let response = server
        .post_empty_auth(&format!("{post_path}/like"), &fan.token)
        .await
        .unwrap();
    let like: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(like["liked"], true);
    assert_eq!(like["likesCount"], 1);

    let response = server
        .post_auth(&format!("{post_path}/comments"), &fan.token, &json!({ "text": "jealous" }))
        .await
        .unwrap();
    let comment: Value = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .put_auth(&post_path, &fan.token, &json!({ "content": "hijack" }))
        .await
        .unwrap();
    let message = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(message, "You can only edit your own posts");

    // The post author may remove any comment on their post
    let response = server
        .delete_auth(
            &format!("{post_path}/comments/{}", comment["id"].as_str().unwrap()),
            &author.token,
        )
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["message"], "Comment deleted successfully");

    let response = server.delete_auth(&post_path, &author.token).await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["message"], "Post deleted successfully");

    let response = server.get_auth(&post_path, &author.token).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let profile: Value = server
        .get(&format!("/api/users/{}", author.username))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(profile["postsCount"], 0);
}

// ============================================================================
// Upload Tests
// ============================================================================

#[tokio::test]
async fn test_uploads() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = server.signup_user().await.unwrap();

    let response = server
        .upload_auth(
            "/api/users/upload-profile-picture",
            &user.token,
            "profilePicture",
            "me.png",
            "image/png",
            vec![0x89, 0x50, 0x4e, 0x47],
        )
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    let url = body["profilePicture"].as_str().unwrap();
    assert!(url.starts_with(&format!(
        "{}/storage/v1/object/public/profile-images/{}/",
        server.upstream.base_url(),
        user.id
    )));
    assert!(url.ends_with(".png"));

    // Videos are only accepted as post media
    let response = server
        .upload_auth(
            "/api/users/upload-banner",
            &user.token,
            "bannerImage",
            "clip.mp4",
            "video/mp4",
            vec![0; 16],
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server
        .upload_auth("/api/posts/media", &user.token, "media", "clip.mp4", "video/mp4", vec![0; 16])
        .await
        .unwrap();
    let media: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(media["type"], "video");

    let response = server
        .upload_auth("/api/posts/media", &user.token, "other", "a.png", "image/png", vec![1])
        .await
        .unwrap();
    let message = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(message, "No file uploaded");
}

#[tokio::test]
async fn test_stub_tokens_map_to_users() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let id = format!("sb-direct-{}", unique_suffix());
    let token = token_for(&id, &format!("direct{}", unique_suffix()));

    let response = server.post_empty_auth("/api/users/init", &token).await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["user"]["id"], id.as_str());
}
