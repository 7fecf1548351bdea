use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use engine::Engine;

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn add_friend(app: &Router, name: &str) -> String {
    let (status, user) = send(
        app,
        Method::POST,
        "/users",
        Some(json!({ "name": name, "avatar": "bottts" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    user["id"].as_str().unwrap().to_string()
}

fn app() -> Router {
    server::app(Engine::builder().build())
}

#[tokio::test]
async fn users_start_with_the_current_user() {
    let app = app();
    let (status, users) = send(&app, Method::GET, "/users", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        users,
        json!([{
            "id": "current",
            "name": "You",
            "avatar": "lorelei",
            "balance": 0.0,
            "isGroup": false,
        }])
    );
}

#[tokio::test]
async fn game_updates_balances() {
    let app = app();
    let alex = add_friend(&app, "Alex").await;
    let sarah = add_friend(&app, "Sarah").await;
    let mike = add_friend(&app, "Mike").await;

    let (status, tx) = send(
        &app,
        Method::POST,
        "/transactions",
        Some(json!({
            "type": "game",
            "gameType": "poker",
            "title": "Poker Night",
            "date": "2025-11-26",
            "involvedUsers": [
                { "userId": alex, "amount": 50 },
                { "userId": sarah, "amount": -30 },
                { "userId": mike, "amount": -19.9 },
            ],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(tx["type"], "game");
    assert_eq!(tx["totalAmount"], json!(0.0));

    let (status, balance) = send(&app, Method::GET, &format!("/balance/{mike}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(balance, json!({ "userId": mike, "balance": -19.9 }));

    let (_, games) = send(&app, Method::GET, "/transactions?type=game", None).await;
    assert_eq!(games.as_array().map(Vec::len), Some(1));
    let (_, loans) = send(&app, Method::GET, "/transactions?type=loan", None).await;
    assert_eq!(loans, json!([]));
}

#[tokio::test]
async fn unbalanced_game_is_rejected() {
    let app = app();
    let alex = add_friend(&app, "Alex").await;
    let sarah = add_friend(&app, "Sarah").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/transactions",
        Some(json!({
            "type": "game",
            "gameType": "mahjong",
            "title": "Mahjong",
            "involvedUsers": [
                { "userId": alex, "amount": 50 },
                { "userId": sarah, "amount": -45 },
            ],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "game_not_zero_sum");

    let (_, txs) = send(&app, Method::GET, "/transactions", None).await;
    assert_eq!(txs, json!([]));
    let (_, balance) = send(&app, Method::GET, &format!("/balance/{alex}"), None).await;
    assert_eq!(balance["balance"], json!(0.0));
}

#[tokio::test]
async fn malformed_bodies_are_bad_requests() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/transactions",
        Some(json!({ "type": "lottery", "title": "x", "involvedUsers": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "bad_request");

    let (status, body) = send(
        &app,
        Method::POST,
        "/transactions",
        Some(json!({
            "type": "payment",
            "gameType": "poker",
            "title": "x",
            "involvedUsers": [],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "bad_request");
}

#[tokio::test]
async fn unknown_ids_are_not_found() {
    let app = app();
    for uri in ["/users/ghost", "/transactions/ghost", "/balance/ghost"] {
        let (status, body) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body["kind"], "not_found");
    }

    let (status, body) = send(&app, Method::DELETE, "/transactions/ghost", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));
}

#[tokio::test]
async fn settle_up_partially_then_fully() {
    let app = app();
    let alex = add_friend(&app, "Alex").await;
    let (status, _) = send(
        &app,
        Method::POST,
        "/transactions",
        Some(json!({
            "type": "loan",
            "title": "Concert",
            "category": "entertainment",
            "totalAmount": 45.5,
            "splitType": "unequal",
            "involvedUsers": [{ "userId": alex, "amount": 45.5 }],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        Method::POST,
        "/settle",
        Some(json!({ "userId": alex, "amount": 45.6 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "amount_exceeds_balance");

    let (status, payment) = send(
        &app,
        Method::POST,
        "/settle",
        Some(json!({ "userId": alex, "amount": 20 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(payment["type"], "payment");
    assert_eq!(payment["title"], "Alex paid you");

    let (status, _) = send(&app, Method::POST, "/settle", Some(json!({ "userId": alex }))).await;
    assert_eq!(status, StatusCode::CREATED);
    let (_, balance) = send(&app, Method::GET, &format!("/balance/{alex}"), None).await;
    assert_eq!(balance["balance"], json!(0.0));

    let (status, body) = send(&app, Method::POST, "/settle", Some(json!({ "userId": alex }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "nothing_to_settle");

    let (_, history) = send(&app, Method::GET, &format!("/users/{alex}/transactions"), None).await;
    assert_eq!(history.as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn groups_and_current_user() {
    let app = app();
    let sarah = add_friend(&app, "Sarah").await;
    let (status, group) = send(
        &app,
        Method::POST,
        "/users",
        Some(json!({
            "name": "Roommates",
            "avatar": "initials",
            "isGroup": true,
            "members": [sarah],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(group["isGroup"], true);
    assert_eq!(group["members"], json!([sarah]));

    let (status, user) = send(
        &app,
        Method::PATCH,
        "/users/current",
        Some(json!({ "name": "Lorelei", "avatar": "micah" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["name"], "Lorelei");

    let (status, body) = send(&app, Method::DELETE, "/users/current", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "current_user_immutable");
}

#[tokio::test]
async fn stats_summarize_the_ledger() {
    let app = app();
    let alex = add_friend(&app, "Alex").await;
    let sarah = add_friend(&app, "Sarah").await;
    send(
        &app,
        Method::POST,
        "/transactions",
        Some(json!({
            "type": "game",
            "gameType": "blackjack",
            "title": "Blackjack",
            "involvedUsers": [
                { "userId": alex, "amount": 12 },
                { "userId": sarah, "amount": -20 },
                { "userId": "current", "amount": 8 },
            ],
        })),
    )
    .await;

    let (status, stats) = send(&app, Method::GET, "/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["totalOwed"], json!(20.0));
    assert_eq!(stats["totalOwedToYou"], json!(12.0));
    assert_eq!(stats["netBalance"], json!(-8.0));
    assert_eq!(stats["gameBalance"], json!(8.0));
    assert_eq!(stats["totalTransactions"], 1);
    assert_eq!(
        stats["gameStats"],
        json!({ "poker": 0, "mahjong": 0, "blackjack": 1 })
    );
    assert_eq!(stats["leaderboard"][0]["name"], "Alex");
    assert_eq!(stats["lastGame"]["title"], "Blackjack");
    assert_eq!(stats["achievements"]["biggestWinner"]["name"], "Alex");
}

#[tokio::test]
async fn serves_requests_on_a_bound_listener() {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(server::run_with_listener(Engine::builder().build(), listener));

    let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
    stream
        .write_all(b"GET /users/current HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
        .await
        .unwrap();
    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();

    assert!(response.starts_with("HTTP/1.1 200"), "{response}");
    assert!(response.contains("\"id\":\"current\""), "{response}");
}
