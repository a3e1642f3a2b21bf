#![cfg(feature = "server")]

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use poker_equity::equity::SimulationConfig;
use poker_equity::server::routes;
use serde_json::{json, Value};

fn simulation() -> web::Data<SimulationConfig> {
    web::Data::new(SimulationConfig::default().with_seed(3).with_trials(2_000).with_workers(2))
}

async fn post(uri: &str, body: Value) -> (StatusCode, Value) {
    let app = test::init_service(App::new().app_data(simulation()).configure(routes)).await;
    let req = test::TestRequest::post().uri(uri).set_json(body).to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status();
    let body: Value = test::read_body_json(resp).await;
    (status, body)
}

#[actix_web::test]
async fn evaluate_royal_flush() {
    let (status, body) = post("/api/evaluate", json!({ "cards": ["AH", "KH", "QH", "JH", "10H"] })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["hand_name"], "Royal Flush");
    assert_eq!(body["hand_type"], "Straight Flush");
    assert_eq!(body["sorted_ranks"], json!(["A", "K", "Q", "J", "10"]));
    assert!(body["win_rate_error"].is_string());
    assert!(body.get("win_rate").is_none());
}

#[actix_web::test]
async fn evaluate_against_opponent() {
    let (status, body) = post(
        "/api/evaluate",
        json!({ "cards": ["AH", "AS", "2C", "7D", "9S", "3H", "4D"], "opponent_cards": ["KH", "KS"] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["simulations"], 1);
    assert_eq!(body["win_rate"], 1.0);
    assert!(body.get("win_rate_error").is_none());
}

#[actix_web::test]
async fn evaluate_rejects_duplicates() {
    let (status, body) = post("/api/evaluate", json!({ "cards": ["2H", "2H", "3C", "4D", "5S"] })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "duplicate card: 2H");
}

#[actix_web::test]
async fn evaluate_rejects_bad_tokens() {
    let (status, body) = post("/api/evaluate", json!({ "cards": ["1H", "KH", "QH", "JH", "10H"] })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid card token: '1H'");
}

#[actix_web::test]
async fn malformed_json_gets_an_error_body() {
    let (status, body) = post("/api/evaluate", json!({ "cards": "AH KH" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[actix_web::test]
async fn calculate_heads_up() {
    let (status, body) =
        post("/api/calculate", json!({ "player1_cards": ["AH", "AS"], "player2_cards": ["KH", "KS"] })).await;
    assert_eq!(status, StatusCode::OK);
    let p1 = body["win_rates"]["player1_wins"].as_f64().unwrap();
    assert!((0.75..0.89).contains(&p1), "{body}");
    assert_eq!(body["win_rates"]["simulations"], 2_000);
    assert_eq!(body["player1"]["final_hand"].as_array().unwrap().len(), 7);
    assert!(body["player1"]["hand_name"].is_string());
    let probs = body["player2"]["probabilities"].as_object().unwrap();
    assert_eq!(probs.len(), 9);
    assert!(probs.contains_key("High Card") && probs.contains_key("Straight Flush"));
    assert_eq!(body["seed"], 3);
}

#[actix_web::test]
async fn calculate_draw_game_is_inferred() {
    let (status, body) = post(
        "/api/calculate",
        json!({ "player1_cards": ["2H", "3D", "4S", "5C"], "player2_cards": ["KH", "KD", "KS"] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["game"], "draw");
    assert_eq!(body["mode"], "exact");
    assert_eq!(body["player2"]["final_hand"].as_array().unwrap().len(), 5);
}

#[actix_web::test]
async fn calculate_without_cards_is_rejected() {
    let (status, body) = post("/api/calculate", json!({ "player1_cards": [], "player2_cards": [] })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "no players specified");
}

#[actix_web::test]
async fn calculate_rejects_shared_cards() {
    let (status, body) =
        post("/api/calculate", json!({ "player1_cards": ["AH", "KD"], "player2_cards": ["AH", "QS"] })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "duplicate card: AH");
}

#[actix_web::test]
async fn calculate_rejects_six_cards() {
    let (status, body) = post(
        "/api/calculate",
        json!({ "player1_cards": ["2H", "3H", "4H", "5H", "6H", "7H"], "player2_cards": [] }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("at most 5"));
}
