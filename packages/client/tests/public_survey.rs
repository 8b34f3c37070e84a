//! Public survey integration tests.
//!
//! Opening a shared survey and submitting answers as JSON or multipart.

mod fixtures;

use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Multipart, State},
    http::StatusCode,
    routing::{get, post},
};
use fixtures::{TestServer, api_client};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use surveypro_client::{
    domain::{FileAttachment, QuestionId, ShareToken, SubmissionEncoding},
    infrastructure::{
        repository::http::HttpPublicSurveyRepository, session::InMemorySessionStore,
    },
    usecase::{SubmitError, TakeSurveyUseCase},
};

type Received<T> = Arc<Mutex<Vec<T>>>;

/// (field name, file name, body)
type PartRecord = (String, Option<String>, String);

fn survey_json(status: &str, questions: Value) -> Value {
    json!({
        "id": 12,
        "title": "Event feedback",
        "status": status,
        "questions": questions,
    })
}

fn take_survey(server: &TestServer) -> TakeSurveyUseCase {
    let client = api_client(server, Arc::new(InMemorySessionStore::default()));
    TakeSurveyUseCase::new(Arc::new(HttpPublicSurveyRepository::new(client)), 1024)
}

async fn record_json(State(received): State<Received<Value>>, Json(body): Json<Value>) -> Json<Value> {
    received.lock().unwrap().push(body);
    Json(json!({ "id": 99 }))
}

async fn record_parts(
    State(received): State<Received<PartRecord>>,
    mut multipart: Multipart,
) -> StatusCode {
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let bytes = field.bytes().await.unwrap();
        received
            .lock()
            .unwrap()
            .push((name, file_name, String::from_utf8_lossy(&bytes).to_string()));
    }
    StatusCode::CREATED
}

#[tokio::test]
async fn test_submit_json_when_survey_has_no_file_question() {
    // テスト項目: ファイル質問が無いサーベイは JSON で送信される
    // given (前提条件):
    let received = Received::<Value>::default();
    let router = Router::new()
        .route(
            "/api/public/forms/{token}",
            get(|| async {
                Json(survey_json(
                    "active",
                    json!([
                        {"id": 1, "type": "text", "content": "Your name", "required": true},
                        {"id": 2, "type": "yes_no", "content": "Come again?"}
                    ]),
                ))
            }),
        )
        .route("/api/public/forms/{token}/submissions", post(record_json))
        .with_state(received.clone());
    let server = TestServer::start(router).await;
    let take = take_survey(&server);

    // when (操作):
    let mut sheet = take.open(&ShareToken::new("tok").unwrap()).await.unwrap();
    sheet.set_text(&QuestionId::new("1").unwrap(), "Ana").unwrap();
    sheet.set_yes_no(&QuestionId::new("2").unwrap(), true).unwrap();
    let receipt = take.submit(&mut sheet).await.unwrap();

    // then (期待する結果):
    assert_eq!(receipt.encoding, SubmissionEncoding::Json);
    assert_eq!(receipt.submission_id.as_deref(), Some("99"));
    assert_eq!(
        received.lock().unwrap().clone(),
        vec![json!({
            "answers": [
                {"question_id": "1", "value": "Ana"},
                {"question_id": "2", "value": "yes"}
            ]
        })]
    );

    // 公開エンドポイントには認証ヘッダを付けない
    assert!(server.requests().iter().all(|r| r.authorization.is_none()));
}

#[tokio::test]
async fn test_submit_multipart_with_selected_file() {
    // テスト項目: ファイル質問があるサーベイは answers パートとファイルパートで送信される
    // given (前提条件):
    let dir = tempfile::tempdir().unwrap();
    let cv = dir.path().join("cv.txt");
    std::fs::write(&cv, "hello").unwrap();

    let received = Received::<PartRecord>::default();
    let router = Router::new()
        .route(
            "/api/public/forms/{token}",
            get(|| async {
                Json(survey_json(
                    "active",
                    json!([
                        {"id": "q1", "type": "text", "content": "Name"},
                        {"id": "q2", "type": "file_upload", "content": "CV"}
                    ]),
                ))
            }),
        )
        .route("/api/public/forms/{token}/submissions", post(record_parts))
        .with_state(received.clone());
    let server = TestServer::start(router).await;
    let take = take_survey(&server);

    // when (操作):
    let mut sheet = take.open(&ShareToken::new("tok").unwrap()).await.unwrap();
    sheet.set_text(&QuestionId::new("q1").unwrap(), "Ana").unwrap();
    sheet
        .select_file(
            &QuestionId::new("q2").unwrap(),
            FileAttachment::from_path(&cv).unwrap(),
        )
        .unwrap();
    let receipt = take.submit(&mut sheet).await.unwrap();

    // then (期待する結果):
    assert_eq!(receipt.encoding, SubmissionEncoding::Multipart);
    assert_eq!(receipt.submission_id, None);

    let parts = received.lock().unwrap().clone();
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0].0, "answers");
    let answers: Value = serde_json::from_str(&parts[0].2).unwrap();
    assert_eq!(
        answers,
        json!({
            "answers": [
                {"question_id": "q1", "value": "Ana"},
                {"question_id": "q2", "value": "cv.txt"}
            ]
        })
    );
    assert_eq!(
        parts[1],
        (
            "file_q2".to_string(),
            Some("cv.txt".to_string()),
            "hello".to_string()
        )
    );
}

#[tokio::test]
async fn test_unanswered_file_question_still_uses_multipart() {
    // テスト項目: ファイル質問が未回答でも multipart で送信される
    // given (前提条件):
    let received = Received::<PartRecord>::default();
    let router = Router::new()
        .route(
            "/api/public/forms/{token}",
            get(|| async {
                Json(survey_json(
                    "active",
                    json!([
                        {"id": "q1", "type": "text", "content": "Name", "required": true},
                        {"id": "q2", "type": "file_upload", "content": "Photo"}
                    ]),
                ))
            }),
        )
        .route("/api/public/forms/{token}/submissions", post(record_parts))
        .with_state(received.clone());
    let server = TestServer::start(router).await;
    let take = take_survey(&server);

    // when (操作):
    let mut sheet = take.open(&ShareToken::new("tok").unwrap()).await.unwrap();
    sheet.set_text(&QuestionId::new("q1").unwrap(), "Ana").unwrap();
    let receipt = take.submit(&mut sheet).await.unwrap();

    // then (期待する結果):
    assert_eq!(receipt.encoding, SubmissionEncoding::Multipart);
    let names: Vec<String> = received
        .lock()
        .unwrap()
        .iter()
        .map(|(name, _, _)| name.clone())
        .collect();
    assert_eq!(names, vec!["answers".to_string()]);
}

#[tokio::test]
async fn test_validation_errors_block_submission() {
    // テスト項目: 必須質問が未回答なら送信せずに質問ごとのエラーを返す
    // given (前提条件):
    let router = Router::new()
        .route(
            "/api/public/forms/{token}",
            get(|| async {
                Json(survey_json(
                    "active",
                    json!([{"id": "q1", "type": "text", "content": "Name", "required": true}]),
                ))
            }),
        )
        .route(
            "/api/public/forms/{token}/submissions",
            post(|| async { StatusCode::CREATED }),
        );
    let server = TestServer::start(router).await;
    let take = take_survey(&server);

    // when (操作):
    let mut sheet = take.open(&ShareToken::new("tok").unwrap()).await.unwrap();
    let result = take.submit(&mut sheet).await;

    // then (期待する結果):
    let Err(SubmitError::Validation(errors)) = result else {
        panic!("expected validation errors, got {result:?}");
    };
    assert!(errors.contains_key(&QuestionId::new("q1").unwrap()));
    assert_eq!(
        server.count("POST", "/api/public/forms/tok/submissions"),
        0
    );
}

#[tokio::test]
async fn test_public_survey_without_status_accepts_answers() {
    // テスト項目: 状態の無い公開サーベイは回答を受け付ける
    // given (前提条件):
    let received = Received::<Value>::default();
    let router = Router::new()
        .route(
            "/api/public/forms/{token}",
            get(|| async {
                Json(json!({
                    "id": 12,
                    "title": "Feedback",
                    "questions": [{"id": 1, "type": "text", "content": "Comment"}],
                }))
            }),
        )
        .route("/api/public/forms/{token}/submissions", post(record_json))
        .with_state(received.clone());
    let server = TestServer::start(router).await;
    let take = take_survey(&server);

    // when (操作):
    let mut sheet = take.open(&ShareToken::new("tok").unwrap()).await.unwrap();
    sheet.set_text(&QuestionId::new("1").unwrap(), "Great").unwrap();
    let receipt = take.submit(&mut sheet).await.unwrap();

    // then (期待する結果):
    assert_eq!(receipt.submission_id.as_deref(), Some("99"));
    assert_eq!(
        received.lock().unwrap().clone(),
        vec![json!({"answers": [{"question_id": "1", "value": "Great"}]})]
    );
}

#[tokio::test]
async fn test_archived_survey_is_closed() {
    // テスト項目: アーカイブ済みのサーベイは回答を受け付けない
    // given (前提条件):
    let router = Router::new().route(
        "/api/public/forms/{token}",
        get(|| async { Json(survey_json("archived", json!([]))) }),
    );
    let server = TestServer::start(router).await;
    let take = take_survey(&server);

    // when (操作):
    let result = take.open(&ShareToken::new("tok").unwrap()).await;

    // then (期待する結果):
    assert!(matches!(result, Err(SubmitError::SurveyClosed)));
}

#[tokio::test]
async fn test_unknown_share_token_is_not_found() {
    // テスト項目: 存在しない共有トークンは取得エラーになる
    let server = TestServer::start(Router::new()).await;
    let take = take_survey(&server);

    let result = take.open(&ShareToken::new("missing").unwrap()).await;

    assert!(matches!(result, Err(SubmitError::Fetch(_))));
}
