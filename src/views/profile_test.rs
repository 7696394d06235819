use super::*;
use crate::api::{GET_USER, UPDATE_USER};
use crate::store::TokenStore;
use crate::test_support::MockService;
use reqwest::Method;
use serde_json::json;

fn filled(old: &str, login: &str, new: &str, confirm: &str) -> ProfileView {
    let mut view = ProfileView::new();
    view.form = ProfileForm {
        old_password: old.into(),
        login: login.into(),
        new_password: new.into(),
        confirm_password: confirm.into(),
    };
    view
}

#[tokio::test]
async fn load_prefills_login() {
    let mock = MockService::start().await;
    mock.respond(Method::GET, GET_USER, 200, json!({ "login": "ann" }));
    let (api, _store) = mock.api_with_token(Some("jwt"));
    let mut view = ProfileView::new();

    assert_eq!(view.load(&api).await.unwrap(), None);
    assert_eq!(view.form.login, "ann");
    assert_eq!(view.notice, None);
}

#[tokio::test]
async fn load_escalates_expired_session() {
    let mock = MockService::start().await;
    mock.respond(Method::GET, GET_USER, 401, json!({ "message": "expired" }));
    let (api, _store) = mock.api_with_token(Some("old"));
    let mut view = ProfileView::new();

    let err = view.load(&api).await.unwrap_err();
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn submit_replaces_token_and_reloads_profile() {
    let mock = MockService::start().await;
    mock.respond(Method::POST, UPDATE_USER, 200, json!({ "access": "jwt-2", "message": "ok" }));
    let (api, store) = mock.api_with_token(Some("jwt-1"));
    let mut view = filled("old", "ann", "new", "new");

    assert_eq!(view.submit(&api).await.unwrap(), Some(View::Profile));
    assert_eq!(store.token().as_deref(), Some("jwt-2"));
    assert_eq!(view.notice, Some(Notice::success(SUCCESS)));

    let sent = mock.last_request(UPDATE_USER);
    assert_eq!(sent.authorization.as_deref(), Some("Bearer jwt-1"));
    assert_eq!(sent.body, json!({ "old_password": "old", "login": "ann", "password": "new" }));
}

#[tokio::test]
async fn validation_errors_block_submission() {
    let mock = MockService::start().await;
    let (api, _store) = mock.api_with_token(Some("jwt"));

    let mut view = filled("", "ann", "", "");
    view.submit(&api).await.unwrap();
    assert_eq!(view.notice, Some(Notice::error(validate::MISSING_OLD_PASSWORD)));

    let mut view = filled("old", "ann", "a", "b");
    view.submit(&api).await.unwrap();
    assert_eq!(view.notice, Some(Notice::error(validate::PASSWORD_MISMATCH)));

    let mut view = filled("old", "", "", "");
    view.submit(&api).await.unwrap();
    assert_eq!(view.notice, Some(Notice::error(validate::NO_CHANGES)));

    assert_eq!(mock.hits(UPDATE_USER), 0);
}

#[tokio::test]
async fn rejected_update_keeps_old_token() {
    let mock = MockService::start().await;
    mock.respond(Method::POST, UPDATE_USER, 400, json!({ "message": "wrong password" }));
    let (api, store) = mock.api_with_token(Some("jwt-1"));
    let mut view = filled("bad", "ann", "", "");

    assert_eq!(view.submit(&api).await.unwrap(), None);
    assert_eq!(view.notice, Some(Notice::error(UPDATE_FAILED)));
    assert_eq!(store.token().as_deref(), Some("jwt-1"));
}
