use serde_json::json;

use crate::{
    common_models::{did::DidValue, job::JobId},
    state::{ResultState, Status, DEFAULT_FAILURE_CODE},
};

#[test]
fn test_finished_state_map_omits_absent_fields() {
    let map = ResultState::finished(DidValue::from("did:example:123"))
        .into_map()
        .unwrap();

    assert_eq!(
        json!({ "status": "finished", "did": "did:example:123" }),
        serde_json::Value::Object(map)
    );
}

#[test]
fn test_state_map_parses_back() {
    let mut state = ResultState::action_required(JobId::from("job-7"));
    state.did_registration_metadata = Some(
        json!({ "duration": 12 })
            .as_object()
            .cloned()
            .unwrap_or_default(),
    );

    let map = state.clone().into_map().unwrap();
    assert_eq!(Some(&json!("action-required")), map.get("status"));

    assert_eq!(state, ResultState::from_map(map).unwrap());
}

#[test]
fn test_unknown_fields_survive_map_conversion() {
    let map = json!({
        "status": "finished",
        "did": "did:example:123",
        "auditId": "a-1"
    })
    .as_object()
    .cloned()
    .unwrap_or_default();

    let state = ResultState::from_map(map).unwrap();
    assert_eq!(Some(&json!("a-1")), state.extra.get("auditId"));

    assert_eq!(
        json!({ "status": "finished", "did": "did:example:123", "auditId": "a-1" }),
        serde_json::Value::Object(state.into_map().unwrap())
    );
}

#[test]
fn test_from_map_rejects_unknown_status() {
    let map = json!({ "status": "pending" })
        .as_object()
        .cloned()
        .unwrap_or_default();

    assert!(ResultState::from_map(map).is_err());
}

#[test]
fn test_normalized_echoes_request_job_id() {
    let state = ResultState::finished(DidValue::from("did:example:123"))
        .normalized(Some(&JobId::from("job-1")));

    assert_eq!(Some(JobId::from("job-1")), state.job_id);
    assert_eq!(Status::Finished, state.status);
}

#[test]
fn test_normalized_keeps_driver_job_id() {
    let state = ResultState::action_required(JobId::from("driver-job"))
        .normalized(Some(&JobId::from("request-job")));

    assert_eq!(Some(JobId::from("driver-job")), state.job_id);
    assert_eq!(Status::ActionRequired, state.status);
}

#[test]
fn test_normalized_error_wins_over_document() {
    let mut state = ResultState::finished(DidValue::from("did:example:123"));
    state.did_document = Some(json!({ "id": "did:example:123" }));
    state.error = Some(crate::state::ErrorState {
        code: "LedgerUnavailable".to_owned(),
        message: "ledger down".to_owned(),
    });

    let state = state.normalized(None);

    assert_eq!(Status::Failed, state.status);
    assert_eq!(None, state.did);
    assert_eq!(None, state.did_document);
    assert_eq!("LedgerUnavailable", state.error.unwrap().code);
}

#[test]
fn test_normalized_failed_without_error_gets_default_error() {
    let mut state = ResultState::finished(DidValue::from("did:example:123"));
    state.status = Status::Failed;

    let state = state.normalized(None);

    assert_eq!(DEFAULT_FAILURE_CODE, state.error.unwrap().code);
}

#[test]
fn test_normalized_action_required_without_job_id_fails() {
    let mut state = ResultState::action_required(JobId::from("unused"));
    state.job_id = None;

    let state = state.normalized(None);

    assert!(state.is_failed());
    assert!(state.error.unwrap().message.contains("without a job id"));
}
