// SPDX-License-Identifier: Apache-2.0

use regdesk_model::{Cpf, DbState, Document, SequentialIds};
use regdesk_store::{
    default_database_path, CorruptionPolicy, JsonFileStore, MemoryStore, StateStore,
    StoreErrorCode, UploadDir, UploadName,
};
use std::fs;
use tempfile::tempdir;

fn cpf(raw: &str) -> Cpf {
    Cpf::parse(raw).expect("cpf")
}

#[test]
fn missing_document_is_seeded_and_persisted() {
    let tmp = tempdir().expect("tempdir");
    let path = default_database_path(&tmp.path().join("nested"));
    let store = JsonFileStore::new(&path).with_bootstrap_users(vec![cpf("74892016357")]);

    let state = store.load().expect("load");
    assert_eq!(state.etiquetas.len(), 4);
    assert!(state.is_authorized("74892016357"));
    assert!(path.exists(), "first load must persist the seeded document");

    let reread: DbState =
        serde_json::from_slice(&fs::read(&path).expect("read")).expect("parse");
    assert_eq!(reread, state);
}

#[test]
fn save_then_load_returns_what_was_written() {
    let tmp = tempdir().expect("tempdir");
    let store = JsonFileStore::new(tmp.path().join("database.json"));
    let mut state = store.load().expect("load");
    state
        .reguladores_mut()
        .create(Document::default(), &SequentialIds::default())
        .expect("create");
    store.save(&state).expect("save");

    assert_eq!(store.load().expect("reload"), state);
    assert!(
        !tmp.path().join("database.json.tmp").exists(),
        "staging file must not outlive the rename"
    );
}

#[test]
fn corrupt_document_serves_empty_state_by_default() {
    let tmp = tempdir().expect("tempdir");
    let path = tmp.path().join("database.json");
    fs::write(&path, b"{ not json").expect("write");
    let store = JsonFileStore::new(&path);

    let state = store.load().expect("load");
    assert_eq!(state, DbState::empty());
    assert_eq!(fs::read(&path).expect("read"), b"{ not json");
}

#[test]
fn empty_document_is_treated_as_corrupt() {
    let tmp = tempdir().expect("tempdir");
    let path = tmp.path().join("database.json");
    fs::write(&path, b"  \n").expect("write");

    assert_eq!(
        JsonFileStore::new(&path).load().expect("load"),
        DbState::empty()
    );
    let err = JsonFileStore::new(&path)
        .with_policy(CorruptionPolicy::Fail)
        .load()
        .expect_err("strict");
    assert_eq!(err.code, StoreErrorCode::Corrupt);
}

#[test]
fn strict_policy_surfaces_parse_failures() {
    let tmp = tempdir().expect("tempdir");
    let path = tmp.path().join("database.json");
    fs::write(&path, br#"{"providers": 7}"#).expect("write");
    let err = JsonFileStore::new(&path)
        .with_policy(CorruptionPolicy::Fail)
        .load()
        .expect_err("strict");
    assert_eq!(err.code, StoreErrorCode::Corrupt);
}

#[test]
fn legacy_document_without_new_keys_loads() {
    let tmp = tempdir().expect("tempdir");
    let path = tmp.path().join("database.json");
    fs::write(
        &path,
        br#"{"providers": [], "reports": [], "reguladores": [], "etiquetas": {}}"#,
    )
    .expect("write");
    let state = JsonFileStore::new(&path).load().expect("load");
    assert!(state.users.is_empty());
    assert!(state.waiting_list.is_empty());
}

#[test]
fn memory_store_seeds_once_and_counts_saves() {
    let store = MemoryStore::new().with_bootstrap_users(vec![cpf("1")]);
    let mut state = store.load().expect("load");
    assert!(state.is_authorized("1"));
    assert_eq!(store.save_count(), 0);

    state.add_user(cpf("2")).expect("add");
    store.save(&state).expect("save");
    assert_eq!(store.save_count(), 1);
    assert!(store.load().expect("reload").is_authorized("2"));
}

#[test]
fn failing_memory_store_rejects_writes() {
    let store = MemoryStore::new().failing_saves();
    let state = store.load().expect("load");
    let err = store.save(&state).expect_err("save");
    assert_eq!(err.code, StoreErrorCode::Io);
    assert_eq!(store.save_count(), 0);
}

#[test]
fn upload_dir_is_created_on_first_write() {
    let tmp = tempdir().expect("tempdir");
    let uploads = UploadDir::new(tmp.path().join("uploads"));
    let name = UploadName::for_record("report_00000001", "relatorio.pdf").expect("name");

    let path = uploads.write(&name, b"%PDF-1.4").expect("write");
    assert_eq!(path, tmp.path().join("uploads/report_00000001_relatorio.pdf"));
    assert_eq!(uploads.read(&name).expect("read"), b"%PDF-1.4");

    assert!(uploads.remove(&name));
    assert!(!uploads.remove(&name));
    let err = uploads.read(&name).expect_err("gone");
    assert_eq!(err.code, StoreErrorCode::NotFound);
}

#[test]
fn loosely_typed_document_loads_and_saves_without_losing_records() {
    let tmp = tempdir().expect("tempdir");
    let path = tmp.path().join("database.json");
    let raw = serde_json::json!({
        "providers": [{"id": "provider_1", "nome": "Hospital A", "execution": {"2024-01": 3}}],
        "reports": [],
        "reguladores": [],
        "etiquetas": {"aih-mac": {"history": [{"qty": 10}], "current_start": 282510110844_u64}},
        "bloqueio_providers": [],
        "bloqueio_alteracoes": [],
        "users": ["74892016357"],
        "waiting_list": [{"id": "wait_1", "name": "Ortopedia", "count": "12"}]
    });
    fs::write(&path, serde_json::to_vec(&raw).expect("encode")).expect("write");
    let store = JsonFileStore::new(&path).with_policy(CorruptionPolicy::Fail);
    assert_eq!(store.policy(), CorruptionPolicy::Fail);

    let mut state = store.load().expect("loosely typed values are not corruption");
    assert_eq!(state.providers.len(), 1);
    assert!(state.is_authorized("74892016357"));
    state
        .reguladores_mut()
        .create(Document::default(), &SequentialIds::default())
        .expect("create");
    store.save(&state).expect("save");

    let written: serde_json::Value =
        serde_json::from_slice(&fs::read(store.path()).expect("read")).expect("parse");
    assert_eq!(written["providers"][0]["id"], "provider_1");
    assert_eq!(written["providers"][0]["execution"]["2024-01"], 3);
    assert_eq!(written["users"][0], "74892016357");
    assert_eq!(written["waiting_list"][0]["count"], "12");
    assert_eq!(
        written["etiquetas"]["aih-mac"]["current_start"],
        282510110844_u64
    );
    assert_eq!(written["reguladores"].as_array().map(Vec::len), Some(1));
}
