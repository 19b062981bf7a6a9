//! Behavioural tests for the file-backed store.
//!
//! Every step opens its own [`FileKeyValueStore`] over the shared scenario
//! directory, so each assertion also proves the written documents survive
//! dropping the handle that produced them.


use std::sync::Arc;

use mapamigo::domain::{AccountService, OwnerId, User};
use mapamigo::outbound::storage::FileKeyValueStore;
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};
use tempfile::TempDir;
use test_support::sample_contact;

#[derive(Default, ScenarioState)]
struct World {
    dir: Slot<Arc<TempDir>>,
}

#[fixture]
fn world() -> World {
    World::default()
}

fn scenario_dir(world: &World) -> Arc<TempDir> {
    world.dir.get().expect("the store directory should be set")
}

fn accounts(world: &World) -> AccountService<FileKeyValueStore> {
    let store = FileKeyValueStore::open(scenario_dir(world).path()).expect("store opens");
    AccountService::new(Arc::new(store))
}

fn document_names(world: &World) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(scenario_dir(world).path())
        .expect("read dir")
        .map(|entry| {
            entry
                .expect("dir entry")
                .file_name()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    names.sort();
    names
}

// ============================================================================
// Given steps
// ============================================================================

#[given("a store directory")]
fn a_store_directory(world: &World) {
    world
        .dir
        .set(Arc::new(TempDir::new().expect("temp dir")));
}

#[given("a registered account for \"{email}\" with password \"{password}\"")]
fn a_registered_account(world: &World, email: String, password: String) {
    accounts(world)
        .create_user(User {
            name: "Ana Souza".to_owned(),
            email,
            password,
        })
        .expect("registration succeeds");
}

#[given("a session for \"{email}\" with password \"{password}\"")]
fn a_session_for(world: &World, email: String, password: String) {
    accounts(world)
        .login(&email, &password)
        .expect("login succeeds");
}

#[given("a contact of \"{email}\" named \"{name}\"")]
fn a_stored_contact(world: &World, email: String, name: String) {
    accounts(world)
        .contacts()
        .create_contact(
            &OwnerId::new(email),
            sample_contact(&name, "529.982.247-25"),
        )
        .expect("create succeeds");
}

// ============================================================================
// When steps
// ============================================================================

#[when("the account holder signs out")]
fn the_account_holder_signs_out(world: &World) {
    accounts(world).logout().expect("logout succeeds");
}

// ============================================================================
// Then steps
// ============================================================================

#[then("the registry lists \"{email}\"")]
fn the_registry_lists(world: &World, email: String) {
    let users = accounts(world).list_users().expect("list succeeds");
    assert!(users.iter().any(|user| user.email == email));
}

#[then("the session belongs to \"{email}\"")]
fn the_session_belongs_to(world: &World, email: String) {
    let session = accounts(world)
        .current_user()
        .expect("session read succeeds")
        .expect("a session exists");
    assert_eq!(session.email, email);
}

#[then("the partition of \"{email}\" has size {count:usize}")]
fn the_partition_has_size(world: &World, email: String, count: usize) {
    let contacts = accounts(world)
        .contacts()
        .list_contacts(&OwnerId::new(email))
        .expect("list succeeds");
    assert_eq!(contacts.len(), count);
}

#[then("the directory holds exactly the documents \"{names}\"")]
fn the_directory_holds_exactly(world: &World, names: String) {
    let expected: Vec<String> = names.split(", ").map(str::to_owned).collect();
    assert_eq!(document_names(world), expected);
}

#[then("the session document is gone")]
fn the_session_document_is_gone(world: &World) {
    assert!(!document_names(world).contains(&"mapamigo_current_user.json".to_owned()));
}

#[then("no session exists")]
fn no_session_exists(world: &World) {
    assert_eq!(
        accounts(world).current_user().expect("session read succeeds"),
        None
    );
}

// ============================================================================
// Scenario bindings
// ============================================================================

#[scenario(
    path = "tests/features/file_store.feature",
    name = "Accounts persist across store handles"
)]
fn accounts_persist_across_store_handles(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/file_store.feature",
    name = "Sessions persist across store handles"
)]
fn sessions_persist_across_store_handles(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/file_store.feature",
    name = "Contacts persist across store handles"
)]
fn contacts_persist_across_store_handles(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/file_store.feature",
    name = "Each key lives in its own document"
)]
fn each_key_lives_in_its_own_document(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/file_store.feature",
    name = "Signing out deletes the session document"
)]
fn signing_out_deletes_the_session_document(world: World) {
    let _ = world;
}
