use cucumber::then;

use office_lib::error_code::ErrorCode;
use office_lib::errors_service::UserServiceError;

use crate::support::world::TestWorld;

fn code_named(name: &str) -> i32 {
    match name {
        "SUCCESS" => 0,
        "OFFICE_NOT_FOUND" => ErrorCode::OfficeNotFound.code(),
        "NOT_ROLE_SELECTED" => ErrorCode::NotRoleSelected.code(),
        "ROLE_NOT_FOUND" => ErrorCode::RoleNotFound.code(),
        "USERNAME_ALREADY_EXISTS" => ErrorCode::UsernameAlreadyExists.code(),
        "EMAIL_ALREADY_EXISTS" => ErrorCode::EmailAlreadyExists.code(),
        other => panic!("unknown error code name {other}"),
    }
}

fn expect_business_error(result: Option<&UserServiceError>, name: &str) {
    let err = result.expect("operation should have failed");
    assert!(matches!(err, UserServiceError::Business(_)), "unexpected error {err:?}");
    assert_eq!(err.code(), code_named(name));
}

#[then(expr = "the page should contain {int} users")]
pub async fn page_size(world: &mut TestWorld, count: usize) {
    let page = world.page_result.as_ref().expect("Result should exist").as_ref().unwrap();
    assert!(!page.data.is_empty());
    assert_eq!(page.data.len(), count);
}

#[then(expr = "the page total should be {int}")]
pub async fn page_total(world: &mut TestWorld, total: u64) {
    let page = world.page_result.as_ref().expect("Result should exist").as_ref().unwrap();
    assert_eq!(page.total, total);
}

#[then(expr = "the user {string} should be returned")]
pub async fn user_returned(world: &mut TestWorld, username: String) {
    let response = world.find_result.as_ref().expect("Result should exist").as_ref().unwrap();
    assert!(response.is_success());
    assert_eq!(response.body.as_ref().map(|u| u.username.as_str()), Some(username.as_str()));
}

#[then("no user should be returned")]
pub async fn no_user_returned(world: &mut TestWorld) {
    let response = world.find_result.as_ref().expect("Result should exist").as_ref().unwrap();
    assert!(response.is_success());
    assert!(response.body.is_none());
}

#[then(expr = "the response code should be {string}")]
pub async fn response_code(world: &mut TestWorld, name: String) {
    let response = world.create_result.as_ref().expect("Result should exist").as_ref().unwrap();
    assert_eq!(response.header.code, code_named(&name));
    assert_eq!(response.body.is_some(), response.is_success());
}

#[then(expr = "the created user should have {int} roles")]
pub async fn created_roles(world: &mut TestWorld, count: usize) {
    let response = world.create_result.as_ref().expect("Result should exist").as_ref().unwrap();
    let user = response.body.as_ref().expect("User should exist");
    assert!(user.id > 0);
    assert_eq!(user.roles.len(), count);
}

#[then("the update should succeed")]
pub async fn update_succeeded(world: &mut TestWorld) {
    let response = world.update_result.as_ref().expect("Result should exist").as_ref().unwrap();
    assert_eq!(response.header.code, 0);
    assert_eq!(response.body, Some(true));
}

#[then(expr = "the user with id {int} should have name {string}")]
pub async fn user_has_name(world: &mut TestWorld, id: i32, name: String) {
    let service = world.create_service();
    let user = service.find(id).await.unwrap().body.expect("User should exist");
    assert_eq!(user.name, name);
}

#[then("the deletion should succeed")]
pub async fn deletion_succeeded(world: &mut TestWorld) {
    assert!(world.delete_result.as_ref().expect("Result should exist").is_ok());
}

#[then(expr = "no user should exist with id {int}")]
pub async fn user_gone(world: &mut TestWorld, id: i32) {
    let store = world.store();
    assert!(store.users.iter().all(|u| u.id != id));
    assert!(store.user_roles.iter().all(|(u, _)| *u != id));
}

#[then(expr = "the update should fail with {string}")]
pub async fn update_failed(world: &mut TestWorld, name: String) {
    let result = world.update_result.as_ref().expect("Result should exist");
    expect_business_error(result.as_ref().err(), &name);
}

#[then(expr = "the deletion should fail with {string}")]
pub async fn deletion_failed(world: &mut TestWorld, name: String) {
    let result = world.delete_result.as_ref().expect("Result should exist");
    expect_business_error(result.as_ref().err(), &name);
}
