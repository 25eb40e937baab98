use cucumber::when;

use office_lib::entities::{PaginatedRequest, User};

use crate::support::world::TestWorld;

#[when(expr = "I list users with limit {int} and offset {int}")]
pub async fn list_users(world: &mut TestWorld, limit: u32, offset: u32) {
    let service = world.create_service();
    world.page_result = Some(service.find_users(PaginatedRequest { limit, offset }).await);
}

#[when(expr = "I look up the user with id {int}")]
pub async fn find_user(world: &mut TestWorld, id: i32) {
    let service = world.create_service();
    world.find_result = Some(service.find(id).await);
}

#[when("I create the user")]
pub async fn create_user(world: &mut TestWorld) {
    let user = world.draft.clone().expect("a new user should be prepared");
    let service = world.create_service();
    world.create_result = Some(service.create(user).await);
}

#[when(expr = "I rename the user with id {int} to {string}")]
pub async fn rename_user(world: &mut TestWorld, id: i32, name: String) {
    let service = world.create_service();
    let current = service.find(id).await.expect("lookup should not fail").body;
    let user = User {
        name,
        ..current.unwrap_or(User { id, ..User::default() })
    };
    world.update_result = Some(service.update(user).await);
}

#[when(expr = "I delete the user with id {int}")]
pub async fn delete_user(world: &mut TestWorld, id: i32) {
    let service = world.create_service();
    world.delete_result = Some(service.delete(id).await);
}
