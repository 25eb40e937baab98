use cucumber::given;

use office_lib::entities::{Role, User};
use office_lib::repository::models::{RoleRow, UserRow};

use crate::support::world::TestWorld;

fn parse_role_ids(list: &str) -> Vec<i32> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse().expect("role id should be numeric"))
        .collect()
}

#[given("the following roles exist:")]
pub async fn roles_exist(world: &mut TestWorld, step: &cucumber::gherkin::Step) {
    if let Some(table) = &step.table {
        let mut store = world.store();
        for row in table.rows.iter().skip(1) {
            store.roles.push(RoleRow {
                id: row[0].parse().expect("role id should be numeric"),
                name: row[1].clone(),
            });
        }
    }
}

#[given("the following users exist:")]
pub async fn users_exist(world: &mut TestWorld, step: &cucumber::gherkin::Step) {
    if let Some(table) = &step.table {
        let mut store = world.store();
        for row in table.rows.iter().skip(1) {
            let id: i32 = row[0].parse().expect("user id should be numeric");
            store.users.push(UserRow {
                id,
                username: row[1].clone(),
                email: row[2].clone(),
                name: row[1].clone(),
                last_name: String::new(),
            });
            for role_id in parse_role_ids(&row[3]) {
                store.user_roles.push((id, role_id));
            }
        }
    }
}

#[given(expr = "a new user {string} with email {string} and roles {string}")]
pub async fn new_user(world: &mut TestWorld, username: String, email: String, roles: String) {
    world.draft = Some(User {
        id: 0,
        username,
        email,
        name: "Joas Jair".to_string(),
        last_name: "Puga".to_string(),
        roles: parse_role_ids(&roles).into_iter().map(Role::with_id).collect(),
    });
}
