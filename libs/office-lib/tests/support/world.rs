use async_trait::async_trait;
use cucumber::World;
use mockall::mock;
use std::sync::{Arc, Mutex, MutexGuard};

use office_lib::entities::{GenericResponse, PaginatedRequest, PaginatedResponse, User};
use office_lib::errors_service::UserServiceError;
use office_lib::repository::errors::UserRepositoryError;
use office_lib::repository::models::{NewUserRow, RoleRow, UserRoleMapping, UserRow};
use office_lib::repository::traits::{RoleRepositoryTrait, UserRepositoryTrait};
use office_lib::user_service::UserService;

// Mock repositories
mock! {
    #[derive(Debug)]
    pub UserRepo {}

    #[async_trait]
    impl UserRepositoryTrait for UserRepo {
        async fn create_user(&self, user: &NewUserRow) -> Result<UserRow, UserRepositoryError>;
        async fn get_user(&self, user_id: i32) -> Result<Option<UserRow>, UserRepositoryError>;
        async fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>, UserRepositoryError>;
        async fn get_user_by_email(&self, email: &str) -> Result<Option<UserRow>, UserRepositoryError>;
        async fn update_user_with_roles(&self, user: &UserRow, role_ids: &[i32]) -> Result<(), UserRepositoryError>;
        async fn delete_user(&self, user_id: i32) -> Result<(), UserRepositoryError>;
        async fn get_users_paginated(&self, request: PaginatedRequest) -> Result<(Vec<UserRow>, u64), UserRepositoryError>;
    }
}

mock! {
    #[derive(Debug)]
    pub RoleRepo {}

    #[async_trait]
    impl RoleRepositoryTrait for RoleRepo {
        async fn get_role(&self, role_id: i32) -> Result<Option<RoleRow>, UserRepositoryError>;
        async fn get_roles_for_user(&self, user_id: i32) -> Result<Vec<RoleRow>, UserRepositoryError>;
        async fn get_roles_for_users(&self, user_ids: &[i32]) -> Result<Vec<UserRoleMapping>, UserRepositoryError>;
        async fn get_roles_paginated(&self, request: PaginatedRequest) -> Result<(Vec<RoleRow>, u64), UserRepositoryError>;
    }
}

/// Rows the mocks read from and write to during a scenario.
#[derive(Debug, Default)]
pub struct Store {
    pub users: Vec<UserRow>,
    pub roles: Vec<RoleRow>,
    pub user_roles: Vec<(i32, i32)>,
}

impl Store {
    fn next_user_id(&self) -> i32 {
        self.users.iter().map(|u| u.id).max().unwrap_or(0) + 1
    }

    fn roles_of(&self, user_id: i32) -> Vec<RoleRow> {
        self.user_roles
            .iter()
            .filter(|(u, _)| *u == user_id)
            .filter_map(|(_, r)| self.roles.iter().find(|role| role.id == *r).cloned())
            .collect()
    }
}

fn page<T: Clone>(rows: &[T], request: PaginatedRequest) -> Vec<T> {
    rows.iter()
        .skip(request.offset as usize)
        .take(request.limit as usize)
        .cloned()
        .collect()
}

type Shared = Arc<Mutex<Store>>;

fn lock(store: &Shared) -> MutexGuard<'_, Store> {
    store.lock().unwrap()
}

#[derive(Debug, Default, World)]
pub struct TestWorld {
    // State
    pub store: Shared,
    pub draft: Option<User>,

    // Results
    pub create_result: Option<Result<GenericResponse<User>, UserServiceError>>,
    pub find_result: Option<Result<GenericResponse<User>, UserServiceError>>,
    pub update_result: Option<Result<GenericResponse<bool>, UserServiceError>>,
    pub delete_result: Option<Result<(), UserServiceError>>,
    pub page_result: Option<Result<PaginatedResponse<User>, UserServiceError>>,
}

impl TestWorld {
    pub fn store(&self) -> MutexGuard<'_, Store> {
        lock(&self.store)
    }

    pub fn create_service(&self) -> UserService<MockUserRepo, MockRoleRepo> {
        let mut user_repo = MockUserRepo::new();
        let mut role_repo = MockRoleRepo::new();

        let store = self.store.clone();
        user_repo.expect_create_user().returning(move |new_user| {
            let mut store = lock(&store);
            let row = UserRow {
                id: store.next_user_id(),
                username: new_user.username.clone(),
                email: new_user.email.clone(),
                name: new_user.name.clone(),
                last_name: new_user.last_name.clone(),
            };
            store.users.push(row.clone());
            for role_id in &new_user.role_ids {
                store.user_roles.push((row.id, *role_id));
            }
            Ok(row)
        });

        let store = self.store.clone();
        user_repo
            .expect_get_user()
            .returning(move |id| Ok(lock(&store).users.iter().find(|u| u.id == id).cloned()));

        let store = self.store.clone();
        user_repo.expect_get_user_by_username().returning(move |username| {
            Ok(lock(&store).users.iter().find(|u| u.username == username).cloned())
        });

        let store = self.store.clone();
        user_repo.expect_get_user_by_email().returning(move |email| {
            Ok(lock(&store).users.iter().find(|u| u.email == email).cloned())
        });

        let store = self.store.clone();
        user_repo.expect_update_user_with_roles().returning(move |row, role_ids| {
            let mut store = lock(&store);
            let existing = store
                .users
                .iter_mut()
                .find(|u| u.id == row.id)
                .ok_or(UserRepositoryError::NotFound)?;
            *existing = row.clone();
            if !role_ids.is_empty() {
                store.user_roles.retain(|(u, _)| *u != row.id);
                store.user_roles.extend(role_ids.iter().map(|r| (row.id, *r)));
            }
            Ok(())
        });

        let store = self.store.clone();
        user_repo.expect_delete_user().returning(move |user_id| {
            let mut store = lock(&store);
            let before = store.users.len();
            store.users.retain(|u| u.id != user_id);
            if store.users.len() == before {
                return Err(UserRepositoryError::NotFound);
            }
            store.user_roles.retain(|(u, _)| *u != user_id);
            Ok(())
        });

        let store = self.store.clone();
        user_repo.expect_get_users_paginated().returning(move |request| {
            let store = lock(&store);
            Ok((page(&store.users, request), store.users.len() as u64))
        });

        let store = self.store.clone();
        role_repo
            .expect_get_role()
            .returning(move |id| Ok(lock(&store).roles.iter().find(|r| r.id == id).cloned()));

        let store = self.store.clone();
        role_repo
            .expect_get_roles_for_user()
            .returning(move |user_id| Ok(lock(&store).roles_of(user_id)));

        let store = self.store.clone();
        role_repo.expect_get_roles_for_users().returning(move |user_ids| {
            let store = lock(&store);
            Ok(user_ids
                .iter()
                .flat_map(|user_id| {
                    store.roles_of(*user_id).into_iter().map(|role| UserRoleMapping {
                        user_id: *user_id,
                        role_id: role.id,
                        role_name: role.name,
                    })
                })
                .collect())
        });

        let store = self.store.clone();
        role_repo.expect_get_roles_paginated().returning(move |request| {
            let store = lock(&store);
            Ok((page(&store.roles, request), store.roles.len() as u64))
        });

        UserService::with_repos(Arc::new(user_repo), Arc::new(role_repo))
    }
}
