use utoipa::OpenApi;

use office_api::app::ApiDoc;

#[test]
fn test_openapi_spec_has_all_endpoints() {
    let doc = ApiDoc::openapi();
    let json = doc.to_pretty_json().expect("Failed to generate OpenAPI JSON");

    let paths = doc.paths.paths;

    assert!(paths.contains_key("/users"), "Missing /users path");
    assert!(paths.contains_key("/users/{id}"), "Missing /users/{{id}} path");
    assert!(paths.contains_key("/roles"), "Missing /roles path");
    assert!(paths.contains_key("/health"), "Missing /health path");

    // Verify HTTP methods for /users
    let users_path = paths.get("/users").unwrap();
    assert!(users_path.get.is_some(), "Missing GET /users");
    assert!(users_path.post.is_some(), "Missing POST /users");

    // Verify HTTP methods for /users/{id}
    let user_by_id_path = paths.get("/users/{id}").unwrap();
    assert!(user_by_id_path.get.is_some(), "Missing GET /users/{{id}}");
    assert!(user_by_id_path.put.is_some(), "Missing PUT /users/{{id}}");
    assert!(user_by_id_path.delete.is_some(), "Missing DELETE /users/{{id}}");

    // Roles are read-only
    let roles_path = paths.get("/roles").unwrap();
    assert!(roles_path.get.is_some(), "Missing GET /roles");
    assert!(roles_path.post.is_none(), "Unexpected POST /roles");

    let schemas = &doc.components.as_ref().unwrap().schemas;
    assert!(schemas.contains_key("CreateUserRequest"), "Missing CreateUserRequest schema");
    assert!(schemas.contains_key("UpdateUserRequest"), "Missing UpdateUserRequest schema");
    assert!(schemas.contains_key("UserResponse"), "Missing UserResponse schema");
    assert!(schemas.contains_key("RoleResponse"), "Missing RoleResponse schema");
    assert!(schemas.contains_key("HeaderResponse"), "Missing HeaderResponse schema");

    println!("OpenAPI Spec:\n{}", json);
}

#[test]
fn test_openapi_json_contains_tags() {
    let doc = ApiDoc::openapi();
    let json = doc.to_pretty_json().expect("Failed to generate OpenAPI JSON");

    assert!(json.contains("\"users\""), "Missing 'users' tag in JSON");
    assert!(json.contains("\"roles\""), "Missing 'roles' tag in JSON");
    assert!(json.contains("\"health\""), "Missing 'health' tag in JSON");
}
