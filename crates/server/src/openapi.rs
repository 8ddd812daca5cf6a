use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct UserInputDoc { pub name: String, pub age: i32 }

#[derive(ToSchema)]
pub struct UserDoc {
    pub id: Uuid,
    pub name: String,
    pub age: i32,
    /// RFC 3339 timestamp
    pub created_at: String,
}

#[derive(ToSchema)]
pub struct DeletedUserDoc { pub message: String, pub user: UserDoc }

#[derive(ToSchema)]
pub struct ErrorBodyDoc { pub error: String, pub details: Option<String> }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::pages::health,
        crate::routes::users::list_users,
        crate::routes::users::create_user,
        crate::routes::users::delete_user,
    ),
    components(
        schemas(
            HealthResponse,
            UserInputDoc,
            UserDoc,
            DeletedUserDoc,
            ErrorBodyDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "users", description = "User records: list, create, delete"),
    )
)]
pub struct ApiDoc;
