use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(utoipa::ToSchema)]
pub struct HouseViewDoc {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub location: String,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub image_file: Option<String>,
    pub additional_images: Vec<String>,
    pub available: bool,
}

/// Multipart body of `/add` and `/edit/{id}`.
#[derive(utoipa::ToSchema)]
pub struct HouseFormDoc {
    pub title: String,
    pub description: String,
    pub price: String,
    pub location: String,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    /// Edit only; present means available.
    pub available: Option<String>,
    /// File part; png, jpg, jpeg or gif.
    pub image_file: Option<String>,
    /// Repeated file part appended to the gallery.
    pub additional_images: Vec<String>,
}

#[derive(utoipa::ToSchema)]
pub struct AccountFormDoc {
    pub username: String,
    pub password: String,
    /// Register only; honoured when `auth.allow_admin_signup` is set.
    pub is_admin: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::houses::index,
        crate::routes::houses::detail,
        crate::routes::houses::add,
        crate::routes::houses::edit,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::auth::logout,
    ),
    components(
        schemas(
            HealthResponse,
            HouseViewDoc,
            HouseFormDoc,
            AccountFormDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "houses"),
        (name = "auth")
    )
)]
pub struct ApiDoc;
