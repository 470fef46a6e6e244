use std::collections::HashMap;

use axum::{
    extract::{Multipart, Path, State},
    response::Redirect,
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};

use service::auth::require_admin;
use service::listing::domain::{HouseInput, HouseView, FORM_FIELDS};
use service::listing::ListingError;
use service::uploads::UploadedFile;

use crate::errors::ApiError;
use crate::flash;
use crate::routes::auth::FormView;
use crate::session::MaybeUser;
use crate::state::ServerState;

const IMAGE_FIELD: &str = "image_file";
const GALLERY_FIELD: &str = "additional_images";

/// Edit form: the listing as stored, its values keyed by field name, and any flash message.
#[derive(Debug, Serialize, Deserialize)]
pub struct EditView {
    pub house: HouseView,
    pub fields: HashMap<String, String>,
    pub flash: Option<String>,
}

/// A decoded add/edit submission.
pub struct HouseForm {
    pub input: HouseInput,
    pub image_file: Option<UploadedFile>,
    pub additional_images: Vec<UploadedFile>,
}

fn multipart_err(e: axum::extract::multipart::MultipartError) -> ApiError {
    ApiError::Rejected { status: e.status(), message: e.body_text() }
}

/// Split a multipart body into text fields and image parts.
///
/// File parts without a filename are what browsers send for an empty file
/// input; they are dropped here.
pub async fn read_house_form(mut multipart: Multipart) -> Result<HouseForm, ApiError> {
    let mut fields = HashMap::new();
    let mut image_file = None;
    let mut additional_images = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(multipart_err)? {
        let name = field.name().unwrap_or_default().to_string();
        if name == IMAGE_FIELD || name == GALLERY_FIELD {
            let filename = field.file_name().unwrap_or_default().to_string();
            let bytes = field.bytes().await.map_err(multipart_err)?;
            if filename.is_empty() {
                continue;
            }
            let file = UploadedFile::new(filename, bytes.to_vec());
            if name == IMAGE_FIELD {
                image_file = Some(file);
            } else {
                additional_images.push(file);
            }
        } else {
            let value = field.text().await.map_err(multipart_err)?;
            fields.insert(name, value);
        }
    }

    Ok(HouseForm { input: HouseInput::from_fields(&fields), image_file, additional_images })
}

/// Validation failures go back to the form with a flash code; everything else is terminal.
fn saved_or_back(
    jar: CookieJar,
    result: Result<(), ListingError>,
    back_to: String,
) -> Result<(CookieJar, Redirect), ApiError> {
    match result {
        Ok(()) => Ok((flash::set(jar, flash::HOUSE_SAVED), Redirect::to("/"))),
        Err(e) => match e.flash_code() {
            Some(code) => Ok((flash::set(jar, code), Redirect::to(&back_to))),
            None => Err(e.into()),
        },
    }
}

#[utoipa::path(get, path = "/", tag = "houses", responses((status = 200, description = "All listings in insertion order", body = [crate::openapi::HouseViewDoc])))]
pub async fn index(State(state): State<ServerState>) -> Result<Json<Vec<HouseView>>, ApiError> {
    Ok(Json(state.listings.list_all().await?))
}

#[utoipa::path(get, path = "/house/{id}", tag = "houses", params(("id" = i32, Path, description = "House id")), responses((status = 200, description = "Listing detail", body = crate::openapi::HouseViewDoc), (status = 404, description = "Not found")))]
pub async fn detail(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<Json<HouseView>, ApiError> {
    Ok(Json(state.listings.get(id).await?))
}

pub async fn add_form(MaybeUser(user): MaybeUser, jar: CookieJar) -> Result<(CookieJar, Json<FormView>), ApiError> {
    require_admin(user.as_ref())?;
    let (jar, message) = flash::take(jar);
    let mut fields: Vec<&str> = FORM_FIELDS.to_vec();
    fields.extend([IMAGE_FIELD, GALLERY_FIELD]);
    Ok((jar, Json(FormView::new(&fields, message))))
}

#[utoipa::path(post, path = "/add", tag = "houses", request_body(content = crate::openapi::HouseFormDoc, content_type = "multipart/form-data"), responses((status = 303, description = "Created; redirect to /, or back to /add with a flash message"), (status = 401, description = "No session"), (status = 403, description = "Not an admin")))]
pub async fn add(
    State(state): State<ServerState>,
    MaybeUser(user): MaybeUser,
    jar: CookieJar,
    multipart: Multipart,
) -> Result<(CookieJar, Redirect), ApiError> {
    require_admin(user.as_ref())?;
    let form = read_house_form(multipart).await?;
    let result = state
        .listings
        .create(user.as_ref(), form.input, form.image_file, form.additional_images)
        .await
        .map(|_| ());
    saved_or_back(jar, result, "/add".to_string())
}

pub async fn edit_form(
    State(state): State<ServerState>,
    MaybeUser(user): MaybeUser,
    Path(id): Path<i32>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<EditView>), ApiError> {
    require_admin(user.as_ref())?;
    let house = state.listings.get(id).await?;
    let (jar, message) = flash::take(jar);
    let fields = house.form_fields();
    Ok((jar, Json(EditView { house, fields, flash: message })))
}

#[utoipa::path(post, path = "/edit/{id}", tag = "houses", params(("id" = i32, Path, description = "House id")), request_body(content = crate::openapi::HouseFormDoc, content_type = "multipart/form-data"), responses((status = 303, description = "Updated; redirect to /, or back to the form with a flash message"), (status = 401, description = "No session"), (status = 403, description = "Not an admin"), (status = 404, description = "Not found")))]
pub async fn edit(
    State(state): State<ServerState>,
    MaybeUser(user): MaybeUser,
    Path(id): Path<i32>,
    jar: CookieJar,
    multipart: Multipart,
) -> Result<(CookieJar, Redirect), ApiError> {
    require_admin(user.as_ref())?;
    let form = read_house_form(multipart).await?;
    let result = state
        .listings
        .update(user.as_ref(), id, form.input, form.image_file, form.additional_images)
        .await
        .map(|_| ());
    saved_or_back(jar, result, format!("/edit/{id}"))
}
