use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct MessageDoc { pub message: String }

#[derive(Serialize, ToSchema)]
pub struct UserRecordDoc {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub phone: String,
    #[serde(rename = "pickedUp")]
    pub picked_up: bool,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::root,
        crate::routes::health,
        crate::routes::usuarios::create_user,
        crate::routes::usuarios::get_user,
        crate::routes::usuarios::mark_picked_up,
        crate::routes::usuarios::list_users,
    ),
    components(
        schemas(
            HealthResponse,
            MessageDoc,
            UserRecordDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "usuarios")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_record_routes() {
        let doc = ApiDoc::openapi();
        let paths: Vec<_> = doc.paths.paths.keys().cloned().collect();
        for p in ["/", "/health", "/usuarios", "/usuarios/{id}"] {
            assert!(paths.iter().any(|k| k == p), "missing {p}");
        }
    }
}
