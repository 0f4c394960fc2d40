use crate::api;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::books::list_books,
        api::books::create_book,
        api::books::get_book,
        api::books::update_book,
        api::books::delete_book,
        api::instance::list_instances,
        api::instance::create_instance,
        api::instance::get_instance,
        api::instance::update_instance,
        api::instance::delete_instance,
        // Add other endpoints here as we document them
    ),
    components(
        schemas(
            crate::domain::Genre,
            crate::domain::Language,
            crate::domain::Author,
            crate::domain::Book,
            crate::domain::BookInstance,
            crate::models::LoanStatus,
            api::genre::GenreRequest,
            api::language::LanguageRequest,
            api::author::AuthorRequest,
            api::books::BookRequest,
            api::instance::CreateInstanceRequest,
            api::instance::UpdateInstanceRequest,
        )
    ),
    tags(
        (name = "bibliotek", description = "Library catalog API")
    )
)]
pub struct ApiDoc;
