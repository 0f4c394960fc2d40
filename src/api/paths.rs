//! Canonical record paths
//!
//! Single source of truth for where a record can be fetched. The router in
//! [`super::api_router`] mounts the matching routes; everything that emits a
//! `detail_url` builds it here instead of hard-coding route strings.

pub fn book_detail(id: i32) -> String {
    format!("/api/books/{}", id)
}

pub fn author_detail(id: i32) -> String {
    format!("/api/authors/{}", id)
}
