//! Diesel table definitions for the PostgreSQL schema.
//!
//! Must match `backend/migrations` exactly.

diesel::table! {
    /// Student records. `email` carries a unique index.
    students (id) {
        id -> Uuid,
        name -> Varchar,
        email -> Varchar,
        course -> Varchar,
        profile_image_url -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}
