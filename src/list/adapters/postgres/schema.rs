//! Diesel schema for list persistence.
//!
//! Per-owner title uniqueness is enforced by the
//! `idx_lists_owner_title_unique` index on `(user_id, title)`.

diesel::table! {
    /// List records owned by users.
    lists (id) {
        /// List identifier.
        id -> Uuid,
        /// Owning user identifier.
        user_id -> Uuid,
        /// List title, unique per owner.
        #[max_length = 100]
        title -> Varchar,
        /// Favourited flag.
        favorited -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
