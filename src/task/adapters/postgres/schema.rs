//! Diesel schema for task persistence.

diesel::table! {
    /// Task records with per-list dense ordering.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Parent list identifier.
        list_id -> Uuid,
        /// Owning user identifier.
        user_id -> Uuid,
        /// Task title.
        #[max_length = 200]
        title -> Varchar,
        /// Completion flag.
        completed -> Bool,
        /// Zero-based rank within the list, dense per (user_id, list_id).
        position -> Int8,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
