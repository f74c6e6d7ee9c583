//! Diesel schema for the ownership hierarchy.

diesel::table! {
    /// Registered users.
    users (id) {
        /// Storage-assigned identifier.
        id -> Int8,
        /// Unique login name.
        #[max_length = 50]
        username -> Varchar,
        /// Contact address.
        #[max_length = 255]
        email -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Projects owned by users.
    projects (id) {
        /// Storage-assigned identifier.
        id -> Int8,
        /// Owning user.
        user_id -> Int8,
        /// Project name.
        #[max_length = 200]
        name -> Varchar,
        /// Optional description.
        #[max_length = 1000]
        description -> Nullable<Varchar>,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Tasks belonging to projects.
    tasks (id) {
        /// Storage-assigned identifier.
        id -> Int8,
        /// Owning project.
        project_id -> Int8,
        /// Task title.
        #[max_length = 200]
        title -> Varchar,
        /// Optional description.
        #[max_length = 2000]
        description -> Nullable<Varchar>,
        /// Lifecycle status.
        #[max_length = 20]
        status -> Varchar,
        /// Priority.
        #[max_length = 10]
        priority -> Varchar,
        /// Optional deadline.
        deadline -> Nullable<Date>,
        /// Completion date, set while the task is done.
        completed_at -> Nullable<Date>,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(projects -> users (user_id));
diesel::joinable!(tasks -> projects (project_id));
diesel::allow_tables_to_appear_in_same_query!(users, projects, tasks);
