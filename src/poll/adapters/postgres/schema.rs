//! Diesel schema for poll persistence.

diesel::table! {
    /// Poll questions.
    questions (id) {
        /// Question identifier.
        id -> Uuid,
        /// Prompt shown to voters.
        #[max_length = 200]
        question_text -> Varchar,
        /// Publish timestamp.
        pub_date -> Timestamptz,
    }
}

diesel::table! {
    /// Choices owned by questions.
    choices (id) {
        /// Choice identifier.
        id -> Uuid,
        /// Owning question.
        question_id -> Uuid,
        /// Answer label.
        #[max_length = 200]
        choice_text -> Varchar,
        /// Vote tally.
        votes -> Int4,
    }
}

diesel::joinable!(choices -> questions (question_id));

diesel::allow_tables_to_appear_in_same_query!(questions, choices);
