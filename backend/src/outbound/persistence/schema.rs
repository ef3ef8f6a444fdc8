//! Diesel table definitions for the privileged store.
//!
//! These definitions must match `migrations/privileged` exactly. Columns are
//! camelCase in the database and mapped to snake_case Rust names through
//! `sql_name`. Boolean flags are stored as integers (0 or 1). Owner columns
//! hold the numeric directory key.

diesel::table! {
    /// Directory of known identities.
    users (id) {
        id -> Int8,
        /// Identity-provider subject.
        #[sql_name = "openId"]
        open_id -> Varchar,
        /// `admin` or `user`.
        role -> Varchar,
        #[sql_name = "createdAt"]
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Income and expense categories.
    budget_categories (id) {
        id -> Int8,
        #[sql_name = "userId"]
        user_id -> Int8,
        name -> Varchar,
        /// `income` or `expense`.
        #[sql_name = "type"]
        kind -> Varchar,
        #[sql_name = "monthlyLimitCents"]
        monthly_limit_cents -> Int8,
        color -> Nullable<Varchar>,
        icon -> Nullable<Varchar>,
        #[sql_name = "isDefault"]
        is_default -> Int4,
        #[sql_name = "sortOrder"]
        sort_order -> Int4,
        #[sql_name = "createdAt"]
        created_at -> Timestamptz,
    }
}

diesel::table! {
    budget_transactions (id) {
        id -> Int8,
        #[sql_name = "userId"]
        user_id -> Int8,
        #[sql_name = "categoryId"]
        category_id -> Int8,
        #[sql_name = "amountCents"]
        amount_cents -> Int8,
        #[sql_name = "transactionDate"]
        transaction_date -> Timestamptz,
        description -> Nullable<Text>,
        notes -> Nullable<Text>,
        #[sql_name = "isRecurring"]
        is_recurring -> Int4,
        #[sql_name = "createdAt"]
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Monthly income/expense totals used for debt planning.
    debt_budget_snapshots (id) {
        id -> Int8,
        #[sql_name = "userId"]
        user_id -> Int8,
        /// `YYYY-MM`.
        #[sql_name = "monthYear"]
        month_year -> Varchar,
        #[sql_name = "totalIncomeCents"]
        total_income_cents -> Int8,
        #[sql_name = "totalExpensesCents"]
        total_expenses_cents -> Int8,
        #[sql_name = "totalDebtPaymentsCents"]
        total_debt_payments_cents -> Int8,
        #[sql_name = "availableForDebtCents"]
        available_for_debt_cents -> Int8,
        notes -> Nullable<Text>,
        #[sql_name = "createdAt"]
        created_at -> Timestamptz,
    }
}

diesel::table! {
    debts (id) {
        id -> Int8,
        #[sql_name = "userId"]
        user_id -> Int8,
        name -> Varchar,
        #[sql_name = "debtType"]
        debt_type -> Varchar,
        #[sql_name = "originalBalanceCents"]
        original_balance_cents -> Int8,
        #[sql_name = "currentBalanceCents"]
        current_balance_cents -> Int8,
        /// Annual rate in basis points.
        #[sql_name = "interestRateBps"]
        interest_rate_bps -> Int4,
        #[sql_name = "minimumPaymentCents"]
        minimum_payment_cents -> Int8,
        #[sql_name = "dueDay"]
        due_day -> Nullable<Int2>,
        creditor -> Nullable<Varchar>,
        status -> Varchar,
        notes -> Nullable<Text>,
        #[sql_name = "createdAt"]
        created_at -> Timestamptz,
    }
}

diesel::table! {
    debt_payments (id) {
        id -> Int8,
        #[sql_name = "userId"]
        user_id -> Int8,
        #[sql_name = "debtId"]
        debt_id -> Int8,
        #[sql_name = "amountCents"]
        amount_cents -> Int8,
        #[sql_name = "paymentDate"]
        payment_date -> Timestamptz,
        #[sql_name = "paymentType"]
        payment_type -> Varchar,
        #[sql_name = "balanceAfterCents"]
        balance_after_cents -> Int8,
        notes -> Nullable<Text>,
        #[sql_name = "createdAt"]
        created_at -> Timestamptz,
    }
}

diesel::table! {
    financial_goals (id) {
        id -> Int8,
        #[sql_name = "userId"]
        user_id -> Int8,
        name -> Varchar,
        description -> Nullable<Text>,
        #[sql_name = "goalType"]
        goal_type -> Varchar,
        #[sql_name = "targetAmountCents"]
        target_amount_cents -> Int8,
        #[sql_name = "currentAmountCents"]
        current_amount_cents -> Int8,
        #[sql_name = "targetDate"]
        target_date -> Nullable<Timestamptz>,
        status -> Varchar,
        priority -> Int2,
        #[sql_name = "createdAt"]
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only log of contributions to a goal.
    goal_progress_history (id) {
        id -> Int8,
        #[sql_name = "goalId"]
        goal_id -> Int8,
        #[sql_name = "userId"]
        user_id -> Int8,
        #[sql_name = "amountCents"]
        amount_cents -> Int8,
        #[sql_name = "newTotalCents"]
        new_total_cents -> Int8,
        source -> Varchar,
        note -> Nullable<Text>,
        #[sql_name = "progressDate"]
        progress_date -> Timestamptz,
    }
}

diesel::table! {
    /// Shared vocabulary catalogue; not owned by any user.
    vocabulary_items (id) {
        id -> Int8,
        language -> Varchar,
        word -> Varchar,
        translation -> Varchar,
        pronunciation -> Nullable<Varchar>,
        #[sql_name = "partOfSpeech"]
        part_of_speech -> Nullable<Varchar>,
        difficulty -> Varchar,
        category -> Nullable<Varchar>,
        #[sql_name = "exampleSentence"]
        example_sentence -> Nullable<Text>,
    }
}

diesel::table! {
    user_vocabulary (id) {
        id -> Int8,
        #[sql_name = "userId"]
        user_id -> Int8,
        #[sql_name = "vocabularyItemId"]
        vocabulary_item_id -> Int8,
        language -> Varchar,
        #[sql_name = "timesReviewed"]
        times_reviewed -> Int4,
        #[sql_name = "correctCount"]
        correct_count -> Int4,
        #[sql_name = "lastReviewed"]
        last_reviewed -> Nullable<Timestamptz>,
        #[sql_name = "createdAt"]
        created_at -> Timestamptz,
    }
}

diesel::table! {
    saved_translations (id) {
        id -> Int8,
        #[sql_name = "userId"]
        user_id -> Int8,
        #[sql_name = "originalText"]
        original_text -> Text,
        #[sql_name = "translatedText"]
        translated_text -> Text,
        #[sql_name = "sourceLanguage"]
        source_language -> Varchar,
        #[sql_name = "targetLanguage"]
        target_language -> Varchar,
        #[sql_name = "categoryId"]
        category_id -> Nullable<Int8>,
        #[sql_name = "isFavorite"]
        is_favorite -> Int4,
        #[sql_name = "usageCount"]
        usage_count -> Int4,
        #[sql_name = "createdAt"]
        created_at -> Timestamptz,
    }
}

diesel::table! {
    translation_categories (id) {
        id -> Int8,
        #[sql_name = "userId"]
        user_id -> Int8,
        name -> Varchar,
        icon -> Nullable<Varchar>,
        #[sql_name = "createdAt"]
        created_at -> Timestamptz,
    }
}

diesel::table! {
    fact_update_notifications (id) {
        id -> Int8,
        #[sql_name = "userId"]
        user_id -> Int8,
        title -> Varchar,
        message -> Text,
        #[sql_name = "isRead"]
        is_read -> Int4,
        #[sql_name = "readAt"]
        read_at -> Nullable<Timestamptz>,
        #[sql_name = "isDismissed"]
        is_dismissed -> Int4,
        #[sql_name = "dismissedAt"]
        dismissed_at -> Nullable<Timestamptz>,
        #[sql_name = "createdAt"]
        created_at -> Timestamptz,
    }
}

diesel::table! {
    conversations (id) {
        id -> Int8,
        #[sql_name = "userId"]
        user_id -> Int8,
        #[sql_name = "userMessage"]
        user_message -> Text,
        #[sql_name = "assistantResponse"]
        assistant_response -> Text,
        #[sql_name = "audioUrl"]
        audio_url -> Nullable<Varchar>,
        #[sql_name = "createdAt"]
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Smart-home devices, keyed externally by `deviceId`.
    iot_devices (id) {
        id -> Int8,
        #[sql_name = "userId"]
        user_id -> Int8,
        /// External identifier; unique.
        #[sql_name = "deviceId"]
        device_id -> Varchar,
        #[sql_name = "deviceName"]
        device_name -> Varchar,
        #[sql_name = "deviceType"]
        device_type -> Varchar,
        room -> Varchar,
        manufacturer -> Nullable<Varchar>,
        model -> Nullable<Varchar>,
        status -> Varchar,
        state -> Nullable<Text>,
        capabilities -> Nullable<Text>,
        #[sql_name = "connectionType"]
        connection_type -> Varchar,
        #[sql_name = "connectionConfig"]
        connection_config -> Nullable<Text>,
        #[sql_name = "lastSeen"]
        last_seen -> Nullable<Timestamptz>,
        #[sql_name = "createdAt"]
        created_at -> Timestamptz,
        #[sql_name = "updatedAt"]
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Commands sent to devices.
    iot_command_history (id) {
        id -> Int8,
        #[sql_name = "userId"]
        user_id -> Int8,
        #[sql_name = "deviceId"]
        device_id -> Varchar,
        command -> Varchar,
        parameters -> Nullable<Text>,
        status -> Varchar,
        #[sql_name = "errorMessage"]
        error_message -> Nullable<Text>,
        #[sql_name = "executedAt"]
        executed_at -> Timestamptz,
    }
}

diesel::table! {
    /// One personality profile per user.
    user_profiles (id) {
        id -> Int8,
        #[sql_name = "userId"]
        user_id -> Int8,
        #[sql_name = "sarcasmLevel"]
        sarcasm_level -> Int2,
        #[sql_name = "totalInteractions"]
        total_interactions -> Int4,
        #[sql_name = "positiveResponses"]
        positive_responses -> Int4,
        #[sql_name = "negativeResponses"]
        negative_responses -> Int4,
        #[sql_name = "averageResponseLength"]
        average_response_length -> Int4,
        #[sql_name = "preferredTopics"]
        preferred_topics -> Nullable<Text>,
        #[sql_name = "interactionPatterns"]
        interaction_patterns -> Nullable<Text>,
        #[sql_name = "lastInteraction"]
        last_interaction -> Nullable<Timestamptz>,
        #[sql_name = "createdAt"]
        created_at -> Timestamptz,
        #[sql_name = "updatedAt"]
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    conversation_feedback (id) {
        id -> Int8,
        #[sql_name = "conversationId"]
        conversation_id -> Int8,
        #[sql_name = "userId"]
        user_id -> Int8,
        #[sql_name = "feedbackType"]
        feedback_type -> Varchar,
        comment -> Nullable<Text>,
        #[sql_name = "createdAt"]
        created_at -> Timestamptz,
    }
}
