//! Task and transaction vocabularies.

use crate::enums::define_text_enum;

define_text_enum! {
    /// Task workflow status.
    #[derive(Default)]
    TaskStatus("task status") {
        #[default]
        Todo = "todo",
        InProgress = "in_progress",
        Review = "review",
        Completed = "completed",
    }
}

define_text_enum! {
    /// Task priority.
    #[derive(Default)]
    TaskPriority("task priority") {
        Low = "low",
        #[default]
        Medium = "medium",
        High = "high",
    }
}

define_text_enum! {
    /// Unit counted by task estimates and time entries.
    TransactionType("transaction type") {
        Pages = "pages",
        Images = "images",
        Records = "records",
    }
}
