//! Storage keys, one per collection

pub const RECORDS: &str = "records";
pub const DELETED_RECORDS: &str = "deletedRecords";
pub const SERVICES: &str = "services";
pub const USERS: &str = "users";
pub const SHIFTS: &str = "shifts";
pub const THEME: &str = "theme";
pub const CAR_HISTORY: &str = "carHistory";
