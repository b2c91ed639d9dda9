//! Bootstrap data for the users table.

/// Rows inserted by the initializer when the table is empty:
/// (first name, last name, email, phone).
pub const SAMPLE_USERS: [(&str, &str, &str, &str); 5] = [
    ("John", "Doe", "john.doe@example.com", "+1234567890"),
    ("Jane", "Smith", "jane.smith@example.com", "+1987654321"),
    ("Bob", "Johnson", "bob.johnson@example.com", "+1122334455"),
    ("Alice", "Brown", "alice.brown@example.com", "+1555666777"),
    ("Charlie", "Wilson", "charlie.wilson@example.com", "+1888999000"),
];
