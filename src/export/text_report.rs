//! Plain-text user report

use chrono::NaiveDate;

use crate::models::UserRecord;

/// "2024-01-05" -> "Jan 5, 2024"
pub fn format_signup_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Title, generation date, user count, then one line per user
pub fn render_text_report(users: &[UserRecord], title: &str, generated_on: NaiveDate) -> String {
    let mut out = String::new();
    out.push_str(title);
    out.push('\n');
    out.push_str(&format!("Generated on: {}\n", generated_on.format("%-m/%-d/%Y")));
    out.push_str(&format!("Total Users: {}\n", users.len()));
    out.push_str("\nUser Details:\n");

    for user in users {
        out.push_str(&format!(
            "Name: {}, Email: {}, Signup: {}, Status: {}\n",
            user.name,
            user.email,
            format_signup_date(user.signup_date),
            user.status
        ));
    }

    out
}
