//! CSV export functionality
//!
//! Header rows are written bare; every data field is double-quoted.

use csv::{QuoteStyle, Terminator, Writer, WriterBuilder};

use crate::models::UserRecord;
use crate::DashboardError;

pub const USER_HEADERS: [&str; 7] = [
    "Name",
    "Email",
    "Status",
    "Revenue",
    "Country",
    "Signup Date",
    "Last Active",
];

pub const USER_SUMMARY_HEADERS: [&str; 4] = ["Name", "Email", "Signup Date", "Status"];

fn quoted_writer() -> Writer<Vec<u8>> {
    WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new())
}

fn finish(header: &[&str], writer: Writer<Vec<u8>>) -> Result<String, DashboardError> {
    let body = writer
        .into_inner()
        .map_err(|e| DashboardError::Export(format!("Failed to flush CSV: {}", e)))?;
    let body = String::from_utf8(body)
        .map_err(|e| DashboardError::Export(format!("CSV is not valid UTF-8: {}", e)))?;

    let mut out = header.join(",");
    out.push('\n');
    out.push_str(&body);
    Ok(out)
}

/// Full user export: name, email, status, `$revenue`, country, signup, last active
pub fn render_users_csv(users: &[UserRecord]) -> Result<String, DashboardError> {
    let mut writer = quoted_writer();

    for user in users {
        let revenue = format!("${}", user.revenue);
        let signup = user.signup_date.format("%Y-%m-%d").to_string();
        let last_active = user.last_active.format("%Y-%m-%d").to_string();
        writer.write_record([
            user.name.as_str(),
            user.email.as_str(),
            user.status.as_str(),
            revenue.as_str(),
            user.country.label(),
            signup.as_str(),
            last_active.as_str(),
        ])?;
    }

    finish(&USER_HEADERS, writer)
}

/// Short user export: name, email, signup date, status
pub fn render_user_summary_csv(users: &[UserRecord]) -> Result<String, DashboardError> {
    let mut writer = quoted_writer();

    for user in users {
        let signup = user.signup_date.format("%Y-%m-%d").to_string();
        writer.write_record([
            user.name.as_str(),
            user.email.as_str(),
            signup.as_str(),
            user.status.as_str(),
        ])?;
    }

    finish(&USER_SUMMARY_HEADERS, writer)
}
