
use chrono::NaiveDate;


/// This is the standard way of converting a date to a string in daybook.
/// The same form is passed to the report generator and shown to the user.
pub fn format_report_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
