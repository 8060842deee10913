use chrono::NaiveDateTime;

pub fn format_datetime(value: NaiveDateTime) -> String {
    value.and_utc().to_rfc3339()
}
