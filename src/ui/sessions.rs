use chrono::{DateTime, Local};

const DATE_FORMAT_TODAY: &str = "Today %H:%M";
const DATE_FORMAT_YESTERDAY: &str = "Yesterday %H:%M";
const DATE_FORMAT_OTHER: &str = "%Y-%m-%d";

pub fn format_result_date(finished_at: &DateTime<Local>) -> String {
    format_relative_to(finished_at, &Local::now())
}

fn format_relative_to(finished_at: &DateTime<Local>, now: &DateTime<Local>) -> String {
    let finished_date = finished_at.date_naive();
    let today = now.date_naive();

    if finished_date == today {
        finished_at.format(DATE_FORMAT_TODAY).to_string()
    } else if today.pred_opt() == Some(finished_date) {
        finished_at.format(DATE_FORMAT_YESTERDAY).to_string()
    } else {
        finished_at.format(DATE_FORMAT_OTHER).to_string()
    }
}
