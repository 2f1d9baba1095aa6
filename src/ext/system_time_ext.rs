use std::time::SystemTime;

use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second] UTC");

pub trait SystemTimeExt {
    fn to_offset_date_time(&self) -> Option<OffsetDateTime>;
    fn to_utc_timestamp(&self) -> String;
}

impl SystemTimeExt for SystemTime {
    fn to_offset_date_time(&self) -> Option<OffsetDateTime> {
        let seconds = match self.duration_since(SystemTime::UNIX_EPOCH) {
            Ok(since) => i64::try_from(since.as_secs()).ok()?,
            // Round down, not towards the epoch.
            Err(before) => {
                let duration = before.duration();
                let whole = duration.as_secs() + u64::from(duration.subsec_nanos() > 0);
                -i64::try_from(whole).ok()?
            }
        };
        OffsetDateTime::from_unix_timestamp(seconds).ok()
    }

    fn to_utc_timestamp(&self) -> String {
        self.to_offset_date_time()
            .and_then(|date_time| date_time.format(TIMESTAMP_FORMAT).ok())
            .unwrap_or_else(|| String::from("an unrepresentable date"))
    }
}
