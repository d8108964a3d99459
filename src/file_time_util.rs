use chrono::{DateTime, Datelike, Local, Timelike, Utc};
use filetime::FileTime;
use std::fs::Metadata;

/// Modification time stamped onto an archive entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveTime {
    file_time: FileTime,
}

impl ArchiveTime {
    /// Create from an existing FileTime
    pub fn from_file_time(file_time: FileTime) -> Self {
        Self { file_time }
    }

    /// Create from file metadata's modification time
    pub fn from_metadata_mtime(metadata: &Metadata) -> Self {
        Self {
            file_time: FileTime::from_last_modification_time(metadata),
        }
    }

    /// Create from a DateTime<Utc>
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        let file_time = FileTime::from_unix_time(dt.timestamp(), dt.timestamp_subsec_nanos());
        Self { file_time }
    }

    /// Create from the current time
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    /// Seconds since the epoch for the tar mtime field. Tar has no room for
    /// negative values, so anything before 1970 becomes 0.
    pub fn to_unix_seconds(&self) -> u64 {
        u64::try_from(self.file_time.unix_seconds()).unwrap_or(0)
    }

    /// MS-DOS local date/time for zip headers. Zip can only express
    /// 1980..=2107; anything outside falls back to 1980-01-01 00:00:00.
    pub fn to_zip_datetime(&self) -> zip::DateTime {
        let Some(utc) =
            DateTime::from_timestamp(self.file_time.unix_seconds(), self.file_time.nanoseconds())
        else {
            return zip::DateTime::default();
        };
        let local = utc.with_timezone(&Local);

        let Ok(year) = u16::try_from(local.year()) else {
            return zip::DateTime::default();
        };
        zip::DateTime::from_date_and_time(
            year,
            local.month() as u8,
            local.day() as u8,
            local.hour() as u8,
            local.minute() as u8,
            local.second() as u8,
        )
        .unwrap_or_default()
    }
}

impl From<FileTime> for ArchiveTime {
    fn from(file_time: FileTime) -> Self {
        Self::from_file_time(file_time)
    }
}

impl From<DateTime<Utc>> for ArchiveTime {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::from_datetime(dt)
    }
}
