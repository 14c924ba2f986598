//! Lossy conversion between Phar archives and ZIP containers.
//!
//! Only the entry names and uncompressed payloads cross the bridge. Phar
//! stubs, aliases, per-entry metadata, permissions, and compression kinds
//! have no ZIP counterpart and are dropped going out; coming back, every
//! entry gets the Phar defaults. Timestamps survive in both directions to
//! DOS-time resolution (two seconds, years 1980..=2107).
//!
//! # Example
//!
//! ```
//! use pharos_phar::{PharArchive, PharEntry};
//!
//! let mut archive = PharArchive::new();
//! archive.add_file(PharEntry::new("hello.txt", b"hi".to_vec()));
//!
//! let zip_bytes = pharos_zip::to_zip(&archive)?;
//! let back = pharos_zip::to_phar(&zip_bytes)?;
//! assert_eq!(back.file("hello.txt").unwrap().payload(), b"hi");
//! # Ok::<(), pharos_zip::Error>(())
//! ```

use std::io::{Cursor, Read, Write};

use zip::write::FileOptions;
use zip::{CompressionMethod, DateTime, ZipArchive, ZipWriter};

use pharos_phar::{PharArchive, PharEntry};

mod error;

pub use error::{Error, Result};

/// Convert a Phar archive into a ZIP container.
///
/// One deflated ZIP entry is written per Phar entry, carrying the entry
/// name, the uncompressed payload, and the modification time.
pub fn to_zip(archive: &PharArchive) -> Result<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

    for entry in archive.files() {
        let mut options =
            FileOptions::default().compression_method(CompressionMethod::Deflated);
        if let Some(mtime) = zip_datetime(entry.timestamp()) {
            options = options.last_modified_time(mtime);
        }

        writer.start_file(entry.name(), options)?;
        writer.write_all(entry.payload())?;
    }

    Ok(writer.finish()?.into_inner())
}

/// Convert a ZIP container into a new Phar archive.
///
/// The archive gets the default stub, SHA-1 signature, and default
/// manifest fields; each ZIP file entry becomes a stored Phar entry with
/// default permissions. Directories are skipped. Entries without a real
/// ZIP timestamp are stamped with the current time.
pub fn to_phar(data: &[u8]) -> Result<PharArchive> {
    let mut zip = ZipArchive::new(Cursor::new(data))?;
    let mut archive = PharArchive::new();

    for index in 0..zip.len() {
        let mut file = zip.by_index(index)?;
        if file.is_dir() {
            continue;
        }

        let name = file.name().to_string();
        let mut payload = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut payload)?;

        let mut entry = PharEntry::new(name, payload);
        entry.set_timestamp(unix_seconds(file.last_modified()));
        archive.add_file(entry);
    }

    Ok(archive)
}

const DAYS_IN_MONTH: [i64; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: u16, month: u8) -> i64 {
    if month == 2 && is_leap_year(year) {
        29
    } else {
        DAYS_IN_MONTH[(month - 1) as usize]
    }
}

/// Convert a ZIP datetime to Unix seconds.
///
/// Returns -1 for the all-zero DOS default (1980-01-01 00:00:00), which
/// ZIP writers emit when no real timestamp is known.
fn unix_seconds(datetime: DateTime) -> i64 {
    if (
        datetime.year(),
        datetime.month(),
        datetime.day(),
        datetime.hour(),
        datetime.minute(),
        datetime.second(),
    ) == (1980, 1, 1, 0, 0, 0)
    {
        return -1;
    }

    let mut days: i64 = 0;
    for year in 1970..datetime.year() {
        days += if is_leap_year(year) { 366 } else { 365 };
    }
    for month in 1..datetime.month() {
        days += days_in_month(datetime.year(), month);
    }
    days += datetime.day() as i64 - 1;

    days * 86_400
        + datetime.hour() as i64 * 3_600
        + datetime.minute() as i64 * 60
        + datetime.second() as i64
}

/// Convert Unix seconds to a ZIP datetime.
///
/// Returns None for instants the DOS format cannot represent
/// (before 1980 or after 2107).
fn zip_datetime(timestamp: u32) -> Option<DateTime> {
    let mut days = (timestamp / 86_400) as i64;
    let secs = timestamp % 86_400;

    let mut year: u16 = 1970;
    loop {
        let year_len = if is_leap_year(year) { 366 } else { 365 };
        if days < year_len {
            break;
        }
        days -= year_len;
        year += 1;
    }

    let mut month: u8 = 1;
    while days >= days_in_month(year, month) {
        days -= days_in_month(year, month);
        month += 1;
    }

    DateTime::from_date_and_time(
        year,
        month,
        (days + 1) as u8,
        (secs / 3_600) as u8,
        (secs % 3_600 / 60) as u8,
        (secs % 60) as u8,
    )
    .ok()
}
