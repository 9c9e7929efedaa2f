use chrono::{Local, NaiveDateTime};

pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Wall-clock time in the server's local timezone.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Calendar date as it appears on permit forms, e.g. `03/07/2024`.
pub fn form_date(at: NaiveDateTime) -> String {
    at.format("%m/%d/%Y").to_string()
}

/// Sortable second-resolution stamp used in output file names, e.g. `20240307-091502`.
pub fn file_timestamp(at: NaiveDateTime) -> String {
    at.format("%Y%m%d-%H%M%S").to_string()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{file_timestamp, form_date};

    #[test]
    fn formats_are_zero_padded() {
        let at = NaiveDate::from_ymd_opt(2024, 3, 7)
            .and_then(|date| date.and_hms_opt(9, 15, 2))
            .expect("valid timestamp");
        assert_eq!(form_date(at), "03/07/2024");
        assert_eq!(file_timestamp(at), "20240307-091502");
    }
}
