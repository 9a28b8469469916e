use chrono::{DateTime, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::{Serialize, Serializer};

/// UTC timestamp as stored in the `createdAt`/`updatedAt` columns.
///
/// Serializes as RFC 3339 with millisecond precision and a `Z` suffix,
/// e.g. `2024-01-01T09:30:00.000Z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct OurDateTime(pub DateTime<Utc>);

impl OurDateTime {
    pub fn now() -> Self {
        OurDateTime(Utc::now())
    }

    pub fn naive_utc(&self) -> NaiveDateTime {
        self.0.naive_utc()
    }
}

impl From<NaiveDateTime> for OurDateTime {
    fn from(naive: NaiveDateTime) -> Self {
        OurDateTime(Utc.from_utc_datetime(&naive))
    }
}

impl Serialize for OurDateTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}
