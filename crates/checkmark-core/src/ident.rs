use chrono::{DateTime, Utc};
use uuid::{NoContext, Timestamp, Uuid};

/// Mints a task id from the creation time and a random suffix.
///
/// The id is a UUIDv7: the leading 48 bits hold the unix milliseconds of
/// `now`, the rest is random. Ids minted in the same millisecond still differ
/// in their random bits.
pub fn new_id(now: DateTime<Utc>) -> String {
    let seconds = u64::try_from(now.timestamp()).unwrap_or(0);
    let ts = Timestamp::from_unix(NoContext, seconds, now.timestamp_subsec_nanos());
    Uuid::new_v7(ts).to_string()
}

/// Like [`new_id`], but retries until `taken` rejects none of the candidates.
pub fn new_unique_id<F>(now: DateTime<Utc>, taken: F) -> String
where
    F: Fn(&str) -> bool,
{
    loop {
        let id = new_id(now);
        if !taken(&id) {
            return id;
        }
        tracing::warn!(%id, "generated id already taken; retrying");
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use chrono::{TimeZone, Utc};

    use super::{new_id, new_unique_id};

    #[test]
    fn ids_minted_in_one_millisecond_differ() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap();
        let ids: HashSet<String> = (0..500).map(|_| new_id(now)).collect();
        assert_eq!(ids.len(), 500);
    }

    #[test]
    fn unique_id_skips_taken_values() {
        let now = Utc::now();
        let first = new_id(now);
        let next = new_unique_id(now, |candidate| candidate == first);
        assert_ne!(next, first);
    }
}
