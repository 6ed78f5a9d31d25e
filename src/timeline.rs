use crate::api::models::Message;
use crate::format;

/// One calendar day of messages, keyed by the `YYYY-MM-DD` portion of the
/// timestamp exactly as it appears on the wire (no timezone conversion).
#[derive(Debug, Clone, PartialEq)]
pub struct DayGroup {
    pub date_key: String,
    pub messages: Vec<Message>,
}

pub(crate) fn sort_key(ts: &str) -> i64 {
    format::parse_timestamp(ts)
        .map(|t| t.timestamp_millis())
        .unwrap_or(i64::MIN)
}

/// Stable sort, newest first. Ties keep their incoming relative order.
pub fn sort_newest_first(messages: &mut [Message]) {
    messages.sort_by(|a, b| sort_key(&b.updated_at).cmp(&sort_key(&a.updated_at)));
}

fn day_key(ts: &str) -> String {
    ts.split('T').next().unwrap_or(ts).to_string()
}

/// Sort messages newest-first, then bucket them by calendar day.
///
/// Groups appear in the order their day was first encountered during the walk
/// over the sorted list, and messages inside a group stay newest-first. The
/// walk buckets after the one global sort; groups are never re-sorted on their
/// own, so a day's group lands where its newest message put it.
pub fn group_by_day(mut messages: Vec<Message>) -> Vec<DayGroup> {
    sort_newest_first(&mut messages);
    let mut groups: Vec<DayGroup> = Vec::new();
    for message in messages {
        let key = day_key(&message.updated_at);
        match groups.iter_mut().find(|group| group.date_key == key) {
            Some(group) => group.messages.push(message),
            None => groups.push(DayGroup {
                date_key: key,
                messages: vec![message],
            }),
        }
    }
    groups
}

/// The conversation's "last seen" timestamp: the newest message's `updated_at`.
pub fn last_seen(groups: &[DayGroup]) -> Option<&str> {
    groups
        .first()
        .and_then(|group| group.messages.first())
        .map(|message| message.updated_at.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::UserRef;

    fn msg(id: i64, updated_at: &str) -> Message {
        Message {
            id,
            sender: UserRef::default(),
            message: format!("message {id}"),
            updated_at: updated_at.to_string(),
        }
    }

    #[test]
    fn empty_input_yields_no_groups() {
        assert!(group_by_day(Vec::new()).is_empty());
        assert_eq!(last_seen(&[]), None);
    }

    #[test]
    fn buckets_follow_first_encounter_after_global_sort() {
        let groups = group_by_day(vec![
            msg(1, "2024-01-02T10:00:00Z"),
            msg(2, "2024-01-01T09:00:00Z"),
            msg(3, "2024-01-02T08:00:00Z"),
        ]);

        let keys: Vec<&str> = groups.iter().map(|g| g.date_key.as_str()).collect();
        assert_eq!(keys, ["2024-01-02", "2024-01-01"]);

        let newer_day: Vec<i64> = groups[0].messages.iter().map(|m| m.id).collect();
        assert_eq!(newer_day, [1, 3], "within a day messages stay newest-first");
        assert_eq!(groups[1].messages[0].id, 2);
    }

    #[test]
    fn equal_timestamps_keep_incoming_order() {
        let groups = group_by_day(vec![
            msg(7, "2024-03-05T12:00:00Z"),
            msg(8, "2024-03-05T12:00:00Z"),
            msg(9, "2024-03-05T12:00:00Z"),
        ]);
        let ids: Vec<i64> = groups[0].messages.iter().map(|m| m.id).collect();
        assert_eq!(ids, [7, 8, 9]);
    }

    #[test]
    fn grouping_is_idempotent_in_content() {
        let input = vec![
            msg(1, "2024-01-02T10:00:00Z"),
            msg(2, "2024-01-01T09:00:00Z"),
            msg(3, "2024-01-02T08:00:00Z"),
        ];
        assert_eq!(group_by_day(input.clone()), group_by_day(input));
    }

    #[test]
    fn last_seen_is_the_newest_timestamp() {
        let groups = group_by_day(vec![
            msg(1, "2024-01-01T09:00:00Z"),
            msg(2, "2024-01-02T10:00:00Z"),
        ]);
        assert_eq!(last_seen(&groups), Some("2024-01-02T10:00:00Z"));
    }

    #[test]
    fn timestamps_without_time_part_bucket_on_the_whole_string() {
        let groups = group_by_day(vec![msg(1, "2024-01-02")]);
        assert_eq!(groups[0].date_key, "2024-01-02");
    }
}
