//! Partition loaded records by their group key.

use std::collections::BTreeMap;

use crate::model::Record;

/// Records keyed by group, iterated in alphabetical (byte-wise) key order.
///
/// Members keep the relative order they had in the input table.
pub type Groups = BTreeMap<String, Vec<Record>>;

/// Stable partition of `records` by `Record::group`.
///
/// Every input record lands in exactly one group and only keys that were
/// actually observed become groups, so no group is ever empty.
pub fn group_records<I>(records: I) -> Groups
where
    I: IntoIterator<Item = Record>,
{
    let mut groups = Groups::new();
    for record in records {
        groups.entry(record.group.clone()).or_default().push(record);
    }
    groups
}

/// Total number of members across all groups.
pub fn member_count(groups: &Groups) -> usize {
    groups.values().map(Vec::len).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_are_sorted_and_members_keep_input_order() {
        let records = vec![
            Record::new("B", "Dan", "dan@example.com"),
            Record::new("A", "Alice", "alice@example.com"),
            Record::new("B", "Erin", "erin@example.com"),
            Record::new("A", "Bob", "bob@example.com"),
        ];

        let groups = group_records(records);

        let keys: Vec<&str> = groups.keys().map(String::as_str).collect();
        assert_eq!(keys, ["A", "B"]);
        let a: Vec<&str> = groups["A"].iter().map(|r| r.name.as_str()).collect();
        assert_eq!(a, ["Alice", "Bob"]);
        let b: Vec<&str> = groups["B"].iter().map(|r| r.name.as_str()).collect();
        assert_eq!(b, ["Dan", "Erin"]);
        assert_eq!(member_count(&groups), 4);
    }

    #[test]
    fn no_records_means_no_groups() {
        assert!(group_records(Vec::new()).is_empty());
    }
}
