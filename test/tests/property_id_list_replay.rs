/// PROPERTY-BASED TESTS: id list delta replay
///
/// Key invariants:
/// 1. Applying downloaded ranges one after another gives the same members
///    as replaying every record against a plain set
/// 2. The cursor is the sum of the declared lengths of accepted ranges
/// 3. A rejected range changes neither members nor cursor
use std::collections::HashSet;

use proptest::prelude::*;
use specsync_shared::IdList;

fn record_strategy() -> impl Strategy<Value = (bool, String)> {
    (any::<bool>(), "[a-f0-9/]{1,4}")
}

fn range_strategy() -> impl Strategy<Value = Vec<(bool, String)>> {
    prop::collection::vec(record_strategy(), 1..8)
}

fn render(records: &[(bool, String)]) -> String {
    records
        .iter()
        .map(|(add, id)| format!("{}{}\n", if *add { '+' } else { '-' }, id))
        .collect()
}

fn new_list() -> IdList {
    IdList::new(
        "list_1",
        Some("https://lists.test/list_1".to_string()),
        1,
        Some("file_id_1".to_string()),
    )
}

proptest! {
    #[test]
    fn prop_replay_matches_plain_set(ranges in prop::collection::vec(range_strategy(), 1..10)) {
        let list = new_list();
        let mut expected: HashSet<String> = HashSet::new();
        let mut expected_cursor = 0u64;

        for records in &ranges {
            let body = render(records);
            list.apply_delta(&body, body.len() as u64).unwrap();
            expected_cursor += body.len() as u64;

            for (add, id) in records {
                if *add {
                    expected.insert(id.clone());
                } else {
                    expected.remove(id);
                }
            }
        }

        let actual: HashSet<String> = list.ids().iter().cloned().collect();
        prop_assert_eq!(actual, expected);
        prop_assert_eq!(list.cursor(), expected_cursor);
    }

    #[test]
    fn prop_rejected_range_changes_nothing(
        accepted in range_strategy(),
        garbage in "[a-zA-Z<{ ][a-zA-Z0-9+\\-\n]{0,20}",
    ) {
        let list = new_list();
        let body = render(&accepted);
        list.apply_delta(&body, body.len() as u64).unwrap();

        let before = list.ids();
        let cursor = list.cursor();

        prop_assert!(list.apply_delta(&garbage, garbage.len() as u64).is_err());
        prop_assert!(std::sync::Arc::ptr_eq(&before, &list.ids()));
        prop_assert_eq!(list.cursor(), cursor);
    }
}
