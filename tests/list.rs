mod common;

use proptest::prelude::*;
use rowbind::{Fields, RecordList, Value};

fn numbered(id: i64) -> Option<Fields> {
    Some(common::fields(&[("id", Value::Int(id))]))
}

fn id_of(fields: Option<&Fields>) -> Option<i64> {
    match fields?.get("id")? {
        Value::Int(id) => Some(*id),
        _ => None,
    }
}

proptest! {
    #[test]
    fn appends_preserve_length_ends_and_order(ids in proptest::collection::vec(any::<i64>(), 0..64)) {
        let mut list = RecordList::new();
        for id in &ids {
            list.append(numbered(*id));
        }

        prop_assert_eq!(list.len(), ids.len());
        prop_assert_eq!(list.is_empty(), ids.is_empty());
        prop_assert_eq!(list.first().and_then(|r| id_of(r.fields())), ids.first().copied());
        prop_assert_eq!(list.last().and_then(|r| id_of(r.fields())), ids.last().copied());

        list.reset_iterator();
        let mut seen = Vec::new();
        while let Some(record) = list.next() {
            seen.push(id_of(record.fields()).expect("id present"));
        }
        prop_assert_eq!(&seen, &ids);
        prop_assert!(list.next().is_none());
        prop_assert_eq!(list.len(), ids.len());
    }

    #[test]
    fn borrowing_iteration_ignores_the_cursor(count in 1usize..32, consumed in 0usize..32) {
        let mut list: RecordList = (0..count as i64).map(numbered).collect();
        for _ in 0..consumed {
            let _ = list.next();
        }
        let ids: Vec<i64> = list.iter().filter_map(|r| id_of(r.fields())).collect();
        prop_assert_eq!(ids, (0..count as i64).collect::<Vec<_>>());
        let remaining = std::iter::from_fn(|| list.next().map(|_| ())).count();
        prop_assert_eq!(remaining, count.saturating_sub(consumed));
    }
}

#[test]
fn append_without_fields_counts_and_round_trips() {
    let mut list = RecordList::new();
    list.append(None);
    list.append(Some(Fields::new()));

    assert_eq!(list.len(), 2);
    let first = list.first().expect("first record");
    assert!(first.fields().is_none());
    assert!(!first.has_data());
    let last = list.last().expect("last record");
    assert_eq!(last.fields(), Some(&Fields::new()));

    assert!(list.next().expect("cursor on head").fields().is_none());
}

#[test]
fn next_on_empty_list_returns_none_repeatedly() {
    let mut list = RecordList::new();
    for _ in 0..3 {
        assert!(list.next().is_none());
    }
    list.reset_iterator();
    assert!(list.next().is_none());
}

#[test]
fn exhausted_cursor_stays_exhausted() {
    let mut list = RecordList::new();
    list.extend([numbered(1), numbered(2)]);
    assert_eq!(id_of(list.next().and_then(|r| r.fields())), Some(1));
    assert_eq!(id_of(list.next().and_then(|r| r.fields())), Some(2));
    for _ in 0..3 {
        assert!(list.next().is_none());
    }
}

#[test]
fn second_pass_without_reset_continues_the_first() {
    let mut list: RecordList = (1..=4).map(numbered).collect();
    let first_pass: Vec<i64> = (0..2)
        .filter_map(|_| id_of(list.next().and_then(|r| r.fields())))
        .collect();
    let second_pass: Vec<i64> = std::iter::from_fn(|| list.next().map(|r| id_of(r.fields())))
        .flatten()
        .collect();
    assert_eq!(first_pass, vec![1, 2]);
    assert_eq!(second_pass, vec![3, 4]);

    list.reset_iterator();
    assert_eq!(id_of(list.next().and_then(|r| r.fields())), Some(1));
    assert_eq!(list.len(), 4);
}
