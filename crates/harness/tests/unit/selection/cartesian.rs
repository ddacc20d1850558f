use relax_align::{Configuration, Source, TestId, select_tests};

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn default_selection_is_full_product() {
    let tests = select_tests(None, None);
    assert_eq!(tests.len(), Source::ALL.len() * Configuration::ALL.len());
    assert_eq!(tests.len(), 52);

    let expected: Vec<TestId> = Source::ALL
        .iter()
        .flat_map(|&s| Configuration::ALL.iter().map(move |&c| TestId::new(s, c)))
        .collect();
    assert_eq!(tests, expected);
}

#[test]
fn labels_are_unique() {
    let mut labels: Vec<String> = select_tests(None, None).iter().map(TestId::label).collect();
    labels.sort();
    labels.dedup();
    assert_eq!(labels.len(), 52);
}

#[test]
fn unknown_names_never_appear() {
    let tests = select_tests(
        Some(names(&["relax3", "relax-align-3", "TEST"]).as_slice()),
        Some(names(&["rvc", "norvc"]).as_slice()),
    );
    assert_eq!(tests, vec![TestId::new(Source::Relax3, Configuration::Norvc)]);
}

#[test]
fn empty_lists_select_nothing() {
    let none: Vec<String> = Vec::new();
    assert!(select_tests(Some(none.as_slice()), None).is_empty());
    assert!(select_tests(None, Some(none.as_slice())).is_empty());
}

#[test]
fn requested_order_is_kept() {
    let tests = select_tests(
        Some(names(&["relax12", "relax1"]).as_slice()),
        Some(names(&["norelax", "norvc-norelax"]).as_slice()),
    );
    let labels: Vec<String> = tests.iter().map(TestId::label).collect();
    assert_eq!(
        labels,
        vec![
            "relax12-norelax",
            "relax12-norvc-norelax",
            "relax1-norelax",
            "relax1-norvc-norelax",
        ]
    );
}
