use relax_align::HarnessError;
use relax_align::harness::check_dump_file;
use rstest::rstest;

use crate::common::dump_file;

#[rstest]
#[case::aligned_4("0000000000001008 <SHOULD_ALIGN_4_HERE>:\n", true)]
#[case::misaligned_4("0000000000001002 <SHOULD_ALIGN_4_HERE>:\n", false)]
#[case::aligned_16("0000000000001010 <SHOULD_ALIGN_16_HERE>:\n", true)]
#[case::misaligned_16("0000000000001018 <SHOULD_ALIGN_16_HERE>:\n", false)]
#[case::uppercase_hex("00000000000010A0 <SHOULD_ALIGN_32_HERE>:\n", true)]
#[case::one_bad_of_two(
    "0000000000001008 <SHOULD_ALIGN_4_HERE>:\n0000000000001012 <SHOULD_ALIGN_8_HERE>:\n",
    false
)]
#[case::both_good(
    "0000000000001008 <SHOULD_ALIGN_4_HERE>:\n0000000000001040 <SHOULD_ALIGN_64_HERE>:\n",
    true
)]
fn dump_verdict(#[case] text: &str, #[case] expected: bool) {
    let (_dir, path) = dump_file(text);
    let report = check_dump_file(&path).unwrap();
    assert_eq!(report.passed(), expected);
}

#[test]
fn dump_without_markers_fails() {
    let (_dir, path) = dump_file("0000000000001000 <_start>:\n    1000:\t0001\tnop\n");
    assert!(matches!(
        check_dump_file(&path),
        Err(HarnessError::NoMarkers)
    ));
}

#[test]
fn missing_dump_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let err = check_dump_file(&dir.path().join("gone.dump")).unwrap_err();
    assert!(matches!(err, HarnessError::DumpUnreadable { .. }));
    assert!(err.to_string().contains("gone.dump"));
}

#[test]
fn instruction_lines_are_not_markers() {
    let text = "\
0000000000001008 <SHOULD_ALIGN_8_HERE>:
    1008:\t00000013          \tnop
    100c:\t0001              \tj\t1008 <SHOULD_ALIGN_8_HERE>
";
    let (_dir, path) = dump_file(text);
    let report = check_dump_file(&path).unwrap();
    assert_eq!(report.markers.len(), 1);
    assert!(report.passed());
}
