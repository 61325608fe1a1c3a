//! Property tests for staging: the destination ends up as the union of its
//! previous regular files and the source's regular files, with source
//! contents winning on name clashes.

use std::collections::BTreeMap;
use std::fs;

use ecgstage::stage::stage_files;
use proptest::collection::{btree_map, btree_set, vec};
use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;

mod common;
use common::file_contents;

fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(32);

    let mut config = ProptestConfig::default();
    config.cases = cases;
    config
}

fn arb_file_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,7}\\.(csv|txt|json)"
}

fn arb_files() -> impl Strategy<Value = BTreeMap<String, Vec<u8>>> {
    btree_map(arb_file_name(), vec(any::<u8>(), 0..64), 0..6)
}

fn arb_dir_names() -> impl Strategy<Value = std::collections::BTreeSet<String>> {
    btree_set("[a-z]{1,6}", 0..3)
}

proptest! {
    #![proptest_config(proptest_config())]

    #[test]
    fn destination_is_union_of_previous_and_source(
        source_files in arb_files(),
        existing_files in arb_files(),
        source_dirs in arb_dir_names(),
    ) {
        let temp = tempfile::tempdir().expect("tempdir");
        let source = temp.path().join("cache");
        let destination = temp.path().join("dest");
        fs::create_dir_all(&source).expect("mkdir source");
        fs::create_dir_all(&destination).expect("mkdir dest");

        for (name, data) in &source_files {
            fs::write(source.join(name), data).expect("write source");
        }
        for dir in &source_dirs {
            // Directory names never carry an extension, so they cannot clash with files.
            fs::create_dir_all(source.join(dir).join("inner")).expect("mkdir nested");
            fs::write(source.join(dir).join("inner.csv"), b"x").expect("write nested");
        }
        for (name, data) in &existing_files {
            fs::write(destination.join(name), data).expect("write existing");
        }

        let report = stage_files(&source, &destination).expect("stage");

        let mut expected = existing_files.clone();
        expected.extend(source_files.clone());
        prop_assert_eq!(file_contents(&destination), expected);
        prop_assert_eq!(report.copied.len(), source_files.len());
        prop_assert_eq!(report.skipped.len(), source_dirs.len());
    }

    #[test]
    fn staging_twice_is_idempotent(source_files in arb_files()) {
        let temp = tempfile::tempdir().expect("tempdir");
        let source = temp.path().join("cache");
        let destination = temp.path().join("dest");
        fs::create_dir_all(&source).expect("mkdir source");
        for (name, data) in &source_files {
            fs::write(source.join(name), data).expect("write source");
        }

        stage_files(&source, &destination).expect("first stage");
        let first = file_contents(&destination);
        stage_files(&source, &destination).expect("second stage");
        let second = file_contents(&destination);

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first, source_files);
    }
}
