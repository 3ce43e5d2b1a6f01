//! Snapshot tests for Markdown to RTF conversion

use std::fs;
use std::path::PathBuf;

use md2rtf_core::{RtfOptions, markdown_to_rtf};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn convert_fixture(name: &str) -> String {
    let path = fixtures_dir().join(format!("{}.md", name));
    let source = fs::read_to_string(&path).expect("Failed to read fixture file");
    markdown_to_rtf(&source, &RtfOptions::default())
}

macro_rules! snapshot_test {
    ($name:ident) => {
        #[test]
        fn $name() {
            let rtf = convert_fixture(stringify!($name));
            insta::assert_snapshot!(rtf);
        }
    };
}

snapshot_test!(basic);
snapshot_test!(lists);
snapshot_test!(tables);
snapshot_test!(quotes);
