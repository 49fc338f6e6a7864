use chunkit_core::outdir::{allocate, next_free};
use chunkit_core::ChunkError;
use std::fs;

#[test]
fn fresh_path_is_used_as_is() {
    let td = tempfile::tempdir().unwrap();
    let req = td.path().join("out");
    assert_eq!(allocate(&req).unwrap(), req);
    assert!(req.is_dir());
}

#[test]
fn collisions_probe_numeric_suffixes() {
    let td = tempfile::tempdir().unwrap();
    let req = td.path().join("out");
    fs::create_dir(&req).unwrap();
    fs::write(req.join("keep.txt"), b"untouched").unwrap();

    let a = allocate(&req).unwrap();
    let b = allocate(&req).unwrap();
    assert_eq!(a, td.path().join("out_1"));
    assert_eq!(b, td.path().join("out_2"));
    assert_eq!(fs::read(req.join("keep.txt")).unwrap(), b"untouched");
}

#[test]
fn gaps_are_filled_first() {
    let td = tempfile::tempdir().unwrap();
    let req = td.path().join("out");
    fs::create_dir(&req).unwrap();
    fs::create_dir(td.path().join("out_2")).unwrap();
    assert_eq!(next_free(&req), td.path().join("out_1"));
}

#[test]
fn plain_file_counts_as_taken() {
    let td = tempfile::tempdir().unwrap();
    let req = td.path().join("out");
    fs::write(&req, b"not a dir").unwrap();
    assert_eq!(allocate(&req).unwrap(), td.path().join("out_1"));
}

#[test]
fn missing_parents_are_created() {
    let td = tempfile::tempdir().unwrap();
    let req = td.path().join("a/b/c");
    assert_eq!(allocate(&req).unwrap(), req);
    assert!(req.is_dir());
}

#[test]
fn parent_that_is_a_file_is_unwritable() {
    let td = tempfile::tempdir().unwrap();
    fs::write(td.path().join("flat"), b"file").unwrap();
    let err = allocate(&td.path().join("flat/out")).unwrap_err();
    assert!(matches!(err, ChunkError::DestinationUnwritable { .. }), "{err:?}");
}
