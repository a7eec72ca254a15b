use crate::fixtures::rect;
use wirecut_core::{Error, InputError};
use wirecut_toolpath::{select, EntryExitOverride, Overrides};

#[test]
fn test_overrides_apply_per_field() {
    let a = rect("a", 0.0, 0.0, 1.0, 1.0);
    let b = rect("b", 5.0, 0.0, 6.0, 1.0);
    let c = rect("c", 9.0, 0.0, 10.0, 1.0);

    let mut overrides = Overrides::new();
    overrides.insert("a".into(), EntryExitOverride::entry(0.5));
    overrides.insert("c".into(), EntryExitOverride::new(0.2, 0.6));

    let result = select(&[&c, &b, &a], &overrides).unwrap();
    let ids: Vec<_> = result.iter().map(|ee| ee.contour_id.as_str()).collect();
    assert_eq!(ids, vec!["c", "b", "a"]);

    assert_eq!((result[0].entry_t, result[0].exit_t), (0.2, 0.6));
    assert_eq!((result[1].entry_t, result[1].exit_t), (0.0, 0.0));
    assert_eq!((result[2].entry_t, result[2].exit_t), (0.5, 0.5));
}

#[test]
fn test_dangling_override_is_error() {
    let a = rect("a", 0.0, 0.0, 1.0, 1.0);
    let mut overrides = Overrides::new();
    overrides.insert("missing".into(), EntryExitOverride::exit(0.3));

    match select(&[&a], &overrides) {
        Err(Error::Input(InputError::UnknownContour { id })) => assert_eq!(id, "missing"),
        other => panic!("expected unknown contour error, got {:?}", other),
    }
}

#[test]
fn test_non_finite_override_rejected() {
    let a = rect("a", 0.0, 0.0, 1.0, 1.0);
    let mut overrides = Overrides::new();
    overrides.insert("a".into(), EntryExitOverride::entry(f64::NAN));
    assert!(select(&[&a], &overrides).unwrap_err().is_config_error());
}
