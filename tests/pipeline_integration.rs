//! End-to-end pipeline tests against real temporary directories
//!
//! Sizes are expressed in units of 1000 bytes so the window [17.1, 18.0]
//! units mirrors the default GiB window at a scale tests can afford.

use chrono::{Local, TimeDelta, TimeZone};
use proptest::prelude::*;
use std::collections::BTreeSet;
use std::fs::{self, File};
use tar::Archive;

use vidbundle::engine::test_support::{MediaDir, create_media_file, hours_ago};
use vidbundle::{BundleError, Decision, ListingOrder, Outcome, PackedBundle, SizeWindow, plan, run};

const UNIT: u64 = 1000;

fn window() -> SizeWindow {
    SizeWindow::new(17_100, 18 * UNIT).unwrap()
}

fn archive_members(bundle: &PackedBundle) -> Vec<String> {
    let mut archive = Archive::new(File::open(&bundle.paths.archive).unwrap());
    archive
        .entries()
        .unwrap()
        .map(|e| e.unwrap().path().unwrap().to_string_lossy().into_owned())
        .collect()
}

fn expect_packed(outcome: Outcome) -> PackedBundle {
    match outcome {
        Outcome::Packed(bundle) => bundle,
        other => panic!("expected a packed bundle, got {other:?}"),
    }
}

#[test]
fn test_three_files_round_trip() {
    let media = MediaDir::new();
    for name in ["a.mp4", "b.mp4", "c.mp4"] {
        media.old_file(name, 6 * UNIT);
    }
    media.old_file("ignored.txt", 6 * UNIT);
    let ctx = media.context(window(), ListingOrder::Name);

    let bundle = expect_packed(run(&ctx).unwrap());

    let expected_name = format!("{}-0001", ctx.date_prefix());
    assert_eq!(bundle.name.to_string(), expected_name);
    assert_eq!(bundle.total_bytes, 18 * UNIT);
    assert_eq!(bundle.paths.archive, media.target.join(format!("{expected_name}.tar")));
    assert_eq!(bundle.archive_bytes, fs::metadata(&bundle.paths.archive).unwrap().len());

    let members = archive_members(&bundle);
    assert_eq!(members, ["a.mp4", "b.mp4", "c.mp4"]);

    let completed = media.completed.join(&expected_name);
    for name in ["a.mp4", "b.mp4", "c.mp4"] {
        assert!(!media.source.join(name).exists(), "{name} left in source");
        assert_eq!(fs::metadata(completed.join(name)).unwrap().len(), 6 * UNIT);
    }
    assert!(media.source.join("ignored.txt").exists());

    let log = fs::read_to_string(&bundle.paths.log).unwrap();
    assert!(log.starts_with(&format!("# {expected_name}.log")));
    assert!(log.contains("Total size: 18000 bytes"));
}

#[test]
fn test_sequential_runs_use_new_numbers() {
    let media = MediaDir::new();
    for i in 0..6 {
        media.old_file(&format!("clip{i}.mp4"), 6 * UNIT);
    }
    let ctx = media.context(window(), ListingOrder::Name);

    let first = expect_packed(run(&ctx).unwrap());
    let second = expect_packed(run(&ctx).unwrap());

    assert_eq!(first.name.sequence, 1);
    assert_eq!(second.name.sequence, 2);
    let first_files: BTreeSet<_> = first.files.iter().map(|f| f.file_name.clone()).collect();
    assert!(second.files.iter().all(|f| !first_files.contains(&f.file_name)));

    assert_eq!(run(&ctx).unwrap(), Outcome::NoFilesSelected);
}

#[test]
fn test_existing_archive_advances_sequence() {
    let media = MediaDir::new();
    let mut ctx = media.context(window(), ListingOrder::Name);
    ctx.started_at = Local.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).single().unwrap();
    let old = (ctx.started_at - TimeDelta::days(1)).into();
    for name in ["a.mp4", "b.mp4", "c.mp4"] {
        create_media_file(media.source.join(name).as_std_path(), 6 * UNIT, old);
    }
    fs::create_dir_all(&media.target).unwrap();
    fs::write(media.target.join("20240305-0001.tar"), b"").unwrap();

    let bundle = expect_packed(run(&ctx).unwrap());

    assert_eq!(bundle.name.to_string(), "20240305-0002");
    assert!(media.target.join("20240305-0002.tar").is_file());
    assert!(media.target.join("20240305-0002.log").is_file());
    assert!(media.completed.join("20240305-0002").is_dir());
}

#[test]
fn test_same_named_file_in_completed_dir_is_overwritten() {
    let media = MediaDir::new();
    for name in ["a.mp4", "b.mp4", "c.mp4"] {
        media.old_file(name, 6 * UNIT);
    }
    let ctx = media.context(window(), ListingOrder::Name);
    let completed = media.completed.join(format!("{}-0001", ctx.date_prefix()));
    fs::create_dir_all(&completed).unwrap();
    fs::write(completed.join("b.mp4"), b"stale").unwrap();

    expect_packed(run(&ctx).unwrap());

    assert_eq!(fs::metadata(completed.join("b.mp4")).unwrap().len(), 6 * UNIT);
}

#[test]
fn test_failed_move_keeps_archive_and_log() {
    let media = MediaDir::new();
    for name in ["a.mp4", "b.mp4", "c.mp4"] {
        media.old_file(name, 6 * UNIT);
    }
    let ctx = media.context(window(), ListingOrder::Name);
    let name = format!("{}-0001", ctx.date_prefix());
    let blocker = media.completed.join(&name).join("b.mp4");
    fs::create_dir_all(&blocker).unwrap();

    let err = run(&ctx).unwrap_err();

    assert!(matches!(err, BundleError::Filesystem { .. }));
    assert!(media.target.join(format!("{name}.tar")).is_file());
    let log = fs::read_to_string(media.target.join(format!("{name}.log"))).unwrap();
    assert!(log.contains("Name: b.mp4"));
    assert!(!media.source.join("a.mp4").exists());
    assert!(media.source.join("b.mp4").exists());
}

#[test]
fn test_recent_files_wait_for_cutoff() {
    let media = MediaDir::new();
    let ctx = media.context(window(), ListingOrder::Name);
    for name in ["a.mp4", "b.mp4", "c.mp4"] {
        media.file(name, 6 * UNIT, ctx.cutoff().into());
    }

    assert_eq!(run(&ctx).unwrap(), Outcome::NoFilesSelected);
    assert_eq!(fs::read_dir(&media.target).unwrap().count(), 0);
}

#[test]
fn test_mtime_order_packs_oldest_first() {
    let media = MediaDir::new();
    media.file("a-new.mp4", 9 * UNIT, hours_ago(media.now, 7));
    media.file("z-old.mp4", 9 * UNIT, hours_ago(media.now, 48));
    media.file("m-mid.mp4", 9 * UNIT, hours_ago(media.now, 24));
    let ctx = media.context(window(), ListingOrder::Mtime);

    let bundle = expect_packed(run(&ctx).unwrap());

    assert_eq!(archive_members(&bundle), ["z-old.mp4", "m-mid.mp4"]);
    assert!(media.source.join("a-new.mp4").exists());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_plan_respects_window(sizes in proptest::collection::vec(1u64..10, 0..8)) {
        let media = MediaDir::new();
        for (i, size) in sizes.iter().enumerate() {
            media.old_file(&format!("{i:02}.mp4"), size * UNIT);
        }
        let ctx = media.context(window(), ListingOrder::Name);

        match plan(&ctx).unwrap() {
            Decision::Ready(selection) => {
                prop_assert!(ctx.window.contains(selection.total_bytes));
            }
            Decision::InsufficientSize { total_bytes } => {
                prop_assert!(total_bytes > 0 && total_bytes < ctx.window.min_bytes);
            }
            Decision::NoFilesSelected => {}
        }
        prop_assert!(!media.target.exists());
    }
}
