use std::fs;
use std::path::{Path, PathBuf};

use outbox_core::{
    BehaviorChoice, ConfirmAction, LaunchParams, Outcome, OutcomeCode, Preferences,
    REQUEST_SELECT_FROM_FILESYSTEM, REQUEST_UPLOAD_FROM_CAMERA, SelectionController,
    SpaceCheckOutcome, SpaceCheckRequest, UpNavigation,
};

fn launch(request_code: i32, picker_mode: bool) -> LaunchParams {
    LaunchParams {
        account_id: "user@cloud".to_string(),
        request_code,
        picker_mode,
    }
}

fn controller_in(dir: &Path) -> SelectionController {
    SelectionController::new(
        launch(REQUEST_SELECT_FROM_FILESYSTEM, false),
        Preferences::default(),
        None,
        dir,
    )
}

/// Drive confirm up to the space-check request.
fn confirm_check(ctl: &mut SelectionController) -> SpaceCheckRequest {
    match ctl.confirm() {
        ConfirmAction::CheckSpace(req) => req,
        other => panic!("expected a space check, got {other:?}"),
    }
}

fn finalize(ctl: &mut SelectionController, has_enough: bool) -> SpaceCheckOutcome {
    let req = confirm_check(ctl);
    ctl.on_space_check(req.ticket, has_enough)
}

#[test]
fn stack_never_drops_below_one_and_top_pop_cancels() {
    let tmp = tempfile::tempdir().unwrap();
    let sub = tmp.path().join("a");
    fs::create_dir(&sub).unwrap();

    let mut ctl = controller_in(tmp.path());
    let depth = ctl.stack().len();

    ctl.enter_directory(&sub).unwrap();
    assert_eq!(ctl.stack().len(), depth + 1);

    assert!(matches!(ctl.navigate_up(), UpNavigation::Moved));
    assert_eq!(ctl.stack().len(), depth);

    // Walk all the way to the filesystem root.
    loop {
        match ctl.navigate_up() {
            UpNavigation::Moved => assert!(ctl.stack().len() >= 1),
            UpNavigation::Dispatched(outcome) => {
                assert_eq!(outcome.code, OutcomeCode::Canceled);
                assert_eq!(ctl.stack().len(), 1);
                break;
            }
            UpNavigation::OpenStoragePicker => panic!("unexpected picker delegation"),
        }
    }
}

#[test]
fn every_navigation_clears_the_selection() {
    let tmp = tempfile::tempdir().unwrap();
    let sub = tmp.path().join("sub");
    fs::create_dir(&sub).unwrap();
    let file = tmp.path().join("f1");
    fs::write(&file, b"x").unwrap();

    let mut ctl = controller_in(tmp.path());

    // push
    ctl.toggle_file(&file);
    ctl.enter_directory(&sub).unwrap();
    assert!(ctl.selection().is_empty());
    assert!(!ctl.selection().all_selected());

    // pop
    ctl.select_all(true, vec![sub.join("g1")]);
    assert!(matches!(ctl.navigate_up(), UpNavigation::Moved));
    assert!(ctl.selection().is_empty());

    // reset
    ctl.toggle_file(&file);
    ctl.jump_to(&sub).unwrap();
    assert!(ctl.selection().is_empty());
}

#[test]
fn entering_a_file_is_a_contract_violation() {
    let tmp = tempfile::tempdir().unwrap();
    let file = tmp.path().join("f1");
    fs::write(&file, b"x").unwrap();

    let mut ctl = controller_in(tmp.path());
    assert!(ctl.enter_directory(&file).is_err());
    assert_eq!(ctl.current_dir(), tmp.path());
}

#[cfg(unix)]
#[test]
fn non_writable_directory_locks_behavior_to_upload_only() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = tempfile::tempdir().unwrap();
    let ro = tmp.path().join("ro");
    fs::create_dir(&ro).unwrap();
    fs::set_permissions(&ro, fs::Permissions::from_mode(0o555)).unwrap();

    let mut ctl = controller_in(tmp.path());
    ctl.enter_directory(&ro).unwrap();

    let opts = ctl.behavior_options();
    assert!(!opts.choice_available);
    assert_eq!(ctl.behavior(), BehaviorChoice::UploadOnly);

    // The locked selector refuses other choices but accepts UploadOnly.
    assert!(!ctl.set_behavior(BehaviorChoice::MoveToSyncedFolder));
    assert!(!ctl.set_behavior(BehaviorChoice::UploadAndDelete));
    assert!(ctl.set_behavior(BehaviorChoice::UploadOnly));

    fs::set_permissions(&ro, fs::Permissions::from_mode(0o755)).unwrap();
}

#[test]
fn picker_mode_returns_the_current_directory() {
    let tmp = tempfile::tempdir().unwrap();
    let mut ctl = SelectionController::new(
        launch(REQUEST_SELECT_FROM_FILESYSTEM, true),
        Preferences::default(),
        None,
        tmp.path(),
    );

    // Selection state is irrelevant in picker mode.
    assert!(ctl.confirm_enabled());
    let outcome = match ctl.confirm() {
        ConfirmAction::Dispatched(outcome) => outcome,
        other => panic!("expected immediate dispatch, got {other:?}"),
    };
    assert_eq!(outcome.code, OutcomeCode::OkPickedDir);
    assert_eq!(outcome.chosen_files, vec![tmp.path().to_path_buf()]);
    assert_eq!(outcome.request_code, REQUEST_SELECT_FROM_FILESYSTEM);
}

#[test]
fn confirm_disabled_with_empty_selection() {
    let tmp = tempfile::tempdir().unwrap();
    let mut ctl = controller_in(tmp.path());
    assert!(!ctl.confirm_enabled());
    assert!(matches!(ctl.confirm(), ConfirmAction::NotReady));
}

#[test]
fn delete_behavior_dispatches_ok_delete_and_persists() {
    let tmp = tempfile::tempdir().unwrap();
    let f1 = tmp.path().join("f1");
    let f2 = tmp.path().join("f2");
    fs::write(&f1, b"x").unwrap();
    fs::write(&f2, b"y").unwrap();

    let mut ctl = controller_in(tmp.path());
    ctl.toggle_file(&f1);
    ctl.toggle_file(&f2);
    assert!(ctl.set_behavior(BehaviorChoice::UploadAndDelete));

    let outcome = match finalize(&mut ctl, true) {
        SpaceCheckOutcome::Dispatched(outcome) => outcome,
        other => panic!("expected dispatch, got {other:?}"),
    };
    assert_eq!(outcome.code, OutcomeCode::OkDelete);
    assert_eq!(outcome.chosen_files, vec![f1, f2]);
    assert_eq!(outcome.base_path.as_deref(), Some(tmp.path()));

    // Behavior and last path persisted for the next cold start.
    assert_eq!(ctl.preferences().behavior(), BehaviorChoice::UploadAndDelete);
    assert_eq!(
        ctl.preferences().last_local_path,
        tmp.path().to_string_lossy()
    );
}

#[test]
fn behavior_maps_to_outcome_codes() {
    for (behavior, code) in [
        (BehaviorChoice::MoveToSyncedFolder, OutcomeCode::OkMove),
        (BehaviorChoice::UploadOnly, OutcomeCode::OkDoNothing),
        (BehaviorChoice::UploadAndDelete, OutcomeCode::OkDelete),
    ] {
        let tmp = tempfile::tempdir().unwrap();
        let f1 = tmp.path().join("f1");
        fs::write(&f1, b"x").unwrap();

        let mut ctl = controller_in(tmp.path());
        ctl.toggle_file(&f1);
        assert!(ctl.set_behavior(behavior));

        match finalize(&mut ctl, true) {
            SpaceCheckOutcome::Dispatched(outcome) => assert_eq!(outcome.code, code),
            other => panic!("expected dispatch, got {other:?}"),
        }
    }
}

#[test]
fn move_fallback_yes_dispatches_ok_move_regardless_of_selector() {
    let tmp = tempfile::tempdir().unwrap();
    let f1 = tmp.path().join("f1");
    fs::write(&f1, b"x").unwrap();

    let mut ctl = controller_in(tmp.path());
    ctl.toggle_file(&f1);
    assert!(ctl.set_behavior(BehaviorChoice::UploadOnly));

    assert!(matches!(
        finalize(&mut ctl, false),
        SpaceCheckOutcome::NeedsMoveFallback
    ));
    assert!(ctl.awaiting_fallback_answer());

    let outcome = ctl.resolve_move_fallback(true).unwrap();
    assert_eq!(outcome.code, OutcomeCode::OkMove);
    assert_eq!(outcome.chosen_files, vec![f1]);
    assert!(outcome.base_path.is_none());
}

#[test]
fn move_fallback_no_keeps_the_screen_open() {
    let tmp = tempfile::tempdir().unwrap();
    let f1 = tmp.path().join("f1");
    fs::write(&f1, b"x").unwrap();

    let mut ctl = controller_in(tmp.path());
    ctl.toggle_file(&f1);

    assert!(matches!(
        finalize(&mut ctl, false),
        SpaceCheckOutcome::NeedsMoveFallback
    ));
    assert!(ctl.resolve_move_fallback(false).is_none());
    assert!(!ctl.is_finished());
    // Selection untouched; the user may change it and retry.
    assert_eq!(ctl.selection().paths(), vec![f1.clone()]);

    // Retry succeeds.
    match finalize(&mut ctl, true) {
        SpaceCheckOutcome::Dispatched(outcome) => {
            assert_eq!(outcome.chosen_files, vec![f1]);
        }
        other => panic!("expected dispatch, got {other:?}"),
    }
}

#[test]
fn camera_origin_forces_single_file_delete() {
    let tmp = tempfile::tempdir().unwrap();
    let photo = tmp.path().join("IMG_0001.jpg");
    fs::write(&photo, b"jpeg").unwrap();

    let mut ctl = SelectionController::new(
        launch(REQUEST_UPLOAD_FROM_CAMERA, false),
        Preferences::default(),
        None,
        tmp.path(),
    );
    ctl.toggle_file(&photo);
    // Selector says upload-only; camera origin overrides it.
    assert!(ctl.set_behavior(BehaviorChoice::UploadOnly));

    let req = confirm_check(&mut ctl);
    // Camera origin shows no wait indicator.
    assert!(!req.show_wait_indicator);

    let outcome = match ctl.on_space_check(req.ticket, true) {
        SpaceCheckOutcome::Dispatched(outcome) => outcome,
        other => panic!("expected dispatch, got {other:?}"),
    };
    assert_eq!(outcome.code, OutcomeCode::OkDelete);
    assert_eq!(outcome.chosen_files, vec![photo]);
    assert_eq!(outcome.request_code, REQUEST_UPLOAD_FROM_CAMERA);
    assert_eq!(ctl.preferences().behavior(), BehaviorChoice::UploadAndDelete);
}

#[test]
fn wait_indicator_only_for_select_from_filesystem() {
    let tmp = tempfile::tempdir().unwrap();
    let f1 = tmp.path().join("f1");
    fs::write(&f1, b"x").unwrap();

    let mut ctl = controller_in(tmp.path());
    ctl.toggle_file(&f1);
    assert!(confirm_check(&mut ctl).show_wait_indicator);

    let mut other = SelectionController::new(
        launch(77, false),
        Preferences::default(),
        None,
        tmp.path(),
    );
    other.toggle_file(&f1);
    assert!(!confirm_check(&mut other).show_wait_indicator);
}

#[test]
fn cancel_discards_a_pending_check() {
    let tmp = tempfile::tempdir().unwrap();
    let f1 = tmp.path().join("f1");
    fs::write(&f1, b"x").unwrap();

    let mut ctl = controller_in(tmp.path());
    ctl.toggle_file(&f1);
    let req = confirm_check(&mut ctl);

    let outcome = ctl.cancel();
    assert_eq!(outcome.code, OutcomeCode::Canceled);

    // The late-arriving result must be ignored.
    assert!(matches!(
        ctl.on_space_check(req.ticket, true),
        SpaceCheckOutcome::Stale
    ));
    assert_eq!(ctl.outcome().map(|o| o.code), Some(OutcomeCode::Canceled));
}

#[test]
fn superseded_check_results_are_stale() {
    let tmp = tempfile::tempdir().unwrap();
    let f1 = tmp.path().join("f1");
    fs::write(&f1, b"x").unwrap();

    let mut ctl = controller_in(tmp.path());
    ctl.toggle_file(&f1);

    let first = confirm_check(&mut ctl);
    let second = confirm_check(&mut ctl);

    assert!(matches!(
        ctl.on_space_check(first.ticket, true),
        SpaceCheckOutcome::Stale
    ));
    assert!(!ctl.is_finished());
    assert!(matches!(
        ctl.on_space_check(second.ticket, true),
        SpaceCheckOutcome::Dispatched(_)
    ));
}

#[test]
fn cold_start_resolves_nearest_existing_ancestor() {
    let tmp = tempfile::tempdir().unwrap();
    let gone = tmp.path().join("removed").join("deeper");

    let prefs = Preferences {
        last_local_path: gone.to_string_lossy().into_owned(),
        ..Preferences::default()
    };
    let ctl = SelectionController::new(
        launch(REQUEST_SELECT_FROM_FILESYSTEM, false),
        prefs,
        None,
        Path::new("/"),
    );
    assert_eq!(ctl.current_dir(), tmp.path());
}

#[test]
fn cold_start_reuses_persisted_behavior_default() {
    let tmp = tempfile::tempdir().unwrap();
    let mut prefs = Preferences::default();
    prefs.set_behavior(BehaviorChoice::UploadAndDelete);
    prefs.last_local_path = tmp.path().to_string_lossy().into_owned();

    let ctl = SelectionController::new(
        launch(REQUEST_SELECT_FROM_FILESYSTEM, false),
        prefs,
        None,
        Path::new("/"),
    );
    assert_eq!(ctl.current_dir(), tmp.path());
    assert_eq!(ctl.behavior(), BehaviorChoice::UploadAndDelete);
}

#[test]
fn outcome_round_trips_through_json() {
    let outcome = Outcome {
        code: OutcomeCode::OkMove,
        chosen_files: vec![PathBuf::from("/x/f1"), PathBuf::from("/x/f2")],
        base_path: Some(PathBuf::from("/x")),
        request_code: REQUEST_SELECT_FROM_FILESYSTEM,
    };
    let json = serde_json::to_string(&outcome).unwrap();
    let parsed: Outcome = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, outcome);
}
