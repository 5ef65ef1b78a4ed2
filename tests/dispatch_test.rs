//! Tests for the dispatcher: argv in, exit code out, against a recording runner

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};

use rstest::rstest;

use gl_helper::cli::Dispatcher;
use gl_helper::config::Settings;
use gl_helper::domain::Invocation;
use gl_helper::exitcode;
use gl_helper::infrastructure::traits::CommandRunner;
use gl_helper::infrastructure::ServiceContainer;
use gl_helper::util::testing;

/// Fake runner that records every invocation and returns scripted exit codes.
struct RecordingRunner {
    calls: Mutex<Vec<Invocation>>,
    exit_codes: Mutex<VecDeque<i32>>,
    spawn_error: Option<io::ErrorKind>,
}

impl RecordingRunner {
    fn succeeding() -> Self {
        Self::exiting_with(&[])
    }

    /// Codes are handed out in order; 0 once they run out.
    fn exiting_with(codes: &[i32]) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            exit_codes: Mutex::new(codes.iter().copied().collect()),
            spawn_error: None,
        }
    }

    fn unspawnable(kind: io::ErrorKind) -> Self {
        Self {
            spawn_error: Some(kind),
            ..Self::succeeding()
        }
    }

    fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().unwrap().clone()
    }

    fn rendered_calls(&self) -> Vec<String> {
        self.calls().iter().map(ToString::to_string).collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, invocation: &Invocation) -> io::Result<i32> {
        self.calls.lock().unwrap().push(invocation.clone());
        if let Some(kind) = self.spawn_error {
            return Err(io::Error::new(kind, "spawn failed"));
        }
        Ok(self.exit_codes.lock().unwrap().pop_front().unwrap_or(0))
    }
}

fn dispatch_with(settings: Settings, runner: &Arc<RecordingRunner>, args: &[&str]) -> i32 {
    testing::init_test_setup();
    let container = ServiceContainer::with_deps(settings, runner.clone());
    let dispatcher = Dispatcher::new(&container).expect("valid settings");
    dispatcher.dispatch(std::iter::once("gl-helper").chain(args.iter().copied()))
}

fn dispatch(runner: &Arc<RecordingRunner>, args: &[&str]) -> i32 {
    dispatch_with(Settings::default(), runner, args)
}

// ============================================================
// Command mapping
// ============================================================

#[rstest]
#[case::build(&["build"], &["cmake -B build", "cmake --build build"])]
#[case::clean(&["clean"], &["rm -rf build"])]
#[case::run_default(&["run"], &["cmake --build build", "./build/GraphicalApp-opengl"])]
#[case::run_vulkan(&["run", "--type", "vulkan"], &["cmake --build build", "./build/GraphicalApp-vulkan"])]
#[case::run_opengl_eq(&["run", "--type=opengl"], &["cmake --build build", "./build/GraphicalApp-opengl"])]
fn given_valid_command_when_dispatching_then_runs_expected_steps(
    #[case] args: &[&str],
    #[case] expected: &[&str],
) {
    let runner = Arc::new(RecordingRunner::succeeding());

    let code = dispatch(&runner, args);

    assert_eq!(code, exitcode::OK);
    assert_eq!(runner.rendered_calls(), expected);
}

#[rstest]
#[case(&["build"])]
#[case(&["clean"])]
#[case(&["run", "--type", "vulkan"])]
fn given_same_arguments_when_dispatching_twice_then_same_invocations(#[case] args: &[&str]) {
    let first = Arc::new(RecordingRunner::succeeding());
    let second = Arc::new(RecordingRunner::succeeding());

    dispatch(&first, args);
    dispatch(&second, args);

    assert_eq!(first.calls(), second.calls());
}

#[test]
fn given_run_when_dispatching_then_binary_spawned_without_shell() {
    let runner = Arc::new(RecordingRunner::succeeding());

    dispatch(&runner, &["run"]);

    let calls = runner.calls();
    assert_eq!(calls[0].program(), "cmake");
    assert_eq!(calls[0].arguments(), ["--build", "build"]);
    assert_eq!(calls[1].program(), "./build/GraphicalApp-opengl");
    assert!(calls[1].arguments().is_empty());
}

#[test]
fn given_clean_twice_when_dispatching_then_same_command_and_no_error() {
    let runner = Arc::new(RecordingRunner::succeeding());

    assert_eq!(dispatch(&runner, &["clean"]), exitcode::OK);
    assert_eq!(dispatch(&runner, &["clean"]), exitcode::OK);

    let calls = runner.rendered_calls();
    assert_eq!(calls, ["rm -rf build", "rm -rf build"]);
}

// ============================================================
// Usage errors: nothing is spawned
// ============================================================

#[rstest]
#[case::unknown_command(&["deploy"])]
#[case::no_command(&[])]
#[case::unknown_variant(&["run", "--type", "metal"])]
#[case::missing_variant_value(&["run", "--type"])]
#[case::unknown_flag(&["build", "--fast"])]
#[case::type_on_build(&["build", "--type", "opengl"])]
#[case::extra_positional(&["clean", "build"])]
fn given_bad_input_when_dispatching_then_usage_error_and_nothing_spawned(#[case] args: &[&str]) {
    let runner = Arc::new(RecordingRunner::succeeding());

    let code = dispatch(&runner, args);

    assert_eq!(code, exitcode::USAGE);
    assert!(runner.calls().is_empty(), "nothing may be spawned for {args:?}");
}

#[rstest]
#[case::unknown_flag(&["build", "--fast"])]
#[case::unknown_variant(&["run", "--type", "metal"])]
#[case::unknown_command(&["deploy"])]
fn given_bad_input_when_reporting_then_help_lists_actions_and_variants(#[case] args: &[&str]) {
    testing::init_test_setup();
    let runner = Arc::new(RecordingRunner::succeeding());
    let container = ServiceContainer::with_deps(Settings::default(), runner);
    let dispatcher = Dispatcher::new(&container).expect("valid settings");

    let err = dispatcher
        .parse(std::iter::once("gl-helper").chain(args.iter().copied()))
        .unwrap_err();
    let help = dispatcher.usage_help(&err).expect("usage errors carry help");

    for action in ["build", "clean", "run"] {
        assert!(help.contains(action), "help must list {action}: {help}");
    }
    assert!(help.contains("opengl, vulkan"), "help must list variants: {help}");
}

#[test]
fn given_no_arguments_when_reporting_then_clap_help_not_repeated() {
    let runner = Arc::new(RecordingRunner::succeeding());
    let container = ServiceContainer::with_deps(Settings::default(), runner);
    let dispatcher = Dispatcher::new(&container).expect("valid settings");

    let err = dispatcher.parse(["gl-helper"]).unwrap_err();

    assert!(err.is_usage());
    assert!(dispatcher.usage_help(&err).is_none());
}

#[rstest]
#[case(&["--help"])]
#[case(&["run", "--help"])]
#[case(&["--version"])]
fn given_help_or_version_when_dispatching_then_exit_ok_and_nothing_spawned(#[case] args: &[&str]) {
    let runner = Arc::new(RecordingRunner::succeeding());

    assert_eq!(dispatch(&runner, args), exitcode::OK);
    assert!(runner.calls().is_empty());
}

// ============================================================
// Exit code pass-through
// ============================================================

#[rstest]
#[case(0)]
#[case(1)]
#[case(2)]
#[case(42)]
#[case(130)]
fn given_step_exit_code_when_dispatching_clean_then_code_returned_verbatim(#[case] code: i32) {
    let runner = Arc::new(RecordingRunner::exiting_with(&[code]));

    assert_eq!(dispatch(&runner, &["clean"]), code);
}

#[test]
fn given_configure_fails_when_building_then_compile_not_attempted() {
    let runner = Arc::new(RecordingRunner::exiting_with(&[1]));

    let code = dispatch(&runner, &["build"]);

    assert_eq!(code, 1);
    assert_eq!(runner.rendered_calls(), ["cmake -B build"]);
}

#[test]
fn given_application_fails_when_running_then_its_code_is_returned() {
    let runner = Arc::new(RecordingRunner::exiting_with(&[0, 3]));

    let code = dispatch(&runner, &["run", "--type", "vulkan"]);

    assert_eq!(code, 3);
    assert_eq!(runner.calls().len(), 2);
}

#[test]
fn given_build_tool_missing_when_dispatching_then_127() {
    let runner = Arc::new(RecordingRunner::unspawnable(io::ErrorKind::NotFound));

    let code = dispatch(&runner, &["build"]);

    assert_eq!(code, exitcode::NOT_FOUND);
    assert_eq!(runner.calls().len(), 1, "second step must not run");
}

#[test]
fn given_binary_not_executable_when_running_then_126() {
    let runner = Arc::new(RecordingRunner::unspawnable(io::ErrorKind::PermissionDenied));

    assert_eq!(dispatch(&runner, &["clean"]), exitcode::CANNOT_EXECUTE);
}

// ============================================================
// Meta commands and configured variants
// ============================================================

#[rstest]
#[case(&["config", "show"])]
#[case(&["config", "template"])]
#[case(&["config", "path"])]
#[case(&["completion", "bash"])]
fn given_meta_command_when_dispatching_then_nothing_spawned(#[case] args: &[&str]) {
    let runner = Arc::new(RecordingRunner::succeeding());

    assert_eq!(dispatch(&runner, args), exitcode::OK);
    assert!(runner.calls().is_empty());
}

#[test]
fn given_custom_variants_when_running_then_uses_configured_set() {
    let settings = Settings {
        variants: vec!["metal".into(), "dx12".into()],
        default_variant: Some("dx12".into()),
        ..Default::default()
    };
    let runner = Arc::new(RecordingRunner::succeeding());

    assert_eq!(dispatch_with(settings.clone(), &runner, &["run"]), exitcode::OK);
    assert_eq!(
        dispatch_with(settings, &runner, &["run", "--type", "opengl"]),
        exitcode::USAGE
    );

    let calls = runner.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].program(), "./build/GraphicalApp-dx12");
}

#[test]
fn given_no_variants_when_running_then_launches_bare_binary() {
    let settings = Settings {
        variants: vec![],
        default_variant: None,
        ..Default::default()
    };
    let runner = Arc::new(RecordingRunner::succeeding());

    assert_eq!(dispatch_with(settings.clone(), &runner, &["run"]), exitcode::OK);
    assert_eq!(runner.rendered_calls()[1], "./build/GraphicalApp");

    // the selector is rejected by validation, not by clap
    let rejected = Arc::new(RecordingRunner::succeeding());
    assert_eq!(
        dispatch_with(settings, &rejected, &["run", "--type", "opengl"]),
        exitcode::USAGE
    );
    assert!(rejected.calls().is_empty());
}

#[test]
fn given_inconsistent_variants_when_creating_dispatcher_then_config_error() {
    let settings = Settings {
        default_variant: Some("metal".into()),
        ..Default::default()
    };
    let container = ServiceContainer::with_deps(settings, Arc::new(RecordingRunner::succeeding()));

    let err = Dispatcher::new(&container).err().expect("invalid catalog");

    assert_eq!(err.exit_code(), exitcode::CONFIG);
}
