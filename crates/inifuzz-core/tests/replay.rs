//! Replaying a saved corpus through the INI fuzz driver.

use inifuzz_core::harness;
use inifuzz_core::{Engine, EngineError, IniParser, ReplayEngine, TrialStats};
use inifuzz_test_utils::config::TestConfigBuilder;
use inifuzz_test_utils::fixtures;
use inifuzz_test_utils::stub_parser::{StubError, StubParser};
use inifuzz_test_utils::workdir::TestWorkdir;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

#[test]
fn test_replay_fixture_corpus() {
    let corpus = TempDir::new().unwrap();
    fixtures::write_corpus(corpus.path(), fixtures::ALL);

    let workdir = TestWorkdir::new();
    let driver = workdir.driver(IniParser);
    let report = ReplayEngine::new([corpus.path().to_path_buf()])
        .run_loop(&mut |data: &[u8]| driver.run_trial(data))
        .unwrap();

    assert_eq!(
        report.stats,
        TrialStats {
            total: 6,
            success: 3,
            syntax_errors: 2,
            decode_errors: 1,
            unexpected: 0,
        }
    );
    assert!(report.crashes.is_empty());
    assert!(workdir.is_clean());
}

#[test]
fn test_replay_reports_reproducer_path() {
    let corpus = TempDir::new().unwrap();
    fixtures::write_corpus(corpus.path(), &[fixtures::MINIMAL]);

    let workdir = TestWorkdir::new();
    let driver = workdir.driver(StubParser::failing(StubError::Internal(
        "assertion failed".to_string(),
    )));
    let err = ReplayEngine::new([corpus.path().join("minimal")])
        .run_loop(&mut |data: &[u8]| driver.run_trial(data))
        .unwrap_err();

    match err {
        EngineError::Crash { input, source } => {
            assert_eq!(input, corpus.path().join("minimal"));
            assert!(source.to_string().contains("assertion failed"));
        }
        other => panic!("expected crash, got {other:?}"),
    }
    assert!(workdir.is_clean());
}

#[test]
fn test_harness_driver_replays_with_configured_candidate() {
    let workdir = TestWorkdir::new();
    let config = TestConfigBuilder::new()
        .candidate_dir(workdir.path())
        .stem("replay")
        .per_process(false)
        .build();
    let driver = harness::init(&config);
    assert_eq!(driver.candidate_path(), workdir.path().join("replay.ini"));

    let corpus = TempDir::new().unwrap();
    fixtures::write_corpus(corpus.path(), &[fixtures::INVALID_UTF8, fixtures::CONTINUATION]);
    let report = ReplayEngine::new([corpus.path().to_path_buf()])
        .with_keep_going(true)
        .run_loop(&mut |data: &[u8]| driver.run_trial(data))
        .unwrap();

    assert_eq!(report.stats.decode_errors, 1);
    assert_eq!(report.stats.success, 1);
    assert!(workdir.is_clean());
}
