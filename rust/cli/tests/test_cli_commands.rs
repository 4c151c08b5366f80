use std::io::Write;
use std::path::Path;

use tablestakes_cli::run;
use tablestakes_engine::history::HandEvent;
use tablestakes_engine::logger::HandRecord;

fn run_cli(args: &[&str]) -> (i32, String, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let mut argv = vec!["tablestakes"];
    argv.extend_from_slice(args);
    let code = run(argv, &mut out, &mut err);
    (
        code,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

fn sim_to(path: &Path, hands: &str, seed: &str, policy: &str) {
    let (code, out, err) = run_cli(&[
        "sim",
        "--hands",
        hands,
        "--seats",
        "3",
        "--seed",
        seed,
        "--policy",
        policy,
        "--output",
        path.to_str().unwrap(),
    ]);
    assert_eq!(code, 0, "sim failed: {err}");
    assert!(out.contains("Hand log:"));
}

fn read_records(path: &Path) -> Vec<HandRecord> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

fn write_records(path: &Path, records: &[HandRecord]) {
    let mut f = std::fs::File::create(path).unwrap();
    for r in records {
        writeln!(f, "{}", serde_json::to_string(r).unwrap()).unwrap();
    }
}

#[test]
fn help_goes_to_stdout() {
    let (code, out, err) = run_cli(&["--help"]);
    assert_eq!(code, 0);
    assert!(out.contains("sim"));
    assert!(out.contains("replay"));
    assert!(err.is_empty());
}

#[test]
fn unknown_command_lists_commands() {
    let (code, _, err) = run_cli(&["deal"]);
    assert_eq!(code, 2);
    assert!(err.contains("Commands:"));
    assert!(err.contains("  play"));
}

#[test]
fn sim_rejects_bad_table() {
    let (code, _, err) = run_cli(&["sim", "--hands", "1", "--seats", "40"]);
    assert_eq!(code, 2);
    assert!(err.contains("seats must be between 2 and 23"));
}

#[test]
fn sim_then_replay_verifies_every_hand() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hands.jsonl");
    sim_to(&path, "8", "21", "random");

    let records = read_records(&path);
    assert!(!records.is_empty());
    assert!(records[0].hand_id.ends_with("-000001"));

    let (code, out, err) = run_cli(&["replay", "--input", path.to_str().unwrap(), "--verbose"]);
    assert_eq!(code, 0, "replay failed: {err}");
    assert!(out.contains(&format!(
        "Replay complete. {} hands verified, 0 failed.",
        records.len()
    )));
    assert!(out.contains(&records[0].hand_id));
}

#[test]
fn replay_reads_zstd_logs() {
    let dir = tempfile::tempdir().unwrap();
    let plain = dir.path().join("hands.jsonl");
    sim_to(&plain, "3", "4", "random");
    let packed = dir.path().join("hands.jsonl.zst");
    let bytes = std::fs::read(&plain).unwrap();
    std::fs::write(&packed, zstd::bulk::compress(&bytes, 3).unwrap()).unwrap();

    let (code, out, _) = run_cli(&["replay", "--input", packed.to_str().unwrap()]);
    assert_eq!(code, 0);
    assert!(out.contains("0 failed"));
}

#[test]
fn replay_flags_tampered_winners() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hands.jsonl");
    sim_to(&path, "2", "8", "random");

    let mut records = read_records(&path);
    records[0].winners = vec![99];
    write_records(&path, &records);

    let (code, out, err) = run_cli(&["replay", "--input", path.to_str().unwrap()]);
    assert_eq!(code, 2);
    assert!(out.contains("1 failed"));
    assert!(err.contains(&format!("Error: {}: winners [99]", records[0].hand_id)));
}

#[test]
fn replay_flags_broken_chaining() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hands.jsonl");
    sim_to(&path, "3", "13", "passive");

    let mut records = read_records(&path);
    assert_eq!(records.len(), 3);
    let HandEvent::HandStart { players, .. } = &mut records[1].events[0].event else {
        panic!("first event is hand_start");
    };
    players[0].stack += 1;
    write_records(&path, &records);

    let (code, _, err) = run_cli(&["replay", "--input", path.to_str().unwrap()]);
    assert_eq!(code, 2);
    assert!(err.contains("but the previous hand left"));
}

#[test]
fn replay_reports_garbage_lines_and_missing_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.jsonl");
    std::fs::write(&path, "{not json}\n").unwrap();
    let (code, _, err) = run_cli(&["replay", "--input", path.to_str().unwrap()]);
    assert_eq!(code, 2);
    assert!(err.contains("line 1: unparseable record"));

    let (code, _, err) = run_cli(&["replay", "--input", "missing/file.jsonl"]);
    assert_eq!(code, 2);
    assert!(err.contains("Failed to read"));
}

#[test]
fn empty_log_is_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.jsonl");
    std::fs::write(&path, "\n\n").unwrap();
    let (code, out, _) = run_cli(&["replay", "--input", path.to_str().unwrap()]);
    assert_eq!(code, 0);
    assert!(out.contains("No hands found"));
}

#[test]
fn failures_are_reported_once() {
    let (code, _, err) = run_cli(&["sim", "--hands", "0", "--seed", "1"]);
    assert_eq!(code, 2);
    assert_eq!(err.matches("Error:").count(), 1, "{err}");
    assert!(err.contains("hands must be >= 1"));

    let (code, _, err) = run_cli(&["replay", "--input", "missing/file.jsonl"]);
    assert_eq!(code, 2);
    assert_eq!(err.matches("Error:").count(), 1, "{err}");
}

#[test]
fn replay_flags_redirected_showdown_award() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hands.jsonl");
    sim_to(&path, "2", "13", "passive");

    let mut records = read_records(&path);
    let events = &mut records[0].events;
    let at = events
        .iter()
        .position(|e| matches!(e.event, HandEvent::Showdown { .. }))
        .expect("passive hands reach showdown");
    let HandEvent::Showdown { pots, .. } = &mut events[at].event else {
        unreachable!()
    };
    let thief = (pots[0].shares[0].0 + 1) % 3;
    pots[0].shares = vec![(thief, pots[0].amount)];
    write_records(&path, &records);

    let (code, out, err) = run_cli(&["replay", "--input", path.to_str().unwrap()]);
    assert_eq!(code, 2);
    assert!(out.contains("1 hands verified, 1 failed"));
    assert!(err.contains("does not pay out as the hands rank"));
}
