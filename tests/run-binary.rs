use assert_cmd::prelude::*;
use std::process::Command;

fn run(args: &[&str]) -> (bool, String) {
    let output = Command::main_binary().unwrap().args(args).output().unwrap();
    (
        output.status.success(),
        String::from_utf8(output.stdout).unwrap(),
    )
}

#[test]
fn run_ida_star_corridor() {
    let (success, stdout) = run(&[
        "--method",
        "ida-star",
        "--heuristic",
        "deadlock-direct-path",
        "levels/corridor.txt",
    ]);
    assert!(success);
    assert!(stdout.starts_with("#######\n#@$  .#\n#######\n"));
    assert!(stdout.contains("Solving using ida-star with deadlock-direct-path..."));
    assert!(stdout.contains("Solution: RRR\n"));
    assert!(stdout.contains("Moves: 3\n"));
    assert!(stdout.contains("Pulls: 0\n"));
    assert!(stdout.contains("States explored: 4\n"));
}

#[test]
fn run_annealing_default() {
    let (success, stdout) = run(&["--seed", "3", "levels/corridor.txt"]);
    assert!(success);
    assert!(stdout.contains("Solving using annealing with efficient..."));
    assert!(stdout.contains("Solution: "));
}

#[test]
fn run_no_solution() {
    let (success, stdout) = run(&["--heuristic", "deadlock-efficient", "levels/corner.txt"]);
    assert!(success);
    assert!(stdout.contains("No solution found\n"));
}

#[test]
fn run_heuristics_table() {
    let (success, stdout) = run(&[
        "--heuristics",
        "--method",
        "ida-star",
        "levels/solved.txt",
    ]);
    assert!(success);
    for name in &["manhattan", "deadlock-efficient", "hungarian-greedy"] {
        assert!(stdout.contains(name), "{}", name);
    }
    assert!(stdout.contains("Solution: \n"));
    assert!(stdout.contains("Moves: 0\n"));
}

#[test]
fn run_missing_file() {
    Command::main_binary()
        .unwrap()
        .arg("levels/does-not-exist.txt")
        .assert()
        .failure();
}

#[test]
fn run_unknown_heuristic() {
    Command::main_binary()
        .unwrap()
        .args(&["--heuristic", "optimal", "levels/corridor.txt"])
        .assert()
        .failure();
}
