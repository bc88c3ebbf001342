use std::env;
use std::process;
use std::time::Instant;

use clap::{App, Arg};
use prettytable::{Cell, Row, Table};
use separator::Separatable;

use sokoban_search::config::{Config, HeuristicKind, Method};
use sokoban_search::heuristics::Heuristic;
use sokoban_search::level::Level;
use sokoban_search::moves::Moves;
use sokoban_search::{LoadLevel, Solve};

fn main() {
    env_logger::init();

    let method_names: Vec<_> = Method::ALL.iter().map(Method::to_string).collect();
    let method_names: Vec<_> = method_names.iter().map(String::as_str).collect();
    let heuristic_names: Vec<_> = HeuristicKind::ALL.iter().map(HeuristicKind::to_string).collect();
    let heuristic_names: Vec<_> = heuristic_names.iter().map(String::as_str).collect();

    let matches = App::new("sokoban-search")
        .author("martin-t")
        .version("0.1")
        .arg(
            Arg::with_name("method")
                .short("m")
                .long("method")
                .takes_value(true)
                .possible_values(&method_names)
                .help("search strategy (default annealing)"),
        )
        .arg(
            Arg::with_name("heuristic")
                .short("e")
                .long("heuristic")
                .takes_value(true)
                .possible_values(&heuristic_names)
                .help("state evaluation (default efficient)"),
        )
        .arg(
            Arg::with_name("seed")
                .short("s")
                .long("seed")
                .takes_value(true)
                .help("seed for annealing"),
        )
        .arg(
            Arg::with_name("max-iterations")
                .short("i")
                .long("max-iterations")
                .takes_value(true)
                .help("iteration limit of the chosen method"),
        )
        .arg(
            Arg::with_name("heuristics")
                .long("heuristics")
                .help("print all heuristics for the initial state"),
        )
        .arg(Arg::with_name("file").required(true))
        .get_matches();

    let mut config = Config::default();
    if let Some(method) = matches.value_of("method") {
        config.method = method.parse().unwrap_or_else(|err| fail(err));
    }
    if let Some(heuristic) = matches.value_of("heuristic") {
        config.heuristic = heuristic.parse().unwrap_or_else(|err| fail(err));
    }
    if let Some(seed) = matches.value_of("seed") {
        config.annealing.seed = seed.parse().unwrap_or_else(|err| fail(err));
    }
    if let Some(max) = matches.value_of("max-iterations") {
        let max = max.parse().unwrap_or_else(|err| fail(err));
        config.ida.max_iterations = max;
        config.annealing.max_iterations = max;
    }
    // required so clap already exited if it's missing
    let path = matches.value_of("file").unwrap_or_default();

    let level = path.load_level().unwrap_or_else(|err| {
        let current_dir = env::current_dir().unwrap_or_default();
        println!(
            "Can't load level {} in {}: {}",
            path,
            current_dir.display(),
            err
        );
        process::exit(1);
    });
    print!("{}", level);

    if matches.is_present("heuristics") {
        print_heuristics(&level);
    }

    println!("Solving using {} with {}...", config.method, config.heuristic);
    let started = Instant::now();
    let solution = level.solve(&config);
    let elapsed = started.elapsed();
    println!(
        "Finished in {}.{:03} s",
        elapsed.as_secs(),
        elapsed.subsec_millis()
    );

    match solution.moves {
        Some(moves) => {
            let moves = Moves::new(moves);
            println!("Solution: {}", moves);
            println!("Moves: {}", moves.move_cnt().separated_string());
            println!("Pushes: {}", moves.push_cnt().separated_string());
            println!("Pulls: {}", moves.pull_cnt().separated_string());
        }
        None => println!("No solution found"),
    }
    print!("{}", solution.stats);
}

fn print_heuristics(level: &Level) {
    let mut table = Table::new();
    table.set_titles(Row::new(vec![Cell::new("Heuristic"), Cell::new("Value")]));
    for &kind in HeuristicKind::ALL.iter() {
        table.add_row(Row::new(vec![
            Cell::new(&kind.to_string()),
            Cell::new(&kind.evaluate(level).to_string()),
        ]));
    }
    table.printstd();
}

fn fail<E: std::fmt::Display, T>(err: E) -> T {
    println!("Invalid argument: {}", err);
    process::exit(1);
}
