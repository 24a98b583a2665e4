use clap::{crate_version, App, Arg, ErrorKind};
use dpllsat::formula::dimacs::parse_file;
use dpllsat::*;
use log::info;
use std::process;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let app = App::new("dpllsat")
        .version(crate_version!())
        .about("Decides satisfiability of a DIMACS CNF formula with DPLL search")
        .arg(
            Arg::with_name("INPUT")
                .help("input file (in DIMACS CNF)")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("search")
                .long("search")
                .takes_value(true)
                .possible_values(&["iterative", "recursive", "trail"])
                .default_value("iterative")
                .help("how the search tree is walked"),
        )
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .takes_value(true)
                .value_name("SEED")
                .help("branch on a random unassigned variable, seeding the generator with SEED"),
        )
        .arg(
            Arg::with_name("strict-zero-lines")
                .long("strict-zero-lines")
                .help("read a clause line starting with 0 as an empty clause instead of skipping it"),
        );

    let matches = match app.get_matches_safe() {
        Ok(matches) => matches,
        Err(e) if e.kind == ErrorKind::HelpDisplayed || e.kind == ErrorKind::VersionDisplayed => e.exit(),
        Err(e) => {
            eprintln!("{}", e.message);
            process::exit(1);
        }
    };

    let search = match matches.value_of("search") {
        Some("recursive") => Search::Recursive,
        Some("trail") => Search::Trail,
        _ => Search::Iterative,
    };
    let branching = match matches.value_of("seed").map(str::parse::<u64>) {
        None => BranchingPolicy::LowestIndex,
        Some(Ok(seed)) => BranchingPolicy::Random { seed },
        Some(Err(e)) => {
            eprintln!("invalid seed: {}", e);
            process::exit(1);
        }
    };
    let options = ParseOptions {
        skip_zero_lines: !matches.is_present("strict-zero-lines"),
        ..ParseOptions::default()
    };
    let path = matches.value_of("INPUT").expect("INPUT is required");

    let problem = match parse_file(path, options) {
        Ok(problem) => problem,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };
    info!(
        "read {} clauses over {} variables from {}",
        problem.formula.num_clauses(),
        problem.num_variables,
        path
    );

    let num_variables = problem.num_variables;
    let mut solver = Solver::with_config(problem, SolverConfig { search, branching });
    let result = solver.solve();

    let stdout = std::io::stdout();
    if let Err(e) = write_result(&mut stdout.lock(), &result, num_variables) {
        eprintln!("{}", e);
        process::exit(1);
    }
}
