//! # prop-kb
//!
//! A command-line front end for the propositional-logic knowledge base.
//! It loads a knowledge base from a file (sentences or ready-made clause
//! lines), decides satisfiability with the DPLL solver, proves hypotheses by
//! refutation, audits every variable, converts single sentences to CNF, and
//! generates random satisfiable instances for benchmarking.

#![allow(clippy::cast_precision_loss)]

use anyhow::{Context, bail};
use clap::{Args, CommandFactory, Parser, Subcommand};
use prop_kb::logic::assignment;
use prop_kb::logic::cnf::parse_and_normalize;
use prop_kb::logic::dpll::{Dpll, Solution, SolveStats};
use prop_kb::logic::entail::Verdict;
use prop_kb::logic::generator::{GeneratorConfig, generate};
use prop_kb::logic::kb::KnowledgeBase;
use prop_kb::logic::loader::{load_file, to_clause_lines};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tikv_jemalloc_ctl::{epoch, stats};

#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Defines the command-line interface.
#[derive(Parser, Debug)]
#[command(name = "prop-kb", version, about = "A propositional-logic knowledge base and solver")]
struct Cli {
    /// An optional global path argument. If provided without a subcommand,
    /// it's treated as a knowledge-base file (or a directory of `.kb`
    /// files) to solve.
    #[arg(global = true)]
    path: Option<PathBuf>,

    #[clap(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    common: CommonOptions,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decide satisfiability of a knowledge-base file.
    Solve {
        /// Path to the knowledge-base file, or a directory of `.kb` files.
        #[arg(long)]
        path: PathBuf,

        #[command(flatten)]
        common: CommonOptions,
    },

    /// Test whether the knowledge base proves a hypothesis sentence.
    Prove {
        /// Path to the knowledge-base file.
        #[arg(long)]
        path: PathBuf,

        /// The hypothesis, e.g. `"p => q"`.
        #[arg(short = 'H', long)]
        hypothesis: String,

        #[command(flatten)]
        common: CommonOptions,
    },

    /// Report the entailed status of every variable of the base.
    Audit {
        /// Path to the knowledge-base file.
        #[arg(long)]
        path: PathBuf,

        #[command(flatten)]
        common: CommonOptions,
    },

    /// Convert a single sentence to Conjunctive Normal Form.
    Normalize {
        /// The sentence to convert, e.g. `"a <=> (b v c)"`.
        #[arg(short = 'i', long)]
        sentence: String,
    },

    /// Generate a random satisfiable knowledge base in already-CNF form.
    Generate {
        /// Number of variables.
        #[arg(long)]
        variables: usize,

        /// Number of clauses.
        #[arg(long)]
        clauses: usize,

        /// Maximum literals per clause.
        #[arg(long)]
        literals: usize,

        /// Output file. Refuses to overwrite an existing file.
        #[arg(long)]
        output: PathBuf,

        /// Seed for reproducible instances.
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Options shared by the solving subcommands.
#[derive(Args, Debug, Default, Clone)]
struct CommonOptions {
    /// Treat the file as already-CNF clause lines instead of sentences.
    #[arg(short, long, default_value_t = false)]
    cnf: bool,

    /// Check any satisfying assignment against the clause set after solving.
    #[arg(short, long, default_value_t = true)]
    verify: bool,

    /// Print problem and search statistics.
    #[arg(short, long, default_value_t = true)]
    stats: bool,

    /// Print the satisfying assignment, if one exists.
    #[arg(short, long, default_value_t = false)]
    print_solution: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if let Some(path) = cli.path.clone() {
        if cli.command.is_none() {
            return solve_path(&path, &cli.common);
        }
    }

    match cli.command {
        Some(Commands::Solve { path, common }) => solve_path(&path, &common),
        Some(Commands::Prove {
            path,
            hypothesis,
            common,
        }) => {
            let kb = load_kb(&path, common.cnf)?;
            let verdict = kb.prove(&hypothesis)?;
            println!("{hypothesis}: {verdict}");
            Ok(())
        }
        Some(Commands::Audit { path, common }) => {
            let kb = load_kb(&path, common.cnf)?;
            for (variable, verdict) in kb.audit() {
                let status = match verdict {
                    Verdict::Proved => "true",
                    Verdict::Disproved => "false",
                    Verdict::Unknown => "unknown",
                };
                println!("{variable}: {status}");
            }
            Ok(())
        }
        Some(Commands::Normalize { sentence }) => {
            println!("Converting {sentence}...");
            for clause in parse_and_normalize(&sentence)? {
                println!("{clause}");
            }
            Ok(())
        }
        Some(Commands::Generate {
            variables,
            clauses,
            literals,
            output,
            seed,
        }) => generate_instance(variables, clauses, literals, &output, seed),
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => {
            eprintln!("No command provided. Use --help for more information.");
            std::process::exit(1);
        }
    }
}

fn load_kb(path: &Path, already_cnf: bool) -> anyhow::Result<KnowledgeBase> {
    load_file(path, already_cnf).with_context(|| format!("failed to load {}", path.display()))
}

/// Solves a single file, or every `.kb` file under a directory.
fn solve_path(path: &Path, common: &CommonOptions) -> anyhow::Result<()> {
    if path.is_dir() {
        for entry in walkdir::WalkDir::new(path)
            .into_iter()
            .filter_map(Result::ok)
        {
            let file = entry.path();
            if !file.is_file() || file.extension().is_none_or(|ext| ext != "kb") {
                continue;
            }
            solve_file(file, common)?;
        }
        return Ok(());
    }
    solve_file(path, common)
}

fn solve_file(path: &Path, common: &CommonOptions) -> anyhow::Result<()> {
    println!("Solving: {}", path.display());

    let parse_start = std::time::Instant::now();
    let kb = load_kb(path, common.cnf)?;
    let parse_time = parse_start.elapsed();

    epoch::advance().unwrap();

    let solve_start = std::time::Instant::now();
    let mut solver = Dpll::new(kb.clauses().clone());
    let solution = solver.solve();
    let elapsed = solve_start.elapsed();

    epoch::advance().unwrap();
    let allocated_bytes = stats::allocated::mib().unwrap().read().unwrap();
    let resident_bytes = stats::resident::mib().unwrap().read().unwrap();
    let allocated_mib = allocated_bytes as f64 / (1024.0 * 1024.0);
    let resident_mib = resident_bytes as f64 / (1024.0 * 1024.0);

    if common.verify {
        if let Solution::Satisfiable(model) = &solution {
            let ok = kb.satisfied_by(model);
            println!("Verified: {ok:?}");
            assert!(ok, "solution failed verification");
        }
    }

    if common.stats {
        print_stats(
            parse_time,
            elapsed,
            &kb,
            solver.stats(),
            allocated_mib,
            resident_mib,
        );
    }

    match solution {
        Solution::Satisfiable(model) => {
            if common.print_solution {
                println!("Solution: {}", assignment::render(&model));
            }
            println!("\nSATISFIABLE");
        }
        Solution::Unsatisfiable => println!("\nUNSATISFIABLE"),
    }

    Ok(())
}

fn generate_instance(
    variables: usize,
    clauses: usize,
    literals: usize,
    output: &Path,
    seed: Option<u64>,
) -> anyhow::Result<()> {
    if output.exists() {
        bail!("{} exists, refusing to overwrite", output.display());
    }

    let mut rng = seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
    let config = GeneratorConfig {
        variables,
        clauses,
        literals_per_clause: literals,
    };
    let (generated, planted) = generate(&config, &mut rng)?;

    std::fs::write(output, to_clause_lines(&generated))
        .with_context(|| format!("unable to write {}", output.display()))?;

    println!("Wrote {} clauses to {}", generated.len(), output.display());
    println!("One solution is: {}", assignment::render(&planted));
    Ok(())
}

fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

fn stat_line_with_rate(label: &str, value: u64, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

fn print_stats(
    parse_time: Duration,
    elapsed: Duration,
    kb: &KnowledgeBase,
    s: SolveStats,
    allocated: f64,
    resident: f64,
) {
    let elapsed_secs = elapsed.as_secs_f64();

    println!("\n=======================[ Problem Statistics ]=========================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Variables", kb.variables().len());
    stat_line("Clauses", kb.len());

    println!("========================[ Search Statistics ]========================");
    stat_line_with_rate("Decisions", s.decisions, elapsed_secs);
    stat_line_with_rate("Propagations", s.propagations, elapsed_secs);
    stat_line_with_rate("Pure literals", s.pure_literals, elapsed_secs);
    stat_line_with_rate("Conflicts", s.conflicts, elapsed_secs);
    stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
    stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("=====================================================================");
}
