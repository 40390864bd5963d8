use std::{fs, path::PathBuf, process::ExitCode};

use clap::{ArgAction, Parser, Subcommand};
use eyre::WrapErr;
use inbox_outbox::{catalog, trace, Session};
use itertools::Itertools;
use vm::MAX_STEPS;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// More logging, repeat for more still
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the available puzzles
    List,
    /// Describe a puzzle
    Show { puzzle: String },
    /// Run a program file against a puzzle
    Run {
        puzzle: String,
        program: PathBuf,
        /// Give up after this many instructions
        #[arg(long, env = "INBOX_OUTBOX_MAX_STEPS", default_value_t = MAX_STEPS)]
        max_steps: usize,
        /// Print the machine after every instruction
        #[arg(long)]
        step: bool,
    },
}

fn main() -> eyre::Result<ExitCode> {
    color_eyre::install()?;
    let cli = Cli::parse();
    trace::setup(trace::level(cli.verbose));

    match cli.command {
        Command::List => {
            for puzzle in catalog() {
                println!("{:<12} {}", puzzle.id, puzzle.name);
            }
        }
        Command::Show { puzzle } => {
            let session = Session::from_id(&puzzle)?;
            let puzzle = session.puzzle();
            println!("{}\n\n{}", puzzle.name, puzzle.description);
            println!("inbox:    [{}]", puzzle.initial_inbox.iter().join(", "));
            println!("expected: [{}]", puzzle.expected_outbox.iter().join(", "));
            if let Some(min_steps) = puzzle.min_steps {
                println!("par:      {min_steps} steps");
            }
            if let Some(hint) = &puzzle.hint {
                println!("hint:     {hint}");
            }
        }
        Command::Run {
            puzzle,
            program,
            max_steps,
            step,
        } => {
            let src = fs::read_to_string(&program)
                .wrap_err_with(|| format!("couldn't read {}", program.display()))?;
            let mut session = Session::from_id(&puzzle)?.with_max_steps(max_steps);
            session.set_program(lang::compile(&src)?);

            if step {
                print_state(&session);
                while session.step()? {
                    print_state(&session);
                }
            } else {
                session.run()?;
            }

            let result = session.result();
            println!("{}", result.message);
            println!(
                "steps: {}, memory cells used: {}",
                result.steps_taken, result.memory_used
            );
            if !result.success {
                return Ok(ExitCode::FAILURE);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn print_state(session: &Session) {
    let state = session.state();
    let current = session
        .current_instruction()
        .map(|instr| instr.to_string())
        .unwrap_or_else(|| "-".to_string());
    let accumulator = state
        .accumulator
        .map(|value| value.to_string())
        .unwrap_or_else(|| "-".to_string());
    println!(
        "#{:<5} pc {:<3} {:<24} acc {:<6} in [{}] out [{}] mem [{}]",
        state.step_count,
        state.pc,
        current,
        accumulator,
        state.inbox.iter().join(", "),
        state.outbox.iter().join(", "),
        session.memory_cells().iter().join(", "),
    );
}
