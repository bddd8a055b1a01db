use clap::Parser;
use itertools::Itertools;
use rand::rngs::StdRng;
use rand::SeedableRng;

use hexpressions::cube::CENTER_COLUMN;
use hexpressions::resolver::DIRECTIONS;
use hexpressions::{
    EdgeworkCounts, Face, PatternTable, RngChooser, Session, SubmitResult, Vertex, WordList,
};

type Result<T> = std::result::Result<T, anyhow::Error>;

/// Plays Regular Hexpressions on the terminal. Reads one command per line:
/// face letters (U D F B L R) to turn, `submit`, `top` or `state`.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Seed for every random choice; omit for a fresh puzzle
    #[arg(long)]
    seed: Option<u64>,

    /// Other solvable modules on the bomb
    #[arg(long, default_value_t = 0)]
    modules: usize,

    #[arg(long, default_value_t = 0)]
    batteries: usize,

    #[arg(long, default_value_t = 0)]
    indicators: usize,

    /// Print the clue table and exit
    #[arg(long)]
    grid: bool,
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Turns(Vec<Face>),
    Submit,
    Top,
    State,
}

fn parse_command(line: &str) -> Result<Command> {
    let line = line.trim().to_ascii_lowercase();
    Ok(match line.as_str() {
        "submit" => Command::Submit,
        "top" => Command::Top,
        "state" => Command::State,
        _ => {
            let faces = line
                .chars()
                .filter(|c| !c.is_whitespace())
                .map(|c| match Face::from_letter(c) {
                    Some(face) => Ok(face),
                    None => Err(anyhow::anyhow!("unknown face {:?}", c)),
                })
                .collect::<Result<Vec<Face>>>()?;
            if faces.is_empty() {
                anyhow::bail!("nothing to do");
            }
            Command::Turns(faces)
        }
    })
}

fn show_state(session: &Session) -> String {
    let mut rv = Vec::new();
    for (ri, regex) in session.puzzle().regexes().iter().enumerate() {
        rv.push(format!(
            "{:>10} {:>24} | {}",
            DIRECTIONS[ri],
            regex.real(),
            session.word_at_slot(CENTER_COLUMN[ri])
        ));
    }
    rv.push(
        Vertex::ALL
            .iter()
            .map(|&slot| format!("{} {}", slot, session.word_at_slot(slot)))
            .join(", "),
    );
    rv.join("\n")
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let table = PatternTable::builtin()?;
    if args.grid {
        println!("{}", table.grid());
        return Ok(());
    }
    let words = WordList::builtin()?;

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut chooser = RngChooser(rng);
    let counts = EdgeworkCounts {
        other_components: args.modules,
        batteries: args.batteries,
        indicators: args.indicators,
    };
    let mut session = Session::new(&table, &words, &counts, &mut chooser)?;

    println!("Initial coordinates: {}", session.initial_coordinates_label());
    println!("Top word: {}", session.top_word());

    for line in std::io::stdin().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{}", e);
                continue;
            }
        };

        match command {
            Command::Turns(faces) => {
                for face in faces {
                    // turns complete immediately, nothing is ever pending here
                    assert!(session.begin_turn(face));
                    session.complete_turn();
                }
            }
            Command::Submit => match session.submit() {
                SubmitResult::Success => {
                    println!("Solved!");
                    return Ok(());
                }
                SubmitResult::Failure => println!("Strike."),
                SubmitResult::Ignored => println!("Ignored."),
            },
            Command::Top => {}
            Command::State => println!("{}", show_state(&session)),
        }
        println!("Top word: {}", session.top_word());
    }

    Ok(())
}
