//! Play one all-AI match and print the outcome.
//!
//! ```text
//! simulate --players 3 --seed 7
//! RUST_LOG=debug simulate --players 2 --seed 42 --json
//! ```

use clap::Parser;

use golem_caravan::{GameConfig, PriorityPolicy, Session, DEFAULT_MAX_TURNS};

#[derive(Parser)]
#[command(author, version, about = "Play an automated golem-caravan match", long_about = None)]
struct Args {
    /// Number of seats (2 to 5).
    #[arg(short, long, default_value_t = 2)]
    players: usize,

    /// Seed for the shuffles and the seat order.
    #[arg(short, long, default_value_t = 42)]
    seed: i64,

    /// Stop after this many turns even if nobody has won.
    #[arg(long, default_value_t = DEFAULT_MAX_TURNS)]
    max_turns: u32,

    /// Print the final snapshot as JSON instead of standings.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let mut session = Session::start(GameConfig::new(args.players), args.seed)?;
    let result = session.run_ai_match(&PriorityPolicy, args.max_turns);
    let state = session.state();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&state.snapshot())?);
        return Ok(());
    }

    println!(
        "seed {} | {} players | round {} | turn {}",
        args.seed,
        state.player_count(),
        state.round,
        state.current_turn
    );
    for (id, points) in state.standings() {
        let player = &state.players[id];
        println!(
            "{:>10}  {:>3} pts  {} golems  [{}]",
            player.name,
            points,
            player.point_cards.len(),
            player.resources
        );
    }
    match result {
        Some(result) => println!("winner: {}", state.players[result.winner].name),
        None => println!("no winner after {} turns", args.max_turns),
    }
    Ok(())
}
