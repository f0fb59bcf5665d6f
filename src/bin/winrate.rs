use std::collections::{BTreeMap, HashMap};
use std::error::Error;
use std::process;

use clap::Parser;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use unobot::{
    Bot, Game, GameOver, GameSettings, Player, PlayerId, RecordingNotifier, create_bot_from_spec,
    label_for_spec,
};

/// Default base seed for deterministic runs.
const DEFAULT_SEED: u64 = 0xC0FFEE_u64 << 32 | 0x5EED_u64;

#[derive(Parser, Debug)]
#[command(name = "winrate", about = "Run multiple games and report per-bot win rates.")]
struct Args {
    /// Number of games to simulate
    #[arg(short = 'g', long = "games", default_value_t = 200)]
    games: usize,

    /// Base RNG seed (each game's shuffle seed is derived deterministically)
    #[arg(short = 's', long = "seed", default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Safety cap on actions per game; games exceeding this are aborted (not counted as a win)
    #[arg(long = "max-turns", default_value_t = 2000)]
    max_turns: usize,

    /// Cards dealt to each player
    #[arg(long = "hand-size", default_value_t = GameSettings::default().hand_size)]
    hand_size: usize,

    /// Player bot specs: e.g., heuristic random
    bots: Vec<String>,
}

#[derive(Default)]
struct Tally {
    seats: usize,
    wins: usize,
    points: u64,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();
    if let Err(err) = run(args) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let settings = GameSettings::default();
    if args.bots.len() < settings.min_players || args.bots.len() > settings.max_players {
        return Err(format!(
            "expected between {} and {} bot specs, received {}",
            settings.min_players,
            settings.max_players,
            args.bots.len()
        )
        .into());
    }
    // Human players would block waiting for input.
    if args.bots.iter().any(|s| label_for_spec(s) == "human") {
        return Err("human players are not supported in winrate runs".into());
    }

    let mut tallies: BTreeMap<String, Tally> = BTreeMap::new();
    let mut aborted_games = 0usize;
    let mut seeds = StdRng::seed_from_u64(args.seed);

    for game_index in 0..args.games {
        let game_seed = seeds.next_u64();
        let mut players = Vec::with_capacity(args.bots.len());
        let mut bots: HashMap<PlayerId, Box<dyn Bot>> = HashMap::new();
        let mut labels: HashMap<PlayerId, String> = HashMap::new();
        // Rotate specs so every bot starts from every seat.
        for seat in 0..args.bots.len() {
            let spec = &args.bots[(seat + game_index) % args.bots.len()];
            let label = label_for_spec(spec);
            let player = Player::new(format!("{seat}-{label}"));
            bots.insert(player.id.clone(), create_bot_from_spec(spec, seat, game_seed)?);
            labels.insert(player.id.clone(), label.clone());
            tallies.entry(label).or_default().seats += 1;
            players.push(player);
        }

        let mut game = Game::builder(players)
            .with_room(format!("winrate-{game_index}"))
            .with_seed(game_seed)
            .with_hand_size(args.hand_size)
            .build()?;
        let mut notifier = RecordingNotifier::new();
        let mut outcome: Option<GameOver> = None;
        let mut turns = 0usize;
        while !game.is_finished() && turns < args.max_turns {
            let current = game.current_player().id.clone();
            let state = game.state_view()?;
            let legal_actions = game.legal_actions(current.as_str())?;
            let bot = bots
                .get_mut(&current)
                .ok_or_else(|| format!("no bot seated as {current}"))?;
            let action = bot.select_action(&state, &legal_actions);
            game.apply_action(current.as_str(), action, &mut notifier, |over| {
                outcome = Some(over)
            })?;
            notifier.clear();
            turns += 1;
        }

        match outcome {
            Some(GameOver::Won { winner, score }) => {
                if let Some(tally) = labels.get(&winner.id).and_then(|l| tallies.get_mut(l)) {
                    tally.wins += 1;
                    tally.points += u64::from(score);
                }
            }
            _ => aborted_games += 1,
        }
    }

    println!("Games: {}  (aborted: {aborted_games})", args.games);
    println!("{:<12}{:>8}{:>8}{:>10}{:>12}", "bot", "seats", "wins", "win %", "avg points");
    for (label, tally) in &tallies {
        let rate = if tally.seats == 0 {
            0.0
        } else {
            100.0 * tally.wins as f64 / tally.seats as f64
        };
        let avg = if tally.wins == 0 {
            0.0
        } else {
            tally.points as f64 / tally.wins as f64
        };
        println!(
            "{:<12}{:>8}{:>8}{:>9.1}%{:>12.1}",
            label, tally.seats, tally.wins, rate, avg
        );
    }
    Ok(())
}
