use std::collections::HashMap;
use std::env;
use std::error::Error;
use std::process;

use unobot::{
    Bot, Game, GameOver, GameSettings, LogNotifier, Player, PlayerId, create_bot_from_spec,
    describe_action, label_for_spec, render_state,
};

const DEFAULT_SEED: u64 = 0xDEC0_1DED_5EED_F00D;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let mut args = env::args().skip(1);
    let mut visualize = false;
    let mut seed = DEFAULT_SEED;
    let mut hand_size = GameSettings::default().hand_size;
    let mut max_turns: Option<usize> = None;
    let mut bot_specs: Vec<String> = Vec::new();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--visualize" => visualize = true,
            "--seed" => {
                let value = args
                    .next()
                    .ok_or_else(|| "--seed requires a value".to_string())?;
                seed = value
                    .parse::<u64>()
                    .map_err(|_| format!("invalid seed value: {value}"))?;
            }
            "--hand-size" => {
                let value = args
                    .next()
                    .ok_or_else(|| "--hand-size requires a value".to_string())?;
                hand_size = value
                    .parse::<usize>()
                    .map_err(|_| format!("invalid hand-size value: {value}"))?;
            }
            "--max-turns" => {
                let value = args
                    .next()
                    .ok_or_else(|| "--max-turns requires a value".to_string())?;
                max_turns = Some(
                    value
                        .parse::<usize>()
                        .map_err(|_| format!("invalid max-turns value: {value}"))?,
                );
            }
            "--help" => {
                print_usage();
                return Ok(());
            }
            other => bot_specs.push(other.to_string()),
        }
    }

    if bot_specs.is_empty() {
        bot_specs = vec![String::from("human"), String::from("heuristic")];
    }
    let settings = GameSettings::default();
    if bot_specs.len() < settings.min_players || bot_specs.len() > settings.max_players {
        return Err(format!(
            "expected between {} and {} players, received {}",
            settings.min_players,
            settings.max_players,
            bot_specs.len()
        )
        .into());
    }

    let mut players = Vec::with_capacity(bot_specs.len());
    let mut bots: HashMap<PlayerId, Box<dyn Bot>> = HashMap::new();
    for (index, spec) in bot_specs.iter().enumerate() {
        let player = Player::new(format!("{index}-{}", label_for_spec(spec)));
        bots.insert(player.id.clone(), create_bot_from_spec(spec, index, seed)?);
        players.push(player);
    }

    let mut game = Game::builder(players)
        .with_room("simulate")
        .with_seed(seed)
        .with_hand_size(hand_size)
        .build()?;
    let mut notifier = LogNotifier::new("simulate");

    println!("Starting UNO simulation with {} players.\n", bot_specs.len());
    let mut outcome: Option<GameOver> = None;
    let mut turns = 0usize;
    while !game.is_finished() {
        if let Some(limit) = max_turns {
            if turns >= limit {
                println!("Max turn limit {limit} reached. Stopping simulation.");
                break;
            }
        }
        let current = game.current_player().id.clone();
        let state = game.state_view()?;
        let legal_actions = game.legal_actions(current.as_str())?;
        let bot = bots
            .get_mut(&current)
            .ok_or_else(|| format!("no bot seated as {current}"))?;
        if visualize {
            println!("{}", render_state(&state));
        }
        let action = bot.select_action(&state, &legal_actions);
        if visualize {
            println!("{current}: {}\n", describe_action(&state, &action));
        }
        game.apply_action(current.as_str(), action, &mut notifier, |over| {
            outcome = Some(over)
        })?;
        turns += 1;
    }

    match outcome {
        Some(GameOver::Won { winner, score }) => {
            println!("Game finished after {turns} actions. Winner: {} with {score} points.", winner.name)
        }
        _ => println!("Simulation stopped before completion."),
    }
    Ok(())
}

fn print_usage() {
    println!("Usage: simulate [OPTIONS] [BOT ...]");
    println!("  --visualize           Show the game state and chosen actions each turn");
    println!("  --seed <u64>          Seed for shuffling (default: {DEFAULT_SEED:#x})");
    println!("  --hand-size <usize>   Cards dealt to each player (default: 7)");
    println!("  --max-turns <usize>   Stop after the specified number of actions");
    println!("  --help                Show this help message");
    println!("Bot entries (2 total):");
    println!("  human[:name]          Interactive human-controlled player");
    println!("  random[:seed]         Random bot with optional per-bot seed");
    println!("  heuristic             Rule-based bot");
    println!("If no bots are provided, defaults to one human and one heuristic bot.");
}
