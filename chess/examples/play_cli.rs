// Simple command-line application to play chess with UCI moves
//
// Set `RUST_LOG=debug` to see why moves are rejected.

use neuroboard::{board::PrettyStyle, Color, MoveChain};
use std::io::{self, BufRead, Write};

fn main() {
    env_logger::init();

    let mut stdin = io::stdin().lock();

    let mut chain = MoveChain::new_initial();

    loop {
        match chain.calc_outcome() {
            Ok(Some(outcome)) => {
                println!("{}", chain.last().pretty(PrettyStyle::Utf8));
                println!("Game finished: {}", outcome);
                println!("Moves: {}", chain.uci_list());
                break;
            }
            Ok(None) => {}
            Err(e) => {
                println!("Broken position: {}", e);
                break;
            }
        }

        println!("{}", chain.last().pretty(PrettyStyle::Utf8));
        println!("Evaluation: {}", chain.last().evaluate());
        if chain.last().is_check() == Ok(true) {
            println!("Check!");
        }
        let side = match chain.last().side() {
            Color::White => "White",
            Color::Black => "Black",
        };
        print!("{} move ({}, \"undo\" or \"moves\"): ", side, chain.len() / 2 + 1);
        io::stdout().flush().unwrap();
        let mut s = String::new();
        if stdin.read_line(&mut s).unwrap() == 0 {
            break;
        }
        let s = s.trim();

        match s {
            "undo" => {
                if chain.pop().is_none() {
                    println!("Nothing to undo");
                }
            }
            "moves" => match chain.last().legal_moves() {
                Ok(moves) => {
                    let list: Vec<_> = moves.iter().map(ToString::to_string).collect();
                    println!("{}", list.join(" "));
                }
                Err(e) => println!("Cannot generate moves: {}", e),
            },
            _ => {
                if let Err(e) = chain.push_uci(s) {
                    println!("Bad move: {}", e);
                }
            }
        }

        println!();
    }
}
