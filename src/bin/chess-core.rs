// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#[macro_use]
extern crate clap;

use std::fs::File;
use std::process;
use std::time::Instant;

use chess_core::eval::MaterialEvaluator;
use chess_core::notation;
use chess_core::search::{self, AlphaBetaSearcher, Searcher};
use chess_core::{perft_parallel, replay, MoveRecord, Position, Square};
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};

fn fen_arg(required: bool) -> Arg<'static, 'static> {
    Arg::with_name("FEN")
        .help("FEN string for a board position")
        .required(required)
        .index(1)
}

fn depth_arg() -> Arg<'static, 'static> {
    Arg::with_name("depth")
        .help("Depth of move tree to search")
        .value_name("DEPTH")
        .short("d")
        .long("depth")
        .takes_value(true)
}

fn main() {
    env_logger::init();
    let matches = App::new(crate_name!())
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("perft")
                .about("PERFT analysis of board positions")
                .arg(fen_arg(true))
                .arg(depth_arg().default_value("3")),
        )
        .subcommand(
            SubCommand::with_name("bestmove")
                .about("Search for the best move in a position")
                .arg(fen_arg(false))
                .arg(depth_arg().default_value("2")),
        )
        .subcommand(
            SubCommand::with_name("status")
                .about("Classify a board position")
                .arg(fen_arg(true)),
        )
        .subcommand(
            SubCommand::with_name("moves")
                .about("List the legal moves of the piece on a square")
                .arg(fen_arg(true))
                .arg(
                    Arg::with_name("SQUARE")
                        .help("Algebraic name of the origin square, e.g. e2")
                        .required(true)
                        .index(2),
                ),
        )
        .subcommand(
            SubCommand::with_name("replay")
                .about("Replay a JSON list of move records from the starting position")
                .arg(
                    Arg::with_name("FILE")
                        .help("Path to a JSON array of move records")
                        .required(true)
                        .index(1),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        ("perft", Some(matches)) => run_perft(matches),
        ("bestmove", Some(matches)) => run_bestmove(matches),
        ("status", Some(matches)) => run_status(matches),
        ("moves", Some(matches)) => run_moves(matches),
        ("replay", Some(matches)) => run_replay(matches),
        _ => unreachable!("clap requires a subcommand"),
    }
}

fn parse_fen_or_exit(fen: &str) -> Position {
    match Position::from_fen(fen) {
        Ok(pos) => pos,
        Err(err) => {
            eprintln!("invalid fen: {}", err);
            process::exit(1);
        }
    }
}

fn run_perft(matches: &ArgMatches) -> ! {
    let fen = matches.value_of("FEN").unwrap();
    let depth = value_t_or_exit!(matches, "depth", u32);
    let pos = parse_fen_or_exit(fen);

    println!("fen:   {}", fen);
    println!("depth: {}", depth);
    println!();
    println!("{}", pos);
    println!();
    for i in 1..depth + 1 {
        let start = Instant::now();
        let results = perft_parallel(&pos, i);
        let duration = start.elapsed();
        println!("perft({}) = {} ({} ms)", i, results, duration.as_millis());
    }

    process::exit(0);
}

fn run_bestmove(matches: &ArgMatches) -> ! {
    let pos = match matches.value_of("FEN") {
        Some(fen) => parse_fen_or_exit(fen),
        None => Position::from_start_position(),
    };
    let depth = search::clamp_depth(value_t_or_exit!(matches, "depth", u32));

    println!("{}", pos);
    println!();

    let mut searcher = AlphaBetaSearcher::<MaterialEvaluator>::new();
    let result = searcher.search(&pos, depth);
    match result.best_move {
        Some(mov) => println!("best move: {} ({})", mov, notation::pretty(&mov)),
        None => println!("best move: (none)"),
    }
    println!("    score: {}", result.score);
    println!("    nodes: {}", result.nodes_searched);
    process::exit(0);
}

fn run_status(matches: &ArgMatches) -> ! {
    let pos = parse_fen_or_exit(matches.value_of("FEN").unwrap());
    println!("{}", pos);
    println!();
    println!("status: {}", pos.status());
    process::exit(0);
}

fn run_moves(matches: &ArgMatches) -> ! {
    let pos = parse_fen_or_exit(matches.value_of("FEN").unwrap());
    let square = match matches.value_of("SQUARE").unwrap().parse::<Square>() {
        Ok(sq) => sq,
        Err(err) => {
            eprintln!("{}", err);
            process::exit(1);
        }
    };

    for mov in pos.legal_moves(square) {
        println!("{}", notation::pretty(&mov));
    }

    process::exit(0);
}

fn run_replay(matches: &ArgMatches) -> ! {
    let path = matches.value_of("FILE").unwrap();
    let records: Vec<MoveRecord> = match File::open(path)
        .map_err(|e| e.to_string())
        .and_then(|f| serde_json::from_reader(f).map_err(|e| e.to_string()))
    {
        Ok(records) => records,
        Err(err) => {
            eprintln!("could not read {}: {}", path, err);
            process::exit(1);
        }
    };

    let result = replay(&Position::from_start_position(), &records);
    println!("{}", result.position);
    println!();
    println!("fen:     {}", result.position.as_fen());
    println!("applied: {} of {}", result.applied, records.len());
    if let Some((index, reason)) = result.halted {
        println!("halted:  record {}: {}", index, reason);
        process::exit(2);
    }

    process::exit(0);
}
