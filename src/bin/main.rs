use std::io;
#[cfg(feature = "remote")]
use std::time::Duration;

use clap::{Arg, ArgAction, ArgMatches, Command};
use log::{error, info};

use kinarow::game::Game;
#[cfg(feature = "remote")]
use kinarow::game::format_moves;
#[cfg(feature = "remote")]
use kinarow::position::Side;
#[cfg(feature = "remote")]
use kinarow::remote::{http, RemoteMatch};
use kinarow::search::SearchSettings;

fn game_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("size")
                .short('s')
                .long("size")
                .env("SIZE")
                .help("Board size")
                .num_args(1)
                .default_value("3")
                .value_parser(clap::value_parser!(u64).range(1..=64)),
        )
        .arg(
            Arg::new("winLength")
                .short('k')
                .long("win-length")
                .env("WIN_LENGTH")
                .help("Number of stones in a row needed to win")
                .num_args(1)
                .default_value("3")
                .value_parser(clap::value_parser!(u64).range(1..=64)),
        )
        .arg(
            Arg::new("depth")
                .short('d')
                .long("depth")
                .env("DEPTH")
                .help(
                    "Search depth in plies. Deeper searches play better, but are exponentially slower",
                )
                .num_args(1)
                .default_value("4")
                .value_parser(clap::value_parser!(u16).range(1..)),
        )
        .arg(
            Arg::new("proximity")
                .long("proximity")
                .env("PROXIMITY")
                .help("Only search moves within this many squares of existing stones")
                .num_args(1)
                .default_value("1")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("sequential")
                .long("sequential")
                .env("SEQUENTIAL")
                .help("Search root moves one at a time, instead of on all cores")
                .action(ArgAction::SetTrue)
                .num_args(0),
        )
}

pub fn main() -> io::Result<()> {
    let app = Command::new("kinarow")
        .version("0.1")
        .about("Generalized k-in-a-row Tic-Tac-Toe engine")
        .subcommand_required(true)
        .arg(
            Arg::new("logfile")
                .short('l')
                .long("logfile")
                .env("LOGFILE")
                .value_name("kinarow.log")
                .help("Name of debug logfile")
                .global(true)
                .num_args(1),
        )
        .arg(
            Arg::new("threads")
                .short('t')
                .long("threads")
                .env("THREADS")
                .help("Number of search threads. Defaults to the number of logical cores")
                .global(true)
                .num_args(1)
                .value_parser(clap::value_parser!(usize)),
        )
        .subcommand(
            game_args(
                Command::new("play").about("Play against the engine through the command line"),
            )
            .arg(
                Arg::new("computerFirst")
                    .long("computer-first")
                    .env("COMPUTER_FIRST")
                    .help("Let the engine make the first move")
                    .action(ArgAction::SetTrue)
                    .num_args(0),
            ),
        );

    #[cfg(feature = "remote")]
    let app = add_remote_subcommands(app);
    let matches = app.get_matches();

    let log_dispatcher = fern::Dispatch::new().format(|out, message, record| {
        out.finish(format_args!(
            "{}[{}][{}] {}",
            chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
            record.target(),
            record.level(),
            message
        ))
    });

    let logging_result = if let Some(log_file) = matches.get_one::<String>("logfile") {
        log_dispatcher
            .chain(
                fern::Dispatch::new()
                    .level(log::LevelFilter::Debug)
                    .chain(fern::log_file(log_file)?),
            )
            .chain(
                fern::Dispatch::new()
                    .level(log::LevelFilter::Warn)
                    .chain(io::stderr()),
            )
            .apply()
    } else {
        log_dispatcher
            .level(log::LevelFilter::Warn)
            .chain(io::stderr())
            .apply()
    };
    logging_result.map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;

    if let Some(&threads) = matches.get_one::<usize>("threads") {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
    }

    match matches.subcommand() {
        Some(("play", sub_matches)) => {
            let mut game = game_from_args(sub_matches);
            let outcome = game.play_human_vs_computer(
                io::stdin().lock(),
                io::stdout(),
                sub_matches.get_flag("computerFirst"),
            )?;
            info!("Game over: {}", outcome);
            Ok(())
        }
        #[cfg(feature = "remote")]
        Some((name @ ("host" | "join"), sub_matches)) => play_remote(name, sub_matches),
        Some((name, _)) => {
            error!("Unknown subcommand {}", name);
            Ok(())
        }
        None => unreachable!(),
    }
}

fn game_from_args(matches: &ArgMatches) -> Game {
    let size = *matches.get_one::<u64>("size").unwrap() as usize;
    let win_length = *matches.get_one::<u64>("winLength").unwrap() as usize;
    let settings = SearchSettings::default()
        .depth(*matches.get_one::<u16>("depth").unwrap())
        .proximity(*matches.get_one::<usize>("proximity").unwrap())
        .parallel(!matches.get_flag("sequential"));
    info!(
        "Starting {}x{} game with win length {}, {:?}",
        size, size, win_length, settings
    );
    Game::new(size, win_length, settings)
}

#[cfg(feature = "remote")]
fn add_remote_subcommands(app: Command) -> Command {
    app.subcommand(remote_args(
        game_args(Command::new("host").about(
            "Create a game against another team on the move server, and move first",
        ))
        .arg(
            Arg::new("opponent")
                .long("opponent")
                .env("OPPONENT_TEAM_ID")
                .value_name("TEAM")
                .help("Team id of the opponent")
                .required(true)
                .num_args(1),
        ),
    ))
    .subcommand(remote_args(
        game_args(Command::new("join").about(
            "Join a game on the move server, where the opponent moves first",
        ))
        .arg(
            Arg::new("gameId")
                .long("game-id")
                .env("GAME_ID")
                .value_name("GAME")
                .help("Id of the game to join")
                .required(true)
                .num_args(1),
        ),
    ))
}

#[cfg(feature = "remote")]
fn remote_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("team")
                .long("team")
                .env("TEAM_ID")
                .value_name("TEAM")
                .help("Our team id")
                .required(true)
                .num_args(1),
        )
        .arg(
            Arg::new("apiUrl")
                .long("api-url")
                .env("API_URL")
                .help("Move server endpoint")
                .num_args(1)
                .default_value(http::DEFAULT_API_URL),
        )
        .arg(
            Arg::new("userId")
                .long("user-id")
                .env("API_USER_ID")
                .value_name("USER")
                .help("User id for the move server")
                .required(true)
                .num_args(1),
        )
        .arg(
            Arg::new("apiKey")
                .long("api-key")
                .env("API_KEY")
                .value_name("KEY")
                .help("API key for the move server")
                .required(true)
                .num_args(1),
        )
        .arg(
            Arg::new("pollInterval")
                .long("poll-interval")
                .env("POLL_INTERVAL")
                .help("Seconds between polls for the opponent's move")
                .num_args(1)
                .default_value("1")
                .value_parser(parse_poll_interval),
        )
}

#[cfg(feature = "remote")]
fn parse_poll_interval(input: &str) -> Result<Duration, String> {
    let seconds: f32 = input.trim().parse().map_err(|err| format!("{}", err))?;
    Duration::try_from_secs_f32(seconds).map_err(|err| format!("{}", err))
}

#[cfg(feature = "remote")]
fn play_remote(name: &str, matches: &ArgMatches) -> io::Result<()> {
    let to_io_error = |err| io::Error::new(io::ErrorKind::Other, err);

    let game = game_from_args(matches);
    let team_id = matches.get_one::<String>("team").unwrap();
    let poll_interval = *matches.get_one::<Duration>("pollInterval").unwrap();
    let mut server = http::HttpMatchServer::new(
        matches.get_one::<String>("apiUrl").unwrap(),
        matches.get_one::<String>("userId").unwrap(),
        matches.get_one::<String>("apiKey").unwrap(),
    )
    .map_err(to_io_error)?;

    let mut remote_match = if name == "host" {
        let opponent = matches.get_one::<String>("opponent").unwrap();
        RemoteMatch::host(&mut server, team_id, opponent, game, poll_interval)
            .map_err(to_io_error)?
    } else {
        let game_id = matches.get_one::<String>("gameId").unwrap();
        RemoteMatch::join(&mut server, team_id, game_id, game, poll_interval)
    };
    println!("Playing game {}", remote_match.game_id());

    let outcome = remote_match.play().map_err(to_io_error)?;
    let position = remote_match.game().position();
    println!("{}", outcome);
    println!("Computer moves: {}", format_moves(position, Side::Computer));
    println!("Player moves: {}", format_moves(position, Side::Player));
    print!("{}", position);
    Ok(())
}
