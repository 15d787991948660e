use clap::{
    crate_authors, crate_description, crate_name, crate_version, Arg, ArgAction, ArgMatches,
    Command,
};
use sprout::config::{CreateConfig, InputSource};
use std::path::PathBuf;

fn input_arg() -> Arg {
    Arg::new("input")
        .short('i')
        .long("input")
        .value_name("FILE")
        .help("File with the folder structure, or - for stdin (opens $EDITOR when omitted)")
}

fn destination_arg() -> Arg {
    Arg::new("destination")
        .help("Folder the structure is created in")
        .required(true)
}

// The CLI layer should only parse inputs and forward them to library code.
fn main() -> miette::Result<()> {
    let matches = Command::new(crate_name!())
        .about(crate_description!())
        .author(crate_authors!())
        .version(crate_version!())
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("create")
                .about("Creates the folders and files described by a tree or indented listing")
                .arg(destination_arg())
                .arg(input_arg())
                .arg(
                    Arg::new("template")
                        .short('t')
                        .long("template")
                        .value_name("FILE")
                        .help("Template descriptor to use instead of <destination>/template.json"),
                )
                .arg(
                    Arg::new("yes")
                        .short('y')
                        .long("yes")
                        .help("Create without asking for confirmation")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("dry-run")
                        .long("dry-run")
                        .help("Only preview what would be created")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("report")
                        .short('r')
                        .long("report")
                        .help("Write folder_structure_report.md afterwards")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Writes folder_structure_report.md for a structure description")
                .arg(destination_arg())
                .arg(input_arg()),
        )
        .get_matches();

    init_logging(matches.get_flag("verbose"));

    match matches.subcommand() {
        Some(("create", args)) => handle_create(args),
        Some(("report", args)) => handle_report(args),
        _ => unreachable!(),
    }
}

fn init_logging(is_verbose: bool) {
    let default_filter = if is_verbose { "debug" } else { "warn" };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    log::debug!("executing in verbose mode");
}

fn destination(args: &ArgMatches) -> PathBuf {
    args.get_one::<String>("destination")
        .map(PathBuf::from)
        .expect("destination required")
}

fn input(args: &ArgMatches) -> InputSource {
    InputSource::from_arg(args.get_one::<String>("input").map(String::as_str))
}

fn handle_create(args: &ArgMatches) -> miette::Result<()> {
    let config = CreateConfig {
        input: input(args),
        template: args.get_one::<String>("template").map(PathBuf::from),
        assume_yes: args.get_flag("yes"),
        dry_run: args.get_flag("dry-run"),
        report: args.get_flag("report"),
        ..CreateConfig::new(destination(args))
    };

    sprout::run_create(&config)?;

    Ok(())
}

fn handle_report(args: &ArgMatches) -> miette::Result<()> {
    let path = sprout::run_report(&destination(args), &input(args))?;

    println!("{}", path.display());

    Ok(())
}
