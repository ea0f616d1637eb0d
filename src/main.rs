use colored::Colorize;
use env_logger::Env;
use json_shape::cli;

fn main() {
    let command_line_interface = cli::CommandLineInterface::load();

    let log_level = if command_line_interface.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    if let Err(error) = command_line_interface.run() {
        eprintln!("{} {error:#}", "error:".red().bold());
        std::process::exit(1);
    }
}
