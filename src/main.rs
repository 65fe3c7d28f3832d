use log::{error, info};
use std::process;
use wasm_codec::fixtures::PANIC_NAME;
use wasm_fixtures::{config::Config, logger, render, run};

fn main() {
	let config = match Config::from_env() {
		Ok(config) => config,
		Err(e) => {
			eprintln!("{}", e);
			process::exit(2);
		},
	};
	if let Err(e) = logger::init(config.log_level) {
		eprintln!("cannot install logger: {}", e);
	}

	let outcome = match run(&config) {
		Ok(outcome) => outcome,
		Err(e) => {
			error!("{}", e);
			process::exit(1);
		},
	};

	if !config.quiet {
		print!("{}", render::report(&outcome.report));
	}
	if !config.validate_only {
		println!();
		println!("{}", render::typescript(&outcome.encoded.bytes, PANIC_NAME));
		println!();
		print!("{}", render::hexdump(&outcome.encoded.bytes));
	}

	if !outcome.report.passed() {
		error!("validation failed");
		process::exit(1);
	}
	info!("all checks passed");
}
