//! `httpclient [METHOD] URL [JSON_ARGS]`
//!
//! Sends one request and prints the status code and body. With no arguments
//! it prints usage and exits with status 1. Set `RUST_LOG=debug` to see the
//! connection being made on stderr.

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use httpclient_core::{Command, HttpClient, HttpResponse};
use log::error;

#[derive(Debug, Parser)]
#[command(name = "httpclient")]
#[command(about = "Send a single GET or POST request over a raw TCP socket")]
#[command(version)]
struct Cli {
    /// URL, or METHOD URL [JSON_ARGS]. Only METHOD=POST sends a body; JSON_ARGS
    /// must be a JSON object and is sent as form fields.
    #[arg(value_name = "ARGS", num_args = 0..=3)]
    args: Vec<String>,

    /// Print the response as a JSON object
    #[arg(long)]
    json: bool,
}

fn render(response: &HttpResponse, json: bool) -> Result<String, serde_json::Error> {
    if json {
        serde_json::to_string(response)
    } else {
        Ok(response.to_string())
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let Some(command) = Command::from_positional(cli.args.as_slice()) else {
        if let Err(err) = Cli::command().print_help() {
            error!("could not print usage: {err}");
        }
        return ExitCode::from(1);
    };

    let response = match command.run(&HttpClient::new()) {
        Ok(response) => response,
        Err(err) => {
            error!("request failed: {err}");
            return ExitCode::FAILURE;
        }
    };

    match render(&response, cli.json) {
        Ok(text) => {
            println!("{text}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("could not render response: {err}");
            ExitCode::FAILURE
        }
    }
}
