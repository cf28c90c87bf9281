mod api;
mod client;
mod form;
mod render;
mod settings;
mod shell;
mod submit;

use std::process::exit;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use client::ApiClient;
use settings::{Args, Settings};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let settings = match Settings::load(args.config.as_deref()) {
        Ok(ret) => ret,
        Err(error) => {
            eprintln!("Problem while loading the configuration file. {error}");
            exit(1);
        }
    };

    let client = match ApiClient::new() {
        Ok(ret) => ret,
        Err(error) => {
            eprintln!("Problem while building the HTTP client. {error}");
            exit(1);
        }
    };

    let form = args.form_state(&settings);

    if args.one_shot() {
        // Validation failures block the submission outright.
        let prepared = match submit::prepare(&form) {
            Ok(ret) => ret,
            Err(error) => {
                eprintln!("{error}");
                exit(1);
            }
        };
        println!("{}", render::loading_text());
        let result = submit::dispatch(&client, &prepared).await;
        print!("{}", result.report.to_text());
        if result.failed {
            exit(1);
        }
        return;
    }

    if let Err(error) = shell::run(form, &client).await {
        eprintln!("Problem while running the session. {error}");
        exit(1);
    }
}
