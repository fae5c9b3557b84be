use std::sync::Arc;

use anyhow::Context;
use futures::stream::{FuturesUnordered, StreamExt};
use tokio::io::{AsyncBufReadExt, BufReader};

use cinemind_client::{
    app::{command::HELP, render::render, Command, Session},
    config::Config,
    models::Movie,
    services::{Completion, HttpMovieService, MovieService, SharedMovieService},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they don't interleave with the screen
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    tracing::info!(
        api_url = %config.api_url,
        variant = ?config.search_variant,
        recommend_by = ?config.recommend_by,
        "Configuration loaded"
    );

    let provider = HttpMovieService::from_config(&config).context("Failed to build HTTP client")?;
    match provider.health().await {
        Ok(info) => tracing::info!(provider = provider.name(), message = %info.message, "Movie service reachable"),
        Err(e) => tracing::warn!(provider = provider.name(), error = %e, "Movie service health check failed"),
    }

    let service: SharedMovieService = Arc::new(provider);
    let mut session = Session::new(service, config.search_variant);

    let mut in_flight = FuturesUnordered::new();
    in_flight.push(session.start().resolve());

    println!("CineMind\n{}\n", HELP);
    print!("{}", render(&session.screen()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read from stdin")? else {
                    break;
                };

                let command = match Command::parse(&line) {
                    Ok(command) => command,
                    Err(e) => {
                        println!("{}", e);
                        continue;
                    }
                };

                let pending = match command {
                    Command::Input(text) => {
                        session.type_text(&text);
                        session.submit(&text)
                    }
                    Command::Open(index) => {
                        let pending = session.select(index);
                        if pending.is_none() && session.view().is_browsing() {
                            println!("No result #{}", index + 1);
                            continue;
                        }
                        pending
                    }
                    Command::Back => {
                        session.back();
                        None
                    }
                    Command::Dismiss => {
                        session.dismiss_notice();
                        None
                    }
                    Command::Help => {
                        println!("{}", HELP);
                        continue;
                    }
                    Command::Quit => break,
                };

                if let Some(pending) = pending {
                    in_flight.push(pending.resolve());
                }
            }
            Some(completion) = in_flight.next(), if !in_flight.is_empty() => {
                apply(&mut session, completion);
            }
        }

        println!();
        print!("{}", render(&session.screen()));
    }

    if !in_flight.is_empty() {
        tracing::debug!(pending = in_flight.len(), "Exiting with requests still in flight");
    }

    Ok(())
}

fn apply(session: &mut Session, completion: Completion<Vec<Movie>>) {
    tracing::debug!(
        surface = %completion.token.surface,
        seq = completion.token.seq,
        "Request resolved"
    );
    session.apply(completion);
}
