use anyhow::Context;
use argh::FromArgs;
use log::*;
use mobot::*;

mod app;
mod game;
mod handlers;
mod wordle;
mod words;

#[cfg(test)]
mod wordle_test;

#[derive(FromArgs)]
/// A Telegram bot that helps you solve Wordle.
struct Args {
    /// file containing the words the bot guesses from, one per line
    #[argh(option, short = 'w', default = "String::from(\"assets/wordle.txt\")")]
    words: String,

    /// name the bot introduces itself with
    #[argh(option, short = 'n', default = "String::from(\"WordleHelper\")")]
    name: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    mobot::init_logger();
    let args: Args = argh::from_env();

    let universe = words::load_universe(&args.words)?;
    let app = app::App::new(args.name, universe);

    let token = std::env::var("TG_TOKEN").context("TG_TOKEN environment variable is required")?;
    let client = Client::new(token);

    info!("Starting bot...");
    let mut router = Router::new(client).with_state(app);
    router.add_route(Route::Message(Matcher::Any), handlers::handle_chat_event);
    router.start().await;
    Ok(())
}
