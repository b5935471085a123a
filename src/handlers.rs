use anyhow::anyhow;
use log::*;
use mobot::api::escape_md;
use mobot::*;

use crate::app::*;
use crate::game::{Mode, SessionError, Transition};
use crate::wordle;

const FEEDBACK_LEGEND: &str = "\u{1F7E9} (G) letter in the right spot
\u{1F7E8} (Y) letter in the word, wrong spot
\u{2B1B} (B) letter not in the word";

/// render_feedback takes a word and its feedback, and returns the squares Wordle would show
/// for it, followed by the word.
fn render_feedback(word: &str, feedback: &str) -> Option<String> {
    let letters = wordle::decode(word, feedback)?;
    let squares: String = letters.iter().map(wordle::Letter::square).collect();
    Some(format!("{} {}", squares, word))
}

/// render_update takes a SessionUpdate and returns the MarkdownV2 reply for it.
fn render_update(update: &SessionUpdate) -> String {
    match (&update.transition, update.mode) {
        (Transition::Guess(guess), Mode::Solve) => {
            format!("{} *{}*", escape_md(&format!("My guess #{}:", update.attempts)), guess)
        }
        (Transition::Guess(guess), _) => format!(
            "{} *{}* {}",
            escape_md("My hint:"),
            guess,
            escape_md(&format!(
                "({} attempts left)\n\nSend more words with their feedback, or Guess if I got it.",
                update.attempts_remaining
            ))
        ),
        (Transition::Won, _) => escape_md("Glad I could help you solve it! \u{1F389}"),
        (Transition::Lost, _) => {
            escape_md("Oh well, a loss. Try again with /solve and I'll show you what I can do.")
        }
    }
}

/// render_error takes a SessionError and returns a plain text reply for it.
fn render_error(err: &SessionError, mode: Option<Mode>) -> String {
    match err {
        SessionError::EmptyUniverse => {
            "Sorry, the word list could not be loaded. Try again later.".into()
        }
        SessionError::NotFound => "No game in progress. Use /solve or /help to start one.".into(),
        SessionError::NoCandidates => {
            "No words match that feedback. Check what you sent and start over with /solve or /help."
                .into()
        }
        SessionError::InvalidInput(reason) => match mode {
            Some(Mode::Help) => format!(
                "Sorry, {}.\nSend one word and its feedback per line, like `TRAIN BYGBB`.",
                reason
            ),
            _ => format!(
                "Sorry, {}.\nSend feedback like `GYBBG`, or one of Guess, Notfound or Lose.",
                reason
            ),
        },
    }
}

pub async fn handle_new_game(e: Event, state: State<App>, mode: Mode) -> Result<Action, anyhow::Error> {
    let from = e.update.get_message()?.clone().from.unwrap_or_default();
    let chat_id = e.update.chat_id()?;
    let app = state.get().read().await;

    let session = match app.start_session(chat_id, mode).await {
        Ok(session) => session,
        Err(err) => {
            warn!("Could not start a {:?} game for chat {}: {}", mode, chat_id, err);
            return Ok(Action::ReplyText(render_error(&err, None)));
        }
    };

    info!(
        "Starting new {:?} game with {} ({})",
        mode,
        from.first_name,
        from.username.clone().unwrap_or("unknown".into()),
    );

    let reply = match (mode, session.last_guess) {
        (Mode::Solve, Some(guess)) => format!(
            "{} *{}*\n\n{}",
            escape_md("Let's solve it! My first guess:"),
            guess,
            escape_md(&format!(
                "Send me the feedback for each of my words as five letters, like GYBBG:\n{}\n\n\
                 If I got the word, send Guess.\n\
                 If the game doesn't accept my word, send Notfound.\n\
                 If we ran out of attempts, send Lose.",
                FEEDBACK_LEGEND
            ))
        ),
        _ => escape_md(&format!(
            "Need a hint? Send me every word you played with its feedback, one per line, \
             like TRAIN BYGBB:\n{}",
            FEEDBACK_LEGEND
        )),
    };

    Ok(Action::ReplyMarkdown(reply))
}

pub async fn handle_bot_command(e: Event, state: State<App>) -> Result<Action, anyhow::Error> {
    // Get the command
    let command = e
        .update
        .get_message()?
        .text
        .clone()
        .ok_or(anyhow!("No command"))?;

    // Drop the bot name and any arguments: "/solve@WordleBot now" is "/solve".
    let command = command
        .split(|c: char| c == '@' || c.is_whitespace())
        .next()
        .unwrap_or_default();

    let reply = match command {
        "/start" => {
            let game_name = state.get().read().await.game_name.clone();
            format!(
                "Hi, I'm {}, your helper for the daily Wordle and more.
I suggest words and narrow them down using the feedback you send back.

Use /solve and I'll solve a Wordle with you, guess by guess.
Stuck on one yourself? Use /help and send me what you've played so far.
Use /stop to drop the current game.",
                game_name
            )
        }

        "/solve" => return handle_new_game(e, state, Mode::Solve).await,

        "/help" => return handle_new_game(e, state, Mode::Help).await,

        "/play" => "Sorry, I can't host a game yet. Try /solve or /help.".into(),

        "/stop" => {
            let chat_id = e.update.chat_id()?;
            match state.get().read().await.end_session(chat_id).await {
                Ok(()) => "Game over. Use /solve or /help to start another one.".into(),
                Err(err) => render_error(&err, None),
            }
        }

        _ => "I don't know that command.".into(),
    };

    Ok(Action::ReplyText(reply))
}

/// handle_chat_event is the main Telegram handler for the bot.
pub async fn handle_chat_event(e: Event, state: State<App>) -> Result<Action, anyhow::Error> {
    // Get the message
    let message = e.update.get_message()?.clone().text.unwrap_or_default();
    if message.starts_with('/') {
        return handle_bot_command(e, state).await;
    }

    let from = e.update.get_message()?.clone().from.unwrap_or_default();
    let chat_id = e.update.chat_id()?;
    let input = message.trim().to_uppercase();

    info!(
        "{} ({}) sent {:?}",
        from.first_name,
        from.username.clone().unwrap_or("unknown".into()),
        input
    );

    let app = state.get().read().await;
    let update = match app.apply_feedback(chat_id, &input).await {
        Ok(update) => update,
        Err(err) => {
            // Rejected input leaves the game as it was, so its mode still picks the usage hint.
            let mode = app.session(chat_id).await.map(|s| s.mode);
            return Ok(Action::ReplyText(render_error(&err, mode)));
        }
    };

    // Echo the feedback as squares when it scores the bot's last word.
    let echo = update
        .scored
        .as_deref()
        .filter(|_| update.mode == Mode::Solve)
        .and_then(|guess| render_feedback(guess, &input));

    let reply = match echo {
        Some(echo) => format!("{}\n\n{}", escape_md(&echo), render_update(&update)),
        None => render_update(&update),
    };

    Ok(Action::ReplyMarkdown(reply))
}
