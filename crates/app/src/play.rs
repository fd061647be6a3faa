use quiz_core::model::{Media, StatisticsError};
use services::rounds::format_record_date;
use services::{
    AppServices, ErrorView, QuizLoopService, QuizResultView, QuizRound, QuizStepView, RoundStep,
};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

type Input = Lines<BufReader<Stdin>>;
type AppResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reply {
    Yes,
    No,
    Quit,
}

fn parse_reply(line: &str) -> Option<Reply> {
    match line.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(Reply::Yes),
        "n" | "no" => Some(Reply::No),
        "q" | "quit" => Some(Reply::Quit),
        _ => None,
    }
}

async fn read_reply(input: &mut Input, prompt: &str) -> AppResult<Reply> {
    loop {
        println!("{prompt} [y/n/q]");
        let Some(line) = input.next_line().await? else {
            return Ok(Reply::Quit);
        };
        if let Some(reply) = parse_reply(&line) {
            return Ok(reply);
        }
    }
}

fn describe_media(media: &Media) -> String {
    match media {
        Media::Asset(name) => format!("[poster: {name}]"),
        Media::Bytes(bytes) => format!("[image: {} bytes]", bytes.len()),
    }
}

fn show_step(step: &QuizStepView) {
    println!();
    println!("Question {}", step.counter);
    println!("{}", describe_media(&step.media));
    println!("{}", step.prompt);
}

fn show_dialog(title: &str, text: &str) {
    println!();
    println!("== {title} ==");
    println!("{text}");
}

/// Shows the load-failure dialog. Returns `true` if the player wants to retry.
async fn offer_retry(input: &mut Input) -> AppResult<bool> {
    let view = ErrorView::default();
    show_dialog(&view.title, &view.text);
    Ok(read_reply(input, &format!("{}?", view.button_text)).await? == Reply::Yes)
}

async fn start_round(quiz: &QuizLoopService, input: &mut Input) -> AppResult<Option<QuizRound>> {
    loop {
        match quiz.start_round().await {
            Ok(round) => return Ok(Some(round)),
            Err(err) if err.is_load_failure() => {
                tracing::warn!(error = %err, "could not load first question");
                if !offer_retry(input).await? {
                    return Ok(None);
                }
            }
            Err(err) => return Err(err.into()),
        }
    }
}

/// Plays one round. Returns the summary, or `None` if the player quit.
async fn play_round(
    quiz: &QuizLoopService,
    input: &mut Input,
) -> AppResult<Option<QuizResultView>> {
    let Some(mut round) = start_round(quiz, input).await? else {
        return Ok(None);
    };
    let mut step = round.step_view();

    loop {
        let Some(current) = step.take() else {
            match quiz.reload_question(&mut round).await {
                Ok(view) => step = Some(view),
                Err(err) if err.is_load_failure() => {
                    tracing::warn!(error = %err, "could not load question");
                    if !offer_retry(input).await? {
                        return Ok(None);
                    }
                }
                Err(err) => return Err(err.into()),
            }
            continue;
        };

        show_step(&current);
        let answer = match read_reply(input, "Your answer?").await? {
            Reply::Yes => true,
            Reply::No => false,
            Reply::Quit => return Ok(None),
        };

        match quiz.answer_current(&mut round, answer).await {
            Ok(result) => {
                println!("{}", if result.is_correct { "Correct!" } else { "Wrong!" });
                match result.next {
                    RoundStep::Question(next) => step = Some(next),
                    RoundStep::Finished { view, .. } => return Ok(Some(view)),
                }
            }
            // The answer was scored; only the next question failed to load.
            Err(err) if err.is_load_failure() => {
                tracing::warn!(error = %err, "could not load next question");
                if !offer_retry(input).await? {
                    return Ok(None);
                }
            }
            Err(err) => return Err(err.into()),
        }
    }
}

pub async fn run_rounds(app: &AppServices) -> AppResult<()> {
    let quiz = app.quiz_loop();
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let Some(view) = play_round(&quiz, &mut input).await? else {
            return Ok(());
        };
        show_dialog(&view.title, &view.text);
        if read_reply(&mut input, &format!("{}?", view.button_text)).await? != Reply::Yes {
            return Ok(());
        }
    }
}

pub async fn print_statistics(app: &AppServices) -> AppResult<()> {
    let stats = app.statistics().snapshot().await?;
    println!("Games played: {}", stats.games_played());

    let best = stats.best_game();
    if best.total() > 0 {
        println!(
            "Best game: {}/{} ({})",
            best.correct(),
            best.total(),
            format_record_date(best.date())
        );
    }

    match stats.average_accuracy_percent() {
        Ok(avg) => println!("Average accuracy: {avg:.2}%"),
        Err(StatisticsError::NoGamesPlayed) => println!("No games played yet."),
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replies_are_case_insensitive() {
        assert_eq!(parse_reply(" Y "), Some(Reply::Yes));
        assert_eq!(parse_reply("no"), Some(Reply::No));
        assert_eq!(parse_reply("QUIT"), Some(Reply::Quit));
        assert_eq!(parse_reply("maybe"), None);
    }

    #[test]
    fn media_descriptions() {
        assert_eq!(describe_media(&Media::Asset("Old".into())), "[poster: Old]");
        assert_eq!(describe_media(&Media::Bytes(vec![0; 3])), "[image: 3 bytes]");
    }
}
