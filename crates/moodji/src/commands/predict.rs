use eyre::{Result, bail};
use moodji_client::RequestController;
use moodji_client::CurrentResult;

pub async fn run(mut controller: RequestController, word: &str, copy: bool) -> Result<()> {
    if word.trim().is_empty() {
        bail!("nothing to look up: the word is blank");
    }

    controller.submit(word).await;

    if let Some(message) = controller.error() {
        bail!("{message}");
    }

    let snapshot = controller.snapshot();
    let Some(current) = snapshot.result else {
        bail!("no prediction received");
    };

    println!("{}", verdict_line(&current, snapshot.celebrating));

    if copy && controller.copy_result() {
        println!("Copied!");
    }

    Ok(())
}

/// `☀️ sunshine is Positive (92%)`, with a party popper for celebrations.
pub fn verdict_line(current: &CurrentResult, celebrating: bool) -> String {
    let prediction = &current.prediction;
    let mut line = format!(
        "{} {} is {} ({}%)",
        prediction.emoji,
        current.word,
        prediction.sentiment.title(),
        prediction.percent()
    );

    if celebrating {
        line.push_str(" 🎉");
    }

    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use moodji_client::{PredictionResult, Sentiment};

    fn current(sentiment: Sentiment, confidence: f64) -> CurrentResult {
        CurrentResult {
            word: "sunshine".to_string(),
            prediction: PredictionResult {
                emoji: "☀️".to_string(),
                sentiment,
                confidence,
            },
        }
    }

    #[test]
    fn plain_verdict() {
        assert_eq!(
            verdict_line(&current(Sentiment::Neutral, 0.5), false),
            "☀️ sunshine is Neutral (50%)"
        );
    }

    #[test]
    fn celebrated_verdict() {
        assert_eq!(
            verdict_line(&current(Sentiment::Positive, 0.92), true),
            "☀️ sunshine is Positive (92%) 🎉"
        );
    }
}
