//! Punctuate labeled segments and assemble the final dialogue

use tracing::warn;
use turnscribe_core::DialogueTurn;
use turnscribe_punct::PunctuationProvider;

/// Restore punctuation for each turn and sort the dialogue by start time
///
/// A punctuation failure drops only the affected turn; the rest of the
/// batch goes through. The final list is stable-sorted ascending by
/// start time.
pub async fn assemble_dialogue<P>(punctuator: &P, turns: Vec<DialogueTurn>) -> Vec<DialogueTurn>
where
    P: PunctuationProvider,
{
    let mut assembled = Vec::with_capacity(turns.len());

    for turn in turns {
        match punctuator.punctuate(&turn.text).await {
            Ok(text) => assembled.push(DialogueTurn { text, ..turn }),
            Err(e) => {
                warn!(
                    "Punctuation failed for turn at {:.2}s, dropping it: {}",
                    turn.start, e
                );
            }
        }
    }

    assembled.sort_by(|a, b| a.start.partial_cmp(&b.start).unwrap());
    assembled
}
