//! Sentence splitting: divides lines at terminal punctuation and
//! redistributes each line's time span proportionally to text length.

use crate::subtitle::segment::Segment;

/// Characters that end a sentence.
const TERMINALS: [char; 3] = ['.', '!', '?'];

/// Split segments at sentence boundaries, keeping total time coverage.
///
/// A segment without terminal punctuation passes through unchanged. Otherwise
/// its text is partitioned into runs, each ending at a terminal mark (the
/// mark stays attached); any text after the last mark is folded into the
/// final run. The segment's span is then divided across the kept runs
/// proportionally to their character counts, chaining end-to-start so the
/// allocation has no gaps or overlaps and the last run ends exactly at the
/// segment's original end.
pub fn split_at_sentences(segments: Vec<Segment>) -> Vec<Segment> {
    let mut refined = Vec::with_capacity(segments.len());

    for segment in segments {
        if !segment.text.contains(TERMINALS) {
            refined.push(segment);
            continue;
        }

        let runs = sentence_runs(&segment.text);
        // Runs are counted untrimmed so inter-sentence spacing still weighs
        // into the allocation, but whitespace-only runs get no time at all.
        let kept: Vec<&str> = runs
            .iter()
            .map(String::as_str)
            .filter(|run| !run.trim().is_empty())
            .collect();

        let total_chars: usize = kept.iter().map(|run| run.chars().count()).sum();
        if kept.is_empty() || total_chars == 0 {
            refined.push(segment);
            continue;
        }

        let time_per_char = segment.duration() / total_chars as f64;
        let mut current = segment.start;
        for run in kept {
            let end = current + run.chars().count() as f64 * time_per_char;
            refined.push(Segment::new(run.trim(), current, end));
            current = end;
        }
    }

    refined
}

/// Partition text into runs ending at each terminal mark.
///
/// Trailing text after the last mark is appended to the last run rather than
/// emitted on its own, so a dangling sentence fragment stays attached to the
/// sentence it follows.
fn sentence_runs(text: &str) -> Vec<String> {
    let mut runs: Vec<String> = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        current.push(ch);
        if TERMINALS.contains(&ch) {
            runs.push(std::mem::take(&mut current));
        }
    }

    if !current.is_empty() {
        match runs.last_mut() {
            Some(last) => last.push_str(&current),
            None => runs.push(current),
        }
    }

    runs
}
