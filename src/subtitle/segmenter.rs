//! Line segmentation: groups recognized words into display lines.
//!
//! A line is closed when appending the next word would push the joined text
//! past the maximum length, or when the word's end time is more than the
//! maximum duration past the line's start. Lines never span two recognition
//! batches.

use crate::stt::recognizer::RecognitionBatch;
use crate::subtitle::segment::Segment;

/// Group batch words into display lines bounded by `max_line_length`
/// characters and `max_line_duration` seconds.
///
/// Boundary convention: a line whose joined text is exactly
/// `max_line_length` characters is accepted; one character more flushes.
/// The first word of a line is always accepted unconditionally, so a single
/// word longer than the limit still gets its own line rather than being
/// split character-wise.
pub fn split_into_lines(
    batches: &[RecognitionBatch],
    max_line_length: usize,
    max_line_duration: f64,
) -> Vec<Segment> {
    let mut segments = Vec::new();

    for batch in batches {
        let words = &batch.words;
        if words.is_empty() {
            continue;
        }

        // Accumulated text keeps one trailing space per word, so its length
        // plus the candidate word's length equals the joined display length.
        let mut current_text = String::new();
        let mut line_start = words[0].start;
        let mut line_end: Option<f64> = None;

        for word in words {
            let projected = current_text.chars().count() + word.text.chars().count();
            let over_length = projected > max_line_length;
            let over_duration = word.end - line_start > max_line_duration;

            if over_length || over_duration {
                if let Some(end) = line_end {
                    segments.push(Segment::new(current_text.trim(), line_start, end));
                }
                current_text = format!("{} ", word.text);
                line_start = word.start;
                line_end = Some(word.end);
            } else {
                current_text.push_str(&word.text);
                current_text.push(' ');
                line_end = Some(word.end);
            }
        }

        if let Some(end) = line_end {
            let text = current_text.trim();
            if !text.is_empty() {
                segments.push(Segment::new(text, line_start, end));
            }
        }
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stt::recognizer::{RecognitionBatch, Word};

    fn batch(words: &[(&str, f64, f64)]) -> RecognitionBatch {
        RecognitionBatch::from_words(
            words
                .iter()
                .map(|&(t, s, e)| Word::new(t, s, e))
                .collect(),
        )
    }

    #[test]
    fn empty_input_yields_no_segments() {
        assert!(split_into_lines(&[], 40, 3.0).is_empty());
        assert!(split_into_lines(&[RecognitionBatch::default()], 40, 3.0).is_empty());
    }

    #[test]
    fn short_utterance_stays_on_one_line() {
        let batches = [batch(&[("hi", 0.0, 0.5), ("there", 0.6, 1.0)])];
        let segments = split_into_lines(&batches, 40, 3.0);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].text, "hi there");
        assert_eq!(segments[0].start, 0.0);
        assert_eq!(segments[0].end, 1.0);
    }

    #[test]
    fn line_of_exactly_max_length_is_accepted() {
        // "hi there" is 8 characters: fits at max_line_length = 8
        let batches = [batch(&[
            ("hi", 0.0, 0.5),
            ("there", 0.6, 1.0),
            ("friend", 1.1, 1.6),
        ])];
        let segments = split_into_lines(&batches, 8, 3.0);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].text, "hi there");
        assert_eq!(segments[0].end, 1.0);
        assert_eq!(segments[1].text, "friend");
        assert_eq!(segments[1].start, 1.1);
        assert_eq!(segments[1].end, 1.6);
    }

    #[test]
    fn line_one_past_max_length_flushes() {
        // At max_line_length = 7, "hi there" (8 chars) no longer fits
        let batches = [batch(&[
            ("hi", 0.0, 0.5),
            ("there", 0.6, 1.0),
            ("friend", 1.1, 1.6),
        ])];
        let segments = split_into_lines(&batches, 7, 3.0);
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].text, "hi");
        assert_eq!(segments[1].text, "there");
        assert_eq!(segments[2].text, "friend");
    }

    #[test]
    fn duration_limit_flushes_line() {
        let batches = [batch(&[
            ("one", 0.0, 0.4),
            ("two", 0.5, 0.9),
            ("three", 3.5, 4.0),
        ])];
        let segments = split_into_lines(&batches, 80, 3.0);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].text, "one two");
        assert_eq!(segments[0].end, 0.9);
        assert_eq!(segments[1].text, "three");
        assert_eq!(segments[1].start, 3.5);
    }

    #[test]
    fn oversized_single_word_gets_its_own_line() {
        let batches = [batch(&[
            ("supercalifragilistic", 0.0, 1.2),
            ("ok", 1.3, 1.5),
        ])];
        let segments = split_into_lines(&batches, 10, 3.0);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].text, "supercalifragilistic");
        assert_eq!(segments[1].text, "ok");
    }

    #[test]
    fn lines_never_span_batches() {
        let batches = [batch(&[("one", 0.0, 0.4)]), batch(&[("two", 0.5, 0.9)])];
        let segments = split_into_lines(&batches, 80, 30.0);
        assert_eq!(segments.len(), 2);
    }

    #[test]
    fn every_word_appears_exactly_once() {
        let words: Vec<(String, f64, f64)> = (0..25)
            .map(|i| (format!("word{}", i), i as f64 * 0.5, i as f64 * 0.5 + 0.4))
            .collect();
        let refs: Vec<(&str, f64, f64)> =
            words.iter().map(|(t, s, e)| (t.as_str(), *s, *e)).collect();
        let batches = [batch(&refs)];

        let segments = split_into_lines(&batches, 20, 4.0);
        let rejoined = segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let original = refs.iter().map(|&(t, _, _)| t).collect::<Vec<_>>().join(" ");
        assert_eq!(rejoined, original);
    }

    #[test]
    fn output_is_sorted_by_start() {
        let batches = [batch(&[
            ("a", 0.0, 0.2),
            ("b", 0.3, 0.5),
            ("c", 4.0, 4.2),
            ("d", 8.0, 8.2),
        ])];
        let segments = split_into_lines(&batches, 5, 2.0);
        for pair in segments.windows(2) {
            assert!(pair[0].start <= pair[1].start);
        }
        for segment in &segments {
            assert!(segment.start <= segment.end);
        }
    }
}
