use regex::Regex;

/// Splits extracted document text into bounded-size, sentence-respecting
/// chunks. One streaming pass, no backtracking, no re-balancing: units
/// are split off on terminal punctuation, then greedily packed into a
/// running chunk joined by `". "`; the chunk closes when the next unit
/// would push it past `max_chunk_size`. A single unit longer than the
/// budget is hard-split at the boundary and its remainder seeds the next
/// chunk. Sizes are counted in characters, and hard splits land on char
/// boundaries.
pub struct TextChunker {
    max_chunk_size: usize,
    sentence_splitter: Regex,
}

impl TextChunker {
    pub fn new(max_chunk_size: usize) -> Self {
        Self {
            max_chunk_size,
            sentence_splitter: Regex::new(r"[.!?]+").expect("valid sentence splitter pattern"),
        }
    }

    pub fn max_chunk_size(&self) -> usize {
        self.max_chunk_size
    }

    pub fn split(&self, text: &str) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut current = String::new();

        for unit in self.sentence_splitter.split(text) {
            let unit = unit.trim();
            if unit.is_empty() {
                continue;
            }

            let unit_len = unit.chars().count();
            let current_len = current.chars().count();

            if current_len + unit_len > self.max_chunk_size {
                if !current.is_empty() {
                    chunks.push(std::mem::take(&mut current));
                    current.push_str(unit);
                } else {
                    let (head, tail) = split_at_chars(unit, self.max_chunk_size);
                    chunks.push(head.to_string());
                    current.push_str(tail);
                }
            } else if current.is_empty() {
                current.push_str(unit);
            } else {
                current.push_str(". ");
                current.push_str(unit);
            }
        }

        let trailing = current.trim();
        if !trailing.is_empty() {
            chunks.push(trailing.to_string());
        }

        chunks
    }
}

fn split_at_chars(s: &str, n: usize) -> (&str, &str) {
    match s.char_indices().nth(n) {
        Some((idx, _)) => s.split_at(idx),
        None => (s, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_yields_no_chunks() {
        let chunker = TextChunker::new(1000);
        assert!(chunker.split("").is_empty());
        assert!(chunker.split("   \n  ").is_empty());
        assert!(chunker.split("...!!??.").is_empty());
    }

    #[test]
    fn test_short_text_is_one_chunk() {
        let chunker = TextChunker::new(1000);

        let chunks = chunker.split("First sentence. Second sentence! Third?");

        assert_eq!(
            chunks,
            vec!["First sentence. Second sentence. Third".to_string()]
        );
    }

    #[test]
    fn test_chunks_are_never_empty_and_order_is_preserved() {
        let chunker = TextChunker::new(30);

        let chunks = chunker.split("Alpha comes first. Beta follows after. Gamma ends the text.");

        assert!(!chunks.is_empty());
        assert!(chunks.iter().all(|c| !c.trim().is_empty()));
        let joined = chunks.join(" ");
        let alpha = joined.find("Alpha").unwrap();
        let beta = joined.find("Beta").unwrap();
        let gamma = joined.find("Gamma").unwrap();
        assert!(alpha < beta && beta < gamma);
    }

    #[test]
    fn test_2500_chars_at_size_1000_yields_three_chunks() {
        let chunker = TextChunker::new(1000);
        let sentence = format!("{}.", "a".repeat(99));
        let text = sentence.repeat(25); // ~2500 characters of input

        let chunks = chunker.split(&text);

        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| c.chars().count() <= 1000));
        assert!(chunks.iter().all(|c| !c.is_empty()));
    }

    #[test]
    fn test_oversized_sentence_is_hard_split() {
        let chunker = TextChunker::new(10);

        let chunks = chunker.split("abcdefghijklmnop.");

        assert_eq!(chunks, vec!["abcdefghij".to_string(), "klmnop".to_string()]);
    }

    #[test]
    fn test_hard_split_respects_char_boundaries() {
        let chunker = TextChunker::new(3);

        // Multi-byte characters must not be cut mid-code-point.
        let chunks = chunker.split("ééééé.");

        assert_eq!(chunks, vec!["ééé".to_string(), "éé".to_string()]);
    }

    #[test]
    fn test_all_sentence_content_is_covered() {
        let chunker = TextChunker::new(25);
        let text = "One two three. Four five six. Seven eight nine.";

        let chunks = chunker.split(text);

        let joined = chunks.join(". ");
        for word in [
            "One", "two", "three", "Four", "five", "six", "Seven", "eight", "nine",
        ] {
            assert!(joined.contains(word), "missing {} in {:?}", word, chunks);
        }
    }

    #[test]
    fn test_no_early_chunk_is_far_under_budget() {
        let chunker = TextChunker::new(40);
        let text = "Aaaa bbbb cccc dddd. Eeee ffff gggg hhhh. Iiii jjjj kkkk llll. Mmmm nnnn.";

        let chunks = chunker.split(text);

        // Every chunk but the last closed because the next unit would
        // not fit, so adding any following unit would overflow.
        for window in chunks.windows(2) {
            let len = window[0].chars().count();
            let next_unit = window[1].split(". ").next().unwrap().chars().count();
            assert!(len + next_unit > 40);
        }
    }
}
