//! Letter scoring module
//!
//! Compares a guess against the answer one position at a time, left to right.
//! Exact matches claim their position; a misplaced letter is only reported as
//! `in-word` while the answer still has an occurrence of it that earlier exact
//! matches have not claimed.

use serde::{Deserialize, Serialize};

/// Status of a single guessed letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LetterStatus {
    /// Letter is at the same position in the answer
    InPlace,
    /// Letter occurs elsewhere in the answer
    InWord,
    /// Letter does not occur, or every occurrence is already claimed
    Nowhere,
}

/// One scored letter of a guess
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterResult {
    pub letter: char,
    pub status: LetterStatus,
}

/// Score `guess` against `answer`.
///
/// Both words are compared by `char`. Positions past the end of the answer
/// can never be `in-place`; callers only score dictionary words, which all
/// share the answer's length.
pub fn score(guess: &str, answer: &str) -> Vec<LetterResult> {
    let answer: Vec<char> = answer.chars().collect();
    let mut claimed: Vec<usize> = Vec::with_capacity(answer.len());

    guess
        .chars()
        .enumerate()
        .map(|(index, letter)| {
            let status = letter_status(letter, index, &answer, &claimed);
            if status == LetterStatus::InPlace {
                claimed.push(index);
            }
            LetterResult { letter, status }
        })
        .collect()
}

/// Status of `letter` guessed at `index`, given the positions claimed so far
fn letter_status(letter: char, index: usize, answer: &[char], claimed: &[usize]) -> LetterStatus {
    if answer.get(index) == Some(&letter) {
        return LetterStatus::InPlace;
    }

    let occurrences = answer.iter().filter(|&&c| c == letter).count();
    if occurrences == 0 {
        return LetterStatus::Nowhere;
    }

    let already_placed = claimed.iter().filter(|&&i| answer[i] == letter).count();
    if already_placed == occurrences {
        LetterStatus::Nowhere
    } else {
        LetterStatus::InWord
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::LetterStatus::{InPlace, InWord, Nowhere};

    fn statuses(guess: &str, answer: &str) -> Vec<LetterStatus> {
        score(guess, answer).into_iter().map(|r| r.status).collect()
    }

    #[test]
    fn test_exact_match_is_all_in_place() {
        for word in ["crane", "geese", "llama", "abbey"] {
            assert_eq!(statuses(word, word), vec![InPlace; 5], "word: {word}");
        }
    }

    #[test]
    fn test_no_common_letters() {
        assert_eq!(statuses("quick", "dream"), vec![Nowhere; 5]);
    }

    #[test]
    fn test_mixed_statuses() {
        // c-r-a-n-e vs c-h-a-r-m
        assert_eq!(
            statuses("crane", "charm"),
            vec![InPlace, InWord, InPlace, Nowhere, Nowhere]
        );
    }

    #[test]
    fn test_letters_are_preserved_in_order() {
        let letters: String = score("slate", "crane").iter().map(|r| r.letter).collect();
        assert_eq!(letters, "slate");
    }

    #[test]
    fn test_repeated_guess_letter_single_in_answer() {
        // Exact match first claims the only 'e'; later 'e's are nowhere
        assert_eq!(
            statuses("eerie", "earth"),
            vec![InPlace, Nowhere, InPlace, Nowhere, Nowhere]
        );
        // Misplaced letters never claim a position
        assert_eq!(
            statuses("llama", "world"),
            vec![InWord, InWord, Nowhere, Nowhere, Nowhere]
        );
    }

    #[test]
    fn test_claims_only_count_earlier_positions() {
        // The exact 'e' at index 4 comes after the 'e's at 1 and 2, so they
        // are still reported as in-word during the pass.
        assert_eq!(
            statuses("geese", "those"),
            vec![Nowhere, InWord, InWord, InPlace, InPlace]
        );
    }

    #[test]
    fn test_all_occurrences_claimed_before_later_letter() {
        // "creep" has two 'e's, both claimed at 2 and 3 before index 4
        assert_eq!(
            statuses("sheee", "creep"),
            vec![Nowhere, Nowhere, InPlace, InPlace, Nowhere]
        );
    }

    #[test]
    fn test_status_serializes_kebab_case() {
        let json = serde_json::to_string(&[InPlace, InWord, Nowhere]).unwrap();
        assert_eq!(json, r#"["in-place","in-word","nowhere"]"#);
    }

    #[test]
    fn test_calls_do_not_share_state() {
        let first = statuses("eerie", "earth");
        assert_eq!(statuses("aaaaa", "aaaaa"), vec![InPlace; 5]);
        assert_eq!(statuses("eerie", "earth"), first);
    }
}
