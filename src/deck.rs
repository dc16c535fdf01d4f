// Reading and writing decks of cards from disk.

use crate::card::{format_timestamp, Card};
use crate::queue::FlashcardPriorityQueue;
use crate::traits::{DeckStore, FlashcardError, FlashcardResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// On-disk layout of a deck.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Deserialize, Serialize)]
pub enum DeckFormat {
    /// One card per line; due date, front and back separated by tabs.
    Tsv,
    /// A yaml list of cards.
    Yaml,
}

impl DeckFormat {
    /// Yaml for `.yaml` and `.yml` files, tab separated for anything else.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => DeckFormat::Yaml,
            _ => DeckFormat::Tsv,
        }
    }
}

/// Create the store for a deck file, `format` overrides the guess made from the extension.
pub fn open_deck(path: &Path, format: Option<DeckFormat>) -> Box<dyn DeckStore> {
    match format.unwrap_or_else(|| DeckFormat::from_path(path)) {
        DeckFormat::Tsv => Box::new(TsvDeck::new(path)),
        DeckFormat::Yaml => Box::new(YamlDeck::new(path)),
    }
}

fn write_file(path: &Path, content: &[u8]) -> FlashcardResult<()> {
    use std::fs::OpenOptions;
    use std::io::Write;
    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)?;
    file.write_all(content)?;
    Ok(())
}

/// Take all cards out in due order, hand them to `write`, then put them all back, also when
/// writing failed.
fn save_with<F>(queue: &mut FlashcardPriorityQueue, write: F) -> FlashcardResult<()>
where
    F: FnOnce(&[Card]) -> FlashcardResult<()>,
{
    let cards = queue.drain_sorted();
    let res = write(&cards);
    queue.extend(cards);
    res
}

/// Parse the tab separated deck format.
pub fn parse_tsv(content: &str) -> FlashcardResult<FlashcardPriorityQueue> {
    let mut queue = FlashcardPriorityQueue::new();
    for (i, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let fields = line.split('\t').collect::<Vec<_>>();
        if fields.len() != 3 {
            return Err(FlashcardError::MalformedLine {
                line: i + 1,
                reason: format!("expected 3 tab separated fields, got {}", fields.len()),
            });
        }
        queue.insert(Card::new(fields[0], fields[1], fields[2])?);
    }
    Ok(queue)
}

/// Fails on the first card whose text would break the line and field layout.
pub fn check_tsv(cards: &[Card]) -> FlashcardResult<()> {
    for card in cards {
        for (side, text) in [("front", card.front()), ("back", card.back())] {
            if text.contains(['\t', '\n', '\r']) {
                return Err(FlashcardError::UnstorableCard {
                    front: card.front().to_owned(),
                    reason: format!("{side} contains a tab or line break"),
                });
            }
        }
    }
    Ok(())
}

/// Render cards in the tab separated deck format, in the order given.
pub fn render_tsv(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|c| format!("{}\t{}\t{}", format_timestamp(&c.due()), c.front(), c.back()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// A deck stored as tab separated lines.
#[derive(Debug, Clone)]
pub struct TsvDeck {
    path: PathBuf,
}

impl TsvDeck {
    pub fn new(path: &Path) -> Self {
        TsvDeck {
            path: path.to_owned(),
        }
    }
}

impl DeckStore for TsvDeck {
    fn load(&self) -> FlashcardResult<FlashcardPriorityQueue> {
        let content = std::fs::read_to_string(&self.path)?;
        let queue = parse_tsv(&content)?;
        info!("loaded {} cards from {}", queue.len(), self.path.display());
        Ok(queue)
    }

    fn save(&self, queue: &mut FlashcardPriorityQueue) -> FlashcardResult<()> {
        save_with(queue, |cards| {
            check_tsv(cards)?;
            write_file(&self.path, render_tsv(cards).as_bytes())?;
            info!("saved {} cards to {}", cards.len(), self.path.display());
            Ok(())
        })
    }
}

/// A deck stored as a yaml list of cards.
#[derive(Debug, Clone)]
pub struct YamlDeck {
    path: PathBuf,
}

impl YamlDeck {
    pub fn new(path: &Path) -> Self {
        YamlDeck {
            path: path.to_owned(),
        }
    }
}

impl DeckStore for YamlDeck {
    fn load(&self) -> FlashcardResult<FlashcardPriorityQueue> {
        let file = std::fs::File::open(&self.path)?;
        let cards: Vec<Card> = serde_yaml::from_reader(file)?;
        info!("loaded {} cards from {}", cards.len(), self.path.display());
        Ok(cards.into_iter().collect())
    }

    fn save(&self, queue: &mut FlashcardPriorityQueue) -> FlashcardResult<()> {
        save_with(queue, |cards| {
            let content = serde_yaml::to_string(cards)?;
            write_file(&self.path, content.as_bytes())?;
            info!("saved {} cards to {}", cards.len(), self.path.display());
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DECK: &str = "2021-11-29T12:11\tBelgrade\tSerbia\n\
                        2021-11-29T12:10\tSarajevo\tBosnia and Herzegovina\n\
                        \n\
                        2021-11-29T12:08:30\tZagreb\tCroatia\n";

    fn fronts(queue: &mut FlashcardPriorityQueue) -> Vec<String> {
        queue
            .drain_sorted()
            .iter()
            .map(|c| c.front().to_owned())
            .collect()
    }

    #[test]
    fn test_parse_tsv() {
        let mut queue = parse_tsv(DECK).unwrap();
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.peek().unwrap().back(), "Croatia");
        assert_eq!(fronts(&mut queue), ["Zagreb", "Sarajevo", "Belgrade"]);
    }

    #[test]
    fn test_parse_tsv_malformed() {
        let res = parse_tsv("2021-11-29T12:11\tBelgrade\tSerbia\n2021-11-29T12:10\tSarajevo\n");
        match res {
            Err(FlashcardError::MalformedLine { line, .. }) => assert_eq!(line, 2),
            other => panic!("unexpected {other:?}"),
        }
        let res = parse_tsv("tomorrow\tBelgrade\tSerbia\n");
        assert!(matches!(res, Err(FlashcardError::InvalidTimestamp { .. })));
    }

    #[test]
    fn test_render_tsv() {
        let mut queue = parse_tsv(DECK).unwrap();
        let cards = queue.drain_sorted();
        assert_eq!(
            render_tsv(&cards),
            "2021-11-29T12:08:30\tZagreb\tCroatia\n\
             2021-11-29T12:10:00\tSarajevo\tBosnia and Herzegovina\n\
             2021-11-29T12:11:00\tBelgrade\tSerbia"
        );
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(DeckFormat::from_path(Path::new("a/b.yaml")), DeckFormat::Yaml);
        assert_eq!(DeckFormat::from_path(Path::new("b.yml")), DeckFormat::Yaml);
        assert_eq!(DeckFormat::from_path(Path::new("b.txt")), DeckFormat::Tsv);
        assert_eq!(DeckFormat::from_path(Path::new("cards")), DeckFormat::Tsv);
    }

    #[test]
    fn test_tsv_save_keeps_queue() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.txt");
        let deck = TsvDeck::new(&path);

        let mut queue = parse_tsv(DECK).unwrap();
        deck.save(&mut queue).unwrap();
        assert_eq!(queue.len(), 3);

        let mut reloaded = deck.load().unwrap();
        assert_eq!(fronts(&mut reloaded), fronts(&mut queue));
    }

    #[test]
    fn test_yaml_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.yaml");
        let deck = open_deck(&path, None);

        let mut queue = parse_tsv(DECK).unwrap();
        deck.save(&mut queue).unwrap();
        assert_eq!(queue.len(), 3);

        let mut reloaded = deck.load().unwrap();
        assert_eq!(reloaded.peek().unwrap().due(), queue.peek().unwrap().due());
        assert_eq!(fronts(&mut reloaded), ["Zagreb", "Sarajevo", "Belgrade"]);
    }

    #[test]
    fn test_failed_save_keeps_queue() {
        let dir = tempfile::tempdir().unwrap();
        let deck = TsvDeck::new(&dir.path().join("missing").join("deck.txt"));
        let mut queue = parse_tsv(DECK).unwrap();
        assert!(matches!(deck.save(&mut queue), Err(FlashcardError::Io(_))));
        assert_eq!(queue.len(), 3);
    }

    #[test]
    fn test_tsv_rejects_separators_in_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.txt");
        let deck = TsvDeck::new(&path);

        let mut queue = parse_tsv(DECK).unwrap();
        deck.save(&mut queue).unwrap();

        for (front, back) in [("line1\nline2", "b"), ("f", "a\tb"), ("f", "crlf\r")] {
            queue.insert(Card::new("2021-11-29T12:00", front, back).unwrap());
            assert!(matches!(
                deck.save(&mut queue),
                Err(FlashcardError::UnstorableCard { .. })
            ));
            assert_eq!(queue.len(), 4);
            queue.extract_min().unwrap();

            // The deck on disk is untouched and still loads.
            let mut reloaded = deck.load().unwrap();
            assert_eq!(fronts(&mut reloaded), ["Zagreb", "Sarajevo", "Belgrade"]);
        }
    }

    #[test]
    fn test_yaml_keeps_separators_in_text() {
        let dir = tempfile::tempdir().unwrap();
        let deck = YamlDeck::new(&dir.path().join("deck.yaml"));
        let card = Card::new("2021-11-29T12:00", "line1\nline2", "a\tb").unwrap();
        deck.save_cards(&[card]).unwrap();
        let mut reloaded = deck.load().unwrap();
        let card = reloaded.extract_min().unwrap();
        assert_eq!(card.front(), "line1\nline2");
        assert_eq!(card.back(), "a\tb");
    }

    #[test]
    fn test_load_missing() {
        let dir = tempfile::tempdir().unwrap();
        let deck = TsvDeck::new(&dir.path().join("nope.txt"));
        assert!(matches!(deck.load(), Err(FlashcardError::Io(_))));
    }

    #[test]
    fn test_save_cards() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.txt");
        let deck = TsvDeck::new(&path);
        let cards = vec![
            Card::new("2021-11-29T12:11", "Belgrade", "Serbia").unwrap(),
            Card::new("2021-11-29T12:07", "Tirana", "Albania").unwrap(),
        ];
        deck.save_cards(&cards).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("2021-11-29T12:07:00\tTirana\tAlbania\n"));
    }
}
