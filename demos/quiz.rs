// Command line front end for reviewing a deck of flashcards.
//
//   cargo run --example quiz -- deck.txt

use clap::Parser;
use flashcards::config::Config;
use flashcards::deck::open_deck;
use flashcards::training::Training;
use flashcards::Outcome;

use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(about = "Practice the flashcards that are due.")]
struct Args {
    /// Deck file, tab separated lines or a .yaml list.
    deck: PathBuf,

    /// Optional yaml configuration file.
    #[arg(short, long, default_value = "flashcards.yaml")]
    config: PathBuf,
}

#[derive(Debug, PartialEq)]
enum Command {
    Quiz,
    Save,
    Exit,
}

struct Prompt<R: BufRead> {
    input: R,
}

impl<R: BufRead> Prompt<R> {
    /// Read one line without the line ending, None on end of input.
    fn line(&mut self) -> io::Result<Option<String>> {
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(buf.trim_end_matches(['\r', '\n']).to_owned()))
    }

    fn command(&mut self) -> io::Result<Option<Command>> {
        println!("Enter a command:");
        loop {
            let Some(line) = self.line()? else {
                return Ok(None);
            };
            match line.trim() {
                "quiz" => return Ok(Some(Command::Quiz)),
                "save" => return Ok(Some(Command::Save)),
                "exit" => return Ok(Some(Command::Exit)),
                _ => eprintln!(
                    "That command word does not exist. Please try either 'quiz', 'save' or 'exit'"
                ),
            }
        }
    }

    fn outcome(&mut self) -> io::Result<Option<Outcome>> {
        loop {
            println!("Press 1 if you got the card correct and 2 if you got the card incorrect.");
            let Some(line) = self.line()? else {
                return Ok(None);
            };
            match line.trim() {
                "1" => return Ok(Some(Outcome::Correct)),
                "2" => return Ok(Some(Outcome::Incorrect)),
                _ => {}
            }
        }
    }
}

fn quiz<S, R>(training: &mut Training<S>, prompt: &mut Prompt<R>) -> Result<(), Box<dyn Error>>
where
    S: flashcards::traits::Scheduler,
    R: BufRead,
{
    let now = chrono::Local::now().naive_local();
    tracing::info!("{} of {} cards due", training.due_count(now), training.len());
    while let Some(card) = training.next_due(now) {
        println!("\nCard:");
        println!("{}", card.front());
        loop {
            print!("[Press return for back of the card]");
            io::stdout().flush()?;
            match prompt.line()? {
                Some(line) if line.is_empty() => break,
                Some(_) => continue,
                None => {
                    training.queue_mut().insert(card);
                    return Ok(());
                }
            }
        }
        println!("{}", card.back());
        match prompt.outcome()? {
            Some(outcome) => {
                training.answer(card, outcome, now)?;
            }
            None => {
                training.queue_mut().insert(card);
                return Ok(());
            }
        }
    }
    Ok(())
}

fn save<S, R>(
    training: &mut Training<S>,
    prompt: &mut Prompt<R>,
    format: Option<flashcards::deck::DeckFormat>,
) -> io::Result<()>
where
    S: flashcards::traits::Scheduler,
    R: BufRead,
{
    println!("Type a filename where you'd like to save the flashcards:");
    while let Some(name) = prompt.line()? {
        let deck = open_deck(Path::new(name.trim()), format);
        match deck.save(training.queue_mut()) {
            Ok(()) => return Ok(()),
            Err(e) => {
                println!("{e}");
                println!("Please input a different file name:");
            }
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = Config::load(&args.config)?;
    let queue = open_deck(&args.deck, config.deck_format).load()?;
    let mut training = Training::new(queue, config.scheduler()?);

    println!("Time to practice flashcards! The computer will display your flashcards,");
    println!("you generate the response in your head, and then see if you got it right.");
    println!("The computer will show you cards that you miss more often than those you know!");

    let stdin = io::stdin();
    let mut prompt = Prompt {
        input: stdin.lock(),
    };
    while let Some(command) = prompt.command()? {
        match command {
            Command::Quiz => quiz(&mut training, &mut prompt)?,
            Command::Save => save(&mut training, &mut prompt, config.deck_format)?,
            Command::Exit => break,
        }
    }
    println!("Goodbye!");
    Ok(())
}
