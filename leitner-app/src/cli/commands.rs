use crate::cli::opts::*;

use anyhow::{anyhow, bail, Context, Result};
use leitner_core::{
    bucket_range, compute_progress, get_hint, practice, to_bucket_sets, update, AnswerRecord,
    BucketMap, BucketRange, CardSet, CoreError, Difficulty, Flashcard,
};
use leitner_json::{Deck, DeckStore};
use serde::Deserialize;
use std::io::Write;
use tracing::info;
use uuid::Uuid;

pub fn run_cli(args: Cli) -> Result<()> {
    let store = match &args.deck {
        Some(path) => DeckStore::at(path.clone()),
        None => DeckStore::open_default(),
    };
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(&store, args.cmd, &mut out)
}

pub fn execute<W: Write>(store: &DeckStore, cmd: Command, out: &mut W) -> Result<()> {
    match cmd {
        Command::Init(cmd) => init_cmd(store, cmd, out),
        Command::Practice { day } => {
            let deck = store.load()?;
            let due = practice(&to_bucket_sets(&deck.buckets), day);
            if due.is_empty() {
                writeln!(out, "no cards due")?;
            }
            for c in sorted(&due) {
                let bucket = deck.buckets.bucket_of(c).unwrap_or_default();
                writeln!(out, "{}\t{}\tbucket={}", c.id(), c.front, bucket)?;
            }
            Ok(())
        }
        Command::Answer(cmd) => answer_cmd(store, cmd, out),
        Command::Hint { card } => {
            let deck = store.load()?;
            let c = find_card(&deck.buckets, &card)?;
            writeln!(out, "{}", get_hint(c))?;
            Ok(())
        }
        Command::Range => {
            let deck = store.load()?;
            writeln!(out, "{}", fmt_range(&deck.buckets))?;
            Ok(())
        }
        Command::Progress => {
            let deck = store.load()?;
            let p = compute_progress(&deck.buckets, &deck.history);
            writeln!(
                out,
                "cards={}\tlearned={}\tprogress={:.1}%\ttrials={}\taccuracy={:.1}%",
                p.total_cards,
                p.learned_cards,
                p.progress_percent,
                p.trials.total,
                p.trials.accuracy() * 100.0
            )?;
            Ok(())
        }
        Command::Buckets => {
            let deck = store.load()?;
            for (bucket, cards) in to_bucket_sets(&deck.buckets).iter() {
                let fronts: Vec<&str> = sorted(cards)
                    .into_iter()
                    .map(|c| c.front.as_str())
                    .collect();
                let fronts = if fronts.is_empty() {
                    "-".to_string()
                } else {
                    fronts.join(";")
                };
                writeln!(out, "{}\t{}\t{}", bucket, cards.len(), fronts)?;
            }
            Ok(())
        }
        Command::Simulate(cmd) => simulate_cmd(store, cmd, out),
    }
}

fn init_cmd<W: Write>(store: &DeckStore, cmd: InitCmd, out: &mut W) -> Result<()> {
    if store.exists() && !cmd.force {
        bail!(
            "deck already exists at {} (use --force to replace it)",
            store.path().display()
        );
    }
    let data = std::fs::read_to_string(&cmd.cards)
        .with_context(|| format!("reading cards from {}", cmd.cards.display()))?;
    let seeds: Vec<CardSeed> = serde_json::from_str(&data).context("parsing cards")?;
    let cards: Vec<Flashcard> = seeds.into_iter().map(CardSeed::into_card).collect();

    let mut deck = Deck::new(cards.iter().cloned());
    store.save(&mut deck)?;
    info!(cards = cards.len(), "created deck");
    for c in &cards {
        writeln!(out, "{}\t{}", c.id(), c.front)?;
    }
    Ok(())
}

fn answer_cmd<W: Write>(store: &DeckStore, cmd: AnswerCmd, out: &mut W) -> Result<()> {
    let mut deck = store.load()?;
    let card = find_card(&deck.buckets, &cmd.card)?.clone();
    let difficulty = Difficulty::from(cmd.difficulty);

    let from = deck.buckets.bucket_of(&card).unwrap_or_default();
    update(&mut deck.buckets, &card, difficulty);
    let to = deck.buckets.bucket_of(&card).unwrap_or_default();
    deck.history.push(AnswerRecord::new(&card, cmd.day, difficulty));
    store.save(&mut deck)?;

    writeln!(out, "{}\t{} -> {}", card.id(), from, to)?;
    Ok(())
}

fn simulate_cmd<W: Write>(store: &DeckStore, cmd: SimulateCmd, out: &mut W) -> Result<()> {
    let mut deck = store.load()?;
    let difficulty = Difficulty::from(cmd.difficulty);
    let start = match (cmd.start, deck.last_day()) {
        (Some(start), _) => start,
        (None, Some(last)) => last
            .checked_add(1)
            .with_context(|| format!("no day left after last recorded answer on day {last}"))?,
        (None, None) => 0,
    };

    for day in start..start.saturating_add(cmd.days) {
        let due = practice(&to_bucket_sets(&deck.buckets), day);
        for card in sorted(&due) {
            update(&mut deck.buckets, card, difficulty);
            deck.history.push(AnswerRecord::new(card, day, difficulty));
        }
        let p = compute_progress(&deck.buckets, &deck.history);
        writeln!(
            out,
            "day={}\tdue={}\trange={}\tprogress={:.1}%",
            day,
            due.len(),
            fmt_range(&deck.buckets),
            p.progress_percent
        )?;
    }

    store.save(&mut deck)
}

// ===== Helpers =====
#[derive(Deserialize)]
struct CardSeed {
    front: String,
    back: String,
    #[serde(default)]
    hint: String,
    #[serde(default)]
    tags: Vec<String>,
}

impl CardSeed {
    fn into_card(self) -> Flashcard {
        Flashcard::new(self.front, self.back, self.hint, self.tags)
    }
}

fn find_card<'a>(map: &'a BucketMap, sel: &str) -> Result<&'a Flashcard> {
    let id = Uuid::parse_str(sel.trim()).map_err(|_| anyhow!("invalid card id: {sel}"))?;
    Ok(map.find(id).ok_or(CoreError::NotFound("card"))?)
}

fn sorted(cards: &CardSet) -> Vec<&Flashcard> {
    let mut v: Vec<&Flashcard> = cards.iter().collect();
    v.sort_by(|a, b| a.front.cmp(&b.front).then(a.id().cmp(&b.id())));
    v
}

fn fmt_range(map: &BucketMap) -> String {
    match bucket_range(&to_bucket_sets(map)) {
        Some(BucketRange {
            min_bucket,
            max_bucket,
        }) => format!("{min_bucket}..={max_bucket}"),
        None => "empty".to_string(),
    }
}
