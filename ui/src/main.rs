use anyhow::{Context, bail};
use dictionary_service::client::debounce::{DEFAULT_DEBOUNCE, SuggestDebouncer};
use dictionary_service::client::http::DictionaryClient;
use dictionary_service::entries::types::{EntryPatch, WordEntry};
use dictionary_service::lookup::types::AddRequest;
use tokio::io::{AsyncBufReadExt, BufReader};

const DEFAULT_SERVER: &str = "http://127.0.0.1:3000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let server = take_option(&mut args, "--server")?
        .or_else(|| std::env::var("DICTIONARY_URL").ok())
        .unwrap_or_else(|| DEFAULT_SERVER.to_string());
    let client = DictionaryClient::new(&server);

    let Some(command) = args.first().cloned() else {
        print_usage();
        std::process::exit(1);
    };
    let mut rest = args[1..].to_vec();
    let rest = &mut rest;

    match command.as_str() {
        "define" => {
            let word = positional(rest, 0, "word")?;
            match client.define(&word).await? {
                Some(entry) => print_entry(&entry),
                None => println!("Word not found"),
            }
        }
        "suggest" => {
            let q = positional(rest, 0, "query")?;
            for word in client.suggest(&q).await? {
                println!("{}", word);
            }
        }
        "add" => {
            let language = take_option(rest, "--language")?;
            let added_by = take_option(rest, "--by")?;
            let req = AddRequest {
                language,
                added_by,
                ..AddRequest::new(positional(rest, 0, "word")?, positional(rest, 1, "meaning")?)
            };
            let entry = client.add(&req).await?;
            println!("Word added!");
            print_entry(&entry);
        }
        "update" => {
            let patch = EntryPatch {
                meaning: take_option(rest, "--meaning")?,
                language: take_option(rest, "--language")?,
                added_by: take_option(rest, "--by")?,
            };
            if patch.is_empty() {
                bail!("update needs at least one of --meaning, --language, --by");
            }
            let entry = client.update(&positional(rest, 0, "word")?, &patch).await?;
            print_entry(&entry);
        }
        "delete" => {
            let word = client.delete(&positional(rest, 0, "word")?).await?;
            println!("Deleted '{}'", word);
        }
        "watch" => watch(client).await?,
        other => {
            eprintln!("Unknown command '{}'", other);
            print_usage();
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Reads queries line by line and prints suggestions once typing settles.
async fn watch(client: DictionaryClient) -> anyhow::Result<()> {
    let debouncer = SuggestDebouncer::for_client(client, DEFAULT_DEBOUNCE);
    let mut rx = debouncer.subscribe();

    let printer = tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let current = rx.borrow_and_update().clone();
            if current.words.is_empty() {
                println!("{:>12} | (no suggestions)", current.query);
            } else {
                println!("{:>12} | {}", current.query, current.words.join(", "));
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        debouncer.push(&line);
    }

    // let the last query settle before exiting
    tokio::time::sleep(DEFAULT_DEBOUNCE * 2).await;
    drop(debouncer);
    printer.abort();
    Ok(())
}

fn take_option(args: &mut Vec<String>, flag: &str) -> anyhow::Result<Option<String>> {
    let Some(pos) = args.iter().position(|a| a == flag) else {
        return Ok(None);
    };
    if pos + 1 >= args.len() {
        bail!("{} requires a value", flag);
    }
    let value = args.remove(pos + 1);
    args.remove(pos);
    Ok(Some(value))
}

fn positional(args: &[String], index: usize, name: &str) -> anyhow::Result<String> {
    args.get(index)
        .cloned()
        .with_context(|| format!("missing <{}>", name))
}

fn print_entry(entry: &WordEntry) {
    println!("{} ({})", entry.word, entry.language);
    println!("  {}", entry.meaning);
    println!("  added by {}", entry.added_by);
}

fn print_usage() {
    eprintln!("Usage: dictionary-cli [--server <url>] <command>");
    eprintln!("Commands:");
    eprintln!("  define <word>");
    eprintln!("  suggest <query>");
    eprintln!("  add <word> <meaning> [--language <lang>] [--by <name>]");
    eprintln!("  update <word> [--meaning <text>] [--language <lang>] [--by <name>]");
    eprintln!("  delete <word>");
    eprintln!("  watch            read queries from stdin, print debounced suggestions");
}
