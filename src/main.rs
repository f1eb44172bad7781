use std::env;

use anyhow::Context;
use nft_viewer::{FileStore, JsonFileSource, NftListSession, OrderKey, ViewerConfig};
use tokio::io::{AsyncBufReadExt, BufReader};

const USAGE: &str = "usage: nft-viewer <wallet> [fixtures-dir]";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    // Initialize logger (set RUST_LOG=debug to trace reducer transitions)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = env::args().skip(1);
    let wallet = args.next().context(USAGE)?;
    let fixtures_dir = args.next().unwrap_or_else(|| ".".to_string());

    let config = ViewerConfig::from_env();
    let store = FileStore::new_with_base_dir(config.storage_dir.clone());
    let mut session = NftListSession::open(store, &wallet, &config);

    let source = JsonFileSource::new(&fixtures_dir);
    let adopted = session
        .refresh(&source)
        .await
        .with_context(|| format!("Failed to load NFTs for {}", wallet))?;
    log::info!("Showing {:?} list for {}", adopted, wallet);
    print_list(&session);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let words: Vec<&str> = line.split_whitespace().collect();
        let outcome = match words.as_slice() {
            [] => continue,
            ["quit"] | ["exit"] => break,
            ["list"] => Ok(()),
            ["sort", key] => key
                .parse::<OrderKey>()
                .and_then(|key| session.sort_by(key)),
            ["bookmark", index] => match index.parse::<usize>() {
                Ok(index) => session.toggle_bookmark(index).map(|_| ()),
                Err(_) => {
                    eprintln!("bookmark expects an index");
                    continue;
                }
            },
            ["move", from, to] => match (from.parse::<usize>(), to.parse::<usize>()) {
                (Ok(from), Ok(to)) => session.move_item(from, to),
                _ => {
                    eprintln!("move expects two indices");
                    continue;
                }
            },
            ["clear"] => session.clear_bookmarks(),
            ["undo"] => session.undo().map(|undone| {
                if !undone {
                    println!("nothing to undo");
                }
            }),
            _ => {
                eprintln!("commands: list | sort transaction|creation | bookmark <i> | move <from> <to> | clear | undo | quit");
                continue;
            }
        };

        match outcome {
            Ok(()) => print_list(&session),
            Err(e) => eprintln!("error: {}", e),
        }
    }

    Ok(())
}

fn print_list(session: &NftListSession<FileStore>) {
    println!(
        "{} ({} items, order by {}, undo {})",
        session.wallet(),
        session.list().len(),
        session.order_by(),
        session.history_len()
    );
    for (index, item) in session.list().iter().enumerate() {
        let marker = if item.is_bookmarked() { "*" } else { " " };
        println!(
            "{:>3} {} {}  tx={}  created={}",
            index,
            marker,
            item.mint,
            item.last_transaction_time.to_rfc3339(),
            item.last_creation_time.to_rfc3339()
        );
    }
}
