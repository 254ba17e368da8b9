use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use runtu_comic_reader::{neighbors, JsonFileStore, ReaderSession, ViewMode};
use runtu_comic_storage::Storage;
use std::fmt::Write as _;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Action {
    Next,
    Prev,
    Single,
    Double,
    All,
}

#[derive(Args, Debug)]
pub struct ReadArgs {
    /// Comic id from the catalog
    pub comic_id: String,

    /// Chapter id from the comic's chapter table
    pub chapter_id: String,

    /// Navigation actions, applied in order
    #[arg(value_enum)]
    pub actions: Vec<Action>,

    /// JSON file holding page cursors and the view mode between runs
    #[arg(long, default_value = "./reader-state.json")]
    pub state_file: PathBuf,

    /// Intrinsic size of the first page as WIDTHxHEIGHT
    #[arg(long, value_parser = parse_size)]
    pub first_page_size: Option<(u32, u32)>,
}

fn parse_size(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(|c: char| c == 'x' || c == 'X')
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let w = w.trim().parse().map_err(|e| format!("bad width: {e}"))?;
    let h = h.trim().parse().map_err(|e| format!("bad height: {e}"))?;
    Ok((w, h))
}

/// Opens a reading session on one chapter, applies `args.actions` and
/// returns a text rendering of the resulting view.
pub async fn run(storage: &Storage, args: &ReadArgs) -> Result<String> {
    // The chapter list is loaded before the chapter so neighbours are known
    // by the time the page view is rendered.
    let details = storage
        .get_comic_details(&args.comic_id)
        .await?
        .with_context(|| format!("Comic {} not found", args.comic_id))?;
    let chapter = storage
        .get_chapter(&args.comic_id, &args.chapter_id)
        .await
        .with_context(|| {
            format!(
                "Chapter {} of {} not found",
                args.chapter_id, args.comic_id
            )
        })?;

    let store = JsonFileStore::open(&args.state_file);
    let mut session = ReaderSession::new(store, &args.comic_id, &args.chapter_id);
    session.load_chapter(&chapter);

    if let Some((width, height)) = args.first_page_size {
        session.first_page_loaded(width, height);
    }

    for action in &args.actions {
        let applied = match action {
            Action::Next => session.next_page(),
            Action::Prev => session.prev_page(),
            Action::Single => {
                session.set_view_mode(ViewMode::Single);
                true
            }
            Action::Double => {
                session.set_view_mode(ViewMode::Double);
                true
            }
            Action::All => {
                session.set_view_mode(ViewMode::All);
                true
            }
        };
        if !applied {
            tracing::info!("{:?} ignored at page {}", action, session.current_page());
        }
    }

    let mut out = String::new();
    writeln!(out, "{} {}", details.comic.title, chapter.chapter_title)?;
    writeln!(out, "mode: {}  page: {}", session.view_mode(), session.page_label())?;
    for page in session.visible_pages() {
        writeln!(out, "  [{}] {}", page.index, page.image_url)?;
    }

    let nav = neighbors(&details.chapters, &args.chapter_id);
    if let Some(prev) = nav.previous {
        writeln!(out, "previous: {} ({})", prev.chapter_title, prev.chapter_id)?;
    }
    if let Some(next) = nav.next {
        writeln!(out, "next: {} ({})", next.chapter_title, next.chapter_id)?;
    }

    match storage.get_download_info(&args.comic_id).await {
        Ok(Some(info)) if !info.text.is_empty() || !info.img_url.is_empty() => {
            writeln!(out, "download: {} {}", info.text, info.img_url)?;
        }
        Ok(_) => {}
        Err(e) => tracing::error!("Failed to load download info: {:?}", e),
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use runtu_comic_reader::{page_key, KeyValueStore};

    fn fixtures() -> Storage {
        Storage::new(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/storage/tests/fixtures/database"
        ))
    }

    fn args(chapter_id: &str, actions: Vec<Action>, state_file: PathBuf) -> ReadArgs {
        ReadArgs {
            comic_id: "c1".to_string(),
            chapter_id: chapter_id.to_string(),
            actions,
            state_file,
            first_page_size: None,
        }
    }

    fn state_file() -> PathBuf {
        std::env::temp_dir().join(format!("runtu-comic-read-{}.json", uuid::Uuid::new_v4()))
    }

    #[test]
    fn size_parsing() {
        assert_eq!(parse_size("1600x900"), Ok((1600, 900)));
        assert_eq!(parse_size("10X20"), Ok((10, 20)));
        assert!(parse_size("1600").is_err());
        assert!(parse_size("ax1").is_err());
    }

    #[tokio::test]
    async fn renders_double_spread_and_neighbours() {
        let path = state_file();
        let out = run(
            &fixtures(),
            &args("ch2", vec![Action::Double, Action::Next], path.clone()),
        )
        .await
        .unwrap();

        assert!(out.starts_with("Title A Chapter Two\n"));
        assert!(out.contains("mode: double  page: 3 / 5"));
        assert!(out.contains("  [3] ch2/3.jpg\n  [4] ch2/4.jpg\n"));
        assert!(out.contains("previous: Chapter One (ch1)"));
        assert!(out.contains("next: Duplicate One (ch1)"));
        assert!(out.contains("download: Get the <b>app</b> qr-c1.png"));

        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn cursor_and_mode_persist_between_runs() {
        let path = state_file();
        let storage = fixtures();

        run(&storage, &args("ch2", vec![Action::Next, Action::Next], path.clone()))
            .await
            .unwrap();

        let store = JsonFileStore::open(&path);
        assert_eq!(store.get(&page_key("c1", "ch2")).as_deref(), Some("3"));

        let out = run(&storage, &args("ch2", vec![], path.clone()))
            .await
            .unwrap();
        assert!(out.contains("page: 3 / 5"));

        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn landscape_first_page_downgrades_double() {
        let path = state_file();
        let storage = fixtures();

        run(&storage, &args("ch1", vec![Action::Double], path.clone()))
            .await
            .unwrap();

        let mut landscape = args("ch1", vec![], path.clone());
        landscape.first_page_size = Some((1600, 900));
        let out = run(&storage, &landscape).await.unwrap();
        assert!(out.contains("mode: single"));

        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn unknown_chapter_is_an_error() {
        let err = run(&fixtures(), &args("ch9", vec![], state_file()))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("ch9"));
    }
}
