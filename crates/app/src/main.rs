use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use cover_carousel_core::{
    AppConfig, CarouselConfig, CarouselError, CarouselState, CoverMetrics, CoverStore,
    FixedCoverMetrics, LayoutTables, PushOutcome, Stream,
};
use tracing_subscriber::EnvFilter;

mod covers;

use covers::ImageCoverMetrics;

const DEMO_PLAYLIST: [(&str, &str, &str); 5] = [
    ("Smell like teen spirit", "Nirvana", "0.jpg"),
    ("Masquerade", "Ble ble", "1.jpg"),
    ("Some", "Bjork", "4.jpg"),
    ("Abadi bi abade ba", "The starting line", "2.jpg"),
    ("13 steps", "A perfect circle", "3.jpg"),
];

const UNKNOWN_ARTIST: &str = "Unknown artist";

fn main() -> cover_carousel_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Tables { layout } => {
            layout.apply(&mut config.carousel);
            run_tables(&config.carousel)
        }
        Commands::Demo {
            layout,
            pushes,
            covers_dir,
        } => {
            layout.apply(&mut config.carousel);
            run_demo(&config.carousel, pushes, covers_dir.as_deref())
        }
        Commands::Push {
            layout,
            titles,
            artists,
            covers,
        } => {
            layout.apply(&mut config.carousel);
            run_push(&config.carousel, &titles, &artists, &covers)
        }
    }
}

fn load_config(path: Option<&Path>) -> cover_carousel_core::Result<AppConfig> {
    match path {
        Some(path) => {
            tracing::info!(?path, "loading configuration");
            AppConfig::load(path)
        }
        None => Ok(AppConfig::default()),
    }
}

fn run_tables(config: &CarouselConfig) -> cover_carousel_core::Result<()> {
    tracing::info!(slots = config.slots, height = config.viewport_height, "building tables");

    let tables = LayoutTables::build(&config.layout())?;
    println!("{}", serde_json::to_string_pretty(&tables)?);
    Ok(())
}

fn run_demo(
    config: &CarouselConfig,
    pushes: usize,
    covers_dir: Option<&Path>,
) -> cover_carousel_core::Result<()> {
    tracing::info!(pushes, slots = config.slots, "running demo playlist");

    let streams = demo_streams(pushes, covers_dir);
    let (_, outcomes) = match covers_dir {
        Some(_) => push_all(config, streams, ImageCoverMetrics::new(config.placeholder_size))?,
        None => push_all(config, streams, FixedCoverMetrics::new(config.placeholder_size))?,
    };

    for outcome in &outcomes {
        println!("{}", serde_json::to_string(outcome)?);
    }
    Ok(())
}

fn run_push(
    config: &CarouselConfig,
    titles: &[String],
    artists: &[String],
    covers: &[PathBuf],
) -> cover_carousel_core::Result<()> {
    tracing::info!(count = covers.len(), "pushing covers");

    let streams = cover_streams(titles, artists, covers)?;
    let metrics = ImageCoverMetrics::new(config.placeholder_size);
    let (carousel, _) = push_all(config, streams, metrics)?;

    println!("{}", serde_json::to_string_pretty(carousel.items())?);
    Ok(())
}

/// The built-in playlist, cycled until `pushes` streams have been produced.
fn demo_streams(pushes: usize, covers_dir: Option<&Path>) -> Vec<Stream> {
    DEMO_PLAYLIST
        .iter()
        .cycle()
        .take(pushes)
        .map(|(title, artist, cover)| {
            let cover = covers_dir.map_or_else(|| PathBuf::from(*cover), |dir| dir.join(*cover));
            Stream::new(*title, *artist, cover)
        })
        .collect()
}

/// Pairs the n-th title and artist with the n-th cover. Covers without a
/// title use their file stem; covers without an artist get a fixed label.
fn cover_streams(
    titles: &[String],
    artists: &[String],
    covers: &[PathBuf],
) -> cover_carousel_core::Result<Vec<Stream>> {
    if titles.len() > covers.len() || artists.len() > covers.len() {
        return Err(CarouselError::msg(format!(
            "{} titles and {} artists given for {} covers",
            titles.len(),
            artists.len(),
            covers.len()
        )));
    }

    let streams = covers
        .iter()
        .enumerate()
        .map(|(n, cover)| {
            let title = titles.get(n).cloned().unwrap_or_else(|| {
                cover
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
                    .unwrap_or_default()
            });
            let artist = artists.get(n).map_or(UNKNOWN_ARTIST, String::as_str);
            Stream::new(title, artist, cover.clone())
        })
        .collect();
    Ok(streams)
}

/// Pushes every stream in turn into a fresh carousel, returning the final
/// carousel and the outcome of each push.
fn push_all<M: CoverMetrics>(
    config: &CarouselConfig,
    streams: impl IntoIterator<Item = Stream>,
    metrics: M,
) -> cover_carousel_core::Result<(CarouselState, Vec<PushOutcome>)> {
    let mut store = CoverStore::new(metrics);
    let mut carousel = config.build()?;
    let mut outcomes = Vec::new();

    for (n, stream) in streams.into_iter().enumerate() {
        let size = store.natural_size(&stream.cover)?;
        tracing::debug!(n, title = %stream.title, "push");
        outcomes.push(carousel.push(stream, size)?);
    }
    Ok((carousel, outcomes))
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Scaled cover carousel layout engine", long_about = None)]
struct Cli {
    /// JSON configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the scale, size and position tables.
    Tables {
        #[command(flatten)]
        layout: LayoutArgs,
    },
    /// Cycle the built-in playlist through the carousel.
    Demo {
        #[command(flatten)]
        layout: LayoutArgs,
        /// Number of streams to push.
        #[arg(short, long, default_value_t = 6)]
        pushes: usize,
        /// Directory holding the playlist covers (0.jpg .. 4.jpg).
        #[arg(long)]
        covers_dir: Option<PathBuf>,
    },
    /// Push the given covers in order and print the visible items.
    Push {
        #[command(flatten)]
        layout: LayoutArgs,
        /// Title of the cover at the same position; defaults to the file stem.
        #[arg(short, long = "title")]
        titles: Vec<String>,
        /// Artist of the cover at the same position.
        #[arg(short, long = "artist")]
        artists: Vec<String>,
        /// Cover image to push; repeat for each stream.
        #[arg(long = "cover", required = true)]
        covers: Vec<PathBuf>,
    },
}

/// Layout overrides applied on top of the configuration file.
#[derive(clap::Args, Debug)]
struct LayoutArgs {
    /// Number of slots.
    #[arg(short, long)]
    slots: Option<usize>,
    /// Viewport height in pixels.
    #[arg(long)]
    height: Option<f32>,
    /// Viewport width in pixels.
    #[arg(long)]
    width: Option<f32>,
}

impl LayoutArgs {
    fn apply(&self, config: &mut CarouselConfig) {
        if let Some(slots) = self.slots {
            config.slots = slots;
        }
        if let Some(height) = self.height {
            config.viewport_height = height;
        }
        if let Some(width) = self.width {
            config.viewport_width = width;
        }
    }
}

#[cfg(test)]
mod tests {
    use cover_carousel_core::ItemSize;

    use super::*;

    #[test]
    fn cli_overrides_take_precedence() {
        let cli = Cli::parse_from(["cover-carousel", "tables", "--slots", "7", "--height", "1080"]);
        let Commands::Tables { layout } = cli.command else {
            panic!("expected tables command");
        };

        let mut config = CarouselConfig::default();
        layout.apply(&mut config);
        assert_eq!(config.slots, 7);
        assert_eq!(config.viewport_height, 1080.0);
        assert_eq!(config.viewport_width, 1280.0);
    }

    #[test]
    fn push_requires_covers() {
        assert!(Cli::try_parse_from(["cover-carousel", "push"]).is_err());
        assert!(Cli::try_parse_from(["cover-carousel", "push", "--title", "Some"]).is_err());
    }

    #[test]
    fn push_pairs_titles_and_artists_with_covers() {
        let cli = Cli::parse_from([
            "cover-carousel",
            "push",
            "--title",
            "Some",
            "--artist",
            "Bjork",
            "--cover",
            "covers/4.jpg",
            "--cover",
            "covers/masquerade.png",
        ]);
        let Commands::Push {
            titles,
            artists,
            covers,
            ..
        } = cli.command
        else {
            panic!("expected push command");
        };

        let streams = cover_streams(&titles, &artists, &covers).unwrap();
        assert_eq!(streams[0], Stream::new("Some", "Bjork", "covers/4.jpg"));
        assert_eq!(
            streams[1],
            Stream::new("masquerade", UNKNOWN_ARTIST, "covers/masquerade.png")
        );
    }

    #[test]
    fn extra_titles_are_rejected() {
        let titles = vec!["One".to_string(), "Two".to_string()];
        let covers = vec![PathBuf::from("1.jpg")];

        let err = cover_streams(&titles, &[], &covers).unwrap_err();
        assert!(format!("{err}").contains("2 titles"));
    }

    #[test]
    fn demo_evicts_once_the_carousel_is_full() {
        let config = CarouselConfig::default();
        let streams = demo_streams(6, None);
        let (carousel, outcomes) =
            push_all(&config, streams, FixedCoverMetrics::new(config.placeholder_size)).unwrap();

        assert_eq!(outcomes.len(), 6);
        assert!(outcomes[..5].iter().all(|outcome| outcome.evicted.is_empty()));
        assert_eq!(outcomes[5].evicted.len(), 1);
        assert_eq!(outcomes[5].evicted[0].stream.title, "Smell like teen spirit");
        assert_eq!(outcomes[5].moved.len(), 4);
        assert_eq!(carousel.len(), 5);
        assert_eq!(carousel.items()[0].stream.title, "Smell like teen spirit");
        assert_eq!(carousel.items()[0].id, outcomes[5].inserted.id);
    }

    #[test]
    fn demo_joins_covers_dir() {
        let streams = demo_streams(2, Some(Path::new("art")));
        assert_eq!(streams[1].cover, PathBuf::from("art/1.jpg"));
    }

    #[test]
    fn unreadable_covers_are_pushed_at_placeholder_size() {
        let config = CarouselConfig {
            placeholder_size: ItemSize::new(128.0, 64.0),
            ..Default::default()
        };
        let covers = vec![PathBuf::from("/nonexistent/a.jpg"), PathBuf::from("/nonexistent/b.jpg")];
        let streams = cover_streams(&[], &[], &covers).unwrap();

        let (carousel, outcomes) =
            push_all(&config, streams, ImageCoverMetrics::new(config.placeholder_size)).unwrap();

        assert_eq!(outcomes[1].moved.len(), 1);
        assert!(carousel
            .items()
            .iter()
            .all(|item| item.natural_size == ItemSize::new(128.0, 64.0)));
        assert_eq!(carousel.items()[0].stream.title, "b");
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
