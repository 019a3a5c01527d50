use anyhow::{Context, Result};
use refbook_config::{BookConfig, DEFAULT_CONFIG_FILE};
use refbook_engine::models::{Document, INDEX_KEY, SourceFile};
use refbook_engine::{Book, BookSettings, io};
use relative_path::RelativePathBuf;
use std::path::{Path, PathBuf};
use std::{env, process};

/// Chapter sources in reading order, the index first.
fn reading_order(chapters: &[String]) -> Vec<SourceFile> {
    let mut files: Vec<SourceFile> = chapters
        .iter()
        .map(|c| SourceFile::new(RelativePathBuf::from(c.as_str())))
        .collect();
    if !files.first().is_some_and(SourceFile::is_index) {
        let extension = files
            .first()
            .and_then(|f| f.relative_path().extension())
            .unwrap_or("json");
        let index = SourceFile::from_relative_str(&format!("{INDEX_KEY}.{extension}"));
        log::info!("prepending {}", index.relative_path());
        files.insert(0, index);
    }
    files
}

fn load_all(files: Vec<SourceFile>, srcdir: &Path) -> Result<Vec<(SourceFile, Document)>> {
    files
        .into_iter()
        .map(|source| {
            let doc = io::load_document(&source, srcdir)
                .with_context(|| format!("loading {}", source.relative_path()))?;
            Ok((source, doc))
        })
        .collect()
}

fn build_book(config: &BookConfig) -> Result<Book> {
    let chapters = load_all(reading_order(&config.chapters), &config.srcdir)?;
    let appendices = load_all(
        config
            .appendices
            .iter()
            .map(|a| SourceFile::from_relative_str(a))
            .collect(),
        &config.srcdir,
    )?;

    let mut book = Book::new(BookSettings {
        chapname: config.chapname.clone(),
        appendix_name: config.appendix_name.clone(),
        sectnums: config.sectnums,
        max_depth: config.max_depth,
    });
    book.read(chapters, appendices);
    Ok(book)
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = env::args().collect();
    let config_path = match args.len() {
        1 => PathBuf::from(DEFAULT_CONFIG_FILE),
        2 => PathBuf::from(&args[1]),
        _ => {
            eprintln!("Usage: {} [config.toml]", args[0]);
            process::exit(1);
        }
    };

    let config = match BookConfig::load_from_path(&config_path) {
        Ok(Some(config)) => config,
        Ok(None) => {
            eprintln!("Error: No config file found at {}", config_path.display());
            eprintln!("Usage: {} [config.toml]", args[0]);
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };
    if let Some(title) = &config.title {
        log::info!("building {title}");
    }

    let book = build_book(&config)?;

    print!("{}", toml::to_string_pretty(book.refs())?);
    let languages = book.extra_languages();
    if !languages.is_empty() {
        println!();
        println!(
            "# extra highlighter languages: {}",
            languages.into_iter().collect::<Vec<_>>().join(", ")
        );
    }
    Ok(())
}
