use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use fifa19_stats::compare;
use fifa19_stats::dataset;
use fifa19_stats::xlsx;
use fifa19_stats::{fetch_photo, Dataset, Photo, Player, PlayerQuery, TraitCategoryMap};

#[derive(Parser)]
#[command(name = "fifa19-stats")]
#[command(about = "Search, look up and compare FIFA 19 players", long_about = None)]
struct Cli {
    /// Player dataset (CSV)
    #[arg(long, env = "FIFA19_DATA", default_value = "sources/fifa19.csv", global = true)]
    data: PathBuf,

    /// Trait category map (JSON)
    #[arg(long, env = "FIFA19_TRAITS", default_value = "sources/traits.json", global = true)]
    traits: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find players whose name or club contains a term (case-insensitive)
    Search {
        /// Name or club to look for
        #[arg(default_value = "")]
        term: String,
    },

    /// List players playing any of the given positions
    Position {
        /// Positions, e.g. ST RW or ST,RW
        #[arg(value_delimiter = ',')]
        positions: Vec<String>,

        /// Print the positions present in the dataset
        #[arg(long)]
        list: bool,
    },

    /// Show a player's profile by ID
    Id {
        /// Player ID
        id: u32,

        /// Save the resized photo to this file
        #[arg(long)]
        photo: Option<PathBuf>,

        /// Skip the photo download
        #[arg(long)]
        no_photo: bool,
    },

    /// Compare players' in-game statistics by trait category
    Compare {
        /// Player name (repeat for several players)
        #[arg(short, long = "player", required = true)]
        players: Vec<String>,

        /// Trait category (repeat for several categories)
        #[arg(short, long = "category")]
        categories: Vec<String>,

        /// Write the comparison to an Excel workbook
        #[arg(long)]
        xlsx: Option<PathBuf>,

        /// Write the long-form statistics to CSV
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Display information about the dataset and trait categories
    Info,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let data = dataset::read_dataset(&cli.data)
        .with_context(|| format!("Failed to read dataset {}", cli.data.display()))?;

    match cli.command {
        Commands::Search { term } => {
            search(&data, &term);
        }
        Commands::Position { positions, list } => {
            position(&data, &positions, list);
        }
        Commands::Id { id, photo, no_photo } => {
            profile(&data, id, photo.as_deref(), no_photo)?;
        }
        Commands::Compare { players, categories, xlsx, csv } => {
            let traits = load_traits(&cli.traits)?;
            compare_players(&data, &traits, &players, &categories, xlsx.as_deref(), csv.as_deref())?;
        }
        Commands::Info => {
            let traits = load_traits(&cli.traits)?;
            info(&data, &traits);
        }
    }

    Ok(())
}

fn load_traits(path: &Path) -> Result<TraitCategoryMap> {
    dataset::read_traits(path)
        .with_context(|| format!("Failed to read trait categories {}", path.display()))
}

fn search(data: &Dataset, term: &str) {
    if term.is_empty() {
        println!("Enter a player name or club to search");
        return;
    }

    let found = PlayerQuery::Text(term.to_string()).apply(data);
    if found.is_empty() {
        println!("No results found for '{}'", term);
        return;
    }

    println!("Found {} players for '{}'", found.len(), term);
    print_players(&found);
}

fn position(data: &Dataset, positions: &[String], list: bool) {
    if list {
        println!("Positions: {}", data.positions().join(", "));
        return;
    }

    if positions.is_empty() {
        println!("Select one or more positions (use --list to see them)");
        return;
    }

    let found = PlayerQuery::Positions(positions.to_vec()).apply(data);
    println!("Found {} players for {}", found.len(), positions.join(", "));
    print_players(&found);
}

fn profile(data: &Dataset, id: u32, photo_out: Option<&Path>, no_photo: bool) -> Result<()> {
    let found = PlayerQuery::Id(id).apply(data);
    let Some(player) = found.first() else {
        match data.max_id() {
            Some(max) => println!("No player with ID {} (IDs go up to {})", id, max),
            None => println!("No player with ID {}", id),
        }
        return Ok(());
    };

    let photo = if no_photo { None } else { Some(fetch_photo(player)) };

    let mut stdout = io::stdout().lock();
    write_profile(&mut stdout, player, photo.as_ref())?;

    if let (Some(Photo::Available(image)), Some(path)) = (&photo, photo_out) {
        // A failed save is reported like a failed download
        match image.save(path) {
            Ok(()) => writeln!(stdout, "Saved photo to {}", path.display())?,
            Err(e) => writeln!(stdout, "Warning: Failed to save photo: {}", e)?,
        }
    }

    Ok(())
}

/// Name, photo line and the Player Info table; the table is written whatever
/// happened to the photo
fn write_profile<W: Write>(out: &mut W, player: &Player, photo: Option<&Photo>) -> io::Result<()> {
    writeln!(out, "{}", player.name)?;
    writeln!(out)?;

    match photo {
        Some(Photo::Available(image)) => {
            writeln!(out, "Photo: {} ({}x{})", player.asset_url, image.width(), image.height())?;
            writeln!(out)?;
        }
        Some(unavailable) => {
            if let Some(notice) = unavailable.notice() {
                writeln!(out, "{}", notice)?;
            }
            writeln!(out)?;
        }
        None => {}
    }

    writeln!(out, "{:<16} Player Info", "")?;
    for (column, value) in player.basic_info() {
        writeln!(out, "{:<16} {}", column, value)?;
    }

    Ok(())
}

fn compare_players(
    data: &Dataset,
    traits: &TraitCategoryMap,
    players: &[String],
    categories: &[String],
    xlsx_out: Option<&Path>,
    csv_out: Option<&Path>,
) -> Result<()> {
    if categories.is_empty() {
        let names: Vec<&str> = traits.category_names().collect();
        anyhow::bail!("Select at least one trait category: {}", names.join(", "));
    }

    let comparison = compare::compare(data, traits, players, categories)
        .context("Failed to build comparison")?;

    if comparison.is_empty() {
        println!("None of the selected players were found");
        return Ok(());
    }

    println!("Comparison of {} players", comparison.rows.len());
    println!();
    print_table(&comparison.columns, &comparison.rows);
    println!();

    for stat in &comparison.stats {
        let value = stat.stat.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string());
        println!("{:<24} {:<18} {}", stat.name, stat.trait_name, value);
    }

    if let Some(path) = xlsx_out {
        println!("Writing Excel file: {}", path.display());
        xlsx::write_comparison_to_xlsx(&comparison, path).context("Failed to write Excel file")?;
    }

    if let Some(path) = csv_out {
        println!("Writing CSV file: {}", path.display());
        let file = File::create(path).context("Failed to create CSV file")?;
        compare::write_stats_csv(&comparison.stats, file).context("Failed to write CSV file")?;
    }

    println!("Done!");
    Ok(())
}

fn info(data: &Dataset, traits: &TraitCategoryMap) {
    println!("Players: {}", data.len());
    println!("Columns: {}", data.columns().len());
    if let Some(max) = data.max_id() {
        println!("Highest ID: {}", max);
    }
    println!();

    println!("Positions: {}", data.positions().join(", "));
    println!();

    println!("Trait categories: {}", traits.len());
    for name in traits.category_names() {
        let columns = traits.columns(name).unwrap_or_default();
        println!("  {}: {}", name, columns.join(", "));
    }
}

fn print_players(players: &[&Player]) {
    for player in players.iter().take(50) {
        println!(
            "  {:>6}  {:<24} {:<4} {:>3}  {}",
            player.id, player.name, player.position, player.overall, player.club
        );
    }
    if players.len() > 50 {
        println!("  ... and {} more", players.len() - 50);
    }
}

fn print_table(columns: &[String], rows: &[Vec<String>]) {
    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .filter_map(|r| r.get(i))
                .map(|c| c.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    println!("{}", format_row(columns, &widths));
    for row in rows {
        println!("{}", format_row(row, &widths));
    }
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(c, w)| format!("{:<w$}", c, w = *w))
        .collect::<Vec<_>>()
        .join("  ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use fifa19_stats::{PhotoFetcher, StatsError};

    fn messi() -> Player {
        Player::new(158023, "L. Messi")
            .with_age(31)
            .with_nationality("Argentina")
            .with_club("FC Barcelona")
            .with_position("RF")
            .with_overall(94)
            .with_photo("not a url", "not a url")
    }

    fn render(player: &Player, photo: Option<&Photo>) -> String {
        let mut out = Vec::new();
        write_profile(&mut out, player, photo).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_profile_after_fetcher_build_failure() {
        let player = messi();
        let fetcher: fifa19_stats::Result<PhotoFetcher> =
            Err(StatsError::Photo("TLS backend unavailable".to_string()));
        let photo = Photo::from_fetcher(fetcher, &player);

        let text = render(&player, Some(&photo));
        assert!(text.contains("The photo of L. Messi is not available."));
        assert!(text.contains("Player Info"));
        for (column, value) in player.basic_info() {
            assert!(text.contains(&format!("{:<16} {}", column, value)), "missing {}", column);
        }
    }

    #[test]
    fn test_profile_with_invalid_photo_url() {
        let player = messi();
        let photo = fetch_photo(&player);
        assert!(!photo.is_available());

        let text = render(&player, Some(&photo));
        assert!(text.starts_with("L. Messi\n"));
        assert!(text.contains("FC Barcelona"));
    }

    #[test]
    fn test_profile_without_photo() {
        let text = render(&messi(), None);
        assert!(!text.contains("not available"));
        assert!(text.contains("Player Info"));
    }
}
