//! Interactive query loop and plain-text rendering of results.
//!
//! The loop reads menu choices and arguments line by line, so it can be
//! driven by a terminal or by a scripted reader in tests. User input goes
//! through [`normalize`] before it reaches an index, matching how keys were
//! stored at load time.

use std::io::{self, BufRead, Write};
use std::time::Instant;

use crate::catalog::{Attribute, Catalog, CatalogStats};
use crate::error::CatalogError;
use crate::record::Record;
use crate::text::normalize;

const MENU: &str = "\n--- MOVIE NEXUS ---\n\
1. Search Title\n\
2. Search Actor\n\
3. Search Genre\n\
4. Recommend\n\
5. Shortest Path\n\
6. Stats\n\
7. Exit\n";

/// Write a record as a framed card.
pub fn write_record<W: Write>(out: &mut W, record: &Record) -> io::Result<()> {
    writeln!(out, "==============================")?;
    writeln!(out, " TITLE : {}", record.title)?;
    writeln!(out, " YEAR  : {}", record.year)?;
    writeln!(out, " RATING: {}/10", record.rating)?;
    writeln!(out, " CAST  : {}", record.actors.join(", "))?;
    writeln!(out, " GENRE : {}", record.genres.join(", "))?;
    writeln!(out, "==============================")
}

/// Write a numbered list of titles under a heading.
pub fn write_titles<W: Write>(out: &mut W, heading: &str, records: &[&Record]) -> io::Result<()> {
    writeln!(out, "{heading}")?;
    for (i, record) in records.iter().enumerate() {
        writeln!(out, "{}. {}", i + 1, record.title)?;
    }
    Ok(())
}

/// Write a path as `A -> B -> C`.
pub fn write_path<W: Write>(out: &mut W, records: &[&Record]) -> io::Result<()> {
    let titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
    writeln!(out, "Shortest Path:")?;
    writeln!(out, "{}", titles.join(" -> "))
}

pub fn write_stats<W: Write>(out: &mut W, stats: &CatalogStats) -> io::Result<()> {
    writeln!(out, "records          : {}", stats.records)?;
    writeln!(out, "indexed titles   : {}", stats.titles)?;
    writeln!(out, "title tree height: {}", stats.title_tree_height)?;
    writeln!(out, "actors           : {}", stats.actors)?;
    writeln!(out, "genres           : {}", stats.genres)?;
    writeln!(out, "longest chain    : {}", stats.longest_chain)?;
    writeln!(out, "similarity edges : {}", stats.edges)?;
    writeln!(out, "average degree   : {:.2}", stats.avg_degree)
}

/// Interactive loop over a loaded catalog. Returns on the exit choice or at
/// end of input.
pub fn run_shell<R: BufRead, W: Write>(catalog: &Catalog, input: R, out: &mut W) -> io::Result<()> {
    let mut lines = input.lines();

    loop {
        write!(out, "{MENU}>> ")?;
        out.flush()?;
        let Some(choice) = lines.next().transpose()? else {
            return Ok(());
        };

        match choice.trim() {
            "1" => {
                let Some(title) = prompt(&mut lines, out, "Enter Title: ")? else {
                    return Ok(());
                };
                let started = Instant::now();
                match catalog.find_by_title(&title) {
                    Some(record) => write_record(out, record)?,
                    None => writeln!(out, "Not Found.")?,
                }
                write_elapsed(out, started)?;
            }
            "2" | "3" => {
                let (attribute, label) = if choice.trim() == "2" {
                    (Attribute::Actor, "Enter Actor: ")
                } else {
                    (Attribute::Genre, "Enter Genre: ")
                };
                let Some(key) = prompt(&mut lines, out, label)? else {
                    return Ok(());
                };
                let started = Instant::now();
                match catalog.find_by_attribute(attribute, &key) {
                    Some(records) => write_titles(out, &format!("Found Movies for '{key}':"), &records)?,
                    None => writeln!(out, "Not Found: {key}")?,
                }
                write_elapsed(out, started)?;
            }
            "4" => {
                let Some(title) = prompt(&mut lines, out, "Enter Title: ")? else {
                    return Ok(());
                };
                let started = Instant::now();
                match catalog.recommend_for_title(&title) {
                    Ok(records) => write_titles(out, "Similar Recommendations:", &records)?,
                    Err(_) => writeln!(out, "Movie not found.")?,
                }
                write_elapsed(out, started)?;
            }
            "5" => {
                let Some(from) = prompt(&mut lines, out, "Start Movie: ")? else {
                    return Ok(());
                };
                let Some(to) = prompt(&mut lines, out, "End Movie: ")? else {
                    return Ok(());
                };
                let started = Instant::now();
                match catalog.path_between_titles(&from, &to) {
                    Ok(path) => write_path(out, &path)?,
                    Err(CatalogError::Disconnected { .. }) => writeln!(out, "No Connection Found.")?,
                    Err(_) => writeln!(out, "Invalid Movies.")?,
                }
                write_elapsed(out, started)?;
            }
            "6" => write_stats(out, &catalog.stats())?,
            "7" | "q" | "quit" | "exit" => return Ok(()),
            _ => {}
        }
    }
}

fn prompt<B: BufRead, W: Write>(
    lines: &mut io::Lines<B>,
    out: &mut W,
    label: &str,
) -> io::Result<Option<String>> {
    write!(out, "{label}")?;
    out.flush()?;
    Ok(lines.next().transpose()?.map(|line| normalize(&line)))
}

fn write_elapsed<W: Write>(out: &mut W, started: Instant) -> io::Result<()> {
    let ms = started.elapsed().as_secs_f64() * 1000.0;
    writeln!(out, " [Time: {ms:.3} ms]")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogBuilder;
    use crate::config::CatalogConfig;
    use crate::record::NewRecord;

    fn catalog() -> Catalog {
        let mut builder = CatalogBuilder::new(CatalogConfig::default());
        builder.index_record(NewRecord::new("Heat", 1995, 8.3).genre("Crime").actor("Al Pacino"));
        builder.index_record(NewRecord::new("Casino", 1995, 8.2).genre("Crime"));
        builder.index_record(NewRecord::new("Up", 2009, 8.3).genre("Animation"));
        builder.finish()
    }

    fn run(script: &str) -> String {
        let mut out = Vec::new();
        run_shell(&catalog(), script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_title_search_normalizes_input() {
        let out = run("1\nHeat!\n7\n");
        assert!(out.contains(" TITLE : Heat"));
        assert!(out.contains(" CAST  : Al Pacino"));
        assert!(out.contains("[Time: "));
    }

    #[test]
    fn test_actor_and_genre_search() {
        let out = run("2\nAl Pacino\n3\nWestern\n7\n");
        assert!(out.contains("Found Movies for 'Al Pacino':\n1. Heat"));
        assert!(out.contains("Not Found: Western"));
    }

    #[test]
    fn test_recommend_and_path() {
        let out = run("4\nHeat\n5\nHeat\nCasino\n5\nHeat\nUp\n5\nHeat\nNope\n");
        assert!(out.contains("Similar Recommendations:\n1. Casino"));
        assert!(out.contains("Heat -> Casino"));
        assert!(out.contains("No Connection Found."));
        assert!(out.contains("Invalid Movies."));
    }

    #[test]
    fn test_unknown_choice_and_eof() {
        let out = run("9\n");
        assert_eq!(out.matches("--- MOVIE NEXUS ---").count(), 2);
    }
}
